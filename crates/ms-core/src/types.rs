//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Invalid work category value.
    #[error("invalid category: {value}")]
    InvalidCategory { value: String },

    /// Invalid therblig code.
    #[error("invalid therblig code: {value}")]
    InvalidTherblig { value: String },
}

/// A validated measurement identifier.
///
/// Measurement IDs must be non-empty strings. They are assigned at creation
/// (UUID v4 by default) and never change for the lifetime of the measurement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MeasurementId(String);

impl MeasurementId {
    /// Creates a new ID after validation.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::Empty {
                field: "measurement ID",
            });
        }
        Ok(Self(id))
    }

    /// Generates a fresh random ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MeasurementId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MeasurementId> for String {
    fn from(id: MeasurementId) -> Self {
        id.0
    }
}

impl fmt::Display for MeasurementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for MeasurementId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Work-element category for lean analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Category {
    /// Work the customer pays for.
    ValueAdded,
    /// Necessary but not value-adding (default for new elements).
    #[default]
    NonValueAdded,
    /// Pure waste, candidate for elimination.
    Waste,
}

impl Category {
    /// Canonical string representation, as shown to analysts.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ValueAdded => "Value-added",
            Self::NonValueAdded => "Non value-added",
            Self::Waste => "Waste",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Value-added" => Ok(Self::ValueAdded),
            "Non value-added" => Ok(Self::NonValueAdded),
            "Waste" => Ok(Self::Waste),
            _ => Err(ValidationError::InvalidCategory {
                value: s.to_string(),
            }),
        }
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Therblig method-classification codes (Gilbreth system).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Therblig {
    /// TE - Transport empty (reach).
    TransportEmpty,
    /// TL - Transport loaded.
    TransportLoaded,
    /// PP - Pre-position.
    PrePosition,
    /// G - Grasp.
    Grasp,
    /// A - Assemble.
    Assemble,
    /// DA - Disassemble.
    Disassemble,
    /// RL - Release load.
    ReleaseLoad,
    /// TR - Transport.
    Transport,
    /// H - Hold.
    Hold,
    /// UD - Unavoidable delay.
    UnavoidableDelay,
    /// AD - Avoidable delay.
    AvoidableDelay,
    /// P - Position.
    Position,
    /// I - Inspect.
    Inspect,
    /// PN - Plan.
    Plan,
    /// ST - Search.
    Search,
    /// S - Select.
    Select,
    /// F - Find.
    Find,
}

impl Therblig {
    /// All codes in display order.
    pub const ALL: [Self; 17] = [
        Self::TransportEmpty,
        Self::TransportLoaded,
        Self::PrePosition,
        Self::Grasp,
        Self::Assemble,
        Self::Disassemble,
        Self::ReleaseLoad,
        Self::Transport,
        Self::Hold,
        Self::UnavoidableDelay,
        Self::AvoidableDelay,
        Self::Position,
        Self::Inspect,
        Self::Plan,
        Self::Search,
        Self::Select,
        Self::Find,
    ];

    /// Short code used in tables and serialized data.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::TransportEmpty => "TE",
            Self::TransportLoaded => "TL",
            Self::PrePosition => "PP",
            Self::Grasp => "G",
            Self::Assemble => "A",
            Self::Disassemble => "DA",
            Self::ReleaseLoad => "RL",
            Self::Transport => "TR",
            Self::Hold => "H",
            Self::UnavoidableDelay => "UD",
            Self::AvoidableDelay => "AD",
            Self::Position => "P",
            Self::Inspect => "I",
            Self::Plan => "PN",
            Self::Search => "ST",
            Self::Select => "S",
            Self::Find => "F",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::TransportEmpty => "Transport Empty",
            Self::TransportLoaded => "Transport Loaded",
            Self::PrePosition => "Pre-Position",
            Self::Grasp => "Grasp",
            Self::Assemble => "Assemble",
            Self::Disassemble => "Disassemble",
            Self::ReleaseLoad => "Release Load",
            Self::Transport => "Transport",
            Self::Hold => "Hold",
            Self::UnavoidableDelay => "Unavoidable Delay",
            Self::AvoidableDelay => "Avoidable Delay",
            Self::Position => "Position",
            Self::Inspect => "Inspect",
            Self::Plan => "Plan",
            Self::Search => "Search",
            Self::Select => "Select",
            Self::Find => "Find",
        }
    }
}

impl fmt::Display for Therblig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Therblig {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TE" => Ok(Self::TransportEmpty),
            "TL" => Ok(Self::TransportLoaded),
            "PP" => Ok(Self::PrePosition),
            "G" => Ok(Self::Grasp),
            "A" => Ok(Self::Assemble),
            "DA" => Ok(Self::Disassemble),
            "RL" => Ok(Self::ReleaseLoad),
            "TR" => Ok(Self::Transport),
            "H" => Ok(Self::Hold),
            "UD" => Ok(Self::UnavoidableDelay),
            "AD" => Ok(Self::AvoidableDelay),
            "P" => Ok(Self::Position),
            "I" => Ok(Self::Inspect),
            "PN" => Ok(Self::Plan),
            "ST" => Ok(Self::Search),
            "S" => Ok(Self::Select),
            "F" => Ok(Self::Find),
            _ => Err(ValidationError::InvalidTherblig {
                value: s.to_string(),
            }),
        }
    }
}

impl Serialize for Therblig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Therblig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measurement_id_rejects_empty() {
        assert!(MeasurementId::new("").is_err());
        assert!(MeasurementId::new("valid-id").is_ok());
    }

    #[test]
    fn measurement_id_generate_is_unique() {
        let a = MeasurementId::generate();
        let b = MeasurementId::generate();
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }

    #[test]
    fn measurement_id_serde_roundtrip() {
        let id = MeasurementId::new("m-123").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"m-123\"");
        let parsed: MeasurementId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn measurement_id_serde_rejects_empty() {
        let result: Result<MeasurementId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn category_roundtrip_all_variants() {
        for category in [Category::ValueAdded, Category::NonValueAdded, Category::Waste] {
            let s = category.to_string();
            let parsed: Category = s.parse().expect("should parse");
            assert_eq!(parsed, category, "roundtrip failed for {category:?}");
        }
    }

    #[test]
    fn category_serde_uses_display_names() {
        let json = serde_json::to_string(&Category::NonValueAdded).unwrap();
        assert_eq!(json, "\"Non value-added\"");
        let parsed: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Category::NonValueAdded);
    }

    #[test]
    fn category_unknown_value_errors() {
        let result: Result<Category, _> = "Sideways".parse();
        assert!(result.is_err());
    }

    #[test]
    fn category_default_is_non_value_added() {
        assert_eq!(Category::default(), Category::NonValueAdded);
    }

    #[test]
    fn therblig_codes_roundtrip() {
        for therblig in Therblig::ALL {
            let code = therblig.code();
            let parsed: Therblig = code.parse().expect("should parse");
            assert_eq!(parsed, therblig, "roundtrip failed for {code}");
        }
    }

    #[test]
    fn therblig_codes_are_unique() {
        let mut codes: Vec<&str> = Therblig::ALL.iter().map(Therblig::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), Therblig::ALL.len());
    }

    #[test]
    fn therblig_unknown_code_errors() {
        let result: Result<Therblig, _> = "XX".parse();
        assert!(result.is_err());
    }
}
