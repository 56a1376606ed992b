//! Clock adapter: the contract between the engine and a playable media source.
//!
//! The engine never owns decoding. It sees the media element only through
//! this trait: snapshot reads plus a handful of transport commands. Every
//! component that needs the clock receives an explicit handle; there is no
//! module-level singleton.

use serde::{Deserialize, Serialize};

/// Fixed nominal frame rate used to derive frame indices.
pub const NOMINAL_FPS: f64 = 30.0;

/// Returns the frame index for a time position at the nominal frame rate.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is non-negative and floored before the cast"
)]
pub fn frame_at(seconds: f64) -> u64 {
    if seconds <= 0.0 {
        return 0;
    }
    (seconds * NOMINAL_FPS).floor() as u64
}

/// Point-in-time view of the media clock.
///
/// All reads are snapshots; a fresh one is taken on every time-update tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClockSnapshot {
    pub current_time: f64,
    pub duration: f64,
    pub is_playing: bool,
    pub playback_rate: f64,
    pub zoom: f64,
    /// Presentation flag only: toggling it does not invert the media clock.
    pub is_reverse: bool,
    pub current_frame: u64,
    pub total_frames: u64,
}

/// Transport contract for a playable media source.
pub trait ClockAdapter {
    /// Current state of the clock.
    fn snapshot(&self) -> ClockSnapshot;

    /// Jumps to `t`, clamped to `[0, duration]`.
    fn seek(&mut self, t: f64);

    /// Toggles between playing and paused.
    fn toggle_play(&mut self);

    /// Ensures the clock is advancing (no-op when already playing).
    fn play(&mut self);

    /// Sets the playback rate multiplier.
    fn set_rate(&mut self, rate: f64);

    /// Steps one nominal frame forward or backward, clamped to the media.
    fn step_frame(&mut self, direction: i32);

    /// Sets the presentation zoom level.
    fn set_zoom(&mut self, zoom: f64);

    /// Flips the reverse-mode presentation flag.
    fn toggle_reverse(&mut self);
}

/// Deterministic offline clock.
///
/// Stands in for a real media element in tests and in the CLI host: time
/// advances only through explicit [`MediaClock::advance`] calls, scaled by
/// the playback rate, and clamps at the media duration.
#[derive(Debug, Clone)]
pub struct MediaClock {
    current_time: f64,
    duration: f64,
    is_playing: bool,
    playback_rate: f64,
    zoom: f64,
    is_reverse: bool,
}

impl MediaClock {
    /// Creates a paused clock at t=0 for media of the given duration.
    #[must_use]
    pub fn new(duration: f64) -> Self {
        Self {
            current_time: 0.0,
            duration: duration.max(0.0),
            is_playing: false,
            playback_rate: 1.0,
            zoom: 1.0,
            is_reverse: false,
        }
    }

    /// Advances the clock by `dt` seconds of wall time while playing.
    ///
    /// Paused clocks do not move. The position clamps at the media duration
    /// and the clock pauses when it reaches the end.
    pub fn advance(&mut self, dt: f64) {
        if !self.is_playing || dt <= 0.0 {
            return;
        }
        self.current_time = (self.current_time + dt * self.playback_rate).clamp(0.0, self.duration);
        if self.current_time >= self.duration {
            self.is_playing = false;
        }
    }
}

impl ClockAdapter for MediaClock {
    fn snapshot(&self) -> ClockSnapshot {
        ClockSnapshot {
            current_time: self.current_time,
            duration: self.duration,
            is_playing: self.is_playing,
            playback_rate: self.playback_rate,
            zoom: self.zoom,
            is_reverse: self.is_reverse,
            current_frame: frame_at(self.current_time),
            total_frames: frame_at(self.duration),
        }
    }

    fn seek(&mut self, t: f64) {
        self.current_time = t.clamp(0.0, self.duration);
    }

    fn toggle_play(&mut self) {
        self.is_playing = !self.is_playing;
    }

    fn play(&mut self) {
        self.is_playing = true;
    }

    fn set_rate(&mut self, rate: f64) {
        self.playback_rate = rate;
    }

    fn step_frame(&mut self, direction: i32) {
        let step = f64::from(direction.signum()) / NOMINAL_FPS;
        self.current_time = (self.current_time + step).clamp(0.0, self.duration);
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
    }

    fn toggle_reverse(&mut self) {
        self.is_reverse = !self.is_reverse;
    }
}
