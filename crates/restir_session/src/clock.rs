// SPDX-License-Identifier: MIT OR Apache-2.0
//! Simulation clock.
//!
//! With a framerate of zero the clock follows wall time. A non-zero framerate
//! switches to fixed steps of `1 / framerate` seconds, and the clock can then
//! also be positioned by frame number.

use serde::{Deserialize, Serialize};

/// Simulation clock
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Clock {
    time: f64,
    framerate: u32,
}

impl Clock {
    /// Create a real-time clock at time zero
    pub fn new() -> Self {
        Self {
            time: 0.0,
            framerate: 0,
        }
    }

    /// Current time in seconds
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Set the current time in seconds
    pub fn set_time(&mut self, time: f64) -> Result<(), ClockError> {
        if !time.is_finite() || time < 0.0 {
            return Err(ClockError::InvalidTime(time));
        }
        self.time = time;
        Ok(())
    }

    /// Frames per second; zero means real time
    pub fn framerate(&self) -> u32 {
        self.framerate
    }

    /// Set frames per second; zero switches back to real time
    pub fn set_framerate(&mut self, framerate: u32) {
        self.framerate = framerate;
    }

    /// Whether time advances in fixed steps
    pub fn is_fixed_step(&self) -> bool {
        self.framerate != 0
    }

    /// Duration of one fixed step
    pub fn time_step(&self) -> Option<f64> {
        self.is_fixed_step().then(|| 1.0 / f64::from(self.framerate))
    }

    /// Current frame number, in fixed-step mode
    pub fn frame(&self) -> Option<u64> {
        // Nudge so that frame -> time -> frame is stable under rounding
        self.is_fixed_step()
            .then(|| (self.time * f64::from(self.framerate) + 1e-6).floor() as u64)
    }

    /// Position the clock at a frame; requires fixed-step mode
    pub fn set_frame(&mut self, frame: u64) -> Result<(), ClockError> {
        let step = self.time_step().ok_or(ClockError::RealTime)?;
        self.time = frame as f64 * step;
        Ok(())
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

/// Clock errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClockError {
    /// Negative or non-finite time
    #[error("Invalid clock time: {0}")]
    InvalidTime(f64),

    /// Frame positioning without a framerate
    #[error("Clock frame can only be set when the framerate is non-zero")]
    RealTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_real_time() {
        let clock = Clock::default();
        assert_eq!(clock.time(), 0.0);
        assert!(!clock.is_fixed_step());
        assert_eq!(clock.frame(), None);
        assert_eq!(clock.time_step(), None);
    }

    #[test]
    fn test_fixed_step() {
        let mut clock = Clock::new();
        clock.set_framerate(30);
        assert_eq!(clock.frame(), Some(0));

        clock.set_frame(45).unwrap();
        assert!((clock.time() - 1.5).abs() < 1e-12);
        assert_eq!(clock.frame(), Some(45));

        clock.set_frame(7).unwrap();
        assert_eq!(clock.frame(), Some(7));
    }

    #[test]
    fn test_frame_requires_framerate() {
        let mut clock = Clock::new();
        assert_eq!(clock.set_frame(10), Err(ClockError::RealTime));
    }

    #[test]
    fn test_invalid_time() {
        let mut clock = Clock::new();
        assert!(clock.set_time(-1.0).is_err());
        assert!(clock.set_time(f64::INFINITY).is_err());
        clock.set_time(2.0).unwrap();
        assert_eq!(clock.time(), 2.0);
    }
}
