//! Frame-driven countdowns.
//!
//! A [`Countdown`] replaces a host timer service: the owner advances it by the
//! frame duration and checks for expiry in the same call, so completion logic
//! runs inline on the frame where `elapsed >= duration`.

/// Elapsed-time counter with a fixed duration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Countdown {
    duration: f32,
    elapsed: f32,
}

impl Countdown {
    /// Creates a countdown that expires after `duration` seconds.
    ///
    /// Negative or non-finite durations are treated as zero, which expires on
    /// the first advance.
    pub fn new(duration: f32) -> Self {
        let duration = if duration.is_finite() {
            duration.max(0.0)
        } else {
            0.0
        };
        Self {
            duration,
            elapsed: 0.0,
        }
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Seconds elapsed since start, clamped to the duration.
    pub fn elapsed(&self) -> f32 {
        self.elapsed.min(self.duration)
    }

    /// Elapsed fraction in `[0, 1]`. A zero-length countdown reports `1.0`.
    pub fn fraction(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_expired(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advances by `dt` seconds and returns whether the countdown has expired.
    ///
    /// Non-positive or non-finite `dt` values do not move time.
    pub fn advance(&mut self, dt: f32) -> bool {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        self.is_expired()
    }

    /// Advances a looping countdown, wrapping the elapsed time at each period
    /// boundary. Returns the number of boundaries crossed.
    pub fn advance_wrapping(&mut self, dt: f32) -> u32 {
        if !(dt.is_finite() && dt > 0.0) || self.duration <= 0.0 {
            return 0;
        }
        self.elapsed += dt;
        // Float-to-int casts saturate, so huge steps report u32::MAX wraps.
        let wraps = (self.elapsed / self.duration).floor() as u32;
        self.elapsed = self.elapsed.rem_euclid(self.duration);
        wraps
    }

    pub fn restart(&mut self) {
        self.elapsed = 0.0;
    }
}
