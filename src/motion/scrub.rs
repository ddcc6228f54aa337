use super::error::ConfigError;
use super::progress::Progress;

/// Distance below which a smoothed driver snaps onto its target.
const SETTLE_EPSILON: f64 = 1e-3;

/// How a track's timeline position follows scroll progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scrub {
    /// Timeline position is the scroll progress.
    Linked,
    /// Catches up with the scroll progress, taking roughly `lag` seconds.
    Smoothed { lag: f64 },
    /// Plays forward over `duration` seconds once the region is entered and
    /// back again when it is left.
    Toggle { duration: f64 },
}

impl Scrub {
    pub fn smoothed(lag: f64) -> Result<Self, ConfigError> {
        if lag.is_finite() && lag > 0.0 {
            Ok(Self::Smoothed { lag })
        } else {
            Err(ConfigError::InvalidScrub(lag))
        }
    }

    pub fn toggle(duration: f64) -> Result<Self, ConfigError> {
        if duration.is_finite() && duration > 0.0 {
            Ok(Self::Toggle { duration })
        } else {
            Err(ConfigError::InvalidScrub(duration))
        }
    }
}

/// Per-track timeline position, advanced on animation frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Driver {
    scrub: Scrub,
    target: f64,
    current: f64,
    once: bool,
    played: bool,
}

impl Driver {
    pub fn new(scrub: Scrub, once: bool) -> Self {
        Self {
            scrub,
            target: 0.0,
            current: 0.0,
            once,
            played: false,
        }
    }

    pub fn is_linked(&self) -> bool {
        self.scrub == Scrub::Linked
    }

    pub fn current(&self) -> Progress {
        Progress::new(self.current)
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    /// A `once` toggle that has started playing and will never reverse.
    pub fn is_spent(&self) -> bool {
        self.once && self.played
    }

    /// Puts a `once` toggle straight into its played end state.
    pub fn spend(&mut self) {
        if self.once && matches!(self.scrub, Scrub::Toggle { .. }) {
            self.played = true;
            self.target = 1.0;
            self.current = 1.0;
        }
    }

    /// Points the driver at a new scroll progress.
    pub fn retarget(&mut self, progress: Progress) {
        match self.scrub {
            Scrub::Linked => {
                self.target = progress.value();
                self.current = self.target;
            }
            Scrub::Smoothed { .. } => self.target = progress.value(),
            Scrub::Toggle { .. } => {
                if self.once && self.played {
                    return;
                }
                self.target = if progress.value() > 0.0 { 1.0 } else { 0.0 };
                if self.target == 1.0 {
                    self.played = true;
                }
            }
        }
    }

    /// Moves towards the target by `dt` seconds. Returns `true` once settled.
    pub fn advance(&mut self, dt: f64) -> bool {
        match self.scrub {
            Scrub::Linked => self.current = self.target,
            Scrub::Smoothed { lag } => {
                let k = 1.0 - (-3.0 * dt / lag).exp();
                self.current += (self.target - self.current) * k;
                if (self.target - self.current).abs() < SETTLE_EPSILON {
                    self.current = self.target;
                }
            }
            Scrub::Toggle { duration } => {
                let step = dt / duration;
                if self.current < self.target {
                    self.current = (self.current + step).min(self.target);
                } else {
                    self.current = (self.current - step).max(self.target);
                }
            }
        }
        self.is_settled()
    }
}
