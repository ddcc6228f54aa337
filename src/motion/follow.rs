/// Fraction of the remaining distance covered each frame.
pub const FOLLOW_FACTOR: f64 = 0.15;

/// A point that eases towards a moving target, one step per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Follow {
    current: (f64, f64),
    target: (f64, f64),
    factor: f64,
}

impl Default for Follow {
    fn default() -> Self {
        Self::new(FOLLOW_FACTOR)
    }
}

impl Follow {
    pub fn new(factor: f64) -> Self {
        Self {
            current: (0.0, 0.0),
            target: (0.0, 0.0),
            factor: factor.clamp(0.0, 1.0),
        }
    }

    pub fn retarget(&mut self, x: f64, y: f64) {
        self.target = (x, y);
    }

    /// Jumps straight to the target, e.g. when the follower first appears.
    pub fn snap(&mut self) {
        self.current = self.target;
    }

    pub fn step(&mut self) -> (f64, f64) {
        let (x, y) = self.current;
        let (tx, ty) = self.target;
        self.current = (x + (tx - x) * self.factor, y + (ty - y) * self.factor);
        self.current
    }

    pub fn position(&self) -> (f64, f64) {
        self.current
    }
}
