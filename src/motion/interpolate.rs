use std::str::FromStr;

use super::error::ConfigError;

/// Shapes the local fraction between two control points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Maps a fraction in `[0, 1]` onto the curve (cubic for the eased forms).
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t * t,
            Self::EaseOut => 1.0 - (1.0 - t).powi(3),
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

impl FromStr for Easing {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" | "none" => Ok(Self::Linear),
            "ease-in" => Ok(Self::EaseIn),
            "ease-out" => Ok(Self::EaseOut),
            "ease-in-out" => Ok(Self::EaseInOut),
            other => Err(ConfigError::UnknownEasing(other.to_string())),
        }
    }
}

/// Values that can sit on a control point.
pub trait Tween: Clone {
    /// The value `t` of the way from `self` to `to`, with `t` in `[0, 1]`.
    fn tween(&self, to: &Self, t: f64) -> Self;
}

impl Tween for f64 {
    fn tween(&self, to: &Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

impl Tween for (f64, f64) {
    fn tween(&self, to: &Self, t: f64) -> Self {
        (self.0.tween(&to.0, t), self.1.tween(&to.1, t))
    }
}

// Discrete values hold until the next control point is reached.

impl Tween for bool {
    fn tween(&self, to: &Self, t: f64) -> Self {
        if t >= 1.0 {
            *to
        } else {
            *self
        }
    }
}

impl Tween for &str {
    fn tween(&self, to: &Self, t: f64) -> Self {
        if t >= 1.0 {
            *to
        } else {
            *self
        }
    }
}

impl Tween for String {
    fn tween(&self, to: &Self, t: f64) -> Self {
        if t >= 1.0 {
            to.clone()
        } else {
            self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControlPoint<T> {
    pub threshold: f64,
    pub value: T,
}

impl<T> ControlPoint<T> {
    pub fn new(threshold: f64, value: T) -> Self {
        Self { threshold, value }
    }
}

impl<T> From<(f64, T)> for ControlPoint<T> {
    fn from((threshold, value): (f64, T)) -> Self {
        Self { threshold, value }
    }
}

/// Checks that `points` can be interpolated without ambiguity.
pub fn validate<T>(points: &[ControlPoint<T>]) -> Result<(), ConfigError> {
    if points.is_empty() {
        return Err(ConfigError::EmptyKeyframes);
    }
    for point in points {
        if !(0.0..=1.0).contains(&point.threshold) {
            return Err(ConfigError::ThresholdOutOfRange(point.threshold));
        }
    }
    for pair in points.windows(2) {
        let (prev, next) = (pair[0].threshold, pair[1].threshold);
        if next == prev {
            return Err(ConfigError::DuplicateThreshold(next));
        }
        if next < prev {
            return Err(ConfigError::UnorderedThresholds(next));
        }
    }
    Ok(())
}

/// Linear interpolation of `progress` over `points`.
///
/// Progress before the first threshold or after the last one is clamped to the
/// boundary value; a single point is constant.
pub fn interpolate<T: Tween>(progress: f64, points: &[ControlPoint<T>]) -> Result<T, ConfigError> {
    validate(points)?;
    Ok(sample(progress, points, Easing::Linear))
}

// `points` must already be validated.
fn sample<T: Tween>(progress: f64, points: &[ControlPoint<T>], easing: Easing) -> T {
    let first = &points[0];
    let last = &points[points.len() - 1];
    if progress.is_nan() || progress <= first.threshold {
        return first.value.clone();
    }
    if progress >= last.threshold {
        return last.value.clone();
    }
    let upper = points
        .iter()
        .position(|p| p.threshold >= progress)
        .unwrap_or(points.len() - 1);
    let (p0, p1) = (&points[upper - 1], &points[upper]);
    let local = (progress - p0.threshold) / (p1.threshold - p0.threshold);
    p0.value.tween(&p1.value, easing.apply(local))
}

/// A validated control point sequence plus its easing.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframes<T> {
    points: Vec<ControlPoint<T>>,
    easing: Easing,
}

impl<T: Tween> Keyframes<T> {
    pub fn new(points: impl IntoIterator<Item = impl Into<ControlPoint<T>>>) -> Result<Self, ConfigError> {
        let points = points.into_iter().map(Into::into).collect::<Vec<_>>();
        validate(&points)?;
        Ok(Self {
            points,
            easing: Easing::Linear,
        })
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn sample(&self, progress: f64) -> T {
        sample(progress, &self.points, self.easing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_two_point_sequence_is_linear() {
        let points = [ControlPoint::new(0.0, 10.0), ControlPoint::new(1.0, 30.0)];
        for i in 0..=20 {
            let p = i as f64 / 20.0;
            let v = interpolate(p, &points).unwrap();
            assert!(close(v, 10.0 + p * 20.0), "p={p} v={v}");
        }
    }

    #[test]
    fn test_out_of_range_progress_clamps_to_boundaries() {
        let points = [ControlPoint::new(0.0, -5.0), ControlPoint::new(1.0, 5.0)];
        assert_eq!(interpolate(-0.5, &points).unwrap(), -5.0);
        assert_eq!(interpolate(-100.0, &points).unwrap(), -5.0);
        assert_eq!(interpolate(1.5, &points).unwrap(), 5.0);
        assert_eq!(interpolate(f64::INFINITY, &points).unwrap(), 5.0);
        assert_eq!(interpolate(f64::NAN, &points).unwrap(), -5.0);
    }

    #[test]
    fn test_clamps_outside_inner_thresholds() {
        let points = [ControlPoint::new(0.2, 0.0), ControlPoint::new(0.6, 100.0)];
        assert_eq!(interpolate(0.0, &points).unwrap(), 0.0);
        assert_eq!(interpolate(0.9, &points).unwrap(), 100.0);
        assert!(close(interpolate(0.4, &points).unwrap(), 50.0));
    }

    #[test]
    fn test_picks_bracketing_pair() {
        let points = [
            ControlPoint::new(0.0, 0.02),
            ControlPoint::new(0.5, 0.12),
            ControlPoint::new(1.0, 0.02),
        ];
        assert!(close(interpolate(0.25, &points).unwrap(), 0.07));
        assert!(close(interpolate(0.5, &points).unwrap(), 0.12));
        assert!(close(interpolate(0.75, &points).unwrap(), 0.07));
    }

    #[test]
    fn test_single_point_is_constant() {
        let points = [ControlPoint::new(0.5, "visible")];
        assert_eq!(interpolate(0.0, &points).unwrap(), "visible");
        assert_eq!(interpolate(0.9, &points).unwrap(), "visible");
        assert_eq!(interpolate(0.0, &points), interpolate(0.9, &points));
    }

    #[test]
    fn test_discrete_values_step_at_next_threshold() {
        let points = [ControlPoint::new(0.0, "hidden"), ControlPoint::new(0.5, "shown")];
        assert_eq!(interpolate(0.49, &points).unwrap(), "hidden");
        assert_eq!(interpolate(0.5, &points).unwrap(), "shown");
        assert_eq!(interpolate(0.8, &points).unwrap(), "shown");
    }

    #[test]
    fn test_coordinates_interpolate_per_axis() {
        let points = [ControlPoint::new(0.0, (0.0, 100.0)), ControlPoint::new(1.0, (50.0, 0.0))];
        assert_eq!(interpolate(0.5, &points).unwrap(), (25.0, 50.0));
    }

    #[test]
    fn test_degenerate_sequence_is_rejected() {
        let points = [ControlPoint::new(0.3, "a"), ControlPoint::new(0.3, "b")];
        assert_eq!(interpolate(0.3, &points), Err(ConfigError::DuplicateThreshold(0.3)));
        assert!(Keyframes::new(points).is_err());
    }

    #[test]
    fn test_invalid_sequences_are_rejected() {
        let empty: [ControlPoint<f64>; 0] = [];
        assert_eq!(validate(&empty), Err(ConfigError::EmptyKeyframes));

        let unordered = [ControlPoint::new(0.8, 1.0), ControlPoint::new(0.2, 0.0)];
        assert_eq!(validate(&unordered), Err(ConfigError::UnorderedThresholds(0.2)));

        let outside = [ControlPoint::new(0.0, 1.0), ControlPoint::new(1.2, 0.0)];
        assert_eq!(validate(&outside), Err(ConfigError::ThresholdOutOfRange(1.2)));
    }

    #[test]
    fn test_easing_endpoints_and_shape() {
        for easing in [Easing::Linear, Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut] {
            assert!(close(easing.apply(0.0), 0.0));
            assert!(close(easing.apply(1.0), 1.0));
        }
        assert!(Easing::EaseIn.apply(0.5) < 0.5);
        assert!(Easing::EaseOut.apply(0.5) > 0.5);
        assert!(close(Easing::EaseInOut.apply(0.5), 0.5));
        assert!(Easing::EaseInOut.apply(0.25) < 0.25);
    }

    #[test]
    fn test_easing_applies_to_local_fraction() {
        let frames = Keyframes::new([(0.0, 0.0), (0.5, 100.0), (1.0, 200.0)])
            .unwrap()
            .with_easing(Easing::EaseOut);
        // halfway through the second segment
        let expected = 100.0 + 100.0 * Easing::EaseOut.apply(0.5);
        assert!(close(frames.sample(0.75), expected));
        assert_eq!(frames.sample(0.5), 100.0);
    }

    #[test]
    fn test_easing_names() {
        assert_eq!("ease-in-out".parse::<Easing>(), Ok(Easing::EaseInOut));
        assert_eq!("none".parse::<Easing>(), Ok(Easing::Linear));
        assert_eq!(
            "power3.out".parse::<Easing>(),
            Err(ConfigError::UnknownEasing("power3.out".to_string()))
        );
        assert_eq!("ease-out".parse::<Easing>(), Ok(Easing::EaseOut));
    }
}
