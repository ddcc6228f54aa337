use thiserror::Error;

/// Problems found while validating a motion preset.
///
/// These are detected when a section mounts, never while it animates. A
/// section that hits one stays static.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("keyframe sequence is empty")]
    EmptyKeyframes,
    #[error("duplicate keyframe threshold {0}")]
    DuplicateThreshold(f64),
    #[error("keyframe thresholds must ascend, found {0} after a larger one")]
    UnorderedThresholds(f64),
    #[error("keyframe threshold {0} is outside 0..=1")]
    ThresholdOutOfRange(f64),
    #[error("scroll distance must be positive, got {0}")]
    InvalidDistance(f64),
    #[error("scroll region is empty (start {start}, end {end})")]
    EmptyRegion { start: f64, end: f64 },
    #[error("pin region must end after it starts (start {start}, end {end})")]
    InvalidPinRegion { start: f64, end: f64 },
    #[error("unknown easing `{0}`")]
    UnknownEasing(String),
    #[error("invalid anchor `{0}`")]
    InvalidAnchor(String),
    #[error("invalid length `{0}`")]
    InvalidLength(String),
    #[error("stagger {stagger} leaves no room to animate {targets} targets")]
    StaggerOverflow { stagger: f64, targets: usize },
    #[error("scrub lag must be positive seconds, got {0}")]
    InvalidScrub(f64),
    #[error("binding has no targets")]
    NoTargets,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MotionError {
    #[error("invalid motion configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("unsupported property `{0}`")]
    UnsupportedProperty(String),
    #[error("no motion preset for section `{0}`")]
    UnknownSection(String),
}
