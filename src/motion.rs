//! Scroll-driven motion for page sections.
//!
//! A [`ProgressSource`] turns an element's position in the viewport into a
//! [`Progress`]; [`Keyframes`] map progress to values; the [`PropertyApplier`]
//! writes those values once per frame; and a [`SectionOrchestrator`] owns all
//! three for one section. None of it touches the browser directly: everything
//! goes through a [`Stage`].

mod apply;
mod error;
mod follow;
mod interpolate;
mod orchestrator;
mod preset;
mod progress;
mod scrub;
mod stage;

pub use apply::{Property, PropertyApplier};
pub use error::{ConfigError, MotionError};
pub use follow::{Follow, FOLLOW_FACTOR};
pub use interpolate::{interpolate, validate, ControlPoint, Easing, Keyframes, Tween};
pub use orchestrator::{MountSummary, SectionOrchestrator, SectionState};
pub use preset::{
    AnimationBinding, BindingSpec, Length, LengthSpec, MotionPresets, PinSpec, ScrubSpec,
    SectionMotion, SectionPlan, TrackPlan, TriggerSpec,
};
pub use progress::{
    Anchor, Distance, Edge, PinOptions, PinRegion, Progress, ProgressHandle, ProgressListener,
    ProgressSource, ProgressWindow, RegionEnd, ScrollRegion, TriggerOptions,
};
pub use scrub::{Driver, Scrub};
pub use stage::{
    Bounds, Breakpoint, FrameToken, ListenerToken, Stage, TargetId, Viewport, MOBILE_MAX_WIDTH,
};
