use std::collections::HashMap;
use std::str::FromStr;

use serde::Deserialize;

use super::apply::Property;
use super::error::{ConfigError, MotionError};
use super::interpolate::{Easing, Keyframes};
use super::progress::{Anchor, PinOptions, Progress, ProgressWindow, RegionEnd, TriggerOptions};
use super::scrub::Scrub;
use super::stage::{Breakpoint, TargetId, Viewport};

/// A keyframe value: plain pixels (or unitless), or a share of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f64),
    Vw(f64),
    Vh(f64),
}

impl Length {
    pub fn resolve(self, viewport: Viewport) -> f64 {
        match self {
            Self::Px(v) => v,
            Self::Vw(v) => v / 100.0 * viewport.width,
            Self::Vh(v) => v / 100.0 * viewport.height,
        }
    }
}

impl FromStr for Length {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidLength(s.to_string());
        let s = s.trim();
        let (number, make): (&str, fn(f64) -> Length) = if let Some(n) = s.strip_suffix("vw") {
            (n, Length::Vw)
        } else if let Some(n) = s.strip_suffix("vh") {
            (n, Length::Vh)
        } else {
            (s.strip_suffix("px").unwrap_or(s), Length::Px)
        };
        number.trim().parse::<f64>().map(make).map_err(|_| invalid())
    }
}

/// Keyframe value as written in the preset file: `0.5`, `"-80vh"`, `"20px"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LengthSpec {
    Number(f64),
    Text(String),
}

impl TryFrom<&LengthSpec> for Length {
    type Error = ConfigError;

    fn try_from(value: &LengthSpec) -> Result<Self, Self::Error> {
        match value {
            LengthSpec::Number(v) => Ok(Length::Px(*v)),
            LengthSpec::Text(s) => s.parse(),
        }
    }
}

/// `true` links the timeline to scroll, a number smooths it with that lag in
/// seconds, `false` plays it over `duration` when the region is entered.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScrubSpec {
    Flag(bool),
    Lag(f64),
}

impl Default for ScrubSpec {
    fn default() -> Self {
        Self::Flag(false)
    }
}

impl ScrubSpec {
    fn resolve(self, duration: f64) -> Result<Scrub, ConfigError> {
        match self {
            Self::Flag(true) => Ok(Scrub::Linked),
            Self::Flag(false) => Scrub::toggle(duration),
            Self::Lag(lag) => Scrub::smoothed(lag),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PinSpec {
    Flag(bool),
    Options {
        #[serde(default)]
        target: Option<TargetId>,
        #[serde(default = "default_true")]
        spacing: bool,
    },
}

impl Default for PinSpec {
    fn default() -> Self {
        Self::Flag(false)
    }
}

impl PinSpec {
    fn options(&self) -> Option<PinOptions> {
        match self {
            Self::Flag(false) => None,
            Self::Flag(true) => Some(PinOptions {
                target: None,
                spacing: true,
            }),
            Self::Options { target, spacing } => Some(PinOptions {
                target: target.clone(),
                spacing: *spacing,
            }),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_start() -> String {
    "top top".to_string()
}

fn default_end() -> String {
    "bottom top".to_string()
}

fn default_duration() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BindingSpec {
    pub targets: Vec<TargetId>,
    pub property: String,
    pub keyframes: Vec<(f64, LengthSpec)>,
    #[serde(default)]
    pub easing: Option<String>,
    #[serde(default)]
    pub stagger: f64,
}

impl BindingSpec {
    /// One binding per target. Configuration problems are checked before the
    /// property name so an invalid preset is never partially applied.
    fn plan(&self, viewport: Viewport) -> Result<Vec<AnimationBinding>, MotionError> {
        if self.targets.is_empty() {
            return Err(ConfigError::NoTargets.into());
        }
        let easing = match &self.easing {
            Some(name) => name.parse::<Easing>()?,
            None => Easing::Linear,
        };
        let points = self
            .keyframes
            .iter()
            .map(|(threshold, value)| -> Result<(f64, f64), ConfigError> {
                Ok((*threshold, Length::try_from(value)?.resolve(viewport)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let keyframes = Keyframes::new(points)?.with_easing(easing);
        let count = self.targets.len();
        let windows = (0..count)
            .map(|index| ProgressWindow::staggered(index, count, self.stagger))
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let property = self.property.parse::<Property>()?;
        Ok(self
            .targets
            .iter()
            .zip(windows)
            .map(|(target, window)| AnimationBinding {
                target: target.clone(),
                property,
                keyframes: keyframes.clone(),
                window,
            })
            .collect())
    }
}

/// One scroll-triggered timeline: a trigger element, its region and what it
/// animates.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TriggerSpec {
    pub trigger: TargetId,
    #[serde(default = "default_start")]
    pub start: String,
    #[serde(default = "default_end")]
    pub end: String,
    #[serde(default)]
    pub pin: PinSpec,
    #[serde(default)]
    pub scrub: ScrubSpec,
    #[serde(default = "default_duration")]
    pub duration: f64,
    #[serde(default)]
    pub once: bool,
    #[serde(default)]
    pub bindings: Vec<BindingSpec>,
}

impl TriggerSpec {
    fn plan(&self, viewport: Viewport, skipped: &mut Vec<MotionError>) -> Result<TrackPlan, ConfigError> {
        let start = self.start.parse::<Anchor>()?;
        let end = self.end.parse::<RegionEnd>()?;
        if let RegionEnd::Distance(distance) = end {
            distance.resolve(viewport)?;
        }
        let scrub = self.scrub.resolve(self.duration)?;

        let mut bindings = Vec::new();
        for spec in &self.bindings {
            match spec.plan(viewport) {
                Ok(planned) => bindings.extend(planned),
                Err(MotionError::Config(err)) => return Err(err),
                Err(err) => skipped.push(err),
            }
        }

        Ok(TrackPlan {
            trigger: self.trigger.clone(),
            options: TriggerOptions {
                start,
                end,
                pin: self.pin.options(),
            },
            scrub,
            once: self.once,
            bindings,
        })
    }
}

/// Motion preset of one page section, with an optional narrow-screen variant.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SectionMotion {
    #[serde(default)]
    pub triggers: Vec<TriggerSpec>,
    #[serde(default)]
    pub mobile: Option<Vec<TriggerSpec>>,
}

impl SectionMotion {
    pub fn triggers_for(&self, breakpoint: Breakpoint) -> &[TriggerSpec] {
        match (breakpoint, &self.mobile) {
            (Breakpoint::Mobile, Some(mobile)) => mobile,
            _ => &self.triggers,
        }
    }

    /// Validates and resolves the preset against `viewport`.
    ///
    /// Any [`ConfigError`] rejects the whole section; bindings with an
    /// unsupported property are left out and reported in
    /// [`SectionPlan::skipped`].
    pub fn plan(&self, viewport: Viewport) -> Result<SectionPlan, ConfigError> {
        let mut plan = SectionPlan::default();
        for spec in self.triggers_for(viewport.breakpoint()) {
            let track = spec.plan(viewport, &mut plan.skipped)?;
            plan.tracks.push(track);
        }
        Ok(plan)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(transparent)]
pub struct MotionPresets {
    sections: HashMap<String, SectionMotion>,
}

impl MotionPresets {
    pub fn section(&self, name: &str) -> Result<&SectionMotion, MotionError> {
        self.sections
            .get(name)
            .ok_or_else(|| MotionError::UnknownSection(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SectionPlan {
    pub tracks: Vec<TrackPlan>,
    pub skipped: Vec<MotionError>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackPlan {
    pub trigger: TargetId,
    pub options: TriggerOptions,
    pub scrub: Scrub,
    pub once: bool,
    pub bindings: Vec<AnimationBinding>,
}

/// One target property driven by one timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationBinding {
    pub target: TargetId,
    pub property: Property,
    pub keyframes: Keyframes<f64>,
    pub window: ProgressWindow,
}

impl AnimationBinding {
    pub fn value_at(&self, progress: Progress) -> f64 {
        self.keyframes.sample(self.window.local(progress).value())
    }
}
