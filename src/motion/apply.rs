use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use super::error::MotionError;
use super::stage::{FrameToken, Stage, TargetId};

/// Visual properties the applier knows how to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Property {
    Opacity,
    TranslateX,
    TranslateY,
    Scale,
}

impl Property {
    pub const ALL: [Property; 4] = [Self::Opacity, Self::TranslateX, Self::TranslateY, Self::Scale];

    pub fn name(self) -> &'static str {
        match self {
            Self::Opacity => "opacity",
            Self::TranslateX => "translateX",
            Self::TranslateY => "translateY",
            Self::Scale => "scale",
        }
    }

    /// Custom property read by the `.motion` rule in the stylesheet.
    pub fn css_var(self) -> &'static str {
        match self {
            Self::Opacity => "--motion-opacity",
            Self::TranslateX => "--motion-x",
            Self::TranslateY => "--motion-y",
            Self::Scale => "--motion-scale",
        }
    }

    pub fn css_value(self, value: f64) -> String {
        match self {
            Self::TranslateX | Self::TranslateY => format!("{value}px"),
            Self::Opacity | Self::Scale => format!("{value}"),
        }
    }
}

impl FromStr for Property {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| MotionError::UnsupportedProperty(s.to_string()))
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameState {
    Idle,
    Requested(FrameToken),
    Flushing,
}

/// Writes values to the stage, at most once per frame per (target, property).
///
/// `apply` only queues. The first queued value requests a frame; the frame
/// calls [`PropertyApplier::begin_frame`] and [`PropertyApplier::flush`], which
/// writes the last queued value of each key.
#[derive(Debug)]
pub struct PropertyApplier {
    pending: BTreeMap<(TargetId, Property), f64>,
    committed: HashMap<(TargetId, Property), f64>,
    written: BTreeSet<TargetId>,
    frame: FrameState,
}

impl Default for PropertyApplier {
    fn default() -> Self {
        Self {
            pending: BTreeMap::new(),
            committed: HashMap::new(),
            written: BTreeSet::new(),
            frame: FrameState::Idle,
        }
    }
}

impl PropertyApplier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, stage: &mut dyn Stage, target: &TargetId, property: Property, value: f64) {
        self.pending.insert((target.clone(), property), value);
        self.schedule(stage);
    }

    pub fn apply_named(
        &mut self,
        stage: &mut dyn Stage,
        target: &TargetId,
        property: &str,
        value: f64,
    ) -> Result<(), MotionError> {
        let property = property.parse()?;
        self.apply(stage, target, property, value);
        Ok(())
    }

    /// Requests a frame unless one is already outstanding. A refused request
    /// leaves the queue in place for the next call to retry.
    pub fn schedule(&mut self, stage: &mut dyn Stage) {
        if self.frame == FrameState::Idle {
            if let Some(token) = stage.request_frame() {
                self.frame = FrameState::Requested(token);
            }
        }
    }

    pub fn frame_requested(&self) -> Option<FrameToken> {
        match self.frame {
            FrameState::Requested(token) => Some(token),
            _ => None,
        }
    }

    /// Claims the frame callback for `token`. Returns `false` for a token that
    /// was cancelled or superseded, in which case nothing must be flushed.
    pub fn begin_frame(&mut self, token: FrameToken) -> bool {
        if self.frame == FrameState::Requested(token) {
            self.frame = FrameState::Flushing;
            true
        } else {
            false
        }
    }

    /// Writes every queued value and returns how many writes reached the stage.
    pub fn flush(&mut self, stage: &mut dyn Stage) -> usize {
        if self.frame == FrameState::Flushing {
            self.frame = FrameState::Idle;
        }
        let mut writes = 0;
        for ((target, property), value) in std::mem::take(&mut self.pending) {
            let key = (target, property);
            if self.committed.get(&key) == Some(&value) {
                continue;
            }
            stage.write(&key.0, property, value);
            self.written.insert(key.0.clone());
            self.committed.insert(key, value);
            writes += 1;
        }
        writes
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Drops queued values and the outstanding frame request.
    pub fn cancel(&mut self, stage: &mut dyn Stage) {
        self.pending.clear();
        if let FrameState::Requested(token) = self.frame {
            stage.cancel_frame(token);
        }
        self.frame = FrameState::Idle;
    }

    /// Cancels, then restores every target written so far to its static style.
    pub fn reset(&mut self, stage: &mut dyn Stage) {
        self.cancel(stage);
        for target in std::mem::take(&mut self.written) {
            stage.reset(&target);
        }
        self.committed.clear();
    }

    pub fn written(&self) -> impl Iterator<Item = &TargetId> {
        self.written.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::stage::recording::RecordingStage;

    #[test]
    fn test_property_names() {
        assert_eq!("translateY".parse::<Property>(), Ok(Property::TranslateY));
        assert_eq!(
            "rotate".parse::<Property>(),
            Err(MotionError::UnsupportedProperty("rotate".to_string()))
        );
        assert_eq!(Property::TranslateX.css_value(-12.5), "-12.5px");
        assert_eq!(Property::Opacity.css_value(0.4), "0.4");
    }

    #[test]
    fn test_two_applies_in_one_frame_write_once() {
        let mut stage = RecordingStage::new(1280.0, 800.0);
        let mut applier = PropertyApplier::new();
        let title = TargetId::from("title");

        applier.apply(&mut stage, &title, Property::Opacity, 0.3);
        applier.apply(&mut stage, &title, Property::Opacity, 0.7);
        assert!(stage.writes.is_empty());
        assert_eq!(stage.frames.len(), 1);

        let token = stage.take_frame().unwrap();
        assert!(applier.begin_frame(token));
        assert_eq!(applier.flush(&mut stage), 1);
        assert_eq!(stage.writes_to("title", Property::Opacity), vec![0.7]);
    }

    #[test]
    fn test_unchanged_values_are_not_rewritten() {
        let mut stage = RecordingStage::new(1280.0, 800.0);
        let mut applier = PropertyApplier::new();
        let title = TargetId::from("title");

        applier.apply(&mut stage, &title, Property::Scale, 1.1);
        let token = stage.take_frame().unwrap();
        applier.begin_frame(token);
        applier.flush(&mut stage);

        applier.apply(&mut stage, &title, Property::Scale, 1.1);
        let token = stage.take_frame().unwrap();
        applier.begin_frame(token);
        assert_eq!(applier.flush(&mut stage), 0);
        assert_eq!(stage.writes.len(), 1);
    }

    #[test]
    fn test_unsupported_property_is_rejected() {
        let mut stage = RecordingStage::new(1280.0, 800.0);
        let mut applier = PropertyApplier::new();
        let result = applier.apply_named(&mut stage, &"title".into(), "filter", 1.0);
        assert_eq!(result, Err(MotionError::UnsupportedProperty("filter".to_string())));
        assert!(!applier.has_pending());
        assert!(stage.frames.is_empty());
    }

    #[test]
    fn test_stale_frame_token_is_ignored() {
        let mut stage = RecordingStage::new(1280.0, 800.0);
        let mut applier = PropertyApplier::new();
        applier.apply(&mut stage, &"title".into(), Property::Opacity, 1.0);
        let stale = applier.frame_requested().unwrap();

        applier.cancel(&mut stage);
        assert_eq!(stage.cancelled, vec![stale]);
        assert!(!applier.begin_frame(stale));
        assert!(stage.writes.is_empty());
    }

    #[test]
    fn test_refused_frame_is_retried_on_next_apply() {
        let mut stage = RecordingStage::new(1280.0, 800.0);
        let mut applier = PropertyApplier::new();
        let title = TargetId::from("title");

        stage.refuse_frames = true;
        applier.apply(&mut stage, &title, Property::Opacity, 0.2);
        assert_eq!(applier.frame_requested(), None);
        assert!(applier.has_pending());

        stage.refuse_frames = false;
        applier.apply(&mut stage, &title, Property::TranslateY, 8.0);
        let token = stage.take_frame().unwrap();
        assert_eq!(applier.frame_requested(), Some(token));
        assert!(applier.begin_frame(token));
        assert_eq!(applier.flush(&mut stage), 2);
        assert_eq!(stage.last_write("title", Property::Opacity), Some(0.2));
    }

    #[test]
    fn test_reset_restores_written_targets() {
        let mut stage = RecordingStage::new(1280.0, 800.0);
        let mut applier = PropertyApplier::new();
        applier.apply(&mut stage, &"a".into(), Property::Opacity, 0.5);
        applier.apply(&mut stage, &"b".into(), Property::TranslateY, 20.0);
        let token = stage.take_frame().unwrap();
        applier.begin_frame(token);
        applier.flush(&mut stage);

        applier.apply(&mut stage, &"c".into(), Property::Opacity, 0.1);
        applier.reset(&mut stage);

        assert_eq!(stage.resets, vec![TargetId::from("a"), TargetId::from("b")]);
        assert!(stage.frames.is_empty());
        assert_eq!(applier.written().count(), 0);
    }
}
