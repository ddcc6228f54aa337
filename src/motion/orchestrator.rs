use std::collections::HashSet;

use super::apply::PropertyApplier;
use super::error::MotionError;
use super::preset::{AnimationBinding, SectionMotion};
use super::progress::{ProgressHandle, ProgressListener, ProgressSource};
use super::scrub::Driver;
use super::stage::{FrameToken, Stage, TargetId, Viewport};

/// Assumed frame length when there is no previous frame to measure from.
const DEFAULT_FRAME_SECS: f64 = 1.0 / 60.0;
/// Longest step a timed driver takes, so a backgrounded tab does not jump.
const MAX_FRAME_SECS: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionState {
    Unmounted,
    Mounting,
    Active,
    TearingDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MountSummary {
    pub tracks: usize,
    pub bindings: usize,
    pub skipped: usize,
}

/// A track is known across remounts by its trigger and its position among
/// the tracks sharing that trigger.
type TrackKey = (TargetId, usize);

struct Track {
    key: TrackKey,
    trigger: TargetId,
    handle: ProgressHandle,
    driver: Driver,
    bindings: Vec<AnimationBinding>,
}

impl Track {
    fn queue(&self, applier: &mut PropertyApplier, stage: &mut dyn Stage) {
        let progress = self.driver.current();
        for binding in &self.bindings {
            applier.apply(stage, &binding.target, binding.property, binding.value_at(progress));
        }
    }
}

/// Owns every progress source, binding and pending write of one page section.
///
/// The host calls [`mount`](Self::mount) when the section appears,
/// [`on_resize`](Self::on_resize) when the viewport changes and
/// [`teardown`](Self::teardown) when it goes away, and forwards the scroll and
/// frame callbacks it registered through the [`Stage`].
pub struct SectionOrchestrator {
    name: String,
    motion: SectionMotion,
    state: SectionState,
    sources: ProgressSource,
    applier: PropertyApplier,
    tracks: Vec<Track>,
    observers: Vec<(TargetId, ProgressListener)>,
    viewport: Option<Viewport>,
    last_frame_ms: Option<f64>,
    spent: HashSet<TrackKey>,
}

impl SectionOrchestrator {
    pub fn new(name: impl Into<String>, motion: SectionMotion) -> Self {
        Self {
            name: name.into(),
            motion,
            state: SectionState::Unmounted,
            sources: ProgressSource::new(),
            applier: PropertyApplier::new(),
            tracks: Vec::new(),
            observers: Vec::new(),
            viewport: None,
            last_frame_ms: None,
            spent: HashSet::new(),
        }
    }

    pub fn state(&self) -> SectionState {
        self.state
    }

    /// Number of live progress sources.
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Calls `listener` with the progress of every track triggered by
    /// `trigger`, now and after any later remount.
    pub fn observe(&mut self, trigger: impl Into<TargetId>, listener: ProgressListener) {
        let trigger = trigger.into();
        for track in self.tracks.iter().filter(|t| t.trigger == trigger) {
            self.sources.on(track.handle, listener.clone());
        }
        self.observers.push((trigger, listener));
    }

    /// Builds every track for the current viewport.
    ///
    /// An invalid preset leaves the section unmounted with nothing attached
    /// and nothing written.
    pub fn mount(&mut self, stage: &mut dyn Stage) -> Result<MountSummary, MotionError> {
        if self.state != SectionState::Unmounted {
            self.teardown(stage);
        }
        self.state = SectionState::Mounting;
        match self.build(stage) {
            Ok(summary) => {
                self.state = SectionState::Active;
                log::debug!(
                    "mounted section {} with {} tracks and {} bindings",
                    self.name,
                    summary.tracks,
                    summary.bindings
                );
                Ok(summary)
            }
            Err(err) => {
                self.teardown(stage);
                Err(err)
            }
        }
    }

    fn build(&mut self, stage: &mut dyn Stage) -> Result<MountSummary, MotionError> {
        let viewport = stage.viewport();
        self.viewport = Some(viewport);
        let plan = self.motion.plan(viewport)?;
        for skipped in &plan.skipped {
            log::warn!("section {}: skipping binding: {skipped}", self.name);
        }

        let mut summary = MountSummary {
            skipped: plan.skipped.len(),
            ..Default::default()
        };
        for track in plan.tracks {
            let handle = self.sources.attach(Some(&track.trigger), &track.options, stage)?;
            for (_, listener) in self.observers.iter().filter(|(t, _)| *t == track.trigger) {
                self.sources.on(handle, listener.clone());
            }
            summary.tracks += 1;
            summary.bindings += track.bindings.len();
            let ordinal = self.tracks.iter().filter(|t| t.trigger == track.trigger).count();
            let key = (track.trigger.clone(), ordinal);
            let mut driver = Driver::new(track.scrub, track.once);
            if self.spent.contains(&key) {
                driver.spend();
            }
            self.tracks.push(Track {
                key,
                trigger: track.trigger,
                handle,
                driver,
                bindings: track.bindings,
            });
        }

        for index in 0..self.tracks.len() {
            let track = &mut self.tracks[index];
            if self.sources.region(track.handle).is_none() {
                continue;
            }
            // timed tracks start from their first keyframe and play in, or
            // from their last if they already played once
            if !track.driver.is_linked() {
                track.queue(&mut self.applier, stage);
            }
            self.sync(index, stage);
        }
        Ok(summary)
    }

    /// Scroll callback for the source behind `handle`.
    pub fn on_scroll(&mut self, handle: ProgressHandle, stage: &mut dyn Stage) {
        if self.state != SectionState::Active {
            return;
        }
        if let Some(index) = self.tracks.iter().position(|t| t.handle == handle) {
            self.sync(index, stage);
        }
    }

    fn sync(&mut self, index: usize, stage: &mut dyn Stage) {
        let track = &mut self.tracks[index];
        let Some(progress) = self.sources.update(track.handle, stage) else {
            return;
        };
        track.driver.retarget(progress);
        if track.driver.is_linked() {
            track.queue(&mut self.applier, stage);
        } else if !track.driver.is_settled() {
            self.applier.schedule(stage);
        }
    }

    /// Animation frame callback. Tokens other than the one last requested
    /// are ignored.
    pub fn on_frame(&mut self, token: FrameToken, now_ms: f64, stage: &mut dyn Stage) {
        if self.state != SectionState::Active || !self.applier.begin_frame(token) {
            return;
        }
        let dt = match self.last_frame_ms {
            Some(last) => ((now_ms - last) / 1000.0).clamp(0.0, MAX_FRAME_SECS),
            None => DEFAULT_FRAME_SECS,
        };

        let mut moving = false;
        for track in &mut self.tracks {
            if track.driver.is_linked() || track.driver.is_settled() {
                continue;
            }
            moving |= !track.driver.advance(dt);
            track.queue(&mut self.applier, stage);
        }
        self.applier.flush(stage);

        if moving {
            self.last_frame_ms = Some(now_ms);
            self.applier.schedule(stage);
        } else {
            self.last_frame_ms = None;
        }
    }

    /// Mounts the section the first time, then rebuilds it whenever the
    /// viewport width (and with it possibly the breakpoint) changed since the
    /// last mount attempt. Height-only changes, such as a mobile toolbar
    /// collapsing, keep the current build. Returns whether a mount happened.
    pub fn on_resize(&mut self, stage: &mut dyn Stage) -> Result<bool, MotionError> {
        let viewport = stage.viewport();
        if let Some(previous) = self.viewport {
            if previous.width == viewport.width && previous.breakpoint() == viewport.breakpoint() {
                return Ok(false);
            }
            log::debug!(
                "section {}: width {} -> {} ({:?} -> {:?}), rebuilding",
                self.name,
                previous.width,
                viewport.width,
                previous.breakpoint(),
                viewport.breakpoint()
            );
        }
        self.mount(stage).map(|_| true)
    }

    /// Cancels pending work, restores written targets and detaches every
    /// source. Safe to call repeatedly, and from within itself.
    pub fn teardown(&mut self, stage: &mut dyn Stage) {
        if matches!(self.state, SectionState::Unmounted | SectionState::TearingDown) {
            return;
        }
        self.state = SectionState::TearingDown;
        self.applier.reset(stage);
        for track in self.tracks.drain(..) {
            if track.driver.is_spent() {
                self.spent.insert(track.key);
            }
            self.sources.detach(track.handle, stage);
        }
        self.sources.detach_all(stage);
        self.last_frame_ms = None;
        self.state = SectionState::Unmounted;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::motion::apply::Property;
    use crate::motion::progress::Progress;
    use crate::motion::stage::recording::RecordingStage;

    fn motion(json: &str) -> SectionMotion {
        serde_json::from_str(json).unwrap()
    }

    fn fire_frame(orchestrator: &mut SectionOrchestrator, stage: &mut RecordingStage, now_ms: f64) {
        let token = stage.take_frame().expect("a frame should be pending");
        orchestrator.on_frame(token, now_ms, stage);
    }

    fn scroll_to(orchestrator: &mut SectionOrchestrator, stage: &mut RecordingStage, y: f64) {
        stage.scroll_y = y;
        let handles = stage.listeners.values().copied().collect::<Vec<_>>();
        for handle in handles {
            orchestrator.on_scroll(handle, stage);
        }
    }

    const LINKED: &str = r#"{"triggers": [{
        "trigger": "section", "end": "+=100px", "scrub": true,
        "bindings": [{"targets": ["box"], "property": "translateY",
                      "keyframes": [[0, 0], [1, 100]]}]
    }]}"#;

    #[test]
    fn test_scroll_halfway_through_region_writes_midpoint() {
        let mut stage = RecordingStage::new(1280.0, 800.0).with_element("section", 0.0, 800.0);
        let mut orchestrator = SectionOrchestrator::new("test", motion(LINKED));
        orchestrator.mount(&mut stage).unwrap();
        fire_frame(&mut orchestrator, &mut stage, 0.0);

        scroll_to(&mut orchestrator, &mut stage, 50.0);
        fire_frame(&mut orchestrator, &mut stage, 16.0);
        assert_eq!(stage.last_write("box", Property::TranslateY), Some(50.0));
    }

    #[test]
    fn test_scroll_events_in_one_frame_coalesce() {
        let mut stage = RecordingStage::new(1280.0, 800.0).with_element("section", 0.0, 800.0);
        let mut orchestrator = SectionOrchestrator::new("test", motion(LINKED));
        orchestrator.mount(&mut stage).unwrap();
        fire_frame(&mut orchestrator, &mut stage, 0.0);
        let before = stage.writes.len();

        scroll_to(&mut orchestrator, &mut stage, 20.0);
        scroll_to(&mut orchestrator, &mut stage, 40.0);
        scroll_to(&mut orchestrator, &mut stage, 70.0);
        assert_eq!(stage.frames.len(), 1);
        fire_frame(&mut orchestrator, &mut stage, 16.0);

        assert_eq!(stage.writes.len(), before + 1);
        assert_eq!(stage.last_write("box", Property::TranslateY), Some(70.0));
    }

    #[test]
    fn test_attach_then_detach_writes_nothing() {
        let mut stage = RecordingStage::new(1280.0, 800.0).with_element("section", 0.0, 800.0);
        let mut orchestrator = SectionOrchestrator::new("test", motion(LINKED));
        orchestrator.mount(&mut stage).unwrap();
        assert_eq!(stage.listener_count(), 1);

        orchestrator.teardown(&mut stage);
        orchestrator.teardown(&mut stage);
        assert!(stage.writes.is_empty());
        assert!(stage.frames.is_empty());
        assert_eq!(stage.listener_count(), 0);
        assert_eq!(orchestrator.state(), SectionState::Unmounted);
    }

    #[test]
    fn test_teardown_restores_written_targets() {
        let mut stage = RecordingStage::new(1280.0, 800.0).with_element("section", 0.0, 800.0);
        let mut orchestrator = SectionOrchestrator::new("test", motion(LINKED));
        orchestrator.mount(&mut stage).unwrap();
        fire_frame(&mut orchestrator, &mut stage, 0.0);

        orchestrator.teardown(&mut stage);
        assert_eq!(stage.resets, vec![TargetId::from("box")]);
        assert_eq!(orchestrator.source_count(), 0);
    }

    const RESPONSIVE: &str = r#"{
        "triggers": [
            {"trigger": "experience", "end": "+=300%", "pin": true, "scrub": true,
             "bindings": [{"targets": ["work"], "property": "opacity",
                           "keyframes": [[0, 0.02], [0.5, 0.12], [1, 0.02]]}]},
            {"trigger": "experience-list", "start": "top 80%",
             "bindings": [{"targets": ["item-1", "item-2"], "property": "opacity",
                           "keyframes": [[0, 0], [1, 1]], "stagger": 0.1}]}
        ],
        "mobile": [
            {"trigger": "experience", "end": "+=200%", "pin": true, "scrub": true,
             "bindings": [{"targets": ["work"], "property": "opacity",
                           "keyframes": [[0, 0.02], [1, 0.1]]}]}
        ]
    }"#;

    #[test]
    fn test_breakpoint_change_rebuilds_without_leaks() {
        let mut stage = RecordingStage::new(390.0, 844.0)
            .with_element("experience", 1000.0, 844.0)
            .with_element("experience-list", 1200.0, 600.0);
        let mut orchestrator = SectionOrchestrator::new("experience", motion(RESPONSIVE));
        let summary = orchestrator.mount(&mut stage).unwrap();
        assert_eq!(summary.tracks, 1);
        assert_eq!(stage.listener_count(), 1);
        assert_eq!(stage.pins.len(), 1);

        scroll_to(&mut orchestrator, &mut stage, 1400.0);
        stage.resize(1440.0, 900.0);
        assert_eq!(orchestrator.on_resize(&mut stage), Ok(true));

        assert_eq!(stage.listener_count(), 2);
        assert_eq!(orchestrator.source_count(), 2);
        assert_eq!(stage.pins.len(), 1);
        assert!(stage.frames.len() <= 1);
        assert_eq!(orchestrator.state(), SectionState::Active);

        // unchanged viewport does not rebuild
        assert_eq!(orchestrator.on_resize(&mut stage), Ok(false));
        assert_eq!(stage.listener_count(), 2);

        orchestrator.teardown(&mut stage);
        assert_eq!(stage.listener_count(), 0);
        assert!(stage.pins.is_empty());
        assert!(stage.frames.is_empty());
    }

    #[test]
    fn test_degenerate_preset_stays_static() {
        let degenerate = motion(
            r#"{"triggers": [
                {"trigger": "section", "scrub": true,
                 "bindings": [{"targets": ["box"], "property": "opacity",
                               "keyframes": [[0, 1], [1, 0]]}]},
                {"trigger": "section",
                 "bindings": [{"targets": ["box"], "property": "opacity",
                               "keyframes": [[0.3, 0], [0.3, 1]]}]}
            ]}"#,
        );
        let mut stage = RecordingStage::new(1280.0, 800.0).with_element("section", 0.0, 800.0);
        let mut orchestrator = SectionOrchestrator::new("broken", degenerate);

        let result = orchestrator.mount(&mut stage);
        assert!(matches!(result, Err(MotionError::Config(_))));
        assert_eq!(orchestrator.state(), SectionState::Unmounted);
        assert_eq!(stage.listener_count(), 0);
        assert!(stage.writes.is_empty());
        assert!(stage.frames.is_empty());
    }

    #[test]
    fn test_attach_failure_rolls_back_earlier_tracks() {
        let preset = motion(
            r#"{"triggers": [
                {"trigger": "ok", "end": "+=100%", "scrub": true},
                {"trigger": "flat", "start": "top top", "end": "bottom top"}
            ]}"#,
        );
        let mut stage = RecordingStage::new(1280.0, 800.0)
            .with_element("ok", 0.0, 800.0)
            .with_element("flat", 900.0, 0.0);
        let mut orchestrator = SectionOrchestrator::new("rollback", preset);

        assert!(orchestrator.mount(&mut stage).is_err());
        assert_eq!(stage.listener_count(), 0);
        assert_eq!(orchestrator.source_count(), 0);
    }

    #[test]
    fn test_unsupported_property_does_not_block_other_bindings() {
        let preset = motion(
            r#"{"triggers": [{"trigger": "section", "end": "+=100px", "scrub": true,
                "bindings": [
                    {"targets": ["box"], "property": "clipPath", "keyframes": [[0, 0], [1, 1]]},
                    {"targets": ["box"], "property": "opacity", "keyframes": [[0, 0], [1, 1]]}
                ]}]}"#,
        );
        let mut stage = RecordingStage::new(1280.0, 800.0).with_element("section", 0.0, 800.0);
        let mut orchestrator = SectionOrchestrator::new("partial", preset);
        let summary = orchestrator.mount(&mut stage).unwrap();
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.bindings, 1);

        scroll_to(&mut orchestrator, &mut stage, 25.0);
        fire_frame(&mut orchestrator, &mut stage, 0.0);
        assert_eq!(stage.last_write("box", Property::Opacity), Some(0.25));
    }

    #[test]
    fn test_toggle_plays_in_and_reverses() {
        let preset = motion(
            r#"{"triggers": [{"trigger": "about", "start": "top 80%", "duration": 0.5,
                "bindings": [{"targets": ["about-title"], "property": "translateY",
                              "keyframes": [[0, 40], [1, 0]]}]}]}"#,
        );
        let mut stage = RecordingStage::new(1280.0, 800.0).with_element("about", 1000.0, 600.0);
        let mut orchestrator = SectionOrchestrator::new("about", preset);
        orchestrator.mount(&mut stage).unwrap();
        fire_frame(&mut orchestrator, &mut stage, 0.0);
        assert_eq!(stage.last_write("about-title", Property::TranslateY), Some(40.0));
        assert!(stage.frames.is_empty());

        // region starts at 1000 - 0.8 * 800
        scroll_to(&mut orchestrator, &mut stage, 400.0);
        let mut now = 0.0;
        while stage.pending_frame().is_some() {
            now += 50.0;
            fire_frame(&mut orchestrator, &mut stage, now);
        }
        assert_eq!(stage.last_write("about-title", Property::TranslateY), Some(0.0));

        scroll_to(&mut orchestrator, &mut stage, 0.0);
        while stage.pending_frame().is_some() {
            now += 50.0;
            fire_frame(&mut orchestrator, &mut stage, now);
        }
        assert_eq!(stage.last_write("about-title", Property::TranslateY), Some(40.0));
    }

    const INTRO: &str = r#"{"triggers": [{"trigger": "hero", "start": "top bottom",
        "duration": 0.5, "once": true,
        "bindings": [{"targets": ["hero-title"], "property": "opacity",
                      "keyframes": [[0, 0], [1, 1]]}]}]}"#;

    fn settle(orchestrator: &mut SectionOrchestrator, stage: &mut RecordingStage, now: &mut f64) {
        while stage.pending_frame().is_some() {
            *now += 50.0;
            fire_frame(orchestrator, stage, *now);
        }
    }

    #[test]
    fn test_height_only_resize_keeps_played_intro() {
        let mut stage = RecordingStage::new(390.0, 844.0).with_element("hero", 0.0, 844.0);
        let mut orchestrator = SectionOrchestrator::new("hero", motion(INTRO));
        orchestrator.on_resize(&mut stage).unwrap();
        let mut now = 0.0;
        settle(&mut orchestrator, &mut stage, &mut now);
        assert_eq!(stage.last_write("hero-title", Property::Opacity), Some(1.0));
        let before = stage.writes.len();

        stage.resize(390.0, 900.0);
        assert_eq!(orchestrator.on_resize(&mut stage), Ok(false));
        assert!(stage.frames.is_empty());
        assert_eq!(stage.writes.len(), before);
        assert!(stage.resets.is_empty());
    }

    #[test]
    fn test_played_intro_stays_played_across_rebuild() {
        let mut stage = RecordingStage::new(390.0, 844.0).with_element("hero", 0.0, 844.0);
        let mut orchestrator = SectionOrchestrator::new("hero", motion(INTRO));
        orchestrator.mount(&mut stage).unwrap();
        let mut now = 0.0;
        settle(&mut orchestrator, &mut stage, &mut now);
        let before = stage.writes.len();

        stage.resize(1440.0, 900.0);
        assert_eq!(orchestrator.on_resize(&mut stage), Ok(true));
        settle(&mut orchestrator, &mut stage, &mut now);
        assert_eq!(stage.writes[before..].len(), 1);
        assert_eq!(stage.last_write("hero-title", Property::Opacity), Some(1.0));
    }

    #[test]
    fn test_stale_frame_is_ignored_after_teardown() {
        let mut stage = RecordingStage::new(1280.0, 800.0).with_element("section", 0.0, 800.0);
        let mut orchestrator = SectionOrchestrator::new("test", motion(LINKED));
        orchestrator.mount(&mut stage).unwrap();
        let stale = stage.pending_frame().unwrap();

        orchestrator.teardown(&mut stage);
        assert_eq!(stage.cancelled, vec![stale]);
        orchestrator.on_frame(stale, 16.0, &mut stage);
        assert!(stage.writes.is_empty());
    }

    #[test]
    fn test_observers_survive_remount() {
        let mut stage = RecordingStage::new(1280.0, 800.0).with_element("section", 0.0, 800.0);
        let mut orchestrator = SectionOrchestrator::new("test", motion(LINKED));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        orchestrator.observe(
            "section",
            Arc::new(move |p: Progress| sink.lock().unwrap().push(p.step(4))),
        );
        orchestrator.mount(&mut stage).unwrap();
        scroll_to(&mut orchestrator, &mut stage, 60.0);

        stage.resize(1366.0, 800.0);
        orchestrator.on_resize(&mut stage).unwrap();
        scroll_to(&mut orchestrator, &mut stage, 90.0);

        assert_eq!(*seen.lock().unwrap(), vec![0, 2, 2, 3]);
    }
}
