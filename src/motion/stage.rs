use std::fmt;

use serde::{Deserialize, Serialize};

use super::apply::Property;
use super::progress::{PinRegion, ProgressHandle};

/// Widths below this are laid out and animated as mobile.
pub const MOBILE_MAX_WIDTH: f64 = 768.0;

/// Identity of an element on the stage. In the browser this is the DOM id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(String);

impl TargetId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TargetId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TargetId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn breakpoint(&self) -> Breakpoint {
        if self.width < MOBILE_MAX_WIDTH {
            Breakpoint::Mobile
        } else {
            Breakpoint::Desktop
        }
    }
}

/// Document-relative geometry of an element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub top: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Breakpoint {
    Mobile,
    Desktop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerToken(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameToken(pub u64);

/// The presentation layer the motion core measures and writes through.
///
/// Everything the core does to the outside world goes through this trait, so
/// every registration it makes has a matching call that undoes it:
/// `listen`/`unlisten`, `pin`/`release`, `request_frame`/`cancel_frame` and
/// `write`/`reset`.
pub trait Stage {
    fn viewport(&self) -> Viewport;
    fn scroll_y(&self) -> f64;
    /// `None` when the element is not on the stage (yet, or any more).
    fn bounds(&self, target: &TargetId) -> Option<Bounds>;

    /// Start delivering scroll events for `source`.
    fn listen(&mut self, source: ProgressHandle) -> ListenerToken;
    fn unlisten(&mut self, token: ListenerToken);

    /// Hold `target` on screen for the length of `region`, reserving that
    /// height in the flow below it when `spacing` is set.
    fn pin(&mut self, target: &TargetId, region: &PinRegion, spacing: bool);
    fn release(&mut self, target: &TargetId);

    /// `None` when the host could not schedule a frame.
    fn request_frame(&mut self) -> Option<FrameToken>;
    fn cancel_frame(&mut self, token: FrameToken);

    fn write(&mut self, target: &TargetId, property: Property, value: f64);
    /// Drop every value written to `target`, restoring its static style.
    fn reset(&mut self, target: &TargetId);
}

#[cfg(test)]
pub mod recording {
    use std::collections::{HashMap, HashSet};

    use super::*;

    /// In-memory stage that records every call made through [`Stage`].
    #[derive(Debug, Default)]
    pub struct RecordingStage {
        pub viewport: Viewport,
        pub scroll_y: f64,
        pub bounds: HashMap<TargetId, Bounds>,
        pub listeners: HashMap<ListenerToken, ProgressHandle>,
        pub pins: HashMap<TargetId, (PinRegion, bool)>,
        pub frames: HashSet<FrameToken>,
        pub cancelled: Vec<FrameToken>,
        pub writes: Vec<(TargetId, Property, f64)>,
        pub resets: Vec<TargetId>,
        pub refuse_frames: bool,
        next_token: u64,
    }

    impl RecordingStage {
        pub fn new(width: f64, height: f64) -> Self {
            Self {
                viewport: Viewport::new(width, height),
                ..Default::default()
            }
        }

        pub fn with_element(mut self, id: &str, top: f64, height: f64) -> Self {
            self.bounds.insert(TargetId::from(id), Bounds::new(top, height));
            self
        }

        pub fn resize(&mut self, width: f64, height: f64) {
            self.viewport = Viewport::new(width, height);
        }

        pub fn listener_count(&self) -> usize {
            self.listeners.len()
        }

        /// The single outstanding frame, if exactly one is pending.
        pub fn pending_frame(&self) -> Option<FrameToken> {
            match self.frames.len() {
                1 => self.frames.iter().next().copied(),
                _ => None,
            }
        }

        /// Simulate the host firing a frame callback.
        pub fn take_frame(&mut self) -> Option<FrameToken> {
            let token = self.pending_frame()?;
            self.frames.remove(&token);
            Some(token)
        }

        pub fn writes_to(&self, target: &str, property: Property) -> Vec<f64> {
            self.writes
                .iter()
                .filter(|(t, p, _)| t.as_str() == target && *p == property)
                .map(|(_, _, v)| *v)
                .collect()
        }

        pub fn last_write(&self, target: &str, property: Property) -> Option<f64> {
            self.writes_to(target, property).last().copied()
        }

        fn next(&mut self) -> u64 {
            self.next_token += 1;
            self.next_token
        }
    }

    impl Stage for RecordingStage {
        fn viewport(&self) -> Viewport {
            self.viewport
        }

        fn scroll_y(&self) -> f64 {
            self.scroll_y
        }

        fn bounds(&self, target: &TargetId) -> Option<Bounds> {
            self.bounds.get(target).copied()
        }

        fn listen(&mut self, source: ProgressHandle) -> ListenerToken {
            let token = ListenerToken(self.next());
            self.listeners.insert(token, source);
            token
        }

        fn unlisten(&mut self, token: ListenerToken) {
            self.listeners.remove(&token);
        }

        fn pin(&mut self, target: &TargetId, region: &PinRegion, spacing: bool) {
            self.pins.insert(target.clone(), (*region, spacing));
        }

        fn release(&mut self, target: &TargetId) {
            self.pins.remove(target);
        }

        fn request_frame(&mut self) -> Option<FrameToken> {
            if self.refuse_frames {
                return None;
            }
            let token = FrameToken(self.next());
            self.frames.insert(token);
            Some(token)
        }

        fn cancel_frame(&mut self, token: FrameToken) {
            self.frames.remove(&token);
            self.cancelled.push(token);
        }

        fn write(&mut self, target: &TargetId, property: Property, value: f64) {
            self.writes.push((target.clone(), property, value));
        }

        fn reset(&mut self, target: &TargetId) {
            self.resets.push(target.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_threshold() {
        assert_eq!(Viewport::new(375.0, 800.0).breakpoint(), Breakpoint::Mobile);
        assert_eq!(Viewport::new(767.9, 800.0).breakpoint(), Breakpoint::Mobile);
        assert_eq!(Viewport::new(768.0, 800.0).breakpoint(), Breakpoint::Desktop);
        assert_eq!(Viewport::new(1440.0, 900.0).breakpoint(), Breakpoint::Desktop);
    }

    #[test]
    fn test_target_id_serde_is_plain_string() {
        let id: TargetId = serde_json::from_str("\"hero-title\"").unwrap();
        assert_eq!(id.as_str(), "hero-title");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"hero-title\"");
    }
}
