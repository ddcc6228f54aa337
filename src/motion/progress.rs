use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

use super::error::ConfigError;
use super::stage::{Bounds, ListenerToken, Stage, TargetId, Viewport};

/// Fraction of a scroll region traversed, always within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Progress(f64);

impl Progress {
    pub const START: Progress = Progress(0.0);
    pub const END: Progress = Progress(1.0);

    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            Self::START
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Splits the region into `count` equal steps and returns the current one.
    pub fn step(self, count: usize) -> usize {
        if count == 0 {
            return 0;
        }
        ((self.0 * count as f64).floor() as usize).min(count - 1)
    }
}

/// How far the user scrolls from region start to region end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Distance {
    Pixels(f64),
    /// Multiple of the viewport height, so `Viewport(1.5)` is 150%.
    Viewport(f64),
}

impl Distance {
    pub fn resolve(self, viewport: Viewport) -> Result<f64, ConfigError> {
        let px = match self {
            Self::Pixels(px) => px,
            Self::Viewport(fraction) => fraction * viewport.height,
        };
        if px.is_finite() && px > 0.0 {
            Ok(px)
        } else {
            Err(ConfigError::InvalidDistance(px))
        }
    }
}

impl FromStr for Distance {
    type Err = ConfigError;

    /// Accepts `+=150%`, `150vh`, `+=300px` and bare pixel counts.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidLength(s.to_string());
        let body = s.trim();
        let body = body.strip_prefix("+=").unwrap_or(body);
        let (number, make): (&str, fn(f64) -> Distance) = if let Some(n) = body.strip_suffix('%') {
            (n, |v| Distance::Viewport(v / 100.0))
        } else if let Some(n) = body.strip_suffix("vh") {
            (n, |v| Distance::Viewport(v / 100.0))
        } else if let Some(n) = body.strip_suffix("px") {
            (n, Distance::Pixels)
        } else {
            (body, Distance::Pixels)
        };
        number.trim().parse::<f64>().map(make).map_err(|_| invalid())
    }
}

/// A point on an element or on the viewport, measured from its top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Edge {
    Fraction(f64),
    Pixels(f64),
}

impl Edge {
    fn offset(self, extent: f64) -> f64 {
        match self {
            Self::Fraction(f) => f * extent,
            Self::Pixels(px) => px,
        }
    }
}

impl FromStr for Edge {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" | "start" => Ok(Self::Fraction(0.0)),
            "center" => Ok(Self::Fraction(0.5)),
            "bottom" | "end" => Ok(Self::Fraction(1.0)),
            _ => {
                if let Some(n) = s.strip_suffix('%') {
                    n.parse::<f64>().map(|v| Self::Fraction(v / 100.0)).map_err(|_| ())
                } else {
                    let n = s.strip_suffix("px").unwrap_or(s);
                    n.parse::<f64>().map(Self::Pixels).map_err(|_| ())
                }
            }
        }
    }
}

/// "When this point of the element meets that point of the viewport",
/// written as `"top 80%"`, `"bottom top"`, `"start center"` and so on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub element: Edge,
    pub viewport: Edge,
}

impl Anchor {
    pub const TOP_TOP: Anchor = Anchor {
        element: Edge::Fraction(0.0),
        viewport: Edge::Fraction(0.0),
    };

    /// The scroll offset at which the anchor points line up.
    pub fn position(&self, bounds: Bounds, viewport: Viewport) -> f64 {
        bounds.top + self.element.offset(bounds.height) - self.viewport.offset(viewport.height)
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Self::TOP_TOP
    }
}

impl FromStr for Anchor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidAnchor(s.to_string());
        let mut parts = s.split_whitespace();
        let (Some(element), Some(viewport), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };
        Ok(Self {
            element: element.parse().map_err(|_| invalid())?,
            viewport: viewport.parse().map_err(|_| invalid())?,
        })
    }
}

/// Where a scroll region ends: at an anchor, or a distance past its start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegionEnd {
    Anchor(Anchor),
    Distance(Distance),
}

impl Default for RegionEnd {
    fn default() -> Self {
        Self::Anchor(Anchor {
            element: Edge::Fraction(1.0),
            viewport: Edge::Fraction(0.0),
        })
    }
}

impl FromStr for RegionEnd {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim_start().starts_with("+=") {
            s.parse().map(Self::Distance)
        } else {
            s.parse().map(Self::Anchor)
        }
    }
}

/// Absolute scroll offsets at which progress is 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRegion {
    start: f64,
    end: f64,
}

impl ScrollRegion {
    pub fn new(start: f64, end: f64) -> Result<Self, ConfigError> {
        if start.is_finite() && end.is_finite() && end > start {
            Ok(Self { start, end })
        } else {
            Err(ConfigError::EmptyRegion { start, end })
        }
    }

    pub fn resolve(
        start: &Anchor,
        end: &RegionEnd,
        bounds: Bounds,
        viewport: Viewport,
    ) -> Result<Self, ConfigError> {
        let from = start.position(bounds, viewport);
        let to = match end {
            RegionEnd::Anchor(anchor) => anchor.position(bounds, viewport),
            RegionEnd::Distance(distance) => from + distance.resolve(viewport)?,
        };
        Self::new(from, to)
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn distance(&self) -> f64 {
        self.end - self.start
    }

    pub fn progress(&self, scroll_y: f64) -> Progress {
        Progress::new((scroll_y - self.start) / self.distance())
    }

    /// The same region relative to the top of the element measured by `bounds`.
    pub fn pin_region(&self, bounds: Bounds) -> PinRegion {
        PinRegion {
            start: self.start - bounds.top,
            end: self.end - bounds.top,
        }
    }
}

/// Scroll span, relative to the trigger element's own top, during which a
/// pinned element stays put.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinRegion {
    start: f64,
    end: f64,
}

impl PinRegion {
    pub fn new(start: f64, end: f64) -> Result<Self, ConfigError> {
        if end > start {
            Ok(Self { start, end })
        } else {
            Err(ConfigError::InvalidPinRegion { start, end })
        }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn len(&self) -> f64 {
        self.end - self.start
    }
}

/// The slice of a source's progress that one staggered target animates over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressWindow {
    start: f64,
    end: f64,
}

impl Default for ProgressWindow {
    fn default() -> Self {
        Self::FULL
    }
}

impl ProgressWindow {
    pub const FULL: ProgressWindow = ProgressWindow { start: 0.0, end: 1.0 };

    /// Window for target `index` of `count`, each starting `stagger` after the
    /// previous one and all lasting the same span.
    pub fn staggered(index: usize, count: usize, stagger: f64) -> Result<Self, ConfigError> {
        if count <= 1 || stagger == 0.0 {
            return Ok(Self::FULL);
        }
        let span = 1.0 - stagger * (count - 1) as f64;
        if !(stagger > 0.0) || !(span > 0.0) {
            return Err(ConfigError::StaggerOverflow {
                stagger,
                targets: count,
            });
        }
        let start = stagger * index as f64;
        Ok(Self {
            start,
            end: start + span,
        })
    }

    pub fn local(&self, progress: Progress) -> Progress {
        Progress::new((progress.value() - self.start) / (self.end - self.start))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PinOptions {
    /// Element to hold on screen; the trigger itself when `None`.
    pub target: Option<TargetId>,
    pub spacing: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TriggerOptions {
    pub start: Anchor,
    pub end: RegionEnd,
    pub pin: Option<PinOptions>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProgressHandle(u64);

pub type ProgressListener = Arc<dyn Fn(Progress) + Send + Sync>;

struct Attachment {
    region: Option<ScrollRegion>,
    pinned: Option<TargetId>,
    listener: Option<ListenerToken>,
    observers: Vec<ProgressListener>,
    last: Option<Progress>,
}

impl Attachment {
    fn inert() -> Self {
        Self {
            region: None,
            pinned: None,
            listener: None,
            observers: Vec::new(),
            last: None,
        }
    }
}

/// Observes elements scrolling through the viewport and turns their scroll
/// position into [`Progress`].
///
/// Every attachment registers exactly one stage listener (and at most one
/// pin), and [`ProgressSource::detach`] undoes both. An element that is not on
/// the stage gets an inert handle that never emits.
#[derive(Default)]
pub struct ProgressSource {
    next_handle: u64,
    attachments: BTreeMap<ProgressHandle, Attachment>,
}

impl ProgressSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(
        &mut self,
        target: Option<&TargetId>,
        options: &TriggerOptions,
        stage: &mut dyn Stage,
    ) -> Result<ProgressHandle, ConfigError> {
        let measured = target.and_then(|t| stage.bounds(t).map(|bounds| (t, bounds)));
        let Some((target, bounds)) = measured else {
            let handle = self.next_handle();
            log::debug!("no element to observe, {handle:?} is inert");
            self.attachments.insert(handle, Attachment::inert());
            return Ok(handle);
        };

        let region = ScrollRegion::resolve(&options.start, &options.end, bounds, stage.viewport())?;
        let handle = self.next_handle();
        let pinned = options.pin.as_ref().map(|pin| {
            let pinned = pin.target.clone().unwrap_or_else(|| target.clone());
            stage.pin(&pinned, &region.pin_region(bounds), pin.spacing);
            pinned
        });
        let listener = stage.listen(handle);
        self.attachments.insert(
            handle,
            Attachment {
                region: Some(region),
                pinned,
                listener: Some(listener),
                observers: Vec::new(),
                last: None,
            },
        );
        Ok(handle)
    }

    /// Registers `listener` for every progress change of `handle`. Returns
    /// `false` if the handle is not attached.
    pub fn on(&mut self, handle: ProgressHandle, listener: ProgressListener) -> bool {
        match self.attachments.get_mut(&handle) {
            Some(attachment) => {
                attachment.observers.push(listener);
                true
            }
            None => false,
        }
    }

    /// Recomputes progress from the stage's scroll position and notifies
    /// observers if it changed. `None` for inert or detached handles.
    pub fn update(&mut self, handle: ProgressHandle, stage: &dyn Stage) -> Option<Progress> {
        let attachment = self.attachments.get_mut(&handle)?;
        let progress = attachment.region?.progress(stage.scroll_y());
        if attachment.last != Some(progress) {
            attachment.last = Some(progress);
            for observer in &attachment.observers {
                observer(progress);
            }
        }
        Some(progress)
    }

    pub fn region(&self, handle: ProgressHandle) -> Option<ScrollRegion> {
        self.attachments.get(&handle)?.region
    }

    /// Unregisters the listener and releases the pin. Detaching twice, or
    /// detaching an unknown handle, does nothing.
    pub fn detach(&mut self, handle: ProgressHandle, stage: &mut dyn Stage) -> bool {
        let Some(attachment) = self.attachments.remove(&handle) else {
            return false;
        };
        if let Some(token) = attachment.listener {
            stage.unlisten(token);
        }
        if let Some(pinned) = attachment.pinned {
            stage.release(&pinned);
        }
        true
    }

    pub fn detach_all(&mut self, stage: &mut dyn Stage) {
        let handles = self.attachments.keys().copied().collect::<Vec<_>>();
        for handle in handles {
            self.detach(handle, stage);
        }
    }

    pub fn len(&self) -> usize {
        self.attachments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attachments.is_empty()
    }

    fn next_handle(&mut self) -> ProgressHandle {
        self.next_handle += 1;
        ProgressHandle(self.next_handle)
    }
}
