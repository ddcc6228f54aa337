use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use leptos::{ev, prelude::*};
use leptos_use::{signal_debounced, use_window_size, UseWindowSizeReturn};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::motion::{
    Bounds, FrameToken, ListenerToken, PinRegion, Progress, ProgressHandle, Property,
    SectionMotion, SectionOrchestrator, Stage, TargetId, Viewport,
};
use crate::portfolio::section_motion;

const RESIZE_DEBOUNCE_MS: f64 = 150.0;

/// Browser-side state of one section: the orchestrator plus the DOM
/// registrations it asked for.
struct SectionRuntime {
    orchestrator: SectionOrchestrator,
    listeners: HashMap<ListenerToken, WindowListenerHandle>,
    frames: HashMap<FrameToken, AnimationFrameRequestHandle>,
    next_token: u64,
}

impl SectionRuntime {
    fn new(orchestrator: SectionOrchestrator) -> Self {
        Self {
            orchestrator,
            listeners: HashMap::new(),
            frames: HashMap::new(),
            next_token: 0,
        }
    }

    fn with<R>(
        runtime: &Arc<Mutex<Self>>,
        f: impl FnOnce(&mut SectionOrchestrator, &mut DomStage<'_>) -> R,
    ) -> R {
        let mut guard = runtime
            .lock()
            .expect("should be able to lock section runtime");
        let SectionRuntime {
            orchestrator,
            listeners,
            frames,
            next_token,
        } = &mut *guard;
        let mut stage = DomStage {
            runtime: Arc::downgrade(runtime),
            listeners,
            frames,
            next_token,
        };
        f(orchestrator, &mut stage)
    }
}

/// [`Stage`] over the live document. Callbacks it registers hold only a weak
/// reference to the runtime, so they do nothing once the section is gone.
struct DomStage<'a> {
    runtime: Weak<Mutex<SectionRuntime>>,
    listeners: &'a mut HashMap<ListenerToken, WindowListenerHandle>,
    frames: &'a mut HashMap<FrameToken, AnimationFrameRequestHandle>,
    next_token: &'a mut u64,
}

impl DomStage<'_> {
    fn next(&mut self) -> u64 {
        *self.next_token += 1;
        *self.next_token
    }
}

fn element(target: &TargetId) -> Option<HtmlElement> {
    document()
        .get_element_by_id(target.as_str())?
        .dyn_into::<HtmlElement>()
        .ok()
}

fn parent(el: &HtmlElement) -> Option<HtmlElement> {
    el.parent_element()?.dyn_into::<HtmlElement>().ok()
}

fn set_style(el: &HtmlElement, name: &str, value: &str) {
    if let Err(e) = el.style().set_property(name, value) {
        log::debug!("couldn't set {name}: {e:?}");
    }
}

fn clear_style(el: &HtmlElement, names: &[&str]) {
    let style = el.style();
    for name in names {
        if let Err(e) = style.remove_property(name) {
            log::debug!("couldn't clear {name}: {e:?}");
        }
    }
}

fn now_ms() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64
}

impl Stage for DomStage<'_> {
    fn viewport(&self) -> Viewport {
        let window = window();
        let width = window.inner_width().ok().and_then(|v| v.as_f64());
        let height = window.inner_height().ok().and_then(|v| v.as_f64());
        Viewport::new(width.unwrap_or_default(), height.unwrap_or_default())
    }

    fn scroll_y(&self) -> f64 {
        window().scroll_y().unwrap_or_default()
    }

    fn bounds(&self, target: &TargetId) -> Option<Bounds> {
        let el = element(target)?;
        let mut top = 0.0;
        let mut node = Some(el.clone());
        while let Some(current) = node {
            top += current.offset_top() as f64;
            node = current
                .offset_parent()
                .and_then(|p| p.dyn_into::<HtmlElement>().ok());
        }
        Some(Bounds::new(top, el.offset_height() as f64))
    }

    fn listen(&mut self, source: ProgressHandle) -> ListenerToken {
        let token = ListenerToken(self.next());
        let runtime = self.runtime.clone();
        let handle = window_event_listener(ev::scroll, move |_| {
            if let Some(runtime) = runtime.upgrade() {
                SectionRuntime::with(&runtime, |orchestrator, stage| {
                    orchestrator.on_scroll(source, stage)
                });
            }
        });
        self.listeners.insert(token, handle);
        token
    }

    fn unlisten(&mut self, token: ListenerToken) {
        if let Some(handle) = self.listeners.remove(&token) {
            handle.remove();
        }
    }

    fn pin(&mut self, target: &TargetId, region: &PinRegion, spacing: bool) {
        let Some(el) = element(target) else {
            return;
        };
        set_style(&el, "position", "sticky");
        set_style(&el, "top", &format!("{}px", -region.start()));
        if let Some(spacer) = parent(&el) {
            let height = el.offset_height() as f64 + region.len();
            set_style(&spacer, "height", &format!("{height}px"));
            if !spacing {
                set_style(&spacer, "margin-bottom", &format!("{}px", -region.len()));
            }
        }
    }

    fn release(&mut self, target: &TargetId) {
        let Some(el) = element(target) else {
            return;
        };
        clear_style(&el, &["position", "top"]);
        if let Some(spacer) = parent(&el) {
            clear_style(&spacer, &["height", "margin-bottom"]);
        }
    }

    fn request_frame(&mut self) -> Option<FrameToken> {
        let token = FrameToken(self.next());
        let runtime = self.runtime.clone();
        let requested = request_animation_frame_with_handle(move || {
            if let Some(runtime) = runtime.upgrade() {
                SectionRuntime::with(&runtime, |orchestrator, stage| {
                    stage.frames.remove(&token);
                    orchestrator.on_frame(token, now_ms(), stage);
                });
            }
        });
        match requested {
            Ok(handle) => {
                self.frames.insert(token, handle);
                Some(token)
            }
            Err(e) => {
                log::warn!("couldn't request animation frame: {e:?}");
                None
            }
        }
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if let Some(handle) = self.frames.remove(&token) {
            handle.cancel();
        }
    }

    fn write(&mut self, target: &TargetId, property: Property, value: f64) {
        if let Some(el) = element(target) {
            set_style(&el, property.css_var(), &property.css_value(value));
        }
    }

    fn reset(&mut self, target: &TargetId) {
        if let Some(el) = element(target) {
            clear_style(&el, &Property::ALL.map(Property::css_var));
        }
    }
}

/// Handle to a section's motion, returned by [`use_section_motion`].
#[derive(Clone)]
pub struct SectionMotionHandle {
    runtime: Arc<Mutex<SectionRuntime>>,
}

impl SectionMotionHandle {
    /// Calls `listener` whenever the progress of `trigger` changes.
    pub fn observe(&self, trigger: &str, listener: impl Fn(Progress) + Send + Sync + 'static) {
        self.runtime
            .lock()
            .expect("should be able to lock section runtime")
            .orchestrator
            .observe(trigger, Arc::new(listener));
    }
}

/// Drives the motion preset named `section` for as long as the calling
/// component is mounted, rebuilding it when the viewport width changes.
///
/// Sections without a usable preset render statically.
pub fn use_section_motion(section: &'static str) -> SectionMotionHandle {
    let motion = section_motion(section).unwrap_or_else(|e| {
        log::warn!("section {section} stays static: {e}");
        SectionMotion::default()
    });
    let runtime = Arc::new(Mutex::new(SectionRuntime::new(SectionOrchestrator::new(
        section, motion,
    ))));

    // the breakpoint follows from the width, so height changes are ignored
    let UseWindowSizeReturn { width, .. } = use_window_size();
    let width = signal_debounced(width, RESIZE_DEBOUNCE_MS);

    Effect::new({
        let runtime = runtime.clone();
        move |_| {
            width.track();
            SectionRuntime::with(&runtime, |orchestrator, stage| {
                if let Err(e) = orchestrator.on_resize(stage) {
                    log::warn!("section {section} stays static: {e}");
                }
            });
        }
    });

    on_cleanup({
        let runtime = runtime.clone();
        move || SectionRuntime::with(&runtime, |orchestrator, stage| orchestrator.teardown(stage))
    });

    SectionMotionHandle { runtime }
}
