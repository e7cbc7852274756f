//! Controller lifecycle: capability detection, effect dispatch, and the
//! registry that lets `dispose` unhook everything the page was wired with.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Event, EventTarget, Window};

use crate::effects::capability::{CapabilityProfile, EffectTier, Signals, Tuning};
use crate::effects::glyphs::GlyphField;
use crate::effects::scroll::NavbarState;
use crate::effects::throttle::{Throttle, RESIZE_WINDOW_MS, SCROLL_WINDOW_MS};

use super::{ambient, dom, glow, lazy, loading, menu, reactors, reveal, subtitle};

const PRECONNECT_ORIGINS: &[&str] = &[
    "https://fonts.googleapis.com",
    "https://fonts.gstatic.com",
    "https://cdnjs.cloudflare.com",
];

struct Listener {
    target: EventTarget,
    kind: &'static str,
    cb: Closure<dyn FnMut(Event)>,
}

type ChainCell = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Everything the controller registered against the page. Timeout ids are
/// recorded even after they fire; clearing a stale id is a no-op in the
/// browser.
#[derive(Default)]
struct Registry {
    listeners: Vec<Listener>,
    tick_closures: Vec<Closure<dyn FnMut()>>,
    observer_callbacks: Vec<Closure<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>>,
    observers: Vec<web_sys::IntersectionObserver>,
    interval_slots: Vec<Rc<Cell<i32>>>,
    timeout_ids: Vec<i32>,
    /// Self-rescheduling timeout chains: the slot tracks the latest id,
    /// the cell is emptied on dispose to break the closure's Rc cycle.
    chains: Vec<(Rc<Cell<i32>>, ChainCell)>,
}

pub struct Controller {
    pub(super) window: Window,
    pub(super) document: Document,
    profile: Cell<CapabilityProfile>,
    tier: EffectTier,
    tuning: Tuning,
    alive: Cell<bool>,
    enhanced: Cell<bool>,
    pub(super) loading_done: Cell<bool>,
    registry: RefCell<Registry>,
    pub(super) glyphs: Rc<RefCell<GlyphField>>,
    pub(super) glyph_timer: Cell<Option<i32>>,
    pub(super) glyph_spawner: RefCell<Option<Closure<dyn FnMut()>>>,
    pub(super) navbar: RefCell<NavbarState>,
    pub(super) scroll_gate: RefCell<Throttle>,
    pub(super) resize_gate: RefCell<Throttle>,
}

impl Controller {
    /// Detects capabilities (synchronously, before anything else), wires
    /// the reactors, and kicks off the loading sequence that eventually
    /// starts the enhancement subsystems.
    pub fn start(window: Window, document: Document) -> Result<Rc<Self>, JsValue> {
        let signals = sample_signals(&window);
        let profile = CapabilityProfile::classify(&signals);
        let tier = profile.tier();
        let tuning = Tuning::for_class(profile.device_class());

        apply_body_classes(&document, &profile, &signals);
        log::info!(
            "visual effects: {:?} tier on {:?}",
            tier,
            profile.device_class()
        );

        let controller = Rc::new(Controller {
            window,
            document,
            profile: Cell::new(profile),
            tier,
            tuning,
            alive: Cell::new(true),
            enhanced: Cell::new(false),
            loading_done: Cell::new(false),
            registry: RefCell::new(Registry::default()),
            glyphs: Rc::new(RefCell::new(GlyphField::new(tuning.glyph_cap))),
            glyph_timer: Cell::new(None),
            glyph_spawner: RefCell::new(None),
            navbar: RefCell::new(NavbarState::new()),
            scroll_gate: RefCell::new(Throttle::new(SCROLL_WINDOW_MS)),
            resize_gate: RefCell::new(Throttle::new(RESIZE_WINDOW_MS)),
        });

        reactors::bind(&controller);
        preconnect(&controller.document);
        loading::start(&controller);
        Ok(controller)
    }

    /// Everything gated behind the loading screen. Runs once.
    pub(super) fn start_enhancements(self: &Rc<Self>) {
        if !self.alive.get() || self.enhanced.replace(true) {
            return;
        }
        log::debug!("starting enhancement subsystems");
        ambient::start_particles(self);
        ambient::start_glyphs(self);
        subtitle::start(self);
        reveal::start(self);
        reveal::prepare_card_entrances(self);
        menu::start(self);
        glow::start(self);
        lazy::start(self);
    }

    pub fn alive(&self) -> bool {
        self.alive.get()
    }

    pub fn profile(&self) -> CapabilityProfile {
        self.profile.get()
    }

    pub fn tier(&self) -> EffectTier {
        self.tier
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn glyphs_alive(&self) -> usize {
        self.glyphs.borrow().alive()
    }

    /// `is_mobile` is the one profile field that tracks the viewport.
    pub(super) fn set_is_mobile(&self, mobile: bool) {
        let mut profile = self.profile.get();
        profile.is_mobile = mobile;
        self.profile.set(profile);
    }

    pub(super) fn listen(
        &self,
        target: &EventTarget,
        kind: &'static str,
        cb: Closure<dyn FnMut(Event)>,
    ) {
        if target
            .add_event_listener_with_callback(kind, cb.as_ref().unchecked_ref())
            .is_ok()
        {
            self.registry.borrow_mut().listeners.push(Listener {
                target: target.clone(),
                kind,
                cb,
            });
        }
    }

    /// One-shot timer tracked for dispose. The closure frees itself after
    /// firing.
    pub(super) fn timeout_in(&self, ms: i32, f: impl FnOnce() + 'static) {
        let cb = Closure::once_into_js(f);
        if let Ok(id) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms)
        {
            self.registry.borrow_mut().timeout_ids.push(id);
        }
    }

    /// Repeating timer. The caller-provided slot holds the interval id so
    /// the callback itself (or dispose) can clear it.
    pub(super) fn every(&self, ms: i32, cb: Closure<dyn FnMut()>, slot: &Rc<Cell<i32>>) {
        if let Ok(id) = self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                ms,
            )
        {
            slot.set(id);
            let mut reg = self.registry.borrow_mut();
            reg.interval_slots.push(slot.clone());
            reg.tick_closures.push(cb);
        }
    }

    pub(super) fn register_chain(&self, slot: Rc<Cell<i32>>, cell: ChainCell) {
        self.registry.borrow_mut().chains.push((slot, cell));
    }

    pub(super) fn register_observer(
        &self,
        observer: web_sys::IntersectionObserver,
        cb: Closure<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>,
    ) {
        let mut reg = self.registry.borrow_mut();
        reg.observers.push(observer);
        reg.observer_callbacks.push(cb);
    }

    /// Releases every listener, timer, and observer, and purges live glyph
    /// nodes. Self-rescheduling loops see the cleared flag and stop.
    pub fn dispose(&self) {
        if !self.alive.replace(false) {
            return;
        }
        let mut reg = self.registry.borrow_mut();
        for listener in reg.listeners.drain(..) {
            listener
                .target
                .remove_event_listener_with_callback(
                    listener.kind,
                    listener.cb.as_ref().unchecked_ref(),
                )
                .ok();
        }
        for slot in reg.interval_slots.drain(..) {
            self.window.clear_interval_with_handle(slot.get());
        }
        for id in reg.timeout_ids.drain(..) {
            self.window.clear_timeout_with_handle(id);
        }
        for (slot, cell) in reg.chains.drain(..) {
            self.window.clear_timeout_with_handle(slot.get());
            cell.borrow_mut().take();
        }
        for observer in reg.observers.drain(..) {
            observer.disconnect();
        }
        reg.observer_callbacks.clear();
        reg.tick_closures.clear();
        drop(reg);

        if let Some(id) = self.glyph_timer.take() {
            self.window.clear_interval_with_handle(id);
        }
        self.glyph_spawner.borrow_mut().take();
        ambient::purge_glyphs(&self.document, &self.glyphs);
        log::info!("visual effects disposed");
    }
}

fn sample_signals(window: &Window) -> Signals {
    let navigator = window.navigator();

    let device_memory_gb = js_sys::Reflect::get(navigator.as_ref(), &"deviceMemory".into())
        .ok()
        .and_then(|v| v.as_f64());
    let cores = {
        let n = navigator.hardware_concurrency();
        if n > 0.0 {
            Some(n as u32)
        } else {
            None
        }
    };
    let user_agent = navigator.user_agent().unwrap_or_default();
    let reduced_motion = window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .map_or(false, |q| q.matches());
    let touch = navigator.max_touch_points() > 0
        || js_sys::Reflect::has(window.as_ref(), &"ontouchstart".into()).unwrap_or(false);

    // navigator.connection is feature-tested; absence means no hints.
    let connection = js_sys::Reflect::get(navigator.as_ref(), &"connection".into())
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null());
    let save_data = connection
        .as_ref()
        .and_then(|c| js_sys::Reflect::get(c, &"saveData".into()).ok())
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    let slow_network = connection
        .as_ref()
        .and_then(|c| js_sys::Reflect::get(c, &"effectiveType".into()).ok())
        .and_then(|v| v.as_string())
        .map_or(false, |t| t == "slow-2g" || t == "2g");

    let viewport_width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);

    Signals {
        device_memory_gb,
        cores,
        user_agent,
        reduced_motion,
        touch,
        save_data,
        slow_network,
        viewport_width,
    }
}

/// Mirrors the profile onto `<body>` so stylesheets can gate on it.
fn apply_body_classes(document: &Document, profile: &CapabilityProfile, signals: &Signals) {
    let Some(body) = document.body() else { return };
    if profile.is_low_end_device {
        dom::add_class(&body, "low-end-device");
    }
    if profile.prefers_reduced_motion {
        dom::add_class(&body, "reduced-motion");
    }
    if profile.is_touch {
        dom::add_class(&body, "touch-device");
    }
    if signals.save_data || signals.slow_network {
        dom::add_class(&body, "low-bandwidth");
    }
}

fn preconnect(document: &Document) {
    let Some(head) = document.head() else { return };
    for origin in PRECONNECT_ORIGINS {
        let Ok(el) = document.create_element("link") else { continue };
        let Ok(link) = el.dyn_into::<web_sys::HtmlLinkElement>() else { continue };
        link.set_rel("preconnect");
        link.set_href(origin);
        link.set_cross_origin(Some(""));
        head.append_child(&link).ok();
    }
}
