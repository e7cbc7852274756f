//! Ambient animators: the one-shot particle field and the falling-glyph
//! rain with its live-census cap.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event};

use crate::effects::capability::{EffectTier, GLYPH_FIELD_MIN_WIDTH};
use crate::effects::glyphs::{glyph_at, GlyphField};

use super::{dom, Controller};

const PARTICLE_ALT_COLOR_ODDS: f64 = 0.3;
const GLYPH_ALT_COLOR_ODDS: f64 = 0.2;
/// The minimal tier always gets this small fixed set, whatever the
/// device class says.
const MINIMAL_PARTICLE_COUNT: u32 = 10;

/// One-time particle census; nodes persist for the page lifetime.
pub fn start_particles(ctrl: &Rc<Controller>) {
    let Some(container) = dom::by_id(&ctrl.document, "particles") else {
        return;
    };
    let count = if ctrl.tier() == EffectTier::Minimal {
        MINIMAL_PARTICLE_COUNT
    } else {
        ctrl.tuning().particle_count
    };
    let (lo, hi) = ctrl.tuning().particle_duration_s;
    for _ in 0..count {
        let Ok(node) = ctrl.document.create_element("div") else {
            continue;
        };
        node.set_class_name("particle");
        let size = dom::rand_range(2.0, 6.0);
        let mut style = format!(
            "left: {:.2}vw; width: {:.1}px; height: {:.1}px; \
             animation-duration: {:.2}s; animation-delay: {:.2}s;",
            dom::rand() * 100.0,
            size,
            size,
            dom::rand_range(lo, hi),
            dom::rand() * 15.0,
        );
        if dom::rand() < PARTICLE_ALT_COLOR_ODDS {
            style.push_str(" background: var(--secondary-color);");
        }
        node.set_attribute("style", &style).ok();
        container.append_child(&node).ok();
    }
}

/// Starts the rain on the full tier; the minimal tier hides the field
/// outright and spawns nothing.
pub fn start_glyphs(ctrl: &Rc<Controller>) {
    let Some(container) = dom::by_id(&ctrl.document, "matrix") else {
        return;
    };
    if ctrl.tier() == EffectTier::Minimal {
        dom::set_style(&container, "display", "none");
        return;
    }

    let spawner = {
        let c = ctrl.clone();
        Closure::wrap(Box::new(move || spawn_glyph(&c)) as Box<dyn FnMut()>)
    };
    *ctrl.glyph_spawner.borrow_mut() = Some(spawner);
    resume_spawning(ctrl);

    // Page hidden: stop the interval and drop every live node at once.
    let c = ctrl.clone();
    let on_visibility = Closure::wrap(Box::new(move |_: Event| {
        if !c.alive() {
            return;
        }
        if c.document.hidden() {
            halt_spawning(&c);
            purge_glyphs(&c.document, &c.glyphs);
        } else if viewport_allows_glyphs(&c) {
            resume_spawning(&c);
        }
    }) as Box<dyn FnMut(Event)>);
    let target = ctrl.document.clone();
    ctrl.listen(&target, "visibilitychange", on_visibility);
}

/// One spawn tick: claim a census slot, attach a styled glyph node, and
/// schedule the matching removal.
pub fn spawn_glyph(ctrl: &Rc<Controller>) {
    if !ctrl.alive() {
        return;
    }
    let Some(container) = dom::by_id(&ctrl.document, "matrix") else {
        return;
    };
    if !ctrl.glyphs.borrow_mut().try_spawn() {
        return;
    }

    let Ok(node) = ctrl.document.create_element("div") else {
        ctrl.glyphs.borrow_mut().glyph_removed();
        return;
    };
    node.set_class_name("matrix-char");
    node.set_text_content(Some(&glyph_at(dom::rand()).to_string()));
    let duration_s = dom::rand_range(3.0, 8.0);
    let mut style = format!(
        "left: {:.2}vw; animation-duration: {:.2}s; font-size: {:.1}px; opacity: {:.2};",
        dom::rand() * 100.0,
        duration_s,
        dom::rand_range(10.0, 18.0),
        dom::rand_range(0.1, 0.6),
    );
    if dom::rand() < GLYPH_ALT_COLOR_ODDS {
        style.push_str(" color: var(--secondary-color);");
    }
    node.set_attribute("style", &style).ok();
    if container.append_child(&node).is_err() {
        ctrl.glyphs.borrow_mut().glyph_removed();
        return;
    }

    // Matching removal once the fall completes. A purge may have detached
    // the node first; the parent check keeps the census honest.
    let census = ctrl.glyphs.clone();
    dom::after(&ctrl.window, (duration_s * 1000.0) as i32, move || {
        if node.parent_node().is_some() {
            node.remove();
            census.borrow_mut().glyph_removed();
        }
    });
}

pub fn purge_glyphs(document: &Document, census: &Rc<RefCell<GlyphField>>) {
    for node in dom::query_all(document, ".matrix-char") {
        node.remove();
    }
    census.borrow_mut().purge();
}

/// Hide-and-purge below the minimum width, restore above it.
pub(super) fn sync_viewport(ctrl: &Rc<Controller>, width: f64) {
    if ctrl.tier() == EffectTier::Minimal {
        return;
    }
    let Some(container) = dom::by_id(&ctrl.document, "matrix") else {
        return;
    };
    if width < GLYPH_FIELD_MIN_WIDTH {
        dom::set_style(&container, "display", "none");
        halt_spawning(ctrl);
        purge_glyphs(&ctrl.document, &ctrl.glyphs);
    } else {
        dom::set_style(&container, "display", "");
        if !ctrl.document.hidden() {
            resume_spawning(ctrl);
        }
    }
}

fn resume_spawning(ctrl: &Rc<Controller>) {
    if ctrl.glyph_timer.get().is_some() {
        return;
    }
    let spawner = ctrl.glyph_spawner.borrow();
    let Some(cb) = spawner.as_ref() else { return };
    if let Ok(id) = ctrl
        .window
        .set_interval_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            ctrl.tuning().glyph_interval_ms as i32,
        )
    {
        ctrl.glyph_timer.set(Some(id));
    }
}

fn halt_spawning(ctrl: &Controller) {
    if let Some(id) = ctrl.glyph_timer.take() {
        ctrl.window.clear_interval_with_handle(id);
    }
}

fn viewport_allows_glyphs(ctrl: &Controller) -> bool {
    ctrl.window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .map_or(true, |w| w >= GLYPH_FIELD_MIN_WIDTH)
}
