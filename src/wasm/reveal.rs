//! Visibility-triggered reveal: each `.fade-in` element flips to
//! `visible` exactly once, then cascades child pulses for card-like and
//! skill-like elements.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use super::{dom, Controller};

const THRESHOLD: f64 = 0.1;
const ROOT_MARGIN: &str = "0px 0px -50px 0px";

const ICON_PULSE_DELAY_MS: i32 = 200;
const ICON_PULSE_RESET_MS: i32 = 600;
const TECH_STAGGER_MS: i32 = 100;
const TECH_PULSE_RESET_MS: i32 = 200;
const SKILL_PULSE_DELAY_MS: i32 = 100;
const SKILL_PULSE_RESET_MS: i32 = 500;

const CARD_ENTRANCE_DELAY_MS: i32 = 1000;

pub fn start(ctrl: &Rc<Controller>) {
    let targets = dom::query_all(&ctrl.document, ".fade-in");
    if targets.is_empty() {
        return;
    }

    // Without observer support every element reveals immediately.
    let supported =
        js_sys::Reflect::has(ctrl.window.as_ref(), &"IntersectionObserver".into()).unwrap_or(false);
    if !supported {
        for el in &targets {
            reveal_element(ctrl, el);
        }
        return;
    }

    let cb = {
        let c = ctrl.clone();
        Closure::wrap(Box::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                if !c.alive() {
                    return;
                }
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if entry.is_intersecting() {
                        let target = entry.target();
                        reveal_element(&c, &target);
                        observer.unobserve(&target);
                    }
                }
            },
        )
            as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>)
    };

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(THRESHOLD));
    options.set_root_margin(ROOT_MARGIN);

    let Ok(observer) =
        IntersectionObserver::new_with_options(cb.as_ref().unchecked_ref(), &options)
    else {
        return;
    };
    for el in &targets {
        observer.observe(el);
    }
    ctrl.register_observer(observer, cb);
}

/// One-way transition. Returns false when the element was already visible,
/// so repeat intersections are no-ops.
pub fn reveal_element(ctrl: &Rc<Controller>, el: &Element) -> bool {
    if dom::has_class(el, "visible") {
        return false;
    }
    dom::add_class(el, "visible");

    if dom::has_class(el, "project-card") {
        cascade_project_card(ctrl, el);
    } else if dom::has_class(el, "skill-item") {
        cascade_skill_item(ctrl, el);
    }
    true
}

fn cascade_project_card(ctrl: &Rc<Controller>, card: &Element) {
    if let Ok(Some(icon)) = card.query_selector(".project-icon") {
        pulse(ctrl, icon, "scale(1.1) rotate(360deg)", ICON_PULSE_DELAY_MS, ICON_PULSE_RESET_MS);
    }
    if let Ok(list) = card.query_selector_all(".tech-item") {
        for i in 0..list.length() {
            let Some(item) = list.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            pulse(
                ctrl,
                item,
                "scale(1.1)",
                i as i32 * TECH_STAGGER_MS,
                TECH_PULSE_RESET_MS,
            );
        }
    }
}

fn cascade_skill_item(ctrl: &Rc<Controller>, item: &Element) {
    if let Ok(Some(icon)) = item.query_selector(".skill-icon") {
        pulse(ctrl, icon, "scale(1.2) rotate(15deg)", SKILL_PULSE_DELAY_MS, SKILL_PULSE_RESET_MS);
    }
}

/// Apply a transform after `delay`, clear it `reset` later.
fn pulse(ctrl: &Rc<Controller>, el: Element, transform: &'static str, delay_ms: i32, reset_ms: i32) {
    let c = ctrl.clone();
    dom::after(&ctrl.window, delay_ms, move || {
        if !c.alive() {
            return;
        }
        let Some(html) = dom::as_html(&el) else { return };
        dom::set_style(html, "transform", transform);
        let c2 = c.clone();
        dom::after(&c.window, reset_ms, move || {
            if !c2.alive() {
                return;
            }
            if let Some(html) = dom::as_html(&el) {
                dom::set_style(html, "transform", "");
            }
        });
    });
}

/// Baseline entrance styling for cards and skills, staggered per index.
pub fn prepare_card_entrances(ctrl: &Rc<Controller>) {
    let c = ctrl.clone();
    ctrl.timeout_in(CARD_ENTRANCE_DELAY_MS, move || {
        if !c.alive() {
            return;
        }
        stagger(&c, ".project-card", 0.15);
        stagger(&c, ".skill-item", 0.1);
    });
}

fn stagger(ctrl: &Controller, selector: &str, step_s: f64) {
    for (i, el) in dom::query_all(&ctrl.document, selector).into_iter().enumerate() {
        let Some(html) = dom::as_html(&el) else { continue };
        dom::set_style(html, "animation-delay", &format!("{:.2}s", i as f64 * step_s));
        dom::set_style(html, "opacity", "0");
        dom::set_style(html, "transform", "translateY(30px)");
        dom::set_style(html, "transition", "opacity 0.6s ease, transform 0.6s ease");
    }
}
