//! Loading screen: simulated progress with a watchdog ceiling.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;

use super::{dom, Controller};

const PROGRESS_TICK_MS: i32 = 100;
const PROGRESS_MAX_STEP: f64 = 15.0;
const FADE_DELAY_MS: i32 = 500;
const REVEAL_DELAY_MS: i32 = 300;
const REMOVE_DELAY_MS: i32 = 800;
/// Force-dismiss if the simulation has not completed by then.
const WATCHDOG_MS: i32 = 5000;

pub fn start(ctrl: &Rc<Controller>) {
    if dom::by_id(&ctrl.document, "loadingScreen").is_none() {
        // Nothing to wait for.
        ctrl.start_enhancements();
        return;
    }

    let progress = Rc::new(Cell::new(0.0f64));
    let slot = Rc::new(Cell::new(0));
    let tick = {
        let c = ctrl.clone();
        let progress = progress.clone();
        let slot = slot.clone();
        Closure::wrap(Box::new(move || {
            if !c.alive() {
                return;
            }
            let mut value = progress.get() + dom::rand() * PROGRESS_MAX_STEP;
            if value >= 100.0 {
                value = 100.0;
                c.window.clear_interval_with_handle(slot.get());
                finish(&c);
            }
            progress.set(value);
            if let Some(bar) = dom::query(&c.document, ".progress-bar") {
                if let Some(bar) = dom::as_html(&bar) {
                    dom::set_style(bar, "width", &format!("{value}%"));
                }
            }
        }) as Box<dyn FnMut()>)
    };
    ctrl.every(PROGRESS_TICK_MS, tick, &slot);

    // Watchdog: a stuck simulation must never hold the page hostage.
    let c = ctrl.clone();
    ctrl.timeout_in(WATCHDOG_MS, move || {
        if c.alive() && !c.loading_done.get() {
            log::warn!("loading screen watchdog fired");
            finish(&c);
        }
    });
}

/// Dismissal sequence; guarded so the watchdog and the normal path cannot
/// both run it.
fn finish(ctrl: &Rc<Controller>) {
    if ctrl.loading_done.replace(true) {
        return;
    }
    let c = ctrl.clone();
    ctrl.timeout_in(FADE_DELAY_MS, move || {
        if !c.alive() {
            return;
        }
        if let Some(screen) = dom::by_id(&c.document, "loadingScreen") {
            dom::add_class(&screen, "fade-out");
        }
        let c2 = c.clone();
        c.timeout_in(REVEAL_DELAY_MS, move || {
            if !c2.alive() {
                return;
            }
            if let Some(main) = dom::by_id(&c2.document, "mainContent") {
                dom::add_class(&main, "visible");
            }
            c2.start_enhancements();
        });
        let c3 = c.clone();
        c.timeout_in(REMOVE_DELAY_MS, move || {
            if let Some(screen) = dom::by_id(&c3.document, "loadingScreen") {
                screen.remove();
            }
        });
    });
}
