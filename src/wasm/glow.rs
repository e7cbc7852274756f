//! Cursor glow follower. Created lazily on the first mouse move, so touch
//! sessions (no pointer) never pay for it; the subsystem is also skipped
//! outright on touch-classified devices.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, MouseEvent};

use super::{dom, Controller};

const GLOW_SIZE_PX: i32 = 40;
const IDLE_FADE_MS: i32 = 1000;

const BASE_STYLE: &str = "position: fixed; width: 40px; height: 40px; \
    background: radial-gradient(circle, rgba(0,255,136,0.3) 0%, rgba(0,162,255,0.1) 50%, transparent 70%); \
    border-radius: 50%; pointer-events: none; z-index: 9999; \
    transition: all 0.1s ease; opacity: 0;";

const HOVER_GRADIENT: &str =
    "radial-gradient(circle, rgba(0,255,136,0.4) 0%, rgba(0,162,255,0.2) 50%, transparent 70%)";
const REST_GRADIENT: &str =
    "radial-gradient(circle, rgba(0,255,136,0.3) 0%, rgba(0,162,255,0.1) 50%, transparent 70%)";

const HOVER_TARGETS: &str = ".project-card, .skill-item, .contact-link, .cta-button";

pub fn start(ctrl: &Rc<Controller>) {
    if ctrl.profile().is_touch {
        return;
    }

    let glow: Rc<RefCell<Option<HtmlElement>>> = Rc::new(RefCell::new(None));
    let idle_timer = Rc::new(Cell::new(0));

    let c = ctrl.clone();
    let glow_for_move = glow.clone();
    let idle = idle_timer.clone();
    let on_move = Closure::wrap(Box::new(move |event: Event| {
        if !c.alive() {
            return;
        }
        let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        if glow_for_move.borrow().is_none() {
            *glow_for_move.borrow_mut() = create_glow(&c);
        }
        let guard = glow_for_move.borrow();
        let Some(node) = guard.as_ref() else { return };
        let half = GLOW_SIZE_PX / 2;
        dom::set_style(node, "left", &format!("{}px", mouse.client_x() - half));
        dom::set_style(node, "top", &format!("{}px", mouse.client_y() - half));
        dom::set_style(node, "opacity", "1");

        // Re-arm the idle fade.
        c.window.clear_timeout_with_handle(idle.get());
        let fade_glow = glow_for_move.clone();
        let c2 = c.clone();
        let cb = Closure::once_into_js(move || {
            if !c2.alive() {
                return;
            }
            if let Some(node) = fade_glow.borrow().as_ref() {
                dom::set_style(node, "opacity", "0");
            }
        });
        if let Ok(id) = c
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), IDLE_FADE_MS)
        {
            idle.set(id);
        }
    }) as Box<dyn FnMut(Event)>);
    let target = ctrl.document.clone();
    ctrl.listen(&target, "mousemove", on_move);

    for el in dom::query_all(&ctrl.document, HOVER_TARGETS) {
        let c = ctrl.clone();
        let glow_enter = glow.clone();
        let on_enter = Closure::wrap(Box::new(move |_: Event| {
            if !c.alive() {
                return;
            }
            if let Some(node) = glow_enter.borrow().as_ref() {
                dom::set_style(node, "transform", "scale(1.5)");
                dom::set_style(node, "background", HOVER_GRADIENT);
            }
        }) as Box<dyn FnMut(Event)>);
        ctrl.listen(&el, "mouseenter", on_enter);

        let c = ctrl.clone();
        let glow_leave = glow.clone();
        let on_leave = Closure::wrap(Box::new(move |_: Event| {
            if !c.alive() {
                return;
            }
            if let Some(node) = glow_leave.borrow().as_ref() {
                dom::set_style(node, "transform", "scale(1)");
                dom::set_style(node, "background", REST_GRADIENT);
            }
        }) as Box<dyn FnMut(Event)>);
        ctrl.listen(&el, "mouseleave", on_leave);
    }
}

fn create_glow(ctrl: &Controller) -> Option<HtmlElement> {
    let node = ctrl.document.create_element("div").ok()?;
    node.set_class_name("cursor-glow");
    node.set_attribute("style", BASE_STYLE).ok();
    let body = ctrl.document.body()?;
    body.append_child(&node).ok()?;
    node.dyn_into::<HtmlElement>().ok()
}
