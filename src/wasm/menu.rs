//! Mobile menu, smooth in-page scrolling, and keyboard navigation.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, KeyboardEvent, Node, ScrollBehavior, ScrollIntoViewOptions,
    ScrollToOptions, TouchEvent,
};

use super::{dom, Controller};

/// Anchor targets land this far below the viewport top, clearing the bar.
const NAV_OFFSET_PX: f64 = 80.0;
/// A leftward swipe at least this long closes the open menu.
const SWIPE_CLOSE_PX: f64 = 50.0;
const SECTION_JUMP_LEAD_PX: f64 = 100.0;

pub fn start(ctrl: &Rc<Controller>) {
    bind_hamburger(ctrl);
    bind_outside_close(ctrl);
    bind_keyboard(ctrl);
    if ctrl.profile().is_touch {
        bind_swipe_close(ctrl);
    }
    bind_smooth_scroll(ctrl);
}

pub fn close_menu(document: &Document) {
    if let Some(hamburger) = dom::by_id(document, "hamburger") {
        dom::remove_class(&hamburger, "active");
    }
    if let Some(nav) = dom::by_id(document, "nav-menu") {
        dom::remove_class(&nav, "active");
    }
    if let Some(body) = document.body() {
        dom::set_style(&body, "overflow", "");
    }
}

fn menu_is_open(document: &Document) -> bool {
    dom::by_id(document, "nav-menu").map_or(false, |nav| dom::has_class(&nav, "active"))
}

fn toggle_menu(document: &Document) {
    let Some(hamburger) = dom::by_id(document, "hamburger") else {
        return;
    };
    let Some(nav) = dom::by_id(document, "nav-menu") else {
        return;
    };
    hamburger.class_list().toggle("active").ok();
    nav.class_list().toggle("active").ok();
    // Page scroll is locked exactly while the menu is open.
    if let Some(body) = document.body() {
        let overflow = if dom::has_class(&nav, "active") { "hidden" } else { "" };
        dom::set_style(&body, "overflow", overflow);
    }
}

fn bind_hamburger(ctrl: &Rc<Controller>) {
    let Some(hamburger) = dom::by_id(&ctrl.document, "hamburger") else {
        return;
    };
    let c = ctrl.clone();
    let on_click = Closure::wrap(Box::new(move |_: Event| {
        if c.alive() {
            toggle_menu(&c.document);
        }
    }) as Box<dyn FnMut(Event)>);
    ctrl.listen(&hamburger, "click", on_click);

    for link in dom::query_all(&ctrl.document, ".nav-menu a") {
        let c = ctrl.clone();
        let on_link = Closure::wrap(Box::new(move |_: Event| {
            if c.alive() {
                close_menu(&c.document);
            }
        }) as Box<dyn FnMut(Event)>);
        ctrl.listen(&link, "click", on_link);
    }
}

fn bind_outside_close(ctrl: &Rc<Controller>) {
    let c = ctrl.clone();
    let on_click = Closure::wrap(Box::new(move |event: Event| {
        if !c.alive() || !menu_is_open(&c.document) {
            return;
        }
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Node>().ok()) else {
            return;
        };
        let inside_hamburger = dom::by_id(&c.document, "hamburger")
            .map_or(false, |h| h.contains(Some(&target)));
        let inside_menu = dom::by_id(&c.document, "nav-menu")
            .map_or(false, |m| m.contains(Some(&target)));
        if !inside_hamburger && !inside_menu {
            close_menu(&c.document);
        }
    }) as Box<dyn FnMut(Event)>);
    let target = ctrl.document.clone();
    ctrl.listen(&target, "click", on_click);
}

fn bind_keyboard(ctrl: &Rc<Controller>) {
    let c = ctrl.clone();
    let on_key = Closure::wrap(Box::new(move |event: Event| {
        if !c.alive() {
            return;
        }
        let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        match key.key().as_str() {
            "Escape" => close_menu(&c.document),
            "ArrowDown" if key.ctrl_key() => {
                event.prevent_default();
                jump_section(&c, Direction::Next);
            }
            "ArrowUp" if key.ctrl_key() => {
                event.prevent_default();
                jump_section(&c, Direction::Prev);
            }
            _ => {}
        }
    }) as Box<dyn FnMut(Event)>);
    let target = ctrl.document.clone();
    ctrl.listen(&target, "keydown", on_key);
}

enum Direction {
    Next,
    Prev,
}

fn jump_section(ctrl: &Controller, direction: Direction) {
    let scroll_top = ctrl.window.page_y_offset().unwrap_or(0.0);
    let sections = dom::query_all(&ctrl.document, "section[id]");
    let pick = |el: &&Element| {
        let top = dom::as_html(el).map(|h| h.offset_top() as f64).unwrap_or(0.0);
        match direction {
            Direction::Next => top > scroll_top + SECTION_JUMP_LEAD_PX,
            Direction::Prev => top < scroll_top - SECTION_JUMP_LEAD_PX,
        }
    };
    let section = match direction {
        Direction::Next => sections.iter().find(pick),
        Direction::Prev => sections.iter().rev().find(pick),
    };
    if let Some(section) = section {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        section.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

fn bind_swipe_close(ctrl: &Rc<Controller>) {
    let start_x = Rc::new(Cell::new(0.0f64));

    let sx = start_x.clone();
    let on_start = Closure::wrap(Box::new(move |event: Event| {
        if let Some(touch) = event
            .dyn_ref::<TouchEvent>()
            .and_then(|t| t.changed_touches().get(0))
        {
            sx.set(touch.client_x() as f64);
        }
    }) as Box<dyn FnMut(Event)>);
    let target = ctrl.document.clone();
    ctrl.listen(&target, "touchstart", on_start);

    let c = ctrl.clone();
    let on_end = Closure::wrap(Box::new(move |event: Event| {
        if !c.alive() || !menu_is_open(&c.document) {
            return;
        }
        let Some(touch) = event
            .dyn_ref::<TouchEvent>()
            .and_then(|t| t.changed_touches().get(0))
        else {
            return;
        };
        if start_x.get() - touch.client_x() as f64 > SWIPE_CLOSE_PX {
            close_menu(&c.document);
        }
    }) as Box<dyn FnMut(Event)>);
    ctrl.listen(&target, "touchend", on_end);
}

fn bind_smooth_scroll(ctrl: &Rc<Controller>) {
    let smooth_supported = ctrl
        .document
        .document_element()
        .and_then(|root| root.dyn_into::<web_sys::HtmlElement>().ok())
        .map_or(false, |root| {
            js_sys::Reflect::has(root.style().as_ref(), &"scrollBehavior".into()).unwrap_or(false)
        });

    for anchor in dom::query_all(&ctrl.document, "a[href^='#']") {
        let c = ctrl.clone();
        let href = anchor.get_attribute("href").unwrap_or_default();
        let on_click = Closure::wrap(Box::new(move |event: Event| {
            if !c.alive() {
                return;
            }
            let id = href.trim_start_matches('#');
            if id.is_empty() {
                return;
            }
            let Some(section) = dom::by_id(&c.document, id) else {
                return;
            };
            event.prevent_default();
            let top = section.offset_top() as f64 - NAV_OFFSET_PX;
            if smooth_supported {
                let options = ScrollToOptions::new();
                options.set_top(top);
                options.set_behavior(ScrollBehavior::Smooth);
                c.window.scroll_to_with_scroll_to_options(&options);
            } else {
                c.window.scroll_to_with_x_and_y(0.0, top);
            }
        }) as Box<dyn FnMut(Event)>);
        ctrl.listen(&anchor, "click", on_click);
    }
}
