//! Rate-limited scroll and resize reactors: progress indicator, navbar,
//! parallax, active-section highlighting, and the mobile/desktop flip.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use web_sys::Event;

use crate::effects::capability::is_mobile_width;
use crate::effects::scroll::{
    active_section, progress_percent, shape_parallax, HEADER_PARALLAX, PARTICLES_PARALLAX,
    SHAPE_SPIN_DEG_PER_PX,
};

use super::{ambient, dom, menu, Controller};

pub fn bind(ctrl: &Rc<Controller>) {
    let c = ctrl.clone();
    let on_scroll = Closure::wrap(Box::new(move |_: Event| {
        if !c.alive() || !c.scroll_gate.borrow_mut().admit(dom::now_ms(&c.window)) {
            return;
        }
        let scroll_top = c.window.page_y_offset().unwrap_or(0.0);
        update_indicator(&c, scroll_top);
        update_navbar(&c, scroll_top);
        update_parallax(&c, scroll_top);
        update_active_section(&c, scroll_top);
    }) as Box<dyn FnMut(Event)>);
    let window_target = ctrl.window.clone();
    ctrl.listen(&window_target, "scroll", on_scroll);

    let c = ctrl.clone();
    let on_resize = Closure::wrap(Box::new(move |_: Event| {
        if !c.alive() || !c.resize_gate.borrow_mut().admit(dom::now_ms(&c.window)) {
            return;
        }
        let Some(width) = c.window.inner_width().ok().and_then(|v| v.as_f64()) else {
            return;
        };
        let was_mobile = c.profile().is_mobile;
        let now_mobile = is_mobile_width(width);
        c.set_is_mobile(now_mobile);
        if was_mobile && !now_mobile {
            // Leaving mobile layout with the menu open would strand the
            // scroll lock.
            menu::close_menu(&c.document);
        }
        ambient::sync_viewport(&c, width);
    }) as Box<dyn FnMut(Event)>);
    ctrl.listen(&window_target, "resize", on_resize);
}

fn update_indicator(ctrl: &Controller, scroll_top: f64) {
    let Some(indicator) = dom::by_id(&ctrl.document, "scrollIndicator") else {
        return;
    };
    let scroll_height = ctrl
        .document
        .body()
        .map(|b| b.offset_height() as f64)
        .unwrap_or(0.0);
    let client_height = ctrl
        .window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let percent = progress_percent(scroll_top, scroll_height, client_height);
    dom::set_style(&indicator, "width", &format!("{percent:.2}%"));
}

fn update_navbar(ctrl: &Controller, scroll_top: f64) {
    let Some(navbar) = dom::by_id(&ctrl.document, "navbar") else {
        return;
    };
    let frame = ctrl.navbar.borrow_mut().update(scroll_top);
    if frame.scrolled {
        dom::add_class(&navbar, "scrolled");
    } else {
        dom::remove_class(&navbar, "scrolled");
    }
    let transform = if frame.hidden {
        "translateY(-100%)"
    } else {
        "translateY(0)"
    };
    dom::set_style(&navbar, "transform", transform);
}

fn update_parallax(ctrl: &Controller, scroll_top: f64) {
    // Parallax is skipped wholesale on low-end hardware.
    if ctrl.profile().is_low_end_device {
        return;
    }
    if let Some(header) = dom::query(&ctrl.document, ".header") {
        if let Some(header) = dom::as_html(&header) {
            dom::set_style(
                header,
                "transform",
                &format!("translateY({:.1}px)", scroll_top * HEADER_PARALLAX),
            );
        }
    }
    if let Some(particles) = dom::by_id(&ctrl.document, "particles") {
        dom::set_style(
            &particles,
            "transform",
            &format!("translateY({:.1}px)", scroll_top * PARTICLES_PARALLAX),
        );
    }
    for (i, shape) in dom::query_all(&ctrl.document, ".shape").into_iter().enumerate() {
        if let Some(shape) = dom::as_html(&shape) {
            dom::set_style(
                shape,
                "transform",
                &format!(
                    "translateY({:.1}px) rotate({:.1}deg)",
                    scroll_top * shape_parallax(i),
                    scroll_top * SHAPE_SPIN_DEG_PER_PX
                ),
            );
        }
    }
}

fn update_active_section(ctrl: &Controller, scroll_top: f64) {
    let sections = dom::query_all(&ctrl.document, "section[id]");
    if sections.is_empty() {
        return;
    }
    let spans: Vec<(f64, f64)> = sections
        .iter()
        .map(|s| {
            let top = dom::as_html(s).map(|h| h.offset_top() as f64).unwrap_or(0.0);
            (top, s.client_height() as f64)
        })
        .collect();
    let active = active_section(scroll_top, &spans).and_then(|i| sections[i].get_attribute("id"));

    for link in dom::query_all(&ctrl.document, ".nav-menu a[href^='#']") {
        let is_active = match (&active, link.get_attribute("href")) {
            (Some(id), Some(href)) => href == format!("#{id}"),
            _ => false,
        };
        if is_active {
            dom::add_class(&link, "active");
        } else {
            dom::remove_class(&link, "active");
        }
    }
}
