//! Thin, defensive DOM accessors. Every lookup returns an `Option` so a
//! page missing a contract element silently skips the routine that wanted
//! it — nothing here throws.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

pub fn by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

pub fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let mut out = Vec::new();
    if let Ok(list) = document.query_selector_all(selector) {
        for i in 0..list.length() {
            if let Some(node) = list.get(i) {
                if let Ok(el) = node.dyn_into::<Element>() {
                    out.push(el);
                }
            }
        }
    }
    out
}

pub fn add_class(el: &Element, class: &str) {
    el.class_list().add_1(class).ok();
}

pub fn remove_class(el: &Element, class: &str) {
    el.class_list().remove_1(class).ok();
}

pub fn has_class(el: &Element, class: &str) -> bool {
    el.class_list().contains(class)
}

pub fn set_style(el: &HtmlElement, property: &str, value: &str) {
    el.style().set_property(property, value).ok();
}

pub fn as_html(el: &Element) -> Option<&HtmlElement> {
    el.dyn_ref::<HtmlElement>()
}

pub fn rand() -> f64 {
    js_sys::Math::random()
}

/// Uniform draw from [lo, hi).
pub fn rand_range(lo: f64, hi: f64) -> f64 {
    lo + rand() * (hi - lo)
}

pub fn now_ms(window: &Window) -> f64 {
    window.performance().map(|p| p.now()).unwrap_or(0.0)
}

/// One-shot timer. The closure frees itself after firing, so nothing needs
/// to keep it alive; bodies that can outlive the controller must check its
/// `alive` flag (or their node's parent) before touching the page.
pub fn after(window: &Window, ms: i32, f: impl FnOnce() + 'static) {
    let cb = Closure::once_into_js(f);
    window
        .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms)
        .ok();
}
