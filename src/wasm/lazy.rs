//! Lazy image loading: `img[data-src]` gets its real source installed the
//! first time it approaches the viewport.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlImageElement, IntersectionObserver, IntersectionObserverEntry};

use super::{dom, Controller};

pub fn start(ctrl: &Rc<Controller>) {
    let images = dom::query_all(&ctrl.document, "img[data-src]");
    if images.is_empty() {
        return;
    }

    let supported =
        js_sys::Reflect::has(ctrl.window.as_ref(), &"IntersectionObserver".into()).unwrap_or(false);
    if !supported {
        for img in &images {
            install_source(img);
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
                        install_source(&target);
                        observer.unobserve(&target);
                    }
                }
            },
        )
            as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>)
    };

    let Ok(observer) = IntersectionObserver::new(cb.as_ref().unchecked_ref()) else {
        return;
    };
    for img in &images {
        observer.observe(img);
    }
    ctrl.register_observer(observer, cb);
}

fn install_source(el: &Element) {
    let Some(src) = el.get_attribute("data-src") else {
        return;
    };
    if let Some(img) = el.dyn_ref::<HtmlImageElement>() {
        img.set_src(&src);
        el.remove_attribute("data-src").ok();
    }
}
