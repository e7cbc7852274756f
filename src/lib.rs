#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Adaptive visual-effects controller for a portfolio page, compiled to
//! WebAssembly. `effects` holds the target-independent logic; `wasm`
//! binds it to the host document.

pub mod effects;

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;

    mod ambient;
    pub mod controller;
    mod dom;
    mod glow;
    mod lazy;
    mod loading;
    mod menu;
    mod reactors;
    mod reveal;
    mod subtitle;

    pub use ambient::spawn_glyph;
    pub use menu::close_menu;
    pub use reveal::reveal_element;

    use controller::Controller;

    thread_local! {
        static CONTROLLER: RefCell<Option<Rc<Controller>>> = RefCell::new(None);
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let controller = Controller::start(window, document)?;
        CONTROLLER.with(|slot| *slot.borrow_mut() = Some(controller));
        Ok(())
    }

    /// Tears down every listener, timer, and observer the controller owns.
    /// The page keeps working without effects afterwards.
    #[wasm_bindgen]
    pub fn shutdown() {
        CONTROLLER.with(|slot| {
            if let Some(controller) = slot.borrow_mut().take() {
                controller.dispose();
            }
        });
    }
}

// When compiling for non-wasm targets (e.g., `cargo test` on host),
// provide an empty stub so the crate still builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn main() {}
