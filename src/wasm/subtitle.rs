//! Drives the typing state machine against the subtitle node.
//!
//! The loop is a self-rescheduling timeout: the closure re-arms itself
//! with the delay the state machine reports, plus jitter. Storing the
//! closure inside an `Option` in an `Rc<RefCell<..>>` lets it obtain a
//! reference to itself, same shape as a recursive animation-frame loop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::effects::typing::{subtitle_texts, TypingLoop, JITTER_MS, START_DELAY_MS};

use super::{dom, Controller};

pub fn start(ctrl: &Rc<Controller>) {
    let Some(node) = dom::by_id(&ctrl.document, "dynamicSubtitle") else {
        return;
    };
    let Some(machine) = TypingLoop::new(subtitle_texts(ctrl.profile().is_mobile)) else {
        return;
    };
    let machine = Rc::new(RefCell::new(machine));

    let slot = Rc::new(Cell::new(0));
    let cell: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let handle = cell.clone();

    let c = ctrl.clone();
    let tick_slot = slot.clone();
    *handle.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !c.alive() {
            return;
        }
        let step = machine.borrow_mut().step();
        node.set_text_content(Some(&step.display));

        let jitter = (dom::rand() * 2.0 - 1.0) * JITTER_MS;
        let delay = (step.delay_ms as f64 + jitter).max(0.0) as i32;
        let reschedule = cell.borrow();
        if let Some(cb) = reschedule.as_ref() {
            if let Ok(id) = c
                .window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    cb.as_ref().unchecked_ref(),
                    delay,
                )
            {
                tick_slot.set(id);
            }
        }
    }) as Box<dyn FnMut()>));

    {
        let first = handle.borrow();
        if let Some(cb) = first.as_ref() {
            if let Ok(id) = ctrl
                .window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    cb.as_ref().unchecked_ref(),
                    START_DELAY_MS as i32,
                )
            {
                slot.set(id);
            }
        }
    }
    ctrl.register_chain(slot, handle);
}
