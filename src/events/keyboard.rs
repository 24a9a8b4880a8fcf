use crate::input::{key_code_for, PendingInput};
use configurator_core::KeyCode;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, pending: &Rc<RefCell<PendingInput>>) {
    if ev.repeat() {
        return;
    }
    let Some(code) = key_code_for(&ev.key()) else {
        return;
    };
    if matches!(code, KeyCode::Backspace | KeyCode::F3 | KeyCode::F4) {
        ev.prevent_default();
    }
    log::debug!("[keys] {:?}", code);
    pending.borrow_mut().keys.push(code);
}

pub fn wire_global_keydown(pending: Rc<RefCell<PendingInput>>) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &pending);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
