use crate::constants::CLASS_SELECTED;
use crate::dom;
use crate::hosts::{accessory_widget_id, toggle_widget_id};
use crate::input::PendingInput;
use configurator_core::{AccessoryVariant, AttachmentToggle, UiCommand};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Widget clicks are queued and reach the session on the next frame.
pub fn wire_widgets(document: &web::Document, pending: &Rc<RefCell<PendingInput>>) {
    for variant in AccessoryVariant::ALL {
        let p = pending.clone();
        dom::add_click_listener(document, &accessory_widget_id(variant), move || {
            p.borrow_mut()
                .commands
                .push(UiCommand::SelectAccessory(variant));
        });
    }

    for toggle in AttachmentToggle::ALL {
        let p = pending.clone();
        let doc = document.clone();
        let id = toggle_widget_id(toggle);
        dom::add_click_listener(document, id, move || {
            // the DOM mirrors the toggle state, so flip what is shown
            let on = doc
                .get_element_by_id(id)
                .map(|el| el.class_list().contains(CLASS_SELECTED))
                .unwrap_or(false);
            p.borrow_mut()
                .commands
                .push(UiCommand::SetToggle(toggle, !on));
        });
    }

    let p = pending.clone();
    dom::add_click_listener(document, "btn-checkout", move || {
        p.borrow_mut().commands.push(UiCommand::OpenCheckout);
    });
    let p = pending.clone();
    dom::add_click_listener(document, "btn-ar", move || {
        p.borrow_mut().commands.push(UiCommand::OpenArView);
    });
}
