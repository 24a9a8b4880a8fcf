#![cfg(target_arch = "wasm32")]
use configurator_core::{ConfiguratorConfig, InstanceGate, KeyCode, OrbitCamera, SessionCoordinator};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod hosts;
mod input;
mod overlay;

static SESSION_GATE: InstanceGate = InstanceGate::new();

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn wire_pause_overlay(document: &web::Document, pending: &Rc<RefCell<input::PendingInput>>) {
    let p = pending.clone();
    dom::add_click_listener(document, constants::PAUSE_OVERLAY_ID, move || {
        p.borrow_mut().keys.push(KeyCode::Escape);
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("configurator-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    wire_canvas_resize(&canvas);

    let camera = Rc::new(RefCell::new(OrbitCamera::default()));
    let hosts = hosts::browser_hosts(&document, &canvas, camera.clone());

    let session = SessionCoordinator::launch(&SESSION_GATE, ConfiguratorConfig::default(), hosts)?;

    let pending = Rc::new(RefCell::new(input::PendingInput::default()));
    events::wire_global_keydown(pending.clone());
    events::wire_pointer_handlers(events::pointer::PointerWiring {
        canvas: canvas.clone(),
        pending: pending.clone(),
    });
    events::wire_widgets(&document, &pending);
    wire_pause_overlay(&document, &pending);
    overlay::show_pause(&document, false);
    overlay::show_hint(&document, false);

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        session,
        input: pending,
        camera,
        canvas,
        document,
        last_instant: Instant::now(),
        hint_elapsed: 0.0,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
