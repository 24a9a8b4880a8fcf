use crate::constants::HINT_REFRESH_SEC;
use crate::hosts;
use crate::input::PendingInput;
use crate::overlay;
use configurator_core::{OrbitCamera, SessionCoordinator, SessionEvent};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub session: SessionCoordinator,
    pub input: Rc<RefCell<PendingInput>>,
    pub camera: Rc<RefCell<OrbitCamera>>,
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub last_instant: Instant,
    pub hint_elapsed: f32,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;

        let width = self.canvas.width() as f32;
        let height = self.canvas.height() as f32;
        // Camera borrow must end before tick; the window host reads it.
        let input = {
            let mut camera = self.camera.borrow_mut();
            let frame = self
                .input
                .borrow_mut()
                .take_frame(&mut camera, width, height);
            hosts::push_camera(&camera);
            frame
        };

        self.session.tick(dt, &input);

        for ev in self.session.drain_events() {
            match ev {
                SessionEvent::Paused => overlay::show_pause(&self.document, true),
                SessionEvent::Resumed => overlay::show_pause(&self.document, false),
                SessionEvent::DebugModeChanged(_) | SessionEvent::PerfStatsChanged(_) => {
                    let state = self.session.state();
                    overlay::show_hint(&self.document, state.debug_mode || state.show_perf_stats);
                    self.hint_elapsed = HINT_REFRESH_SEC;
                }
            }
        }

        self.hint_elapsed += dt.as_secs_f32();
        if self.hint_elapsed >= HINT_REFRESH_SEC {
            self.hint_elapsed = 0.0;
            overlay::update_hint(&self.document, &self.session);
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
