use crate::constants::{CLICK_SLOP_PX, ORBIT_RADIANS_PER_PX, PINCH_ZOOM_PER_PX, WHEEL_ZOOM_PER_PX};
use configurator_core::{InputFrame, KeyCode, OrbitCamera, UiCommand};
use fnv::FnvHashMap;
use glam::Vec2;
use web_sys as web;

/// Pointer/touch/keyboard activity gathered by DOM listeners between frames.
#[derive(Default)]
pub struct PendingInput {
    /// Last pointer position in canvas backing-store pixels.
    pub pointer: Option<Vec2>,
    pub primary_pressed: bool,
    pub keys: Vec<KeyCode>,
    pub commands: Vec<UiCommand>,
    pub orbit: Vec2,
    pub zoom: f32,
    /// Where the pending tap landed; outlives a `pointerleave` in the same frame.
    tap: Option<Vec2>,
    active: FnvHashMap<i32, Vec2>,
    travel: f32,
    pinch_dist: Option<f32>,
}

impl PendingInput {
    pub fn pointer_down(&mut self, id: i32, pos: Vec2) {
        self.active.insert(id, pos);
        self.pointer = Some(pos);
        match self.active.len() {
            1 => self.travel = 0.0,
            2 => self.pinch_dist = self.two_finger_distance(),
            _ => {}
        }
    }

    pub fn pointer_move(&mut self, id: i32, pos: Vec2) {
        self.pointer = Some(pos);
        let Some(prev) = self.active.insert(id, pos) else {
            // hover without a press
            self.active.remove(&id);
            return;
        };
        match self.active.len() {
            1 => {
                let delta = pos - prev;
                self.travel += delta.length();
                if self.travel > CLICK_SLOP_PX {
                    self.orbit += delta;
                }
            }
            2 => {
                if let (Some(last), Some(now)) = (self.pinch_dist, self.two_finger_distance()) {
                    self.zoom += (now - last) * PINCH_ZOOM_PER_PX;
                    self.pinch_dist = Some(now);
                }
            }
            _ => {}
        }
    }

    pub fn pointer_up(&mut self, id: i32, pos: Vec2) {
        let was_single = self.active.len() == 1;
        if self.active.remove(&id).is_none() {
            return;
        }
        self.pointer = Some(pos);
        if was_single && self.travel <= CLICK_SLOP_PX {
            self.primary_pressed = true;
            self.tap = Some(pos);
        }
        if self.active.len() < 2 {
            self.pinch_dist = None;
        }
        // Lifting one finger of a pinch must not turn into a tap.
        self.travel = f32::MAX;
    }

    pub fn pointer_leave(&mut self) {
        self.pointer = None;
        self.active.clear();
        self.pinch_dist = None;
    }

    pub fn wheel(&mut self, delta_y: f32) {
        self.zoom -= delta_y * WHEEL_ZOOM_PER_PX;
    }

    /// Apply camera gestures and hand this frame's snapshot to the session.
    pub fn take_frame(&mut self, camera: &mut OrbitCamera, width: f32, height: f32) -> InputFrame {
        if self.orbit != Vec2::ZERO {
            camera.orbit(
                -self.orbit.x * ORBIT_RADIANS_PER_PX,
                self.orbit.y * ORBIT_RADIANS_PER_PX,
            );
            self.orbit = Vec2::ZERO;
        }
        if self.zoom != 0.0 {
            camera.zoom(self.zoom);
            self.zoom = 0.0;
        }
        if height > 0.0 {
            camera.aspect = width / height;
        }
        let tap = self.tap.take();
        let pointer_ray = tap.or(self.pointer).map(|p| {
            let [x, y] = canvas_ndc(p, width, height);
            camera.screen_ray(x, y)
        });
        InputFrame {
            pointer_ray,
            viewer: camera.eye(),
            primary_pressed: std::mem::take(&mut self.primary_pressed),
            keys: self.keys.drain(..).collect(),
            commands: std::mem::take(&mut self.commands),
        }
    }

    fn two_finger_distance(&self) -> Option<f32> {
        let mut it = self.active.values();
        match (it.next(), it.next()) {
            (Some(a), Some(b)) => Some(a.distance(*b)),
            _ => None,
        }
    }
}

#[inline]
pub fn canvas_ndc(px: Vec2, width: f32, height: f32) -> [f32; 2] {
    let w = width.max(1.0);
    let h = height.max(1.0);
    [(2.0 * px.x / w) - 1.0, 1.0 - (2.0 * px.y / h)]
}

/// Inverse of [`canvas_ndc`]: NDC back to pixels within a `width` x `height` box.
#[inline]
pub fn ndc_to_canvas(ndc: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new((ndc.x + 1.0) * 0.5 * width, (1.0 - ndc.y) * 0.5 * height)
}

#[inline]
pub fn key_code_for(key: &str) -> Option<KeyCode> {
    match key {
        "1" => Some(KeyCode::Digit1),
        "2" => Some(KeyCode::Digit2),
        "3" => Some(KeyCode::Digit3),
        "4" => Some(KeyCode::Digit4),
        "q" | "Q" => Some(KeyCode::Q),
        "w" | "W" => Some(KeyCode::W),
        "e" | "E" => Some(KeyCode::E),
        "c" | "C" => Some(KeyCode::C),
        "v" | "V" => Some(KeyCode::V),
        "Escape" => Some(KeyCode::Escape),
        "Backspace" => Some(KeyCode::Backspace),
        "F3" => Some(KeyCode::F3),
        "F4" => Some(KeyCode::F4),
        _ => None,
    }
}

#[inline]
pub fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let sx = (x_css / rect.width() as f32) * canvas.width() as f32;
    let sy = (y_css / rect.height() as f32) * canvas.height() as f32;
    Vec2::new(sx, sy)
}
