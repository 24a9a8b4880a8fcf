// Recording hosts shared by the integration tests.
#![allow(dead_code)]

use configurator_core::*;
use glam::{Vec3, Vec4};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Visible(String, bool),
    Opacity(String, f32),
    Position(String, Vec3),
    Color(String, Vec4),
    Trigger(String, String),
    Sound(String),
    CreateWindow(String),
    DestroyWindow(WindowHandle),
    WindowOpacity(WindowHandle, f32),
    Open(String),
    Selected(AccessoryVariant, bool),
    Toggle(AttachmentToggle, bool),
    Interactable(bool),
    Loading(bool),
    Pulse(Widget),
}

/// One host implementing every collaborator trait, logging each call.
#[derive(Default)]
pub struct Recorder {
    pub calls: RefCell<Vec<Call>>,
    pub visible: RefCell<HashMap<String, bool>>,
    pub opacity: RefCell<HashMap<String, f32>>,
    pub open_windows: RefCell<Vec<WindowHandle>>,
    next_handle: Cell<u32>,
}

impl Recorder {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn hosts(self: &Rc<Self>) -> Hosts {
        Hosts {
            visibility: Some(self.clone()),
            highlight: Some(self.clone()),
            animation: Some(self.clone()),
            audio: Some(self.clone()),
            window: Some(self.clone()),
            navigation: Some(self.clone()),
            ui: Some(self.clone()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn is_visible(&self, part: &str) -> bool {
        self.visible.borrow().get(part).copied().unwrap_or(false)
    }

    pub fn opacity_of(&self, part: &str) -> Option<f32> {
        self.opacity.borrow().get(part).copied()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    fn push(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl VisibilityHost for Recorder {
    fn set_part_visible(&self, part: &str, visible: bool) {
        self.visible.borrow_mut().insert(part.to_string(), visible);
        self.push(Call::Visible(part.to_string(), visible));
    }
    fn set_part_opacity(&self, part: &str, opacity: f32) {
        self.opacity.borrow_mut().insert(part.to_string(), opacity);
        self.push(Call::Opacity(part.to_string(), opacity));
    }
    fn set_part_local_position(&self, part: &str, position: Vec3) {
        self.push(Call::Position(part.to_string(), position));
    }
}

impl HighlightHost for Recorder {
    fn set_material_color(&self, renderer: &str, color: Vec4) {
        self.push(Call::Color(renderer.to_string(), color));
    }
}

impl AnimationHost for Recorder {
    fn trigger_animation(&self, animator: &str, trigger: &str) {
        self.push(Call::Trigger(animator.to_string(), trigger.to_string()));
    }
}

impl AudioHost for Recorder {
    fn play_one_shot(&self, clip: &str) {
        self.push(Call::Sound(clip.to_string()));
    }
}

impl WindowHost for Recorder {
    fn create_info_window(&self, spec: &InfoWindowSpec) -> Option<WindowHandle> {
        let handle = WindowHandle(self.next_handle.get());
        self.next_handle.set(handle.0 + 1);
        self.open_windows.borrow_mut().push(handle);
        self.push(Call::CreateWindow(spec.title.clone()));
        Some(handle)
    }
    fn destroy_window(&self, handle: WindowHandle) {
        self.open_windows.borrow_mut().retain(|h| *h != handle);
        self.push(Call::DestroyWindow(handle));
    }
    fn set_window_opacity(&self, handle: WindowHandle, opacity: f32) {
        self.push(Call::WindowOpacity(handle, opacity));
    }
}

impl NavigationHost for Recorder {
    fn open_external_page(&self, url: &str) {
        self.push(Call::Open(url.to_string()));
    }
}

impl UiHost for Recorder {
    fn set_accessory_selected(&self, variant: AccessoryVariant, selected: bool) {
        self.push(Call::Selected(variant, selected));
    }
    fn set_toggle_state(&self, toggle: AttachmentToggle, on: bool) {
        self.push(Call::Toggle(toggle, on));
    }
    fn set_interactable(&self, interactable: bool) {
        self.push(Call::Interactable(interactable));
    }
    fn set_loading_visible(&self, visible: bool) {
        self.push(Call::Loading(visible));
    }
    fn pulse_widget(&self, widget: Widget) {
        self.push(Call::Pulse(widget));
    }
}

pub const TICK: std::time::Duration = std::time::Duration::from_millis(20);

/// Ray from the viewer straight at `target`.
pub fn ray_at(viewer: Vec3, target: Vec3) -> Ray {
    Ray::new(viewer, target - viewer)
}

pub const VIEWER: Vec3 = Vec3::new(0.0, 0.0, 2.0);

pub fn pointer_at(target: Vec3) -> InputFrame {
    InputFrame {
        pointer_ray: Some(ray_at(VIEWER, target)),
        viewer: VIEWER,
        ..InputFrame::default()
    }
}

pub fn click_at(target: Vec3) -> InputFrame {
    InputFrame {
        primary_pressed: true,
        ..pointer_at(target)
    }
}

pub fn idle() -> InputFrame {
    InputFrame {
        viewer: VIEWER,
        ..InputFrame::default()
    }
}
