//! Per-tick input snapshot and key bindings.

use crate::accessory::AccessoryVariant;
use crate::ui::{AttachmentToggle, UiCommand};
use glam::Vec3;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self {
            origin,
            dir: dir.normalize_or_zero(),
        }
    }
}

/// Distance along the ray to the first hit with a sphere, if any.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Q,
    W,
    E,
    C,
    V,
    Escape,
    Backspace,
    F3,
    F4,
}

/// What a bound key does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
    Ui(UiCommand),
    FlipToggle(AttachmentToggle),
    TogglePause,
    ToggleDebug,
    TogglePerfStats,
    StopInteractions,
}

pub fn shortcut_for(key: KeyCode) -> Option<Shortcut> {
    let select = |v| Some(Shortcut::Ui(UiCommand::SelectAccessory(v)));
    match key {
        KeyCode::Digit1 => select(AccessoryVariant::Default),
        KeyCode::Digit2 => select(AccessoryVariant::Nature),
        KeyCode::Digit3 => select(AccessoryVariant::Valkyrie),
        KeyCode::Digit4 => select(AccessoryVariant::Werewolf),
        KeyCode::Q => Some(Shortcut::FlipToggle(AttachmentToggle::Primary)),
        KeyCode::W => Some(Shortcut::FlipToggle(AttachmentToggle::Secondary)),
        KeyCode::E => Some(Shortcut::FlipToggle(AttachmentToggle::Both)),
        KeyCode::C => Some(Shortcut::Ui(UiCommand::OpenCheckout)),
        KeyCode::V => Some(Shortcut::Ui(UiCommand::OpenArView)),
        KeyCode::Escape => Some(Shortcut::TogglePause),
        KeyCode::F3 => Some(Shortcut::ToggleDebug),
        KeyCode::F4 => Some(Shortcut::TogglePerfStats),
        KeyCode::Backspace => Some(Shortcut::StopInteractions),
    }
}

/// Everything the host sampled for one tick.
#[derive(Clone, Debug, Default)]
pub struct InputFrame {
    /// World-space ray under the pointer; `None` when the pointer is off the canvas.
    pub pointer_ray: Option<Ray>,
    pub viewer: Vec3,
    /// Primary button (or tap) went down this tick.
    pub primary_pressed: bool,
    pub keys: SmallVec<[KeyCode; 4]>,
    /// Widget clicks collected since the last tick.
    pub commands: Vec<UiCommand>,
}
