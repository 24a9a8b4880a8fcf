//! Collaborator interfaces consumed by the coordinators.
//!
//! Hosts are fire-and-forget: the core never waits on them and never reads a
//! result back except for window handles and the startup material color.
//! Every slot in [`Hosts`] is optional; a coordinator skips the sub-effect
//! whose host is absent and carries on with the rest.

use crate::accessory::AccessoryVariant;
use crate::ui::{AttachmentToggle, Widget};
use glam::{Vec3, Vec4};
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub u32);

/// Content and placement of an info window.
#[derive(Clone, Debug, PartialEq)]
pub struct InfoWindowSpec {
    pub anchor: Vec3,
    /// Unit vector from the window toward the viewer.
    pub facing: Vec3,
    pub title: String,
    pub description: String,
    pub icon: Option<String>,
}

pub trait VisibilityHost {
    fn set_part_visible(&self, part: &str, visible: bool);
    fn set_part_opacity(&self, part: &str, opacity: f32);
    fn set_part_local_position(&self, part: &str, position: Vec3);
}

pub trait HighlightHost {
    fn set_material_color(&self, renderer: &str, color: Vec4);
    /// Current color of the renderer's material, if the host can report it.
    fn material_color(&self, _renderer: &str) -> Option<Vec4> {
        None
    }
}

pub trait AnimationHost {
    fn trigger_animation(&self, animator: &str, trigger: &str);
}

pub trait AudioHost {
    fn play_one_shot(&self, clip: &str);
}

pub trait WindowHost {
    fn create_info_window(&self, spec: &InfoWindowSpec) -> Option<WindowHandle>;
    fn destroy_window(&self, handle: WindowHandle);
    fn set_window_opacity(&self, handle: WindowHandle, opacity: f32);
}

pub trait NavigationHost {
    fn open_external_page(&self, url: &str);
}

/// Widget visuals owned by the UI layer.
pub trait UiHost {
    fn set_accessory_selected(&self, variant: AccessoryVariant, selected: bool);
    fn set_toggle_state(&self, toggle: AttachmentToggle, on: bool);
    fn set_interactable(&self, interactable: bool);
    fn set_loading_visible(&self, visible: bool);
    fn pulse_widget(&self, widget: Widget);
}

#[derive(Clone, Default)]
pub struct Hosts {
    pub visibility: Option<Rc<dyn VisibilityHost>>,
    pub highlight: Option<Rc<dyn HighlightHost>>,
    pub animation: Option<Rc<dyn AnimationHost>>,
    pub audio: Option<Rc<dyn AudioHost>>,
    pub window: Option<Rc<dyn WindowHost>>,
    pub navigation: Option<Rc<dyn NavigationHost>>,
    pub ui: Option<Rc<dyn UiHost>>,
}

impl Hosts {
    /// Log once per missing collaborator so misconfiguration is visible at startup.
    pub fn report_missing(&self) {
        let slots = [
            ("visibility", self.visibility.is_some()),
            ("highlight", self.highlight.is_some()),
            ("animation", self.animation.is_some()),
            ("audio", self.audio.is_some()),
            ("window", self.window.is_some()),
            ("navigation", self.navigation.is_some()),
            ("ui", self.ui.is_some()),
        ];
        for (name, present) in slots {
            if !present {
                log::debug!("[session] no {} host; its effects will be skipped", name);
            }
        }
    }
}
