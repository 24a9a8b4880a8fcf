//! Widget state and command dispatch.
//!
//! The UI layer has no timing of its own beyond the navigation hand-off
//! delay. Every command is ignored while the UI is inactive.

use crate::accessory::{AccessoryCoordinator, AccessoryVariant};
use crate::constants::NAVIGATION_DELAY_SEC;
use crate::host::{Hosts, NavigationHost, UiHost, VisibilityHost};
use std::rc::Rc;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttachmentToggle {
    Primary,
    Secondary,
    Both,
}

impl AttachmentToggle {
    pub const ALL: [AttachmentToggle; 3] = [
        AttachmentToggle::Primary,
        AttachmentToggle::Secondary,
        AttachmentToggle::Both,
    ];
}

/// Three flags where `both` excludes the two individual ones. All three may be off.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ToggleGroup {
    pub primary: bool,
    pub secondary: bool,
    pub both: bool,
}

impl ToggleGroup {
    pub fn get(&self, toggle: AttachmentToggle) -> bool {
        match toggle {
            AttachmentToggle::Primary => self.primary,
            AttachmentToggle::Secondary => self.secondary,
            AttachmentToggle::Both => self.both,
        }
    }

    pub fn set(&mut self, toggle: AttachmentToggle, on: bool) {
        match toggle {
            AttachmentToggle::Primary => self.primary = on,
            AttachmentToggle::Secondary => self.secondary = on,
            AttachmentToggle::Both => self.both = on,
        }
        if on {
            match toggle {
                AttachmentToggle::Both => {
                    self.primary = false;
                    self.secondary = false;
                }
                _ => self.both = false,
            }
        }
    }

    pub fn primary_visible(&self) -> bool {
        self.primary || self.both
    }

    pub fn secondary_visible(&self) -> bool {
        self.secondary || self.both
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Destination {
    Checkout,
    ArView,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiCommand {
    SelectAccessory(AccessoryVariant),
    SetToggle(AttachmentToggle, bool),
    OpenCheckout,
    OpenArView,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Widget {
    Accessory(AccessoryVariant),
    Toggle(AttachmentToggle),
    Checkout,
    ArView,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiEvent {
    AccessoryRequested(AccessoryVariant),
    ToggleChanged(AttachmentToggle, bool),
    NavigationStarted(Destination),
    NavigationOpened(Destination),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UiState {
    pub active: bool,
    pub current_accessory_selection: AccessoryVariant,
    pub toggles: ToggleGroup,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct AttachmentParts {
    pub primary: Vec<String>,
    pub secondary: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UiParams {
    pub checkout_url: String,
    pub ar_url: String,
    pub navigation_delay: Duration,
    pub attachments: AttachmentParts,
}

impl Default for UiParams {
    fn default() -> Self {
        Self {
            checkout_url: String::new(),
            ar_url: String::new(),
            navigation_delay: Duration::from_secs_f32(NAVIGATION_DELAY_SEC),
            attachments: AttachmentParts::default(),
        }
    }
}

struct PendingNavigation {
    destination: Destination,
    elapsed: Duration,
}

pub struct UiCoordinator {
    state: UiState,
    params: UiParams,
    interactable: bool,
    pending: Option<PendingNavigation>,
    ui_host: Option<Rc<dyn UiHost>>,
    visibility_host: Option<Rc<dyn VisibilityHost>>,
    navigation_host: Option<Rc<dyn NavigationHost>>,
    events: Vec<UiEvent>,
}

impl UiCoordinator {
    pub fn new(params: UiParams, hosts: &Hosts) -> Self {
        let ui = Self {
            state: UiState {
                active: true,
                current_accessory_selection: AccessoryVariant::Default,
                toggles: ToggleGroup::default(),
            },
            params,
            interactable: true,
            pending: None,
            ui_host: hosts.ui.clone(),
            visibility_host: hosts.visibility.clone(),
            navigation_host: hosts.navigation.clone(),
            events: Vec::new(),
        };
        if let Some(h) = &ui.ui_host {
            for v in AccessoryVariant::ALL {
                h.set_accessory_selected(v, v == ui.state.current_accessory_selection);
            }
            h.set_interactable(true);
            h.set_loading_visible(false);
        }
        ui.sync_toggle_visuals();
        ui
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    pub fn is_interactable(&self) -> bool {
        self.interactable
    }

    pub fn is_navigating(&self) -> bool {
        self.pending.is_some()
    }

    pub fn drain_events(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn set_ui_active(&mut self, active: bool) {
        if self.state.active == active {
            return;
        }
        self.state.active = active;
        log::debug!("[ui] active={}", active);
    }

    /// Mirror a committed accessory change into the selection buttons.
    pub fn sync_accessory(&mut self, variant: AccessoryVariant) {
        let previous = self.state.current_accessory_selection;
        self.state.current_accessory_selection = variant;
        if let Some(h) = &self.ui_host {
            if previous != variant {
                h.set_accessory_selected(previous, false);
            }
            h.set_accessory_selected(variant, true);
        }
    }

    /// Widgets accept input only while the UI is active and no swap is running.
    pub fn refresh_interactable(&mut self, swapping: bool) {
        let interactable = self.state.active && !swapping;
        if interactable == self.interactable {
            return;
        }
        self.interactable = interactable;
        if let Some(h) = &self.ui_host {
            h.set_interactable(interactable);
        }
    }

    /// The command that flips `toggle` from its current value.
    pub fn flip_command(&self, toggle: AttachmentToggle) -> UiCommand {
        UiCommand::SetToggle(toggle, !self.state.toggles.get(toggle))
    }

    /// Returns `false` when the command was ignored.
    pub fn handle(&mut self, command: UiCommand, accessories: &mut AccessoryCoordinator) -> bool {
        if !self.state.active {
            log::debug!("[ui] {:?} ignored: ui inactive", command);
            return false;
        }
        match command {
            UiCommand::SelectAccessory(variant) => {
                self.pulse(Widget::Accessory(variant));
                match accessories.set_variant(variant, true) {
                    Ok(()) => {
                        self.events.push(UiEvent::AccessoryRequested(variant));
                        true
                    }
                    Err(e) => {
                        log::debug!("[ui] select {} rejected: {}", variant.name(), e);
                        false
                    }
                }
            }
            UiCommand::SetToggle(toggle, on) => {
                self.pulse(Widget::Toggle(toggle));
                if self.state.toggles.get(toggle) == on {
                    return true;
                }
                self.state.toggles.set(toggle, on);
                self.sync_toggle_visuals();
                self.events.push(UiEvent::ToggleChanged(toggle, on));
                true
            }
            UiCommand::OpenCheckout => self.begin_navigation(Destination::Checkout),
            UiCommand::OpenArView => self.begin_navigation(Destination::ArView),
        }
    }

    pub fn advance(&mut self, dt: Duration) {
        let delay = self.params.navigation_delay;
        let Some(p) = &mut self.pending else {
            return;
        };
        p.elapsed += dt;
        if p.elapsed < delay {
            return;
        }
        let destination = p.destination;
        self.pending = None;
        if let Some(h) = &self.ui_host {
            h.set_loading_visible(false);
        }
        let url = match destination {
            Destination::Checkout => &self.params.checkout_url,
            Destination::ArView => &self.params.ar_url,
        };
        match &self.navigation_host {
            Some(n) if !url.is_empty() => n.open_external_page(url),
            _ => log::debug!("[ui] no navigation target for {:?}", destination),
        }
        self.events.push(UiEvent::NavigationOpened(destination));
    }

    fn begin_navigation(&mut self, destination: Destination) -> bool {
        let widget = match destination {
            Destination::Checkout => Widget::Checkout,
            Destination::ArView => Widget::ArView,
        };
        self.pulse(widget);
        if self.pending.is_some() {
            log::debug!("[ui] {:?} ignored: navigation pending", destination);
            return false;
        }
        self.pending = Some(PendingNavigation {
            destination,
            elapsed: Duration::ZERO,
        });
        if let Some(h) = &self.ui_host {
            h.set_loading_visible(true);
        }
        self.events.push(UiEvent::NavigationStarted(destination));
        true
    }

    fn pulse(&self, widget: Widget) {
        if let Some(h) = &self.ui_host {
            h.pulse_widget(widget);
        }
    }

    fn sync_toggle_visuals(&self) {
        let toggles = self.state.toggles;
        if let Some(h) = &self.ui_host {
            for t in AttachmentToggle::ALL {
                h.set_toggle_state(t, toggles.get(t));
            }
        }
        let Some(v) = &self.visibility_host else {
            return;
        };
        let attachments = &self.params.attachments;
        for part in &attachments.primary {
            v.set_part_visible(part, toggles.primary_visible());
        }
        for part in &attachments.secondary {
            v.set_part_visible(part, toggles.secondary_visible());
        }
    }
}
