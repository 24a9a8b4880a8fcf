mod common;

use common::{Call, Recorder, TICK};
use configurator_core::*;
use std::rc::Rc;
use std::time::Duration;

fn make() -> (UiCoordinator, AccessoryCoordinator, Rc<Recorder>) {
    let rec = Recorder::new();
    let hosts = rec.hosts();
    let config = ConfiguratorConfig::default();
    let ui = UiCoordinator::new(config.ui, &hosts);
    let acc = AccessoryCoordinator::new(config.variants, hosts.visibility.clone());
    (ui, acc, rec)
}

#[test]
fn both_toggle_excludes_individuals() {
    let mut g = ToggleGroup::default();
    g.set(AttachmentToggle::Primary, true);
    g.set(AttachmentToggle::Secondary, true);
    assert!(g.primary && g.secondary && !g.both);

    g.set(AttachmentToggle::Both, true);
    assert_eq!(
        g,
        ToggleGroup {
            primary: false,
            secondary: false,
            both: true
        }
    );

    g.set(AttachmentToggle::Secondary, true);
    assert_eq!(
        g,
        ToggleGroup {
            primary: false,
            secondary: true,
            both: false
        }
    );

    g.set(AttachmentToggle::Secondary, false);
    assert_eq!(g, ToggleGroup::default());
}

#[test]
fn toggles_drive_attachment_visibility() {
    let (mut ui, mut acc, rec) = make();
    assert!(!rec.is_visible("mic_boom"));
    assert!(!rec.is_visible("cable_coil"));

    ui.handle(UiCommand::SetToggle(AttachmentToggle::Both, true), &mut acc);
    assert!(rec.is_visible("mic_boom"));
    assert!(rec.is_visible("cable_coil"));

    ui.handle(UiCommand::SetToggle(AttachmentToggle::Primary, true), &mut acc);
    assert!(rec.is_visible("mic_boom"));
    assert!(!rec.is_visible("cable_coil"));
    assert!(!ui.state().toggles.both);
    assert_eq!(
        ui.drain_events(),
        vec![
            UiEvent::ToggleChanged(AttachmentToggle::Both, true),
            UiEvent::ToggleChanged(AttachmentToggle::Primary, true),
        ]
    );
}

#[test]
fn inactive_ui_ignores_every_command() {
    let (mut ui, mut acc, rec) = make();
    ui.set_ui_active(false);
    rec.clear();
    assert!(!ui.handle(UiCommand::SelectAccessory(AccessoryVariant::Nature), &mut acc));
    assert!(!ui.handle(UiCommand::SetToggle(AttachmentToggle::Both, true), &mut acc));
    assert!(!ui.handle(UiCommand::OpenCheckout, &mut acc));
    assert!(!ui.handle(UiCommand::OpenArView, &mut acc));
    assert!(rec.calls().is_empty());
    assert!(!acc.is_swapping());
    assert!(ui.drain_events().is_empty());
}

#[test]
fn select_starts_an_animated_swap() {
    let (mut ui, mut acc, rec) = make();
    assert!(ui.handle(UiCommand::SelectAccessory(AccessoryVariant::Valkyrie), &mut acc));
    assert!(acc.is_swapping());
    assert!(rec
        .calls()
        .contains(&Call::Pulse(Widget::Accessory(AccessoryVariant::Valkyrie))));
    // A second selection during the swap is dropped.
    assert!(!ui.handle(UiCommand::SelectAccessory(AccessoryVariant::Nature), &mut acc));
    assert_eq!(
        ui.drain_events(),
        vec![UiEvent::AccessoryRequested(AccessoryVariant::Valkyrie)]
    );
}

#[test]
fn sync_accessory_moves_selection_highlight() {
    let (mut ui, _acc, rec) = make();
    rec.clear();
    ui.sync_accessory(AccessoryVariant::Werewolf);
    assert_eq!(
        ui.state().current_accessory_selection,
        AccessoryVariant::Werewolf
    );
    assert_eq!(
        rec.calls(),
        vec![
            Call::Selected(AccessoryVariant::Default, false),
            Call::Selected(AccessoryVariant::Werewolf, true),
        ]
    );
}

#[test]
fn checkout_shows_loading_then_opens_url() {
    let (mut ui, mut acc, rec) = make();
    assert!(ui.handle(UiCommand::OpenCheckout, &mut acc));
    assert!(ui.is_navigating());
    assert!(rec.calls().contains(&Call::Loading(true)));
    // a second navigation while loading is ignored
    assert!(!ui.handle(UiCommand::OpenArView, &mut acc));

    ui.advance(Duration::from_millis(900));
    assert_eq!(rec.count(|c| matches!(c, Call::Open(_))), 0);

    ui.advance(Duration::from_millis(100));
    assert!(!ui.is_navigating());
    let calls = rec.calls();
    assert!(calls.contains(&Call::Loading(false)));
    assert!(calls.contains(&Call::Open(CHECKOUT_URL.into())));
    assert_eq!(
        ui.drain_events(),
        vec![
            UiEvent::NavigationStarted(Destination::Checkout),
            UiEvent::NavigationOpened(Destination::Checkout),
        ]
    );
}

#[test]
fn ar_view_opens_its_own_url() {
    let (mut ui, mut acc, rec) = make();
    ui.handle(UiCommand::OpenArView, &mut acc);
    for _ in 0..60 {
        ui.advance(TICK);
    }
    assert!(rec.calls().contains(&Call::Open(AR_VIEW_URL.into())));
}

#[test]
fn interactable_tracks_activity_and_swaps() {
    let (mut ui, _acc, rec) = make();
    rec.clear();
    ui.refresh_interactable(false);
    assert!(rec.calls().is_empty());

    ui.refresh_interactable(true);
    assert!(!ui.is_interactable());
    ui.refresh_interactable(false);
    assert!(ui.is_interactable());
    ui.set_ui_active(false);
    ui.refresh_interactable(false);
    assert!(!ui.is_interactable());
    assert_eq!(
        rec.calls(),
        vec![
            Call::Interactable(false),
            Call::Interactable(true),
            Call::Interactable(false),
        ]
    );
}

#[test]
fn flip_command_inverts_current_toggle() {
    let (mut ui, mut acc, _rec) = make();
    assert_eq!(
        ui.flip_command(AttachmentToggle::Both),
        UiCommand::SetToggle(AttachmentToggle::Both, true)
    );
    ui.handle(ui.flip_command(AttachmentToggle::Both), &mut acc);
    assert_eq!(
        ui.flip_command(AttachmentToggle::Both),
        UiCommand::SetToggle(AttachmentToggle::Both, false)
    );
}
