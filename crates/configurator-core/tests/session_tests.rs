mod common;

use common::{click_at, idle, pointer_at, Call, Recorder, TICK};
use configurator_core::*;
use smallvec::smallvec;
use std::rc::Rc;
use std::time::Duration;

fn launch() -> (SessionCoordinator, Rc<Recorder>) {
    let rec = Recorder::new();
    let gate = InstanceGate::new();
    let session = SessionCoordinator::launch(&gate, ConfiguratorConfig::default(), rec.hosts())
        .expect("first launch");
    (session, rec)
}

fn run(session: &mut SessionCoordinator, total: Duration) {
    let frame = idle();
    let mut t = Duration::ZERO;
    while t < total {
        session.tick(TICK, &frame);
        t += TICK;
    }
}

fn keys(keys: &[KeyCode]) -> InputFrame {
    InputFrame {
        keys: keys.iter().copied().collect(),
        ..idle()
    }
}

fn ear(session: &SessionCoordinator) -> (PointId, glam::Vec3) {
    let id = session.features().point_by_name("Ear").unwrap();
    (id, session.features().config(id).unwrap().anchor)
}

#[test]
fn second_launch_through_same_gate_is_rejected() {
    let gate = InstanceGate::new();
    let first = SessionCoordinator::launch(&gate, ConfiguratorConfig::default(), Hosts::default());
    assert!(first.is_ok());
    let second = SessionCoordinator::launch(&gate, ConfiguratorConfig::default(), Hosts::default());
    assert_eq!(second.err(), Some(SessionError::AlreadyRunning));
    assert!(first.unwrap().state().initialized);
}

#[test]
fn startup_mirrors_default_accessory_into_ui() {
    let (session, rec) = launch();
    assert!(session.state().initialized);
    assert!(!session.state().paused);
    assert_eq!(session.accessories().current(), AccessoryVariant::Default);
    assert_eq!(
        session.ui().state().current_accessory_selection,
        AccessoryVariant::Default
    );
    assert!(session.ui().is_active());
    assert!(rec
        .calls()
        .contains(&Call::Selected(AccessoryVariant::Default, true)));
}

#[test]
fn ear_click_scenario_suspends_and_restores_ui() {
    let (mut session, rec) = launch();
    let (id, anchor) = ear(&session);

    session.tick(TICK, &pointer_at(anchor));
    assert_eq!(session.features().state(id), FeatureState::Hovered);
    assert!(session.ui().is_active());

    session.tick(TICK, &click_at(anchor));
    assert_eq!(session.features().state(id), FeatureState::Activated);
    assert!(rec.calls().contains(&Call::CreateWindow("Ear".into())));
    assert!(!session.accessories().is_enabled());
    assert!(!session.ui().is_active());
    assert!(!session.ui().is_interactable());

    // UI commands are dropped while the hotspot is active.
    assert!(!session.command(UiCommand::SelectAccessory(AccessoryVariant::Nature)));

    let mut elapsed = Duration::ZERO;
    while session.features().is_interaction_active() {
        assert!(!session.ui().is_active());
        session.tick(TICK, &pointer_at(anchor));
        elapsed += TICK;
        assert!(elapsed <= Duration::from_millis(3100));
    }
    assert!(elapsed >= Duration::from_millis(2980));
    assert!(session.ui().is_active());
    assert!(session.ui().is_interactable());
    assert!(session.accessories().is_enabled());

    run(&mut session, Duration::from_secs(1));
    assert!(rec.open_windows.borrow().is_empty());
}

#[test]
fn keyboard_selects_accessory_and_ui_follows() {
    let (mut session, _rec) = launch();
    session.tick(TICK, &keys(&[KeyCode::Digit4]));
    assert!(session.accessories().is_swapping());
    assert!(!session.ui().is_interactable());
    run(&mut session, Duration::from_millis(1200));
    assert_eq!(session.accessories().current(), AccessoryVariant::Werewolf);
    assert_eq!(
        session.ui().state().current_accessory_selection,
        AccessoryVariant::Werewolf
    );
    assert!(session.ui().is_interactable());
}

#[test]
fn pause_freezes_transitions_but_not_commands() {
    let (mut session, _rec) = launch();
    session.tick(TICK, &keys(&[KeyCode::Escape]));
    assert!(session.state().paused);
    assert_eq!(session.drain_events(), vec![SessionEvent::Paused]);

    assert!(session.command(UiCommand::SelectAccessory(AccessoryVariant::Nature)));
    run(&mut session, Duration::from_secs(2));
    assert!(session.accessories().is_swapping());
    assert_eq!(session.accessories().current(), AccessoryVariant::Default);

    session.tick(TICK, &keys(&[KeyCode::Escape]));
    assert_eq!(session.drain_events(), vec![SessionEvent::Resumed]);
    run(&mut session, Duration::from_secs(2));
    assert_eq!(session.accessories().current(), AccessoryVariant::Nature);
    assert!(!session.accessories().is_swapping());
}

#[test]
fn debug_and_perf_flags_are_independent_of_pause() {
    let (mut session, _rec) = launch();
    session.tick(TICK, &keys(&[KeyCode::F3, KeyCode::F4, KeyCode::Escape]));
    let state = *session.state();
    assert!(state.debug_mode && state.show_perf_stats && state.paused);
    session.tick(TICK, &keys(&[KeyCode::Escape]));
    assert!(session.state().debug_mode);
    assert!(session.state().show_perf_stats);
    assert_eq!(
        session.drain_events(),
        vec![
            SessionEvent::DebugModeChanged(true),
            SessionEvent::PerfStatsChanged(true),
            SessionEvent::Paused,
            SessionEvent::Resumed,
        ]
    );
}

#[test]
fn toggle_keys_flip_attachments() {
    let (mut session, rec) = launch();
    session.tick(TICK, &keys(&[KeyCode::E]));
    assert!(session.ui().state().toggles.both);
    assert!(rec.is_visible("mic_boom") && rec.is_visible("cable_coil"));
    session.tick(TICK, &keys(&[KeyCode::Q]));
    let toggles = session.ui().state().toggles;
    assert!(toggles.primary && !toggles.both);
    assert!(!rec.is_visible("cable_coil"));
}

#[test]
fn stop_all_interactions_restores_ui_immediately() {
    let (mut session, rec) = launch();
    let (_, anchor) = ear(&session);
    session.tick(TICK, &click_at(anchor));
    assert!(!session.ui().is_active());

    session.tick(TICK, &keys(&[KeyCode::Backspace]));
    assert!(session.ui().is_active());
    assert!(session.accessories().is_enabled());
    assert!(!session.features().is_interaction_active());
    assert!(rec.open_windows.borrow().is_empty());
}

#[test]
fn checkout_via_widget_command() {
    let (mut session, rec) = launch();
    let frame = InputFrame {
        commands: vec![UiCommand::OpenCheckout],
        ..idle()
    };
    session.tick(TICK, &frame);
    run(&mut session, Duration::from_millis(1100));
    assert_eq!(
        rec.count(|c| matches!(c, Call::Open(u) if u == CHECKOUT_URL)),
        1
    );
}

#[test]
fn perf_stats_track_frame_time() {
    let (mut session, _rec) = launch();
    let frame = InputFrame {
        keys: smallvec![KeyCode::F4],
        ..idle()
    };
    session.tick(Duration::from_millis(16), &frame);
    for _ in 0..200 {
        session.tick(Duration::from_millis(16), &idle());
    }
    let perf = session.perf_stats();
    assert_eq!(perf.ticks, 201);
    assert!((perf.frame_ms - 16.0).abs() < 0.01);
    assert!((perf.fps - 62.5).abs() < 0.1);
}
