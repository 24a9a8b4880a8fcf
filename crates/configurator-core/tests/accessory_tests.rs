mod common;

use common::{Call, Recorder, TICK};
use configurator_core::*;
use std::time::Duration;

fn make() -> (AccessoryCoordinator, std::rc::Rc<Recorder>) {
    let rec = Recorder::new();
    let acc = AccessoryCoordinator::new(default_variants(), Some(rec.clone()));
    (acc, rec)
}

fn parts(acc: &AccessoryCoordinator, v: AccessoryVariant) -> Vec<String> {
    acc.config(v)
        .map(|c| c.part_ids().map(str::to_string).collect())
        .unwrap_or_default()
}

fn run(acc: &mut AccessoryCoordinator, total: Duration) {
    let mut t = Duration::ZERO;
    while t < total {
        acc.advance(TICK);
        t += TICK;
    }
}

#[test]
fn starts_on_default_and_announces_it() {
    let (mut acc, rec) = make();
    assert_eq!(acc.current(), AccessoryVariant::Default);
    assert!(!acc.is_swapping());
    assert_eq!(
        acc.drain_events(),
        vec![AccessoryEvent::Changed(AccessoryVariant::Default)]
    );
    for p in parts(&acc, AccessoryVariant::Default) {
        assert!(rec.is_visible(&p), "{p} should be visible");
    }
    for p in parts(&acc, AccessoryVariant::Werewolf) {
        assert!(!rec.is_visible(&p), "{p} should be hidden");
    }
}

#[test]
fn instant_set_shows_exactly_the_target() {
    for target in AccessoryVariant::ALL {
        let (mut acc, rec) = make();
        acc.drain_events();
        acc.set_variant(target, false).unwrap();
        assert_eq!(acc.current(), target);
        assert!(!acc.is_swapping());
        for v in AccessoryVariant::ALL {
            for p in parts(&acc, v) {
                assert_eq!(rec.is_visible(&p), v == target, "{p} for target {target:?}");
            }
            assert_eq!(acc.is_visible(v), v == target);
        }
        let expected: Vec<AccessoryEvent> = if target == AccessoryVariant::Default {
            vec![]
        } else {
            vec![AccessoryEvent::Changed(target)]
        };
        assert_eq!(acc.drain_events(), expected);
    }
}

#[test]
fn second_request_during_swap_is_rejected() {
    let (mut acc, _rec) = make();
    acc.set_variant(AccessoryVariant::Nature, true).unwrap();
    assert!(acc.is_swapping());
    assert_eq!(
        acc.set_variant(AccessoryVariant::Valkyrie, true),
        Err(Rejected::SwapInFlight)
    );
    assert_eq!(
        acc.set_variant(AccessoryVariant::Valkyrie, false),
        Err(Rejected::SwapInFlight)
    );
    assert_eq!(acc.current(), AccessoryVariant::Default);
    run(&mut acc, Duration::from_secs(2));
    assert_eq!(acc.current(), AccessoryVariant::Nature);
}

#[test]
fn animated_swap_fades_out_then_in() {
    let (mut acc, rec) = make();
    acc.drain_events();
    rec.clear();
    acc.set_variant(AccessoryVariant::Werewolf, true).unwrap();

    let old_part = "earcap_default_l";
    let new_part = "earcap_werewolf_l";
    let mut old_series = Vec::new();
    let mut new_series = Vec::new();
    let mut fired = 0;
    for _ in 0..100 {
        acc.advance(TICK);
        fired += acc.drain_events().len();
        if let Some(o) = rec.opacity_of(old_part) {
            old_series.push(o);
        }
        if acc.current() == AccessoryVariant::Werewolf {
            if let Some(o) = rec.opacity_of(new_part) {
                new_series.push(o);
            }
        }
    }
    assert!(!acc.is_swapping());
    assert_eq!(fired, 1);
    assert!(old_series.windows(2).all(|w| w[1] <= w[0]), "{old_series:?}");
    assert_eq!(*old_series.last().unwrap(), 0.0);
    assert!(new_series.windows(2).all(|w| w[1] >= w[0]), "{new_series:?}");
    assert_eq!(*new_series.last().unwrap(), 1.0);
    assert_eq!(acc.opacity(AccessoryVariant::Werewolf), 1.0);
    assert!(!rec.is_visible(old_part));
    assert!(rec.is_visible(new_part));
}

#[test]
fn werewolf_scenario_fires_changed_once() {
    let (mut acc, rec) = make();
    acc.drain_events();
    acc.set_variant(AccessoryVariant::Werewolf, true).unwrap();
    // both phases plus slack
    run(&mut acc, Duration::from_secs_f32(SWAP_FADE_SEC * 2.0 + 0.2));
    assert_eq!(
        acc.drain_events(),
        vec![AccessoryEvent::Changed(AccessoryVariant::Werewolf)]
    );
    for p in parts(&acc, AccessoryVariant::Werewolf) {
        assert!(rec.is_visible(&p));
        assert_eq!(rec.opacity_of(&p), Some(1.0));
    }
    for p in parts(&acc, AccessoryVariant::Default) {
        assert!(!rec.is_visible(&p));
    }
}

#[test]
fn pop_in_starts_offset_and_settles_at_rest() {
    let (mut acc, rec) = make();
    rec.clear();
    acc.set_variant(AccessoryVariant::Valkyrie, false).unwrap();
    let first = rec
        .calls()
        .into_iter()
        .find_map(|c| match c {
            Call::Position(p, pos) if p == "earcap_valkyrie_l" => Some(pos),
            _ => None,
        })
        .unwrap();
    let rest = glam::Vec3::from_array(EARCAP_LEFT_REST);
    assert!((first.x - (rest.x - POP_IN_OFFSET)).abs() < 1e-6);

    run(&mut acc, Duration::from_secs(1));
    let last = rec
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::Position(p, pos) if p == "earcap_valkyrie_r" => Some(pos),
            _ => None,
        })
        .last()
        .unwrap();
    assert_eq!(last, glam::Vec3::from_array(EARCAP_RIGHT_REST));
}

#[test]
fn disabling_hides_everything_and_blocks_swaps() {
    let (mut acc, rec) = make();
    acc.set_enabled(false);
    for v in AccessoryVariant::ALL {
        for p in parts(&acc, v) {
            assert!(!rec.is_visible(&p));
        }
        assert!(!acc.is_visible(v));
    }
    assert_eq!(
        acc.set_variant(AccessoryVariant::Nature, true),
        Err(Rejected::Disabled)
    );
    assert_eq!(acc.current(), AccessoryVariant::Default);

    acc.set_enabled(true);
    for p in parts(&acc, AccessoryVariant::Default) {
        assert!(rec.is_visible(&p));
    }
}

#[test]
fn enabling_twice_is_a_no_op() {
    let (mut acc, rec) = make();
    acc.drain_events();
    rec.clear();
    acc.set_enabled(true);
    assert!(rec.calls().is_empty());
    assert!(acc.drain_events().is_empty());
}

#[test]
fn disabled_mid_swap_keeps_new_variant_hidden() {
    let (mut acc, rec) = make();
    acc.set_variant(AccessoryVariant::Nature, true).unwrap();
    acc.advance(TICK);
    acc.set_enabled(false);
    run(&mut acc, Duration::from_secs(2));
    assert_eq!(acc.current(), AccessoryVariant::Nature);
    assert!(!rec.is_visible("earcap_nature_l"));
    acc.set_enabled(true);
    assert!(rec.is_visible("earcap_nature_l"));
    assert_eq!(rec.opacity_of("earcap_nature_l"), Some(1.0));
}

#[test]
fn missing_host_degrades_silently() {
    let mut acc = AccessoryCoordinator::new(default_variants(), None);
    acc.set_variant(AccessoryVariant::Nature, true).unwrap();
    run(&mut acc, Duration::from_secs(2));
    assert_eq!(acc.current(), AccessoryVariant::Nature);
}

#[test]
fn unconfigured_variant_is_ignored() {
    let variants: Vec<_> = default_variants()
        .into_iter()
        .filter(|c| c.variant != AccessoryVariant::Werewolf)
        .collect();
    let mut acc = AccessoryCoordinator::new(variants, None);
    acc.drain_events();
    assert_eq!(acc.set_variant(AccessoryVariant::Werewolf, true), Ok(()));
    assert!(!acc.is_swapping());
    assert_eq!(acc.current(), AccessoryVariant::Default);
    assert!(acc.drain_events().is_empty());
}
