use crate::constants::{HINT_OVERLAY_ID, PAUSE_OVERLAY_ID};
use crate::dom;
use configurator_core::{PerfStats, SessionCoordinator};
use web_sys as web;

#[inline]
pub fn show_pause(document: &web::Document, paused: bool) {
    dom::set_visible(document, PAUSE_OVERLAY_ID, paused);
}

#[inline]
pub fn show_hint(document: &web::Document, visible: bool) {
    dom::set_visible(document, HINT_OVERLAY_ID, visible);
}

/// Perf/debug readout; only refreshed while the overlay is visible.
pub fn update_hint(document: &web::Document, session: &SessionCoordinator) {
    if !dom::is_visible(document, HINT_OVERLAY_ID) {
        return;
    }
    let Some(el) = document.get_element_by_id(HINT_OVERLAY_ID) else {
        return;
    };
    let PerfStats { frame_ms, fps, .. } = session.perf_stats();
    let state = session.state();
    let accessory = session.accessories().current().name();
    let hotspot = session
        .features()
        .active_point()
        .and_then(|id| session.features().config(id))
        .map(|c| c.name.as_str())
        .unwrap_or("none");

    let mut parts = vec![
        format!("{:.0} fps ({:.1} ms)", fps, frame_ms),
        format!("Accessory: {}", accessory),
    ];
    if state.debug_mode {
        parts.push(format!("Hotspot: {}", hotspot));
        parts.push(format!("UI active: {}", session.ui().is_active()));
        parts.push(format!("Swapping: {}", session.accessories().is_swapping()));
    }
    el.set_inner_html(&format!(
        "<div class='hint-line'>{}</div>",
        parts.join(" • ")
    ));
}
