//! Composition point: owns the three coordinators, routes their events and
//! holds the pause/debug/perf flags.

use crate::accessory::{AccessoryCoordinator, AccessoryEvent, AccessoryVariant};
use crate::config::ConfiguratorConfig;
use crate::constants::PERF_SMOOTHING;
use crate::error::{Rejected, SessionError};
use crate::feature::{FeatureEvent, FeatureInteractionCoordinator, PointId};
use crate::host::Hosts;
use crate::input::{shortcut_for, InputFrame, Shortcut};
use crate::ui::{UiCommand, UiCoordinator, UiEvent};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Process-wide guard allowing a single session; usable as a `static`.
pub struct InstanceGate {
    claimed: AtomicBool,
}

impl InstanceGate {
    pub const fn new() -> Self {
        Self {
            claimed: AtomicBool::new(false),
        }
    }

    pub fn claim(&self) -> Result<(), SessionError> {
        if self.claimed.swap(true, Ordering::SeqCst) {
            return Err(SessionError::AlreadyRunning);
        }
        Ok(())
    }

    pub fn is_claimed(&self) -> bool {
        self.claimed.load(Ordering::SeqCst)
    }
}

impl Default for InstanceGate {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SessionState {
    pub initialized: bool,
    pub paused: bool,
    pub debug_mode: bool,
    pub show_perf_stats: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    Paused,
    Resumed,
    DebugModeChanged(bool),
    PerfStatsChanged(bool),
}

/// Smoothed timing over raw (unpaused) tick deltas.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PerfStats {
    pub frame_ms: f32,
    pub fps: f32,
    pub ticks: u64,
}

pub struct SessionCoordinator {
    state: SessionState,
    accessories: AccessoryCoordinator,
    features: FeatureInteractionCoordinator,
    ui: UiCoordinator,
    perf: PerfStats,
    events: Vec<SessionEvent>,
}

impl SessionCoordinator {
    /// Build the session unless `gate` already admitted one.
    pub fn launch(
        gate: &InstanceGate,
        config: ConfiguratorConfig,
        hosts: Hosts,
    ) -> Result<Self, SessionError> {
        gate.claim()?;
        Ok(Self::build(config, hosts))
    }

    fn build(config: ConfiguratorConfig, hosts: Hosts) -> Self {
        hosts.report_missing();
        let ConfiguratorConfig {
            variants,
            features,
            feature_params,
            ui,
        } = config;
        let accessories = AccessoryCoordinator::new(variants, hosts.visibility.clone());
        let features = FeatureInteractionCoordinator::new(features, feature_params, &hosts);
        let ui = UiCoordinator::new(ui, &hosts);
        let mut session = Self {
            state: SessionState::default(),
            accessories,
            features,
            ui,
            perf: PerfStats::default(),
            events: Vec::new(),
        };
        session.dispatch();
        session.state.initialized = true;
        log::info!(
            "[session] ready: accessory={} hotspots={}",
            session.accessories.current().name(),
            session.features.len()
        );
        session
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn accessories(&self) -> &AccessoryCoordinator {
        &self.accessories
    }

    pub fn features(&self) -> &FeatureInteractionCoordinator {
        &self.features
    }

    pub fn ui(&self) -> &UiCoordinator {
        &self.ui
    }

    pub fn perf_stats(&self) -> PerfStats {
        self.perf
    }

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// One scheduler step: sample input once, then advance every coordinator by one step.
    pub fn tick(&mut self, dt: Duration, input: &InputFrame) {
        self.update_perf(dt);

        for key in &input.keys {
            if let Some(shortcut) = shortcut_for(*key) {
                self.apply_shortcut(shortcut);
            }
        }
        for command in &input.commands {
            self.command(*command);
        }

        self.features.process_pointer(
            input.pointer_ray,
            input.viewer,
            input.primary_pressed,
            &mut self.accessories,
        );
        self.dispatch();

        let scaled = if self.state.paused { Duration::ZERO } else { dt };
        self.accessories.advance(scaled);
        self.dispatch();
        self.features.advance(scaled, &mut self.accessories);
        self.dispatch();
        self.ui.advance(scaled);
        self.dispatch();
    }

    /// Route a widget command through the UI gate.
    pub fn command(&mut self, command: UiCommand) -> bool {
        let handled = self.ui.handle(command, &mut self.accessories);
        self.dispatch();
        handled
    }

    /// Direct accessory change that bypasses the UI gate.
    pub fn select_accessory(
        &mut self,
        variant: AccessoryVariant,
        animate: bool,
    ) -> Result<(), Rejected> {
        let result = self.accessories.set_variant(variant, animate);
        self.dispatch();
        result
    }

    pub fn stop_all_interactions(&mut self) {
        self.features.stop_all_interactions(&mut self.accessories);
        self.ui.set_ui_active(true);
        self.dispatch();
        self.trace(format_args!("interactions reset"));
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.state.paused == paused {
            return;
        }
        self.state.paused = paused;
        self.events.push(if paused {
            SessionEvent::Paused
        } else {
            SessionEvent::Resumed
        });
        log::info!("[session] paused={}", paused);
    }

    pub fn set_debug_mode(&mut self, on: bool) {
        if self.state.debug_mode == on {
            return;
        }
        self.state.debug_mode = on;
        self.events.push(SessionEvent::DebugModeChanged(on));
        log::info!("[session] debug={}", on);
    }

    pub fn set_show_perf_stats(&mut self, on: bool) {
        if self.state.show_perf_stats == on {
            return;
        }
        self.state.show_perf_stats = on;
        self.events.push(SessionEvent::PerfStatsChanged(on));
        log::info!("[session] perf stats={}", on);
    }

    fn apply_shortcut(&mut self, shortcut: Shortcut) {
        match shortcut {
            Shortcut::Ui(command) => {
                self.command(command);
            }
            Shortcut::FlipToggle(toggle) => {
                let command = self.ui.flip_command(toggle);
                self.command(command);
            }
            Shortcut::TogglePause => self.set_paused(!self.state.paused),
            Shortcut::ToggleDebug => self.set_debug_mode(!self.state.debug_mode),
            Shortcut::TogglePerfStats => self.set_show_perf_stats(!self.state.show_perf_stats),
            Shortcut::StopInteractions => self.stop_all_interactions(),
        }
    }

    /// Deliver every pending coordinator event, in order, before returning.
    fn dispatch(&mut self) {
        for ev in self.accessories.drain_events() {
            let AccessoryEvent::Changed(variant) = ev;
            self.ui.sync_accessory(variant);
            self.trace(format_args!("accessory changed: {}", variant.name()));
        }
        for ev in self.features.drain_events() {
            match ev {
                FeatureEvent::Hovered(id) => {
                    self.trace(format_args!("hovered {}", self.point_name(id)));
                }
                FeatureEvent::Clicked(id) => {
                    self.ui.set_ui_active(false);
                    self.trace(format_args!("clicked {}", self.point_name(id)));
                }
                FeatureEvent::Exited(id) => {
                    if !self.features.is_interaction_active() {
                        self.ui.set_ui_active(true);
                    }
                    self.trace(format_args!("exited {}", self.point_name(id)));
                }
            }
        }
        for ev in self.ui.drain_events() {
            match ev {
                UiEvent::AccessoryRequested(v) => {
                    self.trace(format_args!("ui requested {}", v.name()));
                }
                UiEvent::ToggleChanged(t, on) => {
                    self.trace(format_args!("toggle {:?}={}", t, on));
                }
                UiEvent::NavigationStarted(d) => {
                    self.trace(format_args!("navigating to {:?}", d));
                }
                UiEvent::NavigationOpened(d) => {
                    self.trace(format_args!("opened {:?}", d));
                }
            }
        }
        self.ui.refresh_interactable(self.accessories.is_swapping());
    }

    fn point_name(&self, id: PointId) -> &str {
        self.features
            .config(id)
            .map(|c| c.name.as_str())
            .unwrap_or("?")
    }

    fn trace(&self, args: std::fmt::Arguments<'_>) {
        if self.state.debug_mode {
            log::info!("[session] {}", args);
        } else {
            log::debug!("[session] {}", args);
        }
    }

    fn update_perf(&mut self, dt: Duration) {
        let ms = dt.as_secs_f32() * 1000.0;
        if ms <= 0.0 {
            return;
        }
        self.perf.frame_ms = if self.perf.ticks == 0 {
            ms
        } else {
            (1.0 - PERF_SMOOTHING) * self.perf.frame_ms + PERF_SMOOTHING * ms
        };
        self.perf.fps = 1000.0 / self.perf.frame_ms;
        self.perf.ticks += 1;
    }
}
