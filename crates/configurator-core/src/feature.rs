//! Hover/click state over the model's hotspots, with highlight fades and a
//! transient info window per activation.
//!
//! Each point moves `Idle -> Hovered -> (Idle | Activated)` and
//! `Activated -> Idle` once the hold delay has elapsed. While any point is
//! activated, pointer processing is suspended for all of them.

use crate::accessory::AccessoryCoordinator;
use crate::constants::{
    ACTIVATION_HOLD_SEC, HIGHLIGHT_FADE_SEC, WINDOW_FADE_SEC, WINDOW_HEIGHT_OFFSET,
};
use crate::host::{
    AnimationHost, AudioHost, HighlightHost, Hosts, InfoWindowSpec, WindowHandle, WindowHost,
};
use crate::input::{ray_sphere, Ray};
use crate::tween::{Curve, Tween};
use glam::{Vec3, Vec4};
use std::rc::Rc;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointId(pub usize);

#[derive(Clone, Debug, PartialEq)]
pub struct FeaturePointConfig {
    pub name: String,
    pub anchor: Vec3,
    pub pick_radius: f32,
    pub description: String,
    pub icon: Option<String>,
    /// Renderer whose material carries the highlight.
    pub renderer: String,
    /// Used as the original color when the highlight host cannot report one.
    pub base_color: Vec4,
    pub highlight_color: Vec4,
    pub highlight_intensity: f32,
    pub click_clip: Option<String>,
    pub animator: Option<String>,
    pub trigger: Option<String>,
}

impl FeaturePointConfig {
    /// Color the highlight fades toward; alpha is kept from `highlight_color`.
    pub fn highlight_target(&self) -> Vec4 {
        let rgb = self.highlight_color.truncate() * self.highlight_intensity;
        rgb.extend(self.highlight_color.w)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FeatureParams {
    pub hover_clip: Option<String>,
    pub hold: Duration,
    pub highlight_fade_sec: f32,
    pub window_fade_sec: f32,
    pub window_height_offset: f32,
}

impl Default for FeatureParams {
    fn default() -> Self {
        Self {
            hover_clip: None,
            hold: Duration::from_secs_f32(ACTIVATION_HOLD_SEC),
            highlight_fade_sec: HIGHLIGHT_FADE_SEC,
            window_fade_sec: WINDOW_FADE_SEC,
            window_height_offset: WINDOW_HEIGHT_OFFSET,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FeatureState {
    #[default]
    Idle,
    Hovered,
    Activated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeatureEvent {
    Hovered(PointId),
    Exited(PointId),
    Clicked(PointId),
}

struct PointRuntime {
    config: FeaturePointConfig,
    state: FeatureState,
    original_color: Vec4,
    color: Vec4,
    highlight: Option<Tween<Vec4>>,
}

struct InfoWindow {
    handle: WindowHandle,
    fade: Tween<f32>,
    closing: bool,
}

struct Activation {
    point: PointId,
    elapsed: Duration,
}

pub struct FeatureInteractionCoordinator {
    points: Vec<PointRuntime>,
    params: FeatureParams,
    hovered: Option<PointId>,
    activation: Option<Activation>,
    window: Option<InfoWindow>,
    highlight_host: Option<Rc<dyn HighlightHost>>,
    animation_host: Option<Rc<dyn AnimationHost>>,
    audio_host: Option<Rc<dyn AudioHost>>,
    window_host: Option<Rc<dyn WindowHost>>,
    events: Vec<FeatureEvent>,
}

impl FeatureInteractionCoordinator {
    /// Captures each point's original material color once.
    pub fn new(points: Vec<FeaturePointConfig>, params: FeatureParams, hosts: &Hosts) -> Self {
        let highlight_host = hosts.highlight.clone();
        let points = points
            .into_iter()
            .map(|config| {
                let original_color = highlight_host
                    .as_ref()
                    .and_then(|h| h.material_color(&config.renderer))
                    .unwrap_or(config.base_color);
                PointRuntime {
                    config,
                    state: FeatureState::Idle,
                    original_color,
                    color: original_color,
                    highlight: None,
                }
            })
            .collect();
        Self {
            points,
            params,
            hovered: None,
            activation: None,
            window: None,
            highlight_host,
            animation_host: hosts.animation.clone(),
            audio_host: hosts.audio.clone(),
            window_host: hosts.window.clone(),
            events: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point_by_name(&self, name: &str) -> Option<PointId> {
        self.points
            .iter()
            .position(|p| p.config.name == name)
            .map(PointId)
    }

    pub fn config(&self, id: PointId) -> Option<&FeaturePointConfig> {
        self.points.get(id.0).map(|p| &p.config)
    }

    pub fn state(&self, id: PointId) -> FeatureState {
        self.points.get(id.0).map(|p| p.state).unwrap_or_default()
    }

    pub fn color(&self, id: PointId) -> Option<Vec4> {
        self.points.get(id.0).map(|p| p.color)
    }

    pub fn original_color(&self, id: PointId) -> Option<Vec4> {
        self.points.get(id.0).map(|p| p.original_color)
    }

    pub fn hovered_point(&self) -> Option<PointId> {
        self.hovered
    }

    pub fn active_point(&self) -> Option<PointId> {
        self.activation.as_ref().map(|a| a.point)
    }

    pub fn is_interaction_active(&self) -> bool {
        self.activation.is_some()
    }

    pub fn window_handle(&self) -> Option<WindowHandle> {
        self.window.as_ref().map(|w| w.handle)
    }

    pub fn drain_events(&mut self) -> Vec<FeatureEvent> {
        std::mem::take(&mut self.events)
    }

    /// Nearest hotspot hit by the ray.
    pub fn pick(&self, ray: &Ray) -> Option<PointId> {
        let mut best = None::<(usize, f32)>;
        for (i, p) in self.points.iter().enumerate() {
            if let Some(t) = ray_sphere(ray.origin, ray.dir, p.config.anchor, p.config.pick_radius) {
                match best {
                    Some((_, bt)) if t >= bt => {}
                    _ => best = Some((i, t)),
                }
            }
        }
        best.map(|(i, _)| PointId(i))
    }

    /// Evaluate hover and click transitions for this tick's pointer sample.
    pub fn process_pointer(
        &mut self,
        ray: Option<Ray>,
        viewer: Vec3,
        primary_pressed: bool,
        accessories: &mut AccessoryCoordinator,
    ) {
        if self.is_interaction_active() {
            return;
        }
        let hit = ray.and_then(|r| self.pick(&r));
        if hit != self.hovered {
            if let Some(prev) = self.hovered.take() {
                self.exit(prev);
            }
            if let Some(next) = hit {
                self.enter(next);
            }
        }
        if primary_pressed {
            if let Some(id) = self.hovered {
                self.activate(id, viewer, accessories);
            }
        }
    }

    pub fn advance(&mut self, dt: Duration, accessories: &mut AccessoryCoordinator) {
        self.advance_activation(dt, accessories);
        self.advance_highlights(dt);
        self.advance_window(dt);
    }

    /// Force every point back to idle, drop the info window and re-enable
    /// accessories. No reverse animation runs.
    pub fn stop_all_interactions(&mut self, accessories: &mut AccessoryCoordinator) {
        self.activation = None;
        self.hovered = None;
        for (i, p) in self.points.iter_mut().enumerate() {
            if p.state != FeatureState::Idle {
                self.events.push(FeatureEvent::Exited(PointId(i)));
            }
            p.state = FeatureState::Idle;
            p.highlight = None;
            p.color = p.original_color;
            if let Some(h) = &self.highlight_host {
                h.set_material_color(&p.config.renderer, p.color);
            }
        }
        self.destroy_window();
        accessories.set_enabled(true);
        log::debug!("[feature] all interactions stopped");
    }

    fn enter(&mut self, id: PointId) {
        let fade = self.params.highlight_fade_sec;
        let Some(p) = self.points.get_mut(id.0) else {
            return;
        };
        p.state = FeatureState::Hovered;
        p.highlight = Some(Tween::new(
            p.color,
            p.config.highlight_target(),
            fade,
            Curve::EaseInOut,
        ));
        self.hovered = Some(id);
        self.events.push(FeatureEvent::Hovered(id));
        if let (Some(a), Some(clip)) = (&self.audio_host, &self.params.hover_clip) {
            a.play_one_shot(clip);
        }
    }

    fn exit(&mut self, id: PointId) {
        self.fade_to_original(id);
        if let Some(p) = self.points.get_mut(id.0) {
            p.state = FeatureState::Idle;
        }
        self.events.push(FeatureEvent::Exited(id));
    }

    fn activate(&mut self, id: PointId, viewer: Vec3, accessories: &mut AccessoryCoordinator) {
        let Some(p) = self.points.get_mut(id.0) else {
            return;
        };
        if p.state == FeatureState::Activated {
            return;
        }
        p.state = FeatureState::Activated;
        let config = p.config.clone();

        self.activation = Some(Activation {
            point: id,
            elapsed: Duration::ZERO,
        });
        accessories.set_enabled(false);

        if let (Some(h), Some(animator), Some(trigger)) =
            (&self.animation_host, &config.animator, &config.trigger)
        {
            h.trigger_animation(animator, trigger);
        }
        if let (Some(a), Some(clip)) = (&self.audio_host, &config.click_clip) {
            a.play_one_shot(clip);
        }
        self.open_window(&config, viewer);
        self.events.push(FeatureEvent::Clicked(id));
        log::debug!("[feature] activated {}", config.name);
    }

    fn complete(&mut self, id: PointId, accessories: &mut AccessoryCoordinator) {
        self.activation = None;
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        self.fade_to_original(id);
        if let Some(p) = self.points.get_mut(id.0) {
            p.state = FeatureState::Idle;
        }
        accessories.set_enabled(true);
        self.close_window();
        self.events.push(FeatureEvent::Exited(id));
    }

    fn fade_to_original(&mut self, id: PointId) {
        let fade = self.params.highlight_fade_sec;
        if let Some(p) = self.points.get_mut(id.0) {
            p.highlight = Some(Tween::new(p.color, p.original_color, fade, Curve::EaseInOut));
        }
    }

    fn open_window(&mut self, config: &FeaturePointConfig, viewer: Vec3) {
        // Never two windows at once.
        self.destroy_window();
        let Some(host) = &self.window_host else {
            return;
        };
        let anchor = config.anchor + Vec3::Y * self.params.window_height_offset;
        let spec = InfoWindowSpec {
            anchor,
            facing: (viewer - anchor).normalize_or_zero(),
            title: config.name.clone(),
            description: config.description.clone(),
            icon: config.icon.clone(),
        };
        let Some(handle) = host.create_info_window(&spec) else {
            log::debug!("[feature] window host declined {}", config.name);
            return;
        };
        host.set_window_opacity(handle, 0.0);
        self.window = Some(InfoWindow {
            handle,
            fade: Tween::new(0.0, 1.0, self.params.window_fade_sec, Curve::EaseInOut),
            closing: false,
        });
    }

    fn close_window(&mut self) {
        let fade = self.params.window_fade_sec;
        if let Some(w) = &mut self.window {
            w.fade = Tween::new(w.fade.value(), 0.0, fade, Curve::EaseInOut);
            w.closing = true;
        }
    }

    fn destroy_window(&mut self) {
        if let Some(w) = self.window.take() {
            if let Some(host) = &self.window_host {
                host.destroy_window(w.handle);
            }
        }
    }

    fn advance_activation(&mut self, dt: Duration, accessories: &mut AccessoryCoordinator) {
        let hold = self.params.hold;
        let Some(a) = &mut self.activation else {
            return;
        };
        a.elapsed += dt;
        if a.elapsed >= hold {
            let id = a.point;
            self.complete(id, accessories);
        }
    }

    fn advance_highlights(&mut self, dt: Duration) {
        for p in &mut self.points {
            let Some(tween) = &mut p.highlight else {
                continue;
            };
            p.color = tween.advance(dt);
            if tween.is_finished() {
                p.highlight = None;
            }
            if let Some(h) = &self.highlight_host {
                h.set_material_color(&p.config.renderer, p.color);
            }
        }
    }

    fn advance_window(&mut self, dt: Duration) {
        let Some(w) = &mut self.window else {
            return;
        };
        let opacity = w.fade.advance(dt);
        let done = w.closing && w.fade.is_finished();
        if let Some(host) = &self.window_host {
            host.set_window_opacity(w.handle, opacity);
        }
        if done {
            self.destroy_window();
        }
    }
}
