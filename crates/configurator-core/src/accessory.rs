//! Cosmetic accessory variants and the animated swap between them.

use crate::constants::{pop_in_offset, POP_IN_SEC, SWAP_FADE_SEC};
use crate::error::Rejected;
use crate::host::VisibilityHost;
use crate::tween::{Curve, Tween};
use glam::Vec3;
use std::rc::Rc;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum AccessoryVariant {
    #[default]
    Default,
    Nature,
    Valkyrie,
    Werewolf,
}

impl AccessoryVariant {
    pub const ALL: [AccessoryVariant; 4] = [
        AccessoryVariant::Default,
        AccessoryVariant::Nature,
        AccessoryVariant::Valkyrie,
        AccessoryVariant::Werewolf,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AccessoryVariant::Default => "Default",
            AccessoryVariant::Nature => "Nature",
            AccessoryVariant::Valkyrie => "Valkyrie",
            AccessoryVariant::Werewolf => "Werewolf",
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// A left/right pair of parts that pop in together.
#[derive(Clone, Debug, PartialEq)]
pub struct PartPair {
    pub left: String,
    pub right: String,
    pub left_rest: Vec3,
    pub right_rest: Vec3,
}

impl PartPair {
    fn parts(&self) -> [(&str, Vec3, bool); 2] {
        [
            (self.left.as_str(), self.left_rest, true),
            (self.right.as_str(), self.right_rest, false),
        ]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VariantConfig {
    pub variant: AccessoryVariant,
    pub earcaps: PartPair,
    pub headpiece: Option<PartPair>,
}

impl VariantConfig {
    pub fn pairs(&self) -> impl Iterator<Item = &PartPair> {
        std::iter::once(&self.earcaps).chain(self.headpiece.as_ref())
    }

    pub fn part_ids(&self) -> impl Iterator<Item = &str> {
        self.pairs()
            .flat_map(|p| [p.left.as_str(), p.right.as_str()])
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessoryEvent {
    Changed(AccessoryVariant),
}

struct PopIn {
    part: String,
    tween: Tween<Vec3>,
}

enum SwapPhase {
    FadeOut {
        to: AccessoryVariant,
        tween: Tween<f32>,
    },
    FadeIn {
        tween: Tween<f32>,
    },
}

pub struct AccessoryCoordinator {
    variants: Vec<VariantConfig>,
    opacity: [f32; 4],
    current: AccessoryVariant,
    enabled: bool,
    swap: Option<SwapPhase>,
    pop_ins: Vec<PopIn>,
    host: Option<Rc<dyn VisibilityHost>>,
    events: Vec<AccessoryEvent>,
}

impl AccessoryCoordinator {
    /// Hides every configured part, then activates `Default` without animation.
    pub fn new(variants: Vec<VariantConfig>, host: Option<Rc<dyn VisibilityHost>>) -> Self {
        let mut coordinator = Self {
            variants,
            opacity: [0.0; 4],
            current: AccessoryVariant::Default,
            enabled: true,
            swap: None,
            pop_ins: Vec::new(),
            host,
            events: Vec::new(),
        };
        for v in AccessoryVariant::ALL {
            coordinator.set_variant_visible(v, false);
        }
        coordinator.activate(AccessoryVariant::Default, 1.0);
        coordinator
    }

    pub fn current(&self) -> AccessoryVariant {
        self.current
    }

    pub fn is_swapping(&self) -> bool {
        self.swap.is_some()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn opacity(&self, variant: AccessoryVariant) -> f32 {
        self.opacity[variant.index()]
    }

    /// Whether the variant's parts are currently shown by the host.
    pub fn is_visible(&self, variant: AccessoryVariant) -> bool {
        self.enabled && variant == self.current && self.config(variant).is_some()
    }

    pub fn config(&self, variant: AccessoryVariant) -> Option<&VariantConfig> {
        self.variants.iter().find(|c| c.variant == variant)
    }

    pub fn set_variant(&mut self, target: AccessoryVariant, animate: bool) -> Result<(), Rejected> {
        if self.swap.is_some() {
            log::debug!("[accessory] {} rejected: swap in flight", target.name());
            return Err(Rejected::SwapInFlight);
        }
        if !self.enabled {
            log::debug!("[accessory] {} rejected: disabled", target.name());
            return Err(Rejected::Disabled);
        }
        if self.config(target).is_none() {
            log::debug!("[accessory] {} has no parts configured; ignored", target.name());
            return Ok(());
        }
        if target == self.current {
            return Ok(());
        }
        if animate {
            self.swap = Some(SwapPhase::FadeOut {
                to: target,
                tween: Tween::new(1.0, 0.0, SWAP_FADE_SEC, Curve::EaseInOut),
            });
        } else {
            self.set_variant_visible(self.current, false);
            self.activate(target, 1.0);
        }
        Ok(())
    }

    /// Force-hide (or restore) accessory visibility without touching the selection.
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled == self.enabled {
            return;
        }
        self.enabled = enabled;
        if enabled {
            let current = self.current;
            let opacity = self.opacity(current);
            self.set_variant_opacity(current, opacity);
            self.set_variant_visible(current, true);
        } else {
            for v in AccessoryVariant::ALL {
                self.set_variant_visible(v, false);
            }
        }
        log::debug!("[accessory] enabled={}", enabled);
    }

    pub fn advance(&mut self, dt: Duration) {
        self.advance_swap(dt);
        self.advance_pop_ins(dt);
    }

    pub fn drain_events(&mut self) -> Vec<AccessoryEvent> {
        std::mem::take(&mut self.events)
    }

    fn advance_swap(&mut self, dt: Duration) {
        let Some(phase) = self.swap.as_mut() else {
            return;
        };
        match phase {
            SwapPhase::FadeOut { to, tween } => {
                let to = *to;
                let value = tween.advance(dt);
                let finished = tween.is_finished();
                let from = self.current;
                self.set_variant_opacity(from, value);
                if finished {
                    self.set_variant_visible(from, false);
                    self.activate(to, 0.0);
                    self.swap = Some(SwapPhase::FadeIn {
                        tween: Tween::new(0.0, 1.0, SWAP_FADE_SEC, Curve::EaseInOut),
                    });
                }
            }
            SwapPhase::FadeIn { tween } => {
                let value = tween.advance(dt);
                let finished = tween.is_finished();
                self.set_variant_opacity(self.current, value);
                if finished {
                    self.swap = None;
                    log::debug!("[accessory] swap to {} complete", self.current.name());
                }
            }
        }
    }

    fn advance_pop_ins(&mut self, dt: Duration) {
        if self.pop_ins.is_empty() {
            return;
        }
        for pop in &mut self.pop_ins {
            let pos = pop.tween.advance(dt);
            if let Some(h) = &self.host {
                h.set_part_local_position(&pop.part, pos);
            }
        }
        self.pop_ins.retain(|p| !p.tween.is_finished());
    }

    /// Commit `target` as current at `opacity` and start its pop-in.
    fn activate(&mut self, target: AccessoryVariant, opacity: f32) {
        self.current = target;
        self.set_variant_opacity(target, opacity);
        if self.enabled {
            self.set_variant_visible(target, true);
        }
        self.start_pop_ins(target);
        self.events.push(AccessoryEvent::Changed(target));
        log::debug!("[accessory] activated {}", target.name());
    }

    fn start_pop_ins(&mut self, variant: AccessoryVariant) {
        // Parts still popping from a previous activation snap to rest.
        for pop in self.pop_ins.drain(..) {
            if let Some(h) = &self.host {
                h.set_part_local_position(&pop.part, pop.tween.target);
            }
        }
        let Some(config) = self.variants.iter().find(|c| c.variant == variant) else {
            return;
        };
        for pair in config.pairs() {
            for (part, rest, left) in pair.parts() {
                let start = rest + pop_in_offset(left);
                if let Some(h) = &self.host {
                    h.set_part_local_position(part, start);
                }
                self.pop_ins.push(PopIn {
                    part: part.to_string(),
                    tween: Tween::new(start, rest, POP_IN_SEC, Curve::EaseInOut),
                });
            }
        }
    }

    fn set_variant_opacity(&mut self, variant: AccessoryVariant, opacity: f32) {
        self.opacity[variant.index()] = opacity;
        let (Some(h), Some(config)) = (&self.host, self.config(variant)) else {
            return;
        };
        for part in config.part_ids() {
            h.set_part_opacity(part, opacity);
        }
    }

    fn set_variant_visible(&self, variant: AccessoryVariant, visible: bool) {
        let (Some(h), Some(config)) = (&self.host, self.config(variant)) else {
            return;
        };
        for part in config.part_ids() {
            h.set_part_visible(part, visible);
        }
    }
}
