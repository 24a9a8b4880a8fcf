//! Runtime configuration. `Default` describes the shipped headset.

use crate::accessory::{AccessoryVariant, PartPair, VariantConfig};
use crate::constants::{DEFAULT_HIGHLIGHT_INTENSITY, DEFAULT_PICK_RADIUS};
use crate::feature::{FeatureParams, FeaturePointConfig};
use crate::ui::{AttachmentParts, UiParams};
use glam::{Vec3, Vec4};

// Rest positions of the accessory mounts, model space
pub const EARCAP_LEFT_REST: [f32; 3] = [-0.092, 0.0, 0.0];
pub const EARCAP_RIGHT_REST: [f32; 3] = [0.092, 0.0, 0.0];
pub const HEADPIECE_LEFT_REST: [f32; 3] = [-0.06, 0.11, 0.0];
pub const HEADPIECE_RIGHT_REST: [f32; 3] = [0.06, 0.11, 0.0];

pub const CHECKOUT_URL: &str = "https://store.example.com/checkout/headset";
pub const AR_VIEW_URL: &str = "https://store.example.com/ar/headset";

#[derive(Clone, Debug, PartialEq)]
pub struct ConfiguratorConfig {
    pub variants: Vec<VariantConfig>,
    pub features: Vec<FeaturePointConfig>,
    pub feature_params: FeatureParams,
    pub ui: UiParams,
}

impl Default for ConfiguratorConfig {
    fn default() -> Self {
        Self {
            variants: default_variants(),
            features: default_features(),
            feature_params: FeatureParams {
                hover_clip: Some("hover_tick".into()),
                ..FeatureParams::default()
            },
            ui: UiParams {
                checkout_url: CHECKOUT_URL.into(),
                ar_url: AR_VIEW_URL.into(),
                attachments: AttachmentParts {
                    primary: vec!["mic_boom".into()],
                    secondary: vec!["cable_coil".into()],
                },
                ..UiParams::default()
            },
        }
    }
}

fn pair(prefix: &str, left_rest: [f32; 3], right_rest: [f32; 3]) -> PartPair {
    PartPair {
        left: format!("{prefix}_l"),
        right: format!("{prefix}_r"),
        left_rest: Vec3::from_array(left_rest),
        right_rest: Vec3::from_array(right_rest),
    }
}

pub fn default_variants() -> Vec<VariantConfig> {
    AccessoryVariant::ALL
        .into_iter()
        .map(|variant| {
            let key = variant.name().to_lowercase();
            let headpiece = (variant != AccessoryVariant::Default).then(|| {
                pair(
                    &format!("headpiece_{key}"),
                    HEADPIECE_LEFT_REST,
                    HEADPIECE_RIGHT_REST,
                )
            });
            VariantConfig {
                variant,
                earcaps: pair(&format!("earcap_{key}"), EARCAP_LEFT_REST, EARCAP_RIGHT_REST),
                headpiece,
            }
        })
        .collect()
}

fn hotspot(name: &str, anchor: Vec3, description: &str, color: Vec4) -> FeaturePointConfig {
    let key = name.to_lowercase();
    FeaturePointConfig {
        name: name.into(),
        anchor,
        pick_radius: DEFAULT_PICK_RADIUS,
        description: description.into(),
        icon: Some(format!("icons/{key}.svg")),
        renderer: format!("hotspot_{key}"),
        base_color: Vec4::new(0.8, 0.8, 0.8, 1.0),
        highlight_color: color,
        highlight_intensity: DEFAULT_HIGHLIGHT_INTENSITY,
        click_clip: Some(format!("{key}_click")),
        animator: Some("headset".into()),
        trigger: Some(format!("Show{name}")),
    }
}

pub fn default_features() -> Vec<FeaturePointConfig> {
    vec![
        hotspot(
            "Ear",
            Vec3::new(0.1, 0.0, 0.02),
            "Memory-foam cushions with active noise cancellation.",
            Vec4::new(0.2, 0.6, 1.0, 1.0),
        ),
        hotspot(
            "Headband",
            Vec3::new(0.0, 0.14, 0.0),
            "Adjustable steel band with a breathable mesh lining.",
            Vec4::new(1.0, 0.7, 0.2, 1.0),
        ),
        hotspot(
            "Controls",
            Vec3::new(-0.1, -0.03, 0.03),
            "Touch controls for volume, playback and voice assistant.",
            Vec4::new(0.3, 1.0, 0.5, 1.0),
        ),
    ]
}
