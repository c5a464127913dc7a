//! Image generation settings.
//!
//! Stored as JSON under the assets root (`config/image_config.json`). Missing
//! keys take their defaults and unknown keys are ignored, so older and newer
//! files both load.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use render::{Background, Direction, Effects, RenderOptions};
use serde::{Deserialize, Deserializer, Serialize};

/// Glow intensity and particle count of the xiuxian theme. The config values
/// are applied to every theme as a ratio against these.
const BASE_GLOW_INTENSITY: f32 = 0.2;
const BASE_PARTICLE_COUNT: f32 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundType {
    #[default]
    Gradient,
    Texture,
    Solid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageQuality {
    Low,
    Medium,
    #[default]
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub enable_background: bool,
    pub background_type: BackgroundType,
    pub default_theme: String,
    pub gradient_direction: Direction,
    pub gradient_smooth: bool,

    /// Master switch for texture, particles and glow.
    pub enable_effects: bool,
    pub enable_texture: bool,
    pub texture_opacity: f32,
    pub enable_particles: bool,
    pub particle_count: u32,
    pub enable_glow: bool,
    pub glow_intensity: f32,

    pub image_quality: ImageQuality,
    pub enable_anti_alias: bool,

    pub enable_cache: bool,
    /// Maximum number of cached cards.
    pub cache_max_size: usize,
    /// Seconds before a cached card is regenerated.
    pub cache_expire_time: u64,

    /// Card kind -> theme key. Entries from a file are merged over the defaults.
    #[serde(deserialize_with = "merge_theme_mapping")]
    pub theme_mapping: BTreeMap<String, String>,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            enable_background: true,
            background_type: BackgroundType::Gradient,
            default_theme: render::Theme::DEFAULT_KEY.to_string(),
            gradient_direction: Direction::Radial,
            gradient_smooth: true,
            enable_effects: true,
            enable_texture: true,
            texture_opacity: 0.15,
            enable_particles: true,
            particle_count: 40,
            enable_glow: true,
            glow_intensity: 0.2,
            image_quality: ImageQuality::High,
            enable_anti_alias: true,
            enable_cache: true,
            cache_max_size: 100,
            cache_expire_time: 3600,
            theme_mapping: default_theme_mapping(),
        }
    }
}

fn default_theme_mapping() -> BTreeMap<String, String> {
    [
        ("player", "xiuxian"),
        ("cultivation", "cultivation"),
        ("breakthrough", "xiuxian"),
        ("combat", "combat"),
        ("equipment", "treasure"),
        ("alchemy", "alchemy"),
        ("sect", "sect"),
        ("exploration", "nature"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn merge_theme_mapping<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error> {
    let user = BTreeMap::<String, String>::deserialize(deserializer)?;
    let mut mapping = default_theme_mapping();
    mapping.extend(user);
    Ok(mapping)
}

impl ImageConfig {
    /// Default location of the config file under an assets root.
    pub fn path_in(assets_root: impl AsRef<Path>) -> PathBuf {
        assets_root.as_ref().join("config").join("image_config.json")
    }

    /// Load from `path`. A missing file yields defaults; a file that exists
    /// but does not parse is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let json = fs::read_to_string(path).with_context(|| format!("read {:?}", path))?;
        let cfg = serde_json::from_str(&json).with_context(|| format!("parse {:?}", path))?;
        Ok(cfg)
    }

    /// [`ImageConfig::load`], degrading to defaults on error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(cfg) => cfg,
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "failed to load image config; using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {:?}", parent))?;
        }
        let json = serde_json::to_string_pretty(self).context("serialize config")?;
        fs::write(path, json).with_context(|| format!("write {:?}", path))?;
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Theme key for a card kind, falling back to `default_theme`.
    pub fn theme_for_card(&self, kind: &str) -> &str {
        self.theme_mapping.get(kind).unwrap_or(&self.default_theme)
    }

    /// Turn on `enable_{feature}`. Returns `false` for unknown features.
    pub fn enable_feature(&mut self, feature: &str) -> bool {
        self.set_feature(feature, true)
    }

    /// Turn off `enable_{feature}`. Returns `false` for unknown features.
    pub fn disable_feature(&mut self, feature: &str) -> bool {
        self.set_feature(feature, false)
    }

    fn set_feature(&mut self, feature: &str, on: bool) -> bool {
        let flag = match feature {
            "background" => &mut self.enable_background,
            "effects" => &mut self.enable_effects,
            "texture" => &mut self.enable_texture,
            "particles" => &mut self.enable_particles,
            "glow" => &mut self.enable_glow,
            "anti_alias" => &mut self.enable_anti_alias,
            "cache" => &mut self.enable_cache,
            _ => return false,
        };
        *flag = on;
        true
    }

    /// Effect layers for a themed background. `texture` is only used by the
    /// `texture` background type; otherwise the texture layer is noise.
    pub fn effects(&self, texture: Option<PathBuf>) -> Effects {
        let mut effects = Effects::none();
        if self.enable_effects {
            if self.enable_texture {
                effects.texture = Some(self.texture_opacity);
            }
            if self.enable_glow {
                effects.glow = Some(self.glow_intensity / BASE_GLOW_INTENSITY);
            }
            if self.enable_particles {
                effects.particles = Some(self.particle_count as f32 / BASE_PARTICLE_COUNT);
            }
        }
        if self.background_type == BackgroundType::Texture {
            effects.texture = Some(self.texture_opacity);
            effects.texture_path = texture;
        }
        effects
    }

    pub fn background(&self, kind: &str, texture: Option<PathBuf>) -> Background {
        if !self.enable_background || self.background_type == BackgroundType::Solid {
            return Background::Solid;
        }
        Background::Themed {
            theme: Some(self.theme_for_card(kind).to_string()),
            direction: self.gradient_direction,
            smooth: self.gradient_smooth,
            effects: self.effects(texture),
        }
    }

    pub fn render_options(&self, kind: &str, texture: Option<PathBuf>, seed: u64) -> RenderOptions {
        RenderOptions {
            background: self.background(kind, texture),
            anti_alias: self.enable_anti_alias,
            seed,
        }
    }

    /// Digest input for everything that changes the encoded PNG. Cache
    /// settings are left out so resizing the cache keeps its entries.
    pub fn fingerprint(&self) -> Result<String> {
        let mut pixels = self.clone();
        pixels.enable_cache = true;
        pixels.cache_max_size = 0;
        pixels.cache_expire_time = 0;
        serde_json::to_string(&pixels).context("serialize config fingerprint")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg: ImageConfig = serde_json::from_str(r#"{"particle_count": 10, "ai_provider": "local"}"#).unwrap();
        assert_eq!(cfg.particle_count, 10);
        assert_eq!(cfg.cache_max_size, 100);
        assert_eq!(cfg.gradient_direction, Direction::Radial);
        assert_eq!(cfg.theme_for_card("equipment"), "treasure");
    }

    #[test]
    fn theme_mapping_merges_over_defaults() {
        let cfg: ImageConfig = serde_json::from_str(r#"{"theme_mapping": {"player": "sect", "pet": "nature"}}"#).unwrap();
        assert_eq!(cfg.theme_for_card("player"), "sect");
        assert_eq!(cfg.theme_for_card("pet"), "nature");
        assert_eq!(cfg.theme_for_card("combat"), "combat");
        assert_eq!(cfg.theme_for_card("unknown"), "xiuxian");
    }

    #[test]
    fn feature_flags() {
        let mut cfg = ImageConfig::default();
        assert!(cfg.disable_feature("particles"));
        assert!(!cfg.enable_particles);
        assert!(cfg.enable_feature("particles"));
        assert!(cfg.enable_particles);
        assert!(!cfg.enable_feature("ai_background"));

        cfg.disable_feature("cache");
        cfg.particle_count = 3;
        cfg.reset();
        assert_eq!(cfg, ImageConfig::default());
    }

    #[test]
    fn solid_or_disabled_background() {
        let mut cfg = ImageConfig {
            background_type: BackgroundType::Solid,
            ..Default::default()
        };
        assert_eq!(cfg.background("player", None), Background::Solid);

        cfg.background_type = BackgroundType::Gradient;
        cfg.enable_background = false;
        assert_eq!(cfg.background("player", None), Background::Solid);
    }

    #[test]
    fn effects_scale_against_baseline() {
        let cfg = ImageConfig {
            glow_intensity: 0.4,
            particle_count: 20,
            ..Default::default()
        };
        let effects = cfg.effects(None);
        assert_eq!(effects.glow, Some(2.0));
        assert_eq!(effects.particles, Some(0.5));
        assert_eq!(effects.texture, Some(0.15));

        let off = ImageConfig {
            enable_effects: false,
            ..Default::default()
        };
        assert_eq!(off.effects(None), Effects::none());
    }

    #[test]
    fn texture_background_uses_file() {
        let cfg = ImageConfig {
            background_type: BackgroundType::Texture,
            enable_effects: false,
            ..Default::default()
        };
        let effects = cfg.effects(Some(PathBuf::from("silk.png")));
        assert_eq!(effects.texture_path.as_deref(), Some(Path::new("silk.png")));
        assert_eq!(effects.texture, Some(0.15));
    }

    #[test]
    fn cache_settings_do_not_change_fingerprint() {
        let a = ImageConfig::default();
        let b = ImageConfig {
            cache_max_size: 5,
            ..Default::default()
        };
        let c = ImageConfig {
            gradient_direction: Direction::Vertical,
            ..Default::default()
        };
        assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
        assert_ne!(a.fingerprint().unwrap(), c.fingerprint().unwrap());
    }
}
