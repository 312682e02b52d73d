use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_CONFIG: &str = include_str!("../../assets/default_config.toml");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SnapAlign {
    #[default]
    Start,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MomentumModel {
    Velocity,
    #[default]
    Damping,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumConfig {
    pub model: MomentumModel,
    /// Release fling strength. 0 disables momentum.
    pub power: f64,
    /// Drag samples kept for the release estimate.
    pub samples: usize,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            model: MomentumModel::default(),
            power: 1.0,
            samples: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Fixed slide width in pixels, 0 = use the first slide's own width.
    pub slide_width: f64,
    /// Slides fitted into the container width, 0 = use `slide_width`.
    pub visible_slides: f64,
    pub gap: f64,
    /// Item widths moved per pixel of pointer travel.
    pub drag_sensitivity: f64,
    /// Smoothing time constant in seconds. Smaller is snappier.
    pub lerp_factor: f64,
    pub force_power: f64,
    pub snap: bool,
    pub snap_align: SnapAlign,
    pub momentum: MomentumConfig,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            slide_width: 0.0,
            visible_slides: 0.0,
            gap: 0.0,
            drag_sensitivity: 0.003,
            lerp_factor: 0.1,
            force_power: 5.0,
            snap: false,
            snap_align: SnapAlign::Start,
            momentum: MomentumConfig::default(),
        }
    }
}

impl CarouselConfig {
    /// Replace out-of-range values with their defaults. Never fails.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let non_negative = |name: &str, v: &mut f64, default: f64| {
            if !v.is_finite() || *v < 0.0 {
                log::warn!("carousel.{} = {} is invalid, using {}", name, v, default);
                *v = default;
            }
        };
        non_negative("slide_width", &mut self.slide_width, defaults.slide_width);
        non_negative("visible_slides", &mut self.visible_slides, defaults.visible_slides);
        non_negative("gap", &mut self.gap, defaults.gap);
        non_negative("momentum.power", &mut self.momentum.power, defaults.momentum.power);
        if !self.force_power.is_finite() {
            log::warn!("carousel.force_power = {} is invalid, using {}", self.force_power, defaults.force_power);
            self.force_power = defaults.force_power;
        }

        let positive = |name: &str, v: &mut f64, default: f64| {
            if !v.is_finite() || *v <= 0.0 {
                log::warn!("carousel.{} = {} must be positive, using {}", name, v, default);
                *v = default;
            }
        };
        positive("drag_sensitivity", &mut self.drag_sensitivity, defaults.drag_sensitivity);
        positive("lerp_factor", &mut self.lerp_factor, defaults.lerp_factor);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    /// Padding around the carousel in logical pixels.
    #[serde(default = "default_padding")]
    pub padding: f32,
}

fn default_padding() -> f32 { 48.0 }

impl Default for WindowConfig {
    fn default() -> Self {
        Self { width: 1280, height: 560, padding: default_padding() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    pub target_fps: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self { target_fps: 120 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlidesConfig {
    pub count: usize,
    /// Slide height as a fraction of the content height.
    #[serde(default = "default_height_ratio")]
    pub height_ratio: f32,
    /// Horizontal shear of a slide's top edge, in logical pixels per unit force.
    #[serde(default = "default_bend")]
    pub bend: f32,
    /// Four corner colours per slide (top-left, top-right, bottom-right,
    /// bottom-left). Slides past the end of the list cycle through it.
    #[serde(default = "default_palettes")]
    pub palettes: Vec<[String; 4]>,
}

fn default_height_ratio() -> f32 { 0.8 }
fn default_bend() -> f32 { 40.0 }

fn default_palettes() -> Vec<[String; 4]> {
    [
        ["#ffe680", "#ff66b3", "#994de6", "#80cc4d"],
        ["#4de6ff", "#1a4dcc", "#ff8080", "#e6e6e6"],
        ["#ffb31a", "#001acc", "#ff4d99", "#66cce6"],
        ["#b366ff", "#1accb3", "#ff99e6", "#4d80e6"],
        ["#ffff33", "#ff00ff", "#00ccff", "#cccccc"],
    ]
    .into_iter()
    .map(|p| p.map(String::from))
    .collect()
}

impl Default for SlidesConfig {
    fn default() -> Self {
        Self {
            count: 10,
            height_ratio: default_height_ratio(),
            bend: default_bend(),
            palettes: default_palettes(),
        }
    }
}

impl SlidesConfig {
    /// Corner colours for slide `index`, white when nothing parses.
    pub fn corner_colors(&self, index: usize) -> [[f32; 4]; 4] {
        let white = [1.0, 1.0, 1.0, 1.0];
        match self.palettes.get(index % self.palettes.len().max(1)) {
            Some(palette) => palette
                .each_ref()
                .map(|hex| parse_hex_color(hex).unwrap_or(white)),
            None => [white; 4],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorsConfig {
    pub background: String,
    /// Background tint reached at full force.
    pub accent: String,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            background: "#0b0b12".to_string(),
            accent: "#2a1840".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub slides: SlidesConfig,
    #[serde(default)]
    pub colors: ColorsConfig,
}

impl Config {
    pub fn config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("~/.config"));
        base.join("smooth_carousel").join("config.toml")
    }

    pub fn load_or_default() -> Self {
        let path = Self::config_path();
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(contents) => match Self::parse(&contents) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        log::warn!("Failed to parse config at {:?}: {}", path, e);
                    }
                },
                Err(e) => {
                    log::warn!("Failed to read config at {:?}: {}", path, e);
                }
            }
        } else {
            // Seed the bundled default so there is something to edit
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = std::fs::write(&path, DEFAULT_CONFIG);
        }
        Self::bundled()
    }

    pub fn bundled() -> Self {
        Self::parse(DEFAULT_CONFIG).unwrap_or_default()
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        let mut cfg: Config = toml::from_str(contents)?;
        cfg.carousel = cfg.carousel.sanitized();
        Ok(cfg)
    }
}

pub fn parse_hex_color(hex: &str) -> Option<[f32; 4]> {
    let hex = hex.trim_start_matches('#');
    let channel = |i: usize| -> Option<f32> {
        let byte = u8::from_str_radix(hex.get(i..i + 2)?, 16).ok()?;
        Some(byte as f32 / 255.0)
    };
    match hex.len() {
        6 => Some([channel(0)?, channel(2)?, channel(4)?, 1.0]),
        8 => Some([channel(0)?, channel(2)?, channel(4)?, channel(6)?]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── parse_hex_color ─────────────────────────────────────────────────

    #[test]
    fn parse_hex_6_digit() {
        let c = parse_hex_color("#ff0000").unwrap();
        assert!((c[0] - 1.0).abs() < 0.001);
        assert!((c[1]).abs() < 0.001);
        assert!((c[3] - 1.0).abs() < 0.001);
    }

    #[test]
    fn parse_hex_8_digit() {
        let c = parse_hex_color("#ff000080").unwrap();
        assert!((c[3] - 128.0 / 255.0).abs() < 0.01);
    }

    #[test]
    fn parse_hex_invalid() {
        assert!(parse_hex_color("xyz").is_none());
        assert!(parse_hex_color("#gg0000").is_none());
        assert!(parse_hex_color("#fff").is_none());
        assert!(parse_hex_color("").is_none());
    }

    // ── defaults ────────────────────────────────────────────────────────

    #[test]
    fn carousel_defaults_match_documented_values() {
        let c = CarouselConfig::default();
        assert_eq!(c.slide_width, 0.0);
        assert_eq!(c.visible_slides, 0.0);
        assert_eq!(c.gap, 0.0);
        assert_eq!(c.drag_sensitivity, 0.003);
        assert_eq!(c.lerp_factor, 0.1);
        assert_eq!(c.force_power, 5.0);
        assert!(!c.snap);
        assert_eq!(c.snap_align, SnapAlign::Start);
        assert_eq!(c.momentum.power, 1.0);
        assert_eq!(c.momentum.samples, 5);
    }

    #[test]
    fn partial_section_fills_in_defaults() {
        let cfg = Config::parse("[carousel]\ngap = 12.0\nsnap = true\nsnap_align = \"center\"\n").unwrap();
        assert_eq!(cfg.carousel.gap, 12.0);
        assert!(cfg.carousel.snap);
        assert_eq!(cfg.carousel.snap_align, SnapAlign::Center);
        assert_eq!(cfg.carousel.drag_sensitivity, 0.003);
        assert_eq!(cfg.carousel.momentum.samples, 5);
    }

    #[test]
    fn momentum_model_parses() {
        let cfg = Config::parse("[carousel.momentum]\nmodel = \"velocity\"\npower = 2.0\n").unwrap();
        assert_eq!(cfg.carousel.momentum.model, MomentumModel::Velocity);
        assert_eq!(cfg.carousel.momentum.power, 2.0);
    }

    #[test]
    fn unknown_snap_align_is_an_error() {
        assert!(Config::parse("[carousel]\nsnap_align = \"end\"\n").is_err());
    }

    #[test]
    fn bundled_default_parses() {
        assert!(Config::parse(DEFAULT_CONFIG).is_ok());
    }

    #[test]
    fn default_config_round_trips_toml() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let cfg2 = Config::parse(&toml_str).unwrap();
        assert_eq!(cfg.carousel.lerp_factor, cfg2.carousel.lerp_factor);
        assert_eq!(cfg.window.width, cfg2.window.width);
        assert_eq!(cfg.slides.palettes.len(), cfg2.slides.palettes.len());
    }

    // ── sanitized ───────────────────────────────────────────────────────

    #[test]
    fn sanitized_replaces_invalid_values() {
        let cfg = CarouselConfig {
            gap: -4.0,
            drag_sensitivity: 0.0,
            lerp_factor: -1.0,
            force_power: f64::NAN,
            ..CarouselConfig::default()
        }
        .sanitized();
        assert_eq!(cfg.gap, 0.0);
        assert_eq!(cfg.drag_sensitivity, 0.003);
        assert_eq!(cfg.lerp_factor, 0.1);
        assert_eq!(cfg.force_power, 5.0);
    }

    #[test]
    fn sanitized_keeps_valid_values() {
        let cfg = CarouselConfig {
            gap: 64.0,
            visible_slides: 3.7,
            force_power: -2.0,
            ..CarouselConfig::default()
        }
        .sanitized();
        assert_eq!(cfg.gap, 64.0);
        assert_eq!(cfg.visible_slides, 3.7);
        assert_eq!(cfg.force_power, -2.0);
    }

    // ── slides ──────────────────────────────────────────────────────────

    #[test]
    fn corner_colors_cycle_palettes() {
        let slides = SlidesConfig::default();
        let n = slides.palettes.len();
        assert_eq!(slides.corner_colors(0), slides.corner_colors(n));
    }

    #[test]
    fn corner_colors_without_palettes_are_white() {
        let slides = SlidesConfig { palettes: Vec::new(), ..SlidesConfig::default() };
        assert_eq!(slides.corner_colors(3), [[1.0, 1.0, 1.0, 1.0]; 4]);
    }
}
