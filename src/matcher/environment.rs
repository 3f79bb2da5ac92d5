//! concrete device environment
//!
//! every field has a default taken from a desktop profile, so a JSON object
//! naming only some fields is a complete environment.

use serde::{Deserialize, Serialize};

use crate::error::EnvironmentError;

/// closed keyword enum with its CSS spelling
macro_rules! keyword_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $keyword:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $keyword)] $variant,)+
        }

        impl $name {
            pub fn keyword(self) -> &'static str {
                match self {
                    $($name::$variant => $keyword,)+
                }
            }
        }
    };
}

keyword_enum!(DeviceMediaType { Screen => "screen", Print => "print" });
keyword_enum!(Hover { None => "none", Hover => "hover" });
keyword_enum!(Pointer { None => "none", Coarse => "coarse", Fine => "fine" });
keyword_enum!(
    /// color gamut band the device reaches
    ColorGamut { NotSrgb => "not-srgb", Srgb => "srgb", P3 => "p3", Rec2020 => "rec2020" }
);
keyword_enum!(Update { None => "none", Slow => "slow", Fast => "fast" });
keyword_enum!(OverflowBlock { None => "none", Scroll => "scroll", Paged => "paged" });
keyword_enum!(OverflowInline { None => "none", Scroll => "scroll" });
keyword_enum!(Scan { Interlace => "interlace", Progressive => "progressive" });
keyword_enum!(EnvironmentBlending {
    Opaque => "opaque",
    Additive => "additive",
    Subtractive => "subtractive",
});
keyword_enum!(DisplayMode {
    Fullscreen => "fullscreen",
    Standalone => "standalone",
    MinimalUi => "minimal-ui",
    Browser => "browser",
    PictureInPicture => "picture-in-picture",
    WindowControlsOverlay => "window-controls-overlay",
});
keyword_enum!(DynamicRange { Standard => "standard", High => "high" });
keyword_enum!(ForcedColors { None => "none", Active => "active" });
keyword_enum!(InvertedColors { None => "none", Inverted => "inverted" });
keyword_enum!(NavControls { None => "none", Back => "back" });
keyword_enum!(ColorScheme { Light => "light", Dark => "dark" });
keyword_enum!(Contrast {
    NoPreference => "no-preference",
    Less => "less",
    More => "more",
    Custom => "custom",
});
keyword_enum!(Reduce { NoPreference => "no-preference", Reduce => "reduce" });
keyword_enum!(Scripting { None => "none", InitialOnly => "initial-only", Enabled => "enabled" });
keyword_enum!(NotMonochrome { NotMonochrome => "not-monochrome" });
keyword_enum!(NoColorIndex { None => "none" });

/// bits per pixel of a monochrome frame buffer, or `"not-monochrome"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Monochrome {
    Bits(u32),
    Keyword(NotMonochrome),
}

/// color lookup table size, or `"none"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorIndex {
    Count(u32),
    Keyword(NoColorIndex),
}

impl Monochrome {
    /// `not-monochrome` reads as zero bits
    pub fn as_number(self) -> f64 {
        match self {
            Monochrome::Bits(bits) => f64::from(bits),
            Monochrome::Keyword(_) => 0.0,
        }
    }
}

impl ColorIndex {
    /// `none` reads as zero entries
    pub fn as_number(self) -> f64 {
        match self {
            ColorIndex::Count(count) => f64::from(count),
            ColorIndex::Keyword(_) => 0.0,
        }
    }
}

/// everything the matcher needs to know about one device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Environment {
    pub media_type: DeviceMediaType,
    pub any_hover: Hover,
    pub hover: Hover,
    pub any_pointer: Pointer,
    pub pointer: Pointer,
    pub color_gamut: ColorGamut,
    pub video_color_gamut: ColorGamut,
    pub grid: bool,
    pub update: Update,
    pub overflow_block: OverflowBlock,
    pub overflow_inline: OverflowInline,
    pub scan: Scan,
    pub environment_blending: EnvironmentBlending,
    pub display_mode: DisplayMode,
    pub dynamic_range: DynamicRange,
    pub video_dynamic_range: DynamicRange,
    pub forced_colors: ForcedColors,
    pub inverted_colors: InvertedColors,
    pub nav_controls: NavControls,
    pub prefers_color_scheme: ColorScheme,
    pub prefers_contrast: Contrast,
    pub prefers_reduced_data: Reduce,
    pub prefers_reduced_motion: Reduce,
    pub prefers_reduced_transparency: Reduce,
    pub scripting: Scripting,
    /// viewport size in px
    pub width_px: f64,
    pub height_px: f64,
    /// screen size in px
    pub device_width_px: f64,
    pub device_height_px: f64,
    /// device pixels per CSS px
    pub dppx: f64,
    pub monochrome_bits: Monochrome,
    /// bits per color component
    pub color_bits: u32,
    pub color_index: ColorIndex,
    pub horizontal_viewport_segments: u32,
    pub vertical_viewport_segments: u32,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            media_type: DeviceMediaType::Screen,
            any_hover: Hover::Hover,
            hover: Hover::Hover,
            any_pointer: Pointer::Fine,
            pointer: Pointer::Fine,
            color_gamut: ColorGamut::Srgb,
            video_color_gamut: ColorGamut::Srgb,
            grid: false,
            update: Update::Fast,
            overflow_block: OverflowBlock::Scroll,
            overflow_inline: OverflowInline::Scroll,
            scan: Scan::Progressive,
            environment_blending: EnvironmentBlending::Opaque,
            display_mode: DisplayMode::Browser,
            dynamic_range: DynamicRange::Standard,
            video_dynamic_range: DynamicRange::Standard,
            forced_colors: ForcedColors::None,
            inverted_colors: InvertedColors::None,
            nav_controls: NavControls::Back,
            prefers_color_scheme: ColorScheme::Light,
            prefers_contrast: Contrast::NoPreference,
            prefers_reduced_data: Reduce::NoPreference,
            prefers_reduced_motion: Reduce::NoPreference,
            prefers_reduced_transparency: Reduce::NoPreference,
            scripting: Scripting::Enabled,
            width_px: 1920.0,
            height_px: 1080.0,
            device_width_px: 1920.0,
            device_height_px: 1080.0,
            dppx: 1.0,
            monochrome_bits: Monochrome::Keyword(NotMonochrome::NotMonochrome),
            color_bits: 8,
            color_index: ColorIndex::Keyword(NoColorIndex::None),
            horizontal_viewport_segments: 1,
            vertical_viewport_segments: 1,
        }
    }
}

fn check_length(field: &'static str, value: f64) -> Result<(), EnvironmentError> {
    if !value.is_finite() {
        return Err(EnvironmentError::invalid(field, format!("{} is not finite", value)));
    }
    if value < 0.0 {
        return Err(EnvironmentError::invalid(field, format!("{} is negative", value)));
    }
    Ok(())
}

impl Environment {
    /// parse a (possibly partial) JSON environment and validate it
    pub fn from_json(json: &str) -> Result<Self, EnvironmentError> {
        let env: Environment =
            serde_json::from_str(json).map_err(|e| EnvironmentError::Json(e.to_string()))?;
        env.validate()?;
        Ok(env)
    }

    /// reject values outside their declared domain
    pub fn validate(&self) -> Result<(), EnvironmentError> {
        check_length("widthPx", self.width_px)?;
        check_length("heightPx", self.height_px)?;
        check_length("deviceWidthPx", self.device_width_px)?;
        check_length("deviceHeightPx", self.device_height_px)?;

        if self.dppx.is_nan() || self.dppx <= 0.0 {
            return Err(EnvironmentError::invalid(
                "dppx",
                format!("{} is not a positive number", self.dppx),
            ));
        }
        Ok(())
    }

    /// the keyword a discrete feature currently has
    pub fn keyword(&self, feature: &str) -> Option<&'static str> {
        let keyword = match feature {
            "any-hover" => self.any_hover.keyword(),
            "hover" => self.hover.keyword(),
            "any-pointer" => self.any_pointer.keyword(),
            "pointer" => self.pointer.keyword(),
            "update" => self.update.keyword(),
            "overflow-block" => self.overflow_block.keyword(),
            "overflow-inline" => self.overflow_inline.keyword(),
            "scan" => self.scan.keyword(),
            "environment-blending" => self.environment_blending.keyword(),
            "display-mode" => self.display_mode.keyword(),
            "dynamic-range" => self.dynamic_range.keyword(),
            "video-dynamic-range" => self.video_dynamic_range.keyword(),
            "forced-colors" => self.forced_colors.keyword(),
            "inverted-colors" => self.inverted_colors.keyword(),
            "nav-controls" => self.nav_controls.keyword(),
            "prefers-color-scheme" => self.prefers_color_scheme.keyword(),
            "prefers-contrast" => self.prefers_contrast.keyword(),
            "prefers-reduced-data" => self.prefers_reduced_data.keyword(),
            "prefers-reduced-motion" => self.prefers_reduced_motion.keyword(),
            "prefers-reduced-transparency" => self.prefers_reduced_transparency.keyword(),
            "scripting" => self.scripting.keyword(),
            _ => return None,
        };
        Some(keyword)
    }

    /// the numeric value of a range feature, in canonical units
    pub fn number(&self, feature: &str) -> Option<f64> {
        let value = match feature {
            "width" => self.width_px,
            "height" => self.height_px,
            "device-width" => self.device_width_px,
            "device-height" => self.device_height_px,
            "resolution" => self.dppx,
            "color" => f64::from(self.color_bits),
            "color-index" => self.color_index.as_number(),
            "monochrome" => self.monochrome_bits.as_number(),
            "horizontal-viewport-segments" => f64::from(self.horizontal_viewport_segments),
            "vertical-viewport-segments" => f64::from(self.vertical_viewport_segments),
            _ => return None,
        };
        Some(value)
    }

    /// gamut band index: 0 below sRGB, 1 sRGB, 2 P3, 3 Rec.2020
    pub fn gamut_band(&self, feature: &str) -> Option<usize> {
        let gamut = match feature {
            "color-gamut" => self.color_gamut,
            "video-color-gamut" => self.video_color_gamut,
            _ => return None,
        };
        Some(match gamut {
            ColorGamut::NotSrgb => 0,
            ColorGamut::Srgb => 1,
            ColorGamut::P3 => 2,
            ColorGamut::Rec2020 => 3,
        })
    }
}
