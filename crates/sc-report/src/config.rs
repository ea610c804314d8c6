//! Report configuration types.
//!
//! Only cosmetic settings live here. The catalogs, the table layout and the
//! section order are fixed.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ReportError, Result};

/// Colours used for headings and table headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTheme {
    /// Accent colour (`#RRGGBB`) for section titles and table headers.
    #[serde(default = "default_accent")]
    pub accent: String,
    /// Footer text colour (`#RRGGBB`).
    #[serde(default = "default_muted")]
    pub muted: String,
}

fn default_accent() -> String {
    "#F7931E".to_string()
}

fn default_muted() -> String {
    "#808080".to_string()
}

impl Default for ReportTheme {
    fn default() -> Self {
        Self {
            accent: default_accent(),
            muted: default_muted(),
        }
    }
}

impl ReportTheme {
    /// Accent colour as RGB components in `0.0..=1.0`.
    pub fn accent_rgb(&self) -> Result<[f32; 3]> {
        parse_hex_color(&self.accent)
    }

    /// Muted colour as RGB components in `0.0..=1.0`.
    pub fn muted_rgb(&self) -> Result<[f32; 3]> {
        parse_hex_color(&self.muted)
    }
}

/// Parse `#RRGGBB` into RGB components.
pub fn parse_hex_color(hex: &str) -> Result<[f32; 3]> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ReportError::InvalidConfig(format!(
            "colour must be #RRGGBB, got {:?}",
            hex
        )));
    }
    let mut rgb = [0.0f32; 3];
    for (i, slot) in rgb.iter_mut().enumerate() {
        let byte = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16)
            .map_err(|e| ReportError::InvalidConfig(e.to_string()))?;
        *slot = f32::from(byte) / 255.0;
    }
    Ok(rgb)
}

/// Page margins in points (1 inch = 72 points). The page is always A4.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default = "default_margin_top")]
    pub margin_top: f32,
    #[serde(default = "default_margin_bottom")]
    pub margin_bottom: f32,
    #[serde(default = "default_margin_side")]
    pub margin_left: f32,
    #[serde(default = "default_margin_side")]
    pub margin_right: f32,
}

fn default_margin_top() -> f32 {
    57.6
}

fn default_margin_bottom() -> f32 {
    72.0
}

fn default_margin_side() -> f32 {
    36.0
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            margin_top: default_margin_top(),
            margin_bottom: default_margin_bottom(),
            margin_left: default_margin_side(),
            margin_right: default_margin_side(),
        }
    }
}

/// Optional branding image shown above the title.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandingConfig {
    /// PNG or JPEG file. `None` renders without an image.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Fail the render when the image cannot be read or decoded.
    ///
    /// Off by default: a missing image only drops the image block.
    #[serde(default)]
    pub required: bool,
}

/// Complete report configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Schema version.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    /// Colours.
    #[serde(default)]
    pub theme: ReportTheme,
    /// Margins.
    #[serde(default)]
    pub page: PageConfig,
    /// Branding image.
    #[serde(default)]
    pub branding: BrandingConfig,
    /// System name printed after the generation timestamp.
    #[serde(default = "default_system_name")]
    pub system_name: String,
    /// Flate-compress page content streams.
    #[serde(default = "default_true")]
    pub compress_streams: bool,
    /// Print "Página N de M" at the bottom of every page.
    #[serde(default = "default_true")]
    pub page_numbers: bool,
}

fn default_schema_version() -> String {
    "1.0.0".to_string()
}

fn default_system_name() -> String {
    "Sistema Rezende Energia".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            theme: ReportTheme::default(),
            page: PageConfig::default(),
            branding: BrandingConfig::default(),
            system_name: default_system_name(),
            compress_streams: true,
            page_numbers: true,
        }
    }
}

impl ReportConfig {
    /// Create a new report configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the branding image path.
    pub fn with_branding(mut self, path: impl Into<PathBuf>) -> Self {
        self.branding.path = Some(path.into());
        self
    }

    /// Make a missing or unreadable branding image an error.
    pub fn with_branding_required(mut self, required: bool) -> Self {
        self.branding.required = required;
        self
    }

    /// Enable or disable content stream compression.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress_streams = compress;
        self
    }

    /// Enable or disable page numbers.
    pub fn with_page_numbers(mut self, enabled: bool) -> Self {
        self.page_numbers = enabled;
        self
    }

    /// Set the system name in the footer.
    pub fn with_system_name(mut self, name: impl Into<String>) -> Self {
        self.system_name = name.into();
        self
    }

    /// Check colours and margins.
    pub fn validate(&self) -> Result<()> {
        self.theme.accent_rgb()?;
        self.theme.muted_rgb()?;

        let p = &self.page;
        let margins = [p.margin_top, p.margin_bottom, p.margin_left, p.margin_right];
        if margins.iter().any(|m| !m.is_finite() || *m < 0.0) {
            return Err(ReportError::InvalidConfig(
                "page margins must be non-negative".to_string(),
            ));
        }
        if p.margin_left + p.margin_right > 400.0 || p.margin_top + p.margin_bottom > 600.0 {
            return Err(ReportError::InvalidConfig(
                "page margins leave no room for content".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from JSON.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
