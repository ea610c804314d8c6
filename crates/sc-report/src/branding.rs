//! Branding image loading.
//!
//! The image is optional. In best-effort mode any failure to read or decode
//! it is logged and the report renders without it.

use std::path::Path;

use tracing::{debug, warn};

use crate::config::BrandingConfig;
use crate::error::{ReportError, Result};

/// Printed width of the branding image in points (2 inches).
pub const BRANDING_WIDTH_PT: f32 = 144.0;
/// Printed height of the branding image in points (1 inch).
pub const BRANDING_HEIGHT_PT: f32 = 72.0;

/// Decoded branding image ready for embedding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandingImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// 8-bit RGB samples, row-major.
    pub rgb: Vec<u8>,
    /// 8-bit alpha samples, present only for images with transparency.
    pub alpha: Option<Vec<u8>>,
}

impl BrandingImage {
    /// Decode a PNG or JPEG file.
    pub fn open(path: &Path) -> std::result::Result<Self, image::ImageError> {
        let decoded = image::open(path)?;
        let (width, height) = (decoded.width(), decoded.height());

        let alpha = if decoded.color().has_alpha() {
            let rgba = decoded.to_rgba8();
            Some(rgba.pixels().map(|p| p.0[3]).collect())
        } else {
            None
        };

        Ok(BrandingImage {
            width,
            height,
            rgb: decoded.to_rgb8().into_raw(),
            alpha,
        })
    }
}

/// Load the configured branding image.
///
/// Returns `Ok(None)` when no path is configured, or when the image is
/// unusable and `required` is off.
pub fn load_branding(config: &BrandingConfig) -> Result<Option<BrandingImage>> {
    let Some(path) = config.path.as_deref() else {
        return Ok(None);
    };

    if !path.is_file() {
        if config.required {
            return Err(ReportError::Asset {
                path: path.to_path_buf(),
                reason: "file not found".to_string(),
            });
        }
        debug!(path = %path.display(), "Branding image not found; rendering without it");
        return Ok(None);
    }

    match BrandingImage::open(path) {
        Ok(img) => {
            debug!(
                path = %path.display(),
                width = img.width,
                height = img.height,
                "Branding image loaded"
            );
            Ok(Some(img))
        }
        Err(e) if config.required => Err(ReportError::Asset {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Branding image unreadable; rendering without it");
            Ok(None)
        }
    }
}
