//! Helpers shared by chart renderers: colors, axis bounds and PNG encoding.

use image::{DynamicImage, ImageOutputFormat, RgbImage};
use omni_common::{OmniError, PriceHistory, Result};
use plotters::style::RGBColor;
use std::io::Cursor;

/// Chart background, Discord's dark theme grey.
pub const BACKGROUND_COLOR: &str = "#2C2F33";
/// Line color when the price rose over the period.
pub const GAIN_COLOR: &str = "#00ff00";
/// Line color when the price fell over the period.
pub const LOSS_COLOR: &str = "#ff0000";
/// Line color for pre-market and after-hours bars.
pub const EXTENDED_HOURS_COLOR: &str = "#888888";

/// Fraction of the price range added above and below the data.
pub const VERTICAL_PADDING: f64 = 0.05;

/// Parse a `#RRGGBB` hex string.
pub fn parse_color(hex: &str) -> Result<RGBColor> {
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(OmniError::validation_field(
            format!("Invalid color '{hex}'"),
            "color",
        ));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|e| {
            OmniError::validation_field(format!("Invalid color '{hex}': {e}"), "color")
        })
    };

    Ok(RGBColor(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Green when the last close is at or above the first, red otherwise.
pub fn trend_color_hex(history: &PriceHistory) -> &'static str {
    match (history.first_close(), history.last_close()) {
        (Some(first), Some(last)) if last < first => LOSS_COLOR,
        _ => GAIN_COLOR,
    }
}

/// Vertical axis range covering every close (and `reference`, when given)
/// with [`VERTICAL_PADDING`] on both sides.
///
/// A flat series still gets a visible range.
pub fn padded_bounds(history: &PriceHistory, reference: Option<f64>) -> Option<(f64, f64)> {
    let (mut low, mut high) = history.close_bounds()?;
    if let Some(value) = reference.filter(|v| v.is_finite()) {
        low = low.min(value);
        high = high.max(value);
    }

    let span = high - low;
    let padding = if span > f64::EPSILON {
        span * VERTICAL_PADDING
    } else {
        (high.abs() * 0.01).max(1.0)
    };

    Some((low - padding, high + padding))
}

/// Encode a raw RGB buffer as PNG.
pub fn encode_png(buffer: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>> {
    let image = RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| OmniError::chart("Chart buffer does not match its dimensions"))?;

    let mut png = Vec::new();
    DynamicImage::ImageRgb8(image)
        .write_to(&mut Cursor::new(&mut png), ImageOutputFormat::Png)
        .map_err(|e| OmniError::chart_with_source("PNG encoding failed", e))?;

    Ok(png)
}
