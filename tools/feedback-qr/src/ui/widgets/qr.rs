//! QR code rendering for terminals and SVG export.

use qrcode::render::{svg, unicode::Dense1x2};
use qrcode::types::QrError;
use qrcode::QrCode;

/// Minimum edge of the exported SVG, in px.
pub const SVG_MIN_SIZE_PX: u32 = 256;

/// How dark modules map onto the terminal's colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    /// Dark modules drawn with the foreground colour. Use on a light background.
    DarkOnLight,
    /// Inverted, for terminals with a dark background.
    LightOnDark,
}

/// Render `payload` with half-block characters, two modules per cell.
pub fn qr_text(payload: &str, palette: Palette) -> Result<String, QrError> {
    let code = QrCode::new(payload.as_bytes())?;
    let mut renderer = code.render::<Dense1x2>();
    if palette == Palette::LightOnDark {
        renderer.dark_color(Dense1x2::Light).light_color(Dense1x2::Dark);
    }
    Ok(renderer.quiet_zone(true).build())
}

/// Render `payload` as a standalone SVG document.
pub fn qr_svg(payload: &str) -> Result<String, QrError> {
    let code = QrCode::new(payload.as_bytes())?;
    Ok(code
        .render::<svg::Color>()
        .min_dimensions(SVG_MIN_SIZE_PX, SVG_MIN_SIZE_PX)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build())
}

/// Terminal cells (columns, rows) taken by `text`.
pub fn text_size(text: &str) -> (u16, u16) {
    let width = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    let height = text.lines().count();
    (
        u16::try_from(width).unwrap_or(u16::MAX),
        u16::try_from(height).unwrap_or(u16::MAX),
    )
}
