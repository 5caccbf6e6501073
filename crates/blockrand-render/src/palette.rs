//! Qualitative treatment colors and annotation contrast.

use plotters::style::{BLACK, RGBColor, WHITE};

/// ColorBrewer "Set1" qualitative palette.
pub const SET1: [RGBColor; 9] = [
    RGBColor(0xE4, 0x1A, 0x1C),
    RGBColor(0x37, 0x7E, 0xB8),
    RGBColor(0x4D, 0xAF, 0x4A),
    RGBColor(0x98, 0x4E, 0xA3),
    RGBColor(0xFF, 0x7F, 0x00),
    RGBColor(0xFF, 0xFF, 0x33),
    RGBColor(0xA6, 0x56, 0x28),
    RGBColor(0xF7, 0x81, 0xBF),
    RGBColor(0x99, 0x99, 0x99),
];

/// Channel sum (each channel in 0..1) below which annotations turn white.
const LIGHTNESS_THRESHOLD: f64 = 1.5;

/// First `count` Set1 colors, cycling past the ninth.
pub fn treatment_palette(count: usize) -> Vec<RGBColor> {
    SET1.iter().copied().cycle().take(count).collect()
}

/// Text color that stays readable on top of `fill`.
pub fn annotation_color(fill: RGBColor) -> RGBColor {
    let RGBColor(r, g, b) = fill;
    let sum = (f64::from(r) + f64::from(g) + f64::from(b)) / 255.0;
    if sum < LIGHTNESS_THRESHOLD { WHITE } else { BLACK }
}
