//! Chart color palette.
//!
//! Nine fixed colors are assigned by index; slices beyond the palette get
//! procedurally generated colors from a seeded generator, so the same slice
//! count always yields the same colors.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Ordered professional palette.
pub const PALETTE: [&str; 9] = [
    "#118DFF", // blue
    "#10B981", // green
    "#F59E0B", // amber
    "#EF4444", // red
    "#8B5CF6", // purple
    "#06B6D4", // cyan
    "#F97316", // orange
    "#EC4899", // pink
    "#6B7280", // gray
];

/// Seed for overflow colors.
pub const OVERFLOW_SEED: u64 = 0x4153_4B44_4154_4131;

/// Accent used for tooltip borders.
pub const ACCENT: &str = PALETTE[0];

/// White used for slice separators and point borders.
pub const WHITE: &str = "#FFFFFF";

/// Palette color for dataset/slice `index`, cycling.
pub fn color_for(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// One color per slice: the palette first, then generated colors.
pub fn slice_colors(count: usize) -> Vec<String> {
    let mut colors: Vec<String> = PALETTE.iter().take(count).map(|c| c.to_string()).collect();
    if count > PALETTE.len() {
        let mut rng = StdRng::seed_from_u64(OVERFLOW_SEED);
        colors.extend((PALETTE.len()..count).map(|_| generated_color(&mut rng)));
    }
    colors
}

/// Hue anywhere, saturation 60-90%, lightness 45-65%.
fn generated_color(rng: &mut StdRng) -> String {
    let hue = rng.gen_range(0..360);
    let saturation = rng.gen_range(60..90);
    let lightness = rng.gen_range(45..65);
    hsl_to_hex(hue, saturation, lightness)
}

/// Convert HSL (degrees, percent, percent) to `#rrggbb`.
pub fn hsl_to_hex(hue: u32, saturation: u32, lightness: u32) -> String {
    let h = (hue % 360) as f64;
    let s = saturation.min(100) as f64 / 100.0;
    let l = lightness.min(100) as f64 / 100.0;

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match hue % 360 {
        0..=59 => (c, x, 0.0),
        60..=119 => (x, c, 0.0),
        120..=179 => (0.0, c, x),
        180..=239 => (0.0, x, c),
        240..=299 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    format!("#{:02x}{:02x}{:02x}", channel(r), channel(g), channel(b))
}

/// `#RRGGBB` plus an opacity fraction as `rgba(r, g, b, a)`.
///
/// Anything that is not a six-digit hex color is returned unchanged.
pub fn with_opacity(color: &str, opacity: f64) -> String {
    match parse_hex(color) {
        Some((r, g, b)) => format!("rgba({}, {}, {}, {})", r, g, b, opacity),
        None => {
            tracing::debug!("[ChartPalette] Cannot apply opacity to '{}'", color);
            color.to_string()
        }
    }
}

fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
