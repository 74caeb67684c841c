use std::str::FromStr;

use palette::Srgb;

// ---------------------------------------------------------------------------
// Default measurement colours
// ---------------------------------------------------------------------------

/// Colours assigned to measurements in import order, cycling when the row
/// count exceeds the palette.
pub const DEFAULT_COLORS: [&str; 8] = [
    "#22d3ee", // cyan
    "#f87171", // red
    "#4ade80", // green
    "#facc15", // yellow
    "#a78bfa", // violet
    "#fb923c", // orange
    "#f472b6", // pink
    "#60a5fa", // blue
];

/// Default colour for the measurement at the given 0-based ordinal.
pub fn default_color(ordinal: usize) -> &'static str {
    DEFAULT_COLORS[ordinal % DEFAULT_COLORS.len()]
}

/// Whether `value` is a `#rrggbb` hex colour. Used when restoring
/// measurements from a project file, where a colour that does not parse is
/// treated as missing.
pub fn is_valid_hex(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && Srgb::<u8>::from_str(hex).is_ok())
}
