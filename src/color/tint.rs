//! Windows 8 window color simulation.
//!
//! Windows 8 paints window frames by mixing the colorization color with a
//! light gray base. The colorization balance is the percentage of the
//! colorization color kept; the rest of each channel moves toward the base.

use super::Rgba;

/// Gray level every channel blends toward.
pub const WINDOW_BASE: u8 = 217;

/// Blends one channel toward [`WINDOW_BASE`] by `(100 - balance) / 100`.
pub fn blend_channel(channel: u8, balance: u32) -> u8 {
    let channel = f64::from(channel);
    let weight = (100.0 - f64::from(balance)) / 100.0;
    let blended = (channel + (f64::from(WINDOW_BASE) - channel) * weight).round();
    blended.clamp(0.0, 255.0) as u8
}

/// Applies [`blend_channel`] to red, green and blue. Alpha is kept as-is.
pub fn window_tint(color: Rgba, balance: u32) -> Rgba {
    Rgba {
        r: blend_channel(color.r, balance),
        g: blend_channel(color.g, balance),
        b: blend_channel(color.b, balance),
        a: color.a,
    }
}
