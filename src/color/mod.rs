//! Color roles, the 8-bit RGBA value type, and text rendering of channels.

pub mod display;
pub mod role;
pub mod tint;

pub use display::DisplayType;
pub use role::{ColorRole, CompositorField, ParseError, RoleFamily, ScalarField};

/// An 8-bit-per-channel color in canonical (COLORREF) channel order.
///
/// `a` is `None` when the source carries no alpha at all (the legacy
/// system-color table). That is not the same thing as `Some(0)`.
///
/// # Examples
///
/// ```
/// use syscolor::color::Rgba;
/// let glass = Rgba::from_argb(0xC0_28_50_A0);
/// assert_eq!((glass.r, glass.g, glass.b, glass.a), (0x28, 0x50, 0xA0, Some(0xC0)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel, if the source has one
    pub a: Option<u8>,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: Option<u8>) -> Self {
        Self { r, g, b, a }
    }

    /// Reads a packed `0xAABBGGRR` value, keeping the top byte as alpha.
    pub fn from_colorref(value: u32) -> Self {
        let [r, g, b, a] = value.to_le_bytes();
        Self::new(r, g, b, Some(a))
    }

    /// Reads a packed `0x00BBGGRR` value from a source with no alpha channel.
    pub fn from_colorref_rgb(value: u32) -> Self {
        let [r, g, b, _] = value.to_le_bytes();
        Self::new(r, g, b, None)
    }

    /// Reads a packed `0xAARRGGBB` value as produced by the DWM color APIs.
    pub fn from_argb(value: u32) -> Self {
        Self::from_colorref(argb_to_colorref(value))
    }
}

/// Converts `0xAARRGGBB` to `0xAABBGGRR`.
///
/// Swaps the red and blue bytes and leaves green and alpha in place, so
/// applying it twice returns the input.
pub const fn argb_to_colorref(argb: u32) -> u32 {
    ((argb & 0x00FF_0000) >> 16) // ______RR
        | (argb & 0x0000_FF00) // ____GG__
        | ((argb & 0x0000_00FF) << 16) // __BB____
        | (argb & 0xFF00_0000) // AA______
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_shuffle_swaps_red_and_blue_bytes() {
        assert_eq!(argb_to_colorref(0xAABB_CCDD), 0xAADD_CCBB);
        assert_eq!(argb_to_colorref(0xFF00_0000), 0xFF00_0000);
        assert_eq!(argb_to_colorref(0x0012_0000), 0x0000_0012);
    }

    #[test]
    fn argb_shuffle_is_an_involution() {
        for value in [0u32, 0xAABB_CCDD, 0x1234_5678, 0xFFFF_FFFF, 0x8000_0001] {
            assert_eq!(argb_to_colorref(argb_to_colorref(value)), value);
        }
    }

    #[test]
    fn from_argb_extracts_channels_in_canonical_order() {
        let color = Rgba::from_argb(0xAABB_CCDD);
        assert_eq!(color, Rgba::new(0xBB, 0xCC, 0xDD, Some(0xAA)));
    }

    #[test]
    fn colorref_rgb_has_no_alpha() {
        let color = Rgba::from_colorref_rgb(0xFF33_2211);
        assert_eq!(color, Rgba::new(0x11, 0x22, 0x33, None));
        assert_eq!(Rgba::from_colorref(0x0033_2211).a, Some(0));
    }
}
