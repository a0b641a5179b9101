//! OS color sources.
//!
//! Everything that talks to the operating system goes through [`ColorSource`],
//! so the resolver and the measure lifecycle can be driven by mocks in tests.
//! On Windows the real implementation loads `dwmapi.dll` and `uxtheme.dll`;
//! elsewhere a stub reports every source as unavailable.

use std::sync::Arc;
use thiserror::Error;

#[cfg(not(windows))]
mod stub;
#[cfg(windows)]
mod win32;

/// Which optional color sources exist in this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CapabilitySet {
    /// Legacy system-color table. Always present on Windows.
    pub legacy: bool,
    /// `DwmGetColorizationParameters` (dwmapi.dll, ordinal 127) resolved.
    pub compositor_parameters: bool,
    /// `GetUserColorPreference` (uxtheme.dll) resolved and the OS is Windows 10+.
    pub accent: bool,
}

impl CapabilitySet {
    /// Nothing but the legacy table.
    pub const LEGACY_ONLY: Self = Self {
        legacy: true,
        compositor_parameters: false,
        accent: false,
    };

    /// Every source present.
    pub const ALL: Self = Self {
        legacy: true,
        compositor_parameters: true,
        accent: true,
    };
}

/// Layout of the record filled in by `DwmGetColorizationParameters`.
///
/// Both colors are packed `0xAARRGGBB`, unlike a COLORREF.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorizationParameters {
    pub color: u32,
    pub afterglow: u32,
    pub color_balance: u32,
    pub afterglow_balance: u32,
    pub blur_balance: u32,
    pub glass_reflection_intensity: u32,
    pub opaque_blend: i32,
}

/// Layout of the record filled in by `GetUserColorPreference`.
///
/// Both colors are COLORREFs with alpha in the top byte. `color2` is the
/// accent.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImmersiveColorPreference {
    pub color1: u32,
    pub color2: u32,
}

/// Result of `DwmGetColorizationColor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlassColor {
    /// Packed `0xAARRGGBB`.
    pub argb: u32,
    pub opaque: bool,
}

/// Errors raised by an OS color query.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{0} is not available")]
    Unavailable(&'static str),

    #[error("{call} failed (HRESULT {code:#010X})")]
    CallFailed { call: &'static str, code: u32 },

    #[error("System color index {0} is not supported")]
    UnsupportedIndex(i32),
}

/// Access to the OS color sources.
pub trait ColorSource: Send + Sync {
    /// Which optional entry points were found when the source was acquired.
    fn capabilities(&self) -> CapabilitySet;

    /// Packed `0x00BBGGRR` value of a legacy system color.
    fn legacy_color(&self, index: i32) -> Result<u32, SourceError>;

    /// Whether desktop composition is enabled.
    fn composition_enabled(&self) -> Result<bool, SourceError>;

    /// Windows 7 glass color.
    fn glass_color(&self) -> Result<GlassColor, SourceError>;

    /// The undocumented colorization parameters record.
    fn colorization_parameters(&self) -> Result<ColorizationParameters, SourceError>;

    /// Theme color preference holding the accent color.
    fn accent_preference(
        &self,
        force_reload: bool,
    ) -> Result<ImmersiveColorPreference, SourceError>;
}

/// Acquires a [`ColorSource`]. Dropping the returned source releases whatever
/// the loader acquired.
pub trait SourceLoader: Send + Sync {
    fn load(&self) -> Arc<dyn ColorSource>;
}

/// Loads the real OS libraries for the current platform.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLoader;

impl SourceLoader for SystemLoader {
    fn load(&self) -> Arc<dyn ColorSource> {
        #[cfg(windows)]
        {
            Arc::new(win32::WindowsSource::acquire())
        }
        #[cfg(not(windows))]
        {
            Arc::new(stub::UnavailableSource)
        }
    }
}
