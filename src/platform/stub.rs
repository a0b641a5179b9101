//! Stub source for non-Windows platforms.
//!
//! None of the color sources exist outside Windows, so every query fails and
//! every resolution ends up as "no value".

use super::{
    CapabilitySet, ColorSource, ColorizationParameters, GlassColor, ImmersiveColorPreference,
    SourceError,
};

#[derive(Debug, Default)]
pub struct UnavailableSource;

impl ColorSource for UnavailableSource {
    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::LEGACY_ONLY
    }

    fn legacy_color(&self, _index: i32) -> Result<u32, SourceError> {
        Err(SourceError::Unavailable("GetSysColorBrush"))
    }

    fn composition_enabled(&self) -> Result<bool, SourceError> {
        Err(SourceError::Unavailable("DwmIsCompositionEnabled"))
    }

    fn glass_color(&self) -> Result<GlassColor, SourceError> {
        Err(SourceError::Unavailable("DwmGetColorizationColor"))
    }

    fn colorization_parameters(&self) -> Result<ColorizationParameters, SourceError> {
        Err(SourceError::Unavailable("DwmGetColorizationParameters"))
    }

    fn accent_preference(
        &self,
        _force_reload: bool,
    ) -> Result<ImmersiveColorPreference, SourceError> {
        Err(SourceError::Unavailable("GetUserColorPreference"))
    }
}
