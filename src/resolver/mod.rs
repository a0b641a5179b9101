//! Color resolution: role -> source -> normalized RGBA -> rendered text.
//!
//! Nothing here is cached. Every call queries the OS again, so the text
//! follows theme changes on the host's next update.

use crate::color::{
    ColorRole, CompositorField, DisplayType, Rgba, RoleFamily, ScalarField, display, tint,
};
use crate::platform::{CapabilitySet, ColorSource, ColorizationParameters, SourceError};
use thiserror::Error;

#[cfg(test)]
mod tests;

/// Outcome of a successful resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    Color(Rgba),
    /// Raw compositor tuning value; not a color.
    Scalar(i64),
}

/// Reasons a resolution produced no value.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("No valid color type configured")]
    InvalidRole,

    #[error("{0} is not available on this system")]
    MissingCapability(&'static str),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("{role} has no {} channel to display", .display.name())]
    ChannelUnavailable {
        role: ColorRole,
        display: DisplayType,
    },
}

/// Text handed back to the host together with its status code.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub text: String,
    pub status: f64,
}

impl Measurement {
    pub const SUCCESS: f64 = 1.0;
    pub const NO_VALUE: f64 = -1.0;

    pub fn value(text: String) -> Self {
        Self {
            text,
            status: Self::SUCCESS,
        }
    }

    pub fn no_value() -> Self {
        Self {
            text: String::new(),
            status: Self::NO_VALUE,
        }
    }

    pub fn is_value(&self) -> bool {
        self.status > 0.0
    }
}

impl From<Result<String, ResolveError>> for Measurement {
    fn from(result: Result<String, ResolveError>) -> Self {
        match result {
            Ok(text) if !text.is_empty() => Self::value(text),
            Ok(_) => Self::no_value(),
            Err(e) => {
                log::debug!("No value: {}", e);
                Self::no_value()
            }
        }
    }
}

/// Resolves roles against one color source and its capability set.
pub struct Resolver<'a> {
    source: &'a dyn ColorSource,
    capabilities: CapabilitySet,
}

impl<'a> Resolver<'a> {
    pub fn new(source: &'a dyn ColorSource, capabilities: CapabilitySet) -> Self {
        Self {
            source,
            capabilities,
        }
    }

    /// Fetches and normalizes the value behind `role`.
    pub fn resolve(&self, role: ColorRole) -> Result<Resolved, ResolveError> {
        match role.family() {
            RoleFamily::Invalid => Err(ResolveError::InvalidRole),
            RoleFamily::Accent => self.accent().map(Resolved::Color),
            RoleFamily::Glass => self.glass().map(Resolved::Color),
            RoleFamily::Compositor(field) => self.compositor(field),
            RoleFamily::Legacy(index) => self.legacy(index).map(Resolved::Color),
        }
    }

    /// Resolves `role` and renders it for `display`.
    ///
    /// Scalar roles ignore `display` and `hex` and always render as a decimal
    /// integer.
    pub fn render(
        &self,
        role: ColorRole,
        display: DisplayType,
        hex: bool,
    ) -> Result<String, ResolveError> {
        match self.resolve(role)? {
            Resolved::Scalar(value) => Ok(value.to_string()),
            Resolved::Color(color) => display::render(color, display, hex)
                .ok_or(ResolveError::ChannelUnavailable { role, display }),
        }
    }

    /// [`render`](Self::render) folded into the host's text/status pair.
    pub fn measure(&self, role: ColorRole, display: DisplayType, hex: bool) -> Measurement {
        self.render(role, display, hex).into()
    }

    fn accent(&self) -> Result<Rgba, ResolveError> {
        if !self.capabilities.accent {
            return Err(ResolveError::MissingCapability("GetUserColorPreference"));
        }

        let preference = self.source.accent_preference(false)?;
        Ok(Rgba::from_colorref(preference.color2))
    }

    fn glass(&self) -> Result<Rgba, ResolveError> {
        let glass = self.source.glass_color()?;
        Ok(Rgba::from_argb(glass.argb))
    }

    fn colorization_parameters(&self) -> Result<ColorizationParameters, ResolveError> {
        if !self.capabilities.compositor_parameters {
            return Err(ResolveError::MissingCapability(
                "DwmGetColorizationParameters",
            ));
        }

        // Only the call's success matters; parameters are readable either way.
        self.source.composition_enabled()?;
        Ok(self.source.colorization_parameters()?)
    }

    fn compositor(&self, field: CompositorField) -> Result<Resolved, ResolveError> {
        let params = self.colorization_parameters()?;

        let resolved = match field {
            CompositorField::ColorizationColor => Resolved::Color(Rgba::from_argb(params.color)),
            CompositorField::AfterglowColor => Resolved::Color(Rgba::from_argb(params.afterglow)),
            CompositorField::WindowTint => Resolved::Color(tint::window_tint(
                Rgba::from_argb(params.color),
                params.color_balance,
            )),
            CompositorField::Scalar(scalar) => Resolved::Scalar(scalar_value(&params, scalar)),
        };
        Ok(resolved)
    }

    fn legacy(&self, index: i32) -> Result<Rgba, ResolveError> {
        if !self.capabilities.legacy {
            return Err(ResolveError::MissingCapability("GetSysColorBrush"));
        }

        let packed = self.source.legacy_color(index)?;
        Ok(Rgba::from_colorref_rgb(packed))
    }
}

fn scalar_value(params: &ColorizationParameters, field: ScalarField) -> i64 {
    match field {
        ScalarField::ColorBalance => i64::from(params.color_balance),
        ScalarField::AfterglowBalance => i64::from(params.afterglow_balance),
        ScalarField::BlurBalance => i64::from(params.blur_balance),
        ScalarField::GlassReflectionIntensity => i64::from(params.glass_reflection_intensity),
        ScalarField::OpaqueBlend => i64::from(params.opaque_blend),
    }
}

/// Resolves a role straight into the host's text/status pair.
///
/// Every failure, whatever its cause, becomes an empty string with status
/// `-1.0`; hosts treat that as "temporarily unavailable" and try again on
/// their next update.
pub fn resolve(
    role: ColorRole,
    display: DisplayType,
    hex: bool,
    source: &dyn ColorSource,
    capabilities: CapabilitySet,
) -> Measurement {
    Resolver::new(source, capabilities).measure(role, display, hex)
}
