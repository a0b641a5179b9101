//! Symbolic color roles and the table that maps configuration text onto them.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A logical UI color the resolver knows how to look up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorRole {
    /// Configuration text did not name a known role.
    Invalid,

    // Legacy system-color table (`GetSysColor` indices)
    Scrollbar,
    Desktop,
    ActiveCaption,
    InactiveCaption,
    Menu,
    Window,
    WindowFrame,
    MenuText,
    WindowText,
    CaptionText,
    ActiveBorder,
    InactiveBorder,
    AppWorkspace,
    Highlight,
    HighlightText,
    ButtonFace,
    ButtonShadow,
    GrayText,
    ButtonText,
    InactiveCaptionText,
    ButtonHighlight,
    DarkShadow3d,
    Light3d,
    TooltipText,
    TooltipBackground,
    Hyperlink,
    ActiveCaptionGradient,
    InactiveCaptionGradient,
    MenuHighlight,
    MenuBar,

    /// Windows 7 glass color (`DwmGetColorizationColor`).
    Aero,

    /// Windows 10/11 accent color (`GetUserColorPreference`).
    Accent,

    // Raw values from the undocumented `DwmGetColorizationParameters`
    /// Window color as Windows 8 derives it from the colorization color.
    Win8Window,
    DwmColorizationColor,
    DwmAfterglowColor,
    DwmColorBalance,
    DwmAfterglowBalance,
    DwmBlurBalance,
    DwmGlassReflectionIntensity,
    DwmOpaqueBlend,
}

/// Which OS source backs a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleFamily {
    Invalid,
    /// Index into the legacy system-color table.
    Legacy(i32),
    Glass,
    Accent,
    Compositor(CompositorField),
}

/// Field of the colorization parameters record a compositor role reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositorField {
    /// Colorization color blended toward the Windows 8 window base.
    WindowTint,
    ColorizationColor,
    AfterglowColor,
    Scalar(ScalarField),
}

/// Integer tuning parameters that are reported as-is rather than as colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarField {
    ColorBalance,
    AfterglowBalance,
    BlurBalance,
    GlassReflectionIntensity,
    OpaqueBlend,
}

/// Error raised when configuration text names no known role or display type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown ColorType: {0}")]
    UnknownColorType(String),

    #[error("Unknown DisplayType: {0}")]
    UnknownDisplayType(String),
}

/// Accepted `ColorType` names, in documentation order. Lookups ignore case.
const ROLE_NAMES: &[(&str, ColorRole)] = &[
    ("SCROLLBAR", ColorRole::Scrollbar),
    ("DESKTOP", ColorRole::Desktop),
    ("ACTIVECAPTION", ColorRole::ActiveCaption),
    ("INACTIVECAPTION", ColorRole::InactiveCaption),
    ("MENU", ColorRole::Menu),
    ("WINDOW", ColorRole::Window),
    ("WINDOWFRAME", ColorRole::WindowFrame),
    ("MENUTEXT", ColorRole::MenuText),
    ("WINDOWTEXT", ColorRole::WindowText),
    ("CAPTIONTEXT", ColorRole::CaptionText),
    ("ACTIVEBORDER", ColorRole::ActiveBorder),
    ("INACTIVEBORDER", ColorRole::InactiveBorder),
    ("APPWORKSPACE", ColorRole::AppWorkspace),
    ("HIGHLIGHT", ColorRole::Highlight),
    ("HIGHLIGHTTEXT", ColorRole::HighlightText),
    ("BUTTONFACE", ColorRole::ButtonFace),
    ("BUTTONSHADOW", ColorRole::ButtonShadow),
    ("GRAYTEXT", ColorRole::GrayText),
    ("BUTTONTEXT", ColorRole::ButtonText),
    ("INACTIVECAPTIONTEXT", ColorRole::InactiveCaptionText),
    ("BUTTONHIGHLIGHT", ColorRole::ButtonHighlight),
    ("3DDARKSHADOW", ColorRole::DarkShadow3d),
    ("3DLIGHT", ColorRole::Light3d),
    ("TOOLTIPTEXT", ColorRole::TooltipText),
    ("TOOLTIPBACKGROUND", ColorRole::TooltipBackground),
    ("HYPERLINK", ColorRole::Hyperlink),
    ("ACTIVECAPTIONGRADIENT", ColorRole::ActiveCaptionGradient),
    (
        "INACTIVECAPTIONGRADIENT",
        ColorRole::InactiveCaptionGradient,
    ),
    ("MENUHIGHLIGHT", ColorRole::MenuHighlight),
    ("MENUBAR", ColorRole::MenuBar),
    ("AERO", ColorRole::Aero),
    ("ACCENT", ColorRole::Accent),
    ("WIN8", ColorRole::Win8Window),
    ("DWM_COLOR", ColorRole::DwmColorizationColor),
    ("DWM_AFTERGLOW_COLOR", ColorRole::DwmAfterglowColor),
    ("DWM_COLOR_BALANCE", ColorRole::DwmColorBalance),
    ("DWM_AFTERGLOW_BALANCE", ColorRole::DwmAfterglowBalance),
    ("DWM_BLUR_BALANCE", ColorRole::DwmBlurBalance),
    (
        "DWM_GLASS_REFLECTION_INTENSITY",
        ColorRole::DwmGlassReflectionIntensity,
    ),
    ("DWM_OPAQUE_BLEND", ColorRole::DwmOpaqueBlend),
];

impl ColorRole {
    /// Looks up a role by its configuration name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        ROLE_NAMES
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, role)| *role)
    }

    /// Canonical configuration name, or `"INVALID"`.
    pub fn name(self) -> &'static str {
        ROLE_NAMES
            .iter()
            .find(|(_, role)| *role == self)
            .map(|(name, _)| *name)
            .unwrap_or("INVALID")
    }

    /// Every role that can be named in configuration.
    pub fn all() -> impl Iterator<Item = ColorRole> {
        ROLE_NAMES.iter().map(|(_, role)| *role)
    }

    /// Returns the OS source family that backs this role.
    pub fn family(self) -> RoleFamily {
        use ColorRole::*;
        use CompositorField as F;

        match self {
            Invalid => RoleFamily::Invalid,
            Scrollbar => RoleFamily::Legacy(0),
            Desktop => RoleFamily::Legacy(1),
            ActiveCaption => RoleFamily::Legacy(2),
            InactiveCaption => RoleFamily::Legacy(3),
            Menu => RoleFamily::Legacy(4),
            Window => RoleFamily::Legacy(5),
            WindowFrame => RoleFamily::Legacy(6),
            MenuText => RoleFamily::Legacy(7),
            WindowText => RoleFamily::Legacy(8),
            CaptionText => RoleFamily::Legacy(9),
            ActiveBorder => RoleFamily::Legacy(10),
            InactiveBorder => RoleFamily::Legacy(11),
            AppWorkspace => RoleFamily::Legacy(12),
            Highlight => RoleFamily::Legacy(13),
            HighlightText => RoleFamily::Legacy(14),
            ButtonFace => RoleFamily::Legacy(15),
            ButtonShadow => RoleFamily::Legacy(16),
            GrayText => RoleFamily::Legacy(17),
            ButtonText => RoleFamily::Legacy(18),
            InactiveCaptionText => RoleFamily::Legacy(19),
            ButtonHighlight => RoleFamily::Legacy(20),
            DarkShadow3d => RoleFamily::Legacy(21),
            Light3d => RoleFamily::Legacy(22),
            TooltipText => RoleFamily::Legacy(23),
            TooltipBackground => RoleFamily::Legacy(24),
            // 25 is unused by the system-color table
            Hyperlink => RoleFamily::Legacy(26),
            ActiveCaptionGradient => RoleFamily::Legacy(27),
            InactiveCaptionGradient => RoleFamily::Legacy(28),
            MenuHighlight => RoleFamily::Legacy(29),
            MenuBar => RoleFamily::Legacy(30),
            Aero => RoleFamily::Glass,
            Accent => RoleFamily::Accent,
            Win8Window => RoleFamily::Compositor(F::WindowTint),
            DwmColorizationColor => RoleFamily::Compositor(F::ColorizationColor),
            DwmAfterglowColor => RoleFamily::Compositor(F::AfterglowColor),
            DwmColorBalance => RoleFamily::Compositor(F::Scalar(ScalarField::ColorBalance)),
            DwmAfterglowBalance => {
                RoleFamily::Compositor(F::Scalar(ScalarField::AfterglowBalance))
            }
            DwmBlurBalance => RoleFamily::Compositor(F::Scalar(ScalarField::BlurBalance)),
            DwmGlassReflectionIntensity => {
                RoleFamily::Compositor(F::Scalar(ScalarField::GlassReflectionIntensity))
            }
            DwmOpaqueBlend => RoleFamily::Compositor(F::Scalar(ScalarField::OpaqueBlend)),
        }
    }
}

impl FromStr for ColorRole {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ParseError::UnknownColorType(s.to_string()))
    }
}

impl fmt::Display for ColorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
