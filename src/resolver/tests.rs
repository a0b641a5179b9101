use std::sync::Mutex;

use super::{Measurement, ResolveError, Resolved, Resolver, resolve};
use crate::color::{ColorRole, DisplayType, Rgba};
use crate::platform::{
    CapabilitySet, ColorSource, ColorizationParameters, GlassColor, ImmersiveColorPreference,
    SourceError,
};

#[derive(Default)]
struct MockSource {
    legacy: Option<u32>,
    composition: Option<bool>,
    glass: Option<u32>,
    params: Option<ColorizationParameters>,
    accent: Option<ImmersiveColorPreference>,
    calls: Mutex<Vec<&'static str>>,
}

impl MockSource {
    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn failed(call: &'static str) -> SourceError {
        SourceError::CallFailed {
            call,
            code: 0x8007_0005,
        }
    }
}

impl ColorSource for MockSource {
    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::ALL
    }

    fn legacy_color(&self, _index: i32) -> Result<u32, SourceError> {
        self.record("legacy");
        self.legacy.ok_or(SourceError::UnsupportedIndex(-1))
    }

    fn composition_enabled(&self) -> Result<bool, SourceError> {
        self.record("composition");
        self.composition.ok_or(Self::failed("composition"))
    }

    fn glass_color(&self) -> Result<GlassColor, SourceError> {
        self.record("glass");
        self.glass
            .map(|argb| GlassColor {
                argb,
                opaque: false,
            })
            .ok_or(Self::failed("glass"))
    }

    fn colorization_parameters(&self) -> Result<ColorizationParameters, SourceError> {
        self.record("params");
        self.params.ok_or(Self::failed("params"))
    }

    fn accent_preference(
        &self,
        force_reload: bool,
    ) -> Result<ImmersiveColorPreference, SourceError> {
        assert!(!force_reload, "accent is read without forcing a reload");
        self.record("accent");
        self.accent.ok_or(Self::failed("accent"))
    }
}

fn params() -> ColorizationParameters {
    ColorizationParameters {
        color: 0xAABB_CCDD,
        afterglow: 0x4010_2030,
        color_balance: 40,
        afterglow_balance: 10,
        blur_balance: 67,
        glass_reflection_intensity: 50,
        opaque_blend: 1,
    }
}

fn full_source() -> MockSource {
    MockSource {
        legacy: Some(0x0030_2010),
        composition: Some(false),
        glass: Some(0xAABB_CCDD),
        params: Some(params()),
        accent: Some(ImmersiveColorPreference {
            color1: 0xFF00_0000,
            color2: 0xFF78_5A00,
        }),
        ..Default::default()
    }
}

fn text(source: &MockSource, role: ColorRole, display: DisplayType) -> Measurement {
    resolve(role, display, false, source, CapabilitySet::ALL)
}

#[test]
fn invalid_role_fails_without_touching_the_os() {
    let source = full_source();
    let result = Resolver::new(&source, CapabilitySet::ALL).resolve(ColorRole::Invalid);

    assert!(matches!(result, Err(ResolveError::InvalidRole)));
    assert!(source.calls().is_empty());
    assert_eq!(
        text(&source, ColorRole::Invalid, DisplayType::All),
        Measurement::no_value()
    );
}

#[test]
fn legacy_roles_have_no_alpha() {
    let source = full_source();
    let resolver = Resolver::new(&source, CapabilitySet::LEGACY_ONLY);

    for role in ColorRole::all() {
        if !matches!(role.family(), crate::color::RoleFamily::Legacy(_)) {
            continue;
        }
        assert_eq!(
            resolver.resolve(role).unwrap(),
            Resolved::Color(Rgba::new(0x10, 0x20, 0x30, None))
        );
        let alpha = resolver.measure(role, DisplayType::Alpha, false);
        assert_eq!(alpha.status, Measurement::NO_VALUE, "{role} alpha");
        assert!(alpha.text.is_empty());
    }
}

#[test]
fn legacy_role_renders_rgb_for_all() {
    let source = full_source();
    let caps = CapabilitySet::LEGACY_ONLY;

    let all = resolve(ColorRole::Window, DisplayType::All, false, &source, caps);
    assert_eq!(all, Measurement::value("16,32,48".into()));

    let hex = resolve(ColorRole::Window, DisplayType::Rgb, true, &source, caps);
    assert_eq!(hex.text, "102030");
}

#[test]
fn legacy_roles_need_the_legacy_capability() {
    let source = full_source();
    let caps = CapabilitySet {
        legacy: false,
        ..CapabilitySet::ALL
    };

    let result = Resolver::new(&source, caps).resolve(ColorRole::Window);
    assert!(matches!(
        result,
        Err(ResolveError::MissingCapability("GetSysColorBrush"))
    ));
    assert!(source.calls().is_empty());
}

#[test]
fn legacy_lookup_failure_is_no_value() {
    let source = MockSource::default();
    let measurement = text(&source, ColorRole::Desktop, DisplayType::All);
    assert_eq!(measurement, Measurement::no_value());
}

#[test]
fn glass_reorders_argb_into_canonical_channels() {
    let source = full_source();
    let resolver = Resolver::new(&source, CapabilitySet::LEGACY_ONLY);

    assert_eq!(
        resolver.resolve(ColorRole::Aero).unwrap(),
        Resolved::Color(Rgba::new(0xBB, 0xCC, 0xDD, Some(0xAA)))
    );
    assert_eq!(
        resolver.measure(ColorRole::Aero, DisplayType::All, true).text,
        "BBCCDDAA"
    );
    assert_eq!(
        resolver.measure(ColorRole::Aero, DisplayType::Alpha, false).text,
        "170"
    );
}

#[test]
fn glass_failure_is_no_value() {
    let source = MockSource::default();
    let result = Resolver::new(&source, CapabilitySet::ALL).resolve(ColorRole::Aero);
    assert!(matches!(result, Err(ResolveError::Source(_))));
}

#[test]
fn accent_reads_the_second_color() {
    let source = full_source();
    let resolver = Resolver::new(&source, CapabilitySet::ALL);

    assert_eq!(
        resolver.resolve(ColorRole::Accent).unwrap(),
        Resolved::Color(Rgba::new(0x00, 0x5A, 0x78, Some(0xFF)))
    );
    assert_eq!(
        resolver.measure(ColorRole::Accent, DisplayType::All, false).text,
        "0,90,120,255"
    );
}

#[test]
fn accent_without_capability_always_fails() {
    let source = full_source();
    let caps = CapabilitySet {
        accent: false,
        ..CapabilitySet::ALL
    };

    let result = Resolver::new(&source, caps).resolve(ColorRole::Accent);
    assert!(matches!(
        result,
        Err(ResolveError::MissingCapability("GetUserColorPreference"))
    ));
    assert!(source.calls().is_empty());

    let no_composition = MockSource {
        composition: None,
        ..full_source()
    };
    let measurement = resolve(
        ColorRole::Accent,
        DisplayType::Rgb,
        false,
        &no_composition,
        caps,
    );
    assert_eq!(measurement, Measurement::no_value());
}

#[test]
fn accent_call_failure_is_no_value() {
    let source = MockSource {
        accent: None,
        ..full_source()
    };
    let measurement = text(&source, ColorRole::Accent, DisplayType::All);
    assert_eq!(measurement, Measurement::no_value());
}

#[test]
fn compositor_colors_are_reordered() {
    let source = full_source();
    let resolver = Resolver::new(&source, CapabilitySet::ALL);

    assert_eq!(
        resolver.resolve(ColorRole::DwmColorizationColor).unwrap(),
        Resolved::Color(Rgba::new(0xBB, 0xCC, 0xDD, Some(0xAA)))
    );
    assert_eq!(
        resolver.resolve(ColorRole::DwmAfterglowColor).unwrap(),
        Resolved::Color(Rgba::new(0x10, 0x20, 0x30, Some(0x40)))
    );
    assert_eq!(
        source.calls(),
        vec!["composition", "params", "composition", "params"]
    );
}

#[test]
fn composition_state_does_not_gate_parameters() {
    let disabled = MockSource {
        composition: Some(false),
        ..full_source()
    };
    let enabled = MockSource {
        composition: Some(true),
        ..full_source()
    };

    for source in [&disabled, &enabled] {
        let measurement = text(source, ColorRole::DwmColorizationColor, DisplayType::Rgb);
        assert_eq!(measurement.text, "187,204,221");
    }
}

#[test]
fn compositor_roles_need_the_parameters_capability() {
    let source = full_source();
    let caps = CapabilitySet {
        compositor_parameters: false,
        ..CapabilitySet::ALL
    };

    for role in [
        ColorRole::Win8Window,
        ColorRole::DwmColorizationColor,
        ColorRole::DwmBlurBalance,
    ] {
        let result = Resolver::new(&source, caps).resolve(role);
        assert!(matches!(result, Err(ResolveError::MissingCapability(_))));
    }
    assert!(source.calls().is_empty());
}

#[test]
fn composition_query_failure_skips_parameters() {
    let source = MockSource {
        composition: None,
        ..full_source()
    };
    let measurement = text(&source, ColorRole::DwmColorBalance, DisplayType::All);

    assert_eq!(measurement, Measurement::no_value());
    assert_eq!(source.calls(), vec!["composition"]);
}

#[test]
fn parameters_failure_is_no_value() {
    let source = MockSource {
        params: None,
        ..full_source()
    };
    let measurement = text(&source, ColorRole::Win8Window, DisplayType::All);
    assert_eq!(measurement, Measurement::no_value());
}

#[test]
fn scalar_roles_ignore_display_and_hex() {
    let source = full_source();
    let expected = [
        (ColorRole::DwmColorBalance, "40"),
        (ColorRole::DwmAfterglowBalance, "10"),
        (ColorRole::DwmBlurBalance, "67"),
        (ColorRole::DwmGlassReflectionIntensity, "50"),
        (ColorRole::DwmOpaqueBlend, "1"),
    ];

    for (role, value) in expected {
        for display in [DisplayType::Alpha, DisplayType::Red, DisplayType::All] {
            for hex in [false, true] {
                let measurement = resolve(role, display, hex, &source, CapabilitySet::ALL);
                assert_eq!(measurement, Measurement::value(value.into()), "{role}");
            }
        }
    }
}

#[test]
fn scalar_zero_is_still_a_value() {
    let source = MockSource {
        params: Some(ColorizationParameters {
            opaque_blend: 0,
            ..params()
        }),
        ..full_source()
    };
    let measurement = text(&source, ColorRole::DwmOpaqueBlend, DisplayType::All);
    assert_eq!(measurement, Measurement::value("0".into()));
}

#[test]
fn win8_window_blends_toward_base_gray() {
    let source = MockSource {
        params: Some(ColorizationParameters {
            color: 0x8000_80FF,
            color_balance: 50,
            ..params()
        }),
        ..full_source()
    };
    let resolver = Resolver::new(&source, CapabilitySet::ALL);

    // r: 0 -> 108.5, g: 128 -> 172.5, b: 255 -> 236; alpha untouched
    assert_eq!(
        resolver.resolve(ColorRole::Win8Window).unwrap(),
        Resolved::Color(Rgba::new(109, 173, 236, Some(0x80)))
    );
}

#[test]
fn win8_window_at_full_balance_is_the_colorization_color() {
    let source = MockSource {
        params: Some(ColorizationParameters {
            color_balance: 100,
            ..params()
        }),
        ..full_source()
    };
    let resolver = Resolver::new(&source, CapabilitySet::ALL);

    assert_eq!(
        resolver.resolve(ColorRole::Win8Window).unwrap(),
        resolver.resolve(ColorRole::DwmColorizationColor).unwrap()
    );
}

#[test]
fn every_call_queries_again() {
    let source = full_source();
    let resolver = Resolver::new(&source, CapabilitySet::ALL);

    resolver.measure(ColorRole::Aero, DisplayType::All, false);
    resolver.measure(ColorRole::Aero, DisplayType::All, false);
    assert_eq!(source.calls(), vec!["glass", "glass"]);
}
