//! Host-facing measure lifecycle.
//!
//! A host (a skin engine, the CLI, a test) creates one [`Measure`] per color
//! it displays, reloads it whenever its settings change and calls
//! [`Measure::update`] on its own schedule. Each measure holds a lease on
//! the shared [`CapabilityProber`], so the OS libraries stay loaded exactly
//! as long as at least one measure exists.

use crate::color::{ColorRole, DisplayType};
use crate::probe::{CapabilityLease, CapabilityProber};
use crate::resolver::{Measurement, Resolver};
use log::{error, warn};
use std::collections::HashMap;
use std::sync::Arc;

pub const COLOR_TYPE_KEY: &str = "ColorType";
pub const DISPLAY_TYPE_KEY: &str = "DisplayType";
pub const HEX_KEY: &str = "Hex";

pub const DEFAULT_COLOR_TYPE: &str = "ACCENT";
pub const DEFAULT_DISPLAY_TYPE: &str = "ALL";

/// Read access to the host's per-measure settings.
pub trait HostSettings {
    fn read_string(&self, key: &str, default: &str) -> String;
    fn read_int(&self, key: &str, default: i64) -> i64;
}

/// Plain key/value settings, as used by the CLI and tests.
impl HostSettings for HashMap<String, String> {
    fn read_string(&self, key: &str, default: &str) -> String {
        self.get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    fn read_int(&self, key: &str, default: i64) -> i64 {
        self.get(key)
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(default)
    }
}

/// One consumer of the resolver.
pub struct Measure {
    lease: CapabilityLease,
    color_type: ColorRole,
    display_type: DisplayType,
    hex: bool,
    text: String,
    // Last bad texts reported, so repeated reloads do not repeat the error.
    reported_color_type: Option<String>,
    reported_display_type: Option<String>,
}

impl Measure {
    /// Attaches to `prober`. The measure starts out with no valid color type
    /// until [`reload`](Self::reload) is called.
    pub fn initialize(prober: &Arc<CapabilityProber>) -> Self {
        Self {
            lease: prober.attach(),
            color_type: ColorRole::Invalid,
            display_type: DisplayType::All,
            hex: false,
            text: String::new(),
            reported_color_type: None,
            reported_display_type: None,
        }
    }

    /// Re-reads `ColorType`, `DisplayType` and `Hex` from the host.
    pub fn reload(&mut self, settings: &dyn HostSettings) {
        let display_text = settings.read_string(DISPLAY_TYPE_KEY, DEFAULT_DISPLAY_TYPE);
        self.display_type = match display_text.parse::<DisplayType>() {
            Ok(display) => {
                self.reported_display_type = None;
                display
            }
            Err(e) => {
                if self.reported_display_type.as_deref() != Some(display_text.as_str()) {
                    error!("SysColor: {}", e);
                    self.reported_display_type = Some(display_text);
                }
                DisplayType::All
            }
        };

        let color_text = settings.read_string(COLOR_TYPE_KEY, DEFAULT_COLOR_TYPE);
        self.color_type = match color_text.parse::<ColorRole>() {
            Ok(role) => {
                self.reported_color_type = None;
                role
            }
            Err(e) => {
                if self.reported_color_type.as_deref() != Some(color_text.as_str()) {
                    error!("SysColor: {}", e);
                    self.reported_color_type = Some(color_text);
                }
                ColorRole::Invalid
            }
        };

        if self.accent_unavailable() {
            warn!("SysColor: \"ColorType=Accent\" not available");
        }

        self.hex = settings.read_int(HEX_KEY, 0) != 0;
    }

    /// ACCENT is configured but this system cannot resolve it.
    fn accent_unavailable(&self) -> bool {
        self.color_type == ColorRole::Accent && !self.lease.capabilities().accent
    }

    /// Resolves the configured color afresh. Returns `1.0` on success and
    /// `-1.0` when there is no value, in which case [`text`](Self::text) is
    /// empty.
    pub fn update(&mut self) -> f64 {
        let Measurement { text, status } = self.measure();
        self.text = text;
        status
    }

    /// Resolves without touching the stored text.
    pub fn measure(&self) -> Measurement {
        Resolver::new(self.lease.source().as_ref(), self.lease.capabilities()).measure(
            self.color_type,
            self.display_type,
            self.hex,
        )
    }

    /// Text produced by the last [`update`](Self::update).
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn color_type(&self) -> ColorRole {
        self.color_type
    }

    pub fn display_type(&self) -> DisplayType {
        self.display_type
    }

    pub fn hex(&self) -> bool {
        self.hex
    }
}
