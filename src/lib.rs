//! Library exports for resolving Windows system color roles.
//!
//! The resolver maps a symbolic [`ColorRole`] onto one of the OS color
//! sources (legacy system-color table, DWM colorization, theme accent), and
//! renders the result the way a Rainmeter-style measure expects it. OS access
//! sits behind [`platform::ColorSource`] so everything above it can be
//! exercised without Windows.

pub mod color;
pub mod config;
pub mod measure;
pub mod platform;
pub mod probe;
pub mod resolver;
pub mod update;

pub use color::{ColorRole, DisplayType, Rgba};
pub use config::Config;
pub use measure::{HostSettings, Measure};
pub use platform::{CapabilitySet, ColorSource};
pub use probe::{CapabilityLease, CapabilityProber};
pub use resolver::{Measurement, ResolveError, Resolved, Resolver, resolve};
