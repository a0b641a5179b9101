//! Windows color sources backed by user32/gdi32, dwmapi.dll and uxtheme.dll.

use super::{
    CapabilitySet, ColorSource, ColorizationParameters, GlassColor, ImmersiveColorPreference,
    SourceError,
};
use log::{debug, error};
use std::ffi::c_void;
use std::mem;
use windows::Wdk::System::SystemServices::RtlGetVersion;
use windows::Win32::Foundation::{BOOL, FreeLibrary, HMODULE};
use windows::Win32::Graphics::Dwm::{DwmGetColorizationColor, DwmIsCompositionEnabled};
use windows::Win32::Graphics::Gdi::{
    GetObjectW, GetSysColorBrush, HGDIOBJ, LOGBRUSH, SYS_COLOR_INDEX,
};
use windows::Win32::System::LibraryLoader::{GetProcAddress, LoadLibraryW, SetDllDirectoryW};
use windows::Win32::System::SystemInformation::OSVERSIONINFOW;
use windows::core::{HRESULT, PCSTR, PCWSTR, s, w};

type DwmGetColorizationParametersFn =
    unsafe extern "system" fn(params: *mut ColorizationParameters) -> HRESULT;
type GetUserColorPreferenceFn = unsafe extern "system" fn(
    preference: *mut ImmersiveColorPreference,
    force_reload: BOOL,
) -> HRESULT;
type RawProc = unsafe extern "system" fn() -> isize;

/// `DwmGetColorizationParameters` is only exported by ordinal.
const COLORIZATION_PARAMETERS_ORDINAL: usize = 127;

/// First major version with `GetUserColorPreference` accent support.
const ACCENT_MIN_MAJOR_VERSION: u32 = 10;

/// A loaded DLL, freed on drop.
struct Library {
    module: HMODULE,
    name: &'static str,
}

// HMODULE is a plain handle; FreeLibrary may be called from any thread.
unsafe impl Send for Library {}
unsafe impl Sync for Library {}

impl Library {
    fn load(path: PCWSTR, name: &'static str) -> Option<Self> {
        match unsafe { LoadLibraryW(path) } {
            Ok(module) => {
                debug!("Loaded {}", name);
                Some(Self { module, name })
            }
            Err(e) => {
                error!("SysColor: Could not load \"{}\": {}", name, e);
                None
            }
        }
    }

    fn proc(&self, symbol: PCSTR) -> Option<RawProc> {
        unsafe { GetProcAddress(self.module, symbol) }
    }

    fn proc_by_ordinal(&self, ordinal: usize) -> Option<RawProc> {
        // MAKEINTRESOURCEA: the ordinal travels in the low word of the pointer
        self.proc(PCSTR(ordinal as *const u8))
    }
}

impl Drop for Library {
    fn drop(&mut self) {
        if let Err(e) = unsafe { FreeLibrary(self.module) } {
            error!("Failed to free {}: {}", self.name, e);
        } else {
            debug!("Freed {}", self.name);
        }
    }
}

/// Real OS color source. Holds the DLLs for as long as it lives.
pub struct WindowsSource {
    capabilities: CapabilitySet,
    colorization_parameters: Option<DwmGetColorizationParametersFn>,
    user_color_preference: Option<GetUserColorPreferenceFn>,
    // Declared after the entry points that point into them.
    _dwmapi: Option<Library>,
    _uxtheme: Option<Library>,
}

impl WindowsSource {
    /// Loads dwmapi.dll and uxtheme.dll and resolves the optional entry points.
    ///
    /// Missing libraries or entry points are logged and reflected in the
    /// capability set; they never fail acquisition.
    pub fn acquire() -> Self {
        // Keep the current directory out of the DLL search path.
        if let Err(e) = unsafe { SetDllDirectoryW(w!("")) } {
            debug!("SetDllDirectoryW failed: {}", e);
        }

        let dwmapi = Library::load(w!("dwmapi.dll"), "dwmapi.dll");
        let colorization_parameters = dwmapi.as_ref().and_then(|lib| {
            let proc = lib.proc_by_ordinal(COLORIZATION_PARAMETERS_ORDINAL);
            if proc.is_none() {
                error!("SysColor: Could not find \"DwmGetColorizationParameters\" (dwmapi.dll)");
            }
            proc.map(|f| unsafe { mem::transmute::<RawProc, DwmGetColorizationParametersFn>(f) })
        });

        let uxtheme = Library::load(w!("uxtheme.dll"), "uxtheme.dll");
        let user_color_preference = uxtheme.as_ref().and_then(|lib| {
            let proc = lib.proc(s!("GetUserColorPreference"));
            if proc.is_none() {
                error!("SysColor: Could not find \"GetUserColorPreference\" (uxtheme.dll)");
            }
            proc.map(|f| unsafe { mem::transmute::<RawProc, GetUserColorPreferenceFn>(f) })
        });

        let capabilities = CapabilitySet {
            legacy: true,
            compositor_parameters: colorization_parameters.is_some(),
            accent: user_color_preference.is_some() && is_windows10_or_greater(),
        };
        debug!("Probed color sources: {:?}", capabilities);

        Self {
            capabilities,
            colorization_parameters,
            user_color_preference,
            _dwmapi: dwmapi,
            _uxtheme: uxtheme,
        }
    }
}

/// Kernel-reported OS major version check.
///
/// `RtlGetVersion` is used because `GetVersionEx` reports 6.2 to processes
/// without a compatibility manifest, which a plugin host may not have.
fn is_windows10_or_greater() -> bool {
    let mut info = OSVERSIONINFOW {
        dwOSVersionInfoSize: mem::size_of::<OSVERSIONINFOW>() as u32,
        ..Default::default()
    };
    let status = unsafe { RtlGetVersion(&mut info) };
    status.is_ok() && info.dwMajorVersion >= ACCENT_MIN_MAJOR_VERSION
}

fn check(call: &'static str, hr: HRESULT) -> Result<(), SourceError> {
    if hr.is_ok() {
        Ok(())
    } else {
        Err(SourceError::CallFailed {
            call,
            code: hr.0 as u32,
        })
    }
}

fn call_failed(call: &'static str, e: windows::core::Error) -> SourceError {
    SourceError::CallFailed {
        call,
        code: e.code().0 as u32,
    }
}

impl ColorSource for WindowsSource {
    fn capabilities(&self) -> CapabilitySet {
        self.capabilities
    }

    fn legacy_color(&self, index: i32) -> Result<u32, SourceError> {
        let brush = unsafe { GetSysColorBrush(SYS_COLOR_INDEX(index)) };
        if brush.is_invalid() {
            return Err(SourceError::UnsupportedIndex(index));
        }

        let mut logbrush = LOGBRUSH::default();
        let written = unsafe {
            GetObjectW(
                HGDIOBJ(brush.0),
                mem::size_of::<LOGBRUSH>() as i32,
                Some(&mut logbrush as *mut LOGBRUSH as *mut c_void),
            )
        };
        // System color brushes are owned by the OS and must not be deleted.
        if written <= 0 {
            return Err(SourceError::UnsupportedIndex(index));
        }

        Ok(logbrush.lbColor.0)
    }

    fn composition_enabled(&self) -> Result<bool, SourceError> {
        unsafe { DwmIsCompositionEnabled() }
            .map(|enabled| enabled.as_bool())
            .map_err(|e| call_failed("DwmIsCompositionEnabled", e))
    }

    fn glass_color(&self) -> Result<GlassColor, SourceError> {
        let mut argb = 0u32;
        let mut opaque = BOOL::default();
        unsafe { DwmGetColorizationColor(&mut argb, &mut opaque) }
            .map_err(|e| call_failed("DwmGetColorizationColor", e))?;

        Ok(GlassColor {
            argb,
            opaque: opaque.as_bool(),
        })
    }

    fn colorization_parameters(&self) -> Result<ColorizationParameters, SourceError> {
        let get = self
            .colorization_parameters
            .ok_or(SourceError::Unavailable("DwmGetColorizationParameters"))?;

        let mut params = ColorizationParameters::default();
        check("DwmGetColorizationParameters", unsafe { get(&mut params) })?;
        Ok(params)
    }

    fn accent_preference(
        &self,
        force_reload: bool,
    ) -> Result<ImmersiveColorPreference, SourceError> {
        let get = self
            .user_color_preference
            .ok_or(SourceError::Unavailable("GetUserColorPreference"))?;

        let mut preference = ImmersiveColorPreference::default();
        check("GetUserColorPreference", unsafe {
            get(&mut preference, BOOL::from(force_reload))
        })?;
        Ok(preference)
    }
}
