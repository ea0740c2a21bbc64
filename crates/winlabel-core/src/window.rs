use std::path::PathBuf;

use serde::Serialize;

use crate::Result;

/// Owning process of a window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessInfo {
    pub pid: u32,
    /// Executable file name, e.g. `Code.exe`.
    pub name: String,
}

/// Installed package of a packaged (UWP/MSIX) application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageInfo {
    pub full_name: String,
    /// Install directory containing `AppxManifest.xml`.
    pub install_dir: PathBuf,
}

/// A snapshot of a window's descriptive attributes.
///
/// Produced fresh for every event. It has no identity beyond `hwnd`
/// and is never written back to the OS.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WindowInfo {
    pub hwnd: usize,
    pub title: String,
    pub class_name: String,
    pub process: ProcessInfo,
    /// Handle of the monitor the window is mostly on.
    pub monitor_hwnd: usize,
    /// Monitor device name, e.g. `\\.\DISPLAY1`.
    pub monitor_device_name: String,
    pub package: Option<PackageInfo>,
}

/// Looks up a window's attributes from its handle.
///
/// Implementations must be side-effect free. An invalid handle or a
/// failing OS call is reported as [`crate::Error::Resolution`].
pub trait InfoResolver {
    fn resolve(&self, hwnd: usize) -> Result<WindowInfo>;
}

impl<T: InfoResolver + ?Sized> InfoResolver for &T {
    fn resolve(&self, hwnd: usize) -> Result<WindowInfo> {
        (**self).resolve(hwnd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_nested_process_and_package() {
        // Arrange
        let info = WindowInfo {
            hwnd: 0x1234,
            title: "Calculator".into(),
            class_name: "ApplicationFrameWindow".into(),
            process: ProcessInfo {
                pid: 77,
                name: "CalculatorApp.exe".into(),
            },
            package: Some(PackageInfo {
                full_name: "Microsoft.WindowsCalculator_11.2_x64__8wekyb3d8bbwe".into(),
                install_dir: PathBuf::from("calc"),
            }),
            ..Default::default()
        };

        // Act
        let json = serde_json::to_value(&info).unwrap();

        // Assert
        assert_eq!(json["hwnd"], 0x1234);
        assert_eq!(json["process"]["name"], "CalculatorApp.exe");
        assert_eq!(
            json["package"]["full_name"],
            "Microsoft.WindowsCalculator_11.2_x64__8wekyb3d8bbwe"
        );
    }

    #[test]
    fn unpackaged_window_serializes_null_package() {
        let json = serde_json::to_value(WindowInfo::default()).unwrap();
        assert!(json["package"].is_null());
    }
}
