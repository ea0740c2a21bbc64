//! Logo lookup for packaged (MSIX/UWP) applications.
//!
//! Packaged apps often expose no window icon. Their logo is declared in
//! the package's `AppxManifest.xml` as a path relative to the install
//! directory, and the file on disk usually carries a size qualifier.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};

use crate::{Error, Result};

pub const MANIFEST_FILE: &str = "AppxManifest.xml";

/// Qualifiers tried after the exact logo path, in order.
const LOGO_QUALIFIERS: &[&str] = &[".targetsize-256_altform-unplated", ".targetsize-256"];

/// Extracts the logo path from manifest XML.
///
/// Prefers the `Square44x44Logo` attribute of `VisualElements` (with or
/// without the `uap:` prefix) and falls back to `Properties/Logo`.
pub fn parse_logo(xml: &str) -> std::result::Result<Option<String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut in_properties = false;
    let mut in_logo = false;
    let mut properties_logo = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"VisualElements" => {
                    if let Some(logo) = attribute(&e, b"Square44x44Logo") {
                        return Ok(Some(logo));
                    }
                }
                b"Properties" => in_properties = true,
                b"Logo" if in_properties => in_logo = true,
                _ => {}
            },
            Event::Empty(e) => {
                if e.local_name().as_ref() == b"VisualElements"
                    && let Some(logo) = attribute(&e, b"Square44x44Logo")
                {
                    return Ok(Some(logo));
                }
            }
            Event::Text(t) if in_logo => {
                let text = String::from_utf8_lossy(&t).trim().to_string();
                if !text.is_empty() {
                    properties_logo = Some(text);
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"Properties" => in_properties = false,
                b"Logo" => in_logo = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(properties_logo)
}

fn attribute(element: &BytesStart<'_>, name: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == name)
        .map(|a| {
            let raw = String::from_utf8_lossy(&a.value).into_owned();
            match unescape(&raw) {
                Ok(value) => value.into_owned(),
                Err(_) => raw.clone(),
            }
        })
}

/// Returns the on-disk paths tried for a manifest logo, in order:
/// the exact path, the unplated 256px variant, and the 256px variant.
pub fn logo_candidates(install_dir: &Path, relative: &str) -> Vec<PathBuf> {
    let exact = relative
        .split(['\\', '/'])
        .filter(|part| !part.is_empty())
        .fold(install_dir.to_path_buf(), |path, part| path.join(part));

    let stem = exact
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = exact
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut candidates = vec![exact.clone()];
    for qualifier in LOGO_QUALIFIERS {
        candidates.push(exact.with_file_name(format!("{stem}{qualifier}{ext}")));
    }
    candidates
}

/// Locates the logo file declared by the manifest in `install_dir`.
pub fn find_logo(install_dir: &Path) -> Result<PathBuf> {
    let manifest_path = install_dir.join(MANIFEST_FILE);
    let xml = std::fs::read_to_string(&manifest_path)
        .map_err(|e| Error::manifest(&manifest_path, e))?;
    let relative = parse_logo(&xml)
        .map_err(|e| Error::manifest(&manifest_path, e))?
        .ok_or_else(|| Error::manifest(&manifest_path, "no logo declared"))?;

    logo_candidates(install_dir, &relative)
        .into_iter()
        .find(|path| path.is_file())
        .ok_or_else(|| Error::manifest(&manifest_path, format!("logo {relative:?} not on disk")))
}

/// Finds and decodes the package logo.
pub fn load_logo(install_dir: &Path) -> Result<RgbaImage> {
    let path = find_logo(install_dir)?;
    tracing::debug!("decoding package logo {}", path.display());
    Ok(image::open(&path)?.to_rgba8())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use image::Rgba;

    use super::*;

    const CALCULATOR_MANIFEST: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Package xmlns="http://schemas.microsoft.com/appx/manifest/foundation/windows10"
         xmlns:uap="http://schemas.microsoft.com/appx/manifest/uap/windows10">
  <Properties>
    <DisplayName>Calculator</DisplayName>
    <Logo>Assets\StoreLogo.png</Logo>
  </Properties>
  <Applications>
    <Application Id="App">
      <uap:VisualElements DisplayName="Calculator"
                          Square150x150Logo="Assets\CalculatorMedTile.png"
                          Square44x44Logo="Assets\CalculatorAppList.png"
                          BackgroundColor="transparent">
        <uap:DefaultTile Wide310x150Logo="Assets\CalculatorWideTile.png"/>
      </uap:VisualElements>
    </Application>
  </Applications>
</Package>"#;

    fn write_png(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        RgbaImage::from_pixel(48, 48, Rgba([10, 20, 30, 255]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn prefers_visual_elements_logo() {
        // Act
        let logo = parse_logo(CALCULATOR_MANIFEST).unwrap();

        // Assert
        assert_eq!(logo.as_deref(), Some(r"Assets\CalculatorAppList.png"));
    }

    #[test]
    fn finds_unprefixed_self_closing_visual_elements() {
        // Arrange
        let xml = r#"<Package><Applications><Application>
            <VisualElements Square44x44Logo="Images\Small.png"/>
        </Application></Applications></Package>"#;

        // Act / Assert
        assert_eq!(
            parse_logo(xml).unwrap().as_deref(),
            Some(r"Images\Small.png")
        );
    }

    #[test]
    fn falls_back_to_properties_logo() {
        // Arrange
        let xml = r#"<Package><Properties><Logo>Assets\StoreLogo.png</Logo></Properties></Package>"#;

        // Act / Assert
        assert_eq!(
            parse_logo(xml).unwrap().as_deref(),
            Some(r"Assets\StoreLogo.png")
        );
    }

    #[test]
    fn manifest_without_logo_yields_none() {
        let xml = "<Package><Properties><DisplayName>X</DisplayName></Properties></Package>";
        assert_eq!(parse_logo(xml).unwrap(), None);
    }

    #[test]
    fn malformed_manifest_is_an_error() {
        assert!(parse_logo("<Package><Properties></Package>").is_err());
    }

    #[test]
    fn candidates_cover_three_variants_in_order() {
        // Arrange
        let dir = Path::new("pkg");

        // Act
        let candidates = logo_candidates(dir, r"Assets\AppList.png");

        // Assert
        let assets = dir.join("Assets");
        assert_eq!(
            candidates,
            vec![
                assets.join("AppList.png"),
                assets.join("AppList.targetsize-256_altform-unplated.png"),
                assets.join("AppList.targetsize-256.png"),
            ]
        );
    }

    #[test]
    fn find_logo_uses_first_existing_variant() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILE), CALCULATOR_MANIFEST).unwrap();
        let sized = dir
            .path()
            .join("Assets")
            .join("CalculatorAppList.targetsize-256.png");
        write_png(&sized);

        // Act
        let found = find_logo(dir.path()).unwrap();

        // Assert
        assert_eq!(found, sized);
    }

    #[test]
    fn load_logo_decodes_the_image() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILE), CALCULATOR_MANIFEST).unwrap();
        write_png(&dir.path().join("Assets").join("CalculatorAppList.png"));

        // Act
        let logo = load_logo(dir.path()).unwrap();

        // Assert
        assert_eq!(logo.dimensions(), (48, 48));
        assert_eq!(logo.get_pixel(0, 0), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn missing_logo_file_is_a_manifest_error() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILE), CALCULATOR_MANIFEST).unwrap();

        // Act
        let err = find_logo(dir.path()).unwrap_err();

        // Assert
        assert!(matches!(err, Error::Manifest { .. }));
    }

    #[test]
    fn corrupt_logo_is_a_decode_error() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILE), CALCULATOR_MANIFEST).unwrap();
        let logo = dir.path().join("Assets").join("CalculatorAppList.png");
        fs::create_dir_all(logo.parent().unwrap()).unwrap();
        fs::write(&logo, b"not a png").unwrap();

        // Act
        let err = load_logo(dir.path()).unwrap_err();

        // Assert
        assert!(matches!(err, Error::IconDecode(_)));
    }
}
