//! Rival identity discovery
//!
//! Scans an asset directory for `*_logo.png` files and resolves each one
//! into a roster entry: a stable identity token, a display name taken from
//! the file stem, a dominant color extracted from the image, and a head
//! glyph. Cosmetic only; the simulation never looks at pixels.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::GenericImageView;
use tracing::{info, warn};

use crate::game::{Rgb, RivalId, RivalIdentity, RivalRoster};

const LOGO_SUFFIX: &str = "_logo.png";

/// Pixel sampling stride for dominant-color extraction
const SAMPLE_STRIDE: u32 = 4;

/// Alpha threshold below which a pixel is ignored as transparent
const ALPHA_CUTOFF: u8 = 200;

/// Build the rival roster from logo files in `dir`.
///
/// Every `*_logo.png` becomes one identity, in sorted filename order so
/// tokens are stable across runs. An unreadable image degrades to the
/// fallback color rather than dropping the identity. When the directory
/// yields nothing at all, the built-in roster is used so rivals still
/// exist.
pub fn load_roster(dir: &Path) -> RivalRoster {
    let files = match discover_logo_files(dir) {
        Ok(files) => files,
        Err(err) => {
            warn!(dir = %dir.display(), %err, "asset scan failed, using built-in rivals");
            return RivalRoster::builtin();
        }
    };
    if files.is_empty() {
        info!(dir = %dir.display(), "no rival logos found, using built-in rivals");
        return RivalRoster::builtin();
    }

    let identities = files
        .iter()
        .enumerate()
        .map(|(i, file)| {
            let name = identity_name(file);
            let color = match dominant_color(file) {
                Ok(color) => color,
                Err(err) => {
                    warn!(file = %file.display(), %err, "unreadable logo, using fallback color");
                    crate::game::rival::FALLBACK_COLOR
                }
            };
            RivalIdentity {
                id: RivalId(i),
                head_glyph: name.chars().next().unwrap_or('?').to_ascii_uppercase(),
                name,
                color,
            }
        })
        .collect();
    RivalRoster::new(identities)
}

fn discover_logo_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("Failed to read asset dir {dir:?}"))?;
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(LOGO_SUFFIX))
        })
        .collect();
    files.sort();
    Ok(files)
}

fn identity_name(file: &Path) -> String {
    file.file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.strip_suffix(LOGO_SUFFIX))
        .unwrap_or("rival")
        .to_string()
}

/// Most frequent opaque color in the image, sampling every 4th pixel
fn dominant_color(file: &Path) -> Result<Rgb> {
    let img = image::open(file).with_context(|| format!("Failed to decode {file:?}"))?;
    let (width, height) = img.dimensions();

    let mut counts: std::collections::HashMap<(u8, u8, u8), u32> =
        std::collections::HashMap::new();
    for x in (0..width).step_by(SAMPLE_STRIDE as usize) {
        for y in (0..height).step_by(SAMPLE_STRIDE as usize) {
            let [r, g, b, a] = img.get_pixel(x, y).0;
            if a > ALPHA_CUTOFF {
                *counts.entry((r, g, b)).or_insert(0) += 1;
            }
        }
    }

    let dominant = counts
        .into_iter()
        .max_by_key(|&(_, count)| count)
        .map(|((r, g, b), _)| Rgb(r, g, b))
        .unwrap_or(crate::game::rival::FALLBACK_COLOR);
    Ok(dominant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn temp_asset_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "snake_arena_assets_{name}_{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_logo(dir: &Path, name: &str, color: Rgba<u8>) {
        let mut img = RgbaImage::new(16, 16);
        for pixel in img.pixels_mut() {
            *pixel = color;
        }
        img.save(dir.join(name)).unwrap();
    }

    #[test]
    fn test_missing_dir_uses_builtin_roster() {
        let roster = load_roster(Path::new("no/such/dir"));
        assert_eq!(roster.len(), RivalRoster::builtin().len());
    }

    #[test]
    fn test_empty_dir_uses_builtin_roster() {
        let dir = temp_asset_dir("empty");
        let roster = load_roster(&dir);
        assert_eq!(roster.len(), RivalRoster::builtin().len());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_logos_become_identities_in_sorted_order() {
        let dir = temp_asset_dir("sorted");
        write_logo(&dir, "zeta_logo.png", Rgba([0, 0, 255, 255]));
        write_logo(&dir, "alpha_logo.png", Rgba([255, 0, 0, 255]));
        write_logo(&dir, "ignored.png", Rgba([0, 255, 0, 255]));

        let roster = load_roster(&dir);
        assert_eq!(roster.len(), 2);

        let first = roster.get(RivalId(0)).unwrap();
        assert_eq!(first.name, "alpha");
        assert_eq!(first.head_glyph, 'A');
        assert_eq!(first.color, Rgb(255, 0, 0));

        let second = roster.get(RivalId(1)).unwrap();
        assert_eq!(second.name, "zeta");
        assert_eq!(second.color, Rgb(0, 0, 255));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_transparent_pixels_are_ignored() {
        let dir = temp_asset_dir("alpha");
        let mut img = RgbaImage::new(16, 16);
        for (x, _, pixel) in img.enumerate_pixels_mut() {
            // A thin opaque stripe on an otherwise transparent canvas
            *pixel = if x < 4 {
                Rgba([10, 20, 30, 255])
            } else {
                Rgba([255, 255, 255, 0])
            };
        }
        img.save(dir.join("stripe_logo.png")).unwrap();

        let roster = load_roster(&dir);
        let identity = roster.get(RivalId(0)).unwrap();
        assert_eq!(identity.color, Rgb(10, 20, 30));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unreadable_logo_degrades_to_fallback_color() {
        let dir = temp_asset_dir("bad");
        std::fs::write(dir.join("broken_logo.png"), b"definitely not a png").unwrap();

        let roster = load_roster(&dir);
        assert_eq!(roster.len(), 1);
        let identity = roster.get(RivalId(0)).unwrap();
        assert_eq!(identity.name, "broken");
        assert_eq!(identity.color, crate::game::rival::FALLBACK_COLOR);

        std::fs::remove_dir_all(&dir).ok();
    }
}
