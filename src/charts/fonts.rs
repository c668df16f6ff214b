//! Font registration for chart text
//!
//! Chart text is rasterized with ab_glyph, which only knows fonts that were
//! registered at runtime. The first call picks a font (explicit path first,
//! then common system locations) and registers it as `sans-serif`; later
//! calls reuse that outcome.

use plotters::style::{register_font, FontStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, info, warn};

/// Family name every chart uses for its text
pub const CHART_FONT: &str = "sans-serif";

/// Searched in order when no font path is configured
pub const FONT_CANDIDATES: [&str; 10] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static REGISTERED: OnceLock<Option<PathBuf>> = OnceLock::new();

fn try_register(path: &Path) -> bool {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "font not readable");
            return false;
        }
    };

    // The registry holds fonts for the life of the process
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    match register_font(CHART_FONT, FontStyle::Normal, bytes) {
        Ok(()) => true,
        Err(_) => {
            warn!(path = %path.display(), "not a usable TrueType font");
            false
        }
    }
}

/// Register a chart font once per process. Returns the font in use, or
/// `None` when no font could be loaded (charts are then drawn without text).
pub fn register_chart_font(explicit: Option<&Path>) -> Option<&'static Path> {
    REGISTERED
        .get_or_init(|| {
            if let Some(path) = explicit {
                if try_register(path) {
                    info!(font = %path.display(), "registered chart font");
                    return Some(path.to_path_buf());
                }
                warn!(font = %path.display(), "configured font unavailable, searching system fonts");
            }

            let found = FONT_CANDIDATES
                .iter()
                .map(Path::new)
                .find(|p| p.is_file() && try_register(p))
                .map(Path::to_path_buf);

            match &found {
                Some(path) => info!(font = %path.display(), "registered chart font"),
                None => warn!("no font found, charts will be rendered without text"),
            }
            found
        })
        .as_deref()
}
