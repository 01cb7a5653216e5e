//! Theme synthesis: primary color and font, applied to a generated tree.

pub mod color;
pub mod font;
pub mod layout;
pub mod stylesheet;

use crate::error::GenerateError;
use crate::spec::Theme;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub use color::Palette;
pub use font::FontSpec;

use font::apply_font;
use layout::LAYOUT_FILE;
use stylesheet::{STYLESHEET_FILE, apply_palette};

/// Apply whatever the theme carries to the layout/stylesheet pair under
/// `dest`. Files are only written when something changed.
pub fn apply_theme(dest: &Path, theme: &Theme) -> Result<(), GenerateError> {
    let css_path = dest.join(STYLESHEET_FILE);
    let layout_path = dest.join(LAYOUT_FILE);

    let original_css = read(&css_path)?;
    let mut css = original_css.clone();

    if let Some(hex) = &theme.primary_color {
        let palette = Palette::from_hex(hex)?;
        css = apply_palette(&css, &palette)?;
        info!(%hex, primary = %palette.light, "applied primary color");
    }

    if let Some(name) = &theme.font {
        let font = FontSpec::new(name)?;
        let layout = read(&layout_path)?;
        let (new_layout, new_css) = apply_font(&layout, &css, &font)?;
        css = new_css;
        write(&layout_path, &new_layout)?;
        info!(font = %font.name, variable = %font.css_variable, "applied font");
    }

    if css != original_css {
        write(&css_path, &css)?;
    } else {
        debug!("stylesheet unchanged");
    }
    Ok(())
}

fn read(path: &Path) -> Result<String, GenerateError> {
    fs::read_to_string(path).map_err(|e| GenerateError::io(path, e))
}

fn write(path: &Path, text: &str) -> Result<(), GenerateError> {
    fs::write(path, text).map_err(|e| GenerateError::io(path, e))
}
