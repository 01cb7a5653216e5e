//! Custom-property rewrites in the generated stylesheet.
//!
//! Only the named declarations are touched; every other byte of the
//! stylesheet is preserved. All rewrites are idempotent.

use crate::error::GenerateError;
use crate::theme::color::Palette;
use regex::{Captures, Regex};
use std::path::PathBuf;

/// Stylesheet location, relative to the project root.
pub const STYLESHEET_FILE: &str = "app/globals.css";

/// Rewrite `--primary` / `--primary-foreground` in the `:root` and
/// `.dark` scopes.
pub fn apply_palette(css: &str, palette: &Palette) -> Result<String, GenerateError> {
    let light = [
        ("--primary", palette.light.to_string()),
        ("--primary-foreground", palette.light_foreground.to_string()),
    ];
    let dark = [
        ("--primary", palette.dark.to_string()),
        ("--primary-foreground", palette.dark_foreground.to_string()),
    ];

    let css = rewrite_scope(css, ":root", &light)?;
    rewrite_scope(&css, ".dark", &dark)
}

/// Point `--font-sans` at the given font variable.
pub fn apply_font_variable(css: &str, css_variable: &str) -> Result<String, GenerateError> {
    let re = declaration_regex("--font-sans")?;
    if !re.is_match(css) {
        return Err(template_error("no --font-sans declaration"));
    }
    let value = format!("var({})", css_variable);
    Ok(re
        .replace_all(css, |caps: &Captures| {
            format!("{}{}{};", &caps[1], &caps[2], value)
        })
        .into_owned())
}

/// Rewrite declarations inside the first block opened by `selector`.
fn rewrite_scope(
    css: &str,
    selector: &str,
    declarations: &[(&str, String)],
) -> Result<String, GenerateError> {
    let opener = Regex::new(&format!(r"(?m)^\s*{}\s*\{{", regex::escape(selector)))?;
    let open = opener
        .find(css)
        .ok_or_else(|| template_error(format!("no `{}` block", selector)))?
        .end();
    let close = css[open..]
        .find('}')
        .map(|i| open + i)
        .ok_or_else(|| template_error(format!("unterminated `{}` block", selector)))?;

    let mut body = css[open..close].to_string();
    for (name, value) in declarations {
        let re = declaration_regex(name)?;
        if !re.is_match(&body) {
            return Err(template_error(format!(
                "no {} declaration in `{}`",
                name, selector
            )));
        }
        body = re
            .replace_all(&body, |caps: &Captures| {
                format!("{}{}{};", &caps[1], &caps[2], value)
            })
            .into_owned();
    }

    let mut out = String::with_capacity(css.len());
    out.push_str(&css[..open]);
    out.push_str(&body);
    out.push_str(&css[close..]);
    Ok(out)
}

/// Matches `name: value;` where `name` is not a suffix of a longer
/// property (e.g. `--sidebar-primary`).
fn declaration_regex(name: &str) -> Result<Regex, GenerateError> {
    Ok(Regex::new(&format!(
        r"(^|[\s;{{])({}\s*:\s*)[^;]*;",
        regex::escape(name)
    ))?)
}

fn template_error(message: impl Into<String>) -> GenerateError {
    GenerateError::Template {
        path: PathBuf::from(STYLESHEET_FILE),
        message: message.into(),
    }
}
