use crate::error::GenerateError;
use crate::theme::layout::LayoutDocument;
use crate::theme::stylesheet::apply_font_variable;
use heck::{ToKebabCase, ToLowerCamelCase};

/// Weight passed to every font factory; fonts without variable-weight
/// support refuse to load without one.
pub const FONT_WEIGHT: &str = "400";

/// Names derived from a requested font.
///
/// "Playfair Display" => ident `Playfair_Display`, binding
/// `playfairDisplay`, variable `--font-playfair-display`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSpec {
    pub name: String,
    pub ident: String,
    pub binding: String,
    pub css_variable: String,
}

impl FontSpec {
    pub fn new(name: &str) -> Result<Self, GenerateError> {
        let name = name.trim();
        let well_formed = name.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == ' ');
        if !well_formed {
            return Err(GenerateError::InvalidFont(name.to_string()));
        }

        let ident = name.split_whitespace().collect::<Vec<_>>().join("_");
        Ok(Self {
            name: name.to_string(),
            binding: ident.to_lower_camel_case(),
            css_variable: format!("--font-{}", name.to_kebab_case()),
            ident,
        })
    }

    fn import_line(&self) -> String {
        format!("import {{ {} }} from \"next/font/google\";", self.ident)
    }

    fn factory_lines(&self) -> Vec<String> {
        vec![
            format!("const {} = {}({{", self.binding, self.ident),
            format!("  variable: \"{}\",", self.css_variable),
            "  subsets: [\"latin\"],".to_string(),
            format!("  weight: \"{}\",", FONT_WEIGHT),
            "});".to_string(),
        ]
    }
}

/// Point the layout and stylesheet at `font`. Returns the rewritten
/// `(layout, stylesheet)` pair.
pub fn apply_font(
    layout: &str,
    css: &str,
    font: &FontSpec,
) -> Result<(String, String), GenerateError> {
    let mut doc = LayoutDocument::parse(layout)?;
    doc.remove_font_imports();
    doc.remove_font_factories();
    doc.insert_font_import(font.import_line());
    doc.insert_font_factory(font.binding.clone(), font.factory_lines())?;
    doc.rewrite_root_classes(&font.binding)?;

    let css = apply_font_variable(css, &font.css_variable)?;
    Ok((doc.render(), css))
}
