use crate::error::GenerateError;
use crate::registry::{self, Component, ExportStyle, SECTIONS_DIR, SECTIONS_IMPORT};
use crate::render::attrs::render_attributes;
use crate::spec::{Page, Spec};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Page source location, relative to the project root.
pub const PAGE_FILE: &str = "app/page.tsx";

/// Render the page source for the Spec's first page.
///
/// Imports are sorted by component identifier; sections render in Spec
/// order. Every backing template must exist under `dest`.
pub fn synthesize_page(spec: &Spec, dest: &Path) -> Result<String, GenerateError> {
    let page = spec.pages.first().ok_or_else(|| {
        GenerateError::UnrecoverableSpec("spec has no pages to synthesize".to_string())
    })?;
    if spec.pages.len() > 1 {
        warn!(
            ignored = spec.pages.len() - 1,
            "only the first page is synthesized; remaining pages are ignored"
        );
    }

    // 1) Resolve every section before rendering anything.
    let resolved = resolve_sections(page)?;

    // 2) One import per unique component, ordered by identifier.
    let mut unique: BTreeMap<&str, &Component> = BTreeMap::new();
    for &component in &resolved {
        unique.insert(component.ident, component);
    }
    let mut imports = Vec::with_capacity(unique.len());
    for component in unique.values() {
        let template = template_path(dest, component);
        if !template.is_file() {
            return Err(GenerateError::Template {
                path: template,
                message: format!("section template for {} is missing", component.ident),
            });
        }
        imports.push(import_line(component));
    }

    // 3) Body in original section order.
    let mut body = Vec::with_capacity(page.sections.len());
    for (section, component) in page.sections.iter().zip(&resolved) {
        let attrs = match &section.content {
            Some(content) => render_attributes(&section.id, content)?,
            None => String::new(),
        };
        if attrs.is_empty() {
            body.push(format!("      <{} />", component.ident));
        } else {
            body.push(format!("      <{} {} />", component.ident, attrs));
        }
    }

    debug!(
        page = %page.id,
        sections = body.len(),
        components = imports.len(),
        "synthesized page"
    );

    const TEMPLATE: &str = r#"__IMPORTS__export default function Page() {
  return (
    <main>
__SECTIONS__    </main>
  );
}
"#;

    // Empty blocks leave no blank lines behind.
    let imports = block(&imports, "\n\n");
    let body = block(&body, "\n");
    Ok(TEMPLATE
        .replace("__IMPORTS__", &imports)
        .replace("__SECTIONS__", &body))
}

/// Resolve each section to its registered component, in section order.
/// Fails on the first kind/variant pair with no registration.
pub fn resolve_sections(page: &Page) -> Result<Vec<&'static Component>, GenerateError> {
    page.sections
        .iter()
        .map(|section| {
            let variant = section.variant_or_default();
            registry::resolve(&section.kind, variant).ok_or_else(|| {
                GenerateError::UnknownComponent {
                    kind: section.kind.clone(),
                    variant: variant.to_string(),
                    valid: registry::valid_pairs().join(", "),
                }
            })
        })
        .collect()
}

/// Synthesize and write `app/page.tsx` under `dest`.
pub fn write_page(spec: &Spec, dest: &Path) -> Result<PathBuf, GenerateError> {
    let source = synthesize_page(spec, dest)?;
    let path = dest.join(PAGE_FILE);
    fs::write(&path, source).map_err(|e| GenerateError::io(&path, e))?;
    Ok(path)
}

fn block(lines: &[String], terminator: &str) -> String {
    if lines.is_empty() {
        String::new()
    } else {
        format!("{}{}", lines.join("\n"), terminator)
    }
}

fn import_line(component: &Component) -> String {
    match component.export {
        ExportStyle::Default => format!(
            "import {} from \"{}/{}\";",
            component.ident, SECTIONS_IMPORT, component.module
        ),
        ExportStyle::Named => format!(
            "import {{ {} }} from \"{}/{}\";",
            component.ident, SECTIONS_IMPORT, component.module
        ),
    }
}

fn template_path(dest: &Path, component: &Component) -> PathBuf {
    dest.join(SECTIONS_DIR)
        .join(format!("{}.tsx", component.module))
}
