//! Schema validation over untyped JSON.
//!
//! The validator is total: it never fails and never stops at the first
//! problem. Callers look at the full list to decide whether repair is
//! worth attempting.

use crate::spec::{Architecture, is_url_safe};
use crate::theme::color::parse_hex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Check `value` against the Spec schema, accumulating every violation in
/// document order.
pub fn validate(value: &Value) -> ValidationReport {
    let mut errors = Vec::new();

    let Some(root) = value.as_object() else {
        errors.push("spec: root must be an object".to_string());
        return ValidationReport {
            valid: false,
            errors,
        };
    };

    check_project(root, &mut errors);
    check_architecture(root, &mut errors);
    check_theme(root, &mut errors);
    check_pages(root, &mut errors);

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}

fn check_project(root: &Map<String, Value>, errors: &mut Vec<String>) {
    let Some(project) = root.get("project") else {
        errors.push("project: missing".to_string());
        return;
    };
    let Some(project) = project.as_object() else {
        errors.push("project: must be an object".to_string());
        return;
    };

    require_str(project, "name", "project", errors);

    match project.get("slug") {
        None => {}
        Some(Value::String(slug)) if is_url_safe(slug) => {}
        Some(Value::String(slug)) => {
            errors.push(format!("project.slug: {:?} is not URL-safe", slug));
        }
        Some(_) => errors.push("project.slug: must be a string".to_string()),
    }
}

fn check_architecture(root: &Map<String, Value>, errors: &mut Vec<String>) {
    match root.get("architecture") {
        None => {}
        Some(Value::String(s)) if Architecture::parse(s).is_some() => {}
        Some(other) => {
            let allowed: Vec<&str> = Architecture::ALL.iter().map(|a| a.as_str()).collect();
            errors.push(format!(
                "architecture: {} is not one of {}",
                other,
                allowed.join(" | ")
            ));
        }
    }
}

fn check_theme(root: &Map<String, Value>, errors: &mut Vec<String>) {
    let Some(theme) = root.get("theme") else {
        return;
    };
    let Some(theme) = theme.as_object() else {
        errors.push("theme: must be an object".to_string());
        return;
    };

    match theme.get("primaryColor") {
        None => {}
        Some(Value::String(hex)) if parse_hex(hex).is_ok() => {}
        Some(other) => errors.push(format!(
            "theme.primaryColor: {} is not a #rgb or #rrggbb color",
            other
        )),
    }

    match theme.get("font") {
        None => {}
        Some(Value::String(font)) if !font.trim().is_empty() => {}
        Some(_) => errors.push("theme.font: must be a non-empty string".to_string()),
    }
}

fn check_pages(root: &Map<String, Value>, errors: &mut Vec<String>) {
    let pages = match root.get("pages") {
        None => {
            errors.push("pages: missing".to_string());
            return;
        }
        Some(Value::Array(pages)) => pages,
        Some(_) => {
            errors.push("pages: must be an array".to_string());
            return;
        }
    };
    if pages.is_empty() {
        errors.push("pages: must contain at least one page".to_string());
        return;
    }

    let mut page_ids = BTreeSet::new();
    for (i, page) in pages.iter().enumerate() {
        let at = format!("pages[{}]", i);
        let Some(page) = page.as_object() else {
            errors.push(format!("{}: must be an object", at));
            continue;
        };

        if let Some(id) = require_str(page, "id", &at, errors)
            && !page_ids.insert(id)
        {
            errors.push(format!("{}: duplicate page id {:?}", at, id));
        }
        require_str(page, "name", &at, errors);
        require_str(page, "route", &at, errors);

        match page.get("sections") {
            Some(Value::Array(sections)) => check_sections(sections, &at, errors),
            Some(_) => errors.push(format!("{}.sections: must be an array", at)),
            None => errors.push(format!("{}.sections: missing", at)),
        }
    }
}

fn check_sections(sections: &[Value], page_at: &str, errors: &mut Vec<String>) {
    let mut section_ids = BTreeSet::new();
    for (j, section) in sections.iter().enumerate() {
        let at = format!("{}.sections[{}]", page_at, j);
        let Some(section) = section.as_object() else {
            errors.push(format!("{}: must be an object", at));
            continue;
        };

        if let Some(id) = require_str(section, "id", &at, errors)
            && !section_ids.insert(id)
        {
            errors.push(format!("{}: duplicate section id {:?}", at, id));
        }
        require_str(section, "kind", &at, errors);

        match section.get("variant") {
            None => {}
            Some(Value::String(v)) if !v.trim().is_empty() => {}
            Some(Value::String(_)) => errors.push(format!("{}.variant: must not be empty", at)),
            Some(_) => errors.push(format!("{}.variant: must be a string", at)),
        }
        if let Some(content) = section.get("content")
            && !content.is_object()
        {
            errors.push(format!("{}.content: must be an object", at));
        }
    }
}

/// Record a violation unless `obj[key]` is a non-empty string.
fn require_str<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    at: &str,
    errors: &mut Vec<String>,
) -> Option<&'a str> {
    match obj.get(key).and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => Some(s),
        _ => {
            errors.push(format!("{}: missing non-empty string field {:?}", at, key));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn valid_spec() -> Value {
        json!({
            "project": { "name": "Demo", "slug": "demo" },
            "architecture": "landing",
            "theme": { "primaryColor": "#2563eb", "font": "Inter" },
            "pages": [{
                "id": "home",
                "name": "Home",
                "route": "/",
                "sections": [
                    { "id": "s1", "kind": "hero", "variant": "split", "content": { "title": "T" } },
                    { "id": "s2", "kind": "footer" }
                ]
            }]
        })
    }

    #[test]
    fn accepts_a_complete_spec() {
        let report = validate(&valid_spec());
        assert_eq!(report.errors, Vec::<String>::new());
        assert!(report.valid);
    }

    #[test]
    fn non_object_root_is_a_single_violation() {
        let report = validate(&json!([1, 2, 3]));
        assert!(!report.valid);
        assert_eq!(report.errors, vec!["spec: root must be an object".to_string()]);
    }

    #[test]
    fn accumulates_every_violation() {
        let report = validate(&json!({
            "project": { "name": "" },
            "pages": [
                { "id": "home", "route": "/", "sections": [
                    { "kind": "hero", "variant": 3, "content": [] },
                    { "id": "x" }
                ]},
                { "id": "home", "name": "Dup", "route": "/dup" }
            ]
        }));

        assert!(!report.valid);
        assert_eq!(
            report.errors,
            vec![
                "project: missing non-empty string field \"name\"".to_string(),
                "pages[0]: missing non-empty string field \"name\"".to_string(),
                "pages[0].sections[0]: missing non-empty string field \"id\"".to_string(),
                "pages[0].sections[0].variant: must be a string".to_string(),
                "pages[0].sections[0].content: must be an object".to_string(),
                "pages[0].sections[1]: missing non-empty string field \"kind\"".to_string(),
                "pages[1]: duplicate page id \"home\"".to_string(),
                "pages[1].sections: missing".to_string(),
            ]
        );
    }

    #[test]
    fn empty_pages_and_missing_project_are_both_reported() {
        let report = validate(&json!({ "pages": [] }));
        assert_eq!(
            report.errors,
            vec![
                "project: missing".to_string(),
                "pages: must contain at least one page".to_string(),
            ]
        );
    }

    #[test]
    fn flags_bad_optional_fields() {
        let mut spec = valid_spec();
        spec["project"]["slug"] = json!("Not A Slug");
        spec["architecture"] = json!("blog");
        spec["theme"]["primaryColor"] = json!("blue");
        spec["theme"]["font"] = json!("");

        let report = validate(&spec);
        assert_eq!(report.errors.len(), 4);
        assert!(report.errors[0].starts_with("project.slug:"));
        assert!(report.errors[1].starts_with("architecture:"));
        assert!(report.errors[2].starts_with("theme.primaryColor:"));
        assert!(report.errors[3].starts_with("theme.font:"));
    }

    #[test]
    fn empty_variant_is_flagged() {
        let mut spec = valid_spec();
        spec["pages"][0]["sections"][0]["variant"] = json!("");
        assert_eq!(
            validate(&spec).errors,
            vec!["pages[0].sections[0].variant: must not be empty".to_string()]
        );
    }

    #[test]
    fn duplicate_section_ids_are_scoped_per_page() {
        let report = validate(&json!({
            "project": { "name": "Demo" },
            "pages": [
                { "id": "a", "name": "A", "route": "/", "sections": [
                    { "id": "s", "kind": "hero" }, { "id": "s", "kind": "cta" }
                ]},
                { "id": "b", "name": "B", "route": "/b", "sections": [
                    { "id": "s", "kind": "hero" }
                ]}
            ]
        }));
        assert_eq!(
            report.errors,
            vec!["pages[0].sections[1]: duplicate section id \"s\"".to_string()]
        );
    }

    #[test]
    fn does_not_check_kind_against_the_registry() {
        let mut spec = valid_spec();
        spec["pages"][0]["sections"][0]["kind"] = json!("carousel");
        assert!(validate(&spec).valid);
    }
}
