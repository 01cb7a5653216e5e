//! Canonical slug derivation. Repair and orchestration both call
//! [`slugify`]; there is no second implementation.

/// Trim, lowercase, collapse every run of non-alphanumeric characters to
/// one hyphen, and strip leading/trailing hyphens.
///
/// Example: "My Cool Site!" => "my-cool-site"
pub fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for ch in name.trim().chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(ch);
        } else {
            pending_hyphen = true;
        }
    }

    out
}

/// True when `slug` is already in canonical form.
pub fn is_url_safe(slug: &str) -> bool {
    !slug.is_empty() && slugify(slug) == slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn slugify_collapses_punctuation_and_whitespace() {
        assert_eq!(slugify("My Cool Site!"), "my-cool-site");
        assert_eq!(slugify("  --Hello,   World--  "), "hello-world");
        assert_eq!(slugify("a_b.c"), "a-b-c");
        assert_eq!(slugify("Café 2024"), "caf-2024");
    }

    #[test]
    fn slugify_of_symbols_only_is_empty() {
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify("   "), "");
    }

    #[test]
    fn url_safe_accepts_only_canonical_slugs() {
        assert!(is_url_safe("my-cool-site"));
        assert!(is_url_safe("demo2"));
        assert!(!is_url_safe("My-Site"));
        assert!(!is_url_safe("-demo"));
        assert!(!is_url_safe("a--b"));
        assert!(!is_url_safe("../etc"));
        assert!(!is_url_safe(""));
    }
}
