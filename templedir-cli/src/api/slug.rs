//! URL slug generation
//!
//! Slugs are derived from the temple name and must be unique in the
//! temples table; collisions are resolved by numeric suffixing.

use std::collections::HashSet;

/// Lowercase, keep only [a-z0-9 -], collapse whitespace runs and repeated
/// hyphens to single hyphens, trim edge hyphens.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut last_hyphen = true; // suppress a leading hyphen

    for c in lowered.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
            last_hyphen = false;
        } else if c.is_whitespace() || c == '-' {
            if !last_hyphen {
                slug.push('-');
                last_hyphen = true;
            }
        }
        // Everything else is dropped
    }

    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// First free slug: `base`, then `base-1`, `base-2`, ...
pub fn dedupe_slug(base: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }
    let mut n = 1u32;
    loop {
        let candidate = format!("{}-{}", base, n);
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Sri Temple"), "sri-temple");
        assert_eq!(slugify("Sri Venkateswara Temple"), "sri-venkateswara-temple");
    }

    #[test]
    fn test_slugify_strips_punctuation() {
        assert_eq!(slugify("Shri Swaminarayan Mandir (BAPS)"), "shri-swaminarayan-mandir-baps");
        assert_eq!(slugify("St. Mary's"), "st-marys");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("  Sri   Temple  "), "sri-temple");
        assert_eq!(slugify("Sri--Temple"), "sri-temple");
        assert_eq!(slugify("- Sri Temple -"), "sri-temple");
    }

    #[test]
    fn test_slugify_is_deterministic() {
        assert_eq!(slugify("Sri Temple #1"), slugify("Sri Temple #1"));
    }

    #[test]
    fn test_dedupe_slug_suffixes_until_free() {
        let taken: HashSet<String> = ["sri-temple", "sri-temple-1"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(dedupe_slug(&slugify("Sri Temple"), &taken), "sri-temple-2");
        assert_eq!(dedupe_slug("jain-center", &taken), "jain-center");
    }
}
