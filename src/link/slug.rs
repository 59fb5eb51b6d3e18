//! URL slug normalisation

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Turn arbitrary text into a URL slug
///
/// Lowercases, strips diacritics, collapses every run of characters outside
/// `[a-z0-9]` into a single hyphen and trims hyphens from both ends. The
/// result may be empty.
///
/// ```
/// use dealer_desk::link::slugify;
/// assert_eq!(slugify("Citroën-C4 Cactus!!-2021"), "citroen-c4-cactus-2021");
/// ```
pub fn slugify(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    let mut pending_hyphen = false;

    for c in raw
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
    {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}
