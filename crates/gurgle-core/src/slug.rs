//! URL-safe slugs for clip keys.

/// Convert an identifier to a URL-safe slug.
///
/// Non-ASCII text is transliterated first (`é` becomes `e`), then every run
/// of characters that are not ASCII letters or digits, apostrophes included,
/// collapses into a single `-`. The result is lowercase with no leading or
/// trailing separator.
pub fn slugify(input: &str) -> String {
    let ascii = deunicode::deunicode(input);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_separator = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}
