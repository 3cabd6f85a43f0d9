/// Case-insensitive substring test. Surrounding whitespace in `needle` is
/// ignored; a needle that is empty after trimming matches nothing.
///
/// Only case is folded. Accents stay significant, so `"cafe"` does not match
/// `"Café"`; callers that want diacritic-insensitive search must normalize
/// both sides first.
pub fn contains_match(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    if needle.is_empty() {
        return false;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
