/// Turns a human-readable name into a URL slug: lowercase, characters other
/// than alphanumerics, whitespace and hyphens dropped, and every run of
/// whitespace or hyphens collapsed into one hyphen.
pub fn slugify(input: &str) -> String {
    let lowered = input.to_lowercase();
    let kept: String = lowered
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect();
    kept.split(|c: char| c.is_whitespace() || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
