/// Turn a human readable name into a URL-safe identifier.
///
/// Letters and digits are kept (lowercased), runs of whitespace and the
/// separators `- _ . / :` collapse into a single `-`, anything else is dropped.
/// The same input always yields the same slug; uniqueness is up to the caller.
pub fn create_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else if c.is_whitespace() || matches!(c, '-' | '_' | '.' | '/' | ':') {
            pending_dash = true;
        }
    }

    slug
}
