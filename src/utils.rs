/// Lowercase ASCII slug for element ids and section anchors.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut last_dash = false;
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash && !slug.is_empty() {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Organic Chemistry"), "organic-chemistry");
        assert_eq!(slugify("  Maths & Stats  "), "maths-stats");
        assert_eq!(slugify("Already-Slugged"), "already-slugged");
        assert_eq!(slugify(""), "");
    }
}
