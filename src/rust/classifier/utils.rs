use std::collections::HashSet;

use super::model::Tag;

pub(crate) fn normalize_name(name: &str) -> String {
    name.to_lowercase()
}

/// Collapses tag names into a set of normalized names; order and duplicates are irrelevant.
pub(crate) fn tag_name_set(tags: &[Tag]) -> HashSet<String> {
    tags.iter().map(|tag| normalize_name(&tag.name)).collect()
}

pub(crate) fn is_hex_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_name_set_collapses_case() {
        let tags = vec![
            Tag::new("Plastic", 0.9),
            Tag::new("PLASTIC", 0.8),
            Tag::new("plastic", 0.1),
        ];
        let names = tag_name_set(&tags);
        assert_eq!(names.len(), 1);
        assert!(names.contains("plastic"));
    }

    #[test]
    fn test_normalize_keeps_whitespace() {
        assert_eq!(normalize_name("Glass Bottle"), "glass bottle");
        assert_eq!(normalize_name(" glass"), " glass");
    }

    #[test]
    fn test_is_hex_color() {
        assert!(is_hex_color("#4CAF50"));
        assert!(is_hex_color("#9e9e9e"));
        assert!(!is_hex_color("4CAF50"));
        assert!(!is_hex_color("#4CAF5"));
        assert!(!is_hex_color("#GGGGGG"));
    }
}
