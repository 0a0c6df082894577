//! Text manipulation utilities

/// Capitalizes the first character of a string
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// True when `s` can be used as a plain Rust identifier fragment.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize_first_empty_string() {
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn test_capitalize_first_single_char() {
        assert_eq!(capitalize_first("a"), "A");
        assert_eq!(capitalize_first("Z"), "Z");
    }

    #[test]
    fn test_capitalize_first_with_underscores() {
        assert_eq!(capitalize_first("fetch_user"), "Fetch_user");
        assert_eq!(capitalize_first("_private"), "_private");
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("mock"));
        assert!(is_identifier("_stub2"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("2fast"));
        assert!(!is_identifier("with-dash"));
    }
}
