pub mod time_utils;

/// Normalizes an optional entity reference coming from a request body.
///
/// Blank strings are treated the same as an absent reference.
pub fn normalize_reference(reference: Option<String>) -> Option<String> {
    reference
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
}

#[cfg(test)]
mod tests {
    use super::normalize_reference;

    #[test]
    fn test_normalize_reference() {
        assert_eq!(normalize_reference(None), None);
        assert_eq!(normalize_reference(Some("".to_string())), None);
        assert_eq!(normalize_reference(Some("   ".to_string())), None);
        assert_eq!(
            normalize_reference(Some(" abc ".to_string())),
            Some("abc".to_string())
        );
    }
}
