//! Search button gate.

/// The submit control is disabled exactly when the trimmed input is empty.
#[must_use]
pub fn search_disabled(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_only_for_blank_input() {
        assert!(search_disabled(""));
        assert!(search_disabled(" "));
        assert!(search_disabled("\t\n"));
        assert!(!search_disabled("a"));
        assert!(!search_disabled("  rust  "));
    }
}
