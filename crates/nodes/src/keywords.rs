//! Comma-separated keyword specs.

/// `true` when any keyword in `spec` occurs in `haystack`.
///
/// Keywords are trimmed and lower-cased; empty entries never match.
/// `haystack` must already be lower-cased.
pub fn matches(spec: &str, haystack: &str) -> bool {
    spec.split(',')
        .map(|keyword| keyword.trim().to_lowercase())
        .filter(|keyword| !keyword.is_empty())
        .any(|keyword| haystack.contains(&keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_keyword_is_enough() {
        assert!(matches("urgent, critical, asap", "server is down - critical issue"));
        assert!(!matches("urgent, critical, asap", "question about pricing"));
    }

    #[test]
    fn keywords_are_trimmed_and_lowered() {
        assert!(matches("  Pricing ,PLANS", "question about pricing plans"));
    }

    #[test]
    fn empty_entries_never_match() {
        assert!(!matches("", "anything"));
        assert!(!matches(" , ,", "anything"));
        assert!(matches("down,", "server down"));
    }

    #[test]
    fn matches_are_substrings() {
        assert!(matches("tech", "technical problem"));
    }
}
