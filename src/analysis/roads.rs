//! Road name extraction from travel directions
//!
//! Patterns are tried in order and the first one that matches wins; only the
//! first match inside the step is used.

use regex::Regex;
use std::sync::OnceLock;

/// `onto <word> <number>`, e.g. "onto I 95". The number must be a whole
/// token, so "onto East 8th" falls through to the next pattern.
const NUMBERED_ROAD: &str = r"onto (\w+\s+\d+)\b";

/// `onto <word> <word>`, e.g. "onto Main Street"
const NAMED_ROAD: &str = r"onto (\w+\s+\w+)";

fn road_patterns() -> &'static [Regex; 2] {
    static PATTERNS: OnceLock<[Regex; 2]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            Regex::new(NUMBERED_ROAD).expect("numbered road pattern compiles"),
            Regex::new(NAMED_ROAD).expect("named road pattern compiles"),
        ]
    })
}

/// Extract the road a direction step turns onto, if it names one
pub fn extract_road_name(step: &str) -> Option<&str> {
    road_patterns().iter().find_map(|pattern| {
        pattern
            .captures(step)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_road() {
        assert_eq!(
            extract_road_name("Keep left onto I 25 Express Lane, I 25 Express"),
            Some("I 25")
        );
    }

    #[test]
    fn test_named_road() {
        assert_eq!(
            extract_road_name("Turn left onto Logan Street"),
            Some("Logan Street")
        );
        assert_eq!(
            extract_road_name("Turn sharp right onto Cave of the Winds Road"),
            Some("Cave of")
        );
    }

    #[test]
    fn test_ordinal_street_uses_named_pattern() {
        let road = extract_road_name("Turn right onto East 8th Avenue").unwrap();
        assert!(road.contains("East 8th"));
    }

    #[test]
    fn test_no_road() {
        assert_eq!(extract_road_name("Keep left"), None);
        assert_eq!(extract_road_name("Turn left onto Broadway"), None);
        assert_eq!(extract_road_name(""), None);
    }

    #[test]
    fn test_first_occurrence_only() {
        assert_eq!(
            extract_road_name("Merge onto US 1 then onto Main Street"),
            Some("US 1")
        );
        assert_eq!(
            extract_road_name("Exit onto Elm Street then onto Oak Lane"),
            Some("Elm Street")
        );
    }
}
