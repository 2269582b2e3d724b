//! Line-oriented heuristics for turning free-form model output into lists.
//!
//! Both functions are pure and total: text that does not look like the
//! requested shape simply produces a shorter (possibly empty) list.

/// Characters stripped from both ends of a vulnerability line.
const BULLET_CHARS: &[char] = &['-', '•', ' '];

/// Lines this short (including any bullet marker) are treated as noise.
const MIN_LINE_CHARS: usize = 3;

/// Prefix the test-case prompt asks the model to put on every case.
pub const CHECKMARK: char = '✅';

/// Marker that identifies a labeled test case anywhere in a line.
const CASE_LABEL: &str = "TC";

/// Split bulleted text into vulnerability descriptions, in source order.
pub fn extract_list_items(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| line.chars().count() > MIN_LINE_CHARS)
        .map(|line| line.trim_matches(BULLET_CHARS).trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Keep only lines that look like labeled test cases, in source order.
pub fn extract_test_cases(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| line.starts_with(CHECKMARK) || line.contains(CASE_LABEL))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_items_strip_bullets_and_short_lines() {
        let items = extract_list_items("- Foo\n• Bar\nHi\n\n- OK");
        assert_eq!(items, vec!["Foo", "Bar", "OK"]);
    }

    #[test]
    fn test_list_items_preserve_order() {
        let text = "- Missing rate limiting on login\n- Passwords stored with MD5\n- Session IDs in URLs";
        assert_eq!(
            extract_list_items(text),
            vec!["Missing rate limiting on login", "Passwords stored with MD5", "Session IDs in URLs"]
        );
    }

    #[test]
    fn test_list_items_trim_surrounding_whitespace() {
        let items = extract_list_items("   -   Open redirect in logout   \r\n\t• Clickjacking on settings page\t");
        assert_eq!(items, vec!["Open redirect in logout", "Clickjacking on settings page"]);
    }

    #[test]
    fn test_list_items_bullet_only_lines_dropped() {
        assert!(extract_list_items("- - - -\n••••\n     ").is_empty());
    }

    #[test]
    fn test_list_items_keep_unbulleted_prose() {
        let items = extract_list_items("Here are the vulnerabilities:\n- XXE in XML import");
        assert_eq!(items, vec!["Here are the vulnerabilities:", "XXE in XML import"]);
    }

    #[test]
    fn test_list_items_empty_input() {
        assert!(extract_list_items("").is_empty());
    }

    #[test]
    fn test_test_cases_keep_labeled_lines() {
        let cases = extract_test_cases("✅ TC1.1: SQL injection\nrandom line\n✅ TC1.2: Overflow");
        assert_eq!(cases, vec!["✅ TC1.1: SQL injection", "✅ TC1.2: Overflow"]);
    }

    #[test]
    fn test_test_cases_match_tc_anywhere() {
        let cases = extract_test_cases("1. TC2.1 - replay captured token\n  ✅ verify lockout  \nNotes: none");
        assert_eq!(cases, vec!["1. TC2.1 - replay captured token", "✅ verify lockout"]);
    }

    #[test]
    fn test_test_cases_are_case_sensitive() {
        assert!(extract_test_cases("tc1.1 lowercase label").is_empty());
    }

    #[test]
    fn test_test_cases_empty_input() {
        assert!(extract_test_cases("\n\n  \n").is_empty());
    }
}
