//! Output cleanup for word-by-word translations.
//!
//! Joining substituted tokens with single spaces leaves artifacts: spaces
//! before commas and closing brackets, spaces inside opening brackets, and
//! lowercase words at sentence starts. [`normalize`] repairs them in a fixed
//! order; each pass sees the output of the previous one.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static SPACE_BEFORE_CLOSING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ ]+([,.?!\]>”’):])").expect("static regex"));

static SPACE_AFTER_OPENING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([<\[“‘(])[ ]+").expect("static regex"));

// start of a line, or a sentence/quote/bracket/dash mark, then the first
// lowercase letter
static SENTENCE_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)(^\s*|[.!?“‘”’\[\-]\s*)(\p{Ll})").expect("static regex"));

static CURLY_QUOTES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[“‘”’]").expect("static regex"));

static SPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ ]{2,}").expect("static regex"));

/// Trim every line on its own, keeping the line breaks.
pub fn trim_lines(text: &str) -> String {
    text.split('\n').map(str::trim).collect::<Vec<_>>().join("\n")
}

/// Remove spaces in front of `, . ? ! ] > ” ’ ) :`.
pub fn trim_space_before_closing(text: &str) -> String {
    SPACE_BEFORE_CLOSING.replace_all(text, "${1}").into_owned()
}

/// Remove spaces after `< [ “ ‘ (`.
pub fn trim_space_after_opening(text: &str) -> String {
    SPACE_AFTER_OPENING.replace_all(text, "${1}").into_owned()
}

/// Uppercase the first lowercase letter of each line and after each of
/// `. ! ? “ ‘ ” ’ [ -`, skipping any whitespace in between.
pub fn capitalize_sentences(text: &str) -> String {
    SENTENCE_START
        .replace_all(text, |caps: &Captures| {
            format!("{}{}", &caps[1], caps[2].to_uppercase())
        })
        .into_owned()
}

/// Replace curly single and double quotes with `"`.
pub fn straighten_quotes(text: &str) -> String {
    CURLY_QUOTES.replace_all(text, "\"").into_owned()
}

/// Collapse runs of spaces into one.
pub fn collapse_spaces(text: &str) -> String {
    SPACE_RUNS.replace_all(text, " ").into_owned()
}

/// Run every cleanup pass in order.
///
/// # Example
/// ```
/// use quicktrans_core::normalize::normalize;
///
/// assert_eq!(normalize("  xin chào ,  “ bạn ” ."), "Xin chào, \"Bạn\".");
/// ```
pub fn normalize(text: &str) -> String {
    let text = trim_lines(text);
    let text = trim_space_before_closing(&text);
    let text = trim_space_after_opening(&text);
    let text = capitalize_sentences(&text);
    let text = straighten_quotes(&text);
    collapse_spaces(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_lines_keeps_breaks() {
        assert_eq!(trim_lines("  a  \n\n b \t"), "a\n\nb");
    }

    #[test]
    fn test_space_before_closing_marks() {
        assert_eq!(trim_space_before_closing("a , b . c ) d ]"), "a, b. c) d]");
        assert_eq!(trim_space_before_closing("hỏi ?  thật !"), "hỏi?  thật!");
    }

    #[test]
    fn test_space_after_opening_marks() {
        assert_eq!(trim_space_after_opening("( a ) [  b ]"), "(a ) [b ]");
        assert_eq!(trim_space_after_opening("“ chào"), "“chào");
    }

    #[test]
    fn test_capitalize_after_sentence_marks() {
        assert_eq!(
            capitalize_sentences("một. hai! ba? bốn"),
            "Một. Hai! Ba? Bốn"
        );
        assert_eq!(capitalize_sentences("nói: “được”"), "Nói: “Được”");
        assert_eq!(capitalize_sentences("[tên] - đúng"), "[Tên] - Đúng");
    }

    #[test]
    fn test_capitalize_each_line() {
        assert_eq!(capitalize_sentences("một\nhai\n  ba"), "Một\nHai\n  Ba");
    }

    #[test]
    fn test_capitalize_only_one_letter_per_match() {
        assert_eq!(capitalize_sentences("đẹp trai"), "Đẹp trai");
        // commas do not start a sentence
        assert_eq!(capitalize_sentences("Ừ, được"), "Ừ, được");
    }

    #[test]
    fn test_capitalize_ignores_non_letters() {
        assert_eq!(capitalize_sentences("3 người"), "3 người");
        assert_eq!(capitalize_sentences("真 đẹp"), "真 đẹp");
    }

    #[test]
    fn test_quotes_become_straight() {
        assert_eq!(straighten_quotes("“a” ‘b’"), "\"a\" \"b\"");
    }

    #[test]
    fn test_collapse_spaces() {
        assert_eq!(collapse_spaces("a  b     c d"), "a b c d");
    }

    #[test]
    fn test_normalize_full_pipeline() {
        assert_eq!(normalize("Lão Ngũ 真 đẹp trai"), "Lão Ngũ 真 đẹp trai");
        assert_eq!(normalize("ta đi .  ngươi ở lại ."), "Ta đi. Ngươi ở lại.");
        assert_eq!(normalize(" hắn nói : “ đi ”"), "Hắn nói: \"Đi\"");
    }

    #[test]
    fn test_capitalize_sees_trimmed_quote() {
        // the space after the quote is gone before capitalization runs
        assert_eq!(normalize("“  xin chào”"), "\"Xin chào\"");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "Lão Ngũ 真 đẹp trai",
            "Ta đi. Ngươi ở lại.\nHắn nói: \"Đi\"",
            "",
            "(Ghi chú) [Tên]",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
            assert_eq!(once, input);
        }
    }

    #[test]
    fn test_normalize_empty_and_blank() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n  "), "\n");
    }
}
