//! Chinese and full-width punctuation to Latin punctuation.
//!
//! Some marks expand to more than one character: sentence and clause
//! separators gain a trailing space so the following word does not stick to
//! them, and the ellipsis becomes three dots.

use phf::phf_map;

static PUNCTUATION: phf::Map<char, &'static str> = phf_map! {
    '。' => ". ",
    '，' => ", ",
    '、' => ", ",
    '；' => ";",
    '！' => "!",
    '？' => "?",
    '：' => ": ",
    '（' => "(",
    '）' => ")",
    '〔' => "[",
    '〕' => "]",
    '【' => "[",
    '】' => "]",
    '《' => "<",
    '》' => ">",
    '｛' => "{",
    '｝' => "}",
    '『' => "[",
    '』' => "]",
    '〈' => "<",
    '〉' => ">",
    '～' => "~",
    '—' => "-",
    '…' => "...",
    '〖' => "[",
    '〗' => "]",
    '〘' => "[",
    '〙' => "]",
    '〚' => "[",
    '〛' => "]",
    '\u{3000}' => " ",
};

/// Latin replacement for a single mark, if it has one.
pub fn latin_for(ch: char) -> Option<&'static str> {
    PUNCTUATION.get(&ch).copied()
}

/// Replace every mapped mark in `text`; everything else is copied through.
pub fn convert_punctuation(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match latin_for(ch) {
            Some(latin) => out.push_str(latin),
            None => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentence_end_gains_space() {
        assert_eq!(convert_punctuation("你好。"), "你好. ");
    }

    #[test]
    fn test_multi_character_expansions() {
        assert_eq!(convert_punctuation("等等…"), "等等...");
        assert_eq!(convert_punctuation("甲，乙、丙"), "甲, 乙, 丙");
    }

    #[test]
    fn test_brackets_and_ideographic_space() {
        assert_eq!(convert_punctuation("【书】《名》"), "[书]<名>");
        assert_eq!(convert_punctuation("一\u{3000}二"), "一 二");
    }

    #[test]
    fn test_unmapped_characters_pass_through() {
        assert_eq!(convert_punctuation("abc“引”"), "abc“引”");
        assert_eq!(latin_for('a'), None);
        assert_eq!(convert_punctuation(""), "");
    }
}
