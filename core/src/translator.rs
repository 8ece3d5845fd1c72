//! Word-by-word translation over a loaded [`Dictionary`].
//!
//! Pipeline for one call:
//! 1. NFC-normalize and convert Chinese punctuation to Latin
//! 2. segment with the phrase trie
//! 3. resolve each token: name table, then trie, then passthrough
//! 4. drop function words
//! 5. apply the phonetic table to what survives
//! 6. join with spaces and clean up the result

use crate::dictionary::Dictionary;
use crate::normalize::normalize;
use crate::punctuation::convert_punctuation;
use crate::utils;

/// First candidate of a `/`-delimited translation list.
pub fn canonical(value: &str) -> &str {
    value.split('/').next().unwrap_or(value)
}

impl Dictionary {
    /// Canonical translation of `word`, if any tier knows it.
    ///
    /// A hit whose first candidate is empty counts as a miss and falls
    /// through to the next tier.
    pub fn resolve(&self, word: &str) -> Option<&str> {
        let from_names = self.names().get(word).map(|v| canonical(v));
        from_names
            .filter(|v| !v.is_empty())
            .or_else(|| self.trie().search(word).map(canonical))
            .filter(|v| !v.is_empty())
    }

    fn is_skipped(&self, word: &str) -> bool {
        self.config().skipped_words.iter().any(|w| w == word)
    }

    /// Translated words in order, before joining and cleanup.
    pub fn translate_words(&self, text: &str) -> Vec<String> {
        let text = convert_punctuation(&utils::nfc(text));
        self.tokenize(&text)
            .filter_map(|token| {
                let chosen = self.resolve(token.text).unwrap_or(token.text);
                if self.is_skipped(token.text) || self.is_skipped(chosen) {
                    return None;
                }
                let word = self
                    .phonetic()
                    .get(chosen)
                    .map(String::as_str)
                    .unwrap_or(chosen);
                Some(word.to_string())
            })
            .collect()
    }

    /// Translate `text`. Total over all input: never fails, and text without
    /// Chinese only goes through punctuation conversion and cleanup.
    ///
    /// # Example
    /// ```
    /// use quicktrans_core::{Config, DictionaryLoader, MemorySource};
    ///
    /// let src = MemorySource::new()
    ///     .with("Names.txt", "老五=Lão Ngũ")
    ///     .with("VietPhrase.txt", "帅气=đẹp trai/soái khí")
    ///     .with("ChinesePhienAmWords.txt", "");
    /// let dict = DictionaryLoader::new(src, Config::default()).load_all();
    ///
    /// assert_eq!(dict.translate("老五真帅气。"), "Lão Ngũ 真 đẹp trai.");
    /// ```
    pub fn translate(&self, text: &str) -> String {
        normalize(&self.translate_words(text).join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trie::Trie;
    use crate::Config;
    use ahash::AHashMap;

    fn dict_with(phrases: &[(&str, &str)], names: &[(&str, &str)], phonetic: &[(&str, &str)]) -> Dictionary {
        let mut trie = Trie::new();
        for (k, v) in phrases.iter().chain(names) {
            trie.insert(k, v);
        }
        let names = names.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        let phonetic: AHashMap<String, String> =
            phonetic.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Dictionary::from_tables(trie, names, phonetic, Config::default())
    }

    #[test]
    fn test_canonical_takes_first_candidate() {
        assert_eq!(canonical("đẹp trai/soái khí"), "đẹp trai");
        assert_eq!(canonical("một"), "một");
        assert_eq!(canonical("/x"), "");
    }

    #[test]
    fn test_translate_example_sentence() {
        let dict = dict_with(&[("帅气", "đẹp trai")], &[("老五", "lão Ngũ")], &[]);
        assert_eq!(
            dict.translate_words("老五真帅气"),
            vec!["lão Ngũ", "真", "đẹp trai"]
        );
        assert_eq!(dict.translate("老五真帅气"), "Lão Ngũ 真 đẹp trai");
    }

    #[test]
    fn test_names_take_priority_over_phrases() {
        let mut trie = Trie::new();
        trie.insert("老五", "năm già");
        let mut names = AHashMap::new();
        names.insert("老五".to_string(), "Lão Ngũ/Ngũ ca".to_string());
        let dict = Dictionary::from_tables(trie, names, AHashMap::new(), Config::default());

        assert_eq!(dict.trie().search("老五"), Some("năm già"));
        assert_eq!(dict.resolve("老五"), Some("Lão Ngũ"));
        assert_eq!(dict.translate("老五"), "Lão Ngũ");
    }

    #[test]
    fn test_phrases_used_when_name_missing() {
        let dict = dict_with(&[("老五", "năm già")], &[], &[]);
        assert_eq!(dict.resolve("老五"), Some("năm già"));
    }

    #[test]
    fn test_empty_candidate_falls_through() {
        let mut trie = Trie::new();
        trie.insert("老五", "Lão Ngũ");
        let mut names = AHashMap::new();
        names.insert("老五".to_string(), "".to_string());
        let dict = Dictionary::from_tables(trie, names, AHashMap::new(), Config::default());

        assert_eq!(dict.resolve("老五"), Some("Lão Ngũ"));
    }

    #[test]
    fn test_function_words_are_dropped() {
        let dict = dict_with(&[("我", "ta"), ("书", "sách")], &[], &[]);
        assert_eq!(dict.translate_words("我的书"), vec!["ta", "sách"]);
        assert_eq!(dict.translate("我的书"), "Ta sách");
        assert_eq!(dict.translate("的了著"), "");
    }

    #[test]
    fn test_function_word_dropped_by_translation() {
        let dict = dict_with(&[("之", "的")], &[], &[]);
        assert_eq!(dict.translate_words("之"), Vec::<String>::new());
    }

    #[test]
    fn test_phonetic_substitution_applies_after_lookup() {
        let dict = dict_with(&[("帅气", "soái khí/đẹp trai")], &[], &[("soái khí", "suất khí")]);
        assert_eq!(dict.translate("帅气"), "Suất khí");
    }

    #[test]
    fn test_phonetic_applies_to_untranslated_tokens() {
        let dict = dict_with(&[], &[], &[("真", "chân")]);
        assert_eq!(dict.translate("真"), "Chân");
    }

    #[test]
    fn test_punctuation_and_capitalization() {
        let dict = dict_with(&[("你好", "xin chào"), ("朋友", "bằng hữu")], &[], &[]);
        assert_eq!(dict.translate("你好。朋友！"), "Xin chào. Bằng hữu!");
        assert_eq!(dict.translate("“你好”，朋友"), "\"Xin chào\", bằng hữu");
    }

    #[test]
    fn test_lines_are_kept() {
        let dict = dict_with(&[("你好", "xin chào"), ("朋友", "bằng hữu")], &[], &[]);
        assert_eq!(dict.translate("你好\n朋友"), "Xin chào\nBằng hữu");
    }

    #[test]
    fn test_non_chinese_input_is_only_normalized() {
        let dict = dict_with(&[], &[], &[]);
        assert_eq!(dict.translate(""), "");
        assert_eq!(dict.translate("hello  world ."), "Hello world.");
    }
}
