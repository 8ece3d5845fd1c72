//! Dictionary file sanitizer.
//!
//! Prepares raw `key=value` files for the loader: normalizes the alternative
//! separator `|` to `/`, moves empty-valued entries to a separate rejects
//! list, drops degenerate pairs and keeps the first value for every key.

use std::collections::HashSet;
use std::fmt;

/// Why a line was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Problem {
    NoSeparator,
    EmptyKey,
    /// Value is identical to the key.
    ValueIsKey,
    /// Lowercased value is identical to the key.
    LowercaseValueIsKey,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Problem::NoSeparator => "line has no '='",
            Problem::EmptyKey => "key is empty",
            Problem::ValueIsKey => "value equals key",
            Problem::LowercaseValueIsKey => "lowercased value equals key",
        };
        f.write_str(msg)
    }
}

/// A dropped line, 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    pub line_no: usize,
    pub line: String,
    pub problem: Problem,
}

#[derive(Debug, Default)]
pub struct Sanitized {
    /// Clean `key=value` lines, first occurrence of each key.
    pub accepted: Vec<String>,
    /// `key=` lines whose value was empty.
    pub empty_values: Vec<String>,
    pub rejected: Vec<Rejected>,
    /// Later lines for a key already accepted.
    pub duplicates: usize,
}

impl Sanitized {
    pub fn accepted_text(&self) -> String {
        self.accepted.join("\n")
    }

    pub fn empty_values_text(&self) -> String {
        self.empty_values.join("\n")
    }
}

pub fn sanitize(content: &str) -> Sanitized {
    let mut out = Sanitized::default();
    let mut seen: HashSet<String> = HashSet::new();

    for (idx, line) in content.split('\n').enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let reject = |problem| Rejected {
            line_no: idx + 1,
            line: line.to_string(),
            problem,
        };

        let Some((key, value)) = line.split_once('=') else {
            out.rejected.push(reject(Problem::NoSeparator));
            continue;
        };
        let key = key.trim();
        let value = value.trim();
        let fixed = value.replace('|', "/");

        if key.is_empty() {
            out.rejected.push(reject(Problem::EmptyKey));
            continue;
        }
        if fixed.is_empty() {
            out.empty_values.push(format!("{}={}", key, value));
            continue;
        }
        if key == fixed {
            out.rejected.push(reject(Problem::ValueIsKey));
            continue;
        }
        if key == fixed.to_lowercase() {
            out.rejected.push(reject(Problem::LowercaseValueIsKey));
            continue;
        }

        if seen.insert(key.to_string()) {
            out.accepted.push(format!("{}={}", key, fixed));
        } else {
            out.duplicates += 1;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_and_rewrites_separator() {
        let s = sanitize("老五 = Lão Ngũ|Ngũ ca\n帅气=đẹp trai\n");
        assert_eq!(s.accepted, ["老五=Lão Ngũ/Ngũ ca", "帅气=đẹp trai"]);
        assert!(s.rejected.is_empty());
    }

    #[test]
    fn test_empty_values_go_to_rejects_list() {
        let s = sanitize("的=\n了=  \n");
        assert_eq!(s.empty_values, ["的=", "了="]);
        assert!(s.accepted.is_empty());
        assert_eq!(s.empty_values_text(), "的=\n了=");
    }

    #[test]
    fn test_degenerate_lines_are_reported() {
        let s = sanitize("no separator\n=orphan\nabc=abc\nabc=ABC\n");
        let problems: Vec<(usize, Problem)> =
            s.rejected.iter().map(|r| (r.line_no, r.problem)).collect();
        assert_eq!(
            problems,
            vec![
                (1, Problem::NoSeparator),
                (2, Problem::EmptyKey),
                (3, Problem::ValueIsKey),
                (4, Problem::LowercaseValueIsKey),
            ]
        );
        assert!(s.accepted.is_empty());
    }

    #[test]
    fn test_first_value_wins() {
        let s = sanitize("帅气=đẹp trai\n帅气=soái khí\n");
        assert_eq!(s.accepted_text(), "帅气=đẹp trai");
        assert_eq!(s.duplicates, 1);
    }

    #[test]
    fn test_blank_and_crlf_lines() {
        let s = sanitize("\r\n  \n你好=xin chào\r\n");
        assert_eq!(s.accepted, ["你好=xin chào"]);
        assert!(s.rejected.is_empty());
    }

    #[test]
    fn test_output_parses_back_through_loader() {
        let s = sanitize("老五=Lão Ngũ|Ngũ ca\nbad\n帅气=đẹp trai");
        let mut pairs = Vec::new();
        let stats = quicktrans_core::load_source(&s.accepted_text(), |k, v| {
            pairs.push((k.to_string(), v.to_string()))
        });
        assert_eq!(stats.skipped, 0);
        assert_eq!(pairs.len(), 2);
        assert_eq!(quicktrans_core::canonical(&pairs[0].1), "Lão Ngũ");
    }
}
