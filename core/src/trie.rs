//! Prefix trie over Chinese phrases, used for lookup and longest-match segmentation.
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// A single node of the phrase trie.
///
/// Children are keyed by one character each. A node marked `is_end` terminates
/// a dictionary key and carries that key's translation (a `/`-delimited list of
/// candidates, the first one canonical).
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct TrieNode {
    children: AHashMap<char, Box<TrieNode>>,
    is_end: bool,
    translation: Option<String>,
}

impl TrieNode {
    fn new() -> Self {
        Self::default()
    }

    /// Translation stored on this node, if it terminates a key.
    fn translation(&self) -> Option<&str> {
        if self.is_end {
            self.translation.as_deref()
        } else {
            None
        }
    }

    /// Child reached by `ch`, if any.
    fn child(&self, ch: char) -> Option<&TrieNode> {
        self.children.get(&ch).map(|b| &**b)
    }
}

/// Phrase dictionary keyed on character sequences.
///
/// # Example
/// ```
/// use quicktrans_core::Trie;
///
/// let mut trie = Trie::new();
/// trie.insert("老五", "Lão Ngũ");
/// trie.insert("帅气", "đẹp trai/soái khí");
///
/// assert_eq!(trie.search("老五"), Some("Lão Ngũ"));
/// assert_eq!(trie.search("老"), None);
///
/// let input: Vec<char> = "老五真帅气".chars().collect();
/// assert_eq!(trie.longest_prefix(&input, 0), Some(2));
/// assert_eq!(trie.longest_prefix(&input, 2), None);
/// ```
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Trie {
    root: TrieNode,
    len: usize,
}

impl Trie {
    /// Create an empty trie.
    pub fn new() -> Self {
        Self::default()
    }

    fn node_for_insert(&mut self, key: &str) -> &mut TrieNode {
        let mut node = &mut self.root;
        for ch in key.chars() {
            node = node
                .children
                .entry(ch)
                .or_insert_with(|| Box::new(TrieNode::new()))
                .as_mut();
        }
        node
    }

    /// Insert `key` with its translation. A repeated insert of the same key
    /// overwrites the stored translation.
    pub fn insert(&mut self, key: &str, value: &str) {
        let node = self.node_for_insert(key);
        let fresh = !node.is_end;
        node.is_end = true;
        node.translation = Some(value.to_string());
        if fresh {
            self.len += 1;
        }
    }

    /// Insert `key` only if it is not already a complete entry.
    ///
    /// Returns `true` if the value was stored.
    pub fn insert_if_absent(&mut self, key: &str, value: &str) -> bool {
        let node = self.node_for_insert(key);
        if node.is_end {
            return false;
        }
        node.is_end = true;
        node.translation = Some(value.to_string());
        self.len += 1;
        true
    }

    /// Exact lookup. A key that only exists as a prefix of longer entries
    /// is not found.
    pub fn search(&self, key: &str) -> Option<&str> {
        let mut node = &self.root;
        for ch in key.chars() {
            node = node.child(ch)?;
        }
        node.translation()
    }

    /// Whether `key` is a complete entry.
    pub fn contains_key(&self, key: &str) -> bool {
        self.search(key).is_some()
    }

    /// Walk the trie from `start` as far as `input` allows and return the
    /// exclusive end index of the last position that completed an entry.
    ///
    /// The deepest reachable node does not count unless it ends an entry, so
    /// a long path that is only a prefix of some key never yields a match.
    pub fn longest_prefix(&self, input: &[char], start: usize) -> Option<usize> {
        let mut node = &self.root;
        let mut last = None;
        for (idx, &ch) in input.iter().enumerate().skip(start) {
            match node.child(ch) {
                Some(child) => {
                    node = child;
                    if node.is_end {
                        last = Some(idx + 1);
                    }
                }
                None => break,
            }
        }
        last
    }

    /// Number of complete entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

}
