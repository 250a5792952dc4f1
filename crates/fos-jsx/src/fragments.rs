//! Literal fragments and the marker codec
//!
//! A template is a sequence of literal fragments with a substitution slot
//! between each pair. The fragments are joined into one markup string with a
//! `[[[n]]]` marker in slot `n`; the marker survives a trip through the
//! markup parser (including inside attribute values) and is decoded back
//! into a reference afterwards.

use std::fmt;
use std::rc::{Rc, Weak};

const MARKER_OPEN: &str = "[[[";
const MARKER_CLOSE: &str = "]]]";

/// Literal fragments of one template call site
///
/// Cloning is cheap and keeps the identity: the cache keys on the shared
/// allocation, not on the text.
#[derive(Clone)]
pub struct Fragments(Rc<[Box<str>]>);

impl Fragments {
    /// Create a new fragment sequence (a distinct identity)
    pub fn new<S: AsRef<str>>(fragments: &[S]) -> Self {
        Self(fragments.iter().map(|s| Box::from(s.as_ref())).collect())
    }

    /// Number of fragments
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of substitution slots (one fewer than the fragments)
    pub fn slot_count(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Get a fragment
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(|s| &**s)
    }

    /// Iterate over the fragments
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|s| &**s)
    }

    /// Whether both values are the same call site
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Join the fragments, inserting `marker(i)` after fragment `i` except
    /// the last
    pub fn join_with_markers(&self) -> String {
        let capacity = self.0.iter().map(|s| s.len() + 8).sum();
        let mut markup = String::with_capacity(capacity);
        for (index, fragment) in self.0.iter().enumerate() {
            markup.push_str(fragment);
            if index + 1 < self.0.len() {
                markup.push_str(&marker(index));
            }
        }
        markup
    }

    /// Identity key: the address of the shared allocation
    pub(crate) fn key(&self) -> usize {
        Rc::as_ptr(&self.0).cast::<()>() as usize
    }

    pub(crate) fn downgrade(&self) -> Weak<[Box<str>]> {
        Rc::downgrade(&self.0)
    }
}

impl fmt::Debug for Fragments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<S: AsRef<str>> From<&[S]> for Fragments {
    fn from(fragments: &[S]) -> Self {
        Self::new(fragments)
    }
}

/// The marker for substitution slot `index`
pub fn marker(index: usize) -> String {
    format!("{MARKER_OPEN}{index}{MARKER_CLOSE}")
}

/// A piece of decoded text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Reference(usize),
}

/// Split `text` on markers
///
/// Empty text segments are dropped, so a string that is exactly one marker
/// decodes to a single `Reference`. Bracket runs that are not a well-formed
/// marker stay literal.
pub fn decode_markers(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut search = 0;

    while let Some(offset) = text[search..].find(MARKER_OPEN) {
        let open = search + offset;
        let digits_start = open + MARKER_OPEN.len();
        let digits_len = text[digits_start..]
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        let digits_end = digits_start + digits_len;

        let index = if digits_len > 0 && text[digits_end..].starts_with(MARKER_CLOSE) {
            text[digits_start..digits_end].parse::<usize>().ok()
        } else {
            None
        };

        match index {
            Some(index) => {
                if open > start {
                    segments.push(Segment::Text(&text[start..open]));
                }
                segments.push(Segment::Reference(index));
                start = digits_end + MARKER_CLOSE.len();
                search = start;
            }
            // '[' is one byte, so open + 1 is a char boundary
            None => search = open + 1,
        }
    }

    if start < text.len() {
        segments.push(Segment::Text(&text[start..]));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_with_markers() {
        let fragments = Fragments::new(&["<div>", "foo", "</div>"]);
        assert_eq!(fragments.join_with_markers(), "<div>[[[0]]]foo[[[1]]]</div>");
        assert_eq!(fragments.slot_count(), 2);
    }

    #[test]
    fn test_single_fragment_has_no_marker() {
        let fragments = Fragments::new(&["<br/>"]);
        assert_eq!(fragments.join_with_markers(), "<br/>");
        assert_eq!(fragments.slot_count(), 0);
    }

    #[test]
    fn test_decode_markers() {
        assert_eq!(
            decode_markers("[[[0]]]foo[[[12]]]"),
            vec![Segment::Reference(0), Segment::Text("foo"), Segment::Reference(12)]
        );
        assert_eq!(decode_markers("[[[3]]]"), vec![Segment::Reference(3)]);
        assert_eq!(decode_markers("plain"), vec![Segment::Text("plain")]);
    }

    #[test]
    fn test_malformed_markers_stay_literal() {
        assert_eq!(decode_markers("[[[x]]] [[[]]]"), vec![Segment::Text("[[[x]]] [[[]]]")]);
        assert_eq!(
            decode_markers("a[[[[1]]]b"),
            vec![Segment::Text("a["), Segment::Reference(1), Segment::Text("b")]
        );
    }

    #[test]
    fn test_identity() {
        let a = Fragments::new(&["<p>", "</p>"]);
        let b = Fragments::new(&["<p>", "</p>"]);
        assert!(a.ptr_eq(&a.clone()));
        assert!(!a.ptr_eq(&b));
        assert_ne!(a.key(), b.key());
    }
}
