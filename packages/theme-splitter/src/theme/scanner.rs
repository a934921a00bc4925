//! Bracket-counting scanner for object and array literals in theme source.
//!
//! The scanner works on bytes. Every delimiter it cares about is ASCII, and
//! UTF-8 continuation bytes never collide with ASCII, so byte offsets it
//! returns always fall on `char` boundaries.
//!
//! String literals (`'`, `"`, `` ` ``) and comments (`//`, `/* */`) are
//! skipped, so braces inside them never affect nesting.

/// A `key:` occurrence outside of strings and comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyOccurrence<'a> {
    pub key: &'a str,
    /// Bracket nesting depth at which the key appears (0 = top level).
    pub depth: usize,
    /// Byte offset of the first character of the key.
    pub key_start: usize,
    /// Byte offset of the first non-whitespace byte after the colon.
    pub value_start: usize,
}

impl<'a> KeyOccurrence<'a> {
    /// The balanced value following this key, if it opens with `open`.
    ///
    /// Returns the slice from the opening delimiter through its matching
    /// closing delimiter.
    #[must_use]
    pub fn balanced_value(&self, src: &'a str, open: u8) -> Option<&'a str> {
        if src.as_bytes().get(self.value_start) != Some(&open) {
            return None;
        }
        let end = balanced_end(src, self.value_start)?;
        Some(&src[self.value_start..end])
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

/// Skip a string literal starting at `start` (which holds the quote).
///
/// Returns the offset just past the closing quote. Unterminated `'`/`"`
/// strings end at the line break; unterminated template literals run to
/// the end of input.
fn skip_string(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            b'\n' if quote != b'`' => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Skip a comment starting at `start`, if there is one.
fn skip_comment(bytes: &[u8], start: usize) -> Option<usize> {
    if bytes[start] != b'/' {
        return None;
    }
    match bytes.get(start + 1) {
        Some(b'/') => {
            let end = bytes[start + 2..]
                .iter()
                .position(|&b| b == b'\n')
                .map_or(bytes.len(), |p| start + 2 + p);
            Some(end)
        }
        Some(b'*') => {
            let end = bytes[start + 2..]
                .windows(2)
                .position(|w| w == b"*/")
                .map_or(bytes.len(), |p| start + 2 + p + 2);
            Some(end)
        }
        _ => None,
    }
}

/// Find the end of the balanced literal opening at `open`.
///
/// `src[open]` must be `{`, `[` or `(`. Returns the offset just past the
/// matching closing delimiter, or `None` if the input ends first or a
/// closing delimiter of the wrong kind shows up.
#[must_use]
pub fn balanced_end(src: &str, open: usize) -> Option<usize> {
    let bytes = src.as_bytes();
    if !matches!(bytes.get(open), Some(b'{' | b'[' | b'(')) {
        return None;
    }

    let mut expected: Vec<u8> = Vec::new();
    let mut i = open;
    while i < bytes.len() {
        if let Some(next) = skip_comment(bytes, i) {
            i = next;
            continue;
        }
        match bytes[i] {
            b'\'' | b'"' | b'`' => {
                i = skip_string(bytes, i);
                continue;
            }
            b'{' => expected.push(b'}'),
            b'[' => expected.push(b']'),
            b'(' => expected.push(b')'),
            close @ (b'}' | b']' | b')') => {
                if expected.pop() != Some(close) {
                    return None;
                }
                if expected.is_empty() {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Collect every identifier key (`name:`) in `src` with its nesting depth.
///
/// Quoted keys are not reported. `a ? b : c` also yields `b` as a key; callers
/// filter on the key name and the shape of the value, so such hits are
/// harmless.
#[must_use]
pub fn scan_keys(src: &str) -> Vec<KeyOccurrence<'_>> {
    let bytes = src.as_bytes();
    let mut keys = Vec::new();
    let mut depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        if let Some(next) = skip_comment(bytes, i) {
            i = next;
            continue;
        }
        match bytes[i] {
            b'\'' | b'"' | b'`' => i = skip_string(bytes, i),
            b'{' | b'[' | b'(' => {
                depth += 1;
                i += 1;
            }
            b'}' | b']' | b')' => {
                depth = depth.saturating_sub(1);
                i += 1;
            }
            b if is_ident_start(b) && (i == 0 || !is_ident_char(bytes[i - 1])) => {
                let start = i;
                while i < bytes.len() && is_ident_char(bytes[i]) {
                    i += 1;
                }
                let colon = skip_whitespace(bytes, i);
                if bytes.get(colon) == Some(&b':') && bytes.get(colon + 1) != Some(&b':') {
                    keys.push(KeyOccurrence {
                        key: &src[start..i],
                        depth,
                        key_start: start,
                        value_start: skip_whitespace(bytes, colon + 1),
                    });
                }
            }
            _ => i += 1,
        }
    }

    keys
}
