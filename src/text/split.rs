//! Tokenizers for the text diffs.
//!
//! All tokenizers return borrowed slices of the input which concatenate
//! back to the input.

/// Splits a string into its characters.
pub fn split_chars(s: &str) -> impl Iterator<Item = &str> {
    s.char_indices()
        .map(move |(idx, c)| &s[idx..idx + c.len_utf8()])
}

/// Given a string splits it into lines.
///
/// This operation will preserve the newline separation character at the end.
/// It supports all common newline sequences (`\r\n`, `\n` as well as `\r`).
pub fn split_lines(s: &str) -> impl Iterator<Item = &str> {
    let mut iter = s.char_indices().peekable();
    let mut last_pos = 0;

    std::iter::from_fn(move || {
        if let Some((idx, c)) = iter.next() {
            let mut rv = None;
            if c == '\r' {
                if iter.peek().map_or(false, |x| x.1 == '\n') {
                    rv = Some(&s[last_pos..=idx + 1]);
                    iter.next();
                    last_pos = idx + 2;
                } else {
                    rv = Some(&s[last_pos..=idx]);
                    last_pos = idx + 1;
                }
            } else if c == '\n' {
                rv = Some(&s[last_pos..=idx]);
                last_pos = idx + 1;
            }
            Some(rv)
        } else if last_pos < s.len() {
            let tmp = &s[last_pos..];
            last_pos = s.len();
            Some(Some(tmp))
        } else {
            None
        }
    })
    .flatten()
}

/// Splits a line into its content and its terminator.
///
/// The terminator is empty for a final line without newline.
pub fn split_terminator(line: &str) -> (&str, &str) {
    let body = line.trim_end_matches(|c| c == '\n' || c == '\r');
    line.split_at(body.len())
}

/// Splits lines and yields newline sequences as tokens of their own.
pub fn split_lines_and_newlines(s: &str) -> impl Iterator<Item = &str> {
    split_lines(s).flat_map(|line| {
        let (body, terminator) = split_terminator(line);
        std::iter::once(body)
            .chain(std::iter::once(terminator))
            .filter(|x| !x.is_empty())
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WordClass {
    Space,
    Word,
    Punct,
}

fn classify(c: char) -> WordClass {
    if c.is_whitespace() {
        WordClass::Space
    } else if c.is_alphanumeric() || c == '_' {
        WordClass::Word
    } else {
        WordClass::Punct
    }
}

/// Splits text into words, whitespace runs and punctuation.
///
/// Runs of word characters and runs of whitespace form one token each,
/// every other character is a token of its own.
pub fn split_words(s: &str) -> impl Iterator<Item = &str> {
    let mut iter = s.char_indices().peekable();

    std::iter::from_fn(move || {
        let (start, c) = iter.next()?;
        let class = classify(c);
        let mut end = start + c.len_utf8();
        if class != WordClass::Punct {
            while let Some(&(idx, next)) = iter.peek() {
                if classify(next) != class {
                    break;
                }
                iter.next();
                end = idx + next.len_utf8();
            }
        }
        Some(&s[start..end])
    })
}

/// Returns `true` if the token only consists of whitespace.
pub fn is_whitespace(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_whitespace)
}

/// Splits a string into graphemes.
#[cfg(feature = "unicode")]
pub fn split_graphemes(s: &str) -> impl Iterator<Item = &str> {
    unicode_segmentation::UnicodeSegmentation::graphemes(s, true)
}

/// Splits a string into unicode words (following UAX #29 word bounds).
#[cfg(feature = "unicode")]
pub fn split_unicode_words(s: &str) -> impl Iterator<Item = &str> {
    unicode_segmentation::UnicodeSegmentation::split_word_bounds(s)
}

#[test]
fn test_split_lines() {
    assert_eq!(
        split_lines("first\nsecond\rthird\r\nfourth\nlast").collect::<Vec<_>>(),
        vec!["first\n", "second\r", "third\r\n", "fourth\n", "last"]
    );
    assert_eq!(split_lines("\n\n").collect::<Vec<_>>(), vec!["\n", "\n"]);
    assert_eq!(split_lines("\n").collect::<Vec<_>>(), vec!["\n"]);
    assert!(split_lines("").collect::<Vec<_>>().is_empty());
}

#[test]
fn test_split_lines_and_newlines() {
    assert_eq!(
        split_lines_and_newlines("a\r\n\nb").collect::<Vec<_>>(),
        vec!["a", "\r\n", "\n", "b"]
    );
}

#[test]
fn test_split_words() {
    assert_eq!(
        split_words("foo    bar_1 (baz)\n\n  aha").collect::<Vec<_>>(),
        ["foo", "    ", "bar_1", " ", "(", "baz", ")", "\n\n  ", "aha"]
    );
    assert!(split_words("").next().is_none());
}

#[test]
fn test_split_chars() {
    assert_eq!(split_chars("aüb").collect::<Vec<_>>(), vec!["a", "ü", "b"]);
}

#[test]
fn test_split_terminator() {
    assert_eq!(split_terminator("foo\r\n"), ("foo", "\r\n"));
    assert_eq!(split_terminator("foo"), ("foo", ""));
}

#[test]
#[cfg(feature = "unicode")]
fn test_split_graphemes() {
    assert_eq!(
        split_graphemes("e\u{301}x").collect::<Vec<_>>(),
        vec!["e\u{301}", "x"]
    );
}
