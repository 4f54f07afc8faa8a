//! Input normalization and delimiter tokenizing.

use std::sync::LazyLock;

use regex::Regex;

static BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("block comment pattern is valid"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Strip comments, then collapse whitespace runs to single spaces and drop
/// the space before commas.
pub(crate) fn normalize(text: &str) -> String {
    let text = BLOCK_COMMENT.replace_all(text, "");
    let text = strip_line_comments(&text);
    WHITESPACE.replace_all(&text, " ").replace(" ,", ",")
}

/// Remove `// ...` comments together with their terminating newline.
///
/// A `//` right after `:` or `(` starts a URL (`url(//cdn/x.png)`,
/// `http://...`) and is kept, as is a comment with no newline after it.
fn strip_line_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("//") {
        if matches!(rest[..start].bytes().next_back(), Some(b':' | b'(')) {
            out.push_str(&rest[..start + 2]);
            rest = &rest[start + 2..];
            continue;
        }
        match rest[start..].find('\n') {
            Some(end) => {
                out.push_str(&rest[..start]);
                rest = &rest[start + end + 1..];
            }
            None => break,
        }
    }

    out.push_str(rest);
    out
}

/// The delimiter that terminated a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Delimiter {
    /// `{`
    Open,
    /// `}`
    Close,
    /// `;`
    Semicolon,
    /// End of input.
    End,
}

/// Text between two delimiters, trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub text: &'a str,
    pub delimiter: Delimiter,
    /// Byte offset of the delimiter in the normalized input.
    pub offset: usize,
}

/// Splits normalized input at every unescaped `{`, `}` and `;`, plus once at
/// the end of input.
pub(crate) struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            finished: false,
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let bytes = self.input.as_bytes();
        let start = self.pos;
        let mut i = start;
        while i < bytes.len() {
            let delimiter = match bytes[i] {
                b'\\' => {
                    // Skip the escaped byte; continuation bytes never match a delimiter.
                    i += 2;
                    continue;
                }
                b'{' => Delimiter::Open,
                b'}' => Delimiter::Close,
                b';' => Delimiter::Semicolon,
                _ => {
                    i += 1;
                    continue;
                }
            };
            self.pos = i + 1;
            return Some(Token {
                text: self.input[start..i].trim(),
                delimiter,
                offset: i,
            });
        }

        self.finished = true;
        Some(Token {
            text: self.input[start..].trim(),
            delimiter: Delimiter::End,
            offset: self.input.len(),
        })
    }
}
