//! Whitespace tokenizer for mish command lines.
//!
//! Words are separated by whitespace only. `<`, `>` and `&` are operators
//! when they stand alone as a whole word; glued to other characters
//! (`<in`, `a&b`) they are part of an ordinary word.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Word(String),  // command, argument or redirection target
    RedirectIn,    // `<`
    RedirectOut,   // `>`
    Background,    // `&`
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: std::ops::Range<usize>,
}

impl Token {
    fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Self {
            kind,
            span: start..end,
        }
    }

    /// The token's text as it appeared in the line.
    pub fn text<'a>(&self, line: &'a str) -> &'a str {
        &line[self.span.clone()]
    }
}

/// Tokenize input and return vector of tokens.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    for (idx, ch) in input.char_indices() {
        match (ch.is_whitespace(), start) {
            (true, Some(begin)) => {
                tokens.push(classify(&input[begin..idx], begin, idx));
                start = None;
            }
            (false, None) => start = Some(idx),
            _ => {}
        }
    }
    if let Some(begin) = start {
        tokens.push(classify(&input[begin..], begin, input.len()));
    }
    tokens
}

fn classify(word: &str, start: usize, end: usize) -> Token {
    let kind = match word {
        "<" => TokenKind::RedirectIn,
        ">" => TokenKind::RedirectOut,
        "&" => TokenKind::Background,
        _ => TokenKind::Word(word.to_string()),
    };
    Token::new(kind, start, end)
}
