//! Assembling a [`CommandSpec`] from a command line.
//!
//! Grammar: `command [arg...] [< input] [> output] [&]`

use crate::error::ParseError;
use crate::input::MAX_LINE_LEN;
use crate::lexer::{tokenize, Token, TokenKind};
use std::path::{Path, PathBuf};

/// Most arguments accepted on one line, command name included.
pub const MAX_ARGS: usize = 512;

/// One parsed command, produced fresh for every line.
/// `argv` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program name followed by its arguments
    pub argv: Vec<String>,
    /// File to connect to standard input
    pub input: Option<PathBuf>,
    /// File to connect to standard output
    pub output: Option<PathBuf>,
    /// Whether the line ended with a standalone `&`
    pub background: bool,
}

impl CommandSpec {
    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    pub fn first_arg(&self) -> Option<&str> {
        self.argv.get(1).map(String::as_str)
    }

    pub fn input(&self) -> Option<&Path> {
        self.input.as_deref()
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }
}

#[derive(Clone, Copy)]
enum Pending {
    Nothing,
    Input,
    Output,
}

/// Parse a line that has already had `$$` expanded.
///
/// Returns `Ok(None)` when the line holds no command word (for example a
/// whitespace-only line, or only redirections).
pub fn parse_command(line: &str) -> Result<Option<CommandSpec>, ParseError> {
    if line.len() > MAX_LINE_LEN {
        return Err(ParseError::LineTooLong {
            limit: MAX_LINE_LEN,
        });
    }

    if let Some(position) = line.find('\0') {
        return Err(ParseError::InteriorNul { position });
    }

    let mut tokens = tokenize(line);
    let background = matches!(
        tokens.last(),
        Some(Token {
            kind: TokenKind::Background,
            ..
        })
    );
    if background {
        tokens.pop();
    }

    let mut spec = CommandSpec {
        argv: Vec::new(),
        input: None,
        output: None,
        background,
    };
    let mut pending = Pending::Nothing;

    for token in tokens {
        let word = match token.kind {
            TokenKind::RedirectIn => {
                pending = Pending::Input;
                continue;
            }
            TokenKind::RedirectOut => {
                pending = Pending::Output;
                continue;
            }
            // Only a trailing `&` requests the background.
            TokenKind::Background => "&".to_string(),
            TokenKind::Word(word) => word,
        };
        match pending {
            Pending::Input => spec.input = Some(PathBuf::from(word)),
            Pending::Output => spec.output = Some(PathBuf::from(word)),
            Pending::Nothing => {
                if spec.argv.len() == MAX_ARGS {
                    return Err(ParseError::TooManyArguments { limit: MAX_ARGS });
                }
                spec.argv.push(word);
            }
        }
        pending = Pending::Nothing;
    }

    #[cfg(feature = "debug_parse")]
    eprintln!("parsed {line:?} into {spec:?}");

    if spec.argv.is_empty() {
        return Ok(None);
    }
    Ok(Some(spec))
}
