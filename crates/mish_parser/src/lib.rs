#![doc = "Command-line reading and parsing: raw input line to `CommandSpec`."]

pub mod command;
pub mod error;
pub mod input;
pub mod lexer;

pub use command::{parse_command, CommandSpec, MAX_ARGS};
pub use error::ParseError;
pub use input::{expand_pid, is_blank_or_comment, read_command_line, MAX_LINE_LEN};
pub use lexer::{tokenize, Token, TokenKind};
