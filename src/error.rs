use std::fmt;

use crate::token::{Token, TokenKind};

/// Where a syntactic/semantic diagnostic occurred, for rendering the
/// `<loc>` portion of `[line N] Error<loc>: message`.
#[derive(Debug, Clone)]
pub enum Loc {
    /// No location detail (plain scanner errors).
    None,
    /// The error was detected at end of input.
    End,
    /// The error was detected at a specific token's lexeme.
    At(String),
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Loc::None => Ok(()),
            Loc::End => write!(f, " at end"),
            Loc::At(lexeme) => write!(f, " at '{lexeme}'"),
        }
    }
}

impl Loc {
    pub fn from_token(token: &Token) -> Self {
        if token.kind == TokenKind::Eof {
            Loc::End
        } else {
            Loc::At(token.lexeme.clone())
        }
    }
}

/// A static (scan/parse/resolve) diagnostic: `[line N] Error<loc>: message`.
#[derive(Debug, Clone)]
pub struct StaticError {
    pub line: usize,
    pub loc: Loc,
    pub message: String,
}

impl fmt::Display for StaticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}] Error{}: {}", self.line, self.loc, self.message)
    }
}

/// A runtime diagnostic: `<message>\n[line N]`.
#[derive(Debug, Clone)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl RuntimeError {
    pub fn new(token: Token, message: impl Into<String>) -> Self {
        RuntimeError {
            token,
            message: message.into(),
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n[line {}]", self.message, self.token.line)
    }
}

/// Tracks whether a static or runtime error has occurred, so the CLI
/// driver can choose the right exit code without consulting process-wide
/// statics (a long-lived REPL session resets these between lines).
#[derive(Debug, Default)]
pub struct Reporter {
    had_error: bool,
    had_runtime_error: bool,
}

impl Reporter {
    pub fn new() -> Self {
        Reporter::default()
    }

    pub fn reset(&mut self) {
        self.had_error = false;
        self.had_runtime_error = false;
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    pub fn error(&mut self, line: usize, message: impl Into<String>) {
        self.report(line, Loc::None, message);
    }

    pub fn error_at_token(&mut self, token: &Token, message: impl Into<String>) {
        self.report(token.line, Loc::from_token(token), message);
    }

    pub fn report(&mut self, line: usize, loc: Loc, message: impl Into<String>) {
        let err = StaticError {
            line,
            loc,
            message: message.into(),
        };
        eprintln!("{err}");
        self.had_error = true;
    }

    pub fn runtime_error(&mut self, err: &RuntimeError) {
        eprintln!("{err}");
        self.had_runtime_error = true;
    }
}
