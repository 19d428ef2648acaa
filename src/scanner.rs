use peekmore::{PeekMore, PeekMoreIterator};
use std::str::Chars;
use substring::Substring;

use crate::error::Reporter;
use crate::literal::Literal;
use crate::token::{Token, TokenKind};

fn keyword(text: &str) -> Option<TokenKind> {
    use TokenKind::*;
    Some(match text {
        "and" => And,
        "class" => Class,
        "else" => Else,
        "false" => False,
        "for" => For,
        "fun" => Fun,
        "if" => If,
        "nil" => Nil,
        "or" => Or,
        "print" => Print,
        "return" => Return,
        "break" => Break,
        "super" => Super,
        "this" => This,
        "true" => True,
        "var" => Var,
        "while" => While,
        _ => return None,
    })
}

pub struct Scanner<'a> {
    source: &'a str,
    chars: PeekMoreIterator<Chars<'a>>,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: usize,
    char_count: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Scanner {
            source,
            chars: source.chars().peekmore(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
            char_count: source.chars().count(),
        }
    }

    pub fn scan_tokens(mut self, reporter: &mut Reporter) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token(reporter);
        }
        self.tokens.push(Token::new(
            TokenKind::Eof,
            String::new(),
            None,
            self.line,
        ));
        self.tokens
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.char_count
    }

    fn advance(&mut self) -> char {
        let c = self.chars.next().expect("advance past end of source");
        self.current += 1;
        c
    }

    fn matches(&mut self, expected: char) -> bool {
        if self.is_at_end() {
            return false;
        }
        if self.chars.peek() != Some(&expected) {
            return false;
        }
        self.chars.next();
        self.current += 1;
        true
    }

    fn peek(&mut self) -> char {
        self.chars.peek().copied().unwrap_or('\0')
    }

    fn peek_next(&mut self) -> char {
        self.chars.peek_next().copied().unwrap_or('\0')
    }

    fn lexeme(&self) -> String {
        self.source.substring(self.start, self.current).to_string()
    }

    fn add_token(&mut self, kind: TokenKind) {
        self.add_token_literal(kind, None);
    }

    fn add_token_literal(&mut self, kind: TokenKind, literal: Option<Literal>) {
        let lexeme = self.lexeme();
        self.tokens.push(Token::new(kind, lexeme, literal, self.line));
    }

    fn scan_token(&mut self, reporter: &mut Reporter) {
        let c = self.advance();
        use TokenKind::*;
        match c {
            '(' => self.add_token(LeftParen),
            ')' => self.add_token(RightParen),
            '{' => self.add_token(LeftBrace),
            '}' => self.add_token(RightBrace),
            ',' => self.add_token(Comma),
            '.' => self.add_token(Dot),
            '-' => self.add_token(Minus),
            '+' => self.add_token(Plus),
            ';' => self.add_token(Semicolon),
            '*' => self.add_token(Star),
            '!' => {
                let kind = if self.matches('=') { BangEqual } else { Bang };
                self.add_token(kind);
            }
            '=' => {
                let kind = if self.matches('=') { EqualEqual } else { Equal };
                self.add_token(kind);
            }
            '<' => {
                let kind = if self.matches('=') { LessEqual } else { Less };
                self.add_token(kind);
            }
            '>' => {
                let kind = if self.matches('=') { GreaterEqual } else { Greater };
                self.add_token(kind);
            }
            '/' => {
                if self.matches('/') {
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                } else {
                    self.add_token(Slash);
                }
            }
            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,
            '"' => self.string(reporter),
            c if c.is_ascii_digit() => self.number(),
            c if is_alpha(c) => self.identifier(),
            c => reporter.error(self.line, format!("Unexpected character '{c}'.")),
        }
    }

    fn string(&mut self, reporter: &mut Reporter) {
        while self.peek() != '"' && !self.is_at_end() {
            if self.peek() == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            reporter.error(self.line, "Unterminated string.");
            return;
        }

        // the closing quote
        self.advance();

        let value = self.source.substring(self.start + 1, self.current - 1).to_string();
        self.add_token_literal(TokenKind::String, Some(Literal::Str(value)));
    }

    fn number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        // A fractional part requires a digit after the dot; otherwise the
        // dot is left untouched for the parser (e.g. `1.method()` is
        // never valid Lox, but `1.` alone must not be a scanner error).
        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance();
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let text = self.lexeme();
        let value: f64 = text.parse().expect("scanned number lexeme must parse as f64");
        self.add_token_literal(TokenKind::Number, Some(Literal::Number(value)));
    }

    fn identifier(&mut self) {
        while is_alphanumeric(self.peek()) {
            self.advance();
        }
        let text = self.lexeme();
        let kind = keyword(&text).unwrap_or(TokenKind::Identifier);
        self.add_token(kind);
    }
}

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_alphanumeric(c: char) -> bool {
    is_alpha(c) || c.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> Vec<Token> {
        let mut reporter = Reporter::new();
        let tokens = Scanner::new(source).scan_tokens(&mut reporter);
        assert!(!reporter.had_error(), "unexpected scan error for {source:?}");
        tokens
    }

    #[test]
    fn scans_punctuation() {
        let tokens = scan("(){};,.+-*");
        assert_eq!(tokens.len(), 11); // 10 tokens + EOF
    }

    #[test]
    fn scans_two_char_operators() {
        let tokens = scan("!= == <= >=");
        assert_eq!(tokens[0].kind, TokenKind::BangEqual);
        assert_eq!(tokens[1].kind, TokenKind::EqualEqual);
        assert_eq!(tokens[2].kind, TokenKind::LessEqual);
        assert_eq!(tokens[3].kind, TokenKind::GreaterEqual);
    }

    #[test]
    fn trailing_dot_does_not_error() {
        let mut reporter = Reporter::new();
        let tokens = Scanner::new("1.").scan_tokens(&mut reporter);
        assert!(!reporter.had_error());
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[1].kind, TokenKind::Dot);
    }

    #[test]
    fn recognizes_break_keyword() {
        let tokens = scan("break;");
        assert_eq!(tokens[0].kind, TokenKind::Break);
    }

    #[test]
    fn unterminated_string_is_reported() {
        let mut reporter = Reporter::new();
        Scanner::new("\"abc").scan_tokens(&mut reporter);
        assert!(reporter.had_error());
    }
}
