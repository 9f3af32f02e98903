use std::str::Chars;

use peekmore::{PeekMore, PeekMoreIterator};

use crate::error::{Diagnostics, Error, ScanError};
use crate::literal::Literal;
use crate::token::{Token, Type};

/// Streams source text into tokens.
///
/// The scanner never fails hard: an unexpected character or an unterminated
/// string is reported through the diagnostics sink and scanning continues,
/// so a single run surfaces every lexical error in the file.
pub struct Scanner<'a> {
    source: PeekMoreIterator<Chars<'a>>,
    diagnostics: &'a mut Diagnostics,
    tokens: Vec<Token>,
    line: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a new scanner.
    pub fn new(source: &'a str, diagnostics: &'a mut Diagnostics) -> Scanner<'a> {
        Scanner {
            source: source.chars().peekmore(),
            diagnostics,
            tokens: vec![],
            line: 1,
        }
    }

    /// Scans the source code and returns the tokens, terminated by EOF.
    pub fn scan_tokens(mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.scan_token();
        }

        self.tokens.push(Token::new(Type::EOF, String::new(), None, self.line));
        self.tokens
    }

    /// Consumes and returns the next character.
    fn advance(&mut self) -> char {
        self.source.next().unwrap_or('\0')
    }

    /// Returns the next character without consuming it, or `'\0'` at the end
    /// of the file. The peek cursor is reset first, so earlier lookahead
    /// cannot skew the result.
    fn peek(&mut self) -> char {
        self.source.reset_cursor();
        self.source.peek().copied().unwrap_or('\0')
    }

    /// Returns the character after the next one without consuming anything.
    fn peek_next(&mut self) -> char {
        self.source.reset_cursor();
        self.source.advance_cursor();
        self.source.peek().copied().unwrap_or('\0')
    }

    /// Returns if the character after the next one is the expected one.
    /// Used while the current character is still unconsumed, so this looks
    /// one past it.
    fn match_next(&mut self, expected: char) -> bool {
        self.peek_next() == expected
    }

    /// Returns if the scanner has reached the end of the file.
    fn is_at_end(&mut self) -> bool {
        self.source.reset_cursor();
        self.source.peek().is_none()
    }

    fn add_token(&mut self, r#type: Type, lexeme: String, literal: Option<Literal>) {
        self.tokens.push(Token::new(r#type, lexeme, literal, self.line));
    }

    /// Consumes one character and emits it as a token.
    fn add_single_char_token(&mut self, r#type: Type) {
        let c = self.advance();
        self.add_token(r#type, c.to_string(), None);
    }

    /// Consumes two characters and emits them as one token.
    fn add_double_char_token(&mut self, r#type: Type) {
        let first = self.advance();
        let second = self.advance();
        self.add_token(r#type, format!("{first}{second}"), None);
    }

    /// Handles a string literal. Strings may span lines; the line counter
    /// keeps up so later errors still point at the right place.
    fn string(&mut self) {
        self.advance(); // Opening double quote.

        let mut value = String::new();
        while !self.is_at_end() && self.peek() != '"' {
            let c = self.advance();
            if c == '\n' {
                self.line += 1;
            }
            value.push(c);
        }

        if self.is_at_end() {
            ScanError {
                line: self.line,
                message: String::from("Unterminated string."),
            }.throw(self.diagnostics);
            return;
        }

        self.advance(); // Closing double quote.

        // The literal carries the contents only; the lexeme keeps the quotes.
        self.add_token(Type::String, format!("\"{value}\""), Some(Literal::String(value)));
    }

    /// Handles a number literal. The dot is only consumed when a digit
    /// follows, so `123.` scans as the number `123` followed by a dot.
    fn number(&mut self) {
        let mut value = String::new();

        while self.peek().is_ascii_digit() {
            value.push(self.advance());
        }

        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            value.push(self.advance()); // The dot.

            while self.peek().is_ascii_digit() {
                value.push(self.advance());
            }
        }

        let number: f64 = value.parse().expect("scanned digits to parse as a number");
        self.add_token(Type::Number, value, Some(Literal::Number(number)));
    }

    /// Handles an identifier or a reserved word, with maximal munch: the
    /// scan runs as long as alphanumerics last, then the whole lexeme is
    /// checked against the keyword table.
    fn identifier(&mut self) {
        let mut value = String::new();

        // is_alphanumeric does not include underscores.
        while self.peek().is_ascii_alphanumeric() || self.peek() == '_' {
            value.push(self.advance());
        }

        let token_type = match value.as_str() {
            "and"    => Type::And,
            "break"  => Type::Break,
            "class"  => Type::Class,
            "else"   => Type::Else,
            "false"  => Type::False,
            "for"    => Type::For,
            "fun"    => Type::Fun,
            "if"     => Type::If,
            "nil"    => Type::Nil,
            "or"     => Type::Or,
            "print"  => Type::Print,
            "return" => Type::Return,
            "super"  => Type::Super,
            "this"   => Type::This,
            "true"   => Type::True,
            "var"    => Type::Var,
            "while"  => Type::While,
            _        => Type::Identifier,
        };

        self.add_token(token_type, value, None);
    }

    /// Scans the next token.
    fn scan_token(&mut self) {
        let c = self.peek();
        match c {
            // One character tokens
            '(' => self.add_single_char_token(Type::LeftParen),
            ')' => self.add_single_char_token(Type::RightParen),
            '{' => self.add_single_char_token(Type::LeftBrace),
            '}' => self.add_single_char_token(Type::RightBrace),
            ',' => self.add_single_char_token(Type::Comma),
            '.' => self.add_single_char_token(Type::Dot),
            '-' => self.add_single_char_token(Type::Minus),
            '+' => self.add_single_char_token(Type::Plus),
            ';' => self.add_single_char_token(Type::Semicolon),
            '*' => self.add_single_char_token(Type::Star),

            // Two character tokens
            '!' => {
                if self.match_next('=') {
                    self.add_double_char_token(Type::BangEqual);
                } else {
                    self.add_single_char_token(Type::Bang);
                }
            },
            '=' => {
                if self.match_next('=') {
                    self.add_double_char_token(Type::EqualEqual);
                } else {
                    self.add_single_char_token(Type::Equal);
                }
            },
            '<' => {
                if self.match_next('=') {
                    self.add_double_char_token(Type::LessEqual);
                } else {
                    self.add_single_char_token(Type::Less);
                }
            },
            '>' => {
                if self.match_next('=') {
                    self.add_double_char_token(Type::GreaterEqual);
                } else {
                    self.add_single_char_token(Type::Greater);
                }
            },
            '/' => {
                if self.match_next('/') {
                    // A comment runs to the end of the line.
                    while !self.is_at_end() && self.peek() != '\n' {
                        self.advance();
                    }
                } else {
                    self.add_single_char_token(Type::Slash);
                }
            },

            // Ignore whitespace
            ' ' | '\r' | '\t' => {
                self.advance();
            },

            '\n' => {
                self.advance();
                self.line += 1;
            },

            '"' => self.string(),

            c if c.is_ascii_digit() => self.number(),

            c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),

            _ => {
                self.advance();

                ScanError {
                    line: self.line,
                    message: format!("Unexpected character '{c}'."),
                }.throw(self.diagnostics);
            },
        }
    }
}
