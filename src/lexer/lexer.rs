use lazy_static::lazy_static;
use regex::Regex;

use crate::{Position, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// Handles one pattern match. Returns `None` when the matched text produces no token.
pub type RegexHandler = fn(&mut Lexer, &Regex) -> Option<Token>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

fn pattern(source: &str, handler: RegexHandler) -> RegexPattern {
    RegexPattern {
        regex: Regex::new(source).expect("token patterns are valid regular expressions"),
        handler,
    }
}

lazy_static! {
    // Tried in order; the first pattern matching at the current position wins.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern(r"^\s+", skip_handler),
        pattern(r"^\{[^}]*\}", skip_handler),
        pattern(r"^\{", unterminated_comment_handler),
        pattern(r"^//[^\n]*", skip_handler),
        pattern(r"^[A-Za-z_][A-Za-z0-9_]*", symbol_handler),
        pattern(r"^[0-9]+(\.[0-9]+([eE][+-]?[0-9]+)?|[eE][+-]?[0-9]+)", real_handler),
        pattern(r"^[0-9]+", integer_handler),
        pattern(r#"^"[^"\n]*""#, string_handler),
        pattern(r#"^""#, unterminated_string_handler),
        pattern(r"^'[^'\n]'", char_handler),
        pattern(r"^'", bad_char_handler),
        pattern(r"^:=", MK_DEFAULT_HANDLER!(TokenKind::Assign, ":=")),
        pattern(r"^<>", MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "<>")),
        pattern(r"^<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=")),
        pattern(r"^>=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=")),
        pattern(r"^<", MK_DEFAULT_HANDLER!(TokenKind::Less, "<")),
        pattern(r"^>", MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")),
        pattern(r"^=", MK_DEFAULT_HANDLER!(TokenKind::Equals, "=")),
        pattern(r"^\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
        pattern(r"^-", MK_DEFAULT_HANDLER!(TokenKind::Dash, "-")),
        pattern(r"^\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
        pattern(r"^/", MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")),
        pattern(r"^;", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")),
        pattern(r"^\.", MK_DEFAULT_HANDLER!(TokenKind::Period, ".")),
        pattern(r"^,", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        pattern(r"^\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
        pattern(r"^\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
        pattern(r"^:", MK_DEFAULT_HANDLER!(TokenKind::Colon, ":")),
    ];
}

/// An on-demand token source over one source text.
///
/// Tokens are produced one per call to [`Iterator::next`]; the stream ends with a single
/// `EOF` token. A lexical error yields one `Error` token carrying the message, then `EOF`.
pub struct Lexer {
    source: String,
    pos: usize,
    line: u32,
    line_start: usize,
    failed: bool,
    finished: bool,
}

impl Lexer {
    pub fn new(source: impl Into<String>) -> Lexer {
        Lexer {
            source: source.into(),
            pos: 0,
            line: 1,
            line_start: 0,
            failed: false,
            finished: false,
        }
    }

    /// Moves past `n` bytes of source, keeping line tracking current.
    pub fn advance_n(&mut self, n: usize) {
        let end = (self.pos + n).min(self.source.len());
        for (offset, ch) in self.source[self.pos..end].char_indices() {
            if ch == '\n' {
                self.line += 1;
                self.line_start = self.pos + offset + 1;
            }
        }
        self.pos = end;
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// The line and (character) column of the next unread character.
    pub fn current_position(&self) -> Position {
        let column = self.source[self.line_start..self.pos].chars().count() as u32 + 1;
        Position::new(self.line, column)
    }

    fn matched(&self, regex: &Regex) -> String {
        regex
            .find(self.remainder())
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }

    fn error(&mut self, message: String) -> Token {
        self.failed = true;
        MK_TOKEN!(TokenKind::Error, message, self.current_position())
    }

    pub fn next_token(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        'scan: loop {
            if self.failed || self.at_eof() {
                self.finished = true;
                return Some(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), self.current_position()));
            }

            for pattern in PATTERNS.iter() {
                if pattern.regex.is_match(self.remainder()) {
                    match (pattern.handler)(self, &pattern.regex) {
                        Some(token) => return Some(token),
                        None => continue 'scan,
                    }
                }
            }

            let symbol = self.at().unwrap_or_default();
            return Some(self.error(format!("Unknown symbol `{}`", symbol)));
        }
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let matched = lexer.matched(regex);
    lexer.advance_n(matched.len());
    None
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let value = lexer.matched(regex);
    let lowered = value.to_lowercase();
    let position = lexer.current_position();
    lexer.advance_n(value.len());

    let token = match RESERVED_LOOKUP.get(lowered.as_str()) {
        Some(TokenKind::BoolLiteral) => MK_TOKEN!(TokenKind::BoolLiteral, lowered, position),
        Some(kind) => MK_TOKEN!(*kind, value, position),
        None => MK_TOKEN!(TokenKind::Identifier, value, position),
    };
    Some(token)
}

fn integer_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let value = lexer.matched(regex);
    let token = MK_TOKEN!(TokenKind::IntLiteral, value.clone(), lexer.current_position());
    lexer.advance_n(value.len());
    Some(token)
}

fn real_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let value = lexer.matched(regex);
    let token = MK_TOKEN!(TokenKind::RealLiteral, value.clone(), lexer.current_position());
    lexer.advance_n(value.len());
    Some(token)
}

fn string_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let matched = lexer.matched(regex);
    let value = matched[1..matched.len() - 1].to_string();
    let token = MK_TOKEN!(TokenKind::StringLiteral, value, lexer.current_position());
    lexer.advance_n(matched.len());
    Some(token)
}

fn char_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let matched = lexer.matched(regex);
    let value = matched[1..matched.len() - 1].to_string();
    let token = MK_TOKEN!(TokenKind::CharLiteral, value, lexer.current_position());
    lexer.advance_n(matched.len());
    Some(token)
}

fn unterminated_string_handler(lexer: &mut Lexer, _regex: &Regex) -> Option<Token> {
    Some(lexer.error(String::from("Unterminated string")))
}

fn bad_char_handler(lexer: &mut Lexer, _regex: &Regex) -> Option<Token> {
    Some(lexer.error(String::from(
        "Invalid character literal, expected exactly one character between quotes",
    )))
}

fn unterminated_comment_handler(lexer: &mut Lexer, _regex: &Regex) -> Option<Token> {
    Some(lexer.error(String::from("Unterminated comment")))
}

/// Collects the whole token stream of a source text, ending with `EOF`.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}
