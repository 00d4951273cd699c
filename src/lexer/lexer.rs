use std::rc::Rc;

use regex::Regex;

use crate::{errors::errors::LexError, Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: u32,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            pos: 0,
            tokens: vec![],
            source,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> char {
        self.source.as_bytes()[self.pos as usize] as char
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos as usize..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos as usize >= self.source.len()
    }
}

/// Pattern table, tried in order; longer operators must come before their
/// prefixes (`<<=` before `<<` before `<`). Line comments sit ahead of the
/// `/=` and `/` entries for the same reason.
fn token_patterns() -> Vec<RegexPattern> {
    vec![
        RegexPattern { regex: Regex::new("[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("[0-9]+").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("\\s+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("//.*").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
        RegexPattern { regex: Regex::new("\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
        RegexPattern { regex: Regex::new("\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new("\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new("\\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[") },
        RegexPattern { regex: Regex::new("\\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]") },
        RegexPattern { regex: Regex::new(",").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new(";").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
        RegexPattern { regex: Regex::new("\\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dot, ".") },
        RegexPattern { regex: Regex::new("<<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::ShlAssign, "<<=") },
        RegexPattern { regex: Regex::new(">>=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::ShrAssign, ">>=") },
        RegexPattern { regex: Regex::new("<<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Shl, "<<") },
        RegexPattern { regex: Regex::new(">>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Shr, ">>") },
        RegexPattern { regex: Regex::new("<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=") },
        RegexPattern { regex: Regex::new(">=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=") },
        RegexPattern { regex: Regex::new("==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
        RegexPattern { regex: Regex::new("!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=") },
        RegexPattern { regex: Regex::new("&&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::AndAnd, "&&") },
        RegexPattern { regex: Regex::new("\\|\\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OrOr, "||") },
        RegexPattern { regex: Regex::new("\\+\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::PlusPlus, "++") },
        RegexPattern { regex: Regex::new("--").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::MinusMinus, "--") },
        RegexPattern { regex: Regex::new("\\+=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::PlusAssign, "+=") },
        RegexPattern { regex: Regex::new("-=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::MinusAssign, "-=") },
        RegexPattern { regex: Regex::new("\\*=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::StarAssign, "*=") },
        RegexPattern { regex: Regex::new("/=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::SlashAssign, "/=") },
        RegexPattern { regex: Regex::new("%=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::PercentAssign, "%=") },
        RegexPattern { regex: Regex::new("&=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::AmpAssign, "&=") },
        RegexPattern { regex: Regex::new("\\|=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::PipeAssign, "|=") },
        RegexPattern { regex: Regex::new("\\^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CaretAssign, "^=") },
        RegexPattern { regex: Regex::new("\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new("-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Minus, "-") },
        RegexPattern { regex: Regex::new("\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
        RegexPattern { regex: Regex::new("/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
        RegexPattern { regex: Regex::new("%").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Percent, "%") },
        RegexPattern { regex: Regex::new("=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assign, "=") },
        RegexPattern { regex: Regex::new("<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
        RegexPattern { regex: Regex::new(">").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
        RegexPattern { regex: Regex::new("&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Ampersand, "&") },
        RegexPattern { regex: Regex::new("\\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Pipe, "|") },
        RegexPattern { regex: Regex::new("\\^").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Caret, "^") },
        RegexPattern { regex: Regex::new("~").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Tilde, "~") },
    ]
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = regex.find(lexer.remainder()).unwrap().as_str().to_string();

    lexer.push(MK_TOKEN!(
        TokenKind::Integer,
        matched.clone(),
        Span {
            start: Position(lexer.pos, Rc::clone(&lexer.file)),
            end: Position(lexer.pos + matched.len() as u32, Rc::clone(&lexer.file)),
        }
    ));
    lexer.advance_n(matched.len() as u32);
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = regex.find(lexer.remainder()).unwrap().end();
    lexer.advance_n(matched as u32);
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = regex.find(lexer.remainder()).unwrap().as_str().to_string();

    let kind = if let Some(kind) = RESERVED_LOOKUP.get(matched.as_str()) {
        *kind
    } else {
        TokenKind::Identifier
    };

    lexer.push(MK_TOKEN!(
        kind,
        matched.clone(),
        Span {
            start: Position(lexer.pos, Rc::clone(&lexer.file)),
            end: Position(lexer.pos + matched.len() as u32, Rc::clone(&lexer.file)),
        }
    ));
    lexer.advance_n(matched.len() as u32);
}

/// Tokenizes `source` into the sequence the parser consumes.
///
/// The result always ends with an `EOF` token so the parser can look at
/// `current_token` without bounds checks.
pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, LexError> {
    let patterns = token_patterns();
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        let mut matched = false;

        for pattern in patterns.iter() {
            let match_here = pattern.regex.find(lex.remainder());

            if let Some(found) = match_here {
                if found.start() == 0 {
                    (pattern.handler)(&mut lex, &pattern.regex);
                    matched = true;
                    break;
                }
            }
        }

        if !matched {
            return Err(LexError::UnrecognisedCharacter {
                character: lex.at(),
                position: lex.pos,
            });
        }
    }

    lex.push(MK_TOKEN!(
        TokenKind::EOF,
        String::from("EOF"),
        Span {
            start: Position(lex.pos, Rc::clone(&lex.file)),
            end: Position(lex.pos, Rc::clone(&lex.file)),
        }
    ));
    Ok(lex.tokens)
}
