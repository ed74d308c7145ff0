//! Recursive descent selector parser.
//!
//! Parses selector text such as `.lighthouse > a img, .gallery a` into a
//! [`SelectorList`]. Uses the logos-based tokenizer from
//! [`crate::css::tokenizer`]. Unlike [`tokenize`](crate::css::tokenizer::tokenize),
//! the parser rejects characters it cannot lex so that a malformed selector is
//! reported when a configuration is compiled rather than silently matching
//! nothing.

use logos::Logos;

use crate::css::model::*;
use crate::css::tokenizer::Token;

/// Errors from selector parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected token at position {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
    #[error("invalid character {text:?} at byte {offset}")]
    InvalidCharacter { offset: usize, text: String },
    #[error("unknown pseudo-class ':{0}'")]
    UnknownPseudoClass(String),
    #[error("empty selector")]
    Empty,
}

/// A positioned token with byte-level span information for whitespace detection.
#[derive(Debug, Clone)]
struct PToken {
    token: Token,
    text: String,
    /// Index in the token stream (for error reporting).
    pos: usize,
    byte_start: usize,
    byte_end: usize,
}

fn tokenize_with_spans(input: &str) -> Result<Vec<PToken>, ParseError> {
    let mut tokens = Vec::new();
    for (idx, (result, span)) in Token::lexer(input).spanned().enumerate() {
        let text = input[span.clone()].to_string();
        match result {
            Ok(token) => tokens.push(PToken {
                token,
                text,
                pos: idx,
                byte_start: span.start,
                byte_end: span.end,
            }),
            Err(()) => {
                return Err(ParseError::InvalidCharacter {
                    offset: span.start,
                    text,
                })
            }
        }
    }
    Ok(tokens)
}

/// Parse a comma-separated selector group.
///
/// The whole input must be consumed; trailing garbage is an error.
pub fn parse_selector_list(input: &str) -> Result<SelectorList, ParseError> {
    let tokens = tokenize_with_spans(input)?;
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut parser = Parser { tokens, cursor: 0 };
    let mut selectors = vec![parser.parse_selector()?];

    while let Some(tok) = parser.peek() {
        if tok.token != Token::Comma {
            return Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!("expected ',' or end of selector, got '{}'", tok.text),
            });
        }
        parser.advance();
        selectors.push(parser.parse_selector()?);
    }

    Ok(SelectorList {
        selectors,
        source: input.trim().to_string(),
    })
}

/// Parse a single selector (no commas).
pub fn parse_selector(input: &str) -> Result<Selector, ParseError> {
    let mut list = parse_selector_list(input)?;
    if list.selectors.len() != 1 {
        return Err(ParseError::UnexpectedToken {
            position: 0,
            message: "expected a single selector".into(),
        });
    }
    Ok(list.selectors.remove(0))
}

struct Parser {
    tokens: Vec<PToken>,
    cursor: usize,
}

impl Parser {
    fn peek(&self) -> Option<&PToken> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<&PToken> {
        let tok = self.tokens.get(self.cursor)?;
        self.cursor += 1;
        Some(tok)
    }

    fn current_pos(&self) -> usize {
        self.peek().map(|t| t.pos).unwrap_or(self.tokens.len())
    }

    /// Returns `true` if the current token directly follows the previous one
    /// with no whitespace between them.
    fn is_adjacent(&self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = &self.tokens[self.cursor - 1];
        match self.peek() {
            Some(curr) => curr.byte_start == prev.byte_end,
            None => false,
        }
    }

    /// Parse compound selectors joined by combinators.
    fn parse_selector(&mut self) -> Result<Selector, ParseError> {
        let mut parts = vec![SelectorPart::Compound(self.parse_compound_selector()?)];

        loop {
            match self.peek() {
                Some(t) if t.token == Token::GreaterThan => {
                    self.advance();
                    parts.push(SelectorPart::Combinator(Combinator::Child));
                    parts.push(SelectorPart::Compound(self.parse_compound_selector()?));
                }
                // A selector-starting token separated by whitespace begins a
                // descendant step; adjacent ones were already consumed by the
                // compound parser.
                Some(t)
                    if matches!(
                        t.token,
                        Token::Ident | Token::Hash | Token::Dot | Token::Star | Token::PseudoClass
                    ) =>
                {
                    parts.push(SelectorPart::Combinator(Combinator::Descendant));
                    parts.push(SelectorPart::Compound(self.parse_compound_selector()?));
                }
                _ => break,
            }
        }

        Ok(Selector { parts })
    }

    fn parse_compound_selector(&mut self) -> Result<CompoundSelector, ParseError> {
        let mut compound = CompoundSelector::new();

        match self.peek() {
            Some(t) if t.token == Token::Ident => {
                let name = t.text.clone();
                self.advance();
                compound.push(SelectorComponent::Type(name));
            }
            Some(t) if t.token == Token::Star => {
                self.advance();
                compound.push(SelectorComponent::Universal);
            }
            Some(t) if matches!(t.token, Token::Dot | Token::Hash | Token::PseudoClass) => {
                compound.push(self.parse_qualifier()?);
            }
            Some(t) => {
                return Err(ParseError::UnexpectedToken {
                    position: t.pos,
                    message: format!("expected selector, got '{}'", t.text),
                })
            }
            None => return Err(ParseError::UnexpectedEof("expected selector".into())),
        }

        while self.is_adjacent()
            && self
                .peek()
                .is_some_and(|t| matches!(t.token, Token::Dot | Token::Hash | Token::PseudoClass))
        {
            compound.push(self.parse_qualifier()?);
        }

        Ok(compound)
    }

    /// Parse `.class`, `#id` or `:pseudo`.
    fn parse_qualifier(&mut self) -> Result<SelectorComponent, ParseError> {
        let (token, text) = match self.advance() {
            Some(t) => (t.token, t.text.clone()),
            None => return Err(ParseError::UnexpectedEof("expected selector".into())),
        };

        match token {
            Token::PseudoClass => {
                let name = &text[1..];
                PseudoClass::from_name(name)
                    .map(SelectorComponent::PseudoClass)
                    .ok_or_else(|| ParseError::UnknownPseudoClass(name.to_string()))
            }
            Token::Dot | Token::Hash => {
                let what = if token == Token::Dot { "class" } else { "id" };
                if self.peek().is_none() {
                    return Err(ParseError::UnexpectedEof(format!(
                        "expected {what} name after '{text}'"
                    )));
                }
                if !self.is_adjacent() {
                    return Err(ParseError::UnexpectedToken {
                        position: self.current_pos(),
                        message: format!("expected {what} name directly after '{text}'"),
                    });
                }
                let name = match self.advance() {
                    Some(t) if t.token == Token::Ident => t.text.clone(),
                    Some(t) => {
                        return Err(ParseError::UnexpectedToken {
                            position: t.pos,
                            message: format!("expected {what} name, got '{}'", t.text),
                        })
                    }
                    None => {
                        return Err(ParseError::UnexpectedEof(format!(
                            "expected {what} name after '{text}'"
                        )))
                    }
                };
                Ok(if token == Token::Dot {
                    SelectorComponent::Class(name)
                } else {
                    SelectorComponent::Id(name)
                })
            }
            _ => Err(ParseError::UnexpectedToken {
                position: self.current_pos(),
                message: format!("expected '.', '#' or ':', got '{text}'"),
            }),
        }
    }
}
