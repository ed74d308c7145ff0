//! logos-based selector tokenizer.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (e.g. `:hidden` as PseudoClass beats `:` as an error)
//! 2. For equal length matches, earlier-defined variants win
//!
//! Whitespace is skipped; the parser recovers descendant combinators from the
//! byte spans of adjacent tokens.

use logos::Logos;

/// Selector token produced by the lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    /// Pseudo-class: `:hidden`, `:first-child`, etc.
    #[regex(r":[a-zA-Z][a-zA-Z0-9_-]*")]
    PseudoClass,

    /// Identifier: tag names, class names, ids.
    #[regex(r"-?[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    /// `,`
    #[token(",")]
    Comma,

    /// `.`
    #[token(".")]
    Dot,

    /// `#`
    #[token("#")]
    Hash,

    /// `*`
    #[token("*")]
    Star,

    /// `>`
    #[token(">")]
    GreaterThan,
}

/// Tokenize a selector string into `(Token, text)` pairs.
///
/// Characters that fail to lex are skipped; use the parser when invalid input
/// must be rejected.
pub fn tokenize(input: &str) -> Vec<(Token, String)> {
    Token::lexer(input)
        .spanned()
        .filter_map(|(result, span)| result.ok().map(|token| (token, input[span].to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        tokenize(input).into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn punctuation() {
        assert_eq!(
            tokens(", . # * >"),
            vec![Token::Comma, Token::Dot, Token::Hash, Token::Star, Token::GreaterThan]
        );
    }

    #[test]
    fn class_selector() {
        let result = tokenize(".lighthouse");
        assert_eq!(result[0], (Token::Dot, ".".into()));
        assert_eq!(result[1], (Token::Ident, "lighthouse".into()));
    }

    #[test]
    fn idents_with_dashes() {
        let result = tokenize("child-content _private -webkit-thing");
        assert_eq!(result[0], (Token::Ident, "child-content".into()));
        assert_eq!(result[1], (Token::Ident, "_private".into()));
        assert_eq!(result[2], (Token::Ident, "-webkit-thing".into()));
    }

    #[test]
    fn pseudo_class_is_one_token() {
        let result = tokenize("div:hidden");
        assert_eq!(result[0], (Token::Ident, "div".into()));
        assert_eq!(result[1], (Token::PseudoClass, ":hidden".into()));
    }

    #[test]
    fn descendant_chain() {
        assert_eq!(
            tokens(".content a img"),
            vec![Token::Dot, Token::Ident, Token::Ident, Token::Ident]
        );
    }

    #[test]
    fn child_combinator() {
        assert_eq!(
            tokens("div > a"),
            vec![Token::Ident, Token::GreaterThan, Token::Ident]
        );
    }

    #[test]
    fn invalid_characters_are_skipped() {
        assert_eq!(tokens("a[href]"), vec![Token::Ident, Token::Ident]);
    }

    #[test]
    fn empty_input() {
        assert!(tokens("").is_empty());
        assert!(tokens("   \n\t").is_empty());
    }
}
