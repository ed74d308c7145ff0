//! CSS engine: selector tokenizer, parser, matcher, scalar values, inline style.

pub mod matcher;
pub mod model;
pub mod parser;
pub mod scalar;
pub mod style;
pub mod tokenizer;

pub use model::{Selector, SelectorList};
pub use parser::{parse_selector_list, ParseError};
pub use scalar::{Scalar, Unit};
pub use style::{InlineStyle, StyleProperty};
