//! Selector AST: SelectorComponent, CompoundSelector, Selector, SelectorList.

use std::fmt;

/// Pseudo-classes understood by the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PseudoClass {
    /// The element and all of its ancestors are visible.
    Visible,
    /// The element or one of its ancestors is hidden.
    Hidden,
    /// The element is the first child of its parent.
    FirstChild,
    /// The element is the last child of its parent.
    LastChild,
}

impl PseudoClass {
    /// Look up a pseudo-class by its name (without the leading `:`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "visible" => Some(Self::Visible),
            "hidden" => Some(Self::Hidden),
            "first-child" => Some(Self::FirstChild),
            "last-child" => Some(Self::LastChild),
            _ => None,
        }
    }

    /// The CSS name of this pseudo-class.
    pub fn name(self) -> &'static str {
        match self {
            Self::Visible => "visible",
            Self::Hidden => "hidden",
            Self::FirstChild => "first-child",
            Self::LastChild => "last-child",
        }
    }
}

/// A single simple selector.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorComponent {
    /// Type selector: matches the element tag (e.g. `img`).
    Type(String),
    /// Universal selector: `*`.
    Universal,
    /// Class selector: `.classname`.
    Class(String),
    /// ID selector: `#id`.
    Id(String),
    /// Pseudo-class: `:hidden`, `:first-child`, etc.
    PseudoClass(PseudoClass),
}

/// A combinator between compound selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Descendant combinator (whitespace): `A B`.
    Descendant,
    /// Child combinator: `A > B`.
    Child,
}

/// A sequence of simple selectors without combinators, e.g. `a.thumb:visible`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompoundSelector {
    pub components: Vec<SelectorComponent>,
}

impl CompoundSelector {
    /// Create an empty compound selector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a component to this compound selector.
    pub fn push(&mut self, component: SelectorComponent) {
        self.components.push(component);
    }

    /// The type (tag) named by this compound, if any.
    pub fn tag(&self) -> Option<&str> {
        self.components.iter().find_map(|c| match c {
            SelectorComponent::Type(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// The id named by this compound, if any.
    pub fn id(&self) -> Option<&str> {
        self.components.iter().find_map(|c| match c {
            SelectorComponent::Id(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// All class names in this compound, in source order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.components.iter().filter_map(|c| match c {
            SelectorComponent::Class(name) => Some(name.as_str()),
            _ => None,
        })
    }
}

/// One element in a selector chain: either a compound selector or a combinator.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorPart {
    Compound(CompoundSelector),
    Combinator(Combinator),
}

/// A full selector: compound selectors joined by combinators.
///
/// `.content > a img` has parts
/// `[Compound(.content), Combinator(Child), Compound(a), Combinator(Descendant), Compound(img)]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selector {
    /// Alternating compound selectors and combinators.
    /// Always starts and ends with a `SelectorPart::Compound`.
    pub parts: Vec<SelectorPart>,
}

impl Selector {
    /// Create an empty selector.
    pub fn new() -> Self {
        Self::default()
    }

    /// The rightmost compound: the part that matches the element itself.
    pub fn subject(&self) -> Option<&CompoundSelector> {
        self.parts.iter().rev().find_map(|part| match part {
            SelectorPart::Compound(compound) => Some(compound),
            SelectorPart::Combinator(_) => None,
        })
    }
}

/// A comma-separated group of selectors. Matches if any member matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectorList {
    pub selectors: Vec<Selector>,
    /// The source text, kept for diagnostics.
    pub source: String,
}

impl SelectorList {
    /// The subject compound of the first selector in the group.
    ///
    /// This is what an element created "for" the selector should look like.
    pub fn subject(&self) -> Option<&CompoundSelector> {
        self.selectors.first().and_then(Selector::subject)
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
