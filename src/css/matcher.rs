//! Selector matching against DOM nodes.
//!
//! Selectors are matched right to left: the subject compound must match the
//! node itself, then each combinator walks to the parent (`>`) or the nearest
//! matching ancestor (whitespace). When a `scope` is given, the walk never
//! leaves the scope, so `.content a` evaluated inside a container only sees a
//! `.content` that is itself inside the container.

use crate::css::model::{
    Combinator, CompoundSelector, PseudoClass, Selector, SelectorComponent, SelectorList,
    SelectorPart,
};
use crate::dom::node::NodeId;
use crate::dom::tree::Dom;

/// Whether any selector of the group matches `node_id`.
pub fn matches_list(list: &SelectorList, node_id: NodeId, dom: &Dom, scope: Option<NodeId>) -> bool {
    list.selectors
        .iter()
        .any(|sel| matches_selector(sel, node_id, dom, scope))
}

/// Check whether a full selector matches a given node.
pub fn matches_selector(
    selector: &Selector,
    node_id: NodeId,
    dom: &Dom,
    scope: Option<NodeId>,
) -> bool {
    let parts = &selector.parts;
    let mut part_idx = match parts.len() {
        0 => return false,
        n => n - 1,
    };

    match &parts[part_idx] {
        SelectorPart::Compound(compound) => {
            if !matches_compound(compound, node_id, dom) {
                return false;
            }
        }
        SelectorPart::Combinator(_) => return false,
    }

    let mut current_node = node_id;
    while part_idx > 0 {
        part_idx -= 1;
        let combinator = match &parts[part_idx] {
            SelectorPart::Combinator(c) => *c,
            SelectorPart::Compound(_) => return false,
        };

        if part_idx == 0 {
            return false;
        }
        part_idx -= 1;
        let compound = match &parts[part_idx] {
            SelectorPart::Compound(c) => c,
            SelectorPart::Combinator(_) => return false,
        };

        let next = match combinator {
            Combinator::Child => dom
                .parent(current_node)
                .filter(|&p| Some(p) != scope)
                .filter(|&p| matches_compound(compound, p, dom)),
            Combinator::Descendant => dom
                .ancestors(current_node)
                .into_iter()
                .take_while(|&a| Some(a) != scope)
                .find(|&a| matches_compound(compound, a, dom)),
        };

        match next {
            Some(ancestor) => current_node = ancestor,
            None => return false,
        }
    }

    true
}

/// Check whether a compound selector matches a single node.
pub fn matches_compound(compound: &CompoundSelector, node_id: NodeId, dom: &Dom) -> bool {
    let Some(node) = dom.get(node_id) else {
        return false;
    };

    compound.components.iter().all(|component| match component {
        SelectorComponent::Type(name) => node.tag.eq_ignore_ascii_case(name),
        SelectorComponent::Class(name) => node.has_class(name),
        SelectorComponent::Id(name) => node.id.as_deref() == Some(name.as_str()),
        SelectorComponent::Universal => true,
        SelectorComponent::PseudoClass(pc) => match pc {
            PseudoClass::Visible => dom.is_visible(node_id),
            PseudoClass::Hidden => !dom.is_visible(node_id),
            PseudoClass::FirstChild => dom
                .parent(node_id)
                .and_then(|p| dom.children(p).first().copied())
                == Some(node_id),
            PseudoClass::LastChild => dom
                .parent(node_id)
                .and_then(|p| dom.children(p).last().copied())
                == Some(node_id),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::parser::{parse_selector, parse_selector_list};
    use crate::dom::node::NodeData;

    /// ```text
    /// body
    /// └── div.lighthouse
    ///     ├── a[href]
    ///     │   └── img
    ///     └── div.content (hidden)
    ///         └── a
    ///             └── img
    /// ```
    struct Fixture {
        dom: Dom,
        container: NodeId,
        anchor: NodeId,
        image: NodeId,
        content: NodeId,
        child_anchor: NodeId,
        child_image: NodeId,
    }

    fn fixture() -> Fixture {
        let mut dom = Dom::new();
        let body = dom.insert(NodeData::new("body"));
        let container = dom
            .insert_child(body, NodeData::new("div").with_class("lighthouse"))
            .unwrap();
        let anchor = dom
            .insert_child(container, NodeData::new("a").with_attr("href", "big.jpg"))
            .unwrap();
        let image = dom
            .insert_child(anchor, NodeData::new("img").with_attr("src", "thumb.jpg"))
            .unwrap();
        let content = dom
            .insert_child(container, NodeData::new("div").with_class("content").hidden())
            .unwrap();
        let child_anchor = dom.insert_child(content, NodeData::new("a")).unwrap();
        let child_image = dom.insert_child(child_anchor, NodeData::new("img")).unwrap();
        Fixture {
            dom,
            container,
            anchor,
            image,
            content,
            child_anchor,
            child_image,
        }
    }

    fn sel(s: &str) -> Selector {
        parse_selector(s).unwrap()
    }

    #[test]
    fn type_and_class() {
        let f = fixture();
        assert!(matches_selector(&sel("div.lighthouse"), f.container, &f.dom, None));
        assert!(matches_selector(&sel("DIV"), f.container, &f.dom, None));
        assert!(!matches_selector(&sel("a.lighthouse"), f.container, &f.dom, None));
    }

    #[test]
    fn descendant_chain() {
        let f = fixture();
        let s = sel(".content a img");
        assert!(matches_selector(&s, f.child_image, &f.dom, None));
        assert!(!matches_selector(&s, f.image, &f.dom, None));
    }

    #[test]
    fn child_combinator() {
        let f = fixture();
        assert!(matches_selector(&sel(".lighthouse > a"), f.anchor, &f.dom, None));
        assert!(!matches_selector(&sel(".lighthouse > a"), f.child_anchor, &f.dom, None));
    }

    #[test]
    fn scope_limits_ancestor_walk() {
        let f = fixture();
        let s = sel(".lighthouse img");
        assert!(matches_selector(&s, f.image, &f.dom, None));
        assert!(!matches_selector(&s, f.image, &f.dom, Some(f.container)));
        assert!(matches_selector(&sel("a img"), f.image, &f.dom, Some(f.container)));
        assert!(!matches_selector(&sel(".lighthouse > a"), f.anchor, &f.dom, Some(f.container)));
    }

    #[test]
    fn visibility_pseudo_classes_inherit() {
        let f = fixture();
        assert!(matches_selector(&sel(":hidden"), f.content, &f.dom, None));
        assert!(matches_selector(&sel("img:hidden"), f.child_image, &f.dom, None));
        assert!(matches_selector(&sel("img:visible"), f.image, &f.dom, None));
    }

    #[test]
    fn position_pseudo_classes() {
        let f = fixture();
        assert!(matches_selector(&sel("a:first-child"), f.anchor, &f.dom, None));
        assert!(matches_selector(&sel("div:last-child"), f.content, &f.dom, None));
        assert!(!matches_selector(&sel("div:first-child"), f.content, &f.dom, None));
    }

    #[test]
    fn list_matches_any() {
        let f = fixture();
        let list = parse_selector_list("span, .content").unwrap();
        assert!(matches_list(&list, f.content, &f.dom, None));
        assert!(!matches_list(&list, f.anchor, &f.dom, None));
    }

    #[test]
    fn removed_node_never_matches() {
        let mut f = fixture();
        f.dom.remove(f.child_image);
        assert!(!matches_selector(&sel("*"), f.child_image, &f.dom, None));
    }
}
