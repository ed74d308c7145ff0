//! Click binding registry.
//!
//! [`BindingRegistry`] holds direct bindings (fire when a click bubbles
//! through the bound element) and delegated bindings (fire on the bound
//! element only when the click started inside a descendant matching a
//! selector). Each binding belongs to one lightbox so it can be unbound as a
//! group.

use crate::css::matcher::matches_list;
use crate::css::model::SelectorList;
use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::lightbox::LightboxId;

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// What a binding does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    /// Open the bound container.
    Open(LightboxId),
    /// Close the bound container.
    Close(LightboxId),
}

impl Handler {
    /// The lightbox this handler belongs to.
    pub fn lightbox(self) -> LightboxId {
        match self {
            Self::Open(id) | Self::Close(id) => id,
        }
    }
}

// ---------------------------------------------------------------------------
// Binding
// ---------------------------------------------------------------------------

/// A single registered click binding.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// The element the handler is attached to.
    pub node: NodeId,
    /// For delegated bindings, the selector the click origin must match.
    pub delegate: Option<SelectorList>,
    pub handler: Handler,
}

/// A binding selected to run for one click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    /// The element the binding is attached to.
    pub current: NodeId,
    /// The element that satisfied the delegate selector, or `current` for
    /// direct bindings.
    pub matched: NodeId,
    pub handler: Handler,
}

// ---------------------------------------------------------------------------
// BindingRegistry
// ---------------------------------------------------------------------------

/// Registry of click bindings, in registration order.
#[derive(Debug, Default)]
pub struct BindingRegistry {
    bindings: Vec<Binding>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `handler` directly to `node`.
    pub fn bind(&mut self, node: NodeId, handler: Handler) {
        self.bindings.push(Binding {
            node,
            delegate: None,
            handler,
        });
    }

    /// Bind `handler` on `node` for clicks originating in descendants
    /// matching `selector`.
    ///
    /// Matching elements may be created after the binding is registered.
    pub fn bind_delegated(&mut self, node: NodeId, selector: SelectorList, handler: Handler) {
        self.bindings.push(Binding {
            node,
            delegate: Some(selector),
            handler,
        });
    }

    /// Remove every binding belonging to `lightbox`. Returns how many were removed.
    pub fn unbind(&mut self, lightbox: LightboxId) -> usize {
        let before = self.bindings.len();
        self.bindings.retain(|b| b.handler.lightbox() != lightbox);
        before - self.bindings.len()
    }

    /// Remove every binding attached to `node`.
    pub fn unbind_node(&mut self, node: NodeId) -> usize {
        let before = self.bindings.len();
        self.bindings.retain(|b| b.node != node);
        before - self.bindings.len()
    }

    /// The handlers to run for a click that bubbles along `path`, in order.
    ///
    /// At each element of the path, delegated bindings run before direct
    /// ones. A delegated binding runs once for every element between the
    /// origin and the bound element (exclusive) that matches its selector,
    /// innermost first.
    pub fn dispatch(&self, dom: &Dom, path: &[NodeId]) -> Vec<Dispatch> {
        let mut queue = Vec::new();
        for (depth, &current) in path.iter().enumerate() {
            let below = &path[..depth];
            for binding in self.bindings.iter().filter(|b| b.node == current) {
                let Some(selector) = &binding.delegate else {
                    continue;
                };
                for &origin in below {
                    if matches_list(selector, origin, dom, None) {
                        queue.push(Dispatch {
                            current,
                            matched: origin,
                            handler: binding.handler,
                        });
                    }
                }
            }
            for binding in self
                .bindings
                .iter()
                .filter(|b| b.node == current && b.delegate.is_none())
            {
                queue.push(Dispatch {
                    current,
                    matched: current,
                    handler: binding.handler,
                });
            }
        }
        queue
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::parser::parse_selector_list;
    use crate::dom::node::NodeData;
    use crate::event::handler::bubble_path;
    use pretty_assertions::assert_eq;
    use slotmap::SlotMap;

    fn lightbox_ids() -> (LightboxId, LightboxId) {
        let mut ids: SlotMap<LightboxId, ()> = SlotMap::with_key();
        (ids.insert(()), ids.insert(()))
    }

    /// ```text
    /// body
    /// └── div.lighthouse
    ///     ├── a
    ///     │   └── img
    ///     └── div.content
    ///         └── a.close
    /// ```
    fn tree() -> (Dom, [NodeId; 6]) {
        let mut dom = Dom::new();
        let body = dom.insert(NodeData::new("body"));
        let c = dom
            .insert_child(body, NodeData::new("div").with_class("lighthouse"))
            .unwrap();
        let a = dom.insert_child(c, NodeData::new("a")).unwrap();
        let img = dom.insert_child(a, NodeData::new("img")).unwrap();
        let content = dom
            .insert_child(c, NodeData::new("div").with_class("content"))
            .unwrap();
        let close = dom
            .insert_child(content, NodeData::new("a").with_class("close"))
            .unwrap();
        (dom, [body, c, a, img, content, close])
    }

    #[test]
    fn direct_binding_fires_on_bubble() {
        let (dom, [_, c, _, img, ..]) = tree();
        let (lb, _) = lightbox_ids();
        let mut reg = BindingRegistry::new();
        reg.bind(c, Handler::Open(lb));

        let queue = reg.dispatch(&dom, &bubble_path(&dom, img));
        assert_eq!(
            queue,
            vec![Dispatch {
                current: c,
                matched: c,
                handler: Handler::Open(lb)
            }]
        );
    }

    #[test]
    fn delegated_runs_before_direct() {
        let (dom, [_, c, _, _, _, close]) = tree();
        let (lb, _) = lightbox_ids();
        let mut reg = BindingRegistry::new();
        reg.bind(c, Handler::Open(lb));
        reg.bind_delegated(c, parse_selector_list(".close").unwrap(), Handler::Close(lb));

        let queue = reg.dispatch(&dom, &bubble_path(&dom, close));
        let handlers: Vec<_> = queue.iter().map(|d| d.handler).collect();
        assert_eq!(handlers, vec![Handler::Close(lb), Handler::Open(lb)]);
        assert_eq!(queue[0].matched, close);
    }

    #[test]
    fn delegated_ignores_non_matching_origin() {
        let (dom, [_, c, _, img, ..]) = tree();
        let (lb, _) = lightbox_ids();
        let mut reg = BindingRegistry::new();
        reg.bind_delegated(c, parse_selector_list(".close").unwrap(), Handler::Close(lb));
        assert!(reg.dispatch(&dom, &bubble_path(&dom, img)).is_empty());
    }

    #[test]
    fn delegated_never_matches_bound_element() {
        let (dom, [body, c, ..]) = tree();
        let (lb, _) = lightbox_ids();
        let mut reg = BindingRegistry::new();
        reg.bind_delegated(c, parse_selector_list(".lighthouse").unwrap(), Handler::Close(lb));
        reg.bind_delegated(body, parse_selector_list(".lighthouse").unwrap(), Handler::Open(lb));
        let queue = reg.dispatch(&dom, &bubble_path(&dom, c));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].current, body);
        assert_eq!(queue[0].matched, c);
    }

    #[test]
    fn unbind_by_lightbox() {
        let (_, [body, c, ..]) = tree();
        let (first, second) = lightbox_ids();
        let mut reg = BindingRegistry::new();
        reg.bind(c, Handler::Open(first));
        reg.bind(body, Handler::Open(second));
        reg.bind_delegated(c, parse_selector_list(".close").unwrap(), Handler::Close(first));

        assert_eq!(reg.unbind(first), 2);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.unbind_node(body), 1);
        assert!(reg.is_empty());
    }
}
