//! The lightbox controller: open and close transitions for a set of containers.

use std::collections::HashMap;

use tracing::{debug, instrument, trace};

use super::config::{CompiledConfig, ContentType};
use super::fit::fit_image;
use super::roles::{element_for, Roles};
use super::state::{ContainerState, LightboxEvent, Phase};
use super::LightboxId;
use crate::animate::{AnimationId, Animator, Tween};
use crate::css::matcher::matches_list;
use crate::css::scalar::Scalar;
use crate::css::style::{InlineStyle, StyleProperty};
use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::event::handler::ClickEvent;
use crate::geometry::{Rect, Size};

/// Class marking the expanded overlay and its controls as shown.
pub const ACTIVE_CLASS: &str = "active";

/// Drives the open/close state machine of every container registered with
/// one lightbox.
#[derive(Debug)]
pub struct LightboxController {
    id: LightboxId,
    config: CompiledConfig,
    containers: Vec<NodeId>,
    states: HashMap<NodeId, ContainerState>,
    /// Running animation -> container whose transition waits on it.
    owners: HashMap<AnimationId, NodeId>,
}

impl LightboxController {
    /// Register `containers`.
    ///
    /// A container whose child-content element is already visible starts
    /// out open. This is the only time visibility is consulted.
    pub fn new(
        id: LightboxId,
        config: CompiledConfig,
        containers: impl IntoIterator<Item = NodeId>,
        dom: &Dom,
    ) -> Self {
        let mut controller = Self {
            id,
            config,
            containers: Vec::new(),
            states: HashMap::new(),
            owners: HashMap::new(),
        };
        for container in containers {
            if !dom.contains(container) || controller.states.contains_key(&container) {
                continue;
            }
            let roles = Roles::resolve(dom, container, &controller.config);
            let mut state = ContainerState::new();
            state.content_type = roles.content_type;
            if let Some(child) = roles.child.filter(|&c| dom.is_visible(c)) {
                trace!(?container, "static content already shown");
                state.phase = Phase::Open;
                state.child = Some(child);
            }
            controller.containers.push(container);
            controller.states.insert(container, state);
        }
        controller
    }

    pub fn id(&self) -> LightboxId {
        self.id
    }

    pub fn config(&self) -> &CompiledConfig {
        &self.config
    }

    /// Registered containers, in registration order.
    pub fn containers(&self) -> &[NodeId] {
        &self.containers
    }

    pub fn state(&self, container: NodeId) -> Option<&ContainerState> {
        self.states.get(&container)
    }

    /// Current phase of a container. Unknown containers read as closed.
    pub fn phase(&self, container: NodeId) -> Phase {
        self.states
            .get(&container)
            .map_or(Phase::Closed, |s| s.phase)
    }

    /// Whether `animation` belongs to one of this controller's transitions.
    pub fn owns_animation(&self, animation: AnimationId) -> bool {
        self.owners.contains_key(&animation)
    }

    // ── Open ─────────────────────────────────────────────────────────

    /// Expand `container`. Returns whether a transition started.
    ///
    /// A no-op unless the container is closed.
    #[instrument(skip(self, dom, animator, event), fields(lightbox = ?self.id))]
    pub fn open(
        &mut self,
        dom: &mut Dom,
        animator: &mut Animator,
        container: NodeId,
        event: &mut ClickEvent,
    ) -> bool {
        match self.states.get(&container) {
            Some(state) if state.phase == Phase::Closed => {}
            Some(state) => {
                trace!(phase = %state.phase, "activation ignored");
                return false;
            }
            None => return false,
        }

        let mut roles = Roles::resolve(dom, container, &self.config);
        let mut created = false;
        match roles.content_type {
            ContentType::Image => {
                let href = attr(dom, roles.anchor, "href");
                let src = attr(dom, roles.image, "src");
                if href != src {
                    event.prevent_default();
                    if let Some(child) = self.materialize(dom, &roles, href.as_deref()) {
                        roles = roles.with_child(dom, &self.config, child);
                        created = true;
                    }
                }
            }
            ContentType::Html => event.prevent_default(),
        }

        let Some(child) = roles.child else {
            debug!(?container, "no content to expand");
            return false;
        };

        // Background, shown at once.
        let mut background = element_for(&self.config.background, "div");
        background.add_class(ACTIVE_CLASS);
        let mut controls: Vec<NodeId> = dom.insert_child(child, background).into_iter().collect();

        // The child frame takes the thumbnail's size.
        let thumb_size = roles.image.and_then(|i| dom.rendered_box(i)).map(Rect::size);
        if let (Some(frame), Some(size)) = (roles.child_anchor, thumb_size) {
            if let Some(node) = dom.get_mut(frame) {
                node.style.extend([
                    (StyleProperty::Width, Scalar::px(size.width)),
                    (StyleProperty::Height, Scalar::px(size.height)),
                ]);
            }
        }

        if let Some(image) = roles.child_image {
            // Host layout of the frame would win over the inline size just written.
            let frame = thumb_size
                .or_else(|| roles.child_anchor.and_then(|a| dom.rendered_box(a)).map(Rect::size))
                .unwrap_or(Size::ZERO);
            let meta = dom.get(image).and_then(|n| n.media);
            let placement = fit_image(frame, meta.as_ref());
            trace!(?placement, known = meta.is_some(), "child image placed");
            if let Some(node) = dom.get_mut(image) {
                placement.apply(&mut node.style);
            }
        }

        // Grow from the container's box to the viewport.
        let origin = dom.rendered_box(container).unwrap_or(Rect::EMPTY);
        if let Some(node) = dom.get_mut(child) {
            snap_box(&mut node.style, origin);
            node.style.set(StyleProperty::Opacity, Scalar::number(0.0));
            node.add_class(ACTIVE_CLASS);
        }
        let mut pending = vec![
            animator.start(dom, Tween::fade_in(child, self.config.secondary_duration)),
            animator.start(
                dom,
                Tween::new(child, self.config.open_duration)
                    .to(StyleProperty::Width, Scalar::percent(100.0))
                    .to(StyleProperty::Height, Scalar::percent(100.0))
                    .to(StyleProperty::Left, Scalar::ZERO)
                    .to(StyleProperty::Top, Scalar::ZERO),
            ),
        ];

        let mut close = element_for(&self.config.close, "a")
            .with_attr("href", "#")
            .with_text("X");
        close.style.set(StyleProperty::Opacity, Scalar::number(0.0));
        close.add_class(ACTIVE_CLASS);
        if let Some(close) = dom.insert_child(child, close) {
            controls.push(close);
            pending.push(animator.start(
                dom,
                Tween::fade_in(close, self.config.secondary_duration),
            ));
        }

        debug!(?container, ?child, created, content = ?roles.content_type, "opening");
        for &animation in &pending {
            self.owners.insert(animation, container);
        }
        if let Some(state) = self.states.get_mut(&container) {
            state.phase = Phase::Opening;
            state.content_type = roles.content_type;
            state.child = Some(child);
            state.created_child = created;
            state.controls = controls;
            state.pending = pending.into_iter().collect();
        }
        true
    }

    /// Build a hidden child-content element holding a copy of the
    /// container's markup, with the copied image pointing at `href`.
    fn materialize(&self, dom: &mut Dom, roles: &Roles, href: Option<&str>) -> Option<NodeId> {
        let container = roles.container;
        let sources: Vec<NodeId> = dom
            .children(container)
            .iter()
            .copied()
            .filter(|&c| !matches_list(&self.config.child, c, dom, Some(container)))
            .collect();

        let child = dom.insert_child(container, element_for(&self.config.child, "div").hidden())?;
        for source in sources {
            dom.clone_subtree(source, child);
        }

        let image = dom.find_nested(child, &[&self.config.child_anchor, &self.config.child_image]);
        if let Some(image) = image {
            // The anchor's metadata describes the linked image.
            let meta = roles.anchor.and_then(|a| dom.get(a)).and_then(|n| n.media);
            if let Some(node) = dom.get_mut(image) {
                if let Some(href) = href {
                    node.set_attr("src", href);
                }
                node.media = meta;
            }
        }
        trace!(?child, "child content created");
        Some(child)
    }

    // ── Close ────────────────────────────────────────────────────────

    /// Collapse `container` back onto its box. Returns whether a transition
    /// started.
    ///
    /// A no-op unless the container is open.
    #[instrument(skip(self, dom, animator, event), fields(lightbox = ?self.id))]
    pub fn close(
        &mut self,
        dom: &mut Dom,
        animator: &mut Animator,
        container: NodeId,
        event: &mut ClickEvent,
    ) -> bool {
        let Some(state) = self.states.get_mut(&container) else {
            return false;
        };
        if state.phase != Phase::Open {
            trace!(phase = %state.phase, "close ignored");
            return false;
        }
        event.prevent_default();

        let roles = Roles::resolve(dom, container, &self.config);
        let mut controls = std::mem::take(&mut state.controls);
        if controls.is_empty() {
            // Opened at registration: nothing of ours was inserted.
            controls.extend([roles.close, roles.background].into_iter().flatten());
        }
        for control in controls {
            dom.remove(control);
        }

        let Some(child) = state.child.filter(|&c| dom.contains(c)).or(roles.child) else {
            debug!(?container, "content vanished while open");
            state.phase = Phase::Closed;
            state.child = None;
            state.created_child = false;
            return false;
        };
        if let Some(node) = dom.get_mut(child) {
            node.remove_class(ACTIVE_CLASS);
        }

        let target = dom.rendered_box(container).unwrap_or(Rect::EMPTY);
        let duration = self.config.close_duration;
        let pending = [
            animator.start(dom, Tween::fade_out(child, duration)),
            animator.start(
                dom,
                Tween::new(child, duration)
                    .to(StyleProperty::Height, Scalar::px(target.height))
                    .to(StyleProperty::Width, Scalar::px(target.width))
                    .to(StyleProperty::Top, Scalar::px(target.y))
                    .to(StyleProperty::Left, Scalar::px(target.x)),
            ),
        ];

        debug!(?container, ?child, "closing");
        state.phase = Phase::Closing;
        state.child = Some(child);
        state.pending = pending.iter().copied().collect();
        for animation in pending {
            self.owners.insert(animation, container);
        }
        true
    }

    // ── Completion ───────────────────────────────────────────────────

    /// Record that an animation finished. Completes the owning transition
    /// once its last animation is done.
    pub fn on_animation_complete(
        &mut self,
        dom: &mut Dom,
        animation: AnimationId,
    ) -> Option<LightboxEvent> {
        let container = self.owners.remove(&animation)?;
        let state = self.states.get_mut(&container)?;
        state.pending.remove(&animation);
        if !state.pending.is_empty() {
            return None;
        }

        match state.phase {
            Phase::Opening => {
                state.phase = Phase::Open;
                debug!(?container, "opened");
                Some(LightboxEvent::Opened {
                    lightbox: self.id,
                    container,
                })
            }
            Phase::Closing => {
                if state.content_type == ContentType::Image && state.created_child {
                    if let Some(child) = state.child.take() {
                        dom.remove(child);
                    }
                    state.created_child = false;
                }
                state.phase = Phase::Closed;
                debug!(?container, "closed");
                Some(LightboxEvent::Closed {
                    lightbox: self.id,
                    container,
                })
            }
            Phase::Closed | Phase::Open => None,
        }
    }

    /// Forget containers that are no longer part of the document.
    ///
    /// Returns how many were dropped.
    pub fn prune(&mut self, dom: &Dom) -> usize {
        let before = self.containers.len();
        self.containers.retain(|&c| dom.is_connected(c));
        let states = &mut self.states;
        let containers = &self.containers;
        states.retain(|c, _| containers.contains(c));
        self.owners.retain(|_, c| states.contains_key(c));
        before - self.containers.len()
    }
}

fn attr(dom: &Dom, node: Option<NodeId>, name: &str) -> Option<String> {
    node.and_then(|n| dom.get(n))
        .and_then(|n| n.attr(name))
        .map(str::to_owned)
}

fn snap_box(style: &mut InlineStyle, rect: Rect) {
    style.extend([
        (StyleProperty::Width, Scalar::px(rect.width)),
        (StyleProperty::Height, Scalar::px(rect.height)),
        (StyleProperty::Left, Scalar::px(rect.x)),
        (StyleProperty::Top, Scalar::px(rect.y)),
    ]);
}
