//! Page: the host-facing façade.
//!
//! [`Page`] ties together the document, animator, preloader, click bindings
//! and every registered lightbox. The host feeds it clicks and elapsed time;
//! everything else happens inside.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use slotmap::SlotMap;
use tracing::{debug, instrument};

use crate::animate::Animator;
use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::event::binding::{BindingRegistry, Handler};
use crate::event::handler::{bubble_path, ClickEvent};
use crate::lightbox::{
    CompiledConfig, LightboxConfig, LightboxController, LightboxError, LightboxEvent, LightboxId,
    Phase,
};
use crate::media::preloader::{BatchId, MediaPreloader, PreloadOptions, SettledCallback};
use crate::media::source::ImageSource;

/// Attribute read by [`Page::preload_links`].
pub const LINK_ATTR: &str = "href";

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// A document with lightboxes attached.
///
/// Loads run on the ambient tokio runtime, so registering lightboxes and
/// preloading must happen inside one. Everything else is synchronous.
pub struct Page {
    /// The document.
    pub dom: Dom,
    /// Running tweens.
    pub animator: Animator,
    /// Image metadata loader.
    pub preloader: MediaPreloader,
    /// Click bindings.
    pub bindings: BindingRegistry,
    lightboxes: SlotMap<LightboxId, LightboxController>,
    events: VecDeque<LightboxEvent>,
}

impl Page {
    /// Create an empty page loading images from `source`.
    pub fn new(source: Arc<dyn ImageSource>) -> Self {
        Self::with_options(source, PreloadOptions::default())
    }

    /// Create an empty page with custom preload options.
    pub fn with_options(source: Arc<dyn ImageSource>, options: PreloadOptions) -> Self {
        Self {
            dom: Dom::new(),
            animator: Animator::new(),
            preloader: MediaPreloader::new(source, options),
            bindings: BindingRegistry::new(),
            lightboxes: SlotMap::with_key(),
            events: VecDeque::new(),
        }
    }

    // ── Registration ─────────────────────────────────────────────────

    /// Attach a lightbox to `containers`.
    ///
    /// Binds an open handler on each container and a delegated close handler
    /// for its close control, then preloads the anchors (by `href`) and images
    /// (by `src`) of every container in the document. Fails only for an
    /// unparsable selector, before anything is bound.
    #[instrument(skip_all)]
    pub fn lighthouse(
        &mut self,
        containers: impl IntoIterator<Item = NodeId>,
        config: &LightboxConfig,
    ) -> Result<LightboxId, LightboxError> {
        let compiled = config.compile()?;
        Ok(self.register(compiled, containers.into_iter().collect()))
    }

    /// Attach a lightbox to every element matching the configured container
    /// selector.
    pub fn lighthouse_all(&mut self, config: &LightboxConfig) -> Result<LightboxId, LightboxError> {
        let compiled = config.compile()?;
        let containers = self.dom.query(&compiled.container);
        Ok(self.register(compiled, containers))
    }

    /// Load a TOML configuration from `path` and attach a lightbox to every
    /// matching container.
    pub fn lighthouse_from_file(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<LightboxId, LightboxError> {
        let config = LightboxConfig::from_file(path)?;
        self.lighthouse_all(&config)
    }

    fn register(&mut self, config: CompiledConfig, containers: Vec<NodeId>) -> LightboxId {
        let dom = &self.dom;
        let id = self
            .lightboxes
            .insert_with_key(|id| LightboxController::new(id, config, containers, dom));
        let Some(controller) = self.lightboxes.get(id) else {
            return id;
        };

        for &container in controller.containers() {
            self.bindings.bind(container, Handler::Open(id));
            self.bindings.bind_delegated(
                container,
                controller.config().close.clone(),
                Handler::Close(id),
            );
        }

        let config = controller.config();
        let mut anchors = Vec::new();
        let mut images = Vec::new();
        for container in self.dom.query(&config.container) {
            anchors.extend(self.dom.find_all(container, &config.anchor));
            images.extend(self.dom.find_all(container, &config.image));
        }
        debug!(
            ?id,
            containers = controller.containers().len(),
            anchors = anchors.len(),
            images = images.len(),
            "lightbox registered"
        );
        self.preloader.preload(&mut self.dom, anchors, LINK_ATTR, None);
        self.preloader.preload(&mut self.dom, images, "src", None);
        id
    }

    /// Remove a lightbox and its bindings. Returns whether it existed.
    ///
    /// Running transitions finish visually but no longer report events.
    pub fn unbind(&mut self, id: LightboxId) -> bool {
        let removed = self.bindings.unbind(id);
        debug!(?id, bindings = removed, "lightbox unbound");
        self.lightboxes.remove(id).is_some()
    }

    // ── Preloading ───────────────────────────────────────────────────

    /// Preload the images named by `attr` on `elements`.
    ///
    /// See [`MediaPreloader::preload`].
    pub fn preload(
        &mut self,
        elements: impl IntoIterator<Item = NodeId>,
        attr: &str,
        on_settled: Option<SettledCallback>,
    ) -> BatchId {
        self.preloader.preload(&mut self.dom, elements, attr, on_settled)
    }

    /// Preload the images linked by `href` on `elements`.
    pub fn preload_links(
        &mut self,
        elements: impl IntoIterator<Item = NodeId>,
        on_settled: Option<SettledCallback>,
    ) -> BatchId {
        self.preload(elements, LINK_ATTR, on_settled)
    }

    /// Wait for every in-flight preload and apply the results.
    pub async fn settle_preloads(&mut self) {
        self.preloader.settle(&mut self.dom).await;
    }

    // ── Event loop ───────────────────────────────────────────────────

    /// Deliver a click on `target`.
    ///
    /// The click bubbles from `target` to the root; handlers run in binding
    /// order, delegated before direct at each element. The returned event
    /// reports whether the default action was prevented.
    #[instrument(skip(self))]
    pub fn click(&mut self, target: NodeId) -> ClickEvent {
        let mut event = ClickEvent::new(target);
        let path = bubble_path(&self.dom, target);
        for dispatch in self.bindings.dispatch(&self.dom, &path) {
            let Some(controller) = self.lightboxes.get_mut(dispatch.handler.lightbox()) else {
                continue;
            };
            event.handled += 1;
            match dispatch.handler {
                Handler::Open(_) => {
                    controller.open(&mut self.dom, &mut self.animator, dispatch.current, &mut event)
                }
                Handler::Close(_) => {
                    controller.close(&mut self.dom, &mut self.animator, dispatch.current, &mut event)
                }
            };
        }
        event
    }

    /// Advance time by `dt`.
    ///
    /// Applies preload results that have arrived, steps every tween, completes
    /// finished transitions, and forgets containers that left the document.
    pub fn advance(&mut self, dt: Duration) {
        self.preloader.drain(&mut self.dom);
        for animation in self.animator.tick(&mut self.dom, dt) {
            for controller in self.lightboxes.values_mut() {
                if let Some(event) = controller.on_animation_complete(&mut self.dom, animation) {
                    self.events.push_back(event);
                }
            }
        }
        for controller in self.lightboxes.values_mut() {
            controller.prune(&self.dom);
        }
    }

    /// Take every transition event reported so far.
    pub fn drain_events(&mut self) -> Vec<LightboxEvent> {
        self.events.drain(..).collect()
    }

    // ── Query ────────────────────────────────────────────────────────

    pub fn lightbox(&self, id: LightboxId) -> Option<&LightboxController> {
        self.lightboxes.get(id)
    }

    /// Phase of `container` under lightbox `id`.
    pub fn phase(&self, id: LightboxId, container: NodeId) -> Phase {
        self.lightboxes
            .get(id)
            .map_or(Phase::Closed, |c| c.phase(container))
    }

    /// Whether any tween is still running.
    pub fn is_animating(&self) -> bool {
        !self.animator.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
