//! Pilot: programmatic interaction with a headless page.
//!
//! The `Pilot` wraps a [`Page`](crate::page::Page) backed by a
//! [`StaticImageSource`] and provides methods to click, let time pass, and
//! inspect the resulting markup.

use std::sync::Arc;
use std::time::Duration;

use super::source::StaticImageSource;
use crate::dom::node::{NodeData, NodeId};
use crate::geometry::{Rect, Size};
use crate::lightbox::{LightboxConfig, LightboxError, LightboxEvent, LightboxId, Phase};
use crate::media::preloader::PreloadOptions;
use crate::page::Page;

/// One animation frame at 60 fps.
pub const FRAME: Duration = Duration::from_millis(16);

/// Upper bound on frames [`Pilot::run_until_idle`] will step.
const MAX_FRAMES: usize = 10_000;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless page driver for testing.
///
/// # Examples
///
/// ```ignore
/// use lighthouse::testing::{Pilot, StaticImageSource, Thumbnail};
///
/// let mut pilot = Pilot::new(1000.0, 800.0, StaticImageSource::new());
/// let (container, thumb) = pilot.add(Thumbnail::new("big.jpg", "thumb.jpg", rect)).unwrap();
/// pilot.click(thumb);
/// pilot.run_until_idle();
/// ```
pub struct Pilot {
    page: Page,
    source: StaticImageSource,
    body: NodeId,
}

impl Pilot {
    /// Create a page with an empty `body` and the given viewport.
    pub fn new(width: f32, height: f32, source: StaticImageSource) -> Self {
        Self::with_options(width, height, source, PreloadOptions::default())
    }

    /// Like [`new`](Self::new) with custom preload options.
    pub fn with_options(
        width: f32,
        height: f32,
        source: StaticImageSource,
        options: PreloadOptions,
    ) -> Self {
        let mut page = Page::with_options(Arc::new(source.clone()), options);
        page.dom.set_viewport(Size::new(width, height));
        let body = page.dom.insert(NodeData::new("body"));
        Self { page, source, body }
    }

    // ── Setup ────────────────────────────────────────────────────────

    /// Add a thumbnail container to the body.
    pub fn add(&mut self, thumbnail: super::fixture::Thumbnail) -> Option<(NodeId, NodeId)> {
        thumbnail.build(&mut self.page.dom, self.body)
    }

    /// Attach a lightbox to every configured container.
    pub fn lighthouse(&mut self, config: &LightboxConfig) -> Result<LightboxId, LightboxError> {
        self.page.lighthouse_all(config)
    }

    // ── Interaction ──────────────────────────────────────────────────

    /// Click `target`. Returns whether the default action was prevented.
    pub fn click(&mut self, target: NodeId) -> bool {
        self.page.click(target).default_prevented
    }

    /// Advance time by `ms` milliseconds in one step.
    pub fn advance_ms(&mut self, ms: u64) {
        self.page.advance(Duration::from_millis(ms));
    }

    /// Step frame by frame until no tween is running.
    ///
    /// Returns the number of frames stepped.
    pub fn run_until_idle(&mut self) -> usize {
        let mut frames = 0;
        while self.page.is_animating() && frames < MAX_FRAMES {
            self.page.advance(FRAME);
            frames += 1;
        }
        frames
    }

    /// Wait for every preload to settle.
    pub async fn settle(&mut self) {
        self.page.settle_preloads().await;
    }

    /// Give a container a new host box, as after a scroll or resize.
    pub fn relayout(&mut self, container: NodeId, rect: Rect) {
        self.page.dom.set_layout(container, rect);
    }

    // ── Query ────────────────────────────────────────────────────────

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn source(&self) -> &StaticImageSource {
        &self.source
    }

    pub fn phase(&self, lightbox: LightboxId, container: NodeId) -> Phase {
        self.page.phase(lightbox, container)
    }

    pub fn events(&mut self) -> Vec<LightboxEvent> {
        self.page.drain_events()
    }

    /// Markup of `node` without inline style.
    pub fn markup(&self, node: NodeId) -> String {
        self.page.dom.to_markup(node)
    }

    /// Markup of `node` including inline style.
    pub fn styled_markup(&self, node: NodeId) -> String {
        self.page.dom.to_markup_with_style(node)
    }

    /// First element matching `selector` anywhere in the document.
    pub fn find(&self, selector: &str) -> Option<NodeId> {
        self.page
            .dom
            .select(selector)
            .ok()
            .and_then(|found| found.first().copied())
    }
}

// ===========================================================================
// Tests
// ===========================================================================
