//! Batched, best-effort image preloading.
//!
//! [`MediaPreloader::preload`] starts one tokio task per distinct URL. Tasks
//! only measure; their results come back over a channel and are applied to the
//! DOM by [`drain`](MediaPreloader::drain) or [`settle`](MediaPreloader::settle)
//! on the event-loop side, so element metadata has a single writer.
//!
//! Failures are never surfaced to callers: the element simply never receives
//! metadata, and consumers fall back to stretch sizing.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, instrument, trace, warn};

use super::metadata::{ImageDimensions, MediaMetadata};
use super::source::{ImageSource, LoadError};
use crate::dom::node::NodeId;
use crate::dom::tree::Dom;

/// Identifier of one `preload` call.
pub type BatchId = u64;

/// Called once when every element of a batch has settled.
pub type SettledCallback = Box<dyn FnOnce(PreloadReport)>;

/// Outcome of a settled batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreloadReport {
    pub batch: BatchId,
    /// Elements that carry metadata.
    pub loaded: usize,
    /// Elements that will never receive metadata from this batch.
    pub failed: usize,
}

/// Preloader tuning.
#[derive(Debug, Clone, Default)]
pub struct PreloadOptions {
    /// Give up on a load after this long. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl PreloadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-load timeout (builder).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

struct Batch {
    report: PreloadReport,
    remaining: usize,
    on_settled: Option<SettledCallback>,
}

type LoadResult = (String, Result<ImageDimensions, LoadError>);

/// Loads images once per URL and attaches [`MediaMetadata`] to elements.
pub struct MediaPreloader {
    source: Arc<dyn ImageSource>,
    options: PreloadOptions,
    next_batch: BatchId,
    batches: HashMap<BatchId, Batch>,
    /// URL -> elements (and their batches) waiting on that load.
    inflight: HashMap<String, Vec<(NodeId, BatchId)>>,
    /// Settled URLs. `None` records a failure; failures are not retried.
    settled: HashMap<String, Option<MediaMetadata>>,
    tx: UnboundedSender<LoadResult>,
    rx: UnboundedReceiver<LoadResult>,
}

impl MediaPreloader {
    pub fn new(source: Arc<dyn ImageSource>, options: PreloadOptions) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            source,
            options,
            next_batch: 0,
            batches: HashMap::new(),
            inflight: HashMap::new(),
            settled: HashMap::new(),
            tx,
            rx,
        }
    }

    /// Preload the images named by `attr` on each element.
    ///
    /// Elements without the attribute fail immediately. URLs that already
    /// settled are applied without reloading; URLs in flight are shared. If
    /// nothing needs to wait, `on_settled` runs before this returns.
    ///
    /// Must be called from within a tokio runtime when new URLs are involved.
    #[instrument(skip_all, fields(attr = attr))]
    pub fn preload(
        &mut self,
        dom: &mut Dom,
        elements: impl IntoIterator<Item = NodeId>,
        attr: &str,
        on_settled: Option<SettledCallback>,
    ) -> BatchId {
        let batch_id = self.next_batch;
        self.next_batch += 1;
        let mut batch = Batch {
            report: PreloadReport {
                batch: batch_id,
                ..PreloadReport::default()
            },
            remaining: 0,
            on_settled,
        };

        for element in elements {
            let Some(node) = dom.get(element) else {
                batch.report.failed += 1;
                continue;
            };
            if node.media.is_some() {
                batch.report.loaded += 1;
                continue;
            }
            let Some(url) = node.attr(attr).map(str::to_owned) else {
                trace!(?element, "no url attribute, skipping");
                batch.report.failed += 1;
                continue;
            };

            if let Some(meta) = self.settled.get(&url).copied() {
                tally(&mut batch.report, attach(dom, element, meta));
            } else if let Some(waiters) = self.inflight.get_mut(&url) {
                waiters.push((element, batch_id));
                batch.remaining += 1;
            } else {
                self.spawn_load(url.clone());
                self.inflight.insert(url, vec![(element, batch_id)]);
                batch.remaining += 1;
            }
        }

        debug!(batch = batch_id, pending = batch.remaining, "preload batch started");
        if batch.remaining == 0 {
            finish(batch);
        } else {
            self.batches.insert(batch_id, batch);
        }
        batch_id
    }

    fn spawn_load(&self, url: String) {
        let load = self.source.load(&url);
        let timeout = self.options.timeout;
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = match timeout {
                Some(after) => match tokio::time::timeout(after, load).await {
                    Ok(result) => result,
                    Err(_) => Err(LoadError::TimedOut {
                        url: url.clone(),
                        after,
                    }),
                },
                None => load.await,
            };
            // The receiver only goes away with the preloader itself.
            let _ = tx.send((url, result));
        });
    }

    /// Apply every load result that has arrived so far. Never blocks.
    ///
    /// Returns the number of URLs that settled.
    pub fn drain(&mut self, dom: &mut Dom) -> usize {
        let mut count = 0;
        while let Ok(result) = self.rx.try_recv() {
            self.complete(dom, result);
            count += 1;
        }
        count
    }

    /// Wait until every in-flight load has settled, applying results as they
    /// arrive.
    ///
    /// A load that never settles keeps this pending; configure
    /// [`PreloadOptions::timeout`] when sources can stall.
    pub async fn settle(&mut self, dom: &mut Dom) {
        self.drain(dom);
        while !self.inflight.is_empty() {
            match self.rx.recv().await {
                Some(result) => self.complete(dom, result),
                None => break,
            }
        }
    }

    fn complete(&mut self, dom: &mut Dom, (url, result): LoadResult) {
        let meta = match result {
            Ok(dims) => {
                let meta = MediaMetadata::from_dimensions(dims.width, dims.height);
                if meta.is_none() {
                    debug!(%url, "image has zero size");
                }
                meta
            }
            Err(err) => {
                warn!(%url, error = %err, "preload failed");
                None
            }
        };
        self.settled.insert(url.clone(), meta);

        for (element, batch_id) in self.inflight.remove(&url).unwrap_or_default() {
            let attached = attach(dom, element, meta);
            let Some(batch) = self.batches.get_mut(&batch_id) else {
                continue;
            };
            tally(&mut batch.report, attached);
            batch.remaining = batch.remaining.saturating_sub(1);
            if batch.remaining == 0 {
                if let Some(batch) = self.batches.remove(&batch_id) {
                    finish(batch);
                }
            }
        }
    }

    /// Whether a batch still has unsettled elements.
    pub fn is_pending(&self, batch: BatchId) -> bool {
        self.batches.contains_key(&batch)
    }

    /// Number of URLs currently loading.
    pub fn loads_in_flight(&self) -> usize {
        self.inflight.len()
    }

    /// Settled metadata for a URL, if it loaded successfully.
    pub fn metadata_for(&self, url: &str) -> Option<MediaMetadata> {
        self.settled.get(url).copied().flatten()
    }
}

/// Attach metadata to an element that does not already have it.
///
/// Returns whether the element ends up carrying metadata.
fn attach(dom: &mut Dom, element: NodeId, meta: Option<MediaMetadata>) -> bool {
    let Some(node) = dom.get_mut(element) else {
        return false;
    };
    if node.media.is_none() {
        node.media = meta;
    }
    node.media.is_some()
}

fn tally(report: &mut PreloadReport, loaded: bool) {
    if loaded {
        report.loaded += 1;
    } else {
        report.failed += 1;
    }
}

fn finish(batch: Batch) {
    debug!(
        batch = batch.report.batch,
        loaded = batch.report.loaded,
        failed = batch.report.failed,
        "preload batch settled"
    );
    if let Some(callback) = batch.on_settled {
        callback(batch.report);
    }
}
