//! The animator: runs tweens against the DOM as time advances.

use std::time::Duration;

use slotmap::{new_key_type, SlotMap};
use tracing::trace;

use super::tween::Tween;
use crate::css::scalar::Scalar;
use crate::css::style::StyleProperty;
use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::geometry::lerp;

new_key_type! {
    /// Handle to a running tween.
    pub struct AnimationId;
}

/// One animated property of a running tween.
#[derive(Debug, Clone, Copy)]
struct Track {
    property: StyleProperty,
    /// Inline value before the tween started, restored by hiding tweens.
    original: Option<Scalar>,
    from: f32,
    /// Absolute target, or `None` when it cannot be interpolated (`auto`).
    to: Option<f32>,
    target: Scalar,
}

#[derive(Debug)]
struct Running {
    tween: Tween,
    tracks: Vec<Track>,
    elapsed: Duration,
}

impl Running {
    fn progress(&self) -> f32 {
        if self.tween.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_nanos() as f64 / self.tween.duration.as_nanos() as f64).min(1.0) as f32
    }
}

/// Runs any number of concurrent tweens, including several on the same node.
///
/// Tweens start immediately and are stepped by [`tick`](Animator::tick).
/// Targets given in percent are resolved against the viewport when the tween
/// starts; the exact target value is written when it finishes.
#[derive(Debug, Default)]
pub struct Animator {
    running: SlotMap<AnimationId, Running>,
    /// Start order, so completions are reported deterministically.
    order: Vec<AnimationId>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tween from the node's current values.
    pub fn start(&mut self, dom: &mut Dom, tween: Tween) -> AnimationId {
        let tracks = tween
            .targets
            .iter()
            .map(|&(property, target)| Track {
                property,
                original: dom.get(tween.node).and_then(|n| n.style.get(property)),
                from: dom.computed_value(tween.node, property),
                to: target.resolve(dom.reference_length(property.axis())),
                target,
            })
            .collect();
        if tween.show_on_start {
            dom.set_visible(tween.node, true);
        }
        trace!(node = ?tween.node, duration = ?tween.duration, "tween started");

        let id = self.running.insert(Running {
            tween,
            tracks,
            elapsed: Duration::ZERO,
        });
        self.order.push(id);
        id
    }

    /// Advance every running tween by `dt` and write the interpolated values.
    ///
    /// Returns the tweens that finished during this tick, in start order. A
    /// tween whose node has been removed finishes immediately.
    pub fn tick(&mut self, dom: &mut Dom, dt: Duration) -> Vec<AnimationId> {
        let mut finished = Vec::new();
        for &id in &self.order {
            let Some(running) = self.running.get_mut(id) else {
                continue;
            };
            running.elapsed += dt;
            let node = running.tween.node;
            if !dom.contains(node) {
                finished.push(id);
                continue;
            }

            let progress = running.progress();
            if progress >= 1.0 {
                finish(dom, running);
                finished.push(id);
            } else {
                let eased = running.tween.easing.apply(progress);
                step(dom, node, &running.tracks, eased);
            }
        }

        for id in &finished {
            self.running.remove(*id);
        }
        self.order.retain(|id| self.running.contains_key(*id));
        finished
    }

    /// Whether a tween is still running.
    pub fn is_running(&self, id: AnimationId) -> bool {
        self.running.contains_key(id)
    }

    /// Number of running tweens.
    pub fn len(&self) -> usize {
        self.running.len()
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }
}

fn step(dom: &mut Dom, node: NodeId, tracks: &[Track], eased: f32) {
    let Some(data) = dom.get_mut(node) else {
        return;
    };
    for track in tracks {
        let Some(to) = track.to else {
            continue;
        };
        let value = lerp(track.from, to, eased);
        let scalar = match track.property {
            StyleProperty::Opacity => Scalar::number(value),
            _ => Scalar::px(value),
        };
        data.style.set(track.property, scalar);
    }
}

fn finish(dom: &mut Dom, running: &Running) {
    let Some(data) = dom.get_mut(running.tween.node) else {
        return;
    };
    if running.tween.hide_on_finish {
        data.visible = false;
        for track in &running.tracks {
            match track.original {
                Some(value) => data.style.set(track.property, value),
                None => {
                    data.style.remove(track.property);
                }
            }
        }
    } else {
        for track in &running.tracks {
            data.style.set(track.property, track.target);
        }
    }
}
