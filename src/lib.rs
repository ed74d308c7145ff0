//! # lighthouse
//!
//! A thumbnail-to-lightbox media viewer over a retained DOM.
//!
//! Clicking a thumbnail expands its linked image (or inline content) into an
//! overlay that grows from the thumbnail's box to fill the viewport; a close
//! control reverses the animation and removes what was added. Images are
//! preloaded off the critical path so the overlay can be centered by
//! orientation, falling back to stretch sizing while metadata is unknown.
//!
//! ## Core Systems
//!
//! - **[`page`]** — Host façade: registration, clicks, time, events
//! - **[`lightbox`]** — Configuration, role lookup, fit geometry, open/close state machine
//! - **[`media`]** — Image metadata and asynchronous, deduplicated preloading
//! - **[`dom`]** — Slotmap-backed DOM arena with scoped selector queries and markup output
//! - **[`css`]** — Selector tokenizer, parser, matcher; scalar values and inline style
//! - **[`animate`]** — Eased tweens of inline style properties
//! - **[`event`]** — Click bubbling with direct and delegated bindings
//! - **[`testing`]** — Headless Pilot, in-memory image source, gallery fixtures
//! - **[`geometry`]** — Offset, Size, Rect primitives

// Foundation
pub mod geometry;

// Core systems
pub mod css;
pub mod dom;

// Collaborators
pub mod animate;
pub mod event;
pub mod media;

// Lightbox
pub mod lightbox;
pub mod page;

// Test harness
pub mod testing;

pub use lightbox::{ContentType, LightboxConfig, LightboxError, LightboxEvent, LightboxId, Phase};
pub use media::{MediaMetadata, Orientation};
pub use page::Page;
