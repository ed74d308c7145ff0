//! Headless testing framework: Pilot, an in-memory image source, gallery fixtures.
//!
//! Use the [`Pilot`] to drive a [`Page`](crate::page::Page) without a browser
//! or real image files. [`StaticImageSource`] serves fixed dimensions per URL
//! and [`Thumbnail`] builds container markup.

pub mod fixture;
pub mod pilot;
pub mod source;

pub use fixture::Thumbnail;
pub use pilot::{Pilot, FRAME};
pub use source::StaticImageSource;
