//! Media metadata and asynchronous image preloading.

pub mod metadata;
pub mod preloader;
pub mod source;

pub use metadata::{ImageDimensions, MediaMetadata, Orientation};
pub use preloader::{BatchId, MediaPreloader, PreloadOptions, PreloadReport, SettledCallback};
pub use source::{measure, FileImageSource, ImageSource, LoadError, LoadFuture};
