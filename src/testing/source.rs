//! In-memory image source for tests and demos.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::media::metadata::ImageDimensions;
use crate::media::source::{ImageSource, LoadError, LoadFuture};

#[derive(Debug, Clone, Copy)]
enum Entry {
    Image {
        dims: ImageDimensions,
        delay: Option<Duration>,
    },
    /// Never settles.
    Stalled,
}

/// Serves fixed dimensions per URL. Unknown URLs fail with an IO error.
///
/// Clones share load counters, so a test can keep a handle after giving the
/// source to a preloader.
#[derive(Debug, Clone, Default)]
pub struct StaticImageSource {
    entries: HashMap<String, Entry>,
    loads: Arc<Mutex<HashMap<String, usize>>>,
}

impl StaticImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `url` as a `width` x `height` image (builder).
    pub fn with_image(mut self, url: impl Into<String>, width: u32, height: u32) -> Self {
        self.entries.insert(
            url.into(),
            Entry::Image {
                dims: ImageDimensions::new(width, height),
                delay: None,
            },
        );
        self
    }

    /// Serve `url` after a delay (builder).
    pub fn with_delayed_image(
        mut self,
        url: impl Into<String>,
        width: u32,
        height: u32,
        delay: Duration,
    ) -> Self {
        self.entries.insert(
            url.into(),
            Entry::Image {
                dims: ImageDimensions::new(width, height),
                delay: Some(delay),
            },
        );
        self
    }

    /// Make loads of `url` hang forever (builder).
    pub fn with_stalled(mut self, url: impl Into<String>) -> Self {
        self.entries.insert(url.into(), Entry::Stalled);
        self
    }

    /// How many times `url` has been requested.
    pub fn load_count(&self, url: &str) -> usize {
        let loads = self.loads.lock().unwrap_or_else(PoisonError::into_inner);
        loads.get(url).copied().unwrap_or(0)
    }
}

impl ImageSource for StaticImageSource {
    fn load(&self, url: &str) -> LoadFuture {
        *self
            .loads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(url.to_string())
            .or_default() += 1;

        let entry = self.entries.get(url).copied();
        let url = url.to_string();
        Box::pin(async move {
            match entry {
                Some(Entry::Image { dims, delay }) => {
                    if let Some(delay) = delay {
                        tokio::time::sleep(delay).await;
                    }
                    Ok(dims)
                }
                Some(Entry::Stalled) => std::future::pending().await,
                None => Err(LoadError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    url,
                ))),
            }
        })
    }
}
