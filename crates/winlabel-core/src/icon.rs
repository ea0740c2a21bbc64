//! Window icon resolution with a bounded per-handle cache.
//!
//! The platform supplies raw icons through [`IconSource`]; this module
//! normalises them to [`ICON_SIZE`] and remembers the result so the
//! expensive lookup runs once per window.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::Result;

/// Edge length in pixels of every cached icon.
pub const ICON_SIZE: u32 = 16;

/// Default number of windows whose icons are kept.
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// A decoded, square RGBA icon shared between the cache and the surface.
pub type Icon = Arc<RgbaImage>;

/// Produces a window's icon at whatever size the OS or package has.
pub trait IconSource {
    fn load(&self, hwnd: usize) -> Result<RgbaImage>;
}

impl<T: IconSource + ?Sized> IconSource for &T {
    fn load(&self, hwnd: usize) -> Result<RgbaImage> {
        (**self).load(hwnd)
    }
}

/// Least-recently-used map from window handle to icon.
#[derive(Debug)]
pub struct IconCache {
    entries: HashMap<usize, Icon>,
    /// Handles ordered from least to most recently used.
    order: VecDeque<usize>,
    capacity: usize,
}

impl IconCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Returns the cached icon and marks it as most recently used.
    pub fn get(&mut self, hwnd: usize) -> Option<Icon> {
        let icon = self.entries.get(&hwnd).cloned()?;
        self.touch(hwnd);
        Some(icon)
    }

    /// Inserts an icon, evicting the least recently used entry when full.
    pub fn insert(&mut self, hwnd: usize, icon: Icon) {
        if self.entries.insert(hwnd, icon).is_some() {
            self.touch(hwnd);
            return;
        }
        self.order.push_back(hwnd);
        while self.order.len() > self.capacity {
            if let Some(evicted) = self.order.pop_front() {
                self.entries.remove(&evicted);
                tracing::trace!("icon cache evicted 0x{evicted:X}");
            }
        }
    }

    pub fn contains(&self, hwnd: usize) -> bool {
        self.entries.contains_key(&hwnd)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn touch(&mut self, hwnd: usize) {
        if let Some(pos) = self.order.iter().position(|&h| h == hwnd) {
            self.order.remove(pos);
        }
        self.order.push_back(hwnd);
    }
}

/// Resolves and caches window icons.
pub struct IconResolver<S> {
    source: S,
    cache: IconCache,
}

impl<S: IconSource> IconResolver<S> {
    pub fn new(source: S, capacity: usize) -> Self {
        Self {
            source,
            cache: IconCache::new(capacity),
        }
    }

    /// Returns the icon for `hwnd`, loading it on first use.
    ///
    /// Failures are logged and reported as `None`; they are not cached,
    /// so a window whose icon appears later is retried.
    pub fn resolve_icon(&mut self, hwnd: usize) -> Option<Icon> {
        if let Some(icon) = self.cache.get(hwnd) {
            return Some(icon);
        }
        match self.source.load(hwnd) {
            Ok(raw) => {
                let icon = Arc::new(normalize(raw));
                self.cache.insert(hwnd, Arc::clone(&icon));
                Some(icon)
            }
            Err(e) => {
                tracing::debug!("no icon for 0x{hwnd:X}: {e}");
                None
            }
        }
    }

    pub fn cache(&self) -> &IconCache {
        &self.cache
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

/// Scales an icon to `ICON_SIZE` square unless it already is.
pub fn normalize(raw: RgbaImage) -> RgbaImage {
    if raw.width() == ICON_SIZE && raw.height() == ICON_SIZE {
        return raw;
    }
    imageops::resize(&raw, ICON_SIZE, ICON_SIZE, FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use image::Rgba;

    use super::*;
    use crate::Error;

    /// Fake source that counts how often the expensive path runs.
    struct CountingSource {
        calls: Cell<usize>,
        fail: bool,
    }

    impl CountingSource {
        fn new() -> Self {
            Self {
                calls: Cell::new(0),
                fail: false,
            }
        }
    }

    impl IconSource for CountingSource {
        fn load(&self, hwnd: usize) -> Result<RgbaImage> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(Error::IconDecode("no icon".into()));
            }
            let shade = (hwnd % 256) as u8;
            Ok(RgbaImage::from_pixel(32, 32, Rgba([shade, 0, 255 - shade, 255])))
        }
    }

    #[test]
    fn resolved_icons_are_sixteen_pixels_square() {
        // Arrange
        let mut resolver = IconResolver::new(CountingSource::new(), 8);

        // Act
        let icon = resolver.resolve_icon(0x10).unwrap();

        // Assert
        assert_eq!(icon.dimensions(), (ICON_SIZE, ICON_SIZE));
    }

    #[test]
    fn second_lookup_hits_cache_with_identical_pixels() {
        // Arrange
        let mut resolver = IconResolver::new(CountingSource::new(), 8);

        // Act
        let first = resolver.resolve_icon(0x42).unwrap();
        let second = resolver.resolve_icon(0x42).unwrap();

        // Assert
        assert_eq!(first.as_raw(), second.as_raw());
        assert_eq!(resolver.source().calls.get(), 1);
    }

    #[test]
    fn failures_are_not_cached() {
        // Arrange
        let source = CountingSource {
            calls: Cell::new(0),
            fail: true,
        };
        let mut resolver = IconResolver::new(source, 8);

        // Act
        assert!(resolver.resolve_icon(0x42).is_none());
        assert!(resolver.resolve_icon(0x42).is_none());

        // Assert
        assert_eq!(resolver.source().calls.get(), 2);
        assert!(resolver.cache().is_empty());
    }

    #[test]
    fn cache_evicts_least_recently_used() {
        // Arrange
        let mut cache = IconCache::new(2);
        let icon = Arc::new(RgbaImage::new(ICON_SIZE, ICON_SIZE));
        cache.insert(1, Arc::clone(&icon));
        cache.insert(2, Arc::clone(&icon));

        // Act: touch 1 so 2 becomes the eviction candidate
        assert!(cache.get(1).is_some());
        cache.insert(3, icon);

        // Assert
        assert!(cache.contains(1));
        assert!(!cache.contains(2));
        assert!(cache.contains(3));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn reinserting_a_handle_does_not_grow_the_cache() {
        let mut cache = IconCache::new(2);
        let icon = Arc::new(RgbaImage::new(ICON_SIZE, ICON_SIZE));
        cache.insert(1, Arc::clone(&icon));
        cache.insert(1, icon);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn zero_capacity_still_keeps_one_entry() {
        let mut cache = IconCache::new(0);
        cache.insert(7, Arc::new(RgbaImage::new(1, 1)));
        assert!(cache.contains(7));
    }

    #[test]
    fn normalize_keeps_correctly_sized_icons_untouched() {
        // Arrange
        let raw = RgbaImage::from_pixel(ICON_SIZE, ICON_SIZE, Rgba([1, 2, 3, 4]));

        // Act
        let out = normalize(raw.clone());

        // Assert
        assert_eq!(out, raw);
    }
}
