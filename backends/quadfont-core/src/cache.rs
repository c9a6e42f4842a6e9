// this_file: backends/quadfont-core/src/cache.rs

//! Glyph record cache tied to the atlas lifetime, and the shaped-run LRU.

use crate::types::{Direction, Feature, FontId, GlyphKey, ShapedGlyph, VariationId};
use log::{debug, trace};
use lru::LruCache;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Where a glyph lives in the atlas and how to place it on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphRecord {
    /// Texel position of the glyph pixels (inside its padding)
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub bearing_x: f32,
    pub bearing_y: f32,
    pub advance: f32,
    pub s0: f32,
    pub t0: f32,
    pub s1: f32,
    pub t1: f32,
    /// RGBA texels instead of coverage
    pub color: bool,
}

impl GlyphRecord {
    /// Record for a glyph with nothing to draw (space, control characters).
    pub fn empty(advance: f32) -> Self {
        Self {
            x: 0,
            y: 0,
            width: 0,
            height: 0,
            bearing_x: 0.0,
            bearing_y: 0.0,
            advance,
            s0: 0.0,
            t0: 0.0,
            s1: 0.0,
            t1: 0.0,
            color: false,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn placed(
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        bearing_x: f32,
        bearing_y: f32,
        advance: f32,
        color: bool,
        atlas: (u32, u32),
    ) -> Self {
        let mut record = Self {
            x,
            y,
            width,
            height,
            bearing_x,
            bearing_y,
            advance,
            s0: 0.0,
            t0: 0.0,
            s1: 0.0,
            t1: 0.0,
            color,
        };
        record.remap(atlas.0, atlas.1);
        record
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Recompute normalized texture coordinates for a new atlas size.
    pub fn remap(&mut self, atlas_width: u32, atlas_height: u32) {
        if self.is_empty() {
            return;
        }
        let (w, h) = (atlas_width as f32, atlas_height as f32);
        self.s0 = self.x as f32 / w;
        self.t0 = self.y as f32 / h;
        self.s1 = (self.x + self.width) as f32 / w;
        self.t1 = (self.y + self.height) as f32 / h;
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    /// Inserts refused because the record capacity was reached
    pub rejected: u64,
}

/// Glyph records keyed by (glyph, font, size).
///
/// There is no eviction: records live until [`GlyphCache::clear`], which the
/// system calls together with every atlas reset so texture coordinates of
/// live records are always valid.
#[derive(Debug, Default)]
pub struct GlyphCache {
    records: HashMap<GlyphKey, GlyphRecord>,
    capacity: Option<usize>,
    stats: CacheStats,
}

impl GlyphCache {
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            records: HashMap::new(),
            capacity,
            stats: CacheStats::default(),
        }
    }

    pub fn find(&mut self, key: &GlyphKey) -> Option<GlyphRecord> {
        match self.records.get(key) {
            Some(record) => {
                self.stats.hits += 1;
                trace!(target: "quadfont::cache", "hit {key:?}");
                Some(*record)
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    pub fn contains(&self, key: &GlyphKey) -> bool {
        self.records.contains_key(key)
    }

    pub fn is_full(&self) -> bool {
        self.capacity
            .is_some_and(|capacity| self.records.len() >= capacity)
    }

    /// Store the record for a key, or `None` when the capacity is reached.
    pub fn insert(&mut self, key: GlyphKey, record: GlyphRecord) -> Option<&GlyphRecord> {
        if self.is_full() && !self.records.contains_key(&key) {
            self.stats.rejected += 1;
            debug!(target: "quadfont::cache", "cache full, dropping {key:?}");
            return None;
        }
        self.stats.inserts += 1;
        self.records.insert(key, record);
        self.records.get(&key)
    }

    /// Forget every record and reset the counters.
    pub fn clear(&mut self) {
        debug!(target: "quadfont::cache", "clearing {} glyph records", self.records.len());
        self.records.clear();
        self.stats = CacheStats::default();
    }

    /// Drop the records of one font. Their atlas space is reclaimed on the next reset.
    pub fn remove_font(&mut self, font: FontId) {
        self.records.retain(|key, _| key.font != font);
    }

    pub fn remap_uvs(&mut self, atlas_width: u32, atlas_height: u32) {
        for record in self.records.values_mut() {
            record.remap(atlas_width, atlas_height);
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GlyphKey, &GlyphRecord)> {
        self.records.iter()
    }
}

/// Key for shape cache lookups
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct ShapeKey {
    /// Text as handed to the shaper (visual order after bidi)
    pub text: String,
    pub font: FontId,
    pub variation: VariationId,
    pub size: u32,
    pub direction: Direction,
    pub language: String,
    pub features: Vec<Feature>,
}

/// LRU of shaped glyph runs.
pub struct ShapeCache {
    cache: LruCache<ShapeKey, Arc<[ShapedGlyph]>>,
}

impl ShapeCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
        }
    }

    pub fn get(&mut self, key: &ShapeKey) -> Option<Arc<[ShapedGlyph]>> {
        self.cache.get(key).cloned()
    }

    pub fn put(&mut self, key: ShapeKey, glyphs: Vec<ShapedGlyph>) -> Arc<[ShapedGlyph]> {
        let glyphs: Arc<[ShapedGlyph]> = glyphs.into();
        self.cache.put(key, glyphs.clone());
        glyphs
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl std::fmt::Debug for ShapeCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapeCache")
            .field("len", &self.cache.len())
            .field("capacity", &self.cache.cap())
            .finish()
    }
}
