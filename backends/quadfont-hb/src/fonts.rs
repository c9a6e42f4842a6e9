// this_file: backends/quadfont-hb/src/fonts.rs

//! Font bytes shared by every collaborator of one backend.

use log::{debug, trace};
use memmap2::Mmap;
use parking_lot::RwLock;
use quadfont_core::{FontHandle, FontId, FontSource, QuadfontError, Result, Variation};
use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use ttf_parser::{Face, Tag};

/// Bytes of one loaded font.
#[derive(Clone)]
pub enum FontData {
    Mapped(Arc<Mmap>),
    Shared(Arc<[u8]>),
    Static(&'static [u8]),
}

impl FontData {
    pub fn load(source: &FontSource) -> Result<Self> {
        match source {
            FontSource::File(path) => Self::map(path),
            FontSource::Memory(data) => Ok(FontData::Shared(data.clone())),
            FontSource::Static(data) => Ok(FontData::Static(*data)),
        }
    }

    fn map(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| QuadfontError::font_load(path, e))?;
        let mmap = unsafe { Mmap::map(&file).map_err(|e| QuadfontError::font_load(path, e))? };
        debug!(target: "quadfont::fonts", "mapped {} ({} bytes)", path.display(), mmap.len());
        Ok(FontData::Mapped(Arc::new(mmap)))
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            FontData::Mapped(mmap) => &mmap[..],
            FontData::Shared(data) => &data[..],
            FontData::Static(data) => data,
        }
    }
}

enum Loaded {
    Ready(FontData),
    /// The file could not be read; remembered so it is not retried
    Failed { kind: io::ErrorKind, message: String },
}

struct Entry {
    name: String,
    loaded: Loaded,
    unparseable: bool,
}

/// Lazily loaded font bytes keyed by registry id.
///
/// An entry is reloaded when the handle's name no longer matches the one
/// it was loaded under, so a store handed to a second font system does not
/// serve stale bytes for a reused id. Load and parse failures are kept
/// until the entry is evicted.
#[derive(Default)]
pub struct FontStore {
    fonts: RwLock<HashMap<FontId, Entry>>,
    loads: AtomicUsize,
}

impl FontStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` over the raw bytes of a font, loading them on first use.
    pub fn with_bytes<R>(&self, font: FontHandle<'_>, f: impl FnOnce(&[u8]) -> R) -> Result<R> {
        {
            let fonts = self.fonts.read();
            if let Some(entry) = fonts.get(&font.id).filter(|entry| entry.name == font.name) {
                return match &entry.loaded {
                    Loaded::Ready(data) => Ok(f(data.bytes())),
                    Loaded::Failed { kind, message } => {
                        trace!(target: "quadfont::fonts", "{} failed to load before", font.name);
                        Err(cached_load_error(font, *kind, message))
                    }
                };
            }
        }

        self.loads.fetch_add(1, Ordering::Relaxed);
        let (loaded, result) = match FontData::load(font.source) {
            Ok(data) => {
                let result = f(data.bytes());
                (Loaded::Ready(data), Ok(result))
            }
            Err(err) => {
                let (kind, message) = match &err {
                    QuadfontError::FontLoad { source, .. } => (source.kind(), source.to_string()),
                    other => (io::ErrorKind::Other, other.to_string()),
                };
                (Loaded::Failed { kind, message }, Err(err))
            }
        };
        self.fonts.write().insert(
            font.id,
            Entry {
                name: font.name.to_string(),
                loaded,
                unparseable: false,
            },
        );
        result
    }

    /// Run `f` over the parsed face of a font with its variation coordinates applied.
    pub fn with_face<R>(&self, font: FontHandle<'_>, f: impl FnOnce(&Face<'_>) -> R) -> Result<R> {
        if self.is_unparseable(font) {
            return Err(QuadfontError::InvalidFontData);
        }
        let parsed = self.with_bytes(font, |bytes| match Face::parse(bytes, 0) {
            Ok(mut face) => {
                apply_variations(&mut face, font.variations);
                Ok(f(&face))
            }
            Err(err) => {
                debug!(target: "quadfont::fonts", "cannot parse {}: {err}", font.name);
                Err(QuadfontError::InvalidFontData)
            }
        })?;
        if parsed.is_err() {
            if let Some(entry) = self.fonts.write().get_mut(&font.id) {
                entry.unparseable = entry.name == font.name;
            }
        }
        parsed
    }

    fn is_unparseable(&self, font: FontHandle<'_>) -> bool {
        self.fonts
            .read()
            .get(&font.id)
            .is_some_and(|entry| entry.name == font.name && entry.unparseable)
    }

    /// Number of times font bytes were read or mapped.
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    /// Drop the bytes of one font.
    pub fn evict(&self, font: FontId) {
        self.fonts.write().remove(&font);
    }

    pub fn clear(&self) {
        self.fonts.write().clear();
    }

    pub fn len(&self) -> usize {
        self.fonts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.read().is_empty()
    }
}

fn cached_load_error(font: FontHandle<'_>, kind: io::ErrorKind, message: &str) -> QuadfontError {
    let path = match font.source {
        FontSource::File(path) => path.clone(),
        _ => PathBuf::from(font.name),
    };
    QuadfontError::font_load(path, io::Error::new(kind, message.to_string()))
}

/// Set the design coordinates of a variable face. Unknown axes are ignored.
pub(crate) fn apply_variations(face: &mut Face<'_>, variations: &[Variation]) {
    for variation in variations {
        if face.set_variation(Tag::from_bytes(&variation.tag), variation.value).is_none() {
            trace!(
                target: "quadfont::fonts",
                "axis {} not in font, ignored",
                String::from_utf8_lossy(&variation.tag)
            );
        }
    }
}

/// Pixels per font unit at a pixel size.
pub(crate) fn scale_for(face: &Face<'_>, size: u32) -> f32 {
    size as f32 / face.units_per_em().max(1) as f32
}
