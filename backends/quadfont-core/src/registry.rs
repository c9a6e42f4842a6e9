// this_file: backends/quadfont-core/src/registry.rs

//! Fixed-capacity registry of fonts and their fallback links.

use crate::traits::FontHandle;
use crate::types::{FieldMode, FontId, FontSource, Variation, VariationId};
use crate::{QuadfontError, Result};
use log::debug;

/// Lazily resolved answer to "does this font carry color glyphs".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorSupport {
    #[default]
    Unknown,
    Yes,
    No,
}

/// Outcome of the shaper's per-font preparation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapingStatus {
    #[default]
    Unprepared,
    Ready,
    Failed,
}

/// A registered font.
#[derive(Debug, Clone)]
pub struct FontRecord {
    pub id: FontId,
    pub name: String,
    pub source: FontSource,
    pub fallback: Option<FontId>,
    pub color: ColorSupport,
    pub shaping: ShapingStatus,
    pub field_mode: FieldMode,
    /// Active design coordinates, sorted by axis tag
    pub variations: Vec<Variation>,
    pub variation: VariationId,
}

impl FontRecord {
    pub fn handle(&self) -> FontHandle<'_> {
        FontHandle {
            id: self.id,
            name: &self.name,
            source: &self.source,
            variations: &self.variations,
        }
    }
}

/// Registry of fonts, addressed by [`FontId`] or by name.
///
/// Registration only records the source; parsing happens in the
/// collaborators on first use.
#[derive(Debug)]
pub struct FontRegistry {
    fonts: Vec<FontRecord>,
    capacity: usize,
    // Indexed by VariationId; slot 0 is the default instance.
    instances: Vec<Vec<Variation>>,
}

impl FontRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            fonts: Vec::new(),
            capacity,
            instances: vec![Vec::new()],
        }
    }

    /// Register a font. A name that is already known returns its existing id.
    pub fn register(&mut self, name: &str, source: FontSource) -> Result<FontId> {
        if let Some(existing) = self.fonts.iter().find(|font| font.name == name) {
            debug!(target: "quadfont::registry", "font '{name}' already registered as {:?}", existing.id);
            return Ok(existing.id);
        }
        if self.fonts.len() >= self.capacity {
            return Err(QuadfontError::RegistryFull {
                capacity: self.capacity,
            });
        }

        let id = FontId(self.fonts.len());
        self.fonts.push(FontRecord {
            id,
            name: name.to_string(),
            source,
            fallback: None,
            color: ColorSupport::Unknown,
            shaping: ShapingStatus::Unprepared,
            field_mode: FieldMode::Off,
            variations: Vec::new(),
            variation: VariationId::default(),
        });
        debug!(target: "quadfont::registry", "registered font '{name}' as {id:?}");
        Ok(id)
    }

    pub fn find(&self, name: &str) -> Result<FontId> {
        self.fonts
            .iter()
            .find(|font| font.name == name)
            .map(|font| font.id)
            .ok_or_else(|| QuadfontError::FontNotFound {
                name: name.to_string(),
            })
    }

    pub fn get(&self, id: FontId) -> Option<&FontRecord> {
        self.fonts.get(id.0)
    }

    pub fn get_mut(&mut self, id: FontId) -> Option<&mut FontRecord> {
        self.fonts.get_mut(id.0)
    }

    fn require_mut(&mut self, id: FontId) -> Result<&mut FontRecord> {
        self.fonts
            .get_mut(id.0)
            .ok_or_else(|| QuadfontError::unknown_font(id))
    }

    pub fn set_fallback(&mut self, base: FontId, fallback: FontId) -> Result<()> {
        if self.get(fallback).is_none() {
            return Err(QuadfontError::unknown_font(fallback));
        }
        self.require_mut(base)?.fallback = Some(fallback);
        Ok(())
    }

    pub fn clear_fallback(&mut self, base: FontId) -> Result<()> {
        self.require_mut(base)?.fallback = None;
        Ok(())
    }

    /// The single fallback hop for `font`. A self link is ignored.
    pub fn fallback_of(&self, font: FontId) -> Option<FontId> {
        self.get(font)
            .and_then(|record| record.fallback)
            .filter(|fallback| *fallback != font)
    }

    pub fn set_field_mode(&mut self, font: FontId, mode: FieldMode) -> Result<()> {
        self.require_mut(font)?.field_mode = mode;
        Ok(())
    }

    /// Set the design coordinates of a variable font.
    ///
    /// Later entries for the same axis win. Equal coordinate sets share one
    /// [`VariationId`]; an empty set selects the default instance.
    pub fn set_variations(&mut self, font: FontId, coords: &[Variation]) -> Result<VariationId> {
        let mut normalized: Vec<Variation> = Vec::with_capacity(coords.len());
        for coord in coords {
            match normalized.iter_mut().find(|known| known.tag == coord.tag) {
                Some(known) => known.value = coord.value,
                None => normalized.push(*coord),
            }
        }
        normalized.sort_by_key(|coord| coord.tag);

        let id = match self.instances.iter().position(|known| *known == normalized) {
            Some(index) => VariationId(index as u32),
            None => {
                self.instances.push(normalized.clone());
                VariationId((self.instances.len() - 1) as u32)
            }
        };
        let record = self.require_mut(font)?;
        record.variations = normalized;
        record.variation = id;
        debug!(target: "quadfont::registry", "font {font:?} uses variation instance {id:?}");
        Ok(id)
    }

    pub fn variations(&self, font: FontId) -> Result<&[Variation]> {
        self.get(font)
            .map(|record| record.variations.as_slice())
            .ok_or_else(|| QuadfontError::unknown_font(font))
    }

    /// Variation instance of `font`, the default instance for unknown ids.
    pub fn variation_of(&self, font: FontId) -> VariationId {
        self.get(font)
            .map(|record| record.variation)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &FontRecord> {
        self.fonts.iter()
    }
}
