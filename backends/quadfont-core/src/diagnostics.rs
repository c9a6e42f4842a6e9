// this_file: backends/quadfont-core/src/diagnostics.rs

//! Font system diagnostics helpers for structured debug logging.

use crate::cache::CacheStats;
use crate::system::FontSystem;
use log::{debug, log_enabled, Level};

/// Lightweight snapshot of atlas, cache and registry state.
#[derive(Debug, Clone)]
pub struct SystemDiagnostics<'a> {
    pub collaborators: String,
    pub fonts: usize,
    pub atlas_width: u32,
    pub atlas_height: u32,
    pub rows: usize,
    pub used_height: u32,
    pub glyphs: usize,
    pub color_glyphs: usize,
    pub cache: CacheStats,
    pub shaped_runs: usize,
    pub state_depth: usize,
    pub overflowed: bool,
    pub language: &'a str,
}

impl<'a> SystemDiagnostics<'a> {
    /// Capture the diagnostic snapshot for the provided system.
    pub fn new(system: &'a FontSystem) -> Self {
        let (atlas_width, atlas_height) = system.atlas_size();
        Self {
            collaborators: system.collaborators().describe(),
            fonts: system.registry().len(),
            atlas_width,
            atlas_height,
            rows: system.atlas().rows().len(),
            used_height: system.atlas().used_height(),
            glyphs: system.cache().len(),
            color_glyphs: system
                .cache()
                .iter()
                .filter(|(_, record)| record.color)
                .count(),
            cache: system.cache_stats(),
            shaped_runs: system.shaped_runs_cached(),
            state_depth: system.state_depth(),
            overflowed: system.atlas_overflowed(),
            language: system.language(),
        }
    }

    /// Fraction of the atlas height consumed by rows.
    pub fn atlas_fill(&self) -> f32 {
        if self.atlas_height == 0 {
            return 0.0;
        }
        self.used_height as f32 / self.atlas_height as f32
    }

    /// Emit the diagnostic snapshot at debug level when logging is enabled.
    pub fn log(&self) {
        if log_enabled!(target: "quadfont::system", Level::Debug) {
            debug!(
                target: "quadfont::system",
                "{collaborators} fonts={fonts} atlas={w}x{h} rows={rows} fill={fill:.2} glyphs={glyphs} color={color} hits={hits} misses={misses} shaped={shaped} depth={depth} overflowed={overflowed} lang={lang}",
                collaborators = self.collaborators,
                fonts = self.fonts,
                w = self.atlas_width,
                h = self.atlas_height,
                rows = self.rows,
                fill = self.atlas_fill(),
                glyphs = self.glyphs,
                color = self.color_glyphs,
                hits = self.cache.hits,
                misses = self.cache.misses,
                shaped = self.shaped_runs,
                depth = self.state_depth,
                overflowed = self.overflowed,
                lang = self.language,
            );
        }
    }
}
