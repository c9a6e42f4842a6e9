// this_file: backends/quadfont-core/src/atlas.rs

//! Shelf packer placing glyph rectangles into the atlas texture.

use crate::{QuadfontError, Result};
use log::{debug, trace};

/// A horizontal shelf of the atlas.
///
/// The height of a row is fixed at creation; only its fill cursor moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasRow {
    pub y: u32,
    pub height: u32,
    /// Next free x position
    pub x: u32,
}

/// Best-fit shelf packer over a bounded 2D region.
#[derive(Debug, Clone)]
pub struct AtlasPacker {
    width: u32,
    height: u32,
    rows: Vec<AtlasRow>,
    max_rows: usize,
    used_height: u32,
}

impl AtlasPacker {
    pub fn new(width: u32, height: u32, max_rows: usize) -> Self {
        Self {
            width,
            height,
            rows: Vec::new(),
            max_rows,
            used_height: 0,
        }
    }

    /// Place a `width` x `height` rectangle and return its top-left corner.
    ///
    /// Existing rows are scanned for the shortest one that still fits the
    /// rectangle; ties go to the earliest row. Otherwise a new row is opened
    /// below the last one.
    pub fn pack(&mut self, width: u32, height: u32) -> Result<(u32, u32)> {
        let atlas_width = self.width;
        let best = self
            .rows
            .iter_mut()
            .filter(|row| row.height >= height && atlas_width - row.x >= width)
            .fold(None::<&mut AtlasRow>, |best, row| match best {
                Some(current) if current.height <= row.height => Some(current),
                _ => Some(row),
            });

        if let Some(row) = best {
            let position = (row.x, row.y);
            row.x += width;
            trace!(target: "quadfont::atlas", "packed {width}x{height} at {position:?}");
            return Ok(position);
        }

        if self.rows.len() >= self.max_rows {
            return Err(QuadfontError::RowLimit {
                max_rows: self.max_rows,
            });
        }
        if width > self.width || height > self.height - self.used_height {
            return Err(QuadfontError::AtlasFull {
                width: self.width,
                height: self.height,
                requested_width: width,
                requested_height: height,
            });
        }

        let y = self.used_height;
        self.rows.push(AtlasRow {
            y,
            height,
            x: width,
        });
        self.used_height += height;
        debug!(
            target: "quadfont::atlas",
            "opened row {} at y={y} height={height}",
            self.rows.len() - 1
        );
        Ok((0, y))
    }

    /// Drop every row and start over with the given dimensions.
    pub fn reset(&mut self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(QuadfontError::InvalidAtlasSize {
                width,
                height,
                reason: "atlas dimensions must be non-zero".to_string(),
            });
        }
        self.width = width;
        self.height = height;
        self.rows.clear();
        self.used_height = 0;
        debug!(target: "quadfont::atlas", "reset atlas to {width}x{height}");
        Ok(())
    }

    /// Grow the atlas while keeping every packed rectangle in place.
    pub fn expand(&mut self, width: u32, height: u32) -> Result<()> {
        if width < self.width || height < self.height {
            return Err(QuadfontError::InvalidAtlasSize {
                width,
                height,
                reason: format!("cannot shrink atlas from {}x{}", self.width, self.height),
            });
        }
        debug!(
            target: "quadfont::atlas",
            "expanded atlas from {}x{} to {width}x{height}",
            self.width,
            self.height
        );
        self.width = width;
        self.height = height;
        Ok(())
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn rows(&self) -> &[AtlasRow] {
        &self.rows
    }

    pub fn used_height(&self) -> u32 {
        self.used_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_shelf_math_for_uniform_glyphs() {
        let mut packer = AtlasPacker::new(64, 64, 256);
        let positions: Vec<_> = (0..7).map(|_| packer.pack(10, 12).unwrap()).collect();
        assert_eq!(
            positions,
            vec![(0, 0), (10, 0), (20, 0), (30, 0), (40, 0), (50, 0), (0, 12)]
        );
        assert_eq!(packer.rows().len(), 2);
        assert_eq!(packer.used_height(), 24);
    }

    #[test]
    fn test_best_fit_prefers_shortest_row() {
        let mut packer = AtlasPacker::new(100, 100, 256);
        assert_eq!(packer.pack(10, 20).unwrap(), (0, 0));
        // Too wide for what is left of the first row.
        assert_eq!(packer.pack(95, 8).unwrap(), (0, 20));
        // Both rows can hold a 5x6 glyph; the 8 pixel row wastes less.
        assert_eq!(packer.pack(5, 6).unwrap(), (95, 20));
        // Only the tall row fits a 15 pixel glyph.
        assert_eq!(packer.pack(10, 15).unwrap(), (10, 0));
    }

    #[test]
    fn test_no_space_and_row_limit() {
        let mut packer = AtlasPacker::new(32, 16, 256);
        packer.pack(32, 10).unwrap();
        let err = packer.pack(4, 8).unwrap_err();
        assert!(matches!(err, QuadfontError::AtlasFull { .. }));
        assert!(matches!(
            packer.pack(40, 2).unwrap_err(),
            QuadfontError::AtlasFull { .. }
        ));

        let mut limited = AtlasPacker::new(32, 64, 2);
        limited.pack(32, 4).unwrap();
        limited.pack(32, 4).unwrap();
        assert!(matches!(
            limited.pack(4, 4).unwrap_err(),
            QuadfontError::RowLimit { max_rows: 2 }
        ));
    }

    #[test]
    fn test_reset_reclaims_space() {
        let mut packer = AtlasPacker::new(16, 16, 256);
        packer.pack(16, 16).unwrap();
        assert!(packer.pack(1, 1).is_err());
        packer.reset(32, 32).unwrap();
        assert_eq!(packer.size(), (32, 32));
        assert_eq!(packer.pack(8, 8).unwrap(), (0, 0));
        assert!(packer.reset(0, 32).is_err());
    }

    #[test]
    fn test_expand_keeps_rows_and_adds_room() {
        let mut packer = AtlasPacker::new(20, 12, 256);
        packer.pack(10, 12).unwrap();
        packer.pack(10, 12).unwrap();
        assert!(packer.pack(10, 12).is_err());

        packer.expand(40, 24).unwrap();
        assert_eq!(packer.pack(10, 12).unwrap(), (20, 0));
        assert_eq!(packer.pack(30, 12).unwrap(), (0, 12));
        assert!(packer.expand(30, 24).is_err());
    }

    #[test]
    fn test_random_rectangles_never_overlap() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..20 {
            let mut packer = AtlasPacker::new(256, 256, 256);
            let mut placed: Vec<(u32, u32, u32, u32)> = Vec::new();
            for _ in 0..400 {
                let w = rng.gen_range(1..=40);
                let h = rng.gen_range(1..=40);
                let Ok((x, y)) = packer.pack(w, h) else {
                    continue;
                };
                assert!(x + w <= 256 && y + h <= 256, "rect escapes atlas");
                for &(ox, oy, ow, oh) in &placed {
                    let disjoint = x + w <= ox || ox + ow <= x || y + h <= oy || oy + oh <= y;
                    assert!(
                        disjoint,
                        "({x},{y},{w},{h}) overlaps ({ox},{oy},{ow},{oh})"
                    );
                }
                placed.push((x, y, w, h));
            }
            assert!(!placed.is_empty());
        }
    }
}
