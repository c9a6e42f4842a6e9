// this_file: backends/quadfont-core/src/state.rs

//! Render state and its bounded save/restore stack.

use crate::types::{FontId, HAlign, RenderMode, VAlign};
use crate::utils::quantize_size;
use crate::{QuadfontError, Result};

/// Styling applied to the next iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    pub font: Option<FontId>,
    /// Font size in pixels
    pub size: f32,
    /// Extra advance added after every glyph
    pub spacing: f32,
    pub blur: f32,
    pub h_align: HAlign,
    pub v_align: VAlign,
    pub mode: RenderMode,
    pub hinting: bool,
    pub kerning: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            font: None,
            size: 12.0,
            spacing: 0.0,
            blur: 0.0,
            h_align: HAlign::Left,
            v_align: VAlign::Baseline,
            mode: RenderMode::Normal,
            hinting: true,
            kerning: true,
        }
    }
}

impl RenderState {
    /// Integer pixel size used in glyph keys.
    pub fn pixel_size(&self) -> u32 {
        quantize_size(self.size)
    }
}

/// Stack of render states; the top is the active state.
///
/// The stack always holds at least the base state.
#[derive(Debug, Clone)]
pub struct StateStack {
    states: Vec<RenderState>,
    max_depth: usize,
}

impl StateStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            states: vec![RenderState::default()],
            max_depth: max_depth.max(1),
        }
    }

    pub fn current(&self) -> &RenderState {
        // The base state is never popped.
        &self.states[self.states.len() - 1]
    }

    pub fn current_mut(&mut self) -> &mut RenderState {
        let top = self.states.len() - 1;
        &mut self.states[top]
    }

    /// Save a copy of the active state.
    pub fn push(&mut self) -> Result<()> {
        if self.states.len() >= self.max_depth {
            return Err(QuadfontError::StateOverflow {
                depth: self.max_depth,
            });
        }
        let top = *self.current();
        self.states.push(top);
        Ok(())
    }

    /// Restore the previously saved state.
    pub fn pop(&mut self) -> Result<()> {
        if self.states.len() <= 1 {
            return Err(QuadfontError::StateUnderflow);
        }
        self.states.pop();
        Ok(())
    }

    /// Reset the active state to defaults without changing the depth.
    pub fn reset(&mut self) {
        *self.current_mut() = RenderState::default();
    }

    pub fn depth(&self) -> usize {
        self.states.len()
    }
}
