//! Cursor-based action selection.
//!
//! Button A moves the cursor forward, button B moves it back. The cursor is
//! never reset; it is mapped onto the catalog with a Euclidean remainder when
//! read, so `-1` selects the last action.
//!
//! # Example
//! ```rust
//! use fdc_core::utils::catalog::{ActionSelector, Catalog};
//! let catalog = Catalog::builtin();
//! let mut selector = ActionSelector::new();
//! selector.retreat();
//! assert_eq!(selector.current(&catalog).name, "shake");
//! ```

use super::{Action, Catalog};
use crate::utils::controllers::Display;

/// Cursor over the catalog that wraps in both directions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionSelector {
    cursor: i32,
}

impl ActionSelector {
    /// Selector pointing at the first action.
    pub const fn new() -> Self {
        Self { cursor: 0 }
    }

    /// Raw cursor, before wrapping into the catalog.
    pub fn cursor(&self) -> i32 {
        self.cursor
    }

    /// Move to the next action.
    pub fn advance(&mut self) {
        self.cursor = self.cursor.wrapping_add(1);
    }

    /// Move to the previous action.
    pub fn retreat(&mut self) {
        self.cursor = self.cursor.wrapping_sub(1);
    }

    /// Catalog index for the current cursor, in `[0, len)`. `len` must be
    /// non-zero; `0` is returned otherwise.
    pub fn index(
        &self,
        len: usize,
    ) -> usize {
        if len == 0 {
            return 0;
        }
        i64::from(self.cursor).rem_euclid(len as i64) as usize
    }

    /// The currently selected action.
    pub fn current<'c>(
        &self,
        catalog: &'c Catalog,
    ) -> &'c Action {
        let index = self.index(catalog.len());
        &catalog.actions()[index]
    }

    /// Show the selected action's glyph and return the action.
    pub fn select<'c, D: Display + ?Sized>(
        &self,
        catalog: &'c Catalog,
        display: &mut D,
    ) -> &'c Action {
        let action = self.current(catalog);
        display.show_pattern(&action.glyph.to_display());
        tracing::info!(
            cursor = self.cursor,
            index = self.index(catalog.len()),
            name = %action.name,
            "action selected"
        );
        action
    }
}
