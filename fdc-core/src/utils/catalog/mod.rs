//! Action catalog.
//!
//! The catalog is the ordered list of actions the operator can record. It is
//! read from the first row of an existing data log so a dataset can be
//! resumed, and falls back to a built-in two-action set for a fresh log.
//! Actions are identified by position; duplicate names are kept.

pub mod parser;
pub mod selector;

use alloc::{string::String, vec, vec::Vec};

use crate::utils::{controllers::DataLog, glyph, glyph::Glyph};

pub use parser::{encode_row, parse_first_row};
pub use selector::ActionSelector;

/// A recordable action: the label written to the log and its glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub name: String,
    pub glyph: Glyph,
}

impl Action {
    /// Action named `name` shown as `glyph`.
    pub fn new(
        name: impl Into<String>,
        glyph: Glyph,
    ) -> Self {
        Self {
            name: name.into(),
            glyph,
        }
    }
}

/// Where a catalog came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    /// Built-in defaults; the log held no catalog.
    Builtin,
    /// Parsed from the first row of the data log.
    Log,
}

/// Non-empty, immutable list of actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    actions: Vec<Action>,
    source: CatalogSource,
}

impl Catalog {
    /// The built-in "still" / "shake" catalog.
    pub fn builtin() -> Self {
        Self {
            actions: vec![
                Action::new("still", glyph::STILL),
                Action::new("shake", glyph::SHAKE),
            ],
            source: CatalogSource::Builtin,
        }
    }

    /// Wrap parsed actions; `None` if there are none.
    pub fn from_actions(actions: Vec<Action>) -> Option<Self> {
        if actions.is_empty() {
            return None;
        }
        Some(Self {
            actions,
            source: CatalogSource::Log,
        })
    }

    /// Load the catalog from the first row of `log`, or the built-in one if the
    /// log is empty or its first row yields no actions.
    pub fn load<L: DataLog + ?Sized>(log: &mut L) -> Result<Self, L::Error> {
        let csv_len = log.length()?;
        if csv_len == 0 {
            tracing::info!("empty data log, using built-in catalog");
            return Ok(Self::builtin());
        }

        let actions = parse_first_row(log, csv_len)?;
        match Self::from_actions(actions) {
            Some(catalog) => {
                tracing::info!(actions = catalog.len(), "catalog loaded from data log");
                Ok(catalog)
            }
            None => {
                tracing::warn!("no actions in first log row, using built-in catalog");
                Ok(Self::builtin())
            }
        }
    }

    /// Where the actions came from.
    pub fn source(&self) -> CatalogSource {
        self.source
    }

    /// Number of actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// `true` if the catalog has no actions.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Action at `index`, if any.
    pub fn get(
        &self,
        index: usize,
    ) -> Option<&Action> {
        self.actions.get(index)
    }

    /// All actions in catalog order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }
}
