//! Saved designs
//!
//! A saved design is the portable projection of a selection: catalog ids
//! only, no session-local instance ids. It is re-hydrated against the
//! catalog when loaded.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::catalog::{Catalog, CatalogItem, Color, Room, Section};

use super::{Perspective, PlacedItem, SelectionState};

/// Current saved design schema version. Bumped only on breaking changes.
pub const SAVED_DESIGN_VERSION: u32 = 1;

/// Export/import errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("a room and a wall color must be selected before saving")]
    IncompleteSelection,

    #[error("unsupported design version {0}")]
    UnsupportedVersion(u32),

    #[error("unknown {section} id: {id}")]
    UnknownItem { section: Section, id: String },

    #[error("invalid design document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write design file: {0}")]
    Io(#[from] std::io::Error),
}

/// Reference to a catalog template by id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    pub id: String,
}

/// Portable design document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedDesign {
    pub version: u32,
    pub room_id: String,
    pub color_id: String,
    pub furniture: Vec<ItemRef>,
    pub decor: Vec<ItemRef>,
    pub perspective: Perspective,
}

/// A saved design resolved against a catalog, ready to be placed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDesign {
    pub room: Room,
    pub color: Color,
    pub furniture: Vec<CatalogItem>,
    pub decor: Vec<CatalogItem>,
    pub perspective: Perspective,
}

/// Project a selection onto a saved design
pub fn export_design(state: &SelectionState) -> Result<SavedDesign, ExportError> {
    let (room, color) = match (&state.room, &state.color) {
        (Some(room), Some(color)) => (room, color),
        _ => return Err(ExportError::IncompleteSelection),
    };

    let refs = |items: &[PlacedItem]| -> Vec<ItemRef> {
        items
            .iter()
            .map(|p| ItemRef {
                id: p.item.id.clone(),
            })
            .collect()
    };

    Ok(SavedDesign {
        version: SAVED_DESIGN_VERSION,
        room_id: room.id.clone(),
        color_id: color.id.clone(),
        furniture: refs(&state.furniture),
        decor: refs(&state.decor),
        perspective: state.perspective,
    })
}

/// Download file name for a room, e.g. `Living-Room-design.json`
pub fn file_name(room: &Room) -> String {
    if room.name.is_empty() {
        return "room-design.json".to_string();
    }

    // Each whitespace run becomes one hyphen, including leading and trailing runs
    let mut name = String::with_capacity(room.name.len());
    let mut in_space = false;
    for c in room.name.chars() {
        if c.is_whitespace() {
            if !in_space {
                name.push('-');
            }
            in_space = true;
        } else {
            name.push(c);
            in_space = false;
        }
    }
    format!("{}-design.json", name)
}

/// Export a selection into `dir`, returning the written path
pub fn write_design(state: &SelectionState, dir: &Path) -> Result<PathBuf, ExportError> {
    let design = export_design(state)?;
    let room = state.room.as_ref().ok_or(ExportError::IncompleteSelection)?;

    let path = dir.join(file_name(room));
    std::fs::write(&path, design.to_json()?)?;

    info!("Saved design for '{}' to {}", room.name, path.display());
    Ok(path)
}

impl SavedDesign {
    /// Pretty-printed JSON document
    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a design document, rejecting unknown schema versions
    pub fn from_json(json: &str) -> Result<Self, ExportError> {
        let design: SavedDesign = serde_json::from_str(json)?;
        if design.version != SAVED_DESIGN_VERSION {
            return Err(ExportError::UnsupportedVersion(design.version));
        }
        Ok(design)
    }

    /// Look every id up in the catalog
    pub fn rehydrate(&self, catalog: &Catalog) -> Result<ResolvedDesign, ExportError> {
        let unknown = |section: Section, id: &str| ExportError::UnknownItem {
            section,
            id: id.to_string(),
        };

        let room = catalog
            .room(&self.room_id)
            .ok_or_else(|| unknown(Section::Rooms, &self.room_id))?;
        let color = catalog
            .color(&self.color_id)
            .ok_or_else(|| unknown(Section::Colors, &self.color_id))?;
        let furniture = self
            .furniture
            .iter()
            .map(|r| {
                catalog
                    .furniture_item(&r.id)
                    .cloned()
                    .ok_or_else(|| unknown(Section::Furniture, &r.id))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let decor = self
            .decor
            .iter()
            .map(|r| {
                catalog
                    .decor_item(&r.id)
                    .cloned()
                    .ok_or_else(|| unknown(Section::Decor, &r.id))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ResolvedDesign {
            room: room.clone(),
            color: color.clone(),
            furniture,
            decor,
            perspective: self.perspective,
        })
    }
}
