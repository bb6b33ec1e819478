//! Design catalog
//!
//! The fixed set of selectable rooms, wall colors, furniture and decor
//! templates, plus the room → recommended colors table. Loaded once and
//! shared read-only between sessions.

mod builtin;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A selectable catalog entry (room, furniture or decor template)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    /// Stable identifier, used by saved designs
    pub id: String,
    /// English display name
    pub name: String,
    /// Localization key for the display name
    pub name_key: String,
    /// Preview image reference
    pub image_url: String,
    /// Phrase inserted into the generation prompt
    pub description: String,
}

/// Rooms carry nothing beyond the common catalog fields
pub type Room = CatalogItem;

/// A wall color
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    pub id: String,
    /// English display name, lower-cased into the prompt
    pub name: String,
    pub name_key: String,
    /// Hex value, e.g. `#FFFFFF`
    pub hex: String,
}

/// Catalog sections, used when reporting lookup failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Rooms,
    Colors,
    Furniture,
    Decor,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Rooms => "room",
            Section::Colors => "color",
            Section::Furniture => "furniture",
            Section::Decor => "decor",
        };
        f.write_str(name)
    }
}

/// Immutable catalog of design building blocks
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    rooms: Vec<Room>,
    colors: Vec<Color>,
    furniture: Vec<CatalogItem>,
    decor: Vec<CatalogItem>,
    /// room id -> recommended color ids
    recommendations: HashMap<String, Vec<String>>,
}

impl Catalog {
    /// Create a catalog from explicit lists
    pub fn new(
        rooms: Vec<Room>,
        colors: Vec<Color>,
        furniture: Vec<CatalogItem>,
        decor: Vec<CatalogItem>,
        recommendations: HashMap<String, Vec<String>>,
    ) -> Self {
        Self {
            rooms,
            colors,
            furniture,
            decor,
            recommendations,
        }
    }

    /// The catalog shipped with roomcraft
    pub fn builtin() -> Self {
        builtin::catalog()
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn furniture(&self) -> &[CatalogItem] {
        &self.furniture
    }

    pub fn decor(&self) -> &[CatalogItem] {
        &self.decor
    }

    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn color(&self, id: &str) -> Option<&Color> {
        self.colors.iter().find(|c| c.id == id)
    }

    pub fn furniture_item(&self, id: &str) -> Option<&CatalogItem> {
        self.furniture.iter().find(|f| f.id == id)
    }

    pub fn decor_item(&self, id: &str) -> Option<&CatalogItem> {
        self.decor.iter().find(|d| d.id == id)
    }

    /// Colors recommended for a room, in catalog order
    ///
    /// Rooms without an entry in the recommendation table get an empty list.
    pub fn recommended_colors(&self, room_id: &str) -> Vec<&Color> {
        match self.recommendations.get(room_id) {
            Some(ids) => self
                .colors
                .iter()
                .filter(|c| ids.iter().any(|id| id == &c.id))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Split the palette into (recommended, other) for a room
    pub fn partition_colors(&self, room_id: &str) -> (Vec<&Color>, Vec<&Color>) {
        let ids = self.recommendations.get(room_id);
        self.colors
            .iter()
            .partition(|c| ids.is_some_and(|ids| ids.iter().any(|id| id == &c.id)))
    }
}
