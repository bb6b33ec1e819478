//! Room design selections
//!
//! Provides:
//! - Selection state (room, wall color, placed furniture and decor, camera)
//! - Prompt compilation for the image model
//! - Export/import of portable saved designs

mod export;
mod prompt;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogItem, Color, Room};

pub use export::{
    export_design, file_name, write_design, ExportError, ItemRef, ResolvedDesign, SavedDesign,
    SAVED_DESIGN_VERSION,
};
pub use prompt::compile_prompt;

/// Camera viewpoint for the generated image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Perspective {
    /// Standing at the entrance, looking straight ahead
    #[default]
    Front,
    /// Wide angle from a high corner
    Corner,
    /// Looking in from outside a window
    Window,
    /// Close-up on a key piece of furniture
    Closeup,
}

impl Perspective {
    pub const ALL: [Perspective; 4] = [
        Perspective::Front,
        Perspective::Corner,
        Perspective::Window,
        Perspective::Closeup,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Perspective::Front => "front",
            Perspective::Corner => "corner",
            Perspective::Window => "window",
            Perspective::Closeup => "closeup",
        }
    }

    /// Camera sentence handed to the image model
    pub fn camera_instruction(&self) -> &'static str {
        match self {
            Perspective::Front => "The photo must be taken from the perspective of someone standing at the entrance of the room, looking straight ahead.",
            Perspective::Corner => "The photo must be a wide-angle shot from a high corner of the room, looking down into the space.",
            Perspective::Window => "The photo must be from the perspective of looking into the room from outside a large window.",
            Perspective::Closeup => "The photo must be a close-up shot focusing on a key piece of furniture, with the rest of the room softly blurred in the background.",
        }
    }
}

impl fmt::Display for Perspective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Perspective {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Perspective::ALL
            .into_iter()
            .find(|p| p.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown perspective: {}", s))
    }
}

/// Which placement list an item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Furniture,
    Decor,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Furniture => f.write_str("furniture"),
            Category::Decor => f.write_str("decor"),
        }
    }
}

/// Session-scoped identity of one placed item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub u128);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog template placed into the design
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedItem {
    pub instance_id: InstanceId,
    pub item: CatalogItem,
}

/// Everything the user has picked so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub room: Option<Room>,
    pub color: Option<Color>,
    pub furniture: Vec<PlacedItem>,
    pub decor: Vec<PlacedItem>,
    pub perspective: Perspective,
}

impl SelectionState {
    /// Placements for a category, in insertion order
    pub fn items(&self, category: Category) -> &[PlacedItem] {
        match category {
            Category::Furniture => &self.furniture,
            Category::Decor => &self.decor,
        }
    }

    pub(crate) fn items_mut(&mut self, category: Category) -> &mut Vec<PlacedItem> {
        match category {
            Category::Furniture => &mut self.furniture,
            Category::Decor => &mut self.decor,
        }
    }

    /// Room and color are both chosen
    pub fn is_complete(&self) -> bool {
        self.room.is_some() && self.color.is_some()
    }

    /// Compile the generation prompt, if room and color are chosen
    pub fn prompt(&self) -> Option<String> {
        let room = self.room.as_ref()?;
        let color = self.color.as_ref()?;
        Some(compile_prompt(
            room,
            color,
            &self.furniture,
            &self.decor,
            self.perspective,
        ))
    }
}
