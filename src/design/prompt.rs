//! Selection → image prompt compiler
//!
//! Paragraph order matters: the camera directive goes first because it is
//! the instruction image models most often ignore.

use crate::catalog::{Color, Room};

use super::{Perspective, PlacedItem};

const STYLE_DIRECTIVE: &str = "**Image Style:** Create a high-resolution, 8k, photorealistic photograph of a professionally designed interior.";

const ATMOSPHERE_DIRECTIVE: &str = "**Atmosphere:** The overall style is modern, clean, and inviting. The lighting should be beautiful and highlight the room's features, especially the wall color.";

/// Build the generation prompt for a complete selection
///
/// Each section is its own paragraph. Furniture and decor paragraphs are
/// left out entirely when nothing of that kind is placed.
pub fn compile_prompt(
    room: &Room,
    color: &Color,
    furniture: &[PlacedItem],
    decor: &[PlacedItem],
    perspective: Perspective,
) -> String {
    let mut sections = vec![
        format!(
            "**Critical Camera Instruction:** You MUST generate the image from this exact perspective: {}",
            perspective.camera_instruction()
        ),
        STYLE_DIRECTIVE.to_string(),
        format!("**Primary Subject:** A {}.", room.description),
        format!(
            "**Key Feature & Color Scheme:** The dominant feature is the wall color, which must be a clear and distinct {}. All walls must be painted this color.",
            color.name.to_lowercase()
        ),
    ];

    if let Some(list) = describe(furniture) {
        sections.push(format!(
            "**Furniture:** The room contains the following furniture: {}.",
            list
        ));
    }

    if let Some(list) = describe(decor) {
        sections.push(format!("**Decor Accents:** The room is decorated with: {}.", list));
    }

    sections.push(ATMOSPHERE_DIRECTIVE.to_string());
    sections.join("\n\n")
}

fn describe(items: &[PlacedItem]) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    Some(
        items
            .iter()
            .map(|p| p.item.description.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    )
}
