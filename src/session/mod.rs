//! Design session state machine
//!
//! A session owns the user's selections, the current image and the status
//! of the one request that may be in flight:
//!
//! ```text
//! Idle ──generate──▶ Generating ──ok──▶ Ready ──refine──▶ Refining ──▶ Ready
//!                         │                                   │
//!                         └──err──▶ Error ◀── (retry generate)│
//!                                            refine errors return to Ready
//! ```
//!
//! Methods take `&self`; the state lock is never held across an await, so
//! a session can be shared between tasks. While a request is in flight,
//! anything that would change the prompt is rejected with `Busy`.
//! Dropping a `generate` or `refine` future (e.g. under `tokio::time::timeout`)
//! releases the busy status as if the call had failed.

mod ids;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, CatalogItem, Color, Room};
use crate::design::{
    export_design, Category, ExportError, InstanceId, Perspective, PlacedItem, SavedDesign,
    SelectionState,
};
use crate::images::{ClientError, GeneratedImage, ImageGenerator, ImageRefiner};

pub use ids::{CounterIds, InstanceIdSource, UuidIds};

/// Session errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("please select a room and a wall color first")]
    IncompleteSelection,

    #[error("no image to refine")]
    NoImage,

    #[error("a generation or refinement is already in progress")]
    Busy,

    #[error("refinement instruction is empty")]
    EmptyInstruction,

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Request lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// Nothing generated for the current selection
    #[default]
    Idle,
    Generating,
    /// An image is available
    Ready,
    Refining,
    /// The last generation failed
    Error,
}

impl SessionStatus {
    /// A generate or refine call is outstanding
    pub fn is_busy(&self) -> bool {
        matches!(self, SessionStatus::Generating | SessionStatus::Refining)
    }
}

/// Language the user writes refinement instructions in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ru,
    Uz,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Ru, Language::Uz];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
            Language::Uz => "uz",
        }
    }

    /// Name handed to the image model alongside an instruction
    pub fn label(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Ru => "Russian",
            Language::Uz => "Uzbek",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown language: {}", s))
    }
}

/// Mutable session data, guarded by the session lock
#[derive(Debug, Default)]
struct SessionState {
    selection: SelectionState,
    status: SessionStatus,
    error: Option<String>,
    image: Option<Arc<GeneratedImage>>,
    recommended: Vec<Color>,
    language: Language,
}

impl SessionState {
    fn ensure_idle(&self) -> Result<(), SessionError> {
        if self.status.is_busy() {
            return Err(SessionError::Busy);
        }
        Ok(())
    }

    /// Drop the image after a prompt-affecting change
    ///
    /// A failed generation stays in `Error`. A refine failure message refers
    /// to the image being dropped, so it goes with it.
    fn invalidate_image(&mut self) {
        self.image = None;
        if self.status != SessionStatus::Error {
            self.status = SessionStatus::Idle;
            self.error = None;
        }
    }

    fn clear_error(&mut self) {
        self.error = None;
        if self.status == SessionStatus::Error {
            self.status = SessionStatus::Idle;
        }
    }
}

/// Which request an `InFlight` guard covers
#[derive(Debug, Clone, Copy)]
enum Request {
    Generate,
    Refine,
}

/// Releases the busy status if a request future is dropped before it
/// resolves
struct InFlight<'a> {
    state: &'a Mutex<SessionState>,
    request: Request,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn new(state: &'a Mutex<SessionState>, request: Request) -> Self {
        Self {
            state,
            request,
            armed: true,
        }
    }

    /// Disarm and lock the state to record the outcome
    fn complete(mut self) -> MutexGuard<'a, SessionState> {
        self.armed = false;
        let state = self.state;
        state.lock()
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let mut state = self.state.lock();
        match self.request {
            Request::Generate => {
                warn!("Image generation cancelled before completion");
                state.image = None;
                state.status = SessionStatus::Error;
                state.error = Some(
                    "Failed to generate design: request cancelled or timed out. Please try again."
                        .to_string(),
                );
            }
            Request::Refine => {
                warn!("Image refinement cancelled before completion");
                state.status = SessionStatus::Ready;
                state.error =
                    Some("Failed to refine design: request cancelled or timed out.".to_string());
            }
        }
    }
}

/// One user's design session
pub struct DesignSession {
    catalog: Arc<Catalog>,
    generator: Arc<dyn ImageGenerator>,
    refiner: Arc<dyn ImageRefiner>,
    ids: Box<dyn InstanceIdSource>,
    state: Mutex<SessionState>,
}

impl DesignSession {
    /// Create a session backed by one client for both generation and refinement
    pub fn new<B>(catalog: Arc<Catalog>, backend: Arc<B>) -> Self
    where
        B: ImageGenerator + ImageRefiner + 'static,
    {
        Self::from_parts(catalog, backend.clone(), backend)
    }

    /// Create a session from separate generation and refinement backends
    pub fn from_parts(
        catalog: Arc<Catalog>,
        generator: Arc<dyn ImageGenerator>,
        refiner: Arc<dyn ImageRefiner>,
    ) -> Self {
        Self {
            catalog,
            generator,
            refiner,
            ids: Box::new(CounterIds::new()),
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Replace the instance id source
    pub fn with_id_source(mut self, ids: impl InstanceIdSource + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_language(self, language: Language) -> Self {
        self.state.lock().language = language;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn status(&self) -> SessionStatus {
        self.state.lock().status
    }

    /// Message describing the last failure, if any
    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    pub fn image(&self) -> Option<Arc<GeneratedImage>> {
        self.state.lock().image.clone()
    }

    /// Snapshot of the current selections
    pub fn selection(&self) -> SelectionState {
        self.state.lock().selection.clone()
    }

    /// Colors recommended for the selected room
    pub fn recommended_colors(&self) -> Vec<Color> {
        self.state.lock().recommended.clone()
    }

    pub fn language(&self) -> Language {
        self.state.lock().language
    }

    /// The prompt `generate` would send right now
    pub fn prompt_preview(&self) -> Option<String> {
        self.state.lock().selection.prompt()
    }

    /// Select a room; keeps color, placements and perspective
    pub fn select_room(&self, room: Room) -> Result<(), SessionError> {
        let mut state = self.state.lock();
        state.ensure_idle()?;

        state.recommended = self
            .catalog
            .recommended_colors(&room.id)
            .into_iter()
            .cloned()
            .collect();
        debug!("Selected room '{}'", room.id);
        state.selection.room = Some(room);
        state.clear_error();
        state.invalidate_image();
        Ok(())
    }

    pub fn select_color(&self, color: Color) -> Result<(), SessionError> {
        let mut state = self.state.lock();
        state.ensure_idle()?;

        debug!("Selected color '{}'", color.id);
        state.selection.color = Some(color);
        state.clear_error();
        state.invalidate_image();
        Ok(())
    }

    pub fn set_perspective(&self, perspective: Perspective) -> Result<(), SessionError> {
        let mut state = self.state.lock();
        state.ensure_idle()?;

        if state.selection.perspective != perspective {
            state.selection.perspective = perspective;
            state.invalidate_image();
        }
        Ok(())
    }

    /// Change the instruction language. Allowed while a request is in flight.
    pub fn set_language(&self, language: Language) {
        self.state.lock().language = language;
    }

    /// Place a copy of a catalog template, returning its new instance id
    pub fn add_item(
        &self,
        item: CatalogItem,
        category: Category,
    ) -> Result<InstanceId, SessionError> {
        let mut state = self.state.lock();
        state.ensure_idle()?;

        let instance_id = self.ids.next_id();
        debug!("Placed {} '{}' as {}", category, item.id, instance_id);
        state
            .selection
            .items_mut(category)
            .push(PlacedItem { instance_id, item });
        state.invalidate_image();
        Ok(instance_id)
    }

    /// Remove a placed item. Returns whether anything was removed.
    pub fn remove_item(
        &self,
        instance_id: InstanceId,
        category: Category,
    ) -> Result<bool, SessionError> {
        let mut state = self.state.lock();
        state.ensure_idle()?;

        let items = state.selection.items_mut(category);
        let before = items.len();
        items.retain(|p| p.instance_id != instance_id);
        let removed = items.len() != before;

        state.invalidate_image();
        Ok(removed)
    }

    /// Replace the whole selection with a saved design
    pub fn load_design(&self, design: &SavedDesign) -> Result<(), SessionError> {
        let resolved = design.rehydrate(&self.catalog)?;

        let mut state = self.state.lock();
        state.ensure_idle()?;

        let place = |items: Vec<CatalogItem>| -> Vec<PlacedItem> {
            items
                .into_iter()
                .map(|item| PlacedItem {
                    instance_id: self.ids.next_id(),
                    item,
                })
                .collect()
        };

        state.recommended = self
            .catalog
            .recommended_colors(&resolved.room.id)
            .into_iter()
            .cloned()
            .collect();
        state.selection = SelectionState {
            furniture: place(resolved.furniture),
            decor: place(resolved.decor),
            room: Some(resolved.room),
            color: Some(resolved.color),
            perspective: resolved.perspective,
        };
        state.clear_error();
        state.invalidate_image();

        info!("Loaded saved design for room '{}'", design.room_id);
        Ok(())
    }

    /// Portable projection of the current selection
    pub fn export(&self) -> Result<SavedDesign, SessionError> {
        Ok(export_design(&self.state.lock().selection)?)
    }

    /// Generate an image for the current selection
    ///
    /// Requires a room and a color; otherwise no request is made. On
    /// failure the session enters `Error` with a displayable message.
    pub async fn generate(&self) -> Result<Arc<GeneratedImage>, SessionError> {
        let prompt = {
            let mut state = self.state.lock();
            state.ensure_idle()?;
            let prompt = state
                .selection
                .prompt()
                .ok_or(SessionError::IncompleteSelection)?;

            state.status = SessionStatus::Generating;
            state.error = None;
            state.image = None;
            prompt
        };

        let in_flight = InFlight::new(&self.state, Request::Generate);

        info!("Generating design image ({} prompt chars)", prompt.len());
        debug!("Generated prompt: {}", prompt);

        let result = self.generator.generate(&prompt).await;

        let mut state = in_flight.complete();
        match result {
            Ok(image) => {
                let image = Arc::new(image);
                state.image = Some(image.clone());
                state.status = SessionStatus::Ready;
                Ok(image)
            }
            Err(e) => {
                warn!("Image generation failed: {}", e);
                state.error = Some(format!(
                    "Failed to generate design: {}. Please try again.",
                    e
                ));
                state.status = SessionStatus::Error;
                Err(e.into())
            }
        }
    }

    /// Edit the current image with a free-text instruction
    ///
    /// On failure the previous image is kept and the session returns to
    /// `Ready` with the error message set.
    pub async fn refine(&self, instruction: &str) -> Result<Arc<GeneratedImage>, SessionError> {
        let (source, language) = {
            let mut state = self.state.lock();
            state.ensure_idle()?;
            let source = state.image.clone().ok_or(SessionError::NoImage)?;
            if instruction.trim().is_empty() {
                return Err(SessionError::EmptyInstruction);
            }

            state.status = SessionStatus::Refining;
            state.error = None;
            (source, state.language)
        };

        let in_flight = InFlight::new(&self.state, Request::Refine);

        info!(
            "Refining design image ({} bytes) with {} instruction",
            source.len(),
            language.label()
        );

        let result = self
            .refiner
            .refine(&source, instruction.trim(), language.label())
            .await;

        let mut state = in_flight.complete();
        state.status = SessionStatus::Ready;
        match result {
            Ok(image) => {
                let image = Arc::new(image);
                state.image = Some(image.clone());
                Ok(image)
            }
            Err(e) => {
                warn!("Image refinement failed: {}", e);
                state.error = Some(format!("Failed to refine design: {}.", e));
                Err(e.into())
            }
        }
    }
}
