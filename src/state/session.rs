/// Session state machine for the upload workflow
///
/// All state of one window lives here: the two selected files, the
/// drag-and-drop affordances, the in-flight submission and the result.
/// The UI only calls the transition methods below and renders what they
/// leave behind, so every rule of the workflow can be tested without a
/// window.
///
/// ```text
/// Idle → FilesPartial → FilesReady → Submitting → Result
///                            ↑            │
///                            └── failure ─┘
/// Result → Idle (restart)
/// ```

use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::data::{FileCandidate, Role, SelectedFile, SubmissionRequest};
use super::output::SubmissionResult;
use super::preview::PreviewTracker;
use crate::service::{ProcessedImage, ServiceError};

/// Where the session is in the workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    FilesPartial,
    FilesReady,
    Submitting,
    Result,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum IntakeError {
    #[error("Please upload an image file ({name} is {media_type})")]
    NotAnImage { name: String, media_type: String },

    #[error("Please wait until the current image has been processed")]
    Busy,

    #[error("Start over to choose new images")]
    ResultShown,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SubmitError {
    #[error("Please upload both an image and a logo")]
    MissingFiles,

    #[error("An image is already being processed")]
    AlreadyProcessing,

    #[error("No submission is in progress")]
    NotInFlight,

    #[error("Something went wrong while processing the image.")]
    Failed(#[source] ServiceError),
}

/// Drag-over flags, one per role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct DragFlags {
    main: bool,
    logo: bool,
}

impl DragFlags {
    fn get(&self, role: Role) -> bool {
        match role {
            Role::Main => self.main,
            Role::Logo => self.logo,
        }
    }

    fn set(&mut self, role: Role, value: bool) {
        match role {
            Role::Main => self.main = value,
            Role::Logo => self.logo = value,
        }
    }

    fn active(&self) -> Option<Role> {
        Role::ALL.into_iter().find(|role| self.get(*role))
    }
}

/// State of one window's interaction with the workflow
#[derive(Debug, Default)]
pub struct Session {
    previews: PreviewTracker,
    main: Option<SelectedFile>,
    logo: Option<SelectedFile>,
    dragging: DragFlags,
    /// Drop zone currently under the pointer
    hovered: Option<Role>,
    /// Main file name of the submission in flight
    in_flight: Option<String>,
    result: Option<SubmissionResult>,
}

impl Session {
    pub fn new(previews: PreviewTracker) -> Self {
        Self {
            previews,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> Phase {
        if self.result.is_some() {
            Phase::Result
        } else if self.in_flight.is_some() {
            Phase::Submitting
        } else {
            match (&self.main, &self.logo) {
                (Some(_), Some(_)) => Phase::FilesReady,
                (None, None) => Phase::Idle,
                _ => Phase::FilesPartial,
            }
        }
    }

    pub fn file(&self, role: Role) -> Option<&SelectedFile> {
        match role {
            Role::Main => self.main.as_ref(),
            Role::Logo => self.logo.as_ref(),
        }
    }

    fn slot_mut(&mut self, role: Role) -> &mut Option<SelectedFile> {
        match role {
            Role::Main => &mut self.main,
            Role::Logo => &mut self.logo,
        }
    }

    pub fn is_processing(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether the submit action should be offered
    pub fn can_submit(&self) -> bool {
        self.phase() == Phase::FilesReady
    }

    pub fn result(&self) -> Option<&SubmissionResult> {
        self.result.as_ref()
    }

    pub fn result_mut(&mut self) -> Option<&mut SubmissionResult> {
        self.result.as_mut()
    }

    /// Previews currently alive across the whole session
    pub fn live_previews(&self) -> usize {
        self.previews.live()
    }

    // ========== Intake ==========

    /// Put a file into a role, replacing (and releasing) whatever was there
    pub fn select(&mut self, role: Role, candidate: FileCandidate) -> Result<(), IntakeError> {
        if self.is_processing() {
            return Err(IntakeError::Busy);
        }
        if self.result.is_some() {
            return Err(IntakeError::ResultShown);
        }
        if !candidate.is_image() {
            warn!("Rejected {} for {}: {}", candidate.name, role, candidate.media_type);
            return Err(IntakeError::NotAnImage {
                name: candidate.name,
                media_type: candidate.media_type,
            });
        }

        let preview = self.previews.create(candidate.bytes.clone());
        let selected = SelectedFile {
            name: candidate.name,
            media_type: candidate.media_type,
            bytes: candidate.bytes,
            preview,
        };

        debug!("{} ← {} (preview {})", role, selected.name, selected.preview.id());
        // The previous file of this role (if any) is dropped here, releasing its preview
        *self.slot_mut(role) = Some(selected);
        Ok(())
    }

    /// Clear a role. Returns whether anything was removed.
    pub fn remove(&mut self, role: Role) -> Result<bool, IntakeError> {
        if self.is_processing() {
            return Err(IntakeError::Busy);
        }
        let removed = self.slot_mut(role).take();
        if let Some(file) = &removed {
            debug!("{} cleared ({})", role, file.name);
        }
        Ok(removed.is_some())
    }

    // ========== Drag and drop ==========

    pub fn is_dragging(&self, role: Role) -> bool {
        self.dragging.get(role)
    }

    pub fn drag_enter(&mut self, role: Role) {
        self.dragging.set(role, true);
    }

    pub fn drag_leave(&mut self, role: Role) {
        self.dragging.set(role, false);
    }

    /// The drag left the window entirely
    pub fn drag_cancel(&mut self) {
        self.dragging = DragFlags::default();
    }

    /// The pointer entered a drop zone. A drag in progress follows it.
    pub fn hover_zone(&mut self, role: Role) {
        self.hovered = Some(role);
        if let Some(prev) = self.dragging.active() {
            if prev != role {
                self.drag_leave(prev);
                self.drag_enter(role);
            }
        }
    }

    pub fn leave_zone(&mut self, role: Role) {
        if self.hovered == Some(role) {
            self.hovered = None;
        }
    }

    /// Role a file dragged over the window would land in: the zone under
    /// the pointer, else the first empty role, else the main image.
    pub fn drop_target(&self) -> Role {
        self.hovered
            .or_else(|| Role::ALL.into_iter().find(|role| self.file(*role).is_none()))
            .unwrap_or(Role::Main)
    }

    /// A file was dragged over the window
    pub fn file_hovered(&mut self) {
        if self.dragging.active().is_none() {
            let target = self.drop_target();
            self.drag_enter(target);
        }
    }

    /// A file was dropped on the window.
    ///
    /// Drops are delivered one file at a time. The first one ends the drag
    /// and is returned with its role; the rest of the same gesture find no
    /// drag in progress and are ignored.
    pub fn accept_drop(&mut self, path: PathBuf) -> Option<(Role, PathBuf)> {
        let role = self.dragging.active()?;
        self.drag_leave(role);
        Some((role, path))
    }

    // ========== Submission ==========

    /// Start a submission. The returned request is what must be sent.
    pub fn begin_submission(&mut self) -> Result<SubmissionRequest, SubmitError> {
        if self.is_processing() {
            return Err(SubmitError::AlreadyProcessing);
        }
        let (Some(main), Some(logo)) = (&self.main, &self.logo) else {
            return Err(SubmitError::MissingFiles);
        };

        let request = SubmissionRequest {
            main: main.to_part(),
            logo: logo.to_part(),
        };
        self.in_flight = Some(main.name.clone());
        info!("⏳ Processing {} with {}", request.main.name, request.logo.name);
        Ok(request)
    }

    /// Apply the outcome of the submission in flight.
    ///
    /// On success the intake files are released and the session moves to
    /// the result. On failure the files stay so the user can retry.
    pub fn finish_submission(
        &mut self,
        outcome: Result<ProcessedImage, ServiceError>,
    ) -> Result<(), SubmitError> {
        let Some(original_name) = self.in_flight.take() else {
            warn!("Ignoring a submission outcome with nothing in flight");
            return Err(SubmitError::NotInFlight);
        };

        match outcome {
            Ok(image) => {
                let result = SubmissionResult::new(&self.previews, image, &original_name);
                info!("✅ Watermark applied: {}", result.suggested_filename);
                self.main = None;
                self.logo = None;
                self.dragging = DragFlags::default();
                self.result = Some(result);
                Ok(())
            }
            Err(e) => {
                let side = if e.is_server_side() { "service" } else { "client" };
                warn!("Submission failed ({} side): {}", side, e);
                Err(SubmitError::Failed(e))
            }
        }
    }

    /// Drop everything and go back to an empty intake
    pub fn restart(&mut self) {
        if self.is_processing() {
            warn!("Restarting while a submission is in flight; its outcome will be ignored");
        }
        self.main = None;
        self.logo = None;
        self.result = None;
        self.in_flight = None;
        self.dragging = DragFlags::default();
        self.hovered = None;
        debug!("Session restarted, {} previews live", self.previews.live());
    }
}
