use iced::widget::{column, container, scrollable, text};
use iced::{event, window, Element, Event, Length, Subscription, Task, Theme};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info, warn};

mod config;
mod export;
mod files;
mod logging;
mod notify;
mod service;
mod state;
mod ui;

use config::{AppConfig, ThemeChoice};
use export::{download, ExportError, SharePayload, ShareTarget};
use files::FileError;
use service::{ProcessedImage, ServiceError, WatermarkClient};
use state::preview::PreviewTracker;
use state::session::{IntakeError, SubmitError};
use state::{FileCandidate, Phase, Role, Session};

/// Main application state
struct Watermarker {
    config: AppConfig,
    /// Client for the configured endpoint, or why it could not be built
    client: Result<WatermarkClient, ServiceError>,
    /// Host share capability, if one is configured
    share: Option<ShareTarget>,
    session: Session,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked a drop zone
    PickFile(Role),
    /// A picked or dropped file was read from disk
    FileLoaded(Role, Result<FileCandidate, FileError>),
    /// User clicked "Remove" under a selected file
    Remove(Role),
    /// Pointer moved over / out of a drop zone
    ZoneEntered(Role),
    ZoneExited(Role),
    /// Files dragged over, dropped on, or dragged out of the window
    FileHovered,
    FileDropped(PathBuf),
    FilesHoveredLeft,
    /// User clicked "Add Watermark"
    Submit,
    /// The service answered (or the request failed)
    Processed(Result<ProcessedImage, ServiceError>),
    Download,
    /// Background write finished for the download with this generation
    Downloaded(u64, Result<PathBuf, ExportError>),
    DownloadFeedbackElapsed(u64),
    Share,
    Shared(Result<PathBuf, ExportError>),
    /// Back to an empty upload screen
    StartOver,
}

impl Watermarker {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        // A broken config file should not keep the app from starting
        let config = config::load_config().unwrap_or_else(|e| {
            warn!("⚠️  {:#}. Using default settings.", e);
            AppConfig::default()
        });

        let client = WatermarkClient::new(&config.endpoint);
        let status = match &client {
            Ok(client) => {
                info!("🎨 Watermarker ready, endpoint {}", client.url());
                "Ready. Pick a main image and a logo.".to_string()
            }
            Err(e) => {
                error!("Endpoint unusable: {}", e);
                format!("⚠️  {}", e)
            }
        };

        let share = ShareTarget::from_config(config.share.command.as_deref());
        if let Some(target) = &share {
            info!("Sharing through {}", target.program());
        }

        (
            Watermarker {
                config,
                client,
                share,
                session: Session::new(PreviewTracker::new()),
                status,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickFile(role) => {
                if self.session.is_processing() {
                    return Task::none();
                }
                // Show the native file picker dialog
                match files::pick_image(role) {
                    Some(path) => load(role, path),
                    None => Task::none(),
                }
            }
            Message::FileLoaded(role, Ok(candidate)) => {
                let name = candidate.name.clone();
                match self.session.select(role, candidate) {
                    Ok(()) => self.status = format!("{}: {}", role, name),
                    Err(IntakeError::ResultShown) => {
                        debug!("Ignoring {} for {}, result already shown", name, role)
                    }
                    Err(e) => self.fail(e.to_string()),
                }
                Task::none()
            }
            Message::FileLoaded(role, Err(e)) => {
                warn!("Could not load file for {}: {}", role, e);
                self.fail(e.to_string());
                Task::none()
            }
            Message::Remove(role) => {
                match self.session.remove(role) {
                    Ok(true) => self.status = format!("{} removed", role),
                    Ok(false) => {}
                    Err(e) => self.fail(e.to_string()),
                }
                Task::none()
            }
            Message::ZoneEntered(role) => {
                self.session.hover_zone(role);
                Task::none()
            }
            Message::ZoneExited(role) => {
                self.session.leave_zone(role);
                Task::none()
            }
            Message::FileHovered => {
                if self.accepts_drops() {
                    self.session.file_hovered();
                }
                Task::none()
            }
            Message::FileDropped(path) => {
                if !self.accepts_drops() {
                    return Task::none();
                }
                match self.session.accept_drop(path) {
                    Some((role, path)) => load(role, path),
                    None => Task::none(),
                }
            }
            Message::FilesHoveredLeft => {
                self.session.drag_cancel();
                Task::none()
            }
            Message::Submit => self.submit(),
            Message::Processed(outcome) => {
                match self.session.finish_submission(outcome) {
                    Ok(()) => {
                        if let Some(result) = self.session.result() {
                            self.status = format!("✅ {} is ready", result.suggested_filename);
                        }
                    }
                    Err(SubmitError::NotInFlight) => {}
                    Err(e) => {
                        error!("Error processing images: {:?}", e);
                        self.fail(e.to_string());
                    }
                }
                Task::none()
            }
            Message::Download => self.download(),
            Message::Downloaded(generation, outcome) => {
                let feedback = Duration::from_millis(self.config.result.download_feedback_ms);
                match outcome {
                    Ok(path) => {
                        self.status = format!("💾 Saved to {}", path.display());
                        Task::perform(tokio::time::sleep(feedback), move |()| {
                            Message::DownloadFeedbackElapsed(generation)
                        })
                    }
                    Err(e) => {
                        error!("Download failed: {}", e);
                        self.finish_download(generation);
                        self.fail("Failed to download image".to_string());
                        Task::none()
                    }
                }
            }
            Message::DownloadFeedbackElapsed(generation) => {
                self.finish_download(generation);
                Task::none()
            }
            Message::Share => self.share(),
            Message::Shared(Ok(path)) => {
                self.status = format!("🔗 Shared {}", path.display());
                Task::none()
            }
            Message::Shared(Err(e)) => {
                // Sharing is best effort: log and carry on
                warn!("Share failed: {}", e);
                Task::none()
            }
            Message::StartOver => {
                self.session.restart();
                self.status = "Ready. Pick a main image and a logo.".to_string();
                Task::none()
            }
        }
    }

    fn submit(&mut self) -> Task<Message> {
        let request = match self.session.begin_submission() {
            Ok(request) => request,
            Err(e) => {
                self.fail(e.to_string());
                return Task::none();
            }
        };

        match &self.client {
            Ok(client) => {
                self.status = "⏳ Processing...".to_string();
                Task::perform(client.clone().add_watermark(request), Message::Processed)
            }
            Err(e) => {
                // Same path as a failed request: files stay, user can fix the config and retry
                let outcome = Err(e.clone());
                Task::done(Message::Processed(outcome))
            }
        }
    }

    fn download(&mut self) -> Task<Message> {
        let Some(result) = self.session.result_mut() else {
            return Task::none();
        };
        let Some(generation) = result.download.begin() else {
            return Task::none();
        };

        // Show the native save dialog
        let Some(path) = download::pick_destination(&result.suggested_filename) else {
            result.download.finish(generation);
            return Task::none();
        };

        let bytes = result.bytes.clone();
        Task::perform(
            async move { download::write_image(&path, &bytes).await.map(|()| path) },
            move |outcome| Message::Downloaded(generation, outcome),
        )
    }

    fn finish_download(&mut self, generation: u64) {
        if let Some(result) = self.session.result_mut() {
            result.download.finish(generation);
        }
    }

    fn share(&mut self) -> Task<Message> {
        let Some(result) = self.session.result() else {
            return Task::none();
        };
        let Some(target) = self.share.clone() else {
            notify::inform("Sharing is not supported on this system");
            return Task::none();
        };

        let payload = SharePayload {
            file_name: result.suggested_filename.clone(),
            bytes: result.bytes.clone(),
            title: self.config.result.share_title.clone(),
            text: self.config.result.share_text.clone(),
        };
        Task::perform(target.share(payload), Message::Shared)
    }

    /// Report a recoverable error: status line plus a blocking notification
    fn fail(&mut self, message: String) {
        self.status = format!("⚠️  {}", message);
        notify::alert(message);
    }

    /// Window drops only matter on the upload screen
    fn accepts_drops(&self) -> bool {
        matches!(
            self.session.phase(),
            Phase::Idle | Phase::FilesPartial | Phase::FilesReady
        )
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let endpoint = match &self.client {
            Ok(client) => client.url().as_str(),
            Err(_) => self.config.endpoint.url.as_str(),
        };

        let screen = match self.session.result() {
            Some(result) => ui::result::view(result),
            None => ui::upload::view(&self.session),
        };

        let content = column![
            ui::header::view(endpoint, self.session.is_processing()),
            scrollable(container(screen).center_x(Length::Fill)).height(Length::Fill),
            container(text(&self.status).size(14)).padding([8, 24]),
        ];

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Window-level drag and drop
    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileHovered(_)) => Some(Message::FileHovered),
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            Event::Window(window::Event::FilesHoveredLeft) => Some(Message::FilesHoveredLeft),
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        match self.config.ui.theme {
            ThemeChoice::Light => Theme::Light,
            ThemeChoice::Dark => Theme::Dark,
        }
    }
}

/// Read a file in the background and hand it to the session
fn load(role: Role, path: PathBuf) -> Task<Message> {
    Task::perform(files::load_candidate(path), move |outcome| {
        Message::FileLoaded(role, outcome)
    })
}

fn main() -> iced::Result {
    logging::init();

    iced::application("WatermarkPro", Watermarker::update, Watermarker::view)
        .subscription(Watermarker::subscription)
        .theme(Watermarker::theme)
        .window_size((1100.0, 820.0))
        .centered()
        .run_with(Watermarker::new)
}
