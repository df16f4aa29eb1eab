//! Blocking user notifications
//!
//! Validation and submission errors are shown in a native message box, the
//! desktop counterpart of a browser alert. Like the file dialogs, the box
//! blocks the update loop until it is dismissed.

use rfd::{MessageButtons, MessageDialog, MessageLevel};

/// Show a warning box
pub fn alert(description: impl Into<String>) {
    show(MessageLevel::Warning, description.into());
}

/// Show an informational box
pub fn inform(description: impl Into<String>) {
    show(MessageLevel::Info, description.into());
}

fn show(level: MessageLevel, description: String) {
    tracing::debug!("Notifying user: {}", description);
    MessageDialog::new()
        .set_level(level)
        .set_title("WatermarkPro")
        .set_description(description)
        .set_buttons(MessageButtons::Ok)
        .show();
}
