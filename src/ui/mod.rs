/// User interface module
///
/// Views are plain functions from state to `Element`s; all state changes go
/// through `Message`s handled in `main.rs`.
/// - `header.rs` - navigation shell
/// - `upload.rs` - the two drop zones and the submit action
/// - `result.rs` - preview, download, share and start over

pub mod header;
pub mod result;
pub mod upload;

use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Rounded card used for the drop zones and the result preview
pub fn card(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();

    container::Style {
        background: Some(Background::Color(palette.background.base.color)),
        border: Border {
            color: palette.background.strong.color,
            width: 1.0,
            radius: 16.0.into(),
        },
        ..container::Style::default()
    }
}

/// Drop zone border and fill, following drag and selection state
pub fn drop_zone(theme: &Theme, dragging: bool, selected: bool) -> container::Style {
    let palette = theme.extended_palette();

    let (border, fill) = if dragging {
        (palette.primary.strong.color, palette.primary.weak.color)
    } else if selected {
        (palette.success.base.color, palette.background.weak.color)
    } else {
        (palette.background.strong.color, palette.background.base.color)
    };

    container::Style {
        background: Some(Background::Color(fill)),
        border: Border {
            color: border,
            width: 2.0,
            radius: 12.0.into(),
        },
        ..container::Style::default()
    }
}

/// Small pill, e.g. the "Processed" badge
pub fn badge(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();

    container::Style {
        background: Some(Background::Color(palette.success.weak.color)),
        text_color: Some(palette.success.weak.text),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: 999.0.into(),
        },
        ..container::Style::default()
    }
}

/// Top bar behind the navigation shell
pub fn bar(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();

    container::Style {
        background: Some(Background::Color(palette.background.weak.color)),
        ..container::Style::default()
    }
}

/// Muted text color for secondary lines
pub fn muted(theme: &Theme) -> Color {
    theme.extended_palette().background.strong.text
}
