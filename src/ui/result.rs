/// Result screen: preview of the watermarked image and what to do with it
use iced::widget::{button, column, container, horizontal_space, image, row, text};
use iced::{Alignment, ContentFit, Element, Length, Theme};

use crate::state::data::format_size;
use crate::state::output::SubmissionResult;
use crate::Message;

pub fn view(result: &SubmissionResult) -> Element<'_, Message> {
    let heading = column![
        text("✓").size(48),
        text("Watermark Applied Successfully!").size(34),
        text("Your image has been processed and is ready to download. Preview it below and save it to your device.")
            .size(16)
            .style(|theme: &Theme| text::Style {
                color: Some(super::muted(theme)),
            }),
    ]
    .spacing(8)
    .align_x(Alignment::Center);

    let preview = container(
        image(result.preview.handle().clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Contain),
    )
    .padding(16)
    .width(Length::Fill)
    .height(Length::Fixed(420.0))
    .style(super::card);

    let info = row![
        column![
            text(&result.suggested_filename).size(14),
            text(details(result)).size(12).style(|theme: &Theme| text::Style {
                color: Some(super::muted(theme)),
            }),
        ]
        .spacing(2),
        horizontal_space(),
        container(text("Processed").size(12))
            .padding([4, 12])
            .style(super::badge),
    ]
    .align_y(Alignment::Center);

    let downloading = result.download.is_active();
    let download = button(text(if downloading { "Downloading..." } else { "⬇ Download" }).size(16))
        .padding([12, 28])
        .style(button::primary)
        .on_press_maybe((!downloading).then_some(Message::Download));

    let actions = row![
        download,
        button(text("🔗 Share").size(16))
            .padding([12, 28])
            .style(button::secondary)
            .on_press(Message::Share),
        button(text("🔄 Start Over").size(16))
            .padding([12, 28])
            .style(button::secondary)
            .on_press(Message::StartOver),
    ]
    .spacing(16);

    column![heading, preview, info, actions]
        .spacing(24)
        .padding(40)
        .max_width(960)
        .align_x(Alignment::Center)
        .into()
}

/// "1920×1080 · PNG · 240.5 KB · 14:02"
fn details(result: &SubmissionResult) -> String {
    let mut parts = Vec::new();
    if let Some((width, height)) = result.dimensions {
        parts.push(format!("{}×{}", width, height));
    }
    parts.push(result.format_label());
    parts.push(format_size(result.bytes.len()));
    parts.push(result.processed_at.format("%H:%M").to_string());
    parts.join(" · ")
}
