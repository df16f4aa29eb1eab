/// Upload screen: one drop zone per role and the submit action
use iced::widget::{button, column, container, horizontal_space, image, mouse_area, row, text};
use iced::{Alignment, ContentFit, Element, Length, Theme};

use crate::state::data::format_size;
use crate::state::{Role, Session};
use crate::Message;

/// Height of a drop zone, selected or not
const ZONE_HEIGHT: f32 = 320.0;

pub fn view(session: &Session) -> Element<'_, Message> {
    let heading = column![
        text("Create Stunning Watermarked Images").size(36),
        text("Transform your images with professional watermarks in seconds. ✨")
            .size(16)
            .style(|theme: &Theme| text::Style {
                color: Some(super::muted(theme)),
            }),
    ]
    .spacing(8)
    .align_x(Alignment::Center);

    let zones = row(Role::ALL.into_iter().map(|role| zone(session, role)))
        .spacing(32)
        .width(Length::Fill);

    let label = if session.is_processing() {
        "⏳ Processing Magic..."
    } else {
        "✨ Add Watermark"
    };
    let submit = button(text(label).size(18))
        .padding([14, 40])
        .style(button::primary)
        .on_press_maybe(session.can_submit().then_some(Message::Submit));

    let mut footer = column![submit].spacing(10).align_x(Alignment::Center);
    if session.can_submit() {
        footer = footer.push(text("Ready to create your watermarked image!").size(14));
    }

    column![heading, zones, footer]
        .spacing(36)
        .padding(40)
        .align_x(Alignment::Center)
        .into()
}

/// One drop zone: title, then either a prompt or the selected file
fn zone(session: &Session, role: Role) -> Element<'_, Message> {
    let locked = session.is_processing();
    let dragging = session.is_dragging(role);
    let selected = session.file(role);

    let body: Element<'_, Message> = match selected {
        Some(file) => {
            let info = column![
                text(&file.name).size(14),
                text(format_size(file.size())).size(12),
            ]
            .spacing(2);

            let remove = button(text("Remove").size(14))
                .style(button::danger)
                .on_press_maybe((!locked).then_some(Message::Remove(role)));

            column![
                image(file.preview.handle().clone())
                    .width(Length::Fill)
                    .height(Length::Fixed(ZONE_HEIGHT - 90.0))
                    .content_fit(ContentFit::Contain),
                row![info, horizontal_space(), remove].align_y(Alignment::Center),
            ]
            .spacing(12)
            .into()
        }
        None => {
            let prompt = if dragging { "Drop it!" } else { role.hint() };
            column![
                text("⬆").size(40),
                text(prompt).size(16),
                text("PNG, JPG, GIF or WEBP").size(12),
            ]
            .spacing(8)
            .align_x(Alignment::Center)
            .into()
        }
    };

    let framed = container(body)
        .padding(20)
        .center_x(Length::Fill)
        .center_y(Length::Fixed(ZONE_HEIGHT))
        .style(move |theme: &Theme| super::drop_zone(theme, dragging, selected.is_some()));

    let mut area = mouse_area(framed)
        .on_enter(Message::ZoneEntered(role))
        .on_exit(Message::ZoneExited(role));
    if !locked {
        area = area.on_press(Message::PickFile(role));
    }

    column![text(role.label()).size(22), area]
        .spacing(12)
        .width(Length::FillPortion(1))
        .into()
}
