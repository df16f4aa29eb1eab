/// Navigation shell: brand, endpoint and the way back home
use iced::widget::{button, container, horizontal_space, row, text};
use iced::{Alignment, Element, Length};

use crate::Message;

pub fn view<'a>(endpoint: &'a str, busy: bool) -> Element<'a, Message> {
    let brand = row![
        text("✦").size(28),
        text("WatermarkPro").size(24),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let home = button(text("Home").size(16))
        .style(button::text)
        .on_press_maybe((!busy).then_some(Message::StartOver));

    let content = row![
        brand,
        horizontal_space(),
        text(endpoint).size(12),
        home,
    ]
    .spacing(20)
    .align_y(Alignment::Center);

    container(content)
        .padding([12, 24])
        .width(Length::Fill)
        .style(super::bar)
        .into()
}
