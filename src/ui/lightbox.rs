/// Full-screen lightbox viewer.
///
/// An overlay stacked above the page with its own controller over a
/// photo subset and start index copied in by the page shell. Backdrop
/// clicks close; clicks on the photo itself do not. Keyboard handling
/// (Escape / arrows) lives in the shell's subscription and is routed
/// here as messages.
use iced::widget::{button, column, container, mouse_area, row, text};
use iced::{Alignment, Color, ContentFit, Element, Length, Theme};

use crate::carousel::{CarouselController, SlideTrack};
use crate::preload::PreloadCache;
use crate::state::manifest::Photo;

#[derive(Debug, Clone)]
pub enum Message {
    Prev,
    Next,
    Close,
    /// Clicks on the photo stage are swallowed so they don't fall
    /// through to the backdrop close.
    ContentClicked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    None,
    CloseRequested,
}

#[derive(Debug)]
pub struct Lightbox {
    photos: Vec<Photo>,
    controller: CarouselController<SlideTrack>,
}

impl Lightbox {
    /// Open on a subset at a chosen start index. The controller gets a
    /// fresh transport and clean lock state every time.
    pub fn open(photos: Vec<Photo>, index: usize) -> Self {
        let total = photos.len();
        let mut controller = CarouselController::new(total);
        controller.set_index(index as isize);
        controller.attach_transport(SlideTrack::new(total, controller.current_index()));
        controller.reset_lock();
        Lightbox { photos, controller }
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn current_index(&self) -> usize {
        self.controller.current_index()
    }

    pub fn in_transition(&self) -> bool {
        self.controller.in_transition()
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::Prev => {
                self.controller.slide_prev();
                self.controller.pump();
                Event::None
            }
            Message::Next => {
                self.controller.slide_next();
                self.controller.pump();
                Event::None
            }
            Message::Close => Event::CloseRequested,
            Message::ContentClicked => Event::None,
        }
    }

    /// Feed wheel travel into the transport (positive = next).
    pub fn wheel(&mut self, delta: f32) {
        if let Some(track) = self.controller.transport_mut() {
            track.wheel(delta);
        }
        self.controller.pump();
    }

    pub fn tick(&mut self, now: std::time::Instant) {
        self.controller.tick(now);
    }

    pub fn view<'a>(&'a self, cache: &PreloadCache) -> Element<'a, Message> {
        let index = self.controller.current_index();
        let total = self.photos.len();

        let top_bar = row![
            text(format!("{} of {}", index + 1, total)).size(16),
            iced::widget::horizontal_space(),
            button(text("‹").size(23))
                .style(button::text)
                .on_press(Message::Prev),
            button(text("›").size(23))
                .style(button::text)
                .on_press(Message::Next),
            button(text("✕").size(20))
                .style(button::text)
                .on_press(Message::Close),
        ]
        .spacing(16)
        .padding([12, 24])
        .align_y(Alignment::Center);

        let stage: Element<'a, Message> = match self
            .photos
            .get(index)
            .and_then(|photo| cache.display_handle(&photo.src))
        {
            Some(handle) => iced::widget::image(handle)
                .width(Length::Fill)
                .height(Length::Fill)
                .content_fit(ContentFit::Contain)
                .into(),
            None => container(text("Loading…").size(14))
                .center(Length::Fill)
                .into(),
        };

        let content = column![
            top_bar,
            mouse_area(
                container(stage)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .padding([0, 16]),
            )
            .on_press(Message::ContentClicked),
        ];

        mouse_area(
            container(content)
                .width(Length::Fill)
                .height(Length::Fill)
                .style(backdrop),
        )
        .on_press(Message::Close)
        .into()
    }
}

fn backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        text_color: Some(Color::BLACK),
        background: Some(Color { a: 0.98, ..Color::WHITE }.into()),
        ..container::Style::default()
    }
}
