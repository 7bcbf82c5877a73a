/// Inline photos viewer: the carousel on the Photos page.
///
/// One controller bound to the active group's photo subset. The counter
/// and the rendered slide always follow the controller's confirmed
/// index, never the transport's raw position. Switching groups remounts the
/// transport and resets the controller wholesale.
use iced::widget::{button, column, container, mouse_area, row, text};
use iced::{Alignment, Border, Color, ContentFit, Element, Length, Theme};
use iced_aw::Wrap;

use crate::carousel::{CarouselController, SlideTrack};
use crate::preload::PreloadCache;
use crate::state::groups::PhotoGroup;
use crate::state::manifest::Photo;

/// Height of the inline slide frame (roughly 16:10 against the content
/// column width).
const FRAME_HEIGHT: f32 = 420.0;

#[derive(Debug, Clone)]
pub enum Message {
    Prev,
    Next,
    SelectGroup(String),
    OpenLightbox,
}

/// What the page shell must do after an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    /// Hand the active subset and the observed index to the lightbox.
    OpenLightbox { photos: Vec<Photo>, index: usize },
}

#[derive(Debug)]
pub struct PhotosViewer {
    groups: Vec<PhotoGroup>,
    active_group: usize,
    controller: CarouselController<SlideTrack>,
}

impl PhotosViewer {
    pub fn new(groups: Vec<PhotoGroup>) -> Self {
        let total = groups.first().map_or(0, |group| group.photos.len());
        let mut controller = CarouselController::new(total);
        controller.attach_transport(SlideTrack::new(total, 0));
        PhotosViewer {
            groups,
            active_group: 0,
            controller,
        }
    }

    /// The active group's photos: the subset this viewer's controller
    /// is bound to.
    pub fn photos(&self) -> &[Photo] {
        self.groups
            .get(self.active_group)
            .map_or(&[], |group| group.photos.as_slice())
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
            Message::SelectGroup(key) => {
                self.select_group(&key);
                Event::None
            }
            Message::OpenLightbox => {
                if self.photos().is_empty() {
                    return Event::None;
                }
                Event::OpenLightbox {
                    photos: self.photos().to_vec(),
                    index: self.controller.current_index(),
                }
            }
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

    /// Switch to another group: a different photo subset means a fresh
    /// controller and a remounted transport, lock state included.
    fn select_group(&mut self, key: &str) {
        let Some(position) = self.groups.iter().position(|group| group.key == key) else {
            return;
        };
        if position == self.active_group {
            return;
        }
        self.active_group = position;
        let total = self.groups[position].photos.len();
        self.controller = CarouselController::new(total);
        self.controller.attach_transport(SlideTrack::new(total, 0));
        self.controller.reset_lock();
    }

    pub fn view<'a>(&'a self, cache: &PreloadCache) -> Element<'a, Message> {
        if self.groups.is_empty() {
            return container(text("No photos available.").size(14))
                .center_x(Length::Fill)
                .center_y(FRAME_HEIGHT)
                .style(framed)
                .into();
        }

        let photos = self.photos();
        let index = self.controller.current_index();

        let counter = text(format!("{} of {}", index + 1, photos.len())).size(14);
        let controls = row![
            counter,
            iced::widget::horizontal_space(),
            button(text("‹").size(20))
                .style(button::text)
                .on_press(Message::Prev),
            button(text("›").size(20))
                .style(button::text)
                .on_press(Message::Next),
        ]
        .spacing(12)
        .align_y(Alignment::Center);

        let mut page = column![].spacing(12);
        if self.groups.len() > 1 {
            page = page.push(self.group_selector());
        }
        page = page.push(controls);
        page = page.push(self.slide(cache, photos, index));
        if let Some(description) = self
            .groups
            .get(self.active_group)
            .and_then(|group| group.description.as_deref())
        {
            page = page.push(text(description).size(13));
        }

        container(page).width(Length::Fill).padding([24, 0]).into()
    }

    fn group_selector(&self) -> Element<'_, Message> {
        let buttons: Vec<Element<'_, Message>> = self
            .groups
            .iter()
            .enumerate()
            .map(|(position, group)| {
                let style: fn(&Theme, button::Status) -> button::Style =
                    if position == self.active_group {
                        button::secondary
                    } else {
                        button::text
                    };
                button(text(group.label().to_string()).size(14))
                    .style(style)
                    .on_press(Message::SelectGroup(group.key.clone()))
                    .into()
            })
            .collect();

        Wrap::with_elements(buttons).spacing(8.0).into()
    }

    fn slide<'a>(
        &'a self,
        cache: &PreloadCache,
        photos: &'a [Photo],
        index: usize,
    ) -> Element<'a, Message> {
        let frame: Element<'a, Message> = match photos
            .get(index)
            .and_then(|photo| cache.display_handle(&photo.src))
        {
            Some(handle) => iced::widget::image(handle)
                .width(Length::Fill)
                .height(Length::Fill)
                .content_fit(ContentFit::Cover)
                .into(),
            None => container(text("Loading…").size(13))
                .center(Length::Fill)
                .into(),
        };

        mouse_area(
            container(frame)
                .width(Length::Fill)
                .height(FRAME_HEIGHT)
                .style(framed),
        )
        .on_press(Message::OpenLightbox)
        .into()
    }
}

fn framed(_theme: &Theme) -> container::Style {
    container::Style {
        border: Border {
            color: Color::from_rgb(0.8, 0.8, 0.8),
            width: 1.0,
            radius: 0.0.into(),
        },
        ..container::Style::default()
    }
}
