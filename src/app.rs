/// Page shell: tab routing, manifest loading, and lightbox orchestration.
///
/// The shell owns the persisted view token, the preload cache, and the
/// scroll lock, and it is the only place state crosses between the two
/// viewer instances: opening the lightbox copies the inline viewer's
/// observed subset and index into a fresh lightbox controller.
use std::path::PathBuf;
use std::time::{Duration, Instant};

use iced::widget::scrollable::AbsoluteOffset;
use iced::widget::{button, column, container, horizontal_space, row, scrollable, stack, text};
use iced::{keyboard, mouse, Alignment, Element, Font, Length, Subscription, Task, Theme};

use crate::preload::{neighbor_srcs, PreloadCache};
use crate::state::groups::{derive_groups, GroupMeta};
use crate::state::manifest::{load_manifest, Photo, BASE_DIR, MANIFEST_PATH, PUBLIC_DIR};
use crate::state::session::{self, Tab};
use crate::ui::scroll_lock::ScrollLock;
use crate::ui::viewer::PhotosViewer;
use crate::ui::{about, lightbox, viewer};

/// Wheel travel fed to the carousel per scroll line.
const WHEEL_LINE_TRAVEL: f32 = 20.0;

/// Sensitivity applied to pixel-based (trackpad) wheel deltas.
const WHEEL_PIXEL_SENSITIVITY: f32 = 0.3;

/// Curated presentation for the house's photo folders, in display order.
const GROUP_METAS: &[GroupMeta] = &[
    GroupMeta {
        key: "atrium",
        title: "Atrium",
        description: "Under the round roof, where the light turns with the day.",
    },
    GroupMeta {
        key: "room",
        title: "Rooms",
        description: "Square walls, soft edges, the quarters of the house.",
    },
    GroupMeta {
        key: "terrace",
        title: "Terrace",
        description: "An open threshold between the house and the hills.",
    },
];

/// Main application state
pub struct Borderless {
    /// The active view, restored from and persisted to the config dir
    tab: Tab,
    /// The inline photos viewer (carousel over the active group)
    viewer: PhotosViewer,
    /// The full-screen overlay, when open
    lightbox: Option<lightbox::Lightbox>,
    /// Image bytes and blur placeholders, shared by both viewers
    cache: PreloadCache,
    /// Page scroll freeze while the lightbox is open
    scroll_lock: ScrollLock,
    /// Last observed offset of the page scrollable
    page_offset: AbsoluteOffset,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// The manifest artifact finished loading (possibly empty)
    ManifestLoaded(Vec<Photo>),
    /// User picked a view in the top navigation
    TabSelected(Tab),
    Viewer(viewer::Message),
    Lightbox(lightbox::Message),
    /// Background read of one photo file completed
    PhotoLoaded(String, Option<Vec<u8>>),
    PageScrolled(AbsoluteOffset),
    /// Accumulated wheel travel (positive = toward the next slide)
    Wheel(f32),
    EscapePressed,
    ArrowLeftPressed,
    ArrowRightPressed,
    /// Frame tick while a slide transition is running
    Tick,
}

impl Borderless {
    /// Create a new instance of the application
    pub fn new() -> (Self, Task<Message>) {
        let tab = session::load_view_token();
        println!("🏠 House of Borderless starting on the {} view", tab.token());

        let app = Borderless {
            tab,
            viewer: PhotosViewer::new(Vec::new()),
            lightbox: None,
            cache: PreloadCache::new(PUBLIC_DIR),
            scroll_lock: ScrollLock::new(),
            page_offset: AbsoluteOffset::default(),
        };

        (
            app,
            Task::perform(
                load_manifest(PathBuf::from(MANIFEST_PATH)),
                Message::ManifestLoaded,
            ),
        )
    }

    /// Handle application messages and update state
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ManifestLoaded(photos) => {
                self.cache.seed_placeholders(&photos);
                let groups = derive_groups(&photos, BASE_DIR, GROUP_METAS);
                println!(
                    "✅ Gallery ready: {} photos in {} groups",
                    photos.len(),
                    groups.len()
                );
                self.viewer = PhotosViewer::new(groups);
                self.preload_task()
            }
            Message::TabSelected(tab) => {
                if self.tab != tab {
                    self.tab = tab;
                    session::save_view_token(tab);
                }
                self.preload_task()
            }
            Message::Viewer(message) => {
                match self.viewer.update(message) {
                    viewer::Event::OpenLightbox { photos, index } => {
                        self.open_lightbox(photos, index);
                    }
                    viewer::Event::None => {}
                }
                self.preload_task()
            }
            Message::Lightbox(message) => {
                let event = match self.lightbox.as_mut() {
                    Some(lightbox) => lightbox.update(message),
                    None => lightbox::Event::None,
                };
                if event == lightbox::Event::CloseRequested {
                    return self.close_lightbox();
                }
                self.preload_task()
            }
            Message::PhotoLoaded(src, Some(bytes)) => {
                self.cache.insert(src, bytes);
                Task::none()
            }
            Message::PhotoLoaded(src, None) => {
                eprintln!("⚠️  No readable photo file for {}", src);
                Task::none()
            }
            Message::PageScrolled(offset) => {
                if !self.scroll_lock.is_engaged() {
                    self.page_offset = offset;
                }
                Task::none()
            }
            Message::Wheel(travel) => {
                if let Some(lightbox) = self.lightbox.as_mut() {
                    lightbox.wheel(travel);
                    return self.preload_task();
                }
                Task::none()
            }
            Message::EscapePressed => {
                if self.lightbox.is_some() {
                    self.close_lightbox()
                } else {
                    Task::none()
                }
            }
            Message::ArrowLeftPressed => {
                if let Some(lightbox) = self.lightbox.as_mut() {
                    lightbox.update(lightbox::Message::Prev);
                    return self.preload_task();
                }
                Task::none()
            }
            Message::ArrowRightPressed => {
                if let Some(lightbox) = self.lightbox.as_mut() {
                    lightbox.update(lightbox::Message::Next);
                    return self.preload_task();
                }
                Task::none()
            }
            Message::Tick => {
                let now = Instant::now();
                self.viewer.tick(now);
                if let Some(lightbox) = self.lightbox.as_mut() {
                    lightbox.tick(now);
                }
                Task::none()
            }
        }
    }

    fn open_lightbox(&mut self, photos: Vec<Photo>, index: usize) {
        self.scroll_lock.engage(self.page_offset);
        self.lightbox = Some(lightbox::Lightbox::open(photos, index));
    }

    /// Every exit path funnels here so the scroll position is always
    /// restored to where the lock captured it.
    fn close_lightbox(&mut self) -> Task<Message> {
        self.lightbox = None;
        match self.scroll_lock.disengage() {
            Some(offset) => scrollable::scroll_to(page_scroll_id(), offset),
            None => Task::none(),
        }
    }

    /// Kick off background reads for the slides either viewer is about
    /// to show (current plus loop neighbors). The cache filters out
    /// anything already requested.
    fn preload_task(&mut self) -> Task<Message> {
        let mut wanted: Vec<String> = Vec::new();
        if self.tab == Tab::Photos {
            wanted.extend(
                neighbor_srcs(self.viewer.photos(), self.viewer.current_index())
                    .into_iter()
                    .map(str::to_string),
            );
        }
        if let Some(lightbox) = &self.lightbox {
            for src in neighbor_srcs(lightbox.photos(), lightbox.current_index()) {
                if !wanted.iter().any(|existing| existing == src) {
                    wanted.push(src.to_string());
                }
            }
        }

        let pending = self.cache.request(wanted.iter().map(String::as_str));
        if pending.is_empty() {
            return Task::none();
        }
        Task::batch(pending.into_iter().map(|(src, path)| {
            Task::perform(read_photo(src, path), |(src, bytes)| {
                Message::PhotoLoaded(src, bytes)
            })
        }))
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let keys = keyboard::on_key_press(|key, _modifiers| match key {
            keyboard::Key::Named(keyboard::key::Named::Escape) => Some(Message::EscapePressed),
            keyboard::Key::Named(keyboard::key::Named::ArrowLeft) => {
                Some(Message::ArrowLeftPressed)
            }
            keyboard::Key::Named(keyboard::key::Named::ArrowRight) => {
                Some(Message::ArrowRightPressed)
            }
            _ => None,
        });

        let wheel = iced::event::listen_with(|event, _status, _window| match event {
            iced::Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                let travel = match delta {
                    mouse::ScrollDelta::Lines { y, .. } => -y * WHEEL_LINE_TRAVEL,
                    mouse::ScrollDelta::Pixels { y, .. } => -y * WHEEL_PIXEL_SENSITIVITY,
                };
                Some(Message::Wheel(travel))
            }
            _ => None,
        });

        let mut subs = vec![keys, wheel];
        let transitioning = self.viewer.in_transition()
            || self
                .lightbox
                .as_ref()
                .is_some_and(|lightbox| lightbox.in_transition());
        if transitioning {
            subs.push(iced::time::every(Duration::from_millis(16)).map(|_| Message::Tick));
        }
        Subscription::batch(subs)
    }

    /// Build the user interface
    pub fn view(&self) -> Element<'_, Message> {
        let sidebar = container(
            column![
                text("House of").size(18),
                text("BORDERLESS").size(42).font(bold()),
            ]
            .spacing(4),
        )
        .width(Length::FillPortion(2))
        .padding([32, 40]);

        let content: Element<'_, Message> = match self.tab {
            Tab::About => about::view(),
            Tab::Photos => self.viewer.view(&self.cache).map(Message::Viewer),
        };

        let main = column![
            self.top_nav(),
            scrollable(container(content).padding([0, 32]))
                .id(page_scroll_id())
                .on_scroll(|viewport| Message::PageScrolled(viewport.absolute_offset()))
                .height(Length::Fill),
            container(text("2024 Copyright All Rights Are Reserved.").size(12))
                .padding([16, 32]),
        ]
        .width(Length::FillPortion(3));

        let base: Element<'_, Message> = row![sidebar, main].into();

        match &self.lightbox {
            Some(lightbox) => {
                stack![base, lightbox.view(&self.cache).map(Message::Lightbox)].into()
            }
            None => base,
        }
    }

    fn top_nav(&self) -> Element<'_, Message> {
        let tab_button = |label: &str, tab: Tab, active: bool| {
            let font = if active { bold() } else { Font::default() };
            button(text(label.to_string()).size(16).font(font))
                .style(button::text)
                .on_press(Message::TabSelected(tab))
        };

        row![
            tab_button("About", Tab::About, self.tab == Tab::About),
            horizontal_space(),
            tab_button("Photos", Tab::Photos, self.tab == Tab::Photos),
        ]
        .padding([16, 32])
        .align_y(Alignment::Center)
        .into()
    }

    /// Set the application theme
    pub fn theme(&self) -> Theme {
        Theme::Light
    }
}

fn bold() -> Font {
    Font {
        weight: iced::font::Weight::Bold,
        ..Font::default()
    }
}

fn page_scroll_id() -> scrollable::Id {
    scrollable::Id::new("page")
}

/// Async read of one photo file for the preload cache.
async fn read_photo(src: String, path: PathBuf) -> (String, Option<Vec<u8>>) {
    match tokio::fs::read(&path).await {
        Ok(bytes) => (src, Some(bytes)),
        Err(error) => {
            eprintln!("⚠️  Failed to read {}: {}", path.display(), error);
            (src, None)
        }
    }
}
