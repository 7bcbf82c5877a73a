/// House of Borderless: a two-view stay gallery (About + Photos) with a
/// looping photo carousel and a full-screen lightbox.
///
/// The interesting machinery lives in `carousel`: a controller that keeps
/// the application's idea of "current photo" authoritative while a slide
/// engine with loop mode and inertial wheel input reports whatever it
/// physically traversed. Everything else is the shell around it.

pub mod app;
pub mod carousel;
pub mod error;
pub mod preload;
pub mod state;
pub mod ui;
