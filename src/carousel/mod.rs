/// Looping carousel core
///
/// This module owns everything slide-transport related:
/// - Shortest circular distance between indices (delta.rs)
/// - The transport capability trait and the in-crate slide engine
///   (transport.rs)
/// - The controller that reconciles application state against the
///   transport and enforces one slide per gesture (controller.rs)

pub mod controller;
pub mod delta;
pub mod transport;

pub use controller::CarouselController;
pub use delta::shortest_loop_delta;
pub use transport::{SlideTrack, Transport, TransportEvent, TransportId};

/// Commit animation speed for slide transitions, in milliseconds.
/// Slower feels heavier; 300 matches the house style.
pub const TRANSITION_MS: u64 = 300;

/// Extra settling time on top of the transition before the gesture lock
/// releases. Empirical, not derived from the easing curve; tune here.
pub const SETTLE_MARGIN_MS: u64 = 180;
