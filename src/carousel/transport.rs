/// Slide transport: the engine that physically moves slides around.
///
/// The controller never renders anything; it talks to a `Transport`: an
/// engine that owns a looping track of slides, animates between them, and
/// reports positional changes. The app ships one engine (`SlideTrack`),
/// but the controller is written against the capability, not the engine,
/// so tests drive it with a recording mock.
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use super::TRANSITION_MS;

/// Wheel travel (in scroll-line units) required to commit one slide.
/// Micro-deltas below this are inertia noise and accumulate silently.
pub const WHEEL_STEP: f32 = 40.0;

/// Identifies a transport instance across engine remounts. A fresh engine
/// gets a fresh id, which is how the controller tells "same instance,
/// re-attach is a no-op" from "replaced instance, rebind".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransportId(u64);

impl TransportId {
    /// Allocate a process-unique id.
    pub fn unique() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        TransportId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Notifications a transport queues for its controller.
///
/// For any one gesture the engine queues `SlideChanged` before the
/// matching `TransitionEnd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportEvent {
    /// The track settled on a new logical slide index.
    SlideChanged(usize),
    /// The commit animation for the last change finished.
    TransitionEnd,
}

/// Capability interface over a slide-rendering engine.
///
/// Events are a polled queue rather than registered callbacks: the single
/// UI loop drains `pop_event` after feeding input, which keeps delivery
/// ordering deterministic without aliasing the engine from a callback.
pub trait Transport {
    fn id(&self) -> TransportId;

    /// The logical slide index the engine currently shows.
    fn real_index(&self) -> usize;

    /// One-step navigation primitives (loop-aware).
    fn slide_prev(&mut self);
    fn slide_next(&mut self);

    /// Jump to a logical index with the given transition duration.
    fn slide_to_loop(&mut self, index: usize, speed_ms: u64);

    /// Drain the next queued notification, if any.
    fn pop_event(&mut self) -> Option<TransportEvent>;

    /// Whether the engine delivers `TransitionEnd` at all. Engines that
    /// don't are covered by the controller's lock-deadline fallback.
    fn reports_transition_end(&self) -> bool {
        true
    }

    /// Whether a commit animation is currently running.
    fn in_transition(&self) -> bool;

    /// Advance time-based state (transition completion).
    fn tick(&mut self, now: Instant);
}

/// A timed commit animation toward a target slide.
#[derive(Debug, Clone, Copy)]
struct Transition {
    started: Instant,
    duration: Duration,
}

/// The in-crate slide engine: a looping track with wheel accumulation and
/// a timed commit animation.
///
/// A hard inertial flick can deliver several `WHEEL_STEP`s of travel in a
/// single input event; the track commits them all at once, which is
/// exactly the multi-slide jump the controller clamps back to one step.
#[derive(Debug)]
pub struct SlideTrack {
    id: TransportId,
    total: usize,
    real_index: usize,
    transition: Option<Transition>,
    wheel_accum: f32,
    events: VecDeque<TransportEvent>,
}

impl SlideTrack {
    pub fn new(total: usize, initial: usize) -> Self {
        let real_index = if total == 0 { 0 } else { initial % total };
        SlideTrack {
            id: TransportId::unique(),
            total,
            real_index,
            transition: None,
            wheel_accum: 0.0,
            events: VecDeque::new(),
        }
    }

    /// Feed wheel travel; positive means toward the next slide. Commits
    /// one slide per full `WHEEL_STEP` of accumulated travel.
    pub fn wheel(&mut self, delta: f32) {
        self.wheel_accum += delta;
        let steps = (self.wheel_accum / WHEEL_STEP).trunc();
        if steps != 0.0 {
            self.wheel_accum -= steps * WHEEL_STEP;
            self.nudge(steps as isize);
        }
    }

    /// Move the track by a signed number of slides in one gesture.
    pub fn nudge(&mut self, delta: isize) {
        if self.total == 0 || delta == 0 {
            return;
        }
        let target =
            (self.real_index as isize + delta).rem_euclid(self.total as isize) as usize;
        self.begin(target, TRANSITION_MS);
    }

    fn begin(&mut self, target: usize, speed_ms: u64) {
        // Settling onto the slide we already show is not a move: no
        // notification, and any running animation keeps its timing.
        if target == self.real_index {
            return;
        }
        self.real_index = target;
        self.transition = Some(Transition {
            started: Instant::now(),
            duration: Duration::from_millis(speed_ms),
        });
        self.events.push_back(TransportEvent::SlideChanged(target));
    }
}

impl Transport for SlideTrack {
    fn id(&self) -> TransportId {
        self.id
    }

    fn real_index(&self) -> usize {
        self.real_index
    }

    fn slide_prev(&mut self) {
        self.nudge(-1);
    }

    fn slide_next(&mut self) {
        self.nudge(1);
    }

    fn slide_to_loop(&mut self, index: usize, speed_ms: u64) {
        if self.total == 0 {
            return;
        }
        self.begin(index % self.total, speed_ms);
    }

    fn pop_event(&mut self) -> Option<TransportEvent> {
        self.events.pop_front()
    }

    fn in_transition(&self) -> bool {
        self.transition.is_some()
    }

    fn tick(&mut self, now: Instant) {
        if let Some(transition) = self.transition {
            if now >= transition.started + transition.duration {
                self.transition = None;
                self.events.push_back(TransportEvent::TransitionEnd);
            }
        }
    }
}
