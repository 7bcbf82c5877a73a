/// Looping carousel controller.
///
/// Owns the authoritative "current photo" index for one viewer and
/// reconciles it against whatever the slide transport reports. The
/// transport is free to loop, animate, and (under inertial wheel input)
/// skip several slides in one gesture; the controller guarantees that at
/// most one logical slide change is ever accepted per gesture, issuing a
/// corrective jump when the engine overshot.
use std::time::{Duration, Instant};

use super::delta::shortest_loop_delta;
use super::transport::{Transport, TransportEvent};
use super::{SETTLE_MARGIN_MS, TRANSITION_MS};

/// One controller per active viewer (inline carousel, lightbox).
#[derive(Debug)]
pub struct CarouselController<T: Transport> {
    total: usize,
    /// The index the application renders and reports.
    current: usize,
    /// The last index accepted as authoritative, the baseline every
    /// reported change is measured against.
    last_confirmed: usize,
    /// Gesture lock: while `Instant::now()` is before this deadline, any
    /// reported change is a straggler from a corrective animation and is
    /// bounced back to `last_confirmed`.
    lock_until: Option<Instant>,
    /// One-shot flag marking that the next reported change is the
    /// transport settling after a jump we commanded, not a user gesture.
    clamp_guard: bool,
    transport: Option<T>,
}

impl<T: Transport> CarouselController<T> {
    pub fn new(total: usize) -> Self {
        CarouselController {
            total,
            current: 0,
            last_confirmed: 0,
            lock_until: None,
            clamp_guard: false,
            transport: None,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn transport(&self) -> Option<&T> {
        self.transport.as_ref()
    }

    pub fn transport_mut(&mut self) -> Option<&mut T> {
        self.transport.as_mut()
    }

    /// Assign the index from outside (e.g. opening the lightbox on a
    /// chosen photo). The target is folded into `[0, total)` with a true
    /// mathematical modulo, never negative and never rejected. Does not
    /// command the transport; pair with `slide_to` when the engine should
    /// move as well.
    pub fn set_index(&mut self, target: isize) {
        let index = self.normalize(target);
        self.current = index;
        self.last_confirmed = index;
    }

    /// Bind a transport instance. Re-attaching the same instance is a
    /// no-op; a different instance (engine remounted after the photo set
    /// changed) replaces the binding and its event queue wholesale.
    pub fn attach_transport(&mut self, transport: T) {
        if let Some(current) = &self.transport {
            if current.id() == transport.id() {
                return;
            }
        }
        self.transport = Some(transport);
    }

    /// One step back. Delegates to the transport; reconciliation happens
    /// when the transport reports the change.
    pub fn slide_prev(&mut self) {
        if self.total == 0 {
            return;
        }
        if let Some(transport) = self.transport.as_mut() {
            transport.slide_prev();
        }
    }

    /// One step forward. Same contract as `slide_prev`.
    pub fn slide_next(&mut self) {
        if self.total == 0 {
            return;
        }
        if let Some(transport) = self.transport.as_mut() {
            transport.slide_next();
        }
    }

    /// Set the index and command the transport to animate there.
    pub fn slide_to(&mut self, target: isize, speed_ms: u64) {
        self.set_index(target);
        let index = self.current;
        if let Some(transport) = self.transport.as_mut() {
            transport.slide_to_loop(index, speed_ms);
        }
    }

    /// Drain the transport's queued notifications through the state
    /// machine. This is the "subscription": the owning view calls it
    /// right after feeding input or ticking time forward.
    pub fn pump(&mut self) {
        loop {
            let event = match self.transport.as_mut() {
                Some(transport) => transport.pop_event(),
                None => None,
            };
            match event {
                Some(TransportEvent::SlideChanged(index)) => self.on_transport_changed(index),
                Some(TransportEvent::TransitionEnd) => self.on_transition_end(),
                None => break,
            }
        }
    }

    /// Advance the transport's clock and reconcile whatever it produced.
    pub fn tick(&mut self, now: Instant) {
        if let Some(transport) = self.transport.as_mut() {
            transport.tick(now);
        }
        self.pump();
    }

    /// Whether the bound transport is mid-animation (drives the caller's
    /// frame tick subscription).
    pub fn in_transition(&self) -> bool {
        self.transport
            .as_ref()
            .is_some_and(|transport| transport.in_transition())
    }

    /// Clear lock state. Called whenever a viewer's photo subset changes
    /// or an overlay reopens, so a stale lock can't eat the first gesture.
    pub fn reset_lock(&mut self) {
        self.lock_until = None;
        self.clamp_guard = false;
    }

    /// The transport finished its commit animation; release the gesture
    /// lock early instead of waiting out the deadline.
    pub fn on_transition_end(&mut self) {
        self.lock_until = None;
    }

    /// Reconcile a positional change reported by the transport.
    ///
    /// At most one logical slide change is accepted per gesture,
    /// regardless of how many slides the engine physically traversed.
    pub fn on_transport_changed(&mut self, reported: usize) {
        let now = Instant::now();

        // 1. Locked: a corrective animation is still in flight. Whatever
        // fired this is a straggler; push the engine back to the
        // confirmed index and keep state untouched.
        if let Some(deadline) = self.lock_until {
            if now < deadline {
                self.clamp_guard = true;
                let confirmed = self.last_confirmed;
                if let Some(transport) = self.transport.as_mut() {
                    transport.slide_to_loop(confirmed, TRANSITION_MS);
                }
                return;
            }
            // Deadline passed without a TransitionEnd (engines that never
            // send one land here): the timer fallback releases the lock.
            self.lock_until = None;
        }

        // 2. Trivial: no wraparound or multi-step logic on 0/1 slides.
        if self.total <= 1 {
            self.current = reported;
            self.last_confirmed = reported;
            return;
        }

        // 3. Clamp-guard consumption: this is the engine settling after a
        // jump we commanded, not a new gesture.
        if self.clamp_guard {
            self.clamp_guard = false;
            self.current = reported;
            self.last_confirmed = reported;
            return;
        }

        // 4. Normal gesture.
        let delta = shortest_loop_delta(self.last_confirmed, reported, self.total);
        if delta.unsigned_abs() <= 1 {
            self.current = reported;
            self.last_confirmed = reported;
            return;
        }

        // The engine skipped more than one slide in a single gesture
        // (inertial wheel, fast flick under loop mode). Clamp to exactly
        // one step in the gesture's direction and animate the engine back.
        let step = if delta > 0 { 1 } else { self.total - 1 };
        let target = (self.last_confirmed + step) % self.total;
        self.clamp_guard = true;
        self.current = target;
        self.last_confirmed = target;
        if let Some(transport) = self.transport.as_mut() {
            transport.slide_to_loop(target, TRANSITION_MS);
        }
        self.lock_until = Some(now + Duration::from_millis(TRANSITION_MS + SETTLE_MARGIN_MS));
    }

    fn normalize(&self, target: isize) -> usize {
        if self.total == 0 {
            0
        } else {
            target.rem_euclid(self.total as isize) as usize
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::transport::{TransportEvent, TransportId};

    /// Records every command the controller issues.
    struct MockTransport {
        id: TransportId,
        index: usize,
        jumps: Vec<(usize, u64)>,
        prev_calls: usize,
        next_calls: usize,
    }

    impl MockTransport {
        fn new() -> Self {
            MockTransport {
                id: TransportId::unique(),
                index: 0,
                jumps: Vec::new(),
                prev_calls: 0,
                next_calls: 0,
            }
        }
    }

    impl Transport for MockTransport {
        fn id(&self) -> TransportId {
            self.id
        }

        fn real_index(&self) -> usize {
            self.index
        }

        fn slide_prev(&mut self) {
            self.prev_calls += 1;
        }

        fn slide_next(&mut self) {
            self.next_calls += 1;
        }

        fn slide_to_loop(&mut self, index: usize, speed_ms: u64) {
            self.index = index;
            self.jumps.push((index, speed_ms));
        }

        fn pop_event(&mut self) -> Option<TransportEvent> {
            None
        }

        fn in_transition(&self) -> bool {
            false
        }

        fn tick(&mut self, _now: Instant) {}
    }

    fn controller_with_transport(total: usize) -> CarouselController<MockTransport> {
        let mut controller = CarouselController::new(total);
        controller.attach_transport(MockTransport::new());
        controller
    }

    #[test]
    fn test_set_index_normalizes_with_true_modulo() {
        let mut controller: CarouselController<MockTransport> = CarouselController::new(5);
        controller.set_index(-1);
        assert_eq!(controller.current_index(), 4);
        controller.set_index(7);
        assert_eq!(controller.current_index(), 2);
    }

    #[test]
    fn test_set_index_is_idempotent_under_modulo() {
        for k in -3isize..=3 {
            let mut a: CarouselController<MockTransport> = CarouselController::new(10);
            let mut b: CarouselController<MockTransport> = CarouselController::new(10);
            a.set_index(4);
            b.set_index(4 + k * 10);
            assert_eq!(a.current_index(), b.current_index(), "k={}", k);
        }
    }

    #[test]
    fn test_set_index_on_empty_sequence_pins_to_zero() {
        let mut controller: CarouselController<MockTransport> = CarouselController::new(0);
        controller.set_index(3);
        assert_eq!(controller.current_index(), 0);
        controller.set_index(-5);
        assert_eq!(controller.current_index(), 0);
    }

    #[test]
    fn test_single_step_changes_are_accepted() {
        let mut controller = controller_with_transport(10);
        controller.on_transport_changed(1);
        assert_eq!(controller.current_index(), 1);
        controller.on_transport_changed(0);
        assert_eq!(controller.current_index(), 0);
        // Wrap across the seam is still one step
        controller.on_transport_changed(9);
        assert_eq!(controller.current_index(), 9);
        assert!(controller.transport().unwrap().jumps.is_empty());
    }

    #[test]
    fn test_multi_slide_jump_clamps_to_one_step() {
        let mut controller = controller_with_transport(10);
        // One rapid gesture jumps from 0 to 3
        controller.on_transport_changed(3);

        assert_eq!(controller.current_index(), 1);
        let transport = controller.transport().unwrap();
        assert_eq!(transport.jumps, vec![(1, TRANSITION_MS)]);
        assert!(controller.lock_until.is_some());
        assert!(controller.clamp_guard);
    }

    #[test]
    fn test_backward_jump_clamps_across_the_seam() {
        let mut controller = controller_with_transport(10);
        // From 0, a backward flick reports 7: shortest delta is -3
        controller.on_transport_changed(7);
        assert_eq!(controller.current_index(), 9);
        assert_eq!(controller.transport().unwrap().jumps, vec![(9, TRANSITION_MS)]);
    }

    #[test]
    fn test_locked_window_rejects_further_changes() {
        let mut controller = controller_with_transport(10);
        controller.on_transport_changed(3);
        assert_eq!(controller.current_index(), 1);

        // Lock is armed; a straggler notification is bounced back to the
        // confirmed index and confirmed state stays put.
        controller.on_transport_changed(5);
        assert_eq!(controller.current_index(), 1);
        let jumps = &controller.transport().unwrap().jumps;
        assert_eq!(jumps.last(), Some(&(1, TRANSITION_MS)));
        assert_eq!(jumps.len(), 2);
    }

    #[test]
    fn test_transition_end_releases_the_lock() {
        let mut controller = controller_with_transport(10);
        controller.on_transport_changed(3);
        controller.on_transition_end();

        // Guard consumes the settle notification, then gestures flow again
        controller.on_transport_changed(1);
        assert_eq!(controller.current_index(), 1);
        controller.on_transport_changed(2);
        assert_eq!(controller.current_index(), 2);
    }

    #[test]
    fn test_lock_deadline_is_a_timer_fallback() {
        let mut controller = controller_with_transport(10);
        controller.on_transport_changed(3);
        assert!(controller.lock_until.is_some());

        // No TransitionEnd ever arrives; waiting out the deadline is
        // enough to accept gestures again.
        std::thread::sleep(Duration::from_millis(TRANSITION_MS + SETTLE_MARGIN_MS + 20));
        controller.on_transport_changed(1);
        // That change consumed the pending clamp guard
        assert_eq!(controller.current_index(), 1);
        assert!(!controller.clamp_guard);
    }

    #[test]
    fn test_clamp_guard_consumes_exactly_one_notification() {
        let mut controller = controller_with_transport(10);
        controller.on_transport_changed(3);
        controller.on_transition_end();

        // Settling notification accepted as-is even though it's the index
        // we commanded
        controller.on_transport_changed(1);
        assert_eq!(controller.current_index(), 1);

        // The guard is spent: a fresh 3-slide jump clamps again
        controller.on_transport_changed(4);
        assert_eq!(controller.current_index(), 2);
    }

    #[test]
    fn test_trivial_totals_accept_reports_verbatim() {
        let mut controller = controller_with_transport(1);
        controller.on_transport_changed(0);
        assert_eq!(controller.current_index(), 0);
    }

    #[test]
    fn test_navigation_without_transport_is_silently_ignored() {
        let mut controller: CarouselController<MockTransport> = CarouselController::new(5);
        controller.slide_next();
        controller.slide_prev();
        controller.slide_to(2, TRANSITION_MS);
        assert_eq!(controller.current_index(), 2);
    }

    #[test]
    fn test_navigation_on_empty_sequence_is_a_no_op() {
        let mut controller = controller_with_transport(0);
        controller.slide_next();
        controller.slide_prev();
        assert_eq!(controller.current_index(), 0);
        let transport = controller.transport().unwrap();
        assert_eq!(transport.next_calls, 0);
        assert_eq!(transport.prev_calls, 0);
    }

    #[test]
    fn test_slide_delegates_to_transport_primitives() {
        let mut controller = controller_with_transport(5);
        controller.slide_next();
        controller.slide_next();
        controller.slide_prev();
        let transport = controller.transport().unwrap();
        assert_eq!(transport.next_calls, 2);
        assert_eq!(transport.prev_calls, 1);
    }

    #[test]
    fn test_reattaching_same_instance_is_a_no_op() {
        let mut controller: CarouselController<MockTransport> = CarouselController::new(5);
        let transport = MockTransport::new();
        let id = transport.id();
        controller.attach_transport(transport);

        let mut same = MockTransport::new();
        same.id = id;
        same.index = 42;
        controller.attach_transport(same);
        // Original instance survives
        assert_eq!(controller.transport().unwrap().real_index(), 0);

        let replacement = MockTransport::new();
        let new_id = replacement.id();
        controller.attach_transport(replacement);
        assert_eq!(controller.transport().unwrap().id(), new_id);
    }

    #[test]
    fn test_reset_lock_clears_lock_and_guard() {
        let mut controller = controller_with_transport(10);
        controller.on_transport_changed(3);
        assert!(controller.lock_until.is_some());
        assert!(controller.clamp_guard);

        controller.reset_lock();
        assert!(controller.lock_until.is_none());
        assert!(!controller.clamp_guard);

        // Fresh gestures are reconciled normally again
        controller.on_transport_changed(2);
        assert_eq!(controller.current_index(), 2);
    }

    #[test]
    fn test_slide_to_sets_index_and_commands_the_jump() {
        let mut controller = controller_with_transport(5);
        controller.slide_to(-1, 0);
        assert_eq!(controller.current_index(), 4);
        assert_eq!(controller.transport().unwrap().jumps, vec![(4, 0)]);
    }
}
