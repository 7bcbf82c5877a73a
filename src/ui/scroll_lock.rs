use iced::widget::scrollable::AbsoluteOffset;

/// Freezes the page scroll while an overlay is open.
///
/// Engaging captures the current offset of the page scrollable;
/// disengaging hands it back so the shell can restore the exact position
/// the user left. Restoration must happen on every exit path of the
/// overlay: close button, backdrop click, Escape.
#[derive(Debug, Default)]
pub struct ScrollLock {
    saved: Option<AbsoluteOffset>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the offset to restore later. Re-engaging overwrites the
    /// previous capture: the most recent engage wins.
    pub fn engage(&mut self, current: AbsoluteOffset) {
        self.saved = Some(current);
    }

    /// Release the lock, returning the offset captured at the most
    /// recent engage. Returns `None` when nothing was engaged.
    pub fn disengage(&mut self) -> Option<AbsoluteOffset> {
        self.saved.take()
    }

    pub fn is_engaged(&self) -> bool {
        self.saved.is_some()
    }
}
