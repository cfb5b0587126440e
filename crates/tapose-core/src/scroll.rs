//! Keeping the two panels scrolled together.

use serde::{Deserialize, Serialize};

use crate::Side;

/// Scroll offsets of one panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollPosition {
    /// Vertical offset.
    pub top: u32,
    /// Horizontal offset.
    pub left: u32,
}

impl ScrollPosition {
    /// Creates a position from vertical and horizontal offsets.
    #[must_use]
    pub fn new(top: u32, left: u32) -> Self {
        Self { top, left }
    }
}

/// A programmatic scroll the host should apply to one panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollCommand {
    /// The panel to move.
    pub target: Side,
    /// Where to move it.
    pub position: ScrollPosition,
}

/// Mirrors user scrolling from one panel onto the other.
///
/// Applying a command makes the target panel emit its own scroll event. The
/// coordinator ignores every event until the host calls
/// [`ScrollCoordinator::on_frame`], so a mirrored scroll never bounces back.
///
/// ```
/// # use tapose_core::{ScrollCoordinator, ScrollPosition, Side};
/// let mut sync = ScrollCoordinator::new();
/// let cmd = sync.on_scroll(Side::Left, ScrollPosition::new(120, 0)).unwrap();
/// assert_eq!(cmd.target, Side::Right);
/// // The echo from the right panel is swallowed.
/// assert!(sync.on_scroll(Side::Right, ScrollPosition::new(120, 0)).is_none());
/// sync.on_frame();
/// assert!(sync.on_scroll(Side::Right, ScrollPosition::new(80, 0)).is_some());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScrollCoordinator {
    left: ScrollPosition,
    right: ScrollPosition,
    syncing: bool,
}

impl ScrollCoordinator {
    /// Creates a coordinator with both panels at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a scroll event from `side` and returns the command that
    /// mirrors it, or `None` while a mirrored scroll is in flight.
    pub fn on_scroll(&mut self, side: Side, position: ScrollPosition) -> Option<ScrollCommand> {
        if self.syncing {
            return None;
        }
        match side {
            Side::Left => self.left = position,
            Side::Right => self.right = position,
        }
        self.syncing = true;
        Some(ScrollCommand { target: side.other(), position })
    }

    /// Clears the re-entrancy flag; call once per animation frame.
    pub fn on_frame(&mut self) {
        self.syncing = false;
    }

    /// Last position reported by `side`.
    #[must_use]
    pub fn position(&self, side: Side) -> ScrollPosition {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Returns `true` while mirrored events are being ignored.
    #[must_use]
    pub fn is_syncing(&self) -> bool {
        self.syncing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_scroll_mirrors_left() {
        let mut sync = ScrollCoordinator::new();
        let cmd = sync.on_scroll(Side::Right, ScrollPosition::new(10, 4)).unwrap();
        assert_eq!(cmd, ScrollCommand { target: Side::Left, position: ScrollPosition::new(10, 4) });
        assert_eq!(sync.position(Side::Right), ScrollPosition::new(10, 4));
        assert_eq!(sync.position(Side::Left), ScrollPosition::default());
    }

    #[test]
    fn ignored_events_do_not_move_stored_positions() {
        let mut sync = ScrollCoordinator::new();
        sync.on_scroll(Side::Left, ScrollPosition::new(5, 0));
        assert!(sync.is_syncing());
        assert!(sync.on_scroll(Side::Left, ScrollPosition::new(50, 0)).is_none());
        assert_eq!(sync.position(Side::Left), ScrollPosition::new(5, 0));
    }

    #[test]
    fn frame_tick_recovers_the_coordinator() {
        let mut sync = ScrollCoordinator::new();
        for top in 0..3 {
            assert!(sync.on_scroll(Side::Left, ScrollPosition::new(top, 0)).is_some());
            sync.on_frame();
            assert!(!sync.is_syncing());
        }
    }
}
