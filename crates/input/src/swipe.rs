//! Mouse swipe recognition.
//!
//! A swipe is a left-button press followed by a release some distance away.
//! Terminal cells are roughly twice as tall as they are wide, so horizontal
//! travel is halved before the axes are compared. Short drags are taps and
//! produce nothing.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::types::Direction;

/// Minimum travel, in row-equivalents, for a drag to count as a swipe.
pub const DEFAULT_SWIPE_THRESHOLD: u16 = 2;

/// Tracks an in-progress mouse drag.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    origin: Option<(u16, u16)>,
    threshold: u16,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_SWIPE_THRESHOLD)
    }

    pub fn with_threshold(threshold: u16) -> Self {
        Self {
            origin: None,
            threshold: threshold.max(1),
        }
    }

    pub fn threshold(&self) -> u16 {
        self.threshold
    }

    /// True while the left button is held.
    pub fn is_tracking(&self) -> bool {
        self.origin.is_some()
    }

    /// Feed a mouse event; returns a direction when a swipe completes.
    pub fn handle_mouse(&mut self, event: MouseEvent) -> Option<Direction> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.origin = Some((event.column, event.row));
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let (x0, y0) = self.origin.take()?;
                self.classify(x0, y0, event.column, event.row)
            }
            _ => None,
        }
    }

    /// Drop any half-finished drag (e.g. after a resize).
    pub fn reset(&mut self) {
        self.origin = None;
    }

    fn classify(&self, x0: u16, y0: u16, x1: u16, y1: u16) -> Option<Direction> {
        let dx = (i32::from(x1) - i32::from(x0)) / 2;
        let dy = i32::from(y1) - i32::from(y0);
        let (ax, ay) = (dx.abs(), dy.abs());

        if ax.max(ay) < i32::from(self.threshold) {
            return None;
        }
        // Ties go to the vertical axis; horizontal already lost precision.
        if ax > ay {
            Some(if dx > 0 { Direction::Right } else { Direction::Left })
        } else {
            Some(if dy > 0 { Direction::Down } else { Direction::Up })
        }
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new()
    }
}
