// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click-versus-drag recognition for a single pointer.
//!
//! [`GestureController`] turns a raw down/move/up stream into one of two
//! intents: a click adds a point, a drag searches the dragged rectangle.
//!
//! ## Rules
//!
//! 1. `down` arms the controller and records the anchor. A `down` while
//!    already armed re-arms at the new position.
//! 2. Each `move` while armed marks the gesture as a drag once the pointer has
//!    left the dead zone: more than `drag_threshold` pixels from the anchor on
//!    either axis. The mark is sticky; coming back does not undo it. Every
//!    armed `move` returns the preview rectangle spanned by anchor and pointer.
//! 3. `up` disarms. The up position is checked against the dead zone like a
//!    final move, then the controller emits [`Intent::AddPoint`] at the up
//!    position for a click or [`Intent::SearchRegion`] for a drag.
//! 4. `up` while idle emits nothing.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_rtree_viz::gesture::{GestureController, Intent};
//!
//! let mut g = GestureController::default();
//!
//! // Jitter inside the dead zone is still a click.
//! g.on_down(Point::new(100.0, 100.0));
//! let _preview = g.on_move(Point::new(104.0, 97.0));
//! assert_eq!(g.on_up(Point::new(104.0, 97.0)), Some(Intent::AddPoint(Point::new(104.0, 97.0))));
//!
//! // A longer drag becomes a search over the spanned rectangle.
//! g.on_down(Point::new(25.0, 5.0));
//! let _ = g.on_move(Point::new(5.0, 25.0));
//! assert_eq!(
//!     g.on_up(Point::new(5.0, 25.0)),
//!     Some(Intent::SearchRegion(Rect::new(5.0, 5.0, 25.0, 25.0)))
//! );
//! ```

use kurbo::{Point, Rect};

/// Default dead-zone half-width in pixels.
pub const DEFAULT_DRAG_THRESHOLD: f64 = 10.0;

/// Gesture tuning.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GestureConfig {
    /// Movement beyond this many pixels on either axis turns a press into a drag.
    pub drag_threshold: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
        }
    }
}

/// What a completed gesture asks for.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Intent {
    /// Press and release without leaving the dead zone.
    AddPoint(Point),
    /// Press, drag and release; the rectangle spans anchor and release point.
    SearchRegion(Rect),
}

/// Controller state.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum GestureState {
    /// No button held.
    #[default]
    Idle,
    /// Button held since `anchor`.
    Armed {
        /// Where the press started.
        anchor: Point,
        /// Whether the pointer has left the dead zone since the press.
        moved: bool,
    },
}

/// Click/drag state machine.
#[derive(Clone, Debug, Default)]
pub struct GestureController {
    state: GestureState,
    config: GestureConfig,
}

impl GestureController {
    /// Create an idle controller with the given tuning.
    pub fn new(config: GestureConfig) -> Self {
        Self {
            state: GestureState::Idle,
            config,
        }
    }

    /// Create an idle controller with a custom dead zone.
    pub fn with_threshold(drag_threshold: f64) -> Self {
        Self::new(GestureConfig { drag_threshold })
    }

    /// Current state.
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Whether a press is in progress.
    pub fn is_armed(&self) -> bool {
        matches!(self.state, GestureState::Armed { .. })
    }

    /// Preview rectangle for a pointer at `pos`, if armed.
    pub fn preview(&self, pos: Point) -> Option<Rect> {
        match self.state {
            GestureState::Armed { anchor, .. } => Some(Rect::from_points(anchor, pos)),
            GestureState::Idle => None,
        }
    }

    /// Pointer pressed.
    pub fn on_down(&mut self, pos: Point) {
        self.state = GestureState::Armed {
            anchor: pos,
            moved: false,
        };
    }

    /// Pointer moved. Returns the live selection preview while armed.
    pub fn on_move(&mut self, pos: Point) -> Option<Rect> {
        let GestureState::Armed { anchor, moved } = &mut self.state else {
            return None;
        };
        if !*moved && outside_dead_zone(*anchor, pos, self.config.drag_threshold) {
            *moved = true;
        }
        Some(Rect::from_points(*anchor, pos))
    }

    /// Pointer released. Returns the recognized intent, or `None` if not armed.
    pub fn on_up(&mut self, pos: Point) -> Option<Intent> {
        let GestureState::Armed { anchor, moved } = core::mem::take(&mut self.state) else {
            return None;
        };
        let dragged = moved || outside_dead_zone(anchor, pos, self.config.drag_threshold);
        Some(if dragged {
            Intent::SearchRegion(Rect::from_points(anchor, pos))
        } else {
            Intent::AddPoint(pos)
        })
    }

    /// Abandon a press in progress without emitting anything.
    pub fn cancel(&mut self) {
        self.state = GestureState::Idle;
    }
}

fn outside_dead_zone(anchor: Point, pos: Point, threshold: f64) -> bool {
    (pos.x - anchor.x).abs() > threshold || (pos.y - anchor.y).abs() > threshold
}
