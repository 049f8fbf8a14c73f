//! Pointer events delivered to the dispatcher.
//!
//! Events arrive already normalized: touch input has been mapped onto the
//! pointer model and positions are in surface coordinates.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

impl fmt::Display for PointerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointerPhase::Down => write!(f, "down"),
            PointerPhase::Move => write!(f, "move"),
            PointerPhase::Up => write!(f, "up"),
        }
    }
}

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    /// Release. Hosts deliver releases that happen off the surface too, so
    /// tools can invalidate a gesture ended outside it.
    Up { position: Point },
}

impl PointerEvent {
    pub fn down(x: f64, y: f64) -> Self {
        PointerEvent::Down {
            position: Point::new(x, y),
        }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        PointerEvent::Move {
            position: Point::new(x, y),
        }
    }

    pub fn up(x: f64, y: f64) -> Self {
        PointerEvent::Up {
            position: Point::new(x, y),
        }
    }

    /// Position in surface coordinates.
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { position }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position } => position,
        }
    }

    pub fn phase(&self) -> PointerPhase {
        match self {
            PointerEvent::Down { .. } => PointerPhase::Down,
            PointerEvent::Move { .. } => PointerPhase::Move,
            PointerEvent::Up { .. } => PointerPhase::Up,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let event = PointerEvent::moved(20.0, 10.0);
        assert_eq!(event.position(), Point::new(20.0, 10.0));
        assert_eq!(event.phase(), PointerPhase::Move);
        assert_eq!(PointerEvent::up(0.0, 0.0).phase().to_string(), "up");
    }
}
