//! Button state and events.
//!
//! The console reports its buttons as a bitmask. Every frame the input
//! source is polled once, producing a [`ButtonSnapshot`] of which buttons
//! are down, which went down since the last poll, and which came up. The
//! dispatch layer turns a snapshot into per-button [`ButtonEvent`]s.

use bitflags::bitflags;

bitflags! {
    /// The console's button bitmask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Buttons: u8 {
        /// D-pad up.
        const UP = 1 << 0;
        /// D-pad down.
        const DOWN = 1 << 1;
        /// D-pad left.
        const LEFT = 1 << 2;
        /// D-pad right.
        const RIGHT = 1 << 3;
        /// Primary action button.
        const A = 1 << 4;
        /// Secondary action button.
        const B = 1 << 5;
        /// System menu button.
        const MENU = 1 << 6;
    }
}

/// Result of one button poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonSnapshot {
    /// Buttons currently held down.
    pub current: Buttons,
    /// Buttons that went down since the previous poll.
    pub pressed: Buttons,
    /// Buttons that came up since the previous poll.
    pub released: Buttons,
}

impl ButtonSnapshot {
    /// A snapshot with no button activity.
    pub const EMPTY: Self = Self {
        current: Buttons::empty(),
        pressed: Buttons::empty(),
        released: Buttons::empty(),
    };

    /// Check whether the snapshot carries any activity at all.
    pub fn is_empty(&self) -> bool {
        self.current.is_empty() && self.pressed.is_empty() && self.released.is_empty()
    }

    /// Expand the snapshot into per-button events, in mask order.
    ///
    /// Edge events come first (presses, then releases), then `Held` events
    /// for buttons that were already down before this poll.
    pub fn events(&self) -> Vec<ButtonEvent> {
        let mut events = Vec::new();
        for button in self.pressed.iter() {
            events.push(ButtonEvent {
                button,
                phase: ButtonPhase::Pressed,
            });
        }
        for button in self.released.iter() {
            events.push(ButtonEvent {
                button,
                phase: ButtonPhase::Released,
            });
        }
        for button in (self.current & !self.pressed).iter() {
            events.push(ButtonEvent {
                button,
                phase: ButtonPhase::Held,
            });
        }
        events
    }
}

/// The phase of a button's activity within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonPhase {
    /// The button went down this frame.
    Pressed,
    /// The button came up this frame.
    Released,
    /// The button was down before this frame and still is.
    Held,
}

/// A single button notification delivered to the active context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEvent {
    /// The button concerned; exactly one flag is set.
    pub button: Buttons,
    /// What the button did.
    pub phase: ButtonPhase,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_events_expand_edges() {
        let snapshot = ButtonSnapshot {
            current: Buttons::A | Buttons::UP,
            pressed: Buttons::A,
            released: Buttons::B,
        };

        let events = snapshot.events();
        assert_eq!(
            events,
            vec![
                ButtonEvent {
                    button: Buttons::A,
                    phase: ButtonPhase::Pressed,
                },
                ButtonEvent {
                    button: Buttons::B,
                    phase: ButtonPhase::Released,
                },
                ButtonEvent {
                    button: Buttons::UP,
                    phase: ButtonPhase::Held,
                },
            ]
        );
    }

    #[test]
    fn test_empty_snapshot_has_no_events() {
        assert!(ButtonSnapshot::EMPTY.events().is_empty());
        assert!(ButtonSnapshot::EMPTY.is_empty());
    }

    #[test]
    fn test_newly_pressed_is_not_held() {
        let snapshot = ButtonSnapshot {
            current: Buttons::A,
            pressed: Buttons::A,
            released: Buttons::empty(),
        };
        let events = snapshot.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].phase, ButtonPhase::Pressed);
    }
}
