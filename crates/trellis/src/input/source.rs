//! The input polling capability.
//!
//! The platform's input hardware is consumed through [`InputSource`], a
//! constructor-injected trait: the real console backend reads the device
//! registers, while tests script frames through [`ScriptedInput`]. The
//! context stack polls the source exactly once per frame.

use std::collections::VecDeque;

use super::buttons::{ButtonSnapshot, Buttons};
use super::crank::CrankSnapshot;

/// Input polling capability.
///
/// Both methods are called once per frame by
/// [`ContextStack::update`](crate::input::ContextStack::update);
/// implementations report edges (pressed/released, crank change) relative
/// to the previous poll.
pub trait InputSource {
    /// Poll the current button state.
    fn buttons(&mut self) -> ButtonSnapshot;

    /// Poll the current crank state.
    fn crank(&mut self) -> CrankSnapshot;
}

/// A scripted input source for tests and simulators.
///
/// Frames are queued in advance. One frame feeds one `buttons()` plus one
/// `crank()` poll, in either order; when the script is exhausted, polls
/// report no button activity and a docked crank.
///
/// ```
/// use trellis::input::{Buttons, InputSource, ScriptedInput};
///
/// let mut input = ScriptedInput::new();
/// input.press(Buttons::A);
/// let snapshot = input.buttons();
/// assert_eq!(snapshot.pressed, Buttons::A);
/// ```
#[derive(Default)]
pub struct ScriptedInput {
    frames: VecDeque<(ButtonSnapshot, CrankSnapshot)>,
    active: Option<(ButtonSnapshot, CrankSnapshot)>,
    buttons_taken: bool,
    crank_taken: bool,
}

impl ScriptedInput {
    /// Create a source with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a full frame of input.
    pub fn push_frame(&mut self, buttons: ButtonSnapshot, crank: CrankSnapshot) {
        self.frames.push_back((buttons, crank));
    }

    /// Queue a frame where `buttons` go down (and are held).
    pub fn press(&mut self, buttons: Buttons) {
        self.push_frame(
            ButtonSnapshot {
                current: buttons,
                pressed: buttons,
                released: Buttons::empty(),
            },
            CrankSnapshot::DOCKED,
        );
    }

    /// Queue a frame where `buttons` come up.
    pub fn release(&mut self, buttons: Buttons) {
        self.push_frame(
            ButtonSnapshot {
                current: Buttons::empty(),
                pressed: Buttons::empty(),
                released: buttons,
            },
            CrankSnapshot::DOCKED,
        );
    }

    /// Queue a frame of crank rotation.
    pub fn turn_crank(&mut self, angle: f32, change: f32) {
        self.push_frame(
            ButtonSnapshot::EMPTY,
            CrankSnapshot {
                angle,
                change,
                docked: false,
            },
        );
    }

    /// Queue a frame that only changes the crank's docked state.
    pub fn dock_crank(&mut self, docked: bool) {
        self.push_frame(
            ButtonSnapshot::EMPTY,
            CrankSnapshot {
                angle: 0.0,
                change: 0.0,
                docked,
            },
        );
    }

    /// Number of scripted frames not yet fully consumed.
    pub fn remaining(&self) -> usize {
        self.frames.len() + usize::from(self.active.is_some())
    }

    fn activate(&mut self) -> (ButtonSnapshot, CrankSnapshot) {
        match self.active {
            Some(frame) => frame,
            None => {
                let frame = self
                    .frames
                    .pop_front()
                    .unwrap_or((ButtonSnapshot::EMPTY, CrankSnapshot::DOCKED));
                self.active = Some(frame);
                self.buttons_taken = false;
                self.crank_taken = false;
                frame
            }
        }
    }

    fn finish_if_drained(&mut self) {
        if self.buttons_taken && self.crank_taken {
            self.active = None;
        }
    }
}

impl InputSource for ScriptedInput {
    fn buttons(&mut self) -> ButtonSnapshot {
        let frame = self.activate();
        self.buttons_taken = true;
        self.finish_if_drained();
        frame.0
    }

    fn crank(&mut self) -> CrankSnapshot {
        let frame = self.activate();
        self.crank_taken = true;
        self.finish_if_drained();
        frame.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_frames_in_order() {
        let mut input = ScriptedInput::new();
        input.press(Buttons::A);
        input.release(Buttons::A);

        let first = input.buttons();
        let _ = input.crank();
        assert_eq!(first.pressed, Buttons::A);

        let second = input.buttons();
        let _ = input.crank();
        assert_eq!(second.released, Buttons::A);
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn test_exhausted_script_reports_idle() {
        let mut input = ScriptedInput::new();
        assert_eq!(input.buttons(), ButtonSnapshot::EMPTY);
        assert_eq!(input.crank(), CrankSnapshot::DOCKED);
    }

    #[test]
    fn test_buttons_and_crank_share_a_frame() {
        let mut input = ScriptedInput::new();
        input.turn_crank(45.0, 10.0);

        // Polling crank first must not consume a second frame for buttons.
        let crank = input.crank();
        let buttons = input.buttons();
        assert_eq!(crank.change, 10.0);
        assert!(buttons.is_empty());
        assert_eq!(input.remaining(), 0);
    }
}
