//! Look-and-feel configuration.
//!
//! Every component resolves its colors through a [`LookAndFeel`]: its own
//! override when one was set, otherwise the process-wide default. The
//! default can be swapped at runtime to retheme everything that doesn't
//! carry an override.

use std::sync::Arc;

use parking_lot::RwLock;

use trellis_draw::Color;

/// Colors used by component drawing code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookAndFeel {
    /// Ink color for content.
    pub foreground: Color,
    /// Fill color behind content.
    pub background: Color,
    /// Color for focus indicators and selection.
    pub accent: Color,
}

impl Default for LookAndFeel {
    fn default() -> Self {
        // The target hardware is a 1-bit panel; default to ink on paper.
        Self {
            foreground: Color::BLACK,
            background: Color::WHITE,
            accent: Color::from_rgb8(96, 96, 96),
        }
    }
}

/// Process-wide default look-and-feel (lazy initialized).
static DEFAULT_LOOK: RwLock<Option<Arc<LookAndFeel>>> = RwLock::new(None);

/// The process-wide default look-and-feel.
pub fn default_look_and_feel() -> Arc<LookAndFeel> {
    if let Some(look) = DEFAULT_LOOK.read().clone() {
        return look;
    }
    let mut guard = DEFAULT_LOOK.write();
    guard
        .get_or_insert_with(|| Arc::new(LookAndFeel::default()))
        .clone()
}

/// Replace the process-wide default look-and-feel.
///
/// Components without an override pick the new default up on their next
/// draw.
pub fn set_default_look_and_feel(look: Arc<LookAndFeel>) {
    *DEFAULT_LOOK.write() = Some(look);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_ink_on_paper() {
        let look = default_look_and_feel();
        assert_eq!(look.foreground, Color::BLACK);
        assert_eq!(look.background, Color::WHITE);
    }

    #[test]
    fn test_default_can_be_replaced() {
        let inverted = Arc::new(LookAndFeel {
            foreground: Color::WHITE,
            background: Color::BLACK,
            accent: Color::from_rgb8(200, 200, 200),
        });
        set_default_look_and_feel(Arc::clone(&inverted));
        assert_eq!(default_look_and_feel(), inverted);

        // Restore for other tests in this process.
        set_default_look_and_feel(Arc::new(LookAndFeel::default()));
    }
}
