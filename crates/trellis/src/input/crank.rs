//! Crank state and events.
//!
//! The rotary dial reports an absolute angle plus the change since the
//! last poll, and whether it is docked against the console body. A docked
//! crank produces no rotation.

/// Result of one crank poll.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CrankSnapshot {
    /// Absolute crank angle in degrees, `[0, 360)`.
    pub angle: f32,
    /// Signed change in degrees since the previous poll.
    pub change: f32,
    /// Whether the crank is docked.
    pub docked: bool,
}

impl CrankSnapshot {
    /// A docked, motionless crank.
    pub const DOCKED: Self = Self {
        angle: 0.0,
        change: 0.0,
        docked: true,
    };

    /// Whether this poll saw any rotation.
    #[inline]
    pub fn moved(&self) -> bool {
        self.change != 0.0
    }
}

/// A crank rotation notification delivered to the active context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrankEvent {
    /// Absolute angle in degrees at poll time.
    pub angle: f32,
    /// Signed change in degrees since the previous poll.
    pub change: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docked_snapshot_is_motionless() {
        assert!(!CrankSnapshot::DOCKED.moved());
        assert!(CrankSnapshot::DOCKED.docked);
    }

    #[test]
    fn test_moved() {
        let snapshot = CrankSnapshot {
            angle: 90.0,
            change: -12.5,
            docked: false,
        };
        assert!(snapshot.moved());
    }
}
