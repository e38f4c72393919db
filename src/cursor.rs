//! Edit cursor shared by the faces' settings modes.
//!
//! Tracks which field of an entry is selected, whether the selected field is
//! auto-incrementing (quick-cycle), and whether it is blanked on the current
//! blink frame. Also owns the tick rates each mode requests from the host.

use crate::host::Host;

/// Tick rate while a face is idle or running.
pub const BASE_TICK_HZ: u8 = 1;

/// Tick rate while editing, fast enough for a visible blink.
pub const EDIT_TICK_HZ: u8 = 4;

/// Tick rate while quick-cycling a field.
pub const QUICK_TICK_HZ: u8 = 8;

/// Field selection over `N` editable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EditCursor<const N: usize> {
    index: u8,
    quick_cycle: bool,
}

impl<const N: usize> EditCursor<N> {
    /// Number of fields.
    pub const FIELDS: u8 = N as u8;

    /// Creates a cursor on the first field.
    pub const fn new() -> Self {
        Self {
            index: 0,
            quick_cycle: false,
        }
    }

    /// Index of the selected field.
    #[inline]
    pub fn index(&self) -> u8 {
        self.index
    }

    /// Moves the cursor to `index`, which must be below `N`.
    pub fn set_index(&mut self, index: u8) {
        debug_assert!(index < Self::FIELDS);
        self.index = index % Self::FIELDS;
    }

    /// Returns to the first field and drops quick-cycle.
    pub fn reset(&mut self) {
        self.index = 0;
        self.quick_cycle = false;
    }

    /// Selects the next field.
    ///
    /// Returns false when the cursor wrapped past the last field, which ends
    /// the edit session. The index is then back on the first field.
    pub fn advance(&mut self) -> bool {
        self.index = (self.index + 1) % Self::FIELDS;
        self.index != 0
    }

    #[inline]
    pub fn is_quick_cycling(&self) -> bool {
        self.quick_cycle
    }

    /// Starts auto-incrementing the selected field at the elevated tick rate.
    pub fn start_quick_cycle<H: Host>(&mut self, host: &mut H) {
        debug!("quick-cycle start on field {}", self.index);
        self.quick_cycle = true;
        host.set_tick_rate(QUICK_TICK_HZ);
    }

    /// Stops quick-cycle and returns to the edit tick rate.
    ///
    /// Returns true if quick-cycle was active.
    pub fn stop_quick_cycle<H: Host>(&mut self, host: &mut H) -> bool {
        if !self.quick_cycle {
            return false;
        }
        debug!("quick-cycle stop on field {}", self.index);
        self.quick_cycle = false;
        host.set_tick_rate(EDIT_TICK_HZ);
        true
    }

    /// Drops quick-cycle without touching the tick rate.
    pub fn clear_quick_cycle(&mut self) {
        self.quick_cycle = false;
    }

    /// Whether the selected field is blanked on this blink frame.
    ///
    /// Fields blink on odd subseconds and stay solid while quick-cycling.
    pub fn is_field_hidden(&self, subsecond: u8) -> bool {
        subsecond % 2 == 1 && !self.quick_cycle
    }
}
