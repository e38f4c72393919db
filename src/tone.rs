//! Buzzer notes, fixed tone sequences and the ring repeat counter.

use crate::host::Host;
use crate::types::Pitch;

/// Buzzer notes used by the faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Note {
    /// Silence.
    Rest,
    B6,
    C7,
    C8,
    A8,
}

impl Note {
    /// Frequency in Hz, `0` for a rest.
    pub fn frequency_hz(self) -> u16 {
        match self {
            Note::Rest => 0,
            Note::B6 => 1976,
            Note::C7 => 2093,
            Note::C8 => 4186,
            Note::A8 => 7040,
        }
    }
}

impl From<Pitch> for Note {
    fn from(pitch: Pitch) -> Self {
        match pitch {
            Pitch::Low => Note::B6,
            Pitch::Medium => Note::C8,
            Pitch::High => Note::A8,
        }
    }
}

/// A single note with its duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ToneStep {
    pub note: Note,
    pub duration_ms: u16,
}

impl ToneStep {
    /// Creates a tone step.
    #[inline]
    pub const fn new(note: Note, duration_ms: u16) -> Self {
        Self { note, duration_ms }
    }
}

/// One round of the timer's ring signal: three short chirps and a longer one.
pub static RING_SEQUENCE: [ToneStep; 8] = [
    ToneStep::new(Note::C8, 47),
    ToneStep::new(Note::Rest, 47),
    ToneStep::new(Note::C8, 47),
    ToneStep::new(Note::Rest, 47),
    ToneStep::new(Note::C8, 47),
    ToneStep::new(Note::Rest, 47),
    ToneStep::new(Note::C8, 78),
    ToneStep::new(Note::Rest, 391),
];

/// Chirp played when a timer is started by hand.
pub static START_SEQUENCE: [ToneStep; 1] = [ToneStep::new(Note::C8, 31)];

/// Repetitions of the ring signal after the first one.
pub const RING_REPEATS: u8 = 4;

/// Plays the short double beep at `note`, blocking until done.
pub fn play_short_beep<H: Host>(host: &mut H, note: Note) {
    host.play_tone(note, 50);
    host.play_tone(Note::Rest, 50);
    host.play_tone(note, 70);
}

/// Counts pending repetitions of a background tone sequence.
///
/// Arming overwrites any count already in flight, so at most one sequence is
/// repeating at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignalCounter {
    pending: u8,
}

impl SignalCounter {
    /// Creates an idle counter.
    pub const fn new() -> Self {
        Self { pending: 0 }
    }

    /// Sets the number of repetitions still to play.
    pub fn arm(&mut self, repeats: u8) {
        self.pending = repeats;
    }

    /// Consumes one repetition. Returns true if the sequence should play again.
    pub fn advance(&mut self) -> bool {
        if self.pending > 0 {
            self.pending -= 1;
            true
        } else {
            false
        }
    }

    /// Drops all pending repetitions. Returns true if any were pending.
    pub fn acknowledge(&mut self) -> bool {
        let was_pending = self.pending > 0;
        self.pending = 0;
        was_pending
    }

    /// Repetitions still to play.
    pub fn pending(&self) -> u8 {
        self.pending
    }

    pub fn is_pending(&self) -> bool {
        self.pending > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_advances_exactly_armed_times() {
        let mut counter = SignalCounter::new();
        counter.arm(RING_REPEATS);
        let mut plays = 0;
        while counter.advance() {
            plays += 1;
        }
        assert_eq!(plays, RING_REPEATS);
        assert!(!counter.is_pending());
    }

    #[test]
    fn acknowledge_clears_pending() {
        let mut counter = SignalCounter::new();
        assert!(!counter.acknowledge());

        counter.arm(3);
        assert!(counter.acknowledge());
        assert_eq!(counter.pending(), 0);
        assert!(!counter.advance());
    }

    #[test]
    fn rearming_overwrites_count() {
        let mut counter = SignalCounter::new();
        counter.arm(4);
        counter.advance();
        counter.arm(2);
        assert_eq!(counter.pending(), 2);
    }
}
