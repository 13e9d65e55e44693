//! N1-5A instruction memory.
//!
//! Program storage is Harvard-style: 5 banks of 8 five-bit words,
//! separate from the single RAM data bit. Only one bank is fetchable at
//! a time; the active bank is a CPU register, not a memory property.

use crate::logic::Word5;
use serde::{Deserialize, Serialize};

/// Number of instruction banks.
pub const NUM_BANKS: usize = 5;

/// Instruction words per bank.
pub const LINES_PER_BANK: usize = 8;

/// The full instruction store: 5 banks x 8 lines.
///
/// Mutated only by the program loader, never by execution.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banks {
    words: [[Word5; LINES_PER_BANK]; NUM_BANKS],
}

impl Banks {
    /// Create instruction memory with all words zeroed.
    pub fn new() -> Self {
        Self {
            words: [[Word5::zero(); LINES_PER_BANK]; NUM_BANKS],
        }
    }

    /// Returns true if `(bank, line)` addresses a real cell.
    pub fn in_range(bank: u8, line: u8) -> bool {
        (bank as usize) < NUM_BANKS && (line as usize) < LINES_PER_BANK
    }

    /// Read the word at `(bank, line)`.
    ///
    /// # Panics
    /// Panics if the address is out of range.
    #[inline]
    pub fn read(&self, bank: u8, line: u8) -> Word5 {
        assert!(
            Self::in_range(bank, line),
            "Instruction address B{} L{} out of range ({}x{})",
            bank,
            line,
            NUM_BANKS,
            LINES_PER_BANK
        );
        self.words[bank as usize][line as usize]
    }

    /// Write the word at `(bank, line)`.
    ///
    /// # Panics
    /// Panics if the address is out of range.
    #[inline]
    pub fn write(&mut self, bank: u8, line: u8, word: Word5) {
        assert!(
            Self::in_range(bank, line),
            "Instruction address B{} L{} out of range ({}x{})",
            bank,
            line,
            NUM_BANKS,
            LINES_PER_BANK
        );
        self.words[bank as usize][line as usize] = word;
    }

    /// Clear every word to zero.
    pub fn clear(&mut self) {
        self.words = [[Word5::zero(); LINES_PER_BANK]; NUM_BANKS];
    }
}

impl Default for Banks {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Banks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Only count non-zero words
        let non_zero = self
            .words
            .iter()
            .flatten()
            .filter(|w| !w.is_zero())
            .count();

        f.debug_struct("Banks")
            .field("non_zero_words", &non_zero)
            .field("total_words", &(NUM_BANKS * LINES_PER_BANK))
            .finish()
    }
}
