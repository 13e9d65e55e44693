//! N1-5A CPU registers and ports.
//!
//! The machine's whole architectural state fits in a handful of bits:
//! - ACC: 1-bit accumulator, the only working register
//! - RAM: the single 1-bit data memory cell
//! - BANK: active instruction bank (0-4)
//! - PC: program counter within the active bank (0-7)
//! - IN 0-6: input switch levels, owned by the external controller
//! - OUT 0-1: output lamp levels, written only by STORE

use crate::cpu::memory::{LINES_PER_BANK, NUM_BANKS};
use crate::logic::Bit;
use serde::{Deserialize, Serialize};

/// Number of input switches.
pub const NUM_INPUTS: usize = 7;

/// Number of output lamps.
pub const NUM_OUTPUTS: usize = 2;

/// The N1-5A register file.
///
/// `bank` and `pc` are always valid instruction addresses between
/// cycles; the jump helpers below keep that invariant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registers {
    /// ACC: the 1-bit accumulator.
    pub acc: Bit,

    /// RAM: the single 1-bit data memory cell.
    pub ram: Bit,

    /// Active instruction bank (0-4).
    pub bank: u8,

    /// Program counter within the active bank (0-7).
    pub pc: u8,

    /// Input switch levels, settable by the controller at any time.
    pub inputs: [Bit; NUM_INPUTS],

    /// Output lamp levels, written only by STORE.
    pub outputs: [Bit; NUM_OUTPUTS],
}

impl Registers {
    /// Create a register file with all values zeroed.
    pub fn new() -> Self {
        Self {
            acc: Bit::O,
            ram: Bit::O,
            bank: 0,
            pc: 0,
            inputs: [Bit::O; NUM_INPUTS],
            outputs: [Bit::O; NUM_OUTPUTS],
        }
    }

    /// Reset every register except the input levels.
    ///
    /// Inputs are physical switch positions owned by the controller;
    /// a reset does not move them.
    pub fn reset(&mut self) {
        self.acc = Bit::O;
        self.ram = Bit::O;
        self.bank = 0;
        self.pc = 0;
        self.outputs = [Bit::O; NUM_OUTPUTS];
    }

    /// Set an input switch level. Indices outside 0-6 are ignored.
    pub fn set_input(&mut self, index: usize, value: bool) {
        if index < NUM_INPUTS {
            self.inputs[index] = Bit::from_bool(value);
        }
    }

    /// The universal program counter update, applied after every
    /// instruction: advance one line, wrapping within the bank.
    pub fn advance_pc(&mut self) {
        self.pc = (self.pc + 1) % LINES_PER_BANK as u8;
    }

    /// Park the counter one line before `line` so that the universal
    /// [`advance_pc`](Self::advance_pc) lands exactly on it.
    ///
    /// JUMP and the STORE bank switch both encode their targets this
    /// way instead of bypassing the universal update.
    pub fn stage_jump(&mut self, line: u8) {
        debug_assert!((line as usize) < LINES_PER_BANK);
        self.pc = (line + LINES_PER_BANK as u8 - 1) % LINES_PER_BANK as u8;
    }

    /// Switch to `bank` and stage line 0 as the next fetch address.
    pub fn switch_bank(&mut self, bank: u8) {
        debug_assert!((bank as usize) < NUM_BANKS);
        self.bank = bank;
        self.stage_jump(0);
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}
