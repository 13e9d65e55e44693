//! The N1-5A execution engine.
//!
//! Implements the power state machine and the fetch-decode-execute
//! cycle. The machine is an explicitly owned value: all mutation goes
//! through `&mut self`, so a single owner (or a mutex around one)
//! serializes input writes against cycles. [`Machine::step`] never
//! blocks and never fails; when the power is off it returns the
//! [`PoweredOff`] signal instead of executing.
//!
//! Stepping cadence is entirely the caller's business. The engine
//! exposes no timer, sleep, or loop; the `tick` passed to `step` is an
//! opaque index used only for the trace.

use crate::cpu::decode::{decode, Opcode};
use crate::cpu::memory::Banks;
use crate::cpu::registers::{Registers, NUM_INPUTS, NUM_OUTPUTS};
use crate::cpu::trace::{Trace, TraceEntry};
use crate::logic::Bit;
use crate::prog::{self, LoadDiagnostic};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Power state of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Power {
    /// No cycle executes; registers hold their last values.
    Off,
    /// Cycles execute on every `step` call.
    On,
}

/// Signal returned by [`Machine::step`] while the power is off.
///
/// Not a fault: stepping an unpowered machine is a defined outcome
/// that mutates nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("power is off")]
pub struct PoweredOff;

/// Read-only view of the architectural state, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub acc: Bit,
    pub ram: Bit,
    pub bank: u8,
    pub pc: u8,
    pub inputs: [Bit; NUM_INPUTS],
    pub outputs: [Bit; NUM_OUTPUTS],
    pub running: bool,
}

/// The N1-5A machine: registers, instruction banks, trace, and power.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Machine {
    /// CPU registers and ports.
    pub regs: Registers,
    /// Instruction memory.
    pub banks: Banks,
    /// Execution history.
    pub trace: Trace,
    power: Power,
}

impl Machine {
    /// Create a powered-off machine with zeroed state.
    pub fn new() -> Self {
        Self {
            regs: Registers::new(),
            banks: Banks::new(),
            trace: Trace::new(),
            power: Power::Off,
        }
    }

    /// Returns true if the power is on.
    pub fn is_on(&self) -> bool {
        self.power == Power::On
    }

    /// Zero every register except the input levels and reseed the
    /// trace sentinel. Instruction memory is left alone; the loader
    /// clears it on the next load.
    pub fn reset(&mut self) {
        self.regs.reset();
        self.trace.reset();
    }

    /// Load program text into instruction memory.
    ///
    /// Always succeeds; malformed words come back as diagnostics and
    /// leave their cells cleared. Usable while powered off to preview
    /// a program without booting.
    pub fn load_program(&mut self, text: &str) -> Vec<LoadDiagnostic> {
        prog::load(&mut self.banks, text)
    }

    /// Power on: reset, load `program`, start executing.
    ///
    /// Does nothing (and reports no diagnostics) if already on.
    pub fn power_on(&mut self, program: &str) -> Vec<LoadDiagnostic> {
        if self.is_on() {
            return Vec::new();
        }

        self.reset();
        let diagnostics = self.load_program(program);
        self.power = Power::On;
        diagnostics
    }

    /// Power off before the next cycle. Registers keep their values.
    pub fn power_off(&mut self) {
        self.power = Power::Off;
    }

    /// Set an input switch level. Takes effect at the start of the
    /// next cycle; indices outside 0-6 are ignored.
    pub fn set_input(&mut self, index: usize, value: bool) {
        self.regs.set_input(index, value);
    }

    /// Read-only view of the architectural state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            acc: self.regs.acc,
            ram: self.regs.ram,
            bank: self.regs.bank,
            pc: self.regs.pc,
            inputs: self.regs.inputs,
            outputs: self.regs.outputs,
            running: self.is_on(),
        }
    }

    /// Render the full execution history, one line per record.
    pub fn export_trace(&self) -> String {
        self.trace.export()
    }

    /// Execute one fetch-decode-execute cycle.
    ///
    /// The whole cycle is atomic: register writes and the trace append
    /// all happen before this call returns, and input changes are only
    /// observed at the next call.
    pub fn step(&mut self, tick: u64) -> Result<TraceEntry, PoweredOff> {
        if !self.is_on() {
            return Err(PoweredOff);
        }

        // Fetch address, recorded before execution moves it
        let exec_bank = self.regs.bank;
        let exec_line = self.regs.pc;

        let instr = decode(self.banks.read(exec_bank, exec_line));

        let effect = match instr.opcode {
            Opcode::Load => {
                let source = if instr.operand == 7 {
                    self.regs.acc = self.regs.ram;
                    "RAM".to_string()
                } else {
                    self.regs.acc = self.regs.inputs[instr.operand as usize];
                    format!("IN_{}", instr.operand)
                };
                format!("LOAD {} -> ACC:{}", source, self.regs.acc)
            }

            Opcode::Nor => {
                // NOR against a constant 0: the operand bits are never read
                let prev = self.regs.acc;
                self.regs.acc = prev.nor(Bit::O);
                format!("NOR  (NOT {}) -> ACC:{}", prev, self.regs.acc)
            }

            Opcode::Store => match instr.operand {
                0 => {
                    self.regs.outputs[0] = self.regs.acc;
                    format!("STORE OUT0 -> {}", self.regs.acc)
                }
                1 => {
                    self.regs.outputs[1] = self.regs.acc;
                    format!("STORE OUT1 -> {}", self.regs.acc)
                }
                7 => {
                    self.regs.ram = self.regs.acc;
                    format!("STORE RAM <- {}", self.regs.acc)
                }
                2..=6 => {
                    let target = instr.operand - 2;
                    self.regs.switch_bank(target);
                    format!("STORE BANK -> Switch to Bank {}", target)
                }
                // Operand is a 3-bit field; 0-7 is fully covered above
                _ => unreachable!(),
            },

            Opcode::Jump => {
                if self.regs.acc == Bit::O {
                    self.regs.stage_jump(instr.operand);
                    format!("JUMP to #{}{} (ACC=0)", self.regs.bank, instr.operand)
                } else {
                    "JUMP Skip (ACC=1)".to_string()
                }
            }
        };

        // Universal PC update; staged jump targets land here
        self.regs.advance_pc();

        let entry = TraceEntry {
            tick,
            bank: exec_bank,
            line: exec_line,
            opcode: instr.opcode,
            operand: instr.operand,
            effect,
        };
        self.trace.append(entry.clone());

        Ok(entry)
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::trace::TraceRecord;

    fn powered(program: &str) -> Machine {
        let mut machine = Machine::new();
        let diagnostics = machine.power_on(program);
        assert!(diagnostics.is_empty(), "unexpected diagnostics: {:?}", diagnostics);
        machine
    }

    #[test]
    fn test_step_while_off_is_a_signal() {
        let mut machine = Machine::new();
        machine.load_program("#00: 01000");
        let before = machine.snapshot();

        assert_eq!(machine.step(0), Err(PoweredOff));

        assert_eq!(machine.snapshot(), before);
        assert_eq!(machine.trace.full().len(), 1);
    }

    #[test]
    fn test_load_from_input() {
        let mut machine = powered("#00: 00000");
        machine.set_input(0, true);

        let entry = machine.step(0).unwrap();

        assert_eq!(machine.regs.acc, Bit::I);
        assert_eq!(
            entry.to_string(),
            "[Tick 00000] B0 L0: LOAD IN_0 -> ACC:1"
        );
    }

    #[test]
    fn test_load_from_ram() {
        let mut machine = powered("#00: 00_111");
        machine.regs.ram = Bit::I;

        machine.step(0).unwrap();
        assert_eq!(machine.regs.acc, Bit::I);
    }

    #[test]
    fn test_input_visible_next_step() {
        let mut machine = powered("#00: 00_011\n#01: 00_011");
        machine.step(0).unwrap();
        assert_eq!(machine.regs.acc, Bit::O);

        machine.set_input(3, true);
        machine.step(1).unwrap();
        assert_eq!(machine.regs.acc, Bit::I);
    }

    #[test]
    fn test_nor_negates_regardless_of_operand() {
        for operand in 0..8u8 {
            let program = format!("#00: 01_{:03b}\n#01: 01_{:03b}", operand, operand);
            let mut machine = powered(&program);

            machine.step(0).unwrap();
            assert_eq!(machine.regs.acc, Bit::I);
            machine.step(1).unwrap();
            assert_eq!(machine.regs.acc, Bit::O);
        }
    }

    #[test]
    fn test_store_outputs_and_ram() {
        // NOR raises ACC, then store to OUT0, OUT1 and RAM
        let mut machine = powered("#00: 01000\n#01: 10_000\n#02: 10_001\n#03: 10_111");

        for tick in 0..4 {
            machine.step(tick).unwrap();
        }

        assert_eq!(machine.regs.outputs, [Bit::I, Bit::I]);
        assert_eq!(machine.regs.ram, Bit::I);
    }

    #[test]
    fn test_bank_switch_lands_on_line_zero() {
        // Engine reaches line 2, where operand 3 switches to bank 1
        let mut machine = powered("#02: 10_011");

        machine.step(0).unwrap();
        machine.step(1).unwrap();
        let entry = machine.step(2).unwrap();

        assert_eq!(entry.bank, 0, "trace records the pre-switch bank");
        assert_eq!(entry.line, 2);
        assert_eq!(machine.regs.bank, 1);
        assert_eq!(machine.regs.pc, 0);
    }

    #[test]
    fn test_bank_switch_next_fetch() {
        // Bank 1 line 0 raises ACC after the switch from bank 0
        let mut machine = powered("#00: 10_011\n#10: 01_000");

        machine.step(0).unwrap();
        machine.step(1).unwrap();

        assert_eq!(machine.regs.acc, Bit::I);
        assert_eq!(machine.regs.bank, 1);
        assert_eq!(machine.regs.pc, 1);
    }

    #[test]
    fn test_jump_taken_when_acc_zero() {
        let mut machine = powered("#05: 11_000");

        for tick in 0..6 {
            machine.step(tick).unwrap();
        }

        assert_eq!(machine.regs.bank, 0);
        assert_eq!(machine.regs.pc, 0);
    }

    #[test]
    fn test_jump_skipped_when_acc_one() {
        // Raise ACC first, then hit the jump at line 1
        let mut machine = powered("#00: 01_000\n#01: 11_101");

        machine.step(0).unwrap();
        let entry = machine.step(1).unwrap();

        assert_eq!(entry.effect, "JUMP Skip (ACC=1)");
        assert_eq!(machine.regs.pc, 2);
    }

    #[test]
    fn test_pc_wraps_after_full_bank() {
        let mut machine = powered("");

        for tick in 0..8 {
            machine.step(tick).unwrap();
            assert!(machine.regs.pc < 8);
        }
        assert_eq!(machine.regs.pc, 0);
    }

    #[test]
    fn test_power_off_retains_registers() {
        let mut machine = powered("#00: 01000");
        machine.step(0).unwrap();
        assert_eq!(machine.regs.acc, Bit::I);

        machine.power_off();

        assert_eq!(machine.step(1), Err(PoweredOff));
        assert_eq!(machine.regs.acc, Bit::I);
        assert_eq!(machine.regs.pc, 1);
    }

    #[test]
    fn test_power_on_clears_previous_program() {
        let mut machine = powered("#00: 11111\n#17: 10101");
        machine.step(0).unwrap();
        machine.power_off();

        // Booting with program B leaves no residue of program A
        let diagnostics = machine.power_on("#00: 01000");
        assert!(diagnostics.is_empty());

        assert!(machine.banks.read(1, 7).is_zero());
        assert_eq!(machine.banks.read(0, 0).bits(), 0b01000);
        assert_eq!(machine.trace.full(), &[TraceRecord::Ready]);
        assert_eq!(machine.regs.pc, 0);
    }

    #[test]
    fn test_power_on_while_on_is_a_no_op() {
        let mut machine = powered("#00: 01000");
        machine.step(0).unwrap();

        let diagnostics = machine.power_on("#00: 11111");

        assert!(diagnostics.is_empty());
        assert_eq!(machine.banks.read(0, 0).bits(), 0b01000);
        assert_eq!(machine.regs.pc, 1);
    }

    #[test]
    fn test_power_on_reports_diagnostics() {
        let mut machine = Machine::new();
        let diagnostics = machine.power_on("#00: ___\n#01: 01000");

        assert_eq!(diagnostics.len(), 1);
        assert!(machine.banks.read(0, 0).is_zero());
        assert_eq!(machine.banks.read(0, 1).bits(), 0b01000);
    }

    #[test]
    fn test_trace_accumulates_per_step() {
        let mut machine = powered("#00: 01000");
        machine.step(0).unwrap();
        machine.step(1).unwrap();

        // Sentinel plus two cycles
        assert_eq!(machine.trace.full().len(), 3);
        let export = machine.export_trace();
        assert!(export.ends_with('\n'));
        assert_eq!(export.lines().count(), 3);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut machine = powered("#00: 01000\n#01: 10_000");
        machine.set_input(4, true);
        machine.step(0).unwrap();
        machine.step(1).unwrap();

        let snap = machine.snapshot();
        assert!(snap.running);
        assert_eq!(snap.acc, Bit::I);
        assert_eq!(snap.outputs[0], Bit::I);
        assert_eq!(snap.inputs[4], Bit::I);
        assert_eq!(snap.pc, 2);
        assert_eq!(snap.bank, 0);
    }
}
