//! WebAssembly bindings for the N1-5A emulator.
//!
//! This module provides JavaScript-friendly wrappers around the core
//! machine. The host page plays the external controller: it owns the
//! tick counter cadence, the input switches and the power toggle.

use crate::prog::{listing, load};
use crate::{Banks, Machine};
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// WebAssembly-friendly machine wrapper.
#[wasm_bindgen]
pub struct WasmMachine {
    machine: Machine,
    tick: u64,
}

#[wasm_bindgen]
impl WasmMachine {
    /// Create a new powered-off machine.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            machine: Machine::new(),
            tick: 0,
        }
    }

    /// Power on with a program. Returns the number of bad words
    /// skipped by the loader.
    #[wasm_bindgen]
    pub fn power_on(&mut self, source: &str) -> usize {
        self.tick = 0;
        self.machine.power_on(source).len()
    }

    /// Power off. Registers keep their values.
    #[wasm_bindgen]
    pub fn power_off(&mut self) {
        self.machine.power_off();
    }

    /// Set an input switch level (index 0-6).
    #[wasm_bindgen]
    pub fn set_input(&mut self, index: usize, value: bool) {
        self.machine.set_input(index, value);
    }

    /// Execute one cycle. Returns the trace line, or `None` while
    /// powered off.
    #[wasm_bindgen]
    pub fn step(&mut self) -> Option<String> {
        match self.machine.step(self.tick) {
            Ok(entry) => {
                self.tick += 1;
                Some(entry.to_string())
            }
            Err(_) => None,
        }
    }

    /// Check if the power is on.
    #[wasm_bindgen]
    pub fn is_on(&self) -> bool {
        self.machine.is_on()
    }

    /// Ticks executed since power-on.
    #[wasm_bindgen]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Accumulator level (0 or 1).
    #[wasm_bindgen]
    pub fn acc(&self) -> u8 {
        self.machine.regs.acc.to_u8()
    }

    /// RAM cell level (0 or 1).
    #[wasm_bindgen]
    pub fn ram(&self) -> u8 {
        self.machine.regs.ram.to_u8()
    }

    /// Active bank (0-4).
    #[wasm_bindgen]
    pub fn bank(&self) -> u8 {
        self.machine.regs.bank
    }

    /// Program counter (0-7).
    #[wasm_bindgen]
    pub fn pc(&self) -> u8 {
        self.machine.regs.pc
    }

    /// Output lamp level (0 or 1); out-of-range indices read 0.
    #[wasm_bindgen]
    pub fn output(&self, index: usize) -> u8 {
        self.machine
            .regs
            .outputs
            .get(index)
            .map_or(0, |bit| bit.to_u8())
    }

    /// Input switch level (0 or 1); out-of-range indices read 0.
    #[wasm_bindgen]
    pub fn input(&self, index: usize) -> u8 {
        self.machine
            .regs
            .inputs
            .get(index)
            .map_or(0, |bit| bit.to_u8())
    }

    /// Recent trace, newest first, one record per line.
    #[wasm_bindgen]
    pub fn recent_log(&self) -> String {
        self.machine
            .trace
            .recent()
            .map(|record| record.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Full history rendering for log export.
    #[wasm_bindgen]
    pub fn export_trace(&self) -> String {
        self.machine.export_trace()
    }

    /// Architectural state as JSON.
    #[wasm_bindgen]
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.machine.snapshot()).unwrap_or_default()
    }
}

impl Default for WasmMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse program text and return its annotated listing.
#[wasm_bindgen]
pub fn wasm_listing(source: &str) -> String {
    let mut banks = Banks::new();
    let _ = load(&mut banks, source);
    listing(&banks)
}
