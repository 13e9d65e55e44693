//! Program loader: textual machine code → instruction memory.
//!
//! Syntax, one instruction per line:
//! ```text
//! #00: 00_000 ; LOAD IN_0
//! #13: 11_110 ; JUMP 6 when ACC=0
//! ```
//! A line is scanned for `#<bank-digit><line-digit>:` followed by a run
//! of binary digits, underscores allowed as separators. Anything after
//! the digit run (comments) is ignored, as is any line with no match.
//! Loading always clears all banks first, so a load is idempotent and
//! leaves no residue of the previous program.

use crate::cpu::memory::Banks;
use crate::logic::Word5;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A malformed binary word found during a load.
///
/// Non-fatal: the load continues and the addressed cell keeps its
/// cleared (zero) value.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("invalid binary word at #{bank}{line}: '{token}'")]
pub struct LoadDiagnostic {
    /// Bank digit of the offending line.
    pub bank: u8,
    /// Line digit of the offending line.
    pub line: u8,
    /// The digit run after underscore stripping.
    pub token: String,
}

/// One pattern match within a source line.
struct ScanMatch<'a> {
    bank: u8,
    line: u8,
    bits: &'a str,
}

/// Find the first `#<digit><digit>: <bits>` pattern in a line.
///
/// Mirrors a leftmost regex search: every `#` position is tried in
/// order and the first complete match wins, whatever its digits say.
/// Range checking is the loader's job, not the scanner's.
fn scan_line(line: &str) -> Option<ScanMatch<'_>> {
    let bytes = line.as_bytes();

    for start in 0..bytes.len() {
        if bytes[start] != b'#' {
            continue;
        }

        let rest = &bytes[start + 1..];
        if rest.len() < 3 {
            continue;
        }
        if !rest[0].is_ascii_digit() || !rest[1].is_ascii_digit() || rest[2] != b':' {
            continue;
        }

        let mut i = start + 4;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        let bits_start = i;
        while i < bytes.len() && matches!(bytes[i], b'0' | b'1' | b'_') {
            i += 1;
        }
        if i == bits_start {
            // No digit run after the colon; keep scanning
            continue;
        }

        return Some(ScanMatch {
            bank: rest[0] - b'0',
            line: rest[1] - b'0',
            bits: &line[bits_start..i],
        });
    }

    None
}

/// Load program text into `banks`.
///
/// Always succeeds. All banks are cleared first; each matched in-range
/// line overwrites its cell. Out-of-range addresses are silently
/// skipped (not addressed to this machine); malformed binary words are
/// reported as diagnostics and leave their cells cleared.
pub fn load(banks: &mut Banks, text: &str) -> Vec<LoadDiagnostic> {
    banks.clear();

    let mut diagnostics = Vec::new();

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let Some(m) = scan_line(line) else {
            continue;
        };
        if !Banks::in_range(m.bank, m.line) {
            continue;
        }

        match Word5::parse(m.bits) {
            Ok(word) => banks.write(m.bank, m.line, word),
            Err(_) => diagnostics.push(LoadDiagnostic {
                bank: m.bank,
                line: m.line,
                token: m.bits.chars().filter(|&c| c != '_').collect(),
            }),
        }
    }

    diagnostics
}
