//! Execution trace and history.
//!
//! Every completed cycle is recorded twice: once in an unbounded full
//! history kept for export, and once in a bounded recent view kept
//! light for display. The two containers have distinct retention
//! policies and are never conflated.

use crate::cpu::decode::Opcode;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Entries retained by the bounded display view.
pub const RECENT_LIMIT: usize = 20;

/// The immutable record of one completed cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// Tick index supplied by the external scheduler.
    pub tick: u64,
    /// Bank the instruction was fetched from (pre-execution).
    pub bank: u8,
    /// Line the instruction was fetched from (pre-execution).
    pub line: u8,
    /// Decoded opcode.
    pub opcode: Opcode,
    /// Decoded operand field.
    pub operand: u8,
    /// Human-readable effect description.
    pub effect: String,
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Tick {:05}] B{} L{}: {}",
            self.tick, self.bank, self.line, self.effect
        )
    }
}

/// One line of the trace: either the system-ready sentinel or a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraceRecord {
    /// Sentinel seeded by reset, before any cycle has run.
    Ready,
    /// A completed cycle.
    Cycle(TraceEntry),
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceRecord::Ready => write!(f, "--- SYSTEM READY (POWER OFF) ---"),
            TraceRecord::Cycle(entry) => entry.fmt(f),
        }
    }
}

/// Append-only execution log with a bounded recent-view projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    /// Full history, unbounded, oldest first.
    full: Vec<TraceRecord>,
    /// Recent view, newest first, at most [`RECENT_LIMIT`] records.
    recent: VecDeque<TraceRecord>,
}

impl Trace {
    /// Create a trace holding only the system-ready sentinel.
    pub fn new() -> Self {
        Self {
            full: vec![TraceRecord::Ready],
            recent: VecDeque::from([TraceRecord::Ready]),
        }
    }

    /// Drop all records and reseed the sentinel.
    pub fn reset(&mut self) {
        self.full.clear();
        self.full.push(TraceRecord::Ready);
        self.recent.clear();
        self.recent.push_front(TraceRecord::Ready);
    }

    /// Record a completed cycle in both containers.
    pub fn append(&mut self, entry: TraceEntry) {
        let record = TraceRecord::Cycle(entry);
        self.full.push(record.clone());

        self.recent.push_front(record);
        if self.recent.len() > RECENT_LIMIT {
            let _ = self.recent.pop_back();
        }
    }

    /// The full history, oldest first.
    pub fn full(&self) -> &[TraceRecord] {
        &self.full
    }

    /// The bounded recent view, newest first.
    pub fn recent(&self) -> impl Iterator<Item = &TraceRecord> {
        self.recent.iter()
    }

    /// Render the full history, one record per line, with a trailing
    /// newline.
    pub fn export(&self) -> String {
        let mut out = String::new();
        for record in &self.full {
            out.push_str(&record.to_string());
            out.push('\n');
        }
        out
    }
}

impl Default for Trace {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(tick: u64) -> TraceEntry {
        TraceEntry {
            tick,
            bank: 0,
            line: (tick % 8) as u8,
            opcode: Opcode::Nor,
            operand: 0,
            effect: "NOR  (NOT 0) -> ACC:1".to_string(),
        }
    }

    #[test]
    fn test_starts_with_sentinel() {
        let trace = Trace::new();
        assert_eq!(trace.full(), &[TraceRecord::Ready]);
        assert_eq!(trace.recent().count(), 1);
    }

    #[test]
    fn test_append_grows_full_history() {
        let mut trace = Trace::new();
        for t in 0..100 {
            trace.append(entry(t));
        }
        // Sentinel plus every cycle
        assert_eq!(trace.full().len(), 101);
    }

    #[test]
    fn test_recent_view_bounded_newest_first() {
        let mut trace = Trace::new();
        for t in 0..30 {
            trace.append(entry(t));
        }

        let recent: Vec<_> = trace.recent().collect();
        assert_eq!(recent.len(), RECENT_LIMIT);
        match recent[0] {
            TraceRecord::Cycle(e) => assert_eq!(e.tick, 29),
            other => panic!("expected newest cycle first, got {:?}", other),
        }
        match recent[RECENT_LIMIT - 1] {
            TraceRecord::Cycle(e) => assert_eq!(e.tick, 10),
            other => panic!("expected oldest retained cycle last, got {:?}", other),
        }
    }

    #[test]
    fn test_export_format() {
        let mut trace = Trace::new();
        trace.append(entry(0));

        let text = trace.export();
        assert!(text.starts_with("--- SYSTEM READY (POWER OFF) ---\n"));
        assert!(text.contains("[Tick 00000] B0 L0: "));
        assert!(text.ends_with('\n'));
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_reset_reseeds_sentinel() {
        let mut trace = Trace::new();
        for t in 0..5 {
            trace.append(entry(t));
        }

        trace.reset();
        assert_eq!(trace.full(), &[TraceRecord::Ready]);
        assert_eq!(trace.recent().count(), 1);
    }

    #[test]
    fn test_entry_display_padding() {
        let e = TraceEntry {
            tick: 7,
            bank: 2,
            line: 5,
            opcode: Opcode::Load,
            operand: 0,
            effect: "LOAD IN_0 -> ACC:1".into(),
        };
        assert_eq!(e.to_string(), "[Tick 00007] B2 L5: LOAD IN_0 -> ACC:1");
    }
}
