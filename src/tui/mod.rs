//! TUI front panel for the N1-5A emulator.
//!
//! The panel plays the external controller: it owns the power switch,
//! the input toggles, the pacing clock and the log export. The machine
//! itself stays a passive value stepped from the panel's event loop.

mod app;
mod ui;

pub use app::{run_panel, PanelApp};
