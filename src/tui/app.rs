//! Front panel application state and logic.

use crate::Machine;

/// Default log export path, next to the working directory.
const LOG_PATH: &str = "n1-5a_log.txt";

/// Front panel state: the machine plus everything the controller owns.
pub struct PanelApp {
    /// The machine being driven.
    pub machine: Machine,
    /// Program text loaded at every power-on.
    pub source: String,
    /// Tick counter, reset at power-on.
    pub tick: u64,
    /// Clock rate in Hz while powered on.
    pub clock_hz: u64,
    /// Status message to display.
    pub status: String,
    /// Should we quit?
    pub should_quit: bool,
}

impl PanelApp {
    /// Create a panel around a powered-off machine.
    pub fn new(source: String, clock_hz: u64) -> Self {
        Self {
            machine: Machine::new(),
            source,
            tick: 0,
            clock_hz,
            status: "Ready. Press 'p' for power, '0'-'6' for inputs, 'q' to quit.".into(),
            should_quit: false,
        }
    }

    /// Flip the power switch.
    pub fn toggle_power(&mut self) {
        if self.machine.is_on() {
            self.machine.power_off();
            self.status = "System Shutdown.".into();
        } else {
            self.tick = 0;
            let diagnostics = self.machine.power_on(&self.source);
            self.status = if diagnostics.is_empty() {
                "System Booting...".into()
            } else {
                format!("System Booting... ({} bad word(s) skipped)", diagnostics.len())
            };
        }
    }

    /// Flip one input switch.
    pub fn toggle_input(&mut self, index: usize) {
        let level = self.machine.regs.inputs.get(index).copied();
        if let Some(level) = level {
            self.machine.set_input(index, !level.to_bool());
        }
    }

    /// Execute one cycle if powered on.
    pub fn tick_once(&mut self) {
        if let Ok(entry) = self.machine.step(self.tick) {
            self.tick += 1;
            self.status = entry.to_string();
        }
    }

    /// Append the full history to the log file.
    pub fn export_log(&mut self) {
        use std::io::Write;

        let result = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(LOG_PATH)
            .and_then(|mut file| file.write_all(self.machine.export_trace().as_bytes()));

        self.status = match result {
            Ok(()) => format!("Log appended to {}", LOG_PATH),
            Err(e) => format!("Log export failed: {}", e),
        };
    }
}

/// Run the front panel with a program.
pub fn run_panel(source: String, clock_hz: u64) -> std::io::Result<()> {
    use crossterm::{
        event::{self, Event, KeyCode, KeyEventKind},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    };
    use ratatui::prelude::*;
    use std::io::stdout;
    use std::time::{Duration, Instant};

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    // Create app
    let mut app = PanelApp::new(source, clock_hz);
    let period = Duration::from_millis(1000 / clock_hz.max(1));
    let mut last_tick = Instant::now();

    // Main loop
    loop {
        // Draw
        terminal.draw(|frame| {
            super::ui::draw(frame, &app);
        })?;

        // Handle input
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') => app.should_quit = true,
                        KeyCode::Char('p') => app.toggle_power(),
                        KeyCode::Char('s') => app.tick_once(),
                        KeyCode::Char('e') => app.export_log(),
                        KeyCode::Char(c @ '0'..='6') => {
                            app.toggle_input(c as usize - '0' as usize);
                        }
                        _ => {}
                    }
                }
            }
        }

        // Pacing: one cycle per clock period while powered on
        if app.machine.is_on() && last_tick.elapsed() >= period {
            app.tick_once();
            last_tick = Instant::now();
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    Ok(())
}
