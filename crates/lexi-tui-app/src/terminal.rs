// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::{Frame, Terminal};
use tracing::warn;

pub trait TuiApp {
	fn render(&mut self, frame: &mut Frame);
	fn on_key(&mut self, key: KeyEvent);
	/// Called once per loop iteration, after any key.
	fn on_tick(&mut self);
	fn should_quit(&self) -> bool;
}

/// Raw mode and the alternate screen for as long as it lives.
struct ScreenGuard;

impl ScreenGuard {
	fn enter() -> io::Result<Self> {
		enable_raw_mode()?;
		if let Err(err) = io::stdout().execute(EnterAlternateScreen) {
			let _ = disable_raw_mode();
			return Err(err);
		}
		Ok(Self)
	}
}

impl Drop for ScreenGuard {
	fn drop(&mut self) {
		if let Err(err) = disable_raw_mode() {
			warn!(error = %err, "failed to leave raw mode");
		}
		if let Err(err) = io::stdout().execute(LeaveAlternateScreen) {
			warn!(error = %err, "failed to leave alternate screen");
		}
	}
}

/// Runs `app` in the alternate screen until it asks to quit. Only key
/// presses are forwarded; repeats and releases are dropped.
pub fn run_tui_app<A: TuiApp>(mut app: A, tick_rate: Duration) -> anyhow::Result<()> {
	let _guard = ScreenGuard::enter()?;
	let mut terminal: Terminal<CrosstermBackend<Stdout>> = Terminal::new(CrosstermBackend::new(io::stdout()))?;
	terminal.clear()?;

	while !app.should_quit() {
		terminal.draw(|frame| app.render(frame))?;

		if event::poll(tick_rate)? {
			if let Event::Key(key) = event::read()? {
				if key.kind == KeyEventKind::Press {
					app.on_key(key);
				}
			}
		}

		app.on_tick();
	}

	Ok(())
}
