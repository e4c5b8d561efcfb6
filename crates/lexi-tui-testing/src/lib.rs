// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Renders widgets into a [`TestBackend`] and reads the cells back as text.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use lexi_tui_theme::Theme;
use ratatui::{backend::TestBackend, layout::Rect, Frame, Terminal};

/// A component that draws itself and reacts to key presses. Rendering takes
/// `&mut self` so stateful widgets can keep their scroll positions.
pub trait InteractiveComponent {
	fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);
	fn handle_key(&mut self, key: KeyEvent);
}

pub struct TestHarness {
	terminal: Terminal<TestBackend>,
	theme: Theme,
}

impl TestHarness {
	pub fn new(width: u16, height: u16) -> Self {
		let backend = TestBackend::new(width, height);
		let terminal = Terminal::new(backend).expect("failed to create terminal");
		Self {
			terminal,
			theme: Theme::default(),
		}
	}

	pub fn with_theme(mut self, theme: Theme) -> Self {
		self.theme = theme;
		self
	}

	pub fn theme(&self) -> &Theme {
		&self.theme
	}

	pub fn render<F>(&mut self, render_fn: F) -> &TestBackend
	where
		F: FnOnce(&mut Frame, Rect, &Theme),
	{
		let theme = &self.theme;
		self.terminal
			.draw(|frame| {
				let area = frame.area();
				render_fn(frame, area, theme);
			})
			.expect("failed to draw");
		self.terminal.backend()
	}

	/// Renders and compares the screen against the named snapshot file.
	pub fn assert_snapshot<F>(&mut self, name: &str, render_fn: F)
	where
		F: FnOnce(&mut Frame, Rect, &Theme),
	{
		self.render(render_fn);
		let output = self.screen();
		insta::assert_snapshot!(name, output);
	}

	pub fn buffer_lines(&self) -> Vec<String> {
		let buffer = self.terminal.backend().buffer();
		let area = buffer.area;

		(area.y..area.y + area.height)
			.map(|y| {
				(area.x..area.x + area.width)
					.map(|x| buffer[(x, y)].symbol())
					.collect::<String>()
			})
			.collect()
	}

	/// The whole screen, rows joined by newlines.
	pub fn screen(&self) -> String {
		self.buffer_lines().join("\n")
	}

	/// Row and byte column of the first occurrence of `needle`.
	pub fn find_text(&self, needle: &str) -> Option<(usize, usize)> {
		self.buffer_lines()
			.iter()
			.enumerate()
			.find_map(|(row, line)| line.find(needle).map(|col| (row, col)))
	}

	pub fn contains(&self, needle: &str) -> bool {
		self.find_text(needle).is_some()
	}
}

pub struct ComponentHarness<C> {
	pub harness: TestHarness,
	pub component: C,
}

impl<C: InteractiveComponent> ComponentHarness<C> {
	pub fn new(component: C, width: u16, height: u16) -> Self {
		Self {
			harness: TestHarness::new(width, height),
			component,
		}
	}

	pub fn render(&mut self) -> &TestBackend {
		let component = &mut self.component;
		self.harness.render(|frame, area, theme| {
			component.render(frame, area, theme);
		})
	}

	pub fn assert_snapshot(&mut self, name: &str) {
		let component = &mut self.component;
		self.harness.assert_snapshot(name, |frame, area, theme| {
			component.render(frame, area, theme);
		});
	}

	pub fn send_key(&mut self, key: KeyEvent) -> &TestBackend {
		self.component.handle_key(key);
		self.render()
	}

	pub fn press(&mut self, code: KeyCode) -> &TestBackend {
		self.send_key(KeyEvent::new(code, KeyModifiers::NONE))
	}

	pub fn press_ctrl(&mut self, c: char) -> &TestBackend {
		self.send_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
	}

	pub fn user_type(&mut self, text: &str) -> &TestBackend {
		for ch in text.chars() {
			self.component
				.handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE));
		}
		self.render()
	}

	pub fn contains(&self, needle: &str) -> bool {
		self.harness.contains(needle)
	}
}

#[cfg(feature = "proptest")]
pub mod strategies {
	use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
	use proptest::prelude::*;

	/// Keys a user might press while editing a query or form.
	pub fn key_event_strategy() -> impl Strategy<Value = KeyEvent> {
		let key_code = prop_oneof![
			Just(KeyCode::Backspace),
			Just(KeyCode::Delete),
			Just(KeyCode::Left),
			Just(KeyCode::Right),
			Just(KeyCode::Home),
			Just(KeyCode::End),
			Just(KeyCode::Up),
			Just(KeyCode::Down),
			Just(KeyCode::PageUp),
			Just(KeyCode::PageDown),
			proptest::char::range('a', 'z').prop_map(KeyCode::Char),
			proptest::char::range('0', '9').prop_map(KeyCode::Char),
			proptest::sample::select(vec![' ', '-', '.', '(', ')', 'é', '§']).prop_map(KeyCode::Char),
		];

		let modifiers = prop_oneof![Just(KeyModifiers::NONE), Just(KeyModifiers::SHIFT)];

		(key_code, modifiers).prop_map(|(code, mods)| KeyEvent::new(code, mods))
	}

	pub fn key_sequence_strategy(max_len: usize) -> impl Strategy<Value = Vec<KeyEvent>> {
		proptest::collection::vec(key_event_strategy(), 0..=max_len)
	}
}

#[cfg(feature = "proptest")]
pub use strategies::{key_event_strategy, key_sequence_strategy};
