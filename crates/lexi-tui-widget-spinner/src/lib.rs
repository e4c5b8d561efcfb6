// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! A single-line busy indicator, drawn next to the submit control while a
//! search is in flight.
//!
//! ```no_run
//! use lexi_tui_widget_spinner::{Spinner, SpinnerKind, SpinnerState};
//!
//! let mut state = SpinnerState::default();
//! let spinner = Spinner::from_label("Searching...").kind(SpinnerKind::Dots);
//!
//! // Advance once per UI tick.
//! state.tick();
//! ```

use ratatui::prelude::*;
use ratatui::widgets::StatefulWidget;

const DOTS_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const LINE_FRAMES: &[&str] = &["-", "\\", "|", "/"];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpinnerKind {
	#[default]
	Dots,
	/// ASCII frames for terminals without braille glyphs.
	Line,
}

impl SpinnerKind {
	pub fn frames(&self) -> &'static [&'static str] {
		match self {
			SpinnerKind::Dots => DOTS_FRAMES,
			SpinnerKind::Line => LINE_FRAMES,
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct SpinnerState {
	frame: usize,
}

impl SpinnerState {
	pub fn tick(&mut self) {
		self.frame = self.frame.wrapping_add(1);
	}

	pub fn reset(&mut self) {
		self.frame = 0;
	}

	pub fn current(&self, kind: SpinnerKind) -> &'static str {
		let frames = kind.frames();
		frames[self.frame % frames.len()]
	}
}

#[derive(Clone, Debug, Default)]
pub struct Spinner {
	label: Option<String>,
	text_style: Style,
	kind: SpinnerKind,
}

impl Spinner {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_label(label: impl Into<String>) -> Self {
		Self::new().label(label)
	}

	pub fn label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn text_style(mut self, style: Style) -> Self {
		self.text_style = style;
		self
	}

	pub fn kind(mut self, kind: SpinnerKind) -> Self {
		self.kind = kind;
		self
	}
}

impl StatefulWidget for Spinner {
	type State = SpinnerState;

	fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
		if area.width == 0 || area.height == 0 {
			return;
		}

		let glyph = state.current(self.kind);
		let text = match &self.label {
			Some(label) => format!("{glyph} {label}"),
			None => glyph.to_string(),
		};

		buf.set_stringn(area.x, area.y, &text, area.width as usize, self.text_style);
	}
}
