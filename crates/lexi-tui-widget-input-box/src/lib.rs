// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Single-line text input used for the query field and the sign-in form.
//!
//! The cursor is a byte offset into the content. Movement and deletion step
//! by grapheme, so a letter and its combining marks go together.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
	buffer::Buffer,
	layout::Rect,
	style::{Color, Style},
	widgets::StatefulWidget,
};
use unicode_segmentation::UnicodeSegmentation;

/// Glyph drawn in place of each grapheme of a masked field.
pub const MASK_GLYPH: &str = "•";

#[derive(Debug, Default, Clone)]
pub struct InputBoxState {
	content: String,
	cursor_position: usize,
	scroll_offset: usize,
}

impl InputBoxState {
	pub fn new() -> Self {
		Self::default()
	}

	/// State holding `content` with the cursor at its end.
	pub fn with_content(content: impl Into<String>) -> Self {
		let content = content.into();
		Self {
			cursor_position: content.len(),
			content,
			scroll_offset: 0,
		}
	}

	pub fn insert_char(&mut self, c: char) {
		self.content.insert(self.cursor_position, c);
		self.cursor_position += c.len_utf8();
	}

	pub fn insert_str(&mut self, s: &str) {
		self.content.insert_str(self.cursor_position, s);
		self.cursor_position += s.len();
	}

	pub fn delete_char(&mut self) {
		let start = self.prev_grapheme_start();
		self.content.drain(start..self.cursor_position);
		self.cursor_position = start;
	}

	pub fn delete_char_forward(&mut self) {
		let end = self.next_grapheme_end();
		self.content.drain(self.cursor_position..end);
	}

	pub fn move_cursor_left(&mut self) {
		self.cursor_position = self.prev_grapheme_start();
	}

	pub fn move_cursor_right(&mut self) {
		self.cursor_position = self.next_grapheme_end();
	}

	pub fn move_cursor_start(&mut self) {
		self.cursor_position = 0;
	}

	pub fn move_cursor_end(&mut self) {
		self.cursor_position = self.content.len();
	}

	pub fn move_cursor_prev_word(&mut self) {
		self.cursor_position = self.prev_word_start();
	}

	pub fn move_cursor_next_word(&mut self) {
		self.cursor_position = self.next_word_start();
	}

	pub fn delete_prev_word(&mut self) {
		let start = self.prev_word_start();
		self.content.drain(start..self.cursor_position);
		self.cursor_position = start;
	}

	pub fn delete_next_word(&mut self) {
		let end = self.next_word_start();
		self.content.drain(self.cursor_position..end);
	}

	/// Applies an editing key. Returns `false` for keys the input ignores so
	/// the caller can handle them.
	pub fn handle_key(&mut self, key: KeyEvent) -> bool {
		let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
		let alt = key.modifiers.contains(KeyModifiers::ALT);
		match key.code {
			KeyCode::Char('w') if ctrl => self.delete_prev_word(),
			KeyCode::Char('a') if ctrl => self.move_cursor_start(),
			KeyCode::Char('e') if ctrl => self.move_cursor_end(),
			KeyCode::Char('u') if ctrl => self.clear(),
			KeyCode::Char(_) if ctrl => return false,
			KeyCode::Char(c) => self.insert_char(c),
			KeyCode::Backspace if alt || ctrl => self.delete_prev_word(),
			KeyCode::Backspace => self.delete_char(),
			KeyCode::Delete if alt || ctrl => self.delete_next_word(),
			KeyCode::Delete => self.delete_char_forward(),
			KeyCode::Left if alt || ctrl => self.move_cursor_prev_word(),
			KeyCode::Left => self.move_cursor_left(),
			KeyCode::Right if alt || ctrl => self.move_cursor_next_word(),
			KeyCode::Right => self.move_cursor_right(),
			KeyCode::Home => self.move_cursor_start(),
			KeyCode::End => self.move_cursor_end(),
			_ => return false,
		}
		true
	}

	pub fn content(&self) -> &str {
		&self.content
	}

	pub fn is_empty(&self) -> bool {
		self.content.is_empty()
	}

	pub fn clear(&mut self) {
		self.content.clear();
		self.cursor_position = 0;
		self.scroll_offset = 0;
	}

	pub fn cursor_position(&self) -> usize {
		self.cursor_position
	}

	pub fn scroll_offset(&self) -> usize {
		self.scroll_offset
	}

	fn prev_grapheme_start(&self) -> usize {
		self.content[..self.cursor_position]
			.grapheme_indices(true)
			.next_back()
			.map(|(i, _)| i)
			.unwrap_or(0)
	}

	fn next_grapheme_end(&self) -> usize {
		self.content[self.cursor_position..]
			.graphemes(true)
			.next()
			.map(|g| self.cursor_position + g.len())
			.unwrap_or(self.cursor_position)
	}

	/// Start of the word before the cursor, skipping trailing whitespace.
	fn prev_word_start(&self) -> usize {
		let mut seen_word = false;
		for (i, grapheme) in self.content[..self.cursor_position].grapheme_indices(true).rev() {
			if is_whitespace(grapheme) {
				if seen_word {
					return i + grapheme.len();
				}
			} else {
				seen_word = true;
			}
		}
		0
	}

	/// Start of the word after the cursor, or the end of the content.
	fn next_word_start(&self) -> usize {
		let mut seen_space = false;
		for (i, grapheme) in self.content[self.cursor_position..].grapheme_indices(true) {
			if is_whitespace(grapheme) {
				seen_space = true;
			} else if seen_space {
				return self.cursor_position + i;
			}
		}
		self.content.len()
	}
}

fn is_whitespace(grapheme: &str) -> bool {
	grapheme.chars().all(char::is_whitespace)
}

#[derive(Debug, Clone)]
pub struct InputBox {
	placeholder: Option<String>,
	style: Style,
	placeholder_style: Style,
	cursor_style: Style,
	focused: bool,
	masked: bool,
}

impl Default for InputBox {
	fn default() -> Self {
		Self::new()
	}
}

impl InputBox {
	pub fn new() -> Self {
		Self {
			placeholder: None,
			style: Style::default(),
			placeholder_style: Style::default().fg(Color::DarkGray),
			cursor_style: Style::default().bg(Color::White).fg(Color::Black),
			focused: true,
			masked: false,
		}
	}

	pub fn placeholder(mut self, text: impl Into<String>) -> Self {
		self.placeholder = Some(text.into());
		self
	}

	pub fn style(mut self, style: Style) -> Self {
		self.style = style;
		self
	}

	pub fn placeholder_style(mut self, style: Style) -> Self {
		self.placeholder_style = style;
		self
	}

	pub fn cursor_style(mut self, style: Style) -> Self {
		self.cursor_style = style;
		self
	}

	/// Unfocused inputs draw no cursor.
	pub fn focused(mut self, focused: bool) -> Self {
		self.focused = focused;
		self
	}

	/// Draws [`MASK_GLYPH`] for every grapheme instead of the text.
	pub fn masked(mut self, masked: bool) -> Self {
		self.masked = masked;
		self
	}
}

impl StatefulWidget for InputBox {
	type State = InputBoxState;

	fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
		if area.width == 0 || area.height == 0 {
			return;
		}

		let width = area.width as usize;

		if state.content.is_empty() {
			if let Some(ref placeholder) = self.placeholder {
				let display: String = placeholder.graphemes(true).take(width).collect();
				buf.set_string(area.x, area.y, &display, self.placeholder_style);
			}
			if self.focused {
				buf.set_string(area.x, area.y, " ", self.cursor_style);
			}
			return;
		}

		let cursor_grapheme_pos = state.content[..state.cursor_position].graphemes(true).count();

		if cursor_grapheme_pos < state.scroll_offset {
			state.scroll_offset = cursor_grapheme_pos;
		} else if cursor_grapheme_pos >= state.scroll_offset + width {
			state.scroll_offset = cursor_grapheme_pos + 1 - width;
		}

		let visible: Vec<&str> = state
			.content
			.graphemes(true)
			.skip(state.scroll_offset)
			.take(width)
			.collect();
		let cursor_display_pos = cursor_grapheme_pos - state.scroll_offset;

		for (i, grapheme) in visible.iter().enumerate() {
			let style = if self.focused && i == cursor_display_pos {
				self.cursor_style
			} else {
				self.style
			};
			let shown = if self.masked { MASK_GLYPH } else { grapheme };
			buf.set_string(area.x + i as u16, area.y, shown, style);
		}

		if self.focused && cursor_display_pos >= visible.len() && cursor_display_pos < width {
			buf.set_string(area.x + cursor_display_pos as u16, area.y, " ", self.cursor_style);
		}
	}
}
