// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Statute sections rendered as bordered cards, one below the other.
//!
//! Each card shows `Section <number>` with a code badge, the title, the
//! description and the punishment. Text is wrapped to the card width. The
//! list scrolls by whole cards; a card that does not fit at the bottom is
//! clipped.

use lexi_tui_theme::Theme;
use ratatui::{
	buffer::Buffer,
	layout::Rect,
	style::Modifier,
	text::{Line, Span},
	widgets::{Block, BorderType, Borders, Padding, Paragraph, StatefulWidget, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Badge shown on every card.
pub const DEFAULT_CODE: &str = "IPC";

/// Columns taken by borders and horizontal padding.
const CARD_CHROME_WIDTH: u16 = 4;

pub fn truncate_with_ellipsis(s: &str, max_width: usize) -> String {
	if s.width() <= max_width {
		return s.to_string();
	}
	if max_width == 0 {
		return String::new();
	}

	let mut result = String::new();
	let mut current_width = 0;
	let target_width = max_width - 1;

	for c in s.chars() {
		let char_width = c.width().unwrap_or(0);
		if current_width + char_width > target_width {
			break;
		}
		result.push(c);
		current_width += char_width;
	}
	result.push('…');
	result
}

/// Greedy word wrap by display width. Words wider than `max_width` are split.
pub fn wrap_text(s: &str, max_width: usize) -> Vec<String> {
	let mut lines = Vec::new();
	if max_width == 0 {
		return lines;
	}

	let mut line = String::new();
	let mut line_width = 0;

	for word in s.split_whitespace() {
		let word_width = word.width();
		let needed = if line.is_empty() { word_width } else { line_width + 1 + word_width };

		if needed <= max_width {
			if !line.is_empty() {
				line.push(' ');
				line_width += 1;
			}
			line.push_str(word);
			line_width += word_width;
			continue;
		}

		if !line.is_empty() {
			lines.push(std::mem::take(&mut line));
			line_width = 0;
		}

		if word_width <= max_width {
			line.push_str(word);
			line_width = word_width;
			continue;
		}

		for c in word.chars() {
			let w = c.width().unwrap_or(0);
			if line_width + w > max_width && !line.is_empty() {
				lines.push(std::mem::take(&mut line));
				line_width = 0;
			}
			line.push(c);
			line_width += w;
		}
	}

	if !line.is_empty() {
		lines.push(line);
	}
	lines
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionCard {
	pub number: String,
	pub title: String,
	pub description: String,
	pub punishment: String,
	pub code: String,
}

impl SectionCard {
	pub fn new(number: impl Into<String>, title: impl Into<String>) -> Self {
		Self {
			number: number.into(),
			title: title.into(),
			description: String::new(),
			punishment: String::new(),
			code: DEFAULT_CODE.to_string(),
		}
	}

	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = description.into();
		self
	}

	pub fn punishment(mut self, punishment: impl Into<String>) -> Self {
		self.punishment = punishment.into();
		self
	}

	pub fn code(mut self, code: impl Into<String>) -> Self {
		self.code = code.into();
		self
	}

	/// Rows the card occupies at `width` columns, borders included.
	pub fn height(&self, width: u16) -> u16 {
		self.lines(width, &Theme::default()).len() as u16 + 2
	}

	fn lines(&self, width: u16, theme: &Theme) -> Vec<Line<'static>> {
		let inner = width.saturating_sub(CARD_CHROME_WIDTH) as usize;
		let mut lines = Vec::new();

		let badge = format!(" {} ", self.code);
		let badge_width = badge.width();
		let heading = truncate_with_ellipsis(
			&format!("Section {}", self.number),
			inner.saturating_sub(badge_width + 1),
		);
		let gap = inner.saturating_sub(heading.width() + badge_width);
		lines.push(Line::from(vec![
			Span::styled(heading, theme.card_heading()),
			Span::raw(" ".repeat(gap)),
			Span::styled(badge, theme.badge()),
		]));

		let title_style = theme.text.bold;
		for line in wrap_text(&self.title, inner) {
			lines.push(Line::from(Span::styled(line, title_style)));
		}

		for line in wrap_text(&self.description, inner) {
			lines.push(Line::from(Span::styled(line, theme.card_body())));
		}

		let punishment = wrap_text(&self.punishment, inner);
		if !punishment.is_empty() {
			let style = theme.punishment_text();
			lines.push(Line::default());
			lines.push(Line::from(Span::styled(
				"Punishment:",
				style.add_modifier(Modifier::BOLD),
			)));
			for line in punishment {
				lines.push(Line::from(Span::styled(line, style)));
			}
		}

		lines
	}
}

#[derive(Debug, Default, Clone)]
pub struct SectionListState {
	offset: usize,
	visible: usize,
}

impl SectionListState {
	pub fn clamp_to_total(&mut self, total: usize) {
		self.offset = self.offset.min(total.saturating_sub(1));
	}

	pub fn scroll_down(&mut self, total: usize) {
		if total > 0 {
			self.offset = (self.offset + 1).min(total - 1);
		}
	}

	pub fn scroll_up(&mut self) {
		self.offset = self.offset.saturating_sub(1);
	}

	pub fn page_down(&mut self, total: usize) {
		if total > 0 {
			self.offset = (self.offset + self.visible.max(1)).min(total - 1);
		}
	}

	pub fn page_up(&mut self) {
		self.offset = self.offset.saturating_sub(self.visible.max(1));
	}

	pub fn reset(&mut self) {
		self.offset = 0;
	}

	/// Index of the first card drawn.
	pub fn offset(&self) -> usize {
		self.offset
	}

	/// Cards drawn, fully or clipped, in the last render.
	pub fn visible(&self) -> usize {
		self.visible
	}
}

#[derive(Debug, Clone)]
pub struct SectionList<'a> {
	cards: &'a [SectionCard],
	theme: Theme,
}

impl<'a> SectionList<'a> {
	pub fn new(cards: &'a [SectionCard]) -> Self {
		Self {
			cards,
			theme: Theme::default(),
		}
	}

	pub fn theme(mut self, theme: &Theme) -> Self {
		self.theme = theme.clone();
		self
	}
}

impl StatefulWidget for SectionList<'_> {
	type State = SectionListState;

	fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
		state.visible = 0;
		if area.height == 0 || area.width <= CARD_CHROME_WIDTH {
			return;
		}

		state.clamp_to_total(self.cards.len());

		let gap = self.theme.spacing.card_gap;
		let max_y = area.bottom();
		let mut y = area.y;

		for card in self.cards.iter().skip(state.offset) {
			// Too little room for a border and one row of content.
			if max_y.saturating_sub(y) < 3 {
				break;
			}

			let lines = card.lines(area.width, &self.theme);
			let height = (lines.len() as u16 + 2).min(max_y - y);
			let card_area = Rect::new(area.x, y, area.width, height);

			let block = Block::default()
				.borders(Borders::ALL)
				.border_type(BorderType::Rounded)
				.border_style(self.theme.border_normal())
				.padding(Padding::horizontal(1));
			Paragraph::new(lines).block(block).render(card_area, buf);

			state.visible += 1;
			y = y.saturating_add(height).saturating_add(gap);
		}
	}
}
