// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use lexi_tui_theme::Theme;
use ratatui::{
	buffer::Buffer,
	layout::Rect,
	style::{Style, Stylize},
	text::{Line, Span},
	widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone)]
pub struct StatusItem {
	pub label: String,
	pub value: String,
}

/// One row: `label: value` items on the left, key hints on the right.
/// Items are truncated with an ellipsis before hints are dropped.
#[derive(Debug, Clone, Default)]
pub struct StatusBar {
	items: Vec<StatusItem>,
	shortcuts: Vec<(String, String)>,
	style: Style,
	theme: Theme,
}

impl StatusBar {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn item(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
		self.items.push(StatusItem {
			label: label.into(),
			value: value.into(),
		});
		self
	}

	pub fn shortcut(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
		self.shortcuts.push((key.into(), desc.into()));
		self
	}

	pub fn style(mut self, style: Style) -> Self {
		self.style = style;
		self
	}

	pub fn theme(mut self, theme: &Theme) -> Self {
		self.theme = theme.clone();
		self
	}
}

impl Widget for StatusBar {
	fn render(self, area: Rect, buf: &mut Buffer) {
		if area.width == 0 || area.height == 0 {
			return;
		}

		if self.style != Style::default() {
			buf.set_style(area, self.style);
		}

		let mut shortcut_spans = Vec::new();
		for (i, (key, desc)) in self.shortcuts.iter().enumerate() {
			if i > 0 {
				shortcut_spans.push(Span::raw(" | "));
			}
			shortcut_spans.push(Span::raw(key.as_str()).bold().fg(self.theme.colors.accent));
			shortcut_spans.push(Span::raw(" "));
			shortcut_spans.push(Span::raw(desc.as_str()));
		}
		let shortcut_line = Line::from(shortcut_spans);
		let mut shortcut_width = shortcut_line.width() as u16;
		if shortcut_width + 1 > area.width {
			shortcut_width = 0;
		}

		let available = area.width.saturating_sub(shortcut_width + 1) as usize;

		let mut item_spans = Vec::new();
		let mut used = 0usize;
		for (i, item) in self.items.iter().enumerate() {
			let separator = if i > 0 { " | " } else { "" };
			let text = format!("{separator}{}: {}", item.label, item.value);
			let width = text.width();

			if used + width > available {
				let remaining = available - used;
				if remaining > 3 {
					let mut truncated = String::new();
					for c in text.chars() {
						let next = truncated.width() + c.to_string().width();
						if next + 1 > remaining {
							break;
						}
						truncated.push(c);
					}
					truncated.push('…');
					item_spans.push(Span::raw(truncated));
				}
				break;
			}

			if i > 0 {
				item_spans.push(Span::raw(" | "));
			}
			item_spans.push(Span::raw(item.label.as_str()).bold());
			item_spans.push(Span::raw(": "));
			item_spans.push(Span::raw(item.value.as_str()));
			used += width;
		}

		let item_line = Line::from(item_spans);
		buf.set_line(area.x, area.y, &item_line, available as u16);

		if shortcut_width > 0 {
			let shortcut_x = area.right().saturating_sub(shortcut_width);
			buf.set_line(shortcut_x, area.y, &shortcut_line, shortcut_width);
		}
	}
}
