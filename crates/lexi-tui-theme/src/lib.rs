// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, PartialEq)]
pub struct ColorPalette {
	pub background: Color,
	pub surface: Color,
	pub text: Color,
	pub text_muted: Color,
	pub text_placeholder: Color,
	pub text_inverted: Color,
	pub accent: Color,
	pub badge_bg: Color,
	pub badge_fg: Color,
	pub error: Color,
	pub warning: Color,
	pub success: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BorderStyles {
	pub normal: Style,
	pub focused: Style,
	pub error: Style,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyles {
	pub normal: Style,
	pub bold: Style,
	pub dim: Style,
	pub heading: Style,
	pub placeholder: Style,
	pub disabled: Style,
	pub error: Style,
	pub success: Style,
	pub punishment: Style,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spacing {
	pub padding: u16,
	/// Blank rows between result cards.
	pub card_gap: u16,
}

impl Spacing {
	pub fn new() -> Self {
		Self {
			padding: 1,
			card_gap: 1,
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
	pub name: String,
	pub colors: ColorPalette,
	pub borders: BorderStyles,
	pub text: TextStyles,
	pub spacing: Spacing,
}

impl Default for Theme {
	fn default() -> Self {
		Self::dark()
	}
}

impl Theme {
	pub fn dark() -> Self {
		Self::from_palette(
			"dark",
			ColorPalette {
				background: Color::Black,
				surface: Color::Rgb(30, 30, 30),
				text: Color::White,
				text_muted: Color::DarkGray,
				text_placeholder: Color::Rgb(100, 100, 100),
				text_inverted: Color::Black,
				accent: Color::Cyan,
				badge_bg: Color::Rgb(30, 58, 138),
				badge_fg: Color::Rgb(191, 219, 254),
				error: Color::Red,
				warning: Color::Yellow,
				success: Color::Green,
			},
		)
	}

	pub fn light() -> Self {
		Self::from_palette(
			"light",
			ColorPalette {
				background: Color::White,
				surface: Color::Rgb(245, 245, 245),
				text: Color::Black,
				text_muted: Color::Gray,
				text_placeholder: Color::Rgb(160, 160, 160),
				text_inverted: Color::White,
				accent: Color::Blue,
				badge_bg: Color::Rgb(219, 234, 254),
				badge_fg: Color::Rgb(30, 64, 175),
				error: Color::Red,
				warning: Color::Yellow,
				success: Color::Green,
			},
		)
	}

	/// Looks up a built-in theme by name, case-insensitively.
	pub fn by_name(name: &str) -> Option<Self> {
		match name.trim().to_ascii_lowercase().as_str() {
			"dark" => Some(Self::dark()),
			"light" => Some(Self::light()),
			_ => None,
		}
	}

	fn from_palette(name: &str, colors: ColorPalette) -> Self {
		let borders = BorderStyles {
			normal: Style::default().fg(colors.text_muted),
			focused: Style::default().fg(colors.accent),
			error: Style::default().fg(colors.error),
		};

		let text = TextStyles {
			normal: Style::default().fg(colors.text),
			bold: Style::default().fg(colors.text).add_modifier(Modifier::BOLD),
			dim: Style::default().fg(colors.text_muted),
			heading: Style::default().fg(colors.accent).add_modifier(Modifier::BOLD),
			placeholder: Style::default().fg(colors.text_placeholder),
			disabled: Style::default().fg(colors.text_muted),
			error: Style::default().fg(colors.error),
			success: Style::default().fg(colors.success),
			punishment: Style::default().fg(colors.error),
		};

		Self {
			name: name.to_string(),
			colors,
			borders,
			text,
			spacing: Spacing::new(),
		}
	}

	pub fn border_normal(&self) -> Style {
		self.borders.normal
	}

	pub fn border_focused(&self) -> Style {
		self.borders.focused
	}

	pub fn border_error(&self) -> Style {
		self.borders.error
	}

	pub fn border_style_for(&self, focused: bool) -> Style {
		if focused {
			self.borders.focused
		} else {
			self.borders.normal
		}
	}

	pub fn input_text(&self) -> Style {
		self.text.normal
	}

	pub fn input_placeholder(&self) -> Style {
		self.text.placeholder
	}

	pub fn input_disabled(&self) -> Style {
		self.text.disabled
	}

	pub fn error_text(&self) -> Style {
		self.text.error
	}

	pub fn success_text(&self) -> Style {
		self.text.success
	}

	/// The pill that tags a card with its code, e.g. "IPC".
	pub fn badge(&self) -> Style {
		Style::default()
			.bg(self.colors.badge_bg)
			.fg(self.colors.badge_fg)
			.add_modifier(Modifier::BOLD)
	}

	pub fn card_heading(&self) -> Style {
		self.text.heading
	}

	pub fn card_body(&self) -> Style {
		self.text.normal
	}

	pub fn punishment_text(&self) -> Style {
		self.text.punishment
	}

	/// Submit control, dimmed while it cannot be pressed.
	pub fn button(&self, enabled: bool) -> Style {
		if enabled {
			Style::default()
				.bg(self.colors.accent)
				.fg(self.colors.text_inverted)
				.add_modifier(Modifier::BOLD)
		} else {
			self.text.disabled
		}
	}
}
