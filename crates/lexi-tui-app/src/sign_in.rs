// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Modal email/password form shown with Ctrl+L.

use crossterm::event::{KeyCode, KeyEvent};
use lexi_common_config::SecretString;
use lexi_search_core::Credentials;
use lexi_tui_theme::Theme;
use lexi_tui_widget_input_box::{InputBox, InputBoxState};
use ratatui::{
	layout::Rect,
	text::{Line, Span},
	widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
	Frame,
};

use crate::layout::centered_rect;

const FORM_WIDTH: u16 = 52;
const FORM_HEIGHT: u16 = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
	#[default]
	Email,
	Password,
}

#[derive(Debug)]
pub enum FormAction {
	None,
	Cancel,
	Submit(Credentials),
}

#[derive(Debug, Default)]
pub struct SignInForm {
	email: InputBoxState,
	password: InputBoxState,
	focus: FormField,
	error: Option<String>,
	submitting: bool,
}

impl SignInForm {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn focus(&self) -> FormField {
		self.focus
	}

	pub fn error(&self) -> Option<&str> {
		self.error.as_deref()
	}

	pub fn is_submitting(&self) -> bool {
		self.submitting
	}

	/// Called when the sign-in request fails; the form becomes editable again.
	pub fn reject(&mut self, message: impl Into<String>) {
		self.submitting = false;
		self.error = Some(message.into());
	}

	pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
		if key.code == KeyCode::Esc {
			return FormAction::Cancel;
		}
		if self.submitting {
			return FormAction::None;
		}

		match key.code {
			KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
				self.toggle_focus();
				FormAction::None
			}
			KeyCode::Enter => match self.focus {
				FormField::Email => {
					self.focus = FormField::Password;
					FormAction::None
				}
				FormField::Password => self.submit(),
			},
			_ => {
				let field = match self.focus {
					FormField::Email => &mut self.email,
					FormField::Password => &mut self.password,
				};
				if field.handle_key(key) {
					self.error = None;
				}
				FormAction::None
			}
		}
	}

	fn toggle_focus(&mut self) {
		self.focus = match self.focus {
			FormField::Email => FormField::Password,
			FormField::Password => FormField::Email,
		};
	}

	fn submit(&mut self) -> FormAction {
		let password = SecretString::new(self.password.content().to_string());
		match Credentials::new(self.email.content(), password) {
			Ok(credentials) => {
				self.error = None;
				self.submitting = true;
				FormAction::Submit(credentials)
			}
			Err(err) => {
				self.error = Some(err.to_string());
				FormAction::None
			}
		}
	}

	pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
		let form_area = centered_rect(FORM_WIDTH, FORM_HEIGHT, area);
		frame.render_widget(Clear, form_area);

		let block = Block::default()
			.title(" Sign in ")
			.borders(Borders::ALL)
			.border_type(BorderType::Rounded)
			.border_style(theme.border_focused());
		let inner = block.inner(form_area);
		frame.render_widget(block, form_area);

		if inner.width < 4 || inner.height < 8 {
			return;
		}

		let row = |offset: u16| Rect::new(inner.x + 1, inner.y + offset, inner.width - 2, 1);
		let focus = self.focus();

		frame.render_widget(Paragraph::new(label("Email", focus == FormField::Email, theme)), row(0));
		frame.render_stateful_widget(
			InputBox::new()
				.placeholder("you@example.com")
				.style(theme.input_text())
				.placeholder_style(theme.input_placeholder())
				.focused(focus == FormField::Email && !self.submitting),
			row(1),
			&mut self.email,
		);

		frame.render_widget(
			Paragraph::new(label("Password", focus == FormField::Password, theme)),
			row(3),
		);
		frame.render_stateful_widget(
			InputBox::new()
				.style(theme.input_text())
				.masked(true)
				.focused(focus == FormField::Password && !self.submitting),
			row(4),
			&mut self.password,
		);

		if let Some(error) = &self.error {
			frame.render_widget(
				Paragraph::new(error.as_str())
					.style(theme.error_text())
					.wrap(Wrap { trim: true }),
				Rect::new(inner.x + 1, inner.y + 6, inner.width - 2, inner.height.saturating_sub(7)),
			);
		}

		let hint = if self.submitting {
			"Signing in..."
		} else {
			"Enter sign in | Tab switch field | Esc cancel"
		};
		frame.render_widget(
			Paragraph::new(hint).style(theme.text.dim),
			Rect::new(inner.x + 1, inner.bottom() - 1, inner.width - 2, 1),
		);
	}
}

fn label<'a>(text: &'a str, focused: bool, theme: &Theme) -> Line<'a> {
	let style = if focused {
		theme.card_heading()
	} else {
		theme.text.dim
	};
	Line::from(Span::styled(text, style))
}
