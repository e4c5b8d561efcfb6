// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the submit control next to the query field.
pub const SUBMIT_WIDTH: u16 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
	pub header: Rect,
	pub query: Rect,
	pub submit: Rect,
	pub banner: Option<Rect>,
	pub results: Rect,
	pub status: Rect,
}

/// Header, query row, optional error banner, results, status bar.
pub fn split_screen(area: Rect, banner_height: u16) -> ScreenAreas {
	let header_height = if area.height >= 20 { 2 } else { 1 };
	let chunks = Layout::default()
		.direction(Direction::Vertical)
		.constraints([
			Constraint::Length(header_height),
			Constraint::Length(3),
			Constraint::Length(banner_height),
			Constraint::Min(1),
			Constraint::Length(1),
		])
		.split(area);

	let (query, submit) = split_query_row(chunks[1]);

	ScreenAreas {
		header: chunks[0],
		query,
		submit,
		banner: (banner_height > 0).then_some(chunks[2]),
		results: chunks[3],
		status: chunks[4],
	}
}

fn split_query_row(area: Rect) -> (Rect, Rect) {
	let submit_width = SUBMIT_WIDTH.min(area.width / 3);
	let chunks = Layout::default()
		.direction(Direction::Horizontal)
		.constraints([Constraint::Min(1), Constraint::Length(submit_width)])
		.split(area);
	(chunks[0], chunks[1])
}

/// A `width` x `height` rectangle centred in `area`, shrunk to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
	let width = width.min(area.width);
	let height = height.min(area.height);
	Rect::new(
		area.x + (area.width - width) / 2,
		area.y + (area.height - height) / 2,
		width,
		height,
	)
}
