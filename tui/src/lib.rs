//! TUI rendering for Reel using ratatui.

mod input;
mod theme;

pub use input::{InputPump, apply_event, handle_events};
pub use theme::{Glyphs, Palette, glyphs, palette, spinner_frame, styles};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap},
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use reel_engine::{App, Field, FocusTarget, NotificationKind};

const BRAND_TITLE: &str = "The Highlight Reel";
const BRAND_PITCH: &str = "Watch the magic we've captured. Great stories start with a single \
                           conversation. Let's make your vision real.";
const BRAND_EMAIL: &str = "vernita@varnanfilms.co.in";
const BRAND_PHONE: &str = "+91 98736 84567";
const BRAND_CTA: &str =
    "Prefer coffee? We do too. We'll meet, listen, and design a story that fits.";

const FORM_TITLE: &str = "Join the Story";
const FORM_SUBTITLE: &str = "Ready to bring your vision to life? Let’s talk.";
const SUBMIT_LABEL: &str = "Submit";

/// Below this width the brand panel is hidden and the form takes the screen.
const BRAND_PANEL_MIN_WIDTH: u16 = 90;
const BRAND_PANEL_WIDTH: u16 = 36;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);

    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Card
            Constraint::Length(1), // Key hints
        ])
        .split(frame.area());

    let card = chunks[0];
    if card.width >= BRAND_PANEL_MIN_WIDTH {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(BRAND_PANEL_WIDTH), Constraint::Min(1)])
            .split(card);
        draw_brand_panel(frame, columns[0], &palette, &glyphs);
        draw_form(frame, app, columns[1], &palette, &glyphs);
    } else {
        draw_form(frame, app, card, &palette, &glyphs);
    }

    draw_key_hints(frame, app, chunks[1], &palette);

    if app.notification().is_some() {
        draw_notification(frame, app, chunks[0], &palette, &glyphs);
    }
}

fn draw_brand_panel(frame: &mut Frame, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let lines = vec![
        Line::from(Span::styled(
            BRAND_TITLE,
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            BRAND_PITCH,
            Style::default().fg(palette.text_secondary),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("{} Email  ", glyphs.email),
                Style::default().fg(palette.text_muted),
            ),
            Span::styled(BRAND_EMAIL, Style::default().fg(palette.text_primary)),
        ]),
        Line::from(vec![
            Span::styled(
                format!("{} Phone  ", glyphs.phone),
                Style::default().fg(palette.text_muted),
            ),
            Span::styled(BRAND_PHONE, Style::default().fg(palette.text_primary)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            BRAND_CTA,
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::ITALIC),
        )),
    ];

    let panel = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.bg_border))
            .style(Style::default().bg(palette.bg_panel))
            .padding(Padding::new(2, 2, 1, 1)),
    );
    frame.render_widget(panel, area);
}

fn draw_form(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.bg_border))
        .padding(Padding::horizontal(2));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints = vec![
        Constraint::Length(1), // Title
        Constraint::Length(1), // Subtitle
        Constraint::Length(1),
    ];
    for field in Field::ALL {
        constraints.push(Constraint::Length(1)); // Label
        constraints.push(Constraint::Length(field.rows() + 2)); // Input
        constraints.push(Constraint::Length(1)); // Error
    }
    constraints.push(Constraint::Length(1)); // Submit
    constraints.push(Constraint::Min(0));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(FORM_TITLE, styles::title(palette)))),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            FORM_SUBTITLE,
            Style::default().fg(palette.text_muted),
        ))),
        rows[1],
    );

    for field in Field::ALL {
        let base = 3 + field.index() * 3;
        draw_field(
            frame,
            app,
            field,
            [rows[base], rows[base + 1], rows[base + 2]],
            palette,
            glyphs,
        );
    }

    draw_submit_button(frame, app, rows[3 + Field::ALL.len() * 3], palette, glyphs);
}

fn draw_field(
    frame: &mut Frame,
    app: &App,
    field: Field,
    [label_area, input_area, error_area]: [Rect; 3],
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let focused = app.focus() == FocusTarget::from_field(field);
    let error = app.error_message(field);

    let label = if focused {
        format!("{} {}", glyphs.focus, field.label())
    } else {
        format!("  {}", field.label())
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            label,
            styles::label(palette, focused),
        ))),
        label_area,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(styles::field_border(palette, focused, error.is_some()));
    let inner = block.inner(input_area);

    let input = app.input(field);
    let (lines, cursor) = if input.text().is_empty() {
        (
            vec![Line::from(Span::styled(
                field.placeholder(),
                styles::placeholder(palette),
            ))],
            (0, 0),
        )
    } else {
        let window = visible_window(input.text(), input.text_before_cursor(), inner);
        let lines = window
            .lines
            .into_iter()
            .map(|line| Line::from(Span::styled(line, Style::default().fg(palette.text_primary))))
            .collect();
        (lines, window.cursor)
    };

    frame.render_widget(Paragraph::new(lines).block(block), input_area);

    if focused {
        frame.set_cursor_position((
            inner.x.saturating_add(cursor.0),
            inner.y.saturating_add(cursor.1),
        ));
    }

    if let Some(message) = error {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("  {message}"),
                styles::field_error(palette),
            ))),
            error_area,
        );
    }
}

/// The slice of a field's text that fits in `area`, scrolled so the cursor
/// stays visible, plus the cursor offset inside `area`.
struct VisibleWindow {
    lines: Vec<String>,
    cursor: (u16, u16),
}

fn visible_window(text: &str, before_cursor: &str, area: Rect) -> VisibleWindow {
    let content_width = area.width.max(1) as usize;
    let visible_lines = area.height.max(1) as usize;

    let cursor_line_index = before_cursor.matches('\n').count();
    let cursor_line_start = before_cursor.rsplit('\n').next().unwrap_or("");
    let cursor_display_pos = cursor_line_start.width();

    let raw_lines: Vec<&str> = text.split('\n').collect();
    let start_line = (cursor_line_index + 1).saturating_sub(visible_lines);
    let end_line = (start_line + visible_lines).min(raw_lines.len());

    let mut lines = Vec::with_capacity(end_line - start_line);
    let mut horizontal_scroll = 0;
    for (idx, line) in raw_lines[start_line..end_line].iter().enumerate() {
        if start_line + idx == cursor_line_index && cursor_display_pos >= content_width {
            let (visible, skipped) = scroll_past(line, cursor_display_pos - content_width + 1);
            lines.push(visible.to_string());
            horizontal_scroll = skipped;
        } else {
            lines.push((*line).to_string());
        }
    }

    let cursor_x = cursor_display_pos.saturating_sub(horizontal_scroll) as u16;
    let cursor_y = cursor_line_index.saturating_sub(start_line) as u16;
    VisibleWindow {
        lines,
        cursor: (cursor_x, cursor_y),
    }
}

/// Skip leading graphemes until at least `target` columns are hidden.
fn scroll_past(line: &str, target: usize) -> (&str, usize) {
    let mut skipped_width = 0;
    for (idx, grapheme) in line.grapheme_indices(true) {
        if skipped_width >= target {
            return (&line[idx..], skipped_width);
        }
        skipped_width += grapheme.width();
    }
    ("", skipped_width)
}

fn draw_submit_button(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let focused = app.focus() == FocusTarget::Submit;
    let label = if app.is_submitting() {
        format!("   {}    ", spinner_frame(app.tick_count(), app.ui_options()))
    } else {
        format!(" {SUBMIT_LABEL} ")
    };
    let marker = if focused { glyphs.focus } else { " " };

    let button = Paragraph::new(Line::from(vec![
        Span::styled(format!("{marker} "), styles::label(palette, focused)),
        Span::styled(
            label,
            styles::submit_button(palette, focused, app.can_submit()),
        ),
    ]));
    frame.render_widget(button, area);
}

fn draw_notification(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let Some(notification) = app.notification() else {
        return;
    };
    let (icon, color) = match notification.kind() {
        NotificationKind::Success => (glyphs.success, palette.success),
        NotificationKind::Error => (glyphs.error, palette.error),
    };

    let text = format!("{icon} {}", notification.text());
    let width = (text.width() as u16)
        .saturating_add(6)
        .min(area.width.saturating_sub(2));
    let height = 3.min(area.height);
    let banner_area = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height + 1),
        width,
        height,
    };

    frame.render_widget(Clear, banner_area);
    let banner = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color))
            .style(Style::default().bg(palette.bg_panel)),
    );
    frame.render_widget(banner, banner_area);
}

fn draw_key_hints(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let enter_hint = match app.focus() {
        FocusTarget::Submit => " submit  ",
        FocusTarget::Message => " newline  ",
        _ => " next  ",
    };
    let hints = vec![
        Span::raw(" "),
        Span::styled("Tab/Shift+Tab", styles::key_highlight(palette)),
        Span::styled(" move  ", styles::key_hint(palette)),
        Span::styled("Enter", styles::key_highlight(palette)),
        Span::styled(enter_hint, styles::key_hint(palette)),
        Span::styled("Ctrl+S", styles::key_highlight(palette)),
        Span::styled(" submit  ", styles::key_hint(palette)),
        Span::styled("Esc", styles::key_highlight(palette)),
        Span::styled(" quit ", styles::key_hint(palette)),
    ];
    let host = app.endpoint().host_str().unwrap_or_default().to_string();

    frame.render_widget(Paragraph::new(Line::from(hints)), area);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!("{host} "),
            Style::default().fg(palette.text_disabled),
        )))
        .alignment(Alignment::Right),
        area,
    );
}
