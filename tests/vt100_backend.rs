//! vt100-backed ratatui backend for the form rendering tests.
//!
//! Frames go out as real ANSI sequences and are read back from the parsed
//! screen, so assertions see what a terminal would show: row text, where a
//! string landed, the cursor, and truecolor foregrounds.

use std::io;

use crossterm::Command;
use crossterm::cursor::MoveTo;
use crossterm::style::{
    Attribute, Color as AnsiColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{Clear, ClearType as AnsiClearType};
use ratatui::backend::{Backend, ClearType, WindowSize};
use ratatui::buffer::Cell;
use ratatui::layout::{Position, Size};
use ratatui::style::{Color, Style};

pub struct ScreenBackend {
    parser: vt100::Parser,
    size: Size,
}

impl ScreenBackend {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            parser: vt100::Parser::new(height, width, 0),
            size: Size::new(width, height),
        }
    }

    pub fn contents(&self) -> String {
        self.parser.screen().contents()
    }

    /// One screen row, trailing blanks trimmed.
    pub fn row_text(&self, row: u16) -> String {
        self.parser
            .screen()
            .rows(0, self.size.width)
            .nth(usize::from(row))
            .unwrap_or_default()
            .trim_end()
            .to_string()
    }

    /// Screen position of the first cell where `needle` starts.
    ///
    /// Columns are terminal cells, so wide glyphs earlier on the row are
    /// accounted for.
    pub fn find(&self, needle: &str) -> Option<Position> {
        let screen = self.parser.screen();
        (0..self.size.height).find_map(|row| {
            let mut text = String::new();
            let mut columns = Vec::new();
            for col in 0..self.size.width {
                let Some(cell) = screen.cell(row, col) else {
                    continue;
                };
                if cell.is_wide_continuation() {
                    continue;
                }
                let symbol = cell.contents().to_string();
                let symbol = if symbol.is_empty() { " ".to_string() } else { symbol };
                columns.extend(std::iter::repeat_n(col, symbol.len()));
                text.push_str(&symbol);
            }
            text.find(needle)
                .map(|offset| Position::new(columns[offset], row))
        })
    }

    pub fn cursor(&self) -> Position {
        let (row, col) = self.parser.screen().cursor_position();
        Position::new(col, row)
    }

    pub fn fg_at(&self, position: Position) -> vt100::Color {
        self.parser
            .screen()
            .cell(position.y, position.x)
            .map_or(vt100::Color::Default, |cell| cell.fgcolor())
    }

    fn emit(&mut self, command: impl Command) {
        let mut ansi = String::new();
        if command.write_ansi(&mut ansi).is_ok() {
            self.parser.process(ansi.as_bytes());
        }
    }
}

/// The form only paints with truecolor or indexed colors; named colors fall
/// back to the terminal default.
fn ansi_color(color: Option<Color>) -> Option<AnsiColor> {
    match color? {
        Color::Rgb(r, g, b) => Some(AnsiColor::Rgb { r, g, b }),
        Color::Indexed(i) => Some(AnsiColor::AnsiValue(i)),
        _ => None,
    }
}

impl Backend for ScreenBackend {
    type Error = io::Error;

    fn draw<'a, I>(&mut self, content: I) -> io::Result<()>
    where
        I: Iterator<Item = (u16, u16, &'a Cell)>,
    {
        let mut next: Option<(u16, u16)> = None;
        let mut style: Option<Style> = None;

        for (x, y, cell) in content {
            if next != Some((x, y)) {
                self.emit(MoveTo(x, y));
            }
            let cell_style = cell.style();
            if style != Some(cell_style) {
                self.emit(SetAttribute(Attribute::Reset));
                if let Some(fg) = ansi_color(cell_style.fg) {
                    self.emit(SetForegroundColor(fg));
                }
                if let Some(bg) = ansi_color(cell_style.bg) {
                    self.emit(SetBackgroundColor(bg));
                }
                style = Some(cell_style);
            }
            self.parser.process(cell.symbol().as_bytes());
            next = Some((x + 1, y));
        }
        Ok(())
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn get_cursor_position(&mut self) -> io::Result<Position> {
        Ok(self.cursor())
    }

    fn set_cursor_position<P: Into<Position>>(&mut self, position: P) -> io::Result<()> {
        let position = position.into();
        self.emit(MoveTo(position.x, position.y));
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.emit(Clear(AnsiClearType::All));
        Ok(())
    }

    fn clear_region(&mut self, _clear_type: ClearType) -> io::Result<()> {
        self.clear()
    }

    fn size(&self) -> io::Result<Size> {
        Ok(self.size)
    }

    fn window_size(&mut self) -> io::Result<WindowSize> {
        Ok(WindowSize {
            columns_rows: self.size,
            pixels: Size::new(self.size.width * 8, self.size.height * 16),
        })
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
