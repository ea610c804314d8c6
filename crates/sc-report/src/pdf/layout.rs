//! Flowing page layout.
//!
//! [`Composer`] places blocks top to bottom, starting a new page when a
//! block does not fit. Tables split between rows and repeat their header
//! rows on the continuation page.

use pdf_writer::{Content, Name, Str};

use super::text::{encode_win_ansi, text_width, wrap_text, FontFace};

/// A4 width in points.
pub const PAGE_WIDTH: f32 = 595.28;
/// A4 height in points.
pub const PAGE_HEIGHT: f32 = 841.89;

/// Line height as a multiple of font size.
const LEADING_FACTOR: f32 = 1.2;

pub type Rgb = [f32; 3];

pub const BLACK: Rgb = [0.0, 0.0, 0.0];
pub const WHITE: Rgb = [1.0, 1.0, 1.0];

/// Horizontal alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Paragraph style.
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub face: FontFace,
    pub size: f32,
    pub color: Rgb,
    pub align: Align,
    pub space_after: f32,
}

impl TextStyle {
    pub fn leading(&self) -> f32 {
        self.size * LEADING_FACTOR
    }
}

/// One table cell.
#[derive(Debug, Clone)]
pub struct Cell {
    pub text: String,
    pub face: FontFace,
    pub color: Rgb,
    pub background: Option<Rgb>,
    pub align: Align,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Cell {
            text: text.into(),
            face: FontFace::Regular,
            color: BLACK,
            background: None,
            align: Align::Left,
        }
    }

    pub fn bold(mut self) -> Self {
        self.face = FontFace::Bold;
        self
    }

    pub fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }

    pub fn filled(mut self, background: Rgb, color: Rgb) -> Self {
        self.background = Some(background);
        self.color = color;
        self
    }
}

/// Table to place in the flow.
#[derive(Debug, Clone)]
pub struct Table {
    pub col_widths: Vec<f32>,
    pub rows: Vec<Vec<Cell>>,
    /// Leading rows repeated after a page break.
    pub header_rows: usize,
    pub font_size: f32,
    pub padding: f32,
    /// Grid line width; `None` draws no grid.
    pub grid: Option<f32>,
}

impl Table {
    fn width(&self) -> f32 {
        self.col_widths.iter().sum()
    }

    fn wrapped_row(&self, row: &[Cell]) -> (Vec<Vec<String>>, f32) {
        let leading = self.font_size * LEADING_FACTOR;
        let lines: Vec<Vec<String>> = row
            .iter()
            .zip(&self.col_widths)
            .map(|(cell, width)| {
                wrap_text(
                    &cell.text,
                    cell.face,
                    self.font_size,
                    (width - 2.0 * self.padding).max(1.0),
                )
            })
            .collect();
        let max_lines = lines.iter().map(Vec::len).max().unwrap_or(1).max(1);
        (lines, max_lines as f32 * leading + 2.0 * self.padding)
    }
}

/// Usable page area.
#[derive(Debug, Clone, Copy)]
pub struct PageGeometry {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl PageGeometry {
    pub fn new(margin_top: f32, margin_bottom: f32, margin_left: f32, margin_right: f32) -> Self {
        PageGeometry {
            left: margin_left,
            right: PAGE_WIDTH - margin_right,
            top: PAGE_HEIGHT - margin_top,
            bottom: margin_bottom,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }
}

/// Places content on consecutive pages.
pub struct Composer {
    geometry: PageGeometry,
    pages: Vec<Content>,
    cursor: f32,
}

impl Composer {
    pub fn new(geometry: PageGeometry) -> Self {
        Composer {
            geometry,
            pages: vec![Content::new()],
            cursor: geometry.top,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn at_page_top(&self) -> bool {
        self.cursor >= self.geometry.top
    }

    fn remaining(&self) -> f32 {
        self.cursor - self.geometry.bottom
    }

    fn new_page(&mut self) {
        self.pages.push(Content::new());
        self.cursor = self.geometry.top;
    }

    fn page(&mut self) -> &mut Content {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Start a new page unless `height` fits or the page is still empty.
    pub fn ensure(&mut self, height: f32) {
        if height > self.remaining() && !self.at_page_top() {
            self.new_page();
        }
    }

    /// Vertical gap. Dropped at the top of a page.
    pub fn space(&mut self, height: f32) {
        if self.at_page_top() {
            return;
        }
        if height >= self.remaining() {
            self.new_page();
        } else {
            self.cursor -= height;
        }
    }

    /// Wrapped paragraph across the full content width.
    pub fn paragraph(&mut self, text: &str, style: &TextStyle) {
        let width = self.geometry.width();
        let lines = wrap_text(text, style.face, style.size, width);
        let leading = style.leading();

        for line in &lines {
            self.ensure(leading);
            let baseline = self.cursor - style.size;
            let x = align_x(self.geometry.left, width, line, style.face, style.size, style.align);
            show_text(self.page(), line, style.face, style.size, style.color, x, baseline);
            self.cursor -= leading;
        }
        self.space(style.space_after);
    }

    /// Height a paragraph will take, spacing included.
    pub fn paragraph_height(&self, text: &str, style: &TextStyle) -> f32 {
        let lines = wrap_text(text, style.face, style.size, self.geometry.width()).len();
        lines as f32 * style.leading() + style.space_after
    }

    /// Image XObject centred horizontally.
    pub fn image(&mut self, name: &[u8], width: f32, height: f32) {
        self.ensure(height);
        let x = self.geometry.left + (self.geometry.width() - width) / 2.0;
        let y = self.cursor - height;
        let page = self.page();
        page.save_state();
        page.transform([width, 0.0, 0.0, height, x, y]);
        page.x_object(Name(name));
        page.restore_state();
        self.cursor = y;
    }

    /// Height of the header rows plus the first body row of a table.
    pub fn table_lead_height(&self, table: &Table) -> f32 {
        table
            .rows
            .iter()
            .take(table.header_rows + 1)
            .map(|row| table.wrapped_row(row).1)
            .sum()
    }

    /// Table centred horizontally, split between rows across pages.
    ///
    /// A row taller than a whole page is split between its wrapped lines.
    pub fn table(&mut self, table: &Table) {
        let x = self.geometry.left + (self.geometry.width() - table.width()).max(0.0) / 2.0;
        let header: Vec<_> = table
            .rows
            .iter()
            .take(table.header_rows)
            .map(|row| table.wrapped_row(row))
            .collect();
        let leading = table.font_size * LEADING_FACTOR;

        for (index, row) in table.rows.iter().enumerate() {
            let (lines, height) = table.wrapped_row(row);

            if height > self.remaining() && !self.at_page_top() {
                self.continue_table(table, x, &header, index);
            }
            if height <= self.remaining() {
                self.draw_row(table, x, row, &lines, height);
                continue;
            }

            let total = lines.iter().map(Vec::len).max().unwrap_or(0);
            let mut start = 0;
            while start < total {
                let fit = ((self.remaining() - 2.0 * table.padding) / leading).floor();
                let end = (start + (fit.max(1.0) as usize)).min(total);
                let slice: Vec<Vec<String>> = lines
                    .iter()
                    .map(|cell| cell[start.min(cell.len())..end.min(cell.len())].to_vec())
                    .collect();
                let slice_height = (end - start) as f32 * leading + 2.0 * table.padding;
                self.draw_row(table, x, row, &slice, slice_height);
                start = end;
                if start < total {
                    self.continue_table(table, x, &header, index);
                }
            }
        }
    }

    /// New page, with the header rows repeated when a body row follows.
    fn continue_table(
        &mut self,
        table: &Table,
        x: f32,
        header: &[(Vec<Vec<String>>, f32)],
        index: usize,
    ) {
        self.new_page();
        if index >= table.header_rows {
            for ((header_lines, header_height), header_cells) in header.iter().zip(&table.rows) {
                self.draw_row(table, x, header_cells, header_lines, *header_height);
            }
        }
    }

    fn draw_row(&mut self, table: &Table, x: f32, cells: &[Cell], lines: &[Vec<String>], height: f32) {
        let top = self.cursor;
        let bottom = top - height;
        let leading = table.font_size * LEADING_FACTOR;
        let mut cell_x = x;

        for ((cell, cell_lines), width) in cells.iter().zip(lines).zip(&table.col_widths) {
            let page = self.page();
            if let Some(bg) = cell.background {
                page.set_fill_rgb(bg[0], bg[1], bg[2]);
                page.rect(cell_x, bottom, *width, height);
                page.fill_nonzero();
            }

            // Vertically centred text block
            let block = cell_lines.len() as f32 * leading;
            let mut baseline = top - (height - block) / 2.0 - table.font_size;
            for line in cell_lines {
                if !line.is_empty() {
                    let inner = width - 2.0 * table.padding;
                    let tx = align_x(
                        cell_x + table.padding,
                        inner,
                        line,
                        cell.face,
                        table.font_size,
                        cell.align,
                    );
                    show_text(page, line, cell.face, table.font_size, cell.color, tx, baseline);
                }
                baseline -= leading;
            }

            if let Some(line_width) = table.grid {
                page.set_line_width(line_width);
                page.set_stroke_rgb(BLACK[0], BLACK[1], BLACK[2]);
                page.rect(cell_x, bottom, *width, height);
                page.stroke();
            }
            cell_x += width;
        }

        self.cursor = bottom;
    }

    /// Finish layout, optionally stamping page numbers in the bottom margin.
    pub fn finish(mut self, page_numbers: Option<(&TextStyle, f32)>) -> Vec<Content> {
        if let Some((style, baseline)) = page_numbers {
            let total = self.pages.len();
            let right = self.geometry.right;
            for (index, page) in self.pages.iter_mut().enumerate() {
                let label = format!("Página {} de {}", index + 1, total);
                let x = right - text_width(&label, style.face, style.size);
                show_text(page, &label, style.face, style.size, style.color, x, baseline);
            }
        }
        self.pages
    }
}

fn align_x(left: f32, width: f32, text: &str, face: FontFace, size: f32, align: Align) -> f32 {
    match align {
        Align::Left => left,
        Align::Center => left + (width - text_width(text, face, size)) / 2.0,
        Align::Right => left + width - text_width(text, face, size),
    }
}

fn show_text(page: &mut Content, text: &str, face: FontFace, size: f32, color: Rgb, x: f32, y: f32) {
    let bytes = encode_win_ansi(text);
    page.set_fill_rgb(color[0], color[1], color[2]);
    page.begin_text();
    page.set_font(Name(face.resource_name()), size);
    page.next_line(x, y);
    page.show(Str(&bytes));
    page.end_text();
}
