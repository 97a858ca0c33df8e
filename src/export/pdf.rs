//! Minimal tabular PDF renderer on top of `pdf-writer`.
//!
//! Renders a titled, zebra-striped table across as many A4 pages as needed.
//! Object ids are managed by hand; one Helvetica Type1 font is shared by all
//! pages.

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

const PAGE_W: f32 = 595.0; // A4 portrait, points
const PAGE_H: f32 = 842.0;
const MARGIN: f32 = 50.0;
const ROW_H: f32 = 20.0;

const FONT_SIZE: f32 = 10.0;
const HEADER_FONT_SIZE: f32 = 11.0;
const TITLE_FONT_SIZE: f32 = 14.0;

/// Roughly how many characters fit one point of column width at FONT_SIZE.
const CHAR_W: f32 = 6.2;

pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    font_id: Ref,
    page_refs: Vec<Ref>,
    current_content_id: Option<Ref>,
    next_id: i32,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfManager {
    pub fn new() -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            font_id,
            page_refs: Vec::new(),
            current_content_id: None,
            next_id: 4,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    fn new_page(&mut self) -> Content {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();

        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, PAGE_W, PAGE_H))
            .contents(content_id);
        page.resources().fonts().pair(Name(b"F1"), self.font_id);

        self.current_content_id = Some(content_id);

        Content::new()
    }

    fn finalize_page(&mut self, content: Content) {
        if let Some(id) = self.current_content_id {
            self.pdf.stream(id, &content.finish());
        }
    }

    fn draw_text(&self, content: &mut Content, x: f32, y: f32, size: f32, text: &str) {
        content.begin_text();
        content.set_font(Name(b"F1"), size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(text.as_bytes()));
        content.end_text();
    }

    fn draw_cell_borders(&self, content: &mut Content, x: f32, y: f32, w: f32, h: f32) {
        content.save_state();
        content.set_stroke_rgb(0.65, 0.65, 0.65);
        content.rect(x, y, w, h);
        content.stroke();
        content.restore_state();
    }

    fn draw_row(
        &self,
        content: &mut Content,
        y: f32,
        col_widths: &[f32],
        row: &[String],
        font_size: f32,
    ) {
        let mut x = MARGIN;

        for (i, text) in row.iter().enumerate() {
            let w = col_widths[i];
            let fitted = fit_cell(text, w);
            self.draw_text(content, x + 4.0, y + 5.0, font_size, &fitted);
            self.draw_cell_borders(content, x, y, w, ROW_H);
            x += w;
        }
    }

    /// Column widths follow header + content, scaled down to the printable
    /// width when the natural total overflows.
    fn compute_col_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<f32> {
        let mut widths: Vec<f32> = headers.iter().map(|h| h.len() as f32 * 6.5).collect();

        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.len() as f32 * CHAR_W);
            }
        }

        let total: f32 = widths.iter().sum();
        let max = PAGE_W - 2.0 * MARGIN;

        if total > max {
            let scale = max / total;
            for w in &mut widths {
                *w *= scale;
            }
        }

        widths
    }

    fn draw_page_chrome(&self, content: &mut Content, title: &str, page: usize) {
        self.draw_text(
            content,
            MARGIN,
            PAGE_H - MARGIN + 15.0,
            TITLE_FONT_SIZE,
            title,
        );

        let pg = format!("Page {}", page);
        self.draw_text(content, PAGE_W - MARGIN - 60.0, MARGIN - 35.0, FONT_SIZE, &pg);
    }

    fn draw_header_band(&self, content: &mut Content, y: f32, width: f32) {
        content.save_state();
        content.set_fill_rgb(0.85, 0.87, 0.90);
        content.rect(MARGIN, y, width, ROW_H);
        content.fill_nonzero();
        content.restore_state();
    }

    /// Multi-page table with title. An empty dataset still produces one page
    /// with the header row.
    pub fn write_table(&mut self, title: &str, headers: &[&str], rows: &[Vec<String>]) {
        let col_widths = Self::compute_col_widths(headers, rows);
        let table_w: f32 = col_widths.iter().sum();
        let header_row: Vec<String> = headers.iter().map(|s| s.to_string()).collect();

        let mut remaining: &[Vec<String>] = rows;
        let mut page_idx = 1;

        loop {
            let mut content = self.new_page();
            self.draw_page_chrome(&mut content, title, page_idx);

            let mut y = PAGE_H - MARGIN - 30.0;

            self.draw_header_band(&mut content, y, table_w);
            self.draw_row(&mut content, y, &col_widths, &header_row, HEADER_FONT_SIZE);
            y -= ROW_H;

            let mut consumed = 0;
            for (i, row) in remaining.iter().enumerate() {
                if y - ROW_H < MARGIN {
                    break;
                }

                // zebra stripe
                if i % 2 == 0 {
                    content.save_state();
                    content.set_fill_rgb(0.96, 0.96, 0.96);
                    content.rect(MARGIN, y, table_w, ROW_H);
                    content.fill_nonzero();
                    content.restore_state();
                }

                self.draw_row(&mut content, y, &col_widths, row, FONT_SIZE);
                y -= ROW_H;
                consumed += 1;
            }

            self.finalize_page(content);

            remaining = &remaining[consumed..];
            if remaining.is_empty() {
                break;
            }
            page_idx += 1;
        }
    }

    pub fn save(mut self, path: &Path) -> io::Result<()> {
        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.clone());
        drop(pages);

        self.pdf.catalog(self.catalog_id).pages(self.pages_id);

        let bytes = self.pdf.finish();
        let mut file = File::create(path)?;
        file.write_all(&bytes)?;
        Ok(())
    }
}

/// Shorten a cell so it stays inside its column instead of bleeding into the
/// next one.
fn fit_cell(text: &str, col_width: f32) -> String {
    let max_chars = ((col_width - 8.0) / CHAR_W).max(1.0) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    match textwrap::wrap(text, max_chars.max(2) - 1).first() {
        Some(first) => format!("{first}…"),
        None => String::new(),
    }
}
