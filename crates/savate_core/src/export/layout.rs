//! Page layout for printed reports
//!
//! Produces a list of pages, each a list of positioned draw operations, in
//! PDF points with the origin at the bottom-left corner. The renderer only
//! translates these into content streams. Text is measured with the standard
//! Helvetica metrics, so wrapping matches what the viewer draws.

use unicode_normalization::UnicodeNormalization;

use crate::config::ReportConfig;

pub const PT_PER_MM: f64 = 72.0 / 25.4;

pub fn mm(value: f64) -> f64 {
    value * PT_PER_MM
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Regular,
    Bold,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text { x: f64, y: f64, font: Font, size: f64, text: String },
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            DrawOp::Line { .. } => None,
        })
    }
}

// Helvetica advance widths for 0x20..=0x7E, per 1000 units of font size
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

fn char_width(c: char) -> u16 {
    match c {
        'œ' => return 944,
        'Œ' => return 1000,
        '\u{2019}' => return 222,
        _ => {}
    }
    // accented letters take the advance of their base letter
    let base = std::iter::once(c).nfd().next().unwrap_or(c);
    let code = base as u32;
    if (0x20..=0x7E).contains(&code) {
        HELVETICA_WIDTHS[(code - 0x20) as usize]
    } else {
        556
    }
}

/// Width of `text` in points at `size`.
pub fn text_width(text: &str, font: Font, size: f64) -> f64 {
    let units: u32 = text.chars().map(|c| char_width(c) as u32).sum();
    let width = units as f64 * size / 1000.0;
    match font {
        Font::Regular => width,
        // Helvetica-Bold runs about 6% wider on running text
        Font::Bold => width * 1.06,
    }
}

/// Greedy word wrap. A single word wider than `max_width` gets its own line.
pub fn wrap_words(text: &str, font: Font, size: f64, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }
        let candidate = format!("{} {}", line, word);
        if text_width(&candidate, font, size) <= max_width {
            line = candidate;
        } else {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Cut `text` to at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Top-down writer over a growing list of pages.
#[derive(Debug)]
pub struct PageWriter<'a> {
    config: &'a ReportConfig,
    pages: Vec<Page>,
    y: f64,
}

impl<'a> PageWriter<'a> {
    pub fn new(config: &'a ReportConfig) -> Self {
        Self { config, pages: vec![Page::default()], y: mm(config.page_height_mm - config.margin_mm) }
    }

    pub fn config(&self) -> &ReportConfig {
        self.config
    }

    pub fn left(&self) -> f64 {
        mm(self.config.margin_mm)
    }

    pub fn right(&self) -> f64 {
        mm(self.config.page_width_mm - self.config.margin_mm)
    }

    /// Cursor height above the bottom edge, in points.
    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.y = mm(self.config.page_height_mm - self.config.margin_mm);
    }

    /// Start a new page when less than `min_mm` is left below the cursor.
    /// Returns whether a page was added.
    pub fn ensure_space(&mut self, min_mm: f64) -> bool {
        if self.y < mm(min_mm) {
            self.new_page();
            true
        } else {
            false
        }
    }

    pub fn down_mm(&mut self, value: f64) {
        self.y -= mm(value);
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    /// Text at the cursor height, `dx` points right of the left margin.
    pub fn text(&mut self, dx: f64, font: Font, size: f64, text: &str) {
        self.text_at(self.left() + dx, self.y, font, size, text);
    }

    pub fn text_at(&mut self, x: f64, y: f64, font: Font, size: f64, text: &str) {
        if text.is_empty() {
            return;
        }
        self.push(DrawOp::Text { x, y, font, size, text: text.to_string() });
    }

    /// Horizontal rule across the printable width at the cursor.
    pub fn rule(&mut self) {
        let (x1, x2, y) = (self.left(), self.right(), self.y);
        self.push(DrawOp::Line { x1, y1: y, x2, y2: y });
    }

    /// Wrapped body text starting `dx` right of the margin, one leading per
    /// line. Lines that would cross the bottom margin continue on a new page.
    pub fn paragraph(&mut self, dx: f64, max_width: f64, text: &str) {
        let size = self.config.body_font_pt;
        let leading = self.config.leading_pt;
        let bottom = mm(self.config.margin_mm);
        for line in wrap_words(text, Font::Regular, size, max_width) {
            if self.y < bottom {
                self.new_page();
            }
            self.text(dx, Font::Regular, size, &line);
            self.y -= leading;
        }
    }

    pub fn finish(self) -> Vec<Page> {
        self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width() {
        // "Bon" = 667 + 556 + 556
        assert!((text_width("Bon", Font::Regular, 10.0) - 17.79).abs() < 1e-9);
        assert_eq!(text_width("é", Font::Regular, 10.0), text_width("e", Font::Regular, 10.0));
        assert_eq!(text_width("Peña São", Font::Regular, 10.0), text_width("Pena Sao", Font::Regular, 10.0));
        assert!(text_width("Bon", Font::Bold, 10.0) > text_width("Bon", Font::Regular, 10.0));
    }

    #[test]
    fn test_wrap_greedy() {
        // each "aaaa" is 22.24pt at 10pt, a space 2.78pt
        let lines = wrap_words("aaaa aaaa aaaa", Font::Regular, 10.0, 50.0);
        assert_eq!(lines, vec!["aaaa aaaa", "aaaa"]);
        let lines = wrap_words("  ", Font::Regular, 10.0, 50.0);
        assert!(lines.is_empty());
        let lines = wrap_words("Intermittent court", Font::Regular, 10.0, 5.0);
        assert_eq!(lines, vec!["Intermittent", "court"]);
    }

    #[test]
    fn test_wrap_keeps_every_word() {
        let text = "Priorité : prévention (tendons, mollets, ischios), échauffement long, montée en charge progressive.";
        let lines = wrap_words(text, Font::Regular, 10.0, 120.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
        for line in &lines {
            assert!(line.split(' ').count() == 1 || text_width(line, Font::Regular, 10.0) <= 120.0);
        }
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("Récupération", 3), "Réc");
        assert_eq!(truncate_chars("court", 45), "court");
    }

    #[test]
    fn test_ensure_space_breaks_page() {
        let config = ReportConfig::default();
        let mut writer = PageWriter::new(&config);
        assert!(!writer.ensure_space(70.0));
        writer.down_mm(200.0);
        // 297 - 18 - 200 = 79mm left
        assert!(!writer.ensure_space(70.0));
        writer.down_mm(10.0);
        assert!(writer.ensure_space(70.0));
        assert_eq!(writer.page_count(), 2);
        assert!((writer.y() - mm(279.0)).abs() < 1e-9);
    }

    #[test]
    fn test_paragraph_continues_on_next_page() {
        let config = ReportConfig::default();
        let mut writer = PageWriter::new(&config);
        writer.down_mm(255.0);
        let text = vec!["mot"; 200].join(" ");
        writer.paragraph(0.0, 100.0, &text);
        let pages = writer.finish();
        assert_eq!(pages.len(), 2);
        let words: usize = pages.iter().flat_map(|p| p.texts()).map(|t| t.split(' ').count()).sum();
        assert_eq!(words, 200);
    }
}
