//! Page content stream: one positioned `Tj` per display line.

use crate::layout::DisplayLine;

/// Fixed placement of text on the single page, in PDF units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub width: i32,
    pub height: i32,
    pub left_margin: i32,
    pub top: i32,
    pub line_pitch: i32,
    pub bottom_margin: i32,
    pub font_size: i32,
}

impl Default for PageLayout {
    fn default() -> Self {
        PageLayout {
            width: 612,
            height: 792,
            left_margin: 50,
            top: 760,
            line_pitch: 16,
            bottom_margin: 40,
            font_size: 12,
        }
    }
}

impl PageLayout {
    /// Number of lines that fit before the cursor drops under the bottom margin.
    pub fn capacity(&self) -> usize {
        if self.top < self.bottom_margin || self.line_pitch <= 0 {
            return 0;
        }
        ((self.top - self.bottom_margin) / self.line_pitch) as usize + 1
    }
}

/// Escapes a string for use inside a PDF literal string `( ... )`.
///
/// Backslashes go first, or the ones added for parentheses would be doubled.
pub fn escape_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}

/// Builds the text operators for `lines`, silently dropping whatever does not
/// fit on the page.
pub fn build_content(lines: &[DisplayLine], layout: &PageLayout, font: &str) -> Vec<u8> {
    let mut ops = vec![
        "BT".to_string(),
        format!("/{} {} Tf", font, layout.font_size),
    ];
    let mut y = layout.top;
    for line in lines {
        if y < layout.bottom_margin {
            break;
        }
        ops.push(format!(
            "1 0 0 1 {} {} Tm ({}) Tj",
            layout.left_margin,
            y,
            escape_text(line.as_str())
        ));
        y -= layout.line_pitch;
    }
    ops.push("ET".to_string());
    ops.join("\n").into_bytes()
}
