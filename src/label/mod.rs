//! Ready-made content provider for nodes that display a single text label.
//!
//! Labels are split on newlines, wrapped at word boundaries once they exceed
//! the configured width, and padded. A node that fixes its own size through
//! [`Labeled::preset_size`] keeps it. Glyph widths come from the installed font
//! when the `font-metrics` feature is on and a face resolves; otherwise from a
//! built-in per-character table.

#[cfg(feature = "font-metrics")]
mod font;

use crate::config::LabelConfig;
use crate::geometry::{ContentSize, Size};
use crate::model::{ContentProvider, Labeled, ModelNode};

#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone)]
pub struct LabelSizer {
    config: LabelConfig,
}

impl LabelSizer {
    pub fn new(config: LabelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LabelConfig {
        &self.config
    }

    pub fn measure(&self, text: &str) -> TextBlock {
        let config = &self.config;
        let mut lines = Vec::new();
        for line in text.split('\n') {
            lines.extend(self.wrap_line(line.trim()));
        }
        if lines.is_empty() {
            lines.push(String::new());
        }
        let width = lines
            .iter()
            .map(|line| self.text_width(line))
            .fold(0.0, f32::max);
        let height = lines.len() as f32 * config.font_size * config.line_height;
        TextBlock {
            lines,
            width,
            height,
        }
    }

    fn wrap_line(&self, line: &str) -> Vec<String> {
        if self.text_width(line) <= self.config.max_width {
            return vec![line.to_string()];
        }
        let mut lines = Vec::new();
        let mut current = String::new();
        for word in line.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if self.text_width(&candidate) > self.config.max_width && !current.is_empty() {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            } else {
                current = candidate;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }

    fn text_width(&self, text: &str) -> f32 {
        let font_size = self.config.font_size;
        if !self.config.fast_metrics
            && let Some(width) = font_text_width(text, font_size, &self.config.font_family)
        {
            return width;
        }
        fallback_text_width(text, font_size)
    }
}

impl Default for LabelSizer {
    fn default() -> Self {
        Self::new(LabelConfig::default())
    }
}

impl<N: ModelNode + Labeled> ContentProvider<N> for LabelSizer {
    fn content_size(&self, node: &N) -> ContentSize {
        if let Some(size) = node.preset_size() {
            return size;
        }
        let block = self.measure(node.label());
        Size::new(
            block.width + self.config.padding_x * 2.0,
            block.height + self.config.padding_y * 2.0,
        )
    }
}

#[cfg(feature = "font-metrics")]
fn font_text_width(text: &str, font_size: f32, font_family: &str) -> Option<f32> {
    font::measure_text_width(text, font_size, font_family)
}

#[cfg(not(feature = "font-metrics"))]
fn font_text_width(_text: &str, _font_size: f32, _font_family: &str) -> Option<f32> {
    None
}

fn fallback_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().map(glyph_width_factor).sum::<f32>() * font_size
}

/// Approximate advance of `ch` as a fraction of the font size for a
/// proportional sans-serif face.
fn glyph_width_factor(ch: char) -> f32 {
    match ch {
        'i' | 'j' | 'l' | 'I' | '\'' | '|' | '.' | ',' | ':' | ';' | '!' => 0.25,
        ' ' | 'f' | 't' | 'r' | '(' | ')' | '[' | ']' | '{' | '}' | '/' | '\\' | '-' => 0.33,
        'm' | 'w' => 0.84,
        'M' | 'W' | '@' | '%' => 0.93,
        '0'..='9' => 0.6,
        'A'..='Z' => 0.67,
        'a'..='z' => 0.56,
        '\t' => 1.2,
        _ if is_wide(ch) => 1.0,
        _ => 0.57,
    }
}

/// East Asian scripts render at roughly one em per glyph.
fn is_wide(ch: char) -> bool {
    matches!(
        ch,
        '\u{1100}'..='\u{115f}'
            | '\u{2e80}'..='\u{a4cf}'
            | '\u{ac00}'..='\u{d7a3}'
            | '\u{f900}'..='\u{faff}'
            | '\u{ff00}'..='\u{ff60}'
    )
}
