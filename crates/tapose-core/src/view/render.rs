use super::{DisplayLine, LineKind, ProcessedLines};
use crate::value::indent;

const COLOR_RESET: &str = "\u{1b}[0m";
const COLOR_RED: &str = "\u{1b}[31m";
const COLOR_GREEN: &str = "\u{1b}[32m";
const COLOR_DIM: &str = "\u{1b}[2m";

const SEPARATOR: &str = " │ ";

/// Configuration toggles for terminal rendering.
#[derive(Clone, Copy, Debug, Default)]
pub struct RenderConfig {
    color: bool,
}

impl RenderConfig {
    /// Constructs a configuration with default settings (no ANSI color).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables ANSI color output.
    #[must_use]
    pub fn with_color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    /// Indicates whether color output is enabled.
    #[must_use]
    pub fn color_enabled(self) -> bool {
        self.color
    }
}

/// Lays out both panels next to each other, one row per line.
///
/// Each panel gets a right-aligned number gutter (blank for `0`) and a
/// `-`/`+` marker column. The left panel is padded to its widest line.
///
/// ```
/// # use tapose_core::{compare, process, render_side_by_side, Format, RenderConfig, ViewOptions};
/// let nodes = compare("{\"a\":1}", "{\"a\":2}", Format::Json)?;
/// let lines = process(&nodes, &ViewOptions::show_all());
/// let text = render_side_by_side(&lines, &RenderConfig::default());
/// assert_eq!(text.lines().nth(1), Some("2 -   \"a\": 1 │ 2 +   \"a\": 2"));
/// # Ok::<(), tapose_core::CompareError>(())
/// ```
#[must_use]
pub fn render_side_by_side(lines: &ProcessedLines, config: &RenderConfig) -> String {
    let left_cells: Vec<String> = lines.left.iter().map(cell).collect();
    let right_cells: Vec<String> = lines.right.iter().map(cell).collect();
    let left_width = left_cells.iter().map(|text| text.chars().count()).max().unwrap_or(0);
    let left_gutter = gutter_width(&lines.left_numbers);
    let right_gutter = gutter_width(&lines.right_numbers);

    let rows = left_cells.len().min(right_cells.len());
    let mut output = String::new();
    for row in 0..rows {
        let mut line = String::new();
        push_gutter(&mut line, lines.left_numbers.get(row).copied(), left_gutter);
        push_cell(&mut line, &lines.left[row], &left_cells[row], config);
        let pad = left_width - left_cells[row].chars().count();
        line.push_str(&" ".repeat(pad));
        line.push_str(SEPARATOR);
        push_gutter(&mut line, lines.right_numbers.get(row).copied(), right_gutter);
        push_cell(&mut line, &lines.right[row], &right_cells[row], config);

        output.push_str(line.trim_end());
        output.push('\n');
    }
    output
}

fn cell(line: &DisplayLine) -> String {
    if line.kind == LineKind::Placeholder {
        return String::new();
    }
    format!("{}{}", indent(line.indent), line.text)
}

fn gutter_width(numbers: &[usize]) -> usize {
    numbers.iter().max().map_or(1, |max| max.to_string().len())
}

fn push_gutter(line: &mut String, number: Option<usize>, width: usize) {
    match number {
        Some(number) if number > 0 => line.push_str(&format!("{number:>width$}")),
        _ => line.push_str(&" ".repeat(width)),
    }
}

fn push_cell(line: &mut String, display: &DisplayLine, text: &str, config: &RenderConfig) {
    let (marker, color) = match display.kind {
        LineKind::Removed => ('-', Some(COLOR_RED)),
        LineKind::Added => ('+', Some(COLOR_GREEN)),
        LineKind::Expandable => (' ', Some(COLOR_DIM)),
        LineKind::Unchanged | LineKind::Header | LineKind::Placeholder => (' ', None),
    };
    line.push(' ');
    line.push(marker);
    line.push(' ');
    match color {
        Some(color) if config.color_enabled() && !text.is_empty() => {
            line.push_str(color);
            line.push_str(text);
            line.push_str(COLOR_RESET);
        }
        _ => line.push_str(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compare, process, Format, ViewOptions};

    fn render(left: &str, right: &str, options: &ViewOptions, config: RenderConfig) -> String {
        let nodes = compare(left, right, Format::Json).unwrap();
        render_side_by_side(&process(&nodes, options), &config)
    }

    #[test]
    fn plain_rendering_aligns_both_panels() {
        let text = render("{\"a\":1}", "{\"a\":2}", &ViewOptions::show_all(), RenderConfig::new());
        let pad = " ".repeat(7);
        let expected = format!(
            "1   {{{pad} │ 1   {{\n2 -   \"a\": 1 │ 2 +   \"a\": 2\n3   }}{pad} │ 3   }}\n"
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn placeholders_leave_a_blank_gutter() {
        let text = render("{\"a\":1,\"b\":2}", "{\"b\":2}", &ViewOptions::show_all(), RenderConfig::new());
        let second = text.lines().nth(1).unwrap();
        assert!(second.starts_with("2 -   \"a\": 1,"));
        assert!(second.ends_with(SEPARATOR.trim_end()));
    }

    #[test]
    fn color_wraps_changed_text_only() {
        let text = render(
            "{\"a\":1}",
            "{\"a\":2}",
            &ViewOptions::show_all(),
            RenderConfig::new().with_color(true),
        );
        let second = text.lines().nth(1).unwrap();
        assert!(second.contains("\u{1b}[31m  \"a\": 1\u{1b}[0m"));
        assert!(second.contains("\u{1b}[32m  \"a\": 2\u{1b}[0m"));
        assert!(!text.lines().next().unwrap().contains('\u{1b}'));
    }

    #[test]
    fn collapsed_runs_are_dimmed() {
        let left = "{\"a\":1,\"b\":2,\"c\":3,\"d\":4,\"e\":5,\"f\":6}";
        let right = "{\"a\":1,\"b\":2,\"c\":3,\"d\":4,\"e\":5,\"f\":7}";
        let options = ViewOptions::default().with_context_lines(1).unwrap();
        let text = render(left, right, &options, RenderConfig::new().with_color(true));
        assert!(text.contains("\u{1b}[2m... 4 same lines ...\u{1b}[0m"));
    }
}
