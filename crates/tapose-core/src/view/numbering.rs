use super::{DisplayLine, LineKind};

/// Assigns gutter numbers to one side.
///
/// Placeholders and expandable lines get `0`. An expandable line still
/// advances the counter by the rows it hides, so numbers after a collapsed
/// run match the unfiltered document.
///
/// ```
/// # use tapose_core::{number, CollapsedRange, DisplayLine, LineKind};
/// let lines = vec![
///     DisplayLine::new("{", LineKind::Header, 0),
///     DisplayLine::expandable(CollapsedRange { start: 1, end: 3 }),
///     DisplayLine::placeholder(1),
///     DisplayLine::new("}", LineKind::Header, 0),
/// ];
/// assert_eq!(number(&lines), [1, 0, 0, 5]);
/// ```
#[must_use]
pub fn number(lines: &[DisplayLine]) -> Vec<usize> {
    let mut next = 1;
    lines
        .iter()
        .map(|line| match line.kind {
            LineKind::Placeholder => 0,
            LineKind::Expandable => {
                next += line.collapsed.map_or(0, |collapsed| collapsed.count);
                0
            }
            LineKind::Unchanged | LineKind::Added | LineKind::Removed | LineKind::Header => {
                let current = next;
                next += 1;
                current
            }
        })
        .collect()
}
