use super::{CollapsedRange, DisplayLine, SideBySide};

/// Collapses runs of unchanged rows, keeping `context_radius` rows around
/// every added or removed line.
///
/// The first and last rows (the root braces) always survive. Each hidden run
/// becomes a single expandable line on both sides, and kept rows record
/// their position in the input as `original_index`.
///
/// ```
/// # use tapose_core::{compare, filter, project, Format, LineKind};
/// let nodes = compare("{\"a\":1,\"b\":2,\"c\":3}", "{\"a\":1,\"b\":2,\"c\":4}", Format::Json)?;
/// let lines = project(&nodes);
/// let filtered = filter(&lines.left, &lines.right, 0);
/// assert_eq!(filtered.left[1].text, "... 2 same lines ...");
/// assert_eq!(filtered.right[2].kind, LineKind::Added);
/// # Ok::<(), tapose_core::CompareError>(())
/// ```
#[must_use]
pub fn filter(left: &[DisplayLine], right: &[DisplayLine], context_radius: usize) -> SideBySide {
    let rows = left.len().min(right.len());
    if rows == 0 {
        return SideBySide::default();
    }

    let mut keep = vec![false; rows];
    keep[0] = true;
    keep[rows - 1] = true;
    for row in 0..rows {
        if left[row].is_change() || right[row].is_change() {
            let start = row.saturating_sub(context_radius);
            let end = row.saturating_add(context_radius).min(rows - 1);
            keep[start..=end].fill(true);
        }
    }

    let mut out = SideBySide::default();
    let mut row = 0;
    while row < rows {
        if keep[row] {
            out.left.push(DisplayLine { original_index: Some(row), ..left[row].clone() });
            out.right.push(DisplayLine { original_index: Some(row), ..right[row].clone() });
            row += 1;
            continue;
        }

        let start = row;
        while row < rows && !keep[row] {
            row += 1;
        }
        tracing::trace!(start, end = row - 1, "collapsed unchanged run");
        out.push_both(DisplayLine::expandable(CollapsedRange { start, end: row - 1 }));
    }
    out
}
