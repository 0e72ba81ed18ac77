//! Column layout engine
//!
//! Turns a batch of rendered entries into output lines. An entry is one
//! [`Cell`] per active column, in display order; widths are computed over
//! the batch that is being laid out and never shared between batches.
//!
//! ## Single-column mode
//!
//! One entry per line. Every column except the last is padded to the widest
//! cell of that column (using the column's alignment); the last column is
//! emitted at its natural width so lines carry no trailing whitespace.
//! Columns are joined by one space unless either neighbour is a margin.
//!
//! ## Grid mode
//!
//! Each entry is first rendered exactly like a single-column line, then
//! entries are packed row-major into lines no wider than the target width.
//! All entries are padded to the widest entry and separated by a margin.

use crate::render;
use crate::styling::{Align, Segment, StyledLine};

/// Segments produced for one column of one entry
pub type Cell = Vec<Segment>;

/// One rendered entry: a cell per column
pub type Row = Vec<Cell>;

fn cell_width(cell: &[Segment]) -> usize {
    cell.iter().map(Segment::width).sum()
}

/// Per-column maximum of the segment-sum width across the batch.
pub fn column_widths(rows: &[Row]) -> Vec<usize> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    (0..columns)
        .map(|col| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell_width(cell))
                .max()
                .unwrap_or(0)
        })
        .collect()
}

/// Lays out one row against precomputed widths and alignments.
///
/// Columns that are empty across the whole batch (width 0) are skipped so
/// they don't leave stray separators behind.
pub fn layout_row(row: &[Cell], widths: &[usize], aligns: &[Align]) -> StyledLine {
    let mut line = StyledLine::new();
    let last = row.len().saturating_sub(1);
    let mut previous_ends_with_margin = true;

    for (col, cell) in row.iter().enumerate() {
        let width = widths.get(col).copied().unwrap_or(0);
        if width == 0 && col != last {
            continue;
        }
        let align = aligns.get(col).copied().unwrap_or_default();

        let starts_with_margin = cell.first().is_some_and(|s| s.margin);
        if !line.is_empty() && !previous_ends_with_margin && !starts_with_margin {
            line.push_raw(" ");
        }

        let mut content = StyledLine::new();
        for segment in cell {
            // Pin the column alignment so min-width padding survives rendering
            content.push(segment.clone().with_align(segment.align.unwrap_or(align)));
        }
        if col != last {
            match align {
                Align::Right => content.pad_left_to(width),
                Align::Left => content.pad_to(width),
            }
        }

        previous_ends_with_margin = cell.last().is_some_and(|s| s.margin);
        line.extend(content);
    }
    line
}

/// Single-column mode: one line per entry.
pub fn single_column(rows: &[Row], aligns: &[Align]) -> Vec<StyledLine> {
    let widths = column_widths(rows);
    rows.iter()
        .map(|row| layout_row(row, &widths, aligns))
        .collect()
}

/// How many entries of `entry_width` fit on a line of `total_width` when
/// separated by `margin_width`. Never less than one.
pub fn entries_per_row(entry_width: usize, total_width: usize, margin_width: usize) -> usize {
    let stride = entry_width + margin_width;
    if stride == 0 {
        return 1;
    }
    ((total_width + margin_width) / stride).max(1)
}

/// Grid mode: entries packed row-major into lines of at most `total_width`.
///
/// A single entry wider than `total_width` still gets a line to itself.
pub fn grid(
    rows: &[Row],
    aligns: &[Align],
    total_width: usize,
    margin_width: usize,
) -> Vec<StyledLine> {
    let entries = single_column(rows, aligns);
    let entry_width = entries.iter().map(StyledLine::width).max().unwrap_or(0);
    let per_row = entries_per_row(entry_width, total_width, margin_width);

    entries
        .chunks(per_row)
        .map(|chunk| {
            let mut line = StyledLine::new();
            let last = chunk.len() - 1;
            for (i, entry) in chunk.iter().enumerate() {
                let mut entry = entry.clone();
                if i != last {
                    entry.pad_to(entry_width);
                }
                line.extend(entry);
                if i != last {
                    line.extend(StyledLine::from(render::margin(margin_width)));
                }
            }
            line
        })
        .collect()
}
