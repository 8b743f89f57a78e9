//! Placement of text labels (tick values, legend) over the braille plot.

use crate::plot::PlotFrame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Tick,
    BaseLegend,
    TransformedLegend,
}

/// Text anchored at a character cell, relative to the plot area.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub col: u16,
    pub row: u16,
    pub text: String,
    pub kind: LabelKind,
}

/// Dots per character cell horizontally and vertically.
const CELL_W: f64 = 2.0;
const CELL_H: f64 = 4.0;

/// Compute tick and legend labels for a frame drawn on a `cols × rows` canvas.
///
/// Labels that would fall outside the area or collide with an already placed
/// label are dropped.
pub fn compute_labels(frame: &PlotFrame, cols: u16, rows: u16, show_legend: bool) -> Vec<Label> {
    let mut labels: Vec<Label> = Vec::new();
    if cols == 0 || rows == 0 {
        return labels;
    }

    let vp = frame.viewport;
    let axis_col = (vp.to_pixel_x(0.0).round() / CELL_W) as i32;
    let axis_row = (vp.to_pixel_y(0.0).round() / CELL_H) as i32;

    if show_legend {
        let legend = [
            (format!("── {}", frame.base_label), LabelKind::BaseLegend),
            (format!("── {}", frame.formula), LabelKind::TransformedLegend),
        ];
        for (row, (text, kind)) in legend.into_iter().enumerate() {
            let width = text.chars().count() as i32;
            let col = cols as i32 - width - 1;
            place(&mut labels, col, row as i32, text, kind, cols, rows);
        }
    }

    for tick in frame.x_ticks.iter().filter(|t| !t.label.is_empty()) {
        let width = tick.label.chars().count() as i32;
        let col = (tick.pixel_x.round() / CELL_W) as i32 - width / 2;
        place(&mut labels, col, axis_row + 1, tick.label.clone(), LabelKind::Tick, cols, rows);
    }

    for tick in &frame.y_ticks {
        let width = tick.label.chars().count() as i32;
        let row = (tick.pixel_y.round() / CELL_H) as i32;
        place(&mut labels, axis_col - width - 1, row, tick.label.clone(), LabelKind::Tick, cols, rows);
    }

    labels
}

fn place(
    labels: &mut Vec<Label>,
    col: i32,
    row: i32,
    text: String,
    kind: LabelKind,
    cols: u16,
    rows: u16,
) {
    let width = text.chars().count() as i32;
    if col < 0 || row < 0 || col + width > cols as i32 || row >= rows as i32 {
        return;
    }
    let overlaps = labels.iter().any(|l| {
        let l_width = l.text.chars().count() as i32;
        l.row as i32 == row && col <= l.col as i32 + l_width && l.col as i32 <= col + width
    });
    if overlaps {
        return;
    }
    labels.push(Label {
        col: col as u16,
        row: row as u16,
        text,
        kind,
    });
}

/// Write labels over text rows produced by the braille canvas.
pub fn overlay(lines: &mut [String], labels: &[Label]) {
    for label in labels {
        let Some(line) = lines.get_mut(label.row as usize) else {
            continue;
        };
        let mut chars: Vec<char> = line.chars().collect();
        for (i, ch) in label.text.chars().enumerate() {
            if let Some(slot) = chars.get_mut(label.col as usize + i) {
                *slot = ch;
            }
        }
        *line = chars.into_iter().collect();
    }
}
