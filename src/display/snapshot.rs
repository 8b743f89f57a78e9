use anyhow::Result;
use std::io::{self, Write};
use tracing::info;

use crate::config::Config;
use crate::params::TransformParams;
use crate::plot::build_frame;

use super::braille::BrailleCanvas;
use super::layout::{compute_labels, overlay};

/// Render one plot as text lines: braille curves, tick labels and legend,
/// followed by the share string.
pub fn render_lines(params: &TransformParams, cols: u16, rows: u16, config: &Config) -> Vec<String> {
    let mut canvas = BrailleCanvas::new(cols as usize, rows as usize);
    let (width, height) = canvas.viewport_size();
    let frame = build_frame(params, width, height);
    canvas.plot(&frame, config.plot.show_grid);

    let mut lines = canvas.to_lines();
    let labels = compute_labels(&frame, cols, rows, config.plot.show_legend);
    overlay(&mut lines, &labels);

    lines.push(String::new());
    lines.push(format!("base:        {}", frame.base_label));
    lines.push(format!("transformed: {}", frame.formula));
    lines.push(format!("share:       ?{}", params.to_query()));
    lines
}

pub fn run(config: Config) -> Result<()> {
    let cols = config.plot.snapshot_cols.max(1);
    let rows = config.plot.snapshot_rows.max(1);
    info!("Snapshot {}x{} of {}", cols, rows, config.params.to_query());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in render_lines(&config.params, cols, rows, &config) {
        writeln!(out, "{}", line.trim_end())?;
    }
    out.flush()?;
    Ok(())
}
