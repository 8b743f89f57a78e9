use std::f64::consts::PI;

use super::{Viewport, Y_HALF_SPAN};

/// Tolerance for ticks that land exactly on the viewport edge.
const EDGE_EPSILON: f64 = 1e-9;

/// Tick on the horizontal axis at `k·π`.
#[derive(Debug, Clone, PartialEq)]
pub struct XTick {
    pub k: i32,
    pub pixel_x: f64,
    pub label: String,
}

/// Tick on the vertical axis at an integer value.
#[derive(Debug, Clone, PartialEq)]
pub struct YTick {
    pub value: i32,
    pub pixel_y: f64,
    pub label: String,
}

/// Pixel positions of the light background grid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridLines {
    /// Every π/4 across the visible domain.
    pub vertical: Vec<f64>,
    /// Every half unit across the visible range.
    pub horizontal: Vec<f64>,
}

/// Ticks at every multiple of π inside the viewport. The origin tick has no label.
pub fn x_ticks(viewport: &Viewport) -> Vec<XTick> {
    let max_k = (viewport.half_domain() / PI + EDGE_EPSILON).floor() as i32;
    (-max_k..=max_k)
        .map(|k| XTick {
            k,
            pixel_x: viewport.to_pixel_x(k as f64 * PI),
            label: if k == 0 { String::new() } else { format!("{}π", k) },
        })
        .collect()
}

/// Ticks at every integer from -5 to 5, skipping the origin.
pub fn y_ticks(viewport: &Viewport) -> Vec<YTick> {
    let span = Y_HALF_SPAN as i32;
    (-span..=span)
        .filter(|&value| value != 0)
        .map(|value| YTick {
            value,
            pixel_y: viewport.to_pixel_y(value as f64),
            label: value.to_string(),
        })
        .collect()
}

pub fn grid_lines(viewport: &Viewport) -> GridLines {
    let quarter = PI / 4.0;
    let max_j = (viewport.half_domain() / quarter + EDGE_EPSILON).floor() as i32;
    let vertical = (-max_j..=max_j)
        .map(|j| viewport.to_pixel_x(j as f64 * quarter))
        .collect();

    let steps = (Y_HALF_SPAN * 2.0) as i32;
    let horizontal = (-steps..=steps)
        .map(|j| viewport.to_pixel_y(j as f64 * 0.5))
        .collect();

    GridLines {
        vertical,
        horizontal,
    }
}
