//! Projection of sampled curves into pixel space, and the render-ready
//! bundle handed to the front ends.

pub mod formula;
pub mod path;
pub mod ticks;

pub use formula::{base_label, format_formula};
pub use path::{build_path, PathSegment, PixelPoint};
pub use ticks::{grid_lines, x_ticks, y_ticks, GridLines, XTick, YTick};

use std::f64::consts::PI;

use crate::params::{clamp_zoom, TransformParams};
use crate::sampler;

/// Visible y range is `[-Y_HALF_SPAN, Y_HALF_SPAN]`.
pub const Y_HALF_SPAN: f64 = 5.0;

/// Pixel rectangle the mathematical plane is projected into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub zoom: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, zoom: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            zoom: clamp_zoom(zoom),
        }
    }

    /// Pixels per unit along x: the full width spans `4π·zoom`.
    pub fn scale_x(&self) -> f64 {
        self.width / (4.0 * PI * self.zoom)
    }

    /// Pixels per unit along y: the full height spans 10 units.
    pub fn scale_y(&self) -> f64 {
        self.height / (2.0 * Y_HALF_SPAN)
    }

    /// Half the visible x domain.
    pub fn half_domain(&self) -> f64 {
        2.0 * PI * self.zoom
    }

    pub fn to_pixel_x(&self, x: f64) -> f64 {
        self.width / 2.0 + x * self.scale_x()
    }

    /// Screen y grows downward.
    pub fn to_pixel_y(&self, y: f64) -> f64 {
        self.height / 2.0 - y * self.scale_y()
    }
}

/// Everything a front end needs to draw one parameter set.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotFrame {
    pub viewport: Viewport,
    pub base: Vec<PathSegment>,
    pub transformed: Vec<PathSegment>,
    pub x_ticks: Vec<XTick>,
    pub y_ticks: Vec<YTick>,
    pub grid: GridLines,
    pub formula: String,
    pub base_label: String,
}

/// Sample both curves and lay them out in a `width × height` pixel viewport.
pub fn build_frame(params: &TransformParams, width: f64, height: f64) -> PlotFrame {
    let viewport = Viewport::new(width, height, params.zoom);
    let samples = sampler::sample(params);

    PlotFrame {
        viewport,
        base: build_path(&samples.base, &viewport),
        transformed: build_path(&samples.transformed, &viewport),
        x_ticks: x_ticks(&viewport),
        y_ticks: y_ticks(&viewport),
        grid: grid_lines(&viewport),
        formula: format_formula(params),
        base_label: base_label(params.func),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::TrigFunc;

    #[test]
    fn test_scales() {
        let vp = Viewport::new(800.0, 400.0, 1.0);
        assert!((vp.scale_x() - 800.0 / (4.0 * PI)).abs() < 1e-12);
        assert_eq!(vp.scale_y(), 40.0);
        assert_eq!(vp.to_pixel_x(0.0), 400.0);
        assert_eq!(vp.to_pixel_y(0.0), 200.0);
        assert_eq!(vp.to_pixel_y(5.0), 0.0);
    }

    #[test]
    fn test_viewport_sanitizes_input() {
        let vp = Viewport::new(-10.0, 50.0, 0.0);
        assert_eq!(vp.width, 0.0);
        assert_eq!(vp.zoom, 0.5);
        assert!(vp.scale_x().is_finite());
    }

    #[test]
    fn test_build_frame_sine() {
        let frame = build_frame(&TransformParams::default(), 800.0, 400.0);
        assert_eq!(frame.base.len(), 1);
        assert_eq!(frame.transformed.len(), 1);
        assert_eq!(frame.formula, "sin(x)");
        assert_eq!(frame.base_label, "sin(x)");
        assert_eq!(frame.x_ticks.len(), 5);
        assert_eq!(frame.y_ticks.len(), 10);
        // Identical curves for identity parameters.
        assert_eq!(frame.base, frame.transformed);
    }

    #[test]
    fn test_build_frame_tangent() {
        let params = TransformParams {
            func: TrigFunc::Tangent,
            a: 2.0,
            c: PI / 4.0,
            ..TransformParams::default()
        };
        let frame = build_frame(&params, 160.0, 80.0);
        assert_eq!(frame.base.len(), 5);
        assert_eq!(frame.transformed.len(), 5);
        assert_eq!(frame.formula, "2tan(x + π/4)");
        assert_eq!(frame.base_label, "tan(x)");
    }

    #[test]
    fn test_zero_sized_viewport() {
        let frame = build_frame(&TransformParams::default(), 0.0, 0.0);
        // Only x = 0 maps inside a zero-width viewport.
        assert!(frame.base.iter().all(|s| s.points.iter().all(|p| p.x == 0.0)));
    }
}
