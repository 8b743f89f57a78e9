use ratatui::prelude::*;

use crate::color::Rgb;
use crate::plot::{PathSegment, PixelPoint, PlotFrame};

/// Braille dot positions within a 2x4 cell:
/// (0,0)=0x01 (1,0)=0x08
/// (0,1)=0x02 (1,1)=0x10
/// (0,2)=0x04 (1,2)=0x20
/// (0,3)=0x40 (1,3)=0x80
pub const DOT_MAP: [[u8; 4]; 2] = [
    [0x01, 0x02, 0x04, 0x40],
    [0x08, 0x10, 0x20, 0x80],
];

/// What a dot belongs to. Later layers win the color of a shared cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Layer {
    Grid = 1,
    Axis = 2,
    Base = 3,
    Transformed = 4,
}

impl Layer {
    fn from_u8(v: u8) -> Option<Self> {
        match v {
            1 => Some(Layer::Grid),
            2 => Some(Layer::Axis),
            3 => Some(Layer::Base),
            4 => Some(Layer::Transformed),
            _ => None,
        }
    }
}

/// A canvas for sub-character braille rendering.
/// Each terminal character cell maps to a 2x4 grid of braille dots.
pub struct BrailleCanvas {
    /// Highest layer drawn at each dot, 0 when empty.
    grid: Vec<u8>,
    pub grid_w: usize,
    pub grid_h: usize,
    char_w: usize,
    char_h: usize,
}

impl BrailleCanvas {
    /// Create a new braille canvas for the given character dimensions.
    pub fn new(char_w: usize, char_h: usize) -> Self {
        let grid_w = char_w * 2;
        let grid_h = char_h * 4;
        Self {
            grid: vec![0; grid_w * grid_h],
            grid_w,
            grid_h,
            char_w,
            char_h,
        }
    }

    /// Pixel size of the viewport that maps one pixel onto one dot.
    pub fn viewport_size(&self) -> (f64, f64) {
        (
            self.grid_w.saturating_sub(1) as f64,
            self.grid_h.saturating_sub(1) as f64,
        )
    }

    /// Set a single dot on the braille grid (bounds-checked).
    #[inline]
    pub fn set(&mut self, gx: isize, gy: isize, layer: Layer) {
        if gx < 0 || gy < 0 || gx >= self.grid_w as isize || gy >= self.grid_h as isize {
            return;
        }
        let slot = &mut self.grid[gy as usize * self.grid_w + gx as usize];
        *slot = (*slot).max(layer as u8);
    }

    pub fn get(&self, gx: usize, gy: usize) -> Option<Layer> {
        if gx < self.grid_w && gy < self.grid_h {
            Layer::from_u8(self.grid[gy * self.grid_w + gx])
        } else {
            None
        }
    }

    /// Draw a line using Bresenham's algorithm.
    pub fn line(&mut self, x0: isize, y0: isize, x1: isize, y1: isize, layer: Layer) {
        for (x, y) in bresenham_line(x0, y0, x1, y1) {
            self.set(x, y, layer);
        }
    }

    /// Stroke each segment as a polyline. Gaps between segments stay empty.
    pub fn stroke(&mut self, segments: &[PathSegment], layer: Layer) {
        for segment in segments {
            let dots: Vec<(isize, isize)> = segment.points.iter().map(|p| self.dot(p)).collect();
            match dots.as_slice() {
                [] => {}
                [(x, y)] => self.set(*x, *y, layer),
                _ => {
                    for pair in dots.windows(2) {
                        self.line(pair[0].0, pair[0].1, pair[1].0, pair[1].1, layer);
                    }
                }
            }
        }
    }

    /// Nearest dot to a vertex, clamped to one dot outside the grid on each side.
    fn dot(&self, p: &PixelPoint) -> (isize, isize) {
        let x = p.x.round().clamp(-1.0, self.grid_w as f64);
        let y = p.y.round().clamp(-1.0, self.grid_h as f64);
        (x as isize, y as isize)
    }

    /// Draw grid, axes and both curves of a frame laid out for this canvas.
    pub fn plot(&mut self, frame: &PlotFrame, show_grid: bool) {
        let vp = frame.viewport;
        let right = vp.width.round() as isize;
        let bottom = vp.height.round() as isize;

        if show_grid {
            // Dotted so the curves stay readable on top.
            for x in &frame.grid.vertical {
                let gx = x.round() as isize;
                for gy in (0..=bottom).step_by(3) {
                    self.set(gx, gy, Layer::Grid);
                }
            }
            for y in &frame.grid.horizontal {
                let gy = y.round() as isize;
                for gx in (0..=right).step_by(3) {
                    self.set(gx, gy, Layer::Grid);
                }
            }
        }

        let origin_x = vp.to_pixel_x(0.0).round() as isize;
        let origin_y = vp.to_pixel_y(0.0).round() as isize;
        self.line(0, origin_y, right, origin_y, Layer::Axis);
        self.line(origin_x, 0, origin_x, bottom, Layer::Axis);
        for tick in &frame.x_ticks {
            let gx = tick.pixel_x.round() as isize;
            self.line(gx, origin_y - 2, gx, origin_y + 2, Layer::Axis);
        }
        for tick in &frame.y_ticks {
            let gy = tick.pixel_y.round() as isize;
            self.line(origin_x - 1, gy, origin_x + 1, gy, Layer::Axis);
        }

        self.stroke(&frame.base, Layer::Base);
        self.stroke(&frame.transformed, Layer::Transformed);
    }

    /// Braille character and dominant layer of one character cell.
    fn cell(&self, cx: usize, cy: usize) -> Option<(char, Layer)> {
        let mut braille: u8 = 0;
        let mut top: Option<Layer> = None;

        for (dx, col) in DOT_MAP.iter().enumerate() {
            for (dy, &bit) in col.iter().enumerate() {
                if let Some(layer) = self.get(cx * 2 + dx, cy * 4 + dy) {
                    braille |= bit;
                    top = top.max(Some(layer));
                }
            }
        }

        let layer = top?;
        let ch = char::from_u32(0x2800 + braille as u32).unwrap_or(' ');
        Some((ch, layer))
    }

    /// Encode braille grid to characters and write to the frame buffer.
    /// `color_fn(layer)` returns the RGB color for cells whose top layer is `layer`.
    pub fn render(&self, frame: &mut Frame, area: Rect, color_fn: impl Fn(Layer) -> Rgb) {
        for cy in 0..self.char_h.min(area.height as usize) {
            for cx in 0..self.char_w.min(area.width as usize) {
                if let Some((ch, layer)) = self.cell(cx, cy) {
                    let (r, g, b) = color_fn(layer);
                    let cell = frame
                        .buffer_mut()
                        .cell_mut((area.x + cx as u16, area.y + cy as u16));
                    if let Some(cell) = cell {
                        cell.set_char(ch);
                        cell.set_fg(Color::Rgb(r, g, b));
                    }
                }
            }
        }
    }

    /// Plain-text rendering, one string per character row.
    pub fn to_lines(&self) -> Vec<String> {
        (0..self.char_h)
            .map(|cy| {
                (0..self.char_w)
                    .map(|cx| self.cell(cx, cy).map(|(ch, _)| ch).unwrap_or(' '))
                    .collect()
            })
            .collect()
    }
}

/// Points on the line from (x0, y0) to (x1, y1), endpoints included.
pub fn bresenham_line(x0: isize, y0: isize, x1: isize, y1: isize) -> Vec<(isize, isize)> {
    let mut x0 = x0;
    let mut y0 = y0;

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx: isize = if x0 < x1 { 1 } else { -1 };
    let sy: isize = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let mut points = Vec::with_capacity((dx - dy) as usize + 1);

    loop {
        points.push((x0, y0));

        if x0 == x1 && y0 == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
    points
}
