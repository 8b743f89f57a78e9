use crate::sampler::SamplePoint;

use super::Viewport;

/// A pixel-space vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

/// Vertices drawn as one continuous stroke.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathSegment {
    pub points: Vec<PixelPoint>,
}

/// Map a point sequence into pixel-space strokes.
///
/// A break marker, or a point whose pixel x falls outside `[0, width]`, ends
/// the current stroke without emitting a vertex; the next drawable point
/// starts a new one.
pub fn build_path(points: &[SamplePoint], viewport: &Viewport) -> Vec<PathSegment> {
    let mut segments: Vec<PathSegment> = Vec::new();
    let mut drawing = false;

    for point in points {
        let px = viewport.to_pixel_x(point.x);

        let y = match point.y.value() {
            Some(y) if (0.0..=viewport.width).contains(&px) => y,
            _ => {
                drawing = false;
                continue;
            }
        };

        let vertex = PixelPoint {
            x: px,
            y: viewport.to_pixel_y(y),
        };

        match segments.last_mut() {
            Some(segment) if drawing => segment.points.push(vertex),
            _ => {
                segments.push(PathSegment {
                    points: vec![vertex],
                });
                drawing = true;
            }
        }
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{TransformParams, TrigFunc};
    use crate::sampler::{sample, Sample};
    use std::f64::consts::PI;

    fn defined(x: f64, y: f64) -> SamplePoint {
        SamplePoint {
            x,
            y: Sample::Defined(y),
        }
    }

    fn brk(x: f64) -> SamplePoint {
        SamplePoint { x, y: Sample::Break }
    }

    #[test]
    fn test_single_stroke() {
        let vp = Viewport::new(800.0, 400.0, 1.0);
        let segments = build_path(&[defined(-1.0, 0.0), defined(0.0, 1.0), defined(1.0, 0.0)], &vp);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].points.len(), 3);
        assert_eq!(segments[0].points[1], PixelPoint { x: 400.0, y: 160.0 });
    }

    #[test]
    fn test_break_splits_stroke() {
        let vp = Viewport::new(800.0, 400.0, 1.0);
        let points = [defined(-1.0, 0.0), defined(-0.5, 0.5), brk(-0.25), defined(0.0, -5.0)];
        let segments = build_path(&points, &vp);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].points.len(), 2);
        assert_eq!(segments[1].points.len(), 1);
    }

    #[test]
    fn test_out_of_viewport_points_end_stroke() {
        let vp = Viewport::new(800.0, 400.0, 1.0);
        // x = 2π maps to pixel 800 (inside); anything beyond is dropped.
        let points = [
            defined(0.0, 0.0),
            defined(7.0, 0.0),
            defined(1.0, 0.0),
            defined(2.0, 0.0),
            defined(-7.0, 0.0),
        ];
        let segments = build_path(&points, &vp);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].points.len(), 1);
        assert_eq!(segments[1].points.len(), 2);
    }

    #[test]
    fn test_leading_and_repeated_breaks() {
        let vp = Viewport::new(100.0, 100.0, 1.0);
        let points = [brk(-3.0), brk(-2.0), defined(-1.0, 0.0), brk(0.0), brk(0.5), defined(1.0, 0.0)];
        let segments = build_path(&points, &vp);
        assert_eq!(segments.len(), 2);
        assert!(segments.iter().all(|s| s.points.len() == 1));
        assert!(build_path(&[], &vp).is_empty());
    }

    #[test]
    fn test_vertices_stay_inside_horizontal_bounds() {
        let params = TransformParams {
            func: TrigFunc::Tangent,
            a: 2.0,
            b: 3.0,
            c: PI / 4.0,
            d: 1.0,
            zoom: 1.0,
        };
        let samples = sample(&params);
        // A viewport narrower in scale than the sampled domain.
        let vp = Viewport::new(640.0, 320.0, 0.5);
        for segments in [build_path(&samples.base, &vp), build_path(&samples.transformed, &vp)] {
            assert!(!segments.is_empty());
            for segment in &segments {
                assert!(segment
                    .points
                    .iter()
                    .all(|p| (0.0..=vp.width).contains(&p.x)));
            }
        }
    }

    #[test]
    fn test_tangent_asymptote_never_joined() {
        let params = TransformParams {
            func: TrigFunc::Tangent,
            ..TransformParams::default()
        };
        let vp = Viewport::new(800.0, 400.0, params.zoom);
        let segments = build_path(&sample(&params).transformed, &vp);
        // Four asymptotes in [-2π, 2π] give five branches.
        assert_eq!(segments.len(), 5);
        for segment in &segments {
            for pair in segment.points.windows(2) {
                assert!((pair[1].y - pair[0].y).abs() <= 2.0 * vp.scale_y() + 1e-9);
            }
        }
    }
}
