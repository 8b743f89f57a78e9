//! Turns the base and transformed functions into point sequences with
//! explicit break markers at tangent discontinuities.

use std::f64::consts::PI;

use crate::params::{clamp_zoom, TransformParams, TrigFunc};

/// Number of steps across the sampled domain (the sequence has one more point).
pub const SAMPLE_STEPS: usize = 500;
/// Tangent samples whose argument has `|cos| <` this are skipped.
pub const ASYMPTOTE_GUARD: f64 = 0.01;
/// Tangent values are clamped to `[-TAN_CLAMP, TAN_CLAMP]`.
pub const TAN_CLAMP: f64 = 5.0;
/// A jump larger than this between consecutive tangent values starts a new stroke.
pub const JUMP_THRESHOLD: f64 = 2.0;

/// The y value of a sample, or a gap the renderer must not draw across.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample {
    Defined(f64),
    Break,
}

impl Sample {
    pub fn value(&self) -> Option<f64> {
        match self {
            Sample::Defined(y) => Some(*y),
            Sample::Break => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub x: f64,
    pub y: Sample,
}

/// Ordered by strictly increasing `x`.
pub type PointSequence = Vec<SamplePoint>;

/// Base and transformed sequences for one parameter set.
#[derive(Debug, Clone, PartialEq)]
pub struct Samples {
    pub base: PointSequence,
    pub transformed: PointSequence,
}

/// Width of the sampled domain for a zoom factor.
pub fn domain_range(zoom: f64) -> f64 {
    4.0 * PI * clamp_zoom(zoom)
}

/// Sample both curves across `[-range/2, range/2]`.
pub fn sample(params: &TransformParams) -> Samples {
    let range = domain_range(params.zoom);
    let start = -range / 2.0;
    let step = range / SAMPLE_STEPS as f64;

    let mut base = SequenceBuilder::new(params.func);
    let mut transformed = SequenceBuilder::new(params.func);

    for i in 0..=SAMPLE_STEPS {
        let x = start + i as f64 * step;
        base.push(x, x, 1.0, 0.0);
        transformed.push(x, params.b * x + params.c, params.a, params.d);
    }

    Samples {
        base: base.finish(),
        transformed: transformed.finish(),
    }
}

/// Accumulates one sequence, tracking the last emitted value for jump detection.
struct SequenceBuilder {
    func: TrigFunc,
    points: PointSequence,
    prev: Option<(f64, f64)>,
}

impl SequenceBuilder {
    fn new(func: TrigFunc) -> Self {
        Self {
            func,
            points: Vec::with_capacity(SAMPLE_STEPS + 1),
            prev: None,
        }
    }

    /// Evaluate `scale·f(arg) + offset` at `x` and append it.
    fn push(&mut self, x: f64, arg: f64, scale: f64, offset: f64) {
        let y = match self.func {
            TrigFunc::Sine | TrigFunc::Cosine => scale * self.func.eval(arg) + offset,
            TrigFunc::Tangent => {
                if arg.cos().abs() < ASYMPTOTE_GUARD {
                    return;
                }
                let y = (scale * arg.tan() + offset).clamp(-TAN_CLAMP, TAN_CLAMP);

                if let Some((prev_x, prev_y)) = self.prev {
                    if (y - prev_y).abs() > JUMP_THRESHOLD {
                        self.points.push(SamplePoint {
                            x: (prev_x + x) / 2.0,
                            y: Sample::Break,
                        });
                    }
                }
                y
            }
        };

        self.points.push(SamplePoint {
            x,
            y: Sample::Defined(y),
        });
        self.prev = Some((x, y));
    }

    fn finish(self) -> PointSequence {
        self.points
    }
}
