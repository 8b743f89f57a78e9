//! Curve parameters, the discrete value tables behind the knobs, and the
//! query-string codec used for shareable state.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::error::{ParamError, ParamResult};

pub const ZOOM_MIN: f64 = 0.5;
pub const ZOOM_MAX: f64 = 2.0;
pub const ZOOM_STEP: f64 = 0.1;

/// Amplitude and period knob positions.
pub const FRACTIONS: [f64; 11] = [
    1.0 / 6.0,
    1.0 / 5.0,
    1.0 / 4.0,
    1.0 / 3.0,
    1.0 / 2.0,
    1.0,
    2.0,
    3.0,
    4.0,
    5.0,
    6.0,
];

/// Vertical shift knob positions.
pub const SHIFTS: [f64; 13] = [
    -6.0, -5.0, -4.0, -3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0,
];

/// Phase knob positions: -2π to 2π in steps of π/4.
pub fn phases() -> [f64; 17] {
    let mut out = [0.0; 17];
    for (slot, k) in out.iter_mut().zip(-8i32..=8) {
        *slot = k as f64 * PI / 4.0;
    }
    out
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum TrigFunc {
    #[default]
    #[serde(rename = "sin")]
    #[value(name = "sin")]
    Sine,
    #[serde(rename = "cos")]
    #[value(name = "cos")]
    Cosine,
    #[serde(rename = "tan")]
    #[value(name = "tan")]
    Tangent,
}

impl TrigFunc {
    pub fn name(&self) -> &'static str {
        match self {
            TrigFunc::Sine => "sin",
            TrigFunc::Cosine => "cos",
            TrigFunc::Tangent => "tan",
        }
    }

    pub fn all() -> &'static [TrigFunc] {
        &[TrigFunc::Sine, TrigFunc::Cosine, TrigFunc::Tangent]
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let current = all.iter().position(|f| f == self).unwrap_or(0);
        all[(current + 1) % all.len()]
    }

    /// Evaluate the plain function at `arg`.
    pub fn eval(&self, arg: f64) -> f64 {
        match self {
            TrigFunc::Sine => arg.sin(),
            TrigFunc::Cosine => arg.cos(),
            TrigFunc::Tangent => arg.tan(),
        }
    }
}

impl fmt::Display for TrigFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TrigFunc {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sin" | "sine" => Ok(Self::Sine),
            "cos" | "cosine" => Ok(Self::Cosine),
            "tan" | "tangent" => Ok(Self::Tangent),
            _ => Err(ParamError::UnknownFunction(s.to_string())),
        }
    }
}

/// Clamp a zoom factor into the usable range. NaN falls back to 1.0.
pub fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_nan() {
        return 1.0;
    }
    zoom.clamp(ZOOM_MIN, ZOOM_MAX)
}

/// Parameters of `A·f(B·x+C)+D` plus the horizontal zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformParams {
    pub func: TrigFunc,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub zoom: f64,
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            func: TrigFunc::Sine,
            a: 1.0,
            b: 1.0,
            c: 0.0,
            d: 0.0,
            zoom: 1.0,
        }
    }
}

impl TransformParams {
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = clamp_zoom(zoom);
    }

    /// Set one field from its textual form. On error the field is untouched.
    pub fn set_field(&mut self, key: &str, value: &str) -> ParamResult<()> {
        match key {
            "func" => self.func = value.parse()?,
            "a" => self.a = parse_number("a", value)?,
            "b" => self.b = parse_number("b", value)?,
            "c" => self.c = parse_number("c", value)?,
            "d" => self.d = parse_number("d", value)?,
            "zoom" => self.set_zoom(parse_number("zoom", value)?),
            other => debug!("Ignoring unknown parameter '{}'", other),
        }
        Ok(())
    }

    /// Reset non-finite fields to their defaults and clamp zoom.
    /// Returns one error per field that was reset.
    pub fn sanitize(&mut self) -> Vec<ParamError> {
        let defaults = Self::default();
        let mut errors = Vec::new();
        let fields = [
            ("a", &mut self.a, defaults.a),
            ("b", &mut self.b, defaults.b),
            ("c", &mut self.c, defaults.c),
            ("d", &mut self.d, defaults.d),
        ];
        for (field, slot, default) in fields {
            if !slot.is_finite() {
                *slot = default;
                errors.push(ParamError::NonFinite { field });
            }
        }
        self.set_zoom(self.zoom);
        errors
    }

    /// Apply a query string such as `?func=tan&a=2&c=0.785`.
    ///
    /// Malformed fields keep their prior value; the rejected fields are
    /// logged and returned so the caller can report them.
    pub fn apply_query(&mut self, query: &str) -> Vec<ParamError> {
        let query = match query.split_once('?') {
            Some((_, rest)) => rest,
            None => query,
        };
        let query = query.split('#').next().unwrap_or("");

        let mut errors = Vec::new();
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode_component(key);
            let value = decode_component(value);
            if let Err(e) = self.set_field(&key, &value) {
                warn!("Ignoring query parameter: {}", e);
                errors.push(e);
            }
        }
        errors
    }

    /// Encode as a query string that `apply_query` reads back unchanged.
    pub fn to_query(&self) -> String {
        format!(
            "func={}&a={}&b={}&c={}&d={}&zoom={}",
            self.func, self.a, self.b, self.c, self.d, self.zoom
        )
    }

    pub fn value(&self, knob: Knob) -> f64 {
        match knob {
            Knob::Amplitude => self.a,
            Knob::Period => self.b,
            Knob::Phase => self.c,
            Knob::Shift => self.d,
            Knob::Zoom => self.zoom,
        }
    }

    /// Move a knob by `delta` positions along its value table.
    pub fn step(&mut self, knob: Knob, delta: i32) {
        match knob {
            Knob::Amplitude => self.a = step_table(&FRACTIONS, self.a, delta),
            Knob::Period => self.b = step_table(&FRACTIONS, self.b, delta),
            Knob::Phase => self.c = step_table(&phases(), self.c, delta),
            Knob::Shift => self.d = step_table(&SHIFTS, self.d, delta),
            Knob::Zoom => {
                let stepped = self.zoom + delta as f64 * ZOOM_STEP;
                // Keep one decimal so repeated steps don't drift.
                self.set_zoom((stepped * 10.0).round() / 10.0);
            }
        }
    }
}

/// The adjustable parameters, in the order the UI cycles through them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Knob {
    #[default]
    Amplitude,
    Period,
    Phase,
    Shift,
    Zoom,
}

impl Knob {
    pub fn all() -> &'static [Knob] {
        &[Knob::Amplitude, Knob::Period, Knob::Phase, Knob::Shift, Knob::Zoom]
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let current = all.iter().position(|k| k == self).unwrap_or(0);
        all[(current + 1) % all.len()]
    }

    pub fn prev(&self) -> Self {
        let all = Self::all();
        let current = all.iter().position(|k| k == self).unwrap_or(0);
        all[(current + all.len() - 1) % all.len()]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Knob::Amplitude => "A",
            Knob::Period => "B",
            Knob::Phase => "C",
            Knob::Shift => "D",
            Knob::Zoom => "zoom",
        }
    }
}

fn parse_number(field: &'static str, value: &str) -> ParamResult<f64> {
    let parsed: f64 = value.trim().parse().map_err(|_| ParamError::InvalidNumber {
        field,
        value: value.to_string(),
    })?;
    if !parsed.is_finite() {
        return Err(ParamError::NonFinite { field });
    }
    Ok(parsed)
}

/// Index of the table entry closest to `value`.
fn nearest_index(table: &[f64], value: f64) -> usize {
    table
        .iter()
        .enumerate()
        .min_by(|(_, x), (_, y)| {
            (*x - value)
                .abs()
                .partial_cmp(&(*y - value).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn step_table(table: &[f64], current: f64, delta: i32) -> f64 {
    let index = nearest_index(table, current) as i64 + delta as i64;
    let index = index.clamp(0, table.len() as i64 - 1) as usize;
    table[index]
}

/// Decode `+` and `%XX` escapes of a query component.
fn decode_component(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
                match hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                    Some(byte) => {
                        out.push(byte);
                        i += 2;
                    }
                    None => out.push(b'%'),
                }
            }
            other => out.push(other),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
