//! Human-readable labels for the formula legend and the knob readouts.

use std::f64::consts::PI;

use crate::params::{TransformParams, TrigFunc};

/// How close a value must be to a recognized constant to print symbolically.
const MATCH_EPSILON: f64 = 1e-9;

/// Print a number the short way: `2`, `0.5`, `-3`.
pub fn format_number(value: f64) -> String {
    // Avoid printing "-0".
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

/// Print a phase as a multiple of π.
///
/// Exact multiples of π/8 up to ±2π print as reduced fractions (`π/4`,
/// `3π/2`, `-2π`); anything else falls back to two decimals (`0.30π`).
pub fn format_pi(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let eighths = value / PI * 8.0;
    let rounded = eighths.round();
    if (eighths - rounded).abs() >= MATCH_EPSILON || rounded.abs() > 16.0 {
        return format!("{:.2}π", value / PI);
    }

    let n = rounded as i64;
    if n == 0 {
        return "0".to_string();
    }
    let g = gcd(n.abs(), 8);
    let (num, den) = (n / g, 8 / g);
    let coeff = match num {
        1 => String::new(),
        -1 => "-".to_string(),
        k => k.to_string(),
    };
    if den == 1 {
        format!("{}π", coeff)
    } else {
        format!("{}π/{}", coeff, den)
    }
}

/// Print an amplitude/period knob value, using fractions for the small ones.
pub fn format_fraction(value: f64) -> String {
    const NAMED: [(f64, &str); 5] = [
        (1.0 / 6.0, "1/6"),
        (1.0 / 5.0, "1/5"),
        (1.0 / 4.0, "1/4"),
        (1.0 / 3.0, "1/3"),
        (1.0 / 2.0, "1/2"),
    ];
    NAMED
        .iter()
        .find(|(v, _)| (value - v).abs() < MATCH_EPSILON)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| format_number(value))
}

pub fn format_zoom(zoom: f64) -> String {
    format!("{:.1}x", zoom)
}

/// Legend label of the untransformed curve, e.g. `tan(x)`.
pub fn base_label(func: TrigFunc) -> String {
    format!("{}(x)", func)
}

/// Build `A·f(B·x ± C) ± D`, omitting identity coefficients.
pub fn format_formula(params: &TransformParams) -> String {
    let mut formula = String::new();

    if params.a != 1.0 {
        formula.push_str(&format_number(params.a));
    }

    formula.push_str(params.func.name());
    formula.push('(');

    if params.b != 1.0 {
        formula.push_str(&format_number(params.b));
    }
    formula.push('x');

    if params.c != 0.0 {
        let sign = if params.c > 0.0 { " + " } else { " - " };
        formula.push_str(sign);
        formula.push_str(&format_pi(params.c.abs()));
    }

    formula.push(')');

    if params.d != 0.0 {
        let sign = if params.d > 0.0 { " + " } else { " - " };
        formula.push_str(sign);
        formula.push_str(&format_number(params.d.abs()));
    }

    formula
}

fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::phases;

    fn params(func: TrigFunc, a: f64, b: f64, c: f64, d: f64) -> TransformParams {
        TransformParams {
            func,
            a,
            b,
            c,
            d,
            zoom: 1.0,
        }
    }

    #[test]
    fn test_identity_formula() {
        assert_eq!(format_formula(&params(TrigFunc::Sine, 1.0, 1.0, 0.0, 0.0)), "sin(x)");
        assert_eq!(format_formula(&params(TrigFunc::Tangent, 1.0, 1.0, 0.0, 0.0)), "tan(x)");
    }

    #[test]
    fn test_reference_formulas() {
        assert_eq!(
            format_formula(&params(TrigFunc::Sine, 2.0, 1.0, PI / 2.0, 0.0)),
            "2sin(x + π/2)"
        );
        assert_eq!(
            format_formula(&params(TrigFunc::Sine, 1.0, 2.0, -PI / 4.0, 3.0)),
            "sin(2x - π/4) + 3"
        );
    }

    #[test]
    fn test_negative_and_fractional_coefficients() {
        assert_eq!(
            format_formula(&params(TrigFunc::Cosine, 0.5, 0.25, 3.0 * PI / 2.0, -4.0)),
            "0.5cos(0.25x + 3π/2) - 4"
        );
        assert_eq!(
            format_formula(&params(TrigFunc::Cosine, -2.0, 1.0, -2.0 * PI, 0.0)),
            "-2cos(x - 2π)"
        );
    }

    #[test]
    fn test_format_pi_table() {
        let expected = [
            "-2π", "-7π/4", "-3π/2", "-5π/4", "-π", "-3π/4", "-π/2", "-π/4", "0", "π/4", "π/2",
            "3π/4", "π", "5π/4", "3π/2", "7π/4", "2π",
        ];
        for (value, label) in phases().iter().zip(expected) {
            assert_eq!(format_pi(*value), label);
        }
    }

    #[test]
    fn test_format_pi_eighths_and_fallback() {
        assert_eq!(format_pi(PI / 8.0), "π/8");
        assert_eq!(format_pi(-3.0 * PI / 8.0), "-3π/8");
        assert_eq!(format_pi(0.3 * PI), "0.30π");
        assert_eq!(format_pi(3.0 * PI), "3.00π");
        assert_eq!(format_pi(1.0), "0.32π");
    }

    #[test]
    fn test_format_fraction() {
        assert_eq!(format_fraction(1.0 / 6.0), "1/6");
        assert_eq!(format_fraction(0.5), "1/2");
        assert_eq!(format_fraction(4.0), "4");
        assert_eq!(format_fraction(2.5), "2.5");
    }

    #[test]
    fn test_format_number_and_zoom() {
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(-6.0), "-6");
        assert_eq!(format_zoom(1.0), "1.0x");
        assert_eq!(format_zoom(0.7), "0.7x");
        assert_eq!(base_label(TrigFunc::Cosine), "cos(x)");
    }
}
