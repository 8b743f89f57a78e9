use palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub type Rgb = (u8, u8, u8);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Classic,
    Ocean,
    Fire,
    Forest,
    Purple,
    Monochrome,
}

/// Colors for every element of a plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePalette {
    pub base: Rgb,
    pub transformed: Rgb,
    pub axis: Rgb,
    pub grid: Rgb,
    pub label: Rgb,
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "ocean" => Ok(Self::Ocean),
            "fire" => Ok(Self::Fire),
            "forest" => Ok(Self::Forest),
            "purple" => Ok(Self::Purple),
            "mono" | "monochrome" => Ok(Self::Monochrome),
            _ => Err(format!("Unknown color scheme: {}", s)),
        }
    }
}

impl ColorScheme {
    pub fn name(&self) -> &'static str {
        match self {
            ColorScheme::Classic => "classic",
            ColorScheme::Ocean => "ocean",
            ColorScheme::Fire => "fire",
            ColorScheme::Forest => "forest",
            ColorScheme::Purple => "purple",
            ColorScheme::Monochrome => "monochrome",
        }
    }

    pub fn palette(&self) -> CurvePalette {
        // (hue, saturation, lightness) of the base and transformed curves
        let (base, transformed) = match self {
            // Blue reference, red transform
            ColorScheme::Classic => ((220.0, 0.85, 0.6), (0.0, 0.85, 0.6)),
            ColorScheme::Ocean => ((190.0, 0.7, 0.55), (230.0, 0.8, 0.7)),
            ColorScheme::Fire => ((45.0, 0.95, 0.55), (10.0, 0.95, 0.55)),
            ColorScheme::Forest => ((90.0, 0.6, 0.5), (140.0, 0.75, 0.6)),
            ColorScheme::Purple => ((270.0, 0.7, 0.65), (320.0, 0.8, 0.65)),
            ColorScheme::Monochrome => ((0.0, 0.0, 0.55), (0.0, 0.0, 0.95)),
        };

        CurvePalette {
            base: hsl_to_rgb(base),
            transformed: hsl_to_rgb(transformed),
            axis: hsl_to_rgb((0.0, 0.0, 0.6)),
            grid: hsl_to_rgb((0.0, 0.0, 0.25)),
            label: hsl_to_rgb((0.0, 0.0, 0.8)),
        }
    }

    pub fn all() -> &'static [ColorScheme] {
        &[
            ColorScheme::Classic,
            ColorScheme::Ocean,
            ColorScheme::Fire,
            ColorScheme::Forest,
            ColorScheme::Purple,
            ColorScheme::Monochrome,
        ]
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let current = all.iter().position(|c| c == self).unwrap_or(0);
        all[(current + 1) % all.len()]
    }
}

fn hsl_to_rgb((h, s, l): (f32, f32, f32)) -> Rgb {
    let hsl = Hsl::new(h, s, l);
    let rgb: Srgb = hsl.into_color();

    (
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("Fire".parse::<ColorScheme>().unwrap(), ColorScheme::Fire);
        assert_eq!("mono".parse::<ColorScheme>().unwrap(), ColorScheme::Monochrome);
        assert!("plaid".parse::<ColorScheme>().is_err());
        for scheme in ColorScheme::all() {
            assert_eq!(scheme.name().parse::<ColorScheme>().unwrap(), *scheme);
        }
    }

    #[test]
    fn test_next_wraps() {
        assert_eq!(ColorScheme::Monochrome.next(), ColorScheme::Classic);
    }

    #[test]
    fn test_classic_palette() {
        let palette = ColorScheme::Classic.palette();
        let (r, g, b) = palette.base;
        assert!(b > r && b > g, "base should be blue: {:?}", palette.base);
        let (r, g, b) = palette.transformed;
        assert!(r > g && r > b, "transform should be red: {:?}", palette.transformed);
    }

    #[test]
    fn test_curves_are_distinguishable() {
        for scheme in ColorScheme::all() {
            let palette = scheme.palette();
            assert_ne!(palette.base, palette.transformed, "{:?}", scheme);
        }
    }
}
