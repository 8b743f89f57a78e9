use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::color::ColorScheme;
use crate::display::DisplayMode;
use crate::params::TransformParams;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub plot: PlotConfig,
    /// Parameters shown at startup.
    #[serde(default)]
    pub params: TransformParams,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub mode: DisplayMode,
    /// How long the interactive loop waits for input before redrawing.
    pub poll_interval_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            mode: DisplayMode::Interactive,
            poll_interval_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlotConfig {
    pub color_scheme: ColorScheme,
    pub show_grid: bool,
    pub show_legend: bool,
    /// Snapshot size in terminal cells
    pub snapshot_cols: u16,
    pub snapshot_rows: u16,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            color_scheme: ColorScheme::Classic,
            show_grid: true,
            show_legend: true,
            snapshot_cols: 80,
            snapshot_rows: 20,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        for e in config.params.sanitize() {
            warn!("{} in {}, using the default", e, path.display());
        }
        Ok(config)
    }

    /// Get the default XDG config path (~/.config/trigscope/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("trigscope").join("config.toml"))
    }

    /// Load config from the default XDG path if it exists
    /// Returns None if file doesn't exist, logs warning on parse errors
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            match Self::load(&path) {
                Ok(config) => Some(config),
                Err(e) => {
                    warn!(
                        "Failed to parse config at {}: {}. Using defaults.",
                        path.display(),
                        e
                    );
                    None
                }
            }
        } else {
            None
        }
    }

    /// Initialize default config file at XDG path, returns the path
    pub fn init_default_config() -> Result<PathBuf> {
        let path = Self::default_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Self::write_template(&path)?;
        Ok(path)
    }

    fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, Self::generate_config_template())?;
        Ok(())
    }

    /// Generate a commented TOML config template
    pub fn generate_config_template() -> String {
        r#"# Trigscope Configuration
# This file is auto-generated. Edit as needed.

[display]
# Display mode: "interactive" or "snapshot"
mode = "interactive"
# Input poll interval in milliseconds (interactive mode)
poll_interval_ms = 100

[plot]
# Color scheme: "classic", "ocean", "fire", "forest", "purple", "monochrome"
color_scheme = "classic"
# Draw the light background grid (every π/4 and every half unit)
show_grid = true
# Show the legend with both formulas
show_legend = true
# Snapshot size in terminal cells
snapshot_cols = 80
snapshot_rows = 20

[params]
# Curve parameters for A·f(B·x+C)+D, saved with [w] in interactive mode
# Function: "sin", "cos" or "tan"
func = "sin"
# Amplitude and period: 1/6, 1/5, 1/4, 1/3, 1/2, 1, 2, 3, 4, 5, 6
a = 1.0
b = 1.0
# Phase in radians, multiples of π/4 from -2π to 2π
c = 0.0
# Vertical shift: -6 to 6
d = 0.0
# Horizontal zoom: 0.5 to 2.0
zoom = 1.0
"#
        .to_string()
    }

    /// Merge CLI arguments into config (CLI takes priority)
    pub fn merge_args(&mut self, args: &crate::Args) {
        if let Some(mode) = args.mode {
            self.display.mode = mode;
        }

        if let Some(ref colors) = args.colors {
            match colors.parse() {
                Ok(scheme) => self.plot.color_scheme = scheme,
                Err(e) => warn!("{}, keeping {}", e, self.plot.color_scheme.name()),
            }
        }
        if args.no_grid {
            self.plot.show_grid = false;
        }
        if let Some(cols) = args.cols {
            self.plot.snapshot_cols = cols;
        }
        if let Some(rows) = args.rows {
            self.plot.snapshot_rows = rows;
        }

        // Query string first, explicit flags override it
        if let Some(ref query) = args.query {
            self.params.apply_query(query);
        }
        if let Some(func) = args.func {
            self.params.func = func;
        }
        let numeric = [
            ("amplitude", args.amplitude, &mut self.params.a),
            ("period", args.period, &mut self.params.b),
            ("phase", args.phase, &mut self.params.c),
            ("shift", args.shift, &mut self.params.d),
        ];
        for (name, value, slot) in numeric {
            match value {
                Some(v) if v.is_finite() => *slot = v,
                Some(v) => warn!("Ignoring non-finite --{} {}", name, v),
                None => {}
            }
        }
        if let Some(zoom) = args.zoom {
            self.params.set_zoom(zoom);
        }
    }
}

/// Write the parameters and color scheme back to the config file,
/// preserving comments and unrelated keys.
/// Creates the config file from the default template if it doesn't exist.
pub fn save_params(path: &Path, params: &TransformParams, scheme: ColorScheme) -> Result<()> {
    if !path.exists() {
        Config::write_template(path)?;
        info!("Created config file at {}", path.display());
    }

    let content = std::fs::read_to_string(path)?;
    let mut doc = content.parse::<toml_edit::DocumentMut>()?;

    if !doc.contains_key("params") {
        doc["params"] = toml_edit::table();
    }
    doc["params"]["func"] = toml_edit::value(params.func.name());
    doc["params"]["a"] = toml_edit::value(params.a);
    doc["params"]["b"] = toml_edit::value(params.b);
    doc["params"]["c"] = toml_edit::value(params.c);
    doc["params"]["d"] = toml_edit::value(params.d);
    doc["params"]["zoom"] = toml_edit::value(params.zoom);

    if !doc.contains_key("plot") {
        doc["plot"] = toml_edit::table();
    }
    doc["plot"]["color_scheme"] = toml_edit::value(scheme.name());

    std::fs::write(path, doc.to_string())?;
    info!("Saved parameters to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::TrigFunc;
    use std::f64::consts::PI;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir()
            .join(format!("trigscope_test_{}_{}", name, nanos))
            .join("config.toml")
    }

    #[test]
    fn test_template_matches_defaults() {
        let config: Config = toml::from_str(&Config::generate_config_template()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[params]\nfunc = \"tan\"\nd = -2.0\n").unwrap();
        assert_eq!(config.params.func, TrigFunc::Tangent);
        assert_eq!(config.params.d, -2.0);
        assert_eq!(config.params.a, 1.0);
        assert_eq!(config.plot, PlotConfig::default());
        assert_eq!(config.display.mode, DisplayMode::Interactive);
    }

    #[test]
    fn test_load_clamps_zoom() {
        let path = temp_path("zoom");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[params]\nzoom = 10.0\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.params.zoom, 2.0);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_load_resets_non_finite_params() {
        let path = temp_path("nonfinite");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[params]\na = inf\nc = nan\nd = -3.0\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.params.a, 1.0);
        assert_eq!(config.params.c, 0.0);
        assert_eq!(config.params.d, -3.0);
        assert_eq!(crate::plot::format_formula(&config.params), "sin(x) - 3");
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_save_params_round_trip() {
        let path = temp_path("save");
        let params = TransformParams {
            func: TrigFunc::Cosine,
            a: 0.25,
            b: 3.0,
            c: -3.0 * PI / 4.0,
            d: 5.0,
            zoom: 1.6,
        };
        save_params(&path, &params, ColorScheme::Ocean).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("# Trigscope Configuration"));

        let config = Config::load(&path).unwrap();
        assert_eq!(config.params, params);
        assert_eq!(config.plot.color_scheme, ColorScheme::Ocean);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_save_params_adds_missing_sections() {
        let path = temp_path("sections");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "# mine\n[display]\nmode = \"snapshot\"\n").unwrap();

        let params = TransformParams {
            func: TrigFunc::Tangent,
            ..TransformParams::default()
        };
        save_params(&path, &params, ColorScheme::Fire).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# mine"));
        let config = Config::load(&path).unwrap();
        assert_eq!(config.display.mode, DisplayMode::Snapshot);
        assert_eq!(config.params.func, TrigFunc::Tangent);
        assert_eq!(config.plot.color_scheme, ColorScheme::Fire);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
