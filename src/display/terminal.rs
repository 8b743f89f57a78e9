use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

use crate::color::{ColorScheme, Rgb};
use crate::config::{self, Config};
use crate::params::{Knob, TransformParams, TrigFunc};
use crate::plot::formula::{format_fraction, format_number, format_pi, format_zoom};
use crate::plot::{build_frame, PlotFrame};

use super::braille::{BrailleCanvas, Layer};
use super::layout::{compute_labels, LabelKind};

pub fn run(config: Config, config_path: Option<PathBuf>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, config, config_path);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: Config,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let poll_interval = Duration::from_millis(config.display.poll_interval_ms.max(10));
    let mut app = App::new(&config, config_path);

    loop {
        terminal.draw(|frame| app.render(frame))?;

        // Handle input
        if event::poll(poll_interval)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && !app.handle_key(key) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Interactive state: the live parameters plus UI toggles.
pub struct App {
    pub params: TransformParams,
    pub knob: Knob,
    pub color_scheme: ColorScheme,
    pub show_grid: bool,
    pub show_legend: bool,
    initial: TransformParams,
    config_path: Option<PathBuf>,
    message: Option<String>,
    /// Last laid out frame and the plot size it was built for.
    cache: Option<(TransformParams, (u16, u16), PlotFrame)>,
}

impl App {
    pub fn new(config: &Config, config_path: Option<PathBuf>) -> Self {
        Self {
            params: config.params,
            knob: Knob::default(),
            color_scheme: config.plot.color_scheme,
            show_grid: config.plot.show_grid,
            show_legend: config.plot.show_legend,
            initial: config.params,
            config_path,
            message: None,
            cache: None,
        }
    }

    /// Apply a key press. Returns false when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.message = None;
        match key {
            KeyEvent {
                code: KeyCode::Char('q'),
                ..
            }
            | KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => return false,
            KeyEvent { code, .. } => match code {
                KeyCode::Char('1') => self.params.func = TrigFunc::Sine,
                KeyCode::Char('2') => self.params.func = TrigFunc::Cosine,
                KeyCode::Char('3') => self.params.func = TrigFunc::Tangent,
                KeyCode::Char('f') => self.params.func = self.params.func.next(),
                KeyCode::Tab | KeyCode::Down => self.knob = self.knob.next(),
                KeyCode::BackTab | KeyCode::Up => self.knob = self.knob.prev(),
                KeyCode::Right | KeyCode::Char('l') => self.params.step(self.knob, 1),
                KeyCode::Left | KeyCode::Char('h') => self.params.step(self.knob, -1),
                KeyCode::Char('+') | KeyCode::Char('=') => self.params.step(Knob::Zoom, 1),
                KeyCode::Char('-') => self.params.step(Knob::Zoom, -1),
                KeyCode::Char('0') => self.params = self.initial,
                KeyCode::Char('c') => self.color_scheme = self.color_scheme.next(),
                KeyCode::Char('g') => self.show_grid = !self.show_grid,
                KeyCode::Char('L') => self.show_legend = !self.show_legend,
                KeyCode::Char('w') => self.save(),
                _ => {}
            },
        }
        true
    }

    fn save(&mut self) {
        let Some(path) = self.config_path.clone() else {
            self.message = Some("No config directory available".to_string());
            return;
        };
        match config::save_params(&path, &self.params, self.color_scheme) {
            Ok(()) => self.message = Some(format!("Saved to {}", path.display())),
            Err(e) => {
                warn!("Failed to save config: {}", e);
                self.message = Some(format!("Save failed: {}", e));
            }
        }
    }

    /// Frame for the current parameters, rebuilt only when they or the size changed.
    fn frame_for(&mut self, cols: u16, rows: u16) -> &PlotFrame {
        let stale = match &self.cache {
            Some((params, size, _)) => *params != self.params || *size != (cols, rows),
            None => true,
        };
        if stale {
            self.cache = None;
        }

        let params = self.params;
        let (_, _, frame) = self.cache.get_or_insert_with(|| {
            let (width, height) = BrailleCanvas::new(cols as usize, rows as usize).viewport_size();
            debug!("Rebuilding plot for {} at {}x{}", params.to_query(), cols, rows);
            (params, (cols, rows), build_frame(&params, width, height))
        });
        frame
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        // Clear with transparent/reset background for terminal transparency support
        let block = ratatui::widgets::Block::default().style(Style::default().bg(Color::Reset));
        frame.render_widget(block, area);

        if area.height < 4 || area.width < 10 {
            write_text(frame, area.x, area.y, area.width, "Terminal too small", (200, 200, 200));
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(2),
                Constraint::Length(1),
            ])
            .split(area);
        let (status_area, plot_area, knob_area) = (chunks[0], chunks[1], chunks[2]);

        let palette = self.color_scheme.palette();
        let show_grid = self.show_grid;
        let show_legend = self.show_legend;

        let plot = self.frame_for(plot_area.width, plot_area.height).clone();
        let mut canvas = BrailleCanvas::new(plot_area.width as usize, plot_area.height as usize);
        canvas.plot(&plot, show_grid);
        canvas.render(frame, plot_area, |layer| match layer {
            Layer::Grid => palette.grid,
            Layer::Axis => palette.axis,
            Layer::Base => palette.base,
            Layer::Transformed => palette.transformed,
        });

        for label in compute_labels(&plot, plot_area.width, plot_area.height, show_legend) {
            let color = match label.kind {
                LabelKind::Tick => palette.label,
                LabelKind::BaseLegend => palette.base,
                LabelKind::TransformedLegend => palette.transformed,
            };
            write_text(
                frame,
                plot_area.x + label.col,
                plot_area.y + label.row,
                plot_area.width.saturating_sub(label.col),
                &label.text,
                color,
            );
        }

        self.render_status(frame, status_area);
        self.render_knobs(frame, knob_area, palette.transformed);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let status = match &self.message {
            Some(message) => format!(" {} ", message),
            None => format!(
                " [1/2/3]func [←→]adjust [↑↓]knob [+/-]zoom [c]olor: {} [g]rid [w]save [q]uit | ?{}",
                self.color_scheme.name(),
                self.params.to_query()
            ),
        };
        write_text(frame, area.x, area.y, area.width, &status, (128, 128, 128));
    }

    fn render_knobs(&self, frame: &mut Frame, area: Rect, highlight: Rgb) {
        let mut x = area.x;
        let end = area.x + area.width;
        let func = format!(" f = {} ", self.params.func);
        x = write_text(frame, x, area.y, end.saturating_sub(x), &func, (200, 200, 200));

        for knob in Knob::all() {
            let value = knob_readout(&self.params, *knob);
            let text = format!(" {} = {} ", knob.label(), value);
            let color = if *knob == self.knob { highlight } else { (160, 160, 160) };
            x = write_text(frame, x, area.y, end.saturating_sub(x), &text, color);
        }
    }
}

/// Knob value as shown under the plot.
pub fn knob_readout(params: &TransformParams, knob: Knob) -> String {
    let value = params.value(knob);
    match knob {
        Knob::Amplitude | Knob::Period => format_fraction(value),
        Knob::Phase => format_pi(value),
        Knob::Shift => format_number(value),
        Knob::Zoom => format_zoom(value),
    }
}

/// Write text into the buffer, clipped to `max_width` cells. Returns the next free column.
fn write_text(frame: &mut Frame, x: u16, y: u16, max_width: u16, text: &str, color: Rgb) -> u16 {
    let (r, g, b) = color;
    let mut col = x;
    for ch in text.chars().take(max_width as usize) {
        if let Some(cell) = frame.buffer_mut().cell_mut((col, y)) {
            cell.set_char(ch);
            cell.set_fg(Color::Rgb(r, g, b));
        }
        col += 1;
    }
    col
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        App::new(&Config::default(), None)
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert!(!app.handle_key(press(KeyCode::Char('q'))));
        assert!(!app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(app.handle_key(press(KeyCode::Char('c'))));
        assert_eq!(app.color_scheme, ColorScheme::Ocean);
    }

    #[test]
    fn test_function_keys() {
        let mut app = app();
        app.handle_key(press(KeyCode::Char('3')));
        assert_eq!(app.params.func, TrigFunc::Tangent);
        app.handle_key(press(KeyCode::Char('f')));
        assert_eq!(app.params.func, TrigFunc::Sine);
    }

    #[test]
    fn test_knob_adjustment_and_reset() {
        let mut app = app();
        app.handle_key(press(KeyCode::Right));
        assert_eq!(app.params.a, 2.0);
        app.handle_key(press(KeyCode::Tab));
        app.handle_key(press(KeyCode::Tab));
        assert_eq!(app.knob, Knob::Phase);
        app.handle_key(press(KeyCode::Left));
        assert_eq!(app.params.c, -PI / 4.0);
        app.handle_key(press(KeyCode::Char('+')));
        assert_eq!(app.params.zoom, 1.1);

        app.handle_key(press(KeyCode::Char('0')));
        assert_eq!(app.params, TransformParams::default());
    }

    #[test]
    fn test_save_without_path_reports() {
        let mut app = app();
        assert!(app.handle_key(press(KeyCode::Char('w'))));
        assert!(app.message.is_some());
    }

    #[test]
    fn test_frame_cache_tracks_params() {
        let mut app = app();
        let first = app.frame_for(40, 10).formula.clone();
        assert_eq!(first, "sin(x)");
        app.handle_key(press(KeyCode::Right));
        assert_eq!(app.frame_for(40, 10).formula, "2sin(x)");
    }

    #[test]
    fn test_knob_readout() {
        let params = TransformParams {
            a: 1.0 / 3.0,
            c: 3.0 * PI / 4.0,
            d: -2.0,
            zoom: 1.5,
            ..TransformParams::default()
        };
        assert_eq!(knob_readout(&params, Knob::Amplitude), "1/3");
        assert_eq!(knob_readout(&params, Knob::Phase), "3π/4");
        assert_eq!(knob_readout(&params, Knob::Shift), "-2");
        assert_eq!(knob_readout(&params, Knob::Zoom), "1.5x");
    }
}
