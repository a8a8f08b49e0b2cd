//! Play command implementation - the interactive quiz TUI.

// TUI handlers take owned options and small copies by value
#![allow(clippy::needless_pass_by_value)]

use super::output::{format_summary_text, write_summary};
use super::{resolve_config, CliError};
use capquiz::{CityList, GameState, GeoPoint, QuizResult, SessionSummary, Viewport};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Map, MapResolution},
        Block, Borders, Paragraph,
    },
    Frame, Terminal,
};
use std::io::{stdout, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Cursor steps per key press while shift is held.
const FAST_STEP: i32 = 5;

/// Options for the play command.
#[derive(Debug)]
pub(crate) struct PlayOptions {
    /// Custom city dataset.
    pub(crate) cities: Option<PathBuf>,
    /// Config file.
    pub(crate) config: Option<PathBuf>,
    /// Budget override.
    pub(crate) budget: Option<u32>,
    /// Threshold override.
    pub(crate) threshold: Option<u32>,
    /// Where to write the session summary.
    pub(crate) save: Option<PathBuf>,
}

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the dataset or config is invalid or the TUI fails.
pub(crate) fn execute(options: PlayOptions) -> Result<(), CliError> {
    let cities = match &options.cities {
        Some(path) => CityList::load(path)?,
        None => CityList::bundled()?,
    };
    let config = resolve_config(options.config.as_deref(), options.budget, options.threshold)?;
    let game = GameState::new(cities, config)?;

    let summary = run_tui(App::new(game))?;
    tracing::info!(
        cities_completed = summary.cities_completed,
        budget_left_km = summary.budget_left_km,
        "session ended"
    );

    print!("{}", format_summary_text(&summary));
    if let Some(path) = options.save {
        write_summary(&path, &summary)?;
        println!("Summary saved to: {}", path.display());
    }

    Ok(())
}

/// App state for the TUI.
struct App {
    game: GameState,
    view: Viewport,
    cursor: GeoPoint,
    /// Inner map area from the last draw, for mouse hit-testing.
    map_area: Rect,
    /// Why the last action was rejected.
    notice: Option<String>,
    quit: bool,
}

impl App {
    fn new(game: GameState) -> Self {
        Self {
            game,
            view: Viewport::default(),
            cursor: GeoPoint::new(20.0, 0.0),
            map_area: Rect::default(),
            notice: None,
            quit: false,
        }
    }

    fn report(&mut self, result: QuizResult<()>) {
        match result {
            Ok(()) => self.notice = None,
            Err(e) => {
                tracing::debug!(error = %e, "action rejected");
                self.notice = Some(e.to_string());
            }
        }
    }

    fn start(&mut self) {
        self.game.start();
        self.notice = None;
    }

    fn restart(&mut self) {
        self.game.restart();
        self.view = Viewport::default();
        self.notice = None;
    }

    fn move_cursor(&mut self, rows: i32, cols: i32) {
        self.cursor = self.view.nudge(self.cursor, rows, cols);
        self.view.follow(self.cursor);
    }

    fn select_at_cursor(&mut self) {
        let result = self.game.select(self.cursor);
        self.report(result);
    }

    fn place(&mut self) {
        let result = self.game.place(Instant::now()).map(|_| ());
        self.report(result);
    }

    fn zoom_in(&mut self) {
        if self.view.zoom_in() {
            self.view.center_on(self.cursor);
        }
    }

    fn zoom_out(&mut self) {
        if self.view.zoom_out() {
            self.view.follow(self.cursor);
        }
    }

    fn click(&mut self, column: u16, row: u16) {
        let area = self.map_area;
        let (Some(col), Some(row)) = (column.checked_sub(area.x), row.checked_sub(area.y)) else {
            return;
        };
        if let Some(point) = self.view.cell_to_geo(col, row, area.width, area.height) {
            self.cursor = point;
            if self.game.is_playing() {
                self.select_at_cursor();
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
            FAST_STEP
        } else {
            1
        };

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit = true;
            }
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Esc => self.game.dismiss_feedback(),
            KeyCode::Char('s') if !self.game.is_playing() => self.start(),
            KeyCode::Enter if !self.game.is_playing() => self.start(),
            KeyCode::Enter | KeyCode::Char(' ') => self.select_at_cursor(),
            KeyCode::Char('p') => self.place(),
            KeyCode::Char('r') if self.game.is_playing() => self.restart(),
            KeyCode::Up | KeyCode::Char('k' | 'K') => self.move_cursor(-step, 0),
            KeyCode::Down | KeyCode::Char('j' | 'J') => self.move_cursor(step, 0),
            KeyCode::Left | KeyCode::Char('h' | 'H') => self.move_cursor(0, -step),
            KeyCode::Right | KeyCode::Char('l' | 'L') => self.move_cursor(0, step),
            KeyCode::Char('+' | '=') => self.zoom_in(),
            KeyCode::Char('-') => self.zoom_out(),
            KeyCode::Char('0') => self.view = Viewport::default(),
            _ => {}
        }
    }
}

fn run_tui(mut app: App) -> Result<SessionSummary, CliError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))?;

    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result.map(|()| app.game.summary())
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<(), CliError> {
    while !app.quit {
        terminal
            .draw(|f| ui(f, app))
            .map_err(|e| CliError::new(e.to_string()))?;

        app.game.tick(Instant::now());

        // Handle input with timeout so the feedback timer keeps running
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => app.click(column, row),
                _ => {}
            }
        }
    }
    Ok(())
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),  // Header
            Constraint::Min(10),    // Map
            Constraint::Length(3),  // Feedback
            Constraint::Length(3),  // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], app);
    render_map(f, chunks[1], app);
    render_feedback(f, chunks[2], app);
    render_footer(f, chunks[3], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let game = &app.game;
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let lines = if game.is_playing() {
        let progress = Line::from(vec![
            Span::styled(
                format!("{} cities placed", game.cities_completed()),
                bold.fg(Color::Cyan),
            ),
            Span::raw("   "),
            Span::styled(
                format!("{} kilometers left", game.distance_budget_km()),
                bold.fg(Color::Cyan),
            ),
            Span::styled(
                format!("   cursor {}", app.cursor),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        let prompt = match game.current_city() {
            _ if game.is_game_over() => Line::from(Span::styled(
                "GAME OVER - press r to restart",
                bold.fg(Color::Yellow),
            )),
            Some(city) => Line::from(format!("Select the location of \"{}\"", city.name)),
            None => Line::from(""),
        };
        vec![progress, prompt]
    } else {
        vec![
            Line::from(Span::styled(
                format!("Find {} capitals", game.cities().len()),
                bold.fg(Color::Cyan),
            )),
            Line::from(format!(
                "Budget: {} km. Guesses within {} km are free. Press Enter to start.",
                game.config().initial_budget_km,
                game.config().correct_threshold_km
            )),
        ]
    };

    let header = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Capital Quiz "),
    );
    f.render_widget(header, area);
}

fn render_map(f: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Map (zoom {}) ", app.view.zoom()));
    app.map_area = block.inner(area);

    let game = &app.game;
    let cursor = app.cursor;
    let show_cursor = game.is_playing() && !game.is_round_pending() && !game.is_game_over();

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds(app.view.x_bounds())
        .y_bounds(app.view.y_bounds())
        .paint(|ctx| {
            ctx.draw(&Map {
                color: Color::Blue,
                resolution: MapResolution::High,
            });
            ctx.layer();

            if let (Some(guess), Some(target)) = (game.user_marker(), game.city_marker()) {
                ctx.draw(&CanvasLine {
                    x1: guess.longitude,
                    y1: guess.latitude,
                    x2: target.longitude,
                    y2: target.latitude,
                    color: Color::DarkGray,
                });
            }
            if let Some(guess) = game.user_marker() {
                ctx.print(
                    guess.longitude,
                    guess.latitude,
                    Span::styled("●", Style::default().fg(Color::Red)),
                );
            }
            if let Some(target) = game.city_marker() {
                ctx.print(
                    target.longitude,
                    target.latitude,
                    Span::styled(
                        "★",
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                );
            }
            if show_cursor {
                ctx.print(
                    cursor.longitude,
                    cursor.latitude,
                    Span::styled("+", Style::default().fg(Color::Yellow)),
                );
            }
        });

    f.render_widget(canvas, area);
}

fn render_feedback(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title(" Result ");

    let paragraph = if let Some(feedback) = app.game.feedback() {
        let color = if feedback.is_success() {
            Color::Green
        } else {
            Color::Red
        };
        Paragraph::new(feedback.to_string())
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
    } else if let Some(notice) = &app.notice {
        Paragraph::new(notice.as_str()).style(Style::default().fg(Color::Gray))
    } else {
        Paragraph::new("")
    };

    f.render_widget(paragraph.block(block), area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let game = &app.game;
    let controls = if !game.is_playing() {
        " [Enter] Start  [q] Quit "
    } else if game.is_game_over() {
        " [r] Restart  [+/-] Zoom  [0] World  [q] Quit "
    } else if game.is_round_pending() {
        " [Esc] Dismiss  [+/-] Zoom  [q] Quit "
    } else {
        " [←↑↓→/hjkl] Move  [Shift] Fast  [Enter/Click] Select  [p] Place  [+/-] Zoom  [r] Restart  [q] Quit "
    };

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use capquiz::{CityTarget, QuizConfig};

    fn app() -> App {
        let cities = CityList::new(vec![
            CityTarget::new("Nairobi", -1.2921, 36.8219),
            CityTarget::new("Lima", -12.0464, -77.0428),
        ])
        .unwrap();
        App::new(GameState::new(cities, QuizConfig::default()).unwrap())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_enter_starts_then_selects() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert!(app.game.is_playing());
        assert!(app.game.user_marker().is_none());

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.game.user_marker(), Some(app.cursor));
    }

    #[test]
    fn test_place_without_guess_counts_as_correct() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('p'));
        assert!(app.notice.is_none());
        assert_eq!(app.game.cities_completed(), 1);
        assert_eq!(app.game.distance_budget_km(), 1500);
        assert_eq!(app.game.feedback().unwrap().to_string(), "Correct");

        // A second place during the feedback window is refused.
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(
            app.notice.as_deref(),
            Some("waiting for the current round to clear")
        );
        assert_eq!(app.game.cities_completed(), 1);
    }

    #[test]
    fn test_cursor_moves_with_keys() {
        let mut app = app();
        let start = app.cursor;
        press(&mut app, KeyCode::Right);
        assert!(app.cursor.longitude > start.longitude);
        press(&mut app, KeyCode::Up);
        assert!(app.cursor.latitude > start.latitude);
    }

    #[test]
    fn test_click_selects_point_in_map() {
        let mut app = app();
        app.map_area = Rect::new(1, 5, 360, 180);
        press(&mut app, KeyCode::Enter);

        // Column 181 is the cell just east of the prime meridian.
        app.click(1 + 180, 5 + 90);
        let guess = app.game.user_marker().unwrap();
        assert!((guess.longitude - 0.5).abs() < 1e-9);
        assert!((guess.latitude + 0.5).abs() < 1e-9);

        // Outside the map area is ignored.
        app.click(0, 0);
        assert_eq!(app.game.user_marker(), Some(guess));
    }

    #[test]
    fn test_restart_key_resets_game() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.game.cities_completed(), 1);

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.game.cities_completed(), 0);
        assert_eq!(app.game.distance_budget_km(), 1500);
        assert!(app.game.is_playing());
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.quit);
    }
}
