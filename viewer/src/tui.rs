//! Interactive terminal view of a running world.
//!
//! Dragging with the left button spawns germs; a plain click does not. `q` or Esc
//! quits and any other key toggles the DNA overlay.

use crate::config::ViewerConfig;
use anyhow::{Context as _, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use rand::Rng;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas as CanvasWidget, Circle, Context, Line, Points};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::{Frame, Terminal};
use shared::{Canvas, CanvasError, GermSnapshot, Vector2, WorldStats};
use sim::config::GERM_RADIUS;
use sim::render::{FOOD_COLOR, POISON_COLOR};
use sim::{health_color, RenderSink, Rgb, World};
use std::io::{self, Stdout};
use std::time::Instant;

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Canvas units covered by one terminal column
const UNITS_PER_COLUMN: f64 = 8.0;

/// Canvas units covered by one terminal row
const UNITS_PER_ROW: f64 = 16.0;

/// Length of an attraction ray per unit of gene
const DNA_RAY_SCALE: f64 = 15.0;

const FOOD_RAY_COLOR: Color = Color::Rgb(255, 255, 0);
const POISON_RAY_COLOR: Color = Color::Rgb(255, 0, 0);

/// Everything drawn during one tick
#[derive(Debug, Default)]
struct Scene {
    germs: Vec<GermSnapshot>,
    food: Vec<Vector2>,
    poison: Vec<Vector2>,
    show_dna: bool,
}

impl Scene {
    fn clear(&mut self) {
        self.germs.clear();
        self.food.clear();
        self.poison.clear();
    }
}

impl RenderSink for Scene {
    fn draw_germ(&mut self, germ: &GermSnapshot, show_dna: bool) {
        self.germs.push(germ.clone());
        self.show_dna = show_dna;
    }

    fn draw_food(&mut self, position: Vector2) {
        self.food.push(position);
    }

    fn draw_poison(&mut self, position: Vector2) {
        self.poison.push(position);
    }
}

pub fn run<R: Rng>(config: &ViewerConfig, rng: &mut R) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, config, rng);
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Term> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    undo_on_error(enter_alternate_screen(), || {
        let _ = disable_raw_mode();
    })
}

fn enter_alternate_screen() -> Result<Term> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

/// Run `undo` when `result` is an error, leaving the error untouched
fn undo_on_error<T, E>(result: Result<T, E>, undo: impl FnOnce()) -> Result<T, E> {
    if result.is_err() {
        undo();
    }
    result
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn event_loop<R: Rng>(terminal: &mut Term, config: &ViewerConfig, rng: &mut R) -> Result<()> {
    let mut area = canvas_area(terminal.size()?);
    let mut world = World::new(canvas_for(area)?, rng);
    let mut scene = Scene::default();
    let tick_interval = config.tick_interval();
    let mut last_tick = Instant::now();

    tracing::info!(
        width = world.canvas().width(),
        height = world.canvas().height(),
        "Terminal view started"
    );

    loop {
        let timeout = tick_interval.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    _ => world.toggle_dna_overlay(),
                },
                Event::Mouse(mouse) if spawns_germ(mouse.kind) => {
                    if let Some(position) = to_canvas_point(area, mouse.column, mouse.row) {
                        world.spawn_germ_at(position, rng);
                    }
                }
                Event::Resize(columns, rows) => {
                    area = canvas_area(Rect::new(0, 0, columns, rows));
                    world.resize(canvas_for(area)?);
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_interval {
            scene.clear();
            world.tick_with(rng, &mut scene);
            let stats = world.stats();
            let canvas = *world.canvas();
            terminal.draw(|frame| draw(frame, &scene, &stats, &canvas, config.fps))?;
            last_tick = Instant::now();
        }
    }
}

/// Only dragging spawns; a plain click does nothing
fn spawns_germ(kind: MouseEventKind) -> bool {
    matches!(kind, MouseEventKind::Drag(MouseButton::Left))
}

fn split(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);
    (chunks[0], chunks[1])
}

fn canvas_block() -> Block<'static> {
    Block::default().borders(Borders::ALL).title(" germs ")
}

/// The terminal cells the world is painted into
fn canvas_area(screen: Rect) -> Rect {
    let (_, body) = split(screen);
    canvas_block().inner(body)
}

fn canvas_for(area: Rect) -> Result<Canvas, CanvasError> {
    Canvas::new(
        area.width.max(1) as f64 * UNITS_PER_COLUMN,
        area.height.max(1) as f64 * UNITS_PER_ROW,
    )
}

/// Map a terminal cell to the centre of the canvas region it covers
fn to_canvas_point(area: Rect, column: u16, row: u16) -> Option<Vector2> {
    let inside = column >= area.x
        && column < area.x + area.width
        && row >= area.y
        && row < area.y + area.height;
    if !inside {
        return None;
    }
    Some(Vector2::new(
        (column - area.x) as f64 * UNITS_PER_COLUMN + UNITS_PER_COLUMN / 2.0,
        (row - area.y) as f64 * UNITS_PER_ROW + UNITS_PER_ROW / 2.0,
    ))
}

/// Canvas y grows downward, the widget's y grows upward
fn flip(point: Vector2, height: f64) -> (f64, f64) {
    (point.x, height - point.y)
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

fn draw(frame: &mut Frame, scene: &Scene, stats: &WorldStats, canvas: &Canvas, fps: u32) {
    let (header, body) = split(frame.size());

    let seconds = stats.elapsed_ticks / u64::from(fps.max(1));
    let status = format!(
        "Total Germs: {} grm | Living Time: {} sec | Epoch {} | Food {} | Poison {} | drag: spawn, any key: DNA, q: quit",
        stats.active_count, seconds, stats.epoch, stats.food, stats.poison
    );
    frame.render_widget(
        Paragraph::new(status).style(Style::default().fg(Color::White)),
        header,
    );

    let height = canvas.height();
    let widget = CanvasWidget::default()
        .block(canvas_block())
        .marker(Marker::Braille)
        .background_color(Color::Black)
        .x_bounds([0.0, canvas.width()])
        .y_bounds([0.0, height])
        .paint(|ctx| paint(ctx, scene, height));
    frame.render_widget(widget, body);
}

fn paint(ctx: &mut Context<'_>, scene: &Scene, height: f64) {
    let food: Vec<_> = scene.food.iter().map(|&p| flip(p, height)).collect();
    let poison: Vec<_> = scene.poison.iter().map(|&p| flip(p, height)).collect();
    ctx.draw(&Points {
        coords: &food,
        color: color(FOOD_COLOR),
    });
    ctx.draw(&Points {
        coords: &poison,
        color: color(POISON_COLOR),
    });
    ctx.layer();

    for germ in &scene.germs {
        let (x, y) = flip(germ.position, height);
        let (dx, dy) = (germ.heading.cos(), -germ.heading.sin());
        let half = GERM_RADIUS * 2.0;

        ctx.draw(&Line {
            x1: x - dx * half,
            y1: y - dy * half,
            x2: x + dx * half,
            y2: y + dy * half,
            color: color(health_color(germ.health)),
        });

        if scene.show_dna {
            let genome = &germ.genome;
            let food_ray = genome.food_attraction * DNA_RAY_SCALE;
            let poison_ray = genome.poison_attraction * DNA_RAY_SCALE;

            ctx.draw(&Line {
                x1: x,
                y1: y,
                x2: x + dx * food_ray,
                y2: y + dy * food_ray,
                color: FOOD_RAY_COLOR,
            });
            ctx.draw(&Circle {
                x,
                y,
                radius: genome.food_perception.abs() / 2.0,
                color: FOOD_RAY_COLOR,
            });
            ctx.draw(&Line {
                x1: x,
                y1: y,
                x2: x + dx * poison_ray,
                y2: y + dy * poison_ray,
                color: POISON_RAY_COLOR,
            });
            ctx.draw(&Circle {
                x,
                y,
                radius: genome.poison_perception.abs() / 2.0,
                color: POISON_RAY_COLOR,
            });
        }
    }
}
