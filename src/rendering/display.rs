//! # Map Display
//!
//! Draws the world map, guess markers, round summaries, and the final score
//! chart with macroquad. All drawing is immediate-mode, once per frame.

use crate::game::{GameManager, GamePhase};
use crate::geo::{Coordinate, MapProjection};
use crate::game::Rgb;
use crate::rendering::GeoOverlay;
use macroquad::prelude::*;

const MARKER_RADIUS: f32 = 6.0;
const TITLE_FONT_SIZE: f32 = 24.0;
const TITLE_LINE_HEIGHT: f32 = 28.0;

fn rgb_color((r, g, b): Rgb) -> Color {
    Color::from_rgba(r, g, b, 255)
}

/// Per-level base map style (fixed policy, levels 0..3).
struct LevelStyle {
    ocean: Color,
    land: Color,
    borders: Option<Color>,
    title: Color,
}

fn level_style(level: usize) -> LevelStyle {
    match level {
        // Stock-imagery look: blue ocean, shaded land, dark borders
        0 => LevelStyle {
            ocean: Color::from_rgba(70, 110, 160, 255),
            land: Color::from_rgba(160, 165, 130, 255),
            borders: Some(Color::from_rgba(40, 40, 40, 255)),
            title: WHITE,
        },
        // Solid black land, white borders
        1 => LevelStyle {
            ocean: Color::from_rgba(225, 225, 225, 255),
            land: BLACK,
            borders: Some(WHITE),
            title: BLACK,
        },
        // Solid black land, no borders
        _ => LevelStyle {
            ocean: Color::from_rgba(225, 225, 225, 255),
            land: BLACK,
            borders: None,
            title: BLACK,
        },
    }
}

/// Render surface for the quiz.
///
/// Holds the (optional) world geometry and the projection fitted to the
/// current window; the game core is read-only from here.
pub struct MapDisplay {
    overlay: Option<GeoOverlay>,
    projection: MapProjection,
}

impl MapDisplay {
    /// Creates a display. `overlay` is `None` when the world geometry could
    /// not be loaded; the map then degrades to a graticule.
    pub fn new(overlay: Option<GeoOverlay>) -> Self {
        Self {
            overlay,
            projection: MapProjection::fit(screen_width(), screen_height()),
        }
    }

    /// Refits the projection to the window. Call once per frame, before
    /// converting clicks.
    pub fn update(&mut self) {
        self.projection = MapProjection::fit(screen_width(), screen_height());
    }

    /// The projection used for click conversion this frame.
    pub fn projection(&self) -> &MapProjection {
        &self.projection
    }

    /// Renders whatever the current phase calls for.
    pub fn render(&self, game: &GameManager) {
        match game.phase() {
            GamePhase::AwaitingGuess { round, turn } => self.render_round(game, round, Some(turn)),
            GamePhase::RoundComplete { round } => self.render_round(game, round, None),
            GamePhase::GameOver => self.render_summary(game),
            GamePhase::Setup => clear_background(BLACK),
        }
    }

    /// Draws one round: base map for the level, markers for this round's
    /// guesses, and either the guess prompt or the round summary.
    fn render_round(&self, game: &GameManager, round: usize, awaiting_turn: Option<usize>) {
        let style = level_style(game.level_for_round(round));
        self.draw_base_map(&style);

        let target = game
            .target_city()
            .map(|city| city.location.coordinate);

        for outcome in game.round_outcomes() {
            let color = game
                .registry()
                .get(outcome.player)
                .map(|p| rgb_color(p.color))
                .unwrap_or(WHITE);
            self.draw_marker(outcome.guess, color);
        }

        let mut title: Vec<String> = Vec::new();
        if let Some(city) = game.target_city() {
            title.push(format!(
                "Round {}/{} - Where is {}?",
                round + 1,
                game.total_rounds(),
                city.name
            ));
        }

        match awaiting_turn {
            Some(turn) => {
                let player = game.registry().current(turn);
                title.push(format!("{}, click your guess", player.name));
            }
            None => {
                // Round complete: reveal the target and connect every guess to it
                if let Some(target) = target {
                    for outcome in game.round_outcomes() {
                        let color = game
                            .registry()
                            .get(outcome.player)
                            .map(|p| rgb_color(p.color))
                            .unwrap_or(WHITE);
                        self.draw_segment(outcome.guess, target, color);
                    }
                    self.draw_marker(target, GOLD);
                }
                for outcome in game.round_outcomes() {
                    if let Some(player) = game.registry().get(outcome.player) {
                        title.push(format!(
                            "{}: {:.0} km (clicked near {})",
                            player.name, outcome.distance_km, outcome.place
                        ));
                    }
                }
                title.push("Click anywhere to continue".to_string());
            }
        }

        self.draw_title(&title, style.title);
    }

    /// Draws the final summary: one score bar per round per player, a legend
    /// colored by player, and totals in the title.
    fn render_summary(&self, game: &GameManager) {
        clear_background(Color::from_rgba(245, 245, 245, 255));

        let totals: Vec<String> = game
            .registry()
            .iter()
            .map(|p| format!("{}: {:.0} km", p.name, p.total_score()))
            .collect();
        let title = vec![format!("Final scores - {}", totals.join(", "))];
        self.draw_title(&title, BLACK);

        let margin = 60.0;
        let plot_x = margin;
        let plot_y = margin + TITLE_LINE_HEIGHT;
        let plot_w = screen_width() - 2.0 * margin;
        let plot_h = screen_height() - plot_y - margin;

        let max_score = game
            .registry()
            .iter()
            .flat_map(|p| p.scores().iter().copied())
            .fold(1.0_f64, f64::max);

        let players = game.registry().len();
        let rounds = game.total_rounds();
        let group_w = plot_w / players as f32;
        let bar_w = (group_w * 0.8) / rounds as f32;

        for (p, player) in game.registry().iter().enumerate() {
            let color = rgb_color(player.color);
            for (r, score) in player.scores().iter().enumerate() {
                let h = (score / max_score) as f32 * plot_h;
                let x = plot_x + p as f32 * group_w + group_w * 0.1 + r as f32 * bar_w;
                draw_rectangle(x, plot_y + plot_h - h, bar_w.max(1.0) - 1.0, h, color);
            }
            // Legend entry under each player's group
            let label_x = plot_x + p as f32 * group_w + group_w * 0.1;
            let label_y = plot_y + plot_h + 20.0;
            draw_rectangle(label_x, label_y - 10.0, 12.0, 12.0, color);
            draw_text(&player.name, label_x + 18.0, label_y, 20.0, BLACK);
        }

        // Baseline
        draw_line(plot_x, plot_y + plot_h, plot_x + plot_w, plot_y + plot_h, 1.5, DARKGRAY);
    }

    fn draw_base_map(&self, style: &LevelStyle) {
        clear_background(style.ocean);
        match &self.overlay {
            Some(overlay) => {
                self.draw_land(overlay, style.land);
                if let Some(border_color) = style.borders {
                    self.draw_borders(overlay, border_color);
                }
            }
            None => self.draw_graticule(),
        }
    }

    fn draw_land(&self, overlay: &GeoOverlay, color: Color) {
        let proj = &self.projection;
        let row_h = proj.height / overlay.land.rows as f32;
        for (row, spans) in overlay.land.spans.iter().enumerate() {
            let y = proj.origin_y + row as f32 * row_h;
            for &(lon0, lon1) in spans {
                let x0 = proj.origin_x + ((lon0 + 180.0) / 360.0) as f32 * proj.width;
                let x1 = proj.origin_x + ((lon1 + 180.0) / 360.0) as f32 * proj.width;
                draw_rectangle(x0, y, x1 - x0, row_h + 0.5, color);
            }
        }
    }

    fn draw_borders(&self, overlay: &GeoOverlay, color: Color) {
        for polyline in &overlay.borders {
            for window in polyline.windows(2) {
                let (lat_a, lon_a) = window[0];
                let (lat_b, lon_b) = window[1];
                // Skip segments wrapping the antimeridian
                if (lon_a - lon_b).abs() > 180.0 {
                    continue;
                }
                let (x0, y0) = self.projection.to_screen(Coordinate::new(lat_a, lon_a));
                let (x1, y1) = self.projection.to_screen(Coordinate::new(lat_b, lon_b));
                draw_line(x0, y0, x1, y1, 1.0, color);
            }
        }
    }

    /// Fallback base layer when world geometry is unavailable.
    fn draw_graticule(&self) {
        let proj = &self.projection;
        let color = Color::from_rgba(255, 255, 255, 60);
        let mut lon = -180.0;
        while lon <= 180.0 {
            let (x, _) = proj.to_screen(Coordinate::new(0.0, lon));
            draw_line(x, proj.origin_y, x, proj.origin_y + proj.height, 1.0, color);
            lon += 30.0;
        }
        let mut lat = -90.0;
        while lat <= 90.0 {
            let (_, y) = proj.to_screen(Coordinate::new(lat, 0.0));
            draw_line(proj.origin_x, y, proj.origin_x + proj.width, y, 1.0, color);
            lat += 30.0;
        }
    }

    fn draw_marker(&self, coordinate: Coordinate, color: Color) {
        let (x, y) = self.projection.to_screen(coordinate);
        draw_circle(x, y, MARKER_RADIUS, color);
        draw_circle_lines(x, y, MARKER_RADIUS, 1.5, BLACK);
    }

    fn draw_segment(&self, from: Coordinate, to: Coordinate, color: Color) {
        let (x0, y0) = self.projection.to_screen(from);
        let (x1, y1) = self.projection.to_screen(to);
        draw_line(x0, y0, x1, y1, 2.0, color);
    }

    fn draw_title(&self, lines: &[String], color: Color) {
        for (i, line) in lines.iter().enumerate() {
            draw_text(
                line,
                12.0,
                TITLE_LINE_HEIGHT * (i as f32 + 1.0),
                TITLE_FONT_SIZE,
                color,
            );
        }
    }
}
