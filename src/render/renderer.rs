use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph},
};

use super::palette::{DARK, DARKEST, LED_OFF, LED_ON, LIGHT, LIGHTEST, SCREEN_OFF};
use crate::game::{Position, SessionState, Snapshot};

/// Where the power-on animation is
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BootPhase {
    /// Progress bar filling, `progress` in `0.0..1.0`
    Booting { progress: f64 },
    /// Logo and press-start prompt
    Ready,
}

impl BootPhase {
    pub fn at(elapsed: Duration, boot: Duration) -> Self {
        if elapsed >= boot || boot.is_zero() {
            BootPhase::Ready
        } else {
            BootPhase::Booting {
                progress: elapsed.as_secs_f64() / boot.as_secs_f64(),
            }
        }
    }
}

/// Console decorations drawn around the game screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chrome {
    pub boot: BootPhase,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, view: &Snapshot, chrome: &Chrome) {
        let powered = view.state != SessionState::Off;
        let case = self.render_case(powered);
        let inner = case.inner(frame.area());
        frame.render_widget(case, frame.area());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Screen
                Constraint::Length(3), // Buttons legend
            ])
            .split(inner);

        // Two terminal columns per cell keeps cells roughly square
        let width = view.grid.width().saturating_mul(2).saturating_add(2);
        let height = view.grid.height().saturating_add(2);
        let screen = centered(chunks[0], clamp_u16(width), clamp_u16(height));

        match view.state {
            SessionState::Off => {
                frame.render_widget(Block::default().style(Style::default().bg(SCREEN_OFF)), screen);
            }
            SessionState::Idle => self.render_title(frame, screen, chrome.boot),
            SessionState::Running => {
                frame.render_widget(self.render_grid(view, screen), screen);
            }
            SessionState::Paused => {
                frame.render_widget(self.render_grid(view, screen), screen);
                self.render_pause_overlay(frame, screen);
            }
            SessionState::Ended => {
                frame.render_widget(self.render_game_over(view), screen);
            }
        }

        frame.render_widget(self.render_controls(), chunks[1]);
    }

    fn render_case(&self, powered: bool) -> Block<'static> {
        let (led, led_color) = if powered { ("●", LED_ON) } else { ("○", LED_OFF) };
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Gray))
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(led, Style::default().fg(led_color)),
                Span::styled(" POWER ", Style::default().fg(Color::DarkGray)),
            ]))
            .title(
                Line::from(Span::styled(
                    " GAMELAD ",
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD | Modifier::ITALIC),
                ))
                .alignment(Alignment::Right),
            )
    }

    fn screen_block(&self) -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Thick)
            .border_style(Style::default().fg(DARK).bg(LIGHTEST))
            .style(Style::default().bg(LIGHTEST))
    }

    fn render_title(&self, frame: &mut Frame, area: Rect, phase: BootPhase) {
        let block = self.screen_block();
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match phase {
            BootPhase::Booting { progress } => {
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Percentage(40),
                        Constraint::Length(1),
                        Constraint::Length(1),
                        Constraint::Length(1),
                        Constraint::Min(0),
                    ])
                    .split(inner);

                let text = Paragraph::new("Booting...")
                    .style(Style::default().fg(DARKEST))
                    .alignment(Alignment::Center);
                frame.render_widget(text, rows[1]);

                let bar = Gauge::default()
                    .gauge_style(Style::default().fg(DARK).bg(LIGHT))
                    .ratio(progress.clamp(0.0, 1.0))
                    .label("");
                frame.render_widget(bar, centered(rows[3], inner.width / 2, 1));
            }
            BootPhase::Ready => {
                let text = vec![
                    Line::from(""),
                    Line::from(""),
                    Line::from(Span::styled(
                        "NONTENDO",
                        Style::default()
                            .fg(DARKEST)
                            .add_modifier(Modifier::BOLD | Modifier::ITALIC),
                    )),
                    Line::from(""),
                    Line::from(""),
                    Line::from(Span::styled(
                        "PRESS START",
                        Style::default()
                            .fg(DARK)
                            .add_modifier(Modifier::SLOW_BLINK),
                    )),
                ];
                frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
            }
        }
    }

    fn render_grid(&self, view: &Snapshot, area: Rect) -> Paragraph<'static> {
        let head = view.snake.first().copied();

        // Cells past the screen edge are clipped, so skip building them
        let columns = view.grid.width().min(usize::from(area.width.saturating_sub(2)) / 2);
        let rows = view.grid.height().min(usize::from(area.height.saturating_sub(2)));
        let mut lines = Vec::with_capacity(rows);

        for y in 0..rows {
            let mut spans = Vec::with_capacity(columns);

            for x in 0..columns {
                let pos = Position::new(x as i32, y as i32);

                let cell = if Some(pos) == head {
                    Span::styled("██", Style::default().fg(DARKEST))
                } else if view.snake.contains(&pos) {
                    Span::styled("██", Style::default().fg(DARK))
                } else if Some(pos) == view.food {
                    Span::styled("▐▌", Style::default().fg(DARK))
                } else {
                    Span::raw("  ")
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            self.screen_block().title(Span::styled(
                format!(" SCORE: {} ", view.score),
                Style::default().fg(DARKEST).add_modifier(Modifier::BOLD),
            )),
        )
    }

    fn render_pause_overlay(&self, frame: &mut Frame, screen: Rect) {
        let popup = centered(screen, 16, 5);
        let text = vec![
            Line::from(Span::styled(
                "PAUSED",
                Style::default().fg(DARKEST).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled("PRESS START", Style::default().fg(DARK))),
        ];

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(text).alignment(Alignment::Center).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(DARK))
                    .style(Style::default().bg(LIGHT)),
            ),
            popup,
        );
    }

    fn render_game_over(&self, view: &Snapshot) -> Paragraph<'static> {
        let text = vec![
            Line::from(""),
            Line::from(""),
            Line::from(Span::styled(
                "GAME OVER",
                Style::default().fg(DARKEST).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("SCORE: {}", view.score),
                Style::default().fg(DARKEST),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("PRESS ", Style::default().fg(DARK)),
                Span::styled("R", Style::default().fg(DARKEST).add_modifier(Modifier::BOLD)),
                Span::styled(" TO PLAY AGAIN", Style::default().fg(DARK)),
            ]),
        ];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(self.screen_block())
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw("/"),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" d-pad | "),
            Span::styled("Enter", Style::default().fg(Color::Cyan)),
            Span::raw("/"),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" start | "),
            Span::styled("P", Style::default().fg(Color::Yellow)),
            Span::raw(" power | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" new game | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

/// A `width` x `height` rect centred in `area`, shrunk to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
