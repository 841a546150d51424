use chrono::Local;
use log::error;
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph, Tabs, Wrap};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::banner::AnimatedBanner;
use crate::components::banner_frames::{BannerColor, BannerTheme, resolve, team_color};
use crate::state::app_state::PromptKind;
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::state::session::PRESET_TARGETS;
use crate::ui::layout::{LayoutAreas, centered};
use domino_api::{Analysis, GameState, Team};

static TABS: &[&str; 2] = &["Board", "Analysis"];

/// Below this width the analysis panel moves to its own tab only.
const SIDE_PANEL_MIN_WIDTH: u16 = 110;

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        if app.state.show_intro {
            draw_intro(f, f.area(), app);
            return;
        }

        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Board => draw_board(f, layout.main, app, loading),
            MenuItem::Analysis => draw_analysis(f, layout.main, app, loading),
            MenuItem::Help => draw_help(f, layout.main),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }

        // Overlays, in stacking order.
        if app.winner().is_some() {
            draw_win_overlay(f, layout.main, app);
        } else if app.state.confirm_reset {
            draw_reset_confirm(f, layout.main);
        }
        if app.state.prompt.is_some() {
            draw_prompt(f, layout.main, app);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });

    if let Err(e) = result {
        error!("Failed to draw frame: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_intro(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::DarkGray).title(" Quantum Domino ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [_top_pad, banner_area, prompt_area, _bottom_pad] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(9),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(inner);
    f.render_widget(
        AnimatedBanner {
            frame: app.state.animation.frame,
            tick: app.state.animation.tick,
            theme: BannerTheme::Dark,
        },
        banner_area,
    );
    f.render_widget(
        Paragraph::new("Press Enter to start")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        prompt_area,
    );
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Board => 0,
        MenuItem::Analysis => 1,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

fn draw_board(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    let (board, side) = if area.width >= SIDE_PANEL_MIN_WIDTH {
        let [board, side] =
            Layout::horizontal([Constraint::Percentage(64), Constraint::Percentage(36)])
                .areas(area);
        (board, Some(side))
    } else {
        (area, None)
    };

    let [target_area, cards_area, history_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(7),
        Constraint::Fill(1),
    ])
    .areas(board);

    draw_target_bar(f, target_area, &app.state.game);

    let [card_a, card_b] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(cards_area);
    draw_score_card(f, card_a, &app.state.game, Team::A);
    draw_score_card(f, card_b, &app.state.game, Team::B);

    draw_history(f, history_area, app);

    if let Some(side) = side {
        draw_analysis(f, side, app, loading);
    }
}

fn draw_target_bar(f: &mut Frame, area: Rect, game: &GameState) {
    let block = default_border(Color::DarkGray).title(" Score Limit ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut spans = Vec::new();
    for preset in PRESET_TARGETS {
        let style = if preset == game.winning_score {
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {preset} "), style));
        spans.push(Span::raw(" "));
    }
    if !PRESET_TARGETS.contains(&game.winning_score) {
        spans.push(Span::styled(
            format!(" {} ", game.winning_score),
            Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        " p=next preset  t=custom",
        resolve(BannerColor::Dim, BannerTheme::Dark),
    ));
    f.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn draw_score_card(f: &mut Frame, area: Rect, game: &GameState, team: Team) {
    let color = team_color(team);
    let totals = game.totals();
    let mut block = default_border(color).title(format!(" {} ", team.label()));
    if game.leader() == Some(team) {
        block = block.title(
            Line::from(Span::styled(
                " LEADER ",
                Style::default().fg(Color::Black).bg(color).add_modifier(Modifier::BOLD),
            ))
            .right_aligned(),
        );
    }
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [name_area, score_area, _pad, gauge_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    f.render_widget(
        Paragraph::new(game.team_name(team).to_uppercase())
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        name_area,
    );
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                totals.for_team(team).to_string(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" / {} PTS", game.winning_score),
                Style::default().fg(Color::DarkGray),
            ),
        ]))
        .alignment(Alignment::Center),
        score_area,
    );

    let progress = game.progress(team);
    f.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(color).bg(Color::Indexed(236)))
            .ratio(progress)
            .label(format!("{:.0}%", progress * 100.0)),
        gauge_area,
    );
}

fn draw_history(f: &mut Frame, area: Rect, app: &App) {
    let game = &app.state.game;
    let block = default_border(Color::White).title(" Chronology ").title(
        Line::from(" a/b=add  x=delete  R=reset ")
            .right_aligned()
            .style(Style::default().fg(Color::DarkGray)),
    );
    let inner = block.inner(area);
    f.render_widget(block, area);

    if game.rounds.is_empty() {
        f.render_widget(
            Paragraph::new("Timeline data null // awaiting input")
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))
                .alignment(Alignment::Center),
            centered(inner, inner.width, 1),
        );
        return;
    }

    // Keep the selected row on screen.
    let visible = inner.height as usize;
    let selected = app.state.history.selected;
    let offset = selected.saturating_sub(visible.saturating_sub(1));

    let lines: Vec<Line> = game
        .rounds
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(index, round)| {
            let is_selected = index == selected;
            let base = if is_selected {
                Style::default().bg(Color::Indexed(237)).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let points = |team: Team| {
                let value = round.points_for(team);
                if value > 0 {
                    Span::styled(format!("{:>5}", format!("+{value}")), base.fg(team_color(team)))
                } else {
                    Span::styled(format!("{:>5}", "-"), base.fg(Color::DarkGray))
                }
            };
            Line::from(vec![
                Span::styled(if is_selected { "> " } else { "  " }, base.fg(Color::Yellow)),
                Span::styled(
                    format!("ITER_{:<4}", game.round_number(index)),
                    base.fg(Color::Gray),
                ),
                points(Team::A),
                Span::styled("  |", base.fg(Color::DarkGray)),
                points(Team::B),
                Span::styled(
                    format!(
                        "   {}",
                        round.timestamp.with_timezone(&Local).format("%H:%M:%S")
                    ),
                    base.fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

fn draw_analysis(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    let block = default_border(Color::Magenta).title(" Neural Processor ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let analysis = &app.state.analysis;
    let lines = if analysis.is_pending() {
        vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    format!("{} ", loading.spinner_char),
                    Style::default().fg(Color::Magenta),
                ),
                Span::styled(
                    "Parsing temporal rifts...",
                    Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
                ),
            ]),
        ]
    } else if let Some(result) = analysis.result() {
        analysis_lines(result)
    } else {
        let mut lines = vec![Line::from(""), Line::from(analysis_hint(app))];
        if let Some(failure) = &analysis.last_failure {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("No analysis available: {failure}"),
                Style::default().fg(Color::Red),
            )));
        }
        lines
    };

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn analysis_hint(app: &App) -> Span<'static> {
    let dim = resolve(BannerColor::Dim, BannerTheme::Dark);
    if app.winner().is_some() {
        Span::styled("Timeline sealed. Start a new game to analyse again.", dim)
    } else if app.state.game.rounds.is_empty() {
        Span::styled("Awaiting round data before calculation.", dim)
    } else {
        Span::styled("Press g to start the calculation.", Style::default().fg(Color::Gray))
    }
}

fn analysis_lines(analysis: &Analysis) -> Vec<Line<'static>> {
    let heading = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(Span::styled("MATCH STATUS", heading)),
        Line::from(analysis.summary.clone()),
        Line::from(""),
        Line::from(Span::styled("PREDICTION", heading)),
        Line::from(Span::styled(
            analysis.prediction.clone(),
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
        Line::from(Span::styled("TACTICAL PROTOCOLS", heading)),
    ];
    for (i, tip) in analysis.tips.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("{}. ", i + 1), Style::default().fg(Color::Magenta)),
            Span::raw(tip.clone()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "g=refresh",
        resolve(BannerColor::Dim, BannerTheme::Dark),
    )));
    lines
}

// ---------------------------------------------------------------------------
// Overlays
// ---------------------------------------------------------------------------

fn draw_prompt(f: &mut Frame, area: Rect, app: &App) {
    let Some(prompt) = app.state.prompt.as_ref() else {
        return;
    };
    let game = &app.state.game;
    let (title, color) = match prompt.kind {
        PromptKind::Points(team) => (
            format!(" Points for {} ", game.team_name(team)),
            team_color(team),
        ),
        PromptKind::Target => (" Custom score limit ".to_string(), Color::Yellow),
        PromptKind::TeamName(team) => (format!(" Rename {team} "), team_color(team)),
    };

    let popup = centered(area, 44, 5);
    f.render_widget(Clear, popup);
    let block = default_border(color).title(title);
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let [input_area, hint_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(2)]).areas(inner);
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("> ", Style::default().fg(color)),
            Span::styled(
                prompt.input.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ])),
        input_area,
    );
    f.render_widget(
        Paragraph::new("Enter=confirm  Esc=cancel")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        hint_area,
    );
}

fn draw_reset_confirm(f: &mut Frame, area: Rect) {
    let popup = centered(area, 44, 5);
    f.render_widget(Clear, popup);
    let block = default_border(Color::Red).title(" Reset ");
    let inner = block.inner(popup);
    f.render_widget(block, popup);
    f.render_widget(
        Paragraph::new(vec![
            Line::from("Purge the whole chronology?"),
            Line::from(""),
            Line::from(Span::styled(
                "y=confirm  n=cancel",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center),
        inner,
    );
}

fn draw_win_overlay(f: &mut Frame, area: Rect, app: &App) {
    let Some(team) = app.winner() else {
        return;
    };
    let game = &app.state.game;
    let color = team_color(team);
    let totals = game.totals();

    let popup = centered(area, 56, 11);
    f.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(color));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    // Blink the headline on alternate half-seconds of the animation tick.
    let headline_style = if (app.state.animation.tick / 6) % 2 == 0 {
        Style::default().fg(Color::Black).bg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!(" {} HAS WON ", team.to_string().to_uppercase()),
            headline_style,
        )),
        Line::from(""),
        Line::from(Span::styled(
            game.team_name(team).to_uppercase(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "QUANTUM DOMINATION COMPLETE",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(format!(
            "{} {} - {} {}",
            game.team_a_name, totals.a, totals.b, game.team_b_name
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Enter/r=new game  q=quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

// ---------------------------------------------------------------------------
// Help, logs, spinner
// ---------------------------------------------------------------------------

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::DarkGray).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let entries = [
        ("a / b", "add points for team A / B"),
        ("j k / ↓ ↑", "move through the round history"),
        ("x / Del", "delete the selected round"),
        ("p", "cycle score limit 100, 150, 200, 500"),
        ("t", "custom score limit"),
        ("e / E", "rename team A / B"),
        ("g", "request match analysis"),
        ("R", "reset the game (asks first)"),
        ("1 / 2", "Board / Analysis tab"),
        ("f", "toggle full screen"),
        ("\"", "toggle log pane"),
        ("Esc", "leave help"),
        ("q", "quit"),
    ];
    let lines: Vec<Line> = entries
        .iter()
        .map(|(key, what)| {
            Line::from(vec![
                Span::styled(format!("{key:>12}  "), Style::default().fg(Color::Cyan)),
                Span::raw(*what),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logger = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Cyan))
        .style_debug(Style::default().fg(Color::Gray));
    f.render_widget(logger, area);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    // The error marker only stands while the panel still reports the failure.
    let failure_shown = loading.spinner_char == ERROR_CHAR
        && app.state.analysis.last_failure.is_some();
    if !loading.is_loading && !failure_shown {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
