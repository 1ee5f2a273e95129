//! Fishtank Tycoon rendering: header, tabs, fish list, shop, achievements, log.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{ClickableList, TabBar};

use super::actions::*;
use super::economy::{
    format_coins, format_minutes, percent_complete, projected_coins_per_min, unlocked_count,
};
use super::state::Screen;
use super::{FishtankGame, MANUAL_GRANT_LONG, MANUAL_GRANT_SHORT};

pub fn render(game: &FishtankGame, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let narrow = is_narrow_layout(area.width);

    let (main_area, log_area) = if narrow {
        (area, None)
    } else {
        let h_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);
        (h_chunks[0], Some(h_chunks[1]))
    };

    // Narrow screens show the latest notice inside the header instead
    let header_height = if narrow { 5 } else { 4 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(main_area);

    render_header(game, f, chunks[0], narrow);
    render_tab_bar(game, f, chunks[1], click_state);
    match game.screen {
        Screen::Fish => render_fish(game, f, chunks[2], click_state),
        Screen::Shop => render_shop(game, f, chunks[2], click_state),
        Screen::Achievements => render_achievements(game, f, chunks[2]),
    }
    render_footer(game, f, chunks[3], click_state);

    if let Some(log_area) = log_area {
        render_log(game, f, log_area);
    }
}

fn render_header(game: &FishtankGame, f: &mut Frame, area: Rect, narrow: bool) {
    let snap = &game.snapshot;
    let per_min = projected_coins_per_min(snap, &game.catalog);

    let session = match game.session.active() {
        Some(id) => {
            let name = game.catalog.fish(id).map(|d| d.name).unwrap_or(id);
            Span::styled(format!("▶ {}", name), Style::default().fg(Color::Green))
        }
        None => Span::styled("■ 停止中", Style::default().fg(Color::DarkGray)),
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("💰 {} coins", format_coins(snap.coins)),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  (+{}/min)", format_coins(per_min)),
                Style::default().fg(Color::Gray),
            ),
        ]),
        Line::from(vec![
            Span::styled(
                format!("🐟 {}/{}  ", unlocked_count(snap), game.catalog.fish.len()),
                Style::default().fg(Color::Cyan),
            ),
            session,
        ]),
    ];

    if narrow {
        if let Some(entry) = game.log.last() {
            let style = if entry.is_important {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            lines.push(Line::from(Span::styled(entry.text.clone(), style)));
        }
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" 🐠 Fishtank Tycoon "),
    );
    f.render_widget(widget, area);
}

fn render_tab_bar(
    game: &FishtankGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let tab_style = |screen: Screen, color: Color| -> Style {
        if game.screen == screen {
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        }
    };

    let bar = TabBar::new("│")
        .tab("F 魚", tab_style(Screen::Fish, Color::Green), TAB_FISH)
        .tab("D ショップ", tab_style(Screen::Shop, Color::Magenta), TAB_SHOP)
        .tab(
            format!("H 実績 {}/{}", game.snapshot.achievements.len(), game.catalog.achievements.len()),
            tab_style(Screen::Achievements, Color::Yellow),
            TAB_ACHIEVEMENTS,
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );

    let mut cs = click_state.borrow_mut();
    bar.render(f, area, &mut cs);
}

/// Scroll offset that keeps `selected` inside a window of `visible` rows.
fn scroll_for(selected: usize, visible: usize) -> u16 {
    if visible == 0 || selected < visible {
        0
    } else {
        (selected + 1 - visible) as u16
    }
}

fn render_fish(
    game: &FishtankGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(7)])
        .split(area);
    let list_area = chunks[0];
    let detail_area = chunks[1];

    let mut cl = ClickableList::new();
    for (i, def) in game.catalog.fish.iter().enumerate() {
        let selected = i == game.selected;
        let active = game.session.is_active(def.id);
        let (status, status_style) = match game.snapshot.progress(def.id) {
            Some(p) if p.unlocked => ("Unlocked".to_string(), Style::default().fg(Color::Green)),
            Some(p) => (
                format!("{:>3}%", percent_complete(def, p)),
                Style::default().fg(Color::Gray),
            ),
            None => ("  0%".to_string(), Style::default().fg(Color::Gray)),
        };

        let marker = if active { "▶" } else if selected { "›" } else { " " };
        let name_style = if selected {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else if game.snapshot.is_unlocked(def.id) {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let line = Line::from(vec![
            Span::styled(format!("{} ", marker), Style::default().fg(Color::Green)),
            Span::styled(format!("{:<18}", def.name), name_style),
            Span::styled(format!(" {:>4}m ", def.unlock_minutes), Style::default().fg(Color::DarkGray)),
            Span::styled(status, status_style),
        ]);
        cl.push_clickable(line, SELECT_FISH_BASE + i as u16);
    }

    let visible = list_area.height.saturating_sub(2) as usize;
    let scroll = scroll_for(game.selected, visible);
    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(list_area, &mut cs, 1, 1, scroll);
    }
    let widget = Paragraph::new(cl.into_lines())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green))
                .title(" 魚 (J/K で選択) "),
        )
        .scroll((scroll, 0));
    f.render_widget(widget, list_area);

    render_fish_detail(game, f, detail_area, click_state);
}

fn render_fish_detail(
    game: &FishtankGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let Some(def) = game.catalog.fish.get(game.selected) else {
        return;
    };
    let progress = game.snapshot.progress(def.id);
    let minutes = progress.map(|p| p.accumulated_minutes()).unwrap_or(0.0);
    let active = game.session.is_active(def.id);

    let mut cl = ClickableList::new();
    cl.push(Line::from(vec![
        Span::styled(def.name, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("  {}", def.domains.join(", ")),
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    cl.push(Line::from(Span::styled(
        format!(
            "累計 {} / 必要 {}  ·  {} coins/min",
            format_minutes(minutes),
            format_minutes(def.unlock_minutes as f64),
            format_coins(def.coins_per_min),
        ),
        Style::default().fg(Color::Gray),
    )));

    let toggle_label = if active {
        " [S] セッション停止"
    } else {
        " [S] セッション開始"
    };
    cl.push_clickable(
        Line::from(Span::styled(toggle_label, Style::default().fg(Color::Yellow))),
        TOGGLE_SESSION,
    );
    cl.push_clickable(
        Line::from(Span::styled(
            format!(" [A] +{}m", MANUAL_GRANT_SHORT),
            Style::default().fg(Color::Cyan),
        )),
        GRANT_SHORT,
    );
    cl.push_clickable(
        Line::from(Span::styled(
            format!(" [Shift+A] +{}m", MANUAL_GRANT_LONG),
            Style::default().fg(Color::Cyan),
        )),
        GRANT_LONG,
    );

    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1, 0);
    }
    let border = if active { Color::Green } else { Color::DarkGray };
    let widget = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(widget, area);
}

fn render_shop(
    game: &FishtankGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    for (i, item) in game.catalog.decor.iter().enumerate() {
        let owned = game.snapshot.owned(item.id);
        let affordable = game.snapshot.coins >= item.cost;
        let (key_style, text_style) = if affordable {
            (
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                Style::default().fg(Color::White),
            )
        } else {
            (Style::default().fg(Color::DarkGray), Style::default().fg(Color::DarkGray))
        };
        let line = Line::from(vec![
            Span::styled(format!(" [{}] ", i + 1), key_style),
            Span::styled(format!("{:<10}", item.name), text_style),
            Span::styled(format!(" {:>7} coins", format_coins(item.cost)), text_style),
            Span::styled(
                format!("  ×{:.2}", item.multiplier),
                Style::default().fg(Color::Magenta),
            ),
            Span::styled(format!("  所持 {}", owned), Style::default().fg(Color::Gray)),
        ]);
        cl.push_clickable(line, BUY_DECOR_BASE + i as u16);
    }

    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1, 0);
    }
    let widget = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta))
            .title(" 🪴 デコレーション "),
    );
    f.render_widget(widget, area);
}

fn render_achievements(game: &FishtankGame, f: &mut Frame, area: Rect) {
    let lines: Vec<Line> = game
        .catalog
        .achievements
        .iter()
        .map(|ach| {
            let unlocked = game.snapshot.achievements.contains_key(ach.name);
            let names: Vec<&str> = ach
                .fish_ids
                .iter()
                .map(|&id| game.catalog.fish(id).map(|d| d.name).unwrap_or(id))
                .collect();
            let (icon, style) = if unlocked {
                ("🏆", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            } else {
                ("・", Style::default().fg(Color::DarkGray))
            };
            Line::from(vec![
                Span::styled(format!("{} {}", icon, ach.name), style),
                Span::styled(format!("  ({})", names.join(", ")), Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" 実績 "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn render_footer(
    game: &FishtankGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let bar = if game.pending_reset {
        TabBar::new("  ")
            .tab("[Y] リセットする", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD), CONFIRM_RESET)
            .tab("[N] やめる", Style::default().fg(Color::White), CANCEL_RESET)
    } else {
        TabBar::new("  ")
            .tab("[X] リセット", Style::default().fg(Color::DarkGray), REQUEST_RESET)
            .tab("[E] エクスポート", Style::default().fg(Color::DarkGray), EXPORT)
    };
    let border = if game.pending_reset { Color::Red } else { Color::DarkGray };
    let bar = bar.block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );

    let mut cs = click_state.borrow_mut();
    bar.render(f, area, &mut cs);
}

fn render_log(game: &FishtankGame, f: &mut Frame, area: Rect) {
    let visible_height = area.height.saturating_sub(2) as usize;

    // Newest first
    let log_lines: Vec<Line> = game
        .log
        .iter()
        .rev()
        .take(visible_height)
        .enumerate()
        .map(|(i, entry)| {
            let style = match (entry.is_important, i < 3) {
                (true, true) => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                (true, false) => Style::default().fg(Color::Yellow),
                (false, true) => Style::default().fg(Color::White),
                (false, false) => Style::default().fg(Color::DarkGray),
            };
            Line::from(Span::styled(entry.text.as_str(), style))
        })
        .collect();

    let widget = Paragraph::new(log_lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(" ログ "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}
