use crossterm::event::{self, Event};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs},
    Frame, Terminal,
};

use crate::app::App;
use crate::error::Result;
use crate::jar::KeyValueStore;
use crate::theme::ThemeColors;
use crate::view::{action_label, Partition};

pub fn run_app<B: Backend, S: KeyValueStore>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            app.handle_key(key);
        }
        if app.should_quit {
            return Ok(());
        }
    }
}

pub fn draw<S: KeyValueStore>(f: &mut Frame, app: &App<S>) {
    let colors = app.theme.colors();
    f.render_widget(
        Block::default().style(Style::default().bg(colors.bg).fg(colors.text)),
        f.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_tabs(f, app, &colors, chunks[0]);
    draw_tasks(f, app, &colors, chunks[1]);
    draw_input(f, app, &colors, chunks[2]);
    draw_footer(f, app, &colors, chunks[3]);
}

fn draw_tabs<S: KeyValueStore>(f: &mut Frame, app: &App<S>, colors: &ThemeColors, area: Rect) {
    let titles: Vec<Line> = Partition::ALL
        .iter()
        .map(|p| Line::from(format!(" {} ({}) ", p.title(), app.view.rows(*p).len())))
        .collect();
    let selected = Partition::ALL
        .iter()
        .position(|p| *p == app.view.visible())
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .block(
            Block::default()
                .title(" taskjar ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.border)),
        )
        .style(Style::default().fg(colors.muted))
        .highlight_style(
            Style::default()
                .fg(colors.tab_active_fg)
                .bg(colors.tab_active_bg)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, area);
}

fn draw_tasks<S: KeyValueStore>(f: &mut Frame, app: &App<S>, colors: &ThemeColors, area: Rect) {
    let items: Vec<ListItem> = app
        .view
        .visible_rows()
        .iter()
        .map(|t| {
            let text_style = if t.completed {
                Style::default()
                    .fg(colors.done)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(colors.text)
            };
            ListItem::new(Line::from(vec![
                Span::styled(&t.text, text_style),
                Span::styled(format!("  {}", t.date), Style::default().fg(colors.muted)),
                Span::styled(
                    format!("  [{}]", action_label(t)),
                    Style::default().fg(colors.highlight),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(app.view.visible().title())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.highlight)),
        )
        .highlight_style(
            Style::default()
                .bg(colors.bg_secondary)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default().with_selected(app.view.selected_index());
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_input<S: KeyValueStore>(f: &mut Frame, app: &App<S>, colors: &ThemeColors, area: Rect) {
    let input = Paragraph::new(app.input.as_str())
        .style(Style::default().fg(colors.text))
        .block(
            Block::default()
                .title(" New task (date: /DD/MM/YYYY\\) ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.border)),
        );
    f.render_widget(input, area);

    let typed = u16::try_from(app.input.chars().count()).unwrap_or(u16::MAX);
    let cursor_x = area.x.saturating_add(1).saturating_add(typed);
    if cursor_x < area.right().saturating_sub(1) {
        f.set_cursor_position((cursor_x, area.y + 1));
    }
}

fn draw_footer<S: KeyValueStore>(f: &mut Frame, app: &App<S>, colors: &ThemeColors, area: Rect) {
    let line = match &app.status {
        Some(msg) => Line::from(Span::styled(msg.as_str(), Style::default().fg(colors.error))),
        None => Line::from(Span::styled(
            "Enter add · Tab switch · ↑↓ select · ^T complete/undo · ^D delete · ^X clear done · ^L theme · Esc quit",
            Style::default().fg(colors.muted),
        )),
    };
    f.render_widget(Paragraph::new(line), area);
}
