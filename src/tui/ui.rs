//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::api::SkillTrackerApi;
use crate::features::focus::format_minutes;
use crate::features::stats::{render_heatmap, render_percent_bar, ActivitySummary};
use crate::tui::app::{App, InputKind, NotificationKind, Pane, Tab};
use crate::tui::event::help_text;

/// Render the application UI.
pub fn render<A: SkillTrackerApi>(frame: &mut Frame<'_>, app: &App<'_, A>) {
    // Create layout: tabs, body, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_tabs(frame, app, chunks[0]);
    match app.tab {
        Tab::Overview => render_overview(frame, app, chunks[1]),
        Tab::Skills => render_skills(frame, app, chunks[1]),
        Tab::Focus => render_focus(frame, app, chunks[1]),
        Tab::Analytics => render_analytics(frame, app, chunks[1]),
        Tab::Coach => render_coach(frame, app, chunks[1]),
    }
    render_status_bar(frame, app, chunks[2]);
}

fn bordered(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(format!(" {title} "))
}

fn render_tabs<A: SkillTrackerApi>(frame: &mut Frame<'_>, app: &App<'_, A>, area: Rect) {
    let mut titles: Vec<Line<'_>> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab.title())))
        .collect();

    // Keep a running session visible from every tab.
    if app.timer.is_active() && app.tab != Tab::Focus {
        titles.push(Line::from(Span::styled(
            format!("⏱ {}", app.timer.format_remaining()),
            Style::default().fg(Color::Yellow),
        )));
    }

    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Aptivara "),
        );

    frame.render_widget(tabs, area);
}

fn render_overview<A: SkillTrackerApi>(frame: &mut Frame<'_>, app: &App<'_, A>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Level gauge
            Constraint::Length(3),  // Counters
            Constraint::Length(11), // Heatmap
            Constraint::Min(0),     // Weak areas
        ])
        .split(area);

    let (ratio, label, streak) = app.stats.as_ref().map_or_else(
        || (0.0, "Loading...".to_string(), String::new()),
        |s| {
            (
                (s.level_progress_percent / 100.0).clamp(0.0, 1.0),
                format!(
                    "Level {} • {}/{} XP to next level",
                    s.level, s.xp_progress_in_level, s.xp_needed_for_next
                ),
                format!(
                    " 🔥 {} day streak (best {}) ",
                    s.current_streak, s.longest_streak
                ),
            )
        },
    );
    let gauge = Gauge::default()
        .block(bordered("Level").title_bottom(streak))
        .gauge_style(Style::default().fg(Color::Magenta))
        .ratio(ratio)
        .label(label);
    frame.render_widget(gauge, chunks[0]);

    let counters = app.overview.as_ref().map_or_else(
        || Line::from("Loading..."),
        |o| {
            Line::from(vec![
                Span::raw(format!("📚 {} skills   ", o.total_skills)),
                Span::raw(format!("📝 {} tasks   ", o.total_tasks)),
                Span::styled(
                    format!("✅ {} completed   ", o.completed_tasks),
                    Style::default().fg(Color::Green),
                ),
                Span::styled(
                    format!("📈 {:.0}% progress", o.overall_progress_percent),
                    Style::default().fg(Color::Magenta),
                ),
            ])
        },
    );
    frame.render_widget(Paragraph::new(counters).block(bordered("Overview")), chunks[1]);

    render_heatmap_block(frame, app, chunks[2]);
    render_weak_areas(frame, app, chunks[3]);
}

fn render_heatmap_block<A: SkillTrackerApi>(frame: &mut Frame<'_>, app: &App<'_, A>, area: Rect) {
    let title = format!("Activity (last {} days)", app.heatmap.len());
    let heatmap = Paragraph::new(render_heatmap(&app.heatmap))
        .style(Style::default().fg(Color::Green))
        .block(bordered(&title));
    frame.render_widget(heatmap, area);
}

fn render_weak_areas<A: SkillTrackerApi>(frame: &mut Frame<'_>, app: &App<'_, A>, area: Rect) {
    let items: Vec<ListItem<'_>> = if app.weak_areas.is_empty() {
        vec![ListItem::new("No weak areas. Keep it up!")]
    } else {
        app.weak_areas
            .iter()
            .map(|w| {
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled("⚠ ", Style::default().fg(Color::Yellow)),
                        Span::styled(&w.skill_name, Style::default().add_modifier(Modifier::BOLD)),
                        Span::raw(format!("  {}", render_percent_bar(w.progress_percent, 20))),
                    ]),
                    Line::from(Span::styled(
                        format!("  {}", w.recommendation),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
            })
            .collect()
    };

    frame.render_widget(List::new(items).block(bordered("Focus Areas")), area);
}

fn render_skills<A: SkillTrackerApi>(frame: &mut Frame<'_>, app: &App<'_, A>, area: Rect) {
    let (lists_area, form_area) = if app.input.is_some() {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(lists_area);

    let skill_items: Vec<ListItem<'_>> = app
        .skills
        .iter()
        .map(|skill| {
            ListItem::new(Line::from(vec![
                Span::raw(format!("{} ", skill.category().icon())),
                Span::raw(&skill.name),
            ]))
        })
        .collect();
    let skills_title = format!("Skills ({})", app.skills.len());
    render_selectable(
        frame,
        skill_items,
        &skills_title,
        app.selected_skill,
        app.pane == Pane::Skills,
        columns[0],
    );

    let task_items: Vec<ListItem<'_>> = app
        .tasks
        .iter()
        .map(|task| {
            let (icon, color, modifier) = if task.is_completed {
                ("[x]", Color::Green, Modifier::CROSSED_OUT)
            } else {
                ("[ ]", Color::White, Modifier::empty())
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{icon} "), Style::default().fg(color)),
                Span::styled(&task.title, Style::default().add_modifier(modifier)),
                Span::styled(
                    format!("  +{} XP", task.reward()),
                    Style::default().fg(Color::Cyan),
                ),
            ]))
        })
        .collect();
    let tasks_title = app.selected_skill().map_or_else(
        || "Tasks".to_string(),
        |s| {
            let done = app.tasks.iter().filter(|t| t.is_completed).count();
            format!("Tasks: {} ({done}/{})", s.name, app.tasks.len())
        },
    );
    render_selectable(
        frame,
        task_items,
        &tasks_title,
        app.selected_task,
        app.pane == Pane::Tasks,
        columns[1],
    );

    if let (Some(input), Some(form_area)) = (app.input.as_ref(), form_area) {
        let title = match input.kind {
            InputKind::Skill => format!("New skill • category: {} (Tab)", input.category.label()),
            InputKind::Task => "New task".to_string(),
        };
        let form = Paragraph::new(format!("{}▏", input.buffer))
            .style(Style::default().fg(Color::Yellow))
            .block(bordered(&title));
        frame.render_widget(form, form_area);
    }
}

fn render_selectable(
    frame: &mut Frame<'_>,
    items: Vec<ListItem<'_>>,
    title: &str,
    selected: usize,
    focused: bool,
    area: Rect,
) {
    let border = if focused { Color::Cyan } else { Color::DarkGray };
    let is_empty = items.is_empty();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(format!(" {title} ")),
        )
        .highlight_style(Style::default().bg(Color::DarkGray));

    // Create list state for scrolling
    let mut state = ListState::default();
    if !is_empty {
        state.select(Some(selected));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_focus<A: SkillTrackerApi>(frame: &mut Frame<'_>, app: &App<'_, A>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Clock
            Constraint::Length(3), // Gauge
            Constraint::Length(3), // Presets
            Constraint::Min(0),
        ])
        .split(area);

    let clock_style = if app.timer.is_active() {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let state_line = if app.timer.is_active() {
        format!("Focusing for {}", format_minutes(app.timer.planned_minutes()))
    } else {
        "Ready when you are".to_string()
    };
    let clock = Paragraph::new(vec![
        Line::from(Span::styled(app.timer.format_remaining(), clock_style)),
        Line::from(""),
        Line::from(state_line),
    ])
    .alignment(Alignment::Center)
    .block(bordered("Focus Timer"));
    frame.render_widget(clock, chunks[0]);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(app.timer.progress().clamp(0.0, 1.0));
    frame.render_widget(gauge, chunks[1]);

    let mut spans = Vec::new();
    for (i, minutes) in app.presets.iter().enumerate() {
        let style = if i == app.selected_preset {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!(" {minutes} min "), style));
        spans.push(Span::raw("  "));
    }
    let presets = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(bordered("Presets"));
    frame.render_widget(presets, chunks[2]);
}

fn render_analytics<A: SkillTrackerApi>(frame: &mut Frame<'_>, app: &App<'_, A>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(11), // Heatmap
            Constraint::Length(3),  // Summary
            Constraint::Min(0),     // Weak areas
        ])
        .split(area);

    render_heatmap_block(frame, app, chunks[0]);

    let summary = ActivitySummary::from_days(&app.heatmap);
    let best = summary
        .best_day
        .map(|d| format!("   best day {}", d.format("%b %d")))
        .unwrap_or_default();
    let line = format!(
        "{} active days • {} tasks • {} XP • {} min{best}",
        summary.active_days, summary.tasks_completed, summary.xp_earned, summary.minutes_spent
    );
    frame.render_widget(Paragraph::new(line).block(bordered("Summary")), chunks[1]);

    render_weak_areas(frame, app, chunks[2]);
}

fn render_coach<A: SkillTrackerApi>(frame: &mut Frame<'_>, app: &App<'_, A>, area: Rect) {
    let text = app
        .recommendation
        .as_deref()
        .filter(|r| !r.trim().is_empty())
        .unwrap_or("No recommendation yet. Press r to ask again.");

    let coach = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(bordered("🤖 AI Coach"));
    frame.render_widget(coach, area);
}

/// Render the status bar: error, then notification, then status, then help.
fn render_status_bar<A: SkillTrackerApi>(frame: &mut Frame<'_>, app: &App<'_, A>, area: Rect) {
    let (text, style) = if let Some(error) = &app.error {
        (error.clone(), Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
    } else if let Some(notification) = &app.notification {
        let color = match notification.kind {
            NotificationKind::Success => Color::Green,
            NotificationKind::Info => Color::Cyan,
        };
        (notification.text.clone(), Style::default().fg(color).add_modifier(Modifier::BOLD))
    } else if let Some(status) = &app.status {
        (status.clone(), Style::default().fg(Color::DarkGray))
    } else {
        (help_text(app).to_string(), Style::default().fg(Color::DarkGray))
    };

    frame.render_widget(Paragraph::new(text).style(style), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockSkillTrackerApi;
    use crate::config::Config;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw<A: SkillTrackerApi>(app: &App<'_, A>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_every_tab_renders() {
        let api = MockSkillTrackerApi::new();
        let config = Config::default();
        let mut app = App::new(&api, &config);

        for tab in Tab::ALL {
            app.tab = tab;
            let screen = draw(&app);
            assert!(screen.contains(tab.title()));
        }
    }

    #[test]
    fn test_focus_tab_shows_clock() {
        let api = MockSkillTrackerApi::new();
        let config = Config::default();
        let mut app = App::new(&api, &config);
        app.tab = Tab::Focus;
        app.start_focus_at(45, std::time::Instant::now()).unwrap();

        let screen = draw(&app);
        assert!(screen.contains("45:00"));
        assert!(screen.contains("45 min"));
    }

    #[test]
    fn test_error_takes_over_status_line() {
        let api = MockSkillTrackerApi::new();
        let config = Config::default();
        let mut app = App::new(&api, &config);
        app.error = Some("Skill name is required".to_string());

        assert!(draw(&app).contains("Skill name is required"));
    }
}
