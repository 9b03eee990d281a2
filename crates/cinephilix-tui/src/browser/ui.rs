//! TUI rendering logic for the catalog browser.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Clear, List, ListItem, Paragraph, Row, Table, TableState, Tabs, Wrap,
};

use super::state::{BrowserPage, BrowserState, InputMode, ItemView, PageKind, ViewMode};
use crate::controller::PageStatus;
use crate::detail::{DetailSubject, DetailTab, TabResult, TitleDetails};
use crate::format;
use crate::present::Presentable;

/// Card width in the grid view.
const CARD_WIDTH: u16 = 34;

/// Card height in the grid view.
const CARD_HEIGHT: u16 = 7;

/// Marker for the selected entry.
const MARKER: &str = "\u{25b8} ";

/// Draws the browser UI.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, state: &BrowserState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // page tabs
            Constraint::Length(3), // search + filters
            Constraint::Min(5),    // results
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    draw_tabs(frame, chunks[0], state);
    draw_filters(frame, chunks[1], state);
    match state.view {
        ViewMode::Grid => draw_grid(frame, chunks[2], state),
        ViewMode::List => draw_list(frame, chunks[2], state),
    }
    draw_footer(frame, chunks[3], state);

    if state.input_mode == InputMode::Options {
        draw_options(frame, chunks[2], state);
    }
    if state.detail.is_open() {
        draw_detail(frame, frame.area(), state);
    }
}

/// Draws the page tabs with result counts.
fn draw_tabs(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let titles: Vec<Line> = PageKind::ALL
        .iter()
        .enumerate()
        .map(|(i, kind)| Line::from(format!(" {}:{} ", i.saturating_add(1), kind.label())))
        .collect();
    let page = state.page();
    let status = match page.status() {
        PageStatus::Idle => format!(
            " {} results  page {}/{} ",
            format::thousands(page.total()),
            page.current_page(),
            page.last_page()
        ),
        PageStatus::Loading => String::from(" loading\u{2026} "),
        PageStatus::Error(_) => String::from(" error "),
    };
    let tabs = Tabs::new(titles)
        .select(state.active.index())
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Cinephilix ")
                .title_bottom(Line::from(status).right_aligned()),
        );
    frame.render_widget(tabs, area);
}

/// Draws the search box and the active filter summary.
#[allow(clippy::indexing_slicing)]
fn draw_filters(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    let page = state.page();
    let (text, style) = if state.input_mode == InputMode::Search {
        (
            format!("{}_", state.search_input),
            Style::default().fg(Color::Yellow),
        )
    } else {
        (page.query(), Style::default())
    };
    let search = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(" Search: / "));
    frame.render_widget(search, chunks[0]);

    let mut spans: Vec<Span> = Vec::new();
    for (label, value) in page.describe() {
        if label == "Search" {
            continue;
        }
        spans.push(Span::styled(
            format!("{label}: "),
            Style::default().fg(Color::DarkGray),
        ));
        spans.push(Span::raw(format!("{value}  ")));
    }
    let title = if page.has_unapplied_edits() {
        " Filters (a: apply) "
    } else {
        " Filters "
    };
    let border = if page.has_unapplied_edits() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let filters = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border),
    );
    frame.render_widget(filters, chunks[1]);
}

/// Error banner line, if the last request failed.
fn error_line(page: &dyn BrowserPage) -> Option<Line<'static>> {
    match page.status() {
        PageStatus::Error(message) => Some(Line::from(Span::styled(
            format!("Request failed: {message}"),
            Style::default().fg(Color::Red),
        ))),
        PageStatus::Idle | PageStatus::Loading => None,
    }
}

/// Splits off a one-line error banner when needed.
#[allow(clippy::indexing_slicing)]
fn with_banner(frame: &mut Frame, area: Rect, page: &dyn BrowserPage) -> Rect {
    let Some(line) = error_line(page) else {
        return area;
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);
    frame.render_widget(Paragraph::new(line), chunks[0]);
    chunks[1]
}

fn results_block(page: &dyn BrowserPage) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", page.name()))
}

fn draw_empty(frame: &mut Frame, area: Rect, page: &dyn BrowserPage) {
    let message = match page.status() {
        PageStatus::Loading => "Loading\u{2026}",
        PageStatus::Idle | PageStatus::Error(_) => "No results.",
    };
    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(Color::DarkGray))
        .block(results_block(page));
    frame.render_widget(paragraph, area);
}

/// Draws results as a grid of cards.
#[allow(clippy::arithmetic_side_effects)]
fn draw_grid(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let page = state.page();
    let area = with_banner(frame, area, page);
    if page.is_empty() {
        draw_empty(frame, area, page);
        return;
    }

    let block = results_block(page);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = usize::from((inner.width / CARD_WIDTH).max(1));
    let visible_rows = usize::from((inner.height / CARD_HEIGHT).max(1));
    let selected_row = state.cursor / columns;
    let first_row = selected_row.saturating_sub(visible_rows.saturating_sub(1));
    let card_width = inner.width / u16::try_from(columns).unwrap_or(1);

    let views = page.item_views();
    for (idx, view) in views.iter().enumerate() {
        let row = idx / columns;
        if row < first_row || row >= first_row.saturating_add(visible_rows) {
            continue;
        }
        let col = u16::try_from(idx % columns).unwrap_or(0);
        let row_offset = u16::try_from(row.saturating_sub(first_row)).unwrap_or(0);
        let card = Rect {
            x: inner.x.saturating_add(col.saturating_mul(card_width)),
            y: inner.y.saturating_add(row_offset.saturating_mul(CARD_HEIGHT)),
            width: card_width,
            height: CARD_HEIGHT,
        }
        .intersection(inner);
        draw_card(frame, card, view, idx == state.cursor);
    }
}

fn draw_card(frame: &mut Frame, area: Rect, view: &ItemView, selected: bool) {
    let border = if selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let width = usize::from(area.width.saturating_sub(2));
    let lines: Vec<Line> = view
        .lines
        .iter()
        .map(|l| Line::from(format::truncate(l, width)))
        .collect();
    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(format!(
                " {} ",
                format::truncate(&view.heading, width.saturating_sub(2))
            )),
    );
    frame.render_widget(card, area);
}

/// Draws results as compact table rows.
fn draw_list(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let page = state.page();
    let area = with_banner(frame, area, page);
    if page.is_empty() {
        draw_empty(frame, area, page);
        return;
    }

    let header = Row::new(page.header().to_vec())
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);
    let rows: Vec<Row> = page
        .item_views()
        .into_iter()
        .map(|view| Row::new(view.cells))
        .collect();
    let widths: Vec<Constraint> = page
        .header()
        .iter()
        .enumerate()
        .map(|(i, _)| {
            if i == 0 {
                Constraint::Min(24)
            } else {
                Constraint::Length(16)
            }
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(results_block(page))
        .highlight_symbol(MARKER)
        .row_highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    let mut table_state = TableState::default();
    table_state.select(Some(state.cursor));
    frame.render_stateful_widget(table, area, &mut table_state);
}

/// Draws the genre/profession picker.
fn draw_options(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let page = state.page();
    let popup = Rect {
        width: area.width.min(30),
        ..area
    };
    let items: Vec<ListItem> = page
        .options()
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let mark = if page.option_selected(value) {
                "[x]"
            } else {
                "[ ]"
            };
            let prefix = if i == state.option_cursor { MARKER } else { "  " };
            let style = if i == state.option_cursor {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            ListItem::new(format!("{prefix}{mark} {value}")).style(style)
        })
        .collect();
    let skip = state
        .option_cursor
        .saturating_sub(usize::from(popup.height.saturating_sub(3)));
    let list = List::new(items.into_iter().skip(skip).collect::<Vec<_>>()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Options (space: toggle) "),
    );
    frame.render_widget(Clear, popup);
    frame.render_widget(list, popup);
}

/// Draws the detail overlay.
fn draw_detail(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let Some(subject) = state.detail.subject() else {
        return;
    };
    let popup = area.inner(Margin {
        horizontal: area.width / 10,
        vertical: area.height / 10,
    });
    frame.render_widget(Clear, popup);

    match subject {
        DetailSubject::Title {
            title,
            details,
            tab,
        } => {
            let mut lines: Vec<Line> = title.card_lines().into_iter().map(Line::from).collect();
            if let Some(ref plot) = title.plot {
                lines.push(Line::from(""));
                lines.push(Line::from(plot.clone()));
            }
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!(" {} ", title.primary_title));
            let inner = block.inner(popup);
            frame.render_widget(block, popup);

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(1)),
                    Constraint::Length(1),
                    Constraint::Min(1),
                ])
                .split(inner);
            if let &[summary, tabs_area, body] = chunks.as_ref() {
                frame.render_widget(
                    Paragraph::new(lines).wrap(Wrap { trim: true }),
                    summary,
                );
                let tabs = Tabs::new(DetailTab::ALL.iter().map(|t| t.label()).collect::<Vec<_>>())
                    .select(DetailTab::ALL.iter().position(|t| t == tab).unwrap_or(0))
                    .highlight_style(
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    );
                frame.render_widget(tabs, tabs_area);
                frame.render_widget(tab_body(details.as_ref(), *tab), body);
            }
        }
        DetailSubject::Person { listed, loaded } => {
            let person = loaded
                .as_ref()
                .and_then(|r| r.as_ref().ok())
                .unwrap_or(&**listed);
            let mut lines = vec![
                Line::from(format::life_span(person.birth_year, person.death_year)),
                Line::from(person.primary_profession.join(", ")),
                Line::from(""),
            ];
            match loaded {
                None => lines.push(Line::from("Loading\u{2026}")),
                Some(Err(message)) => lines.push(Line::from(Span::styled(
                    format!("Request failed: {message}"),
                    Style::default().fg(Color::Red),
                ))),
                Some(Ok(_)) => {}
            }
            lines.push(Line::from(Span::styled(
                "Known for",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
            for known in &person.known_for_titles {
                let year = known
                    .start_year
                    .map_or_else(String::new, |y| format!(" ({y})"));
                lines.push(Line::from(format!("  {}{year}", known.primary_title)));
            }
            let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(format!(" {} ", person.primary_name)),
            );
            frame.render_widget(paragraph, popup);
        }
    }
}

/// Renders one detail tab: loading, its own error, empty, or rows.
fn tab_body(details: Option<&TitleDetails>, tab: DetailTab) -> Paragraph<'static> {
    let Some(details) = details else {
        return Paragraph::new("Loading\u{2026}").style(Style::default().fg(Color::DarkGray));
    };
    let lines = match tab {
        DetailTab::Cast => tab_lines(&details.cast, "No cast information.", |c| {
            c.character.as_ref().map_or_else(
                || c.name.clone(),
                |character| format!("{}  as {character}", c.name),
            )
        }),
        DetailTab::Crew => tab_lines(&details.crew, "No crew information.", |c| {
            format!("{}  {} ({})", c.name, c.job, c.department)
        }),
        DetailTab::Reviews => tab_lines(&details.reviews, "No reviews yet.", |r| {
            format!(
                "{}  {:.1}/5  {}\n    {}",
                r.author,
                r.rating,
                format::review_date(&r.created_at),
                r.content
            )
        }),
    };
    Paragraph::new(lines).wrap(Wrap { trim: false })
}

fn tab_lines<T>(
    result: &TabResult<T>,
    empty: &'static str,
    render: impl Fn(&T) -> String,
) -> Vec<Line<'static>> {
    match result {
        Err(message) => vec![Line::from(Span::styled(
            format!("Failed to load: {message}"),
            Style::default().fg(Color::Red),
        ))],
        Ok(items) if items.is_empty() => vec![Line::from(Span::styled(
            empty,
            Style::default().fg(Color::DarkGray),
        ))],
        Ok(items) => items
            .iter()
            .flat_map(|item| {
                render(item)
                    .lines()
                    .map(|l| Line::from(String::from(l)))
                    .collect::<Vec<_>>()
            })
            .collect(),
    }
}

/// Draws the footer with key hints.
fn draw_footer(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let help_text = if state.detail.is_open() {
        Line::from("Tab: next tab  O: open image  Esc: close  q: quit")
    } else {
        match state.input_mode {
            InputMode::Search => Line::from("Type to search | Enter: search now | Esc: done"),
            InputMode::Options => {
                Line::from("\u{2191}\u{2193}/j/k: move  Space: toggle  Esc: done  a: apply after")
            }
            InputMode::Normal => Line::from(vec![Span::raw(
                "1-4: page  \u{2191}\u{2193}: move  n/p: page  /: search  g: genres  t: type  s/o: sort  x: adult  [ ]: rating  a: apply  R: reset  v: view  Enter: details  q: quit",
            )]),
        }
    };

    let footer = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use std::time::Instant;

    use cinephilix_api::catalog::normalize_ids;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::super::state::{BrowserOptions, Completion, Request, SearchTicket};
    use super::*;

    fn loaded_state(view: ViewMode) -> BrowserState {
        let mut state = BrowserState::new(BrowserOptions {
            page: PageKind::Movies,
            page_size: 8,
            view,
            ..BrowserOptions::default()
        });
        state.start();
        let requests = state.take_requests();
        let Some(Request::Search {
            page,
            ticket: SearchTicket::Titles(ticket),
        }) = requests.first()
        else {
            panic!("expected a title search");
        };
        let json = include_str!("../../../../fixtures/catalog/search_titles_movies_p1.json");
        let mut value: serde_json::Value = serde_json::from_str(json).unwrap();
        normalize_ids(&mut value);
        state.apply_completion(Completion::Titles {
            page: *page,
            seq: ticket.seq,
            outcome: Ok(serde_json::from_value(value).unwrap()),
        });
        state
    }

    fn render(state: &BrowserState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| draw(frame, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_grid_renders_cards() {
        // Arrange
        let state = loaded_state(ViewMode::Grid);

        // Act
        let screen = render(&state);

        // Assert
        assert!(screen.contains("Top Movie 1"));
        assert!(screen.contains("9.3/10"));
        assert!(screen.contains("page 1/7"));
    }

    #[test]
    fn test_list_renders_rows() {
        // Arrange
        let state = loaded_state(ViewMode::List);

        // Act
        let screen = render(&state);

        // Assert
        assert!(screen.contains("Rating"));
        assert!(screen.contains("Top Movie 8"));
    }

    #[test]
    fn test_detail_overlay_shows_loading() {
        // Arrange
        let mut state = loaded_state(ViewMode::Grid);
        state.handle_key(KeyCode::Enter, KeyModifiers::NONE, Instant::now());

        // Act
        let screen = render(&state);

        // Assert
        assert!(screen.contains("Cast"));
        assert!(screen.contains("Loading"));
    }
}
