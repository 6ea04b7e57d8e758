use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

use super::{App, Focus};
use crate::grid;
use crate::session::Phase;

pub(super) fn draw(app: &mut App, frame: &mut Frame) {
    let [grid_area, response_area, input_area, status_area] = Layout::vertical([
        Constraint::Min(6),
        Constraint::Length(8),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_grid(app, frame, grid_area);
    draw_response(app, frame, response_area);
    draw_input(app, frame, input_area);
    draw_status(app, frame, status_area);

    if let Some(alert) = app.session.alert() {
        draw_alert(alert, frame);
    }
}

fn draw_grid(app: &mut App, frame: &mut Frame, area: Rect) {
    let order = app.view_order();
    let columns = app.session.columns();
    let bold = Style::new().add_modifier(Modifier::BOLD);

    let header = Row::new(columns.iter().enumerate().map(|(idx, col)| {
        let mut label = col.header_name.clone();
        if let Some((field, direction)) = &app.sort {
            if *field == col.field {
                label.push(' ');
                label.push_str(direction.arrow());
            }
        }
        let style = if app.focus == Focus::Grid && idx == app.selected_col {
            bold.add_modifier(Modifier::REVERSED)
        } else {
            bold
        };
        Cell::from(label).style(style)
    }))
    .style(Style::new().fg(Color::Yellow));

    let rows = order.into_iter().map(|idx| {
        let row = &app.session.rows()[idx];
        Row::new(
            columns
                .iter()
                .map(|col| Cell::from(grid::cell_text(row, &col.field))),
        )
    });

    let widths = vec![Constraint::Fill(1); columns.len()];
    let title = format!(" Grid ({} rows) ", app.session.rows().len());

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::bordered().title(title).border_style(border_style(app, Focus::Grid)))
        .row_highlight_style(Style::new().add_modifier(Modifier::REVERSED));

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn draw_response(app: &App, frame: &mut Frame, area: Rect) {
    let label = Style::new().add_modifier(Modifier::BOLD).fg(Color::Cyan);

    let text = match app.session.raw_completion() {
        Some(raw) => {
            let candidate = serde_json::to_string(app.session.candidate()).unwrap_or_default();
            let mut lines = vec![Line::styled("Response:", label)];
            lines.extend(raw.lines().map(|l| Line::raw(l.to_string())));
            lines.push(Line::styled("Visualization data:", label));
            lines.push(Line::raw(candidate));
            lines.push(Line::raw(""));
            lines.push(Line::from(vec![
                Span::raw("Press "),
                Span::styled("a", label),
                Span::raw(" in the grid to apply."),
            ]));
            Text::from(lines)
        }
        None if app.session.in_flight() > 0 => Text::raw("Waiting for response…"),
        None => Text::raw("Type a filter below and press Enter."),
    };

    frame.render_widget(
        Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .block(Block::bordered().title(" Assistant ")),
        area,
    );
}

fn draw_input(app: &App, frame: &mut Frame, area: Rect) {
    frame.render_widget(
        Paragraph::new(app.input.text()).block(
            Block::bordered()
                .title(" Filter ")
                .border_style(border_style(app, Focus::Input)),
        ),
        area,
    );

    if app.focus == Focus::Input {
        let offset = u16::try_from(app.input.cursor()).unwrap_or(u16::MAX);
        let x = area
            .x
            .saturating_add(1)
            .saturating_add(offset)
            .min(area.right().saturating_sub(2));
        frame.set_cursor_position((x, area.y + 1));
    }
}

fn draw_status(app: &App, frame: &mut Frame, area: Rect) {
    let phase = match app.session.phase() {
        Phase::Idle => "idle",
        Phase::AwaitingRemote => "waiting",
        Phase::CandidateReady => "candidate ready",
        Phase::Failed => "failed",
        Phase::Applied => "applied",
    };
    let help = match app.focus {
        Focus::Input => " <Enter> submit  <Esc> clear  <Tab> grid  <Ctrl-C> quit",
        Focus::Grid => " <a> apply  <s> sort  <←→> column  <Tab> filter  <q> quit",
    };
    let key = Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD);

    let line = Line::from(vec![
        Span::styled(format!(" {} ", phase), key),
        Span::raw(format!("| {} in flight |", app.session.in_flight())),
        Span::raw(help),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_alert(message: &str, frame: &mut Frame) {
    let area = centered(frame.area(), 60, 5);
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(message)
            .wrap(Wrap { trim: true })
            .block(
                Block::bordered()
                    .title(" Alert ")
                    .title_bottom(Line::from(" any key to dismiss ").centered())
                    .border_style(Style::new().fg(Color::Red)),
            ),
        area,
    );
}

fn border_style(app: &App, focus: Focus) -> Style {
    if app.focus == focus {
        Style::new().fg(Color::Green)
    } else {
        Style::new()
    }
}

fn centered(area: Rect, width_percent: u16, height: u16) -> Rect {
    let side = (100 - width_percent) / 2;
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage(side),
        Constraint::Percentage(width_percent),
        Constraint::Percentage(side),
    ])
    .areas(middle);
    center
}
