use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::{AppState, Field};

pub fn draw_ui(f: &mut Frame, app_state: &AppState) {
    let show_details = app_state.config.display.show_details;

    let mut constraints = vec![
        Constraint::Length(4), // Header
        Constraint::Length(7), // Form
        Constraint::Length(3), // SpotThePlane line
    ];
    if show_details {
        constraints.push(Constraint::Length(8)); // Sighting details
    }
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(3)); // Footer

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(constraints)
        .split(f.area());

    let mut chunk_idx = 0;

    draw_header(f, chunks[chunk_idx], app_state);
    chunk_idx += 1;

    draw_form(f, chunks[chunk_idx], app_state);
    chunk_idx += 1;

    draw_spot_line(f, chunks[chunk_idx], app_state);
    chunk_idx += 1;

    if show_details {
        draw_details(f, chunks[chunk_idx], app_state);
        chunk_idx += 1;
    }
    // Spacer
    chunk_idx += 1;

    draw_footer(f, chunks[chunk_idx], app_state);
}

fn draw_header(f: &mut Frame, area: Rect, app_state: &AppState) {
    let header_text = vec![
        Line::from(vec![
            Span::styled("Observer: ", Style::default().fg(Color::Cyan)),
            Span::raw(format!("{} ", app_state.observer.name)),
            Span::styled("Location: ", Style::default().fg(Color::Cyan)),
            Span::raw(app_state.observer.location_label()),
        ]),
        Line::from(vec![
            Span::styled("Time: ", Style::default().fg(Color::Cyan)),
            Span::raw(Local::now().format("%Y-%m-%d %H:%M:%S %Z").to_string()),
            Span::raw("  "),
            Span::styled("Updated: ", Style::default().fg(Color::Cyan)),
            Span::raw(app_state.last_update.format("%H:%M:%S").to_string()),
        ]),
    ];

    let header = Paragraph::new(header_text).block(
        Block::default()
            .borders(Borders::ALL)
            .title("SpotThePlane")
            .style(Style::default().fg(Color::White)),
    );

    f.render_widget(header, area);
}

fn draw_form(f: &mut Frame, area: Rect, app_state: &AppState) {
    let field_lines: Vec<Line> = Field::ALL
        .iter()
        .map(|field| {
            let is_current = *field == app_state.selected_field;
            let is_editing = is_current && app_state.editing;
            let value = if is_editing {
                format!("{}|", app_state.input_buffer)
            } else {
                app_state.field_value(*field)
            };

            let label_style = if is_current {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Yellow)
            };

            let value_style = if is_editing {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let indicator = if is_current { "> " } else { "  " };

            Line::from(vec![
                Span::styled(indicator, label_style),
                Span::styled(format!("{:18}", field.label()), label_style),
                Span::raw(": "),
                Span::styled(value, value_style),
            ])
        })
        .collect();

    let form = Paragraph::new(field_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Coordinates")
            .style(Style::default().fg(Color::White)),
    );
    f.render_widget(form, area);
}

fn draw_spot_line(f: &mut Frame, area: Rect, app_state: &AppState) {
    let color = match app_state.sighting() {
        Ok(result) if result.below_horizon => Color::Gray,
        Ok(_) => Color::Green,
        Err(_) => Color::Yellow,
    };

    let line = Paragraph::new(app_state.status_line())
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Look towards")
                .style(Style::default().fg(Color::White)),
        );
    f.render_widget(line, area);
}

fn draw_details(f: &mut Frame, area: Rect, app_state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Sighting details")
        .style(Style::default().fg(Color::White));

    let result = match app_state.sighting() {
        Ok(result) => result,
        Err(e) => {
            let empty = Paragraph::new(e.to_string()).block(block);
            f.render_widget(empty, area);
            return;
        }
    };
    let target = app_state.telemetry.parse();

    let elevation = result.elevation_degrees();
    let detail_lines = vec![
        Line::from(vec![
            Span::raw("  Azimuth:   "),
            Span::styled(
                format!("{:.1}°", result.azimuth_degrees()),
                Style::default().fg(Color::White),
            ),
            Span::raw(format!(" ({})", result.compass_point())),
        ]),
        Line::from(vec![
            Span::raw("  Elevation: "),
            Span::styled(
                format!("{:.1}°", elevation),
                Style::default().fg(if result.below_horizon {
                    Color::Gray
                } else if elevation > 45.0 {
                    Color::Green
                } else if elevation > 20.0 {
                    Color::Yellow
                } else {
                    Color::Red
                }),
            ),
        ]),
        Line::from(vec![
            Span::raw("  Ground:    "),
            Span::styled(
                format!("{:.1} km", result.ground_distance_km()),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::raw("  Slant:     "),
            Span::styled(
                format!("{:.1} km", result.slant_distance_km()),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::raw("  Altitude:  "),
            Span::styled(
                format!("{:.0} m ({:.0} ft)", target.altitude, target.altitude_ft()),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::raw("  Trails:    "),
            Span::styled(
                if result.no_trails { "NONE" } else { "POSSIBLE" },
                Style::default().fg(if result.no_trails {
                    Color::Gray
                } else {
                    Color::Cyan
                }),
            ),
        ]),
    ];

    let details = Paragraph::new(detail_lines).block(block);
    f.render_widget(details, area);
}

fn draw_footer(f: &mut Frame, area: Rect, app_state: &AppState) {
    let text = if app_state.editing {
        "Enter/ESC: Done | Tab: Next field | Backspace: Delete"
    } else {
        "↑/↓ or j/k: Select | Enter/e: Edit | q/ESC: Quit"
    };

    let footer = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}
