use ratatui::{prelude::*, widgets::*};
use unicode_width::UnicodeWidthStr;

use crate::api::Contact;
use crate::state::SessionState;
use crate::ui::app::{App, Modal, Route};
use crate::ui::form::{FIELD_COUNT, FIELD_LABELS};

pub fn draw(frame: &mut Frame, app: &App, state: &SessionState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(if state.error.is_some() { 3 } else { 0 }),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    draw_navbar(frame, chunks[0], state);
    if state.error.is_some() {
        draw_error_banner(frame, chunks[1], state);
    }

    match app.route {
        Route::Contacts => draw_contacts(frame, chunks[2], app, state),
        Route::ContactForm { .. } => draw_form(frame, chunks[2], app),
    }

    draw_footer(frame, chunks[3], app);

    if let Some(modal) = &app.modal {
        draw_modal(frame, modal, state);
    }
}

fn draw_navbar(frame: &mut Frame, area: Rect, state: &SessionState) {
    let agenda = state.selected.as_deref().unwrap_or("none");
    let mut spans = vec![
        Span::styled(
            " Contact List ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ agenda: "),
        Span::styled(agenda.to_string(), Style::default().fg(Color::Yellow)),
        Span::raw(format!(
            " │ {} contact{}",
            state.contacts.len(),
            if state.contacts.len() == 1 { "" } else { "s" }
        )),
    ];
    if state.loading {
        spans.push(Span::styled(
            " │ loading…",
            Style::default().fg(Color::DarkGray),
        ));
    }
    let navbar = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(navbar, area);
}

fn draw_error_banner(frame: &mut Frame, area: Rect, state: &SessionState) {
    let message = state.error.as_deref().unwrap_or_default();
    let banner = Paragraph::new(format!("{} (Esc to dismiss)", message))
        .style(Style::default().fg(Color::Red))
        .block(Block::default().borders(Borders::ALL).title("Error"));
    frame.render_widget(banner, area);
}

fn draw_contacts(frame: &mut Frame, area: Rect, app: &App, state: &SessionState) {
    if state.agendas.is_empty() {
        let text = if state.loading {
            "Loading…"
        } else {
            "No agendas found. Press n to create one and start adding contacts."
        };
        frame.render_widget(info_paragraph(text), area);
        return;
    }

    if state.contacts.is_empty() {
        let text = if state.loading {
            "Loading…"
        } else {
            "No contacts in this agenda. Press a to add your first contact!"
        };
        frame.render_widget(info_paragraph(text), area);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let items: Vec<ListItem> = state
        .contacts
        .iter()
        .map(|c| ListItem::new(c.name.clone()))
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Contacts"))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");
    let mut list_state = ListState::default();
    list_state.select(Some(app.list_index.min(state.contacts.len() - 1)));
    frame.render_stateful_widget(list, columns[0], &mut list_state);

    if let Some(contact) = state.contacts.get(app.list_index) {
        draw_detail_card(frame, columns[1], contact);
    }
}

fn draw_detail_card(frame: &mut Frame, area: Rect, contact: &Contact) {
    let mut lines = vec![
        Line::from(Span::styled(
            contact.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];

    if let Some(phone) = &contact.phone {
        lines.push(Line::from(format!("phone    {}", phone)));
    }
    if let Some(email) = &contact.email {
        lines.push(Line::from(format!("email    {}", email)));
    }
    if let Some(address) = &contact.address {
        let width = area.width.saturating_sub(13).max(10) as usize;
        for (i, row) in textwrap::wrap(address, width).iter().enumerate() {
            let prefix = if i == 0 { "address  " } else { "         " };
            lines.push(Line::from(format!("{}{}", prefix, row)));
        }
    }
    if contact.phone.is_none() && contact.email.is_none() && contact.address.is_none() {
        lines.push(Line::from(Span::styled(
            "No additional information",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    let card = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Details"))
        .wrap(Wrap { trim: false });
    frame.render_widget(card, area);
}

fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.form;
    let title = if form.is_editing() {
        "Edit Contact"
    } else {
        "Add New Contact"
    };

    let outer = Block::default().borders(Borders::ALL).title(title);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let mut constraints: Vec<Constraint> = (0..FIELD_COUNT).map(|_| Constraint::Length(3)).collect();
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, label) in FIELD_LABELS.iter().enumerate() {
        let focused = form.focus == i;
        let label = if i == 0 {
            format!("{} *", label)
        } else {
            (*label).to_string()
        };
        let style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let field = Paragraph::new(form.fields[i].clone())
            .block(Block::default().borders(Borders::ALL).title(label).border_style(style));
        frame.render_widget(field, rows[i]);

        if focused && !app.submitting {
            let x = rows[i].x + 1 + form.fields[i].width() as u16;
            frame.set_cursor(x.min(rows[i].right().saturating_sub(2)), rows[i].y + 1);
        }
    }

    let status_row = rows[FIELD_COUNT];
    if app.submitting {
        let text = if form.is_editing() { "Saving…" } else { "Adding…" };
        frame.render_widget(
            Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
            status_row,
        );
    } else if let Some(error) = &form.error {
        frame.render_widget(
            Paragraph::new(error.clone()).style(Style::default().fg(Color::Red)),
            status_row,
        );
    }
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let hints = match (&app.modal, &app.route) {
        (Some(Modal::AgendaPicker { .. }), _) => "↑/↓ choose · Enter select · Esc close",
        (Some(Modal::NewAgenda { .. }), _) => "type a name · Enter create · Esc cancel",
        (Some(_), _) => "y confirm · n cancel",
        (None, Route::Contacts) => {
            "a add · e edit · d delete · g agendas · n new agenda · D delete agenda · r refresh · q quit"
        }
        (None, Route::ContactForm { .. }) => "Tab next field · Enter save · Esc cancel",
    };
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn draw_modal(frame: &mut Frame, modal: &Modal, state: &SessionState) {
    match modal {
        Modal::ConfirmDeleteContact { name, deleting, .. } => {
            let body = if *deleting {
                "Deleting…".to_string()
            } else {
                format!("Are you sure you want to delete the contact {}?", name)
            };
            confirm_box(frame, "Confirm Delete", &body);
        }
        Modal::ConfirmDeleteAgenda { slug, deleting } => {
            let body = if *deleting {
                "Deleting…".to_string()
            } else {
                format!("Delete the agenda '{}' and all of its contacts?", slug)
            };
            confirm_box(frame, "Delete Agenda", &body);
        }
        Modal::NewAgenda { input } => {
            let area = centered_rect(40, 3, frame.size());
            frame.render_widget(Clear, area);
            let field = Paragraph::new(input.clone())
                .block(Block::default().borders(Borders::ALL).title("New agenda name"));
            frame.render_widget(field, area);
            frame.set_cursor(area.x + 1 + input.width() as u16, area.y + 1);
        }
        Modal::AgendaPicker { index } => {
            let height = (state.agendas.len() as u16 + 2).min(12);
            let area = centered_rect(30, height, frame.size());
            frame.render_widget(Clear, area);
            let items: Vec<ListItem> = state
                .agendas
                .iter()
                .map(|a| ListItem::new(a.slug.clone()))
                .collect();
            let list = List::new(items)
                .block(Block::default().borders(Borders::ALL).title("Select agenda"))
                .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan))
                .highlight_symbol("» ");
            let mut list_state = ListState::default();
            list_state.select(Some(*index));
            frame.render_stateful_widget(list, area, &mut list_state);
        }
    }
}

fn confirm_box(frame: &mut Frame, title: &str, body: &str) {
    let area = centered_rect(50, 5, frame.size());
    frame.render_widget(Clear, area);
    let text = Paragraph::new(body.to_string())
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    frame.render_widget(text, area);
}

fn info_paragraph(text: &str) -> Paragraph<'_> {
    Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL))
}

/// Fixed-size rect centered in `r`, clamped to fit.
fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}
