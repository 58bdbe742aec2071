use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::form::{Field, LoginForm, SignupForm};
use crate::tui::app::{App, View};

use super::helpers::{centered_rect_fixed, error_line, hint_line, input_lines};

/// Login or signup card, centered
pub fn render_auth_view(frame: &mut Frame, app: &App, area: Rect) {
    let (title, lines) = match app.view {
        View::Signup => (" Sign up ", signup_lines(app, &app.signup_form)),
        _ => (" Log in ", login_lines(app, &app.login_form)),
    };
    let bg = app.theme.background;
    let popup = centered_rect_fixed(56, lines.len() as u16 + 2, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .title(Span::styled(
            title,
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

const FORM_WIDTH: usize = 54;

fn login_lines<'a>(app: &App, form: &LoginForm) -> Vec<Line<'a>> {
    let mut lines = vec![Line::from("")];
    lines.extend(input_lines(
        &app.theme,
        Field::Email.label(),
        &form.email,
        form.focused_field() == Field::Email,
        false,
        form.error_for(Field::Email),
        FORM_WIDTH,
    ));
    lines.extend(input_lines(
        &app.theme,
        Field::Password.label(),
        &form.password,
        form.focused_field() == Field::Password,
        true,
        form.error_for(Field::Password),
        FORM_WIDTH,
    ));
    lines.push(Line::from(""));
    lines.push(hint_line(&app.theme, "Enter log in  Ctrl-G guest log in"));
    lines.push(hint_line(&app.theme, "Not a user? Ctrl-N sign up"));
    lines
}

fn signup_lines<'a>(app: &App, form: &SignupForm) -> Vec<Line<'a>> {
    let mut lines = vec![Line::from("")];
    let fields = [
        (Field::Name, &form.name, false),
        (Field::Email, &form.email, false),
        (Field::Password, &form.password, true),
        (Field::Confirm, &form.confirm, true),
    ];
    for (field, input, masked) in fields {
        lines.extend(input_lines(
            &app.theme,
            field.label(),
            input,
            form.focused_field() == field,
            masked,
            form.error_for(field),
            FORM_WIDTH,
        ));
    }

    let focused = form.focused_field() == Field::Privacy;
    let check = if form.accept_privacy { "[x]" } else { "[ ]" };
    let style = if focused {
        Style::default()
            .fg(app.theme.highlight)
            .bg(app.theme.background)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(app.theme.background)
    };
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(" {check} I accept the Privacy policy"),
        style,
    )));
    if let Some(message) = form.error_for(Field::Privacy) {
        lines.push(error_line(&app.theme, message));
    }
    lines.push(Line::from(""));
    lines.push(hint_line(&app.theme, "Enter sign up  Esc back to log in"));
    lines
}
