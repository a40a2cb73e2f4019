use chrono::{Datelike, Local};
use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::app::{App, InputMode};
use crate::content::{Section, SectionKind};
use crate::form::{BannerKind, Field};
use crate::reveal::FADE_STEPS;
use crate::theme::Palette;

const SPINNER_FRAMES: [char; 4] = ['|', '/', '-', '\\'];

/// Column where field values start: two-space indent plus a padded label.
const FIELD_VALUE_COL: u16 = 11;

pub fn render(app: &mut App, frame: &mut Frame) {
    let palette = app.theme.palette();
    let area = frame.area();

    frame.render_widget(Block::default().style(Style::default().bg(palette.bg)), area);

    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    // The handlers and reveal pass need the real viewport height.
    app.viewport_height = body_area.height;
    app.run_reveal_pass();

    render_header(app, frame, header_area, &palette);
    render_body(app, frame, body_area, &palette);
    render_footer(app, frame, footer_area, &palette);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let active = app.active_section();

    let mut spans = vec![Span::styled(
        " Jordan Lee ",
        Style::default().fg(palette.accent).bold(),
    )];

    for (i, section) in app.page.sections.iter().enumerate() {
        let style = if active == Some(i) {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(palette.fg)
        };
        spans.push(Span::styled(format!(" {} ", section.title), style));
    }

    // Theme indicator; inverted briefly right after a toggle.
    let mut indicator_style = Style::default().fg(palette.muted);
    if app.pulse_active() {
        indicator_style = indicator_style.add_modifier(Modifier::REVERSED);
    }
    spans.push(Span::styled(
        format!("  [{}]", app.theme.as_str()),
        indicator_style,
    ));

    let header = Paragraph::new(Line::from(spans)).style(Style::default().bg(palette.header_bg));
    frame.render_widget(header, area);
}

fn render_body(app: &App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let mut lines: Vec<Line> = Vec::new();

    for section in &app.page.sections {
        push_section(app, section, &mut lines, palette);
    }

    let body = Paragraph::new(Text::from(lines))
        .style(Style::default().fg(palette.fg))
        .scroll((app.scroll, 0));
    frame.render_widget(body, area);

    if app.input_mode == InputMode::Editing {
        set_form_cursor(app, frame, area);
    }
}

fn push_section(app: &App, section: &Section, lines: &mut Vec<Line>, palette: &Palette) {
    lines.push(Line::from(Span::styled(
        section.title.to_uppercase(),
        Style::default().fg(palette.accent).bold(),
    )));
    lines.push(Line::from(Span::styled(
        "─".repeat(section.title.len().max(8)),
        Style::default().fg(palette.muted),
    )));

    for body_line in &section.body {
        lines.push(Line::from(Span::raw(*body_line)));
    }

    match section.kind {
        SectionKind::Hero => {
            lines.push(typing_line(app, palette));
        }
        SectionKind::Cards => {
            push_cards(app, section, lines, palette);
        }
        SectionKind::Contact => {
            push_form(app, lines, palette);
        }
        SectionKind::Text => {}
    }

    lines.push(Line::default()); // gap before the next section
}

fn typing_line(app: &App, palette: &Palette) -> Line<'static> {
    Line::from(vec![
        Span::styled("> ".to_string(), Style::default().fg(palette.muted)),
        Span::styled(
            app.typing.visible(),
            Style::default().fg(palette.accent).bold(),
        ),
        Span::styled("▌".to_string(), Style::default().fg(palette.accent)),
    ])
}

fn push_cards(app: &App, section: &Section, lines: &mut Vec<Line>, palette: &Palette) {
    // Reveal states are parallel to page-order card iteration.
    let mut card_index = 0;
    for s in &app.page.sections {
        if std::ptr::eq(s, section) {
            break;
        }
        card_index += s.cards.len();
    }

    for card in &section.cards {
        let state = &app.reveals[card_index];
        card_index += 1;

        if !state.is_revealed() {
            // Not yet in view: transparent and offset.
            for _ in 0..card.lines.len() + 2 {
                lines.push(Line::default());
            }
            continue;
        }

        // Fade in: the indent shrinks and the color settles as the
        // transition completes.
        let fade = state.fade();
        let indent = " ".repeat(((FADE_STEPS - fade) / 2) as usize + 2);
        let color = if state.is_settled() {
            palette.fg
        } else {
            palette.muted
        };

        lines.push(Line::from(vec![
            Span::raw(indent.clone()),
            Span::styled(
                format!("◆ {}", card.title),
                Style::default().fg(palette.accent).bold(),
            ),
        ]));
        for text in &card.lines {
            lines.push(Line::from(vec![
                Span::raw(format!("{indent}  ")),
                Span::styled((*text).to_string(), Style::default().fg(color)),
            ]));
        }
        lines.push(Line::default());
    }
}

fn push_form(app: &App, lines: &mut Vec<Line>, palette: &Palette) {
    let form = &app.form;

    push_field(lines, palette, "Name:", &form.name, form.focused == Some(Field::Name));
    push_field_error(lines, palette, form.errors.name);
    push_field(lines, palette, "Email:", &form.email, form.focused == Some(Field::Email));
    push_field_error(lines, palette, form.errors.email);
    push_field(lines, palette, "Message:", &form.message, form.focused == Some(Field::Message));
    push_field_error(lines, palette, form.errors.message);

    lines.push(Line::default());

    // Submit button with the sending spinner; the disabled look while
    // sending mirrors the logical guard in `App::submit_contact`.
    let focused = form.focused == Some(Field::Submit);
    let mut button_style = if form.is_sending() {
        Style::default().fg(palette.muted)
    } else {
        Style::default().fg(palette.accent).bold()
    };
    if focused {
        button_style = button_style.add_modifier(Modifier::REVERSED);
    }
    let label = if form.is_sending() {
        format!(
            "[ {} {} ]",
            form.submit_label(),
            SPINNER_FRAMES[app.spinner_frame as usize % SPINNER_FRAMES.len()]
        )
    } else {
        format!("[ {} ]", form.submit_label())
    };
    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled(label, button_style),
    ]));

    lines.push(Line::default());

    match &form.banner {
        Some(banner) => {
            let style = match banner.kind {
                BannerKind::Success => Style::default().fg(palette.success).bold(),
                BannerKind::Error => Style::default().fg(palette.error).bold(),
            };
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(banner.text.clone(), style),
            ]));
        }
        None => lines.push(Line::default()),
    }

    lines.push(Line::default());
    lines.push(Line::default());
}

fn push_field(lines: &mut Vec<Line>, palette: &Palette, label: &str, value: &str, focused: bool) {
    let label_style = if focused {
        Style::default().fg(palette.accent).bold()
    } else {
        Style::default().fg(palette.muted)
    };
    lines.push(Line::from(vec![
        Span::styled(format!("  {label:<9}"), label_style),
        Span::styled(value.to_string(), Style::default().fg(palette.fg)),
    ]));
}

fn push_field_error(lines: &mut Vec<Line>, palette: &Palette, error: Option<&'static str>) {
    match error {
        Some(text) => lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(text, Style::default().fg(palette.error)),
        ])),
        None => lines.push(Line::default()),
    }
}

/// Place the terminal cursor inside the focused form field when the row
/// is on screen.
fn set_form_cursor(app: &App, frame: &mut Frame, body: Rect) {
    let Some(contact) = app
        .page
        .section_index("contact")
        .and_then(|i| app.page.sections.get(i))
    else {
        return;
    };

    let form_first = contact.top + 2 + contact.body.len() as u16;
    let row = match app.form.focused {
        Some(Field::Name) => form_first,
        Some(Field::Email) => form_first + 2,
        Some(Field::Message) => form_first + 4,
        _ => return,
    };

    if row < app.scroll {
        return;
    }
    let y = body.y + (row - app.scroll);
    if y >= body.y + body.height {
        return;
    }

    let x = body.x + FIELD_VALUE_COL + app.form.cursor as u16;
    frame.set_cursor_position(Position::new(x, y));
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let key_style = Style::default().bg(palette.header_bg).fg(palette.fg);
    let label_style = Style::default().fg(palette.muted);

    let mut hints = match app.input_mode {
        InputMode::Normal => {
            let mut hints = vec![
                Span::styled(" j/k ", key_style),
                Span::styled(" scroll ", label_style),
                Span::styled(" 1-5 ", key_style),
                Span::styled(" section ", label_style),
                Span::styled(" t ", key_style),
                Span::styled(" theme ", label_style),
                Span::styled(" c ", key_style),
                Span::styled(" contact ", label_style),
                Span::styled(" q ", key_style),
                Span::styled(" quit ", label_style),
            ];
            if app.back_to_top_visible() {
                hints.push(Span::styled(" g ", key_style));
                hints.push(Span::styled(" top ", label_style));
            }
            hints
        }
        InputMode::Editing => vec![
            Span::styled(" Tab ", key_style),
            Span::styled(" next field ", label_style),
            Span::styled(" Enter ", key_style),
            Span::styled(" submit ", label_style),
            Span::styled(" Esc ", key_style),
            Span::styled(" done ", label_style),
        ],
    };

    hints.push(Span::styled(
        format!("  © {} Jordan Lee", Local::now().year()),
        label_style,
    ));

    let footer = Paragraph::new(Line::from(hints));
    frame.render_widget(footer, area);
}
