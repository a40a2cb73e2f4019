use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::{App, InputMode};
use crate::form::Field;
use crate::tui::AppEvent;

pub async fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => {
            app.tick();
            app.poll_send().await;
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing => handle_editing_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,

        // Scrolling
        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(1),
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_half_page_down();
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_half_page_up();
        }
        KeyCode::PageDown => app.scroll_half_page_down(),
        KeyCode::PageUp => app.scroll_half_page_up(),

        // Back to top / bottom
        KeyCode::Char('g') | KeyCode::Home => app.scroll_to_top(),
        KeyCode::Char('G') | KeyCode::End => app.scroll_to_bottom(),

        // Theme toggle
        KeyCode::Char('t') => app.toggle_theme(),

        // Section jumps (the anchor links)
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            if index < app.page.sections.len() {
                app.jump_to_section(index);
            }
        }
        KeyCode::Char(']') => {
            if let Some(active) = app.active_section() {
                if active + 1 < app.page.sections.len() {
                    app.jump_to_section(active + 1);
                }
            }
        }
        KeyCode::Char('[') => {
            if let Some(active) = app.active_section() {
                app.jump_to_section(active.saturating_sub(1));
            }
        }

        // Open the contact form
        KeyCode::Char('c') => {
            if let Some(contact) = app.page.section_index("contact") {
                app.jump_to_section(contact);
            }
            app.form.focus(Field::Name);
            app.input_mode = InputMode::Editing;
        }

        _ => {}
    }
}

fn handle_editing_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.form.blur();
            app.input_mode = InputMode::Normal;
        }

        KeyCode::Tab | KeyCode::Down => app.form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.form.focus_prev(),

        // Enter advances through the fields and submits from the button.
        KeyCode::Enter => {
            if app.form.focused == Some(Field::Submit) {
                app.submit_contact();
            } else {
                app.form.focus_next();
            }
        }

        KeyCode::Backspace => app.form.backspace(),
        KeyCode::Delete => app.form.delete(),
        KeyCode::Left => app.form.cursor_left(),
        KeyCode::Right => app.form.cursor_right(),
        KeyCode::Home => app.form.cursor_home(),
        KeyCode::End => app.form.cursor_end(),

        KeyCode::Char(c) => app.form.insert_char(c),

        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollDown => app.scroll_down(2),
        MouseEventKind::ScrollUp => app.scroll_up(2),
        _ => {}
    }
}
