use anyhow::Result;
use chrono::Local;
use tracing::{debug, warn};

use crate::config::Config;
use crate::content::{self, Page, BACK_TO_TOP_AFTER, JOB_TITLES};
use crate::form::{ContactForm, TemplateParams};
use crate::relay::RelayClient;
use crate::reveal::{reveal_pass, Reveal};
use crate::theme::ThemeMode;
use crate::typing::TypingAnimator;

/// Base ticks the theme-toggle pulse lasts (150 ms-equivalent).
pub const PULSE_TICKS: u32 = 3;

/// Base ticks before the typing headline starts on launch (~1 s).
const TYPING_START_DELAY: u32 = 20;

/// Typing advances every other base tick (~100 ms per character);
/// deleting runs at full tick rate (~50 ms per character).
const TYPE_EVERY: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub input_mode: InputMode,

    // Theme
    pub theme: ThemeMode,
    pub pulse_left: u32,

    // Page and viewport
    pub page: Page,
    pub scroll: u16,
    pub viewport_height: u16,

    // Animations
    pub typing: TypingAnimator,
    typing_delay: u32,
    typing_counter: u32,
    pub reveals: Vec<Reveal>,
    pub spinner_frame: u8,

    // Contact form
    pub form: ContactForm,
    pub relay: Option<RelayClient>,
    pub send_task: Option<tokio::task::JoinHandle<Result<()>>>,

    // Where the theme preference is written through
    pub config_path: Option<std::path::PathBuf>,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let page = Page::new();
        let reveals = vec![Reveal::default(); page.card_count()];

        let relay = config
            .relay_credentials()
            .map(|(service, template, key)| RelayClient::new(service, template, key));
        if relay.is_none() {
            warn!("email relay not configured; contact form sends will fail fast");
        }

        Self {
            should_quit: false,
            input_mode: InputMode::Normal,

            theme: config.theme(),
            pulse_left: 0,

            page,
            scroll: 0,
            viewport_height: 0,

            typing: TypingAnimator::new(JOB_TITLES.iter().map(|t| t.to_string()).collect()),
            typing_delay: TYPING_START_DELAY,
            typing_counter: 0,
            reveals,
            spinner_frame: 0,

            form: ContactForm::default(),
            relay,
            send_task: None,

            config_path: Config::config_path().ok(),
        }
    }

    /// One base tick: typing cadence, theme pulse, banner countdown,
    /// reveal pass and fades. Everything here is idempotent per tick.
    pub fn tick(&mut self) {
        if self.typing_delay > 0 {
            self.typing_delay -= 1;
        } else {
            self.typing_counter += 1;
            // Deleting and the pause countdown run at full tick rate;
            // only typing is stretched to every other tick.
            let every = if self.typing.is_deleting() || self.typing.is_pausing() {
                1
            } else {
                TYPE_EVERY
            };
            if self.typing_counter >= every {
                self.typing_counter = 0;
                self.typing.advance();
            }
        }

        if self.pulse_left > 0 {
            self.pulse_left -= 1;
        }

        if self.form.is_sending() {
            self.spinner_frame = (self.spinner_frame + 1) % 4;
        }

        self.form.tick();

        self.run_reveal_pass();
        for state in &mut self.reveals {
            state.tick();
        }
    }

    /// Mark any card scrolled into view as revealed. Also run on scroll
    /// so reveals track the viewport, not just the tick clock.
    pub fn run_reveal_pass(&mut self) {
        if self.viewport_height == 0 {
            return;
        }
        let tops: Vec<u16> = self.page.cards().map(|c| c.top).collect();
        reveal_pass(
            tops.into_iter().zip(self.reveals.iter_mut()),
            self.scroll,
            self.viewport_height,
        );
    }

    // Theme ----------------------------------------------------------------

    /// Flip light/dark, write the preference through, and start the
    /// short header pulse. A failed write is logged and swallowed; the
    /// in-memory mode stays authoritative.
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.pulse_left = PULSE_TICKS;
        if let Some(path) = &self.config_path {
            if let Err(e) = Config::save_theme_to(path, self.theme) {
                warn!(error = %e, "could not persist theme preference");
            }
        }
    }

    pub fn pulse_active(&self) -> bool {
        self.pulse_left > 0
    }

    // Scrolling ------------------------------------------------------------

    pub fn max_scroll(&self) -> u16 {
        self.page
            .total_lines()
            .saturating_sub(self.viewport_height)
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines).min(self.max_scroll());
        self.run_reveal_pass();
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_half_page_down(&mut self) {
        self.scroll_down(self.viewport_height / 2);
    }

    pub fn scroll_half_page_up(&mut self) {
        self.scroll_up(self.viewport_height / 2);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
        self.run_reveal_pass();
    }

    /// Jump the viewport to a section heading (the anchor-link behavior).
    pub fn jump_to_section(&mut self, index: usize) {
        if let Some(section) = self.page.sections.get(index) {
            self.scroll = section.top.min(self.max_scroll());
            self.run_reveal_pass();
        }
    }

    pub fn active_section(&self) -> Option<usize> {
        content::active_section(&self.page, self.scroll)
    }

    pub fn back_to_top_visible(&self) -> bool {
        self.scroll > BACK_TO_TOP_AFTER
    }

    // Contact form ---------------------------------------------------------

    /// Submit the contact form. The in-flight task is the authoritative
    /// re-entrancy guard: a second submit while one send is outstanding
    /// is ignored outright.
    pub fn submit_contact(&mut self) {
        if self.form.is_sending() || self.send_task.is_some() {
            debug!("submit ignored; a send is already in flight");
            return;
        }

        if !self.form.validate() {
            return;
        }

        let Some(relay) = self.relay.clone() else {
            self.form
                .complete_failure("Contact form is not configured yet.");
            return;
        };

        self.form.begin_send();

        let params = TemplateParams::build(
            &self.form.name,
            &self.form.email,
            &self.form.message,
            Local::now(),
        );

        self.send_task = Some(tokio::spawn(async move { relay.send(&params).await }));
    }

    /// Poll the in-flight send. Every completion path, including a
    /// panicked task, leaves the Sending state; that is what restores
    /// the submit label, hides the spinner, and re-enables the button.
    pub async fn poll_send(&mut self) {
        let finished = self
            .send_task
            .as_ref()
            .is_some_and(|task| task.is_finished());
        if !finished {
            return;
        }

        let Some(task) = self.send_task.take() else {
            return;
        };
        match task.await {
            Ok(Ok(())) => {
                debug!("contact form relayed successfully");
                self.form.complete_success();
            }
            Ok(Err(e)) => {
                warn!(error = %e, "contact form send failed");
                self.form.complete_failure(&e.to_string());
            }
            Err(e) => {
                warn!(error = %e, "contact form send task panicked");
                self.form
                    .complete_failure(crate::relay::GENERIC_FAILURE);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::SubmissionState;

    fn test_app() -> App {
        let mut app = App::new(&Config::default());
        app.relay = None;
        app.viewport_height = 24;
        app.config_path = None;
        app
    }

    fn fill_valid(app: &mut App) {
        app.form.name = "Jordan".to_string();
        app.form.email = "j@example.com".to_string();
        app.form.message = "Hello, this is long enough.".to_string();
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_sending() {
        let mut app = test_app();
        app.form.name = "J".to_string();
        app.submit_contact();

        assert!(app.send_task.is_none());
        assert_eq!(app.form.state, SubmissionState::Idle);
        assert!(!app.form.errors.is_clear());
    }

    #[tokio::test]
    async fn unconfigured_relay_fails_fast_without_a_task() {
        let mut app = test_app();
        fill_valid(&mut app);
        app.submit_contact();

        assert!(app.send_task.is_none());
        assert_eq!(app.form.state, SubmissionState::Failed);
        let banner = app.form.banner.as_ref().unwrap();
        assert!(banner.text.contains("not configured"));
        // Fields are kept so the user can retry once configured.
        assert_eq!(app.form.name, "Jordan");
    }

    #[tokio::test]
    async fn resubmit_while_sending_is_ignored() {
        let mut app = test_app();
        fill_valid(&mut app);
        // The guard keys off the outstanding task, not timing; this
        // endpoint fails with a transport error once polled.
        app.relay = Some(RelayClient::with_endpoint(
            "http://127.0.0.1:1/send".to_string(),
            "svc".to_string(),
            "tpl".to_string(),
            "key".to_string(),
        ));

        app.submit_contact();
        assert!(app.send_task.is_some());
        assert_eq!(app.form.state, SubmissionState::Sending);

        app.form.email = "other@example.com".to_string();
        app.submit_contact();
        assert_eq!(app.form.state, SubmissionState::Sending);

        // Drive completion; the failure path must re-enable the form.
        for _ in 0..500 {
            app.poll_send().await;
            if app.send_task.is_none() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }

        assert!(app.send_task.is_none());
        assert_eq!(app.form.state, SubmissionState::Failed);
        assert!(!app.form.is_sending());
        // A connection failure shows the generic string, not the
        // transport error or the endpoint.
        let banner = app.form.banner.as_ref().unwrap();
        assert_eq!(
            banner.text,
            format!("❌ {}", crate::relay::GENERIC_FAILURE)
        );
    }

    #[tokio::test]
    async fn theme_toggle_twice_round_trips_and_persists_last_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut app = test_app();
        app.config_path = Some(path.clone());

        let start = app.theme;
        app.toggle_theme();
        assert_ne!(app.theme, start);
        assert!(app.pulse_active());
        app.toggle_theme();
        assert_eq!(app.theme, start);

        // The persisted value is whatever was written last.
        let saved = Config::load_from(&path).unwrap();
        assert_eq!(saved.theme(), app.theme);

        for _ in 0..PULSE_TICKS {
            app.tick();
        }
        assert!(!app.pulse_active());
    }

    #[tokio::test]
    async fn theme_persist_failure_is_swallowed() {
        let mut app = test_app();
        // A directory path can never be written as a file.
        let dir = tempfile::tempdir().unwrap();
        app.config_path = Some(dir.path().to_path_buf());

        app.toggle_theme();
        assert_eq!(app.theme, ThemeMode::Dark);
    }

    #[tokio::test]
    async fn scroll_clamps_and_tracks_active_section() {
        let mut app = test_app();
        assert_eq!(app.active_section(), app.page.section_index("home"));

        app.scroll_down(10_000);
        assert_eq!(app.scroll, app.max_scroll());

        app.scroll_to_top();
        assert_eq!(app.scroll, 0);
        assert!(!app.back_to_top_visible());

        let projects = app.page.section_index("projects").unwrap();
        app.jump_to_section(projects);
        assert_eq!(app.active_section(), Some(projects));
    }

    #[tokio::test]
    async fn ticks_eventually_type_the_headline() {
        let mut app = test_app();
        for _ in 0..TYPING_START_DELAY + 4 {
            app.tick();
        }
        assert!(!app.typing.visible().is_empty());
    }

    #[tokio::test]
    async fn full_title_holds_for_the_pause_window_in_base_ticks() {
        let mut app = test_app();
        let full = JOB_TITLES[0].to_string();

        // Type out the first title in full.
        let mut guard = 0;
        while app.typing.visible() != full {
            app.tick();
            guard += 1;
            assert!(guard < 10_000, "headline never finished typing");
        }

        // The hold before deletion starts must span exactly the pause
        // window at base-tick rate (30 ticks of 50 ms, i.e. 1.5 s).
        let mut held = 0;
        while !app.typing.is_deleting() {
            app.tick();
            held += 1;
            assert_eq!(app.typing.visible(), full);
            assert!(held <= crate::typing::PAUSE_TICKS);
        }
        assert_eq!(held, crate::typing::PAUSE_TICKS);
    }
}
