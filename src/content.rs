/// Static page content: the portfolio sections laid out as one tall
/// column of lines. Line offsets are computed once so scroll position,
/// navigation highlighting, and reveal tracking all work in the same
/// coordinate space.

/// Recipient for the contact form payload.
pub const OWNER_NAME: &str = "Jordan Lee";

/// Headlines cycled by the typing animator.
pub const JOB_TITLES: &[&str] = &["Systems Programmer", "Rust Developer", "CLI Toolsmith"];

/// Lines the contact form occupies inside the Contact section
/// (three labeled fields, three error slots, submit row, banner row,
/// plus padding). Kept here so section heights stay honest.
pub const CONTACT_BODY_LINES: u16 = 12;

/// Added to the scroll offset before the containment test, so the link
/// for a section lights up slightly before its heading hits the top row.
pub const READ_AHEAD_LINES: u16 = 3;

/// Scroll depth past which the back-to-top hint appears.
pub const BACK_TO_TOP_AFTER: u16 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Hero,
    Text,
    Cards,
    Contact,
}

#[derive(Debug, Clone)]
pub struct Card {
    pub title: &'static str,
    pub lines: Vec<&'static str>,
    /// Absolute line index of the card's title row within the page.
    pub top: u16,
}

#[derive(Debug, Clone)]
pub struct Section {
    pub id: &'static str,
    pub title: &'static str,
    pub kind: SectionKind,
    pub body: Vec<&'static str>,
    pub cards: Vec<Card>,
    pub top: u16,
    pub height: u16,
}

#[derive(Debug, Clone)]
pub struct Page {
    pub sections: Vec<Section>,
}

impl Page {
    pub fn new() -> Self {
        let mut sections = vec![
            Section {
                id: "home",
                title: "Home",
                kind: SectionKind::Hero,
                body: vec![
                    "",
                    "Hi, I'm Jordan Lee.",
                    "I build fast, reliable software for the terminal and beyond.",
                    "",
                ],
                cards: Vec::new(),
                top: 0,
                height: 0,
            },
            Section {
                id: "about",
                title: "About",
                kind: SectionKind::Text,
                body: vec![
                    "",
                    "Ten years of shipping infrastructure and developer tools.",
                    "I care about latency budgets, clear error messages, and",
                    "software that keeps working when the network does not.",
                    "Currently exploring embedded targets and protocol design.",
                    "",
                ],
                cards: Vec::new(),
                top: 0,
                height: 0,
            },
            Section {
                id: "skills",
                title: "Skills",
                kind: SectionKind::Cards,
                body: vec![""],
                cards: vec![
                    Card {
                        title: "Languages",
                        lines: vec!["Rust, Go, C, Python", "Comfortable down to the syscall"],
                        top: 0,
                    },
                    Card {
                        title: "Services",
                        lines: vec!["HTTP APIs, queues, schedulers", "Observability-first design"],
                        top: 0,
                    },
                    Card {
                        title: "Tooling",
                        lines: vec!["TUIs, build systems, CI", "Make the right thing the easy thing"],
                        top: 0,
                    },
                ],
                top: 0,
                height: 0,
            },
            Section {
                id: "projects",
                title: "Projects",
                kind: SectionKind::Cards,
                body: vec![""],
                cards: vec![
                    Card {
                        title: "beacon",
                        lines: vec![
                            "Uptime prober with a ratatui dashboard",
                            "Async checks, percentile latency tracking",
                        ],
                        top: 0,
                    },
                    Card {
                        title: "inkwell",
                        lines: vec![
                            "Markdown journal that lives in the terminal",
                            "Full-text search, encrypted at rest",
                        ],
                        top: 0,
                    },
                    Card {
                        title: "relayctl",
                        lines: vec![
                            "CLI for wrangling webhook relays",
                            "Replay, diff, and tail delivery attempts",
                        ],
                        top: 0,
                    },
                ],
                top: 0,
                height: 0,
            },
            Section {
                id: "contact",
                title: "Contact",
                kind: SectionKind::Contact,
                body: vec!["", "Have a project in mind? Send a note.", ""],
                cards: Vec::new(),
                top: 0,
                height: 0,
            },
        ];

        // Lay the sections out as one column and record card offsets.
        let mut cursor: u16 = 0;
        for section in &mut sections {
            section.top = cursor;
            let mut height = 2; // heading row + underline row
            height += section.body.len() as u16;
            for card in &mut section.cards {
                card.top = cursor + height;
                height += 1 + card.lines.len() as u16 + 1; // title + body + gap
            }
            if section.kind == SectionKind::Hero {
                height += 1; // typing headline row
            }
            if section.kind == SectionKind::Contact {
                height += CONTACT_BODY_LINES;
            }
            height += 1; // gap before the next section
            section.height = height;
            cursor += height;
        }

        Self { sections }
    }

    pub fn total_lines(&self) -> u16 {
        self.sections
            .last()
            .map(|s| s.top + s.height)
            .unwrap_or(0)
    }

    /// All cards in page order; the reveal states in `App` are parallel
    /// to this iteration.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.sections.iter().flat_map(|s| s.cards.iter())
    }

    pub fn card_count(&self) -> usize {
        self.sections.iter().map(|s| s.cards.len()).sum()
    }

    pub fn section_index(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }
}

/// Navigation highlighter: pick the section whose line range contains the
/// scroll offset plus the read-ahead constant. Pure and idempotent; the
/// layout guarantees contiguous non-overlapping ranges, so at most one
/// section matches.
pub fn active_section(page: &Page, scroll: u16) -> Option<usize> {
    let pos = scroll.saturating_add(READ_AHEAD_LINES);
    page.sections
        .iter()
        .position(|s| pos >= s.top && pos < s.top + s.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_contiguous_and_nonoverlapping() {
        let page = Page::new();
        let mut expected_top = 0;
        for section in &page.sections {
            assert_eq!(section.top, expected_top);
            assert!(section.height > 0);
            expected_top = section.top + section.height;
        }
        assert_eq!(page.total_lines(), expected_top);
    }

    #[test]
    fn active_section_matches_at_most_one() {
        let page = Page::new();
        for scroll in 0..page.total_lines() {
            let pos = scroll + READ_AHEAD_LINES;
            let matches = page
                .sections
                .iter()
                .filter(|s| pos >= s.top && pos < s.top + s.height)
                .count();
            assert!(matches <= 1, "scroll {scroll} matched {matches} sections");
        }
    }

    #[test]
    fn active_section_is_idempotent() {
        let page = Page::new();
        let a = active_section(&page, 7);
        let b = active_section(&page, 7);
        assert_eq!(a, b);
    }

    #[test]
    fn top_of_page_is_home() {
        let page = Page::new();
        assert_eq!(active_section(&page, 0), page.section_index("home"));
    }

    #[test]
    fn card_tops_fall_inside_their_section() {
        let page = Page::new();
        for section in &page.sections {
            for card in &section.cards {
                assert!(card.top >= section.top);
                assert!(card.top < section.top + section.height);
            }
        }
    }
}
