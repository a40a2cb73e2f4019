/// Scroll-triggered reveal for the skill and project cards. A card
/// starts hidden; once its top row crosses the visibility threshold it
/// flips to revealed and fades in over a few ticks. The transition is
/// one-way: marking an already-revealed card again is a no-op and the
/// fade only ever moves forward.

/// Ticks for the fade-in to reach full visibility.
pub const FADE_STEPS: u8 = 6;

#[derive(Debug, Clone, Copy, Default)]
pub struct Reveal {
    revealed: bool,
    fade: u8,
}

impl Reveal {
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Fade progress in `0..=FADE_STEPS`; `FADE_STEPS` means settled.
    pub fn fade(&self) -> u8 {
        self.fade
    }

    pub fn is_settled(&self) -> bool {
        self.revealed && self.fade >= FADE_STEPS
    }

    pub fn mark_revealed(&mut self) {
        self.revealed = true;
    }

    /// Advance the fade one step; does nothing until revealed.
    pub fn tick(&mut self) {
        if self.revealed && self.fade < FADE_STEPS {
            self.fade += 1;
        }
    }
}

/// Visibility threshold in on-screen rows: a card reveals once its top
/// sits above 5/6 of the viewport height (the page equivalent of
/// revealing just before an element is fully scrolled into view).
pub fn threshold(viewport_height: u16) -> i32 {
    i32::from(viewport_height) * 5 / 6
}

/// One pass over every card: reveal any card whose top row is above the
/// threshold. `card_top` is the absolute line index; cards already
/// scrolled past the top of the viewport count as visible.
pub fn reveal_pass<'a, I>(cards: I, scroll: u16, viewport_height: u16)
where
    I: Iterator<Item = (u16, &'a mut Reveal)>,
{
    let limit = threshold(viewport_height);
    for (card_top, state) in cards {
        let on_screen = i32::from(card_top) - i32::from(scroll);
        if on_screen < limit {
            state.mark_revealed();
        }
    }
}
