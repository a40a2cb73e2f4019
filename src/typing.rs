/// Typing headline animation: builds each title up one character at a
/// time, holds it, deletes it, then moves to the next title, wrapping
/// around forever. Advanced by an injected logical tick instead of
/// rescheduling itself, so tests drive it directly.

/// Ticks the full title is held before deletion starts; 1.5 s when
/// driven at the 50 ms base tick rate.
pub const PAUSE_TICKS: u32 = 30;

#[derive(Debug, Clone)]
pub struct TypingAnimator {
    titles: Vec<String>,
    index: usize,
    chars: usize,
    deleting: bool,
    pause_left: u32,
}

impl TypingAnimator {
    /// `titles` must be non-empty.
    pub fn new(titles: Vec<String>) -> Self {
        debug_assert!(!titles.is_empty());
        Self {
            titles,
            index: 0,
            chars: 0,
            deleting: false,
            pause_left: 0,
        }
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// Holding the full title before deletion starts.
    pub fn is_pausing(&self) -> bool {
        self.pause_left > 0
    }

    /// Currently visible prefix of the active title.
    pub fn visible(&self) -> String {
        self.titles[self.index].chars().take(self.chars).collect()
    }

    /// One logical tick: grow by a character, hold, or shrink by a
    /// character. Flips `deleting` only at the two boundaries (full
    /// title shown, or fully erased).
    pub fn advance(&mut self) {
        if self.pause_left > 0 {
            self.pause_left -= 1;
            if self.pause_left == 0 {
                self.deleting = true;
            }
            return;
        }

        let len = self.titles[self.index].chars().count();

        if self.deleting {
            self.chars = self.chars.saturating_sub(1);
            if self.chars == 0 {
                self.deleting = false;
                self.index = (self.index + 1) % self.titles.len();
            }
        } else {
            self.chars = (self.chars + 1).min(len);
            if self.chars == len {
                self.pause_left = PAUSE_TICKS;
            }
        }
    }
}
