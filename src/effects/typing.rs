//! Subtitle typing loop.
//!
//! A finite-state cycle over an ordered text list: type forward one char
//! per step, hold at the full string, delete back one char per step, rest,
//! advance to the next string, wrap. The step function is pure and owns no
//! timers; the wasm driver re-schedules itself with the returned delay
//! (plus jitter) so the cadence stays testable against a virtual clock.

pub const TYPE_MS: u32 = 100;
pub const DELETE_MS: u32 = 50;
/// Hold with the full string on screen before deleting.
pub const HOLD_MS: u32 = 2000;
/// Rest with an empty subtitle before the next string starts.
pub const REST_MS: u32 = 500;
pub const START_DELAY_MS: u32 = 2000;
/// Each step's delay carries up to this much random jitter either way.
pub const JITTER_MS: f64 = 15.0;

const DESKTOP_TEXTS: &[&str] = &[
    "DATA ANALYST • PYTHON • ML",
    "TRANSFORMANDO DADOS EM INSIGHTS",
    "MACHINE LEARNING SPECIALIST",
    "ETL • BI • VISUALIZATION",
    "PYTHON • SQL • CLOUD",
];

/// Mobile keeps the shorter front of the rotation.
const MOBILE_TEXT_COUNT: usize = 3;

pub fn subtitle_texts(mobile: bool) -> Vec<String> {
    let take = if mobile { MOBILE_TEXT_COUNT } else { DESKTOP_TEXTS.len() };
    DESKTOP_TEXTS.iter().take(take).map(|s| s.to_string()).collect()
}

/// What the driver should render and when to step again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingStep {
    pub display: String,
    pub delay_ms: u32,
}

#[derive(Debug)]
pub struct TypingLoop {
    texts: Vec<String>,
    index: usize,
    char_index: usize,
    deleting: bool,
}

impl TypingLoop {
    /// Returns `None` for an empty list; the caller skips the subtitle
    /// entirely in that case.
    pub fn new(texts: Vec<String>) -> Option<Self> {
        if texts.is_empty() {
            return None;
        }
        Some(TypingLoop {
            texts,
            index: 0,
            char_index: 0,
            deleting: false,
        })
    }

    pub fn current_target(&self) -> &str {
        &self.texts[self.index]
    }

    pub fn step(&mut self) -> TypingStep {
        let full_len = self.texts[self.index].chars().count();

        if self.deleting {
            self.char_index = self.char_index.saturating_sub(1);
        } else {
            self.char_index = (self.char_index + 1).min(full_len);
        }

        let display: String = self.texts[self.index]
            .chars()
            .take(self.char_index)
            .collect();

        let mut delay_ms = if self.deleting { DELETE_MS } else { TYPE_MS };

        if !self.deleting && self.char_index == full_len {
            delay_ms = HOLD_MS;
            self.deleting = true;
        } else if self.deleting && self.char_index == 0 {
            self.deleting = false;
            self.index = (self.index + 1) % self.texts.len();
            delay_ms = REST_MS;
        }

        TypingStep { display, delay_ms }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_list_is_rejected() {
        assert!(TypingLoop::new(Vec::new()).is_none());
    }

    #[test]
    fn display_is_always_a_prefix_of_the_target() {
        let mut lp = TypingLoop::new(subtitle_texts(false)).unwrap();
        for _ in 0..2000 {
            let target = lp.current_target().to_string();
            let step = lp.step();
            // The step may have advanced the index, so check against the
            // target current when the text was rendered.
            assert!(
                target.starts_with(&step.display) || lp.current_target().starts_with(&step.display),
                "{:?} not a prefix of {:?}",
                step.display,
                target
            );
        }
    }

    #[test]
    fn targets_are_visited_in_order_and_wrap() {
        let list = texts(&["AB", "C", "DE"]);
        let mut lp = TypingLoop::new(list.clone()).unwrap();
        let mut completed = Vec::new();
        for _ in 0..500 {
            let target = lp.current_target().to_string();
            let step = lp.step();
            if step.delay_ms == HOLD_MS {
                completed.push(target);
            }
            if completed.len() == 7 {
                break;
            }
        }
        assert_eq!(
            completed,
            vec!["AB", "C", "DE", "AB", "C", "DE", "AB"]
        );
    }

    #[test]
    fn cadence_matches_the_state() {
        let mut lp = TypingLoop::new(texts(&["HI"])).unwrap();
        assert_eq!(lp.step(), TypingStep { display: "H".into(), delay_ms: TYPE_MS });
        assert_eq!(lp.step(), TypingStep { display: "HI".into(), delay_ms: HOLD_MS });
        assert_eq!(lp.step(), TypingStep { display: "H".into(), delay_ms: DELETE_MS });
        assert_eq!(lp.step(), TypingStep { display: "".into(), delay_ms: REST_MS });
        // Wrapped back to the same (only) string, typing again.
        assert_eq!(lp.step(), TypingStep { display: "H".into(), delay_ms: TYPE_MS });
    }

    #[test]
    fn non_ascii_targets_step_on_char_boundaries() {
        let mut lp = TypingLoop::new(texts(&["A • B"])).unwrap();
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(lp.step().display);
        }
        assert_eq!(seen, vec!["A", "A ", "A •", "A • ", "A • B"]);
    }

    #[test]
    fn mobile_rotation_is_a_front_slice_of_the_full_one() {
        let full = subtitle_texts(false);
        let mobile = subtitle_texts(true);
        assert!(mobile.len() < full.len());
        assert_eq!(&full[..mobile.len()], &mobile[..]);
    }
}
