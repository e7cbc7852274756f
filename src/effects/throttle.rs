//! Leading-edge rate limiter for scroll/resize handlers. The caller feeds
//! a monotonic `now` in milliseconds, which keeps the policy testable
//! without wall-clock timers.

pub const SCROLL_WINDOW_MS: f64 = 16.0;
pub const RESIZE_WINDOW_MS: f64 = 100.0;

#[derive(Debug)]
pub struct Throttle {
    window_ms: f64,
    last_admitted: Option<f64>,
}

impl Throttle {
    pub fn new(window_ms: f64) -> Self {
        Throttle {
            window_ms,
            last_admitted: None,
        }
    }

    /// At most one admission per window; everything else is dropped.
    pub fn admit(&mut self, now_ms: f64) -> bool {
        match self.last_admitted {
            Some(last) if now_ms - last < self.window_ms => false,
            _ => {
                self.last_admitted = Some(now_ms);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_call_is_admitted() {
        let mut gate = Throttle::new(16.0);
        assert!(gate.admit(0.0));
    }

    #[test]
    fn calls_inside_the_window_are_dropped() {
        let mut gate = Throttle::new(16.0);
        assert!(gate.admit(0.0));
        assert!(!gate.admit(5.0));
        assert!(!gate.admit(15.9));
        assert!(gate.admit(16.0));
    }

    #[test]
    fn at_most_one_admission_per_window() {
        let mut gate = Throttle::new(100.0);
        let admitted = (0..1000)
            .map(|t| gate.admit(t as f64))
            .filter(|&ok| ok)
            .count();
        assert_eq!(admitted, 10);
    }
}
