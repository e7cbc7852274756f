//! Scroll-derived state: progress indicator, navbar visibility, parallax
//! factors, active-section resolution.

/// `scrolled` styling kicks in past this offset.
pub const NAVBAR_SCROLLED_AT: f64 = 50.0;
/// The navbar only auto-hides once scrolled past this point.
pub const NAVBAR_HIDE_AFTER: f64 = 100.0;
/// Direction changes smaller than this band do not flip the navbar.
pub const NAVBAR_HYSTERESIS: f64 = 10.0;

pub const HEADER_PARALLAX: f64 = 0.3;
pub const PARTICLES_PARALLAX: f64 = 0.1;
pub const SHAPE_SPIN_DEG_PER_PX: f64 = 0.1;

/// The active-section probe sits this far below the top of the viewport.
pub const ACTIVE_SECTION_LEAD: f64 = 100.0;

/// Scroll-progress percentage for the top indicator, clamped to [0, 100].
/// Documents no taller than the viewport report 0 rather than dividing by
/// a non-positive span.
pub fn progress_percent(scroll_top: f64, scroll_height: f64, client_height: f64) -> f64 {
    let span = scroll_height - client_height;
    if span <= 0.0 {
        return 0.0;
    }
    (scroll_top / span * 100.0).clamp(0.0, 100.0)
}

/// Per-shape parallax speed, growing with the shape's index.
pub fn shape_parallax(index: usize) -> f64 {
    0.2 + index as f64 * 0.1
}

/// What the scroll handler should apply to the navbar this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavbarFrame {
    pub scrolled: bool,
    pub hidden: bool,
}

/// Direction-aware navbar visibility. The hysteresis band keeps sub-pixel
/// scroll jitter from flapping the bar while still updating the reference
/// offset on every call.
#[derive(Debug)]
pub struct NavbarState {
    last_scroll_top: f64,
    hidden: bool,
}

impl NavbarState {
    pub fn new() -> Self {
        NavbarState {
            last_scroll_top: 0.0,
            hidden: false,
        }
    }

    pub fn update(&mut self, scroll_top: f64) -> NavbarFrame {
        let delta = scroll_top - self.last_scroll_top;
        self.last_scroll_top = scroll_top;

        if scroll_top <= NAVBAR_HIDE_AFTER {
            self.hidden = false;
        } else if delta > NAVBAR_HYSTERESIS {
            self.hidden = true;
        } else if delta < -NAVBAR_HYSTERESIS {
            self.hidden = false;
        }

        NavbarFrame {
            scrolled: scroll_top > NAVBAR_SCROLLED_AT,
            hidden: self.hidden,
        }
    }
}

impl Default for NavbarState {
    fn default() -> Self {
        Self::new()
    }
}

/// Index of the section whose vertical span `(top, height)` contains the
/// probe line (scroll position plus the fixed lead).
pub fn active_section(scroll_top: f64, spans: &[(f64, f64)]) -> Option<usize> {
    let probe = scroll_top + ACTIVE_SECTION_LEAD;
    spans
        .iter()
        .position(|&(top, height)| probe >= top && probe < top + height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_stays_within_bounds() {
        assert_eq!(progress_percent(0.0, 2000.0, 800.0), 0.0);
        assert_eq!(progress_percent(600.0, 2000.0, 800.0), 50.0);
        assert_eq!(progress_percent(1200.0, 2000.0, 800.0), 100.0);
        // Rounding overshoot must clamp, not exceed 100.
        assert_eq!(progress_percent(1200.5, 2000.0, 800.0), 100.0);
        assert_eq!(progress_percent(-5.0, 2000.0, 800.0), 0.0);
    }

    #[test]
    fn degenerate_document_heights_report_zero() {
        assert_eq!(progress_percent(100.0, 800.0, 800.0), 0.0);
        assert_eq!(progress_percent(100.0, 600.0, 800.0), 0.0);
    }

    #[test]
    fn navbar_hides_scrolling_down_and_shows_scrolling_up() {
        let mut nav = NavbarState::new();
        assert_eq!(
            nav.update(30.0),
            NavbarFrame { scrolled: false, hidden: false }
        );
        let frame = nav.update(300.0);
        assert!(frame.scrolled && frame.hidden);
        let frame = nav.update(250.0);
        assert!(frame.scrolled && !frame.hidden);
    }

    #[test]
    fn jitter_inside_the_band_keeps_the_current_state() {
        let mut nav = NavbarState::new();
        nav.update(400.0);
        assert!(nav.update(405.0).hidden);
        assert!(nav.update(398.0).hidden);
        // A real upward move leaves the band.
        assert!(!nav.update(380.0).hidden);
    }

    #[test]
    fn navbar_always_shows_near_the_top() {
        let mut nav = NavbarState::new();
        nav.update(500.0);
        assert!(nav.update(560.0).hidden);
        let frame = nav.update(80.0);
        assert!(!frame.hidden);
    }

    #[test]
    fn active_section_tracks_the_probe_line() {
        let spans = [(0.0, 400.0), (400.0, 600.0), (1000.0, 500.0)];
        assert_eq!(active_section(0.0, &spans), Some(0));
        assert_eq!(active_section(350.0, &spans), Some(1));
        assert_eq!(active_section(950.0, &spans), Some(2));
        assert_eq!(active_section(2000.0, &spans), None);
        assert_eq!(active_section(0.0, &[]), None);
    }

    #[test]
    fn shape_speeds_grow_with_index() {
        assert!((shape_parallax(0) - 0.2).abs() < 1e-9);
        assert!((shape_parallax(3) - 0.5).abs() < 1e-9);
    }
}
