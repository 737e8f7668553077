//! Scroll-triggered animation replay.
//!
//! Animated figures start paused and begin playing once they are scrolled
//! fully into view. A replay button restarts a figure's animation by
//! briefly swapping its class.

use serde::{Deserialize, Serialize};

/// Class held by a figure whose animation has not started.
pub const PAUSED_CLASS: &str = "pausedAnimation";
/// Class applied for one frame to restart an animation.
pub const REPLAY_CLASS: &str = "replayAnimation";

/// Vertical placement of an animated figure on the page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub top: f64,
    pub height: f64,
    pub paused: bool,
}

impl Figure {
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top,
            height,
            paused: true,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Whether the figure lies entirely inside the visible window.
    pub fn is_fully_visible(&self, scroll_offset: f64, viewport_height: f64) -> bool {
        self.top >= scroll_offset && self.bottom() <= scroll_offset + viewport_height
    }
}

/// Unpause every paused figure that is fully visible. Returns the indices
/// of the figures that started.
pub fn reveal_visible(figures: &mut [Figure], scroll_offset: f64, viewport_height: f64) -> Vec<usize> {
    let mut started = Vec::new();
    for (i, figure) in figures.iter_mut().enumerate() {
        if figure.paused && figure.is_fully_visible(scroll_offset, viewport_height) {
            figure.paused = false;
            started.push(i);
        }
    }
    started
}

/// Remove the paused class from a class attribute.
pub fn unpause_class(class_attribute: &str) -> String {
    class_attribute
        .split_whitespace()
        .filter(|c| *c != PAUSED_CLASS)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether a class attribute marks a paused figure.
pub fn is_paused_class(class_attribute: &str) -> bool {
    class_attribute.split_whitespace().any(|c| c == PAUSED_CLASS)
}

/// Class attributes to apply in order to restart a figure's animation.
pub fn replay_classes() -> [&'static str; 2] {
    [REPLAY_CLASS, ""]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_visible() {
        let mut figures = vec![
            Figure::new(100.0, 200.0),
            Figure::new(700.0, 200.0),
            Figure::new(50.0, 100.0),
        ];
        let started = reveal_visible(&mut figures, 80.0, 600.0);
        assert_eq!(started, vec![0]);
        assert!(!figures[0].paused);
        assert!(figures[1].paused);
        assert!(figures[2].paused);

        let started = reveal_visible(&mut figures, 500.0, 600.0);
        assert_eq!(started, vec![1]);
    }

    #[test]
    fn test_already_playing_is_not_restarted() {
        let mut figures = vec![Figure::new(0.0, 100.0)];
        assert_eq!(reveal_visible(&mut figures, 0.0, 500.0), vec![0]);
        assert!(reveal_visible(&mut figures, 0.0, 500.0).is_empty());
    }

    #[test]
    fn test_exact_fit_is_visible() {
        let figure = Figure::new(100.0, 500.0);
        assert!(figure.is_fully_visible(100.0, 500.0));
        assert!(!figure.is_fully_visible(100.0, 499.0));
    }

    #[test]
    fn test_unpause_class() {
        assert_eq!(unpause_class("wide pausedAnimation"), "wide");
        assert_eq!(unpause_class("pausedAnimation"), "");
        assert!(is_paused_class("a pausedAnimation b"));
        assert!(!is_paused_class("pausedAnimations"));
    }

    #[test]
    fn test_replay_classes() {
        assert_eq!(replay_classes(), ["replayAnimation", ""]);
    }
}
