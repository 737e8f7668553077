//! Code walkthrough highlighting.
//!
//! Hovering a line of a code listing highlights the matching drawing step:
//! earlier steps are dimmed as done, the hovered step is current and later
//! steps are upcoming.

use serde::{Deserialize, Serialize};

/// Prefix of the element ids carrying a step number (`hover3`).
pub const HOVER_ID_PREFIX: &str = "hover";

/// Hint shown above the listing on pointer devices.
pub const HOVER_HINT: &str = "Hover the code below";
/// Hint shown above the listing on touch devices.
pub const TOUCH_HINT: &str = "Tap the code below";

/// Hint text for the current input device.
pub fn hint_text(touch: bool) -> &'static str {
    if touch { TOUCH_HINT } else { HOVER_HINT }
}

/// Step number named by a hovered element id.
pub fn hovered_step(id: &str) -> Option<usize> {
    id.get(HOVER_ID_PREFIX.len()..)?.parse().ok()
}

/// Render state of a step in the drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepState {
    /// No line is hovered.
    #[default]
    Idle,
    Previous,
    Current,
    Upcoming,
}

impl StepState {
    /// Class attribute for the step element, if any.
    pub fn class(self) -> Option<&'static str> {
        match self {
            StepState::Idle => None,
            StepState::Previous => Some("previous"),
            StepState::Current => Some("current"),
            StepState::Upcoming => Some("upcoming"),
        }
    }
}

/// Render state of a step's marker dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DotState {
    #[default]
    Dot,
    CurrentDot,
}

impl DotState {
    pub fn class(self) -> &'static str {
        match self {
            DotState::Dot => "dot",
            DotState::CurrentDot => "currentDot",
        }
    }
}

/// Render state of a whole walkthrough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkthroughFrame {
    pub steps: Vec<StepState>,
    pub dots: Vec<DotState>,
    pub hint_visible: bool,
}

/// A walkthrough with a fixed number of steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walkthrough {
    step_count: usize,
}

impl Walkthrough {
    pub fn new(step_count: usize) -> Self {
        Self { step_count }
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Frame while step `hovered` is hovered.
    pub fn hover(&self, hovered: usize) -> WalkthroughFrame {
        let steps = (0..self.step_count)
            .map(|i| match i.cmp(&hovered) {
                std::cmp::Ordering::Less => StepState::Previous,
                std::cmp::Ordering::Equal => StepState::Current,
                std::cmp::Ordering::Greater => StepState::Upcoming,
            })
            .collect();
        let dots = (0..self.step_count)
            .map(|i| if i == hovered { DotState::CurrentDot } else { DotState::Dot })
            .collect();
        WalkthroughFrame {
            steps,
            dots,
            hint_visible: false,
        }
    }

    /// Frame for a hovered element id. Ids without a step number leave the
    /// walkthrough idle.
    pub fn hover_id(&self, id: &str) -> WalkthroughFrame {
        match hovered_step(id) {
            Some(step) => self.hover(step),
            None => self.leave(),
        }
    }

    /// Frame once the pointer leaves the listing.
    pub fn leave(&self) -> WalkthroughFrame {
        WalkthroughFrame {
            steps: vec![StepState::Idle; self.step_count],
            dots: vec![DotState::Dot; self.step_count],
            hint_visible: true,
        }
    }
}

/// Which of the two equivalent code listings is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PathFlavor {
    #[default]
    UiBezierPath,
    CgPath,
}

impl PathFlavor {
    pub const ALL: [PathFlavor; 2] = [PathFlavor::UiBezierPath, PathFlavor::CgPath];

    /// Flavor named by a code listing's class, e.g. `"cgpath"`.
    pub fn parse(class: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.prefix() == class.trim())
    }

    /// Class prefix shared by the segment and code elements of this flavor.
    fn prefix(self) -> &'static str {
        match self {
            PathFlavor::UiBezierPath => "uibezier",
            PathFlavor::CgPath => "cgpath",
        }
    }

    pub fn other(self) -> Self {
        match self {
            PathFlavor::UiBezierPath => PathFlavor::CgPath,
            PathFlavor::CgPath => PathFlavor::UiBezierPath,
        }
    }

    /// Class identifying this flavor's drawing segments.
    pub fn segment_lookup(self) -> String {
        format!("{}Segment", self.prefix())
    }

    /// Class identifying this flavor's code lines.
    pub fn code_lookup(self) -> &'static str {
        self.prefix()
    }

    /// Class attribute of this flavor's drawing segments while `selected` is shown.
    pub fn segment_class(self, selected: PathFlavor) -> String {
        let base = format!("{}Segment segment", self.prefix());
        if self == selected {
            format!("{} selectedSegment", base)
        } else {
            base
        }
    }

    /// Class attribute of this flavor's code lines while `selected` is shown.
    pub fn code_class(self, selected: PathFlavor) -> String {
        if self == selected {
            self.prefix().to_string()
        } else {
            format!("{} hidden", self.prefix())
        }
    }
}

/// Class attributes to write for one flavor when another (or the same) is
/// selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlavorClasses {
    pub flavor: PathFlavor,
    pub segment_lookup: String,
    pub segment: String,
    pub code_lookup: String,
    pub code: String,
}

/// Class updates for both listings after `selected` is chosen.
pub fn flavor_classes(selected: PathFlavor) -> Vec<FlavorClasses> {
    PathFlavor::ALL
        .into_iter()
        .map(|flavor| FlavorClasses {
            flavor,
            segment_lookup: flavor.segment_lookup(),
            segment: flavor.segment_class(selected),
            code_lookup: flavor.code_lookup().to_string(),
            code: flavor.code_class(selected),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hovered_step() {
        assert_eq!(hovered_step("hover3"), Some(3));
        assert_eq!(hovered_step("hover12"), Some(12));
        assert_eq!(hovered_step("hover"), None);
        assert_eq!(hovered_step("hoverX"), None);
        assert_eq!(hovered_step("ab"), None);
    }

    #[test]
    fn test_hover_frame() {
        let frame = Walkthrough::new(4).hover(2);
        assert_eq!(
            frame.steps,
            vec![
                StepState::Previous,
                StepState::Previous,
                StepState::Current,
                StepState::Upcoming
            ]
        );
        assert_eq!(
            frame.dots,
            vec![DotState::Dot, DotState::Dot, DotState::CurrentDot, DotState::Dot]
        );
        assert!(!frame.hint_visible);
    }

    #[test]
    fn test_hover_past_last_step() {
        let frame = Walkthrough::new(3).hover(9);
        assert!(frame.steps.iter().all(|s| *s == StepState::Previous));
        assert!(frame.dots.iter().all(|d| *d == DotState::Dot));
    }

    #[test]
    fn test_leave_resets() {
        let frame = Walkthrough::new(3).leave();
        assert!(frame.steps.iter().all(|s| s.class().is_none()));
        assert!(frame.dots.iter().all(|d| d.class() == "dot"));
        assert!(frame.hint_visible);
    }

    #[test]
    fn test_hover_id_without_number_is_idle() {
        let walkthrough = Walkthrough::new(2);
        assert_eq!(walkthrough.hover_id("codeBlock"), walkthrough.leave());
        assert_eq!(walkthrough.hover_id("hover0").steps[0], StepState::Current);
    }

    #[test]
    fn test_hint_text() {
        assert_eq!(hint_text(true), "Tap the code below");
        assert_eq!(hint_text(false), "Hover the code below");
    }

    #[test]
    fn test_path_flavor_classes() {
        let shown = PathFlavor::CgPath;
        assert_eq!(
            PathFlavor::CgPath.segment_class(shown),
            "cgpathSegment segment selectedSegment"
        );
        assert_eq!(
            PathFlavor::UiBezierPath.segment_class(shown),
            "uibezierSegment segment"
        );
        assert_eq!(PathFlavor::CgPath.code_class(shown), "cgpath");
        assert_eq!(PathFlavor::UiBezierPath.code_class(shown), "uibezier hidden");
        assert_eq!(shown.other(), PathFlavor::UiBezierPath);
    }

    #[test]
    fn test_parse_flavor() {
        assert_eq!(PathFlavor::parse("cgpath"), Some(PathFlavor::CgPath));
        assert_eq!(PathFlavor::parse("uibezier"), Some(PathFlavor::UiBezierPath));
        assert_eq!(PathFlavor::parse("cgpathSegment"), None);
        assert_eq!(PathFlavor::parse(""), None);
    }

    #[test]
    fn test_flavor_classes_select_one_listing() {
        let classes = flavor_classes(PathFlavor::CgPath);
        assert_eq!(classes.len(), 2);

        let uibezier = &classes[0];
        assert_eq!(uibezier.segment_lookup, "uibezierSegment");
        assert_eq!(uibezier.segment, "uibezierSegment segment");
        assert_eq!(uibezier.code_lookup, "uibezier");
        assert_eq!(uibezier.code, "uibezier hidden");

        let cgpath = &classes[1];
        assert_eq!(cgpath.segment, "cgpathSegment segment selectedSegment");
        assert_eq!(cgpath.code, "cgpath");

        // Every written class keeps the lookup class, so the toggle can run again.
        for c in flavor_classes(PathFlavor::UiBezierPath) {
            assert!(c.segment.split(' ').any(|x| x == c.segment_lookup));
            assert!(c.code.split(' ').any(|x| x == c.code_lookup));
        }
    }
}
