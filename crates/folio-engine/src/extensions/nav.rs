// extensions/nav.rs
//
// Scroll-dependent navigation state: compact navbar, active link,
// back-to-top button, and anchor targets under the fixed navbar.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Navbar gets `scrolled` past this offset.
    pub scrolled_after_px: f32,
    /// A section becomes active this far before its top reaches the viewport top.
    pub active_lead_px: f32,
    /// Back-to-top button shows past this offset.
    pub scroll_top_after_px: f32,
    /// Height of the fixed navbar; anchor jumps stop this far above a section.
    pub navbar_height_px: f32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            scrolled_after_px: 100.0,
            active_lead_px: 200.0,
            scroll_top_after_px: 300.0,
            navbar_height_px: 80.0,
        }
    }
}

pub const SCROLLED_CLASS: &str = "scrolled";
pub const ACTIVE_CLASS: &str = "active";
pub const SHOW_CLASS: &str = "show";

/// A page section's anchor id and document offset.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionPos {
    pub id: String,
    pub top: f32,
}

/// Everything the navigation chrome shows for one scroll position.
#[derive(Debug, Clone, PartialEq)]
pub struct NavState {
    pub scrolled: bool,
    /// Id of the section whose link is highlighted.
    pub active: Option<String>,
    pub show_scroll_top: bool,
}

impl NavConfig {
    pub fn is_scrolled(&self, scroll_y: f32) -> bool {
        scroll_y > self.scrolled_after_px
    }

    pub fn show_scroll_top(&self, scroll_y: f32) -> bool {
        scroll_y > self.scroll_top_after_px
    }

    /// The last section (in document order) whose top, less the lead, has been
    /// scrolled past.
    pub fn active_section<'a>(&self, scroll_y: f32, sections: &'a [SectionPos]) -> Option<&'a str> {
        sections
            .iter()
            .rev()
            .find(|s| scroll_y >= s.top - self.active_lead_px)
            .map(|s| s.id.as_str())
    }

    /// Scroll offset that puts a section just below the navbar.
    pub fn anchor_target(&self, section_top: f32) -> f32 {
        (section_top - self.navbar_height_px).max(0.0)
    }

    pub fn state(&self, scroll_y: f32, sections: &[SectionPos]) -> NavState {
        NavState {
            scrolled: self.is_scrolled(scroll_y),
            active: self.active_section(scroll_y, sections).map(str::to_string),
            show_scroll_top: self.show_scroll_top(scroll_y),
        }
    }
}

impl NavState {
    /// Whether the link with `href` is highlighted. With no active section, none is.
    pub fn is_active_link(&self, href: &str) -> bool {
        match (self.active.as_deref(), anchor_id(href)) {
            (Some(active), Some(id)) => active == id,
            _ => false,
        }
    }
}

/// `#about` -> `about`. None for anything that is not an in-page anchor.
pub fn anchor_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<SectionPos> {
        [("home", 0.0), ("about", 900.0), ("skills", 1800.0)]
            .into_iter()
            .map(|(id, top)| SectionPos { id: id.to_string(), top })
            .collect()
    }

    #[test]
    fn thresholds_are_strict() {
        let nav = NavConfig::default();
        assert!(!nav.is_scrolled(100.0));
        assert!(nav.is_scrolled(100.5));
        assert!(!nav.show_scroll_top(300.0));
        assert!(nav.show_scroll_top(301.0));
    }

    #[test]
    fn active_section_leads_by_200px() {
        let nav = NavConfig::default();
        let s = sections();
        assert_eq!(nav.active_section(0.0, &s), Some("home"));
        assert_eq!(nav.active_section(699.0, &s), Some("home"));
        assert_eq!(nav.active_section(700.0, &s), Some("about"));
        assert_eq!(nav.active_section(5000.0, &s), Some("skills"));
        assert_eq!(nav.active_section(0.0, &[]), None);
    }

    #[test]
    fn anchor_jump_clears_the_navbar() {
        let nav = NavConfig::default();
        assert_eq!(nav.anchor_target(900.0), 820.0);
        assert_eq!(nav.anchor_target(20.0), 0.0);
        assert_eq!(anchor_id("#about"), Some("about"));
        assert_eq!(anchor_id("#"), None);
        assert_eq!(anchor_id("https://example.com"), None);
    }

    #[test]
    fn state_bundles_everything() {
        let nav = NavConfig::default();
        let state = nav.state(1000.0, &sections());
        assert!(state.scrolled);
        assert!(state.show_scroll_top);
        assert_eq!(state.active.as_deref(), Some("about"));
    }

    #[test]
    fn no_link_stays_active_above_every_section() {
        let nav = NavConfig::default();
        let s: Vec<SectionPos> = sections().into_iter().skip(1).collect();
        let state = nav.state(0.0, &s);
        assert_eq!(state.active, None);
        assert!(!state.is_active_link("#about"));
        assert!(!state.is_active_link("#skills"));

        let state = nav.state(1000.0, &s);
        assert!(state.is_active_link("#about"));
        assert!(!state.is_active_link("#skills"));
        assert!(!state.is_active_link("#"));
    }
}
