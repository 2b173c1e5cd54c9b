//! Navbar state derived from the scroll position.

use crate::config::ScrollConfig;

/// Where a section starts on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionAnchor {
    pub id: String,
    /// First row of the section.
    pub top: u16,
}

impl SectionAnchor {
    pub fn new(id: impl Into<String>, top: u16) -> Self {
        Self { id: id.into(), top }
    }
}

/// Navbar state for one scroll position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavState {
    /// The navbar uses its compact "scrolled" style.
    pub scrolled: bool,
    /// The back-to-top hint is visible.
    pub show_back_to_top: bool,
    /// Section whose link is highlighted.
    pub active_section: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ScrollSpy {
    config: ScrollConfig,
}

impl ScrollSpy {
    pub fn new(config: ScrollConfig) -> Self {
        Self { config }
    }

    pub fn update(&self, offset: u16, sections: &[SectionAnchor]) -> NavState {
        // Later sections win, so the last one reached is highlighted.
        let active_section = sections
            .iter()
            .rev()
            .find(|s| offset >= s.top.saturating_sub(self.config.active_offset))
            .map(|s| s.id.clone());

        NavState {
            scrolled: offset > self.config.scrolled_threshold,
            show_back_to_top: offset > self.config.back_to_top_threshold,
            active_section,
        }
    }
}
