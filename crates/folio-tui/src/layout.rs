//! Page geometry.
//!
//! The page is one tall document scrolled under a fixed nav bar. Section
//! heights depend only on the config and the terminal width, so the reducer
//! and the renderer agree on where everything is.

use folio_core::config::Config;
use folio_core::page::{Extent, SectionAnchor};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Rows taken by the nav bar above the scrolled page.
pub const NAV_HEIGHT: u16 = 1;
/// Horizontal padding on each side of the page.
pub const MARGIN: u16 = 2;

pub const HERO_HEIGHT: u16 = 9;
/// Section title plus the blank row under it.
pub const HEADER_ROWS: u16 = 2;
pub const STAT_ROWS: u16 = 2;
pub const SKILL_ROWS: u16 = 2;
pub const FIELD_ROWS: u16 = 3;
/// Submit button plus its status line.
pub const SUBMIT_ROWS: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    Home,
    About,
    Skills,
    Contact,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Home,
        Section::About,
        Section::Skills,
        Section::Contact,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::About => "about",
            Section::Skills => "skills",
            Section::Contact => "contact",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::About => "About",
            Section::Skills => "Skills",
            Section::Contact => "Contact",
        }
    }

    pub fn from_id(id: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.id() == id)
    }

    /// Maps `'1'..='4'` to a section.
    pub fn from_digit(c: char) -> Option<Section> {
        let index = c.to_digit(10)?.checked_sub(1)?;
        Section::ALL.get(index as usize).copied()
    }
}

/// Things that animate in once they scroll into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RevealKey {
    Section(Section),
    /// One card in the about stats row.
    StatCard(usize),
    /// Starts the stat counters.
    Stats,
    /// Starts filling the skill bars.
    Skills,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    pub width: u16,
    pub sections: Vec<(Section, Extent)>,
    pub bio: Vec<String>,
    pub stats: Extent,
    pub stat_count: usize,
    pub skills: Extent,
    pub total_height: u16,
}

impl PageLayout {
    pub fn compute(config: &Config, width: u16) -> Self {
        let inner = width.saturating_sub(MARGIN * 2).max(1);
        let bio = wrap(&config.about, inner);
        let bio_rows = bio.len() as u16;
        let skill_rows = SKILL_ROWS.saturating_mul(config.skills.len() as u16);

        let heights = [
            (Section::Home, HERO_HEIGHT),
            (Section::About, HEADER_ROWS + bio_rows + 1 + STAT_ROWS + 1),
            (Section::Skills, HEADER_ROWS + skill_rows + 1),
            (Section::Contact, HEADER_ROWS + FIELD_ROWS * 4 + SUBMIT_ROWS + 1),
        ];

        let mut sections = Vec::with_capacity(heights.len());
        let mut top: u16 = 0;
        for (section, height) in heights {
            sections.push((section, Extent::new(top, height)));
            top = top.saturating_add(height);
        }

        let about_top = sections[1].1.top;
        let skills_top = sections[2].1.top;

        Self {
            width,
            stats: Extent::new(about_top + HEADER_ROWS + bio_rows + 1, STAT_ROWS),
            stat_count: config.stats.len(),
            skills: Extent::new(skills_top + HEADER_ROWS, skill_rows),
            bio,
            sections,
            total_height: top,
        }
    }

    pub fn section(&self, section: Section) -> Extent {
        self.sections
            .iter()
            .find(|(s, _)| *s == section)
            .map(|(_, e)| *e)
            .unwrap_or_default()
    }

    pub fn anchors(&self) -> Vec<SectionAnchor> {
        self.sections
            .iter()
            .map(|(s, e)| SectionAnchor::new(s.id(), e.top))
            .collect()
    }

    /// Extent of every reveal target.
    pub fn elements(&self) -> Vec<(RevealKey, Extent)> {
        let mut elements: Vec<(RevealKey, Extent)> = self
            .sections
            .iter()
            .map(|(s, e)| (RevealKey::Section(*s), *e))
            .collect();
        elements.extend((0..self.stat_count).map(|i| (RevealKey::StatCard(i), self.stats)));
        elements.push((RevealKey::Stats, self.section(Section::About)));
        elements.push((RevealKey::Skills, self.skills));
        elements
    }

    /// Largest scroll offset for a viewport `height` rows tall.
    pub fn max_scroll(&self, height: u16) -> u16 {
        self.total_height.saturating_sub(height)
    }
}

/// Greedy word wrap by display width. Words wider than `width` are split.
pub fn wrap(text: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word = word;
        while word.width() > width {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            let split = split_at_width(word, width);
            lines.push(word[..split].to_string());
            word = &word[split..];
        }
        if word.is_empty() {
            continue;
        }
        let needed = if line.is_empty() {
            word.width()
        } else {
            line.width() + 1 + word.width()
        };
        if needed > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Byte index of the longest prefix of `s` at most `width` columns wide,
/// always taking at least one char.
fn split_at_width(s: &str, width: usize) -> usize {
    let mut used = 0;
    for (idx, ch) in s.char_indices() {
        let w = ch.width().unwrap_or(0);
        if used + w > width && idx > 0 {
            return idx;
        }
        used += w;
    }
    s.len()
}
