//! Page state owned by the runtime and mutated only by the reducer.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use folio_core::config::Config;
use folio_core::contact::{ContactForm, Field, FieldErrors, SubmitTracker};
use folio_core::page::{CountUp, NavState, RevealTracker, ScrollSpy, SkillBar};

use crate::layout::{NAV_HEIGHT, PageLayout, RevealKey, Section};

/// Width assumed until the first frame reports the real size.
const INITIAL_WIDTH: u16 = 80;

/// Time for a skill bar to grow to its level.
pub const SKILL_FILL_DURATION: Duration = Duration::from_millis(1200);

/// A stat in the about section.
#[derive(Debug, Clone)]
pub struct Stat {
    pub label: String,
    pub counter: CountUp,
}

#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub should_quit: bool,
    /// Time of the latest tick.
    pub now: Instant,
    pub width: u16,
    pub height: u16,
    pub layout: PageLayout,
    /// First page row shown under the nav bar.
    pub scroll: u16,
    pub nav: NavState,
    pub menu_open: bool,
    /// Current typewriter text in the hero.
    pub typed: String,
    pub form: ContactForm,
    pub errors: FieldErrors,
    /// Field receiving keystrokes, if the form is focused.
    pub focus: Option<Field>,
    pub submit: SubmitTracker,
    pub reveal: RevealTracker<RevealKey>,
    /// When each revealed element becomes visible (reveal time plus stagger).
    pub revealed: BTreeMap<RevealKey, Instant>,
    pub stats: Vec<Stat>,
    pub skills: Vec<SkillBar>,
    spy: ScrollSpy,
}

impl AppState {
    pub fn new(config: Config, now: Instant) -> Self {
        let reveal_cfg = config.reveal.clone();
        let mut reveal = RevealTracker::new();
        for section in Section::ALL {
            reveal.observe(RevealKey::Section(section), reveal_cfg.threshold);
        }
        for i in 0..config.stats.len() {
            reveal.observe_with_delay(
                RevealKey::StatCard(i),
                reveal_cfg.threshold,
                reveal_cfg.stagger(i),
            );
        }
        reveal.observe(RevealKey::Stats, reveal_cfg.stats_threshold);
        reveal.observe(RevealKey::Skills, reveal_cfg.skills_threshold);

        let duration = config.counter.duration();
        let stats = config
            .stats
            .iter()
            .map(|s| Stat {
                label: s.label.clone(),
                counter: CountUp::new(s.count, duration),
            })
            .collect();
        let skills = config.skills.iter().map(SkillBar::from).collect();

        Self {
            layout: PageLayout::compute(&config, INITIAL_WIDTH),
            spy: ScrollSpy::new(config.scroll.clone()),
            config,
            should_quit: false,
            now,
            width: INITIAL_WIDTH,
            height: 0,
            scroll: 0,
            nav: NavState::default(),
            menu_open: false,
            typed: String::new(),
            form: ContactForm::default(),
            errors: FieldErrors::default(),
            focus: None,
            submit: SubmitTracker::new(),
            reveal,
            revealed: BTreeMap::new(),
            stats,
            skills,
        }
    }

    /// Rows available for the page under the nav bar.
    pub fn page_height(&self) -> u16 {
        self.height.saturating_sub(NAV_HEIGHT)
    }

    pub fn max_scroll(&self) -> u16 {
        self.layout.max_scroll(self.page_height())
    }

    /// How long `key` has been visible, or `None` if it is not yet.
    pub fn visible_for(&self, key: RevealKey) -> Option<Duration> {
        let at = *self.revealed.get(&key)?;
        self.now.checked_duration_since(at)
    }

    pub fn is_visible(&self, key: RevealKey) -> bool {
        self.visible_for(key).is_some()
    }

    /// Whether the skill bars are still growing.
    pub fn skills_filling(&self) -> bool {
        self.visible_for(RevealKey::Skills)
            .is_some_and(|elapsed| elapsed < SKILL_FILL_DURATION)
    }

    /// Displayed value of the `index`-th stat.
    pub fn stat_value(&self, index: usize) -> u64 {
        let Some(stat) = self.stats.get(index) else {
            return 0;
        };
        self.visible_for(RevealKey::Stats)
            .map_or(0, |elapsed| stat.counter.value_at(elapsed))
    }

    pub fn active_section(&self) -> Option<Section> {
        self.nav.active_section.as_deref().and_then(Section::from_id)
    }

    pub(crate) fn spy(&self) -> &ScrollSpy {
        &self.spy
    }
}
