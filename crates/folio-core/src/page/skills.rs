use std::time::Duration;

use super::counter::ease_out_cubic;
use crate::config::SkillConfig;

/// A skill with a fill level in percent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillBar {
    pub name: String,
    level: u8,
}

impl SkillBar {
    /// Levels above 100 are clamped.
    pub fn new(name: impl Into<String>, level: u8) -> Self {
        Self {
            name: name.into(),
            level: level.min(100),
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    /// Fill percentage given how long ago the bar was revealed.
    ///
    /// Unrevealed bars are empty; revealed bars grow to their level over
    /// `transition`.
    pub fn fill_at(&self, revealed_for: Option<Duration>, transition: Duration) -> f64 {
        let Some(elapsed) = revealed_for else {
            return 0.0;
        };
        let progress = if transition.is_zero() {
            1.0
        } else {
            elapsed.as_secs_f64() / transition.as_secs_f64()
        };
        ease_out_cubic(progress) * f64::from(self.level)
    }

    /// Number of filled cells in a bar `width` cells wide.
    pub fn filled_cells(
        &self,
        width: u16,
        revealed_for: Option<Duration>,
        transition: Duration,
    ) -> u16 {
        let fill = self.fill_at(revealed_for, transition);
        ((fill / 100.0) * f64::from(width)).round() as u16
    }
}

impl From<&SkillConfig> for SkillBar {
    fn from(config: &SkillConfig) -> Self {
        Self::new(config.name.clone(), config.level)
    }
}
