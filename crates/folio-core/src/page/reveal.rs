//! Observe-once visibility tracking.
//!
//! Elements register with a visibility threshold. The first time enough of an
//! element is inside the viewport it is reported and forgotten, so each
//! element animates in exactly once.

use std::collections::BTreeMap;
use std::time::Duration;

/// A vertical span of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Extent {
    pub top: u16,
    pub height: u16,
}

impl Extent {
    pub fn new(top: u16, height: u16) -> Self {
        Self { top, height }
    }

    pub fn bottom(self) -> u32 {
        u32::from(self.top) + u32::from(self.height)
    }
}

/// Fraction of `element` inside `viewport`, from 0.0 to 1.0.
///
/// A zero-height element counts as fully visible when its row is inside the
/// viewport.
pub fn visibility_ratio(element: Extent, viewport: Extent) -> f64 {
    let top = u32::from(element.top).max(u32::from(viewport.top));
    if element.height == 0 {
        let inside =
            element.top >= viewport.top && u32::from(element.top) < viewport.bottom();
        return if inside { 1.0 } else { 0.0 };
    }
    let bottom = element.bottom().min(viewport.bottom());
    let visible = bottom.saturating_sub(top);
    f64::from(visible) / f64::from(element.height)
}

#[derive(Debug, Clone)]
struct Watch {
    threshold: f64,
    delay: Duration,
}

/// Tracks which elements still wait to be revealed.
#[derive(Debug, Clone, Default)]
pub struct RevealTracker<K: Ord> {
    watching: BTreeMap<K, Watch>,
}

impl<K: Ord + Clone> RevealTracker<K> {
    pub fn new() -> Self {
        Self {
            watching: BTreeMap::new(),
        }
    }

    /// Starts watching `key`. Re-observing replaces the previous settings.
    pub fn observe(&mut self, key: K, threshold: f64) {
        self.observe_with_delay(key, threshold, Duration::ZERO);
    }

    /// Starts watching `key`; once revealed it should appear after `delay`.
    pub fn observe_with_delay(&mut self, key: K, threshold: f64, delay: Duration) {
        self.watching.insert(key, Watch { threshold, delay });
    }

    pub fn is_watching(&self, key: &K) -> bool {
        self.watching.contains_key(key)
    }

    pub fn watching(&self) -> usize {
        self.watching.len()
    }

    /// Checks each element's extent against the viewport.
    ///
    /// Returns the newly revealed keys with their stagger delay and stops
    /// watching them. Elements not being watched are ignored.
    pub fn check<'a, I>(&mut self, viewport: Extent, elements: I) -> Vec<(K, Duration)>
    where
        I: IntoIterator<Item = (&'a K, Extent)>,
        K: 'a,
    {
        let mut revealed = Vec::new();
        for (key, extent) in elements {
            let Some(watch) = self.watching.get(key) else {
                continue;
            };
            if visibility_ratio(extent, viewport) >= watch.threshold {
                revealed.push((key.clone(), watch.delay));
            }
        }
        for (key, _) in &revealed {
            self.watching.remove(key);
        }
        revealed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_full_partial_and_none() {
        let viewport = Extent::new(10, 20);

        assert!((visibility_ratio(Extent::new(12, 4), viewport) - 1.0).abs() < f64::EPSILON);
        assert!((visibility_ratio(Extent::new(5, 10), viewport) - 0.5).abs() < f64::EPSILON);
        assert!((visibility_ratio(Extent::new(25, 10), viewport) - 0.5).abs() < f64::EPSILON);
        assert!(visibility_ratio(Extent::new(30, 5), viewport).abs() < f64::EPSILON);
        assert!(visibility_ratio(Extent::new(0, 10), viewport).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ratio_zero_height() {
        let viewport = Extent::new(10, 5);
        assert!((visibility_ratio(Extent::new(12, 0), viewport) - 1.0).abs() < f64::EPSILON);
        assert!(visibility_ratio(Extent::new(15, 0), viewport).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reveals_once_at_threshold() {
        let mut tracker = RevealTracker::new();
        tracker.observe("skills", 0.3);

        let key = "skills";
        // 2 of 10 rows visible: below threshold.
        let hidden = tracker.check(Extent::new(0, 22), [(&key, Extent::new(20, 10))]);
        assert!(hidden.is_empty());
        assert!(tracker.is_watching(&"skills"));

        // 3 of 10 rows visible: exactly at threshold.
        let shown = tracker.check(Extent::new(0, 23), [(&key, Extent::new(20, 10))]);
        assert_eq!(shown, vec![("skills", Duration::ZERO)]);
        assert!(!tracker.is_watching(&"skills"));

        let again = tracker.check(Extent::new(0, 40), [(&key, Extent::new(20, 10))]);
        assert!(again.is_empty());
    }

    #[test]
    fn test_stagger_delay_is_reported() {
        let mut tracker = RevealTracker::new();
        tracker.observe_with_delay(1_u32, 0.12, Duration::ZERO);
        tracker.observe_with_delay(2_u32, 0.12, Duration::from_millis(120));
        assert_eq!(tracker.watching(), 2);

        let elements = [(1_u32, Extent::new(0, 4)), (2_u32, Extent::new(4, 4))];
        let revealed = tracker.check(
            Extent::new(0, 10),
            elements.iter().map(|(k, e)| (k, *e)),
        );

        assert_eq!(
            revealed,
            vec![(1, Duration::ZERO), (2, Duration::from_millis(120))]
        );
        assert_eq!(tracker.watching(), 0);
    }
}
