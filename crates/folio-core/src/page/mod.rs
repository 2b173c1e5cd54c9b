//! Scroll-driven page behaviour.
//!
//! Everything here is plain geometry and timing over rows and durations;
//! the TUI decides what a row is and when time passes.

pub mod counter;
pub mod reveal;
pub mod scroll;
pub mod skills;

pub use counter::{CountUp, ease_out_cubic};
pub use reveal::{Extent, RevealTracker, visibility_ratio};
pub use scroll::{NavState, ScrollSpy, SectionAnchor};
pub use skills::SkillBar;
