//! Dynamic Profile aggregate and its merge policy.

mod profile;
mod update;

pub use profile::{
    LearningVelocity, Profile, SessionDepth, DEFAULT_EXPERIENCE_LEVEL, DEFAULT_PREFERRED_STYLE,
    DEFAULT_THINKING_STYLE,
};
pub use update::{
    ProfileUpdate, MISTAKE_PATTERN_CAP, RECENT_HINT_CAP, RECENT_WEAKNESS_CAP,
};
