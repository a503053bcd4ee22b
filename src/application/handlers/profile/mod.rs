//! Profile handlers.

mod complete_onboarding;

pub use complete_onboarding::{CompleteOnboardingCommand, CompleteOnboardingHandler};
