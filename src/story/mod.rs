//! Party quest: a choose-your-own-adventure in seven screens
//!
//! Screen flow:
//! landing → nameEntry → pathChoice → pathResult → bossLevel → victory → {selfie | landing}

pub mod controller;
pub mod outcome;
pub mod page;
pub mod screen;

pub use controller::{StoryAction, StoryController, StoryEvent};
pub use outcome::{Outcome, resolve};
pub use page::{RecordingPage, StoryPage};
pub use screen::{ScreenId, TextSlot};
