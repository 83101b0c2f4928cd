//! Error types for the quest and the card form

use thiserror::Error;

use crate::card::CardField;
use crate::story::ScreenId;

/// Errors raised by the party quest controller
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoryError {
    /// The hero name input was blank.
    #[error("a hero needs a name")]
    EmptyHeroName,

    /// No outcome is mapped for this choice on the current screen.
    #[error("no outcome for choice '{key}' on screen '{screen}'")]
    UnknownChoice {
        /// Screen that was active when the choice was made.
        screen: ScreenId,
        /// The unmapped choice key.
        key: String,
    },

    /// The page has no container for the screen the quest needs.
    #[error("screen '{0}' is missing from the page")]
    MissingScreen(ScreenId),
}

/// Errors raised while validating the birthday card form
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardError {
    /// A required field was left blank.
    #[error("missing required field: {0}")]
    MissingField(CardField),
}
