//! Quest screens and the text slots written into them

use std::fmt;

use serde::{Deserialize, Serialize};

/// One mutually exclusive screen of the party quest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScreenId {
    /// Title screen with the start button
    Landing,
    /// Hero name input
    NameEntry,
    /// First branch: how to get past the party guests
    PathChoice,
    /// Outcome of the path choice
    PathResult,
    /// Cake guardian encounter
    BossLevel,
    /// Cake found
    Victory,
    /// Victory selfie
    Selfie,
}

impl ScreenId {
    /// Every screen, in quest order
    pub const ALL: [ScreenId; 7] = [
        ScreenId::Landing,
        ScreenId::NameEntry,
        ScreenId::PathChoice,
        ScreenId::PathResult,
        ScreenId::BossLevel,
        ScreenId::Victory,
        ScreenId::Selfie,
    ];

    /// Element id of the screen container on the page
    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenId::Landing => "landing",
            ScreenId::NameEntry => "nameEntry",
            ScreenId::PathChoice => "pathChoice",
            ScreenId::PathResult => "pathResult",
            ScreenId::BossLevel => "bossLevel",
            ScreenId::Victory => "victory",
            ScreenId::Selfie => "selfie",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|screen| screen.as_str() == s)
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text elements the controller fills in before showing a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextSlot {
    /// Hero name on the path choice screen
    PlayerName,
    /// Heading of the path result
    ResultTitle,
    /// Body of the path result
    ResultText,
    /// Hero name on the victory screen
    FinalName,
    /// Hero name on the selfie screen
    SelfieHero,
}

impl TextSlot {
    /// Element id of the slot on the page
    pub fn as_str(&self) -> &'static str {
        match self {
            TextSlot::PlayerName => "playerName",
            TextSlot::ResultTitle => "resultTitle",
            TextSlot::ResultText => "resultText",
            TextSlot::FinalName => "finalName",
            TextSlot::SelfieHero => "selfieHero",
        }
    }
}
