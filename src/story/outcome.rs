//! Static branch table: which choice leads where
//!
//! Keys are the `data-choice` values the quest buttons carry.

use super::screen::ScreenId;

/// Resolution of a single choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Heading shown on the next screen (path choices only)
    pub title: Option<&'static str>,
    /// Narrative text for the choice
    pub text: &'static str,
    /// Screen shown after the choice resolves
    pub next: ScreenId,
}

/// (screen, choice key) -> outcome
static OUTCOMES: [(ScreenId, &str, Outcome); 6] = [
    (
        ScreenId::PathChoice,
        "balloon",
        Outcome {
            title: Some("🦕 Balloon Army Encounter!"),
            text: "You tried to sneak past, but they popped in protest. You are now covered in confetti. Stylish.",
            next: ScreenId::PathResult,
        },
    ),
    (
        ScreenId::PathChoice,
        "dance",
        Outcome {
            title: Some("💃 Dance Battle Royale!"),
            text: "You broke out the worm. Aunt Karen countered with the Macarena. It's a draw. She lets you pass.",
            next: ScreenId::PathResult,
        },
    ),
    (
        ScreenId::PathChoice,
        "bribe",
        Outcome {
            title: Some("🍬 Piñata Negotiations!"),
            text: "He accepts your candy bribe... then explodes with joy (and more candy). Success!",
            next: ScreenId::PathResult,
        },
    ),
    (
        ScreenId::BossLevel,
        "juice",
        Outcome {
            title: None,
            text: "The toddler accepts your juice box tribute and waddles away happily. Victory!",
            next: ScreenId::Victory,
        },
    ),
    (
        ScreenId::BossLevel,
        "bubbles",
        Outcome {
            title: None,
            text: "The bubbles mesmerize the sugar-rushed guardian. They float away chasing bubbles. Genius!",
            next: ScreenId::Victory,
        },
    ),
    (
        ScreenId::BossLevel,
        "reason",
        Outcome {
            title: None,
            text: "You tried to reason with a sugar-rushed toddler. Surprisingly, they understood and shared the cake. Miracle!",
            next: ScreenId::Victory,
        },
    ),
];

/// Look up the outcome of `key` on `screen`
pub fn resolve(screen: ScreenId, key: &str) -> Option<&'static Outcome> {
    OUTCOMES
        .iter()
        .find(|(s, k, _)| *s == screen && *k == key)
        .map(|(_, _, outcome)| outcome)
}

/// Choice keys available on `screen`
pub fn choices(screen: ScreenId) -> impl Iterator<Item = &'static str> {
    OUTCOMES
        .iter()
        .filter(move |(s, _, _)| *s == screen)
        .map(|(_, key, _)| *key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dance_outcome() {
        let outcome = resolve(ScreenId::PathChoice, "dance").unwrap();
        assert_eq!(outcome.title, Some("💃 Dance Battle Royale!"));
        assert!(outcome.text.starts_with("You broke out the worm."));
        assert_eq!(outcome.next, ScreenId::PathResult);
    }

    #[test]
    fn test_keys_are_scoped_to_their_screen() {
        assert!(resolve(ScreenId::BossLevel, "dance").is_none());
        assert!(resolve(ScreenId::PathChoice, "juice").is_none());
        assert!(resolve(ScreenId::Landing, "balloon").is_none());
    }

    #[test]
    fn test_every_branch_screen_is_total_over_its_buttons() {
        let paths: Vec<_> = choices(ScreenId::PathChoice).collect();
        assert_eq!(paths, ["balloon", "dance", "bribe"]);
        let boss: Vec<_> = choices(ScreenId::BossLevel).collect();
        assert_eq!(boss, ["juice", "bubbles", "reason"]);
        for key in boss {
            assert_eq!(resolve(ScreenId::BossLevel, key).unwrap().next, ScreenId::Victory);
        }
    }
}
