//! Party quest controller
//!
//! Owns the narrative state (current screen, hero name) and drives a
//! [`StoryPage`]. Exactly one screen is active after every transition.

use super::outcome::{self, Outcome};
use super::page::StoryPage;
use super::screen::{ScreenId, TextSlot};
use crate::error::StoryError;

/// Side effects the page layer performs on the controller's behalf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryEvent {
    /// Rain confetti over the victory screen
    Confetti,
}

/// Button actions, as carried by `data-action` / `data-choice` attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoryAction {
    StartQuest,
    BeginJourney,
    ChoosePath(String),
    ShowBoss,
    DefeatBoss(String),
    TakeSelfie,
    Restart,
}

impl StoryAction {
    /// Parse a button's action attributes
    pub fn from_attrs(action: &str, choice: Option<&str>) -> Option<Self> {
        match (action, choice) {
            ("start-quest", _) => Some(StoryAction::StartQuest),
            ("begin-journey", _) => Some(StoryAction::BeginJourney),
            ("choose-path", Some(key)) => Some(StoryAction::ChoosePath(key.to_string())),
            ("show-boss", _) => Some(StoryAction::ShowBoss),
            ("defeat-boss", Some(key)) => Some(StoryAction::DefeatBoss(key.to_string())),
            ("take-selfie", _) => Some(StoryAction::TakeSelfie),
            ("restart", _) => Some(StoryAction::Restart),
            _ => None,
        }
    }
}

const WELCOME: &str = "Your mission, should you choose to accept it: Find the one true birthday cake and survive the party madness.";

/// Narrative state machine for the party quest
pub struct StoryController<P: StoryPage> {
    page: P,
    current: ScreenId,
    player_name: String,
    events: Vec<StoryEvent>,
}

impl<P: StoryPage> StoryController<P> {
    /// Create a controller and show the landing screen
    ///
    /// Fails when the page has no landing container.
    pub fn new(page: P) -> Result<Self, StoryError> {
        if !page.has_screen(ScreenId::Landing) {
            return Err(StoryError::MissingScreen(ScreenId::Landing));
        }
        let mut controller = Self {
            page,
            current: ScreenId::Landing,
            player_name: String::new(),
            events: Vec::new(),
        };
        controller.activate(ScreenId::Landing);
        Ok(controller)
    }

    pub fn current(&self) -> ScreenId {
        self.current
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    /// Take the events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<StoryEvent> {
        std::mem::take(&mut self.events)
    }

    /// Switch to the screen with element id `id`
    ///
    /// Unknown ids and screens missing from the page are logged and ignored;
    /// the active screen stays as it was. Returns whether the switch happened.
    pub fn show_screen(&mut self, id: &str) -> bool {
        match ScreenId::from_str(id) {
            Some(screen) => self.transition_to(screen),
            None => {
                log::error!("Screen not found: {}", id);
                false
            }
        }
    }

    /// Deactivate every other screen and activate `screen`
    pub fn transition_to(&mut self, screen: ScreenId) -> bool {
        if self.require(screen).is_err() {
            return false;
        }
        self.activate(screen);
        true
    }

    /// Check that the page can show `screen` before anything is written
    fn require(&self, screen: ScreenId) -> Result<(), StoryError> {
        if self.page.has_screen(screen) {
            Ok(())
        } else {
            log::error!("Screen not found: {}", screen);
            Err(StoryError::MissingScreen(screen))
        }
    }

    fn activate(&mut self, screen: ScreenId) {
        for other in ScreenId::ALL {
            if other != screen {
                self.page.set_screen_active(other, false);
            }
        }
        self.page.set_screen_active(screen, true);
        log::debug!("Switched screen {} -> {}", self.current, screen);
        self.current = screen;
    }

    pub fn start_quest(&mut self) -> Result<(), StoryError> {
        self.require(ScreenId::NameEntry)?;
        log::info!("Quest started");
        self.activate(ScreenId::NameEntry);
        Ok(())
    }

    /// Accept the hero name and move on to the first branch
    pub fn begin_journey(&mut self, input: &str) -> Result<(), StoryError> {
        let name = input.trim();
        if name.is_empty() {
            log::warn!("Rejected blank hero name");
            self.page.announce("A hero needs a name!");
            return Err(StoryError::EmptyHeroName);
        }
        self.require(ScreenId::PathChoice)?;

        self.player_name = name.to_string();
        self.page.set_text(TextSlot::PlayerName, name);
        self.page.announce(&format!("Welcome, {}. {}", name, WELCOME));
        self.activate(ScreenId::PathChoice);
        Ok(())
    }

    fn resolve(&self, key: &str) -> Result<&'static Outcome, StoryError> {
        let outcome = outcome::resolve(self.current, key).ok_or_else(|| {
            let known: Vec<_> = outcome::choices(self.current).collect();
            log::warn!("No outcome for '{}' on {} (known: {:?})", key, self.current, known);
            StoryError::UnknownChoice {
                screen: self.current,
                key: key.to_string(),
            }
        })?;
        self.require(outcome.next)?;
        Ok(outcome)
    }

    /// Resolve a path choice, fill in the result and show it
    pub fn choose_path(&mut self, key: &str) -> Result<(), StoryError> {
        let outcome = self.resolve(key)?;
        if let Some(title) = outcome.title {
            self.page.set_text(TextSlot::ResultTitle, title);
        }
        self.page.set_text(TextSlot::ResultText, outcome.text);
        self.activate(outcome.next);
        Ok(())
    }

    pub fn show_boss(&mut self) -> Result<(), StoryError> {
        self.require(ScreenId::BossLevel)?;
        self.activate(ScreenId::BossLevel);
        Ok(())
    }

    /// Resolve the boss encounter and celebrate
    pub fn defeat_boss(&mut self, method: &str) -> Result<(), StoryError> {
        let outcome = self.resolve(method)?;
        self.page.announce(outcome.text);
        self.show_victory()
    }

    pub fn show_victory(&mut self) -> Result<(), StoryError> {
        self.require(ScreenId::Victory)?;
        self.page.set_text(TextSlot::FinalName, &self.player_name);
        self.activate(ScreenId::Victory);
        self.events.push(StoryEvent::Confetti);
        Ok(())
    }

    pub fn take_selfie(&mut self) -> Result<(), StoryError> {
        self.require(ScreenId::Selfie)?;
        self.page.set_text(TextSlot::SelfieHero, &self.player_name);
        self.activate(ScreenId::Selfie);
        Ok(())
    }

    /// Forget the hero and return to the landing screen, from anywhere
    pub fn restart(&mut self) -> Result<(), StoryError> {
        self.require(ScreenId::Landing)?;
        log::info!("Quest restarted");
        self.player_name.clear();
        self.page.clear_name_input();
        self.activate(ScreenId::Landing);
        Ok(())
    }

    /// Run a button action. `hero_input` is the current name input value.
    pub fn dispatch(&mut self, action: &StoryAction, hero_input: &str) -> Result<(), StoryError> {
        match action {
            StoryAction::StartQuest => self.start_quest(),
            StoryAction::BeginJourney => self.begin_journey(hero_input),
            StoryAction::ChoosePath(key) => self.choose_path(key),
            StoryAction::ShowBoss => self.show_boss(),
            StoryAction::DefeatBoss(method) => self.defeat_boss(method),
            StoryAction::TakeSelfie => self.take_selfie(),
            StoryAction::Restart => self.restart(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::page::RecordingPage;

    fn controller() -> StoryController<RecordingPage> {
        StoryController::new(RecordingPage::default()).unwrap()
    }

    #[test]
    fn test_starts_on_landing() {
        let c = controller();
        assert_eq!(c.current(), ScreenId::Landing);
        assert_eq!(c.page().active_screens(), vec![ScreenId::Landing]);
        assert_eq!(c.player_name(), "");
    }

    #[test]
    fn test_blank_name_stays_on_name_entry() {
        let mut c = controller();
        assert!(c.show_screen("nameEntry"));

        assert_eq!(c.begin_journey(""), Err(StoryError::EmptyHeroName));
        assert_eq!(c.begin_journey("   "), Err(StoryError::EmptyHeroName));
        assert_eq!(c.current(), ScreenId::NameEntry);
        assert_eq!(c.page().active_screens(), vec![ScreenId::NameEntry]);
        assert_eq!(c.page().announcements.last().unwrap(), "A hero needs a name!");
    }

    #[test]
    fn test_named_hero_reaches_path_choice() {
        let mut c = controller();
        c.start_quest().unwrap();
        c.begin_journey("Rae").unwrap();

        assert_eq!(c.current(), ScreenId::PathChoice);
        assert_eq!(c.player_name(), "Rae");
        assert_eq!(c.page().text(TextSlot::PlayerName), Some("Rae"));
        assert!(c.page().announcements[0].starts_with("Welcome, Rae."));
    }

    #[test]
    fn test_name_written_before_screen_is_shown() {
        let mut c = controller();
        c.start_quest().unwrap();
        c.begin_journey("Rae").unwrap();
        assert_eq!(
            c.page().active_when_written(TextSlot::PlayerName),
            Some(&[ScreenId::NameEntry][..])
        );

        c.choose_path("bribe").unwrap();
        assert_eq!(
            c.page().active_when_written(TextSlot::ResultText),
            Some(&[ScreenId::PathChoice][..])
        );
    }

    #[test]
    fn test_choose_dance() {
        let mut c = controller();
        c.transition_to(ScreenId::PathChoice);
        c.choose_path("dance").unwrap();

        assert_eq!(c.current(), ScreenId::PathResult);
        assert_eq!(c.page().text(TextSlot::ResultTitle), Some("💃 Dance Battle Royale!"));
        assert_eq!(
            c.page().text(TextSlot::ResultText),
            Some("You broke out the worm. Aunt Karen countered with the Macarena. It's a draw. She lets you pass.")
        );
    }

    #[test]
    fn test_unknown_choice_is_an_error_and_changes_nothing() {
        let mut c = controller();
        c.transition_to(ScreenId::PathChoice);
        c.choose_path("balloon").unwrap();
        c.transition_to(ScreenId::PathChoice);

        let err = c.choose_path("teleport").unwrap_err();
        assert_eq!(
            err,
            StoryError::UnknownChoice {
                screen: ScreenId::PathChoice,
                key: "teleport".to_string()
            }
        );
        assert_eq!(c.current(), ScreenId::PathChoice);
        assert_eq!(c.page().text(TextSlot::ResultTitle), Some("🦕 Balloon Army Encounter!"));
    }

    #[test]
    fn test_boss_choice_off_the_boss_screen_is_rejected() {
        let mut c = controller();
        c.transition_to(ScreenId::PathChoice);
        assert!(c.defeat_boss("juice").is_err());
        assert!(c.drain_events().is_empty());
    }

    #[test]
    fn test_full_quest() {
        let mut c = controller();
        c.start_quest().unwrap();
        c.begin_journey("  Rae ").unwrap();
        c.choose_path("balloon").unwrap();
        c.show_boss().unwrap();
        c.defeat_boss("bubbles").unwrap();

        assert_eq!(c.current(), ScreenId::Victory);
        assert_eq!(c.page().text(TextSlot::FinalName), Some("Rae"));
        assert_eq!(c.drain_events(), vec![StoryEvent::Confetti]);
        assert!(c.drain_events().is_empty());
        assert!(c.page().announcements.last().unwrap().contains("bubbles"));

        c.take_selfie().unwrap();
        assert_eq!(c.current(), ScreenId::Selfie);
        assert_eq!(c.page().text(TextSlot::SelfieHero), Some("Rae"));
    }

    #[test]
    fn test_unknown_screen_keeps_current() {
        let mut c = controller();
        c.start_quest().unwrap();
        assert!(!c.show_screen("secretLevel"));
        assert_eq!(c.current(), ScreenId::NameEntry);
        assert_eq!(c.page().active_screens(), vec![ScreenId::NameEntry]);
    }

    #[test]
    fn test_screen_missing_from_page_keeps_current() {
        let page = RecordingPage::with_screens([ScreenId::Landing, ScreenId::NameEntry]);
        let mut c = StoryController::new(page).unwrap();
        assert!(!c.show_screen("victory"));
        assert_eq!(c.current(), ScreenId::Landing);
        assert_eq!(c.page().active_screens(), vec![ScreenId::Landing]);
    }

    #[test]
    fn test_restart_resets_hero() {
        let mut c = controller();
        c.start_quest().unwrap();
        c.begin_journey("Rae").unwrap();
        c.transition_to(ScreenId::Victory);
        c.restart().unwrap();

        assert_eq!(c.current(), ScreenId::Landing);
        assert_eq!(c.player_name(), "");
        assert_eq!(c.page().name_input_clears, 1);
        assert_eq!(c.page().active_screens(), vec![ScreenId::Landing]);
    }

    #[test]
    fn test_dispatch_from_attributes() {
        let mut c = controller();
        let steps = [
            ("start-quest", None),
            ("begin-journey", None),
            ("choose-path", Some("bribe")),
            ("show-boss", None),
            ("defeat-boss", Some("reason")),
        ];
        for (action, choice) in steps {
            let action = StoryAction::from_attrs(action, choice).unwrap();
            c.dispatch(&action, "Rae").unwrap();
        }
        assert_eq!(c.current(), ScreenId::Victory);

        assert_eq!(StoryAction::from_attrs("choose-path", None), None);
        assert_eq!(StoryAction::from_attrs("fly", Some("x")), None);
    }

    #[test]
    fn test_missing_next_screen_writes_nothing() {
        let page = RecordingPage::with_screens([ScreenId::Landing, ScreenId::NameEntry]);
        let mut c = StoryController::new(page).unwrap();
        c.start_quest().unwrap();

        assert_eq!(
            c.begin_journey("Rae"),
            Err(StoryError::MissingScreen(ScreenId::PathChoice))
        );
        assert_eq!(c.current(), ScreenId::NameEntry);
        assert_eq!(c.player_name(), "");
        assert_eq!(c.page().text(TextSlot::PlayerName), None);
        assert!(c.page().announcements.is_empty());
    }

    #[test]
    fn test_missing_result_and_victory_screens_write_nothing() {
        let page = RecordingPage::with_screens([
            ScreenId::Landing,
            ScreenId::PathChoice,
            ScreenId::BossLevel,
        ]);
        let mut c = StoryController::new(page).unwrap();

        c.transition_to(ScreenId::PathChoice);
        assert_eq!(
            c.choose_path("dance"),
            Err(StoryError::MissingScreen(ScreenId::PathResult))
        );
        assert_eq!(c.page().text(TextSlot::ResultTitle), None);
        assert_eq!(c.page().text(TextSlot::ResultText), None);

        c.show_boss().unwrap();
        assert_eq!(
            c.defeat_boss("juice"),
            Err(StoryError::MissingScreen(ScreenId::Victory))
        );
        assert_eq!(c.current(), ScreenId::BossLevel);
        assert_eq!(c.page().active_screens(), vec![ScreenId::BossLevel]);
        assert!(c.page().announcements.is_empty());
        assert!(c.drain_events().is_empty());
    }

    #[test]
    fn test_page_without_landing_is_refused() {
        let page = RecordingPage::with_screens([ScreenId::NameEntry, ScreenId::Victory]);
        assert_eq!(
            StoryController::new(page).err(),
            Some(StoryError::MissingScreen(ScreenId::Landing))
        );
    }

    #[test]
    fn test_restart_needs_landing_on_the_page() {
        let mut c = controller();
        c.start_quest().unwrap();
        c.begin_journey("Rae").unwrap();

        // The landing container disappears from the page
        *c.page_mut() = RecordingPage::with_screens([ScreenId::PathChoice]);
        c.transition_to(ScreenId::PathChoice);
        assert_eq!(c.restart(), Err(StoryError::MissingScreen(ScreenId::Landing)));
        assert_eq!(c.current(), ScreenId::PathChoice);
        assert_eq!(c.player_name(), "Rae");
        assert_eq!(c.page().active_screens(), vec![ScreenId::PathChoice]);
    }
}
