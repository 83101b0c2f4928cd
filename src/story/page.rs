//! Page capabilities the quest controller drives
//!
//! The controller never touches the DOM directly. The browser build implements
//! [`StoryPage`] over real elements; [`RecordingPage`] keeps everything in
//! memory for tests and headless runs.

use std::collections::{HashMap, HashSet};

use super::screen::{ScreenId, TextSlot};

/// What the quest needs from the surrounding page
pub trait StoryPage {
    /// Whether the page has a container for `screen`
    fn has_screen(&self, screen: ScreenId) -> bool;
    /// Show or hide a screen container
    fn set_screen_active(&mut self, screen: ScreenId, active: bool);
    /// Replace the text of a slot
    fn set_text(&mut self, slot: TextSlot, text: &str);
    /// Empty the hero name input
    fn clear_name_input(&mut self);
    /// Show a blocking message to the player
    fn announce(&mut self, message: &str);
}

/// In-memory page that records every write
#[derive(Debug, Clone)]
pub struct RecordingPage {
    screens: HashSet<ScreenId>,
    active: HashSet<ScreenId>,
    texts: HashMap<TextSlot, String>,
    /// Announcements in the order they were made
    pub announcements: Vec<String>,
    /// Number of times the name input was cleared
    pub name_input_clears: u32,
    /// Active set captured whenever a slot is written
    text_writes: Vec<(TextSlot, Vec<ScreenId>)>,
}

impl Default for RecordingPage {
    fn default() -> Self {
        Self::with_screens(ScreenId::ALL)
    }
}

impl RecordingPage {
    /// Page that only has containers for `screens`
    pub fn with_screens(screens: impl IntoIterator<Item = ScreenId>) -> Self {
        Self {
            screens: screens.into_iter().collect(),
            active: HashSet::new(),
            texts: HashMap::new(),
            announcements: Vec::new(),
            name_input_clears: 0,
            text_writes: Vec::new(),
        }
    }

    /// Screens currently marked active
    pub fn active_screens(&self) -> Vec<ScreenId> {
        let mut active: Vec<_> = self.active.iter().copied().collect();
        active.sort_by_key(|s| s.as_str());
        active
    }

    pub fn text(&self, slot: TextSlot) -> Option<&str> {
        self.texts.get(&slot).map(String::as_str)
    }

    /// Screens that were active at the moment `slot` was last written
    pub fn active_when_written(&self, slot: TextSlot) -> Option<&[ScreenId]> {
        self.text_writes
            .iter()
            .rev()
            .find(|(s, _)| *s == slot)
            .map(|(_, active)| active.as_slice())
    }
}

impl StoryPage for RecordingPage {
    fn has_screen(&self, screen: ScreenId) -> bool {
        self.screens.contains(&screen)
    }

    fn set_screen_active(&mut self, screen: ScreenId, active: bool) {
        if !self.screens.contains(&screen) {
            return;
        }
        if active {
            self.active.insert(screen);
        } else {
            self.active.remove(&screen);
        }
    }

    fn set_text(&mut self, slot: TextSlot, text: &str) {
        let active = self.active_screens();
        self.text_writes.push((slot, active));
        self.texts.insert(slot, text.to_string());
    }

    fn clear_name_input(&mut self) {
        self.name_input_clears += 1;
    }

    fn announce(&mut self, message: &str) {
        self.announcements.push(message.to_string());
    }
}
