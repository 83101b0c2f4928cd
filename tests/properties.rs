//! Property tests for the quest state machine, universe generation and effects

use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use cosmic_birthday::consts::*;
use cosmic_birthday::cosmos::palette::LOVE;
use cosmic_birthday::cosmos::{FireworkBurst, ParticleField};
use cosmic_birthday::effects::{EffectEmitter, EffectKind};
use cosmic_birthday::story::{RecordingPage, ScreenId, StoryAction, StoryController};

fn action() -> impl Strategy<Value = StoryAction> {
    let key = prop_oneof![
        Just("balloon".to_string()),
        Just("dance".to_string()),
        Just("bribe".to_string()),
        Just("juice".to_string()),
        Just("bubbles".to_string()),
        Just("reason".to_string()),
        "[a-z]{1,8}",
    ];
    prop_oneof![
        Just(StoryAction::StartQuest),
        Just(StoryAction::BeginJourney),
        key.clone().prop_map(StoryAction::ChoosePath),
        Just(StoryAction::ShowBoss),
        key.prop_map(StoryAction::DefeatBoss),
        Just(StoryAction::TakeSelfie),
        Just(StoryAction::Restart),
    ]
}

fn play(actions: &[StoryAction], hero: &str) -> StoryController<RecordingPage> {
    let mut story = StoryController::new(RecordingPage::default()).unwrap();
    for action in actions {
        // Rejected choices are part of the exploration
        let _ = story.dispatch(action, hero);
    }
    story
}

proptest! {
    #[test]
    fn prop_exactly_one_screen_active(
        actions in prop::collection::vec(action(), 0..40),
        hero in "[ a-zA-Z]{0,10}",
    ) {
        let story = play(&actions, &hero);
        prop_assert_eq!(story.page().active_screens(), vec![story.current()]);
    }

    #[test]
    fn prop_unknown_screen_changes_nothing(
        actions in prop::collection::vec(action(), 0..20),
        id in "[a-zA-Z]{1,12}",
    ) {
        prop_assume!(ScreenId::from_str(&id).is_none());
        let mut story = play(&actions, "Rae");
        let before = story.current();

        prop_assert!(!story.show_screen(&id));
        prop_assert_eq!(story.current(), before);
        prop_assert_eq!(story.page().active_screens(), vec![before]);
    }

    #[test]
    fn prop_restart_returns_to_landing(actions in prop::collection::vec(action(), 0..40)) {
        let mut story = play(&actions, "Rae");
        prop_assert!(story.restart().is_ok());
        prop_assert_eq!(story.player_name(), "");
        prop_assert_eq!(story.current(), ScreenId::Landing);
        prop_assert_eq!(story.page().active_screens(), vec![ScreenId::Landing]);
    }

    #[test]
    fn prop_blank_hero_name_is_refused(blank in "[ \t]{0,6}") {
        let mut story = StoryController::new(RecordingPage::default()).unwrap();
        prop_assert!(story.start_quest().is_ok());
        prop_assert!(story.begin_journey(&blank).is_err());
        prop_assert_eq!(story.current(), ScreenId::NameEntry);
    }

    #[test]
    fn prop_partial_page_never_leaves_zero_screens(
        actions in prop::collection::vec(action(), 0..40),
        missing in prop::sample::subsequence(ScreenId::ALL[1..].to_vec(), 0..6),
    ) {
        let screens = ScreenId::ALL.into_iter().filter(|s| !missing.contains(s));
        let mut story = StoryController::new(RecordingPage::with_screens(screens)).unwrap();
        for action in &actions {
            let _ = story.dispatch(action, "Rae");
            prop_assert_eq!(story.page().active_screens(), vec![story.current()]);
        }
    }

    #[test]
    fn prop_field_respects_palette_and_sizes(seed in any::<u64>()) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let field = ParticleField::generate(300, &mut rng);
        prop_assert_eq!(field.len(), 300);
        for i in 0..field.len() {
            prop_assert!(LOVE.contains(field.colors[i]));
            prop_assert!((FIELD_SIZE_MIN..FIELD_SIZE_MAX).contains(&field.sizes[i]));
            prop_assert!(field.positions[i].z.abs() <= FIELD_DEPTH / 2.0);
        }
    }

    #[test]
    fn prop_fireworks_stay_in_bounds(seed in any::<u64>(), frames in 1usize..200) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut burst = FireworkBurst::generate(FIREWORK_PARTICLES, &mut rng);
        for _ in 0..frames {
            burst.step(&mut rng);
        }
        for pos in &burst.positions {
            prop_assert!(pos.abs().max_element() <= FIREWORK_BOUND);
        }
    }

    #[test]
    fn prop_spark_lives_until_expiry(seed in any::<u64>(), spawn_at in 0.0f64..100_000.0, probe in 0.0f64..1.0) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut sparks = EffectEmitter::new(EffectKind::Spark);
        let effect = sparks.spawn(spawn_at, &mut rng);
        let lifetime = effect.lifetime_ms();

        sparks.advance(spawn_at + probe * lifetime, &mut rng);
        prop_assert!(sparks.is_active(effect.id));

        let changes = sparks.advance(spawn_at + lifetime + REMOVAL_MARGIN_MS, &mut rng);
        prop_assert_eq!(changes.expired, vec![effect.id]);
        prop_assert!(sparks.active().is_empty());
    }
}
