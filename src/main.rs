//! Cosmic Birthday entry point
//!
//! Wires the page to the core and runs the animation loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement,
        HtmlImageElement, HtmlInputElement, HtmlTextAreaElement, Window,
    };

    use cosmic_birthday::consts::*;
    use cosmic_birthday::cosmos::{Projection, Universe};
    use cosmic_birthday::cosmos::palette::css_hex;
    use cosmic_birthday::effects::{EffectChanges, EffectEmitter, EffectId, EffectKind};
    use cosmic_birthday::story::{
        ScreenId, StoryAction, StoryController, StoryEvent, StoryPage, TextSlot,
    };
    use cosmic_birthday::{CardForm, Experience, Settings};

    /// Keyframes used by confetti and sparks
    const EFFECT_KEYFRAMES: &str = "
        @keyframes fall {
            0% { transform: translateY(-10px) rotate(0deg); opacity: 1; }
            100% { transform: translateY(100vh) rotate(360deg); opacity: 0; }
        }
        @keyframes explode {
            0% { transform: scale(0) rotate(0deg); opacity: 1; }
            50% { transform: scale(1) rotate(180deg); opacity: 0.8; }
            100% { transform: scale(3) rotate(360deg); opacity: 0; }
        }
    ";

    /// Quest screens backed by real elements
    struct DomStoryPage {
        window: Window,
        document: Document,
    }

    impl StoryPage for DomStoryPage {
        fn has_screen(&self, screen: ScreenId) -> bool {
            self.document.get_element_by_id(screen.as_str()).is_some()
        }

        fn set_screen_active(&mut self, screen: ScreenId, active: bool) {
            if let Some(el) = self.document.get_element_by_id(screen.as_str()) {
                let classes = el.class_list();
                let _ = if active {
                    classes.add_1("active")
                } else {
                    classes.remove_1("active")
                };
            }
        }

        fn set_text(&mut self, slot: TextSlot, text: &str) {
            if let Some(el) = self.document.get_element_by_id(slot.as_str()) {
                el.set_text_content(Some(text));
            }
        }

        fn clear_name_input(&mut self) {
            set_input_value(&self.document, "heroName", "");
        }

        fn announce(&mut self, message: &str) {
            let _ = self.window.alert_with_message(message);
        }
    }

    fn input_value(document: &Document, id: &str) -> String {
        let Some(el) = document.get_element_by_id(id) else {
            return String::new();
        };
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    fn set_input_value(document: &Document, id: &str, value: &str) {
        let Some(el) = document.get_element_by_id(id) else {
            return;
        };
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        }
    }

    fn set_display(document: &Document, id: &str, display: &str) {
        if let Some(el) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = el.style().set_property("display", display);
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn rgb_css(color: glam::Vec3) -> String {
        let c = (color.clamp(glam::Vec3::ZERO, glam::Vec3::ONE) * 255.0).round();
        format!("rgb({}, {}, {})", c.x as u8, c.y as u8, c.z as u8)
    }

    /// Blend two packed colors
    fn mix_hex(a: u32, b: u32, t: f32) -> String {
        let a = glam::Vec3::from_array(cosmic_birthday::hex_rgb(a));
        let b = glam::Vec3::from_array(cosmic_birthday::hex_rgb(b));
        rgb_css(a.lerp(b, t))
    }

    /// All page-side state
    struct Page {
        window: Window,
        document: Document,
        settings: Settings,
        experience: Experience,
        story: Option<StoryController<DomStoryPage>>,
        confetti: EffectEmitter,
        confetti_rng: Pcg32,
        nodes: HashMap<(EffectKind, EffectId), Element>,
        uploaded_image: Option<String>,
        canvas: Option<(HtmlCanvasElement, CanvasRenderingContext2d)>,
        field_styles: Vec<String>,
        firework_styles: Vec<Vec<String>>,
        frame_requested: bool,
    }

    impl Page {
        fn new(window: Window, document: Document, seed: u64) -> Self {
            let settings = Settings::load();
            let story = match StoryController::new(DomStoryPage {
                window: window.clone(),
                document: document.clone(),
            }) {
                Ok(story) => Some(story),
                Err(e) => {
                    log::info!("No party quest on this page ({})", e);
                    None
                }
            };
            let canvas = document
                .get_element_by_id("universe-canvas")
                .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
                .and_then(|canvas| {
                    let ctx = canvas
                        .get_context("2d")
                        .ok()
                        .flatten()?
                        .dyn_into::<CanvasRenderingContext2d>()
                        .ok()?;
                    Some((canvas, ctx))
                });

            Self {
                window,
                document,
                experience: Experience::new(settings.clone(), seed),
                settings,
                story,
                confetti: EffectEmitter::new(EffectKind::Confetti),
                confetti_rng: Pcg32::seed_from_u64(seed ^ 0x5eed),
                nodes: HashMap::new(),
                uploaded_image: None,
                canvas,
                field_styles: Vec::new(),
                firework_styles: Vec::new(),
                frame_requested: false,
            }
        }

        fn viewport(&self) -> (f32, f32) {
            let w = self.window.inner_width().ok().and_then(|v| v.as_f64());
            let h = self.window.inner_height().ok().and_then(|v| v.as_f64());
            (w.unwrap_or(800.0) as f32, h.unwrap_or(600.0) as f32)
        }

        fn resize(&mut self) {
            let (w, h) = self.viewport();
            if let Some((canvas, _)) = &self.canvas {
                canvas.set_width(w as u32);
                canvas.set_height(h as u32);
            }
            self.experience.resize(w, h);
        }

        /// Read the card form and launch the universe
        fn launch_card(&mut self) {
            let form = CardForm {
                name: input_value(&self.document, "birthdayPersonName"),
                message: input_value(&self.document, "customMessage"),
                sender: input_value(&self.document, "senderName"),
                photo: self.uploaded_image.clone(),
            };

            let card = match form.validate() {
                Ok(card) => card,
                Err(e) => {
                    log::warn!("Launch refused: {}", e);
                    if let Some(section) = self.document.query_selector(".create-section").ok().flatten() {
                        let classes = section.class_list();
                        let _ = classes.remove_1("shake");
                        // Force a reflow so the animation restarts
                        if let Some(el) = section.dyn_ref::<HtmlElement>() {
                            let _ = el.offset_width();
                        }
                        let _ = classes.add_1("shake");
                    }
                    return;
                }
            };

            set_display(&self.document, "createCard", "none");
            set_display(&self.document, "universe-container", "block");
            set_text(&self.document, "cosmic-title", &card.title());
            set_text(&self.document, "message-constellation", card.message());
            set_text(&self.document, "sender-signature", &card.signature());
            if let Some(img) = self
                .document
                .get_element_by_id("dimensional-image")
                .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
            {
                img.set_src(&card.photo_src());
            }

            self.resize();
            let viewport = self.viewport();
            let stale = self.experience.launch(card, viewport, js_sys::Date::now());
            self.remove_effects(EffectKind::Spark, &stale);
            // Colors never change after generation
            if let Some(universe) = self.experience.universe() {
                self.field_styles = universe.field.colors.iter().map(|c| rgb_css(*c)).collect();
                self.firework_styles = universe
                    .fireworks
                    .iter()
                    .map(|burst| burst.colors.iter().map(|c| rgb_css(*c)).collect())
                    .collect();
            }
        }

        /// Tear the universe down and bring the form back
        fn reset_card(&mut self) {
            let removed = self.experience.teardown();
            self.remove_effects(EffectKind::Spark, &removed);
            self.field_styles.clear();
            self.firework_styles.clear();
            if let Some((canvas, ctx)) = &self.canvas {
                ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
            }

            set_display(&self.document, "universe-container", "none");
            set_display(&self.document, "createCard", "block");
            for id in ["birthdayPersonName", "customMessage", "senderName"] {
                set_input_value(&self.document, id, "");
            }
            self.uploaded_image = None;
            log::info!("Card reset");
        }

        /// Run a quest button and start any effects it asked for
        fn story_action(&mut self, action: StoryAction) {
            let hero_input = input_value(&self.document, "heroName");
            let Some(story) = self.story.as_mut() else {
                return;
            };
            if let Err(e) = story.dispatch(&action, &hero_input) {
                log::warn!("{:?} rejected: {}", action, e);
            }
            for event in story.drain_events() {
                match event {
                    StoryEvent::Confetti if self.settings.confetti => {
                        self.confetti
                            .burst(js_sys::Date::now(), CONFETTI_COUNT, CONFETTI_STAGGER_MS);
                    }
                    StoryEvent::Confetti => {}
                }
            }
        }

        fn apply_effects(&mut self, changes: EffectChanges, kind: EffectKind) {
            self.remove_effects(kind, &changes.expired);

            let container = match kind {
                EffectKind::Spark => self.document.query_selector(".fireworks").ok().flatten(),
                EffectKind::Confetti => self.document.body().map(Element::from),
            };
            let Some(container) = container else {
                return;
            };
            for effect in changes.spawned {
                let Ok(el) = self.document.create_element("div") else {
                    continue;
                };
                el.set_class_name(kind.class_name());
                let _ = el.set_attribute("style", &effect.css());
                if container.append_child(&el).is_ok() {
                    self.nodes.insert((kind, effect.id), el);
                }
            }
        }

        fn remove_effects(&mut self, kind: EffectKind, ids: &[EffectId]) {
            for id in ids {
                if let Some(el) = self.nodes.remove(&(kind, *id)) {
                    el.remove();
                }
            }
        }

        /// One animation frame; returns whether another one is needed
        fn frame(&mut self, now: f64) -> bool {
            let live = self.experience.frame(now);
            if live {
                self.draw();
            }

            let sparks = self.experience.advance_effects(now);
            self.apply_effects(sparks, EffectKind::Spark);
            let confetti = self.confetti.advance(now, &mut self.confetti_rng);
            self.apply_effects(confetti, EffectKind::Confetti);

            live || !self.confetti.active().is_empty() || self.confetti.pending() > 0
        }

        fn draw(&self) {
            let (Some((canvas, ctx)), Some(universe), Some(camera)) = (
                &self.canvas,
                self.experience.universe(),
                self.experience.camera(),
            ) else {
                return;
            };
            let camera = &camera.projection();
            let (w, h) = (canvas.width() as f64, canvas.height() as f64);
            ctx.clear_rect(0.0, 0.0, w, h);
            let _ = ctx.set_global_composite_operation("lighter");

            self.draw_field(ctx, universe, camera);
            draw_scenery(ctx, universe, camera);

            ctx.set_global_alpha(0.8);
            for (burst, styles) in universe.fireworks.iter().zip(&self.firework_styles) {
                for (pos, style) in burst.positions.iter().zip(styles) {
                    if let Some((p, depth)) = camera.project(*pos) {
                        let r = (1.5 * camera.pixel_scale(depth)).max(0.5) as f64;
                        ctx.set_fill_style_str(style);
                        ctx.fill_rect(p.x as f64 - r, p.y as f64 - r, 2.0 * r, 2.0 * r);
                    }
                }
            }
            ctx.set_global_alpha(1.0);
            let _ = ctx.set_global_composite_operation("source-over");
        }

        fn draw_field(
            &self,
            ctx: &CanvasRenderingContext2d,
            universe: &Universe,
            camera: &Projection,
        ) {
            let field = &universe.field;
            let transform = field.transform();
            // Twinkle follows the field's shader time
            let twinkle = 0.75 + 0.25 * (field.time * 3.0).sin();
            ctx.set_global_alpha(twinkle as f64);
            for (i, pos) in field.positions.iter().enumerate() {
                let world = transform.transform_point3(*pos);
                let Some((p, depth)) = camera.project(world) else {
                    continue;
                };
                let r = (field.sizes[i] * 0.5 * camera.pixel_scale(depth)).max(0.5) as f64;
                if let Some(style) = self.field_styles.get(i) {
                    ctx.set_fill_style_str(style);
                }
                ctx.fill_rect(p.x as f64 - r, p.y as f64 - r, 2.0 * r, 2.0 * r);
            }
            ctx.set_global_alpha(1.0);
        }
    }

    fn draw_scenery(
        ctx: &CanvasRenderingContext2d,
        universe: &Universe,
        camera: &Projection,
    ) {
        use std::f64::consts::TAU;

        for portal in &universe.portals {
            let Some((p, depth)) = camera.project(portal.position) else {
                continue;
            };
            let scale = camera.pixel_scale(depth);
            let radius = ((portal.inner_radius + portal.outer_radius) * 0.5 * scale) as f64;
            // Ring tilt foreshortens it into an ellipse
            let squash = portal.rotation.x.cos().abs().max(0.15) as f64;
            ctx.set_stroke_style_str(&mix_hex(portal.colors.0, portal.colors.1, portal.glow()));
            ctx.set_line_width(((portal.outer_radius - portal.inner_radius) * scale).max(1.0) as f64);
            ctx.begin_path();
            let _ = ctx.ellipse(
                p.x as f64,
                p.y as f64,
                radius,
                radius * squash,
                portal.rotation.z as f64,
                0.0,
                TAU,
            );
            ctx.stroke();
        }

        if let Some((center, depth)) = camera.project(glam::Vec3::ZERO) {
            let scale = camera.pixel_scale(depth);
            ctx.set_line_width(1.0);
            ctx.set_stroke_style_str("rgba(255, 105, 180, 0.25)");
            for wave in &universe.waves {
                let radius = ((wave.radius + wave.ripple(0.0)) * scale).max(1.0);
                ctx.begin_path();
                let _ = ctx.ellipse(
                    center.x as f64,
                    center.y as f64,
                    radius as f64,
                    (radius * wave.rotation.y.cos().abs().max(0.2)) as f64,
                    wave.rotation.x as f64,
                    0.0,
                    TAU,
                );
                ctx.stroke();
            }
        }

        for ornament in &universe.ornaments {
            let Some((p, depth)) = camera.project(ornament.position) else {
                continue;
            };
            let r = (3.0 * camera.pixel_scale(depth)).max(1.0) as f64;
            ctx.set_global_alpha(ornament.kind.opacity() as f64);
            ctx.set_fill_style_str(&css_hex(ornament.kind.color()));
            ctx.begin_path();
            let _ = ctx.arc(p.x as f64, p.y as f64, r, 0.0, TAU);
            ctx.fill();
        }
        ctx.set_global_alpha(1.0);
    }

    fn ensure_frame_loop(page: &Rc<RefCell<Page>>) {
        {
            let mut p = page.borrow_mut();
            if p.frame_requested {
                return;
            }
            p.frame_requested = true;
        }
        request_animation_frame(page.clone());
    }

    fn request_animation_frame(page: Rc<RefCell<Page>>) {
        let window = page.borrow().window.clone();
        let closure = Closure::once(move |_time: f64| {
            frame_loop(page);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(page: Rc<RefCell<Page>>) {
        let keep_going = page.borrow_mut().frame(js_sys::Date::now());
        if keep_going {
            request_animation_frame(page);
        } else {
            // Nothing live: stop rescheduling until something starts again
            page.borrow_mut().frame_requested = false;
        }
    }

    fn handle_action(page: &Rc<RefCell<Page>>, action: &str, choice: Option<&str>) {
        match action {
            "launch-card" => page.borrow_mut().launch_card(),
            "reset-card" => page.borrow_mut().reset_card(),
            other => match StoryAction::from_attrs(other, choice) {
                Some(story_action) => page.borrow_mut().story_action(story_action),
                None => {
                    log::warn!("Unknown action: {}", other);
                    return;
                }
            },
        }
        ensure_frame_loop(page);
    }

    fn setup_action_buttons(page: &Rc<RefCell<Page>>) {
        let document = page.borrow().document.clone();
        let Ok(buttons) = document.query_selector_all("[data-action]") else {
            return;
        };
        for i in 0..buttons.length() {
            let Some(el) = buttons.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let Some(action) = el.get_attribute("data-action") else {
                continue;
            };
            let choice = el.get_attribute("data-choice");
            let page = page.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                handle_action(&page, &action, choice.as_deref());
            });
            let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_photo_upload(page: &Rc<RefCell<Page>>) {
        let document = page.borrow().document.clone();
        let Some(input) = document
            .get_element_by_id("birthdayPersonImage")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };

        let page = page.clone();
        let input_clone = input.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(file) = input_clone.files().and_then(|files| files.get(0)) else {
                return;
            };
            let Ok(reader) = web_sys::FileReader::new() else {
                return;
            };
            let page = page.clone();
            let reader_clone = reader.clone();
            let onload = Closure::once(move |_event: web_sys::Event| {
                if let Some(url) = reader_clone.result().ok().and_then(|r| r.as_string()) {
                    log::info!("Photo uploaded ({} bytes as data URL)", url.len());
                    page.borrow_mut().uploaded_image = Some(url);
                }
            });
            reader.set_onload(Some(onload.as_ref().unchecked_ref()));
            onload.forget();
            if let Err(e) = reader.read_as_data_url(&file) {
                log::warn!("Could not read photo: {:?}", e);
            }
        });
        let _ = input.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(page: &Rc<RefCell<Page>>) {
        let window = page.borrow().window.clone();
        let page = page.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            page.borrow_mut().resize();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn inject_keyframes(document: &Document) {
        let Ok(style) = document.create_element("style") else {
            return;
        };
        style.set_text_content(Some(EFFECT_KEYFRAMES));
        if let Some(head) = document.query_selector("head").ok().flatten() {
            let _ = head.append_child(&style);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Cosmic Birthday starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        set_display(&document, "loading", "none");
        inject_keyframes(&document);

        let seed = js_sys::Date::now() as u64;
        let page = Rc::new(RefCell::new(Page::new(window, document, seed)));
        log::info!("Page initialized with seed: {}", seed);

        setup_action_buttons(&page);
        setup_photo_upload(&page);
        setup_resize(&page);

        log::info!("Cosmic Birthday ready!");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_page::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Cosmic Birthday (native) starting...");
    log::info!("The page runs in the browser - build for wasm32 and serve with `trunk serve`");

    println!("\nRunning headless quest...");
    headless_quest();
    println!("\nRunning headless universe...");
    headless_universe();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn headless_quest() {
    use cosmic_birthday::story::{RecordingPage, StoryController, TextSlot};

    let mut story = match StoryController::new(RecordingPage::default()) {
        Ok(story) => story,
        Err(e) => {
            log::error!("{}", e);
            return;
        }
    };
    let played = story
        .start_quest()
        .and_then(|_| story.begin_journey("Rae"))
        .and_then(|_| story.choose_path("dance"))
        .and_then(|_| story.show_boss())
        .and_then(|_| story.defeat_boss("juice"));
    if let Err(e) = played {
        log::error!("Quest stalled on {}: {}", story.current(), e);
        return;
    }

    for line in &story.page().announcements {
        println!("  > {}", line);
    }
    println!(
        "✓ {} reached the {} screen",
        story.page().text(TextSlot::FinalName).unwrap_or("nobody"),
        story.current()
    );
}

#[cfg(not(target_arch = "wasm32"))]
fn headless_universe() {
    use cosmic_birthday::{CardForm, Experience, Settings};

    let form = CardForm {
        name: "Rae".to_string(),
        message: "May your year sparkle".to_string(),
        sender: "Sam".to_string(),
        photo: None,
    };
    let card = match form.validate() {
        Ok(card) => card,
        Err(e) => {
            log::error!("{}", e);
            return;
        }
    };
    println!("  {}", card.title());

    let mut experience = Experience::new(Settings::load(), 2024);
    experience.launch(card, (1280.0, 720.0), 0.0);

    let mut sparks = 0;
    for frame in 0..600 {
        let now = frame as f64 * 1000.0 / 60.0;
        experience.frame(now);
        sparks += experience.advance_effects(now).spawned.len();
    }
    if let Some(universe) = experience.universe() {
        println!(
            "  {} frames, t = {:.2}s, {} sparks spawned",
            universe.frames(),
            universe.time(),
            sparks
        );
    }
    let removed = experience.teardown();
    if experience.frame(10_000.0) {
        log::error!("Universe still animating after teardown");
    }
    println!("✓ Universe torn down, {} sparks cleared", removed.len());
}
