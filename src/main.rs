//! Decision Wheel entry point
//!
//! On wasm, wires the wheel engine to the page. On native, runs a seeded
//! batch of spins through the same controller and prints the tally.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement};

    use decision_wheel::Settings;
    use decision_wheel::consts::COUNTDOWN_TICK_MS;
    use decision_wheel::persistence::{DecisionLog, LocalStore, SavedWheel, WheelLibrary};
    use decision_wheel::platform::{BrowserInterval, BrowserTimeout, now_ms};
    use decision_wheel::wheel::{
        Countdown, EliminationRound, SpinController, SpinEvent, SpinStarted, SpinTicket,
        clip_path_css, normalize_sections,
    };

    /// Label distance from the wheel center (percent of the wheel box)
    const LABEL_RADIUS_PCT: f64 = 35.0;

    /// Page state for one wheel
    struct App {
        wheel: SavedWheel,
        settings: Settings,
        controller: SpinController,
        elimination: EliminationRound,
        rng: Pcg32,
        history: Option<DecisionLog<LocalStore>>,
        /// Pending resolution timer; dropping it cancels the callback
        timer: Option<BrowserTimeout>,
        countdown: Countdown,
        countdown_timer: Option<BrowserInterval>,
    }

    impl App {
        fn new(wheel: SavedWheel, settings: Settings, seed: u64) -> Self {
            let history = match LocalStore::open() {
                Ok(store) => Some(DecisionLog::new(store)),
                Err(err) => {
                    log::warn!("History disabled: {}", err);
                    None
                }
            };
            Self {
                controller: SpinController::from_settings(&settings),
                elimination: EliminationRound::new(settings.eliminate_winners),
                wheel,
                settings,
                rng: Pcg32::seed_from_u64(seed),
                history,
                timer: None,
                countdown: Countdown::default(),
                countdown_timer: None,
            }
        }

        fn stop_countdown(&mut self) {
            self.countdown.cancel();
            // Only clears the interval; safe from inside its own callback
            if let Some(timer) = self.countdown_timer.as_mut() {
                timer.cancel();
            }
        }

        fn active_sections(&self) -> Vec<decision_wheel::WheelSection> {
            self.elimination.active_sections(&self.wheel.sections)
        }

        /// Hand settled spins to the history log, exactly once each
        fn dispatch_events(&mut self) {
            for event in self.controller.drain_events() {
                match event {
                    SpinEvent::Settled(outcome) => {
                        if let Some(history) = self.history.as_mut() {
                            if let Err(err) = history.record_outcome(&self.wheel, &outcome, now_ms()) {
                                log::error!("Failed to record decision: {}", err);
                            }
                        }
                        self.elimination
                            .record_winner(&outcome.winner.id, &self.wheel.sections);
                    }
                    SpinEvent::Failed { error, .. } => log::warn!("Spin failed: {}", error),
                    _ => {}
                }
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn wheel_element(document: &Document) -> Option<HtmlElement> {
        document.get_element_by_id("wheel")?.dyn_into::<HtmlElement>().ok()
    }

    fn set_transform(document: &Document, rotation: f64, transition: &str) {
        if let Some(wheel) = wheel_element(document) {
            let style = wheel.style();
            let _ = style.set_property("transition", transition);
            let _ = style.set_property("transform", &format!("rotate({}deg)", rotation));
        }
    }

    /// Jump back to the resting angle within one turn, then animate forward
    /// to the raw rotation
    fn restart_spin_animation(document: &Document, started: &SpinStarted) {
        set_transform(document, started.start_rotation, "none");
        if let Some(wheel) = wheel_element(document) {
            // Force a reflow so the jump is applied before the transition
            let _ = wheel.offset_width();
        }
        set_transform(
            document,
            started.raw_rotation,
            &format!("transform {}ms cubic-bezier(0.17, 0.67, 0.12, 0.99)", started.duration_ms),
        );
    }

    fn set_countdown(document: &Document, countdown: &Countdown) {
        if let Some(el) = document.get_element_by_id("countdown") {
            if countdown.is_active() {
                el.set_text_content(Some(&countdown.remaining_secs().to_string()));
                let _ = el.set_attribute("class", "");
            } else {
                let _ = el.set_attribute("class", "hidden");
            }
        }
        if let Some(btn) = document.get_element_by_id("countdown-btn") {
            let label = if countdown.is_active() { "Cancel timer" } else { "Start timer" };
            btn.set_text_content(Some(label));
        }
    }

    fn set_result(document: &Document, text: Option<&str>) {
        if let Some(el) = document.get_element_by_id("result") {
            match text {
                Some(text) => {
                    el.set_text_content(Some(text));
                    let _ = el.set_attribute("class", "");
                }
                None => {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    fn set_spin_button(document: &Document, spinning: bool, can_spin: bool) {
        if let Some(btn) = document.get_element_by_id("spin-btn") {
            btn.set_text_content(Some(if spinning { "Spinning..." } else { "Spin!" }));
            if spinning || !can_spin {
                let _ = btn.set_attribute("disabled", "");
            } else {
                let _ = btn.remove_attribute("disabled");
            }
        }
    }

    /// Rebuild the slice and label elements for the current sections
    fn render_sections(document: &Document, app: &App) {
        let Some(wheel) = wheel_element(document) else {
            return;
        };
        wheel.set_inner_html("");

        let sections = app.active_sections();
        let arcs = match normalize_sections(&sections) {
            Ok(arcs) => arcs,
            Err(err) => {
                log::warn!("Cannot draw wheel: {}", err);
                return;
            }
        };

        for arc in &arcs {
            if let Ok(slice) = document.create_element("div") {
                let _ = slice.set_attribute("class", "wheel-slice");
                let _ = slice.set_attribute(
                    "style",
                    &format!(
                        "clip-path: {}; background-color: {};",
                        clip_path_css(&arc.default_outline()),
                        arc.section.color
                    ),
                );
                let _ = wheel.append_child(&slice);
            }
            if let Ok(label) = document.create_element("div") {
                let pos = arc.label_position(LABEL_RADIUS_PCT);
                let _ = label.set_attribute("class", "wheel-label");
                let _ = label.set_attribute(
                    "style",
                    &format!("left: {:.3}%; top: {:.3}%;", pos.x, pos.y),
                );
                label.set_text_content(Some(&arc.section.label));
                let _ = wheel.append_child(&label);
            }
        }
    }

    fn spin(app: &Rc<RefCell<App>>) {
        let Some(document) = document() else {
            return;
        };
        let mut guard = app.borrow_mut();
        let state = &mut *guard;

        let sections = state.active_sections();
        let started = match state.controller.request_spin(&sections, &mut state.rng) {
            Ok(started) => started,
            Err(err) => {
                match err.user_notice() {
                    Some(notice) => set_result(&document, Some(&notice)),
                    None => log::debug!("Spin ignored: {}", err),
                }
                return;
            }
        };

        if state.countdown.is_active() {
            state.stop_countdown();
            set_countdown(&document, &state.countdown);
        }
        set_result(&document, None);
        set_spin_button(&document, true, false);
        restart_spin_animation(&document, &started);

        let app_for_timer = Rc::clone(app);
        let ticket = started.ticket;
        match BrowserTimeout::schedule(started.duration_ms, move || settle(&app_for_timer, ticket)) {
            // The previous timer has already fired; dropping it here is a no-op
            Ok(timer) => {
                state.timer.replace(timer);
            }
            Err(err) => {
                log::error!("Failed to schedule spin resolution: {:?}", err);
                state.controller.teardown();
                set_spin_button(&document, false, true);
            }
        }
    }

    fn settle(app: &Rc<RefCell<App>>, ticket: SpinTicket) {
        let Some(document) = document() else {
            return;
        };
        let mut state = app.borrow_mut();

        // Arcs as they are now, not as they were when the spin started
        let sections = state.active_sections();
        let outcome = state.controller.fire(ticket, &sections);
        state.dispatch_events();

        if let Some(outcome) = outcome {
            let transition = format!("transform {}ms ease-out", state.settings.settle_transition_ms);
            set_transform(&document, outcome.aligned_rotation, &transition);
            set_result(&document, Some(outcome.winner.display_label()));
            if state.elimination.enabled {
                render_sections(&document, &state);
            }
        }

        let can_spin = state.controller.can_spin(&state.active_sections());
        set_spin_button(&document, false, can_spin);
    }

    fn countdown_tick(app: &Rc<RefCell<App>>) {
        let Some(document) = document() else {
            return;
        };
        let fired = {
            let mut state = app.borrow_mut();
            let fired = state.countdown.advance(COUNTDOWN_TICK_MS as f64);
            if fired {
                state.stop_countdown();
            }
            set_countdown(&document, &state.countdown);
            fired
        };
        if fired {
            spin(app);
        }
    }

    fn toggle_countdown(app: &Rc<RefCell<App>>) {
        let Some(document) = document() else {
            return;
        };
        let mut state = app.borrow_mut();

        if state.countdown.is_active() {
            state.stop_countdown();
        } else if state.controller.is_spinning() {
            return;
        } else {
            let secs = state.settings.countdown_secs;
            state.countdown.start(secs);
            let app_for_tick = Rc::clone(app);
            match BrowserInterval::start(COUNTDOWN_TICK_MS, move || countdown_tick(&app_for_tick)) {
                // Called from a click handler, never from the old interval's callback
                Ok(timer) => {
                    state.countdown_timer.replace(timer);
                }
                Err(err) => {
                    log::error!("Failed to start countdown: {:?}", err);
                    state.countdown.cancel();
                }
            }
        }
        set_countdown(&document, &state.countdown);
    }

    fn load_wheel() -> SavedWheel {
        let now = now_ms();
        match LocalStore::open() {
            Ok(store) => {
                let library = WheelLibrary::new(store);
                match library.list() {
                    Ok(wheels) if !wheels.is_empty() => {
                        let wheel = wheels
                            .into_iter()
                            .max_by(|a, b| a.last_modified.total_cmp(&b.last_modified));
                        if let Some(wheel) = wheel {
                            log::info!("Loaded wheel {:?}", wheel.name);
                            return wheel;
                        }
                    }
                    Ok(_) => {}
                    Err(err) => log::warn!("Could not read saved wheels: {}", err),
                }
            }
            Err(err) => log::warn!("{}", err),
        }
        SavedWheel::default_wheel(now)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Decision Wheel starting...");

        let Some(document) = document() else {
            log::error!("No document");
            return;
        };

        let settings = Settings::load();
        let seed = now_ms() as u64;
        let app = Rc::new(RefCell::new(App::new(load_wheel(), settings, seed)));
        log::info!("Wheel initialized with seed: {}", seed);

        render_sections(&document, &app.borrow());
        {
            let state = app.borrow();
            set_spin_button(&document, false, state.controller.can_spin(&state.active_sections()));
        }

        // Spin button
        if let Some(btn) = document.get_element_by_id("spin-btn") {
            let app = Rc::clone(&app);
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                spin(&app);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Countdown: start/cancel an automatic spin
        if let Some(btn) = document.get_element_by_id("countdown-btn") {
            let app = Rc::clone(&app);
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                toggle_countdown(&app);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        set_countdown(&document, &app.borrow().countdown);

        // Keyboard: space/enter spins
        if let Some(window) = web_sys::window() {
            let app = Rc::clone(&app);
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if matches!(event.key().as_str(), " " | "Enter") {
                    event.prevent_default();
                    spin(&app);
                }
            });
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        log::info!("Decision Wheel running!");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser entry point is wasm_main
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Decision Wheel (native) starting...");
    log::info!("The interactive wheel runs in the browser - build with `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let spins = args.next().and_then(|s| s.parse().ok()).unwrap_or(20usize);
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| decision_wheel::platform::now_ms() as u64);

    if let Err(err) = run_batch(spins, seed) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

/// Spin the default wheel `spins` times with a fixed-step clock
#[cfg(not(target_arch = "wasm32"))]
fn run_batch(spins: usize, seed: u64) -> Result<(), Box<dyn std::error::Error>> {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use decision_wheel::export::{ExportFormat, export_decisions};
    use decision_wheel::persistence::{DecisionLog, MemoryStore, SavedWheel};
    use decision_wheel::platform::now_ms;
    use decision_wheel::{Settings, SpinController};

    /// Frame step for the simulated animation clock (~60 Hz)
    const FRAME_MS: f64 = 1000.0 / 60.0;

    let settings = Settings::load();
    let wheel = SavedWheel::default_wheel(now_ms());
    let mut controller = SpinController::from_settings(&settings);
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut history = DecisionLog::new(MemoryStore::new());
    let mut tally = vec![0usize; wheel.sections.len()];
    let mut failed = 0usize;

    log::info!("Spinning {:?} {} times (seed {})", wheel.name, spins, seed);

    for _ in 0..spins {
        controller.request_spin(&wheel.sections, &mut rng)?;
        let outcome = match controller.advance_until_settled(FRAME_MS, &wheel.sections) {
            Ok(outcome) => outcome,
            Err(err) => {
                log::warn!("Spin failed to settle: {}", err);
                failed += 1;
                continue;
            }
        };
        history.record_outcome(&wheel, &outcome, now_ms())?;
        if let Some(i) = wheel.sections.iter().position(|s| s.id == outcome.winner.id) {
            tally[i] += 1;
        }
    }

    println!("\nResults for {} ({} spins, seed {}):", wheel.name, spins, seed);
    for (section, count) in wheel.sections.iter().zip(&tally) {
        println!("  {:<10} {:>4}", section.label, count);
    }

    if failed > 0 {
        println!("  {:<10} {:>4}", "(failed)", failed);
    }

    println!();
    println!("{}", export_decisions(&history.list()?, ExportFormat::Text)?);
    Ok(())
}
