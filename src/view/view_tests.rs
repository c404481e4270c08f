//! Event loop and rendering tests against `TestBackend`.

use super::*;
use crate::model::{Listing, ListingId};
use crate::paginator::{ManualClock, PageSize};
use ratatui::backend::TestBackend;

fn listings(n: usize) -> Vec<Listing> {
    (0..n)
        .map(|i| {
            let category = Category::ALL[i % Category::ALL.len()];
            Listing::new(
                ListingId::new(format!("l-{i}")).unwrap(),
                category,
                format!("Listing number {i}"),
            )
        })
        .collect()
}

fn config(infinite: bool) -> ResolvedConfig {
    ResolvedConfig {
        page_size: PageSize::new(4).unwrap(),
        infinite_scroll: infinite,
        ..ResolvedConfig::default()
    }
}

fn create_test_app(
    n: usize,
    infinite: bool,
    clock: &ManualClock,
) -> TuiApp<TestBackend, ManualClock> {
    let terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let state = AppState::with_clock(clock.clone(), listings(n), &config(infinite));
    TuiApp::new_for_test(terminal, state)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn screen(app: &TuiApp<TestBackend, ManualClock>) -> String {
    let buffer = app.terminal().backend().buffer();
    (0..buffer.area.height)
        .map(|y| {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol().to_string())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn tui_error_from_io_error() {
    let io_err = io::Error::other("test error");
    let tui_err: TuiError = io_err.into();
    assert!(matches!(tui_err, TuiError::Io(_)));
}

#[test]
fn load_input_wraps_read_failure_in_app_error() {
    use crate::model::InputError;
    use crate::source::FileSource;

    let path = std::env::temp_dir().join("cdir_view_load_input_vanished.jsonl");
    std::fs::write(&path, "").unwrap();
    let source = InputSource::File(FileSource::new(&path).unwrap());
    std::fs::remove_file(&path).unwrap();

    let err = load_input(source).unwrap_err();

    assert!(matches!(
        err,
        TuiError::App(AppError::InputRead(InputError::Io(_)))
    ));
    assert!(err.to_string().contains("Failed to read input"));
}

// ===== Quit =====

#[test]
fn handle_key_q_returns_true() {
    let mut app = create_test_app(3, false, &ManualClock::new());
    assert!(app.handle_key_test(key(KeyCode::Char('q'))));
}

#[test]
fn configured_bindings_replace_defaults() {
    use crate::config::KeySpec;
    use std::collections::BTreeMap;

    let overrides = BTreeMap::from([("quit".to_string(), KeySpec::One("Ctrl+q".to_string()))]);
    let bindings = KeyBindings::default().with_overrides(&overrides).unwrap();
    let mut app = create_test_app(3, false, &ManualClock::new()).with_key_bindings(bindings);

    assert!(!app.handle_key_test(key(KeyCode::Char('q'))));
    let ctrl_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
    assert!(app.handle_key_test(ctrl_q));
}

#[test]
fn handle_key_ctrl_c_returns_true_even_while_searching() {
    let mut app = create_test_app(3, false, &ManualClock::new());
    app.handle_key_test(key(KeyCode::Char('/')));
    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert!(app.handle_key_test(ctrl_c));
}

#[test]
fn q_while_searching_is_typed_not_quit() {
    let mut app = create_test_app(3, false, &ManualClock::new());
    app.handle_key_test(key(KeyCode::Char('/')));
    assert!(!app.handle_key_test(key(KeyCode::Char('q'))));
    assert_eq!(app.app_state().search().query(), "q");
}

// ===== Paged rendering =====

#[test]
fn paged_render_shows_first_page_and_footer() {
    let mut app = create_test_app(10, false, &ManualClock::new());
    app.render_test().unwrap();
    let text = screen(&app);

    assert!(text.contains("Listing number 0"));
    assert!(text.contains("Listing number 3"));
    assert!(!text.contains("Listing number 4"));
    assert!(text.contains("Page 1 of 3 · Showing 1–4 of 10"));
}

#[test]
fn n_key_advances_page() {
    let mut app = create_test_app(10, false, &ManualClock::new());
    app.handle_key_test(key(KeyCode::Char('n')));
    app.render_test().unwrap();
    let text = screen(&app);

    assert!(text.contains("Listing number 4"));
    assert!(text.contains("Page 2 of 3 · Showing 5–8 of 10"));
}

#[test]
fn digit_key_switches_category_and_resets_page() {
    let mut app = create_test_app(10, false, &ManualClock::new());
    app.handle_key_test(key(KeyCode::Char('n')));
    app.handle_key_test(key(KeyCode::Char('2')));

    assert_eq!(app.app_state().tab(), CategoryTab::Only(Category::Jobs));
    assert_eq!(app.app_state().paginator().page(), 1);
    assert_eq!(app.app_state().filtered_len(), 3);
}

#[test]
fn m_in_paged_mode_explains_itself() {
    let mut app = create_test_app(10, false, &ManualClock::new());
    app.handle_key_test(key(KeyCode::Char('m')));
    assert_eq!(
        app.app_state().status(),
        Some("Load more needs infinite scroll (--infinite)")
    );
}

// ===== Search =====

#[test]
fn search_typing_filters_and_esc_clears() {
    let mut app = create_test_app(12, false, &ManualClock::new());
    app.handle_key_test(key(KeyCode::Char('/')));
    for ch in "number 1".chars() {
        app.handle_key_test(key(KeyCode::Char(ch)));
    }
    // "number 1", "number 10", "number 11"
    assert_eq!(app.app_state().filtered_len(), 3);

    app.handle_key_test(key(KeyCode::Enter));
    app.render_test().unwrap();
    assert!(screen(&app).contains("Search"));

    app.handle_key_test(key(KeyCode::Esc));
    assert_eq!(app.app_state().filtered_len(), 12);
}

// ===== Infinite scroll =====

#[test]
fn infinite_render_fires_sentinel_and_shows_loading_row() {
    let clock = ManualClock::new();
    let mut app = create_test_app(10, true, &clock);

    // 4 rows fit easily, so the sentinel row is on screen in the first frame.
    app.render_test().unwrap();

    assert!(app.app_state().paginator().is_loading());
    assert!(screen(&app).contains("Loading more…"));

    clock.advance_ms(200);
    assert!(app.tick_test());
    app.render_test().unwrap();

    assert_eq!(app.app_state().visible_listings().len(), 8);
    assert!(screen(&app).contains("Listing number 7"));
    // Still inside the throttle window: the new sentinel is drawn but the
    // request is dropped.
    assert!(screen(&app).contains("↓ more"));
    assert!(!app.app_state().paginator().is_loading());
}

#[test]
fn idle_loop_keeps_loading_after_throttled_sentinel() {
    let clock = ManualClock::new();
    // Tall enough that the sentinel stays on screen for all 30 rows.
    let terminal = Terminal::new(TestBackend::new(80, 60)).unwrap();
    let state = AppState::with_clock(clock.clone(), listings(30), &config(true));
    let mut app = TuiApp::new_for_test(terminal, state);

    app.render_test().unwrap();
    clock.advance_ms(200);
    assert!(app.tick_test());
    app.render_test().unwrap();
    assert_eq!(app.app_state().visible_listings().len(), 8);
    assert!(app.app_state().next_deadline().is_some());

    // What the run loop does with no key presses: wake, tick, redraw if dirty.
    for _ in 0..40 {
        clock.advance_ms(250);
        if app.tick_test() {
            app.render_test().unwrap();
        }
    }

    assert_eq!(app.app_state().visible_listings().len(), 30);
    assert_eq!(app.app_state().next_deadline(), None);
    assert!(screen(&app).contains("End of list"));
}

#[test]
fn infinite_scroll_reaches_end_of_list() {
    let clock = ManualClock::new();
    let mut app = create_test_app(6, true, &clock);

    app.render_test().unwrap();
    clock.advance_ms(200);
    app.tick_test();
    app.render_test().unwrap();

    let text = screen(&app);
    assert!(text.contains("Listing number 5"));
    assert!(text.contains("Showing 1–6 of 6 · End of list"));
    assert!(!text.contains("↓ more"));
}

// ===== Detail & comments =====

#[test]
fn enter_opens_detail_and_comment_flow_posts() {
    let mut app = create_test_app(3, false, &ManualClock::new());
    app.handle_key_test(key(KeyCode::Enter));
    app.handle_key_test(key(KeyCode::Char('c')));
    for ch in "hello".chars() {
        app.handle_key_test(key(KeyCode::Char(ch)));
    }
    app.handle_key_test(key(KeyCode::Enter));

    assert_eq!(app.app_state().status(), Some("Comment posted"));
    let listing = app.app_state().detail_listing().unwrap();
    assert_eq!(listing.comments.len(), 1);

    app.render_test().unwrap();
    let text = screen(&app);
    assert!(text.contains("Details"));
    assert!(text.contains("hello"));
}

#[test]
fn empty_comment_surfaces_status() {
    let mut app = create_test_app(3, false, &ManualClock::new());
    app.handle_key_test(key(KeyCode::Enter));
    app.handle_key_test(key(KeyCode::Char('c')));
    app.handle_key_test(key(KeyCode::Enter));

    assert_eq!(app.app_state().status(), Some("Comment is empty"));
    assert_eq!(app.app_state().input_mode(), InputMode::Comment);
}

#[test]
fn c_without_detail_reports_no_listing() {
    let mut app = create_test_app(3, false, &ManualClock::new());
    app.handle_key_test(key(KeyCode::Char('c')));
    assert_eq!(app.app_state().status(), Some("No listing selected"));
}

#[test]
fn esc_closes_detail() {
    let mut app = create_test_app(3, false, &ManualClock::new());
    app.handle_key_test(key(KeyCode::Enter));
    app.handle_key_test(key(KeyCode::Esc));
    assert!(app.app_state().detail_listing().is_none());
}

// ===== Help =====

#[test]
fn help_overlay_swallows_keys_until_closed() {
    let mut app = create_test_app(10, false, &ManualClock::new());
    app.handle_key_test(key(KeyCode::Char('?')));
    assert!(app.app_state().help_visible());

    app.handle_key_test(key(KeyCode::Char('n')));
    assert_eq!(app.app_state().paginator().page(), 1);

    app.render_test().unwrap();
    assert!(screen(&app).contains("Keyboard Shortcuts"));

    app.handle_key_test(key(KeyCode::Esc));
    assert!(!app.app_state().help_visible());
}

// ===== Startup =====

#[test]
fn build_app_state_applies_startup_view() {
    let data = concat!(
        r#"{"id":"a","category":"jobs","title":"Cook"}"#,
        "\n",
        "not json\n",
        r#"{"id":"b","category":"dining","title":"Cafe Lumière"}"#,
        "\n",
    );
    let report = crate::source::StdinSource::from_reader(data.as_bytes())
        .load()
        .unwrap();
    let startup = StartupView {
        category: Some(Category::Dining),
        search: Some("cafe".into()),
    };

    let state = build_app_state(report, &ResolvedConfig::default(), &startup);

    assert_eq!(state.tab(), CategoryTab::Only(Category::Dining));
    assert_eq!(state.filtered_len(), 1);
    assert_eq!(
        state.status(),
        Some("Skipped 1 malformed line(s); see log")
    );
}
