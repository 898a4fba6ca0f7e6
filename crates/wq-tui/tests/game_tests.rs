use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;

use wq_data::Dataset;
use wq_tui::{App, Silent, Theme};

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    let buf = terminal.backend().buffer();
    buf.content.iter().map(|cell| cell.symbol()).collect()
}

fn bundled_app() -> (App, Dataset) {
    let dataset = Dataset::bundled().expect("bundled dataset loads");
    let app = App::with_seed(&dataset, Theme::dark(), Box::new(Silent), 11);
    (app, dataset)
}

#[test]
fn test_bundled_game_starts_at_zero() {
    let (mut app, dataset) = bundled_app();
    let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
    terminal.draw(|frame| app.render(frame)).unwrap();

    let text = screen_text(&terminal);
    assert!(text.contains(&format!("0 / {}", dataset.unlocked_count())));
    assert!(text.contains(&dataset.name));
}

#[test]
fn test_typed_name_updates_counter() {
    let (mut app, dataset) = bundled_app();
    for c in "JAPAN".chars() {
        app.handle_event(Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::SHIFT)));
    }
    assert!(app.field().is_empty());

    let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
    terminal.draw(|frame| app.render(frame)).unwrap();
    assert!(screen_text(&terminal).contains(&format!("1 / {}", dataset.unlocked_count())));
}

#[test]
fn test_locked_regions_cannot_be_guessed() {
    let (mut app, _) = bundled_app();
    app.handle_event(Event::Paste("greenland".to_string()));
    assert_eq!(app.field().value(), "greenland");
    assert_eq!(app.progress().found, 0);
}

#[test]
fn test_full_game_reaches_completion() {
    let (mut app, dataset) = bundled_app();
    let names: Vec<String> = dataset
        .unlocked_records()
        .iter()
        .map(|record| record.accepted_names[0].clone())
        .collect();

    for name in &names {
        app.handle_event(Event::Paste(name.clone()));
        assert!(app.field().is_empty(), "{name} was not accepted");
    }

    assert!(app.tracker().is_game_over());
    assert!(app.progress().is_complete());
    assert!(app.field().is_disabled());

    let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
    terminal.draw(|frame| app.render(frame)).unwrap();
    let text = screen_text(&terminal);
    assert!(text.contains("All countries found!"));
    assert!(text.contains(&format!("{0} / {0}", names.len())));

    app.tick();
    assert!(!app.confetti().particles().is_empty());
}
