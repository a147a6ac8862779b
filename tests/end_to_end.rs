use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use taskjar::app::App;
use taskjar::jar::FileJar;
use taskjar::store::TaskStore;
use taskjar::theme::Theme;
use taskjar::view::Partition;

fn may_third() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 3).unwrap()
}

fn submit(app: &mut App<FileJar>, line: &str) {
    for c in line.chars() {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
    }
    app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
}

fn ctrl(app: &mut App<FileJar>, c: char) {
    app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
}

#[test]
fn tasks_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cookies.json");

    {
        let mut app = App::new(FileJar::new(&path)).unwrap().with_today(may_third);
        submit(&mut app, "walk dog");
        submit(&mut app, "pay rent /01/01/2025\\");
        submit(&mut app, "water plants");
        // completes "water plants", the newest and selected row
        ctrl(&mut app, 't');
        ctrl(&mut app, 'l');
    }

    let app = App::new(FileJar::new(&path)).unwrap();
    let active: Vec<_> = app
        .view
        .rows(Partition::Active)
        .iter()
        .map(|t| (t.text.as_str(), t.date.as_str()))
        .collect();
    assert_eq!(
        active,
        vec![("pay rent", "01/01/2025"), ("walk dog", "03/05/2024")]
    );
    assert_eq!(app.view.rows(Partition::Completed)[0].text, "water plants");
    assert_eq!(app.theme, Theme::Dark);
}

#[test]
fn empty_submit_touches_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cookies.json");

    let mut app = App::new(FileJar::new(&path)).unwrap().with_today(may_third);
    submit(&mut app, "");
    assert!(app.view.visible_rows().is_empty());
    assert!(!path.exists());
}

#[test]
fn walk_dog_lands_at_front_of_active() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cookies.json");

    let mut app = App::new(FileJar::new(&path)).unwrap().with_today(may_third);
    submit(&mut app, "older task");
    submit(&mut app, "walk dog");

    let stored = TaskStore::open(FileJar::new(&path)).unwrap().list().unwrap();
    assert_eq!(stored[0].text, "walk dog");
    assert_eq!(stored[0].date, "03/05/2024");
    assert!(!stored[0].completed);
    assert_eq!(app.view.rows(Partition::Active)[0], stored[0]);
}

#[test]
fn unreadable_jar_fails_to_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cookies.json");
    std::fs::create_dir(&path).unwrap();

    assert!(App::new(FileJar::new(&path)).is_err());
}
