use encore::application::app::Application;
use encore::core::events::{AppEvent, UiEvent};
use encore::core::models::{RepeatMode, TrackDescriptor};
use encore::core::traits::PlayerSurface;
use encore::modules::navigation::resolver::NavigationResolver;
use encore::modules::playback::silent_surface::{SilentSurface, SurfaceCall};
use encore::modules::storage::json_backend::JsonPreferenceStore;
use encore::modules::storage::preferences::Preferences;
use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::tempdir;

fn tracks(n: usize) -> Vec<TrackDescriptor> {
    (0..n)
        .map(|i| {
            TrackDescriptor::new(i, &format!("Track {}", i), "Artist", format!("/music/{}.mp3", i))
        })
        .collect()
}

fn open(dir: &Path, n: usize) -> Application {
    let store = JsonPreferenceStore::open_in(dir).unwrap();
    let mut app = Application::new(tracks(n), Preferences::new(Box::new(store))).with_seed(5);
    app.init().unwrap();
    app
}

fn send(app: &mut Application, events: &[UiEvent]) {
    for event in events {
        app.event_sender().send(AppEvent::Ui(event.clone())).unwrap();
    }
    app.run_once().unwrap();
}

#[test]
fn settings_and_collections_survive_a_restart() {
    let dir = tempdir().unwrap();
    let liked = tracks(4)[2].id.clone();

    {
        let mut app = open(dir.path(), 4);
        send(
            &mut app,
            &[
                UiEvent::ShuffleToggleRequested,
                UiEvent::RepeatCycleRequested,
                UiEvent::TrackPicked { index: 2 },
                UiEvent::LikeCurrentRequested,
                UiEvent::DarkToggleRequested,
            ],
        );
        app.cleanup().unwrap();
    }

    let app = open(dir.path(), 4);
    assert!(app.navigation().is_shuffle_enabled());
    assert_eq!(app.navigation().repeat_mode(), RepeatMode::All);
    assert!(app.state().dark);
    assert!(app.state().favorites.contains(&liked));
    assert_eq!(app.state().recent.as_slice(), &[liked]);
}

#[test]
fn shuffled_walk_visits_every_track_once() {
    let dir = tempdir().unwrap();
    let mut app = open(dir.path(), 5);
    send(&mut app, &[UiEvent::ShuffleSet { enabled: true }, UiEvent::TrackPicked { index: 3 }]);

    let mut visited = vec![app.state().playback.now_playing.unwrap()];
    for _ in 0..4 {
        send(&mut app, &[UiEvent::NextTrackRequested]);
        visited.push(app.state().playback.now_playing.unwrap());
    }

    assert_eq!(visited[0], 3);
    visited.sort_unstable();
    assert_eq!(visited, vec![0, 1, 2, 3, 4]);
}

#[test]
fn repeat_one_restarts_when_track_finishes() {
    let dir = tempdir().unwrap();
    let mut app = open(dir.path(), 3);
    send(
        &mut app,
        &[
            UiEvent::RepeatCycleRequested,
            UiEvent::RepeatCycleRequested,
            UiEvent::TrackPicked { index: 1 },
        ],
    );
    assert_eq!(app.navigation().repeat_mode(), RepeatMode::One);

    let mut surface = SilentSurface::new();
    surface.load("/music/1.mp3");
    surface.finish();
    let mut app = app.with_surface(Box::new(surface));

    app.tick(Instant::now()).unwrap();
    app.run_once().unwrap();

    assert_eq!(app.navigation().current_index(), Some(1));
    assert!(!app.surface().is_paused());
    assert!(!app.surface().has_finished());
}

#[test]
fn stalled_selection_is_retried_with_play() {
    let dir = tempdir().unwrap();
    let app = open(dir.path(), 2);
    let mut app = app.with_surface(Box::new(SilentSurface::new().stalling()));

    send(&mut app, &[UiEvent::TrackPicked { index: 0 }]);
    assert!(app.surface().is_paused());

    app.tick(Instant::now() + Duration::from_secs(1)).unwrap();
    assert!(!app.surface().is_paused());
}

#[test]
fn recorded_calls_reach_the_surface() {
    let mut surface = SilentSurface::new();
    let mut navigation = NavigationResolver::new(tracks(2));

    assert!(navigation.select(1, &mut surface));
    assert_eq!(surface.calls(), &[SurfaceCall::Select("/music/1.mp3".to_string())]);
}
