//! End-to-end round tests: recorded stream through session to leaderboard


use staring_contest::app::{Presenter, RoundOutcome, StaringApp};
use staring_contest::capture::RecordedFaceStream;
use staring_contest::config::Config;
use staring_contest::leaderboard::MemoryStore;
use staring_contest::ranking::Tier;
use staring_contest::Error;
use test_helpers::round_frames;

/// Records everything the core emits at the presentation boundary
#[derive(Default)]
struct RecordingPresenter {
    ticks: Vec<u32>,
    went: bool,
    blink: Option<(f64, String)>,
}

impl Presenter for RecordingPresenter {
    fn countdown_tick(&mut self, value: u32) {
        self.ticks.push(value);
    }

    fn go(&mut self) {
        self.went = true;
    }

    fn blink(&mut self, elapsed_seconds: f64, username: &str) {
        self.blink = Some((elapsed_seconds, username.to_string()));
    }
}

fn fast_config() -> Config {
    let mut config = Config::default();
    config.countdown.tick_interval_ms = 1;
    config
}

#[test]
fn test_full_round_scores_and_ranks() {
    let app = StaringApp::new(fast_config(), Box::new(MemoryStore::new())).unwrap();
    let mut stream = RecordedFaceStream::from_frames(round_frames(5), 0);
    let mut presenter = RecordingPresenter::default();

    let outcome = app
        .run_round(&mut stream, "ada", "UK", &mut presenter)
        .unwrap();

    // Exactly three ticks, strictly descending, then Go, then the blink.
    assert_eq!(presenter.ticks, vec![3, 2, 1]);
    assert!(presenter.went);
    let (elapsed, username) = presenter.blink.expect("blink event emitted");
    assert!(elapsed >= 0.0);
    assert_eq!(username, "ada");

    match outcome {
        RoundOutcome::Scored(entry) => {
            assert_eq!(entry.rank, 1);
            assert_eq!(entry.tier, Tier::Gold);
            assert_eq!(entry.record.username, "ada");
            assert_eq!(entry.record.team, "UK");
            assert!((entry.record.score - elapsed).abs() < 1e-9);
        }
        RoundOutcome::Abandoned => panic!("round with a blink frame must score"),
    }

    let records = app.store().read_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].username, "ada");
}

#[test]
fn test_successive_rounds_rerank() {
    let app = StaringApp::new(fast_config(), Box::new(MemoryStore::new())).unwrap();

    // First player blinks quickly, second survives longer.
    let mut first = RecordedFaceStream::from_frames(round_frames(0), 0);
    app.run_round(&mut first, "quick", "A", &mut RecordingPresenter::default())
        .unwrap();

    let mut second = RecordedFaceStream::from_frames(round_frames(200), 100);
    let outcome = app
        .run_round(&mut second, "steady", "B", &mut RecordingPresenter::default())
        .unwrap();

    let entry = match outcome {
        RoundOutcome::Scored(entry) => entry,
        RoundOutcome::Abandoned => panic!("second round must score"),
    };
    assert_eq!(entry.rank, 1, "longer stare must outrank the quick blink");

    let ranked = app.ranked_leaderboard().unwrap();
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].record.username, "steady");
    assert_eq!(ranked[0].tier, Tier::Gold);
    assert_eq!(ranked[1].record.username, "quick");
    assert_eq!(ranked[1].tier, Tier::Silver);
}

#[test]
fn test_duplicate_identity_blocks_round() {
    let app = StaringApp::new(fast_config(), Box::new(MemoryStore::new())).unwrap();

    let mut first = RecordedFaceStream::from_frames(round_frames(1), 0);
    app.run_round(&mut first, "ada", "UK", &mut RecordingPresenter::default())
        .unwrap();

    let mut second = RecordedFaceStream::from_frames(round_frames(1), 0);
    let mut presenter = RecordingPresenter::default();
    let err = app
        .run_round(&mut second, "ada", "UK", &mut presenter)
        .unwrap_err();

    assert!(matches!(err, Error::DuplicateIdentity(name) if name == "ada"));
    // Rejected before the countdown: nothing was presented or persisted.
    assert!(presenter.ticks.is_empty());
    assert!(!presenter.went);
    assert_eq!(app.store().read_all().unwrap().len(), 1);
}

#[test]
fn test_stream_ending_abandons_without_record() {
    let app = StaringApp::new(fast_config(), Box::new(MemoryStore::new())).unwrap();

    // Frames with faces but no blink, then the stream ends.
    let frames = vec![vec![test_helpers::open_face()]; 10];
    let mut stream = RecordedFaceStream::from_frames(frames, 0);

    let outcome = app
        .run_round(&mut stream, "ada", "UK", &mut RecordingPresenter::default())
        .unwrap();
    assert_eq!(outcome, RoundOutcome::Abandoned);
    assert!(app.store().read_all().unwrap().is_empty());
}
