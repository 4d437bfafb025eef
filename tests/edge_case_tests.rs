//! Edge case tests for rounds, thresholds and the idle-timeout policy


use staring_contest::app::{Presenter, RoundOutcome, StaringApp};
use staring_contest::capture::RecordedFaceStream;
use staring_contest::config::Config;
use staring_contest::leaderboard::MemoryStore;
use test_helpers::{blink_face, face_with_eye_gaps, open_face};

struct SilentPresenter;

impl Presenter for SilentPresenter {
    fn countdown_tick(&mut self, _value: u32) {}
    fn go(&mut self) {}
    fn blink(&mut self, _elapsed_seconds: f64, _username: &str) {}
}

fn fast_config() -> Config {
    let mut config = Config::default();
    config.countdown.tick_interval_ms = 1;
    config
}

#[test]
fn test_blink_on_first_frame_scores_zero_or_more() {
    let app = StaringApp::new(fast_config(), Box::new(MemoryStore::new())).unwrap();
    let mut stream = RecordedFaceStream::from_frames(vec![vec![blink_face()]], 0);

    let outcome = app
        .run_round(&mut stream, "ada", "UK", &mut SilentPresenter)
        .unwrap();
    match outcome {
        RoundOutcome::Scored(entry) => assert!(entry.record.score >= 0.0),
        RoundOutcome::Abandoned => panic!("blink frame must score"),
    }
}

#[test]
fn test_exact_threshold_frame_does_not_end_round() {
    let mut config = fast_config();
    config.detection.ear_threshold = 0.25;
    let app = StaringApp::new(config, Box::new(MemoryStore::new())).unwrap();

    // Lid gap 0.5 gives EAR exactly 0.25, equal to the threshold on every
    // frame. Equality is not a blink, so the stream runs out and the round
    // is abandoned.
    let frames = vec![vec![face_with_eye_gaps(0.5, 0.5)]; 5];
    let mut stream = RecordedFaceStream::from_frames(frames, 0);

    let outcome = app
        .run_round(&mut stream, "ada", "UK", &mut SilentPresenter)
        .unwrap();
    assert_eq!(outcome, RoundOutcome::Abandoned);
}

#[test]
fn test_faceless_frames_do_not_end_round() {
    let app = StaringApp::new(fast_config(), Box::new(MemoryStore::new())).unwrap();

    // Default policy has no idle timeout: empty frames are simply waited out.
    let mut frames: Vec<_> = (0..50).map(|_| Vec::new()).collect();
    frames.push(vec![open_face()]);
    frames.push(vec![blink_face()]);
    let mut stream = RecordedFaceStream::from_frames(frames, 0);

    let outcome = app
        .run_round(&mut stream, "ada", "UK", &mut SilentPresenter)
        .unwrap();
    assert!(matches!(outcome, RoundOutcome::Scored(_)));
}

#[test]
fn test_idle_timeout_abandons_when_enabled() {
    let mut config = fast_config();
    config.session.idle_timeout_secs = Some(0.05);
    let app = StaringApp::new(config, Box::new(MemoryStore::new())).unwrap();

    // Faceless frames at 100 fps for well past the timeout; the blink at the
    // end must never be reached.
    let mut frames: Vec<_> = (0..30).map(|_| Vec::new()).collect();
    frames.push(vec![blink_face()]);
    let mut stream = RecordedFaceStream::from_frames(frames, 100);

    let outcome = app
        .run_round(&mut stream, "ada", "UK", &mut SilentPresenter)
        .unwrap();
    assert_eq!(outcome, RoundOutcome::Abandoned);
    assert!(app.store().read_all().unwrap().is_empty());
}

#[test]
fn test_second_eye_alone_can_blink() {
    let app = StaringApp::new(fast_config(), Box::new(MemoryStore::new())).unwrap();

    // Left eye stays open; a wink of the right eye still ends the round.
    let frames = vec![
        vec![face_with_eye_gaps(0.7, 0.7)],
        vec![face_with_eye_gaps(0.7, 0.2)],
    ];
    let mut stream = RecordedFaceStream::from_frames(frames, 0);

    let outcome = app
        .run_round(&mut stream, "ada", "UK", &mut SilentPresenter)
        .unwrap();
    assert!(matches!(outcome, RoundOutcome::Scored(_)));
}

#[test]
fn test_two_faces_minimum_governs() {
    let app = StaringApp::new(fast_config(), Box::new(MemoryStore::new())).unwrap();

    // One face at EAR 0.35 and one at 0.15 with threshold 0.2: the minimum
    // across faces decides, so the first frame already blinks.
    let frames = vec![vec![
        face_with_eye_gaps(0.7, 0.7),
        face_with_eye_gaps(0.3, 0.3),
    ]];
    let mut stream = RecordedFaceStream::from_frames(frames, 0);

    let outcome = app
        .run_round(&mut stream, "ada", "UK", &mut SilentPresenter)
        .unwrap();
    assert!(matches!(outcome, RoundOutcome::Scored(_)));
}
