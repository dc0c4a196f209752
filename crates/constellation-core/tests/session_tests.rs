// End-to-end session behavior: linking, threshold reset, epoch guarding,
// camera drift, and the audio seam.

use std::cell::RefCell;
use std::rc::Rc;

use constellation_core::{
    AudioCue, AudioError, EffectKind, EffectPayload, NullAudio, Session, SessionConfig,
};

fn make_session(num_beads: usize, max_links: u32, seed: u64) -> Session {
    let config = SessionConfig {
        num_beads,
        max_links_before_reset: max_links,
        ..SessionConfig::default()
    };
    Session::new(config, seed, Box::new(NullAudio))
}

#[test]
fn auto_commit_links_two_fresh_beads() {
    let mut session = make_session(4, 100, 1);

    let first = session.handle_pick_id(0, 10).expect("bead 0 exists");
    assert!(!first.linked);
    assert!(session.registry().get(0).unwrap().selected);

    let second = session.handle_pick_id(1, 20).expect("bead 1 exists");
    assert!(second.linked);
    assert_eq!(second.pair, Some((0, 1)));
    assert_eq!(session.linked_count(), 1);
    assert!(session.links().exists(0, 1));
    assert!(session.selection().selected().is_empty());
    assert!(!session.registry().get(0).unwrap().selected);
    assert!(!session.registry().get(1).unwrap().selected);
}

#[test]
fn toggling_a_bead_produces_no_link() {
    let mut session = make_session(4, 100, 1);

    session.handle_pick_id(2, 10);
    assert!(session.registry().get(2).unwrap().selected);

    let outcome = session.handle_pick_id(2, 20).unwrap();
    assert!(!outcome.linked);
    assert!(!session.registry().get(2).unwrap().selected);
    assert!(session.selection().selected().is_empty());
    assert_eq!(session.linked_count(), 0);
}

#[test]
fn relinking_the_same_pair_is_a_noop() {
    let mut session = make_session(4, 100, 1);

    session.handle_pick_id(0, 1);
    session.handle_pick_id(1, 2);
    assert_eq!(session.linked_count(), 1);

    // same pair again, either order
    session.handle_pick_id(1, 3);
    session.handle_pick_id(0, 4);
    assert_eq!(session.linked_count(), 1, "duplicate link must not count");
    assert_eq!(session.links().count(), 1);

    // only the first link's burst and overlay exist
    let update = session.on_frame(5);
    assert_eq!(update.effects.len(), 2);
}

#[test]
fn link_threshold_schedules_a_delayed_reset() {
    // Small session: 4 beads, reset after 2 links.
    let mut session = make_session(4, 2, 1);

    session.handle_pick_id(0, 10);
    session.handle_pick_id(1, 20);
    assert_eq!(session.linked_count(), 1);
    assert_eq!(session.pending_reset_at(), None);

    session.handle_pick_id(2, 30);
    session.handle_pick_id(3, 40);
    assert_eq!(session.linked_count(), 2);

    // one effect duration plus the grace period
    let fire_at = 40
        + session.config().link_effect_duration_ms
        + session.config().reset_grace_ms;
    assert_eq!(session.pending_reset_at(), Some(fire_at));

    let update = session.on_frame(fire_at - 1);
    assert!(!update.did_reset, "reset must wait out the grace period");
    assert_eq!(session.linked_count(), 2);

    let epoch_before = session.epoch();
    let update = session.on_frame(fire_at);
    assert!(update.did_reset);
    assert_eq!(session.epoch(), epoch_before + 1);
    assert_eq!(session.linked_count(), 0);
    assert_eq!(session.links().count(), 0);
    assert_eq!(session.registry().len(), 4);
    for (i, node) in session.registry().nodes().iter().enumerate() {
        assert_eq!(node.id, i as u32, "fresh ids must be sequential");
        assert!(!node.selected);
    }
    assert!(
        !update.released.is_empty(),
        "in-flight effect resources must be released on reset"
    );
}

#[test]
fn stale_scheduled_reset_is_suppressed_by_the_epoch_guard() {
    let mut session = make_session(4, 2, 1);

    session.handle_pick_id(0, 10);
    session.handle_pick_id(1, 20);
    session.handle_pick_id(2, 30);
    session.handle_pick_id(3, 40);
    let fire_at = session.pending_reset_at().expect("threshold armed");

    // A reset through another path starts a newer session first.
    session.reset(100);
    let epoch_after_manual = session.epoch();
    session.handle_pick_id(0, 200);
    session.handle_pick_id(1, 210);
    assert_eq!(session.linked_count(), 1);

    // The old timer fires into the new session and must be a benign no-op.
    let update = session.on_frame(fire_at);
    assert!(!update.did_reset, "stale reset must not fire");
    assert_eq!(session.epoch(), epoch_after_manual);
    assert_eq!(session.linked_count(), 1, "newer session state untouched");

    // and it is gone for good
    let update = session.on_frame(fire_at + 1000);
    assert!(!update.did_reset);
}

#[test]
fn manual_reset_clears_everything() {
    let mut session = make_session(6, 100, 3);
    session.handle_pick_id(0, 10);
    session.handle_pick_id(1, 20);
    session.handle_pick_id(2, 30);

    let released = session.reset(500);
    assert_eq!(released.len(), 2, "burst and overlay from the one link");
    assert_eq!(session.linked_count(), 0);
    assert_eq!(session.links().count(), 0);
    assert!(session.selection().selected().is_empty());
    assert_eq!(session.registry().len(), 6);
}

#[test]
fn camera_drifts_in_and_flags_completion() {
    let mut session = make_session(4, 100, 1);
    let start = session.config().initial_camera_distance;
    let target = session.config().drift_target_distance;
    let duration = session.config().camera_drift_ms;

    let update = session.on_frame(0);
    assert!(!update.drift_complete);
    assert!((session.camera().eye.z - start).abs() < 1e-3);

    let update = session.on_frame(duration / 2);
    assert!(!update.drift_complete);
    let mid = session.camera().eye.z;
    assert!(mid < start && mid > target, "mid-drift eye between endpoints");

    let update = session.on_frame(duration);
    assert!(update.drift_complete);
    assert!((session.camera().eye.z - target).abs() < 1e-3);

    // reset re-arms the drift
    session.reset(10_000);
    let update = session.on_frame(10_000);
    assert!(!update.drift_complete);
    assert!((session.camera().eye.z - start).abs() < 1e-3);
}

#[test]
fn overlay_text_is_deterministic_under_a_fixed_seed() {
    let text_of = |seed: u64| -> String {
        let mut session = make_session(4, 100, seed);
        session.handle_pick_id(0, 10);
        session.handle_pick_id(1, 20);
        let update = session.on_frame(30);
        update
            .effects
            .iter()
            .find_map(|s| match &s.payload {
                EffectPayload::TextOverlay { text, .. } => Some(text.clone()),
                _ => None,
            })
            .expect("overlay is live")
    };

    let a = text_of(42);
    let b = text_of(42);
    assert_eq!(a, b);
    assert!(a.contains("... resonates with ..."));
}

#[test]
fn overlays_are_placed_at_the_pair_midpoint() {
    let mut session = make_session(4, 100, 5);
    session.handle_pick_id(0, 10);
    session.handle_pick_id(1, 20);

    let update = session.on_frame(30);
    let overlay = update
        .effects
        .iter()
        .find(|s| s.kind == EffectKind::TextOverlay)
        .expect("overlay is live");
    let placement = update
        .overlays
        .iter()
        .find(|p| p.id == overlay.id)
        .expect("overlay has a placement");

    let vp = session.config().viewport;
    let pa = session
        .camera()
        .project_to_screen(session.registry().get(0).unwrap().position, vp)
        .unwrap();
    let pb = session
        .camera()
        .project_to_screen(session.registry().get(1).unwrap().position, vp)
        .unwrap();
    assert!((placement.x - (pa.x + pb.x) / 2.0).abs() < 1e-3);
    assert!((placement.y - (pa.y + pb.y) / 2.0).abs() < 1e-3);
    assert!((placement.alpha - overlay.strength).abs() < 1e-6);
}

#[test]
fn pointer_pick_goes_through_the_projection() {
    let mut session = make_session(1, 100, 9);
    let vp = session.config().viewport;
    let screen = session
        .camera()
        .project_to_screen(session.registry().get(0).unwrap().position, vp)
        .expect("single bead projects");

    let (id, outcome) = session
        .on_pointer(screen.x, screen.y, 10)
        .expect("pointer lands on the bead");
    assert_eq!(id, 0);
    assert!(!outcome.linked);
    assert!(session.registry().get(0).unwrap().selected);

    // empty space deselects nothing and picks nothing
    assert!(session.on_pointer(-5000.0, -5000.0, 20).is_none());
    assert!(session.registry().get(0).unwrap().selected);
}

// ---------------- audio seam ----------------

struct CountingAudio {
    plays: Rc<RefCell<u32>>,
}

impl AudioCue for CountingAudio {
    fn play_tone(&mut self, _: f32, _: f32, _: f32) -> Result<(), AudioError> {
        *self.plays.borrow_mut() += 1;
        Ok(())
    }
}

struct FailingAudio;

impl AudioCue for FailingAudio {
    fn play_tone(&mut self, _: f32, _: f32, _: f32) -> Result<(), AudioError> {
        Err(AudioError::NotReady)
    }
}

#[test]
fn each_link_plays_one_tone_unless_muted() {
    let plays = Rc::new(RefCell::new(0));
    let config = SessionConfig {
        num_beads: 6,
        ..SessionConfig::default()
    };
    let mut session = Session::new(
        config,
        1,
        Box::new(CountingAudio {
            plays: Rc::clone(&plays),
        }),
    );

    session.handle_pick_id(0, 10);
    session.handle_pick_id(1, 20);
    assert_eq!(*plays.borrow(), 1);

    session.set_muted(true);
    session.handle_pick_id(2, 30);
    session.handle_pick_id(3, 40);
    assert_eq!(*plays.borrow(), 1, "muted link is silent");
    assert_eq!(session.linked_count(), 2, "mute only skips the tone");

    session.set_muted(false);
    session.handle_pick_id(4, 50);
    session.handle_pick_id(5, 60);
    assert_eq!(*plays.borrow(), 2);
}

#[test]
fn audio_failure_degrades_gracefully() {
    let config = SessionConfig {
        num_beads: 4,
        ..SessionConfig::default()
    };
    let mut session = Session::new(config, 1, Box::new(FailingAudio));

    session.handle_pick_id(0, 10);
    let outcome = session.handle_pick_id(1, 20).unwrap();
    assert!(outcome.linked, "link happens even when the tone fails");
    assert_eq!(session.linked_count(), 1);

    let update = session.on_frame(30);
    assert_eq!(update.effects.len(), 2, "burst and overlay still enqueue");
}
