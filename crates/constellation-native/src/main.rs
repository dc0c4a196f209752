//! Headless driver: runs a full constellation session against the real
//! picker and camera, simulating a user who keeps linking beads. Useful for
//! watching the interaction loop (links, reveals, threshold resets) without
//! a renderer attached.

use std::thread;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use constellation_core::{
    burst_instances, Clock, EffectKind, Session, SessionConfig, Viewport,
};

const FRAME_MS: u64 = 16;
const CLICK_EVERY_MS: u64 = 600;
const RUN_UNTIL_RESETS: u32 = 2;

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = SessionConfig {
        viewport: Viewport::new(1280.0, 720.0),
        ..SessionConfig::default()
    };
    let mut session = Session::new(config, 42, Box::new(constellation_core::NullAudio));
    let mut pointer_rng = StdRng::seed_from_u64(7);

    let clock = Clock::new();
    let mut last_click_ms = 0u64;
    let mut resets_seen = 0u32;

    log::info!(
        "driving {} beads, reset after {} links",
        session.registry().len(),
        session.config().max_links_before_reset
    );

    loop {
        let now_ms = clock.now_ms();

        // Click on a random on-screen bead every so often, through the same
        // projection the picker uses.
        if now_ms.saturating_sub(last_click_ms) >= CLICK_EVERY_MS {
            last_click_ms = now_ms;
            if let Some((x, y)) = screen_position_of_random_bead(&session, &mut pointer_rng) {
                if let Some((id, outcome)) = session.on_pointer(x, y, now_ms) {
                    if let Some((a, b)) = outcome.pair {
                        log::info!("clicked bead {id}, committed pair {a} <-> {b}");
                    }
                }
            }
        }

        let update = session.on_frame(now_ms);
        if update.did_reset {
            resets_seen += 1;
            log::info!("session reset #{resets_seen} (epoch {})", session.epoch());
            if resets_seen >= RUN_UNTIL_RESETS {
                break;
            }
        }

        for snap in &update.effects {
            if snap.kind == EffectKind::TextOverlay && snap.progress < 0.01 {
                log::info!("overlay up for pair {:?}", snap.payload.pair());
            }
        }
        let bursts = burst_instances(&update.effects, session.registry());
        log::debug!(
            "frame t={now_ms}ms: {} live effects, {} bursts, {} overlays placed",
            update.effects.len(),
            bursts.len(),
            update.overlays.len()
        );

        thread::sleep(Duration::from_millis(FRAME_MS));
    }

    log::info!(
        "done: {} links committed in the final session",
        session.linked_count()
    );
    Ok(())
}

/// Project a randomly chosen bead to screen space so the simulated pointer
/// lands exactly on it.
fn screen_position_of_random_bead(session: &Session, rng: &mut StdRng) -> Option<(f32, f32)> {
    let nodes = session.registry().nodes();
    if nodes.is_empty() {
        return None;
    }
    let node = &nodes[rng.gen_range(0..nodes.len())];
    let screen = session
        .camera()
        .project_to_screen(node.position, session.config().viewport)?;
    (0.0..=1.0)
        .contains(&screen.depth)
        .then_some((screen.x, screen.y))
}
