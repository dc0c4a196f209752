//! Session controller: one explicit struct owning the registry, link store,
//! selection machine, effect scheduler, camera, and counters. Everything the
//! original interaction loop kept in shared globals lives here and is passed
//! explicitly to handlers.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::audio::{midi_to_hz, AudioCue, NullAudio};
use crate::camera::{Camera, CameraDrift, Viewport};
use crate::config::{
    CAMERA_DRIFT_MS, CAMERA_FOVY_RADIANS, CAMERA_ZFAR, CAMERA_ZNEAR, DRIFT_TARGET_DISTANCE,
    INITIAL_CAMERA_DISTANCE, LINK_EFFECT_DURATION_MS, LINK_NOTES, LINK_TONE_DURATION_SEC,
    LINK_TONE_VELOCITY, MAX_LINKS_BEFORE_RESET, NUM_BEADS, OVERLAY_SEPARATOR, RESET_GRACE_MS,
    TEXT_SNIPPET_DURATION_MS,
};
use crate::effects::{EffectId, EffectKind, EffectPayload, EffectScheduler, EffectSnapshot};
use crate::links::LinkStore;
use crate::picker;
use crate::registry::{NodeId, Registry};
use crate::select::{PickOutcome, SelectionMachine};

/// Constructor-time tuning. Defaults come straight from `config`.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub num_beads: usize,
    pub max_links_before_reset: u32,
    pub viewport: Viewport,
    pub initial_camera_distance: f32,
    pub drift_target_distance: f32,
    pub camera_drift_ms: u64,
    pub link_effect_duration_ms: u64,
    pub text_snippet_duration_ms: u64,
    pub reset_grace_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            num_beads: NUM_BEADS,
            max_links_before_reset: MAX_LINKS_BEFORE_RESET,
            viewport: Viewport::new(1280.0, 720.0),
            initial_camera_distance: INITIAL_CAMERA_DISTANCE,
            drift_target_distance: DRIFT_TARGET_DISTANCE,
            camera_drift_ms: CAMERA_DRIFT_MS,
            link_effect_duration_ms: LINK_EFFECT_DURATION_MS,
            text_snippet_duration_ms: TEXT_SNIPPET_DURATION_MS,
            reset_grace_ms: RESET_GRACE_MS,
        }
    }
}

/// A delayed full reset, armed when the link threshold is hit. Carries the
/// epoch it was scheduled under; if a reset happens through another path
/// first, the fire is suppressed as a benign no-op.
#[derive(Clone, Copy, Debug)]
struct PendingReset {
    fire_at_ms: u64,
    epoch: u64,
}

/// Screen placement for one live text overlay, recomputed every frame as the
/// anchor beads drift.
#[derive(Clone, Copy, Debug)]
pub struct OverlayPlacement {
    pub id: EffectId,
    pub x: f32,
    pub y: f32,
    pub alpha: f32,
}

/// Everything the host needs from one frame tick.
#[derive(Debug, Default)]
pub struct FrameUpdate {
    pub drift_complete: bool,
    /// True when this tick tore the session down and regenerated it.
    pub did_reset: bool,
    pub effects: Vec<EffectSnapshot>,
    pub overlays: Vec<OverlayPlacement>,
    /// Effect ids whose presentation resources must now be released.
    pub released: Vec<EffectId>,
}

/// The full per-session state between resets.
pub struct Session {
    config: SessionConfig,
    registry: Registry,
    links: LinkStore,
    selection: SelectionMachine,
    effects: EffectScheduler,
    camera: Camera,
    drift: CameraDrift,
    linked_count: u32,
    epoch: u64,
    pending_reset: Option<PendingReset>,
    muted: bool,
    rng: StdRng,
    audio: Box<dyn AudioCue>,
}

impl Session {
    pub fn new(config: SessionConfig, seed: u64, audio: Box<dyn AudioCue>) -> Self {
        let camera = Camera {
            eye: Vec3::new(0.0, 0.0, config.initial_camera_distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: config.viewport.aspect(),
            fovy_radians: CAMERA_FOVY_RADIANS,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        };
        let drift = CameraDrift::new(
            config.initial_camera_distance,
            config.drift_target_distance,
            0,
            config.camera_drift_ms,
        );
        let mut session = Self {
            config,
            registry: Registry::new(),
            links: LinkStore::new(),
            selection: SelectionMachine::new(),
            effects: EffectScheduler::new(),
            camera,
            drift,
            linked_count: 0,
            epoch: 0,
            pending_reset: None,
            muted: false,
            rng: StdRng::seed_from_u64(seed),
            audio,
        };
        session.reset(0);
        session
    }

    /// Session with default tuning and no audio backend.
    pub fn with_defaults(seed: u64) -> Self {
        Self::new(SessionConfig::default(), seed, Box::new(NullAudio))
    }

    /// Tear down and regenerate: fresh beads, cleared links, selection,
    /// counter and effects, camera drift re-armed. Returns the effect ids
    /// whose presentation resources the host must release.
    ///
    /// Bumps the epoch, so any delayed reset still in flight from the
    /// previous session fires as a no-op.
    pub fn reset(&mut self, now_ms: u64) -> Vec<EffectId> {
        self.epoch += 1;
        self.registry.generate(self.config.num_beads, &mut self.rng);
        self.links.clear();
        self.selection.clear();
        self.linked_count = 0;
        let released = self.effects.clear();
        self.camera.eye = Vec3::new(0.0, 0.0, self.config.initial_camera_distance);
        self.drift = CameraDrift::new(
            self.config.initial_camera_distance,
            self.config.drift_target_distance,
            now_ms,
            self.config.camera_drift_ms,
        );
        log::info!(
            "[session] reset: epoch {}, {} beads",
            self.epoch,
            self.registry.len()
        );
        released
    }

    /// Resolve a pointer-down to a bead and feed it to the selection
    /// machine. Returns the picked bead and what the pick did, or `None`
    /// when nothing was under the pointer.
    pub fn on_pointer(&mut self, x: f32, y: f32, now_ms: u64) -> Option<(NodeId, PickOutcome)> {
        let picked = picker::pick(
            x,
            y,
            self.registry.nodes(),
            &self.camera,
            self.config.viewport,
        )?;
        log::debug!("[pointer] picked bead {picked} at ({x:.0}, {y:.0})");
        let outcome = self.handle_pick_id(picked, now_ms)?;
        Some((picked, outcome))
    }

    /// Feed a bead directly to the selection machine.
    ///
    /// The id must come from the current registry; anything else is a caller
    /// bug, fatal in development and an ignored no-op in release.
    pub fn handle_pick_id(&mut self, id: NodeId, now_ms: u64) -> Option<PickOutcome> {
        if !self.registry.contains(id) {
            debug_assert!(false, "pick of unknown bead {id}");
            log::warn!("[pointer] ignoring pick of unknown bead {id}");
            return None;
        }

        let outcome = self.selection.handle_pick(id);
        match outcome.pair {
            Some((a, b)) => {
                self.set_selected(a, false);
                self.set_selected(b, false);
                self.create_link(a, b, now_ms);
            }
            None => {
                let on = self.selection.is_selected(id);
                self.set_selected(id, on);
                log::debug!(
                    "[click] bead {id} {}",
                    if on { "selected" } else { "deselected" }
                );
            }
        }
        Some(outcome)
    }

    fn set_selected(&mut self, id: NodeId, on: bool) {
        if let Some(node) = self.registry.get_mut(id) {
            node.selected = on;
        }
    }

    fn create_link(&mut self, a: NodeId, b: NodeId, now_ms: u64) {
        if !self.links.add(a, b) {
            log::debug!("[link] {a} <-> {b} already exists, ignoring");
            return;
        }
        self.linked_count += 1;
        log::info!(
            "[link] {a} <-> {b} ({}/{})",
            self.linked_count,
            self.config.max_links_before_reset
        );

        self.trigger_reveal(a, b, now_ms);

        if self.linked_count >= self.config.max_links_before_reset {
            let fire_at_ms =
                now_ms + self.config.link_effect_duration_ms + self.config.reset_grace_ms;
            self.pending_reset = Some(PendingReset {
                fire_at_ms,
                epoch: self.epoch,
            });
            log::info!("[session] link threshold reached, reset armed for t={fire_at_ms}ms");
        }
    }

    /// Burst, text overlay, and a best-effort tone for a fresh link.
    fn trigger_reveal(&mut self, a: NodeId, b: NodeId, now_ms: u64) {
        self.effects.enqueue(
            EffectPayload::Burst { pair: (a, b) },
            now_ms,
            self.config.link_effect_duration_ms,
        );
        let text = self.compose_overlay_text(a, b);
        self.effects.enqueue(
            EffectPayload::TextOverlay { pair: (a, b), text },
            now_ms,
            self.config.text_snippet_duration_ms,
        );

        if !self.muted {
            let midi = *LINK_NOTES.choose(&mut self.rng).unwrap_or(&LINK_NOTES[0]);
            let freq = midi_to_hz(midi as f32);
            if let Err(err) =
                self.audio
                    .play_tone(freq, LINK_TONE_VELOCITY, LINK_TONE_DURATION_SEC)
            {
                // the link, burst, and overlay still happen; only the tone is lost
                log::warn!("[audio] tone skipped: {err}");
            }
        }
    }

    /// One random quote from each bead's discipline, joined by the reveal
    /// separator. Deterministic under a fixed session seed.
    fn compose_overlay_text(&mut self, a: NodeId, b: NodeId) -> String {
        let quote_a = self.random_quote(a);
        let quote_b = self.random_quote(b);
        format!("{quote_a}\n\n{OVERLAY_SEPARATOR}\n\n{quote_b}")
    }

    fn random_quote(&mut self, id: NodeId) -> &'static str {
        let Some(category) = self.registry.get(id).map(|n| n.category) else {
            return "";
        };
        category
            .style()
            .quotes
            .choose(&mut self.rng)
            .copied()
            .unwrap_or("")
    }

    /// Per-frame update: fire a due delayed reset, animate beads, drift the
    /// camera, and sweep the effect scheduler.
    pub fn on_frame(&mut self, now_ms: u64) -> FrameUpdate {
        let mut update = FrameUpdate::default();

        if let Some(pending) = self.pending_reset {
            if now_ms >= pending.fire_at_ms {
                self.pending_reset = None;
                if pending.epoch == self.epoch {
                    update.released = self.reset(now_ms);
                    update.did_reset = true;
                } else {
                    log::debug!(
                        "[session] stale reset from epoch {} suppressed",
                        pending.epoch
                    );
                }
            }
        }

        self.registry.advance_all(now_ms);
        self.camera.eye = Vec3::new(0.0, 0.0, self.drift.eye_distance(now_ms));
        update.drift_complete = self.drift.is_complete(now_ms);

        let sweep = self.effects.tick(now_ms);
        update.released.extend(sweep.expired);
        update.overlays = self.place_overlays(&sweep.live);
        update.effects = sweep.live;
        update
    }

    /// Anchor each live text overlay at the screen midpoint of its pair.
    /// Overlays whose beads cannot be projected this frame get no placement
    /// but stay alive.
    fn place_overlays(&self, live: &[EffectSnapshot]) -> Vec<OverlayPlacement> {
        live.iter()
            .filter(|snap| snap.kind == EffectKind::TextOverlay)
            .filter_map(|snap| {
                let (a, b) = snap.payload.pair();
                let pa = self
                    .camera
                    .project_to_screen(self.registry.get(a)?.position, self.config.viewport)?;
                let pb = self
                    .camera
                    .project_to_screen(self.registry.get(b)?.position, self.config.viewport)?;
                Some(OverlayPlacement {
                    id: snap.id,
                    x: (pa.x + pb.x) / 2.0,
                    y: (pa.y + pb.y) / 2.0,
                    alpha: snap.strength,
                })
            })
            .collect()
    }

    // ---------------- accessors ----------------

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn links(&self) -> &LinkStore {
        &self.links
    }

    pub fn selection(&self) -> &SelectionMachine {
        &self.selection
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn linked_count(&self) -> u32 {
        self.linked_count
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// When the armed delayed reset will fire, if one is in flight.
    pub fn pending_reset_at(&self) -> Option<u64> {
        self.pending_reset.map(|p| p.fire_at_ms)
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        log::info!("[audio] {}", if muted { "muted" } else { "unmuted" });
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}
