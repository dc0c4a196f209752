//! Time-bounded presentation effects, swept once per frame.
//!
//! The scheduler is the sole authority on effect lifetime: the host creates
//! its presentation resource when it first sees a snapshot id and must
//! release it when that id shows up in `Sweep::expired`. Effects never touch
//! simulation state.

use crate::config::OVERLAY_FADE_MS;
use crate::registry::{NodeId, Registry};

/// Handle the host uses to correlate snapshots with presentation resources.
pub type EffectId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectKind {
    /// Bright flash along the freshly-formed link.
    Burst,
    /// Floating text snippet anchored between the two beads.
    TextOverlay,
}

/// Kind-specific data carried for the effect's whole lifetime.
#[derive(Clone, Debug)]
pub enum EffectPayload {
    Burst { pair: (NodeId, NodeId) },
    TextOverlay { pair: (NodeId, NodeId), text: String },
}

impl EffectPayload {
    pub fn kind(&self) -> EffectKind {
        match self {
            EffectPayload::Burst { .. } => EffectKind::Burst,
            EffectPayload::TextOverlay { .. } => EffectKind::TextOverlay,
        }
    }

    pub fn pair(&self) -> (NodeId, NodeId) {
        match self {
            EffectPayload::Burst { pair } => *pair,
            EffectPayload::TextOverlay { pair, .. } => *pair,
        }
    }
}

#[derive(Clone, Debug)]
struct Effect {
    id: EffectId,
    created_ms: u64,
    duration_ms: u64,
    payload: EffectPayload,
}

/// Per-frame view of one live effect, enough for the host to draw it
/// without reaching into scheduler internals.
#[derive(Clone, Debug)]
pub struct EffectSnapshot {
    pub id: EffectId,
    pub kind: EffectKind,
    /// `elapsed / duration` in \[0, 1).
    pub progress: f32,
    /// Kind-specific eased value: burst intensity or overlay alpha.
    pub strength: f32,
    pub payload: EffectPayload,
}

/// Result of one sweep: live snapshots plus the ids whose resources the
/// host must now release.
#[derive(Debug, Default)]
pub struct Sweep {
    pub live: Vec<EffectSnapshot>,
    pub expired: Vec<EffectId>,
}

/// Unordered set of live effects with per-tick expiry. Durations are short
/// and counts small, so a linear sweep beats a priority queue here.
#[derive(Debug, Default)]
pub struct EffectScheduler {
    effects: Vec<Effect>,
    next_id: EffectId,
}

impl EffectScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an effect created at `now_ms`, alive for `duration_ms`.
    pub fn enqueue(&mut self, payload: EffectPayload, now_ms: u64, duration_ms: u64) -> EffectId {
        let id = self.next_id;
        self.next_id += 1;
        self.effects.push(Effect {
            id,
            created_ms: now_ms,
            duration_ms: duration_ms.max(1),
            payload,
        });
        id
    }

    /// Expire effects whose duration has elapsed and report eased values
    /// for the rest. An effect is alive while `now - created < duration`.
    pub fn tick(&mut self, now_ms: u64) -> Sweep {
        let mut sweep = Sweep {
            live: Vec::with_capacity(self.effects.len()),
            expired: Vec::new(),
        };

        let mut i = 0;
        while i < self.effects.len() {
            let effect = &self.effects[i];
            let elapsed = now_ms.saturating_sub(effect.created_ms);
            if elapsed >= effect.duration_ms {
                sweep.expired.push(effect.id);
                self.effects.swap_remove(i);
                continue;
            }
            let progress = elapsed as f32 / effect.duration_ms as f32;
            let strength = match effect.payload {
                EffectPayload::Burst { .. } => 1.0 - progress,
                EffectPayload::TextOverlay { .. } => overlay_alpha(elapsed, effect.duration_ms),
            };
            sweep.live.push(EffectSnapshot {
                id: effect.id,
                kind: effect.payload.kind(),
                progress,
                strength,
                payload: effect.payload.clone(),
            });
            i += 1;
        }
        sweep
    }

    /// Drop every live effect at once (session reset). Returns the ids so
    /// the host can release their resources.
    pub fn clear(&mut self) -> Vec<EffectId> {
        self.effects.drain(..).map(|e| e.id).collect()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

/// Trapezoidal alpha: linear fade-in over the first `OVERLAY_FADE_MS`, full
/// opacity in the middle, linear fade-out over the last edge.
fn overlay_alpha(elapsed_ms: u64, duration_ms: u64) -> f32 {
    let fade = OVERLAY_FADE_MS.min(duration_ms / 2).max(1) as f32;
    let e = elapsed_ms as f32;
    let d = duration_ms as f32;
    if e < fade {
        e / fade
    } else if e > d - fade {
        ((d - e) / fade).max(0.0)
    } else {
        1.0
    }
}

/// Instanced line data for the burst pass, one entry per live burst.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BurstInstance {
    pub a_pos: [f32; 3],
    pub intensity: f32,
    pub b_pos: [f32; 3],
    pub _pad: f32,
}

/// Build the burst instance buffer from the live snapshots of a sweep.
/// Bursts whose endpoints no longer exist (a reset landed mid-flight) are
/// skipped.
pub fn burst_instances(live: &[EffectSnapshot], registry: &Registry) -> Vec<BurstInstance> {
    let mut out = Vec::new();
    for snap in live {
        if snap.kind != EffectKind::Burst {
            continue;
        }
        let (a, b) = snap.payload.pair();
        let (Some(na), Some(nb)) = (registry.get(a), registry.get(b)) else {
            continue;
        };
        out.push(BurstInstance {
            a_pos: na.position.to_array(),
            intensity: snap.strength,
            b_pos: nb.position.to_array(),
            _pad: 0.0,
        });
    }
    out
}
