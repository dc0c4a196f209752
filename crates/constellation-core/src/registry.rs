//! The authoritative collection of beads for the current session.

use glam::Vec3;
use rand::Rng;

use crate::config::{
    Category, FLOAT_AMPLITUDE_MAX, FLOAT_AMPLITUDE_MIN, FLOAT_SPEED_MAX, FLOAT_SPEED_MIN,
    INNER_EXCLUSION, SCENE_BOUNDS,
};

/// Stable per-session bead identity. Ids are sequential `0..N-1` and are
/// never reused within a session.
pub type NodeId = u32;

/// One selectable bead in the constellation.
#[derive(Clone, Debug)]
pub struct Node {
    pub id: NodeId,
    pub category: Category,
    /// Anchor the float animation oscillates around.
    pub base_position: Vec3,
    /// Current world position, updated once per frame.
    pub position: Vec3,
    /// Mutated exclusively by the selection machine (via the session).
    pub selected: bool,
    /// World-space sphere radius, immutable after creation.
    pub radius: f32,
    float_phase: f32,
    float_speed: f32,
    float_amplitude: f32,
}

impl Node {
    /// Bare node for hosts that assemble scenes by hand. The float
    /// animation is disabled (zero amplitude).
    pub fn new(id: NodeId, category: Category, position: Vec3, radius: f32) -> Self {
        Self {
            id,
            category,
            base_position: position,
            position,
            selected: false,
            radius,
            float_phase: 0.0,
            float_speed: 0.0,
            float_amplitude: 0.0,
        }
    }

    /// Advance the gentle vertical float around the base position.
    pub fn advance(&mut self, now_ms: u64) {
        let t = now_ms as f32 / 1000.0;
        let offset = (t * self.float_speed + self.float_phase).sin() * self.float_amplitude;
        self.position = self.base_position + Vec3::new(0.0, offset, 0.0);
    }
}

/// Owns the bead collection. `generate` is the only membership mutator;
/// there is no per-node removal.
#[derive(Debug, Default)]
pub struct Registry {
    nodes: Vec<Node>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire collection with `count` fresh beads.
    ///
    /// Categories cycle round-robin across the enum so every discipline is
    /// evenly represented. Positions are uniform within the scene bounds;
    /// beads that land inside the inner exclusion zone are pushed outward
    /// along their direction from the origin.
    pub fn generate(&mut self, count: usize, rng: &mut impl Rng) {
        self.nodes.clear();
        self.nodes.reserve(count);
        for i in 0..count {
            let category = Category::ALL[i % Category::ALL.len()];
            let mut base = Vec3::new(
                rng.gen_range(-SCENE_BOUNDS..=SCENE_BOUNDS),
                rng.gen_range(-SCENE_BOUNDS..=SCENE_BOUNDS),
                rng.gen_range(-SCENE_BOUNDS..=SCENE_BOUNDS),
            );
            if base.length() < SCENE_BOUNDS * INNER_EXCLUSION {
                let dir = base.try_normalize().unwrap_or(Vec3::X);
                base = dir * SCENE_BOUNDS * rng.gen_range(INNER_EXCLUSION..=1.0);
            }
            self.nodes.push(Node {
                id: i as NodeId,
                category,
                base_position: base,
                position: base,
                selected: false,
                radius: category.style().size,
                float_phase: rng.gen_range(0.0..std::f32::consts::TAU),
                float_speed: rng.gen_range(FLOAT_SPEED_MIN..=FLOAT_SPEED_MAX),
                float_amplitude: rng.gen_range(FLOAT_AMPLITUDE_MIN..=FLOAT_AMPLITUDE_MAX),
            });
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id as usize).filter(|n| n.id == id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id as usize).filter(|n| n.id == id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Per-frame float animation for every bead.
    pub fn advance_all(&mut self, now_ms: u64) {
        for node in &mut self.nodes {
            node.advance(now_ms);
        }
    }
}
