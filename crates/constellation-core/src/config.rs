//! Category definitions and tuning constants shared by every frontend.

// Scene layout
pub const NUM_BEADS: usize = 50; // target 50-75
pub const SCENE_BOUNDS: f32 = 350.0; // how far beads can be placed from origin
pub const INNER_EXCLUSION: f32 = 0.3; // beads closer than this fraction of the bounds get pushed outward

// Session
pub const MAX_LINKS_BEFORE_RESET: u32 = 8;
pub const RESET_GRACE_MS: u64 = 1000; // extra time after the burst fades before teardown

// Camera
pub const INITIAL_CAMERA_DISTANCE: f32 = 800.0;
pub const DRIFT_TARGET_DISTANCE: f32 = INITIAL_CAMERA_DISTANCE / 2.0;
pub const CAMERA_DRIFT_MS: u64 = 2000;
pub const CAMERA_FOVY_RADIANS: f32 = std::f32::consts::FRAC_PI_3;
pub const CAMERA_ZNEAR: f32 = 1.0;
pub const CAMERA_ZFAR: f32 = 3000.0;

// Interaction
// Screen-space hit radius is the bead radius times this. A fixed multiplier,
// not a perspective-correct projection of the sphere.
pub const CLICK_RADIUS_SCALE: f32 = 2.0;

// Effects
pub const LINK_EFFECT_DURATION_MS: u64 = 2000; // visual burst
pub const TEXT_SNIPPET_DURATION_MS: u64 = 4000;
pub const OVERLAY_FADE_MS: u64 = 500; // fade-in/out edge for text snippets

// Bead float animation (radians per second / world units)
pub const FLOAT_SPEED_MIN: f32 = 0.6;
pub const FLOAT_SPEED_MAX: f32 = 1.8;
pub const FLOAT_AMPLITUDE_MIN: f32 = 5.0;
pub const FLOAT_AMPLITUDE_MAX: f32 = 15.0;

// Audio
pub const LINK_NOTES: [i32; 5] = [60, 64, 67, 72, 76]; // C major arpeggio around middle C
pub const LINK_TONE_VELOCITY: f32 = 0.6;
pub const LINK_TONE_DURATION_SEC: f32 = 0.5;

pub const OVERLAY_SEPARATOR: &str = "... resonates with ...";

/// One of the fixed disciplines a bead can represent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Philosophy,
    Music,
    Mathematics,
    Physics,
    Literature,
    VisualArts,
    ComputerScience,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Philosophy,
        Category::Music,
        Category::Mathematics,
        Category::Physics,
        Category::Literature,
        Category::VisualArts,
        Category::ComputerScience,
    ];

    /// Presentation record for this discipline.
    pub fn style(self) -> &'static CategoryStyle {
        &STYLES[self as usize]
    }
}

/// Per-discipline presentation data: legend name, marker color and size, and
/// the pool of quotes shown when two beads link.
#[derive(Debug)]
pub struct CategoryStyle {
    pub name: &'static str,
    pub color: [f32; 3],
    pub size: f32,
    pub quotes: &'static [&'static str],
}

static STYLES: [CategoryStyle; 7] = [
    CategoryStyle {
        name: "Philosophy",
        color: [0.39, 0.31, 0.71], // deep purple
        size: 25.0,
        quotes: &[
            "The only true wisdom is in knowing you know nothing. - Socrates",
            "Man is condemned to be free. - Sartre",
            "He who has a why to live can bear almost any how. - Nietzsche",
        ],
    },
    CategoryStyle {
        name: "Music",
        color: [0.24, 0.47, 0.86], // vibrant blue
        size: 30.0,
        quotes: &[
            "Music expresses that which cannot be said and on which it is impossible to be silent. - Victor Hugo",
            "Without music, life would be a mistake. - Nietzsche",
            "Where words fail, music speaks. - Hans Christian Andersen",
        ],
    },
    CategoryStyle {
        name: "Mathematics",
        color: [1.0, 0.75, 0.0], // golden yellow
        size: 20.0,
        quotes: &[
            "Mathematics is the music of reason. - James Joseph Sylvester",
            "The only way to learn mathematics is to do mathematics. - Paul Halmos",
            "God created the integers; all else is the work of man. - Kronecker",
        ],
    },
    CategoryStyle {
        name: "Physics",
        color: [0.0, 0.71, 0.71], // teal
        size: 28.0,
        quotes: &[
            "Imagination is more important than knowledge. - Albert Einstein",
            "The universe is under no obligation to make sense to you. - Neil deGrasse Tyson",
            "What we observe is not nature itself, but nature exposed to our method of questioning. - Heisenberg",
        ],
    },
    CategoryStyle {
        name: "Literature",
        color: [0.78, 0.20, 0.31], // crimson
        size: 26.0,
        quotes: &[
            "All the world's a stage, and all the men and women merely players. - Shakespeare",
            "The unexamined life is not worth living. - Socrates (via Plato)",
            "It is a far, far better thing that I do, than I have ever done. - Dickens",
        ],
    },
    CategoryStyle {
        name: "Visual Arts",
        color: [1.0, 0.47, 0.12], // orange
        size: 32.0,
        quotes: &[
            "Every child is an artist. The problem is how to remain an artist once he grows up. - Picasso",
            "Art washes away from the soul the dust of everyday life. - Picasso",
            "Color is my day-long obsession, joy and torment. - Monet",
        ],
    },
    CategoryStyle {
        name: "Computer Science",
        color: [0.20, 0.78, 0.39], // emerald
        size: 22.0,
        quotes: &[
            "The computer was born to solve problems that did not exist before. - Bill Gates",
            "Programs must be written for people to read, and only incidentally for machines to execute. - Abelson & Sussman",
            "The question of whether a computer can think is no more interesting than the question of whether a submarine can swim. - Dijkstra",
        ],
    },
];
