//! Static descriptor tables
//!
//! The three axes of a Sky Address each select one entry from a fixed table:
//!
//! - **P** (Prime Day, 1-7) → [`Gate`]
//! - **S** (Solar Month, 1-11) → [`SolarKey`]
//! - **L** (Lunar Month, 1-13) → [`LunarPattern`] and its prime step
//!
//! Tables are compiled in and keyed by contiguous ids starting at 1.

use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::Serialize;

use crate::core::sky_address::SkyAddress;

/// One of the seven Spiral Gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Gate {
    pub id: u8,
    pub name: &'static str,
    pub meaning: &'static str,
    pub function: &'static str,
    pub field_gift: &'static str,
}

/// Solar Key Signature: the visual mood of a Solar Month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SolarKey {
    pub id: u8,
    pub name: &'static str,
    pub render_bias: &'static str,
    pub mood: &'static str,
}

/// Lunar Pattern Type: the line character of a Lunar Month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LunarPattern {
    pub id: u8,
    pub name: &'static str,
    pub description: &'static str,
}

/// Prime step per Lunar Month, indexed by `L - 1`.
pub const PRIME_STEPS: [usize; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

pub const GATES: [Gate; 7] = [
    Gate {
        id: 1,
        name: "The Breath of Collapse",
        meaning: "Release → ignition, pressure becomes motion",
        function: "transition, release, ignition",
        field_gift: "Pressure becomes motion",
    },
    Gate {
        id: 2,
        name: "The Bridge of Becoming",
        meaning: "Crossing thresholds, identity upgrade",
        function: "crossing, identity upgrade",
        field_gift: "You become who you are by walking",
    },
    Gate {
        id: 3,
        name: "The Veil of Names",
        meaning: "Essence beyond labels",
        function: "shedding labels, returning to essence",
        field_gift: "Truth without performance",
    },
    Gate {
        id: 4,
        name: "The Golden Rose",
        meaning: "Bloom forward, expansion without abandonment",
        function: "blooming forward, return + expansion",
        field_gift: "The future opens without abandoning the past",
    },
    Gate {
        id: 5,
        name: "The World Tree",
        meaning: "Return + roots, memory paths",
        function: "above/below unity, memory paths, home roots",
        field_gift: "You return without shrinking",
    },
    Gate {
        id: 6,
        name: "The Crystal Crown",
        meaning: "Clarity + ascension, crystalline awareness",
        function: "ascension, crystalline awareness, crown alignment",
        field_gift: "Clean thought, clean power",
    },
    Gate {
        id: 7,
        name: "The Golden Harp",
        meaning: "Completion + convergence, harmonic resonance",
        function: "completion, harmonic resonance, convergence",
        field_gift: "The song becomes real",
    },
];

pub const SOLAR_KEYS: [SolarKey; 11] = [
    SolarKey {
        id: 1,
        name: "Dawn Key",
        render_bias: "soft",
        mood: "gentle entry, soft glow",
    },
    SolarKey {
        id: 2,
        name: "Edge Key",
        render_bias: "sharp",
        mood: "clean boundaries, sharp lines",
    },
    SolarKey {
        id: 3,
        name: "Forge Key",
        render_bias: "intense",
        mood: "high intensity, strong contrast",
    },
    SolarKey {
        id: 4,
        name: "Bloom Key",
        render_bias: "arcs",
        mood: "petals/arcs emphasized",
    },
    SolarKey {
        id: 5,
        name: "Root Key",
        render_bias: "lower",
        mood: "lower hemisphere focus",
    },
    SolarKey {
        id: 6,
        name: "Mirror Key",
        render_bias: "symmetry",
        mood: "symmetry amplification",
    },
    SolarKey {
        id: 7,
        name: "Storm Key",
        render_bias: "dynamic",
        mood: "flicker, dynamic pulses",
    },
    SolarKey {
        id: 8,
        name: "Crystal Key",
        render_bias: "lattice",
        mood: "clarity, lattice emphasis",
    },
    SolarKey {
        id: 9,
        name: "Harp Key",
        render_bias: "chords",
        mood: "chord grouping, musical spacing",
    },
    SolarKey {
        id: 10,
        name: "Void Key",
        render_bias: "minimal",
        mood: "minimalism, fewer lines, deeper meaning",
    },
    SolarKey {
        id: 11,
        name: "Seal Key",
        render_bias: "sacred",
        mood: "sacred geometry, cleanest expression",
    },
];

pub const LUNAR_PATTERNS: [LunarPattern; 13] = [
    LunarPattern { id: 1, name: "Root", description: "Downward stabilizing pull" },
    LunarPattern { id: 2, name: "Pulse", description: "Rhythmic flare points" },
    LunarPattern { id: 3, name: "Bridge", description: "Straight connective spans" },
    LunarPattern { id: 4, name: "Weave", description: "Soft mesh / veil threads" },
    LunarPattern { id: 5, name: "Spiral", description: "Petal / bloom arc" },
    LunarPattern { id: 6, name: "Branch", description: "Tree splits outward" },
    LunarPattern { id: 7, name: "Mirror", description: "Symmetry emphasis" },
    LunarPattern { id: 8, name: "Arrow", description: "Directional spear" },
    LunarPattern { id: 9, name: "Crown", description: "Upper lattice" },
    LunarPattern { id: 10, name: "Chord", description: "Musical grouping" },
    LunarPattern { id: 11, name: "Orbit", description: "Circular ring around anchors" },
    LunarPattern { id: 12, name: "Lightning", description: "Sudden diagonal snap lines" },
    LunarPattern { id: 13, name: "Seal", description: "Minimal sacred geometry, simplest form" },
];

/// Message used when a gate name has no template of its own.
pub const DEFAULT_MESSAGE: &str = "Sky locked. One gate active. Let the wind breathe.";

/// Thread used when a gate name has no template of its own.
pub const DEFAULT_THREAD: &str = "Activate one constellation and store one artifact.";

/// Closing line carried by every response.
pub const SEAL: &str = "Stored. Retrievable. Kind.";

lazy_static! {
    static ref MESSAGES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert(
            "The Breath of Collapse",
            "Release what no longer serves. Pressure becomes motion.",
        );
        m.insert(
            "The Bridge of Becoming",
            "Cross the threshold. Identity upgrades through movement.",
        );
        m.insert(
            "The Veil of Names",
            "Drop the labels. Return to essence. Truth without performance.",
        );
        m.insert("The Golden Rose", "Bloom forward. The future opens without abandoning the past.");
        m.insert(
            "The World Tree",
            "Return home. Memory paths light the way. Roots hold you steady.",
        );
        m.insert("The Crystal Crown", "Ascend with clarity. Clean thought creates clean power.");
        m.insert(
            "The Golden Harp",
            "Convergence day. The song becomes real. Integration complete.",
        );
        m
    };

    static ref THREADS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("The Breath of Collapse", "Release one old pattern. Create space for ignition.");
        m.insert("The Bridge of Becoming", "Take one step toward who you're becoming.");
        m.insert("The Veil of Names", "Speak your truth without performing for others.");
        m.insert("The Golden Rose", "Expand into something new while honoring your roots.");
        m.insert("The World Tree", "Connect with one memory that grounds you in home.");
        m.insert("The Crystal Crown", "Clear your mind. Let one clean thought lead your actions.");
        m.insert("The Golden Harp", "Complete one small thing. Let the harmony resonate.");
        m
    };
}

// =============================================================================
// Lookups
// =============================================================================

/// Prime step for a Lunar Month, `None` outside 1-13.
pub fn prime_step(lunar_month: u8) -> Option<usize> {
    index(lunar_month).and_then(|i| PRIME_STEPS.get(i).copied())
}

/// The active gate of an address (keyed by P).
pub fn gate_for(address: &SkyAddress) -> &'static Gate {
    &GATES[address.prime_day() as usize - 1]
}

/// The key signature of an address (keyed by S).
pub fn solar_key_for(address: &SkyAddress) -> &'static SolarKey {
    &SOLAR_KEYS[address.solar_month() as usize - 1]
}

/// The line pattern of an address (keyed by L).
pub fn lunar_pattern_for(address: &SkyAddress) -> &'static LunarPattern {
    &LUNAR_PATTERNS[address.lunar_month() as usize - 1]
}

/// The prime step of an address (keyed by L).
pub fn prime_step_for(address: &SkyAddress) -> usize {
    PRIME_STEPS[address.lunar_month() as usize - 1]
}

/// Message template for a gate name, falling back to [`DEFAULT_MESSAGE`].
pub fn message_for(gate_name: &str) -> &'static str {
    MESSAGES.get(gate_name).copied().unwrap_or(DEFAULT_MESSAGE)
}

/// Noble thread for a gate name, falling back to [`DEFAULT_THREAD`].
pub fn thread_for(gate_name: &str) -> &'static str {
    THREADS.get(gate_name).copied().unwrap_or(DEFAULT_THREAD)
}

fn index(id: u8) -> Option<usize> {
    (id as usize).checked_sub(1)
}
