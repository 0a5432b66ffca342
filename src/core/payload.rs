//! Atlas Payload
//!
//! Response structures and the assembler that merges a Sky Address, its
//! constellation, and the descriptor tables into one value. Field names
//! match the JSON consumed by atlas clients, so serialization is the API.

use chrono::NaiveDate;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::core::catalog::CelestialPoint;
use crate::core::celestial::{Connection, MAX_LINES};
use crate::core::error::Result;
use crate::core::sky_address::SkyAddress;
use crate::core::tables::{
    self, Gate, LunarPattern, SolarKey, GATES, LUNAR_PATTERNS, PRIME_STEPS, SEAL, SOLAR_KEYS,
};

// =============================================================================
// Payload Parts
// =============================================================================

/// The Lunar Pattern of a payload, with its prime step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternView {
    pub lunar_id: u8,
    pub name: &'static str,
    pub description: &'static str,
    pub prime_step: usize,
}

/// The Solar Key of a payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeySignatureView {
    pub solar_id: u8,
    pub name: &'static str,
    pub render_bias: &'static str,
    pub mood: &'static str,
}

/// Suggested rendering settings. Constant, independent of the constellation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderHints {
    pub intensity: f64,
    pub max_stars: usize,
    pub max_lines: usize,
    pub glow_mode: &'static str,
    pub line_mode: &'static str,
}

pub const RENDER_HINTS: RenderHints = RenderHints {
    intensity: 0.8,
    max_stars: 12,
    max_lines: MAX_LINES,
    glow_mode: "soft",
    line_mode: "clean",
};

// =============================================================================
// Atlas Payload
// =============================================================================

/// Everything known about one day of the spiral.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtlasPayload {
    /// Requested date; `None` when browsing by coordinate
    pub date: Option<NaiveDate>,
    pub anchor_date: NaiveDate,
    #[serde(rename = "K")]
    pub k: u16,
    pub sky_address: String,
    pub solar_month: u8,
    pub lunar_month: u8,
    pub prime_day: u8,
    pub gate: Gate,
    pub pattern: PatternView,
    pub key_signature: KeySignatureView,
    pub stars_highlighted: Vec<CelestialPoint>,
    pub lines: Vec<Connection>,
    pub render: RenderHints,
    pub message: &'static str,
    pub one_noble_thread: &'static str,
    pub seal: &'static str,
    /// Shorthand axes, present only for coordinate browsing
    #[serde(rename = "S", skip_serializing_if = "Option::is_none")]
    pub s: Option<u8>,
    #[serde(rename = "L", skip_serializing_if = "Option::is_none")]
    pub l: Option<u8>,
    #[serde(rename = "P", skip_serializing_if = "Option::is_none")]
    pub p: Option<u8>,
}

/// Merge an address and its constellation with the descriptor tables.
pub fn assemble(
    date: Option<NaiveDate>,
    anchor_date: NaiveDate,
    address: &SkyAddress,
    stars: Vec<CelestialPoint>,
    lines: Vec<Connection>,
) -> AtlasPayload {
    let gate = tables::gate_for(address);
    let key = tables::solar_key_for(address);
    let pattern = tables::lunar_pattern_for(address);

    AtlasPayload {
        date,
        anchor_date,
        k: address.k(),
        sky_address: address.to_string(),
        solar_month: address.solar_month(),
        lunar_month: address.lunar_month(),
        prime_day: address.prime_day(),
        gate: *gate,
        pattern: PatternView {
            lunar_id: pattern.id,
            name: pattern.name,
            description: pattern.description,
            prime_step: tables::prime_step_for(address),
        },
        key_signature: KeySignatureView {
            solar_id: key.id,
            name: key.name,
            render_bias: key.render_bias,
            mood: key.mood,
        },
        stars_highlighted: stars,
        lines,
        render: RENDER_HINTS,
        message: tables::message_for(gate.name),
        one_noble_thread: tables::thread_for(gate.name),
        seal: SEAL,
        s: None,
        l: None,
        p: None,
    }
}

impl AtlasPayload {
    /// Mark the payload as coordinate-browsed: drop the date, add `S`/`L`/`P`.
    pub fn into_coordinate_view(mut self) -> Self {
        self.date = None;
        self.s = Some(self.solar_month);
        self.l = Some(self.lunar_month);
        self.p = Some(self.prime_day);
        self
    }

    /// Number of anchor stars in the constellation.
    pub fn anchor_count(&self) -> usize {
        self.stars_highlighted.iter().filter(|s| s.is_anchor).count()
    }

    /// Compact JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// SHA-256 of the compact JSON, hex encoded.
    pub fn fingerprint(&self) -> Result<String> {
        let mut hasher = Sha256::new();
        hasher.update(serde_json::to_vec(self)?);
        Ok(format!("{:x}", hasher.finalize()))
    }

    /// Format the payload for terminal display.
    pub fn format_display(&self) -> String {
        let mut output = String::new();

        output.push_str("✨ CELESTIAL ATLAS\n");
        output.push_str("═══════════════════════════════════════════════\n\n");

        match self.date {
            Some(date) => output.push_str(&format!("📅 {}", date)),
            None => output.push_str("📅 (coordinate view)"),
        }
        output.push_str(&format!(
            "   Sky Address {}   K {}/1001\n\n",
            self.sky_address, self.k
        ));

        output.push_str(&format!("🚪 Gate {}: {}\n", self.gate.id, self.gate.name));
        output.push_str(&format!("    {}\n", self.gate.meaning));
        output.push_str(&format!("    Field gift: {}\n", self.gate.field_gift));
        output.push_str(&format!(
            "🔑 {} ({})\n",
            self.key_signature.name, self.key_signature.mood
        ));
        output.push_str(&format!(
            "🌙 {} pattern, prime step {}\n\n",
            self.pattern.name, self.pattern.prime_step
        ));

        output.push_str(&format!(
            "⭐ {} stars ({} anchors), {} lines\n",
            self.stars_highlighted.len(),
            self.anchor_count(),
            self.lines.len()
        ));
        for star in &self.stars_highlighted {
            let marker = if star.is_anchor { "★" } else { "·" };
            output.push_str(&format!(
                "    {} {:<18} RA {:>7.3}°  Dec {:>7.3}°\n",
                marker, star.name, star.ra, star.dec
            ));
        }
        for line in &self.lines {
            output.push_str(&format!("    {} - {}\n", line.0, line.1));
        }

        output.push_str(&format!("\n{}\n", self.message));
        output.push_str(&format!("Thread: {}\n\n", self.one_noble_thread));
        output.push_str(&format!("{}\n", self.seal));
        output
    }
}

// =============================================================================
// Conversion and Listings
// =============================================================================

/// Lightweight date → address conversion without the constellation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkyAddressConversion {
    pub date: NaiveDate,
    pub sky_address: String,
    pub solar_month: u8,
    pub lunar_month: u8,
    pub prime_day: u8,
    #[serde(rename = "K")]
    pub k: u16,
    pub spiral_position: String,
    pub seal: &'static str,
}

impl SkyAddressConversion {
    pub fn new(date: NaiveDate, address: &SkyAddress) -> Self {
        Self {
            date,
            sky_address: address.to_string(),
            solar_month: address.solar_month(),
            lunar_month: address.lunar_month(),
            prime_day: address.prime_day(),
            k: address.k(),
            spiral_position: address.spiral_position(),
            seal: SEAL,
        }
    }

    pub fn format_display(&self) -> String {
        format!(
            "{} → {} (K {})\n",
            self.date, self.sky_address, self.spiral_position
        )
    }
}

/// A gate with the names of its anchors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GateSummary {
    #[serde(flatten)]
    pub gate: Gate,
    pub anchors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GateListing {
    pub gates: Vec<GateSummary>,
    pub seal: &'static str,
}

impl GateListing {
    /// Build the listing, asking `anchors_of` for each gate's anchor names.
    pub fn new<F>(mut anchors_of: F) -> Self
    where
        F: FnMut(u8) -> Vec<String>,
    {
        let gates = GATES
            .iter()
            .map(|gate| GateSummary {
                gate: *gate,
                anchors: anchors_of(gate.id),
            })
            .collect();
        Self { gates, seal: SEAL }
    }

    pub fn format_display(&self) -> String {
        let mut output = String::new();
        for summary in &self.gates {
            output.push_str(&format!(
                "{}. {} - {}\n",
                summary.gate.id, summary.gate.name, summary.gate.meaning
            ));
            if !summary.anchors.is_empty() {
                output.push_str(&format!("    anchors: {}\n", summary.anchors.join(", ")));
            }
        }
        output
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolarKeyListing {
    pub solar_keys: Vec<SolarKey>,
    pub seal: &'static str,
}

/// All eleven Solar Keys.
pub fn solar_keys() -> SolarKeyListing {
    SolarKeyListing {
        solar_keys: SOLAR_KEYS.to_vec(),
        seal: SEAL,
    }
}

impl SolarKeyListing {
    pub fn format_display(&self) -> String {
        self.solar_keys
            .iter()
            .map(|k| format!("{:>2}. {} [{}] - {}\n", k.id, k.name, k.render_bias, k.mood))
            .collect()
    }
}

/// A Lunar Pattern with its prime step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternEntry {
    #[serde(flatten)]
    pub pattern: LunarPattern,
    pub prime_step: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LunarPatternListing {
    pub lunar_patterns: Vec<PatternEntry>,
    pub seal: &'static str,
}

/// All thirteen Lunar Patterns.
pub fn lunar_patterns() -> LunarPatternListing {
    LunarPatternListing {
        lunar_patterns: LUNAR_PATTERNS
            .iter()
            .zip(PRIME_STEPS.iter())
            .map(|(pattern, &prime_step)| PatternEntry {
                pattern: *pattern,
                prime_step,
            })
            .collect(),
        seal: SEAL,
    }
}

impl LunarPatternListing {
    pub fn format_display(&self) -> String {
        self.lunar_patterns
            .iter()
            .map(|e| {
                format!(
                    "{:>2}. {} (step {}) - {}\n",
                    e.pattern.id, e.pattern.name, e.prime_step, e.pattern.description
                )
            })
            .collect()
    }
}

// =============================================================================
// Tests
// =============================================================================
