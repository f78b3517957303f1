//! Advisory table

use serde::Serialize;
use severity::{DiseaseLabel, Severity};

/// Advice shown for a condition at a given severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdvisoryEntry {
    pub emoji: &'static str,
    pub title: &'static str,
    /// Human severity tag, e.g. "🟡 MEDIUM"
    pub severity_label: &'static str,
    /// Actions in the order they should be carried out
    pub actions: &'static [&'static str],
}

impl AdvisoryEntry {
    /// Whether this is the fallback for an unrecognized condition
    pub fn is_unknown(&self) -> bool {
        self == &UNKNOWN_ADVISORY
    }
}

/// Fallback for conditions outside the catalog
pub const UNKNOWN_ADVISORY: AdvisoryEntry = AdvisoryEntry {
    emoji: "❓",
    title: "Unknown Disease",
    severity_label: "UNKNOWN",
    actions: &["Contact agricultural extension"],
};

/// Look up the advisory for `label` at `severity`.
///
/// Total: anything outside the catalog resolves to [`UNKNOWN_ADVISORY`].
pub fn resolve_advisory(label: DiseaseLabel, severity: Severity) -> &'static AdvisoryEntry {
    use DiseaseLabel::*;
    use Severity::*;

    match (label, severity) {
        (HealthyLeaves, Low) => &HEALTHY_LOW,
        (HealthyLeaves, Medium) => &HEALTHY_MEDIUM,
        (HealthyLeaves, High) => &HEALTHY_HIGH,
        (BlisterBlight, Low) => &BLISTER_LOW,
        (BlisterBlight, Medium) => &BLISTER_MEDIUM,
        (BlisterBlight, High) => &BLISTER_HIGH,
        (BrownBlight, Low) => &BROWN_LOW,
        (BrownBlight, Medium) => &BROWN_MEDIUM,
        (BrownBlight, High) => &BROWN_HIGH,
        (LeafRedRust, Low) => &RUST_LOW,
        (LeafRedRust, Medium) => &RUST_MEDIUM,
        (LeafRedRust, High) => &RUST_HIGH,
        (RedSpiderMite, Low) => &MITE_LOW,
        (RedSpiderMite, Medium) => &MITE_MEDIUM,
        (RedSpiderMite, High) => &MITE_HIGH,
        (TeaMosquitoBug, Low) => &MOSQUITO_LOW,
        (TeaMosquitoBug, Medium) => &MOSQUITO_MEDIUM,
        (TeaMosquitoBug, High) => &MOSQUITO_HIGH,
        (Unknown, _) => &UNKNOWN_ADVISORY,
    }
}

// Healthy leaves

static HEALTHY_LOW: AdvisoryEntry = AdvisoryEntry {
    emoji: "✅",
    title: "Healthy Leaves - Optimal Conditions",
    severity_label: "🟢 LOW",
    actions: &[
        "Maintain current watering schedule",
        "Continue regular monitoring",
        "Keep humidity balanced (60-75%)",
        "Ensure good sunlight exposure",
    ],
};

static HEALTHY_MEDIUM: AdvisoryEntry = AdvisoryEntry {
    emoji: "⚠️",
    title: "Healthy Leaves - Environmental Stress",
    severity_label: "🟡 MEDIUM",
    actions: &[
        "Monitor environmental parameters closely",
        "Adjust irrigation to balance soil moisture",
        "Improve air circulation if humidity is high",
        "Increase shade if temperature is high",
        "Check daily for early disease symptoms",
    ],
};

static HEALTHY_HIGH: AdvisoryEntry = AdvisoryEntry {
    emoji: "🚨",
    title: "Healthy Leaves - Critical Stress",
    severity_label: "🔴 HIGH",
    actions: &[
        "Immediate environmental correction needed",
        "Adjust irrigation (too wet or too dry)",
        "Increase ventilation to control humidity",
        "Shade management if temperature is extreme",
        "Increase monitoring frequency to twice daily",
        "Be prepared for disease outbreak",
    ],
};

// Blister blight

static BLISTER_LOW: AdvisoryEntry = AdvisoryEntry {
    emoji: "🦠",
    title: "Blister Blight",
    severity_label: "🟢 LOW (Early spots detected)",
    actions: &[
        "Remove infected young leaves",
        "Avoid night irrigation",
        "Monitor humidity closely",
        "Ensure good air circulation",
    ],
};

static BLISTER_MEDIUM: AdvisoryEntry = AdvisoryEntry {
    emoji: "🦠",
    title: "Blister Blight",
    severity_label: "🟡 MEDIUM (Spreading on young shoots)",
    actions: &[
        "Apply recommended fungicide",
        "Improve airflow by pruning",
        "Reduce shade and leaf wetness",
        "Lower irrigation frequency",
        "Monitor all new shoots carefully",
    ],
};

static BLISTER_HIGH: AdvisoryEntry = AdvisoryEntry {
    emoji: "🦠",
    title: "Blister Blight",
    severity_label: "🔴 HIGH (Severe outbreak)",
    actions: &[
        "Immediate fungicide spraying required",
        "Stop overhead irrigation completely",
        "Restrict plucking until recovery",
        "Increase spray frequency (every 7-10 days)",
        "Remove severely infected branches",
        "Daily inspection of all foliage",
    ],
};

// Brown blight

static BROWN_LOW: AdvisoryEntry = AdvisoryEntry {
    emoji: "🍂",
    title: "Brown Blight",
    severity_label: "🟢 LOW",
    actions: &[
        "Remove infected mature leaves",
        "Improve soil drainage",
        "Avoid over-irrigation",
        "Monitor for spread",
    ],
};

static BROWN_MEDIUM: AdvisoryEntry = AdvisoryEntry {
    emoji: "🍂",
    title: "Brown Blight",
    severity_label: "🟡 MEDIUM",
    actions: &[
        "Apply systemic fungicide",
        "Reduce moisture stress on plants",
        "Increase field sanitation",
        "Improve drainage if water logging",
        "Reduce shade to increase light exposure",
    ],
};

static BROWN_HIGH: AdvisoryEntry = AdvisoryEntry {
    emoji: "🍂",
    title: "Brown Blight",
    severity_label: "🔴 HIGH",
    actions: &[
        "Emergency fungicide treatment required",
        "Stop irrigation temporarily",
        "Remove severely infected bushes",
        "Improve drainage immediately",
        "Spray every 5-7 days until controlled",
        "Quarantine severely affected areas",
    ],
};

// Leaf red rust

static RUST_LOW: AdvisoryEntry = AdvisoryEntry {
    emoji: "🍁",
    title: "Leaf Red Rust",
    severity_label: "🟢 LOW",
    actions: &[
        "Improve sunlight exposure",
        "Balance fertilization (reduce nitrogen)",
        "Monitor humidity trends",
        "Maintain good drainage",
    ],
};

static RUST_MEDIUM: AdvisoryEntry = AdvisoryEntry {
    emoji: "🍁",
    title: "Leaf Red Rust",
    severity_label: "🟡 MEDIUM",
    actions: &[
        "Apply copper-based spray",
        "Improve drainage to reduce moisture",
        "Prune shaded branches",
        "Increase air circulation",
        "Reduce leaf wetness duration",
    ],
};

static RUST_HIGH: AdvisoryEntry = AdvisoryEntry {
    emoji: "🍁",
    title: "Leaf Red Rust",
    severity_label: "🔴 HIGH",
    actions: &[
        "Repeated copper treatment (every 10-14 days)",
        "Heavy pruning of infected parts",
        "Long-term shade reduction plan",
        "Improve soil drainage urgently",
        "Reduce nitrogen fertilizer",
        "Daily monitoring for disease progression",
    ],
};

// Red spider mite

static MITE_LOW: AdvisoryEntry = AdvisoryEntry {
    emoji: "🕷",
    title: "Red Spider Mite",
    severity_label: "🟢 LOW",
    actions: &[
        "Increase irrigation to reduce stress",
        "Reduce dust in plantation",
        "Monitor underside of leaves",
        "Maintain humidity above 60%",
    ],
};

static MITE_MEDIUM: AdvisoryEntry = AdvisoryEntry {
    emoji: "🕷",
    title: "Red Spider Mite",
    severity_label: "🟡 MEDIUM",
    actions: &[
        "Spray approved miticide",
        "Increase humidity via misting",
        "Remove heavily infested leaves",
        "Increase irrigation frequency",
        "Monitor every 3-4 days",
    ],
};

static MITE_HIGH: AdvisoryEntry = AdvisoryEntry {
    emoji: "🕷",
    title: "Red Spider Mite",
    severity_label: "🔴 HIGH",
    actions: &[
        "Emergency miticide application required",
        "Stop plucking temporarily",
        "Continuous monitoring every 48 hours",
        "Increase irrigation to maximum",
        "Daily misting to increase humidity",
        "Repeat miticide sprays every 5-7 days",
    ],
};

// Tea mosquito bug

static MOSQUITO_LOW: AdvisoryEntry = AdvisoryEntry {
    emoji: "🦟",
    title: "Tea Mosquito Bug",
    severity_label: "🟢 LOW",
    actions: &[
        "Remove early affected shoots",
        "Maintain balanced shade",
        "Monitor young buds",
        "Maintain good air circulation",
    ],
};

static MOSQUITO_MEDIUM: AdvisoryEntry = AdvisoryEntry {
    emoji: "🦟",
    title: "Tea Mosquito Bug",
    severity_label: "🟡 MEDIUM",
    actions: &[
        "Apply insecticide spray",
        "Prune infested branches",
        "Reduce alternate host plants",
        "Monitor bud damage closely",
    ],
};

static MOSQUITO_HIGH: AdvisoryEntry = AdvisoryEntry {
    emoji: "🦟",
    title: "Tea Mosquito Bug",
    severity_label: "🔴 HIGH",
    actions: &[
        "Immediate insecticide treatment required",
        "Stop plucking affected areas",
        "Continuous pest surveillance",
        "Remove heavily infested shoots",
        "Repeat spray every 7-10 days",
        "Remove alternative host plants nearby",
    ],
};
