//! Rule table and evaluation
//!
//! Rules are checked strictly in table order and only the first match is
//! reported. Later rules are broader and only catch what earlier ones miss,
//! so the order is part of the behavior. Soil moisture is in raw ADC counts.

use crate::alert::{AlertTemplate, RiskAlert};
use chrono::{DateTime, Utc};
use sensor_data::SensorSample;
use serde::{Deserialize, Serialize};
use severity::Severity;
use std::time::Duration;
use tracing::debug;

/// Identity of a risk rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    BlisterBlight,
    BrownBlight,
    RedRust,
    ElevatedRisk,
    SoilMoistureExtreme,
}

/// A single disease-risk rule
pub struct DiseaseRule {
    pub id: RuleId,
    /// Lower is evaluated first
    pub priority: u8,
    pub predicate: fn(&SensorSample) -> bool,
    template: fn(&SensorSample) -> &'static AlertTemplate,
}

impl DiseaseRule {
    /// Whether the rule fires for `sample`
    pub fn matches(&self, sample: &SensorSample) -> bool {
        (self.predicate)(sample)
    }

    /// Build this rule's alert for `sample`
    pub fn alert(&self, sample: &SensorSample) -> RiskAlert {
        (self.template)(sample).fill(self.id, sample)
    }
}

/// Rules in evaluation order
pub static RULES: [DiseaseRule; 5] = [
    DiseaseRule {
        id: RuleId::BlisterBlight,
        priority: 1,
        predicate: |s| s.humidity > 80.0 && (22.0..=28.0).contains(&s.temperature),
        template: |_| &BLISTER_BLIGHT,
    },
    DiseaseRule {
        id: RuleId::BrownBlight,
        priority: 2,
        predicate: |s| {
            s.humidity > 75.0 && (18.0..=25.0).contains(&s.temperature) && s.soil_moisture > 2650.0
        },
        template: |_| &BROWN_BLIGHT,
    },
    DiseaseRule {
        id: RuleId::RedRust,
        priority: 3,
        predicate: |s| {
            (70.0..=85.0).contains(&s.humidity) && s.soil_moisture < 2400.0 && s.temperature >= 22.0
        },
        template: |_| &RED_RUST,
    },
    DiseaseRule {
        id: RuleId::ElevatedRisk,
        priority: 4,
        predicate: |s| s.humidity > 70.0 && (20.0..=28.0).contains(&s.temperature),
        template: |_| &ELEVATED_RISK,
    },
    DiseaseRule {
        id: RuleId::SoilMoistureExtreme,
        priority: 5,
        predicate: |s| s.soil_moisture > SOIL_WET_LIMIT || s.soil_moisture < 2300.0,
        template: |s| {
            if s.soil_moisture > SOIL_WET_LIMIT {
                &SOIL_TOO_WET
            } else {
                &SOIL_TOO_DRY
            }
        },
    },
];

const SOIL_WET_LIMIT: f64 = 2700.0;

/// Evaluate the rules against `sample` and return the first match, if any
pub fn evaluate_risk(sample: &SensorSample) -> Option<RiskAlert> {
    let rule = RULES.iter().find(|rule| rule.matches(sample));

    match rule {
        Some(rule) => {
            debug!(
                "Risk rule {:?} matched (T={}, H={}, M={})",
                rule.id, sample.temperature, sample.humidity, sample.soil_moisture
            );
            Some(rule.alert(sample))
        }
        None => {
            debug!("No risk rule matched");
            None
        }
    }
}

/// Evaluate only when a sample younger than `max_age` is available.
///
/// Missing or stale data raises nothing: absence of data is not evidence of
/// risk.
pub fn evaluate_live_risk(
    sample: Option<&SensorSample>,
    now: DateTime<Utc>,
    max_age: Duration,
) -> Option<RiskAlert> {
    match sample {
        Some(sample) if sample.is_fresh(now, max_age) => evaluate_risk(sample),
        Some(sample) => {
            debug!("Skipping risk evaluation: sample is {:?} old", sample.age(now));
            None
        }
        None => None,
    }
}

static BLISTER_BLIGHT: AlertTemplate = AlertTemplate {
    title: "🚨 CRITICAL: Blister Blight Risk",
    severity: Severity::High,
    disease: "Blister Blight",
    message: "CRITICAL CONDITIONS DETECTED! High humidity combined with moderate temperature creates ideal conditions for Blister Blight outbreak.",
    action: "IMMEDIATE ACTION REQUIRED within 24 hours!",
    recommendations: &[
        "✂️ Pluck and remove infected young leaves immediately",
        "🔥 Burn or bury infected material - DO NOT leave in field",
        "💊 Apply Copper oxychloride or Hexaconazole fungicide",
        "🌬️ Improve air circulation by pruning dense bushes",
        "💧 Avoid overhead irrigation",
        "🔄 Repeat spray after 7-10 days",
    ],
};

static BROWN_BLIGHT: AlertTemplate = AlertTemplate {
    title: "⚠️ HIGH: Brown Blight Risk",
    severity: Severity::High,
    disease: "Brown Blight",
    message: "Cool temperature with high humidity and excessive moisture detected. Brown Blight fungal infection likely.",
    action: "Take action within 24-48 hours.",
    recommendations: &[
        "🍂 Remove all affected leaves immediately",
        "💧 Improve drainage - avoid water stagnation",
        "💊 Apply Carbendazim or Mancozeb fungicide",
        "🌿 For mild stage: Use Neem-based bio-fungicide",
        "🔄 Repeat treatment every 10-14 days",
        "🌱 Monitor plant closely for spread",
    ],
};

static RED_RUST: AlertTemplate = AlertTemplate {
    title: "⚠️ MEDIUM: Red Rust Risk",
    severity: Severity::Medium,
    disease: "Red Rust",
    message: "Poor soil nutrition combined with stress conditions. Plants weakened and susceptible to Red Rust.",
    action: "Address within 2-3 days to prevent spread.",
    recommendations: &[
        "🍁 Remove heavily infected leaves",
        "🌾 Add compost or organic manure immediately",
        "⚗️ Apply balanced NPK fertilizer",
        "💊 Spray copper-based fungicide or 1% Bordeaux mixture",
        "🔄 Repeat spray every 15 days",
        "☀️ Regulate shade levels in the field",
    ],
};

static ELEVATED_RISK: AlertTemplate = AlertTemplate {
    title: "ℹ️ Elevated Disease Risk",
    severity: Severity::Low,
    disease: "General Alert",
    message: "Environmental conditions favor fungal disease development. Preventive action recommended.",
    action: "Monitor closely and apply preventive measures.",
    recommendations: &[
        "👀 Conduct daily field inspections",
        "🌬️ Maintain good air circulation",
        "💧 Keep drainage systems clear",
        "🌱 Maintain regular plucking cycle",
        "📋 Check for early disease symptoms",
        "🛡️ Consider preventive bio-fungicide spray",
    ],
};

static SOIL_TOO_WET: AlertTemplate = AlertTemplate {
    title: "⚠️ Soil Moisture Alert",
    severity: Severity::Medium,
    disease: "Environmental Stress",
    message: "Excessive soil moisture detected. Risk of root rot and fungal diseases.",
    action: "Improve drainage immediately.",
    recommendations: &[
        "💧 Check and clear drainage channels",
        "🌊 Reduce irrigation frequency",
        "🌱 Monitor for fungal growth",
        "🔍 Inspect roots for rot symptoms",
    ],
};

static SOIL_TOO_DRY: AlertTemplate = AlertTemplate {
    title: "⚠️ Soil Moisture Alert",
    severity: Severity::Medium,
    disease: "Environmental Stress",
    message: "Low soil moisture detected. Plant stress increases disease susceptibility.",
    action: "Irrigation needed within 24 hours.",
    recommendations: &[
        "💦 Irrigate field immediately",
        "🌾 Apply mulch to retain moisture",
        "📊 Adjust irrigation schedule",
        "🌡️ Monitor temperature to prevent stress",
    ],
};
