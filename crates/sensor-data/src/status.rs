//! Per-Metric Field Status
//!
//! Grades each reading on its own, independent of any disease. Used for the
//! dashboard cards: a colour tier, an optional warning badge, and a message.

use serde::{Deserialize, Serialize};

/// Measured quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Temperature,
    Humidity,
    /// Raw ADC counts
    SoilMoisture,
}

/// Status tier of a single reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    Normal,
    Low,
    Warning,
    High,
    Critical,
}

/// Short badge shown next to an out-of-band reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WarningBadge {
    pub text: &'static str,
    pub level: StatusLevel,
}

/// Assessment of one reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricStatus {
    pub metric: Metric,
    pub value: f64,
    pub level: StatusLevel,
    /// Message heading, e.g. "CRITICAL" or "CAUTION"
    pub headline: &'static str,
    pub message: &'static str,
    pub badge: Option<WarningBadge>,
}

const fn badge(text: &'static str, level: StatusLevel) -> Option<WarningBadge> {
    Some(WarningBadge { text, level })
}

/// Grade a single reading
pub fn assess_metric(metric: Metric, value: f64) -> MetricStatus {
    use StatusLevel::*;

    let (level, headline, message, badge) = match metric {
        Metric::Temperature => {
            if value < 18.0 {
                (
                    Critical,
                    "CRITICAL",
                    "🚨 EXTREME COLD: Plants at severe stress. Risk of growth stoppage and frost damage. Immediate action required!",
                    badge("CRITICAL", Critical),
                )
            } else if value < 20.0 {
                (
                    Low,
                    "WARNING",
                    "⚠️ Below Optimal: Temperature too low for ideal growth. Monitor closely and consider protective measures.",
                    badge("HIGH", High),
                )
            } else if value > 30.0 {
                (
                    Critical,
                    "CRITICAL",
                    "🚨 EXTREME HEAT: Severe plant stress. Risk of leaf burn and wilting. Immediate irrigation and shading needed!",
                    badge("CRITICAL", Critical),
                )
            } else if value > 28.0 {
                (
                    High,
                    "HIGH",
                    "⚠️ Above Optimal: Heat stress possible. Ensure adequate irrigation and monitor for wilting symptoms.",
                    badge("HIGH", High),
                )
            } else {
                (
                    Normal,
                    "NORMAL",
                    "✓ Optimal Range: Temperature is ideal for tea plant growth and development. Continue monitoring.",
                    None,
                )
            }
        }
        Metric::Humidity => {
            if value > 85.0 {
                (
                    Critical,
                    "CRITICAL",
                    "🚨 EXTREME HUMIDITY: Very high disease risk! Blister blight and fungal infections imminent. Spray fungicide immediately!",
                    badge("CRITICAL", Critical),
                )
            } else if value > 80.0 {
                (
                    High,
                    "HIGH",
                    "⚠️ HIGH DISEASE RISK: Humidity levels favor blister blight. Prepare for preventive spraying within 24 hours.",
                    badge("DISEASE RISK", High),
                )
            } else if value > 70.0 {
                (
                    Warning,
                    "CAUTION",
                    "⚠️ Elevated Humidity: Conditions favorable for fungal diseases. Increase field inspections and ensure good air circulation.",
                    badge("WATCH", Warning),
                )
            } else if value < 50.0 {
                (
                    Low,
                    "LOW",
                    "ℹ️ Low Humidity: Plants may experience moisture stress. Consider irrigation if temperature is also high.",
                    badge("LOW", Low),
                )
            } else {
                (
                    Normal,
                    "NORMAL",
                    "✓ Optimal Range: Humidity levels are ideal. Low disease risk. Continue regular monitoring.",
                    None,
                )
            }
        }
        Metric::SoilMoisture => {
            if value < 2300.0 {
                (
                    Critical,
                    "CRITICAL",
                    "🚨 SEVERE DROUGHT: Plants under extreme water stress. Risk of permanent damage. Irrigate immediately!",
                    badge("CRITICAL", Critical),
                )
            } else if value < 2400.0 {
                (
                    Low,
                    "WARNING",
                    "⚠️ Low Moisture: Soil moisture below optimal. Plants weakening. Schedule irrigation within 24 hours.",
                    badge("WARNING", High),
                )
            } else if value > 2700.0 {
                (
                    Critical,
                    "CRITICAL",
                    "🚨 WATERLOGGED: Excessive moisture detected. Risk of root rot and fungal diseases. Improve drainage immediately!",
                    badge("CRITICAL", Critical),
                )
            } else if value > 2650.0 {
                (
                    High,
                    "HIGH",
                    "⚠️ High Moisture: Soil may be oversaturated. Check drainage and reduce irrigation frequency.",
                    badge("WARNING", High),
                )
            } else {
                (
                    Normal,
                    "NORMAL",
                    "✓ Optimal Range: Soil moisture is ideal for root health and nutrient uptake. Maintain current irrigation schedule.",
                    None,
                )
            }
        }
    };

    MetricStatus {
        metric,
        value,
        level,
        headline,
        message,
        badge,
    }
}
