//! Risk alert payload

use crate::rules::RuleId;
use sensor_data::{Conditions, SensorSample};
use serde::{Deserialize, Serialize};
use severity::Severity;

/// Alert raised by a matching risk rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAlert {
    /// Rule that raised the alert
    pub rule: RuleId,
    pub title: String,
    pub severity: Severity,
    pub disease: String,
    pub message: String,
    /// Deadline-style call to action
    pub action: String,
    pub recommendations: Vec<String>,
    /// Metrics of the sample that triggered the rule
    pub current_conditions: Conditions,
}

/// Fixed text of an alert; the conditions are filled in per sample
#[derive(Debug)]
pub(crate) struct AlertTemplate {
    pub title: &'static str,
    pub severity: Severity,
    pub disease: &'static str,
    pub message: &'static str,
    pub action: &'static str,
    pub recommendations: &'static [&'static str],
}

impl AlertTemplate {
    pub(crate) fn fill(&self, rule: RuleId, sample: &SensorSample) -> RiskAlert {
        RiskAlert {
            rule,
            title: self.title.to_string(),
            severity: self.severity,
            disease: self.disease.to_string(),
            message: self.message.to_string(),
            action: self.action.to_string(),
            recommendations: self.recommendations.iter().map(|r| r.to_string()).collect(),
            current_conditions: sample.conditions(),
        }
    }
}
