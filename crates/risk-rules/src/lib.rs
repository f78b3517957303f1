//! Disease-Risk Rules
//!
//! Checks live field conditions against an ordered list of disease-risk
//! rules before any leaf has been scanned. The first matching rule wins.

mod alert;
mod rules;

pub use alert::RiskAlert;
pub use rules::{evaluate_live_risk, evaluate_risk, DiseaseRule, RuleId, RULES};
