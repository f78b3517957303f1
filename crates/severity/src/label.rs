//! Disease labels produced by the leaf image classifier

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Condition reported by the leaf classifier
///
/// Parsing never fails: any string outside the known set maps to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DiseaseLabel {
    HealthyLeaves,
    BlisterBlight,
    BrownBlight,
    LeafRedRust,
    RedSpiderMite,
    TeaMosquitoBug,
    Unknown,
}

impl DiseaseLabel {
    /// Every label the classifier model can emit
    pub const KNOWN: [DiseaseLabel; 6] = [
        DiseaseLabel::HealthyLeaves,
        DiseaseLabel::BlisterBlight,
        DiseaseLabel::BrownBlight,
        DiseaseLabel::LeafRedRust,
        DiseaseLabel::RedSpiderMite,
        DiseaseLabel::TeaMosquitoBug,
    ];

    /// Map a classifier class name to a label
    pub fn parse(name: &str) -> Self {
        match name {
            "Healthy_leaves" => DiseaseLabel::HealthyLeaves,
            "Blister_Blight" => DiseaseLabel::BlisterBlight,
            "Brown_Blight" => DiseaseLabel::BrownBlight,
            "Leaf_Red_Rust" => DiseaseLabel::LeafRedRust,
            "Red_Spider_Mite" => DiseaseLabel::RedSpiderMite,
            "Tea_Mosquito_Bug" => DiseaseLabel::TeaMosquitoBug,
            _ => DiseaseLabel::Unknown,
        }
    }

    /// Class name as emitted by the classifier
    pub fn as_str(&self) -> &'static str {
        match self {
            DiseaseLabel::HealthyLeaves => "Healthy_leaves",
            DiseaseLabel::BlisterBlight => "Blister_Blight",
            DiseaseLabel::BrownBlight => "Brown_Blight",
            DiseaseLabel::LeafRedRust => "Leaf_Red_Rust",
            DiseaseLabel::RedSpiderMite => "Red_Spider_Mite",
            DiseaseLabel::TeaMosquitoBug => "Tea_Mosquito_Bug",
            DiseaseLabel::Unknown => "Unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        *self != DiseaseLabel::Unknown
    }
}

impl FromStr for DiseaseLabel {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for DiseaseLabel {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for DiseaseLabel {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<DiseaseLabel> for String {
    fn from(label: DiseaseLabel) -> Self {
        label.as_str().to_string()
    }
}

impl fmt::Display for DiseaseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels_parse_back() {
        for label in DiseaseLabel::KNOWN {
            assert_eq!(DiseaseLabel::parse(label.as_str()), label);
            assert!(label.is_known());
        }
    }

    #[test]
    fn test_unrecognized_label() {
        assert_eq!(DiseaseLabel::parse("Grey_Blight"), DiseaseLabel::Unknown);
        // Class names are case sensitive
        assert_eq!(DiseaseLabel::parse("blister_blight"), DiseaseLabel::Unknown);
        assert_eq!("".parse::<DiseaseLabel>(), Ok(DiseaseLabel::Unknown));
    }

    #[test]
    fn test_serde_uses_class_names() {
        let json = serde_json::to_string(&DiseaseLabel::RedSpiderMite).unwrap();
        assert_eq!(json, "\"Red_Spider_Mite\"");

        let label: DiseaseLabel = serde_json::from_str("\"Leaf_Red_Rust\"").unwrap();
        assert_eq!(label, DiseaseLabel::LeafRedRust);

        let other: DiseaseLabel = serde_json::from_str("\"something else\"").unwrap();
        assert_eq!(other, DiseaseLabel::Unknown);
    }
}
