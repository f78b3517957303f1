//! Environment-driven severity rules
//!
//! Every label has its own hand-tuned comfort bands. Bands are inclusive.
//! Temperature is °C, humidity is %, soil moisture is percent of the ADC
//! full scale (see [`SensorSample::soil_moisture_percent`]).

use crate::label::DiseaseLabel;
use crate::level::Severity;
use sensor_data::SensorSample;
use std::ops::RangeInclusive;
use tracing::debug;

type Band = RangeInclusive<f64>;

/// Metrics as the rules read them
#[derive(Debug, Clone, Copy)]
struct Reading {
    temperature: f64,
    humidity: f64,
    soil_pct: f64,
}

/// Classify severity of `label` under the environment in `sample`.
///
/// Without a sample the result is `Medium`: missing telemetry never reads as
/// calm. Unrecognized labels are also `Medium`.
pub fn classify_severity(label: DiseaseLabel, sample: Option<&SensorSample>) -> Severity {
    let Some(sample) = sample else {
        debug!("No sensor sample for {}, defaulting to MEDIUM", label);
        return Severity::Medium;
    };

    let r = Reading {
        temperature: sample.temperature,
        humidity: sample.humidity,
        soil_pct: sample.soil_moisture_percent(),
    };

    let severity = match label {
        DiseaseLabel::HealthyLeaves => healthy_leaves(r),
        DiseaseLabel::BlisterBlight => blister_blight(r),
        DiseaseLabel::BrownBlight => brown_blight(r),
        DiseaseLabel::LeafRedRust => leaf_red_rust(r),
        DiseaseLabel::RedSpiderMite => red_spider_mite(r),
        DiseaseLabel::TeaMosquitoBug => tea_mosquito_bug(r),
        DiseaseLabel::Unknown => Severity::Medium,
    };

    debug!(
        "Severity {} for {} (T={}, H={}, M={:.1}%)",
        severity, label, r.temperature, r.humidity, r.soil_pct
    );
    severity
}

/// Environmental stress on a healthy plant: more metrics out of band means
/// more stress.
fn healthy_leaves(r: Reading) -> Severity {
    const TEMP: Band = 20.0..=30.0;
    const HUMIDITY: Band = 60.0..=75.0;
    const SOIL: Band = 40.0..=70.0;

    let out_of_band = [
        TEMP.contains(&r.temperature),
        HUMIDITY.contains(&r.humidity),
        SOIL.contains(&r.soil_pct),
    ]
    .iter()
    .filter(|in_band| !**in_band)
    .count();

    match out_of_band {
        0 => Severity::Low,
        1 => Severity::Medium,
        _ => Severity::High,
    }
}

/// Humid, cool-to-moderate conditions
fn blister_blight(r: Reading) -> Severity {
    const HUMIDITY: Band = 70.0..=80.0;
    const TEMP: Band = 18.0..=25.0;
    const SOIL: Band = 40.0..=70.0;

    if HUMIDITY.contains(&r.humidity)
        && TEMP.contains(&r.temperature)
        && SOIL.contains(&r.soil_pct)
    {
        return Severity::Low;
    }

    if r.humidity > 80.0 && TEMP.contains(&r.temperature) {
        if r.humidity > 85.0 && r.soil_pct > 70.0 {
            return Severity::High;
        }
        return Severity::Medium;
    }

    Severity::Medium
}

/// Warm, humid, waterlogged conditions
fn brown_blight(r: Reading) -> Severity {
    const TEMP: Band = 24.0..=28.0;
    const HUMIDITY: Band = 70.0..=80.0;
    const SOIL: Band = 40.0..=70.0;
    const SEVERE_TEMP: Band = 25.0..=32.0;

    if TEMP.contains(&r.temperature)
        && HUMIDITY.contains(&r.humidity)
        && SOIL.contains(&r.soil_pct)
    {
        return Severity::Low;
    }

    if r.humidity > 80.0 && r.temperature >= 28.0 {
        if r.humidity > 85.0 && SEVERE_TEMP.contains(&r.temperature) && r.soil_pct > 70.0 {
            return Severity::High;
        }
        return Severity::Medium;
    }

    Severity::Medium
}

/// High humidity on poorly drained soil
fn leaf_red_rust(r: Reading) -> Severity {
    const HUMIDITY: Band = 60.0..=80.0;
    const SOIL: Band = 40.0..=70.0;
    const TEMP: Band = 22.0..=30.0;

    if HUMIDITY.contains(&r.humidity)
        && SOIL.contains(&r.soil_pct)
        && TEMP.contains(&r.temperature)
    {
        return Severity::Low;
    }

    if r.humidity > 80.0 {
        if r.humidity > 85.0 && r.soil_pct > 70.0 {
            return Severity::High;
        }
        return Severity::Medium;
    }

    Severity::Medium
}

/// Mites thrive in hot, dry conditions, the opposite of the fungal rules:
/// calm needs it cool, humid and moist.
fn red_spider_mite(r: Reading) -> Severity {
    if r.temperature < 30.0 && r.humidity >= 60.0 && r.soil_pct >= 30.0 {
        return Severity::Low;
    }

    if (r.temperature > 30.0 && r.humidity < 50.0) || r.soil_pct < 30.0 {
        if r.temperature > 32.0 && r.humidity < 45.0 && r.soil_pct < 25.0 {
            return Severity::High;
        }
        return Severity::Medium;
    }

    Severity::Medium
}

/// Warm temperature with moderate humidity
fn tea_mosquito_bug(r: Reading) -> Severity {
    const TEMP: Band = 24.0..=28.0;
    const HUMIDITY: Band = 50.0..=75.0;
    const SOIL: Band = 40.0..=70.0;
    const WARM: Band = 28.0..=32.0;

    if TEMP.contains(&r.temperature)
        && HUMIDITY.contains(&r.humidity)
        && SOIL.contains(&r.soil_pct)
    {
        return Severity::Low;
    }

    if WARM.contains(&r.temperature) {
        if r.temperature > 30.0 && r.humidity >= 50.0 {
            return Severity::High;
        }
        return Severity::Medium;
    }

    Severity::Medium
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use proptest::prelude::*;
    use sensor_data::SOIL_ADC_FULL_SCALE;

    /// Build a sample with soil moisture given in percent
    fn sample(temperature: f64, humidity: f64, soil_pct: f64) -> SensorSample {
        SensorSample::new(temperature, humidity, soil_pct * SOIL_ADC_FULL_SCALE / 100.0, Utc::now())
    }

    fn classify(label: DiseaseLabel, t: f64, h: f64, m: f64) -> Severity {
        classify_severity(label, Some(&sample(t, h, m)))
    }

    #[test]
    fn test_missing_sample_is_medium() {
        for label in DiseaseLabel::KNOWN {
            assert_eq!(classify_severity(label, None), Severity::Medium);
        }
        assert_eq!(classify_severity(DiseaseLabel::Unknown, None), Severity::Medium);
    }

    #[test]
    fn test_unknown_label_is_medium() {
        assert_eq!(classify(DiseaseLabel::Unknown, 25.0, 70.0, 50.0), Severity::Medium);
        assert_eq!(classify(DiseaseLabel::Unknown, 40.0, 20.0, 5.0), Severity::Medium);
    }

    #[test]
    fn test_healthy_leaves_counts_out_of_band() {
        let label = DiseaseLabel::HealthyLeaves;
        assert_eq!(classify(label, 25.0, 70.0, 50.0), Severity::Low);
        assert_eq!(classify(label, 32.0, 70.0, 50.0), Severity::Medium);
        assert_eq!(classify(label, 32.0, 80.0, 50.0), Severity::High);
        assert_eq!(classify(label, 15.0, 90.0, 90.0), Severity::High);
    }

    #[test]
    fn test_blister_blight() {
        let label = DiseaseLabel::BlisterBlight;
        assert_eq!(classify(label, 22.0, 75.0, 50.0), Severity::Low);
        assert_eq!(classify(label, 22.0, 83.0, 50.0), Severity::Medium);
        assert_eq!(classify(label, 22.0, 88.0, 75.0), Severity::High);
        // Severe humidity outside the temperature window stays MEDIUM
        assert_eq!(classify(label, 27.0, 88.0, 75.0), Severity::Medium);
    }

    #[test]
    fn test_blister_blight_inclusive_humidity_edge() {
        let label = DiseaseLabel::BlisterBlight;
        assert_eq!(classify(label, 25.0, 80.0, 70.0), Severity::Low);
        assert_eq!(classify(label, 25.0, 80.01, 70.0), Severity::Medium);
        assert_eq!(classify(label, 25.01, 80.0, 70.0), Severity::Medium);
    }

    #[test]
    fn test_brown_blight_inclusive_corner() {
        let label = DiseaseLabel::BrownBlight;
        assert_eq!(classify(label, 28.0, 80.0, 50.0), Severity::Low);
        assert_eq!(classify(label, 28.01, 80.0, 50.0), Severity::Medium);
        assert_eq!(classify(label, 28.0, 80.01, 50.0), Severity::Medium);
    }

    #[test]
    fn test_brown_blight_severe() {
        let label = DiseaseLabel::BrownBlight;
        assert_eq!(classify(label, 30.0, 88.0, 75.0), Severity::High);
        assert_eq!(classify(label, 33.0, 88.0, 75.0), Severity::Medium);
        assert_eq!(classify(label, 30.0, 82.0, 75.0), Severity::Medium);
    }

    #[test]
    fn test_leaf_red_rust() {
        let label = DiseaseLabel::LeafRedRust;
        assert_eq!(classify(label, 25.0, 65.0, 55.0), Severity::Low);
        assert_eq!(classify(label, 25.0, 84.0, 80.0), Severity::Medium);
        assert_eq!(classify(label, 25.0, 90.0, 80.0), Severity::High);
        assert_eq!(classify(label, 18.0, 65.0, 55.0), Severity::Medium);
    }

    #[test]
    fn test_red_spider_mite_is_inverted() {
        let label = DiseaseLabel::RedSpiderMite;
        // Cool and humid is calm, where fungal labels would worry
        assert_eq!(classify(label, 24.0, 90.0, 80.0), Severity::Low);
        assert_eq!(classify(label, 31.0, 48.0, 40.0), Severity::Medium);
        assert_eq!(classify(label, 25.0, 65.0, 20.0), Severity::Medium);
        assert_eq!(classify(label, 34.0, 40.0, 20.0), Severity::High);
        // Exactly 30 °C is neither calm nor hot
        assert_eq!(classify(label, 30.0, 40.0, 40.0), Severity::Medium);
    }

    #[test]
    fn test_tea_mosquito_bug() {
        let label = DiseaseLabel::TeaMosquitoBug;
        assert_eq!(classify(label, 26.0, 60.0, 50.0), Severity::Low);
        assert_eq!(classify(label, 29.0, 80.0, 50.0), Severity::Medium);
        assert_eq!(classify(label, 31.0, 55.0, 50.0), Severity::High);
        assert_eq!(classify(label, 31.0, 40.0, 50.0), Severity::Medium);
        assert_eq!(classify(label, 35.0, 60.0, 50.0), Severity::Medium);
    }

    #[test]
    fn test_classification_is_repeatable() {
        let s = sample(27.0, 86.0, 72.0);
        for label in DiseaseLabel::KNOWN {
            assert_eq!(classify_severity(label, Some(&s)), classify_severity(label, Some(&s)));
        }
    }

    proptest! {
        #[test]
        fn classification_is_deterministic(
            t in -10.0f64..50.0,
            h in 0.0f64..100.0,
            raw in 0.0f64..4095.0,
            idx in 0usize..6,
        ) {
            let label = DiseaseLabel::KNOWN[idx];
            let s = SensorSample::new(t, h, raw, Utc::now());
            prop_assert_eq!(
                classify_severity(label, Some(&s)),
                classify_severity(label, Some(&s))
            );
        }
    }
}
