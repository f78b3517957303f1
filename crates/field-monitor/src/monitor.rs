//! Field monitor loop

use crate::assessment::{assess_scan, ScanAssessment};
use crate::config::MonitorConfig;
use crate::MonitorError;
use alerting::{AlertLifecycle, AlertThrottle};
use chrono::{DateTime, Utc};
use risk_rules::{evaluate_live_risk, RiskAlert, RuleId};
use sensor_data::{assess_metric, describe_last_seen, LinkStatus, Metric, MetricStatus, StatusLevel};
use std::future::Future;
use storage::{ScanHistory, SensorSource};
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Result of a single poll
#[derive(Debug, Clone, PartialEq)]
pub struct PollOutcome {
    pub link: LinkStatus,
    /// Human rendering of the latest sample's age
    pub last_seen: String,
    /// Status of each metric of the latest sample
    pub statuses: Vec<MetricStatus>,
    /// Risk alert for the current conditions, if any
    pub alert: Option<RiskAlert>,
    /// Whether `alert` was put on screen by this poll
    pub presented: bool,
}

/// Polls a sensor source and drives the on-screen alerts
pub struct FieldMonitor<S, H> {
    source: S,
    history: H,
    config: MonitorConfig,
    risk_alerts: AlertLifecycle<RiskAlert>,
    advisories: AlertLifecycle<ScanAssessment>,
    throttle: AlertThrottle<RuleId>,
    link: Option<LinkStatus>,
}

impl<S, H> FieldMonitor<S, H>
where
    S: SensorSource,
    H: ScanHistory,
{
    pub fn new(source: S, history: H, config: MonitorConfig) -> Self {
        Self {
            risk_alerts: AlertLifecycle::new(config.risk_alert.clone()),
            advisories: AlertLifecycle::new(config.advisory_panel.clone()),
            throttle: AlertThrottle::new(config.throttle.clone()),
            link: None,
            source,
            history,
            config,
        }
    }

    /// Read the latest sample, evaluate risk, and present any new alert.
    ///
    /// A repeat of the same rule within the throttle cooldown is reported in
    /// [`PollOutcome::alert`] but not presented. Must be called from within a
    /// tokio runtime, since presenting an alert starts its timers.
    pub fn poll_once(&mut self, now: DateTime<Utc>) -> Result<PollOutcome, MonitorError> {
        let latest = self.source.latest()?;

        let link = LinkStatus::from_latest(latest.as_ref(), now, self.config.sensor_freshness());
        if self.link != Some(link) {
            info!("Field device is {:?}", link);
            self.link = Some(link);
        }

        let statuses: Vec<MetricStatus> = latest
            .iter()
            .flat_map(|s| {
                [
                    assess_metric(Metric::Temperature, s.temperature),
                    assess_metric(Metric::Humidity, s.humidity),
                    assess_metric(Metric::SoilMoisture, s.soil_moisture),
                ]
            })
            .collect();
        for status in statuses.iter().filter(|s| s.level != StatusLevel::Normal) {
            debug!("{:?} at {} is {:?}", status.metric, status.value, status.level);
        }

        let alert = evaluate_live_risk(latest.as_ref(), now, self.config.sensor_freshness());
        let mut presented = false;
        if let Some(alert) = &alert {
            let tick = Instant::now();
            if self.throttle.should_fire(alert.rule, tick) {
                info!("Risk alert: {} ({})", alert.title, alert.severity);
                self.risk_alerts.present(alert.clone());
                self.throttle.record_fire(alert.rule, tick);
                presented = true;
            }
        }

        Ok(PollOutcome {
            link,
            last_seen: describe_last_seen(latest.map(|s| s.timestamp), now),
            statuses,
            alert,
            presented,
        })
    }

    /// Assess a leaf scan, store it, and show its advisory.
    ///
    /// Must be called from within a tokio runtime, since showing the
    /// advisory starts its timers.
    pub fn record_scan(
        &mut self,
        class_name: &str,
        confidence: f64,
        now: DateTime<Utc>,
    ) -> Result<(Uuid, ScanAssessment), MonitorError> {
        let latest = self.source.latest()?;
        let assessment = assess_scan(
            class_name,
            confidence,
            latest.as_ref(),
            now,
            self.config.advisory_freshness(),
        );

        let id = self.history.record(assessment.to_record(now))?;
        info!(
            "Scan {} recorded: {} ({})",
            id, assessment.disease, assessment.severity
        );
        self.advisories.present(assessment.clone());

        Ok((id, assessment))
    }

    /// Poll on the configured interval until `shutdown` completes
    pub async fn run<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let mut ticker = interval(self.config.poll_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        info!("Polling sensors every {:?}", self.config.poll_interval());

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutting down field monitor");
                    break;
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.poll_once(Utc::now()) {
                        warn!("Poll failed: {}", e);
                    }
                }
            }
        }
    }

    pub fn dismiss_alert(&mut self) -> bool {
        self.risk_alerts.dismiss()
    }

    pub fn dismiss_advisory(&mut self) -> bool {
        self.advisories.dismiss()
    }

    pub fn risk_alerts(&self) -> &AlertLifecycle<RiskAlert> {
        &self.risk_alerts
    }

    pub fn advisories(&self) -> &AlertLifecycle<ScanAssessment> {
        &self.advisories
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn history(&self) -> &H {
        &self.history
    }
}
