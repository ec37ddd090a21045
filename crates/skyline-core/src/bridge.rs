use crate::lighting::{derive_lighting, LightingError, LightingReport, LightingSnapshot};
use crate::shared::{latest, Latest, LifetimeToken, Publisher};
use crate::weather::WeatherReading;
use std::fmt;

/// What happened to one incoming lighting result.
#[derive(Debug)]
pub enum BridgeOutcome {
    Applied(LightingSnapshot),
    /// Payload rejected; the previous snapshot stays in place.
    Retained(LightingError),
    /// The view is gone; nothing was published.
    Discarded,
}

impl BridgeOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, BridgeOutcome::Applied(_))
    }
}

/// Result of the report-service stage of the fallback chain.
#[derive(Debug)]
pub enum ReportStep {
    /// Nothing more to try. Holds the report when it was applied.
    Settled(Option<LightingReport>),
    /// Derive lighting from a weather reading instead.
    NeedWeather,
}

/// Sole writer of the [`LightingSnapshot`] cell.
pub struct LightingBridge {
    publisher: Publisher<LightingSnapshot>,
    lifetime: LifetimeToken,
}

impl LightingBridge {
    /// Starts out holding the default snapshot.
    pub fn new(lifetime: LifetimeToken) -> (Self, Latest<LightingSnapshot>) {
        let (publisher, reader) = latest(LightingSnapshot::default());
        (
            Self {
                publisher,
                lifetime,
            },
            reader,
        )
    }

    pub fn current(&self) -> LightingSnapshot {
        self.publisher.current()
    }

    pub fn accept_report(&self, report: &LightingReport) -> BridgeOutcome {
        if !self.lifetime.is_alive() {
            log::debug!("[lighting] view torn down, discarding report");
            return BridgeOutcome::Discarded;
        }
        match report.lighting() {
            Ok(snapshot) => {
                self.publisher.publish(snapshot);
                log::info!("[lighting] applied: {}", report.lighting_description);
                BridgeOutcome::Applied(snapshot)
            }
            Err(e) => {
                log::warn!("[lighting] keeping previous snapshot: {e}");
                BridgeOutcome::Retained(e)
            }
        }
    }

    /// False once the view is torn down.
    pub fn is_live(&self) -> bool {
        self.lifetime.is_alive()
    }

    /// Accept the report service's response body. `None` means no service is
    /// configured. Transport errors, malformed bodies and rejected configs
    /// all fall back to weather.
    pub fn accept_fetched_report<E: fmt::Display>(
        &self,
        fetched: Option<Result<String, E>>,
    ) -> ReportStep {
        if !self.is_live() {
            return ReportStep::Settled(None);
        }
        let body = match fetched {
            None => return ReportStep::NeedWeather,
            Some(Err(e)) => {
                log::warn!("[lighting] report service failed, deriving locally: {e:#}");
                return ReportStep::NeedWeather;
            }
            Some(Ok(body)) => body,
        };
        let report = match LightingReport::from_json(&body) {
            Ok(report) => report,
            Err(e) => {
                log::warn!("[lighting] malformed report, deriving locally: {e}");
                return ReportStep::NeedWeather;
            }
        };
        match self.accept_report(&report) {
            BridgeOutcome::Applied(_) => ReportStep::Settled(Some(report)),
            BridgeOutcome::Discarded => ReportStep::Settled(None),
            BridgeOutcome::Retained(_) => ReportStep::NeedWeather,
        }
    }

    /// Derive lighting locally from a weather reading and accept it.
    /// Returns the derived report when it was applied.
    pub fn accept_weather(&self, reading: &WeatherReading, hour: u32) -> Option<LightingReport> {
        let report = derive_lighting(reading.temperature, &reading.condition, hour);
        self.accept_report(&report).is_applied().then_some(report)
    }
}
