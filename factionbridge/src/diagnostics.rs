//! Resolution diagnostics.
//!
//! Every resolution produces a [`DiagnosticReport`] describing which plugins
//! were installed, how each catalog candidate fared against them and what was
//! finally bound. The report is serialisable so hosts can dump it when a
//! server administrator asks why the bridge picked (or missed) a plugin.

use chrono::{DateTime, Utc};
use factionbridge_plugins::PluginDescriptor;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Outcome of one fingerprint against the installed plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintCheck {
    pub version: String,
    /// Exact author-set equality.
    pub exact: bool,
    /// Per provider author (sorted), whether the installed plugin lists it.
    pub coverage: Vec<bool>,
}

/// How one catalog entry fared during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateReport {
    pub provider_id: String,
    pub plugin_name: String,
    /// Whether a plugin with the expected display name is installed.
    pub present: bool,
    pub forced: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fingerprints: Vec<FingerprintCheck>,
    pub accepted: bool,
}

/// What resolution ended with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResolutionOutcome {
    /// A provider was accepted and its adapter constructed.
    Bound { provider_id: String, forced: bool },
    /// A provider was accepted without constructing anything.
    Matched { provider_id: String, forced: bool },
    /// A provider was accepted but its factory failed.
    AdapterConstructionFailed { provider_id: String, reason: String },
    /// No catalog entry accepted any installed plugin.
    Unresolved,
}

impl ResolutionOutcome {
    /// Provider id of a bound or matched outcome.
    pub fn provider_id(&self) -> Option<&str> {
        match self {
            ResolutionOutcome::Bound { provider_id, .. }
            | ResolutionOutcome::Matched { provider_id, .. } => Some(provider_id),
            _ => None,
        }
    }
}

/// Full record of one resolution run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub generated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forced_provider: Option<String>,
    pub installed: Vec<PluginDescriptor>,
    pub candidates: Vec<CandidateReport>,
    pub outcome: ResolutionOutcome,
}

impl DiagnosticReport {
    pub fn is_resolved(&self) -> bool {
        matches!(
            self.outcome,
            ResolutionOutcome::Bound { .. } | ResolutionOutcome::Matched { .. }
        )
    }

    /// One-line human readable outcome.
    pub fn summary(&self) -> String {
        match &self.outcome {
            ResolutionOutcome::Bound { provider_id, forced } => format!(
                "bound provider {}{}",
                provider_id,
                if *forced { " (forced)" } else { "" }
            ),
            ResolutionOutcome::Matched { provider_id, forced } => format!(
                "matched provider {}{}",
                provider_id,
                if *forced { " (forced)" } else { "" }
            ),
            ResolutionOutcome::AdapterConstructionFailed {
                provider_id,
                reason,
            } => format!("provider {} matched but failed to start: {}", provider_id, reason),
            ResolutionOutcome::Unresolved => format!(
                "no provider matched {} installed plugin(s)",
                self.installed.len()
            ),
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Receives the report of every resolution the bridge runs.
pub trait DiagnosticReporter: Send + Sync {
    /// `console_output` asks for the report to be shown to an operator rather
    /// than only kept for debugging.
    fn report(&self, report: &DiagnosticReport, console_output: bool);
}

/// Writes reports through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl DiagnosticReporter for TracingReporter {
    fn report(&self, report: &DiagnosticReport, console_output: bool) {
        for candidate in &report.candidates {
            let exact = candidate.fingerprints.iter().filter(|f| f.exact).count();
            debug!(
                provider = %candidate.provider_id,
                plugin = %candidate.plugin_name,
                present = candidate.present,
                forced = candidate.forced,
                exact_matches = exact,
                accepted = candidate.accepted,
                "resolution candidate"
            );
        }

        match &report.outcome {
            ResolutionOutcome::AdapterConstructionFailed { .. } => {
                warn!("Faction bridge: {}", report.summary());
            }
            _ if console_output => info!("Faction bridge: {}", report.summary()),
            _ => debug!("Faction bridge: {}", report.summary()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn report(outcome: ResolutionOutcome) -> DiagnosticReport {
        DiagnosticReport {
            generated_at: Utc::now(),
            forced_provider: None,
            installed: vec![PluginDescriptor::new("Factions", "1.0", ["X", "Y"])],
            candidates: vec![CandidateReport {
                provider_id: "Factions_A".to_string(),
                plugin_name: "Factions".to_string(),
                present: true,
                forced: false,
                fingerprints: vec![FingerprintCheck {
                    version: "1.0".to_string(),
                    exact: true,
                    coverage: vec![true, true],
                }],
                accepted: true,
            }],
            outcome,
        }
    }

    #[test]
    fn test_summary() {
        let bound = report(ResolutionOutcome::Bound {
            provider_id: "Factions_A".to_string(),
            forced: true,
        });
        assert!(bound.is_resolved());
        assert_eq!(bound.summary(), "bound provider Factions_A (forced)");

        let none = report(ResolutionOutcome::Unresolved);
        assert!(!none.is_resolved());
        assert_eq!(none.summary(), "no provider matched 1 installed plugin(s)");
    }

    #[test]
    fn test_outcome_serialises_tagged() {
        let json = serde_json::to_value(ResolutionOutcome::AdapterConstructionFailed {
            provider_id: "Factions_A".to_string(),
            reason: "boom".to_string(),
        })
        .unwrap();
        assert_eq!(json["status"], "adapter_construction_failed");
        assert_eq!(json["provider_id"], "Factions_A");

        let json = serde_json::to_value(ResolutionOutcome::Unresolved).unwrap();
        assert_eq!(json["status"], "unresolved");
    }

    #[test]
    fn test_report_json_round_trip() {
        let original = report(ResolutionOutcome::Matched {
            provider_id: "Factions_A".to_string(),
            forced: false,
        });
        let json = original.to_json_pretty().unwrap();
        let parsed: DiagnosticReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
        assert_eq!(parsed.outcome.provider_id(), Some("Factions_A"));
    }

    #[test]
    #[traced_test]
    fn test_tracing_reporter_logs_summary_at_info_on_console() {
        TracingReporter.report(&report(ResolutionOutcome::Unresolved), true);

        assert!(logs_contain("INFO"));
        assert!(logs_contain(
            "Faction bridge: no provider matched 1 installed plugin(s)"
        ));
        assert!(logs_contain("resolution candidate"));
        assert!(!logs_contain("WARN"));
    }

    #[test]
    #[traced_test]
    fn test_tracing_reporter_warns_on_construction_failure() {
        TracingReporter.report(
            &report(ResolutionOutcome::AdapterConstructionFailed {
                provider_id: "Factions_A".to_string(),
                reason: "boom".to_string(),
            }),
            false,
        );

        assert!(logs_contain("WARN"));
        assert!(logs_contain(
            "Faction bridge: provider Factions_A matched but failed to start: boom"
        ));
    }

    #[test]
    #[traced_test]
    fn test_tracing_reporter_keeps_quiet_summary_at_debug() {
        TracingReporter.report(
            &report(ResolutionOutcome::Bound {
                provider_id: "Factions_A".to_string(),
                forced: false,
            }),
            false,
        );

        assert!(logs_contain("Faction bridge: bound provider Factions_A"));
        assert!(!logs_contain("INFO"));
        assert!(!logs_contain("WARN"));
    }
}
