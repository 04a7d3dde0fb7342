//! Evaluation request/report envelope.

use std::io::Read;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockplan_allocation::{
    AllocationDecision, DemandLine, EvaluationConfig, SummaryStatistics, TranspositionPolicy,
    evaluate,
};
use stockplan_core::RunId;
use stockplan_inventory::{Category, MatchMode, StockSnapshot};

use crate::config::HostConfig;

/// One run's input, as produced by the ingestion layer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EvaluationRequest {
    pub destination: Category,
    #[serde(default = "default_multiplier")]
    pub multiplier: u32,
    pub demand: Vec<DemandLine>,
    pub stock: StockSnapshot,
    #[serde(default)]
    pub match_mode: Option<MatchMode>,
    #[serde(default)]
    pub policy: Option<TranspositionPolicy>,
}

fn default_multiplier() -> u32 {
    1
}

impl EvaluationRequest {
    /// Merge request values over host defaults.
    pub fn config(&self, host: &HostConfig) -> anyhow::Result<EvaluationConfig> {
        let policy = match &self.policy {
            Some(policy) => host.apply_consumption(policy.clone()),
            None => host.load_policy()?,
        };
        Ok(EvaluationConfig::new(self.destination.clone())
            .with_multiplier(self.multiplier)
            .with_match_mode(self.match_mode.unwrap_or(host.match_mode))
            .with_policy(policy))
    }
}

/// Report envelope written by the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub run_id: RunId,
    pub evaluated_at: DateTime<Utc>,
    pub destination: Category,
    pub multiplier: u32,
    pub match_mode: MatchMode,
    pub decisions: Vec<AllocationDecision>,
    pub summary: SummaryStatistics,
}

impl EvaluationReport {
    pub fn evaluate(request: &EvaluationRequest, host: &HostConfig) -> anyhow::Result<Self> {
        let config = request.config(host)?;
        let evaluation = evaluate(&request.demand, &request.stock, &config)
            .context("evaluation rejected its input")?;

        Ok(Self {
            run_id: RunId::new(),
            evaluated_at: Utc::now(),
            destination: config.destination,
            multiplier: config.multiplier,
            match_mode: config.match_mode,
            decisions: evaluation.decisions,
            summary: evaluation.summary,
        })
    }
}

/// Read a request from `source` (a path, or `-` for stdin) and evaluate it.
pub fn run(source: &str, host: &HostConfig) -> anyhow::Result<EvaluationReport> {
    let raw = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read request from stdin")?;
        buf
    } else {
        std::fs::read_to_string(source).with_context(|| format!("failed to read request {source}"))?
    };

    let request: EvaluationRequest =
        serde_json::from_str(&raw).with_context(|| format!("failed to parse request {source}"))?;
    let report = EvaluationReport::evaluate(&request, host)?;

    tracing::info!(
        run_id = %report.run_id,
        items = report.summary.item_count,
        purchases = report.summary.purchase_count,
        "report ready"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockplan_allocation::{AllocationStatus, ConsumptionMode};

    const REQUEST: &str = r#"{
        "destination": "PL",
        "multiplier": 2,
        "demand": [
            {"item_code": "PL0040029", "quantity": 50},
            {"item_code": "PL0010001", "quantity": 1}
        ],
        "stock": [
            {"item_code": "PV0040029", "category": "PV", "quantity": 150, "value": {"total": 300}},
            {"item_code": "PL0010001", "category": "PL", "quantity": 5}
        ],
        "match_mode": {"mode": "suffix_correlation", "suffix_len": 7}
    }"#;

    #[test]
    fn request_values_override_host_defaults() {
        let request: EvaluationRequest = serde_json::from_str(REQUEST).unwrap();
        let host = HostConfig {
            consumption: Some(ConsumptionMode::Incremental),
            ..HostConfig::default()
        };
        let config = request.config(&host).unwrap();

        assert_eq!(config.match_mode, MatchMode::suffix());
        assert_eq!(config.multiplier, 2);
        assert_eq!(config.policy.consumption(), ConsumptionMode::Incremental);
    }

    #[test]
    fn consumption_override_reaches_a_request_supplied_policy() {
        let mut raw: serde_json::Value = serde_json::from_str(REQUEST).unwrap();
        raw["policy"] = serde_json::to_value(TranspositionPolicy::default()).unwrap();
        let request: EvaluationRequest = serde_json::from_value(raw).unwrap();
        assert_eq!(request.policy.as_ref().unwrap().consumption(), ConsumptionMode::FullCover);

        let host = HostConfig {
            consumption: Some(ConsumptionMode::Incremental),
            ..HostConfig::default()
        };
        let config = request.config(&host).unwrap();
        assert_eq!(config.policy.consumption(), ConsumptionMode::Incremental);

        let untouched = request.config(&HostConfig::default()).unwrap();
        assert_eq!(untouched.policy.consumption(), ConsumptionMode::FullCover);
    }

    #[test]
    fn report_wraps_decisions_and_summary() {
        let request: EvaluationRequest = serde_json::from_str(REQUEST).unwrap();
        let report = EvaluationReport::evaluate(&request, &HostConfig::default()).unwrap();

        assert_eq!(report.decisions.len(), 2);
        assert_eq!(report.decisions[0].item_code, "PL0010001");
        assert_eq!(report.decisions[0].status, AllocationStatus::Ok);
        assert_eq!(
            report.decisions[1].status,
            AllocationStatus::Transpose {
                amount: 100.0,
                source: Category::Pv,
            }
        );
        assert_eq!(report.summary.item_count, 2);

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["run_id"].is_string());
        assert_eq!(json["match_mode"]["mode"], "suffix_correlation");
    }

    #[test]
    fn malformed_stock_fails_to_parse() {
        let bad = REQUEST.replace(r#""quantity": 150"#, r#""quantity": -150"#);
        assert!(serde_json::from_str::<EvaluationRequest>(&bad).is_err());
    }

    #[test]
    fn missing_request_file_is_reported() {
        let err = run("/definitely/not/here.json", &HostConfig::default()).unwrap_err();
        assert!(err.to_string().contains("failed to read request"));
    }
}
