//! Country-specific risk analysis node

use crate::client::InferenceClient;
use crate::nodes::{parse_payload, to_prompt_json};
use crate::prompts;
use async_trait::async_trait;
use std::sync::Arc;
use trade_core::{
    AnalysisState, Error, MarketObservation, NodeId, RiskAnalysis, RiskChartPoint, StatePatch,
};
use trade_llm::extract_json;
use trade_workflow::TaskNode;

/// Scores risk for one country over its raw observation history
pub struct RiskNode {
    client: Arc<InferenceClient>,
}

impl RiskNode {
    /// Create a new risk node
    pub fn new(client: Arc<InferenceClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TaskNode for RiskNode {
    fn id(&self) -> NodeId {
        NodeId::Risk
    }

    async fn run(&self, state: &AnalysisState) -> trade_core::Result<StatePatch> {
        let country = state
            .country
            .as_deref()
            .filter(|c| !c.is_empty())
            .ok_or_else(|| Error::Validation("country is required for risk analysis".to_string()))?;

        let rows: Vec<&MarketObservation> = state
            .market_data
            .iter()
            .filter(|o| o.country == country)
            .collect();

        let prompt = prompts::risk(&state.code, country, &to_prompt_json(&rows)?)?;
        let content = self.client.prompt("risk", prompt).await?;

        let mut parsed: RiskAnalysis = parse_payload(extract_json(&content)?)?;
        parsed.chart_data = chart_series(&rows, parsed.risk_score);

        Ok(StatePatch {
            risk_analysis: Some(parsed),
            ..StatePatch::default()
        })
    }
}

/// One chart point per observation, sorted ascending by year
///
/// Rows without a parsable year sort first. The per-point metric scales the
/// model's overall score by the observation's relative price deviation from
/// the country mean, clamped to the 0-100 scale.
fn chart_series(rows: &[&MarketObservation], risk_score: f64) -> Vec<RiskChartPoint> {
    let mut sorted = rows.to_vec();
    sorted.sort_by_key(|o| o.year());

    let mean_price = if sorted.is_empty() {
        0.0
    } else {
        sorted.iter().map(|o| o.price).sum::<f64>() / sorted.len() as f64
    };

    sorted
        .into_iter()
        .map(|o| RiskChartPoint {
            month: o.date.clone().unwrap_or_default(),
            risk: point_risk(risk_score, o.price, mean_price),
            volume: o.volume,
            price: o.price,
        })
        .collect()
}

fn point_risk(risk_score: f64, price: f64, mean_price: f64) -> f64 {
    if mean_price <= 0.0 {
        return risk_score.clamp(0.0, 100.0);
    }
    let deviation = (price - mean_price).abs() / mean_price;
    (risk_score * (1.0 + deviation)).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::testutil::ScriptedProvider;

    const RISK_JSON: &str =
        r#"{"risk_score": 40.0, "risk_factors": ["fx exposure"], "summary": "moderate"}"#;

    fn client(provider: ScriptedProvider) -> Arc<InferenceClient> {
        Arc::new(InferenceClient::new(
            Arc::new(provider),
            Arc::new(AnalysisConfig::default()),
        ))
    }

    fn state_with_rows() -> AnalysisState {
        AnalysisState {
            code: "690100".to_string(),
            country: Some("AUSTRALIA".to_string()),
            market_data: vec![
                MarketObservation::new("690100", "AUSTRALIA", 12.0, 120.0, "2022"),
                MarketObservation::new("690100", "AUSTRALIA", 10.0, 100.0, "2020"),
                MarketObservation::new("690100", "INDIA", 99.0, 999.0, "2021"),
                MarketObservation::new("690100", "AUSTRALIA", 11.0, 110.0, "2021"),
            ],
            ..AnalysisState::default()
        }
    }

    #[tokio::test]
    async fn test_chart_covers_only_target_country_sorted_by_year() {
        let provider = ScriptedProvider::new().respond("risk factors", RISK_JSON);
        let node = RiskNode::new(client(provider));

        let patch = node.run(&state_with_rows()).await.unwrap();
        let analysis = patch.risk_analysis.unwrap();

        assert_eq!(analysis.risk_score, 40.0);
        let months: Vec<&str> = analysis.chart_data.iter().map(|p| p.month.as_str()).collect();
        assert_eq!(months, ["2020", "2021", "2022"]);
        assert!(analysis.chart_data.iter().all(|p| p.price < 99.0));
    }

    #[tokio::test]
    async fn test_missing_country_is_a_validation_error() {
        let provider = ScriptedProvider::new().respond("risk factors", RISK_JSON);
        let node = RiskNode::new(client(provider));

        let state = AnalysisState {
            code: "690100".to_string(),
            ..AnalysisState::default()
        };
        let err = node.run(&state).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn test_unparsable_model_output_fails_with_extraction_error() {
        let provider = ScriptedProvider::new().respond("risk factors", "no JSON here at all");
        let node = RiskNode::new(client(provider));

        let err = node.run(&state_with_rows()).await.unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
    }

    #[tokio::test]
    async fn test_wrong_payload_shape_fails_with_payload_error() {
        let provider = ScriptedProvider::new().respond("risk factors", r#"{"score": "high"}"#);
        let node = RiskNode::new(client(provider));

        let err = node.run(&state_with_rows()).await.unwrap_err();
        assert!(matches!(err, Error::Payload(_)));
    }

    #[test]
    fn test_point_risk_is_clamped_and_deterministic() {
        assert_eq!(point_risk(80.0, 30.0, 10.0), 100.0);
        assert_eq!(point_risk(50.0, 10.0, 10.0), 50.0);
        assert_eq!(point_risk(50.0, 10.0, 0.0), 50.0);
    }
}
