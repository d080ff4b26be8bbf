//! Prompt templates for the inference service
//!
//! Each analysis has one template. The instruction to return bare JSON in a
//! fixed shape is repeated aggressively because the model does not reliably
//! follow it; the extractor in `trade-llm` absorbs the remainder.

use minijinja::{Environment, context};
use std::sync::LazyLock;
use trade_core::Error;

// Templates are compile-time constants; registration cannot fail at runtime.
#[allow(clippy::unwrap_used)]
static ENV: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();
    env.add_template("risk", RISK).unwrap();
    env.add_template("market", MARKET).unwrap();
    env.add_template("stability", STABILITY).unwrap();
    env.add_template("suggestions", SUGGESTIONS).unwrap();
    env.add_template("comparison", COMPARISON).unwrap();
    env.add_template("evaluate", EVALUATE).unwrap();
    env
});

const RISK: &str = r#"Analyze the risk factors for HSN code {{ code }} in {{ country }} based on the following market data:
{{ data }}
ONLY RETURN JSON. DO NOT include any explanation, markdown, or commentary.
Provide a comprehensive risk analysis including:
1. Overall risk score (0-100)
2. Key risk factors
3. Summary of findings
Strictly format your response as JSON with the structure:
{
  "risk_score": number,
  "risk_factors": string[],
  "summary": string
}"#;

const MARKET: &str = r#"Analyze the best markets for HSN code {{ code }} based on the following summarized market data:
{{ data }}
ONLY RETURN JSON. DO NOT include any explanation, markdown, or commentary.
Identify the top 5 markets with highest profit margins and growth potential. Consider average price, average volume, and number of data points as indicators.
Strictly format as JSON:
{
  "best_markets": [
    {
      "country": string,
      "margin": number,
      "potential": string
    }
  ]
}"#;

const STABILITY: &str = r#"Analyze partner stability for HSN code {{ code }} based on the following summarized market data:
{{ data }}
ONLY RETURN JSON. DO NOT include any explanation, markdown, or commentary.
Evaluate trading partners based on:
1. Price stability (low variance in average price)
2. Volume consistency (consistent average volume)
3. Market reliability (overall assessment based on available data)
Strictly format as JSON:
{
  "partners": [
    {
      "country": string,
      "stability_index": number,
      "reliability": string
    }
  ],
  "summary": string
}"#;

const SUGGESTIONS: &str = r#"Based on the following summarized market data for HSN code {{ code }}, provide smart trading suggestions:
{{ data }}
ONLY RETURN JSON. DO NOT include any explanation, markdown, or commentary.
Analyze the data and suggest:
1. Markets to expand into (based on growth potential, high average margins, and consistent volume)
2. Markets to reduce exposure (based on potential risk, declining trends, or low average margins)
3. Reasoning for recommendations
Format as JSON:
{
  "expand_markets": string[],
  "reduce_exposure": string[],
  "reasoning": string
}"#;

const COMPARISON: &str = r#"Compare the following countries for HSN code {{ code }} based on their summarized market metrics:
Countries to compare: {{ countries }}
Summarized market data:
{{ data }}
For each country, provide average price, average volume, and an estimated risk (0-100) and stability (0-100) based on the provided data. Reuse the supplied average price and average volume as-is.
ONLY RETURN JSON. DO NOT include any explanation, markdown, or commentary.
Strictly respond in this format:
{
  "countries": [
    {
      "name": "COUNTRY_NAME",
      "metrics": {
        "price": 0,
        "volume": 0,
        "risk": 0,
        "stability": 0
      }
    }
  ],
  "recommendation": "Your one-line recommendation"
}"#;

const EVALUATE: &str = r#"Evaluate the quality and completeness of the analysis results:
{{ data }}
Provide a quality score (0-100) and suggestions for improvement."#;

fn render(name: &str, ctx: minijinja::Value) -> trade_core::Result<String> {
    #[allow(clippy::unwrap_used)]
    let template = ENV.get_template(name).unwrap();
    template
        .render(ctx)
        .map_err(|e| Error::Payload(format!("prompt render failed: {e}")))
}

/// Country-specific risk prompt over raw filtered rows
pub fn risk(code: &str, country: &str, data: &str) -> trade_core::Result<String> {
    render("risk", context! { code, country, data })
}

/// Best-markets prompt over per-country summaries
pub fn market(code: &str, data: &str) -> trade_core::Result<String> {
    render("market", context! { code, data })
}

/// Partner-stability prompt over per-country summaries
pub fn stability(code: &str, data: &str) -> trade_core::Result<String> {
    render("stability", context! { code, data })
}

/// Expand/reduce suggestions prompt over per-country summaries
pub fn suggestions(code: &str, data: &str) -> trade_core::Result<String> {
    render("suggestions", context! { code, data })
}

/// Multi-country comparison prompt over the requested countries' summaries
pub fn comparison(code: &str, countries: &[String], data: &str) -> trade_core::Result<String> {
    let countries = countries.join(", ");
    render("comparison", context! { code, countries, data })
}

/// Terminal quality self-check prompt over the populated result slots
pub fn evaluate(data: &str) -> trade_core::Result<String> {
    render("evaluate", context! { data })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_prompt_embeds_inputs() {
        let prompt = risk("690100", "AUSTRALIA", "[{\"price\": 10}]").unwrap();
        assert!(prompt.contains("HSN code 690100"));
        assert!(prompt.contains("in AUSTRALIA"));
        assert!(prompt.contains("[{\"price\": 10}]"));
        assert!(prompt.contains("ONLY RETURN JSON"));
    }

    #[test]
    fn test_comparison_prompt_lists_countries() {
        let countries = vec!["INDIA".to_string(), "CHINA".to_string()];
        let prompt = comparison("690100", &countries, "[]").unwrap();
        assert!(prompt.contains("Countries to compare: INDIA, CHINA"));
    }

    #[test]
    fn test_data_is_not_template_expanded() {
        // Serialized JSON containing braces must pass through untouched.
        let prompt = market("690100", "{\"country\": \"INDIA\"}").unwrap();
        assert!(prompt.contains("{\"country\": \"INDIA\"}"));
    }

    #[test]
    fn test_each_prompt_has_a_distinct_opening() {
        let risk = risk("1", "X", "[]").unwrap();
        let market = market("1", "[]").unwrap();
        let stability = stability("1", "[]").unwrap();
        let suggestions = suggestions("1", "[]").unwrap();
        let comparison = comparison("1", &[], "[]").unwrap();
        let evaluate = evaluate("{}").unwrap();

        let openings = [
            &risk, &market, &stability, &suggestions, &comparison, &evaluate,
        ]
        .map(|p| p.lines().next().unwrap_or_default().to_string());

        for (i, a) in openings.iter().enumerate() {
            for b in openings.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
