//! Command-line interface for trade-rs
//!
//! Loads shaped observation rows from a JSON file, runs one analysis
//! against the Groq inference service, and renders the populated result
//! slots as tables.

use anyhow::Context;
use clap::Parser;
use comfy_table::Table;
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use trade_analysis::{AnalysisConfig, AnalysisEngine, AnalysisRequest, StaticMarketData};
use trade_core::{AnalysisState, AnalysisType};
use trade_llm::providers::GroqProvider;

#[derive(Parser, Debug)]
#[command(name = "trade-cli")]
#[command(about = "Market analysis over HSN-coded trade data", long_about = None)]
struct Args {
    /// HSN code to analyze
    #[arg(short, long)]
    code: String,

    /// Analysis kind: risk, market, stability, suggestions, comparison
    #[arg(short = 't', long = "type")]
    analysis_type: String,

    /// Target country (required for risk)
    #[arg(long)]
    country: Option<String>,

    /// Countries to compare (required for comparison)
    #[arg(long, value_delimiter = ',')]
    countries: Vec<String>,

    /// Path to a JSON file with shaped observation rows
    #[arg(short, long)]
    data: String,

    /// Model identifier
    #[arg(long, default_value = "llama-3.3-70b-versatile")]
    model: String,

    /// Print the final state as JSON instead of tables
    #[arg(long)]
    json: bool,
}

/// Initialize tracing subscriber with default configuration
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();

    let raw = std::fs::read_to_string(&args.data)
        .with_context(|| format!("failed to read observation rows from {}", args.data))?;
    let rows = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of observations", args.data))?;
    let source = Arc::new(StaticMarketData::from_rows(rows));

    let provider = Arc::new(GroqProvider::from_env().context("failed to create Groq provider")?);

    let config = AnalysisConfig::builder().model(&args.model).build();
    let engine = AnalysisEngine::new(source, provider, config)
        .context("failed to assemble analysis engine")?;

    // An unknown kind is not fatal: the run degrades to fetch + evaluation.
    let analysis_type = match args.analysis_type.parse::<AnalysisType>() {
        Ok(kind) => Some(kind),
        Err(e) => {
            warn!("{e}; running without task dispatch");
            None
        }
    };

    let state = engine
        .analyze(AnalysisRequest {
            code: args.code,
            country: args.country,
            countries: args.countries,
            analysis_type,
        })
        .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        render(&state);
    }

    if let Some(error) = &state.error {
        anyhow::bail!("analysis failed: {error}");
    }
    Ok(())
}

fn render(state: &AnalysisState) {
    println!("Analysis for HSN code {}", state.code);
    println!("Observations fetched: {}", state.market_data.len());

    if let Some(risk) = &state.risk_analysis {
        println!("\nRisk score: {:.1}", risk.risk_score);
        for factor in &risk.risk_factors {
            println!("  - {factor}");
        }
        println!("{}", risk.summary);

        let mut table = Table::new();
        table.set_header(["Period", "Risk", "Price", "Volume"]);
        for point in &risk.chart_data {
            table.add_row([
                point.month.clone(),
                format!("{:.1}", point.risk),
                format!("{:.2}", point.price),
                format!("{:.0}", point.volume),
            ]);
        }
        println!("{table}");
    }

    if let Some(market) = &state.market_analysis {
        let mut table = Table::new();
        table.set_header(["Country", "Margin", "Potential", "Volume"]);
        for (best, chart) in market.best_markets.iter().zip(&market.chart_data) {
            table.add_row([
                best.country.clone(),
                format!("{:.1}", best.margin),
                best.potential.clone(),
                format!("{:.0}", chart.volume),
            ]);
        }
        println!("\nBest markets:\n{table}");
    }

    if let Some(stability) = &state.stability_analysis {
        let mut table = Table::new();
        table.set_header(["Country", "Stability", "Reliability"]);
        for partner in &stability.partners {
            table.add_row([
                partner.country.clone(),
                format!("{:.1}", partner.stability_index),
                partner.reliability.clone(),
            ]);
        }
        println!("\nStable partners:\n{table}");
        println!("{}", stability.summary);
    }

    if let Some(suggestions) = &state.smart_suggestions {
        println!("\nExpand into: {}", suggestions.expand_markets.join(", "));
        println!("Reduce exposure: {}", suggestions.reduce_exposure.join(", "));
        println!("{}", suggestions.reasoning);
    }

    if let Some(comparison) = &state.country_comparison {
        let mut table = Table::new();
        table.set_header(["Country", "Price", "Volume", "Risk", "Stability"]);
        for country in &comparison.countries {
            table.add_row([
                country.name.clone(),
                format!("{:.2}", country.metrics.price),
                format!("{:.0}", country.metrics.volume),
                format!("{:.0}", country.metrics.risk),
                format!("{:.0}", country.metrics.stability),
            ]);
        }
        println!("\nComparison:\n{table}");
        println!("{}", comparison.recommendation);
    }

    for (node, failure) in &state.node_failures {
        eprintln!("warning: {node}: {failure}");
    }
}
