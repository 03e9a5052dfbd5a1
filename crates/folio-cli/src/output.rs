use folio_core::Envelope;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(
    envelope: &Envelope<Value>,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => println!("{}", render_table(envelope)?),
    }

    Ok(())
}

fn render_table(envelope: &Envelope<Value>) -> Result<String, CliError> {
    let mut lines = vec![
        format!("request_id  : {}", envelope.meta.request_id),
        format!("schema      : {}", envelope.meta.schema_version),
        format!("generated_at: {}", envelope.meta.generated_at),
        format!("latency_ms  : {}", envelope.meta.latency_ms),
    ];

    if let Some(assets) = asset_rows(&envelope.data) {
        lines.push(String::from("assets:"));
        lines.push(format!("  {:<10} {:>8}", "TICKER", "WEIGHT"));
        for (ticker, weight) in assets {
            lines.push(format!("  {ticker:<10} {weight:>8.2}"));
        }
    } else {
        lines.push(String::from("data:"));
        let pretty_data = serde_json::to_string_pretty(&envelope.data)?;
        lines.extend(pretty_data.lines().map(|line| format!("  {line}")));
    }

    if !envelope.meta.warnings.is_empty() {
        lines.push(String::from("warnings:"));
        lines.extend(
            envelope
                .meta
                .warnings
                .iter()
                .map(|warning| format!("  - {warning}")),
        );
    }

    if !envelope.errors.is_empty() {
        lines.push(String::from("errors:"));
        for error in &envelope.errors {
            lines.push(format!("  - {}: {}", error.code, error.message));
            if let Some(suggestion) = &error.suggestion {
                lines.push(format!("    hint: {suggestion}"));
            }
        }
    }

    Ok(lines.join("\n"))
}

/// Finds the asset list in command output, wherever the command nests it.
fn asset_rows(data: &Value) -> Option<Vec<(String, f64)>> {
    let assets = data
        .get("assets")
        .or_else(|| data.pointer("/holdings/assets"))
        .or_else(|| data.pointer("/parsedData/assets"))?
        .as_array()?;

    Some(
        assets
            .iter()
            .map(|asset| {
                let ticker = asset["ticker"].as_str().unwrap_or_default().to_owned();
                let weight = asset["weight"].as_f64().unwrap_or(0.0);
                (ticker, weight)
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use folio_core::{EnvelopeError, EnvelopeMeta, Issue, IssueKind};
    use serde_json::json;

    use super::*;

    fn envelope(data: Value) -> Envelope<Value> {
        let meta = EnvelopeMeta::new("req-00000001", "v1.0.0", 3).expect("valid meta");
        Envelope::success(meta, data)
    }

    #[test]
    fn table_lists_assets_with_weights() {
        let rendered = render_table(&envelope(json!({
            "assets": [{"ticker": "SPY", "weight": 60.0}, {"ticker": "BND", "weight": 40.0}]
        })))
        .expect("renders");

        assert!(rendered.contains("SPY           60.00"));
        assert!(rendered.contains("BND           40.00"));
        assert!(!rendered.contains("data:"));
    }

    #[test]
    fn table_falls_back_to_raw_data() {
        let rendered = render_table(&envelope(json!({"SPY": {"name": "SPDR"}}))).expect("renders");

        assert!(rendered.contains("data:"));
        assert!(rendered.contains("\"SPY\""));
    }

    #[test]
    fn table_shows_error_hints() {
        let mut envelope = envelope(Value::Null);
        envelope
            .push_error(EnvelopeError::from(
                &Issue::new(IssueKind::WeightsNot100, "Weights sum to 90% instead of 100%")
                    .with_suggestion("Add more assets or increase weights"),
            ))
            .expect("valid error");

        let rendered = render_table(&envelope).expect("renders");

        assert!(rendered.contains("  - weights-not-100: Weights sum to 90% instead of 100%"));
        assert!(rendered.contains("    hint: Add more assets"));
    }
}
