//! Plain-text rendering of a classification page.

use std::fmt::Write;

use crate::content::{ContentBlock, ContentTable, TempleContent};
use crate::types::{Classification, PredictionResult};

/// `Detected Temple: <label>`
pub fn detected_message(label: &str) -> String {
    format!("Detected Temple: {label}")
}

/// Render the result page: detected label, per-class probabilities and the
/// bilingual content block of the winning temple (when known).
pub fn render_prediction(result: &PredictionResult, content: Option<&TempleContent>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", detected_message(&result.predicted_label));
    let _ = writeln!(out);
    let _ = writeln!(out, "Prediction Probabilities:");
    for confidence in &result.confidences {
        let _ = writeln!(out, "{confidence}");
    }

    if let Some(temple) = content {
        let _ = writeln!(out);
        let _ = writeln!(out, "## {}", temple.title);
        render_block(&mut out, &temple.khmer, &temple.source_url);
        render_block(&mut out, &temple.english, &temple.source_url);
    }
    out
}

/// [`render_prediction`] for a service response.
pub fn render_classification(classification: &Classification) -> String {
    render_prediction(&classification.prediction, classification.content.as_ref())
}

/// Render the message shown when no image was supplied.
pub fn render_prompt(table: &ContentTable) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", table.title);
    if !table.tagline.is_empty() {
        let _ = writeln!(out, "{}", table.tagline);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", table.prompt.khmer);
    let _ = writeln!(out, "{}", table.prompt.english);
    out
}

fn render_block(out: &mut String, block: &ContentBlock, source_url: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "#### {}", block.heading);
    let _ = writeln!(out, "{}", block.body.trim());
    let _ = writeln!(out);
    let _ = writeln!(out, "{} <{}>", block.source, source_url);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Confidence;

    fn result() -> PredictionResult {
        PredictionResult {
            predicted_label: "Koh_Ker".into(),
            predicted_index: 1,
            confidences: vec![Confidence::new("Bayon", 25.0), Confidence::new("Koh_Ker", 75.0)],
        }
    }

    #[test]
    fn prediction_without_content() {
        let page = render_prediction(&result(), None);
        assert_eq!(
            page,
            "Detected Temple: Koh_Ker\n\nPrediction Probabilities:\nBayon: 25.00%\nKoh_Ker: 75.00%\n"
        );
    }

    #[test]
    fn prediction_with_content_cites_source() {
        let block = |lang: &str| ContentBlock {
            heading: format!("About ({lang})"),
            body: format!("  body {lang}\n"),
            source: format!("Source ({lang})"),
        };
        let temple = TempleContent {
            label: "Koh_Ker".into(),
            title: "Koh Ker".into(),
            source_url: "https://whc.unesco.org/en/list/1667/".into(),
            khmer: block("km"),
            english: block("en"),
        };
        let page = render_prediction(&result(), Some(&temple));
        assert!(page.contains("## Koh Ker\n"));
        assert!(page.contains("#### About (en)\nbody en\n"));
        assert!(page.contains("Source (km) <https://whc.unesco.org/en/list/1667/>"));
        assert!(page.find("About (km)") < page.find("About (en)"));
    }
}
