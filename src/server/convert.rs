//! Conversions between prasat native types and protobuf types.
//!
//! Shared by the service (native → proto) and the client (proto → native).

use crate::content::{ContentBlock, TempleContent};
use crate::types::{Classification, Confidence, PredictionResult};

use super::proto;

// =============================================================================
// Native → Proto (outgoing responses)
// =============================================================================

impl From<Confidence> for proto::Confidence {
    fn from(c: Confidence) -> Self {
        proto::Confidence {
            label: c.label,
            percentage: c.percentage,
        }
    }
}

impl From<ContentBlock> for proto::ContentBlock {
    fn from(b: ContentBlock) -> Self {
        proto::ContentBlock {
            heading: b.heading,
            body: b.body,
            source: b.source,
        }
    }
}

impl From<TempleContent> for proto::TempleContent {
    fn from(t: TempleContent) -> Self {
        proto::TempleContent {
            label: t.label,
            title: t.title,
            source_url: t.source_url,
            khmer: Some(t.khmer.into()),
            english: Some(t.english.into()),
        }
    }
}

impl From<Classification> for proto::ClassifyResponse {
    fn from(c: Classification) -> Self {
        let PredictionResult {
            predicted_label,
            predicted_index,
            confidences,
        } = c.prediction;
        proto::ClassifyResponse {
            predicted_label,
            predicted_index: predicted_index as u32,
            confidences: confidences.into_iter().map(Into::into).collect(),
            content: c.content.map(Into::into),
        }
    }
}

// =============================================================================
// Proto → Native (incoming responses, client side)
// =============================================================================

impl From<proto::Confidence> for Confidence {
    fn from(p: proto::Confidence) -> Self {
        Confidence {
            label: p.label,
            percentage: p.percentage,
        }
    }
}

impl From<proto::ContentBlock> for ContentBlock {
    fn from(p: proto::ContentBlock) -> Self {
        ContentBlock {
            heading: p.heading,
            body: p.body,
            source: p.source,
        }
    }
}

fn empty_block() -> ContentBlock {
    ContentBlock {
        heading: String::new(),
        body: String::new(),
        source: String::new(),
    }
}

impl From<proto::TempleContent> for TempleContent {
    fn from(p: proto::TempleContent) -> Self {
        TempleContent {
            label: p.label,
            title: p.title,
            source_url: p.source_url,
            khmer: p.khmer.map(Into::into).unwrap_or_else(empty_block),
            english: p.english.map(Into::into).unwrap_or_else(empty_block),
        }
    }
}

impl From<proto::ClassifyResponse> for Classification {
    fn from(p: proto::ClassifyResponse) -> Self {
        Classification {
            prediction: PredictionResult {
                predicted_label: p.predicted_label,
                predicted_index: p.predicted_index as usize,
                confidences: p.confidences.into_iter().map(Into::into).collect(),
            },
            content: p.content.map(Into::into),
        }
    }
}
