//! Class labels in model output order.

/// Temple categories, index-aligned with the classifier's output vector.
///
/// This order was fixed when the model was trained. Reordering it without
/// retraining silently mislabels every prediction.
pub const TEMPLE_LABELS: [&str; 5] = [
    "Angkor_Wat",
    "Bayon",
    "Koh_Ker",
    "Prasat Sambor Prei Kuk",
    "Preah_Vihear",
];

/// Owned copy of [`TEMPLE_LABELS`].
pub fn temple_labels() -> Vec<String> {
    TEMPLE_LABELS.iter().map(|l| l.to_string()).collect()
}
