use prasat::render::{detected_message, render_classification, render_prediction, render_prompt};
use prasat::{Classification, ContentTable, ProbabilityVector, TEMPLE_LABELS, decide};

fn bayon_prediction() -> prasat::PredictionResult {
    decide(
        &ProbabilityVector::new(vec![0.1, 0.6, 0.1, 0.15, 0.05]),
        &TEMPLE_LABELS,
    )
    .unwrap()
}

#[test]
fn detected_message_format() {
    assert_eq!(detected_message("Koh_Ker"), "Detected Temple: Koh_Ker");
}

#[test]
fn page_starts_with_detection_and_probabilities() {
    let page = render_prediction(&bayon_prediction(), None);
    let lines: Vec<&str> = page.lines().collect();
    assert_eq!(lines[0], "Detected Temple: Bayon");
    assert_eq!(lines[1], "");
    assert_eq!(lines[2], "Prediction Probabilities:");
    assert_eq!(
        &lines[3..8],
        &[
            "Angkor_Wat: 10.00%",
            "Bayon: 60.00%",
            "Koh_Ker: 10.00%",
            "Prasat Sambor Prei Kuk: 15.00%",
            "Preah_Vihear: 5.00%",
        ]
    );
    assert_eq!(lines.len(), 8, "no content block without a table entry");
}

#[test]
fn page_includes_both_languages_of_the_winner() {
    let table = ContentTable::embedded().unwrap();
    let prediction = bayon_prediction();
    let temple = table.lookup(&prediction.predicted_label);
    let page = render_prediction(&prediction, temple);

    let temple = temple.unwrap();
    assert!(page.contains(&format!("## {}", temple.title)));
    assert!(page.contains(&format!("#### {}", temple.khmer.heading)));
    assert!(page.contains(&format!("#### {}", temple.english.heading)));
    assert!(page.contains(temple.english.body.trim()));
    assert!(page.contains(&temple.source_url));

    // Khmer block comes first.
    let khmer_at = page.find(&temple.khmer.heading).unwrap();
    let english_at = page.find(&temple.english.heading).unwrap();
    assert!(khmer_at < english_at);

    // Nothing from other temples leaks in.
    let angkor = table.lookup("Angkor_Wat").unwrap();
    assert!(!page.contains(&angkor.source_url));
}

#[test]
fn classification_renders_like_prediction() {
    let table = ContentTable::embedded().unwrap();
    let prediction = bayon_prediction();
    let content = table.lookup("Bayon").cloned();
    let expected = render_prediction(&prediction, content.as_ref());
    let classification = Classification {
        prediction,
        content,
    };
    assert_eq!(render_classification(&classification), expected);
}

#[test]
fn prompt_page() {
    let table = ContentTable::embedded().unwrap();
    let page = render_prompt(&table);
    assert!(page.starts_with("Cambodia Historical Temple Recognition\n"));
    assert!(page.contains("Please upload an image of a temple."));
    assert!(page.contains(&table.prompt.khmer));
    assert!(!page.contains("Detected Temple"));
}
