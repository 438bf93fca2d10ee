use ecosort::presentation::{JsonPresenter, PlainPresenter, StyledPresenter};
use ecosort::tagging::parse_analysis;
use ecosort::{
    presenter_for, Category, ClassificationReport, ConfigError, ImageError, ImageUpload,
    OutputFormat, Presenter, RulesFile, Tag, WasteClassifier,
};
use env_logger::{Builder, Env};
use std::fs;

// Initialize test logger
fn init() {
    let _ = Builder::from_env(Env::default().default_filter_or("warn"))
        .is_test(true)
        .try_init();
}

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0dIHDR\x00\x00\x00\x01\x00\x00\x00\x01\x08\x02\x00\x00\x00";

#[test]
fn test_image_to_report() -> Result<(), Box<dyn std::error::Error>> {
    init();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("leftovers.png");
    fs::write(&path, PNG_BYTES)?;

    let image = ImageUpload::from_path(&path)?;
    let analysis = parse_analysis(
        r#"{
            "tags": [
                {"name": "food", "confidence": 0.97},
                {"name": "plate", "confidence": 0.88},
                {"name": "vegetable", "confidence": 0.74}
            ],
            "description": {"captions": [{"text": "a plate of food", "confidence": 0.6}]}
        }"#,
    )?;

    let report = ClassificationReport::from_analysis(&image, &WasteClassifier::default(), analysis);
    assert_eq!(report.category(), Category::Compost);
    assert_eq!(report.matched_keywords, vec!["food", "vegetable"]);

    let output = PlainPresenter::default().render(&report);
    assert!(output.starts_with("leftovers.png: Compost\n"));
    assert!(output.contains("Caption: a plate of food"));
    assert!(output.contains("Food: 97.0%"));
    assert!(output.contains("Plate: 88.0%"));
    Ok(())
}

#[test]
fn test_rejects_non_image_upload() -> Result<(), Box<dyn std::error::Error>> {
    init();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("notes.jpg");
    fs::write(&path, "not an image")?;

    let result = ImageUpload::from_path(&path);
    assert!(matches!(result, Err(ImageError::UnsupportedContent(_))));
    Ok(())
}

#[test]
fn test_rules_file_from_disk() -> Result<(), Box<dyn std::error::Error>> {
    init();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("rules.json");
    fs::write(
        &path,
        r##"{
            "rules": [
                {"category": "recyclable", "tip": "Crush and recycle.", "color": "#2196F3", "keywords": ["can", "TIN"]},
                {"category": "compost", "tip": "Compost it.", "keywords": ["peel"]}
            ]
        }"##,
    )?;

    let classifier = RulesFile::from_path(&path)?.into_classifier()?;
    let info = classifier.info();
    assert_eq!(info.rules.len(), 2);
    assert_eq!(info.fallback, Category::GeneralWaste);

    let result = classifier.classify(&[Tag::new("tin", 0.8), Tag::new("peel", 0.9)]);
    assert_eq!(result.category, Category::Recyclable);
    assert_eq!(result.display_color.as_deref(), Some("#2196F3"));

    // Built-in keywords are replaced, not extended
    let result = classifier.classify(&[Tag::new("glass", 0.9)]);
    assert_eq!(result.category, Category::GeneralWaste);
    Ok(())
}

#[test]
fn test_invalid_rules_file() -> Result<(), Box<dyn std::error::Error>> {
    init();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("rules.json");
    fs::write(
        &path,
        r#"{"rules": [
            {"category": "compost", "tip": "Compost it.", "keywords": ["peel"]},
            {"category": "compost", "tip": "Again.", "keywords": ["core"]}
        ]}"#,
    )?;

    let result = RulesFile::from_path(&path)?.into_classifier();
    assert!(matches!(result, Err(ConfigError::InvalidRules(_))));

    let missing = RulesFile::from_path(dir.path().join("missing.json"));
    assert!(matches!(missing, Err(ConfigError::IoError(_))));
    Ok(())
}

#[test]
fn test_presenters_share_report() {
    init();
    let tags: Vec<Tag> = ["cardboard:0.91", "box:0.85"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
    let report = ClassificationReport::from_tags("tags", &WasteClassifier::default(), tags);

    let plain = PlainPresenter::default().render(&report);
    let styled = StyledPresenter::default().render(&report);
    let json = JsonPresenter { pretty: true }.render(&report);

    assert!(plain.contains("Recyclable"));
    assert!(styled.contains("\x1b["));
    assert!(styled.contains("Cardboard: 91.0%"));
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["category"], "recyclable");
    assert_eq!(value["source"], "tags");

    let boxed = presenter_for(OutputFormat::Plain, 1);
    let output = boxed.render(&report);
    assert!(output.contains("Cardboard"));
    assert!(!output.contains("Box"));
}
