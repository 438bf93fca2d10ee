use serde::Serialize;

use crate::classifier::{Category, CategoryResult, Classification, Tag, WasteClassifier};
use crate::tagging::ImageAnalysis;
use crate::upload::ImageUpload;

/// A classified image (or tag list) ready to hand to a presenter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationReport {
    /// File name of the image, or a label for tags given directly
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_digest: Option<String>,
    #[serde(flatten)]
    pub result: CategoryResult,
    pub matched_keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub tags: Vec<Tag>,
}

impl ClassificationReport {
    pub fn from_tags(source: impl Into<String>, classifier: &WasteClassifier, tags: Vec<Tag>) -> Self {
        let Classification {
            result,
            matched_keywords,
        } = classifier.classify_detailed(&tags);
        log::info!("Classified {} tags as {}", tags.len(), result.category);

        Self {
            source: source.into(),
            image_digest: None,
            result,
            matched_keywords,
            caption: None,
            tags,
        }
    }

    pub fn from_analysis(image: &ImageUpload, classifier: &WasteClassifier, analysis: ImageAnalysis) -> Self {
        let caption = analysis.caption.map(|c| c.text).filter(|text| !text.is_empty());
        Self {
            image_digest: Some(image.digest().to_string()),
            caption,
            ..Self::from_tags(image.file_name(), classifier, analysis.tags)
        }
    }

    pub fn category(&self) -> Category {
        self.result.category
    }
}
