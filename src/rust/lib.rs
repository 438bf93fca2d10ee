//! A waste disposal helper: images are tagged by a remote vision service and
//! the tags are mapped onto a disposal category by keyword-set membership.
//!
//! # Basic Usage
//!
//! ```rust
//! use ecosort::{Category, Tag, WasteClassifier};
//!
//! let classifier = WasteClassifier::default();
//! let result = classifier.classify(&[
//!     Tag::new("banana", 0.8),
//!     Tag::new("organic", 0.6),
//! ]);
//! assert_eq!(result.category, Category::Compost);
//! println!("{}", result.disposal_tip);
//! ```
//!
//! # Custom Rules
//!
//! Rules are checked in the order they are added and the first one whose
//! keywords intersect the tag names wins:
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use ecosort::{Category, CategoryRule, Tag, WasteClassifier};
//!
//! let classifier = WasteClassifier::builder()
//!     .add_rule(
//!         CategoryRule::new(Category::Recyclable, "Rinse and recycle.")
//!             .with_keywords(vec!["can", "tin"])
//!     )?
//!     .build()?;
//!
//! let result = classifier.classify(&[Tag::new("Tin", 0.9)]);
//! assert_eq!(result.category, Category::Recyclable);
//! # Ok(())
//! # }
//! ```
//!
//! # Tagging Images
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use ecosort::{ClassificationReport, ImageUpload, ServiceConfig, TaggingClient, WasteClassifier};
//!
//! let client = TaggingClient::new(ServiceConfig::from_env()?)?;
//! let image = ImageUpload::from_path("bottle.jpg")?;
//! let analysis = client.analyze(&image).await?;
//! let report = ClassificationReport::from_analysis(&image, &WasteClassifier::default(), analysis);
//! println!("{}", report.result.category);
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod config;
pub mod presentation;
pub mod report;
pub mod tagging;
pub mod upload;

pub use classifier::{
    Category, CategoryResult, CategoryRule, Classification, ClassifierBuilder, ClassifierError,
    ClassifierInfo, RuleInfo, Tag, TagParseError, WasteClassifier,
};
pub use config::{ConfigError, RulesFile, ServiceConfig};
pub use presentation::{presenter_for, OutputFormat, Presenter};
pub use report::ClassificationReport;
pub use tagging::{Caption, ImageAnalysis, TaggingClient, TaggingError};
pub use upload::{ImageError, ImageFormat, ImageUpload};

/// Initializes logging from `RUST_LOG`, using `default_level` when it is unset
pub fn init_logger(default_level: &str) {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .try_init();
}
