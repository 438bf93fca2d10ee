mod error;
mod model;
#[allow(clippy::module_inception)]
mod classifier;
pub mod builder;
mod utils;

pub use error::ClassifierError;
pub use model::{Category, CategoryResult, Classification, Tag, TagParseError};
pub use classifier::WasteClassifier;
pub use builder::{ClassifierBuilder, CategoryRule};

/// Summary of a single rule in a classifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleInfo {
    /// Category the rule assigns
    pub category: Category,
    /// Number of distinct keywords that select the rule
    pub num_keywords: usize,
}

/// Information about the configuration of a classifier
#[derive(Debug, Clone)]
pub struct ClassifierInfo {
    /// Rules in evaluation order
    pub rules: Vec<RuleInfo>,
    /// Category returned when no rule matches
    pub fallback: Category,
}
