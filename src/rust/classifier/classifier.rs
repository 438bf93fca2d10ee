use std::sync::Arc;
use log::debug;

use super::builder::{CategoryRule, ClassifierBuilder};
use super::model::{CategoryResult, Classification, Tag};
use super::utils::tag_name_set;

/// Maps detected tags onto a disposal category by keyword-set membership.
///
/// # Thread Safety
///
/// The rules are immutable after construction and shared behind `Arc`, so the
/// classifier is `Send + Sync` and cloning it is cheap.
///
/// ```rust
/// use ecosort::{Category, Tag, WasteClassifier};
///
/// let classifier = WasteClassifier::default();
/// let result = classifier.classify(&[
///     Tag::new("plastic", 0.9),
///     Tag::new("food", 0.7),
/// ]);
/// assert_eq!(result.category, Category::Recyclable);
/// ```
#[derive(Debug, Clone)]
pub struct WasteClassifier {
    pub(crate) rules: Arc<Vec<CategoryRule>>,
    pub(crate) fallback: Arc<CategoryRule>,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    #[allow(dead_code)]
    fn verify_thread_safety() {
        assert_send_sync::<WasteClassifier>();
    }
};

impl Default for WasteClassifier {
    /// Recyclable first, then compost, falling back to general waste.
    fn default() -> Self {
        Self {
            rules: Arc::new(vec![CategoryRule::recyclable(), CategoryRule::compost()]),
            fallback: Arc::new(CategoryRule::general_waste()),
        }
    }
}

impl WasteClassifier {
    /// Creates a new ClassifierBuilder for fluent construction
    pub fn builder() -> ClassifierBuilder {
        ClassifierBuilder::new()
    }

    /// Returns information about the classifier's rules
    pub fn info(&self) -> super::ClassifierInfo {
        super::ClassifierInfo {
            rules: self
                .rules
                .iter()
                .map(|rule| super::RuleInfo {
                    category: rule.category,
                    num_keywords: rule.keywords.len(),
                })
                .collect(),
            fallback: self.fallback.category,
        }
    }

    /// Classifies a set of tags.
    ///
    /// Tag names are compared case-insensitively; confidence plays no part in
    /// the decision. Never fails: an empty slice yields the fallback category.
    pub fn classify(&self, tags: &[Tag]) -> CategoryResult {
        self.classify_detailed(tags).result
    }

    /// Like [`classify`](Self::classify) but also reports which keywords of
    /// the winning rule were found.
    pub fn classify_detailed(&self, tags: &[Tag]) -> Classification {
        let names = tag_name_set(tags);

        for rule in self.rules.iter() {
            let matched = rule.matches(&names);
            if !matched.is_empty() {
                debug!("Tags matched '{}' via {:?}", rule.category, matched);
                return Classification {
                    result: rule.result(),
                    matched_keywords: matched,
                };
            }
        }

        debug!("No rule matched {} distinct tag names; using fallback", names.len());
        Classification {
            result: self.fallback.result(),
            matched_keywords: Vec::new(),
        }
    }
}
