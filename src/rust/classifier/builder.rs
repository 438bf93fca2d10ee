use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use log::{debug, info};

use super::classifier::WasteClassifier;
use super::error::ClassifierError;
use super::model::{Category, CategoryResult};
use super::utils::{is_hex_color, normalize_name};

pub const RECYCLABLE_KEYWORDS: [&str; 5] = ["plastic", "glass", "metal", "paper", "cardboard"];
pub const COMPOST_KEYWORDS: [&str; 4] = ["food", "fruit", "vegetable", "organic"];

pub const RECYCLABLE_TIP: &str = "Dispose in recycle bin. Rinse if needed.";
pub const COMPOST_TIP: &str = "Dispose in compost bin. Great for soil.";
pub const GENERAL_WASTE_TIP: &str = "Dispose in general waste bin.";

pub const RECYCLABLE_COLOR: &str = "#4CAF50";
pub const COMPOST_COLOR: &str = "#795548";
pub const GENERAL_WASTE_COLOR: &str = "#9E9E9E";

/// A category together with its disposal tip, display color and the keywords
/// that select it.
#[derive(Debug, Clone)]
pub struct CategoryRule {
    /// The category this rule assigns
    pub category: Category,
    /// Human-readable disposal advice shown alongside the category
    pub tip: String,
    /// Optional `#RRGGBB` color used by styled presenters
    pub color: Option<String>,
    /// Lowercase keywords; any overlap with the tag names selects this rule.
    /// Fallback rules carry no keywords.
    pub keywords: HashSet<String>,
}

impl CategoryRule {
    /// Creates a new rule with a category and disposal tip
    ///
    /// # Example
    /// ```
    /// use ecosort::{Category, CategoryRule};
    ///
    /// let rule = CategoryRule::new(Category::Compost, "Dispose in compost bin.")
    ///     .with_keywords(vec!["food", "Fruit"]);
    /// assert!(rule.keywords.contains("fruit"));
    /// ```
    pub fn new(category: Category, tip: impl Into<String>) -> Self {
        Self {
            category,
            tip: tip.into(),
            color: None,
            keywords: HashSet::new(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Adds keywords to the rule. Keywords are trimmed and lowercased; blank
    /// keywords are kept as-is so that validation can reject them.
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keywords.extend(
            keywords
                .into_iter()
                .map(|k| normalize_name(k.as_ref().trim())),
        );
        self
    }

    pub(crate) fn result(&self) -> CategoryResult {
        CategoryResult {
            category: self.category,
            disposal_tip: self.tip.clone(),
            display_color: self.color.clone(),
        }
    }

    /// Returns the rule's keywords present in `names`, sorted.
    pub(crate) fn matches(&self, names: &HashSet<String>) -> Vec<String> {
        self.keywords
            .intersection(names)
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub(crate) fn recyclable() -> Self {
        Self::new(Category::Recyclable, RECYCLABLE_TIP)
            .with_color(RECYCLABLE_COLOR)
            .with_keywords(RECYCLABLE_KEYWORDS)
    }

    pub(crate) fn compost() -> Self {
        Self::new(Category::Compost, COMPOST_TIP)
            .with_color(COMPOST_COLOR)
            .with_keywords(COMPOST_KEYWORDS)
    }

    pub(crate) fn general_waste() -> Self {
        Self::new(Category::GeneralWaste, GENERAL_WASTE_TIP).with_color(GENERAL_WASTE_COLOR)
    }
}

/// A builder for constructing a WasteClassifier with a fluent interface.
///
/// Rules are checked in the order they are added; the first rule whose
/// keywords intersect the tag names wins.
#[derive(Default, Debug)]
pub struct ClassifierBuilder {
    rules: Vec<CategoryRule>,
    fallback: Option<CategoryRule>,
}

impl ClassifierBuilder {
    /// Creates a new empty ClassifierBuilder
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            fallback: None,
        }
    }

    /// Returns a builder preloaded with the standard tables: recyclable
    /// first, then compost, falling back to general waste.
    ///
    /// # Example
    /// ```
    /// use ecosort::{Category, ClassifierBuilder, Tag};
    ///
    /// let classifier = ClassifierBuilder::with_default_rules().build()?;
    /// let result = classifier.classify(&[Tag::new("Glass", 0.95)]);
    /// assert_eq!(result.category, Category::Recyclable);
    /// # Ok::<(), ecosort::ClassifierError>(())
    /// ```
    pub fn with_default_rules() -> Self {
        Self {
            rules: vec![CategoryRule::recyclable(), CategoryRule::compost()],
            fallback: Some(CategoryRule::general_waste()),
        }
    }

    fn validate_rule(rule: &CategoryRule) -> Result<(), ClassifierError> {
        if rule.tip.trim().is_empty() {
            return Err(ClassifierError::ValidationError(format!(
                "Disposal tip for '{}' cannot be empty",
                rule.category
            )));
        }
        if let Some(color) = &rule.color {
            if !is_hex_color(color) {
                return Err(ClassifierError::ValidationError(format!(
                    "Display color '{}' for '{}' must look like #RRGGBB",
                    color, rule.category
                )));
            }
        }
        Ok(())
    }

    /// Appends a rule after the existing ones
    ///
    /// # Returns
    /// * `Result<Self, ClassifierError>` - The builder instance if successful, or an error if:
    ///   - The tip is empty or the color is malformed
    ///   - No keywords are given, or a keyword is blank
    ///   - Another rule already uses the same category
    pub fn add_rule(mut self, rule: CategoryRule) -> Result<Self, ClassifierError> {
        Self::validate_rule(&rule)?;

        if rule.keywords.is_empty() {
            return Err(ClassifierError::ValidationError(format!(
                "Rule '{}' must have at least one keyword",
                rule.category
            )));
        }
        if rule.keywords.iter().any(|k| k.is_empty()) {
            return Err(ClassifierError::ValidationError(format!(
                "Rule '{}' contains an empty keyword",
                rule.category
            )));
        }
        if self.rules.iter().any(|r| r.category == rule.category) {
            return Err(ClassifierError::ValidationError(format!(
                "Category '{}' already has a rule",
                rule.category
            )));
        }

        debug!("Adding rule '{}' with {} keywords", rule.category, rule.keywords.len());
        self.rules.push(rule);
        Ok(self)
    }

    /// Sets the result used when no rule matches. Keywords on the fallback are ignored.
    pub fn with_fallback(mut self, fallback: CategoryRule) -> Result<Self, ClassifierError> {
        Self::validate_rule(&fallback)?;
        self.fallback = Some(CategoryRule {
            keywords: HashSet::new(),
            ..fallback
        });
        Ok(self)
    }

    /// Builds and returns the final WasteClassifier instance
    ///
    /// # Returns
    /// * `Result<WasteClassifier, ClassifierError>` - The classifier if successful, or an error if:
    ///   - No rules have been added
    ///   - The fallback category is also assigned by a rule
    pub fn build(self) -> Result<WasteClassifier, ClassifierError> {
        if self.rules.is_empty() {
            return Err(ClassifierError::BuildError("At least one rule must be added".to_string()));
        }

        let fallback = self.fallback.unwrap_or_else(CategoryRule::general_waste);
        if self.rules.iter().any(|r| r.category == fallback.category) {
            return Err(ClassifierError::BuildError(format!(
                "Fallback category '{}' is also used by a rule",
                fallback.category
            )));
        }

        info!(
            "Built classifier with {} rules (fallback: {})",
            self.rules.len(),
            fallback.category
        );

        Ok(WasteClassifier {
            rules: Arc::new(self.rules),
            fallback: Arc::new(fallback),
        })
    }
}
