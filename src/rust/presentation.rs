//! Output adapters for classification reports.
//!
//! The classifier knows nothing about rendering; each presenter turns a
//! [`ClassificationReport`] into text for one kind of output.

use std::fmt::Write;

use clap::ValueEnum;

use crate::report::ClassificationReport;

pub const DEFAULT_MAX_TAGS: usize = 5;
const BAR_WIDTH: usize = 20;

pub const ABOUT: &str = "\
This tool uses Azure Computer Vision to analyze waste images
and classify them as Recyclable, Compost, or General Waste.

Built with Rust, designed to promote eco-friendly habits.";

pub trait Presenter {
    fn render(&self, report: &ClassificationReport) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Plain,
    Styled,
    Json,
}

/// Returns the presenter for `format`, showing at most `max_tags` tags
pub fn presenter_for(format: OutputFormat, max_tags: usize) -> Box<dyn Presenter> {
    match format {
        OutputFormat::Plain => Box::new(PlainPresenter { max_tags }),
        OutputFormat::Styled => Box::new(StyledPresenter { max_tags }),
        OutputFormat::Json => Box::new(JsonPresenter { pretty: true }),
    }
}

/// Uppercases the first character and lowercases the rest
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

pub fn confidence_bar(confidence: f32) -> String {
    let filled = (confidence.clamp(0.0, 1.0) * BAR_WIDTH as f32).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn render_confidence(out: &mut String, report: &ClassificationReport, max_tags: usize) {
    if report.tags.is_empty() || max_tags == 0 {
        return;
    }
    let _ = writeln!(out, "\nConfidence Scores");
    for tag in report.tags.iter().take(max_tags) {
        let _ = writeln!(
            out,
            "  {} {}: {:.1}%",
            confidence_bar(tag.confidence),
            capitalize(&tag.name),
            tag.confidence * 100.0
        );
    }
}

#[derive(Debug, Clone)]
pub struct PlainPresenter {
    pub max_tags: usize,
}

impl Default for PlainPresenter {
    fn default() -> Self {
        Self { max_tags: DEFAULT_MAX_TAGS }
    }
}

impl Presenter for PlainPresenter {
    fn render(&self, report: &ClassificationReport) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}: {}", report.source, report.result.category);
        let _ = writeln!(out, "{}", report.result.disposal_tip);
        if let Some(caption) = &report.caption {
            let _ = writeln!(out, "Caption: {}", caption);
        }
        render_confidence(&mut out, report, self.max_tags);
        out
    }
}

/// Renders the category as a colored card using 24-bit ANSI escapes
#[derive(Debug, Clone)]
pub struct StyledPresenter {
    pub max_tags: usize,
}

impl Default for StyledPresenter {
    fn default() -> Self {
        Self { max_tags: DEFAULT_MAX_TAGS }
    }
}

fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

impl Presenter for StyledPresenter {
    fn render(&self, report: &ClassificationReport) -> String {
        let category = report.result.category;
        let title = format!("  {} {}  ", category.icon(), category.label());
        let tip = format!("  {}  ", report.result.disposal_tip);

        let mut out = String::new();
        match report.result.display_color.as_deref().and_then(parse_hex_color) {
            Some((r, g, b)) => {
                let _ = writeln!(out, "\x1b[1;97;48;2;{};{};{}m{}\x1b[0m", r, g, b, title);
                let _ = writeln!(out, "\x1b[97;48;2;{};{};{}m{}\x1b[0m", r, g, b, tip);
            }
            None => {
                let _ = writeln!(out, "\x1b[1m{}\x1b[0m", title);
                let _ = writeln!(out, "{}", tip);
            }
        }
        if let Some(caption) = &report.caption {
            let _ = writeln!(out, "\x1b[2m{}\x1b[0m", caption);
        }
        render_confidence(&mut out, report, self.max_tags);
        out
    }
}

#[derive(Debug, Clone, Default)]
pub struct JsonPresenter {
    pub pretty: bool,
}

impl Presenter for JsonPresenter {
    fn render(&self, report: &ClassificationReport) -> String {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        };
        rendered.unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() }).to_string())
    }
}
