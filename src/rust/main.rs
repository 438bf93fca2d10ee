use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use ecosort::config::DEFAULT_TIMEOUT_SECS;
use ecosort::presentation::{ABOUT, DEFAULT_MAX_TAGS};
use ecosort::{
    presenter_for, ClassificationReport, ImageUpload, OutputFormat, RulesFile, ServiceConfig, Tag,
    TaggingClient, WasteClassifier,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Plain, global = true)]
    format: OutputFormat,

    /// Number of tags to list with their confidence scores
    #[arg(long, default_value_t = DEFAULT_MAX_TAGS, global = true)]
    top: usize,

    /// JSON file with keyword rules replacing the built-in tables
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Upload an image to the tagging service and classify it
    Classify(ClassifyArgs),
    /// Classify tags given as NAME or NAME:CONFIDENCE without calling the service
    Tags {
        #[arg(required = true)]
        tags: Vec<Tag>,
    },
    /// Show information about this tool
    About,
}

#[derive(clap::Args)]
struct ClassifyArgs {
    /// JPEG or PNG image of the item
    image: PathBuf,

    /// Tagging service endpoint
    #[arg(long, env = "AZURE_ENDPOINT")]
    endpoint: Option<String>,

    /// Tagging service subscription key
    #[arg(long, env = "AZURE_KEY", hide_env_values = true)]
    key: Option<String>,

    /// JSON secrets file holding AZURE_KEY and AZURE_ENDPOINT
    #[arg(long)]
    secrets: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,
}

fn load_classifier(rules: Option<&Path>) -> Result<WasteClassifier> {
    match rules {
        Some(path) => {
            info!("Loading rules from {:?}", path);
            RulesFile::from_path(path)
                .and_then(RulesFile::into_classifier)
                .with_context(|| format!("Failed to load rules from {}", path.display()))
        }
        None => Ok(WasteClassifier::default()),
    }
}

async fn classify_image(classifier: &WasteClassifier, args: ClassifyArgs) -> Result<ClassificationReport> {
    let config = ServiceConfig::resolve(args.endpoint, args.key, args.secrets.as_deref())
        .context("Failed to load tagging service settings")?
        .with_timeout(args.timeout);

    let image = ImageUpload::from_path(&args.image)
        .with_context(|| format!("Failed to read image {}", args.image.display()))?;

    let client = TaggingClient::new(config).context("Failed to create tagging client")?;
    let start_time = Instant::now();
    let analysis = client
        .analyze(&image)
        .await
        .context("Error calling tagging service")?;
    info!("Tagging took {:.2?}", start_time.elapsed());

    Ok(ClassificationReport::from_analysis(&image, classifier, analysis))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    ecosort::init_logger(match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    });

    let classifier = load_classifier(args.rules.as_deref())?;
    let presenter = presenter_for(args.format, args.top);

    let report = match args.command {
        Command::About => {
            println!("{}", ABOUT);
            return Ok(());
        }
        Command::Tags { tags } => ClassificationReport::from_tags("tags", &classifier, tags),
        Command::Classify(classify_args) => classify_image(&classifier, classify_args).await?,
    };

    let output = presenter.render(&report);
    if output.ends_with('\n') {
        print!("{}", output);
    } else {
        println!("{}", output);
    }
    Ok(())
}
