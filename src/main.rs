use chrono::Local;
use clap::Parser;
use radar_print::{BuildContext, Document, PipelineBuilder, PipelineError, ResourceProvider};
use radar_print_resource::{FilesystemResourceProvider, HttpResourceProvider};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "radar-print")]
#[command(about = "Builds the print version of a rendered technology radar page")]
struct Cli {
    /// Rendered radar page (XHTML)
    #[arg(long)]
    input: PathBuf,

    /// Where to write the print document
    #[arg(long)]
    output: PathBuf,

    /// JSON file overriding the default selectors and resources
    #[arg(long)]
    config: Option<PathBuf>,

    /// Subtitle written on the cover
    #[arg(long)]
    subtitle: Option<String>,

    /// Link target for the "generated from" anchor [default: the input's file:// URL]
    #[arg(long)]
    location: Option<String>,

    /// Directory content page resources are read from [default: the input's directory]
    #[arg(long, conflicts_with = "resources_url")]
    resources_dir: Option<PathBuf>,

    /// Base URL content page resources are fetched from
    #[arg(long)]
    resources_url: Option<String>,

    /// Also write the index outline as JSON
    #[arg(long)]
    outline: Option<PathBuf>,
}

fn read_file(path: &Path, what: &str) -> Result<String, PipelineError> {
    fs::read_to_string(path).map_err(|e| {
        PipelineError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read {} from '{}': {}", what, path.display(), e),
        ))
    })
}

fn resource_provider(cli: &Cli) -> Result<Arc<dyn ResourceProvider>, PipelineError> {
    if let Some(url) = &cli.resources_url {
        return Ok(Arc::new(HttpResourceProvider::new(url)?));
    }
    let dir = match &cli.resources_dir {
        Some(dir) => dir.clone(),
        None => cli
            .input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    Ok(Arc::new(FilesystemResourceProvider::new(dir)))
}

fn default_location(input: &Path) -> Result<String, PipelineError> {
    let absolute = fs::canonicalize(input)?;
    Ok(format!("file://{}", absolute.display()))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), PipelineError> {
    env_logger::init();
    let cli = Cli::parse();

    let mut builder = PipelineBuilder::new().with_resource_provider(resource_provider(&cli)?);
    if let Some(config) = &cli.config {
        builder = builder.with_config_file(config)?;
    }
    let pipeline = builder.build()?;

    let document = Document::parse(&read_file(&cli.input, "radar page")?)?;
    let context = BuildContext {
        subtitle: cli.subtitle.clone(),
        today: Local::now().date_naive(),
        location: match &cli.location {
            Some(location) => location.clone(),
            None => default_location(&cli.input)?,
        },
    };

    let output = pipeline.build(document, &context).await;

    fs::write(&cli.output, output.document.to_markup()?)?;
    log::info!("Wrote print document to {}", cli.output.display());

    if let Some(path) = &cli.outline {
        fs::write(path, serde_json::to_string_pretty(&output.outline)?)?;
        log::info!("Wrote index outline to {}", path.display());
    }
    Ok(())
}
