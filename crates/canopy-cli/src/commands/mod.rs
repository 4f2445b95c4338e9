//! Command implementations

mod area;
mod config;
mod image;
mod measure;

use crate::cli::{Cli, Commands};
use crate::config_loader::{cli_overrides, load_config};
use crate::errors;
use crate::output::OutputWriter;
use crate::output_types::AnalysisOutput;
use crate::terminal::{text_chart, TerminalChart, TerminalMap, TerminalPage};
use anyhow::{Context, Result};
use canopy_client::HttpAnalysisBackend;
use canopy_controller::{AnalysisController, ControllerSettings, SubmitOutcome};
use canopy_core::config::LayeredConfig;
use canopy_core::models::ElementId;
use canopy_core::ports::AnalysisBackend;
use std::path::{Path, PathBuf};

/// Controller wired to the terminal adapters and the HTTP backend
pub type CliController =
    AnalysisController<TerminalPage, TerminalMap, TerminalChart, HttpAnalysisBackend>;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);

    let confidence = match &cli.command {
        Commands::Image(args) => args.analysis.conf,
        Commands::Area(args) => args.analysis.conf,
        Commands::Measure(_) | Commands::Config => None,
    };
    let overrides = cli_overrides(cli.server.as_deref(), confidence)?;
    let config = load_config(cli.config.as_deref(), overrides)?;

    match cli.command {
        Commands::Image(args) => image::execute(args, &config, &output).await,
        Commands::Area(args) => area::execute(args, &config, &output).await,
        Commands::Measure(args) => measure::execute(args, &config, &output).await,
        Commands::Config => config::execute(&config, &output),
    }
}

fn build_controller(config: &LayeredConfig, output: &OutputWriter) -> CliController {
    let page = TerminalPage::new(*output).with_threshold(config.confidence.value);

    AnalysisController::new(
        page,
        TerminalMap::new(),
        TerminalChart::default(),
        HttpAnalysisBackend::new(config.server_url.value.clone()),
        ControllerSettings::from_config(config),
    )
}

/// Turn a submission outcome into command output, saving the image if asked
async fn finish_analysis(
    controller: &CliController,
    outcome: Option<SubmitOutcome>,
    save: Option<&Path>,
) -> Result<AnalysisOutput> {
    let result = match outcome {
        Some(SubmitOutcome::Completed(result)) => result,
        Some(SubmitOutcome::Failed(error)) => return Err(errors::analysis_failed(&error).into()),
        Some(SubmitOutcome::Rejected) | None => {
            let mut error = errors::nothing_to_analyze();
            if let Some(alert) = controller.page().alerts().last() {
                error = error.with_context(alert.clone());
            }
            return Err(error.into());
        }
    };

    let backend = controller.backend();
    let mut analysis = AnalysisOutput::new(&result, backend.endpoints(), controller.charts().current());

    if let Some(dir) = save {
        let path = save_processed_image(backend, &result.image_path, dir).await?;
        analysis.saved_to = Some(path.display().to_string());
    }

    Ok(analysis)
}

async fn save_processed_image(
    backend: &HttpAnalysisBackend,
    image_path: &str,
    dir: &Path,
) -> Result<PathBuf> {
    let bytes = backend
        .fetch_image(image_path)
        .await
        .context("Failed to download processed image")?;

    let file_name = Path::new(image_path)
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "processed_image.jpg".into());
    let path = dir.join(file_name);

    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    tokio::fs::write(&path, &bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), bytes = bytes.len(), "Saved processed image");
    Ok(path)
}

fn print_analysis(
    controller: &CliController,
    analysis: &AnalysisOutput,
    output: &OutputWriter,
) -> Result<()> {
    if output.is_json() {
        return output.result(analysis);
    }

    output.section("Analysis Results");
    output.kv("Trees Detected", analysis.tree_count);
    output.kv("Area Covered", &analysis.area);
    output.kv("Tree Density", &analysis.density);
    output.kv("Image Resolution", &analysis.resolution);
    if let Some(coordinates) = &analysis.coordinates {
        output.kv("Coordinates", coordinates);
    }

    if let Some(chart) = controller.charts().current() {
        output.section("Metrics");
        output.block(text_chart(chart));
    }

    let page = controller.page();
    if page.is_visible(ElementId::UploadedImage) {
        output.section("Processed Image");
        if let Some(src) = page.image_source(ElementId::UploadedImage) {
            output.kv("Preview", src);
        }
    }
    if page.is_visible(ElementId::DownloadProcessedImage) {
        if let Some(href) = page.link_target(ElementId::DownloadProcessedImage) {
            output.kv("Download", href);
        }
    }
    if let Some(saved) = &analysis.saved_to {
        output.success(format!("Saved processed image to {}", saved));
    }

    Ok(())
}
