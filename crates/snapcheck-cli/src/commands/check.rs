//! Check command - assess images for validity.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use snapcheck_adapters::{models_dir, resolve_sources, FsImageSource, SourceFetcher};
use snapcheck_core::inference::get_device;
use snapcheck_core::modules::decoder;
use snapcheck_core::{
    AssessmentError, AssessmentRecord, ErrorRecord, ImageDimensions, ImageSource, ModelKind,
    ModelLocation, ModelRegistry, ModelSource, ProgressEvent, ProgressSink, ResultOutput,
    ValidityPipeline, ValidityPolicy,
};
use tracing::{debug, info, warn};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{JsonOutput, OutputFormat, ProgressBar};

/// Where to load each scoring model from.
#[derive(Args, Clone, Default)]
pub struct ModelSourceArgs {
    /// Rotation model location (http(s) URL or file path)
    #[arg(long, value_name = "URL|PATH")]
    pub rotation_model: Option<String>,

    /// Crop model location (http(s) URL or file path)
    #[arg(long, value_name = "URL|PATH")]
    pub crop_model: Option<String>,

    /// Expected digests, taken from config together with the location.
    #[arg(skip)]
    rotation_sha256: Option<String>,
    #[arg(skip)]
    crop_sha256: Option<String>,
}

impl ModelSourceArgs {
    /// Fill unset locations from config.
    ///
    /// A configured checksum only applies when its location also comes
    /// from config; a CLI location replaces both.
    #[must_use]
    pub fn with_config(mut self, config: &AppConfig) -> Self {
        if self.rotation_model.is_none() {
            self.rotation_model.clone_from(&config.models.rotation);
            self.rotation_sha256.clone_from(&config.models.rotation_sha256);
        }
        if self.crop_model.is_none() {
            self.crop_model.clone_from(&config.models.crop);
            self.crop_sha256.clone_from(&config.models.crop_sha256);
        }
        self
    }

    /// The explicitly configured source for `kind`, if any.
    #[must_use]
    pub fn source(&self, kind: ModelKind) -> Option<ModelSource> {
        let (location, sha256) = match kind {
            ModelKind::Rotation => (&self.rotation_model, &self.rotation_sha256),
            ModelKind::Crop => (&self.crop_model, &self.crop_sha256),
        };
        let location = location.as_deref()?;
        let source = match location.parse::<ModelLocation>() {
            Ok(parsed) => ModelSource::new(parsed),
            Err(never) => match never {},
        };
        Some(match sha256 {
            Some(digest) => source.with_sha256(digest.as_str()),
            None => source,
        })
    }
}

/// Shared arguments for image assessment.
#[derive(Args, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct CheckArgs {
    /// Files or directories to assess
    pub paths: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    #[command(flatten)]
    pub models: ModelSourceArgs,

    /// Custom models directory (overrides default and config)
    #[arg(long, value_name = "DIR")]
    pub models_dir: Option<PathBuf>,

    /// Report blur but do not let it affect the verdict
    #[arg(long)]
    pub ignore_blur: bool,

    /// Run inference on the CPU even if a GPU is available
    #[arg(long)]
    pub cpu: bool,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,
}

impl CheckArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    #[must_use]
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        if !args.recursive {
            args.recursive = config.general.recursive.unwrap_or(false);
        }

        args.models = args.models.with_config(config);
        if args.models_dir.is_none() {
            args.models_dir.clone_from(&config.models.dir);
        }

        // --ignore-blur always wins; config can only turn blur off
        if !args.ignore_blur {
            args.ignore_blur = config.policy.blur_affects_validity == Some(false);
        }

        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_ref()
                .and_then(|s| match s.as_str() {
                    "json" => Some(OutputFormat::Json),
                    "jsonl" => Some(OutputFormat::Jsonl),
                    _ => None,
                });
        }
        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        args
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    fn policy(&self) -> ValidityPolicy {
        ValidityPolicy {
            blur_affects_validity: !self.ignore_blur,
        }
    }
}

/// Result of running the check command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckResult {
    /// Number of images that produced a record.
    pub processed: usize,
    /// Number of images that could not be read.
    pub skipped: usize,
    /// Number of images that were not valid (including failures).
    pub rejected: usize,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the check command.
///
/// Expects `args` to have been processed through `with_config()` first.
/// Both models are loaded before any image is read; a load failure is
/// returned as an error.
pub fn run(args: &CheckArgs) -> Result<CheckResult> {
    info!("Running check command on {} paths", args.paths.len());

    if args.paths.is_empty() {
        anyhow::bail!("No paths specified");
    }

    let dir = models_dir(args.models_dir.as_deref());
    debug!("Models directory: {}", dir.display());
    let sources = resolve_sources(
        &dir,
        args.models.source(ModelKind::Rotation),
        args.models.source(ModelKind::Crop),
    );

    let fetcher = SourceFetcher::new()?;
    let device = get_device(args.cpu);
    let registry = ModelRegistry::load(&sources, &fetcher, &device).with_context(|| {
        format!(
            "Failed to load scoring models (configure --rotation-model/--crop-model \
             or run `snapcheck models fetch` into {})",
            dir.display()
        )
    })?;

    let pipeline = ValidityPipeline::new(&registry).with_policy(args.policy());

    let source = FsImageSource::new(args.paths.clone(), args.recursive);
    let total = source.count_hint();

    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let progress = ProgressBar::new(total.map(|t| t as u64), args.quiet, show_progress)
        .with_policy(args.policy());

    let output = JsonOutput::stdout(args.format(), args.pretty);

    process_images(&source, pipeline, &output, &progress)
}

/// Assess every image from `source` and write one record per image.
pub fn process_images(
    source: &dyn ImageSource,
    pipeline: ValidityPipeline<'_>,
    output: &dyn ResultOutput,
    progress: &dyn ProgressSink,
) -> Result<CheckResult> {
    let total = source.count_hint();
    let mut processed = 0usize;
    let mut skipped = 0usize;
    let mut rejected = 0usize;

    for (index, item) in source.images().enumerate() {
        let record = match item {
            Ok(image) => {
                progress.on_event(ProgressEvent::Started {
                    path: image.path.clone(),
                    index,
                    total,
                });
                let record = assess(pipeline, &image.path, &image.bytes);
                processed += 1;
                record
            }
            Err(e) => {
                progress.on_event(ProgressEvent::Skipped {
                    path: e.path.clone(),
                    reason: e.reason.clone(),
                });
                skipped += 1;
                AssessmentRecord::failed(e.path.clone(), iso_timestamp(), None, ErrorRecord::from(&e))
            }
        };

        if !record.is_valid() {
            rejected += 1;
        }

        output.write(&record)?;
        progress.on_event(ProgressEvent::Completed { record });
    }

    output.flush()?;

    progress.on_event(ProgressEvent::Finished { processed, skipped });

    let exit_code = if rejected > 0 {
        ExitCode::Invalid
    } else {
        ExitCode::Success
    };

    Ok(CheckResult {
        processed,
        skipped,
        rejected,
        exit_code,
    })
}

/// Runs one assessment and wraps the outcome in a record.
fn assess(pipeline: ValidityPipeline<'_>, path: &str, bytes: &[u8]) -> AssessmentRecord {
    let raster = match decoder::decode(bytes) {
        Ok(raster) => raster,
        Err(e) => {
            let e = AssessmentError::from(e);
            warn!("{path}: {e}");
            return AssessmentRecord::failed(path, iso_timestamp(), None, ErrorRecord::from(&e));
        }
    };
    let dimensions = ImageDimensions::new(raster.width(), raster.height());

    match pipeline.assess_raster(&raster) {
        Ok(report) => {
            debug!("{path}: valid={}", report.valid);
            AssessmentRecord::assessed(path, iso_timestamp(), dimensions, report)
        }
        Err(e) => {
            warn!("{path}: {e}");
            AssessmentRecord::failed(path, iso_timestamp(), Some(dimensions), ErrorRecord::from(&e))
        }
    }
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}
