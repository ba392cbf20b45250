//! Directory batch processing
//!
//! Segments every image in a directory and writes the repainted result next
//! to its input. For `data/plate1.jpg` the output is `data/plate1.out`;
//! files whose name already ends in `.out` are treated as earlier outputs
//! and skipped, so a directory can be processed repeatedly. Inputs that
//! share a name up to the first `.` (`a.png`, `a.jpg`) map to the same
//! output; only the first in sorted order is processed and the rest are
//! reported as skipped.
//!
//! Files are independent, so they are processed in parallel on the rayon
//! thread pool. Undecodable files are logged and reported as skipped; they
//! do not abort the batch.

use anyhow::{Context, bail};
use colorseg_core::{ImageFormat, Pix};
use colorseg_io::{read_image, write_image};
use colorseg_region::{SegmentOptions, segment};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Suffix of written output files
pub const OUTPUT_SUFFIX: &str = ".out";

/// Options for [`run_batch`]
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Directory scanned for input images
    pub dir: PathBuf,
    /// Segmentation settings applied to every image
    pub segment: SegmentOptions,
    /// Encoding of the output files
    pub output_format: ImageFormat,
    /// Worker threads; `None` uses the global rayon pool, `Some(1)` runs
    /// sequentially
    pub jobs: Option<usize>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
            segment: SegmentOptions::default(),
            output_format: ImageFormat::Jpeg,
            jobs: None,
        }
    }
}

impl BatchOptions {
    /// Create options for a directory with default settings
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Self::default()
        }
    }

    pub fn with_segment(mut self, segment: SegmentOptions) -> Self {
        self.segment = segment;
        self
    }

    pub fn with_output_format(mut self, format: ImageFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn with_jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }
}

/// Outcome for one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// The image was segmented and written to `output`
    Processed {
        output: PathBuf,
        accepted: usize,
        rejected: usize,
    },
    /// The file could not be processed
    Skipped { reason: String },
}

/// Report line for one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub input: PathBuf,
    pub outcome: FileOutcome,
}

/// Result of a batch run, one entry per input in sorted path order
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
}

impl BatchReport {
    /// Number of files written
    pub fn processed(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Processed { .. }))
            .count()
    }

    /// Number of files skipped
    pub fn skipped(&self) -> usize {
        self.files.len() - self.processed()
    }

    /// Accepted regions over all processed files
    pub fn total_accepted(&self) -> usize {
        self.files
            .iter()
            .map(|f| match f.outcome {
                FileOutcome::Processed { accepted, .. } => accepted,
                FileOutcome::Skipped { .. } => 0,
            })
            .sum()
    }
}

/// Output path for an input file
///
/// The file name is cut at its first `.` and [`OUTPUT_SUFFIX`] appended,
/// in the input's directory: `a/b.tar.png` becomes `a/b.out`.
pub fn output_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = name.split('.').next().unwrap_or_default();
    input.with_file_name(format!("{}{}", stem, OUTPUT_SUFFIX))
}

/// Whether a path names an earlier output
pub fn is_output_file(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|n| n.to_string_lossy().ends_with(OUTPUT_SUFFIX))
}

/// List the input files of a directory, sorted by path
///
/// Subdirectories and earlier outputs are skipped.
///
/// # Errors
///
/// Fails if the directory cannot be read.
pub fn collect_inputs(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to read directory {}", dir.display()))?;

    let mut inputs = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("failed to list directory {}", dir.display()))?
            .path();
        if !path.is_file() {
            continue;
        }
        if is_output_file(&path) {
            debug!(path = %path.display(), "skipping earlier output");
            continue;
        }
        inputs.push(path);
    }
    inputs.sort();
    Ok(inputs)
}

/// Segment one file and write its output
///
/// # Errors
///
/// Fails if the file cannot be decoded, segmented or written.
pub fn process_file(
    input: &Path,
    segment_options: &SegmentOptions,
    output_format: ImageFormat,
) -> anyhow::Result<FileOutcome> {
    let pix = read_image(input).with_context(|| format!("failed to decode {}", input.display()))?;
    let mut pix_mut = pix.try_into_mut().unwrap_or_else(|shared| shared.to_mut());

    let result = segment(&mut pix_mut, segment_options)
        .with_context(|| format!("failed to segment {}", input.display()))?;

    let output = output_path(input);
    let segmented: Pix = pix_mut.into();
    write_image(&segmented, &output, output_format)
        .with_context(|| format!("failed to write {}", output.display()))?;

    Ok(FileOutcome::Processed {
        output,
        accepted: result.accepted,
        rejected: result.rejected,
    })
}

/// Pair each input with the earlier input that already owns its output
/// path, if any
fn claim_outputs(inputs: &[PathBuf]) -> Vec<(&Path, Option<&Path>)> {
    let mut owners: HashMap<PathBuf, &Path> = HashMap::new();
    inputs
        .iter()
        .map(|input| {
            let owner = *owners.entry(output_path(input)).or_insert(input.as_path());
            (input.as_path(), (owner != input.as_path()).then_some(owner))
        })
        .collect()
}

fn report_file(input: &Path, owner: Option<&Path>, options: &BatchOptions) -> FileReport {
    if let Some(owner) = owner {
        let reason = format!(
            "output {} collides with {}",
            output_path(input).display(),
            owner.display()
        );
        warn!(input = %input.display(), %reason, "skipped");
        return FileReport {
            input: input.to_path_buf(),
            outcome: FileOutcome::Skipped { reason },
        };
    }

    let outcome = match process_file(input, &options.segment, options.output_format) {
        Ok(outcome) => {
            if let FileOutcome::Processed {
                output,
                accepted,
                rejected,
            } = &outcome
            {
                info!(
                    input = %input.display(),
                    output = %output.display(),
                    accepted,
                    rejected,
                    "processed"
                );
            }
            outcome
        }
        Err(e) => {
            let reason = format!("{:#}", e);
            warn!(input = %input.display(), %reason, "skipped");
            FileOutcome::Skipped { reason }
        }
    };
    FileReport {
        input: input.to_path_buf(),
        outcome,
    }
}

/// Process every input file of `options.dir`
///
/// # Errors
///
/// Fails if the segmentation options are invalid, the directory is missing
/// or unreadable, or the worker pool cannot be built. Per-file failures and
/// output collisions are reported in the [`BatchReport`] instead.
pub fn run_batch(options: &BatchOptions) -> anyhow::Result<BatchReport> {
    options.segment.validate()?;
    if !options.dir.is_dir() {
        bail!("input directory {} does not exist", options.dir.display());
    }

    let inputs = collect_inputs(&options.dir)?;
    info!(dir = %options.dir.display(), files = inputs.len(), "starting batch");
    let claims = claim_outputs(&inputs);

    let files: Vec<FileReport> = match options.jobs {
        Some(0) => bail!("jobs must be at least 1"),
        Some(1) => claims
            .iter()
            .map(|&(p, owner)| report_file(p, owner, options))
            .collect(),
        Some(n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .context("failed to build worker pool")?;
            pool.install(|| {
                claims
                    .par_iter()
                    .map(|&(p, owner)| report_file(p, owner, options))
                    .collect()
            })
        }
        None => claims
            .par_iter()
            .map(|&(p, owner)| report_file(p, owner, options))
            .collect(),
    };

    let report = BatchReport { files };
    info!(
        processed = report.processed(),
        skipped = report.skipped(),
        accepted = report.total_accepted(),
        "batch complete"
    );
    Ok(report)
}
