// colorseg command line interface
// Segments every image of a directory and writes <name>.out next to it

use anyhow::Context;
use clap::{Parser, ValueEnum};
use colorseg::batch::{BatchOptions, FileOutcome, run_batch};
use colorseg::region::{Preset, SegmentOptions};
use colorseg::{ImageFormat, Rgb};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Jpeg,
    Png,
}

impl From<OutputFormat> for ImageFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Jpeg => ImageFormat::Jpeg,
            OutputFormat::Png => ImageFormat::Png,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "colorseg")]
#[command(about = "Find objects on a known background color and highlight them", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory of input images
    #[arg(default_value = "data")]
    dir: PathBuf,

    /// Configuration profile (light-background, gray-background)
    #[arg(long, default_value_t = Preset::GrayBackground)]
    preset: Preset,

    /// Background reference color (#RRGGBB)
    #[arg(long)]
    background: Option<Rgb>,

    /// Background similarity threshold
    #[arg(long)]
    threshold: Option<f64>,

    /// Regions with at most this many pixels are rejected
    #[arg(long)]
    min_size: Option<u32>,

    /// Regions with at least this many pixels are rejected
    #[arg(long)]
    max_size: Option<u32>,

    /// Paint color for accepted regions (#RRGGBB)
    #[arg(long)]
    highlight: Option<Rgb>,

    /// Paint color for background and rejected regions (#RRGGBB)
    #[arg(long)]
    fill: Option<Rgb>,

    /// Output encoding
    #[arg(long, value_enum, default_value_t = OutputFormat::Jpeg)]
    format: OutputFormat,

    /// Worker threads (default: one per core)
    #[arg(long, short)]
    jobs: Option<usize>,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,
}

impl Cli {
    /// Preset values with command-line overrides applied
    fn segment_options(&self) -> SegmentOptions {
        let mut options = SegmentOptions::from_preset(self.preset);
        if let Some(background) = self.background {
            options = options.with_background(background);
        }
        if let Some(threshold) = self.threshold {
            options = options.with_threshold(threshold);
        }
        if let Some(min) = self.min_size {
            options = options.with_min_region_size(min);
        }
        if let Some(max) = self.max_size {
            options = options.with_max_region_size(max);
        }
        if let Some(highlight) = self.highlight {
            options = options.with_highlight(highlight);
        }
        if let Some(fill) = self.fill {
            options = options.with_fill(fill);
        }
        options
    }

    fn batch_options(&self) -> BatchOptions {
        BatchOptions::new(self.dir.clone())
            .with_segment(self.segment_options())
            .with_output_format(self.format.into())
            .with_jobs(self.jobs)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let options = cli.batch_options();
    info!(preset = %cli.preset, dir = %options.dir.display(), "colorseg");

    let report = run_batch(&options).context("batch failed")?;
    for file in &report.files {
        match &file.outcome {
            FileOutcome::Processed {
                output,
                accepted,
                rejected,
            } => println!(
                "{} -> {}: {} accepted, {} rejected",
                file.input.display(),
                output.display(),
                accepted,
                rejected
            ),
            FileOutcome::Skipped { reason } => {
                println!("{}: skipped ({})", file.input.display(), reason)
            }
        }
    }
    println!(
        "{} processed, {} skipped",
        report.processed(),
        report.skipped()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["colorseg"]).unwrap();
        let options = cli.batch_options();
        assert_eq!(options.dir, PathBuf::from("data"));
        assert_eq!(options.segment, SegmentOptions::gray_background());
        assert_eq!(options.output_format, ImageFormat::Jpeg);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "colorseg",
            "images",
            "--preset",
            "light-background",
            "--threshold",
            "42.5",
            "--max-size",
            "90",
            "--highlight",
            "#00ff00",
            "--format",
            "png",
            "-j",
            "2",
        ])
        .unwrap();
        let options = cli.batch_options();
        assert_eq!(options.dir, PathBuf::from("images"));
        assert_eq!(options.segment.background, Rgb::new(0xD7, 0xD4, 0xC3));
        assert_eq!(options.segment.threshold, 42.5);
        assert_eq!(options.segment.min_region_size, 10);
        assert_eq!(options.segment.max_region_size, 90);
        assert_eq!(options.segment.highlight, Rgb::new(0, 255, 0));
        assert_eq!(options.output_format, ImageFormat::Png);
        assert_eq!(options.jobs, Some(2));
    }

    #[test]
    fn test_bad_color_rejected() {
        assert!(Cli::try_parse_from(["colorseg", "--fill", "purple"]).is_err());
        assert!(Cli::try_parse_from(["colorseg", "--preset", "dark"]).is_err());
    }
}
