use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use npstructs_core::io::open_sequence_with;
use npstructs_core::progress::{LocateStage, ProgressReporter};
use npstructs_core::{find_starting_frame, locate_sequence_with, FailurePolicy, LocateConfig};
use tracing::info;

use crate::export::write_table_with;
use crate::summary::{print_locate_summary, print_report_summary};

#[derive(Args)]
pub struct LocateArgs {
    /// Input TIFF stack, image file, or directory of images
    pub input: PathBuf,

    /// Configuration file (TOML); command-line values override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Rolling-ball radius in pixels
    #[arg(long)]
    pub ball_size: Option<usize>,

    /// Gaussian smoothing sigma
    #[arg(long)]
    pub sigma: Option<f32>,

    /// Number of sequential smoothing passes
    #[arg(long)]
    pub passes: Option<usize>,

    /// Intensity scale factor applied before thresholding
    #[arg(long)]
    pub scale: Option<f32>,

    /// Binarization threshold (scaled units)
    #[arg(long)]
    pub threshold: Option<f32>,

    /// Edge dilation square side
    #[arg(long)]
    pub dilation: Option<usize>,

    /// Structure erosion square side
    #[arg(long)]
    pub erosion: Option<usize>,

    /// Minimum structure size in pixels
    #[arg(long)]
    pub min_size: Option<usize>,

    /// Worker threads (default: available processors)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Keep going when a frame fails and list the failures at the end
    #[arg(long)]
    pub skip_failed: bool,

    /// Only process frames from the shutter-open frame on; value is the
    /// peak intensity (raw counts) that marks an open shutter
    #[arg(long)]
    pub from_shutter: Option<f32>,

    /// Output table (.csv or .json)
    #[arg(short, long, default_value = "structures.csv")]
    pub output: PathBuf,
}

pub fn run(args: &LocateArgs) -> Result<()> {
    let config = build_config(args)?;
    config.validate().context("Invalid configuration")?;

    print_locate_summary(&args.input, &args.output, &config);

    let reporter = BarReporter::new()?;
    let sequence = open_sequence_with(&args.input, &reporter)
        .with_context(|| format!("Failed to read frames from {}", args.input.display()))?;

    let start = match (args.from_shutter, sequence.frames.first()) {
        (Some(counts), Some(first)) => {
            let threshold = first.normalize_counts(counts);
            match find_starting_frame(&sequence.frames, threshold) {
                Some(index) => index,
                None => bail!("No shutter-open frame found at {} counts", counts),
            }
        }
        _ => 0,
    };

    let frames = &sequence.frames[start..];
    info!(start_frame = start, frames = frames.len(), "Frames selected");
    let mut report = locate_sequence_with(frames, &config.params, &config.batch, &reporter)?;
    report.table.offset_frames(start);

    write_table_with(&report.table, &args.output, &reporter)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    reporter.bar.finish();

    print_report_summary(&report, start, &args.output);
    Ok(())
}

fn build_config(args: &LocateArgs) -> Result<LocateConfig> {
    let mut config: LocateConfig = if let Some(ref path) = args.config {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&contents).context("Invalid locate config")?
    } else {
        LocateConfig::default()
    };

    let pre = &mut config.params.preprocess;
    if let Some(v) = args.ball_size {
        pre.ball_size = v;
    }
    if let Some(v) = args.sigma {
        pre.sigma = v;
    }
    if let Some(v) = args.passes {
        pre.smoothing_passes = v;
    }
    if let Some(v) = args.scale {
        pre.scale_factor = v;
    }
    if let Some(v) = args.threshold {
        pre.threshold = v;
    }

    let seg = &mut config.params.segment;
    if let Some(v) = args.dilation {
        seg.dilation_size = v;
    }
    if let Some(v) = args.erosion {
        seg.erosion_size = v;
    }
    if let Some(v) = args.min_size {
        seg.min_structure_size = v;
    }

    if args.workers.is_some() {
        config.batch.workers = args.workers;
    }
    if args.skip_failed {
        config.batch.on_failure = FailurePolicy::SkipAndReport;
    }

    Ok(config)
}

/// Drives an indicatif bar from batch progress events.
struct BarReporter {
    bar: ProgressBar,
}

impl BarReporter {
    fn new() -> Result<Self> {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg:20} [{bar:40}] {pos}/{len}")?
                .progress_chars("=> "),
        );
        Ok(Self { bar })
    }
}

impl ProgressReporter for BarReporter {
    fn begin_stage(&self, stage: LocateStage, total_items: Option<usize>) {
        self.bar.reset();
        match total_items {
            Some(n) => self.bar.set_length(n as u64),
            None => self.bar.unset_length(),
        }
        self.bar.set_message(stage.to_string());
    }

    fn advance(&self, items_done: usize) {
        self.bar.set_position(items_done as u64);
    }

    fn finish_stage(&self) {
        self.bar.set_message(format!("{} done", self.bar.message()));
        self.bar.tick();
    }
}
