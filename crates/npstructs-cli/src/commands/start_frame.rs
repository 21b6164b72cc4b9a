use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use npstructs_core::consts::DEFAULT_SHUTTER_THRESHOLD_ADU;
use npstructs_core::find_starting_frame;
use npstructs_core::io::open_sequence;

#[derive(Args)]
pub struct StartFrameArgs {
    /// Input TIFF stack, image file, or directory of images
    pub input: PathBuf,

    /// Peak intensity (raw counts) that marks an open shutter
    #[arg(long, default_value_t = DEFAULT_SHUTTER_THRESHOLD_ADU)]
    pub threshold: f32,
}

pub fn run(args: &StartFrameArgs) -> Result<()> {
    let sequence = open_sequence(&args.input)?;
    let Some(first) = sequence.frames.first() else {
        println!("No frames in {}", args.input.display());
        return Ok(());
    };
    let threshold = first.normalize_counts(args.threshold);

    match find_starting_frame(&sequence.frames, threshold) {
        Some(index) => println!("Shutter opens at frame {}", index),
        None => println!(
            "No dark-to-bright transition above {} counts found",
            args.threshold
        ),
    }

    Ok(())
}
