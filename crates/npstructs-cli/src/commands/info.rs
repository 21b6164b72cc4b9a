use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use npstructs_core::io::open_sequence;

#[derive(Args)]
pub struct InfoArgs {
    /// Input TIFF stack, image file, or directory of images
    pub input: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let sequence = open_sequence(&args.input)?;
    let info = &sequence.info;

    println!("Source:      {}", info.filename.display());
    println!("Frames:      {}", info.total_frames);
    println!("Dimensions:  {}x{}", info.width, info.height);
    println!("Bit depth:   {}", info.bit_depth);

    let peak = sequence
        .frames
        .iter()
        .map(|f| f.max_intensity())
        .fold(0.0f32, f32::max);
    println!("Peak level:  {:.4} (normalized)", peak);

    Ok(())
}
