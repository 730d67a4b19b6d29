use argh::FromArgs;
use std::path::PathBuf;

use densify::dataset::{associations, frames::RgbdFrameList};

#[derive(FromArgs)]
/// Create a TUM-style association file from an extracted frames directory
struct Args {
    /// dataset directory containing color/ and depth/ folders
    #[argh(option)]
    dataset: PathBuf,

    /// output association file
    #[argh(option)]
    output: PathBuf,

    /// assumed capture rate for synthetic timestamps
    #[argh(option, default = "30.0")]
    fps: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let frames = RgbdFrameList::scan(&args.dataset)?;
    log::info!(
        "found {} color and {} depth frames in {}",
        frames.color.len(),
        frames.depth.len(),
        args.dataset.display()
    );

    associations::write_associations(&frames, &args.output, args.fps)?;
    log::info!(
        "wrote {} associations to {} ({:.2} s at {} fps)",
        frames.paired_len(),
        args.output.display(),
        frames.paired_len() as f64 / args.fps,
        args.fps
    );

    Ok(())
}
