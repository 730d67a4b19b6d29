use argh::FromArgs;
use std::path::PathBuf;

use densify::trajectory::convert::convert_tum_file;

#[derive(FromArgs)]
/// Convert a TUM trajectory into the Open3D log and pose graph formats
struct Args {
    /// path to the TUM trajectory file from the tracker
    #[argh(option)]
    input: PathBuf,

    /// output path for the Open3D trajectory log
    #[argh(option)]
    output_log: PathBuf,

    /// output path for the pose graph JSON
    #[argh(option)]
    output_json: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    log::info!("loading TUM trajectory: {}", args.input.display());
    let summary = convert_tum_file(&args.input, &args.output_log, &args.output_json)?;

    log::info!("converted {} poses", summary.pose_count);
    log::info!(
        "duration {:.2} s, average rate {:.2} poses/s, timestamps {:.6}..{:.6}",
        summary.stats.duration,
        summary.stats.avg_fps,
        summary.stats.first_timestamp,
        summary.stats.last_timestamp
    );
    log::info!("wrote trajectory log: {}", args.output_log.display());
    log::info!("wrote pose graph: {}", args.output_json.display());

    Ok(())
}
