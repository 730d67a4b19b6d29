use argh::FromArgs;
use std::path::PathBuf;

use densify::pipeline::{
    stages::{run_pipeline, Stage},
    PipelineConfig,
};

#[derive(FromArgs)]
/// Run the full reconstruction pipeline from a YAML configuration
struct Args {
    /// path to the pipeline YAML configuration
    #[argh(option)]
    config: PathBuf,

    /// first stage to run (1=associations, 2=tracking, 3=convert, 4=reconstruct)
    #[argh(option, default = "1")]
    start_step: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let start = Stage::from_step(args.start_step)
        .ok_or_else(|| format!("invalid start step: {}", args.start_step))?;

    log::info!("loading configuration: {}", args.config.display());
    let config = PipelineConfig::from_yaml_file(&args.config)?;
    log::info!(
        "frames: {}, output: {}, starting at stage '{}'",
        config.dataset.frames_dir.display(),
        config.output.base_dir.display(),
        start.name()
    );

    run_pipeline(&config, start)?;
    Ok(())
}
