use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use seamline_core::pipeline::{run_blend_reported, BlendConfig};

use super::parse_input_spec;
use crate::progress::ConsoleReporter;
use crate::summary::print_blend_summary;

#[derive(Args)]
pub struct BlendArgs {
    /// Input images in blend order, each optionally positioned as PATH@X,Y
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// Output file path
    #[arg(short, long, default_value = "blended.png")]
    pub output: PathBuf,

    /// Blend images strictly one at a time (disable the non-overlapping
    /// pre-assembly heuristic)
    #[arg(long)]
    pub one_at_a_time: bool,

    /// Cap the pyramid depth
    #[arg(short = 'l', long)]
    pub levels: Option<u32>,

    /// JPEG output quality (1-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: Option<u8>,

    /// Write blended pyramid levels as PREFIX-<iteration>-l<level>.png
    #[arg(long)]
    pub dump_pyramids: Option<PathBuf>,
}

pub fn run(args: &BlendArgs) -> Result<()> {
    let inputs = args
        .inputs
        .iter()
        .map(|arg| parse_input_spec(arg))
        .collect::<Result<Vec<_>>>()?;

    let config = BlendConfig {
        inputs,
        output: args.output.clone(),
        one_at_a_time: args.one_at_a_time,
        max_levels: args.levels,
        jpeg_quality: args.quality,
        dump_pyramids: args.dump_pyramids.clone(),
    };

    print_blend_summary(&config);

    let reporter = Arc::new(ConsoleReporter::new());
    run_blend_reported(&config, reporter)?;

    println!("Saved to {}", args.output.display());
    Ok(())
}
