use anyhow::Result;
use clap::Args;
use seamline_core::io::image_io::image_size;

use super::parse_input_spec;

#[derive(Args)]
pub struct InfoArgs {
    /// Input images, each optionally positioned as PATH@X,Y
    #[arg(required = true)]
    pub inputs: Vec<String>,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let mut canvas_w = 0u64;
    let mut canvas_h = 0u64;

    for arg in &args.inputs {
        let spec = parse_input_spec(arg)?;
        let (w, h) = image_size(&spec.path)?;
        println!(
            "{}: {}x{} at ({}, {})",
            spec.path.display(),
            w,
            h,
            spec.x,
            spec.y
        );
        canvas_w = canvas_w.max(u64::from(spec.x) + u64::from(w));
        canvas_h = canvas_h.max(u64::from(spec.y) + u64::from(h));
    }

    println!("Canvas: {}x{}", canvas_w, canvas_h);
    Ok(())
}
