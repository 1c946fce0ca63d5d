pub mod blend;
pub mod info;

use anyhow::{bail, Result};
use seamline_core::pipeline::InputSpec;

/// Parse an input argument of the form `PATH` or `PATH@X,Y`, where
/// `(X, Y)` is the canvas position of the image's upper-left pixel.
pub fn parse_input_spec(arg: &str) -> Result<InputSpec> {
    match arg.rsplit_once('@') {
        None => Ok(InputSpec::new(arg, 0, 0)),
        Some((path, pos)) => {
            let Some((x, y)) = pos.split_once(',') else {
                bail!("invalid input position in '{arg}' (expected PATH@X,Y)");
            };
            let (Ok(x), Ok(y)) = (x.trim().parse(), y.trim().parse()) else {
                bail!("invalid input position in '{arg}' (expected PATH@X,Y)");
            };
            Ok(InputSpec::new(path, x, y))
        }
    }
}
