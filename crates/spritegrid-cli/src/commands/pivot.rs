//! `spritegrid pivot` - center-of-mass pivot of a sheet or sub-region.

use std::path::Path;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use serde_json::json;
use spritegrid_core::{center_of_mass_pivot, Region, DEFAULT_ALPHA_THRESHOLD};

use crate::png_io;

pub fn run(input: &str, region: Option<&str>, json: bool) -> Result<()> {
    let (buffer, _) = png_io::load(Path::new(input))?;
    let region = match region {
        Some(spec) => parse_region(spec)?,
        None => buffer.full_region(),
    };

    let pivot = center_of_mass_pivot(&buffer, region, DEFAULT_ALPHA_THRESHOLD);

    if json {
        let value = json!({
            "input": input,
            "region": {
                "x": region.x,
                "y": region.y,
                "width": region.width,
                "height": region.height,
            },
            "pivot": { "x": pivot.0, "y": pivot.1 },
        });
        println!("{}", serde_json::to_string_pretty(&value).unwrap_or_default());
    } else {
        println!("{} ({:.4}, {:.4})", "pivot:".bold(), pivot.0, pivot.1);
    }
    Ok(())
}

/// Parse a region spec of the form "x,y,width,height".
fn parse_region(spec: &str) -> Result<Region> {
    let parts: Vec<&str> = spec.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        bail!("region must be \"x,y,width,height\", got {spec:?}");
    }
    let mut values = [0u32; 4];
    for (value, part) in values.iter_mut().zip(&parts) {
        *value = part
            .parse()
            .with_context(|| format!("invalid region component {part:?}"))?;
    }
    Ok(Region::new(values[0], values[1], values[2], values[3]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_region_specs() {
        let region = parse_region("4, 8, 16, 32").unwrap();
        assert_eq!(region, Region::new(4, 8, 16, 32));
    }

    #[test]
    fn rejects_malformed_specs() {
        assert!(parse_region("1,2,3").is_err());
        assert!(parse_region("a,b,c,d").is_err());
        assert!(parse_region("1,2,3,-4").is_err());
    }
}
