//! `spritegrid crop` - alpha-boundary cropping with pivot remapping.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use serde_json::json;
use spritegrid_core::{crop, crop_if_needed, Padding, PixelBuffer};

use crate::png_io;

#[allow(clippy::too_many_arguments)]
pub fn run(
    input: &str,
    output: &str,
    padding: u32,
    padding_left: Option<u32>,
    padding_right: Option<u32>,
    padding_top: Option<u32>,
    padding_bottom: Option<u32>,
    pivot: (f32, f32),
    only_if_needed: bool,
    json: bool,
) -> Result<()> {
    let (buffer, _) = png_io::load(Path::new(input))?;
    let padding = Padding {
        left: padding_left.unwrap_or(padding),
        right: padding_right.unwrap_or(padding),
        top: padding_top.unwrap_or(padding),
        bottom: padding_bottom.unwrap_or(padding),
    };

    if only_if_needed {
        match crop_if_needed(&buffer, padding, pivot) {
            Some(result) => {
                png_io::save(&result.buffer, Path::new(output))?;
                print_result(output, &result.buffer, result.pivot, false, json);
            }
            None => print_result(input, &buffer, pivot, true, json),
        }
    } else {
        let result = crop(&buffer, padding, pivot);
        png_io::save(&result.buffer, Path::new(output))?;
        print_result(output, &result.buffer, result.pivot, false, json);
    }
    Ok(())
}

fn print_result(path: &str, buffer: &PixelBuffer, pivot: (f32, f32), unchanged: bool, json: bool) {
    if json {
        let value = json!({
            "output": path,
            "unchanged": unchanged,
            "width": buffer.width(),
            "height": buffer.height(),
            "pivot": { "x": pivot.0, "y": pivot.1 },
        });
        println!("{}", serde_json::to_string_pretty(&value).unwrap_or_default());
        return;
    }

    if unchanged {
        println!("{} already tightly cropped, nothing written", "skip:".yellow().bold());
    } else {
        println!(
            "{} {} ({}x{})",
            "wrote:".green().bold(),
            path,
            buffer.width(),
            buffer.height()
        );
    }
    println!("{} ({:.4}, {:.4})", "pivot:".bold(), pivot.0, pivot.1);
}
