//! Renders the three-sphere demo scene and saves it as a PNG.
//!
//! Usage: cargo run --release --example demo -- [scene.json] [output.png]

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use trt_renderer::{render_with, RenderOptions, SceneConfig};

const DEMO_SCENE: &str = include_str!("../scenes/demo.json");

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let source = match args.next() {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scene {}", path))?,
        None => DEMO_SCENE.to_string(),
    };
    let output = args.next().unwrap_or_else(|| "output.png".to_string());

    let scene = SceneConfig::from_json(&source)?.build()?;

    let progress = ProgressBar::new(0).with_style(ProgressStyle::with_template(
        "{elapsed_precise} [{bar:40}] {pos}/{len} pixels ({eta})",
    )?);
    let options = RenderOptions {
        progress: Some(progress.clone()),
        ..Default::default()
    };

    let image = render_with(&scene, &options);
    progress.finish();

    image::save_buffer(
        &output,
        &image.to_rgb8_bytes(),
        image.width(),
        image.height(),
        image::ColorType::Rgb8,
    )
    .with_context(|| format!("Failed to save {}", output))?;

    log::info!("Saved to {}", output);
    Ok(())
}
