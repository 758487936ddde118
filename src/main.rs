//! `glyph` — normalize or classify a single glyph image from the command line.
//!
//!   cargo run --bin glyph -- normalize drawing.png --out canonical.png
//!   cargo run --bin glyph -- classify drawing.png --model model.json

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use glyph_recognizer::canon::canonical_image;
use glyph_recognizer::{GlyphError, MlpClassifier, NormConfig, Profile, RasterImage, Recognizer};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the canonical (cropped, padded, resized, inverted) image as a PNG
    Normalize {
        /// Input image (PNG, JPEG, BMP or GIF)
        image: PathBuf,
        /// Output PNG path
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
        #[command(flatten)]
        norm: NormArgs,
    },
    /// Print the predicted character and ranked alternatives
    Classify {
        /// Input image (PNG, JPEG, BMP or GIF)
        image: PathBuf,
        /// Model JSON file
        #[arg(long, value_name = "FILE", env = "GLYPH_MODEL")]
        model: PathBuf,
        /// Number of alternatives to print
        #[arg(long, default_value = "3")]
        top: usize,
        #[command(flatten)]
        norm: NormArgs,
    },
}

#[derive(Args, Debug)]
struct NormArgs {
    /// Normalization config JSON; overrides --profile
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Built-in normalization profile
    #[arg(long, value_enum, default_value = "upload")]
    profile: Profile,
}

impl NormArgs {
    fn resolve(&self) -> Result<NormConfig, GlyphError> {
        match &self.config {
            Some(path) => NormConfig::from_json_file(path),
            None => Ok(self.profile.config()),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<GlyphError>() {
                Some(glyph) => {
                    error!(error = %glyph, "failed");
                    eprintln!("{}", glyph.user_message());
                }
                None => eprintln!("error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Normalize { image, out, norm } => {
            let config = norm.resolve()?;
            let raster = RasterImage::open(&image)?;
            let canonical = canonical_image(&raster, &config)?;
            canonical
                .save(&out)
                .with_context(|| format!("writing {}", out.display()))?;
            println!("{} -> {} ({})", image.display(), out.display(), config.target_size);
            Ok(())
        }
        Command::Classify { image, model, top, norm } => {
            let config = norm.resolve()?;
            let recognizer = build_recognizer(&model, config)?;
            let raster = RasterImage::open(&image)?;
            let result = recognizer.recognize(&raster)?;
            let best = result.best();
            println!("Prediction: {} (confidence: {:.2}%)", best.label, best.confidence * 100.0);
            for (rank, p) in result.top_k(top).iter().enumerate() {
                println!("  {}. {}  {:.4}", rank + 1, p.label, p.confidence);
            }
            Ok(())
        }
    }
}

fn build_recognizer(model: &Path, config: NormConfig) -> anyhow::Result<Recognizer> {
    let classifier = MlpClassifier::load_json(model)?;
    Ok(Recognizer::new(Arc::new(classifier), config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    fn upload_args() -> NormArgs {
        NormArgs { config: None, profile: Profile::Upload }
    }

    #[test]
    fn normalize_writes_canonical_preview_png() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("drawing.png");
        let out = dir.path().join("canonical.png");

        let mut img = GrayImage::from_pixel(120, 90, Luma([255]));
        for y in 10..80 {
            for x in 30..45 {
                img.put_pixel(x, y, Luma([0]));
            }
        }
        img.save(&input).unwrap();

        run(Command::Normalize { image: input, out: out.clone(), norm: upload_args() }).unwrap();

        let preview = image::open(&out).unwrap().to_luma8();
        assert_eq!(preview.dimensions(), (64, 64));
        // Upload profile inverts: ink comes out light on a dark frame.
        assert!(preview.get_pixel(32, 32).0[0] > 200);
        assert!(preview.get_pixel(0, 0).0[0] < 10);
    }

    #[test]
    fn normalize_of_blank_drawing_reports_empty_content() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("blank.png");
        let out = dir.path().join("never.png");
        GrayImage::from_pixel(40, 40, Luma([255])).save(&input).unwrap();

        let err = run(Command::Normalize { image: input, out: out.clone(), norm: upload_args() }).unwrap_err();
        assert!(matches!(err.downcast_ref::<GlyphError>(), Some(GlyphError::EmptyContent)));
        assert!(!out.exists());
    }

    #[test]
    fn config_file_overrides_profile() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("norm.json");
        std::fs::write(&config, r#"{"margin_ratio": 0.3, "invert_intensity": false}"#).unwrap();

        let args = NormArgs { config: Some(config), profile: Profile::LegacyCanvas };
        let cfg = args.resolve().unwrap();
        assert_eq!(cfg.margin_ratio, 0.3);
        assert!(!cfg.invert_intensity);
        assert_eq!(cfg.scale, NormConfig::upload().scale);
    }

    #[test]
    fn cli_parses_both_subcommands() {
        let cli = Cli::try_parse_from(["glyph", "normalize", "a.png", "--out", "b.png"]).unwrap();
        assert!(matches!(cli.command, Command::Normalize { .. }));

        let cli = Cli::try_parse_from([
            "glyph", "classify", "a.png", "--model", "m.json", "--top", "5", "--profile", "legacy-canvas",
        ])
        .unwrap();
        match cli.command {
            Command::Classify { top, norm, .. } => {
                assert_eq!(top, 5);
                assert_eq!(norm.profile, Profile::LegacyCanvas);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
