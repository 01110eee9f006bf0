//! imgcrypt-report - compare a plain image with its encrypted version.
//!
//! Prints per-channel (Y, Cr, Cb) correlation, histogram, entropy and
//! fidelity statistics.

use std::fmt::{self, Display, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{prelude::*, EnvFilter};

use imgcrypt_metrics::analysis::correlation::Direction;
use imgcrypt_metrics::config::{DEFAULT_MAX_PIXEL_VALUE, DEFAULT_WINDOW_SIZE};
use imgcrypt_metrics::io::load_rgb;
use imgcrypt_metrics::report::{compare_images, ChannelReport};
use imgcrypt_metrics::{AnalysisConfig, Result};

#[derive(Debug, Parser)]
#[command(name = "imgcrypt-report", version, about = "Encryption quality statistics for an image pair")]
struct Cli {
    /// Plain (unencrypted) image
    original: PathBuf,

    /// Encrypted image
    encrypted: PathBuf,

    /// Tile side length for local entropy
    #[arg(long, default_value_t = DEFAULT_WINDOW_SIZE)]
    window: usize,

    /// Peak sample value used for PSNR
    #[arg(long, default_value_t = DEFAULT_MAX_PIXEL_VALUE)]
    max_pixel: f64,

    /// Compute everything on the calling thread
    #[arg(long)]
    sequential: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn show<T, F>(result: &Result<T>, render: F) -> String
where
    F: FnOnce(&T) -> String,
{
    match result {
        Ok(value) => render(value),
        Err(err) => format!("undefined ({err})"),
    }
}

fn fixed<T: Display>(value: &T, precision: usize) -> String {
    format!("{value:.precision$}")
}

fn render_channel(report: &ChannelReport) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_channel(&mut out, report);
    out
}

fn write_channel(out: &mut String, report: &ChannelReport) -> fmt::Result {
    writeln!(out, "\n{}:", report.channel.label())?;

    if let Some(corr) = &report.inter_correlation {
        writeln!(out, "  Correlation with original:  {}", show(corr, |r| fixed(r, 4)))?;
    }

    for direction in Direction::ALL {
        let value = show(report.adjacency.get(direction), |r| fixed(r, 4));
        writeln!(out, "  {:<10} correlation:     {}", direction.label(), value)?;
    }

    match &report.uniformity {
        Ok(stats) => {
            writeln!(out, "  Chi-square:                 {:.2}", stats.chi_square)?;
            writeln!(out, "  Max deviation:              {:.2}", stats.max_deviation)?;
            writeln!(out, "  Irregular deviation:        {:.2}", stats.irregular_deviation)?;
            writeln!(out, "  Deviation from uniform:     {:.4}", stats.normalized_deviation)?;
            writeln!(
                out,
                "  Chi-square test (5%):       {}",
                if stats.passes_chi_square() { "pass" } else { "fail" }
            )?;
        }
        Err(err) => writeln!(out, "  Histogram statistics:       undefined ({err})")?,
    }

    writeln!(out, "  Global entropy:             {}", show(&report.global_entropy, |h| fixed(h, 4)))?;
    writeln!(
        out,
        "  Mean local entropy:         {}",
        show(&report.local_entropy, |local| fixed(&local.mean, 4))
    )?;

    if let Some(fidelity) = &report.fidelity {
        writeln!(out, "  MSE:                        {}", show(fidelity, |m| fixed(&m.mse, 2)))?;
        writeln!(out, "  MAE:                        {}", show(fidelity, |m| fixed(&m.mae, 2)))?;
        writeln!(
            out,
            "  PSNR:                       {}",
            show(fidelity, |m| format!("{:.2} dB", m.psnr))
        )?;
    }
    Ok(())
}

/// Load both images, print every channel and report whether all metrics were defined.
fn run(cli: &Cli) -> Result<bool> {
    let config = AnalysisConfig {
        window_size: cli.window,
        max_pixel_value: cli.max_pixel,
        parallel: !cli.sequential,
    };

    let original = load_rgb(&cli.original)?;
    let encrypted = load_rgb(&cli.encrypted)?;
    let report = compare_images(original.view(), encrypted.view(), &config)?;

    for channel in &report.channels {
        print!("{}", render_channel(channel));
    }
    Ok(!report.has_failures())
}

/// 0 when every metric was defined, 2 when results were printed but some
/// metric was undefined, 1 when the images could not be loaded or converted.
fn exit_code(outcome: &Result<bool>) -> u8 {
    match outcome {
        Ok(true) => 0,
        Ok(false) => 2,
        Err(_) => 1,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let outcome = run(&cli);
    if let Err(e) = &outcome {
        eprintln!("error: {e}");
    }
    ExitCode::from(exit_code(&outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use imgcrypt_metrics::analysis::ChannelKind;
    use imgcrypt_metrics::report::{analyze_channel, compare_channels};
    use ndarray::Array2;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("imgcrypt_cli_{}_{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn noise_png(path: &Path, seed: u32) {
        let mut state = seed;
        let img = image::RgbImage::from_fn(32, 32, |_, _| {
            let mut next = || {
                state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                (state >> 16) as u8
            };
            image::Rgb([next(), next(), next()])
        });
        img.save(path).unwrap();
    }

    fn cli_for(original: PathBuf, encrypted: PathBuf) -> Cli {
        Cli {
            original,
            encrypted,
            window: DEFAULT_WINDOW_SIZE,
            max_pixel: DEFAULT_MAX_PIXEL_VALUE,
            sequential: true,
            verbose: 0,
        }
    }

    #[test]
    fn test_cli_parses_defaults() {
        let cli = Cli::try_parse_from(["imgcrypt-report", "a.png", "b.png"]).unwrap();
        assert_eq!(cli.window, DEFAULT_WINDOW_SIZE);
        assert_eq!(cli.max_pixel, DEFAULT_MAX_PIXEL_VALUE);
        assert!(!cli.sequential);
    }

    #[test]
    fn test_render_undefined_metrics() {
        let ch = Array2::from_elem((16, 16), 100u8);
        let report = analyze_channel(ch.view(), ChannelKind::Luma, &AnalysisConfig::default());
        let text = render_channel(&report);

        assert!(text.contains("Y (Luminance):"));
        assert!(text.contains("Horizontal correlation:     undefined ("), "{}", text);
        assert!(text.contains("Diagonal   correlation:     undefined ("), "{}", text);
        assert!(text.contains("Global entropy:             0.0000"));
        assert!(!text.contains("MSE:"));
    }

    #[test]
    fn test_render_pair_metrics() {
        let ch = Array2::from_shape_fn((16, 16), |(y, x)| (y * 16 + x) as u8);
        let config = AnalysisConfig::default();
        let report = compare_channels(ch.view(), ch.view(), ChannelKind::ChromaRed, &config);
        let text = render_channel(&report);

        assert!(text.contains("Cr (Chroma Red):"));
        assert!(text.contains("Correlation with original:  1.0000"), "{}", text);
        assert!(text.contains("MSE:                        0.00"));
        assert!(text.contains("PSNR:                       inf dB"), "{}", text);
        assert!(!text.contains("undefined"), "{}", text);
    }

    #[test]
    fn test_exit_code_all_defined() {
        let dir = scratch_dir("defined");
        let file = dir.join("noise.png");
        noise_png(&file, 7);

        let outcome = run(&cli_for(file.clone(), file));
        assert!(matches!(outcome, Ok(true)));
        assert_eq!(exit_code(&outcome), 0);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_exit_code_undefined_metric() {
        let dir = scratch_dir("undefined");
        let flat = dir.join("flat.png");
        image::RgbImage::from_pixel(16, 16, image::Rgb([90, 120, 30]))
            .save(&flat)
            .unwrap();

        let outcome = run(&cli_for(flat.clone(), flat));
        assert!(matches!(outcome, Ok(false)));
        assert_eq!(exit_code(&outcome), 2);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_exit_code_load_failure() {
        let dir = scratch_dir("missing");
        let present = dir.join("noise.png");
        noise_png(&present, 11);

        let outcome = run(&cli_for(present, dir.join("missing.png")));
        assert!(matches!(outcome, Err(imgcrypt_metrics::AnalysisError::Load { .. })));
        assert_eq!(exit_code(&outcome), 1);

        std::fs::remove_dir_all(&dir).ok();
    }
}
