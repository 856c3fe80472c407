mod settings;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use image_effects_core::io::domain::image_reader::ImageReader;
use image_effects_core::io::domain::image_writer::ImageWriter;
use image_effects_core::io::infrastructure::image_file_reader::ImageFileReader;
use image_effects_core::io::infrastructure::image_file_writer::ImageFileWriter;
use image_effects_core::shared::constants::IMAGE_EXTENSIONS;
use image_effects_core::{average_color, blur, decode_animated_image, light_blur, AnimatedImage};

use settings::{parse_tint, Settings};

/// Average color, tinted blur and animated GIF inspection for image files.
#[derive(Parser)]
#[command(name = "image-effects")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the average color of an image.
    Average {
        input: PathBuf,
    },
    /// Blur an image and composite a tint on top.
    Blur {
        input: PathBuf,
        output: PathBuf,
        /// Blur radius (Gaussian sigma, >= 0). Defaults to the saved setting.
        #[arg(long)]
        radius: Option<f32>,
        /// Tint: #RRGGBB, #RRGGBBAA, "light" or "none". Defaults to the saved setting.
        #[arg(long)]
        tint: Option<String>,
    },
    /// Apply the light blur preset.
    LightBlur {
        input: PathBuf,
        output: PathBuf,
    },
    /// Print frame count, delays and loop count of an animated GIF.
    GifInfo {
        input: PathBuf,
    },
    /// Export every frame of an animated GIF as PNG.
    GifFrames {
        input: PathBuf,
        output_dir: PathBuf,
    },
    /// Show or update the saved defaults.
    Config {
        #[arg(long)]
        radius: Option<f32>,
        #[arg(long)]
        tint: Option<String>,
        /// Persist the given values.
        #[arg(long)]
        save: bool,
    },
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = Settings::load();

    match cli.command {
        Command::Average { input } => run_average(&input),
        Command::Blur {
            input,
            output,
            radius,
            tint,
        } => {
            let settings = apply_overrides(settings, radius, tint)?;
            run_blur(&input, &output, &settings)
        }
        Command::LightBlur { input, output } => run_light_blur(&input, &output),
        Command::GifInfo { input } => run_gif_info(&input),
        Command::GifFrames { input, output_dir } => run_gif_frames(&input, &output_dir),
        Command::Config { radius, tint, save } => {
            let settings = apply_overrides(settings, radius, tint)?;
            if save {
                let path = settings.save()?;
                log::info!("Settings saved to {}", path.display());
            }
            println!("{}", serde_json::to_string_pretty(&settings)?);
            Ok(())
        }
    }
}

fn run_average(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    validate_input(input)?;
    let image = ImageFileReader::new().read(input)?;
    let color = average_color(&image);
    println!(
        "{color} (r={}, g={}, b={}, a={})",
        color.r, color.g, color.b, color.a
    );
    Ok(())
}

fn run_blur(
    input: &Path,
    output: &Path,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    validate_input(input)?;
    let tint = settings.tint_color()?;
    let image = ImageFileReader::new().read(input)?;
    log::info!(
        "Blurring {} (radius={}, tint={})",
        input.display(),
        settings.blur_radius,
        tint.map(|c| c.to_hex()).unwrap_or_else(|| "none".into())
    );
    let blurred = blur(&image, settings.blur_radius, tint)?;
    ImageFileWriter::new().write(output, &blurred)?;
    log::info!("Output written to {}", output.display());
    Ok(())
}

fn run_light_blur(input: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    validate_input(input)?;
    let image = ImageFileReader::new().read(input)?;
    ImageFileWriter::new().write(output, &light_blur(&image))?;
    log::info!("Output written to {}", output.display());
    Ok(())
}

fn run_gif_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let animated = read_animation(input)?;
    println!("Size:       {}x{}", animated.width(), animated.height());
    println!("Frames:     {}", animated.frame_count());
    println!("Loop count: {}", animated.loop_count());
    println!("Duration:   {} ms", animated.total_duration().as_millis());
    for (i, frame) in animated.frames().iter().enumerate() {
        println!("  frame {i:>4}: {} ms", frame.delay().as_millis());
    }
    Ok(())
}

fn run_gif_frames(input: &Path, output_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let animated = read_animation(input)?;
    let writer = ImageFileWriter::new();
    let total = animated.frame_count();
    for (i, frame) in animated.frames().iter().enumerate() {
        let path = output_dir.join(format!("frame_{i:04}.png"));
        writer.write(&path, frame.image())?;
        eprint!("\rWriting frame {}/{total}", i + 1);
    }
    eprintln!();
    log::info!("Saved {total} frames to {}", output_dir.display());
    Ok(())
}

fn read_animation(input: &Path) -> Result<AnimatedImage, Box<dyn std::error::Error>> {
    validate_input(input)?;
    let bytes = std::fs::read(input)?;
    decode_animated_image(&bytes)
        .ok_or_else(|| format!("Not a decodable animated GIF: {}", input.display()).into())
}

fn apply_overrides(
    mut settings: Settings,
    radius: Option<f32>,
    tint: Option<String>,
) -> Result<Settings, Box<dyn std::error::Error>> {
    if let Some(r) = radius {
        if !r.is_finite() || r < 0.0 {
            return Err(format!("Radius must be a non-negative number, got {r}").into());
        }
        settings.blur_radius = r;
    }
    if let Some(t) = tint {
        parse_tint(&t)?;
        settings.tint = t;
    }
    Ok(settings)
}

fn validate_input(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file not found: {}", input.display()).into());
    }
    if !is_image(input) {
        log::warn!(
            "{} does not have a known image extension; trying anyway",
            input.display()
        );
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
