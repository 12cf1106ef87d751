use clap::{Args, Parser, Subcommand};
use photo_collage::{collage, config, output};
use std::path::PathBuf;

fn version_string() -> &'static str {
    if env!("COLLAGE_RELEASE_TAG") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    let hash = env!("COLLAGE_GIT_HASH");
    if hash.is_empty() {
        "dev@unknown"
    } else {
        // Leaked once at startup
        Box::leak(format!("dev@{hash}").into_boxed_str())
    }
}

#[derive(Parser)]
#[command(name = "photo-collage")]
#[command(about = "Arrange a folder of images into one grid collage")]
#[command(long_about = "\
Arrange a folder of images into one grid collage

Every png, jpg, jpeg, bmp and gif file directly inside the source directory
is shrunk to fit a cell of a square grid and pasted onto a blank canvas.
Files are placed in name order, left to right, top to bottom.

  4 images, 1000x1000, margin 10:

  +----------------------------+
  | [ a.jpg ]      [ b.jpg ]   |   grid  = ceil(sqrt(4)) = 2
  |                            |   cell  = (1000 - 3*10) / 2 = 485
  | [ c.jpg ]      [ d.jpg ]   |
  +----------------------------+

Images that fail to decode are reported and their cell is left empty.

Run 'photo-collage gen-config' to generate a documented config file.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (TOML); flags override its values
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Canvas flags shared by commands that compute a layout.
#[derive(Args, Clone)]
struct CanvasArgs {
    /// Directory containing the source images
    #[arg(long, short)]
    source: PathBuf,

    /// Canvas width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Gap between cells and around the edge, in pixels
    #[arg(long)]
    margin: Option<u32>,
}

#[derive(Subcommand)]
enum Command {
    /// Build the collage and write it to disk
    Build {
        #[command(flatten)]
        canvas: CanvasArgs,

        /// Output image; format follows the extension (png, jpg, jpeg, bmp, gif)
        #[arg(long, short)]
        output: PathBuf,

        /// Background colour for uncovered areas (#rrggbb)
        #[arg(long)]
        background: Option<String>,

        /// JPEG quality (1-100)
        #[arg(long)]
        quality: Option<u32>,

        /// Also write the placement report as JSON
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Show the layout and read every image header without writing anything
    Check {
        #[command(flatten)]
        canvas: CanvasArgs,
    },
    /// Print a stock config file with all options documented
    GenConfig,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Build {
            canvas,
            output: output_path,
            background,
            quality,
            report,
        } => {
            let options = config::load_config(cli.config.as_deref())?
                .with_overrides(config::Overrides {
                    width: canvas.width,
                    height: canvas.height,
                    margin: canvas.margin,
                    background,
                    quality,
                })?
                .to_options()?;

            let result = collage::build_with_options(&canvas.source, &output_path, &options)?;
            output::print_report(&result);

            if let Some(report_path) = report {
                let json = serde_json::to_string_pretty(&result)?;
                std::fs::write(&report_path, json)?;
            }
        }
        Command::Check { canvas } => {
            let options = config::load_config(cli.config.as_deref())?
                .with_overrides(config::Overrides {
                    width: canvas.width,
                    height: canvas.height,
                    margin: canvas.margin,
                    ..Default::default()
                })?
                .to_options()?;

            let result = collage::check(&canvas.source, &options)?;
            output::print_check(&result);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
