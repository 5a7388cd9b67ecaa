use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tiler::config::{self, TilerConfig};
use tiler::imaging::ResampleFilter;
use tiler::{output, pyramid};

#[derive(Parser)]
#[command(name = "tiler")]
#[command(about = "Slice an image into a pyramid of 256x256 map tiles")]
#[command(long_about = "\
Slice an image into a pyramid of 256x256 map tiles

For every zoom level from 0 to MAX_ZOOM the image is split into a
2^zoom x 2^zoom grid. Each cell is resampled to 256x256 and written in the
input's format:

  <output>/
  ├── 0/0/0.png              # zoom 0: the whole image
  ├── 1/0/0.png              # zoom 1: top-left quadrant
  ├── 1/0/1.png              #         top-right (row selects x)
  ├── 1/1/0.png              #         bottom-left (column selects y)
  └── 1/1/1.png

Pixels left over when the image size does not divide evenly by 2^zoom are
not included in any tile.

Run 'tiler --gen-config' to print a documented config file.")]
#[command(version)]
struct Cli {
    /// Source image (.png or .jpg)
    #[arg(required_unless_present = "gen_config")]
    input: Option<String>,

    /// Deepest zoom level to generate; levels 0..=MAX_ZOOM are written
    #[arg(required_unless_present = "gen_config", allow_hyphen_values = true)]
    max_zoom: Option<String>,

    /// Directory the tile tree is written under
    #[arg(long, short, default_value = ".")]
    output: PathBuf,

    /// TOML config file (see --gen-config)
    #[arg(long)]
    config: Option<PathBuf>,

    /// JPEG quality, 1-100 (overrides config)
    #[arg(long)]
    quality: Option<u32>,

    /// Resampling filter: nearest, bilinear, catmull-rom, lanczos3 (overrides config)
    #[arg(long)]
    filter: Option<ResampleFilter>,

    /// Maximum parallel workers (overrides config)
    #[arg(long, short)]
    jobs: Option<usize>,

    /// Print every tile as it is written
    #[arg(long, short, conflicts_with = "quiet")]
    verbose: bool,

    /// Print nothing on success
    #[arg(long, short)]
    quiet: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,

    /// Print a stock config file with all options documented and exit
    #[arg(long)]
    gen_config: bool,
}

fn main() -> ExitCode {
    match try_main(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn try_main(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.gen_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }
    let (Some(input), Some(max_zoom)) = (cli.input, cli.max_zoom) else {
        return Err("both INPUT and MAX_ZOOM are required".into());
    };

    let settings = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => TilerConfig::default(),
    }
    .with_overrides(cli.quality, cli.filter, cli.jobs)?;
    init_thread_pool(&settings.processing);

    let options = pyramid::RunOptions {
        output_root: cli.output,
        filter: settings.output.filter,
        quality: settings.quality(),
    };

    let show_progress = !cli.quiet && !cli.json;
    let verbose = cli.verbose;
    let (tx, printer) = if show_progress {
        let (tx, rx) = std::sync::mpsc::channel();
        let printer = std::thread::spawn(move || {
            for event in rx {
                for line in output::format_tile_event(&event, verbose) {
                    println!("{}", line);
                }
            }
        });
        (Some(tx), Some(printer))
    } else {
        (None, None)
    };

    let result = pyramid::run(&input, &max_zoom, &options, tx);
    if let Some(printer) = printer {
        printer
            .join()
            .map_err(|_| "progress printer thread panicked")?;
    }
    let summary = result?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if !cli.quiet {
        println!();
        output::print_summary(&summary);
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores. The user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
