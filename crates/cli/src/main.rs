//! printpack command-line front end.

mod request;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use printpack_core::{sort_by_area_desc, LayoutEngine, PageSize, MM_PER_INCH};

use crate::request::{ConfigRequest, LayoutRequest, LayoutResponse};

#[derive(Parser)]
#[command(name = "printpack")]
#[command(about = "Pack photographs onto print pages")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out the photos listed in a JSON file
    Layout {
        /// Path to the JSON request (object with "items" or a bare item array)
        file: PathBuf,

        #[command(flatten)]
        page: PageArgs,

        /// Place larger photos first
        #[arg(long)]
        sort: bool,

        /// Output file for the layout (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the resolved print size of each photo
    Resolve {
        /// Path to the JSON request
        file: PathBuf,

        #[command(flatten)]
        page: PageArgs,
    },

    /// List page size presets
    Pages,
}

/// Page settings, in inches.
#[derive(Args, Clone, Default)]
struct PageArgs {
    /// Page size preset (letter, legal, a3, a4, a5)
    #[arg(long)]
    page: Option<String>,

    /// Turn the page sideways
    #[arg(long)]
    landscape: bool,

    /// Layout units per inch
    #[arg(long)]
    dpi: Option<f64>,

    /// Page margin in inches
    #[arg(short, long)]
    margin: Option<f64>,

    /// Gap between photos in inches
    #[arg(short, long)]
    gap: Option<f64>,

    /// Default photo diagonal in inches
    #[arg(short, long)]
    diagonal: Option<f64>,
}

impl From<PageArgs> for ConfigRequest {
    fn from(args: PageArgs) -> Self {
        ConfigRequest {
            page: args.page,
            page_width: None,
            page_height: None,
            landscape: args.landscape.then_some(true),
            dpi: args.dpi,
            margin: args.margin,
            gap: args.gap,
            diagonal: args.diagonal,
        }
    }
}

/// Loads a request and merges its config block over the command-line flags.
fn load_request(file: &Path, page: PageArgs) -> anyhow::Result<(LayoutRequest, ConfigRequest)> {
    let request = LayoutRequest::load(file)?;
    let flags = ConfigRequest::from(page);
    let settings = match &request.config {
        Some(overrides) => flags.overridden_by(overrides),
        None => flags,
    };
    Ok((request, settings))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Layout {
            file,
            page,
            sort,
            output,
        } => {
            let (request, settings) = load_request(&file, page)?;
            let res = settings.resolution();
            let config = settings.to_config()?;
            let mut items = request.to_items(res)?;
            if sort {
                sort_by_area_desc(&mut items);
            }

            log::info!("laying out {} photo(s) from {}", items.len(), file.display());
            let layout = LayoutEngine::new(config.clone()).layout(&items)?;

            println!(
                "Page {:.2} x {:.2} in, usable {:.2} x {:.2} in",
                res.to_inches(config.page_width),
                res.to_inches(config.page_height),
                res.to_inches(config.usable_width()),
                res.to_inches(config.usable_height())
            );
            for page in &layout.pages {
                println!("\nPage {}:", page.index + 1);
                for p in &page.placements {
                    println!(
                        "  {:<24} at ({:>6.2}, {:>6.2}) in  {:>5.2} x {:>5.2} in{}",
                        p.item_id,
                        res.to_inches(p.x),
                        res.to_inches(p.y),
                        res.to_inches(p.width),
                        res.to_inches(p.height),
                        if p.rotated { "  [rotated]" } else { "" }
                    );
                }
            }
            if !layout.dropped.is_empty() {
                println!("\nDropped:");
                for d in &layout.dropped {
                    println!(
                        "  {:<24} {:.2} x {:.2} in: {}",
                        d.item_id,
                        res.to_inches(d.width),
                        res.to_inches(d.height),
                        d.reason
                    );
                }
            }
            println!("\n{}", layout.summary());

            if let Some(path) = output {
                LayoutResponse::new(layout, &config, res).save_json(&path)?;
                println!("Layout saved to: {}", path.display());
            }
        }

        Commands::Resolve { file, page } => {
            let (request, settings) = load_request(&file, page)?;
            let res = settings.resolution();
            let config = settings.to_config()?;
            let items = request.to_items(res)?;

            let engine = LayoutEngine::new(config);
            for item in engine.resolve(&items) {
                if item.is_placeable() {
                    println!(
                        "{:<24} {:>5.2} x {:>5.2} in  (diagonal {:.2} in)",
                        item.id,
                        res.to_inches(item.print_width),
                        res.to_inches(item.print_height),
                        res.to_inches(item.diagonal)
                    );
                } else {
                    println!("{:<24} skipped (zero size)", item.id);
                }
            }
        }

        Commands::Pages => {
            println!("Available page sizes:");
            println!("=====================");
            for (name, size) in PageSize::PRESETS {
                println!(
                    "  {:<8} {:>5.2} x {:>5.2} in  ({:.0} x {:.0} mm)",
                    name,
                    size.width_in,
                    size.height_in,
                    size.width_in * MM_PER_INCH,
                    size.height_in * MM_PER_INCH
                );
            }
        }
    }

    Ok(())
}
