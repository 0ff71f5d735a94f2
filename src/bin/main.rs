//! Schematic Solids CLI
//!
//! Convert Sponge schematics into merged, textured solids.

use clap::{ArgAction, Parser, Subcommand};
use schematic_solids::{BlockFactory, ConvertConfig, Converter, MergeAxis, Schematic};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "schematic-solids")]
#[command(author, version, about = "Convert Sponge schematics into axis-aligned solids", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a schematic and write the solids as JSON
    Convert {
        /// Input schematic (.schem, gzipped or raw NBT)
        #[arg(short, long)]
        input: PathBuf,

        /// Block configuration JSON
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// World units per block edge
        #[arg(long)]
        block_size: Option<f32>,

        /// Enclose the schematic in skybox solids
        #[arg(long)]
        skybox: bool,

        /// Disable face culling
        #[arg(long)]
        no_culling: bool,

        /// Keep faces of other blocks behind translucent ones
        #[arg(long)]
        translucent_culling: bool,
    },

    /// Show information about a schematic
    Info {
        /// Input schematic (.schem, gzipped or raw NBT)
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    // RUST_LOG wins over -v
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Convert {
            input,
            config,
            output,
            block_size,
            skybox,
            no_culling,
            translucent_culling,
        } => {
            let mut config = match config {
                Some(path) => ConvertConfig::from_path(&path)?,
                None => ConvertConfig::default(),
            };
            if let Some(block_size) = block_size {
                config = config.with_block_size(block_size);
            }
            if skybox {
                config.skybox = true;
            }
            if no_culling {
                config.cull_hidden_faces = false;
            }
            if translucent_culling {
                config.translucent_culling = true;
            }
            convert(&input, config, output.as_deref())?;
        }
        Commands::Info { input } => {
            show_info(&input)?;
        }
    }

    Ok(())
}

fn convert(
    input_path: &Path,
    config: ConvertConfig,
    output_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let converter = Converter::with_config(config);
    let world = converter.convert_file(input_path)?;
    let json = serde_json::to_string_pretty(&world)?;

    match output_path {
        Some(path) => {
            fs::write(path, &json)?;
            eprintln!(
                "Exported {} solids ({} faces) to {:?}",
                world.solids().len(),
                world.face_count(),
                path
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn show_info(input_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("Loading schematic from {:?}...", input_path);
    let bytes = fs::read(input_path)?;
    let schematic = Schematic::from_bytes(&bytes, &BlockFactory::default())?;

    println!("\nSchematic Info:");
    println!("  Format: {:?}", schematic.version);
    println!("  Dimensions: {}", schematic.dimensions);
    println!("  Palette entries: {}", schematic.palette_size());
    println!("  Block entities: {}", schematic.block_entity_count());
    println!(
        "  Drawable blocks: {}",
        schematic.grid().iter().filter(|b| b.is_drawable()).count()
    );
    println!("  Unrecognized blocks: {}", schematic.generic_blocks());

    let world = Converter::new().mesh(schematic);
    let stats = world.stats();
    println!("\nConversion:");
    println!("  Solids: {}", stats.total_solids());
    println!("  - Grouped: {}", stats.grouped_solids);
    for axis in MergeAxis::PRIORITY {
        println!(
            "    - {}: {}",
            axis,
            stats.groups_by_axis.get(&axis).copied().unwrap_or(0)
        );
    }
    println!("  - Single: {}", stats.single_solids);
    println!("  Faces: {} ({} culled)", world.face_count(), stats.culled_faces);

    Ok(())
}
