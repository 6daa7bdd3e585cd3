use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use pixelart::amount::{self, Wei};
use pixelart::codec::{PackedImage, PixelGrid};
use pixelart::config::ChainRegistry;
use pixelart::contract::{self, ContractConfig, ContractReader, ContractSnapshot, MintCall};
use pixelart::metadata;
use pixelart::palette::PALETTE;
use pixelart::render;
use pixelart::token::{TokenId, TokenInfo};

mod grid_text;
mod render_png;

/// Pixel art NFT toolkit
#[derive(Parser)]
#[command(name = "pixelart", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the 16 palette colors
    Palette,
    /// Pack a text grid (16 rows of 16 hex digits) into the on-chain hex payload
    Encode {
        /// Grid file, or "-" for stdin
        #[arg(default_value = "-")]
        grid: String,
    },
    /// Unpack a hex payload into a text grid
    Decode {
        /// 0x-prefixed payload of 128 bytes
        hex: String,
    },
    /// Render a hex payload as PNG or SVG
    Render {
        /// 0x-prefixed payload of 128 bytes
        hex: String,
        /// Output format
        #[arg(long, default_value = "png")]
        format: String,
        /// Output pixels per grid cell
        #[arg(long, default_value = "20")]
        scale: usize,
        /// White border width in cells (PNG only)
        #[arg(long, default_value = "0")]
        border: usize,
        /// Output file path
        #[arg(short, long, default_value = "pixelart.png")]
        output: PathBuf,
    },
    /// Decode a token URI and show its metadata
    Uri {
        /// Token URI, or @path to read it from a file
        uri: String,
        /// Write the embedded SVG, prepared for display, to this path
        #[arg(long)]
        svg: Option<PathBuf>,
        /// Print the embedded image as a text grid
        #[arg(long)]
        grid: bool,
    },
    /// Print the call plan for creating a new token
    PlanNew {
        /// 0x-prefixed payload of 128 bytes
        #[arg(long)]
        hex: String,
        /// Edition price in ETH (e.g. "0.01")
        #[arg(long)]
        price: String,
        /// Maximum editions, 0 for unlimited
        #[arg(long)]
        max_supply: u64,
        #[command(flatten)]
        chain: ChainArgs,
    },
    /// Print the call plan for minting an edition of an existing token
    PlanEdition {
        /// Token to mint
        #[arg(long)]
        token_id: TokenId,
        /// Contract snapshot (JSON) to read price, supply, and fee from
        #[arg(long)]
        snapshot: PathBuf,
        #[command(flatten)]
        chain: ChainArgs,
    },
    /// List every token in a contract snapshot
    Gallery {
        /// Contract snapshot (JSON)
        #[arg(long)]
        snapshot: PathBuf,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Evaluate whether an edition can be minted
    CanMint {
        /// Edition price in wei
        #[arg(long)]
        price: Wei,
        /// Editions minted so far
        #[arg(long)]
        total: u64,
        /// Maximum editions, 0 for unlimited
        #[arg(long)]
        max: u64,
    },
}

#[derive(clap::Args)]
struct ChainArgs {
    /// Chain id or name (e.g. 31337, sepolia)
    #[arg(long, default_value = "anvil")]
    chain: String,
    /// Chain registry TOML overriding built-in deployments
    #[arg(long)]
    chains: Option<PathBuf>,
    /// Platform fee in wei, when not read from a snapshot
    #[arg(long, default_value = "0")]
    fee: Wei,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Palette => cmd_palette(),
        Command::Encode { grid } => cmd_encode(&grid),
        Command::Decode { hex } => cmd_decode(&hex),
        Command::Render {
            hex,
            format,
            scale,
            border,
            output,
        } => cmd_render(&hex, &format, scale, border, &output),
        Command::Uri { uri, svg, grid } => cmd_uri(&uri, svg.as_deref(), grid),
        Command::PlanNew {
            hex,
            price,
            max_supply,
            chain,
        } => cmd_plan_new(&hex, &price, max_supply, &chain),
        Command::PlanEdition {
            token_id,
            snapshot,
            chain,
        } => cmd_plan_edition(token_id, &snapshot, &chain),
        Command::Gallery { snapshot, json } => cmd_gallery(&snapshot, json),
        Command::CanMint { price, total, max } => cmd_can_mint(price, total, max),
    }
}

/// Read a file argument, with "-" meaning stdin.
fn read_input(arg: &str) -> Result<String> {
    if arg == "-" {
        std::io::read_to_string(std::io::stdin()).context("reading stdin")
    } else {
        std::fs::read_to_string(arg).with_context(|| format!("reading {arg}"))
    }
}

fn parse_packed(hex: &str) -> Result<PackedImage> {
    PackedImage::from_hex(hex).context("parsing packed image payload")
}

fn load_snapshot(path: &Path) -> Result<ContractSnapshot> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing snapshot {}", path.display()))
}

fn resolve_contract(args: &ChainArgs) -> Result<ContractConfig> {
    let registry = match &args.chains {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            ChainRegistry::from_toml(&text)
                .with_context(|| format!("parsing chain registry {}", path.display()))?
        }
        None => ChainRegistry::default(),
    };

    let chain_id = match args.chain.parse::<u64>() {
        Ok(id) => id,
        Err(_) => registry
            .chain_by_name(&args.chain)
            .map(|c| c.id)
            .with_context(|| format!("unknown chain '{}'", args.chain))?,
    };
    Ok(registry.resolve(chain_id))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_palette() -> Result<()> {
    println!("{:<6} {:<8}", "Index", "Color");
    println!("{}", "-".repeat(15));
    for (i, color) in PALETTE.iter().enumerate() {
        println!("{:<6} {:<8}", format!("{i:x}"), color.hex());
    }
    Ok(())
}

fn cmd_encode(input: &str) -> Result<()> {
    let grid = grid_text::parse(&read_input(input)?)?;
    println!("{}", grid.pack().to_hex());
    Ok(())
}

fn cmd_decode(hex: &str) -> Result<()> {
    print!("{}", grid_text::format(&parse_packed(hex)?.unpack()));
    Ok(())
}

fn cmd_render(hex: &str, format: &str, scale: usize, border: usize, output: &Path) -> Result<()> {
    render_png::check_size(scale, border)?;
    let grid = parse_packed(hex)?.unpack();
    match format {
        "png" => render_png::write_grid_png(&grid, scale, border, output)?,
        "svg" => std::fs::write(output, render::render_svg(&grid, scale))
            .with_context(|| format!("writing {}", output.display()))?,
        _ => anyhow::bail!("unknown format '{}', use 'png' or 'svg'", format),
    }
    println!("wrote {}", output.display());
    Ok(())
}

fn cmd_uri(arg: &str, svg_out: Option<&Path>, show_grid: bool) -> Result<()> {
    let uri = match arg.strip_prefix('@') {
        Some(path) => read_input(path)?,
        None => arg.to_string(),
    };
    let meta = metadata::decode_token_uri(uri.trim()).context("decoding token uri")?;

    println!("Name:          {}", meta.name.as_deref().unwrap_or("-"));
    println!("Description:   {}", meta.description.as_deref().unwrap_or("-"));
    let Some(image) = meta.image else {
        println!("Image:         none");
        return Ok(());
    };
    println!("Image:         {} bytes of svg", image.as_str().len());

    if let Some(path) = svg_out {
        std::fs::write(path, render::prepare_svg_for_display(image.as_str()))
            .with_context(|| format!("writing {}", path.display()))?;
        println!("wrote {}", path.display());
    }
    if show_grid {
        let grid: PixelGrid =
            render::grid_from_svg(image.as_str()).context("reading pixels from svg")?;
        println!();
        print!("{}", grid_text::format(&grid));
        println!();
        println!("Payload:       {}", grid.pack().to_hex());
    }
    Ok(())
}

fn cmd_plan_new(hex: &str, price: &str, max_supply: u64, chain: &ChainArgs) -> Result<()> {
    let image = parse_packed(hex)?;
    let price = amount::parse_ether(price).context("parsing edition price")?;
    let contract = resolve_contract(chain)?;
    let call = MintCall::mint_new(contract, image, price, max_supply, chain.fee);
    print_json(&call.plan())
}

fn cmd_plan_edition(token_id: TokenId, snapshot: &Path, chain: &ChainArgs) -> Result<()> {
    let snap = load_snapshot(snapshot)?;
    let contract = resolve_contract(chain)?;
    let view = contract::load_token(&snap, token_id);
    let fee = snap.platform_fee()?;
    let call = MintCall::mint_edition(contract, token_id, &view.info, fee)
        .with_context(|| format!("token {token_id}"))?;
    print_json(&call.plan())
}

#[derive(Serialize)]
struct GalleryRow {
    id: TokenId,
    title: String,
    price: Option<String>,
    supply: Option<String>,
    creator: Option<String>,
    mintable: bool,
}

fn cmd_gallery(snapshot: &Path, json: bool) -> Result<()> {
    let snap = load_snapshot(snapshot)?;
    let rows: Vec<GalleryRow> = contract::load_gallery(&snap)?
        .into_iter()
        .map(|view| GalleryRow {
            id: view.id,
            title: view.title(),
            price: view.info.price_label(),
            supply: view.info.supply_label(),
            creator: view.info.creator.map(|c| c.short()),
            mintable: view.info.mint_status().is_ok(),
        })
        .collect();

    if json {
        return print_json(&rows);
    }
    if rows.is_empty() {
        println!("No pixel art NFTs created yet.");
        return Ok(());
    }

    println!(
        "{:>4}  {:<24} {:>16} {:>10} {:<14} {}",
        "Id", "Title", "Price", "Supply", "Creator", "Mintable"
    );
    println!("{}", "-".repeat(80));
    for row in &rows {
        println!(
            "{:>4}  {:<24} {:>16} {:>10} {:<14} {}",
            row.id,
            row.title,
            row.price.as_deref().unwrap_or("-"),
            row.supply.as_deref().unwrap_or("-"),
            row.creator.as_deref().unwrap_or("-"),
            if row.mintable { "yes" } else { "no" },
        );
    }
    Ok(())
}

fn cmd_can_mint(price: Wei, total: u64, max: u64) -> Result<()> {
    let info = TokenInfo {
        edition_price: Some(price),
        total_supply: Some(total),
        max_supply: Some(max),
        creator: None,
    };
    match info.mint_status() {
        Ok(()) => println!("yes"),
        Err(reason) => println!("no: {}", reason.message()),
    }
    Ok(())
}
