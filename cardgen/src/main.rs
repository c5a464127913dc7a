//! `cardgen` command line tool.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use cardgen::output::{background_filename, save_png, unix_now};
use cardgen::{AssetLayout, CardData, CardKind, CardService, ImageConfig, doctor};
use clap::{Parser, Subcommand};
use render::{BackgroundGenerator, Direction, THEMES, Theme};

#[derive(Parser)]
#[command(author, version, about = "Render xiuxian game cards to PNG", long_about = None)]
struct Cli {
    /// Assets root holding fonts/, textures/ and output/
    #[arg(long, global = true)]
    assets: Option<PathBuf>,

    /// Config file (defaults to <assets>/config/image_config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Render one card from a JSON record ("-" reads stdin)
    Render {
        kind: CardKind,
        input: String,
        /// Identifier placed in the file name
        #[arg(long, default_value = "cli")]
        id: String,
        /// Output directory instead of <assets>/output
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Check fonts and output directory
    Doctor,
    /// Print the effective config
    Config {
        /// Write the config file with defaults if it does not exist
        #[arg(long)]
        init: bool,
    },
    /// List background themes
    Themes,
    /// Render a bare themed background
    Background {
        theme: String,
        #[arg(long, default_value = "radial")]
        direction: Direction,
        /// Canvas size as WIDTHxHEIGHT
        #[arg(long, default_value = "600x400", value_parser = parse_size)]
        size: (u32, u32),
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s.split_once(['x', 'X']).ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    let w = w.trim().parse::<u32>().map_err(|e| format!("width: {e}"))?;
    let h = h.trim().parse::<u32>().map_err(|e| format!("height: {e}"))?;
    if w == 0 || h == 0 {
        return Err("size must be non-zero".to_string());
    }
    Ok((w, h))
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).context("read stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("read {input:?}"))
    }
}

fn main() -> Result<ExitCode> {
    // Structured logging. Use `RUST_LOG=info` etc.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let layout = cli.assets.map(AssetLayout::new).unwrap_or_else(AssetLayout::discover);
    let config_path = cli.config.unwrap_or_else(|| layout.config_path());

    match cli.cmd {
        Cmd::Render { kind, input, id, out } => {
            let config = ImageConfig::load_or_default(&config_path);
            let data = CardData::from_json(kind, &read_input(&input)?)?;
            let service = CardService::with_layout(layout, config)?;
            let dir = out.unwrap_or_else(|| service.layout().output.clone());
            match service.render_to_dir(&data, &id, &dir) {
                Ok(path) => println!("{}", path.display()),
                Err(err) => {
                    tracing::error!(error = %format!("{err:#}"), "render failed");
                    eprintln!("{}", cardgen::user_message(&err));
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Cmd::Doctor => {
            let report = doctor::diagnose(&layout, &layout.font_candidates());
            print!("{report}");
            if !report.is_healthy() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Cmd::Config { init } => {
            if init {
                if config_path.exists() {
                    println!("config already exists: {}", config_path.display());
                } else {
                    ImageConfig::default().save(&config_path)?;
                    println!("wrote {}", config_path.display());
                }
            }
            let config = ImageConfig::load(&config_path)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Cmd::Themes => {
            for theme in THEMES.iter() {
                println!("{:<12} {}", theme.key, theme.display_name);
            }
        }
        Cmd::Background { theme, direction, size, out } => {
            let Some(found) = Theme::get(&theme) else {
                bail!("unknown theme {theme:?}; run `cardgen themes`");
            };
            let config = ImageConfig::load_or_default(&config_path);
            let effects = config.effects(layout.texture_for(&theme));
            let image = BackgroundGenerator::new(unix_now())
                .themed(size.0, size.1, found, direction, config.gradient_smooth, &effects)?;
            let dir = out.unwrap_or_else(|| layout.output.clone());
            let path = save_png(&image, &dir, &background_filename(&theme, unix_now()), config.image_quality)?;
            println!("{}", path.display());
        }
    }
    Ok(ExitCode::SUCCESS)
}
