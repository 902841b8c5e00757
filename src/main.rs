use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use std::path::PathBuf;

use clipfall::clipboard::{self, ClipboardManager};
use clipfall::storage::{ensure_directories, Config, ConfigStorage, TomlConfigStorage};
use clipfall::{logging, ImageInput};

#[derive(Parser)]
#[command(name = "clipfall")]
#[command(about = "Copy text and images to the clipboard with backend fallback", long_about = None)]
struct Cli {
    /// Enable debug logging (overrides the config file)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy text to the clipboard (reads stdin when TEXT is omitted)
    Copy {
        /// Text to copy
        text: Option<String>,
    },

    /// Print clipboard text
    Paste,

    /// Copy an image file to the clipboard as a bitmap
    CopyImage {
        /// Path to a PNG, BMP, JPEG, ... file
        path: PathBuf,
    },

    /// Empty the clipboard
    Clear,

    /// Show which clipboard backends are available
    Probe,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config()?;
    init_logging(&config, cli.verbose)?;

    let mut manager = clipboard::create_manager(&config);
    let result = match cli.command {
        Commands::Copy { text } => cmd_copy(&mut manager, text),
        Commands::Paste => cmd_paste(&mut manager),
        Commands::CopyImage { path } => cmd_copy_image(&mut manager, path),
        Commands::Clear => cmd_clear(&mut manager),
        Commands::Probe => cmd_probe(&manager),
    };
    manager.close();

    result
}

fn load_config() -> Result<Config> {
    let (_data_dir, config_dir) = ensure_directories()?;
    let config_storage = TomlConfigStorage::new(config_dir.join("clipfall.toml"));
    config_storage.load()
}

fn init_logging(config: &Config, verbose: bool) -> Result<()> {
    let debug = verbose || config.general.debug_logging;

    if config.general.log_to_file {
        let (data_dir, _config_dir) = ensure_directories()?;
        let file_level = if debug {
            "debug"
        } else {
            config.general.file_log_level.as_str()
        };
        return logging::init_logger(
            &data_dir.join("clipfall.log"),
            file_level,
            &config.general.console_log_level,
        );
    }

    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
    Ok(())
}

/// Copy text from the argument or stdin
fn cmd_copy(manager: &mut ClipboardManager, text: Option<String>) -> Result<()> {
    let backend = match text {
        Some(text) => manager.save_text(&text),
        None => {
            let mut buffer = Vec::new();
            io::stdin()
                .read_to_end(&mut buffer)
                .context("Failed to read from stdin")?;
            manager.save_text_bytes(&buffer)
        }
    }
    .context("Failed to copy text")?;

    log::info!("Copied text via {} backend", backend);
    Ok(())
}

fn cmd_paste(manager: &mut ClipboardManager) -> Result<()> {
    match manager.get_text().context("Failed to read clipboard text")? {
        Some(text) => println!("{}", text),
        None => anyhow::bail!("Clipboard holds no text"),
    }
    Ok(())
}

fn cmd_copy_image(manager: &mut ClipboardManager, path: PathBuf) -> Result<()> {
    manager
        .save_image(ImageInput::Path(path.clone()))
        .with_context(|| format!("Failed to copy image {:?}", path))?;

    println!("Copied {} to clipboard", path.display());
    Ok(())
}

fn cmd_clear(manager: &mut ClipboardManager) -> Result<()> {
    manager.clear().context("Failed to clear clipboard")
}

/// Show backend availability
fn cmd_probe(manager: &ClipboardManager) -> Result<()> {
    let availability = manager.availability();

    println!("Clipboard Backends");
    println!("==================");
    print!(
        "{}",
        toml::to_string_pretty(&availability).context("Failed to format availability")?
    );
    println!();
    println!(
        "Text backend: {}",
        manager
            .text_backend()
            .map(|kind| kind.name())
            .unwrap_or("none")
    );

    Ok(())
}
