use anyhow::{Context, Result};
use clap::Parser;
use logseq2obsidian_config::Config;
use logseq2obsidian_engine::{Converter, DuplicateTitles};
use std::path::PathBuf;
use std::process;

#[derive(Debug, Parser)]
#[command(name = "logseq2obsidian")]
#[command(about = "A converter for Logseq => Obsidian")]
struct Cli {
    /// Logseq pages directory
    source: PathBuf,

    /// Output directory (defaults to the config file value, then out/)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file to use instead of ~/.config/logseq2obsidian/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the effective settings to the config file before converting
    #[arg(long)]
    save_config: bool,

    /// Keep existing files in the output directory
    #[arg(long)]
    no_clean: bool,

    /// What to do when two pages share a title: overwrite, skip or suffix
    #[arg(long)]
    duplicate_titles: Option<DuplicateTitles>,

    /// Log debug output
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::config_path)
    }

    fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else if self.quiet {
            log::LevelFilter::Warn
        } else {
            log::LevelFilter::Info
        }
    }

    /// Command line flags win over the config file
    fn apply_to(&self, mut config: Config) -> Config {
        if let Some(output) = &self.output {
            config.output_path = Some(output.clone());
        }
        if self.no_clean {
            config.clean_output = false;
        }
        if let Some(policy) = self.duplicate_titles {
            config.duplicate_titles = policy;
        }
        config
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let loaded = match &cli.config {
        Some(path) if !cli.save_config => {
            let config = Config::load_from_path(path)?;
            Some(config.with_context(|| format!("Config file not found: {}", path.display()))?)
        }
        // a missing file is fine when it is about to be written
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    if loaded.is_some() {
        log::debug!("Loaded config");
    }
    Ok(cli.apply_to(loaded.unwrap_or_default()))
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    if cli.save_config {
        let config_path = cli.config_path();
        config
            .save_to_path(&config_path)
            .with_context(|| format!("Failed to save config to {}", config_path.display()))?;
        log::info!("Saved config to {}", config_path.display());
    }
    let output = config.output_path();
    log::info!(
        "Converting {} into {}",
        cli.source.display(),
        output.display()
    );

    let report = Converter::new(config.convert_options())
        .run(&cli.source, &output)
        .with_context(|| format!("Conversion of {} failed", cli.source.display()))?;

    log::info!("Done: {report}");
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(cli.log_level())
        .init();

    if let Err(e) = run(&cli) {
        log::error!("{e:#}");
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
