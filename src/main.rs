//! docgate - preview and audit access-controlled documentation trees.

use anyhow::Result;
use clap::Parser;
use docgate::{
    cli::{Cli, Commands},
    config::DocsConfig,
    explain::explain_pages,
    render::render_tree,
    utils::log::set_quiet,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    set_quiet(cli.quiet);
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Tree { viewer, compact } => render_tree(&config, viewer, *compact),
        Commands::Explain { paths } => explain_pages(&config, paths),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<DocsConfig> {
    let root = cli.root.as_deref().unwrap_or(std::path::Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        DocsConfig::from_path(&config_path)?
    } else {
        DocsConfig::default()
    };
    config.update_with_cli(cli);
    config.validate()?;

    Ok(config)
}
