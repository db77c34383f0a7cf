//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs the tracing subscriber
//! - Resolves the state directory from flags, environment and platform defaults
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Builds `AppContext` with API and configuration
//! - `handle_*()`: Per-command handlers that call API and format output

use super::print::{
    print_checks, print_config, print_hash, print_incompatible, print_messages, print_state,
};
use super::setup::{Cli, Commands, PruneBy};
use clap::Parser;
use directories::ProjectDirs;
use spritestate::api::SpriteApi;
use spritestate::catalog::Catalog;
use spritestate::channel::fs::FileChannel;
use spritestate::config::SpriteConfig;
use spritestate::error::{Result, SpriteError};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const HOME_ENV: &str = "SPRITESTATE_HOME";
const LOG_ENV: &str = "SPRITESTATE_LOG";
const CATALOG_FILENAME: &str = "item-metadata.json";

struct AppContext {
    api: SpriteApi<FileChannel>,
    config_dir: PathBuf,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        None | Some(Commands::Show) => handle_show(&mut ctx),
        Some(Commands::Encode) => handle_encode(&mut ctx),
        Some(Commands::Decode { hash }) => handle_decode(&mut ctx, &hash),
        Some(Commands::Select { item_id, variant }) => {
            handle_select(&mut ctx, &item_id, variant.as_deref())
        }
        Some(Commands::Deselect { groups }) => handle_deselect(&mut ctx, &groups),
        Some(Commands::BodyType { tag }) => handle_body_type(&mut ctx, &tag),
        Some(Commands::Reset) => handle_reset(&mut ctx),
        Some(Commands::Check { item_ids }) => handle_check(&mut ctx, &item_ids),
        Some(Commands::Incompatible) => handle_incompatible(&mut ctx),
        Some(Commands::Prune { by }) => handle_prune(&mut ctx, by),
        Some(Commands::Config) => handle_config(&ctx),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("spritestate=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .ok();
}

fn state_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.dir {
        return Ok(dir.clone());
    }
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("org", "spritestate", "spritestate")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| SpriteError::Config("Could not determine a state directory".into()))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config_dir = state_dir(cli)?;
    let catalog_path = cli
        .catalog
        .clone()
        .unwrap_or_else(|| config_dir.join(CATALOG_FILENAME));

    tracing::debug!(dir = %config_dir.display(), catalog = %catalog_path.display(), "Opening state");

    let config = SpriteConfig::load(&config_dir)?;
    let catalog = Catalog::load(&catalog_path)?;
    let channel = FileChannel::new(&config_dir);

    let mut api = SpriteApi::new(catalog, config, channel)?;
    if let Some(keys) = &cli.licenses {
        api.set_enabled_licenses(keys.iter().cloned());
    }
    if let Some(values) = &cli.animations {
        api.set_enabled_animations(values.iter().cloned());
    }

    Ok(AppContext { api, config_dir })
}

fn handle_show(ctx: &mut AppContext) -> Result<()> {
    let loaded = ctx.api.load()?;
    print_messages(&loaded.messages);

    let result = ctx.api.show();
    print_state(&result);
    print_hash(&result);
    Ok(())
}

fn handle_encode(ctx: &mut AppContext) -> Result<()> {
    ctx.api.load()?;
    println!("#{}", ctx.api.encode());
    Ok(())
}

fn handle_decode(ctx: &mut AppContext, hash: &str) -> Result<()> {
    let result = ctx.api.load_from(hash)?;
    print_state(&result);
    print_hash(&result);
    print_messages(&result.messages);
    Ok(())
}

fn handle_select(ctx: &mut AppContext, item_id: &str, variant: Option<&str>) -> Result<()> {
    ctx.api.load()?;
    let result = ctx.api.select(item_id, variant)?;
    print_messages(&result.messages);
    print_hash(&result);
    Ok(())
}

fn handle_deselect(ctx: &mut AppContext, groups: &[String]) -> Result<()> {
    ctx.api.load()?;
    let result = ctx.api.deselect(groups)?;
    print_messages(&result.messages);
    print_hash(&result);
    Ok(())
}

fn handle_body_type(ctx: &mut AppContext, tag: &str) -> Result<()> {
    ctx.api.load()?;
    let result = ctx.api.set_body_type(tag)?;
    print_messages(&result.messages);
    print_hash(&result);
    Ok(())
}

fn handle_reset(ctx: &mut AppContext) -> Result<()> {
    ctx.api.load()?;
    let result = ctx.api.reset()?;
    print_messages(&result.messages);
    print_state(&result);
    print_hash(&result);
    Ok(())
}

fn handle_check(ctx: &mut AppContext, item_ids: &[String]) -> Result<()> {
    let result = ctx.api.check_items(item_ids)?;
    print_checks(&result.checks);
    print_messages(&result.messages);
    Ok(())
}

fn handle_incompatible(ctx: &mut AppContext) -> Result<()> {
    ctx.api.load()?;
    let result = ctx.api.incompatible()?;
    print_messages(&result.messages);
    print_incompatible(&result.incompatible);
    Ok(())
}

fn handle_prune(ctx: &mut AppContext, by: PruneBy) -> Result<()> {
    ctx.api.load()?;
    let result = ctx.api.remove_incompatible(by.into())?;
    print_messages(&result.messages);
    print_hash(&result);
    Ok(())
}

fn handle_config(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.config();
    if let Some(config) = &result.config {
        print_config(config, &ctx.config_dir)?;
    }
    print_messages(&result.messages);
    Ok(())
}
