#![allow(dead_code)]

mod color;
mod config;
mod language;
mod storage;
mod ui;

use anyhow::{bail, Context, Result};
use config::Config;
use language::{EnvLocale, Language};
use storage::{FsExplorer, Settings, SettingsStore};

fn print_help() {
    println!("leafcfg - Layered settings store for a homebrew tool");
    println!();
    println!("USAGE:");
    println!("    leafcfg [OPTIONS] [COMMAND]");
    println!();
    println!("COMMANDS:");
    println!("    show                   Print the effective settings (default)");
    println!("    save                   Rewrite the settings file with only explicit values");
    println!("    reset                  Delete the settings file");
    println!("    resolve <PATH>         Print where a resource would be loaded from");
    println!("    language <NAME>        Set the interface language");
    println!("    bookmark <NAME> <URL>  Add a web bookmark");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Print help information");
    println!("    -V, --version    Print version information");
    println!();
    println!("ENVIRONMENT:");
    println!("    {}     Directory mounted as sdmc:", config::ROOT_ENV);
}

fn print_version() {
    println!("leafcfg {}", env!("CARGO_PKG_VERSION"));
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Some(first) = args.first() {
        match first.as_str() {
            "-h" | "--help" => {
                print_help();
                return Ok(());
            }
            "-V" | "--version" => {
                print_version();
                return Ok(());
            }
            _ => {}
        }
    }

    // Set up logging (optional, for debugging)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::new()?;
    config.ensure_dirs()?;
    let store = SettingsStore::new(config.explorer());

    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match args.as_slice() {
        [] | ["show"] => {
            // A broken file should not stop us from showing something useful
            let settings = store.load(&EnvLocale).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "falling back to default settings");
                Settings::defaults(&EnvLocale, &mut rand::thread_rng())
            });
            print_settings(&store, &settings);
        }
        ["save"] => {
            let settings = load_strict(&store)?;
            store.save(&settings).context("failed to save settings")?;
            tracing::info!(path = store.path(), "settings saved");
        }
        ["reset"] => {
            store.reset().context("failed to delete settings")?;
            tracing::info!(path = store.path(), "settings reset");
        }
        ["resolve", resource] => {
            let settings = load_strict(&store)?;
            println!("{}", store.resource_path(&settings, resource));
        }
        ["language", name] => {
            let Some(language) = Language::from_name(name) else {
                let names: Vec<_> = Language::all().iter().map(|l| l.as_str()).collect();
                bail!("unknown language '{name}', expected one of: {}", names.join(", "));
            };
            let mut settings = load_strict(&store)?;
            settings.set_language(language);
            store.save(&settings).context("failed to save settings")?;
            tracing::info!(%language, "language updated");
        }
        ["bookmark", name, url] => {
            let mut settings = load_strict(&store)?;
            if !settings.add_bookmark(*name, *url) {
                bail!("bookmark name and url must not be empty");
            }
            store.save(&settings).context("failed to save settings")?;
            tracing::info!(name, url, "bookmark added");
        }
        _ => {
            eprintln!("Unknown arguments: {}", args.join(" "));
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Load settings, refusing to continue if the file on disk is unreadable so
/// a later save cannot clobber it
fn load_strict(store: &SettingsStore<FsExplorer>) -> Result<Settings> {
    store
        .load(&EnvLocale)
        .with_context(|| format!("failed to load {}", store.path()))
}

fn print_settings(store: &SettingsStore<FsExplorer>, settings: &Settings) {
    let origin = |explicit: bool| if explicit { "" } else { " (default)" };

    println!("Settings file:     {}", store.path());
    println!(
        "Language:          {}{}",
        settings.language(),
        origin(settings.custom_language.is_some())
    );
    println!(
        "External RomFs:    {}",
        settings.external_romfs().unwrap_or("(built-in only)")
    );
    println!(
        "Menu item size:    {}{}",
        settings.menu_item_size(),
        origin(settings.custom_menu_item_size.is_some())
    );

    let scheme = settings.color_scheme();
    println!(
        "Color scheme:      background {} base {} focus {} text {}{}",
        scheme.background,
        scheme.base,
        scheme.base_focus,
        scheme.text,
        origin(settings.custom_scheme.is_some())
    );
    let show_color =
        |c: Option<color::Rgba>| c.map_or("(toolkit default)".to_string(), |c| c.to_hex());
    println!("Scrollbar color:   {}", show_color(settings.scrollbar_color));
    println!("Progress bar:      {}", show_color(settings.progress_bar_color));
    println!(
        "Ignore required firmware version: {}",
        settings.ignore_required_fw_version
    );

    println!("Bookmarks:         {}", settings.bookmarks.len());
    for bookmark in &settings.bookmarks {
        println!("    {} -> {}", bookmark.name, bookmark.url);
    }
}
