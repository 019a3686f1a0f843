use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio_nav::{MenuTree, NavigationShell, ShellGeometry, ShellOptions, normalize_route};
use folio_types::{DisplayPreferences, MenuEntry};
use folio_util::{ShellConfig, cache_file_path};
use tracing_subscriber::EnvFilter;

mod site;

/// Environment variable overriding the TUI log file location.
const LOG_PATH_ENV: &str = "FOLIO_LOG_PATH";

#[derive(Parser)]
#[command(name = "folio", version, about = "Browse a portfolio site in the terminal")]
struct Cli {
    /// Site bundle (YAML or JSON); defaults to FOLIO_SITE_PATH, then the embedded sample
    #[arg(long, global = true)]
    site: Option<PathBuf>,

    /// Route to open the shell on
    #[arg(long, default_value = "/")]
    route: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the site bundle and print the ordered menu
    Check,
    /// Print how a route resolves against the menu, as JSON
    Resolve {
        /// Absolute route, e.g. /work/resume
        path: String,
    },
    /// List the available themes
    Themes,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // No subcommand => TUI
    let Some(command) = cli.command else {
        init_file_tracing()?;
        let loaded = site::load(cli.site.as_deref()).context("loading site bundle")?;
        return folio_tui::run(Arc::new(loaded.content), Arc::new(loaded.tree), cli.route).await;
    };

    init_stderr_tracing();
    match command {
        Commands::Check => check(cli.site.as_deref()),
        Commands::Resolve { path } => resolve(cli.site.as_deref(), &path),
        Commands::Themes => {
            for definition in folio_tui::THEME_DEFINITIONS {
                println!("{:<10} {}", definition.id, definition.label);
            }
            Ok(())
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn init_stderr_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

/// The TUI owns the terminal, so its logs go to a file.
fn init_file_tracing() -> Result<()> {
    let path = cache_file_path(LOG_PATH_ENV, "folio.log");
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

fn check(site_path: Option<&Path>) -> Result<()> {
    let loaded = site::load(site_path)?;
    println!("{} ({})", loaded.content.profile.name, loaded.origin);
    print!("{}", render_tree(&loaded.tree));

    let missing: Vec<&str> = loaded
        .tree
        .iter()
        .filter(|entry| loaded.content.page_for(&entry.target).is_none())
        .map(|entry| entry.target.as_str())
        .collect();
    if !missing.is_empty() {
        tracing::warn!(routes = ?missing, "menu targets without a page");
    }
    Ok(())
}

fn render_tree(tree: &MenuTree) -> String {
    fn line(out: &mut String, entry: &MenuEntry, indent: usize) {
        out.push_str(&format!(
            "{:indent$}{:>3}  {:<14} {}\n",
            "",
            entry.order,
            entry.id,
            entry.target,
            indent = indent
        ));
    }

    let mut out = String::new();
    for section in tree.top_level() {
        line(&mut out, section, 0);
        for child in &section.children {
            line(&mut out, child, 4);
        }
    }
    out
}

fn resolve(site_path: Option<&Path>, path: &str) -> Result<()> {
    let loaded = site::load(site_path)?;
    let config = ShellConfig::load();
    let options = ShellOptions {
        policy: config.submenu_policy,
        geometry: ShellGeometry {
            wide_panel_columns: config.wide_panel_columns,
            narrow_panel_columns: config.narrow_panel_columns,
            breakpoint_columns: config.breakpoint_columns,
        },
    };
    let shell = NavigationShell::mount(
        Arc::new(loaded.tree),
        path,
        DisplayPreferences::default(),
        options,
    );
    let out = serde_json::json!({
        "route": normalize_route(path),
        "resolution": shell.resolution(),
        "state": shell.state(),
        "mode": shell.mode(),
        "panelWidthMode": shell.panel_width_mode(),
        "contentOffset": shell.content_offset(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
