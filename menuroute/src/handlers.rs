use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use menuroute_core::access::RoutePermissionValidator;
use menuroute_core::component::ComponentLoader;
use menuroute_core::config::{CONFIG_FILE_NAME, MENU_FILE_NAME, MenuConfig};
use menuroute_core::iframe::IframeRouteManager;
use menuroute_core::path::validate_menu_paths;
use menuroute_core::processor::{AppMode, FixedMenuSource, MenuProcessor};
use menuroute_core::registry::RouteRegistry;
use menuroute_core::report::{ReportFormat, render_routes, render_violations};
use menuroute_core::router::MemoryRouter;
use menuroute_core::session::FileSessionStore;
use menuroute_core::transform::RouteTransformer;
use menuroute_core::validate::RouteValidator;
use menuroute_core::{MenuNode, RoleCode};
use menuroute_fetch::{ApiEnvelope, MenuClient};
use serde_json::Value;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

pub const DEFAULT_MENUS: &str = include_str!("../menus/default.json");

// Helper functions shared by the subcommands

/// Parse a menu document: either a bare array of menu nodes or a saved
/// backend response wrapped in `{code, msg, data}`.
pub fn parse_menu_document(content: &str) -> Result<Vec<MenuNode>> {
    let value: Value = serde_json::from_str(content).context("Menu file is not valid JSON")?;

    if value.is_array() {
        return serde_json::from_value(value).context("Menu file does not contain menu nodes");
    }

    if value.get("code").is_none() {
        bail!("Menu file must be a JSON array or a {{code, msg, data}} response");
    }

    let envelope: ApiEnvelope<Vec<MenuNode>> = serde_json::from_value(value)
        .context("Menu response does not match {code, msg, data}")?;
    if !envelope.is_success() {
        bail!(
            "Saved menu response carries error code {}: {}",
            envelope.code,
            envelope.msg
        );
    }
    Ok(envelope.data.unwrap_or_default())
}

/// Load a menu tree from a file on disk
pub fn load_menus_from_file(path: &Path) -> Result<Vec<MenuNode>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read menu file {}", path.display()))?;
    parse_menu_document(&content).with_context(|| format!("Invalid menu file {}", path.display()))
}

/// Split a comma-separated role list, dropping blanks and duplicates
pub fn parse_roles(raw: Option<&str>) -> Vec<RoleCode> {
    let mut roles: Vec<RoleCode> = Vec::new();
    for role in raw.unwrap_or_default().split(',').map(str::trim) {
        if !role.is_empty() && !roles.iter().any(|r| r == role) {
            roles.push(role.to_string());
        }
    }
    roles
}

/// Config file, then `MENUROUTE_*` environment, then command-line flags.
pub fn resolve_config(args: &ArgMatches) -> Result<MenuConfig> {
    let config_path = config_path(args);
    let mut config = MenuConfig::load(&config_path)
        .with_context(|| format!("Failed to load config {}", config_path.display()))?
        .with_env_overrides()?;

    if let Ok(Some(mode)) = args.try_get_one::<String>("mode") {
        config.mode = mode.parse()?;
    }
    if let Ok(Some(url)) = args.try_get_one::<Url>("url") {
        config.mode = AppMode::Backend;
        config.api_base_url = url.as_str().trim_end_matches('/').to_string();
    }
    if let Ok(Some(token)) = args.try_get_one::<String>("token") {
        config.access_token = Some(token.clone());
    }

    config.validate()?;
    Ok(config)
}

fn config_path(args: &ArgMatches) -> PathBuf {
    let raw = args
        .try_get_one::<String>("config")
        .ok()
        .flatten()
        .map(String::as_str)
        .unwrap_or("~/.config/menuroute/config.json");
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

/// Frontend mode reads the static menu from `menu_file`, the state
/// directory, or the bundled sample, in that order. Backend mode treats
/// `menu_file` as a saved response and otherwise calls the configured API.
pub async fn process_menus(
    config: &MenuConfig,
    menu_file: Option<&Path>,
    roles: &[RoleCode],
    show_progress: bool,
) -> Result<Vec<MenuNode>> {
    match (config.mode, menu_file) {
        (AppMode::Frontend, _) => {
            let menus = match menu_file {
                Some(path) => load_menus_from_file(path)?,
                None => default_menus(config)?,
            };
            Ok(MenuProcessor::frontend(menus).get_menu_list(roles).await?)
        }
        (AppMode::Backend, Some(path)) => {
            let source = FixedMenuSource(load_menus_from_file(path)?);
            Ok(MenuProcessor::new(AppMode::Backend, source)
                .get_menu_list(roles)
                .await?)
        }
        (AppMode::Backend, None) => {
            let mut client = MenuClient::with_timeout(&config.api_base_url, config.timeout_secs)?
                .with_menu_path(config.menu_endpoint.clone());
            if let Some(token) = &config.access_token {
                client = client.with_access_token(token.clone());
            }

            let spinner = fetch_spinner(show_progress, &config.api_base_url);
            let result = MenuProcessor::new(AppMode::Backend, client)
                .get_menu_list(roles)
                .await;
            spinner.finish_and_clear();

            result.with_context(|| format!("Failed to fetch menus from {}", config.api_base_url))
        }
    }
}

fn default_menus(config: &MenuConfig) -> Result<Vec<MenuNode>> {
    let saved = config.menu_file();
    if saved.exists() {
        debug!("Using menu file {}", saved.display());
        return load_menus_from_file(&saved);
    }
    parse_menu_document(DEFAULT_MENUS)
}

fn fetch_spinner(visible: bool, base_url: &str) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!("Fetching menus from {}", base_url));
    spinner
}

/// Register `menus` on a fresh in-memory router. Iframe entries met on the
/// way are recorded in `iframes`.
pub fn build_route_table(
    menus: &[MenuNode],
    iframes: Arc<IframeRouteManager>,
) -> Result<RouteRegistry<MemoryRouter>> {
    let transformer = RouteTransformer::new(ComponentLoader::new(), iframes);
    let mut registry = RouteRegistry::new(MemoryRouter::new(), transformer);
    registry.register(menus)?;
    Ok(registry)
}

/// Is `path` reachable for a user holding `roles`?
pub async fn check_path(menus: Vec<MenuNode>, roles: &[RoleCode], path: &str) -> Result<bool> {
    let visible = MenuProcessor::frontend(menus).get_menu_list(roles).await?;
    Ok(RoutePermissionValidator::from_menus(&visible).is_path_allowed(path))
}

/// Write the config and sample menu into `dir`. Existing files are left
/// alone unless `force` is set; returns the files written.
pub fn write_state_files(dir: &Path, force: bool) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create state directory {}", dir.display()))?;

    let mut written = Vec::new();

    let config_file = dir.join(CONFIG_FILE_NAME);
    if force || !config_file.exists() {
        let config = MenuConfig {
            state_dir: dir.display().to_string(),
            ..MenuConfig::default()
        };
        config.save(&config_file)?;
        written.push(config_file);
    }

    let menu_file = dir.join(MENU_FILE_NAME);
    if force || !menu_file.exists() {
        fs::write(&menu_file, DEFAULT_MENUS)
            .with_context(|| format!("Failed to write {}", menu_file.display()))?;
        written.push(menu_file);
    }

    Ok(written)
}

fn iframe_manager(config: &MenuConfig) -> Arc<IframeRouteManager> {
    let store = FileSessionStore::new(config.session_file());
    Arc::new(IframeRouteManager::new(Arc::new(store)))
}

fn print_divider() {
    println!("{}", "═".repeat(60).bright_blue().bold());
}

fn print_header(title: &str) {
    print_divider();
    println!("{}", format!("  {}", title).bright_white().bold());
    print_divider();
    println!();
}

fn print_prompt(msg: &str) -> Result<String> {
    print!("{} ", msg.bright_cyan().bold());
    io::stdout().flush()?;
    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    Ok(response.trim().to_lowercase())
}

fn print_menu_routes(iframes: &[MenuNode]) {
    for route in iframes {
        let title = route.meta.title.as_deref().unwrap_or("-");
        let link = route.meta.link.as_deref().unwrap_or("-");
        println!(
            "  {} {} {} {}",
            "•".cyan(),
            route.path.bright_white(),
            title.dimmed(),
            link.blue()
        );
    }
}

pub fn handle_init(args: &ArgMatches) -> Result<()> {
    let quiet = args.get_flag("quiet");
    let raw_dir = args
        .get_one::<String>("PATH")
        .map(String::as_str)
        .unwrap_or("~/.config/menuroute/");
    let force = args.get_flag("force");
    let state_dir = PathBuf::from(shellexpand::tilde(raw_dir).as_ref());

    if !quiet {
        print_header("MENUROUTE INITIALIZATION");
        println!(
            "{} Target: {}",
            "→".blue(),
            state_dir.display().to_string().bright_white()
        );
        println!();
    }

    let existing: Vec<PathBuf> = [CONFIG_FILE_NAME, MENU_FILE_NAME]
        .iter()
        .map(|name| state_dir.join(name))
        .filter(|path| path.exists())
        .collect();

    let mut overwrite = force;
    if !existing.is_empty() && !force && quiet {
        // Quiet runs never block on stdin
        info!(
            "{} state file(s) already exist, keeping them (pass --force to overwrite)",
            existing.len()
        );
    } else if !existing.is_empty() && !force {
        println!("{}", "⚠ WARNING".yellow().bold());
        println!("State files already exist:");
        for path in &existing {
            println!(
                "  {} {}",
                "•".yellow(),
                path.display().to_string().bright_white()
            );
        }
        println!();

        let response = print_prompt("Overwrite them? [y/N]:")?;
        println!();
        overwrite = response == "y" || response == "yes";
        if !overwrite {
            println!("{} Keeping existing files", "→".blue());
        }
    }

    let written = write_state_files(&state_dir, overwrite)?;

    if !quiet {
        for path in &written {
            println!(
                "{} Wrote {}",
                "✓".green().bold(),
                path.display().to_string().bright_white()
            );
        }
        println!();
        print_divider();
        println!("{}", "  INITIALIZATION COMPLETE".green().bold());
        print_divider();
    }
    Ok(())
}

pub async fn handle_build(args: &ArgMatches) -> Result<()> {
    let quiet = args.get_flag("quiet");
    let config = resolve_config(args)?;
    let roles = parse_roles(args.get_one::<String>("roles").map(String::as_str));
    let menu_file = args.get_one::<PathBuf>("menu");
    let format: ReportFormat = args
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text")
        .parse()?;

    if !quiet {
        print_header("MENUROUTE BUILD");
        println!("{} Mode: {}", "→".blue(), config.mode.to_string().bright_white());
        if roles.is_empty() {
            println!("{} Roles: {}", "→".blue(), "(none)".dimmed());
        } else {
            println!("{} Roles: {}", "→".blue(), roles.join(", ").bright_white());
        }
        println!();
    }

    let menus = process_menus(&config, menu_file.map(PathBuf::as_path), &roles, !quiet).await?;

    let iframes = iframe_manager(&config);
    let registry = build_route_table(&menus, iframes.clone())?;
    iframes
        .save()
        .context("Failed to save iframe routes to the session store")?;

    let routes: Vec<_> = registry.router().dynamic_routes().collect();
    let report = render_routes(&routes, format)?;

    if let Some(output) = args.get_one::<PathBuf>("output") {
        fs::write(output, &report)
            .with_context(|| format!("Failed to write report to {}", output.display()))?;
        if !quiet {
            println!(
                "{} Report saved to {}",
                "✓".green().bold(),
                output.display().to_string().bright_white()
            );
        }
    } else {
        print!("{}", report);
    }

    if !quiet {
        println!();
        println!(
            "{} Registered {} routes ({} iframe)",
            "✓".green().bold(),
            registry.registered_count().to_string().cyan(),
            iframes.len().to_string().cyan()
        );
    }
    Ok(())
}

pub fn handle_lint(args: &ArgMatches) -> Result<()> {
    let quiet = args.get_flag("quiet");
    let Some(menu_file) = args.get_one::<PathBuf>("menu") else {
        bail!("--menu is required");
    };
    let menus = load_menus_from_file(menu_file)?;

    let violations = validate_menu_paths(&menus);
    let structure = RouteValidator::new().validate(&menus);

    if violations.is_empty() && structure.valid {
        if !quiet {
            println!("{} No problems found", "✓".green().bold());
        }
        return Ok(());
    }

    if !violations.is_empty() {
        println!(
            "{} {} path problem(s)",
            "⚠".yellow().bold(),
            violations.len()
        );
        println!();
        print!("{}", render_violations(&violations));
    }

    for error in &structure.errors {
        println!("{} {}", "⚠".yellow().bold(), error);
    }
    Ok(())
}

pub async fn handle_check(args: &ArgMatches) -> Result<()> {
    let Some(menu_file) = args.get_one::<PathBuf>("menu") else {
        bail!("--menu is required");
    };
    let Some(path) = args.get_one::<String>("path") else {
        bail!("--path is required");
    };
    let roles = parse_roles(args.get_one::<String>("roles").map(String::as_str));

    let menus = load_menus_from_file(menu_file)?;
    if check_path(menus, &roles, path).await? {
        println!("{} {} is reachable", "✓".green().bold(), path.bright_white());
    } else {
        println!("{} {} is not reachable", "✗".red().bold(), path.bright_white());
    }
    Ok(())
}

pub fn handle_iframes_list(args: &ArgMatches) -> Result<()> {
    let config = resolve_config(args)?;
    let iframes = iframe_manager(&config);

    if iframes.load() == 0 {
        println!("{} No saved iframe routes", "→".blue());
        return Ok(());
    }

    print_menu_routes(&iframes.get_all());
    Ok(())
}

pub fn handle_iframes_find(args: &ArgMatches) -> Result<()> {
    let config = resolve_config(args)?;
    let Some(path) = args.get_one::<String>("path") else {
        bail!("--path is required");
    };

    let iframes = iframe_manager(&config);
    iframes.load();

    match iframes.find_by_path(path) {
        Some(route) => {
            println!("{}", serde_json::to_string_pretty(&route)?);
            Ok(())
        }
        None => bail!("No iframe route saved for {}", path),
    }
}

pub fn handle_iframes_clear(args: &ArgMatches) -> Result<()> {
    let config = resolve_config(args)?;
    let iframes = iframe_manager(&config);
    let count = iframes.load();

    iframes.clear();
    iframes.discard_saved()?;

    if !args.get_flag("quiet") {
        println!("{} Removed {} saved iframe routes", "✓".green().bold(), count);
    }
    Ok(())
}
