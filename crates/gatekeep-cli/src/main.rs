//! Gatekeep CLI - drive the permission runtime from a shell.
//!
//! # Configuration
//!
//! Configuration is loaded from multiple sources with priority:
//!
//! 1. Environment variables (`GATEKEEP_*`)
//! 2. Explicit config file (`--config`)
//! 3. Project config (`.gatekeep/config.toml` in the project root)
//! 4. Global config (`~/.gatekeep/config.toml`)
//! 5. Built-in catalog, routes and accounts
//!
//! # Environment Variables
//!
//! - `GATEKEEP_APP_TITLE`: Application title appended to page titles
//! - `GATEKEEP_HOME_ROUTE`: Route name used when a signed-in user opens the login page
//! - `GATEKEEP_GUEST_FALLBACK`: Sign unknown usernames in as guests (`true`/`false`)
//!
//! # Examples
//!
//! ```text
//! gatekeep -u admin -p 123456 menu
//! gatekeep navigate /orders
//! gatekeep -u zoe -p x check user_view order_view --any
//! gatekeep -u zoe -p x check user_view --strict
//! gatekeep -u zoe -p x element product_edit --grant product_edit
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gatekeep_runtime::{
    ConfigLoader, ElementBinding, ElementState, GatekeepApp, GuardVerdict, NavigationHooks,
    PermissionCode, RequiredPermission,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Gatekeep CLI - permission-driven menu, navigation and element checks
#[derive(Parser, Debug)]
#[command(name = "gatekeep")]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Project root directory (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    project: Option<PathBuf>,

    /// Extra config file layered above the project config
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Sign in as this user before running the command
    #[arg(short, long, global = true)]
    user: Option<String>,

    /// Password for --user
    #[arg(short, long, global = true, requires = "user")]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the visible menu and its stats
    Menu,

    /// Run the navigation guard for a location
    Navigate {
        /// Target location, e.g. `/orders?page=2`
        location: String,

        /// Location being left
        #[arg(long)]
        from: Option<String>,
    },

    /// Check permission codes for the signed-in user
    Check {
        /// Codes to check
        #[arg(required = true)]
        codes: Vec<String>,

        /// Pass when any code is held instead of all
        #[arg(long)]
        any: bool,

        /// Exit with an error on denial
        #[arg(long)]
        strict: bool,
    },

    /// Attach an element bound to codes and print its state
    Element {
        /// Codes the element requires (all must be held)
        codes: Vec<String>,

        /// Remove the element on denial instead of hiding it
        #[arg(long)]
        remove: bool,

        /// Grant these codes, then run an update pass
        #[arg(long, value_name = "CODE")]
        grant: Vec<String>,
    },
}

/// Prints guard side effects to the terminal.
struct PrintHooks;

impl NavigationHooks for PrintHooks {
    fn set_page_title(&self, title: &str) {
        tracing::info!(title, "page title");
    }

    fn notify_denied(&self, message: &str) {
        println!("notice: {message}");
    }
}

fn init_tracing(args: &Args) {
    // Terminal filter: --debug > --verbose > RUST_LOG env > default "warn"
    let filter = if args.debug {
        EnvFilter::new("debug")
    } else if args.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_app(args: &Args) -> Result<GatekeepApp> {
    let project_root = match &args.project {
        Some(path) => path.clone(),
        None => std::env::current_dir().context("cannot determine current directory")?,
    };

    let mut loader = ConfigLoader::new().with_project_root(&project_root);
    if let Some(file) = &args.config {
        loader = loader.with_config_file(file);
    }

    let config = loader.load().context("config error")?;
    tracing::debug!(project = %project_root.display(), "config loaded");

    let app = GatekeepApp::builder(config)
        .with_hooks(Arc::new(PrintHooks))
        .build()
        .context("config error")?;

    if let Some(user) = &args.user {
        let password = args.password.as_deref().unwrap_or_default();
        app.signin()
            .login(user, password)
            .context("sign-in failed")?;
    }

    Ok(app)
}

fn codes(raw: &[String]) -> Vec<PermissionCode> {
    raw.iter().map(|c| PermissionCode::from(c.as_str())).collect()
}

fn print_verdict(verdict: &GuardVerdict) {
    match &verdict.location {
        Some(location) if !verdict.is_allowed() => println!("redirect {location}"),
        _ => match &verdict.title {
            Some(title) => println!("allow {} ({title})", verdict.target),
            None => println!("allow {}", verdict.target),
        },
    }
}

fn run(args: &Args) -> Result<()> {
    let app = load_app(args)?;

    match &args.command {
        Command::Menu => {
            let view = app.menu().view();
            for entry in &view.entries {
                println!("{}\t{}\t{}", entry.id, entry.title, entry.path);
            }
            println!("{}", view.stats);
        }
        Command::Navigate { location, from } => {
            let verdict = app.guard().check(location, from.as_deref());
            print_verdict(&verdict);
        }
        Command::Check {
            codes: raw,
            any,
            strict,
        } => {
            let codes = codes(raw);
            if *any {
                let allowed = app.query().has_any(&codes);
                anyhow::ensure!(allowed || !*strict, "none of the codes is held");
                println!("{}", if allowed { "allowed" } else { "denied" });
            } else {
                match app.query().require(&RequiredPermission::all(codes)) {
                    Ok(_) => println!("allowed"),
                    Err(denied) if *strict => return Err(denied).context("check failed"),
                    Err(denied) => println!("denied: {denied}"),
                }
            }
        }
        Command::Element {
            codes: raw,
            remove,
            grant,
        } => {
            let required = RequiredPermission::all(codes(raw));
            let binding = if *remove {
                ElementBinding::remove(required)
            } else {
                ElementBinding::hide(required)
            };

            let mut element = ElementState::new();
            app.visibility().on_attach(&mut element, &binding);
            println!("attach: {element}");

            if !grant.is_empty() {
                let granted = codes(grant);
                let updated = app.session().update_principal(|principal| {
                    granted
                        .iter()
                        .fold(principal.clone(), |p, code| p.with_permission(code.clone()))
                });
                if !updated {
                    tracing::warn!("no signed-in principal to grant to");
                }
                app.visibility().on_update(&mut element, &binding);
                println!("update: {element}");
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args);
    run(&args)
}
