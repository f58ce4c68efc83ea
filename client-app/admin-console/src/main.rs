use std::sync::Arc;

use console_api::{ApiClient, Console, Navigation};
use console_core::services::{AccessGate, GateConfig, RouteTable};
use console_core::NavigationOutcome;
use console_security::{FileStorage, MemoryStorage, SessionStorage, SessionStore};
use console_shared::config::AppConfig;
use console_shared::utils::mask_token;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

mod commands;

use commands::Command;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize telemetry
    let _log_guard = console_shared::telemetry::init_telemetry(&config.logging);

    info!(env = %config.app.env, api = %config.api.base_url, "Admin console starting...");

    // Session storage
    let storage: Box<dyn SessionStorage> = match config.session.storage_path.as_deref() {
        Some(path) => match FileStorage::open(path) {
            Ok(storage) => Box::new(storage),
            Err(e) => {
                error!("Failed to open session storage at {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Box::new(MemoryStorage::new()),
    };
    let session = SessionStore::rehydrate(storage);

    let client = Arc::new(ApiClient::new(&config.api)?);
    let gate = AccessGate::new(GateConfig::from_app(&config.app, &config.routing));
    let mut console = Console::new(client, session, gate);

    if console.session().is_authenticated() {
        info!("Restored persisted session.");
    }
    println!("Type 'help' for the list of commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match commands::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(usage) => {
                println!("{}", usage);
                continue;
            }
        };

        match command {
            Command::Captcha => match console.captcha().await {
                Ok(captcha) if captcha.captcha_enabled => println!("captcha uuid: {}", captcha.uuid),
                Ok(_) => println!("captcha disabled"),
                Err(e) => println!("captcha failed: {}", e),
            },
            Command::Login(args) => match console.login(&args.form()).await {
                Ok(tree) if tree.fallback => println!("signed in; using built-in menus"),
                Ok(tree) => println!("signed in; {} top-level menus", tree.routes.len()),
                Err(e) => println!("login failed: {}", e),
            },
            Command::Logout => {
                console.logout().await;
                println!("signed out");
            }
            Command::Go { path } => print_navigation(&console.navigate(&path)),
            Command::Menus => println!("{}", serde_json::to_string_pretty(&console.menu_tree().routes)?),
            Command::Routes => {
                for route in RouteTable::builtin().routes() {
                    println!("{:<32} {:<12} {}", route.path, route.title, route.permissions.join(","));
                }
            }
            Command::Whoami => print_session(&console),
            Command::Quit => break,
        }
    }

    info!(signed_in = console.session().is_authenticated(), "Admin console exiting.");
    Ok(())
}

fn print_navigation(nav: &Navigation) {
    let title = nav.title.as_deref().unwrap_or("-");
    match &nav.outcome {
        NavigationOutcome::Allowed => {
            let view = nav.view.map(|v| v.component_path()).unwrap_or("(no view)");
            println!("{} [{}] -> {}", nav.path, title, view);
            for (name, value) in &nav.params {
                println!("  {} = {}", name, value);
            }
        }
        NavigationOutcome::Redirected { to } => println!("{} redirected to {}", nav.path, to),
        NavigationOutcome::Denied { notice } => println!("{} denied: {}", nav.path, notice),
    }
}

fn print_session(console: &Console) {
    let state = console.session().state();
    let Some(token) = state.token.as_deref() else {
        println!("not signed in");
        return;
    };
    let user = state
        .user
        .as_ref()
        .and_then(|u| u.user_name.clone())
        .unwrap_or_else(|| "(unknown)".into());
    println!("user: {}", user);
    println!("token: {}", mask_token(token));
    println!("roles: {}", join(&state.role_codes));
    println!("permissions: {}", join(&state.permission_codes));
}

fn join<'a>(codes: impl IntoIterator<Item = &'a String>) -> String {
    codes.into_iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}
