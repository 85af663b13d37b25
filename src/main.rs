//! Lobby client command line
//!
//! Fills the host or join form as if typed by a user, then submits it to the lobby API.

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lobby_client::config::{Config, LogFormat};
use lobby_client::forms::{join_schema, lobby_schema, Form, JoinField, LobbyField};
use lobby_client::models::{filter_lobbies, LobbyFilter};
use lobby_client::services::{DataService, HttpDataService};
use lobby_client::submit::{
    AddLobbyFlow, Flow, JoinFlow, SubmissionController, SubmissionOutcome, SubmitResult,
};
use lobby_client::view::{FormView, Router, SnackBar, ADD_LOBBY_BUTTON, JOIN_BUTTON};

#[derive(Parser, Debug)]
#[command(name = "lobby-client", about = "Host or join a card-game lobby")]
struct Cli {
    /// Base URL of the lobby API (overrides LOBBY_API_URL)
    #[arg(long, env = "LOBBY_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new lobby with the given name
    Host {
        #[arg(long)]
        name: String,
    },
    /// Join as a new player
    Join(JoinArgs),
    /// List lobbies, optionally only those whose name contains a filter
    Lobbies {
        #[arg(long)]
        name: Option<String>,
    },
}

#[derive(Args, Debug)]
struct JoinArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    age: String,
    #[arg(long, default_value = "")]
    company: String,
    #[arg(long)]
    email: String,
    #[arg(long, default_value = "player")]
    role: String,
    /// One per card; five are needed
    #[arg(long = "card")]
    cards: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_env();
    if let Some(url) = &cli.api_url {
        config = config.with_api_url(url);
    }

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry().with(env_filter);
    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    tracing::info!("Lobby API: {}", config.api_url);

    let http = HttpDataService::new(&config)?;

    match cli.command {
        Commands::Host { name } => {
            let mut form = Form::new(lobby_schema());
            form.set_value(LobbyField::LobbyName, name);
            form.mark_all_touched();
            submit(AddLobbyFlow, &form, ADD_LOBBY_BUTTON, "/host/new", Arc::new(http)).await
        }
        Commands::Join(args) => {
            let mut form = Form::new(join_schema());
            form.set_value(JoinField::Name, args.name);
            form.set_value(JoinField::Age, args.age);
            form.set_value(JoinField::Company, args.company);
            form.set_value(JoinField::Email, args.email);
            form.set_value(JoinField::Role, args.role);
            for (card, value) in JoinField::CARDS.into_iter().zip(args.cards) {
                form.set_value(card, value);
            }
            form.mark_all_touched();
            submit(JoinFlow, &form, JOIN_BUTTON, "/join", Arc::new(http)).await
        }
        Commands::Lobbies { name } => {
            let filter = LobbyFilter { lobby_name: name };
            let lobbies = http.get_lobbies(&LobbyFilter::default()).await?;
            for lobby in filter_lobbies(&lobbies, &filter) {
                println!("{}\t{}", lobby.id, lobby.lobby_name);
            }
            Ok(())
        }
    }
}

/// Submit a filled form and report what the user would have seen.
async fn submit<F: Flow>(
    flow: F,
    form: &Form<F::Field>,
    button: &'static str,
    start: &str,
    service: Arc<dyn DataService>,
) -> Result<(), Box<dyn std::error::Error>> {
    let view = FormView::render(form, button);
    if !view.submit.enabled {
        for error in &view.errors {
            eprintln!("{}: {}", error.test_id, error.message);
        }
        return Err("form is invalid, nothing was submitted".into());
    }

    let snack_bar = Arc::new(SnackBar::new());
    let router = Arc::new(Router::new(start));
    let controller = SubmissionController::new(flow, service, snack_bar.clone(), router.clone());

    let result = controller.submit(form).await;

    if let Some(notification) = snack_bar.current() {
        println!("{}", notification.text);
    }
    println!("Now at {}", router.current_path());

    match result {
        SubmitResult::Settled(SubmissionOutcome::Failure { status, .. }) => {
            Err(format!("submission failed with status {}", status).into())
        }
        _ => Ok(()),
    }
}
