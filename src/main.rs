use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use mbx_admin::api::{ApiClient, ApiFailure, ConsoleNotifier};
use mbx_admin::backoffice::BackOffice;
use mbx_admin::backoffice::model::{AssetUpdate, RewardStatus, TransactionStatus};
use mbx_admin::model::arg::{
    AdminsCommand, Args, AssetsCommand, Command, ConfigCommand, InviteCommand, ListArgs,
    NotificationsCommand, ProfileCommand, RewardsCommand, TransactionsCommand, UsersCommand,
};
use mbx_admin::model::config::Config;
use mbx_admin::session::{FileSessionStore, SessionEvent};
use mbx_admin::state::AppState;
use mbx_admin::views::{self, ListOptions, ViewResult};

/// Exit status when the session is missing or could not be renewed
const EXIT_LOGIN_REQUIRED: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| Config::default_config_path().to_string());
    let mut config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load config: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(session_path) = &args.session {
        config.session_path = session_path.into();
    }

    if let Command::Config(ConfigCommand::Init) = args.command {
        return match config.save() {
            Ok(()) => {
                println!("Configuration written to {}", config_path);
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!("{:#}", e);
                ExitCode::FAILURE
            }
        };
    }

    let store = Arc::new(FileSessionStore::new(&config.session_path));
    let client = match ApiClient::new(&config, store, Arc::new(ConsoleNotifier)) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to create API client: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!("Backend: {}", client.base_url());

    // Surface a lost session even when the command itself reports success
    let mut events = client.subscribe();
    let state = AppState::new(BackOffice::new(client));

    let result = run(args.command, state, &config).await;

    while let Ok(event) = events.try_recv() {
        tracing::debug!(?event, "Session event");
        if event == SessionEvent::LoginRequired {
            tracing::warn!("Session ended by the backend");
        }
    }

    match result {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            ExitCode::SUCCESS
        }
        Err(e) => match e.downcast_ref::<ApiFailure>() {
            Some(failure) if failure.requires_login() => {
                eprintln!("Session expired. Please login again.");
                ExitCode::from(EXIT_LOGIN_REQUIRED)
            }
            // Toasts already reported backend failures
            Some(failure) => {
                tracing::debug!("Request failed: {}", failure);
                ExitCode::FAILURE
            }
            None => {
                eprintln!("{:#}", e);
                ExitCode::FAILURE
            }
        },
    }
}

fn list_options(args: &ListArgs, config: &Config) -> ListOptions {
    let mut options = ListOptions::new(args.to_query(config.rows_per_page));
    options.export = args.export;
    options.export_dir = config.export_dir.clone();
    options
}

async fn run(command: Command, state: AppState, config: &Config) -> ViewResult {
    match command {
        Command::Login { email, password } => views::auth::login(&state, &email, &password).await,
        Command::Logout => views::auth::logout(state).await,
        Command::Dashboard => views::dashboard::show(&state).await,

        Command::Profile(cmd) => match cmd {
            ProfileCommand::Show => views::profile::show(&state).await,
            ProfileCommand::Update { name } => views::profile::update(&state, &name).await,
            ProfileCommand::Password { old, new, confirm } => {
                views::profile::change_password(&state, &old, &new, &confirm).await
            }
        },

        Command::Admins(cmd) => match cmd {
            AdminsCommand::List => views::admins::list(&state).await,
            AdminsCommand::Add { name, email, role } => {
                views::admins::add(&state, &name, &email, role).await
            }
            AdminsCommand::Update { id, name, role } => {
                views::admins::update(&state, &id, &name, role).await
            }
            AdminsCommand::Remove { id } => views::admins::remove(&state, &id).await,
        },

        Command::Users(cmd) => match cmd {
            UsersCommand::List(args) => {
                views::users::list(&state, &list_options(&args, config)).await
            }
            UsersCommand::Show { id } => views::users::show(&state, &id).await,
            UsersCommand::Delete { id } => views::users::delete(&state, &id).await,
        },

        Command::Transactions(cmd) => match cmd {
            TransactionsCommand::List(args) => {
                views::transactions::list(&state, &list_options(&args, config)).await
            }
            TransactionsCommand::Show { id } => views::transactions::show(&state, &id).await,
            TransactionsCommand::Approve { id } => {
                views::transactions::set_status(&state, &id, TransactionStatus::Successful).await
            }
            TransactionsCommand::Decline { id } => {
                views::transactions::set_status(&state, &id, TransactionStatus::Failed).await
            }
            TransactionsCommand::SetStatus { id, status } => {
                views::transactions::set_status(&state, &id, status).await
            }
        },

        Command::Rewards(cmd) => match cmd {
            RewardsCommand::List(args) => {
                views::rewards::list(&state, &list_options(&args, config)).await
            }
            RewardsCommand::Show { id } => views::rewards::show(&state, &id).await,
            RewardsCommand::Approve { id } => {
                views::rewards::set_status(&state, &id, RewardStatus::Successful).await
            }
            RewardsCommand::SetStatus { id, status } => {
                views::rewards::set_status(&state, &id, status).await
            }
        },

        Command::Revenue(args) => views::revenue::list(&state, &list_options(&args, config)).await,

        Command::Notifications(cmd) => match cmd {
            NotificationsCommand::List { page, limit } => {
                views::notifications::list(&state, page, limit.unwrap_or(config.rows_per_page))
                    .await
            }
            NotificationsCommand::Send { title, message } => {
                views::notifications::send(&state, &title, &message).await
            }
        },

        Command::Assets(cmd) => match cmd {
            AssetsCommand::List { search } => views::assets::list(&state, search.as_deref()).await,
            AssetsCommand::Add {
                crypto_id,
                name,
                symbol,
                image,
                rate,
                vip_rate,
                description,
                addresses,
            } => {
                let draft = views::assets::AssetDraft {
                    crypto_id,
                    name,
                    symbol,
                    image,
                    rate,
                    vip_rate,
                    description,
                    addresses,
                };
                views::assets::add(&state, draft).await
            }
            AssetsCommand::Update {
                id,
                rate,
                ngn_rate,
                active,
                addresses,
            } => {
                let update = AssetUpdate {
                    rate,
                    ngn_rate,
                    is_active: active,
                    platform_addresses: addresses,
                };
                views::assets::update(&state, &id, update).await
            }
            AssetsCommand::Remove { id } => views::assets::remove(&state, &id).await,
        },

        Command::Invite(cmd) => match cmd {
            InviteCommand::Inspect { link } => views::auth::inspect_invite(&state, &link).await,
            InviteCommand::Accept {
                link,
                password,
                confirm,
            } => views::auth::accept_invite(&state, &link, &password, &confirm).await,
            InviteCommand::Reject { link } => views::auth::reject_invite(&state, &link).await,
        },

        // Handled before the client is built
        Command::Config(ConfigCommand::Init) => Ok(String::new()),
    }
}
