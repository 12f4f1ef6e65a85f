mod backend;
mod common;
mod config;
mod storage;
mod ui;

use backend::{ApiClient, BackendWorker};
use clap::Parser;
use dotenvy::dotenv;
use tokio::sync::mpsc;
use ui::ChatApp;

#[derive(Parser)]
#[command(
    name = "mentor_chat",
    version,
    about = "Desktop chat client for an AI coding assistant"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// Override the backend base URL from the config file
    #[arg(long, value_name = "URL")]
    backend_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), eframe::Error> {
    dotenv().ok();
    // Khởi tạo Logger để debug
    env_logger::init();

    let cli = Cli::parse();
    let mut app_config = config::load_config(&cli.config);
    if let Some(url) = cli.backend_url {
        app_config.backend_url = url;
    }

    let session_id = load_session_id();

    // 1. Tạo các kênh giao tiếp (Channels)
    // UI -> Backend
    let (cmd_tx, cmd_rx) = mpsc::channel(100);
    // Backend -> UI
    let (event_tx, event_rx) = mpsc::channel(100);

    // 2. Khởi chạy Backend Worker (Chạy ngầm)
    let worker_config = app_config.clone();
    let worker_session = session_id.clone();
    tokio::spawn(async move {
        match ApiClient::new(&worker_config, worker_session) {
            Ok(api) => {
                let worker = BackendWorker::new(
                    api,
                    event_tx,
                    cmd_rx,
                    worker_config.refresh_interval(),
                );
                worker.run().await;
            }
            Err(err) => log::error!("Failed to build backend client: {err}"),
        }
    });

    // 3. Khởi chạy UI (Chạy trên Main Thread)
    let options = eframe::NativeOptions::default();
    let mut event_rx = Some(event_rx);

    eframe::run_native(
        "Coding Assistant",
        options,
        Box::new(move |cc| {
            let event_receiver = event_rx
                .take()
                .expect("ChatApp should only be initialized once");

            log::info!("Client started against {}", app_config.backend_url);

            Ok(Box::new(ChatApp::new(
                cc,
                session_id.clone(),
                cmd_tx.clone(),
                event_receiver,
            )))
        }),
    )
}

/// Load the persisted session token, or fall back to a throwaway token
/// for this run if local storage is unavailable.
fn load_session_id() -> String {
    if let Err(err) = storage::ensure_data_dir() {
        log::warn!("Failed to create data directory: {err}");
    }

    match storage::SessionStore::open_default() {
        Ok(store) => match store.load_or_create() {
            Ok(token) => return token,
            Err(err) => log::warn!("Failed to load session token: {err}"),
        },
        Err(err) => log::warn!("Failed to open session store: {err}"),
    }

    storage::generate_token()
}
