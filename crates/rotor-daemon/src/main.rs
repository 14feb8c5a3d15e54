use std::net::SocketAddr;
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use rotor_core::config::DEFAULT_SIM_SLOTS;
use rotor_scheduler::{
    Panel, Reconciler, ScheduleController, SlotDriver, SwitchExecutor,
};
use rotor_store::Store;
use rotor_tasks::{TaskQueue, TaskRunner};

mod app;
mod driver;
mod http;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rotord=info,tower_http=debug".into()),
        )
        .init();

    // load config: explicit path > ROTOR_CONFIG env > ~/.rotor/rotor.toml
    let config_path = std::env::var("ROTOR_CONFIG").ok();
    let config = rotor_core::RotorConfig::load(config_path.as_deref()).unwrap_or_else(|e| {
        tracing::warn!("Config load failed ({}), using defaults", e);
        rotor_core::RotorConfig::default()
    });

    let bind = config.http.bind.clone();
    let port = config.http.port;

    // initialize SQLite database — single file for all subsystems
    let db_path = &config.database.path;
    ensure_parent_dir(db_path);
    info!(path = %db_path, "opening SQLite database");

    let db = rusqlite::Connection::open(db_path)?;
    db.execute_batch("PRAGMA journal_mode=WAL;")?;

    // run all schema migrations (idempotent)
    rotor_store::db::init_db(&db)?;
    rotor_tasks::db::init_db(&db)?;
    drop(db);
    info!("database migrations complete");

    // build subsystems — each gets its own connection for thread safety
    let store = Store::new(rusqlite::Connection::open(db_path)?)?;
    let tasks = TaskQueue::new(rusqlite::Connection::open(db_path)?)?;

    // platform driver — logging stub; slot count from config
    let sim_slots = config.platform.sim_slots.unwrap_or(DEFAULT_SIM_SLOTS);
    let slot_driver: Arc<dyn SlotDriver> = Arc::new(driver::LoggingDriver::new(sim_slots));
    info!(sim_slots, "platform driver ready");

    let controller = ScheduleController::new(store.clone(), tasks.clone());
    let panel = Panel::new(&store, slot_driver.slot_count())?;

    // Fired-task channel: TaskRunner → SwitchExecutor
    let (fired_tx, fired_rx) = tokio::sync::mpsc::channel(16);
    let runner = TaskRunner::new(tasks.clone(), fired_tx);
    let executor = SwitchExecutor::new(store.clone(), slot_driver, controller.clone());
    let reconciler = Reconciler::new(store.clone(), panel.clone());

    // Every cold start counts as a resume: a live task exists afterwards
    // whenever the persisted state says playing.
    controller.on_start(Utc::now().timestamp_millis())?;

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(runner.run(shutdown_rx.clone()));
    tokio::spawn(executor.run(fired_rx, shutdown_rx.clone()));
    tokio::spawn(reconciler.run(shutdown_rx));

    let state = Arc::new(app::AppState::new(config, controller, panel));
    let router = app::build_router(state);

    let addr: SocketAddr = format!("{}:{}", bind, port).parse()?;
    info!("rotor daemon listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;

    // signal background loops to stop
    let _ = shutdown_tx.send(true);
    Ok(())
}

fn ensure_parent_dir(path: &str) {
    if let Some(parent) = std::path::Path::new(path).parent() {
        let _ = std::fs::create_dir_all(parent);
    }
}
