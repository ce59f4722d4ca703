//! # Bar POS Register
//!
//! The register session: configuration, state and one command per user
//! action. All business rules live in `barpos-core`; file output lives in
//! `barpos-export`.
//!
//! ## Module Organization
//! ```text
//! barpos_register/
//! ├── lib.rs          ◄─── You are here (startup, logging)
//! ├── ipc.rs          ◄─── JSON request routing
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── session.rs  ◄─── Mutex-guarded PosState
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── catalog.rs  ◄─── Item listing and inventory editor
//! │   ├── cart.rs     ◄─── Cart manipulation
//! │   ├── sale.rs     ◄─── Checkout
//! │   ├── history.rs  ◄─── History, selection, export
//! │   └── config.rs   ◄─── Configuration retrieval
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod ipc;
pub mod state;

use std::io;

use barpos_core::PosState;
use tracing::info;
use tracing_subscriber::EnvFilter;

use state::{ConfigState, SessionState};

/// Everything a running register holds.
#[derive(Debug, Clone)]
pub struct Register {
    pub session: SessionState,
    pub config: ConfigState,
}

impl Register {
    /// Opens a session, seeding the catalog unless the config says not to.
    pub fn new(config: ConfigState) -> Self {
        let initial = if config.seed_catalog {
            PosState::seeded()
        } else {
            PosState::new()
        };

        info!(
            store = %config.store_name,
            items = initial.catalog().len(),
            export_dir = %config.export_dir.display(),
            "Register session opened"
        );

        Register {
            session: SessionState::new(initial),
            config,
        }
    }
}

/// Runs the register on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging (stderr, RUST_LOG or "info,barpos=debug")        │
/// │  2. Load ConfigState from BARPOS_* environment variables                │
/// │  3. Open the session (seeded catalog, empty cart and ledger)            │
/// │  4. Serve one JSON request per stdin line until EOF                     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> io::Result<()> {
    init_tracing();
    info!("Starting Bar POS register");

    let register = Register::new(ConfigState::from_env());

    let stdin = io::stdin();
    let stdout = io::stdout();
    ipc::serve(&register, stdin.lock(), stdout.lock())?;

    info!("Input closed, shutting down");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr; stdout carries replies.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=barpos=trace` - Show trace for barpos crates only
/// - Default: INFO, DEBUG for barpos crates
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,barpos=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
