//! # State Module
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │          ┌───────────────────────┐      ┌──────────────────────┐       │
//! │          │     SessionState      │      │     ConfigState      │       │
//! │          │                       │      │                      │       │
//! │          │  Arc<Mutex<PosState>> │      │  store_name          │       │
//! │          │  catalog, cart,       │      │  currency_symbol     │       │
//! │          │  ledger, selection    │      │  export_dir          │       │
//! │          └───────────────────────┘      └──────────────────────┘       │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • SessionState: one reducer step per lock                             │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::ConfigState;
pub use session::SessionState;
