//! # Commands Module
//!
//! One function per user action. Each takes only the state it needs.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── catalog.rs  ◄─── Item listing, search, inventory editor
//! ├── cart.rs     ◄─── Cart manipulation
//! ├── sale.rs     ◄─── Checkout
//! ├── history.rs  ◄─── Transaction history, selection, export
//! └── config.rs   ◄─── Configuration retrieval
//! ```
//!
//! ## State Injection
//! ```rust,ignore
//! // Only needs the session
//! fn add_to_cart(session: &SessionState, item_id: String)
//!
//! // Only needs config
//! fn get_config(config: &ConfigState)
//!
//! // Needs both
//! fn checkout(session: &SessionState, config: &ConfigState)
//! ```

pub mod cart;
pub mod catalog;
pub mod config;
pub mod history;
pub mod sale;
