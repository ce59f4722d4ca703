//! # Bar POS Register Entry Point
//!
//! ```text
//! ┌──────────────┐  JSON line   ┌──────────────────────────────┐
//! │  Front end   │─────────────►│  barpos-register (stdin)     │
//! │              │◄─────────────│  commands → barpos-core      │
//! └──────────────┘  JSON line   │  export   → barpos-export    │
//!                   (stdout)    └──────────────────────────────┘
//! ```

fn main() -> std::io::Result<()> {
    barpos_register::run()
}
