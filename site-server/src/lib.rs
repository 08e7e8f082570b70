//! Site Server - restaurant marketing website backend
//!
//! # Overview
//!
//! Serves the public site data (menu, gallery, reviews, settings) and the
//! admin back-office behind JWT auth, over an embedded SurrealDB store.
//!
//! - **Database** (`db`): embedded SurrealDB repositories
//! - **Auth** (`auth`): JWT + Argon2
//! - **Menu rules** (`menu`): special lifecycle, filtering, offer display
//! - **Events** (`events`): broadcast bus feeding the SSE stream
//! - **HTTP API** (`api`): RESTful routes
//!
//! # Module structure
//!
//! ```text
//! site-server/src/
//! ├── core/      # Configuration, state, server
//! ├── auth/      # JWT auth, middleware
//! ├── menu/      # Special-item lifecycle, offer display, menu filtering
//! ├── events/    # Sync event bus
//! ├── services/  # Image storage
//! ├── api/       # HTTP routes and handlers
//! ├── db/        # Database layer
//! └── utils/     # Errors, logging, validation, time
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod events;
pub mod menu;
pub mod services;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use events::{EventBus, SyncEvent};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger setup
pub use utils::logger::init_logger_with_file;

// Security logging macro - supports tracing format specifiers
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
   _____ _ __
  / ___/(_) /____
  \__ \/ / __/ _ \
 ___/ / / /_/  __/
/____/_/\__/\___/
   _____
  / ___/___  ______   _____  _____
  \__ \/ _ \/ ___/ | / / _ \/ ___/
 ___/ /  __/ /   | |/ /  __/ /
/____/\___/_/    |___/\___/_/
    "#
    );
}

/// Load .env, then initialize logging from the environment
pub fn setup_environment() -> anyhow::Result<()> {
    // Missing .env is fine; the environment may be set by the shell
    let _ = dotenv::dotenv();

    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(None, log_dir.as_deref());

    Ok(())
}
