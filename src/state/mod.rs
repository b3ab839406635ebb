//! State management module
//!
//! Settings, the session record, the interval state machine driving them,
//! and the shared server state wrapping it.

pub mod settings;
pub mod session;
pub mod machine;
pub mod snapshot;
pub mod app_state;

// Re-export main types
pub use settings::Settings;
pub use session::{RunToken, Session, Stage, PREPARE_SECONDS};
pub use machine::IntervalStateMachine;
pub use snapshot::{Controls, Snapshot};
pub use app_state::AppState;
