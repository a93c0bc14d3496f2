pub mod app;
pub mod config;
pub mod constants;
pub mod display;
pub mod logger;
pub mod session;
pub mod settings;

pub use app::{build_app, App, AssistantRouter};
pub use session::{Session, TurnOutcome};
pub use settings::AppSettings;
