// ── Dashboard data model ──
//
// Plain value types decoded from backend responses. The client hands them
// to the caller and keeps nothing; a fresh response replaces the previous
// value wholesale.

pub mod app;
pub mod category;
pub mod config;

pub use app::{App, AppGroup, AppHealth, AppHealthcheck, AppSettings};
pub use category::{Category, Item};
pub use config::{Config, DEFAULT_NAME, Settings, Theme, ThemeColors};
