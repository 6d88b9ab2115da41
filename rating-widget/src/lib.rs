pub mod configuration;
pub mod document;
pub mod domain;
pub mod error;
pub mod host;
pub mod layout;
pub mod source;
pub mod telemetry;
pub mod tier;
pub mod widget;

pub use widget::{Widget, WidgetState};
