// showcase: recent GitHub projects and a quote of the day, kept fresh in the background.

pub mod app;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod github;
pub mod quotes;
pub mod shutdown;
pub mod state;
pub mod ui;

pub use error::{Result, ShowcaseError};
