//! Pure, synchronous card-studio logic plus the thin per-target glue the
//! views depend on. Everything here is exercised by the studio and trends
//! views; nothing touches the DOM except `platform` and `motion::detect`.

pub mod availability;
pub mod config;
pub mod export;
pub mod history;
pub mod import;
pub mod motion;
pub mod palette;
pub mod platform;
pub mod preview;
pub mod settings;
pub mod timing;
