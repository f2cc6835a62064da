//! Infrastructure adapters: history, store query construction, HTTP,
//! telemetry.

pub mod error;
pub mod groq;
pub mod history;
pub mod http;
pub mod telemetry;
