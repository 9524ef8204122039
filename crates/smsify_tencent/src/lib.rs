// --- File: crates/smsify_tencent/src/lib.rs ---
// Declare modules within this crate
pub mod channel;
pub mod doc;
pub mod handlers;
pub mod logic;
#[cfg(test)]
mod logic_test;
pub mod routes;
pub mod transport;

pub use channel::{TencentSmsChannel, CHANNEL_TYPE};
pub use logic::TencentSmsService;
pub use routes::routes;
