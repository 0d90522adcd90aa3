pub mod client;
pub mod error;
pub mod models;
pub mod porkbun;

pub use client::DnsApiClient;
pub use error::ApiError;
pub use models::Record;
pub use porkbun::PorkbunClient;
