pub mod client;
pub mod error;

pub use client::GroupsClient;
pub use error::ClientError;
