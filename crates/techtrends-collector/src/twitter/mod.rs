//! Twitter/X post source.

mod client;
mod types;

pub use client::TwitterClient;
