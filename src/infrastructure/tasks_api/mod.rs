//! Remote task service client.

pub mod client;

pub use client::TasksApiClient;
