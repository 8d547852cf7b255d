pub mod client;

pub use client::FlutterwaveClient;
