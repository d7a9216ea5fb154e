pub mod arrivals;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod events;
pub mod models;
pub mod output;
pub mod queues;
pub mod state;
pub mod stats;
pub mod windows;
