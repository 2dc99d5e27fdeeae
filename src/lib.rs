pub mod bias;
pub mod bot;
pub mod chatbot;
pub mod completion;
pub mod config;
pub mod data;
pub mod error;
pub mod groq;
pub mod query;
pub mod types;

pub use bot::run;
