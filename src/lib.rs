pub mod column;
pub mod config;
pub mod cost;
pub mod error;
pub mod export;
pub mod features;
pub mod optimizer;
pub mod oracle;
pub mod safety;
// cmd and reports are binary modules, declared in main.rs.
