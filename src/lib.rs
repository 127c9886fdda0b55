pub mod advisor;
pub mod catalog;
pub mod config;
pub mod criteria;
pub mod money;
pub mod output;
