pub mod bounty;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod geometric;
pub mod odds;
pub mod report;
pub mod session;
pub mod spr;
pub mod tokens;
pub mod units;
