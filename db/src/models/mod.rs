pub mod config;
pub mod counter;
pub mod queue;
pub mod topic;
pub mod user;
