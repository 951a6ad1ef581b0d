pub mod account;
pub mod config;
pub mod event;
pub mod note;
pub mod show;
pub mod sync;
pub mod topic;
