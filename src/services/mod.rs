pub mod auth;
pub mod dox;
pub mod label;
pub mod labelary;
pub mod poller;
pub mod workflow;
