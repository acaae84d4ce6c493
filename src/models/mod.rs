pub mod client;
pub mod extraction;
pub mod job;
pub mod label;
