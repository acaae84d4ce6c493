//! Purchase Order Label Printing
//!
//! Submits purchase orders to SAP Document Information Extraction, waits for
//! the extraction job, renders the extracted fields as a ZPL shipping label
//! and converts it to PDF through the Labelary API.

pub mod app_state;
pub mod config;
pub mod models;
pub mod services;
