//! Dataset Assistant - Conversational analysis of tabular data
//!
//! This crate lets a user ask natural-language questions about a CSV file.
//! Each question is submitted as a run to a remote assistant service, polled
//! to completion, and the cleaned answer is recorded in the session transcript.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
