//! Cloud Service Creator
//!
//! Guides a user through a fixed questionnaire describing a cloud network
//! service, generates a code bundle for it with a text generator, and runs
//! simulated deploy/modify/delete lifecycle checks against created services.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
