//! Sign-in core shared by the Evently web and terminal clients.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![deny(warnings, clippy::pedantic)]
#![allow(clippy::multiple_crate_versions)]

pub mod auth;
pub mod config;
pub mod login;
pub mod models;
