//! Browser client for recording class attendance: a professor signs in,
//! picks one of their groups and one of its sessions, and marks each
//! student present or absent.

pub mod app;
pub mod auth;
pub mod components;
pub mod config;
pub mod format;
pub mod pages;
pub mod services;
pub mod state;

pub use app::App;
