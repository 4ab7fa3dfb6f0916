pub mod action;
pub mod config;
pub mod launcher;
pub mod replay;
