pub mod app;
pub mod avatar;
pub mod config;
pub mod constants;
pub mod conversation;
pub mod emotion;
pub mod gateway;
pub mod message;
pub mod persistence;
