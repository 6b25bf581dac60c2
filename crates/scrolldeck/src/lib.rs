pub mod app;
pub mod banner;
pub mod cli;
pub mod commands;
pub mod config;
pub mod deck;
pub mod input;
pub mod loader;
pub mod logging;
pub mod modal;
pub mod nav;
pub mod particles;
pub mod render;
pub mod scroll;
pub mod theme;
pub mod view;
pub mod visibility;
pub mod watch;
pub mod widget;
