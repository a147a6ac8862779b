pub mod app;
pub mod cli;
pub mod error;
pub mod input;
pub mod jar;
pub mod store;
pub mod task;
pub mod theme;
pub mod ui;
pub mod view;
