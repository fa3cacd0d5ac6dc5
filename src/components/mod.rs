pub mod app;
pub mod feed;
pub mod indicators;
pub mod viewer;
