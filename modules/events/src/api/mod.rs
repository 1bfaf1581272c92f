pub mod rest;
pub mod ui;
