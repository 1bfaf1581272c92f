pub mod handlers;
pub mod html;
pub mod pages;
pub mod routes;
pub mod widgets;
