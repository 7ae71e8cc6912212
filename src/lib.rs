pub mod components;
pub mod config;
pub mod draw;
pub mod engine;
pub mod events;
pub mod info_panel;
pub mod layout;
pub mod loading;
pub mod render;
pub mod systems;
