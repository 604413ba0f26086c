pub mod audio;
pub mod config;
pub mod direction;
pub mod events;
pub mod food;
pub mod game;
pub mod geometry;
pub mod input;
pub mod input_queue;
pub mod level;
pub mod renderer;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
