pub mod camera;
pub mod compute;
pub mod config;
pub mod entities;
pub mod game;
pub mod geometry;
pub mod input;
pub mod level;
pub mod physics;
pub mod render;
