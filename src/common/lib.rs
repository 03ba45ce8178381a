pub mod application;
pub mod camera;
pub mod colors;
pub mod config;
pub mod context;
pub mod controls;
pub mod debug;
pub mod import;
pub mod input;
pub mod light;
pub mod maths;
pub mod models;
pub mod renderer;
pub mod run;
pub mod scene;
pub mod texture;
