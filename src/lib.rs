pub mod autoscroll;
pub mod color;
pub mod config;
pub mod logging;
pub mod render;
pub mod script_input;
pub mod segments;
pub mod selection;
pub mod state;
pub mod store;
pub mod theme;
