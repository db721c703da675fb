pub mod acquire;
pub mod events;
pub mod render;
