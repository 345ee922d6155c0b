pub mod render;
pub mod view_state;
