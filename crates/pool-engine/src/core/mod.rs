pub mod physics;
pub mod scene;
pub mod table;
pub mod time;
pub mod vector;
