pub mod ball;
pub mod rack;
