pub mod arcade;
pub mod legality;
pub mod predictor;
pub mod rng;
pub mod rules;
