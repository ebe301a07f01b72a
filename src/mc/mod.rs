pub mod estimators;
pub mod mc_engine;
pub mod payoffs;
pub mod sampler;
pub mod sweep;
