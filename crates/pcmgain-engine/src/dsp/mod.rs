pub mod effect;
pub mod gain;
