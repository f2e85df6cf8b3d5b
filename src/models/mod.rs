pub mod effect;
pub mod light;
pub mod outcome;
pub mod selector;
pub mod severity;
