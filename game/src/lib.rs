pub mod patterns;
pub mod rules;
pub mod settings;
