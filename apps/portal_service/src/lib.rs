pub mod app_module;
pub mod app_router;
pub mod assistant;
pub mod core;
pub mod forum;
pub mod health;
pub mod prompts;
pub mod services;
