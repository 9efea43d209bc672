// HTTP Server modules
pub mod handlers;
pub mod models;
pub mod routes;

// Input escaping
pub mod security;

// LLM abstraction layer
pub mod llm;
