//! HTTP route handlers

pub mod auth;
pub mod flashcards;
pub mod gamification;
pub mod users;
