//! Backend services

pub mod gamification;
