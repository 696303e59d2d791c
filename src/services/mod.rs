pub mod event_service;
pub mod profile_service;
