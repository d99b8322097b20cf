pub mod auth;
pub mod categories;
pub mod citizens;
pub mod complaints;
pub mod dashboard;
pub mod departments;
pub mod files;
pub mod grievances;
pub mod notifications;
pub mod officers;
pub mod statuses;
