pub mod api_info;
pub mod filters;
pub mod health;
pub mod home;
pub mod process;
pub mod processed;
pub mod stats;
