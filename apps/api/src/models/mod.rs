pub mod credential;
pub mod listing;
pub mod profile;
