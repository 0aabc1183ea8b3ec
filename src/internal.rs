pub mod auth;
pub mod card;
pub mod dispatcher;
pub mod download_url;
pub mod file_descriptor;
pub mod host;
pub mod states;
