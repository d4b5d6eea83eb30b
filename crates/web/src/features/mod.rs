pub mod auth;
pub mod cases;
pub mod events;
pub mod files;
pub mod notes;
pub mod scoreboard;
pub mod scores;
pub mod settings;
pub mod subevents;
pub mod users;
