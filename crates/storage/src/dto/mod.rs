pub mod auth;
pub mod case;
pub mod common;
pub mod event;
pub mod scoreboard;
pub mod scores;
pub mod settings;
pub mod sub_event;
