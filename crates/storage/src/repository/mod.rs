pub mod case;
pub mod case_file;
pub mod case_note;
pub mod event;
pub mod score;
pub mod settings;
pub mod sub_event;
pub mod user;
