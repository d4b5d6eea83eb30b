pub mod credentials;
pub mod judge_code;
pub mod score_input;
pub mod scoreboard;
pub mod settings_plan;
