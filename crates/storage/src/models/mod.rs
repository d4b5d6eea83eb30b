mod auth_token;
mod case;
mod case_file;
mod case_note;
mod contestant;
mod criteria;
mod event;
mod judge;
mod judge_comment;
mod score;
mod sub_event;
mod user;

pub use auth_token::AuthToken;
pub use case::{Case, CasePriority, CaseStatus};
pub use case_file::CaseFile;
pub use case_note::CaseNote;
pub use contestant::Contestant;
pub use criteria::Criteria;
pub use event::{Event, EventStatus};
pub use judge::{Judge, JudgeType};
pub use judge_comment::JudgeComment;
pub use score::Score;
pub use sub_event::SubEvent;
pub use user::User;
