use utoipa::OpenApi;

use crate::features;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::auth::handlers::register,
        features::auth::handlers::login,
        features::auth::handlers::logout,
        features::auth::handlers::profile,
        features::auth::handlers::verify_password,
        features::auth::handlers::judge_login,
        features::users::handlers::list_users,
        features::users::handlers::get_user,
        features::cases::handlers::list_cases,
        features::cases::handlers::get_case,
        features::cases::handlers::create_case,
        features::cases::handlers::update_case,
        features::cases::handlers::delete_case,
        features::notes::handlers::list_notes,
        features::notes::handlers::create_note,
        features::notes::handlers::update_note,
        features::notes::handlers::delete_note,
        features::files::handlers::list_files,
        features::files::handlers::upload_file,
        features::files::handlers::get_file,
        features::files::handlers::download_file,
        features::files::handlers::delete_file,
        features::events::handlers::list_events,
        features::events::handlers::get_event,
        features::events::handlers::create_event,
        features::events::handlers::update_event,
        features::events::handlers::delete_event,
        features::events::handlers::list_sub_events,
        features::subevents::handlers::list_owned_sub_events,
        features::subevents::handlers::get_sub_event,
        features::subevents::handlers::create_sub_event,
        features::subevents::handlers::update_sub_event,
        features::subevents::handlers::delete_sub_event,
        features::settings::handlers::get_settings,
        features::settings::handlers::save_settings,
        features::scoreboard::handlers::get_scoreboard,
        features::scores::handlers::get_judge_scores,
        features::scores::handlers::save_judge_scores,
    ),
    components(
        schemas(
            storage::dto::auth::RegisterRequest,
            storage::dto::auth::LoginRequest,
            storage::dto::auth::LoginResponse,
            storage::dto::auth::UserResponse,
            storage::dto::auth::VerifyPasswordRequest,
            storage::dto::auth::VerifyPasswordResponse,
            storage::dto::auth::JudgeLoginRequest,
            storage::dto::auth::JudgeLoginResponse,
            storage::dto::common::MessageResponse,
            storage::dto::common::PaginationMeta,
            storage::dto::case::CreateCaseRequest,
            storage::dto::case::UpdateCaseRequest,
            storage::dto::case::CaseResponse,
            storage::dto::case::CaseDetailResponse,
            storage::dto::case::CreateNoteRequest,
            storage::dto::case::CaseNoteResponse,
            storage::dto::case::CaseFileResponse,
            storage::dto::case::UploadFileForm,
            storage::dto::event::CreateEventRequest,
            storage::dto::event::UpdateEventRequest,
            storage::dto::event::EventResponse,
            storage::dto::event::EventDetailResponse,
            storage::dto::sub_event::CreateSubEventRequest,
            storage::dto::sub_event::UpdateSubEventRequest,
            storage::dto::sub_event::SubEventResponse,
            storage::dto::sub_event::SubEventWithEventResponse,
            storage::dto::settings::SaveSettingsRequest,
            storage::dto::settings::ContestantInput,
            storage::dto::settings::JudgeInput,
            storage::dto::settings::CriteriaInput,
            storage::dto::settings::SettingsResponse,
            storage::dto::settings::ContestantResponse,
            storage::dto::settings::JudgeResponse,
            storage::dto::settings::CriteriaResponse,
            storage::dto::scores::JudgeScoresResponse,
            storage::dto::scores::SaveScoresRequest,
            storage::dto::scores::SaveScoresResponse,
            storage::dto::scores::ScoreItemError,
            storage::dto::scoreboard::ScoreboardResponse,
            storage::dto::scoreboard::ScoreboardEntry,
            storage::models::CaseStatus,
            storage::models::CasePriority,
            storage::models::EventStatus,
            storage::models::JudgeType,
        )
    ),
    tags(
        (name = "auth", description = "Organizer accounts, tokens and judge code login"),
        (name = "users", description = "User directory"),
        (name = "cases", description = "Case tracking and case notes"),
        (name = "files", description = "Case attachments"),
        (name = "events", description = "Events owned by organizers"),
        (name = "subevents", description = "Judged segments of an event"),
        (name = "settings", description = "Contestants, judges and criteria of a sub-event"),
        (name = "scores", description = "Judge score sheets"),
        (name = "scoreboard", description = "Aggregated sub-event results"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("Token")
                        .build(),
                ),
            )
        }
    }
}
