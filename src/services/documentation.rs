use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the poker room backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::auth::player_login,
        crate::routes::auth::player_register,
        crate::routes::auth::staff_login,
        crate::routes::auth::me,
        crate::routes::players::list_players,
        crate::routes::players::get_player,
        crate::routes::players::get_player_by_card,
        crate::routes::players::checkin,
        crate::routes::players::checkout,
        crate::routes::games::list_games,
        crate::routes::games::create_game,
        crate::routes::games::update_game,
        crate::routes::games::deactivate_game,
        crate::routes::waitlist::overview,
        crate::routes::waitlist::for_game,
        crate::routes::waitlist::for_card,
        crate::routes::waitlist::join,
        crate::routes::waitlist::call_player,
        crate::routes::waitlist::seat_player,
        crate::routes::waitlist::remove_entry,
        crate::routes::tables::list_tables,
        crate::routes::tables::get_table,
        crate::routes::tables::open_table,
        crate::routes::tables::close_table,
        crate::routes::tables::seat_player,
        crate::routes::tables::vacate_seat,
        crate::routes::tournaments::list_tournaments,
        crate::routes::tournaments::get_tournament,
        crate::routes::tournaments::create_tournament,
        crate::routes::tournaments::register,
        crate::routes::flush::leaderboard,
        crate::routes::flush::jackpots,
        crate::routes::flush::award_suit,
        crate::routes::flush::reset,
        crate::routes::orders::list_orders,
        crate::routes::orders::create_order,
        crate::routes::orders::start_order,
        crate::routes::orders::complete_order,
        crate::routes::orders::cancel_order,
        crate::routes::points::leaderboard,
        crate::routes::points::top30,
        crate::routes::points::award_points,
        crate::routes::activity::list_activity,
        crate::routes::activity::export_csv,
        crate::routes::public::live_status,
        crate::routes::public::display_waitlist,
        crate::routes::public::display_flush,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::common::MessageResponse,
            crate::dto::auth::PlayerLoginRequest,
            crate::dto::auth::PlayerRegisterRequest,
            crate::dto::auth::StaffLoginRequest,
            crate::dto::auth::PlayerAuthResponse,
            crate::dto::auth::StaffAuthResponse,
            crate::dto::auth::PlayerProfile,
            crate::dto::auth::StaffProfile,
            crate::auth::Claims,
            crate::auth::TokenKind,
            crate::dto::player::PlayerSummary,
            crate::dto::player::CheckinResponse,
            crate::dto::player::CheckoutResponse,
            crate::dto::game::CashGameSummary,
            crate::dto::game::CreateGameRequest,
            crate::dto::game::UpdateGameRequest,
            crate::dto::waitlist::JoinWaitlistRequest,
            crate::dto::waitlist::JoinWaitlistResponse,
            crate::dto::waitlist::WaitlistEntrySummary,
            crate::dto::waitlist::WaitlistOverviewResponse,
            crate::dto::waitlist::CallPlayerResponse,
            crate::dto::waitlist::SeatFromWaitlistRequest,
            crate::dto::waitlist::SeatedFromWaitlistResponse,
            crate::dto::table::OpenTableRequest,
            crate::dto::table::SeatPlayerRequest,
            crate::dto::table::SeatSummary,
            crate::dto::table::TableSummary,
            crate::dto::tournament::CreateTournamentRequest,
            crate::dto::tournament::TournamentSummary,
            crate::dto::tournament::TournamentDetailResponse,
            crate::dto::tournament::RegisterRequest,
            crate::dto::tournament::RegisterResponse,
            crate::dto::tournament::RegistrationSummary,
            crate::dto::flush::FlushLeaderboardResponse,
            crate::dto::flush::FlushLeader,
            crate::dto::flush::JackpotsResponse,
            crate::dto::flush::JackpotSummary,
            crate::dto::flush::AwardSuitRequest,
            crate::dto::flush::AwardSuitResponse,
            crate::dto::order::CreateOrderRequest,
            crate::dto::order::CreateOrderResponse,
            crate::dto::order::OrderItemInput,
            crate::dto::order::OrderItemSummary,
            crate::dto::order::OrderSummary,
            crate::dto::points::LeaderboardResponse,
            crate::dto::points::LeaderboardEntry,
            crate::dto::points::Top30Response,
            crate::dto::points::AwardPointsRequest,
            crate::dto::points::AwardPointsResponse,
            crate::dto::activity::ActivitySummary,
            crate::dto::public::LiveStatusResponse,
            crate::dto::public::DisplayGameStatus,
            crate::dto::public::DisplayFlushLeader,
            crate::dto::public::DisplayFlushResponse,
            crate::dao::models::ActivityAction,
            crate::dao::models::FlushSession,
            crate::dao::models::OrderStatus,
            crate::dao::models::RegistrationStatus,
            crate::dao::models::StaffRole,
            crate::dao::models::Suit,
            crate::dao::models::TableStatus,
            crate::dao::models::WaitlistStatus,
        )
    ),
    tags(
        (name = "auth", description = "Login and registration"),
        (name = "players", description = "Player accounts and floor sessions"),
        (name = "games", description = "Cash-game catalog"),
        (name = "waitlist", description = "Per-game waitlists"),
        (name = "tables", description = "Tables and seats"),
        (name = "tournaments", description = "Tournament events and registration"),
        (name = "flush", description = "Flush jackpot promotion"),
        (name = "orders", description = "Food orders"),
        (name = "points", description = "Points and leaderboard"),
        (name = "activity", description = "Audit trail"),
        (name = "public", description = "Lobby and display aggregates"),
    )
)]
pub struct ApiDoc;
