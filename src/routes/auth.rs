use crate::auth::token::parse_bearer;
use crate::auth::{self, sessions};
use crate::errors::ServerError;
use crate::responses::{json_response, message_response, ResultResp};
use crate::router::{authorization, now_unix, read_json};
use crate::state::AppState;
use astra::Request;
use serde::Deserialize;
use tracing::info;

#[derive(Deserialize)]
struct SignupRequest {
    #[serde(default)]
    name: String,
    email: String,
    password: String,
}

#[derive(Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

/// POST /api/auth/signup
pub fn signup(req: &mut Request, state: &AppState) -> ResultResp {
    let body: SignupRequest = read_json(req)?;
    let now = now_unix();

    let session = state
        .db
        .with_conn(|conn| auth::signup(conn, &body.name, &body.email, &body.password, now))?;

    info!(user_id = session.user.id, "account created");
    json_response(201, &session)
}

/// POST /api/auth/login
pub fn login(req: &mut Request, state: &AppState) -> ResultResp {
    let body: LoginRequest = read_json(req)?;
    let now = now_unix();

    let session = state
        .db
        .with_conn(|conn| auth::login(conn, &body.email, &body.password, now))?;
    json_response(200, &session)
}

/// POST /api/auth/logout
pub fn logout(req: &Request, state: &AppState) -> ResultResp {
    let token = authorization(req)
        .and_then(parse_bearer)
        .ok_or_else(|| ServerError::Unauthorized("No token".into()))?;

    let revoked = state
        .db
        .with_conn(|conn| sessions::revoke_session(conn, token, now_unix()))?;
    if !revoked {
        return Err(ServerError::Unauthorized("Invalid token".into()));
    }
    message_response(200, "Logged out")
}

/// GET /api/auth/me
pub fn me(req: &Request, state: &AppState) -> ResultResp {
    let user = auth::authenticate(&state.db, authorization(req), now_unix())?;
    json_response(200, &user)
}
