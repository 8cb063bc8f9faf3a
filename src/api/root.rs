use axum::Json;
use serde::Serialize;

pub const WELCOME_MESSAGE: &str = "Hello World! Welcome to the Axum + PostgreSQL API";

#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
}

pub async fn root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: WELCOME_MESSAGE,
    })
}
