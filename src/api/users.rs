//! User listing endpoints.

use axum::{extract::State, Json};

use crate::error::Result;
use crate::server::AppState;
use crate::users::User;

/// `GET /users`
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    let users = state.users.list_users().await?;
    Ok(Json(users))
}

/// `GET /users-test`
pub async fn list_test_users(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    let users = state.users.list_test_users().await?;
    Ok(Json(users))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use super::*;
    use crate::domain::users::fixtures::{sample_users, FixedUserStore};

    fn state(store: FixedUserStore) -> AppState {
        AppState::with_store(Arc::new(store))
    }

    fn ids(users: &[User]) -> Vec<i64> {
        users.iter().map(|u| u.id).collect()
    }

    #[tokio::test]
    async fn test_list_users_in_id_order() {
        let Json(users) = list_users(State(state(FixedUserStore::new(sample_users()))))
            .await
            .unwrap();
        assert_eq!(ids(&users), vec![1, 2, 5]);
        assert_eq!(users[0].name, "Alice");
    }

    #[tokio::test]
    async fn test_list_test_users_excludes_ids_above_three() {
        let Json(users) = list_test_users(State(state(FixedUserStore::new(sample_users()))))
            .await
            .unwrap();
        assert_eq!(ids(&users), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_empty_table_is_empty_list() {
        let Json(all) = list_users(State(state(FixedUserStore::new(vec![]))))
            .await
            .unwrap();
        let Json(some) = list_test_users(State(state(FixedUserStore::new(vec![]))))
            .await
            .unwrap();
        assert!(all.is_empty());
        assert!(some.is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_server_error() {
        let err = list_users(State(state(FixedUserStore::failing())))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
