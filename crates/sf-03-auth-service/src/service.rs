//! HTTP surface of the auth service.
//!
//! | Route | Outcome | Status | Body |
//! |-------|---------|--------|------|
//! | `POST /signup` | registered | 200 | `{success:true}` |
//! | `POST /signup` | email taken | 400 | `{success:false}` |
//! | `POST /login` | match | 200 | `{success:true}` |
//! | `POST /login` | no match | 401 | `{success:false}` |
//! | either | body is not JSON | 400 | plain text |

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use shared_types::{CredentialPayload, CredentialResponse, LOGIN_PATH, SIGNUP_PATH};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::domain::{AuthConfig, AuthError, NewUser, StoreError};
use crate::ports::UserStore;

/// Auth service state
pub struct AuthService {
    config: AuthConfig,
    store: Arc<dyn UserStore>,
    shutdown_tx: watch::Sender<bool>,
}

impl AuthService {
    pub fn new(config: AuthConfig, store: Arc<dyn UserStore>) -> Result<Self, AuthError> {
        config.validate()?;
        let (shutdown_tx, _) = watch::channel(false);
        Ok(Self {
            config,
            store,
            shutdown_tx,
        })
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route(SIGNUP_PATH, post(signup))
            .route(LOGIN_PATH, post(login))
            .layer(DefaultBodyLimit::max(self.config.max_body_bytes))
            .with_state(Arc::clone(&self.store))
    }

    /// Bind the configured address and serve until shutdown.
    pub async fn start(&self) -> Result<(), AuthError> {
        let addr = self.config.addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| AuthError::Bind(format!("{}: {}", addr, e)))?;
        self.serve_with_listener(listener).await
    }

    /// Serve on an already-bound listener until shutdown.
    pub async fn serve_with_listener(&self, listener: TcpListener) -> Result<(), AuthError> {
        let addr = listener
            .local_addr()
            .map_err(|e| AuthError::Bind(e.to_string()))?;
        info!(addr = %addr, "Starting auth server");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(wait_for_shutdown(self.shutdown_tx.subscribe()))
            .await
            .map_err(|e| AuthError::Server(e.to_string()))?;

        info!("Auth server stopped");
        Ok(())
    }

    pub fn shutdown(&self) {
        self.shutdown_tx.send_replace(true);
    }
}

async fn wait_for_shutdown(mut rx: watch::Receiver<bool>) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            return;
        }
    }
}

fn verdict(status: StatusCode, response: CredentialResponse) -> Response {
    (status, Json(response)).into_response()
}

fn parse(body: &[u8]) -> Result<CredentialPayload, Response> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, "Rejecting malformed request body");
        (StatusCode::BAD_REQUEST, "Failed to parse request body\n").into_response()
    })
}

async fn signup(State(store): State<Arc<dyn UserStore>>, body: Bytes) -> Response {
    let payload = match parse(&body) {
        Ok(payload) => payload,
        Err(rejection) => return rejection,
    };

    match store.create(NewUser::from(payload)).await {
        Ok(user) => {
            info!(user_id = user.id, email = %user.email, "User registered");
            verdict(
                StatusCode::OK,
                CredentialResponse::success("User registered successfully"),
            )
        }
        Err(StoreError::AlreadyExists(email)) => {
            info!(email = %email, "Signup for existing user");
            verdict(
                StatusCode::BAD_REQUEST,
                CredentialResponse::failure("User already exists"),
            )
        }
    }
}

async fn login(State(store): State<Arc<dyn UserStore>>, body: Bytes) -> Response {
    let payload = match parse(&body) {
        Ok(payload) => payload,
        Err(rejection) => return rejection,
    };

    match store.find_match(&payload.email, &payload.password).await {
        Some(user) => {
            info!(user_id = user.id, "Login succeeded");
            verdict(StatusCode::OK, CredentialResponse::success("Login successful"))
        }
        None => {
            info!(email = %payload.email, "Login rejected");
            verdict(
                StatusCode::UNAUTHORIZED,
                CredentialResponse::failure("Invalid email or password"),
            )
        }
    }
}
