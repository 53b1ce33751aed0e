use std::sync::Arc;

use chrono::{DateTime, Local, Timelike};
use tokio::sync::Mutex;

use crate::{
    error, info, management::SessionManager, spotify, success, types::PkceToken, utils, warning,
};

use super::Context;

pub async fn auth(ctx: &Context) {
    let shared_state: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));

    let session = match spotify::auth::auth(&ctx.client, shared_state).await {
        Ok(session) => session,
        Err(e) => error!("Authentication failed. Err: {}", e),
    };

    let name = session.name.clone();
    if let Err(e) = SessionManager::new(session).persist().await {
        error!("Failed to save session: {}", e);
    }

    success!("Authentication successful! Signed in as {}", name);
}

pub async fn whoami(ctx: &Context) {
    let Some(session) = ctx.session() else {
        warning!("Not signed in or session expired. Run spotdeck auth.");
        return;
    };

    let now = Local::now();
    info!("Good {}, {}", utils::greeting(now.hour()), session.name);
    if !session.email.is_empty() {
        info!("Email: {}", session.email);
    }

    let expires = DateTime::from_timestamp(session.expires_at, 0)
        .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| session.expires_at.to_string());
    info!("Session valid until {}", expires);
}
