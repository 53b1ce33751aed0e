use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    config,
    server::start_api_server,
    types::{PkceToken, Session, Token, UserProfile},
    utils, warning,
};

use super::SpotifyClient;

/// Runs the OAuth 2.0 PKCE login against the Spotify accounts service.
///
/// 1. Generates the code verifier and its S256 challenge
/// 2. Starts the local callback server
/// 3. Opens the authorization URL in the browser
/// 4. Waits up to 60 seconds for the callback to deposit a token
/// 5. Resolves the user's profile and builds the [`Session`]
///
/// Persisting the session is left to the caller.
pub async fn auth(
    client: &SpotifyClient,
    shared_state: Arc<Mutex<Option<PkceToken>>>,
) -> Result<Session, String> {
    let client_id = config::spotify_client_id()?;

    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        if let Err(e) = start_api_server(server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    let auth_url = format!(
        "{spotify_auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&code_challenge={code_challenge}&code_challenge_method=S256&scope={scope}",
        spotify_auth_url = &config::spotify_apiauth_url(),
        client_id = client_id,
        redirect_uri = &config::spotify_redirect_uri(),
        code_challenge = code_challenge,
        scope = &config::spotify_scope().replace(' ', "%20")
    );

    // verifier must be in place before the browser can hit the callback
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier,
            token: None,
        });
    }

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_token(shared_state)
        .await
        .ok_or_else(|| "Authentication failed or timed out.".to_string())?;

    session_from_token(client, &token).await
}

async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(60);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(pkce_token) = lock.as_ref() {
            if let Some(token) = &pkce_token.token {
                return Some(token.clone());
            }
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Builds a session from a fresh token by looking up the `/me` profile.
pub async fn session_from_token(client: &SpotifyClient, token: &Token) -> Result<Session, String> {
    let mut session = Session {
        access_token: token.access_token.clone(),
        user_id: String::new(),
        name: String::new(),
        email: String::new(),
        image: None,
        expires_at: (token.obtained_at + token.expires_in) as i64,
    };

    let profile: UserProfile = client
        .get(&client.url("/me"), Some(&session))
        .await
        .map_err(|e| format!("Failed to load user profile: {}", e))?;

    session.name = profile.display_name.unwrap_or_else(|| profile.id.clone());
    session.user_id = profile.id;
    session.email = profile.email.unwrap_or_default();
    session.image = profile.images.into_iter().next().map(|i| i.url);

    Ok(session)
}

/// Exchanges the authorization code plus verifier for a token.
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Result<Token, String> {
    let client_id = config::spotify_client_id()?;
    let redirect_uri = config::spotify_redirect_uri();

    let client = Client::new();
    let res = client
        .post(config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri.as_str()),
        ])
        .send()
        .await
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map_err(|e| e.to_string())?;

    let json: Value = res.json().await.map_err(|e| e.to_string())?;
    token_from_json(&json, Utc::now().timestamp() as u64)
}

/// Reads a token response; `access_token` is the only mandatory field.
pub fn token_from_json(json: &Value, obtained_at: u64) -> Result<Token, String> {
    let access_token = json["access_token"]
        .as_str()
        .ok_or_else(|| "token response has no access_token".to_string())?;

    Ok(Token {
        access_token: access_token.to_string(),
        expires_in: json["expires_in"].as_u64().unwrap_or(3600),
        obtained_at,
    })
}
