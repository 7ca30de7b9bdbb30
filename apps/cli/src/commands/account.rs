//! Remote sign-in and sign-out.

use tracing::{info, warn};

use fotogear_cloud::AuthClient;

use crate::app::remote_config;
use crate::config::AppConfig;
use crate::error::CliResult;
use crate::session::SessionFile;

/// Signs in with email and password and saves the session.
pub async fn login(config: &AppConfig, email: &str, password: &str) -> CliResult<()> {
    let client = AuthClient::new(remote_config(config)?)?;
    let session = client.sign_in_with_password(email, password).await?;

    let file = SessionFile::new(config.session_path());
    file.save(&session).await?;
    info!(path = %file.path().display(), "Session saved");

    println!(
        "Signed in as {}",
        session.email.as_deref().unwrap_or(&session.user_id)
    );
    Ok(())
}

/// Revokes the saved session (best effort) and forgets it.
pub async fn logout(config: &AppConfig) -> CliResult<()> {
    let file = SessionFile::new(config.session_path());

    if let Some(session) = file.load().await {
        match remote_config(config).and_then(|remote| Ok(AuthClient::new(remote)?)) {
            Ok(client) => {
                if let Err(e) = client.sign_out(&session).await {
                    warn!(error = %e, "Could not revoke session on the service");
                }
            }
            Err(e) => warn!(error = %e, "Remote settings missing, forgetting session locally"),
        }
    }

    if file.clear().await? {
        println!("Signed out");
    } else {
        println!("Not signed in");
    }
    Ok(())
}
