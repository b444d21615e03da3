//! Token command - acquires one MOT bearer token.

use anyhow::{Context as _, Result};
use clap::Args;

use platecheck_oauth::{ClientCredentialsCache, ClientCredentialsConfig, TokenSource};

use super::Context;

/// Arguments for the token command.
#[derive(Args, Debug)]
pub struct TokenArgs {
    /// Print the token itself
    #[arg(long)]
    pub show: bool,
}

/// Run the token command.
pub async fn run(args: TokenArgs, ctx: &Context) -> Result<()> {
    let resolved = ctx.load_config()?;
    let credentials = &resolved.credentials;

    let config = ClientCredentialsConfig::new(
        resolved
            .endpoints
            .token_url(credentials.mot_api_token_url.expose()),
        credentials.mot_api_client_id.expose(),
        credentials.mot_api_client_secret.expose(),
        resolved.endpoints.mot_scope.clone(),
    );
    let cache = ClientCredentialsCache::new(config);

    let token = cache
        .access_token()
        .await
        .context("Failed to acquire MOT bearer token")?;

    println!("Token acquired ({} characters)", token.len());
    if args.show {
        println!("{}", token);
    }

    Ok(())
}
