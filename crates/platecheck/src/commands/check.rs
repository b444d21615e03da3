//! Check-config command - validates configuration without starting a server.

use anyhow::Result;
use clap::Args;

use super::Context;

/// Arguments for the check-config command.
#[derive(Args, Debug)]
pub struct CheckArgs {}

/// Run the check-config command.
///
/// Fails with the missing setting when any credential is absent. Secret
/// values are never printed.
pub async fn run(_args: CheckArgs, ctx: &Context) -> Result<()> {
    let resolved = ctx.load_config()?;
    let credentials = &resolved.credentials;
    let endpoints = &resolved.endpoints;

    println!("Configuration OK");
    println!();
    println!("  bind                  {}", resolved.bind_address);
    println!("  mot_base_url          {}", endpoints.mot_base_url);
    println!("  dvla_base_url         {}", endpoints.dvla_base_url);
    println!("  token_authority       {}", endpoints.token_authority);
    println!("  mot_scope             {}", endpoints.mot_scope);
    println!("  validate_dvla_plates  {}", resolved.validate_dvla_plates);
    match resolved.upstream_timeout {
        Some(timeout) => println!("  upstream_timeout      {}s", timeout.as_secs()),
        None => println!("  upstream_timeout      client default"),
    }
    if !resolved.cors_origins.is_empty() {
        println!("  cors_origins          {}", resolved.cors_origins.join(", "));
    }
    println!();
    println!("  mot_api_key           {}", credentials.mot_api_key);
    println!("  mot_api_client_id     {}", credentials.mot_api_client_id);
    println!("  mot_api_client_secret {}", credentials.mot_api_client_secret);
    println!("  mot_api_token_url     {}", credentials.mot_api_token_url);
    println!("  dvla_api_key          {}", credentials.dvla_api_key);

    if ctx.verbose {
        println!();
        println!(
            "  token endpoint        {}",
            endpoints.token_url(credentials.mot_api_token_url.expose())
        );
    }

    Ok(())
}
