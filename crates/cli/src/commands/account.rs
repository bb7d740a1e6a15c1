//! Account management commands.

use super::{CliError, Context};

use foodiefinds_client::AppError;

/// Register a new member account.
#[allow(clippy::print_stdout)]
pub async fn register(
    email: &str,
    password: &str,
    name: &str,
    photo: Option<&str>,
) -> Result<(), CliError> {
    let context = Context::from_env()?;

    let identity = context
        .session
        .sign_up(email, password, None, name, photo)
        .await
        .map_err(AppError::from)?;

    println!("Registered {} as {}", identity.email, identity.display_name);
    Ok(())
}
