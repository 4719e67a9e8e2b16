//! Account CLI commands: register, login, logout, whoami

use clap::Subcommand;

use crate::client::SpendwiseClient;
use crate::error::{ClientError, ClientResult};
use crate::models::{Credentials, NewUser};
use crate::session::AuthState;

use super::server_message;

/// Environment variable read instead of prompting for a password
pub const PASSWORD_ENV: &str = "SPENDWISE_PASSWORD";

/// Minimum password length accepted at sign-up
pub const MIN_PASSWORD_LEN: usize = 6;

/// Account subcommands
#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Create an account and sign in
    Register {
        /// Display name
        name: String,
        /// Email address
        email: String,
    },

    /// Sign in (password read from SPENDWISE_PASSWORD or prompted)
    Login {
        /// Email address
        email: String,
    },

    /// Forget the stored credential
    Logout,

    /// Show who is signed in
    Whoami,
}

/// Handle an account command
pub async fn handle_auth_command(client: &SpendwiseClient, cmd: AuthCommands) -> ClientResult<()> {
    let auth = client.auth();

    match cmd {
        AuthCommands::Register { name, email } => {
            let password = read_password("Password: ")?;
            if password.chars().count() < MIN_PASSWORD_LEN {
                return Err(ClientError::Validation(format!(
                    "Password must be at least {} characters",
                    MIN_PASSWORD_LEN
                )));
            }

            let user = NewUser::new(name, email, password);
            let response = auth.register(&user).await?;
            println!(
                "{}",
                server_message(&response).unwrap_or_else(|| "Account created.".to_string())
            );
            if auth.session().is_authenticated() {
                println!("Signed in as {}", user.name);
            } else {
                println!("Run 'spendwise login {}' to sign in.", user.email);
            }
        }

        AuthCommands::Login { email } => {
            let password = read_password("Password: ")?;
            let credentials = Credentials::new(email, password);
            let response = auth.login(&credentials).await?;

            if let Some(message) = server_message(&response) {
                println!("{}", message);
            }
            match auth.session().display_name() {
                Some(name) if auth.session().is_authenticated() => {
                    println!("Signed in as {}", name)
                }
                _ if auth.session().is_authenticated() => {
                    println!("Signed in as {}", credentials.email)
                }
                _ => println!("Login succeeded but no token was issued."),
            }
        }

        AuthCommands::Logout => {
            auth.logout()?;
            println!("Signed out.");
        }

        AuthCommands::Whoami => {
            let session = client.session();
            match session.state() {
                AuthState::Authenticated => {
                    let name = session
                        .display_name()
                        .unwrap_or_else(|| "unknown user".to_string());
                    println!("Signed in as {}", name);
                }
                AuthState::Unauthenticated => println!("Not signed in."),
            }
        }
    }

    Ok(())
}

/// Read a password from the environment, or prompt with hidden input
fn read_password(prompt: &str) -> ClientResult<String> {
    if let Ok(password) = std::env::var(PASSWORD_ENV) {
        return Ok(password);
    }
    rpassword::prompt_password(prompt)
        .map_err(|e| ClientError::Io(format!("Failed to read password: {}", e)))
}
