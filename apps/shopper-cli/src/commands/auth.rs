//! Demo account commands.
//!
//! Auth failures are returned as errors carrying the store's message, e.g.
//! `User 'ana' already exists` or `Incorrect password`.

use ateliux_core::validation::{LoginInput, RegistrationInput};
use ateliux_store::{AuthStore, KeyValueStorage};

use super::AuthAction;

pub fn run<S: KeyValueStorage>(
    auth: &mut AuthStore<S>,
    action: AuthAction,
) -> anyhow::Result<String> {
    auth.hydrate();

    match action {
        AuthAction::Register {
            username,
            first_name,
            last_name,
            phone,
            password,
        } => {
            let session = auth.register(&RegistrationInput {
                username,
                first_name,
                last_name,
                phone,
                password,
            })?;
            Ok(format!(
                "Welcome, {}! Signed in as {}.",
                session.display_name(),
                session.username
            ))
        }
        AuthAction::Login { username, password } => {
            let session = auth.login(&LoginInput { username, password })?;
            Ok(format!("Signed in as {}.", session.username))
        }
        AuthAction::Logout => {
            auth.logout();
            Ok("Signed out.".to_string())
        }
        AuthAction::Whoami => Ok(match auth.session() {
            Some(session) => format!(
                "{} ({}, phone {})",
                session.username,
                session.display_name(),
                session.phone
            ),
            None => "Not signed in.".to_string(),
        }),
    }
}
