//! Console prompts.

use async_trait::async_trait;
use dialoguer::{Input, Password};

use likesweep_core::{Credentials, Error, Prompter, Result, is_affirmative};

/// Reads answers from the terminal.
///
/// Each prompt runs on the blocking pool so the runtime can still react
/// to Ctrl+C while a prompt waits.
#[derive(Debug, Default)]
pub struct ConsolePrompter {
    identifier: Option<String>,
}

impl ConsolePrompter {
    /// A prompter that only asks for the password when `identifier` is given.
    pub fn new(identifier: Option<String>) -> Self {
        Self { identifier }
    }
}

#[async_trait]
impl Prompter for ConsolePrompter {
    async fn credentials(&self) -> Result<Credentials> {
        let preset = self.identifier.clone();
        blocking(move || {
            let identifier = match preset {
                Some(identifier) => identifier,
                None => Input::<String>::new()
                    .with_prompt("Bluesky handle (e.g. user.bsky.social)")
                    .interact_text()?,
            };
            let password = Password::new()
                .with_prompt("Password (an app password works too)")
                .interact()?;
            Ok(Credentials::new(identifier, password))
        })
        .await
    }

    async fn confirm(&self, question: &str) -> Result<bool> {
        let prompt = format!("{question} (y/N)");
        blocking(move || {
            let answer = Input::<String>::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()?;
            Ok(is_affirmative(&answer))
        })
        .await
    }
}

async fn blocking<T, F>(prompt: F) -> Result<T>
where
    F: FnOnce() -> dialoguer::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(prompt)
        .await
        .map_err(Error::prompt)?
        .map_err(Error::prompt)
}
