//! Operator input.

use async_trait::async_trait;

use crate::{Credentials, Result};

/// Answers accepted as "yes", in English and Spanish.
const AFFIRMATIVE: &[&str] = &["y", "yes", "s", "si", "sí"];

/// Source of operator decisions.
///
/// The console implementation blocks on a terminal; tests script the
/// answers.
#[async_trait]
pub trait Prompter: Send + Sync {
    /// Ask for the login identifier and password.
    async fn credentials(&self) -> Result<Credentials>;

    /// Ask a yes/no question. Anything but an explicit yes is a no.
    async fn confirm(&self, question: &str) -> Result<bool>;
}

/// Returns true if a typed answer means "yes".
///
/// ```
/// use likesweep_core::traits::is_affirmative;
///
/// assert!(is_affirmative(" Yes\n"));
/// assert!(is_affirmative("SÍ"));
/// assert!(!is_affirmative(""));
/// ```
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    AFFIRMATIVE.contains(&answer.as_str())
}
