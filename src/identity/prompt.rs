//! Interactive prompting for identity fields.

use dialoguer::Input;
use tracing::warn;

use super::{validate_email, validate_name};

/// Asks the user for missing identity fields.
///
/// This abstraction allows mocking the terminal in tests. `None` means the
/// user cancelled.
#[cfg_attr(test, mockall::automock)]
pub trait IdentityPrompter {
    fn prompt_name(&self) -> Option<String>;
    fn prompt_email(&self) -> Option<String>;
}

/// Prompter that reads from the terminal.
pub struct DialoguerPrompter;

impl IdentityPrompter for DialoguerPrompter {
    fn prompt_name(&self) -> Option<String> {
        let result = Input::<String>::new()
            .with_prompt("Please enter your name (Firstname Lastname)")
            .validate_with(|input: &String| validate_name(input))
            .interact_text();

        match result {
            Ok(name) => Some(name.trim().to_string()),
            Err(e) => {
                warn!("Name input was cancelled: {}", e);
                None
            }
        }
    }

    fn prompt_email(&self) -> Option<String> {
        let result = Input::<String>::new()
            .with_prompt("Please enter your email address")
            .validate_with(|input: &String| validate_email(input.trim()))
            .interact_text();

        match result {
            Ok(email) => Some(email.trim().to_string()),
            Err(e) => {
                warn!("Email address input was cancelled: {}", e);
                None
            }
        }
    }
}
