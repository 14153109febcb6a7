//! Field validation CLI commands
//!
//! Checks a single value with the same rules the questionnaire applies.

use clap::Subcommand;

use crate::error::{AdvisorError, AdvisorResult};
use crate::questionnaire::validation::{
    is_valid_postcode, EMAIL_MESSAGE, PHONE_MESSAGE, POSTCODE_MESSAGE,
};
use crate::questionnaire::{EmailRule, PhoneRule};

/// Check subcommands
#[derive(Subcommand)]
pub enum CheckCommands {
    /// Validate an email address
    Email {
        value: String,
        /// Rule to apply (strict, basic)
        #[arg(short, long, default_value = "strict")]
        rule: String,
    },
    /// Validate a UK phone number
    Phone {
        value: String,
        /// Rule to apply (strict, basic)
        #[arg(short, long, default_value = "strict")]
        rule: String,
    },
    /// Validate a UK postcode
    Postcode { value: String },
}

fn invalid_rule(rule: &str) -> AdvisorError {
    AdvisorError::Validation(format!(
        "Invalid rule: '{}'. Valid rules: strict, basic",
        rule
    ))
}

/// Handle a check command; an invalid value is reported as an error
pub fn handle_check_command(cmd: CheckCommands) -> AdvisorResult<()> {
    let (value, valid, message) = match cmd {
        CheckCommands::Email { value, rule } => {
            let rule = EmailRule::parse(&rule).ok_or_else(|| invalid_rule(&rule))?;
            let valid = rule.is_valid(&value);
            (value, valid, EMAIL_MESSAGE)
        }
        CheckCommands::Phone { value, rule } => {
            let rule = PhoneRule::parse(&rule).ok_or_else(|| invalid_rule(&rule))?;
            let valid = rule.is_valid(&value);
            (value, valid, PHONE_MESSAGE)
        }
        CheckCommands::Postcode { value } => {
            let valid = is_valid_postcode(&value);
            (value, valid, POSTCODE_MESSAGE)
        }
    };

    if valid {
        println!("'{}' is valid", value);
        Ok(())
    } else {
        Err(AdvisorError::Validation(format!("'{}': {}", value, message)))
    }
}
