//! Keys command implementation: list key names of one section.

use anyhow::{Context, Result};
use confkit_config::Config;

use crate::error::CliError;
use crate::output::Output;

/// Run the keys command.
pub fn run(config: &dyn Config, section: &str) -> Result<Output> {
    let exists = config
        .section(section)
        .with_context(|| format!("Failed to read section '{section}'"))?
        .is_some();
    if !exists {
        return Err(CliError::SectionNotFound {
            section: section.to_string(),
        }
        .into());
    }
    Ok(Output::List(config.key_list(section)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::configs;

    #[test]
    fn test_keys_in_document_order() {
        for config in configs() {
            let out = run(config.as_ref(), "goconfig").unwrap();
            assert_eq!(
                out,
                Output::List(vec![
                    "hosts".to_string(),
                    "port".to_string(),
                    "debug".to_string(),
                ])
            );
        }
    }

    #[test]
    fn test_absent_section_is_not_found() {
        for config in configs() {
            assert!(run(config.as_ref(), "absent").is_err());
        }
    }
}
