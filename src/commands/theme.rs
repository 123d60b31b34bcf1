use crate::commands::CommandResult;
use crate::theme::tokens;

/// Prints the design tokens as a `theme.extend` document.
pub struct ThemeCommand;

impl ThemeCommand {
    pub fn execute(&self) -> CommandResult {
        println!("{}", serde_json::to_string_pretty(&tokens())?);
        Ok(())
    }
}
