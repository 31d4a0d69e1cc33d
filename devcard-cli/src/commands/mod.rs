//! CLI command implementations

pub mod prompt;
pub mod serve;
pub mod show;

pub use prompt::PromptArgs;
pub use serve::ServeArgs;
pub use show::ShowArgs;
