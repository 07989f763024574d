pub mod editing;
pub mod markup;
pub mod models;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::{autocomplete::*, collection::*, ConfirmationGate, NotificationSink, PreviewSink, Severity};
pub use markup::{BalanceReport, ParsedBlock};
pub use models::{block::*, preset::*, tag_name::*};
