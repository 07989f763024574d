/*!
 * # Editing Core Module
 *
 * The editing system is built around three pieces:
 *
 * ### 1. Single Source of Truth: the block sequence
 * - `BlockCollection` owns the ordered sequence of blocks; order is both
 *   display order and serialization order
 * - Every content-affecting mutation re-serializes the document and bumps a
 *   version counter, so callers can detect change without diffing
 * - The freshly serialized document is pushed to an optional `PreviewSink`
 *
 * ### 2. Collection-mediated mutation
 * - All edits flow through collection methods (`add_block`, `remove_block`,
 *   `reorder`, `clear`, `import_from`, `set_content`, autocomplete signals)
 * - Operations either fully apply or fully reject; there is no partial
 *   mutation and no operation suspends
 * - `remove_block` is an idempotent delete; `reorder` fails fast when the
 *   given ids are not a permutation of the current sequence
 *
 * ### 3. Per-block autocomplete sessions
 * - Each block owns an `AutocompleteState` re-evaluated on every content
 *   change against the pool of known tag names
 * - Navigation, acceptance, and cancellation are synchronous signals routed
 *   through the collection so accepted completions re-serialize the document
 *
 * The collaborator traits below are the seams to the presentation layer:
 * a preview consumer, a yes/no gate for destructive clears, and a
 * notification channel. The engine never talks to a terminal, the clipboard,
 * or the filesystem.
 */

pub mod autocomplete;
pub mod collection;

pub use autocomplete::{AutocompleteState, Completion};
pub use collection::{BlockCollection, ImportMode, ReorderError};

/// Severity channel for user-visible notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// Receives the re-serialized document after every applied mutation
pub trait PreviewSink {
    fn preview_updated(&mut self, markup: &str);
}

/// Yes/no gate consulted before a destructive clear of a non-empty sequence
pub trait ConfirmationGate {
    fn confirm_clear(&mut self) -> bool;
}

/// User-visible, non-fatal message channel for the presentation layer.
/// Failures reported here never corrupt collection state.
pub trait NotificationSink {
    fn notify(&mut self, severity: Severity, message: &str);
}
