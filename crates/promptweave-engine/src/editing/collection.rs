use std::collections::HashMap;
use std::fmt;

use crate::editing::{ConfirmationGate, PreviewSink};
use crate::markup;
use crate::models::{Block, BlockId, TagName};

/// How `import_from` merges parsed blocks into the existing sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    /// Drop the current sequence, then append all parsed blocks
    Replace,
    /// Append all parsed blocks after the current sequence
    Append,
}

/// The id list handed to `reorder` was not a permutation of the current
/// sequence. The collection is left unchanged when this is returned.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ReorderError {
    #[error("reorder list has {got} ids, collection has {expected} blocks")]
    LengthMismatch { expected: usize, got: usize },
    #[error("duplicate block id {0} in reorder list")]
    DuplicateId(BlockId),
    #[error("unknown block id {0} in reorder list")]
    UnknownId(BlockId),
}

/// Owner of the ordered block sequence and single source of truth for the
/// serialized document.
///
/// Ids are unique across the sequence at all times, and a block lives in
/// exactly one collection. Every mutation that changes content or order
/// re-serializes the cached document, increments the version counter, and
/// pushes the result to the attached preview sink, if any. Calls that end up
/// changing nothing (removing an absent id, a declined clear, an import with
/// no matches) leave the version untouched.
pub struct BlockCollection {
    blocks: Vec<Block>,
    version: u64,
    document: String,
    preview: Option<Box<dyn PreviewSink>>,
}

impl BlockCollection {
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            version: 0,
            document: String::new(),
            preview: None,
        }
    }

    /// A collection that pushes every re-serialized document to `sink`
    pub fn with_preview(sink: Box<dyn PreviewSink>) -> Self {
        let mut collection = Self::new();
        collection.preview = Some(sink);
        collection
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Version counter incremented on each applied mutation
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Blocks in sequence order
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id() == id)
    }

    /// The serialized document, kept current across mutations
    pub fn to_markup(&self) -> &str {
        &self.document
    }

    /// Create a block and append it to the end of the sequence
    pub fn add_block(&mut self, tag_name: TagName, content: &str) -> BlockId {
        let block = Block::new(tag_name, content);
        let id = block.id();
        self.blocks.push(block);
        self.touch();
        id
    }

    /// Remove the block with the given id. Idempotent: an absent id is a
    /// no-op returning `None`, not an error.
    pub fn remove_block(&mut self, id: BlockId) -> Option<Block> {
        let index = self.blocks.iter().position(|b| b.id() == id)?;
        let removed = self.blocks.remove(index);
        self.touch();
        Some(removed)
    }

    /// Reconcile the sequence to the order reported by an external reorder
    /// gesture. `new_order` must contain every current id exactly once;
    /// anything else fails fast with the collection unchanged.
    pub fn reorder(&mut self, new_order: &[BlockId]) -> Result<(), ReorderError> {
        if new_order.len() != self.blocks.len() {
            return Err(ReorderError::LengthMismatch {
                expected: self.blocks.len(),
                got: new_order.len(),
            });
        }

        let mut order_index: HashMap<BlockId, usize> = HashMap::with_capacity(new_order.len());
        for (position, id) in new_order.iter().enumerate() {
            if order_index.insert(*id, position).is_some() {
                return Err(ReorderError::DuplicateId(*id));
            }
            if self.block(*id).is_none() {
                return Err(ReorderError::UnknownId(*id));
            }
        }

        // Validated above: every block id appears in the map exactly once
        self.blocks.sort_by_key(|b| order_index[&b.id()]);
        self.touch();
        Ok(())
    }

    /// Empty the sequence.
    ///
    /// With `Some(gate)` and a non-empty sequence, the gate decides whether
    /// the clear proceeds; `None` clears unconditionally. Returns `true`
    /// when the collection is empty afterwards, `false` when the gate
    /// declined and the sequence is untouched.
    pub fn clear(&mut self, gate: Option<&mut dyn ConfirmationGate>) -> bool {
        if let Some(gate) = gate
            && !self.blocks.is_empty()
            && !gate.confirm_clear()
        {
            return false;
        }
        if self.blocks.is_empty() {
            return true;
        }
        self.blocks.clear();
        self.touch();
        true
    }

    /// Parse `markup_text` and merge the result per `mode`, returning the
    /// number of blocks imported. Zero matches is not an error: the result
    /// is 0 and the sequence is untouched in either mode, so garbage input
    /// never destroys existing work.
    pub fn import_from(&mut self, markup_text: &str, mode: ImportMode) -> usize {
        let parsed = markup::parse_blocks(markup_text);
        if parsed.is_empty() {
            return 0;
        }

        if mode == ImportMode::Replace {
            self.blocks.clear();
        }
        let count = parsed.len();
        for block in parsed {
            self.blocks.push(Block::new(block.tag_name, &block.content));
        }
        self.touch();
        count
    }

    /// Distinct tag names currently in the sequence, in first-use order
    pub fn used_tag_names(&self) -> Vec<TagName> {
        let mut names: Vec<TagName> = Vec::new();
        for block in &self.blocks {
            if !names.contains(block.tag_name()) {
                names.push(block.tag_name().clone());
            }
        }
        names
    }

    /// The autocomplete candidate pool: used tag names followed by any
    /// externally supplied extras (presets, configured tags), deduplicated.
    /// What goes in `extra_tags` is the caller's policy.
    pub fn candidate_pool(&self, extra_tags: &[TagName]) -> Vec<TagName> {
        let mut pool = self.used_tag_names();
        for tag in extra_tags {
            if !pool.contains(tag) {
                pool.push(tag.clone());
            }
        }
        pool
    }

    /// Replace a block's content and caret, re-evaluating its autocomplete
    /// session against the current candidate pool. `false` and no state
    /// change when the id is unknown.
    pub fn set_content(
        &mut self,
        id: BlockId,
        text: &str,
        caret: usize,
        extra_tags: &[TagName],
    ) -> bool {
        let pool = self.candidate_pool(extra_tags);
        let Some(block) = self.blocks.iter_mut().find(|b| b.id() == id) else {
            return false;
        };
        block.set_content(text, caret);
        block.refresh_autocomplete(&pool);
        self.touch();
        true
    }

    /// Advance the block's autocomplete selection; no-op when the id is
    /// unknown or no session is active
    pub fn autocomplete_next(&mut self, id: BlockId) {
        if let Some(block) = self.blocks.iter_mut().find(|b| b.id() == id) {
            block.autocomplete_mut().next();
        }
    }

    /// Move the block's autocomplete selection backward
    pub fn autocomplete_previous(&mut self, id: BlockId) {
        if let Some(block) = self.blocks.iter_mut().find(|b| b.id() == id) {
            block.autocomplete_mut().previous();
        }
    }

    /// Cancel the block's autocomplete session (explicit cancel or blur)
    pub fn autocomplete_cancel(&mut self, id: BlockId) {
        if let Some(block) = self.blocks.iter_mut().find(|b| b.id() == id) {
            block.autocomplete_mut().cancel();
        }
    }

    /// Accept the block's selected autocomplete candidate, splicing the
    /// completed opening tag into its content. Returns whether a completion
    /// was applied; `false` covers both an unknown id and an inactive
    /// session.
    pub fn autocomplete_accept(&mut self, id: BlockId) -> bool {
        let Some(block) = self.blocks.iter_mut().find(|b| b.id() == id) else {
            return false;
        };
        if !block.accept_autocomplete() {
            return false;
        }
        self.touch();
        true
    }

    /// Re-serialize the document, bump the version, and push to the preview
    /// sink. Called after every applied mutation.
    fn touch(&mut self) {
        self.document = markup::render_document(self.blocks.iter());
        self.version += 1;
        if let Some(sink) = &mut self.preview {
            sink.preview_updated(&self.document);
        }
    }
}

impl Default for BlockCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BlockCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockCollection")
            .field("blocks", &self.blocks)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}
