use std::fmt;
use uuid::Uuid;

use crate::editing::autocomplete::AutocompleteState;
use crate::markup;
use crate::models::TagName;

/// Unique identifier for a block, assigned at creation and never reused
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct BlockId(Uuid);

impl BlockId {
    pub(crate) fn fresh() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One named, user-edited section of the document being built.
///
/// A block owns its free-text content, the editing caret within that content,
/// and the transient autocomplete session driven by edits to it. The tag name
/// is fixed at creation; renaming is remove + add at the collection level.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    id: BlockId,
    tag_name: TagName,
    content: String,
    caret: usize,
    autocomplete: AutocompleteState,
}

impl Block {
    pub(crate) fn new(tag_name: TagName, content: &str) -> Self {
        Self {
            id: BlockId::fresh(),
            tag_name,
            content: content.to_string(),
            caret: content.len(),
            autocomplete: AutocompleteState::default(),
        }
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn tag_name(&self) -> &TagName {
        &self.tag_name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Byte offset of the editing cursor within `content`
    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn autocomplete(&self) -> &AutocompleteState {
        &self.autocomplete
    }

    pub(crate) fn autocomplete_mut(&mut self) -> &mut AutocompleteState {
        &mut self.autocomplete
    }

    /// The markup fragment for this block: `<tag></tag>` when the content
    /// trims to nothing, otherwise the content verbatim between tag lines.
    pub fn to_markup(&self) -> String {
        markup::block_fragment(&self.tag_name, &self.content)
    }

    pub(crate) fn set_content(&mut self, text: &str, caret: usize) {
        self.content = text.to_string();
        self.caret = caret.min(self.content.len());
    }

    /// Re-evaluate the autocomplete session against the current content,
    /// caret, and candidate pool. The block's own tag is excluded from the
    /// candidates it is offered.
    pub(crate) fn refresh_autocomplete(&mut self, pool: &[TagName]) {
        self.autocomplete
            .refresh(&self.content, self.caret, pool, &self.tag_name);
    }

    /// Apply the selected autocomplete candidate, splicing the completed
    /// opening tag over the trigger fragment and moving the caret past `>`.
    /// No-op returning `false` when no session is active.
    pub(crate) fn accept_autocomplete(&mut self) -> bool {
        match self.autocomplete.accept(&self.content, self.caret) {
            Some(completion) => {
                self.content = completion.new_content;
                self.caret = completion.new_caret;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::tag;

    #[test]
    fn test_fresh_blocks_get_distinct_ids() {
        let a = Block::new(tag("role"), "");
        let b = Block::new(tag("role"), "");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_new_block_caret_sits_at_end_of_content() {
        let block = Block::new(tag("context"), "some text");
        assert_eq!(block.caret(), "some text".len());
    }

    #[test]
    fn test_set_content_clamps_caret_to_length() {
        let mut block = Block::new(tag("context"), "");
        block.set_content("ab", 99);
        assert_eq!(block.caret(), 2);
    }

    #[test]
    fn test_empty_content_fragment_has_no_newlines() {
        let block = Block::new(tag("instructions"), "   \n  ");
        assert_eq!(block.to_markup(), "<instructions></instructions>");
    }

    #[test]
    fn test_content_fragment_keeps_content_verbatim() {
        let block = Block::new(tag("role"), "You are an assistant.");
        assert_eq!(
            block.to_markup(),
            "<role>\nYou are an assistant.\n</role>"
        );
    }

    #[test]
    fn test_accept_without_session_is_noop() {
        let mut block = Block::new(tag("role"), "text");
        assert!(!block.accept_autocomplete());
        assert_eq!(block.content(), "text");
    }
}
