use regex::Regex;
use std::sync::OnceLock;

use crate::models::TagName;

/// Result of accepting an autocomplete candidate: the spliced content and the
/// caret position immediately after the inserted `>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub new_content: String,
    pub new_caret: usize,
}

/// Per-block autocomplete session over a single content editing pass.
///
/// The session is either inactive or holds the offset of the trigger `<`,
/// the candidate tag names matching the typed fragment, and the selected
/// index. Every transition is synchronous and driven by editing signals;
/// nothing here is persisted with the block's content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutocompleteState {
    session: Option<Session>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Session {
    trigger_offset: usize,
    candidates: Vec<TagName>,
    selected: usize,
}

fn trigger_pattern() -> &'static Regex {
    static TRIGGER: OnceLock<Regex> = OnceLock::new();
    TRIGGER.get_or_init(|| Regex::new(r"<([A-Za-z0-9_-]*)$").expect("Invalid trigger regex"))
}

impl AutocompleteState {
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Candidate tag names for the current session, empty when inactive
    pub fn candidates(&self) -> &[TagName] {
        self.session
            .as_ref()
            .map(|s| s.candidates.as_slice())
            .unwrap_or_default()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.session.as_ref().map(|s| s.selected)
    }

    pub fn selected(&self) -> Option<&TagName> {
        self.session.as_ref().map(|s| &s.candidates[s.selected])
    }

    /// Byte offset of the opening `<` that triggered the session
    pub fn trigger_offset(&self) -> Option<usize> {
        self.session.as_ref().map(|s| s.trigger_offset)
    }

    /// Re-evaluate the session after a content or caret change.
    ///
    /// The text immediately before the caret is scanned for a trailing
    /// `<fragment` with no intervening delimiter or whitespace. Candidates
    /// are every pool entry whose name starts with the fragment
    /// (case-insensitively), excluding the block's own tag. No trigger or no
    /// candidates deactivates the session; otherwise selection restarts at
    /// the first candidate.
    pub fn refresh(&mut self, content: &str, caret: usize, pool: &[TagName], own_tag: &TagName) {
        let caret = clamp_to_char_boundary(content, caret);
        let before_caret = &content[..caret];

        let Some(trigger) = trigger_pattern().find(before_caret) else {
            self.session = None;
            return;
        };

        // Skip the `<` itself; the rest of the match is the typed fragment
        let fragment = &before_caret[trigger.start() + 1..];
        let candidates: Vec<TagName> = pool
            .iter()
            .filter(|tag| *tag != own_tag && tag.starts_with_ignore_case(fragment))
            .cloned()
            .collect();

        if candidates.is_empty() {
            self.session = None;
            return;
        }

        self.session = Some(Session {
            trigger_offset: trigger.start(),
            candidates,
            selected: 0,
        });
    }

    /// Advance the selection forward, wrapping past the end
    pub fn next(&mut self) {
        if let Some(session) = &mut self.session {
            session.selected = (session.selected + 1) % session.candidates.len();
        }
    }

    /// Move the selection backward, wrapping past the start
    pub fn previous(&mut self) {
        if let Some(session) = &mut self.session {
            session.selected =
                (session.selected + session.candidates.len() - 1) % session.candidates.len();
        }
    }

    /// Explicit cancel or loss of focus
    pub fn cancel(&mut self) {
        self.session = None;
    }

    /// Accept the selected candidate, replacing the text from the trigger
    /// `<` to the caret with a fully-formed opening tag. Returns `None` when
    /// no session is active. The session always ends here.
    pub fn accept(&mut self, content: &str, caret: usize) -> Option<Completion> {
        let session = self.session.take()?;
        let caret = clamp_to_char_boundary(content, caret);
        let tag = &session.candidates[session.selected];

        let mut new_content =
            String::with_capacity(content.len() + tag.as_str().len() + 2);
        new_content.push_str(&content[..session.trigger_offset]);
        new_content.push('<');
        new_content.push_str(tag.as_str());
        new_content.push('>');
        let new_caret = new_content.len();
        new_content.push_str(&content[caret..]);

        Some(Completion {
            new_content,
            new_caret,
        })
    }
}

/// Clamp an offset into valid bounds and back onto a char boundary so that
/// slicing cannot panic on multi-byte content
fn clamp_to_char_boundary(content: &str, offset: usize) -> usize {
    let mut offset = offset.min(content.len());
    while offset > 0 && !content.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}
