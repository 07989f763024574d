//! Shared helpers for the unit test suites

use std::cell::RefCell;
use std::rc::Rc;

use crate::editing::{ConfirmationGate, PreviewSink};
use crate::models::TagName;

/// Build a known-good tag name, panicking on typos in test data
pub fn tag(name: &str) -> TagName {
    TagName::new(name).expect("test tag name should be valid")
}

pub fn tags(names: &[&str]) -> Vec<TagName> {
    names.iter().map(|name| tag(name)).collect()
}

/// Preview sink that records every pushed document for later assertions.
/// Clones share the same buffer, so a clone can be handed to the collection
/// while the test keeps the original to inspect.
#[derive(Clone, Default)]
pub struct SharedPreview(Rc<RefCell<Vec<String>>>);

impl SharedPreview {
    pub fn updates(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

impl PreviewSink for SharedPreview {
    fn preview_updated(&mut self, markup: &str) {
        self.0.borrow_mut().push(markup.to_string());
    }
}

/// Confirmation gate with a scripted answer and a call counter
pub struct ScriptedGate {
    answer: bool,
    pub asked: usize,
}

impl ScriptedGate {
    pub fn confirming() -> Self {
        Self {
            answer: true,
            asked: 0,
        }
    }

    pub fn declining() -> Self {
        Self {
            answer: false,
            asked: 0,
        }
    }
}

impl ConfirmationGate for ScriptedGate {
    fn confirm_clear(&mut self) -> bool {
        self.asked += 1;
        self.answer
    }
}
