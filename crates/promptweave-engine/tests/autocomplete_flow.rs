//! Full autocomplete editing session driven through the collection surface,
//! the way a front-end drives it from keystrokes.

use promptweave_engine::{
    Block, BlockCollection, BlockId, TagName, default_presets, preset_tags,
};

fn tag(name: &str) -> TagName {
    TagName::new(name).unwrap()
}

fn last_id(collection: &BlockCollection) -> BlockId {
    collection.blocks().last().map(Block::id).unwrap()
}

#[test]
fn typing_a_fragment_offers_known_tags_and_accept_completes_it() {
    let mut collection = BlockCollection::new();
    collection.add_block(tag("role"), "");
    collection.add_block(tag("output"), "");
    collection.add_block(tag("draft"), "");
    let draft = last_id(&collection);

    // User types "see <ro" one keystroke at a time
    let mut text = String::new();
    for ch in "see <ro".chars() {
        text.push(ch);
        collection.set_content(draft, &text, text.len(), &[]);
    }

    let block = collection.block(draft).unwrap();
    assert_eq!(block.autocomplete().candidates(), &[tag("role")]);

    assert!(collection.autocomplete_accept(draft));
    let block = collection.block(draft).unwrap();
    assert_eq!(block.content(), "see <role>");
    assert_eq!(block.caret(), "see <role>".len());
    assert!(!block.autocomplete().is_active());
}

#[test]
fn preset_tags_are_offered_even_when_unused() {
    let presets = preset_tags(&default_presets());
    let mut collection = BlockCollection::new();
    collection.add_block(tag("scratch"), "");
    let scratch = last_id(&collection);

    collection.set_content(scratch, "<inst", 5, &presets);

    let block = collection.block(scratch).unwrap();
    assert_eq!(block.autocomplete().candidates(), &[tag("instructions")]);
}

#[test]
fn navigation_wraps_and_acceptance_uses_the_selection() {
    let mut collection = BlockCollection::new();
    collection.add_block(tag("context"), "");
    collection.add_block(tag("constraints"), "");
    collection.add_block(tag("draft"), "");
    let draft = last_id(&collection);

    collection.set_content(draft, "<con", 4, &[]);
    let block = collection.block(draft).unwrap();
    assert_eq!(
        block.autocomplete().candidates(),
        &[tag("context"), tag("constraints")]
    );

    // Forward past the end wraps to the first candidate
    collection.autocomplete_next(draft);
    collection.autocomplete_next(draft);
    assert_eq!(
        collection.block(draft).unwrap().autocomplete().selected(),
        Some(&tag("context"))
    );

    // Backward from the first wraps to the last
    collection.autocomplete_previous(draft);
    assert!(collection.autocomplete_accept(draft));
    assert_eq!(
        collection.block(draft).unwrap().content(),
        "<constraints>"
    );
}

#[test]
fn editing_away_from_the_trigger_deactivates() {
    let mut collection = BlockCollection::new();
    collection.add_block(tag("role"), "");
    collection.add_block(tag("draft"), "");
    let draft = last_id(&collection);

    collection.set_content(draft, "<ro", 3, &[]);
    assert!(collection.block(draft).unwrap().autocomplete().is_active());

    // Typing a space breaks the trigger fragment
    collection.set_content(draft, "<ro ", 4, &[]);
    assert!(!collection.block(draft).unwrap().autocomplete().is_active());
}

#[test]
fn blur_style_cancel_discards_the_session_but_not_the_text() {
    let mut collection = BlockCollection::new();
    collection.add_block(tag("role"), "");
    collection.add_block(tag("draft"), "");
    let draft = last_id(&collection);

    collection.set_content(draft, "prefix <r", 9, &[]);
    collection.autocomplete_cancel(draft);

    let block = collection.block(draft).unwrap();
    assert!(!block.autocomplete().is_active());
    assert_eq!(block.content(), "prefix <r");

    // Accepting after the cancel is a no-op
    assert!(!collection.autocomplete_accept(draft));
    assert_eq!(collection.block(draft).unwrap().content(), "prefix <r");
}

#[test]
fn completed_reference_serializes_inside_the_block_content() {
    let mut collection = BlockCollection::new();
    collection.add_block(tag("instructions"), "");
    collection.add_block(tag("summary"), "");
    let summary = last_id(&collection);

    collection.set_content(summary, "follow <inst", 12, &[]);
    collection.autocomplete_accept(summary);
    let markup = collection.to_markup().to_string();

    assert!(markup.contains("<summary>\nfollow <instructions>\n</summary>"));
}
