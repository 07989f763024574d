pub mod block;
pub mod preset;
pub mod tag_name;

pub use block::{Block, BlockId};
pub use preset::{Preset, PresetCategory, PresetTemplate, TextLookup, default_presets, preset_tags};
pub use tag_name::{InvalidTagName, TagName};
