use serde::{Deserialize, Serialize};

use crate::models::TagName;

/// Resolves symbolic text keys to display strings.
///
/// Label, description, and placeholder text for presets is looked up through
/// this seam so the presentation layer owns wording and localization. A
/// missing key resolves to the key itself, which keeps every caller total.
pub trait TextLookup {
    fn lookup(&self, key: &str) -> Option<&str>;

    fn text(&self, key: &str) -> String {
        self.lookup(key)
            .map(str::to_string)
            .unwrap_or_else(|| key.to_string())
    }
}

/// A selectable content template attached to a preset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetTemplate {
    pub label_key: String,
    pub value_key: String,
}

/// An externally defined, predefined tag name with display metadata.
/// Presets feed the autocomplete candidate pool and the add-block picker;
/// the core never requires them for correctness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub key: TagName,
    /// Short glyph shown next to the preset in pickers
    pub symbol: String,
    pub name_key: String,
    pub description_key: String,
    pub placeholder_key: String,
    #[serde(default)]
    pub templates: Vec<PresetTemplate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetCategory {
    pub title_key: String,
    pub presets: Vec<Preset>,
}

fn preset(key: &str, symbol: &str) -> Preset {
    Preset {
        key: TagName::new(key).expect("preset tag names match the tag grammar"),
        symbol: symbol.to_string(),
        name_key: format!("preset_{key}_name"),
        description_key: format!("preset_{key}_desc"),
        placeholder_key: format!("preset_{key}_placeholder"),
        templates: Vec::new(),
    }
}

fn preset_with_templates(key: &str, symbol: &str, template_count: usize) -> Preset {
    let mut built = preset(key, symbol);
    built.templates = (1..=template_count)
        .map(|index| PresetTemplate {
            label_key: format!("preset_{key}_template{index}_label"),
            value_key: format!("preset_{key}_template{index}_value"),
        })
        .collect();
    built
}

/// The built-in preset catalog, grouped the way pickers display it
pub fn default_presets() -> Vec<PresetCategory> {
    vec![
        PresetCategory {
            title_key: "category_basic".to_string(),
            presets: vec![
                preset("role", "@"),
                preset("instructions", "#"),
                preset("context", "i"),
                preset("examples", "*"),
                preset("document", "¶"),
                preset("data", "≡"),
                preset_with_templates("answer", "»", 1),
            ],
        },
        PresetCategory {
            title_key: "category_advanced".to_string(),
            presets: vec![
                preset_with_templates("thinking", "?", 2),
                preset("formatting", "✎"),
                preset("constraints", "!"),
                preset("output", "→"),
            ],
        },
    ]
}

/// Flatten a catalog into the tag names it contributes to the autocomplete
/// candidate pool
pub fn preset_tags(categories: &[PresetCategory]) -> Vec<TagName> {
    categories
        .iter()
        .flat_map(|category| category.presets.iter().map(|preset| preset.key.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::tag;

    #[test]
    fn test_default_catalog_covers_the_builtin_tags() {
        let tags = preset_tags(&default_presets());

        for expected in [
            "role",
            "instructions",
            "context",
            "examples",
            "document",
            "data",
            "answer",
            "thinking",
            "formatting",
            "constraints",
            "output",
        ] {
            assert!(tags.contains(&tag(expected)), "missing preset {expected}");
        }
    }

    #[test]
    fn test_catalog_tags_are_distinct() {
        let tags = preset_tags(&default_presets());
        let unique: std::collections::HashSet<_> = tags.iter().collect();
        assert_eq!(unique.len(), tags.len());
    }

    #[test]
    fn test_templates_only_where_defined() {
        let categories = default_presets();
        let all: Vec<&Preset> = categories.iter().flat_map(|c| c.presets.iter()).collect();

        let answer = all.iter().find(|p| p.key == tag("answer")).unwrap();
        assert_eq!(answer.templates.len(), 1);

        let thinking = all.iter().find(|p| p.key == tag("thinking")).unwrap();
        assert_eq!(thinking.templates.len(), 2);

        let role = all.iter().find(|p| p.key == tag("role")).unwrap();
        assert!(role.templates.is_empty());
    }

    #[test]
    fn test_text_lookup_falls_back_to_the_key() {
        struct Empty;
        impl TextLookup for Empty {
            fn lookup(&self, _key: &str) -> Option<&str> {
                None
            }
        }

        assert_eq!(Empty.text("preset_role_name"), "preset_role_name");
    }
}
