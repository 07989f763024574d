//! Built-in English strings for preset metadata and picker labels.
//!
//! The engine resolves display text through the `TextLookup` seam and falls
//! back to the raw key for anything missing here, so an incomplete table
//! degrades visibly instead of panicking.

use promptweave_engine::TextLookup;

pub struct EnglishText;

impl TextLookup for EnglishText {
    fn lookup(&self, key: &str) -> Option<&str> {
        let text = match key {
            "category_basic" => "Basic",
            "category_advanced" => "Advanced",

            "preset_role_name" => "Role",
            "preset_role_desc" => "Who the model should be",
            "preset_role_placeholder" => "You are a ...",

            "preset_instructions_name" => "Instructions",
            "preset_instructions_desc" => "Step-by-step instructions to follow",
            "preset_instructions_placeholder" => "1. Read the context\n2. ...",

            "preset_context_name" => "Context",
            "preset_context_desc" => "Background information for the task",
            "preset_context_placeholder" => "Relevant background goes here",

            "preset_examples_name" => "Examples",
            "preset_examples_desc" => "Sample inputs and outputs",
            "preset_examples_placeholder" => "Input: ...\nOutput: ...",

            "preset_document_name" => "Document",
            "preset_document_desc" => "A document the model should work from",
            "preset_document_placeholder" => "Paste the document text here",

            "preset_data_name" => "Data",
            "preset_data_desc" => "Structured data for the task",
            "preset_data_placeholder" => "Paste rows, records or tables here",

            "preset_answer_name" => "Answer",
            "preset_answer_desc" => "How the answer should be opened",
            "preset_answer_placeholder" => "Constrain the shape of the answer",
            "preset_answer_template1_label" => "Direct answer",
            "preset_answer_template1_value" => {
                "Answer directly and concisely. Do not restate the question."
            }

            "preset_thinking_name" => "Thinking",
            "preset_thinking_desc" => "Ask the model to reason before answering",
            "preset_thinking_placeholder" => "Describe how to reason about the task",
            "preset_thinking_template1_label" => "Step by step",
            "preset_thinking_template1_value" => {
                "Think through the problem step by step before giving your final answer."
            }
            "preset_thinking_template2_label" => "Pros and cons",
            "preset_thinking_template2_value" => {
                "List the arguments for and against each option before deciding."
            }

            "preset_formatting_name" => "Formatting",
            "preset_formatting_desc" => "Output formatting requirements",
            "preset_formatting_placeholder" => "e.g. Respond in markdown with headings",

            "preset_constraints_name" => "Constraints",
            "preset_constraints_desc" => "Hard limits the answer must respect",
            "preset_constraints_placeholder" => "e.g. No more than 200 words",

            "preset_output_name" => "Output",
            "preset_output_desc" => "The expected output of the task",
            "preset_output_placeholder" => "Describe the expected output",

            _ => return None,
        };
        Some(text)
    }
}
