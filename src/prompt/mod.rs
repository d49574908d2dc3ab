//! Prompt data model shared by the forge pipeline.
//!
//! - [`ParsedPromptInput`]: raw buckets recovered by the parser, may be empty
//! - [`CanonicalPrompt`]: fully defaulted, deduplicated, target-agnostic model
//! - [`EnhancementOptions`]: toggles gating optional sections
//! - [`PromptTarget`]: the downstream layout to render for

mod options;
mod section;
mod target;

pub use options::EnhancementOptions;
pub use section::Section;
pub use target::{Layout, PromptTarget};

use serde::{Deserialize, Serialize};

macro_rules! prompt_lists {
    ($ty:ident) => {
        impl $ty {
            /// Borrow the list stored for a list-valued section.
            ///
            /// Goal and context are strings; asking for them yields an empty slice.
            pub fn list(&self, section: Section) -> &[String] {
                match section {
                    Section::Assumptions => &self.assumptions,
                    Section::FileTreeRequest => &self.file_tree_request,
                    Section::Constraints => &self.constraints,
                    Section::Deliverables => &self.deliverables,
                    Section::ImplementationDetails => &self.implementation_details,
                    Section::VerificationChecklist => &self.verification_checklist,
                    Section::RisksAndEdgeCases => &self.risks_and_edge_cases,
                    Section::Alternatives => &self.alternatives,
                    Section::ValidationSteps => &self.validation_steps,
                    Section::RevertPlan => &self.revert_plan,
                    Section::Goal | Section::Context => &[],
                }
            }

            /// Mutable access to a list-valued section.
            ///
            /// Returns `None` for goal and context.
            pub fn list_mut(&mut self, section: Section) -> Option<&mut Vec<String>> {
                Some(match section {
                    Section::Assumptions => &mut self.assumptions,
                    Section::FileTreeRequest => &mut self.file_tree_request,
                    Section::Constraints => &mut self.constraints,
                    Section::Deliverables => &mut self.deliverables,
                    Section::ImplementationDetails => &mut self.implementation_details,
                    Section::VerificationChecklist => &mut self.verification_checklist,
                    Section::RisksAndEdgeCases => &mut self.risks_and_edge_cases,
                    Section::Alternatives => &mut self.alternatives,
                    Section::ValidationSteps => &mut self.validation_steps,
                    Section::RevertPlan => &mut self.revert_plan,
                    Section::Goal | Section::Context => return None,
                })
            }
        }
    };
}

/// Buckets recovered from raw text before any defaulting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedPromptInput {
    pub goal: String,
    pub context: String,
    pub assumptions: Vec<String>,
    pub file_tree_request: Vec<String>,
    pub constraints: Vec<String>,
    pub deliverables: Vec<String>,
    pub implementation_details: Vec<String>,
    pub verification_checklist: Vec<String>,
    pub risks_and_edge_cases: Vec<String>,
    pub alternatives: Vec<String>,
    pub validation_steps: Vec<String>,
    pub revert_plan: Vec<String>,
}

/// The canonical, target-agnostic prompt model.
///
/// No list holds two entries that are equal after collapsing whitespace and
/// ignoring case; entries keep first-seen order. Sections switched off by
/// options are empty and are not rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalPrompt {
    pub goal: String,
    pub context: String,
    pub assumptions: Vec<String>,
    pub file_tree_request: Vec<String>,
    pub constraints: Vec<String>,
    pub deliverables: Vec<String>,
    pub implementation_details: Vec<String>,
    pub verification_checklist: Vec<String>,
    pub risks_and_edge_cases: Vec<String>,
    pub alternatives: Vec<String>,
    pub validation_steps: Vec<String>,
    pub revert_plan: Vec<String>,
}

prompt_lists!(ParsedPromptInput);
prompt_lists!(CanonicalPrompt);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_accessors_cover_every_list_section() {
        let mut parsed = ParsedPromptInput::default();
        for (i, section) in Section::LISTS.iter().enumerate() {
            parsed
                .list_mut(*section)
                .unwrap()
                .push(format!("item {}", i));
        }
        for (i, section) in Section::LISTS.iter().enumerate() {
            assert_eq!(parsed.list(*section), [format!("item {}", i)]);
        }
        assert!(parsed.list_mut(Section::Goal).is_none());
        assert!(parsed.list(Section::Context).is_empty());
    }

    #[test]
    fn canonical_serializes_camel_case() {
        let prompt = CanonicalPrompt {
            goal: "Ship it".to_string(),
            file_tree_request: vec!["Show the tree".to_string()],
            ..Default::default()
        };
        let json = serde_json::to_value(&prompt).unwrap();
        assert_eq!(json["goal"], "Ship it");
        assert_eq!(json["fileTreeRequest"][0], "Show the tree");
        assert!(json.get("risksAndEdgeCases").is_some());
    }
}
