//! Enhancement option toggles.

use super::Section;
use serde::{Deserialize, Serialize};

/// Named boolean toggles gating optional sections and constraint lines.
///
/// Missing keys on decode take the defaults below, so history entries and
/// config files written by older versions keep loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnhancementOptions {
    pub enforce_markdown: bool,
    pub no_conversational_filler: bool,
    pub add_file_tree_request: bool,
    pub include_verification_checklist: bool,
    pub include_risks_and_edge_cases: bool,
    pub include_alternatives: bool,
    pub include_validation_steps: bool,
    pub include_revert_plan: bool,
    pub prefer_section_aware_parsing: bool,
    pub include_search_verification_requirements: bool,
    pub strict_code_only: bool,
}

impl Default for EnhancementOptions {
    fn default() -> Self {
        Self {
            enforce_markdown: true,
            no_conversational_filler: true,
            add_file_tree_request: true,
            include_verification_checklist: true,
            include_risks_and_edge_cases: true,
            include_alternatives: true,
            include_validation_steps: true,
            include_revert_plan: true,
            prefer_section_aware_parsing: true,
            include_search_verification_requirements: false,
            strict_code_only: false,
        }
    }
}

impl EnhancementOptions {
    /// Whether a section is produced and rendered under these options.
    ///
    /// Only the six optional sections can be gated off.
    pub fn section_enabled(&self, section: Section) -> bool {
        match section {
            Section::FileTreeRequest => self.add_file_tree_request,
            Section::VerificationChecklist => self.include_verification_checklist,
            Section::RisksAndEdgeCases => self.include_risks_and_edge_cases,
            Section::Alternatives => self.include_alternatives,
            Section::ValidationSteps => self.include_validation_steps,
            Section::RevertPlan => self.include_revert_plan,
            _ => true,
        }
    }

    /// Set a toggle by its camelCase or kebab-case name.
    ///
    /// Returns `false` when the name is unknown.
    pub fn set(&mut self, name: &str, value: bool) -> bool {
        let key: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        let slot = match key.as_str() {
            "enforcemarkdown" => &mut self.enforce_markdown,
            "noconversationalfiller" => &mut self.no_conversational_filler,
            "addfiletreerequest" => &mut self.add_file_tree_request,
            "includeverificationchecklist" => &mut self.include_verification_checklist,
            "includerisksandedgecases" => &mut self.include_risks_and_edge_cases,
            "includealternatives" => &mut self.include_alternatives,
            "includevalidationsteps" => &mut self.include_validation_steps,
            "includerevertplan" => &mut self.include_revert_plan,
            "prefersectionawareparsing" => &mut self.prefer_section_aware_parsing,
            "includesearchverificationrequirements" => {
                &mut self.include_search_verification_requirements
            }
            "strictcodeonly" => &mut self.strict_code_only,
            _ => return false,
        };
        *slot = value;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let options = EnhancementOptions::default();
        assert!(options.enforce_markdown);
        assert!(options.no_conversational_filler);
        assert!(options.add_file_tree_request);
        assert!(options.include_revert_plan);
        assert!(options.prefer_section_aware_parsing);
        assert!(!options.include_search_verification_requirements);
        assert!(!options.strict_code_only);
    }

    #[test]
    fn missing_keys_take_defaults_on_decode() {
        let options: EnhancementOptions =
            serde_json::from_str(r#"{"strictCodeOnly":true,"includeAlternatives":false}"#)
                .unwrap();
        assert!(options.strict_code_only);
        assert!(!options.include_alternatives);
        assert!(options.enforce_markdown);
        assert!(options.include_validation_steps);
    }

    #[test]
    fn set_accepts_kebab_and_camel_names() {
        let mut options = EnhancementOptions::default();
        assert!(options.set("include-alternatives", false));
        assert!(options.set("strictCodeOnly", true));
        assert!(!options.set("nonsense", true));
        assert!(!options.include_alternatives);
        assert!(options.strict_code_only);
    }

    #[test]
    fn only_optional_sections_are_gated() {
        let options = EnhancementOptions {
            include_revert_plan: false,
            ..Default::default()
        };
        assert!(!options.section_enabled(Section::RevertPlan));
        assert!(options.section_enabled(Section::Constraints));
        assert!(options.section_enabled(Section::Assumptions));
    }
}
