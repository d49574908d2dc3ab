//! Section identifiers shared by the parser, builder and renderers.

use serde::{Deserialize, Serialize};

/// One semantic bucket of a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Goal,
    Context,
    Assumptions,
    FileTreeRequest,
    Constraints,
    Deliverables,
    ImplementationDetails,
    VerificationChecklist,
    RisksAndEdgeCases,
    Alternatives,
    ValidationSteps,
    RevertPlan,
}

impl Section {
    /// Every list-valued section, in canonical field order.
    pub const LISTS: [Section; 10] = [
        Section::Assumptions,
        Section::FileTreeRequest,
        Section::Constraints,
        Section::Deliverables,
        Section::ImplementationDetails,
        Section::VerificationChecklist,
        Section::RisksAndEdgeCases,
        Section::Alternatives,
        Section::ValidationSteps,
        Section::RevertPlan,
    ];

    /// Human heading used by the heading-style renderers.
    pub fn heading(self) -> &'static str {
        match self {
            Section::Goal => "Goal",
            Section::Context => "Context",
            Section::Assumptions => "Assumptions",
            Section::FileTreeRequest => "File Tree Request",
            Section::Constraints => "Constraints",
            Section::Deliverables => "Deliverables",
            Section::ImplementationDetails => "Implementation Details",
            Section::VerificationChecklist => "Verification Checklist",
            Section::RisksAndEdgeCases => "Risks and Edge Cases",
            Section::Alternatives => "Alternatives",
            Section::ValidationSteps => "Validation Steps",
            Section::RevertPlan => "Revert Plan",
        }
    }

    /// Goal, context, constraints and deliverables.
    ///
    /// Seeing any of these as a heading means the input is structured.
    pub fn is_core(self) -> bool {
        matches!(
            self,
            Section::Goal | Section::Context | Section::Constraints | Section::Deliverables
        )
    }

    pub fn is_list(self) -> bool {
        !matches!(self, Section::Goal | Section::Context)
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.heading())
    }
}
