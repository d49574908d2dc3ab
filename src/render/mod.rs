//! Target renderers.
//!
//! Each layout is a pure function of the canonical prompt and the active
//! options. [`required_markers`] lists the wrappers or headings a layout
//! must emit, in order; the quality engine checks them with
//! [`validate_order`].

mod headings;
mod order;
mod tagged;


pub use headings::{SCAFFOLD, render_agentic, render_headings};
pub use order::{Marker, OrderViolation, OrderViolationKind, validate_order};
pub use tagged::{TAG_WRAPPERS, render_tagged};

use crate::prompt::{CanonicalPrompt, EnhancementOptions, Layout, PromptTarget, Section};

/// Heading-layout section order. Option-gated sections are skipped when off.
pub const HEADING_ORDER: [Section; 12] = [
    Section::Assumptions,
    Section::FileTreeRequest,
    Section::Goal,
    Section::Context,
    Section::Constraints,
    Section::Deliverables,
    Section::ImplementationDetails,
    Section::VerificationChecklist,
    Section::RisksAndEdgeCases,
    Section::Alternatives,
    Section::ValidationSteps,
    Section::RevertPlan,
];

/// Render the canonical prompt in the layout of `target`.
pub fn render(
    canonical: &CanonicalPrompt,
    options: &EnhancementOptions,
    target: PromptTarget,
) -> String {
    let text = match target.layout() {
        Layout::Tagged => render_tagged(canonical, options),
        Layout::Headings => render_headings(canonical, options),
        Layout::AgenticScaffold => render_agentic(canonical, options),
    };
    tracing::debug!(prompt_target = %target, bytes = text.len(), "rendered prompt");
    text
}

/// The markers `target` must emit, in required order.
pub fn required_markers(target: PromptTarget, options: &EnhancementOptions) -> Vec<Marker> {
    match target.layout() {
        Layout::Tagged => TAG_WRAPPERS.into_iter().map(Marker::Tag).collect(),
        Layout::Headings => heading_markers(options),
        Layout::AgenticScaffold => {
            let mut markers = heading_markers(options);
            markers.extend(SCAFFOLD.into_iter().map(|(title, _)| Marker::Heading(title)));
            markers
        }
    }
}

fn heading_markers(options: &EnhancementOptions) -> Vec<Marker> {
    HEADING_ORDER
        .iter()
        .filter(|section| options.section_enabled(**section))
        .map(|section| Marker::Heading(section.heading()))
        .collect()
}

/// Bullet prefix used for a list section's items.
fn item_prefix(section: Section, index: usize) -> String {
    match section {
        Section::VerificationChecklist => "- [ ] ".to_string(),
        Section::ValidationSteps => format!("{}. ", index + 1),
        _ => "- ".to_string(),
    }
}

/// Render the items of a list section, one per line.
fn push_items(out: &mut String, section: Section, items: &[String]) {
    for (index, item) in items.iter().enumerate() {
        out.push_str(&item_prefix(section, index));
        out.push_str(item);
        out.push('\n');
    }
}
