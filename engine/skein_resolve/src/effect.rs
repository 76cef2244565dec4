//! Effect and section resolution.

use std::sync::Arc;

use skein_ir::{EffectNode, SectionNode};
use skein_pattern::match_pattern;
use skein_syntax::{EffectCandidate, SectionCandidate};

use crate::session::ResolverSession;

impl ResolverSession<'_> {
    /// Resolve a line into an executable effect node.
    ///
    /// Same search structure as expression resolution, over the effect
    /// category, with no type system involved.
    pub fn resolve_effect(&mut self, text: &str) -> Option<EffectNode> {
        let recent = self.recent_effects.snapshot();
        for candidate in &recent {
            if let Some(effect) = self.try_match_effect(text, candidate) {
                self.recent_effects.promote(candidate);
                tracing::debug!(candidate = candidate.name(), "effect candidate matched");
                return Some(effect);
            }
        }
        let syntax = self.syntax;
        for candidate in syntax.effects() {
            if recent.iter().any(|seen| Arc::ptr_eq(seen, candidate)) {
                continue;
            }
            if let Some(effect) = self.try_match_effect(text, candidate) {
                self.recent_effects.promote(candidate);
                tracing::debug!(candidate = candidate.name(), "effect candidate matched");
                return Some(effect);
            }
        }
        None
    }

    fn try_match_effect(
        &mut self,
        text: &str,
        candidate: &Arc<EffectCandidate>,
    ) -> Option<EffectNode> {
        for (index, template) in candidate.patterns().iter().enumerate() {
            let Some(output) = match_pattern(template, text, self) else {
                continue;
            };
            let mut node = candidate.instantiate();
            if !node.init(output.operands, index, output.outcome) {
                self.report(format!(
                    "parsing of '{}' succeeded, but it couldn't be initialized",
                    candidate.name()
                ));
                continue;
            }
            return Some(node);
        }
        self.report(format!("can't understand the effect: '{text}'"));
        None
    }

    /// Resolve a line into the header node of a structured block.
    pub fn resolve_section(&mut self, text: &str) -> Option<SectionNode> {
        let recent = self.recent_sections.snapshot();
        for candidate in &recent {
            if let Some(section) = self.try_match_section(text, candidate) {
                self.recent_sections.promote(candidate);
                tracing::debug!(candidate = candidate.name(), "section candidate matched");
                return Some(section);
            }
        }
        let syntax = self.syntax;
        for candidate in syntax.sections() {
            if recent.iter().any(|seen| Arc::ptr_eq(seen, candidate)) {
                continue;
            }
            if let Some(section) = self.try_match_section(text, candidate) {
                self.recent_sections.promote(candidate);
                tracing::debug!(candidate = candidate.name(), "section candidate matched");
                return Some(section);
            }
        }
        None
    }

    fn try_match_section(
        &mut self,
        text: &str,
        candidate: &Arc<SectionCandidate>,
    ) -> Option<SectionNode> {
        for (index, template) in candidate.patterns().iter().enumerate() {
            let Some(output) = match_pattern(template, text, self) else {
                continue;
            };
            let mut node = candidate.instantiate();
            if !node.init(output.operands, index, output.outcome) {
                self.report(format!(
                    "parsing of '{}' succeeded, but it couldn't be initialized",
                    candidate.name()
                ));
                continue;
            }
            return Some(node);
        }
        self.report(format!("can't understand the section: '{text}'"));
        None
    }
}
