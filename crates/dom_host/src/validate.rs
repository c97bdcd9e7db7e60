use crate::ancestor::AncestorInfo;
use crate::nesting::{HtmlNestingRules, NestingAdvisory, NestingChild, NestingRules};
use std::collections::HashSet;

/// Nesting validation strategy, selected once when the host is built.
///
/// Validation is advisory: implementations report, they never fail.
pub trait NestingValidator {
    fn validate_tag(&mut self, tag: &str, ancestors: &AncestorInfo);

    fn validate_text(&mut self, text: &str, ancestors: &AncestorInfo);

    /// Advisories reported so far, oldest first.
    fn advisories(&self) -> &[NestingAdvisory] {
        &[]
    }
}

/// Validator used when nesting validation is switched off.
#[derive(Debug, Default)]
pub struct NoopValidator;

impl NestingValidator for NoopValidator {
    fn validate_tag(&mut self, _tag: &str, _ancestors: &AncestorInfo) {}

    fn validate_text(&mut self, _text: &str, _ancestors: &AncestorInfo) {}
}

/// Validator that logs each distinct advisory once.
#[derive(Debug, Default)]
pub struct AdvisoryValidator<R = HtmlNestingRules> {
    rules: R,
    seen: HashSet<NestingAdvisory>,
    reported: Vec<NestingAdvisory>,
}

impl<R: NestingRules> AdvisoryValidator<R> {
    pub fn new(rules: R) -> Self {
        Self {
            rules,
            seen: HashSet::new(),
            reported: Vec::new(),
        }
    }

    fn report(&mut self, ancestors: &AncestorInfo, child: NestingChild<'_>) {
        let Some(advisory) = self.rules.check(ancestors, child) else {
            return;
        };
        if !self.seen.insert(advisory.clone()) {
            return;
        }
        log::warn!(
            target: "dom_host.nesting",
            "illegal nesting: {advisory} (at {})",
            ancestors.tags().join(" > ")
        );
        self.reported.push(advisory);
    }
}

impl<R: NestingRules> NestingValidator for AdvisoryValidator<R> {
    fn validate_tag(&mut self, tag: &str, ancestors: &AncestorInfo) {
        self.report(ancestors, NestingChild::Tag(tag));
    }

    fn validate_text(&mut self, text: &str, ancestors: &AncestorInfo) {
        self.report(ancestors, NestingChild::Text(text));
    }

    fn advisories(&self) -> &[NestingAdvisory] {
        &self.reported
    }
}
