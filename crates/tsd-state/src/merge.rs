//! Merging parsed fragments into the accumulator.

use crate::state::ProgramState;
use crate::types::merge_types;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{info, warn};
use tsd_ast::Program;
use tsd_core::text::sanitize;
use tsd_core::{Diagnostic, DiagnosticKind, Error, Result};

/// What a merge added to the accumulator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub rules_added: usize,
    pub facts_added: usize,
    pub assignments_added: usize,
    /// Diagnostics recorded by this merge
    pub diagnostics: usize,
    /// Whether the fragment reset the accumulator first
    pub reset: bool,
}

impl ProgramState {
    /// Ingests an AST document and merges it.
    ///
    /// # Errors
    /// Returns the ingest error if the document is malformed, otherwise the
    /// blocking errors of [`ProgramState::merge`].
    pub fn merge_document(&mut self, document: &Value, source: &str) -> Result<MergeReport> {
        check_source(source)?;
        let program = Program::from_json(document)?;
        self.merge(&program, source)
    }

    /// Merges one parsed fragment.
    ///
    /// A reset directive clears the accumulator first. Types are then
    /// merged, followed by rules, fact assignments and facts, each checked
    /// against the types merged so far. A rule or fact that fails its
    /// checks is skipped with a diagnostic.
    ///
    /// # Errors
    /// Blocking errors leave the accumulator unchanged:
    /// - `MalformedAst` for an empty source identifier
    /// - any intrinsic type error, an incompatible type redeclaration or a
    ///   cycle in the merged type graph
    pub fn merge(&mut self, program: &Program, source: &str) -> Result<MergeReport> {
        check_source(source)?;
        info!(source, "merging program fragment");

        let reset = program.has_reset();
        let base = if reset {
            BTreeMap::new()
        } else {
            self.types.clone()
        };
        let types = merge_types(&self.validator, base, &program.types)?;

        if reset {
            self.reset();
        }
        self.types = types;

        let errors_before = self.errors.len();
        let mut report = MergeReport {
            reset,
            ..MergeReport::default()
        };

        self.merge_rules(program, source, &mut report);
        self.merge_facts(program, source, &mut report);
        self.files_parsed.push(source.to_string());

        report.diagnostics = self.errors.len() - errors_before;
        info!(
            source,
            rules = report.rules_added,
            facts = report.facts_added,
            diagnostics = report.diagnostics,
            "merged program fragment"
        );
        Ok(report)
    }

    fn merge_rules(&mut self, program: &Program, source: &str, report: &mut MergeReport) {
        let types = self.type_system();

        for rule in &program.expressions {
            if let Some(id) = rule.rule_id()
                && self.rule_ids.contains(id)
            {
                let err = Error::DuplicateRuleId(format!(
                    "rule id '{}' is already defined",
                    self.shown(id)
                ));
                self.skip(source, DiagnosticKind::Rule, &err, rule.line);
                continue;
            }

            if let Err(err) = self.validator.check_rule(&types, rule) {
                self.skip(source, DiagnosticKind::Rule, &err, rule.line);
                continue;
            }

            if let Some(id) = rule.rule_id() {
                self.rule_ids.insert(id.to_string());
            }
            self.rules.push(rule.clone());
            report.rules_added += 1;
        }
    }

    fn merge_facts(&mut self, program: &Program, source: &str, report: &mut MergeReport) {
        let mut types = self.type_system();

        for assignment in &program.fact_assignments {
            if let Err(err) = self.validator.check_assignment(&mut types, assignment) {
                self.skip(source, DiagnosticKind::Fact, &err, assignment.line);
                continue;
            }
            self.variables.insert(
                assignment.variable.clone(),
                assignment.fact.type_name.clone(),
            );
            self.assignments.push(assignment.clone());
            report.assignments_added += 1;
        }

        for fact in &program.facts {
            if let Err(err) = self.validator.check_fact(&types, fact) {
                self.skip(source, DiagnosticKind::Fact, &err, fact.line);
                continue;
            }
            self.facts.push(fact.clone());
            report.facts_added += 1;
        }
    }

    fn skip(&mut self, source: &str, kind: DiagnosticKind, err: &Error, line: usize) {
        warn!(source, kind = kind.as_str(), line, error = %err, "skipping invalid item");
        self.errors
            .push(Diagnostic::new(source, kind, err.to_string(), line));
    }

    fn shown(&self, text: &str) -> String {
        sanitize(text, self.validator.limits().max_message_length)
    }
}

fn check_source(source: &str) -> Result<()> {
    if source.is_empty() {
        return Err(Error::MalformedAst(
            "source identifier must not be empty".to_string(),
        ));
    }
    Ok(())
}
