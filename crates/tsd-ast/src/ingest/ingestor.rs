//! Core ingest structure and the program entry point.

use super::helpers::{array, as_object, line, tag};
use crate::ast::{Program, Reset};
use serde_json::Value;
use tsd_core::{Error, Result};
use tracing::trace;

/// Translates generic AST documents into [`Program`]s.
///
/// Constraint trees are walked recursively; `max_nesting` bounds that walk
/// so that adversarial documents are rejected instead of exhausting the
/// stack.
#[derive(Debug, Clone, Copy)]
pub struct Ingestor {
    pub(crate) max_nesting: usize,
}

impl Ingestor {
    pub const DEFAULT_MAX_NESTING: usize = 512;

    pub fn new() -> Self {
        Self {
            max_nesting: Self::DEFAULT_MAX_NESTING,
        }
    }

    #[must_use]
    pub fn with_max_nesting(mut self, max_nesting: usize) -> Self {
        self.max_nesting = max_nesting;
        self
    }

    /// Translates a complete program document.
    ///
    /// # Errors
    /// Returns `MalformedAst` on any structural problem.
    pub fn ingest_program(&self, document: &Value) -> Result<Program> {
        let root = as_object(document, "program")?;
        let what = "program";

        let types = array(root, "types", what)?
            .iter()
            .map(|v| self.ingest_type_definition(v))
            .collect::<Result<Vec<_>>>()?;
        let fact_assignments = array(root, "factAssignments", what)?
            .iter()
            .map(|v| self.ingest_fact_assignment(v))
            .collect::<Result<Vec<_>>>()?;
        let facts = array(root, "facts", what)?
            .iter()
            .map(|v| self.ingest_fact(v))
            .collect::<Result<Vec<_>>>()?;
        let expressions = array(root, "expressions", what)?
            .iter()
            .map(|v| self.ingest_expression(v))
            .collect::<Result<Vec<_>>>()?;
        let xuple_spaces = array(root, "xupleSpaceDeclarations", what)?
            .iter()
            .map(|v| self.ingest_xuple_space(v))
            .collect::<Result<Vec<_>>>()?;
        let actions = array(root, "actions", what)?
            .iter()
            .map(|v| self.ingest_action_definition(v))
            .collect::<Result<Vec<_>>>()?;
        let resets = array(root, "resets", what)?
            .iter()
            .map(|v| self.ingest_reset(v))
            .collect::<Result<Vec<_>>>()?;

        trace!(
            types = types.len(),
            facts = facts.len(),
            rules = expressions.len(),
            "ingested program document"
        );

        Ok(Program {
            types,
            fact_assignments,
            facts,
            expressions,
            xuple_spaces,
            actions,
            resets,
        })
    }

    fn ingest_reset(&self, value: &Value) -> Result<Reset> {
        let node = as_object(value, "reset")?;
        let found = tag(node, "reset")?;
        if found != "reset" {
            return Err(Error::MalformedAst(format!(
                "expected a reset directive, found '{}'",
                super::helpers::shown(found)
            )));
        }
        Ok(Reset { line: line(node)? })
    }
}

impl Default for Ingestor {
    fn default() -> Self {
        Self::new()
    }
}
