//! Xuple-space policy validation.

use crate::checker::core::Validator;
use std::fmt;
use std::time::Duration;
use tsd_ast::{DurationDecl, XupleSpaceDeclaration};
use tsd_core::duration::{duration_from_seconds, parse_duration};
use tsd_core::{Error, Result};

/// Order in which waiting xuples are handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionPolicy {
    Fifo,
    Lifo,
    Random,
}

impl SelectionPolicy {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "fifo" => Some(Self::Fifo),
            "lifo" => Some(Self::Lifo),
            "random" => Some(Self::Random),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fifo => "fifo",
            Self::Lifo => "lifo",
            Self::Random => "random",
        }
    }
}

impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How many times a xuple may be taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsumptionPolicy {
    Once,
    PerAgent,
    Limited(u32),
}

/// How long a xuple stays in its space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RetentionPolicy {
    Unlimited,
    Duration(Duration),
}

/// A validated xuple-space configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XupleSpace {
    pub name: String,
    pub selection: SelectionPolicy,
    pub consumption: ConsumptionPolicy,
    pub retention: RetentionPolicy,
    /// `None` means unbounded
    pub max_size: Option<usize>,
}

impl Validator {
    /// Validates one xuple-space declaration and returns its typed form.
    ///
    /// # Errors
    /// Returns `XupleSpacePolicy` for an empty name, an unknown policy, a
    /// non-positive or fractional limit, a non-positive retention duration
    /// or a negative or fractional maximum size.
    pub fn check_xuple_space(&self, declaration: &XupleSpaceDeclaration) -> Result<XupleSpace> {
        if declaration.name.is_empty() {
            return Err(Error::XupleSpacePolicy(
                "xuple-space name must not be empty".to_string(),
            ));
        }
        let name = self.shown(&declaration.name);

        let selection =
            SelectionPolicy::from_name(&declaration.selection_policy).ok_or_else(|| {
                Error::XupleSpacePolicy(format!(
                    "invalid selection policy '{}' in xuple-space '{name}' (expected fifo, lifo or random)",
                    self.shown(&declaration.selection_policy)
                ))
            })?;

        let consumption = self.consumption_policy(&name, declaration)?;
        let retention = self.retention_policy(&name, declaration)?;

        let max_size = declaration.max_size;
        if !max_size.is_finite() || max_size < 0.0 || max_size.fract() != 0.0 {
            return Err(Error::XupleSpacePolicy(format!(
                "max size of xuple-space '{name}' must be a non-negative integer, found {max_size}"
            )));
        }

        Ok(XupleSpace {
            name: declaration.name.clone(),
            selection,
            consumption,
            retention,
            max_size: (max_size > 0.0).then_some(max_size as usize),
        })
    }

    fn consumption_policy(
        &self,
        name: &str,
        declaration: &XupleSpaceDeclaration,
    ) -> Result<ConsumptionPolicy> {
        let policy = &declaration.consumption_policy;
        match policy.kind.as_str() {
            "once" => Ok(ConsumptionPolicy::Once),
            "per-agent" => Ok(ConsumptionPolicy::PerAgent),
            "limited" => {
                let limit = policy.limit.unwrap_or(0.0);
                if !limit.is_finite() || limit <= 0.0 || limit.fract() != 0.0 || limit > f64::from(u32::MAX) {
                    return Err(Error::XupleSpacePolicy(format!(
                        "limited consumption in xuple-space '{name}' requires a positive integer limit, found {limit}"
                    )));
                }
                Ok(ConsumptionPolicy::Limited(limit as u32))
            }
            other => Err(Error::XupleSpacePolicy(format!(
                "invalid consumption policy '{}' in xuple-space '{name}' (expected once, per-agent or limited)",
                self.shown(other)
            ))),
        }
    }

    fn retention_policy(
        &self,
        name: &str,
        declaration: &XupleSpaceDeclaration,
    ) -> Result<RetentionPolicy> {
        let policy = &declaration.retention_policy;
        match policy.kind.as_str() {
            "unlimited" => Ok(RetentionPolicy::Unlimited),
            "duration" => {
                let duration = match &policy.duration {
                    Some(DurationDecl::Seconds(seconds)) => duration_from_seconds(*seconds)?,
                    Some(DurationDecl::Text(text)) => parse_duration(text)?,
                    None => Duration::ZERO,
                };
                if duration.is_zero() {
                    return Err(Error::XupleSpacePolicy(format!(
                        "duration retention in xuple-space '{name}' requires a positive duration"
                    )));
                }
                Ok(RetentionPolicy::Duration(duration))
            }
            other => Err(Error::XupleSpacePolicy(format!(
                "invalid retention policy '{}' in xuple-space '{name}' (expected unlimited or duration)",
                self.shown(other)
            ))),
        }
    }
}
