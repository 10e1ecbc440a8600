//! Assembly stages: the ordered phases a production unit passes through.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use kitready_core::{DomainError, DomainResult};

/// One assembly phase (e.g. mechanical, electrical).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    /// Unique key, referenced by BOM line assembly attributes.
    pub code: String,
    pub name: String,
    /// Position in the assembly sequence (ascending).
    pub order: i32,
    /// Cosmetic, passed through to reports.
    #[serde(default)]
    pub color: String,
}

impl Stage {
    pub fn new(code: impl Into<String>, name: impl Into<String>, order: i32) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            order,
            color: String::new(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

/// Validated, order-sorted list of stages.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StageCatalog {
    stages: Vec<Stage>,
}

impl StageCatalog {
    /// Build a catalog, sorting by `order` (stable for equal orders).
    ///
    /// Rejects blank and duplicate stage codes.
    pub fn new(stages: impl IntoIterator<Item = Stage>) -> DomainResult<Self> {
        let mut stages: Vec<Stage> = stages.into_iter().collect();

        let mut seen = HashSet::new();
        for stage in &stages {
            if stage.code.trim().is_empty() {
                return Err(DomainError::validation("stage code cannot be empty"));
            }
            if !seen.insert(stage.code.as_str()) {
                return Err(DomainError::validation(format!(
                    "duplicate stage code: {}",
                    stage.code
                )));
            }
        }

        stages.sort_by_key(|s| s.order);
        Ok(Self { stages })
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn get(&self, code: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.code == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}
