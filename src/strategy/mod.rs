pub mod adherence;

pub use adherence::{RuleStats, StrategyReport};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StrategyError {
    #[error("rule group '{0}' already exists")]
    DuplicateGroup(String),
    #[error("no rule group named '{0}'")]
    UnknownGroup(String),
    #[error("no rule with id {0}")]
    UnknownRule(u64),
    #[error("name or rule text must not be blank")]
    EmptyText,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: u64,
    pub text: String,
}

/// A named section of a strategy, e.g. "Entry criteria".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleGroup {
    pub name: String,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

/// A trading playbook built from groups of checklist rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub groups: Vec<RuleGroup>,
    /// Next rule id to hand out. Ids are never reused within a strategy.
    #[serde(default)]
    next_rule_id: u64,
}

impl Strategy {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            groups: Vec::new(),
            next_rule_id: 1,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn add_group(&mut self, name: &str) -> Result<&mut RuleGroup, StrategyError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StrategyError::EmptyText);
        }
        if self.group_index(name).is_some() {
            return Err(StrategyError::DuplicateGroup(name.to_string()));
        }
        self.groups.push(RuleGroup {
            name: name.to_string(),
            rules: Vec::new(),
        });
        let last = self.groups.len() - 1;
        Ok(&mut self.groups[last])
    }

    pub fn remove_group(&mut self, name: &str) -> Result<RuleGroup, StrategyError> {
        let idx = self
            .group_index(name)
            .ok_or_else(|| StrategyError::UnknownGroup(name.trim().to_string()))?;
        Ok(self.groups.remove(idx))
    }

    /// Append a rule to `group` and return its id.
    pub fn add_rule(&mut self, group: &str, text: &str) -> Result<u64, StrategyError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StrategyError::EmptyText);
        }
        let idx = self
            .group_index(group)
            .ok_or_else(|| StrategyError::UnknownGroup(group.trim().to_string()))?;

        // Journals written before ids were tracked start at 0.
        let max_existing = self.rules().map(|r| r.id).max().unwrap_or(0);
        let id = self.next_rule_id.max(max_existing + 1);
        self.next_rule_id = id + 1;

        self.groups[idx].rules.push(Rule {
            id,
            text: text.to_string(),
        });
        Ok(id)
    }

    pub fn remove_rule(&mut self, id: u64) -> Result<Rule, StrategyError> {
        for group in &mut self.groups {
            if let Some(pos) = group.rules.iter().position(|r| r.id == id) {
                return Ok(group.rules.remove(pos));
            }
        }
        Err(StrategyError::UnknownRule(id))
    }

    pub fn rule(&self, id: u64) -> Option<&Rule> {
        self.rules().find(|r| r.id == id)
    }

    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.groups.iter().flat_map(|g| g.rules.iter())
    }

    pub fn rule_count(&self) -> usize {
        self.groups.iter().map(|g| g.rules.len()).sum()
    }

    fn group_index(&self, name: &str) -> Option<usize> {
        let wanted = name.trim().to_lowercase();
        self.groups
            .iter()
            .position(|g| g.name.to_lowercase() == wanted)
    }
}
