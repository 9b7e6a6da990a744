use chrono::NaiveDate;
use std::fmt;

/// Hierarchical position of a task, e.g. `1.2.3` -> `[1, 2, 3]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OutlinePath(Vec<u32>);

impl OutlinePath {
    pub fn new(components: Vec<u32>) -> Self {
        Self(components)
    }

    pub fn components(&self) -> &[u32] {
        &self.0
    }

    /// Outline depth; a top-level task has level 1.
    pub fn level(&self) -> usize {
        self.0.len()
    }

    /// True when `self` is `parent` with exactly one trailing component appended.
    pub fn is_child_of(&self, parent: &OutlinePath) -> bool {
        self.0.len() == parent.0.len() + 1 && self.0[..parent.0.len()] == parent.0[..]
    }
}

impl From<Vec<u32>> for OutlinePath {
    fn from(components: Vec<u32>) -> Self {
        Self(components)
    }
}

impl fmt::Display for OutlinePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, component) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(".")?;
            }
            write!(f, "{component}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskRecord {
    pub name: String,
    pub start: NaiveDate,
    pub finish: NaiveDate,
    pub outline: OutlinePath,
    pub critical: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MilestoneRecord {
    pub name: String,
    pub date: NaiveDate,
}

/// Everything the ingestion side hands to the layout engine.
#[derive(Debug, Clone)]
pub struct Project {
    pub start: NaiveDate,
    pub finish: NaiveDate,
    pub tasks: Vec<TaskRecord>,
    pub milestones: Vec<MilestoneRecord>,
}

impl Project {
    pub fn new(start: NaiveDate, finish: NaiveDate) -> Self {
        Self {
            start,
            finish,
            tasks: Vec::new(),
            milestones: Vec::new(),
        }
    }

    pub fn push_task(
        &mut self,
        name: &str,
        outline: impl Into<OutlinePath>,
        start: NaiveDate,
        finish: NaiveDate,
    ) -> &mut TaskRecord {
        self.tasks.push(TaskRecord {
            name: name.to_string(),
            start,
            finish,
            outline: outline.into(),
            critical: false,
        });
        let last = self.tasks.len() - 1;
        &mut self.tasks[last]
    }

    pub fn push_milestone(&mut self, name: &str, date: NaiveDate) {
        self.milestones.push(MilestoneRecord {
            name: name.to_string(),
            date,
        });
    }
}
