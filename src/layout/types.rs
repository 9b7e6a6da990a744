use chrono::NaiveDate;

use crate::ir::{MilestoneRecord, OutlinePath, TaskRecord};

/// Stable index of a task inside the layout arena.
pub type TaskId = usize;

/// One block of the schedule. Links are plain indices into the owning arena.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub start: NaiveDate,
    pub finish: NaiveDate,
    pub outline: OutlinePath,
    pub critical: bool,
    pub parent: Option<TaskId>,
    pub children: Vec<TaskId>,
    pub descendant_count: usize,
    pub top: f64,
    pub height: f64,
    pub left: f64,
    pub width: f64,
}

impl Task {
    pub fn from_record(id: TaskId, record: &TaskRecord) -> Self {
        Self {
            id,
            name: record.name.clone(),
            start: record.start,
            finish: record.finish,
            outline: record.outline.clone(),
            critical: record.critical,
            parent: None,
            children: Vec::new(),
            descendant_count: 0,
            top: 0.0,
            height: 0.0,
            left: 0.0,
            width: 0.0,
        }
    }

    pub fn level(&self) -> usize {
        self.outline.level()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Milestone {
    pub name: String,
    pub date: NaiveDate,
}

impl From<&MilestoneRecord> for Milestone {
    fn from(record: &MilestoneRecord) -> Self {
        Self {
            name: record.name.clone(),
            date: record.date,
        }
    }
}

/// Fully positioned schedule, ready for a renderer.
#[derive(Debug, Clone)]
pub struct BlockLayout {
    pub project_start: NaiveDate,
    pub project_finish: NaiveDate,
    pub tasks: Vec<Task>,
    pub milestones: Vec<Milestone>,
    pub root: TaskId,
    /// Widest block after minimum-width correction.
    pub max_width: f64,
}

impl BlockLayout {
    pub fn root_task(&self) -> &Task {
        &self.tasks[self.root]
    }

    /// Number of days between project start and finish.
    pub fn span_days(&self) -> i64 {
        (self.project_finish - self.project_start).num_days()
    }
}
