mod error;
mod milestones;
mod position;
mod temporal;
mod tree;
mod types;
mod width;

pub use error::LayoutError;
pub use milestones::{MILESTONE_NAME_SEPARATOR, consolidate_milestones};
pub use position::assign_left;
pub use temporal::map_temporal_axis;
pub use tree::build_task_tree;
pub use types::*;
pub use width::{allocate_widths, correct_min_widths, max_width};

use crate::config::LayoutConfig;
use crate::ir::Project;
use chrono::NaiveDate;
use tracing::{debug, trace, warn};

/// Runs the whole block-schedule pipeline over one project.
///
/// Tasks go through tree building, the temporal axis, width allocation,
/// minimum-width correction and left placement, in that order. Milestones are
/// consolidated separately. A project without a root task aborts with no
/// partial output.
pub fn compute_layout(project: &Project, config: &LayoutConfig) -> Result<BlockLayout, LayoutError> {
    let mut tasks: Vec<Task> = project
        .tasks
        .iter()
        .enumerate()
        .map(|(idx, record)| Task::from_record(idx, record))
        .collect();

    let root = build_task_tree(&mut tasks)?;
    map_temporal_axis(&mut tasks, project.start, config.offset);
    allocate_widths(&mut tasks, root, config.total_width, config.offset);
    correct_min_widths(&mut tasks, config.min_block_width);
    let max_width = max_width(&tasks);
    assign_left(&mut tasks, root, config.offset);

    let mut milestones: Vec<Milestone> = project.milestones.iter().map(Milestone::from).collect();
    consolidate_milestones(&mut milestones);

    Ok(BlockLayout {
        project_start: project.start,
        project_finish: project.finish,
        tasks,
        milestones,
        root,
        max_width,
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::ir::{OutlinePath, TaskRecord};

    pub fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    pub fn outline(value: &str) -> OutlinePath {
        OutlinePath::new(value.split('.').map(|part| part.parse().unwrap()).collect())
    }

    /// Unlinked arena, one task per outline number, all on the same day.
    pub fn arena(outlines: &[&str]) -> Vec<Task> {
        outlines
            .iter()
            .enumerate()
            .map(|(idx, number)| {
                let record = TaskRecord {
                    name: format!("Task {number}"),
                    start: date("2024-01-01"),
                    finish: date("2024-01-01"),
                    outline: outline(number),
                    critical: false,
                };
                Task::from_record(idx, &record)
            })
            .collect()
    }

    /// Linked arena plus its root.
    pub fn tree(outlines: &[&str]) -> (Vec<Task>, TaskId) {
        let mut tasks = arena(outlines);
        let root = build_task_tree(&mut tasks).unwrap();
        (tasks, root)
    }
}
