use crate::layout::{BlockLayout, Milestone, Task};
use chrono::NaiveDate;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub project_start: NaiveDate,
    pub project_finish: NaiveDate,
    pub root: usize,
    pub max_width: f64,
    pub tasks: Vec<TaskDump>,
    pub milestones: Vec<MilestoneDump>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDump {
    pub id: usize,
    pub name: String,
    pub start: NaiveDate,
    pub finish: NaiveDate,
    pub outline_number: String,
    pub critical: bool,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub descendant_count: usize,
    pub top: f64,
    pub height: f64,
    pub left: f64,
    pub width: f64,
}

#[derive(Debug, Serialize)]
pub struct MilestoneDump {
    pub name: String,
    pub date: NaiveDate,
}

impl From<&Task> for TaskDump {
    fn from(task: &Task) -> Self {
        TaskDump {
            id: task.id,
            name: task.name.clone(),
            start: task.start,
            finish: task.finish,
            outline_number: task.outline.to_string(),
            critical: task.critical,
            parent: task.parent,
            children: task.children.clone(),
            descendant_count: task.descendant_count,
            top: task.top,
            height: task.height,
            left: task.left,
            width: task.width,
        }
    }
}

impl From<&Milestone> for MilestoneDump {
    fn from(milestone: &Milestone) -> Self {
        MilestoneDump {
            name: milestone.name.clone(),
            date: milestone.date,
        }
    }
}

impl LayoutDump {
    pub fn from_layout(layout: &BlockLayout) -> Self {
        LayoutDump {
            project_start: layout.project_start,
            project_finish: layout.project_finish,
            root: layout.root,
            max_width: layout.max_width,
            tasks: layout.tasks.iter().map(TaskDump::from).collect(),
            milestones: layout.milestones.iter().map(MilestoneDump::from).collect(),
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &BlockLayout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
