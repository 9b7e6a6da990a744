use crate::ir::{MilestoneRecord, OutlinePath, Project, TaskRecord};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

static OUTLINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(\.\d+)*$").unwrap());

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid project document: {0}")]
    Document(#[from] json5::Error),
    #[error("task `{task}`: invalid outline number `{value}`")]
    InvalidOutline { task: String, value: String },
    #[error("`{field}`: invalid date `{value}` (expected YYYY-MM-DD)")]
    InvalidDate { field: String, value: String },
    #[error("`{owner}` is missing `{field}`")]
    MissingField { owner: String, field: &'static str },
}

/// Ingestion options.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Outline levels to keep. Empty keeps every task; milestones are never
    /// filtered.
    pub levels: Vec<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Number(i64),
    Text(String),
}

impl Flag {
    fn is_set(&self) -> bool {
        match self {
            Flag::Bool(value) => *value,
            Flag::Number(value) => *value != 0,
            Flag::Text(value) => value == "1" || value.eq_ignore_ascii_case("true"),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskEntry {
    #[serde(default)]
    name: String,
    start: Option<String>,
    finish: Option<String>,
    outline_number: Option<String>,
    critical: Option<Flag>,
    milestone: Option<Flag>,
}

#[derive(Debug, Deserialize)]
struct MilestoneEntry {
    #[serde(default)]
    name: String,
    date: String,
}

#[derive(Debug, Deserialize)]
struct ProjectFile {
    start: Option<String>,
    finish: Option<String>,
    #[serde(default)]
    tasks: Vec<TaskEntry>,
    #[serde(default)]
    milestones: Vec<MilestoneEntry>,
}

/// Reads a project document (JSON or JSON5) into ingested records.
pub fn parse_project(input: &str, options: &ParseOptions) -> Result<Project, ParseError> {
    let file: ProjectFile = json5::from_str(input)?;

    let mut tasks = Vec::new();
    let mut milestones = Vec::new();
    for entry in file.tasks {
        let is_milestone = entry.milestone.as_ref().is_some_and(Flag::is_set);
        let start = required_date(&entry.name, "start", entry.start.as_deref())?;
        if is_milestone {
            milestones.push(MilestoneRecord {
                name: entry.name,
                date: start,
            });
            continue;
        }

        let finish = required_date(&entry.name, "finish", entry.finish.as_deref())?;
        let number = entry
            .outline_number
            .as_deref()
            .ok_or_else(|| ParseError::MissingField {
                owner: entry.name.clone(),
                field: "outlineNumber",
            })?;
        let outline = parse_outline_number(&entry.name, number)?;
        if !options.levels.is_empty() && !options.levels.contains(&outline.level()) {
            continue;
        }
        tasks.push(TaskRecord {
            critical: entry.critical.as_ref().is_some_and(Flag::is_set),
            name: entry.name,
            start,
            finish,
            outline,
        });
    }
    for entry in file.milestones {
        let date = parse_date(&entry.name, &entry.date)?;
        milestones.push(MilestoneRecord {
            name: entry.name,
            date,
        });
    }

    let start = match file.start.as_deref() {
        Some(value) => parse_date("start", value)?,
        None => earliest_date(&tasks, &milestones).ok_or(ParseError::MissingField {
            owner: "project".to_string(),
            field: "start",
        })?,
    };
    let finish = match file.finish.as_deref() {
        Some(value) => parse_date("finish", value)?,
        None => latest_date(&tasks, &milestones).unwrap_or(start),
    };

    debug!(
        tasks = tasks.len(),
        milestones = milestones.len(),
        %start,
        %finish,
        "project parsed"
    );
    Ok(Project {
        start,
        finish,
        tasks,
        milestones,
    })
}

/// Parses a dotted outline number such as `1.2.3`. Components must be
/// positive.
pub fn parse_outline_number(task: &str, value: &str) -> Result<OutlinePath, ParseError> {
    let invalid = || ParseError::InvalidOutline {
        task: task.to_string(),
        value: value.to_string(),
    };
    let trimmed = value.trim();
    if !OUTLINE_RE.is_match(trimmed) {
        return Err(invalid());
    }
    let mut components = Vec::new();
    for part in trimmed.split('.') {
        let component: u32 = part.parse().map_err(|_| invalid())?;
        if component == 0 {
            return Err(invalid());
        }
        components.push(component);
    }
    Ok(OutlinePath::new(components))
}

/// Parses `YYYY-MM-DD`, ignoring any `T...` time suffix.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ParseError> {
    let day = value.trim().split('T').next().unwrap_or_default();
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|_| ParseError::InvalidDate {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn required_date(owner: &str, field: &'static str, value: Option<&str>) -> Result<NaiveDate, ParseError> {
    let value = value.ok_or_else(|| ParseError::MissingField {
        owner: owner.to_string(),
        field,
    })?;
    parse_date(&format!("{owner}.{field}"), value)
}

fn earliest_date(tasks: &[TaskRecord], milestones: &[MilestoneRecord]) -> Option<NaiveDate> {
    let task_dates = tasks.iter().map(|task| task.start);
    let milestone_dates = milestones.iter().map(|milestone| milestone.date);
    task_dates.chain(milestone_dates).min()
}

fn latest_date(tasks: &[TaskRecord], milestones: &[MilestoneRecord]) -> Option<NaiveDate> {
    let task_dates = tasks.iter().map(|task| task.finish);
    let milestone_dates = milestones.iter().map(|milestone| milestone.date);
    task_dates.chain(milestone_dates).max()
}
