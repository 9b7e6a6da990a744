use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("root not found: none of the {task_count} tasks is without a parent")]
    RootNotFound { task_count: usize },
}
