use super::*;

/// Links every task to its parent and children by comparing outline paths,
/// fills in descendant counts and returns the root.
///
/// Children keep arena order. When several tasks are parentless the last one
/// wins; the others keep their default geometry.
pub fn build_task_tree(tasks: &mut [Task]) -> Result<TaskId, LayoutError> {
    for task in tasks.iter_mut() {
        task.parent = None;
        task.children.clear();
        task.descendant_count = 0;
    }

    link_parents(tasks);
    count_descendants(tasks);

    let parentless: Vec<TaskId> = tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| task.parent.is_none())
        .map(|(idx, _)| idx)
        .collect();
    let Some(&root) = parentless.last() else {
        return Err(LayoutError::RootNotFound {
            task_count: tasks.len(),
        });
    };
    if parentless.len() > 1 {
        warn!(
            roots = parentless.len(),
            chosen = %tasks[root].outline,
            "multiple parentless tasks; keeping the last one as root"
        );
    }
    debug!(root = %tasks[root].outline, tasks = tasks.len(), "task tree built");
    Ok(root)
}

// All-pairs scan. A child with duplicate candidate parents ends up attached to
// the last one, while every candidate lists it as a child.
fn link_parents(tasks: &mut [Task]) {
    let count = tasks.len();
    for parent_idx in 0..count {
        for child_idx in 0..count {
            if child_idx == parent_idx {
                continue;
            }
            if tasks[child_idx].outline.is_child_of(&tasks[parent_idx].outline) {
                tasks[child_idx].parent = Some(parent_idx);
                tasks[parent_idx].children.push(child_idx);
            }
        }
    }
}

// Bottom-up frontier passes. A parent joins the next frontier only once all of
// its children have reported, so every count is final before it propagates.
fn count_descendants(tasks: &mut [Task]) {
    // Counted from recorded parent links: duplicate outline paths can list a
    // task under a parent that is not its recorded one.
    let mut pending = vec![0usize; tasks.len()];
    for task in tasks.iter() {
        if let Some(parent) = task.parent {
            pending[parent] += 1;
        }
    }
    let mut frontier: Vec<TaskId> = (0..tasks.len()).filter(|&idx| pending[idx] == 0).collect();

    while !frontier.is_empty() {
        let mut next = Vec::new();
        for idx in frontier {
            let Some(parent) = tasks[idx].parent else {
                continue;
            };
            tasks[parent].descendant_count += tasks[idx].descendant_count + 1;
            pending[parent] = pending[parent].saturating_sub(1);
            if pending[parent] == 0 && !next.contains(&parent) {
                next.push(parent);
            }
        }
        frontier = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::test_support::arena;

    fn subtree_size(tasks: &[Task], idx: TaskId) -> usize {
        tasks[idx]
            .children
            .iter()
            .map(|&child| 1 + subtree_size(tasks, child))
            .sum()
    }

    #[test]
    fn links_children_in_source_order() {
        let mut tasks = arena(&["1", "1.1", "1.2", "1.1.1"]);
        let root = build_task_tree(&mut tasks).unwrap();
        assert_eq!(root, 0);
        assert_eq!(tasks[0].children, vec![1, 2]);
        assert_eq!(tasks[1].children, vec![3]);
        assert_eq!(tasks[3].parent, Some(1));
        assert_eq!(tasks[0].parent, None);
    }

    #[test]
    fn descendant_counts_match_subtree_walk_on_uneven_depths() {
        let mut tasks = arena(&[
            "1", "1.1", "1.2", "1.2.1", "1.2.1.1", "1.2.1.2", "1.3", "1.3.1", "1.2.2",
        ]);
        build_task_tree(&mut tasks).unwrap();
        for idx in 0..tasks.len() {
            assert_eq!(
                tasks[idx].descendant_count,
                subtree_size(&tasks, idx),
                "task {}",
                tasks[idx].outline
            );
        }
        assert_eq!(tasks[0].descendant_count, 8);
    }

    #[test]
    fn sparse_outline_numbers_still_link() {
        let mut tasks = arena(&["1", "1.4", "1.9", "1.9.12"]);
        build_task_tree(&mut tasks).unwrap();
        assert_eq!(tasks[0].children, vec![1, 2]);
        assert_eq!(tasks[3].parent, Some(2));
    }

    #[test]
    fn missing_root_is_fatal() {
        let mut tasks: Vec<Task> = Vec::new();
        assert_eq!(
            build_task_tree(&mut tasks),
            Err(LayoutError::RootNotFound { task_count: 0 })
        );
    }

    #[test]
    fn last_parentless_task_becomes_root() {
        let mut tasks = arena(&["1", "1.1", "2", "2.1"]);
        let root = build_task_tree(&mut tasks).unwrap();
        assert_eq!(root, 2);
        assert_eq!(tasks.iter().filter(|t| t.parent.is_none()).count(), 2);
    }

    #[test]
    fn rebuilding_is_idempotent() {
        let mut tasks = arena(&["1", "1.1", "1.2"]);
        build_task_tree(&mut tasks).unwrap();
        build_task_tree(&mut tasks).unwrap();
        assert_eq!(tasks[0].children, vec![1, 2]);
        assert_eq!(tasks[0].descendant_count, 2);
    }
}
