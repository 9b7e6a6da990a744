use super::*;

/// Splits the root's `total_width` among descendants, top down.
///
/// Every child of a node with `k` children gets
/// `(parent.width - (k + 1) * offset) / k`, leaving `offset` of whitespace on
/// both sides and between siblings.
pub fn allocate_widths(tasks: &mut [Task], root: TaskId, total_width: f64, offset: f64) {
    tasks[root].width = total_width;

    let mut stack = vec![root];
    while let Some(idx) = stack.pop() {
        let count = tasks[idx].children.len();
        if count == 0 {
            continue;
        }
        let child_width = (tasks[idx].width - (count as f64 + 1.0) * offset) / count as f64;
        let children = tasks[idx].children.clone();
        for &child in &children {
            tasks[child].width = child_width;
        }
        stack.extend(children.into_iter().rev());
    }
    debug!(root = %tasks[root].outline, total_width, "widths allocated");
}

/// Raises every block narrower than `min_width` to the floor and adds the same
/// delta to each ancestor up to the root.
///
/// Tasks are visited in arena order and each correction is applied on its own,
/// so an ancestor of several narrow blocks grows by the sum of their deltas.
pub fn correct_min_widths(tasks: &mut [Task], min_width: f64) {
    let mut corrected = 0usize;
    for idx in 0..tasks.len() {
        let width = tasks[idx].width;
        if width >= min_width {
            continue;
        }
        let delta = min_width - width;
        trace!(task = %tasks[idx].outline, width, delta, "widening narrow block");
        grow_with_ancestors(tasks, idx, delta);
        corrected += 1;
    }
    debug!(corrected, min_width, "minimum widths enforced");
}

fn grow_with_ancestors(tasks: &mut [Task], idx: TaskId, delta: f64) {
    let mut current = Some(idx);
    while let Some(node) = current {
        tasks[node].width += delta;
        current = tasks[node].parent;
    }
}

/// Widest block in the arena, or 0.0 when it is empty.
pub fn max_width(tasks: &[Task]) -> f64 {
    tasks.iter().map(|task| task.width).fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::test_support::{arena, tree};

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn two_children_split_evenly() {
        let (mut tasks, root) = tree(&["1", "1.1", "1.2"]);
        allocate_widths(&mut tasks, root, 1000.0, 5.0);
        assert_eq!(tasks[1].width, 492.5);
        assert_eq!(tasks[2].width, 492.5);
    }

    #[test]
    fn children_plus_gaps_fill_parent_exactly() {
        let (mut tasks, root) = tree(&[
            "1", "1.1", "1.2", "1.3", "1.1.1", "1.1.2", "1.2.1", "1.3.1", "1.3.2", "1.3.3",
            "1.3.3.1",
        ]);
        allocate_widths(&mut tasks, root, 1000.0, 5.0);
        for task in &tasks {
            let count = task.children.len();
            if count == 0 {
                continue;
            }
            let sum: f64 = task.children.iter().map(|&c| tasks[c].width).sum();
            assert_close(sum + (count as f64 + 1.0) * 5.0, task.width);
        }
    }

    #[test]
    fn narrow_siblings_compound_on_shared_parent() {
        let mut tasks = arena(&["1", "1.1", "1.1.1", "1.1.2"]);
        tasks[1].parent = Some(0);
        tasks[1].children = vec![2, 3];
        tasks[2].parent = Some(1);
        tasks[3].parent = Some(1);
        tasks[0].width = 200.0;
        tasks[1].width = 50.0;
        tasks[2].width = 10.0;
        tasks[3].width = 12.0;

        correct_min_widths(&mut tasks, 20.0);

        assert_eq!(tasks[2].width, 20.0);
        assert_eq!(tasks[3].width, 20.0);
        assert_eq!(tasks[1].width, 68.0);
        assert_eq!(tasks[0].width, 218.0);
    }

    #[test]
    fn wide_blocks_are_untouched() {
        let (mut tasks, root) = tree(&["1", "1.1", "1.2"]);
        allocate_widths(&mut tasks, root, 1000.0, 5.0);
        let before: Vec<f64> = tasks.iter().map(|t| t.width).collect();
        correct_min_widths(&mut tasks, 20.0);
        let after: Vec<f64> = tasks.iter().map(|t| t.width).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn deep_narrow_leaf_widens_whole_chain() {
        let (mut tasks, root) = tree(&["1", "1.1", "1.1.1"]);
        allocate_widths(&mut tasks, root, 30.0, 5.0);
        // 30 -> 20 -> 10; only the leaf is under the floor.
        assert_eq!(tasks[2].width, 10.0);
        correct_min_widths(&mut tasks, 20.0);
        assert_eq!(tasks[2].width, 20.0);
        assert_eq!(tasks[1].width, 30.0);
        assert_eq!(tasks[0].width, 40.0);
        assert_eq!(max_width(&tasks), 40.0);
    }

    #[test]
    fn max_width_of_empty_arena_is_zero() {
        assert_eq!(max_width(&[]), 0.0);
    }
}
