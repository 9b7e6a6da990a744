use super::*;

/// Places blocks left to right inside their parents, depth first.
///
/// Each child starts `offset` after the previous sibling (or after the
/// parent's left edge for the first child). Widths must be final.
pub fn assign_left(tasks: &mut [Task], root: TaskId, offset: f64) {
    tasks[root].left = 0.0;
    place_children(tasks, root, offset);
    debug!(root = %tasks[root].outline, "left positions assigned");
}

fn place_children(tasks: &mut [Task], idx: TaskId, offset: f64) {
    let mut cursor = tasks[idx].left;
    for pos in 0..tasks[idx].children.len() {
        let child = tasks[idx].children[pos];
        tasks[child].left = cursor + offset;
        place_children(tasks, child, offset);
        cursor += tasks[child].width + offset;
    }
}
