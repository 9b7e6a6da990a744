use super::*;

/// Maps dates onto the vertical axis, one unit per day.
///
/// Nested blocks are inset by `offset` per outline level at both ends, so
/// short or deep tasks can end up with zero or negative height. Those values
/// are left as they are.
pub fn map_temporal_axis(tasks: &mut [Task], project_start: NaiveDate, offset: f64) {
    for task in tasks.iter_mut() {
        let level = task.level() as f64;
        let from_origin = (task.start - project_start).num_days() as f64;
        let duration = (task.finish - task.start).num_days() as f64;
        task.top = from_origin + level * offset;
        task.height = duration + 1.0 - level * 2.0 * offset;
    }
    debug!(tasks = tasks.len(), "temporal axis mapped");
}
