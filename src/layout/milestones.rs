use super::*;

/// Separator placed between names of milestones that share a date.
pub const MILESTONE_NAME_SEPARATOR: &str = " | ";

/// Folds milestones with the same date into the first of them, keeping the
/// names in their original order. Dates must match exactly.
pub fn consolidate_milestones(milestones: &mut Vec<Milestone>) {
    let count = milestones.len();
    let mut merged = vec![false; count];

    for first in 0..count {
        if merged[first] {
            continue;
        }
        for other in (first + 1)..count {
            if merged[other] || milestones[other].date != milestones[first].date {
                continue;
            }
            let name = std::mem::take(&mut milestones[other].name);
            let target = &mut milestones[first].name;
            target.push_str(MILESTONE_NAME_SEPARATOR);
            target.push_str(&name);
            merged[other] = true;
        }
    }

    let mut flags = merged.into_iter();
    milestones.retain(|_| !flags.next().unwrap_or(false));
    debug!(before = count, after = milestones.len(), "milestones consolidated");
}
