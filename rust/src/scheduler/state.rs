//! Per-group member queues for the round-robin pass.

use crate::interner::{GroupIdInt, GroupInterner};
use crate::models::Submission;

/// Submissions partitioned by group, each group ordered by student id.
///
/// Members are consumed through a cursor per group instead of removing from
/// the head of each list.
#[derive(Clone, Debug, Default)]
pub struct GroupQueues {
    interner: GroupInterner,
    members: Vec<Vec<Submission>>,
    cursors: Vec<usize>,
}

impl GroupQueues {
    /// Partition submissions by group id, keeping groups in first-seen order.
    pub fn from_submissions(submissions: &[Submission]) -> Self {
        let mut interner = GroupInterner::with_capacity(submissions.len());
        let mut members: Vec<Vec<Submission>> = Vec::new();

        for submission in submissions {
            let group = interner.intern(&submission.group_id) as usize;
            if group == members.len() {
                members.push(Vec::new());
            }
            members[group].push(submission.clone());
        }

        // Stable sort keeps input order among equal student ids
        for group in &mut members {
            group.sort_by_key(|s| s.student_id);
        }

        let cursors = vec![0; members.len()];
        Self {
            interner,
            members,
            cursors,
        }
    }

    pub fn group_count(&self) -> usize {
        self.interner.len()
    }

    /// Size of the smallest group, or `None` when there are no submissions.
    pub fn smallest_group_size(&self) -> Option<usize> {
        if self.interner.is_empty() {
            return None;
        }
        self.members.iter().map(Vec::len).min()
    }

    pub fn group_name(&self, group: GroupIdInt) -> Option<&str> {
        self.interner.resolve(group)
    }

    /// Group ids in round-robin order.
    pub fn groups(&self) -> impl Iterator<Item = GroupIdInt> {
        (0..self.members.len()).map(|g| g as GroupIdInt)
    }

    /// Take the member with the lowest remaining student id from a group.
    pub fn take_next(&mut self, group: GroupIdInt) -> Option<Submission> {
        let index = group as usize;
        let cursor = self.cursors.get_mut(index)?;
        let next = self.members[index].get(*cursor)?.clone();
        *cursor += 1;
        Some(next)
    }

    /// Drain every member not yet taken, ascending by student id.
    pub fn drain_remaining(&mut self) -> Vec<Submission> {
        let mut remaining: Vec<Submission> = Vec::new();
        for (group, cursor) in self.members.iter_mut().zip(self.cursors.iter_mut()) {
            remaining.extend(group.drain(*cursor..));
            *cursor = group.len();
        }
        remaining.sort_by_key(|s| s.student_id);
        remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(id: &str, group: &str, student_id: i64) -> Submission {
        Submission {
            id: id.to_string(),
            group_id: group.to_string(),
            student_id,
            display_name: String::new(),
            title: String::new(),
        }
    }

    #[test]
    fn test_groups_sorted_and_first_seen() {
        let subs = vec![
            sub("a", "2", 5406),
            sub("b", "1", 5405),
            sub("c", "2", 5402),
            sub("d", "1", 5401),
        ];
        let mut queues = GroupQueues::from_submissions(&subs);

        assert_eq!(queues.group_count(), 2);
        assert_eq!(queues.group_name(0), Some("2"));
        assert_eq!(queues.take_next(0).map(|s| s.student_id), Some(5402));
        assert_eq!(queues.take_next(1).map(|s| s.student_id), Some(5401));
        assert_eq!(queues.take_next(0).map(|s| s.student_id), Some(5406));
        assert_eq!(queues.take_next(0), None);
    }

    #[test]
    fn test_drain_remaining_sorted_across_groups() {
        let subs = vec![
            sub("a", "x", 3),
            sub("b", "x", 1),
            sub("c", "y", 2),
            sub("d", "y", 4),
        ];
        let mut queues = GroupQueues::from_submissions(&subs);
        queues.take_next(0);

        let ids: Vec<i64> = queues.drain_remaining().iter().map(|s| s.student_id).collect();
        assert_eq!(ids, vec![2, 3, 4]);
        assert!(queues.drain_remaining().is_empty());
    }

    #[test]
    fn test_smallest_group_size() {
        let queues = GroupQueues::from_submissions(&[]);
        assert_eq!(queues.smallest_group_size(), None);

        let subs = vec![sub("a", "x", 1), sub("b", "x", 2), sub("c", "y", 3)];
        let queues = GroupQueues::from_submissions(&subs);
        assert_eq!(queues.smallest_group_size(), Some(1));
    }
}
