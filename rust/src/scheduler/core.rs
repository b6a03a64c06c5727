//! Core round-robin presentation scheduler.

use thiserror::Error;

use crate::config::SchedulerConfig;
use crate::models::{Assignment, ScheduledPresentation, SessionAssignment, SessionSlot, Submission};
use crate::{log_checks, log_debug, log_placements};

use super::state::GroupQueues;

/// Errors that can occur during scheduling.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchedulingError {
    #[error("Presentation duration must be a positive number of minutes, got {0}")]
    InvalidDuration(f64),
    #[error(
        "Not enough presentation slots: {required} presentations but capacity {capacity} ({shortfall} short)"
    )]
    InsufficientCapacity {
        required: usize,
        capacity: usize,
        shortfall: usize,
    },
    #[error(
        "Cannot place every laboratory in every session: {sessions} sessions but the smallest laboratory has {smallest_group} students"
    )]
    UnsatisfiableGroupDistribution {
        sessions: usize,
        smallest_group: usize,
    },
}

/// Assign submissions to presentation sessions with the default verbosity.
///
/// See [`schedule_with_config`].
pub fn schedule(
    submissions: &[Submission],
    sessions: &[SessionSlot],
    presentation_minutes: f64,
) -> Result<Assignment, SchedulingError> {
    let config = SchedulerConfig {
        presentation_minutes,
        ..SchedulerConfig::default()
    };
    schedule_with_config(submissions, sessions, &config)
}

/// Assign submissions to presentation sessions.
///
/// Groups take turns round-robin so each session receives at most one member
/// of every group before any group repeats, then sessions with spare capacity
/// are topped up from the leftover pool in student-id order. Each session's
/// list ends up sorted by student id and presentations are numbered from 1 in
/// agenda order.
///
/// All validation happens before any placement:
/// * `InvalidDuration` if `presentation_minutes` is not a positive number
/// * `InsufficientCapacity` if the sessions cannot hold every submission
/// * `UnsatisfiableGroupDistribution` if there are more presentation sessions
///   than members in the smallest group
pub fn schedule_with_config(
    submissions: &[Submission],
    sessions: &[SessionSlot],
    config: &SchedulerConfig,
) -> Result<Assignment, SchedulingError> {
    let verbosity = config.verbosity;
    let minutes = config.presentation_minutes;
    if !minutes.is_finite() || minutes <= 0.0 {
        return Err(SchedulingError::InvalidDuration(minutes));
    }

    let slots: Vec<&SessionSlot> = sessions.iter().filter(|s| s.is_presentation()).collect();
    let capacities: Vec<usize> = slots.iter().map(|s| s.capacity(minutes)).collect();
    // Tiny presentation lengths give capacities near usize::MAX
    let total_capacity = capacities
        .iter()
        .fold(0usize, |total, &c| total.saturating_add(c));

    log_checks!(
        verbosity,
        "[schedule] {} submissions, {} presentation sessions, capacity {} ({:?})",
        submissions.len(),
        slots.len(),
        total_capacity,
        capacities
    );

    if total_capacity < submissions.len() {
        return Err(SchedulingError::InsufficientCapacity {
            required: submissions.len(),
            capacity: total_capacity,
            shortfall: submissions.len() - total_capacity,
        });
    }

    let mut queues = GroupQueues::from_submissions(submissions);
    if let Some(smallest_group) = queues.smallest_group_size() {
        log_checks!(
            verbosity,
            "[schedule] {} groups, smallest has {} members",
            queues.group_count(),
            smallest_group
        );
        if slots.len() > smallest_group {
            return Err(SchedulingError::UnsatisfiableGroupDistribution {
                sessions: slots.len(),
                smallest_group,
            });
        }
    }

    let mut placed: Vec<Vec<Submission>> = capacities
        .iter()
        .map(|&c| Vec::with_capacity(c.min(submissions.len())))
        .collect();

    // Round-robin pass: one member per group per session
    for (session, &capacity) in capacities.iter().enumerate() {
        for group in queues.groups() {
            if placed[session].len() >= capacity {
                log_debug!(
                    verbosity,
                    "[round-robin] session {} full, group {:?} deferred",
                    slots[session].index,
                    queues.group_name(group)
                );
                continue;
            }
            if let Some(member) = queues.take_next(group) {
                log_placements!(
                    verbosity,
                    "[round-robin] session {} <- {} (group {})",
                    slots[session].index,
                    member.student_id,
                    member.group_id
                );
                placed[session].push(member);
            }
        }
    }

    // Overflow pass: fill remaining capacity in agenda order
    let remaining = queues.drain_remaining();
    log_debug!(verbosity, "[overflow] {} leftover submissions", remaining.len());
    let mut pool = remaining.into_iter();
    for (session, &capacity) in capacities.iter().enumerate() {
        while placed[session].len() < capacity {
            let Some(member) = pool.next() else {
                break;
            };
            log_placements!(
                verbosity,
                "[overflow] session {} <- {}",
                slots[session].index,
                member.student_id
            );
            placed[session].push(member);
        }
    }

    let mut order = 0;
    let sessions = slots
        .iter()
        .zip(capacities)
        .zip(placed)
        .map(|((slot, capacity), mut members)| {
            members.sort_by_key(|s| s.student_id);
            let presentations = members
                .into_iter()
                .map(|submission| {
                    order += 1;
                    ScheduledPresentation { order, submission }
                })
                .collect();
            SessionAssignment {
                session_index: slot.index,
                capacity,
                presentations,
            }
        })
        .collect();

    Ok(Assignment { sessions })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_submission(student_id: i64, group: &str) -> Submission {
        Submission {
            id: student_id.to_string(),
            group_id: group.to_string(),
            student_id,
            display_name: format!("Student {}", student_id),
            title: format!("Theme {}", student_id),
        }
    }

    /// Presentation slot starting at 10:00 with room for `slots` 15-minute talks.
    fn make_session(index: usize, slots: u32) -> SessionSlot {
        let end = 10 * 60 + slots * 15;
        SessionSlot::presentation(index, "10:00", &format!("{:02}:{:02}", end / 60, end % 60))
    }

    fn ids(assignment: &Assignment, session_index: usize) -> Vec<i64> {
        assignment.get(session_index).unwrap().student_ids()
    }

    #[test]
    fn test_three_groups_three_sessions() {
        // Labs interleaved the way the roster arrives: 1,2,3,1,2,3,...
        let subs: Vec<Submission> = (0..9)
            .map(|i| make_submission(5401 + i, &format!("{}", i % 3 + 1)))
            .collect();
        let sessions = vec![make_session(0, 3), make_session(1, 3), make_session(2, 3)];

        let result = schedule(&subs, &sessions, 15.0).unwrap();

        assert_eq!(ids(&result, 0), vec![5401, 5402, 5403]);
        assert_eq!(ids(&result, 1), vec![5404, 5405, 5406]);
        assert_eq!(ids(&result, 2), vec![5407, 5408, 5409]);
        for session in &result.sessions {
            let mut groups: Vec<&str> = session
                .presentations
                .iter()
                .map(|p| p.submission.group_id.as_str())
                .collect();
            groups.sort();
            assert_eq!(groups, vec!["1", "2", "3"]);
        }
    }

    #[test]
    fn test_breaks_are_skipped_and_keyed_by_agenda_index() {
        let subs: Vec<Submission> = (0..4)
            .map(|i| make_submission(100 + i, if i % 2 == 0 { "a" } else { "b" }))
            .collect();
        let sessions = vec![
            make_session(0, 2),
            SessionSlot::break_slot(1, "10:30", "10:45"),
            make_session(2, 2),
        ];

        let result = schedule(&subs, &sessions, 15.0).unwrap();

        assert_eq!(result.sessions.len(), 2);
        assert!(result.get(1).is_none());
        assert_eq!(ids(&result, 0), vec![100, 101]);
        assert_eq!(ids(&result, 2), vec![102, 103]);
    }

    #[test]
    fn test_overflow_fills_by_student_id() {
        // Group a has 4 members, group b has 2; 2 sessions of capacity 3
        let subs = vec![
            make_submission(1, "a"),
            make_submission(2, "a"),
            make_submission(3, "a"),
            make_submission(4, "a"),
            make_submission(5, "b"),
            make_submission(6, "b"),
        ];
        let sessions = vec![make_session(0, 3), make_session(1, 3)];

        let result = schedule(&subs, &sessions, 15.0).unwrap();

        // Round-robin gives [1,5] and [2,6]; leftovers 3,4 fill in agenda order
        assert_eq!(ids(&result, 0), vec![1, 3, 5]);
        assert_eq!(ids(&result, 1), vec![2, 4, 6]);
    }

    #[test]
    fn test_overflow_prefers_earlier_sessions() {
        let subs: Vec<Submission> = (1..=5).map(|i| make_submission(i, "a")).collect();
        let sessions = vec![make_session(0, 4), make_session(1, 4)];

        let result = schedule(&subs, &sessions, 15.0).unwrap();

        assert_eq!(ids(&result, 0), vec![1, 3, 4, 5]);
        assert_eq!(ids(&result, 1), vec![2]);
    }

    #[test]
    fn test_group_spread_in_first_round() {
        let mut subs = Vec::new();
        for (group, base) in [("x", 10), ("y", 20), ("z", 30)] {
            for k in 0..4 {
                subs.push(make_submission(base + k, group));
            }
        }
        let sessions = vec![make_session(0, 4), make_session(1, 4), make_session(2, 4)];

        let result = schedule(&subs, &sessions, 15.0).unwrap();

        // Each group's first three members land in distinct sessions
        for (group, base) in [("x", 10), ("y", 20), ("z", 30)] {
            for (session, k) in result.sessions.iter().zip(0..3) {
                let student_ids = session.student_ids();
                assert!(
                    student_ids.contains(&(base + k)),
                    "group {} member {} missing from session {}",
                    group,
                    base + k,
                    session.session_index
                );
            }
        }
    }

    #[test]
    fn test_round_robin_respects_small_capacity() {
        // 3 groups, but the first session only has room for 2
        let subs: Vec<Submission> = ["a", "b", "c", "a", "b", "c"]
            .iter()
            .enumerate()
            .map(|(i, g)| make_submission(i as i64 + 1, g))
            .collect();
        let sessions = vec![make_session(0, 2), make_session(1, 4)];

        let result = schedule(&subs, &sessions, 15.0).unwrap();

        // Group c is deferred from session 0 and its second member overflows
        assert_eq!(ids(&result, 0), vec![1, 2]);
        assert_eq!(ids(&result, 1), vec![3, 4, 5, 6]);
        for session in &result.sessions {
            assert!(session.presentations.len() <= session.capacity);
        }
    }

    #[test]
    fn test_conservation_bound_and_ordering() {
        let groups = ["1", "2", "3", "4"];
        let subs: Vec<Submission> = (0..20)
            .map(|i| make_submission(5420 - i, groups[(i % 4) as usize]))
            .collect();
        let sessions = vec![
            SessionSlot::presentation(0, "10:30", "12:00"),
            SessionSlot::break_slot(1, "12:00", "12:45"),
            SessionSlot::presentation(2, "12:45", "14:30"),
            SessionSlot::break_slot(3, "14:30", "14:40"),
            SessionSlot::presentation(4, "14:40", "16:25"),
        ];

        let result = schedule(&subs, &sessions, 15.0).unwrap();

        assert_eq!(result.total_assigned(), subs.len());
        for session in &result.sessions {
            assert!(session.presentations.len() <= session.capacity);
            let student_ids = session.student_ids();
            let mut sorted = student_ids.clone();
            sorted.sort();
            assert_eq!(student_ids, sorted);
        }
    }

    #[test]
    fn test_global_order_numbers() {
        let subs: Vec<Submission> = (1..=4)
            .map(|i| make_submission(i, if i <= 2 { "a" } else { "b" }))
            .collect();
        let sessions = vec![make_session(0, 2), make_session(1, 2)];

        let result = schedule(&subs, &sessions, 15.0).unwrap();

        let orders: Vec<usize> = result.presentations().map(|p| p.order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4]);
        assert_eq!(ids(&result, 0), vec![1, 3]);
    }

    #[test]
    fn test_insufficient_capacity_reports_shortfall() {
        let subs: Vec<Submission> = (1..=5).map(|i| make_submission(i, "a")).collect();
        let sessions = vec![make_session(0, 3)];

        let err = schedule(&subs, &sessions, 15.0).unwrap_err();

        assert_eq!(
            err,
            SchedulingError::InsufficientCapacity {
                required: 5,
                capacity: 3,
                shortfall: 2
            }
        );
        assert!(err.to_string().contains("2 short"));
    }

    #[test]
    fn test_invalid_duration() {
        let sessions = vec![make_session(0, 3)];
        for minutes in [0.0, -15.0, f64::NAN, f64::INFINITY] {
            let err = schedule(&[], &sessions, minutes).unwrap_err();
            assert!(matches!(err, SchedulingError::InvalidDuration(_)));
        }
    }

    #[test]
    fn test_more_sessions_than_smallest_group() {
        let subs = vec![
            make_submission(1, "a"),
            make_submission(2, "a"),
            make_submission(3, "b"),
        ];
        let sessions = vec![make_session(0, 3), make_session(1, 3)];

        let err = schedule(&subs, &sessions, 15.0).unwrap_err();

        assert_eq!(
            err,
            SchedulingError::UnsatisfiableGroupDistribution {
                sessions: 2,
                smallest_group: 1
            }
        );
    }

    #[test]
    fn test_capacity_checked_before_group_distribution() {
        let subs = vec![make_submission(1, "a"), make_submission(2, "b")];
        let sessions = vec![make_session(0, 0), make_session(1, 1)];

        let err = schedule(&subs, &sessions, 15.0).unwrap_err();

        assert!(matches!(err, SchedulingError::InsufficientCapacity { shortfall: 1, .. }));
    }

    #[test]
    fn test_empty_submissions() {
        let sessions = vec![make_session(0, 3), make_session(1, 3)];

        let result = schedule(&[], &sessions, 15.0).unwrap();

        assert_eq!(result.sessions.len(), 2);
        assert_eq!(result.total_assigned(), 0);
    }

    #[test]
    fn test_submissions_are_not_mutated() {
        let subs = vec![make_submission(2, "a"), make_submission(1, "a")];
        let before = subs.clone();
        let sessions = vec![make_session(0, 2)];

        let result = schedule(&subs, &sessions, 15.0).unwrap();

        assert_eq!(subs, before);
        assert_eq!(result.presentations().next().unwrap().submission, before[1]);
    }

    #[test]
    fn test_tiny_presentation_length_saturates_capacity() {
        let subs = vec![
            make_submission(1, "a"),
            make_submission(2, "a"),
            make_submission(3, "b"),
            make_submission(4, "b"),
        ];
        let sessions = vec![make_session(0, 4), make_session(1, 4)];

        let result = schedule(&subs, &sessions, f64::MIN_POSITIVE).unwrap();

        assert_eq!(result.sessions[0].capacity, usize::MAX);
        assert_eq!(ids(&result, 0), vec![1, 3]);
        assert_eq!(ids(&result, 1), vec![2, 4]);
        assert_eq!(result.total_assigned(), 4);
    }

    #[test]
    fn test_verbose_config_schedules_identically() {
        let subs: Vec<Submission> = (1..=4).map(|i| make_submission(i, "a")).collect();
        let sessions = vec![make_session(0, 2), make_session(1, 2)];
        let config = SchedulerConfig {
            presentation_minutes: 15.0,
            verbosity: crate::logging::VERBOSITY_DEBUG,
        };

        let verbose = schedule_with_config(&subs, &sessions, &config).unwrap();
        let quiet = schedule(&subs, &sessions, 15.0).unwrap();

        assert_eq!(verbose, quiet);
    }
}
