use super::*;

#[test]
fn terminal_phases_absorb() {
    for terminal in [Phase::Completed, Phase::Failed, Phase::Cancelled] {
        for next in [
            Phase::Pending,
            Phase::Analyzing,
            Phase::Planning,
            Phase::AwaitingConfirmation,
            Phase::Executing,
            Phase::Validating,
            Phase::Completed,
            Phase::Failed,
            Phase::Cancelled,
        ] {
            assert!(!terminal.can_transition_to(next));
        }
    }
}

#[test]
fn happy_path_is_linear() {
    assert!(Phase::Pending.can_transition_to(Phase::Analyzing));
    assert!(Phase::Analyzing.can_transition_to(Phase::Planning));
    assert!(Phase::Planning.can_transition_to(Phase::AwaitingConfirmation));
    assert!(Phase::AwaitingConfirmation.can_transition_to(Phase::Executing));
    assert!(Phase::Executing.can_transition_to(Phase::Validating));
    assert!(Phase::Validating.can_transition_to(Phase::Completed));
}

#[test]
fn dry_run_skips_straight_to_completed() {
    assert!(Phase::Planning.can_transition_to(Phase::Completed));
}

#[test]
fn any_non_terminal_phase_can_fail_or_cancel() {
    for phase in [
        Phase::Pending,
        Phase::Analyzing,
        Phase::Planning,
        Phase::AwaitingConfirmation,
        Phase::Executing,
        Phase::Validating,
    ] {
        assert!(phase.can_transition_to(Phase::Failed));
        assert!(phase.can_transition_to(Phase::Cancelled));
    }
}

#[test]
fn cannot_skip_ahead() {
    assert!(!Phase::Pending.can_transition_to(Phase::Executing));
    assert!(!Phase::Analyzing.can_transition_to(Phase::AwaitingConfirmation));
}

#[test]
fn executing_percent_interpolates() {
    assert_eq!(Phase::Executing.base_percent(0, 4), 30.0);
    assert_eq!(Phase::Executing.base_percent(2, 4), 60.0);
    assert_eq!(Phase::Executing.base_percent(4, 4), 90.0);
}
