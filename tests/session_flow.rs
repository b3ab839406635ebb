//! Session behaviour driven second by second with a manual clock

use hangboard_timer::{
    clock::{ClockEvent, ManualClock},
    cue::Cue,
    state::{IntervalStateMachine, Settings, Stage, PREPARE_SECONDS},
};

type Machine = IntervalStateMachine<ManualClock>;

fn machine_with(intervals: &str, hang: (&str, &str), rest: (&str, &str)) -> Machine {
    let mut settings = Settings::new();
    settings.set_interval_count(intervals);
    settings.set_hang_time(hang.0, hang.1);
    settings.set_rest_time(rest.0, rest.1);
    IntervalStateMachine::new(settings, ManualClock::new())
}

/// Let one second pass and return the cues it produced
fn tick(machine: &mut Machine) -> Vec<Cue> {
    let events = machine.clock_mut().advance();
    events.into_iter().filter_map(|event| machine.handle(event)).collect()
}

fn finish_preparation(machine: &mut Machine) {
    for _ in 0..PREPARE_SECONDS {
        tick(machine);
    }
    assert!(machine.session().is_running);
}

fn position(machine: &Machine) -> (Stage, u32) {
    (machine.session().stage, machine.session().current_interval)
}

/// Run to completion, returning the phases entered and the phase seconds spent
fn run_to_completion(machine: &mut Machine) -> (Vec<(Stage, u32)>, usize) {
    let mut phases = vec![position(machine)];
    let mut seconds = 0;
    while machine.session().stage != Stage::Complete {
        assert!(seconds < 100_000, "session never completed");
        tick(machine);
        seconds += 1;
        let now = position(machine);
        if phases.last() != Some(&now) {
            phases.push(now);
        }
    }
    (phases, seconds)
}

#[test]
fn full_run_has_one_rest_and_hang_per_interval() {
    for n in 1..=6u32 {
        let mut machine = machine_with(&n.to_string(), ("0", "2"), ("0", "3"));
        machine.start();
        finish_preparation(&mut machine);
        let (phases, _) = run_to_completion(&mut machine);

        let rests = phases.iter().filter(|(stage, _)| *stage == Stage::Rest).count();
        let hangs = phases.iter().filter(|(stage, _)| *stage == Stage::Hang).count();
        assert_eq!(rests, n as usize);
        assert_eq!(hangs, n as usize);
        assert_eq!(phases.last(), Some(&(Stage::Complete, n)));
        assert!(!machine.session().is_running);
        assert!(!machine.clock().is_armed());
    }
}

#[test]
fn two_interval_scenario_runs_eighty_phase_seconds() {
    let mut machine = machine_with("2", ("00", "10"), ("00", "30"));

    assert_eq!(machine.start(), Some(Cue::Countdown));
    assert_eq!(machine.session().prepare_remaining, 3);
    assert_eq!(tick(&mut machine), vec![Cue::Countdown]);
    assert_eq!(machine.session().prepare_remaining, 2);
    assert_eq!(tick(&mut machine), vec![Cue::Countdown]);
    assert_eq!(machine.session().prepare_remaining, 1);
    assert_eq!(tick(&mut machine), vec![Cue::Go]);

    // Preparation does not eat into the first rest
    assert_eq!(position(&machine), (Stage::Rest, 1));
    assert_eq!(machine.session().remaining_seconds, 30);
    assert!(machine.session().is_running);
    assert!(!machine.session().is_preparing);

    let (phases, seconds) = run_to_completion(&mut machine);
    assert_eq!(
        phases,
        vec![
            (Stage::Rest, 1),
            (Stage::Hang, 1),
            (Stage::Rest, 2),
            (Stage::Hang, 2),
            (Stage::Complete, 2),
        ]
    );
    assert_eq!(seconds, 80);
}

#[test]
fn phase_cues_fire_in_last_three_seconds() {
    let mut machine = machine_with("1", ("0", "5"), ("0", "5"));
    machine.start();
    finish_preparation(&mut machine);

    let cues: Vec<Vec<Cue>> = (0..5).map(|_| tick(&mut machine)).collect();
    assert_eq!(
        cues,
        vec![
            vec![],
            vec![Cue::Countdown],
            vec![Cue::Countdown],
            vec![Cue::Countdown],
            vec![Cue::Go],
        ]
    );
    assert_eq!(position(&machine), (Stage::Hang, 1));
    assert_eq!(machine.session().remaining_seconds, 5);
}

#[test]
fn skipping_matches_natural_expiry() {
    for k in 1..=5usize {
        let mut skipped = machine_with("3", ("0", "4"), ("0", "6"));
        skipped.start();
        finish_preparation(&mut skipped);
        let mut natural = machine_with("3", ("0", "4"), ("0", "6"));
        natural.start();
        finish_preparation(&mut natural);

        for _ in 0..k {
            skipped.skip();

            let before = position(&natural);
            while position(&natural) == before {
                tick(&mut natural);
            }
        }

        assert_eq!(position(&skipped), position(&natural));
        assert_eq!(skipped.session().remaining_seconds, natural.session().remaining_seconds);
    }
}

#[test]
fn skip_mid_rest_starts_full_hang() {
    let mut machine = machine_with("2", ("00", "10"), ("00", "30"));
    machine.start();
    finish_preparation(&mut machine);
    for _ in 0..5 {
        tick(&mut machine);
    }
    assert_eq!(machine.session().remaining_seconds, 25);

    let old_token = machine.run_token();
    machine.skip();

    assert_eq!(position(&machine), (Stage::Hang, 1));
    assert_eq!(machine.session().remaining_seconds, 10);
    assert_ne!(machine.run_token(), old_token);
    assert_eq!(machine.clock().armed(), Some((10, machine.run_token())));
}

#[test]
fn skip_on_final_hang_completes() {
    let mut machine = machine_with("1", ("0", "10"), ("0", "10"));
    machine.start();
    finish_preparation(&mut machine);
    machine.skip();
    machine.skip();
    assert_eq!(machine.session().stage, Stage::Complete);
    assert!(!machine.session().is_running);

    // Further skips do nothing
    let snapshot = machine.snapshot();
    machine.skip();
    assert_eq!(machine.snapshot(), snapshot);
}

#[test]
fn skip_is_ignored_while_preparing_or_paused() {
    let mut machine = machine_with("2", ("0", "10"), ("0", "30"));
    machine.skip();
    assert_eq!(machine.session().stage, Stage::NotStarted);

    machine.start();
    machine.skip();
    assert_eq!(position(&machine), (Stage::Rest, 1));
    assert!(machine.session().is_preparing);

    finish_preparation(&mut machine);
    machine.pause();
    machine.skip();
    assert_eq!(position(&machine), (Stage::Rest, 1));
}

#[test]
fn reset_is_idempotent() {
    let mut machine = machine_with("3", ("0", "10"), ("0", "30"));
    machine.start();
    finish_preparation(&mut machine);
    machine.skip();

    machine.reset();
    let once = machine.snapshot();
    machine.reset();
    let twice = machine.snapshot();

    assert_eq!(once, twice);
    assert_eq!(twice.stage, Stage::NotStarted);
    assert_eq!(twice.current_interval, 1);
    assert_eq!(twice.prepare_remaining, PREPARE_SECONDS);
    assert!(!twice.is_running);
    assert!(!twice.is_preparing);
    assert!(!machine.clock().is_armed());
}

#[test]
fn stale_events_have_no_effect() {
    let mut machine = machine_with("2", ("0", "10"), ("0", "30"));
    machine.start();
    finish_preparation(&mut machine);
    tick(&mut machine);

    let stale = machine.run_token();
    machine.pause();
    let paused = machine.snapshot();

    assert_eq!(machine.handle(ClockEvent::tick(stale, 3)), None);
    assert_eq!(machine.handle(ClockEvent::tick(stale, 0)), None);
    assert_eq!(machine.handle(ClockEvent::expired(stale)), None);
    assert_eq!(machine.snapshot(), paused);

    // A stale expiry from before a skip cannot advance the new phase
    machine.start();
    finish_preparation(&mut machine);
    let before_skip = machine.run_token();
    machine.skip();
    let hang = machine.snapshot();
    machine.handle(ClockEvent::expired(before_skip));
    assert_eq!(machine.snapshot(), hang);
}

#[test]
fn pause_keeps_remaining_and_resume_prepares_again() {
    let mut machine = machine_with("2", ("0", "10"), ("0", "30"));
    machine.start();
    finish_preparation(&mut machine);
    for _ in 0..12 {
        tick(&mut machine);
    }
    machine.pause();
    assert_eq!(machine.session().remaining_seconds, 18);
    assert!(!machine.session().is_running);
    assert!(machine.session().is_paused());
    assert!(!machine.clock().is_armed());

    // Time passing while paused changes nothing
    for _ in 0..5 {
        assert!(tick(&mut machine).is_empty());
    }
    assert_eq!(machine.session().remaining_seconds, 18);

    assert_eq!(machine.start(), Some(Cue::Countdown));
    assert!(machine.session().is_preparing);
    assert_eq!(machine.session().remaining_seconds, 18);
    finish_preparation(&mut machine);
    assert_eq!(machine.clock().armed(), Some((18, machine.run_token())));
    assert_eq!(position(&machine), (Stage::Rest, 1));
}

#[test]
fn start_from_complete_only_resets() {
    let mut machine = machine_with("1", ("0", "1"), ("0", "1"));
    machine.start();
    finish_preparation(&mut machine);
    run_to_completion(&mut machine);
    assert!(machine.snapshot().controls_enabled.start);

    assert_eq!(machine.start(), None);
    assert_eq!(machine.session().stage, Stage::NotStarted);
    assert!(!machine.session().is_preparing);
    assert!(!machine.clock().is_armed());

    assert_eq!(machine.start(), Some(Cue::Countdown));
    assert_eq!(position(&machine), (Stage::Rest, 1));
}

#[test]
fn start_requires_startable_settings() {
    let mut machine = machine_with("2", ("0", "10"), ("0", "30"));
    machine.set_hang_time("", "");
    assert!(!machine.can_start());
    assert_eq!(machine.start(), None);
    assert_eq!(machine.session().stage, Stage::NotStarted);
    assert!(!machine.clock().is_armed());
    assert!(!machine.snapshot().controls_enabled.start);
}

#[test]
fn invalid_input_keeps_previous_values() {
    let mut machine = machine_with("2", ("00", "00"), ("00", "30"));
    machine.set_hang_time("99", "00");
    assert_eq!(machine.settings().hang_minutes(), Some(0));
    assert!(!machine.can_start());

    machine.set_hang_time("", "00");
    assert_eq!(machine.settings().hang_minutes(), None);
    assert!(!machine.can_start());

    machine.set_hang_time("", "12");
    assert!(machine.can_start());
}

#[test]
fn interval_count_is_fixed_at_start() {
    let mut machine = machine_with("2", ("0", "1"), ("0", "1"));
    machine.start();
    machine.set_interval_count("5");
    finish_preparation(&mut machine);
    assert_eq!(machine.snapshot().total_intervals, 2);

    let (phases, _) = run_to_completion(&mut machine);
    assert_eq!(phases.last(), Some(&(Stage::Complete, 2)));
}

#[test]
fn phase_lengths_are_fixed_at_start() {
    let mut machine = machine_with("2", ("00", "10"), ("00", "30"));
    machine.start();
    finish_preparation(&mut machine);

    machine.set_hang_time("", "");
    machine.set_rest_time("1", "00");
    assert!(!machine.can_start());

    machine.skip();
    assert_eq!(position(&machine), (Stage::Hang, 1));
    assert_eq!(machine.session().remaining_seconds, 10);
    assert_eq!(machine.clock().armed(), Some((10, machine.run_token())));

    tick(&mut machine);
    assert_eq!(position(&machine), (Stage::Hang, 1));

    machine.skip();
    assert_eq!(position(&machine), (Stage::Rest, 2));
    assert_eq!(machine.session().remaining_seconds, 30);

    // Resuming still needs startable settings, but keeps the captured lengths
    machine.pause();
    assert!(!machine.snapshot().controls_enabled.start);
    assert_eq!(machine.start(), None);
    machine.set_hang_time("0", "45");
    assert_eq!(machine.start(), Some(Cue::Countdown));
    finish_preparation(&mut machine);
    assert_eq!(machine.clock().armed(), Some((30, machine.run_token())));
    machine.skip();
    assert_eq!(position(&machine), (Stage::Hang, 2));
    assert_eq!(machine.session().remaining_seconds, 10);

    // The next session picks the edits up
    machine.reset();
    machine.set_hang_time("0", "20");
    machine.start();
    finish_preparation(&mut machine);
    machine.skip();
    assert_eq!(machine.session().remaining_seconds, 20);
    assert_eq!(machine.session().rest_duration, 60);
}

#[test]
fn pause_between_final_tick_and_expiry_moves_on() {
    let mut machine = machine_with("2", ("00", "10"), ("00", "30"));
    machine.start();
    finish_preparation(&mut machine);
    for _ in 0..29 {
        tick(&mut machine);
    }
    assert_eq!(machine.session().remaining_seconds, 1);

    // Deliver the zero tick, then pause before the expiry arrives
    let events = machine.clock_mut().advance();
    assert_eq!(events.len(), 2);
    assert_eq!(machine.handle(events[0]), Some(Cue::Go));
    machine.pause();

    assert_eq!(position(&machine), (Stage::Hang, 1));
    assert_eq!(machine.session().remaining_seconds, 10);
    assert!(!machine.session().is_running);
    assert_eq!(machine.handle(events[1]), None);
    assert_eq!(position(&machine), (Stage::Hang, 1));

    machine.start();
    finish_preparation(&mut machine);
    assert_eq!(machine.clock().armed(), Some((10, machine.run_token())));
}

#[test]
fn pause_after_final_zero_tick_completes() {
    let mut machine = machine_with("1", ("0", "2"), ("0", "2"));
    machine.start();
    finish_preparation(&mut machine);
    machine.skip();
    tick(&mut machine);

    let events = machine.clock_mut().advance();
    machine.handle(events[0]);
    machine.pause();
    assert_eq!(machine.session().stage, Stage::Complete);
    assert!(!machine.session().is_running);
    assert!(!machine.clock().is_armed());
}

#[test]
fn single_interval_progress_starts_empty() {
    let mut machine = machine_with("1", ("0", "10"), ("0", "30"));
    let progress = machine.snapshot().progress;
    assert_eq!((progress.current, progress.max), (0, 1));

    machine.start();
    assert_eq!(machine.snapshot().progress.current, 1);
    finish_preparation(&mut machine);
    machine.skip();
    assert_eq!(position(&machine), (Stage::Hang, 1));
    assert_eq!(machine.snapshot().progress.current, 1);
}

#[test]
fn controls_follow_session() {
    let mut machine = machine_with("2", ("0", "10"), ("0", "30"));
    let controls = machine.snapshot().controls_enabled;
    assert!(controls.start && !controls.pause && !controls.skip && !controls.reset);

    machine.start();
    let controls = machine.snapshot().controls_enabled;
    assert!(!controls.start && !controls.pause && !controls.skip && controls.reset);

    finish_preparation(&mut machine);
    let controls = machine.snapshot().controls_enabled;
    assert!(!controls.start && controls.pause && controls.skip && controls.reset);
    assert!(!machine.snapshot().settings_editable);

    machine.pause();
    let controls = machine.snapshot().controls_enabled;
    assert!(controls.start && !controls.pause && !controls.skip && controls.reset);
}

#[test]
fn at_most_one_clock_is_live() {
    let mut machine = machine_with("2", ("0", "10"), ("0", "30"));
    machine.start();
    finish_preparation(&mut machine);
    machine.skip();
    machine.pause();
    machine.start();
    machine.reset();

    // Every arming replaced the previous one; nothing remains after reset
    assert!(!machine.clock().is_armed());
    assert!(tick(&mut machine).is_empty());
    assert_eq!(machine.session().stage, Stage::NotStarted);
}
