use std::rc::Rc;

use joystate::backends::VirtualPad;
use joystate::{
    ChannelData, ChannelKind, Clock, JoyEvent, Joystick, JoystickManager, ManualClock,
    ReduceError, Transition,
};

fn tracker_at(seconds: f64, frame: u64) -> (Rc<ManualClock>, Joystick<Rc<ManualClock>>) {
    let clock = Rc::new(ManualClock::new(seconds, frame));
    let joy = Joystick::new(0, Rc::clone(&clock));
    (clock, joy)
}

#[test]
fn unobserved_channels_report_nothing() {
    let (clock, mut joy) = tracker_at(1.0, 1);
    joy.handle_event(&JoyEvent::button_down(0, 0, 1)).unwrap();
    joy.handle_event(&JoyEvent::axis_motion(0, 0, 1, 0.5)).unwrap();
    clock.step(0.016);

    for ch in [0u16, 2, 99, u16::MAX] {
        assert_eq!(joy.is_pressed(ch), None);
        assert_eq!(joy.just_pressed(ch), None);
        assert_eq!(joy.just_released(ch), None);
        assert_eq!(joy.press_time(ch), None);
        assert_eq!(joy.press_frame(ch), None);
        assert_eq!(joy.hold_time(ch), None);
        assert_eq!(joy.hold_frames(ch), None);
        assert_eq!(joy.release_time(ch), None);
        assert_eq!(joy.release_frame(ch), None);
        assert_eq!(joy.time_since_release(ch), None);
        assert_eq!(joy.frames_since_release(ch), None);

        assert_eq!(joy.is_moving(ch), None);
        assert_eq!(joy.just_moving(ch), None);
        assert_eq!(joy.just_stopped_moving(ch), None);
        assert_eq!(joy.move_time(ch), None);
        assert_eq!(joy.move_frame(ch), None);
        assert_eq!(joy.axis_hold_time(ch), None);
        assert_eq!(joy.axis_hold_frames(ch), None);
        assert_eq!(joy.stop_time(ch), None);
        assert_eq!(joy.stop_frame(ch), None);
        assert_eq!(joy.time_since_stop(ch), None);
        assert_eq!(joy.frames_since_stop(ch), None);
    }
}

#[test]
fn press_release_cycle_across_frames() {
    const F0: u64 = 200;
    const F1: u64 = 212;
    let (clock, mut joy) = tracker_at(0.0, F0);
    joy.handle_event(&JoyEvent::button_down(0, 0, 3)).unwrap();

    for frame in F0..F1 {
        assert_eq!(clock.frame(), frame);
        assert_eq!(joy.just_pressed(3), Some(frame == F0));
        assert_eq!(joy.is_pressed(3), Some(true));
        assert_eq!(joy.just_released(3), Some(false));
        assert_eq!(joy.hold_frames(3), Some(frame - F0));
        clock.step(0.01);
    }

    joy.handle_event(&JoyEvent::button_up(0, 0, 3)).unwrap();
    assert_eq!(joy.is_pressed(3), Some(false));
    assert_eq!(joy.just_released(3), Some(true));
    assert_eq!(joy.just_pressed(3), Some(false));

    clock.step(0.01);
    assert_eq!(joy.just_released(3), Some(false));
    assert_eq!(joy.frames_since_release(3), Some(1));
}

#[test]
fn hold_scenario_at_fixed_readings() {
    let (clock, mut joy) = tracker_at(10.0, 100);
    joy.handle_event(&JoyEvent::button_down(0, 0, 0)).unwrap();
    assert_eq!(joy.just_pressed(0), Some(true));
    assert_eq!(joy.hold_frames(0), Some(0));

    clock.set(10.5, 130);
    assert_eq!(joy.hold_frames(0), Some(30));
    assert_eq!(joy.hold_time(0), Some(0.5));

    joy.handle_event(&JoyEvent::button_up(0, 0, 0)).unwrap();
    assert_eq!(joy.is_pressed(0), Some(false));
    assert_eq!(joy.just_released(0), Some(true));
    assert_eq!(joy.release_time(0), Some(10.5));
    assert_eq!(joy.release_frame(0), Some(130));
}

#[test]
fn axis_moving_threshold_at_full_sensitivity() {
    let samples = [0.0f32, 0.00005, -0.0001, 0.0001, 0.00011, -0.00011, 0.5, -1.0];
    for v in samples {
        let (_clock, mut joy) = tracker_at(0.0, 0);
        joy.handle_event(&JoyEvent::axis_motion(0, 0, 0, 1.0)).unwrap();
        joy.handle_event(&JoyEvent::axis_motion(0, 0, 0, v)).unwrap();
        assert_eq!(joy.is_moving(0), Some(v.abs() > 1e-4), "sample {v}");
    }
}

#[test]
fn zero_sensitivity_collapses_deadzone() {
    let (_clock, mut joy) = tracker_at(0.0, 0);
    joy.handle_event(&JoyEvent::axis_motion(0, 0, 0, 0.9)).unwrap();
    assert_eq!(joy.set_sensitivity(0, 0.0), Some(0.0));

    for v in [1.0f32, -1.0, 0.3, 0.0] {
        joy.handle_event(&JoyEvent::axis_motion(0, 0, 0, v)).unwrap();
        assert_eq!(joy.axis_value(0), Some(0.0));
        assert_eq!(joy.is_moving(0), Some(false));
    }
}

#[test]
fn queries_are_stable_within_a_frame() {
    let (clock, mut joy) = tracker_at(3.0, 50);
    joy.handle_event(&JoyEvent::button_down(0, 0, 1)).unwrap();
    joy.handle_event(&JoyEvent::axis_motion(0, 0, 0, 0.4)).unwrap();
    clock.advance(0.75, 9);

    let read = |joy: &Joystick<Rc<ManualClock>>| {
        (
            joy.hold_time(1),
            joy.hold_frames(1),
            joy.just_pressed(1),
            joy.axis_hold_time(0),
            joy.axis_hold_frames(0),
            joy.snapshot(),
        )
    };
    assert_eq!(read(&joy), read(&joy));
}

#[test]
fn hold_is_monotonic_while_held() {
    let (clock, mut joy) = tracker_at(0.0, 0);
    joy.handle_event(&JoyEvent::button_down(0, 0, 0)).unwrap();
    joy.handle_event(&JoyEvent::axis_motion(0, 0, 0, 0.8)).unwrap();

    let mut last = (0.0, 0u64, 0.0, 0u64);
    for i in 0..50u64 {
        clock.advance(0.001 * i as f64, i % 3);
        // Keep the stick deflected.
        joy.handle_event(&JoyEvent::axis_motion(0, 0, 0, 0.8)).unwrap();
        let now = (
            joy.hold_time(0).unwrap(),
            joy.hold_frames(0).unwrap(),
            joy.axis_hold_time(0).unwrap(),
            joy.axis_hold_frames(0).unwrap(),
        );
        assert!(now.0 >= last.0 && now.1 >= last.1);
        assert!(now.2 >= last.2 && now.3 >= last.3);
        last = now;
    }
}

#[test]
fn sensitivity_is_clamped() {
    let (_clock, mut joy) = tracker_at(0.0, 0);
    joy.handle_event(&JoyEvent::axis_motion(0, 0, 5, 0.2)).unwrap();

    joy.set_sensitivity(5, -5.0);
    assert_eq!(joy.sensitivity(5), Some(0.0));

    joy.set_sensitivity(5, 5.0);
    assert_eq!(joy.sensitivity(5), Some(1.0));
}

#[test]
fn removed_device_drops_release() {
    let (clock, mut joy) = tracker_at(1.0, 10);
    joy.handle_event(&JoyEvent::button_down(0, 7, 2)).unwrap();
    clock.step(0.016);

    joy.handle_event(&JoyEvent::device_removed(0, 7)).unwrap();
    let before = (
        joy.is_pressed(2),
        joy.hold_frames(2),
        joy.release_frame(2),
        joy.snapshot().buttons,
    );

    assert_eq!(
        joy.handle_event(&JoyEvent::button_up(0, 7, 2)),
        Ok(Transition::Dropped)
    );
    let after = (
        joy.is_pressed(2),
        joy.hold_frames(2),
        joy.release_frame(2),
        joy.snapshot().buttons,
    );
    assert_eq!(before, after);

    // Re-attaching resumes event handling; history from before the removal is kept.
    joy.handle_event(&JoyEvent::device_added(0, 8)).unwrap();
    assert_eq!(joy.press_frame(2), Some(10));
    joy.handle_event(&JoyEvent::button_up(0, 8, 2)).unwrap();
    assert_eq!(joy.release_frame(2), Some(11));
}

#[test]
fn removed_device_history_survives_other_indices() {
    let (clock, mut joy) = tracker_at(1.0, 10);
    joy.handle_event(&JoyEvent::device_added(0, 7)).unwrap();
    joy.handle_event(&JoyEvent::button_down(0, 7, 2)).unwrap();
    clock.step(0.016);
    joy.handle_event(&JoyEvent::device_removed(0, 7)).unwrap();

    assert_eq!(
        joy.handle_event(&JoyEvent::button_up(1, 9, 2)),
        Ok(Transition::Dropped)
    );
    assert_eq!(joy.is_pressed(2), Some(true));
    assert_eq!(joy.release_frame(2), None);
    assert_eq!(joy.hold_frames(2), Some(1));
    let b = joy.button(2).unwrap();
    assert_eq!((b.device, b.instance_id), (0, 7));
}

#[test]
fn non_finite_sample_does_not_restart_motion() {
    let (clock, mut joy) = tracker_at(0.0, 0);
    joy.handle_event(&JoyEvent::axis_motion(0, 0, 0, 0.5)).unwrap();
    clock.step(0.016);
    assert_eq!(
        joy.handle_event(&JoyEvent::axis_motion(0, 0, 0, 0.0)),
        Ok(Transition::StoppedMoving { axis: 0 })
    );
    clock.step(0.016);

    let before = joy.snapshot();
    assert!(joy
        .handle_event(&JoyEvent::axis_motion(0, 0, 0, f32::NAN))
        .is_err());
    assert_eq!(joy.snapshot(), before);
    assert_eq!(joy.is_moving(0), Some(false));
    assert_eq!(joy.axis_hold_frames(0), None);
    assert_eq!(joy.frames_since_stop(0), Some(1));
}

#[test]
fn input_data_switches_between_tables() {
    let (_clock, mut joy) = tracker_at(0.0, 0);
    joy.handle_event(&JoyEvent::button_down(0, 0, 1)).unwrap();
    joy.handle_event(&JoyEvent::axis_motion(0, 0, 1, -0.6)).unwrap();

    assert!(matches!(joy.input_data(1), Some(ChannelData::Button(b)) if b.pressed));
    joy.set_input_kind(ChannelKind::Axis);
    assert!(matches!(joy.input_data(1), Some(ChannelData::Axis(a)) if a.value == -0.6));
    joy.set_input_kind(ChannelKind::Button);
    assert!(matches!(joy.input_data(1), Some(ChannelData::Button(_))));
}

#[test]
fn release_without_press_is_reported() {
    let (_clock, mut joy) = tracker_at(0.0, 0);
    assert_eq!(
        joy.handle_event(&JoyEvent::button_up(0, 0, 6)),
        Err(ReduceError::ReleaseWithoutPress {
            device: 0,
            button: 6
        })
    );
    assert_eq!(joy.is_pressed(6), None);
    assert!(joy.snapshot().buttons.is_empty());
}

#[test]
fn replay_recorded_session_through_manager() {
    let clock = Rc::new(ManualClock::new(0.0, 0));
    let mut mgr = JoystickManager::new(Rc::clone(&clock));
    let mut pad = VirtualPad::new(0, 1, "replay");
    pad.attach();
    pad.press(0);
    pad.move_axis(1, 0.9);
    mgr.add_source(pad);

    assert_eq!(mgr.pump().applied, 3);
    clock.step(0.016);

    let recorded = r#"[
        {"device": 0, "instance_id": 1, "type": "button_up", "button": 0},
        {"device": 0, "instance_id": 1, "type": "axis_motion", "axis": 1, "value": 0.0}
    ]"#;
    let events: Vec<JoyEvent> = serde_json::from_str(recorded).unwrap();
    let report = mgr.feed(&events);
    assert_eq!(report.applied, 2);
    assert!(report.is_clean());

    let joy = mgr.joystick(0).unwrap();
    assert_eq!(joy.just_released(0), Some(true));
    assert_eq!(joy.just_stopped_moving(1), Some(true));
    assert_eq!(joy.instance_id(), Some(1));
}
