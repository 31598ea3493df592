use joystate::backends::VirtualPad;
use joystate::{FrameClock, JoystickManager, Logger, TransitionFilter};
use std::rc::Rc;

fn main() {
    let clock = Rc::new(FrameClock::new());
    let mut mgr = JoystickManager::new(Rc::clone(&clock));
    mgr.add_listener(Logger::new(), TransitionFilter::EdgesOnly, None);

    // Script a few frames of input on a virtual pad
    let mut pad = VirtualPad::new(0, 1, "Demo Virtual Pad");
    pad.attach();
    mgr.add_source(pad);

    for frame in 0..5u16 {
        clock.tick();
        if frame == 1 {
            mgr.feed(&[
                joystate::JoyEvent::button_down(0, 1, 0),
                joystate::JoyEvent::axis_motion(0, 1, 0, 0.75),
            ]);
        }
        if frame == 3 {
            mgr.feed(&[
                joystate::JoyEvent::button_up(0, 1, 0),
                joystate::JoyEvent::axis_motion(0, 1, 0, 0.0),
            ]);
        }
        let report = mgr.pump();
        for (event, err) in &report.rejected {
            println!("frame {frame}: rejected {event:?}: {err}");
        }

        if let Some(joy) = mgr.joystick(0) {
            println!(
                "frame {}: pressed={:?} just_released={:?} hold_frames={:?} moving={:?}",
                frame,
                joy.is_pressed(0),
                joy.just_released(0),
                joy.hold_frames(0),
                joy.is_moving(0),
            );
        }
        std::thread::sleep(std::time::Duration::from_millis(16));
    }
}
