use crate::{EventSource, JoyEvent};

/// Scripted controller: queues events for the next [`poll`](EventSource::poll).
///
/// Stands in for hardware in tests, demos and input replays.
#[derive(Debug, Default)]
pub struct VirtualPad {
    device: u32,
    instance_id: i32,
    name: String,
    events: Vec<JoyEvent>,
}

impl VirtualPad {
    pub fn new(device: u32, instance_id: i32, name: &str) -> Self {
        Self {
            device,
            instance_id,
            name: name.to_string(),
            events: Vec::new(),
        }
    }

    pub fn device(&self) -> u32 {
        self.device
    }

    pub fn instance_id(&self) -> i32 {
        self.instance_id
    }

    /// Inject a raw event. It is delivered as-is, even if it names another device.
    pub fn feed(&mut self, event: JoyEvent) {
        self.events.push(event);
    }

    pub fn attach(&mut self) {
        self.feed(JoyEvent::device_added(self.device, self.instance_id));
    }

    /// Queues a removal. A later [`reconnect`](Self::reconnect) gets a fresh instance id.
    pub fn detach(&mut self) {
        self.feed(JoyEvent::device_removed(self.device, self.instance_id));
    }

    /// Queues a re-attach under a new session id, like a replugged controller.
    pub fn reconnect(&mut self, instance_id: i32) {
        self.instance_id = instance_id;
        self.attach();
    }

    pub fn press(&mut self, button: u16) {
        self.feed(JoyEvent::button_down(self.device, self.instance_id, button));
    }

    pub fn release(&mut self, button: u16) {
        self.feed(JoyEvent::button_up(self.device, self.instance_id, button));
    }

    pub fn move_axis(&mut self, axis: u16, value: f32) {
        self.feed(JoyEvent::axis_motion(
            self.device,
            self.instance_id,
            axis,
            value,
        ));
    }

    pub fn pending(&self) -> usize {
        self.events.len()
    }
}

impl EventSource for VirtualPad {
    fn poll(&mut self) -> Vec<JoyEvent> {
        std::mem::take(&mut self.events)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
