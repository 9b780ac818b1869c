//! "Playback ended" fan-out from the audio thread to UI-thread subscribers.

use super::Cue;
use crate::lock_or_recover;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::{Arc, Mutex};

struct Subscriber {
    id: u64,
    cue: Cue,
    sender: Sender<Cue>,
}

#[derive(Default)]
struct HubState {
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

/// Shared registry of ended listeners. Cloned into the output callback.
#[derive(Clone, Default)]
pub struct EndedHub {
    state: Arc<Mutex<HubState>>,
}

impl EndedHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen for `cue` finishing on its own. Dropping the subscription
    /// unsubscribes.
    pub fn subscribe(&self, cue: Cue) -> EndedSubscription {
        let (sender, receiver) = unbounded();
        let mut state = lock_or_recover(&self.state, "ended hub subscribe");
        state.next_id += 1;
        let id = state.next_id;
        state.subscribers.push(Subscriber { id, cue, sender });
        EndedSubscription {
            id,
            hub: self.clone(),
            receiver,
        }
    }

    /// Report that `cue` played to its end. Pausing never calls this.
    pub fn notify(&self, cue: Cue) {
        let state = lock_or_recover(&self.state, "ended hub notify");
        for subscriber in state.subscribers.iter().filter(|s| s.cue == cue) {
            let _ = subscriber.sender.send(cue);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        lock_or_recover(&self.state, "ended hub count")
            .subscribers
            .len()
    }

    fn unsubscribe(&self, id: u64) {
        let mut state = lock_or_recover(&self.state, "ended hub unsubscribe");
        state.subscribers.retain(|s| s.id != id);
    }
}

/// Handle held by whoever wants to hear about a cue ending.
pub struct EndedSubscription {
    id: u64,
    hub: EndedHub,
    receiver: Receiver<Cue>,
}

impl EndedSubscription {
    /// Drain pending notifications; true if at least one arrived.
    pub fn take_ended(&self) -> bool {
        let mut ended = false;
        while self.receiver.try_recv().is_ok() {
            ended = true;
        }
        ended
    }
}

impl Drop for EndedSubscription {
    fn drop(&mut self) {
        self.hub.unsubscribe(self.id);
    }
}
