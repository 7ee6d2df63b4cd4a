use super::Event;

/// Receiver of interaction events emitted by [`crate::MindMapView`].
///
/// Implemented for `crossbeam` senders and for closures taking an [`Event`].
pub trait EventSink {
    fn send(&self, event: Event);
}

impl EventSink for crossbeam::channel::Sender<Event> {
    fn send(&self, event: Event) {
        // a dropped receiver only means nobody is listening anymore
        let _ = crossbeam::channel::Sender::send(self, event);
    }
}

impl<F> EventSink for F
where
    F: Fn(Event),
{
    fn send(&self, event: Event) {
        self(event);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::events::PayloadNodeClick;

    #[test]
    fn channel_sink_delivers() {
        let (tx, rx) = crossbeam::channel::unbounded();
        EventSink::send(&tx, Event::NodeClick(PayloadNodeClick { id: 3 }));
        assert_eq!(rx.try_recv().unwrap(), Event::NodeClick(PayloadNodeClick { id: 3 }));
    }

    #[test]
    fn closed_channel_is_ignored() {
        let (tx, rx) = crossbeam::channel::unbounded::<Event>();
        drop(rx);
        EventSink::send(&tx, Event::NodeClick(PayloadNodeClick { id: 0 }));
    }

    #[test]
    fn closure_sink_delivers() {
        let got = RefCell::new(Vec::new());
        let sink = |e: Event| got.borrow_mut().push(e);
        sink.send(Event::NodeClick(PayloadNodeClick { id: 1 }));
        assert_eq!(got.borrow().len(), 1);
    }
}
