mod event;
mod sink;

pub use event::{
    Event, PayloadDetailsClose, PayloadDetailsOpen, PayloadFit, PayloadNodeClick,
    PayloadNodeToggle, PayloadPan, PayloadZoom,
};

pub use sink::EventSink;
