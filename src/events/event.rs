use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadNodeClick {
    pub id: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadNodeToggle {
    pub id: usize,
    /// Expansion state after the toggle.
    pub expanded: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadDetailsOpen {
    pub id: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadDetailsClose {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadPan {
    pub diff: [f32; 2],
    pub new_pan: [f32; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadZoom {
    pub diff: f32,
    pub new_zoom: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadFit {
    pub pan: [f32; 2],
    pub zoom: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    NodeClick(PayloadNodeClick),
    NodeToggle(PayloadNodeToggle),
    DetailsOpen(PayloadDetailsOpen),
    DetailsClose(PayloadDetailsClose),
    Pan(PayloadPan),
    Zoom(PayloadZoom),
    /// Viewport was reset to the auto-fit transform.
    Fit(PayloadFit),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_contract_pan() {
        let event = Event::Pan(PayloadPan {
            diff: [1.0, 2.0],
            new_pan: [3.0, 4.0],
        });
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"Pan":{"diff":[1.0,2.0],"new_pan":[3.0,4.0]}}"#);

        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_contract_zoom() {
        let event = Event::Zoom(PayloadZoom {
            diff: 1.0,
            new_zoom: 2.0,
        });
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"Zoom":{"diff":1.0,"new_zoom":2.0}}"#);

        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_contract_node_toggle() {
        let event = Event::NodeToggle(PayloadNodeToggle {
            id: 4,
            expanded: true,
        });
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"NodeToggle":{"id":4,"expanded":true}}"#);

        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_contract_details() {
        let event = Event::DetailsOpen(PayloadDetailsOpen { id: 7 });
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"DetailsOpen":{"id":7}}"#);

        let json = serde_json::to_string(&Event::DetailsClose(PayloadDetailsClose {
            name: "Cloud".to_string(),
        }))
        .unwrap();
        assert_eq!(json, r#"{"DetailsClose":{"name":"Cloud"}}"#);
    }
}
