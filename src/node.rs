use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Result;

/// Proficiency tag attached to a roadmap entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
            Level::Expert => "Expert",
        };
        f.write_str(s)
    }
}

/// Named hyperlink, used for learning resources and certifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub name: String,
    pub url: String,
}

impl Link {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// One entry of a roadmap dataset as it is supplied by the host application.
///
/// The struct mirrors the JSON shape of the bundled datasets. Optional
/// sequences which are absent in the source deserialize as empty vectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapNode {
    pub name: String,
    /// Hex color (`#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`).
    pub color: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RoadmapNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<Link>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub certifications: Vec<Link>,
}

impl RoadmapNode {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            children: Vec::new(),
            level: None,
            details: None,
            resources: Vec::new(),
            certifications: Vec::new(),
        }
    }

    /// Parses a dataset from its JSON representation.
    ///
    /// # Errors
    ///
    /// [`crate::Error::Json`] if `json` is malformed or misses required fields.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_children(mut self, children: Vec<RoadmapNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_child(mut self, child: RoadmapNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_resource(mut self, resource: Link) -> Self {
        self.resources.push(resource);
        self
    }

    pub fn with_certification(mut self, certification: Link) -> Self {
        self.certifications.push(certification);
        self
    }

    /// Total number of entries in this subtree, the node itself included.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(RoadmapNode::count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_sequences_default_to_empty() {
        let node = RoadmapNode::from_json(r##"{"name":"Linux","color":"#FCC624"}"##).unwrap();

        assert_eq!(node.name, "Linux");
        assert!(node.children.is_empty());
        assert!(node.resources.is_empty());
        assert!(node.certifications.is_empty());
        assert_eq!(node.level, None);
    }

    #[test]
    fn nested_json_with_payload() {
        let json = r##"{
            "name": "Cybersecurity",
            "color": "#ef4444",
            "children": [
                {
                    "name": "Penetration Testing",
                    "color": "#be123c",
                    "level": "Intermediate",
                    "certifications": [{"name": "OSCP", "url": "#"}]
                }
            ]
        }"##;

        let node = RoadmapNode::from_json(json).unwrap();

        assert_eq!(node.count(), 2);
        let child = &node.children[0];
        assert_eq!(child.level, Some(Level::Intermediate));
        assert_eq!(child.certifications, vec![Link::new("OSCP", "#")]);
    }

    #[test]
    fn missing_name_is_rejected() {
        let res = RoadmapNode::from_json(r##"{"color":"#000"}"##);
        assert!(matches!(res, Err(crate::Error::Json(_))));
    }

    #[test]
    fn empty_sequences_are_not_serialized() {
        let node = RoadmapNode::new("A", "#000");
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(json, r##"{"name":"A","color":"#000"}"##);
    }

    #[test]
    fn level_display() {
        assert_eq!(Level::Expert.to_string(), "Expert");
    }
}
