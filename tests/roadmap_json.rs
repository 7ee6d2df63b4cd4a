use egui::Color32;
use egui_mindmap::{Error, Level, RoadmapNode, Tree};

const ROADMAP: &str = r##"{
  "name": "CyberSecurity",
  "color": "#1e293b",
  "children": [
    {
      "name": "Fundamentals",
      "color": "#f43f5e",
      "level": "Beginner",
      "certifications": [{ "name": "CompTIA Security+", "url": "#" }],
      "children": [
        { "name": "Networking", "color": "#0ea5e9", "details": "TCP/IP, OSI model." },
        { "name": "Linux", "color": "#0ea5e9" }
      ]
    },
    {
      "name": "Web",
      "color": "#fb923c",
      "resources": [
        { "name": "PortSwigger Academy", "url": "https://portswigger.net/web-security" }
      ]
    }
  ]
}"##;

#[test]
fn test_parse_dataset() {
    let root = RoadmapNode::from_json(ROADMAP).expect("parse roadmap");
    assert_eq!(root.name, "CyberSecurity");
    assert_eq!(root.count(), 5);

    let fundamentals = &root.children[0];
    assert_eq!(fundamentals.level, Some(Level::Beginner));
    assert_eq!(fundamentals.certifications[0].name, "CompTIA Security+");
    assert!(fundamentals.resources.is_empty());
    assert!(root.children[1].children.is_empty());
}

#[test]
fn test_serialize_skips_empty_fields() {
    let leaf = RoadmapNode::new("Linux", "#0ea5e9");
    let json = serde_json::to_string(&leaf).expect("serialize node");
    assert_eq!(json, r##"{"name":"Linux","color":"#0ea5e9"}"##);

    let back = RoadmapNode::from_json(&json).expect("parse node");
    assert_eq!(back, leaf);
}

#[test]
fn test_tree_assigns_pre_order_ids() {
    let tree = Tree::new(&RoadmapNode::from_json(ROADMAP).unwrap()).unwrap();
    let names: Vec<_> = tree.iter().map(|(_, n)| n.name().to_string()).collect();
    assert_eq!(
        names,
        vec!["CyberSecurity", "Fundamentals", "Networking", "Linux", "Web"]
    );

    let linux = tree.find("Linux").unwrap();
    assert_eq!(linux.index(), 3);
    assert_eq!(tree.depth(linux), Some(2));
    assert_eq!(
        tree.node(tree.root()).unwrap().color(),
        Color32::from_rgb(0x1e, 0x29, 0x3b)
    );
}

#[test]
fn test_invalid_json() {
    let err = RoadmapNode::from_json(r#"{"name": "A"}"#).unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn test_invalid_color() {
    let root = RoadmapNode::new("A", "#000").with_child(RoadmapNode::new("B", "blue"));
    match Tree::new(&root) {
        Err(Error::InvalidColor { name, value }) => {
            assert_eq!(name, "B");
            assert_eq!(value, "blue");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_empty_name() {
    let root = RoadmapNode::new("A", "#000").with_children(vec![
        RoadmapNode::new("B", "#000"),
        RoadmapNode::new("C", "#000").with_child(RoadmapNode::new(" ", "#000")),
    ]);
    match Tree::new(&root) {
        Err(Error::EmptyName { path }) => assert_eq!(path, vec![1, 0]),
        other => panic!("unexpected result: {other:?}"),
    }
}
