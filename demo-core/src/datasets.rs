use egui::Color32;
use egui_mindmap::RoadmapNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    General,
    Cybersecurity,
}

impl Dataset {
    pub const ALL: [Dataset; 2] = [Dataset::General, Dataset::Cybersecurity];

    pub fn label(self) -> &'static str {
        match self {
            Dataset::General => "General Tech Roadmap",
            Dataset::Cybersecurity => "Cybersecurity Roadmap",
        }
    }

    fn json(self) -> &'static str {
        match self {
            Dataset::General => include_str!("../assets/general.json"),
            Dataset::Cybersecurity => include_str!("../assets/cybersecurity.json"),
        }
    }

    pub fn load(self) -> egui_mindmap::Result<RoadmapNode> {
        RoadmapNode::from_json(self.json())
    }
}

/// Colors of the top-level domains, shown as a legend next to the map.
pub const DOMAIN_COLORS: [(&str, Color32); 13] = [
    ("CyberSecurity", Color32::from_rgb(0xef, 0x44, 0x44)),
    ("Full Stack Dev", Color32::from_rgb(0xf9, 0x73, 0x16)),
    ("Back-End Dev", Color32::from_rgb(0xea, 0xb3, 0x08)),
    ("Apps dev", Color32::from_rgb(0x3b, 0x82, 0xf6)),
    ("Low-Code/No-Code", Color32::from_rgb(0xec, 0x48, 0x99)),
    ("Data Science", Color32::from_rgb(0x8b, 0x5c, 0xf6)),
    ("Artificial Intelligence", Color32::from_rgb(0x22, 0xc5, 0x5e)),
    ("Machine Learning", Color32::from_rgb(0x06, 0xb6, 0xd4)),
    ("DevOps", Color32::from_rgb(0x64, 0x74, 0x8b)),
    ("Cloud Computing", Color32::from_rgb(0x1d, 0x4e, 0xd8)),
    ("Networking", Color32::from_rgb(0x05, 0x96, 0x69)),
    ("Operating Systems", Color32::from_rgb(0x4f, 0x46, 0xe5)),
    ("Programming Languages", Color32::from_rgb(0xd9, 0x46, 0xef)),
];
