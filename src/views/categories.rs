use crate::types::model::Tag;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Language,
    Vision,
    Audio,
    Video,
    #[serde(rename = "3d")]
    ThreeD,
    TimeSeries,
    Tabular,
    ReinforcementLearning,
    Multimodal,
    Other,
}

impl Category {
    pub fn id(self) -> &'static str {
        match self {
            Self::Language => "language",
            Self::Vision => "vision",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::ThreeD => "3d",
            Self::TimeSeries => "time-series",
            Self::Tabular => "tabular",
            Self::ReinforcementLearning => "reinforcement-learning",
            Self::Multimodal => "multimodal",
            Self::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Language => "Language",
            Self::Vision => "Computer Vision",
            Self::Audio => "Audio",
            Self::Video => "Video",
            Self::ThreeD => "3D",
            Self::TimeSeries => "Time Series",
            Self::Tabular => "Tabular",
            Self::ReinforcementLearning => "Reinforcement Learning",
            Self::Multimodal => "Multimodal",
            Self::Other => "Other",
        }
    }

    fn from_sub_type(sub_type: &str) -> Option<Self> {
        match sub_type {
            "nlp" => Some(Self::Language),
            "cv" => Some(Self::Vision),
            "audio" => Some(Self::Audio),
            "video" => Some(Self::Video),
            "multimodal" => Some(Self::Multimodal),
            "3d" => Some(Self::ThreeD),
            "tabular" => Some(Self::Tabular),
            "rl" => Some(Self::ReinforcementLearning),
            "time_series" => Some(Self::TimeSeries),
            _ => None,
        }
    }
}

// Checked in order; the first group with a matching keyword wins.
const KEYWORDS: [(Category, &[&str]); 8] = [
    (
        Category::Vision,
        &["image", "vision", "segmentation", "detection", "depth"],
    ),
    (
        Category::Language,
        &["text", "summarization", "translation", "question", "language"],
    ),
    (Category::Audio, &["audio", "speech", "asr", "tts"]),
    (Category::Video, &["video"]),
    (Category::ThreeD, &["3d", "point-cloud", "mesh"]),
    (Category::TimeSeries, &["time-series", "forecast"]),
    (Category::Tabular, &["tabular"]),
    (Category::ReinforcementLearning, &["reinforcement"]),
];

pub fn classify_tag(tag: &Tag) -> Category {
    if let Some(category) = tag.sub_type.as_deref().and_then(Category::from_sub_type) {
        return category;
    }
    KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| tag.id.contains(keyword)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup {
    pub id: &'static str,
    pub label: &'static str,
    pub tags: Vec<Tag>,
}

pub fn group_pipeline_tags(tags: &[Tag]) -> Vec<CategoryGroup> {
    let mut grouped: BTreeMap<Category, Vec<Tag>> = BTreeMap::new();
    for tag in tags {
        grouped.entry(classify_tag(tag)).or_default().push(tag.clone());
    }
    let mut groups = grouped
        .into_iter()
        .map(|(category, tags)| CategoryGroup {
            id: category.id(),
            label: category.label(),
            tags,
        })
        .collect::<Vec<_>>();
    groups.sort_by(|a, b| a.label.cmp(b.label));
    groups
}

pub fn category_for_pipeline_tag(pipeline_tag: &str, known: &[Tag]) -> Category {
    known
        .iter()
        .find(|tag| tag.id == pipeline_tag)
        .map(classify_tag)
        .unwrap_or_else(|| classify_tag(&Tag::pipeline(pipeline_tag)))
}
