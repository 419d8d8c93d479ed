//! View Descriptors
//!
//! Every node carries a fixed-shape list of presentation variants plus an
//! `activeView` selector naming one of them. The core treats these as opaque
//! payload, with one exception: the default section view's display state
//! (expanded / summary / collapsed) decides where new paragraphs go and what
//! read-mode toggling does.
//!
//! The variant lists are closed enums tagged on `type`, so a persisted
//! document with an unknown variant fails to decode instead of being carried
//! along silently.

use crate::config::ContainerDefaults;
use serde::{Deserialize, Serialize};

pub const PARAGRAPH_DEFAULT_VIEW: &str = "content/paragraph/default";
pub const HEADING_DEFAULT_VIEW: &str = "content/heading/default";
pub const SECTION_DEFAULT_VIEW: &str = "collection/section/default";
pub const SECTION_CONTAINER_DEFAULT_VIEW: &str = "collection/section-container/default";
pub const UNTITLED_SECTION_DEFAULT_VIEW: &str = "collection/untitled-section/default";
pub const SECTION_CONTAINER_CARD_VIEW: &str = "collection/section-container/card";

/// Display state of a section's default view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayState {
    Expanded,
    Summary,
    Collapsed,
}

impl DisplayState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayState::Expanded => "expanded",
            DisplayState::Summary => "summary",
            DisplayState::Collapsed => "collapsed",
        }
    }
}

fn default_variation() -> String {
    "default".to_string()
}

fn default_animation() -> String {
    "none".to_string()
}

/// Structured display state stored on the default section view (schema v1+)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionDisplay {
    pub state: DisplayState,
    #[serde(default = "default_variation")]
    pub variation: String,
    /// Added in schema v3
    #[serde(default = "default_animation")]
    pub animation: String,
}

impl SectionDisplay {
    pub fn new(state: DisplayState) -> Self {
        Self {
            state,
            variation: default_variation(),
            animation: default_animation(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ParagraphView {
    #[serde(rename = "content/paragraph/default")]
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HeadingView {
    #[serde(rename = "content/heading/default")]
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SectionView {
    #[serde(rename = "collection/section/default")]
    Default { state: SectionDisplay },
    #[serde(rename = "collection/section/static")]
    Static,
    #[serde(rename = "collection/section/page")]
    Page,
}

impl SectionView {
    /// The three section variants in canonical order
    pub fn canonical(state: DisplayState) -> Vec<SectionView> {
        vec![
            SectionView::Default {
                state: SectionDisplay::new(state),
            },
            SectionView::Static,
            SectionView::Page,
        ]
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            SectionView::Default { .. } => SECTION_DEFAULT_VIEW,
            SectionView::Static => "collection/section/static",
            SectionView::Page => "collection/section/page",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UntitledDisplayState {
    Expanded,
    Summary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UntitledSectionView {
    #[serde(rename = "collection/untitled-section/default")]
    Default { state: UntitledDisplayState },
    #[serde(rename = "static")]
    Static,
}

impl UntitledSectionView {
    pub fn canonical() -> Vec<UntitledSectionView> {
        vec![
            UntitledSectionView::Default {
                state: UntitledDisplayState::Expanded,
            },
            UntitledSectionView::Static,
        ]
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            UntitledSectionView::Default { .. } => UNTITLED_SECTION_DEFAULT_VIEW,
            UntitledSectionView::Static => "static",
        }
    }
}

/// Card layout state (`multilevel` added in schema v2)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardViewState {
    #[serde(rename = "perRow")]
    pub per_row: u8,
    pub gap: u16,
    #[serde(default)]
    pub multilevel: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InnerDirection {
    Column,
    Row,
}

/// One generation of a table-of-contents layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TocDirection {
    Column {
        #[serde(rename = "interGenerationGap")]
        inter_generation_gap: u16,
        #[serde(rename = "innerGap")]
        inner_gap: u16,
        gap: u16,
        #[serde(rename = "innerDirection")]
        inner_direction: InnerDirection,
    },
    Row {
        #[serde(rename = "perRow")]
        per_row: u8,
        #[serde(rename = "interGenerationGap")]
        inter_generation_gap: u16,
        #[serde(rename = "innerGap")]
        inner_gap: u16,
        gap: u16,
        #[serde(rename = "innerDirection")]
        inner_direction: InnerDirection,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableOfContentsViewState {
    pub directions: Vec<TocDirection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SidebarViewState {
    #[serde(rename = "percentageWidth")]
    pub percentage_width: u8,
    #[serde(rename = "activeIndex")]
    pub active_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabsViewState {
    pub gap: u16,
    #[serde(rename = "activeIndex")]
    pub active_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SectionContainerView {
    #[serde(rename = "collection/section-container/default")]
    Default,
    #[serde(rename = "collection/section-container/static")]
    Static,
    #[serde(rename = "collection/section-container/card")]
    Card { state: CardViewState },
    #[serde(rename = "collection/section-container/brick")]
    Brick,
    #[serde(rename = "collection/section-container/table-of-contents")]
    TableOfContents { state: TableOfContentsViewState },
    #[serde(rename = "collection/section-container/sidebar")]
    Sidebar { state: SidebarViewState },
    #[serde(rename = "collection/section-container/tabs")]
    Tabs { state: TabsViewState },
}

impl SectionContainerView {
    /// The seven container variants in canonical order
    pub fn canonical(defaults: &ContainerDefaults) -> Vec<SectionContainerView> {
        vec![
            SectionContainerView::Default,
            SectionContainerView::Static,
            SectionContainerView::Card {
                state: CardViewState {
                    per_row: defaults.card_per_row,
                    gap: defaults.card_gap,
                    multilevel: false,
                },
            },
            SectionContainerView::Brick,
            SectionContainerView::TableOfContents {
                state: TableOfContentsViewState::default(),
            },
            SectionContainerView::Sidebar {
                state: SidebarViewState {
                    percentage_width: defaults.sidebar_percentage_width,
                    active_index: 0,
                },
            },
            SectionContainerView::Tabs {
                state: TabsViewState {
                    gap: defaults.tabs_gap,
                    active_index: 0,
                },
            },
        ]
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            SectionContainerView::Default => SECTION_CONTAINER_DEFAULT_VIEW,
            SectionContainerView::Static => "collection/section-container/static",
            SectionContainerView::Card { .. } => SECTION_CONTAINER_CARD_VIEW,
            SectionContainerView::Brick => "collection/section-container/brick",
            SectionContainerView::TableOfContents { .. } => {
                "collection/section-container/table-of-contents"
            }
            SectionContainerView::Sidebar { .. } => "collection/section-container/sidebar",
            SectionContainerView::Tabs { .. } => "collection/section-container/tabs",
        }
    }
}

/// True when `views` lists exactly the `expected` variant names in order
pub(crate) fn has_canonical_shape<'a>(
    views: impl ExactSizeIterator<Item = &'a str>,
    expected: &[&str],
) -> bool {
    views.len() == expected.len() && views.zip(expected).all(|(actual, want)| actual == *want)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_section_view_serialization_contract() {
        let views = SectionView::canonical(DisplayState::Summary);
        let value = serde_json::to_value(&views).unwrap();

        assert_eq!(
            value,
            json!([
                {
                    "type": "collection/section/default",
                    "state": { "state": "summary", "variation": "default", "animation": "none" }
                },
                { "type": "collection/section/static" },
                { "type": "collection/section/page" }
            ])
        );
    }

    #[test]
    fn test_container_view_defaults() {
        let views = SectionContainerView::canonical(&ContainerDefaults::default());
        let value = serde_json::to_value(&views).unwrap();

        assert_eq!(value[2]["state"], json!({ "perRow": 2, "gap": 16, "multilevel": false }));
        assert_eq!(value[4]["state"], json!({ "directions": [] }));
        assert_eq!(value[5]["state"], json!({ "percentageWidth": 30, "activeIndex": 0 }));
        assert_eq!(value[6]["state"], json!({ "gap": 16, "activeIndex": 0 }));
    }

    #[test]
    fn test_toc_direction_decodes_both_shapes() {
        let directions: Vec<TocDirection> = serde_json::from_value(json!([
            { "type": "column", "gap": 72, "interGenerationGap": 32, "innerGap": 4, "innerDirection": "column" },
            { "type": "row", "perRow": 3, "gap": 16, "interGenerationGap": 16, "innerGap": 16, "innerDirection": "column" }
        ]))
        .unwrap();

        assert!(matches!(directions[0], TocDirection::Column { gap: 72, .. }));
        assert!(matches!(directions[1], TocDirection::Row { per_row: 3, .. }));
    }

    #[test]
    fn test_legacy_card_state_defaults_multilevel() {
        let view: SectionContainerView = serde_json::from_value(json!({
            "type": "collection/section-container/card",
            "state": { "perRow": 3, "gap": 4 }
        }))
        .unwrap();

        match view {
            SectionContainerView::Card { state } => assert!(!state.multilevel),
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[test]
    fn test_canonical_shape_check() {
        let views = SectionView::canonical(DisplayState::Expanded);
        assert!(has_canonical_shape(
            views.iter().map(SectionView::type_name),
            &[SECTION_DEFAULT_VIEW, "collection/section/static", "collection/section/page"],
        ));

        let reordered = [SectionView::Static, SectionView::Page];
        assert!(!has_canonical_shape(
            reordered.iter().map(SectionView::type_name),
            &[SECTION_DEFAULT_VIEW, "collection/section/static", "collection/section/page"],
        ));
    }
}
