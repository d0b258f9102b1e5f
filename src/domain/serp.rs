//! Output record for a parsed search results page.
//!
//! Every optional field means "feature not present on this page" when it is
//! `None`; list fields that the record always carries start out empty.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Message stored in [`Serp::error`] for a page that matched nothing.
pub const NO_RESULTS_MESSAGE: &str = "No results page";

/// Structured projection of one search results page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Serp {
    pub keyword: String,
    pub organic: Vec<OrganicResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_results: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_taken: Option<f64>,
    pub current_page: u32,
    pub pagination: Vec<PaginationEntry>,
    pub related_keywords: Vec<RelatedKeyword>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub videos: Option<Vec<VideoCard>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotels: Option<Hotels>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adwords: Option<Adwords>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_stories: Option<Vec<TopStory>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_results: Option<Vec<ShopResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locals: Option<Vec<Local>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge_graph: Option<KnowledgeGraph>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Default for Serp {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            organic: Vec::new(),
            total_results: None,
            time_taken: None,
            current_page: 1,
            pagination: Vec::new(),
            related_keywords: Vec::new(),
            videos: None,
            hotels: None,
            adwords: None,
            top_stories: None,
            shop_results: None,
            locals: None,
            knowledge_graph: None,
            error: None,
        }
    }
}

impl Serp {
    /// Record for a page carrying the "did not match any documents" marker
    pub fn no_results() -> Self {
        Self {
            error: Some(NO_RESULTS_MESSAGE.to_string()),
            ..Self::default()
        }
    }

    /// True when no detector contributed anything beyond the defaults
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Whether a link points at a site root or somewhere deeper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LinkType {
    Home,
    Landing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SitelinkType {
    Card,
    Inline,
}

/// Secondary link rendered under an organic result or an ad
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct Sitelink {
    pub title: String,
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(rename = "type")]
    pub sitelink_type: SitelinkType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct RichSnippet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct OrganicResult {
    pub position: u32,
    pub url: String,
    pub domain: String,
    pub link_type: LinkType,
    pub title: String,
    pub snippet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sitelinks: Option<Vec<Sitelink>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet_matched: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rich_snippet: Option<Vec<RichSnippet>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct Ad {
    pub position: u32,
    pub title: String,
    pub url: String,
    pub domain: String,
    pub link_type: LinkType,
    pub snippet: String,
    pub sitelinks: Vec<Sitelink>,
}

/// Ads grouped by the block they were rendered in
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct Adwords {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adwords_top: Option<Vec<Ad>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adwords_bottom: Option<Vec<Ad>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct PaginationEntry {
    pub page: u32,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct RelatedKeyword {
    pub keyword: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct VideoCard {
    pub title: String,
    pub sitelink: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub source: String,
    pub channel: String,
    pub video_duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct Hotels {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_filters: Option<HotelsSearchFilters>,
    pub hotels: Vec<Hotel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub more_hotels: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct HotelsSearchFilters {
    pub search_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guests: Option<u32>,
    pub filters: Vec<HotelFilter>,
}

/// One filter chip of the hotels search bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct HotelFilter {
    pub title: String,
    pub explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Review count as shown on a hotel card: either an exact number or a
/// compact label such as `5k+`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(untagged)]
pub enum Votes {
    Count(u64),
    Compact(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub votes: Option<Votes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal: Option<HotelDeal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amenities: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct HotelDeal {
    pub deal_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal_details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<u64>,
}

/// Entity side panel. The extended fields are only filled for hotels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeGraph {
    pub title: String,
    #[serde(rename = "type")]
    pub kg_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewers: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub people_also_search_for: Option<Vec<PeopleAlsoSearchFor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub people_also_search_for_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotel_details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotel_ads: Option<Vec<HotelAd>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotel_properties: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl KnowledgeGraph {
    pub fn new(title: String, kg_type: String) -> Self {
        Self {
            title,
            kg_type,
            category: None,
            rating: None,
            address: None,
            phone: None,
            reviewers: None,
            website: None,
            people_also_search_for: None,
            people_also_search_for_link: None,
            hotel_details: None,
            hotel_ads: None,
            hotel_properties: None,
            image: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct PeopleAlsoSearchFor {
    pub link: String,
    pub name: String,
    #[serde(rename = "type")]
    pub entity_type: String,
}

/// Booking offer listed inside a hotel knowledge panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct HotelAd {
    pub link: String,
    pub host: String,
    pub price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct Local {
    pub name: String,
    pub rating: String,
    pub reviews: String,
    pub expensiveness: usize,
    #[serde(rename = "type")]
    pub local_type: String,
    pub address: String,
    pub distance: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct TopStory {
    pub url: String,
    pub title: String,
    pub publisher: String,
    pub published: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct ShopResult {
    pub img_link: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub currency: String,
    pub shopping_site: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub votes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commodity: Option<String>,
}
