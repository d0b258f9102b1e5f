//! Selector tables for the results-page detectors
//!
//! One table per detector holding its CSS selectors and regex patterns. The
//! defaults target the desktop results page markup; any field can be
//! overridden from the configuration file without touching detector code.
//!
//! Patterns with a capture group yield group 1, otherwise the whole match.

use serde::{Deserialize, Serialize};

/// Every detector's selector table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub page: PageSelectors,
    pub organic: OrganicSelectors,
    pub sitelinks: SitelinkSelectors,
    pub related: RelatedSelectors,
    pub pagination: PaginationSelectors,
    pub ads: AdSelectors,
    pub hotels: HotelSelectors,
    pub videos: VideoSelectors,
    pub shopping: ShoppingSelectors,
    pub top_stories: TopStorySelectors,
    pub locals: LocalSelectors,
    pub knowledge_graph: KnowledgeGraphSelectors,
}

/// Page-level markers and scalars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSelectors {
    /// Paragraphs that may carry the "did not match" notice
    pub no_results: String,
    /// Text identifying the notice among those paragraphs
    pub no_results_text: String,
    /// Body marker present on every results page
    pub results_page: String,
    pub keyword: String,
    pub result_stats: String,
    pub current_page: String,
    pub total_results_regex: String,
    pub time_taken_regex: String,
}

impl Default for PageSelectors {
    fn default() -> Self {
        Self {
            no_results: "#topstuff .card-section p".to_string(),
            no_results_text: " - did not match any documents.".to_string(),
            results_page: "body.srp".to_string(),
            keyword: "input[aria-label=\"Search\"]".to_string(),
            result_stats: "#result-stats".to_string(),
            current_page: "table.AaVjTc td.YyVfkd".to_string(),
            total_results_regex: r"([\d,]+) results".to_string(),
            time_taken_regex: r"([\d.]+) seconds".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganicSelectors {
    /// Alternative layouts of a result anchor, merged into one enumeration
    pub results: Vec<String>,
    pub featured: String,
    /// Container whose previous sibling holds the featured snippet text
    pub featured_container: String,
    pub title: String,
    pub snippet_terms: String,
    pub rich_snippet: String,
    pub rich_snippet_key: String,
    pub rich_snippet_value: String,
    pub action_menu_scope: String,
    pub action_menu_links: String,
    pub cached_label: String,
    pub similar_label: String,
}

impl Default for OrganicSelectors {
    fn default() -> Self {
        Self {
            results: vec![
                "#search #rso > .g div .yuRUbf > a".to_string(),
                "#search #rso > .g.tF2Cxc .yuRUbf > a".to_string(),
                "#search #rso > .hlcw0c div .yuRUbf > a".to_string(),
                "#search #rso .kp-wholepage .g div .yuRUbf > a".to_string(),
                "#search #rso > div .g.jNVrwc.Y4pkMc div .yuRUbf > a".to_string(),
            ],
            featured: "#search #rso > .ULSxyf > .g.mnr-c .c2xzTb div .yuRUbf > a".to_string(),
            featured_container: ".g".to_string(),
            title: "h3".to_string(),
            snippet_terms: "div > span > em".to_string(),
            rich_snippet: ".rEYMH".to_string(),
            rich_snippet_key: ".YrbPuc".to_string(),
            rich_snippet_value: ".wHYlTd".to_string(),
            action_menu_scope: ".yuRUbf".to_string(),
            action_menu_links: "span ol > li.action-menu-item > a".to_string(),
            cached_label: "Cached".to_string(),
            similar_label: "Similar".to_string(),
        }
    }
}

/// Sitelinks attached to organic results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SitelinkSelectors {
    pub card_scope: String,
    pub cards: String,
    pub card_href: String,
    pub card_title: String,
    pub card_snippet: String,
    pub inline_scope: String,
    pub inline: String,
}

impl Default for SitelinkSelectors {
    fn default() -> Self {
        Self {
            card_scope: "div.g".to_string(),
            cards: ".usJj9c".to_string(),
            card_href: "h3 a".to_string(),
            card_title: "h3".to_string(),
            card_snippet: ".st".to_string(),
            inline_scope: ".tF2Cxc".to_string(),
            inline: ".HiHjCd a".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelatedSelectors {
    pub keywords: String,
}

impl Default for RelatedSelectors {
    fn default() -> Self {
        Self {
            keywords: ".k8XOCe".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationSelectors {
    pub table: String,
    pub pages: String,
}

impl Default for PaginationSelectors {
    fn default() -> Self {
        Self {
            table: "table.AaVjTc".to_string(),
            pages: "td:not(.b) a.fl".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdSelectors {
    pub top: String,
    pub bottom: String,
    pub ads: String,
    pub title: String,
    pub url: String,
    pub snippet: String,
    /// Snippet-styled nodes inside these containers belong to a sitelink
    pub snippet_excluded_scope: String,
    /// Snippet-styled nodes matching this selector are not the ad body
    pub snippet_excluded: String,
    pub card_sitelinks: String,
    pub card_href: String,
    pub card_title: String,
    pub inline_sitelinks: String,
}

impl Default for AdSelectors {
    fn default() -> Self {
        Self {
            top: "#tads".to_string(),
            bottom: "#tadsb".to_string(),
            ads: ".uEierd".to_string(),
            title: "[role=\"heading\"]".to_string(),
            url: "a.sVXRqc".to_string(),
            snippet: ".MUxGbd.yDYNvb.lyLwlc".to_string(),
            snippet_excluded_scope: ".fCBnFe".to_string(),
            snippet_excluded: ".qjtaSd".to_string(),
            card_sitelinks: ".fCBnFe, .MhgNwc".to_string(),
            card_href: "h3 a".to_string(),
            card_title: "h3".to_string(),
            inline_sitelinks: ".bOeY0b a".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotelSelectors {
    pub feature: String,
    pub filters_section: String,
    pub search_title: String,
    pub check_in: String,
    pub check_out: String,
    pub guests: String,
    pub filter_titles: String,
    pub active_filter: String,
    pub cards: String,
    pub name: String,
    pub price: String,
    pub price_regex: String,
    pub currency_regex: String,
    pub rating: String,
    pub rating_regex: String,
    pub votes: String,
    pub deal_type: String,
    pub deal_details: String,
    pub original_price: String,
    pub amenities: String,
    pub more_hotels: String,
    pub more_hotels_regex: String,
}

impl Default for HotelSelectors {
    fn default() -> Self {
        Self {
            feature: ".zd2Jbb".to_string(),
            filters_section: ".x3UtIe".to_string(),
            search_title: ".gsmmde".to_string(),
            check_in: ".vpggTd.ed5F6c span".to_string(),
            check_out: ".vpggTd:not(.ed5F6c) span".to_string(),
            guests: ".viupMc".to_string(),
            filter_titles: ".d2IDkc".to_string(),
            active_filter: ".CWGqFd".to_string(),
            cards: ".ntKMYc .hmHBZd".to_string(),
            name: ".BTPx6e".to_string(),
            price: ".dv1Q3e".to_string(),
            price_regex: r"\d[\d,]*".to_string(),
            currency_regex: r"\D+".to_string(),
            rating: ".YDIN4c.YrbPuc".to_string(),
            rating_regex: r"\d\.\d".to_string(),
            votes: ".HypWnf.YrbPuc".to_string(),
            deal_type: ".NNPnSe".to_string(),
            deal_details: ".kOTJue.jj25pf".to_string(),
            original_price: ".AfCRQd".to_string(),
            amenities: ".I9B2He".to_string(),
            more_hotels: ".wUrVib".to_string(),
            more_hotels_regex: r"(?:\d+,?)+".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoSelectors {
    pub cards: String,
    pub title: String,
    pub sitelink: String,
    pub date: String,
    pub source: String,
    pub channel: String,
    pub duration: String,
}

impl Default for VideoSelectors {
    fn default() -> Self {
        Self {
            cards: ".RzdJxc".to_string(),
            title: ".fc9yUc.oz3cqf.p5AXld".to_string(),
            sitelink: "a".to_string(),
            date: ".hMJ0yc span".to_string(),
            source: ".pcJO7e cite".to_string(),
            channel: ".pcJO7e span".to_string(),
            duration: ".J1mWY".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShoppingSelectors {
    pub feature: String,
    pub offers: String,
    pub img_link: String,
    pub title: String,
    pub price: String,
    pub price_regex: String,
    pub currency_regex: String,
    pub shopping_site: String,
    /// Element whose `aria-label` carries the star rating
    pub rating: String,
    pub rating_regex: String,
    pub votes: String,
    pub commodity: String,
}

impl Default for ShoppingSelectors {
    fn default() -> Self {
        Self {
            feature: ".top-pla-group-inner".to_string(),
            offers: ".pla-unit:not(.view-all-unit)".to_string(),
            img_link: "a.pla-unit-img-container-link".to_string(),
            title: "a > .hCK2Zc".to_string(),
            price: ".e10twf".to_string(),
            price_regex: r"[\d,.]+".to_string(),
            currency_regex: r"\D+".to_string(),
            shopping_site: ".LbUacb".to_string(),
            rating: "a > span > g-review-stars > span".to_string(),
            rating_regex: r"\d\.\d".to_string(),
            votes: ".nbd1Bd .QhqGkb.RnJeZd".to_string(),
            commodity: ".cYBBsb".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopStorySelectors {
    pub feature: String,
    pub stories: String,
    pub title: String,
    pub publisher: String,
    pub published: String,
}

impl Default for TopStorySelectors {
    fn default() -> Self {
        Self {
            feature: ".F8yfEe".to_string(),
            stories: ".WlydOe".to_string(),
            title: "[role=\"heading\"]".to_string(),
            publisher: ".CEMjEf span".to_string(),
            published: ".S1FAPd".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalSelectors {
    pub feature: String,
    pub locals: String,
    pub name: String,
    pub rating: String,
    pub reviews: String,
    pub reviews_regex: String,
    pub expensiveness: String,
    pub local_type: String,
    pub type_regex: String,
    pub address: String,
    pub address_regex: String,
    pub distance: String,
    pub distance_regex: String,
    pub description: String,
}

impl Default for LocalSelectors {
    fn default() -> Self {
        Self {
            feature: "[data-hveid=\"CBYQAQ\"]".to_string(),
            locals: ".C8TUKc".to_string(),
            name: ".dbg0pd".to_string(),
            rating: ".YDIN4c.YrbPuc".to_string(),
            reviews: ".HypWnf.YrbPuc".to_string(),
            reviews_regex: "[0-9]+".to_string(),
            expensiveness: "[role=\"img\"]".to_string(),
            local_type: ".rllt__details div:nth-child(1)".to_string(),
            type_regex: r"\w+\s\w+".to_string(),
            address: ".rllt__details div:nth-child(2)".to_string(),
            address_regex: "[^·]*$".to_string(),
            distance: ".rllt__details div:nth-child(2)".to_string(),
            distance_regex: "^[^·]+".to_string(),
            description: "div.rllt__wrapped > span".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeGraphSelectors {
    pub panel: String,
    pub title: String,
    pub kg_type: String,
    /// Heading whose text decides the hotel variant
    pub hotel_marker: String,
    pub hotel_marker_text: String,
    pub hotel_type: String,
    pub category: String,
    pub rating: String,
    pub address: String,
    pub phone: String,
    pub reviewers: String,
    pub website: String,
    pub hotel_details: String,
    pub people_also_search_for: String,
    pub people_also_search_for_entry: String,
    pub people_also_search_for_name: String,
    pub people_also_search_for_type: String,
    pub people_also_search_for_link: String,
    pub hotel_ads: String,
    pub hotel_ad_host: String,
    pub hotel_ad_price: String,
    pub hotel_ad_details: String,
    pub properties: String,
    pub property: String,
    pub image: String,
    pub link: String,
}

impl Default for KnowledgeGraphSelectors {
    fn default() -> Self {
        Self {
            panel: ".I6TXqe".to_string(),
            title: ".qrShPb".to_string(),
            kg_type: ".wwUB2c".to_string(),
            hotel_marker: ".lLVkmd".to_string(),
            hotel_marker_text: "Hotel details".to_string(),
            hotel_type: "Hotel".to_string(),
            category: ".YhemCb".to_string(),
            rating: ".Aq14fc".to_string(),
            address: ".BOu6vf".to_string(),
            phone: ".LrzXr".to_string(),
            reviewers: ".hqzQac".to_string(),
            website: ".QqG1Sd a".to_string(),
            hotel_details: ".ggV7z".to_string(),
            people_also_search_for: ".zVvuGd".to_string(),
            people_also_search_for_entry: ".H93uF".to_string(),
            people_also_search_for_name: ".oBrLN".to_string(),
            people_also_search_for_type: ".xlBGCb".to_string(),
            people_also_search_for_link: ".hKuTtf a".to_string(),
            hotel_ads: ".B4MzEf".to_string(),
            hotel_ad_host: ".XmKKw".to_string(),
            hotel_ad_price: ".MOw9od".to_string(),
            hotel_ad_details: ".PMmhq".to_string(),
            properties: ".il6UG".to_string(),
            property: ".THkfd".to_string(),
            image: ".thumb".to_string(),
            link: "a".to_string(),
        }
    }
}
