//! Domain module - output records of the extraction engine

pub mod serp;

// Re-export commonly used items for convenience
pub use serp::{
    Ad, Adwords, Hotel, HotelAd, HotelDeal, HotelFilter, Hotels, HotelsSearchFilters,
    KnowledgeGraph, LinkType, Local, OrganicResult, PaginationEntry, PeopleAlsoSearchFor,
    RelatedKeyword, RichSnippet, Serp, ShopResult, Sitelink, SitelinkType, TopStory, VideoCard,
    Votes, NO_RESULTS_MESSAGE,
};
