//! End-to-end extraction tests against a saved results page

use proptest::prelude::*;
use regex::Regex;
use rstest::{fixture, rstest};

use serp_extract::domain::serp::{LinkType, SitelinkType, NO_RESULTS_MESSAGE};
use serp_extract::infrastructure::parsing::normalize;
use serp_extract::infrastructure::{AppConfig, Feature, SelectorConfig};
use serp_extract::{FeatureOptions, ParseContext, Serp, SerpParser};

const RESULTS_PAGE: &str = include_str!("fixtures/results_page.html");

#[fixture]
fn parser() -> SerpParser {
    SerpParser::with_defaults()
        .unwrap()
        .with_context(ParseContext::default().with_year(2021))
}

#[fixture]
fn serp(parser: SerpParser) -> Serp {
    parser.parse(RESULTS_PAGE, None)
}

#[rstest]
fn page_scalars(serp: Serp) {
    assert_eq!(serp.keyword, "rust web framework");
    assert_eq!(serp.total_results, Some(1_234_567));
    assert_eq!(serp.time_taken, Some(0.45));
    assert_eq!(serp.current_page, 1);
    assert_eq!(serp.error, None);
}

#[rstest]
fn organic_positions_are_contiguous_with_featured_first(serp: Serp) {
    let positions: Vec<u32> = serp.organic.iter().map(|r| r.position).collect();
    assert_eq!(positions, vec![1, 2, 3, 4]);

    let featured = &serp.organic[0];
    assert_eq!(featured.featured, Some(true));
    assert_eq!(featured.url, "https://docs.rs/axum/latest/axum/");
    assert!(featured.snippet.starts_with("Axum is a web application framework"));
    assert!(serp.organic[1..].iter().all(|r| r.featured.is_none()));
}

#[rstest]
fn organic_fields(serp: Serp) {
    let actix = &serp.organic[1];
    assert_eq!(actix.title, "Actix Web");
    assert_eq!(actix.domain, "actix.rs");
    assert_eq!(actix.link_type, LinkType::Home);
    assert_eq!(
        actix.snippet_matched.as_deref(),
        Some(&["web framework".to_string(), "Rust".to_string()][..])
    );
    assert_eq!(actix.cached_url.as_deref(), Some("https://webcache.example/actix"));
    assert_eq!(actix.similar_url, None);

    let rocket = &serp.organic[2];
    let rich = rocket.rich_snippet.as_ref().unwrap();
    assert_eq!(rich.len(), 1);
    assert_eq!(rich[0].key.as_deref(), Some("Latest:"));
    assert_eq!(rich[0].value, "v0.5");
}

#[rstest]
fn sitelinks_are_never_mixed(serp: Serp) {
    let cards = serp.organic[1].sitelinks.as_ref().unwrap();
    assert_eq!(cards.len(), 2);
    assert!(cards.iter().all(|s| s.sitelink_type == SitelinkType::Card));
    assert_eq!(cards[0].title, "Documentation");
    assert_eq!(cards[0].snippet.as_deref(), Some("Getting started guides"));

    let inline = serp.organic[2].sitelinks.as_ref().unwrap();
    assert_eq!(inline.len(), 2);
    assert!(inline.iter().all(|s| s.sitelink_type == SitelinkType::Inline));

    assert_eq!(serp.organic[3].sitelinks, None);
}

#[rstest]
fn relative_links_resolve_against_search_origin(serp: Serp) {
    let result = &serp.organic[3];
    assert_eq!(result.url, "/url?q=https://www.arewewebyet.org/");
    assert_eq!(result.domain, "www.google.com");
    assert_eq!(result.link_type, LinkType::Landing);
}

#[rstest]
fn ads_are_numbered_per_block(serp: Serp) {
    let adwords = serp.adwords.unwrap();

    let top = adwords.adwords_top.unwrap();
    assert_eq!(top.iter().map(|ad| ad.position).collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(top[0].title, "Deploy Rust Apps Fast");
    assert_eq!(top[0].domain, "www.shuttle.example");
    assert_eq!(top[0].snippet, "Ship your Axum backend in minutes.");
    assert!(top[1].sitelinks.is_empty());

    let bottom = adwords.adwords_bottom.unwrap();
    assert_eq!(bottom.len(), 1);
    assert_eq!(bottom[0].position, 1);
}

#[rstest]
fn hotels(serp: Serp) {
    let hotels = serp.hotels.unwrap();
    assert_eq!(hotels.more_hotels, Some(1219));
    assert_eq!(hotels.hotels.len(), 1);
    assert_eq!(hotels.hotels[0].name, "Hotel Avenida");
    assert_eq!(hotels.hotels[0].price, Some(120));
    assert_eq!(hotels.hotels[0].rating, Some(4.5));

    let filters = hotels.search_filters.unwrap();
    assert_eq!(filters.search_title, "Hotels | Lisbon");
    assert_eq!(filters.check_in, chrono::NaiveDate::from_ymd_opt(2021, 11, 18));
    assert_eq!(filters.check_out, chrono::NaiveDate::from_ymd_opt(2021, 11, 19));
    assert_eq!(filters.guests, Some(2));
}

#[rstest]
fn secondary_features(serp: Serp) {
    let videos = serp.videos.unwrap();
    assert_eq!(videos[0].title, "Building a web server in Rust");
    assert_eq!(videos[0].channel, "Rust Videos");
    assert_eq!(videos[0].date, chrono::NaiveDate::from_ymd_opt(2019, 10, 1));

    let shop = serp.shop_results.unwrap();
    assert_eq!(shop[0].price, Some(39.99));
    assert_eq!(shop[0].rating, Some(4.8));
    assert_eq!(shop[0].votes.as_deref(), Some("412"));

    let stories = serp.top_stories.unwrap();
    assert_eq!(stories[0].title, "Axum 0.8 released");
    assert_eq!(stories[0].publisher, "Rust News");

    let locals = serp.locals.unwrap();
    assert_eq!(locals[0].name, "Rust Café");
    assert_eq!(locals[0].expensiveness, 2);

    let kg = serp.knowledge_graph.unwrap();
    assert_eq!(kg.title, "Rust");
    assert_eq!(kg.kg_type, "Programming language");

    assert_eq!(serp.related_keywords.len(), 2);
    assert_eq!(serp.pagination.len(), 3);
    assert_eq!(serp.pagination[0].page, 1);
    assert_eq!(serp.pagination[0].path, "");
}

#[rstest]
fn no_enabled_features_leaves_only_page_scalars(parser: SerpParser) {
    let serp = parser.parse(RESULTS_PAGE, Some(&FeatureOptions::none()));

    assert_eq!(serp.keyword, "rust web framework");
    assert!(serp.organic.is_empty());
    assert!(serp.pagination.is_empty());
    assert!(serp.related_keywords.is_empty());
    assert_eq!(serp.adwords, None);
    assert_eq!(serp.hotels, None);
    assert_eq!(serp.knowledge_graph, None);
}

#[rstest]
#[case::organic(Feature::Organic)]
#[case::ads(Feature::Ads)]
#[case::knowledge_graph(Feature::KnowledgeGraph)]
fn single_feature(parser: SerpParser, #[case] feature: Feature) {
    let mut options = FeatureOptions::none();
    options.set(feature, true);
    let serp = parser.parse(RESULTS_PAGE, Some(&options));

    assert_eq!(!serp.organic.is_empty(), feature == Feature::Organic);
    assert_eq!(serp.adwords.is_some(), feature == Feature::Ads);
    assert_eq!(serp.knowledge_graph.is_some(), feature == Feature::KnowledgeGraph);
    assert!(serp.videos.is_none());
}

#[rstest]
fn page_without_results_marker_is_empty(parser: SerpParser) {
    let html = RESULTS_PAGE.replace("class=\"srp\"", "class=\"hp\"");
    assert!(parser.parse(&html, None).is_empty());
}

#[rstest]
fn no_results_notice(parser: SerpParser) {
    let html = RESULTS_PAGE.replace(
        "<div id=\"search\">",
        "<div id=\"topstuff\"><div class=\"card-section\">\
         <p>Your search - <em>zzqx</em> - did not match any documents.</p></div></div>\
         <div id=\"search\">",
    );
    let serp = parser.parse(&html, None);

    assert_eq!(serp.error.as_deref(), Some(NO_RESULTS_MESSAGE));
    assert!(serp.organic.is_empty());
    assert_eq!(serp.adwords, None);
}

#[test]
fn detector_order_does_not_change_the_record() {
    let selectors = SelectorConfig::default();
    let context = ParseContext::default().with_year(2021);

    let forward = SerpParser::with_detectors(
        &selectors.page,
        SerpParser::default_detectors(&selectors).unwrap(),
    )
    .unwrap();

    let mut detectors = SerpParser::default_detectors(&selectors).unwrap();
    detectors[1..].reverse();
    let reversed = SerpParser::with_detectors(&selectors.page, detectors).unwrap();

    assert_eq!(
        forward.parse_with_context(RESULTS_PAGE, None, &context),
        reversed.parse_with_context(RESULTS_PAGE, None, &context)
    );
}

#[rstest]
fn record_serializes_with_camel_case_keys(serp: Serp) {
    let json = serde_json::to_value(&serp).unwrap();

    assert_eq!(json["totalResults"], 1_234_567);
    assert_eq!(json["relatedKeywords"][0]["keyword"], "rust web framework comparison");
    assert!(json.get("error").is_none());
}

#[test]
fn configuration_file_drives_the_parser() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[parsing]
search_origin = "https://www.google.pt"

[parsing.features]
organic = true

[parsing.selectors.related]
keywords = ".related-search"
"#,
    )
    .unwrap();

    let config = AppConfig::load(Some(&path)).unwrap();
    assert!(config.parsing.features.is_enabled(Feature::Organic));
    assert!(!config.parsing.features.is_enabled(Feature::Ads));
    assert_eq!(config.parsing.selectors.related.keywords, ".related-search");

    let parser = SerpParser::from_config(&config.parsing).unwrap();
    let serp = parser.parse(RESULTS_PAGE, Some(&config.parsing.features));
    assert_eq!(serp.organic[3].domain, "www.google.pt");
    assert_eq!(serp.adwords, None);
}

proptest! {
    #[test]
    fn collapse_whitespace_is_idempotent(text in "[ a-z\t\n]{0,40}") {
        let once = normalize::collapse_whitespace(&text);
        prop_assert!(!once.contains("  "));
        prop_assert_eq!(normalize::collapse_whitespace(&once), once.clone());
        prop_assert_eq!(once.trim(), once.as_str());
    }

    #[test]
    fn total_results_reads_grouped_counts(count in 0u64..10_000_000_000) {
        let digits = count.to_string();
        let mut grouped = String::new();
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        let pattern = Regex::new(r"([\d,]+) results").unwrap();
        let stats = format!("About {grouped} results (0.31 seconds)");
        prop_assert_eq!(normalize::total_results(&stats, &pattern), Some(count));
    }
}
