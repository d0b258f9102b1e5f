//! Hotels panel: search bar filters, offer cards and the "more hotels" count

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::config::HotelSelectors;
use super::context::ParseContext;
use super::dom;
use super::normalize;
use super::{compile_pattern, compile_selector, FeatureDetector, ParsingResult};
use crate::domain::serp::{
    Hotel, HotelDeal, HotelFilter, Hotels, HotelsSearchFilters, Serp, Votes,
};
use crate::infrastructure::config::Feature;

pub struct HotelsDetector {
    feature: Selector,
    filters_section: Selector,
    search_title: Selector,
    check_in: Selector,
    check_out: Selector,
    guests: Selector,
    filter_titles: Selector,
    active_filter: Selector,
    cards: Selector,
    name: Selector,
    price: Selector,
    price_regex: Regex,
    currency_regex: Regex,
    rating: Selector,
    rating_regex: Regex,
    votes: Selector,
    deal_type: Selector,
    deal_details: Selector,
    original_price: Selector,
    amenities: Selector,
    more_hotels: Selector,
    more_hotels_regex: Regex,
}

impl HotelsDetector {
    pub fn with_config(selectors: &HotelSelectors) -> ParsingResult<Self> {
        Ok(Self {
            feature: compile_selector("hotels.feature", &selectors.feature)?,
            filters_section: compile_selector("hotels.filters_section", &selectors.filters_section)?,
            search_title: compile_selector("hotels.search_title", &selectors.search_title)?,
            check_in: compile_selector("hotels.check_in", &selectors.check_in)?,
            check_out: compile_selector("hotels.check_out", &selectors.check_out)?,
            guests: compile_selector("hotels.guests", &selectors.guests)?,
            filter_titles: compile_selector("hotels.filter_titles", &selectors.filter_titles)?,
            active_filter: compile_selector("hotels.active_filter", &selectors.active_filter)?,
            cards: compile_selector("hotels.cards", &selectors.cards)?,
            name: compile_selector("hotels.name", &selectors.name)?,
            price: compile_selector("hotels.price", &selectors.price)?,
            price_regex: compile_pattern("hotels.price_regex", &selectors.price_regex)?,
            currency_regex: compile_pattern("hotels.currency_regex", &selectors.currency_regex)?,
            rating: compile_selector("hotels.rating", &selectors.rating)?,
            rating_regex: compile_pattern("hotels.rating_regex", &selectors.rating_regex)?,
            votes: compile_selector("hotels.votes", &selectors.votes)?,
            deal_type: compile_selector("hotels.deal_type", &selectors.deal_type)?,
            deal_details: compile_selector("hotels.deal_details", &selectors.deal_details)?,
            original_price: compile_selector("hotels.original_price", &selectors.original_price)?,
            amenities: compile_selector("hotels.amenities", &selectors.amenities)?,
            more_hotels: compile_selector("hotels.more_hotels", &selectors.more_hotels)?,
            more_hotels_regex: compile_pattern(
                "hotels.more_hotels_regex",
                &selectors.more_hotels_regex,
            )?,
        })
    }

    fn search_filters(
        &self,
        feature: ElementRef<'_>,
        context: &ParseContext,
    ) -> Option<HotelsSearchFilters> {
        let section = feature.select(&self.filters_section).next()?;

        let filters = section
            .select(&self.filter_titles)
            .map(|title| HotelFilter {
                title: dom::text(title),
                explanation: dom::next_element_sibling(title)
                    .map(dom::text)
                    .unwrap_or_default(),
                is_active: dom::closest(title, &self.active_filter).map(|_| true),
            })
            .collect();

        Some(HotelsSearchFilters {
            search_title: dom::select_text(section, &self.search_title),
            check_in: normalize::parse_date_with_year(
                &dom::select_text(section, &self.check_in),
                context.current_year,
            ),
            check_out: normalize::parse_date_with_year(
                &dom::select_text(section, &self.check_out),
                context.current_year,
            ),
            guests: normalize::parse_int(&dom::select_text(section, &self.guests))
                .and_then(|guests| u32::try_from(guests).ok()),
            filters,
        })
    }

    fn hotel(&self, card: ElementRef<'_>) -> Hotel {
        let price_text = dom::select_text(card, &self.price);
        let rating_text = dom::select_text(card, &self.rating);

        Hotel {
            name: dom::select_text(card, &self.name),
            currency: dom::non_empty(
                normalize::first_match(&price_text, &self.currency_regex)
                    .trim()
                    .to_string(),
            ),
            price: normalize::parse_int(normalize::first_match(&price_text, &self.price_regex)),
            rating: normalize::parse_float(normalize::first_match(&rating_text, &self.rating_regex)),
            votes: parse_votes(&dom::select_text(card, &self.votes)),
            deal: self.deal(card),
            amenities: dom::non_empty(dom::select_text(card, &self.amenities)),
        }
    }

    /// Deal badge, only when the card names a deal type
    fn deal(&self, card: ElementRef<'_>) -> Option<HotelDeal> {
        let deal_type = dom::non_empty(dom::select_text(card, &self.deal_type))?;
        let original_price = dom::select_text(card, &self.original_price);
        Some(HotelDeal {
            deal_type,
            deal_details: dom::non_empty(dom::select_text(card, &self.deal_details)),
            original_price: normalize::parse_int(normalize::first_match(
                &original_price,
                &self.price_regex,
            )),
        })
    }
}

/// `(1,234)` becomes a count, `(5k+)` stays a compact label
fn parse_votes(text: &str) -> Option<Votes> {
    let inner = normalize::strip_wrapping(text).replace(',', "");
    if inner.is_empty() {
        None
    } else if inner.chars().all(|c| c.is_ascii_digit()) {
        inner.parse().ok().map(Votes::Count)
    } else {
        Some(Votes::Compact(inner))
    }
}

impl FeatureDetector for HotelsDetector {
    fn feature(&self) -> Feature {
        Feature::Hotels
    }

    fn detect(&self, html: &Html, context: &ParseContext, serp: &mut Serp) {
        let Some(feature) = html.select(&self.feature).next() else {
            return;
        };

        let hotels: Vec<Hotel> = feature.select(&self.cards).map(|card| self.hotel(card)).collect();
        let more_hotels_text = dom::select_text(feature, &self.more_hotels);
        let more_hotels =
            normalize::parse_int(normalize::first_match(&more_hotels_text, &self.more_hotels_regex));

        debug!("Found {} hotel offers", hotels.len());
        serp.hotels = Some(Hotels {
            search_filters: self.search_filters(feature, context),
            hotels,
            more_hotels,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const PANEL: &str = r#"
        <div class="zd2Jbb">
            <div class="x3UtIe">
                <div class="gsmmde">Hotels | Lisbon</div>
                <div class="vpggTd ed5F6c"><span>Thu, Nov 18</span></div>
                <div class="vpggTd"><span>Fri, Nov 19</span></div>
                <div class="viupMc">2</div>
                <div class="CWGqFd"><span class="d2IDkc">Under $150</span><span>Price filter</span></div>
                <div><span class="d2IDkc">4+ rating</span><span>Guest rating</span></div>
            </div>
            <div class="ntKMYc">
                <div class="hmHBZd">
                    <div class="BTPx6e">Hotel Avenida</div>
                    <div class="dv1Q3e">$1,120</div>
                    <span class="YDIN4c YrbPuc">4.5</span>
                    <span class="HypWnf YrbPuc">(1,234)</span>
                    <span class="NNPnSe">GREAT DEAL</span>
                    <span class="kOTJue jj25pf">22% less than usual</span>
                    <span class="AfCRQd">$1,440</span>
                    <span class="I9B2He">Free Wi-Fi</span>
                </div>
                <div class="hmHBZd">
                    <div class="BTPx6e">Casa do Rio</div>
                    <span class="HypWnf YrbPuc">(5k+)</span>
                </div>
            </div>
            <div class="wUrVib">1,219 more hotels</div>
        </div>
    "#;

    fn detect(body: &str) -> Serp {
        let html = Html::parse_document(&format!("<html><body class=\"srp\">{body}</body></html>"));
        let detector = HotelsDetector::with_config(&HotelSelectors::default()).unwrap();
        let mut serp = Serp::default();
        detector.detect(&html, &ParseContext::default().with_year(2021), &mut serp);
        serp
    }

    #[test]
    fn test_more_hotels() {
        let hotels = detect(PANEL).hotels.unwrap();
        assert_eq!(hotels.more_hotels, Some(1219));
    }

    #[test]
    fn test_search_filters() {
        let filters = detect(PANEL).hotels.unwrap().search_filters.unwrap();

        assert_eq!(filters.search_title, "Hotels | Lisbon");
        assert_eq!(filters.check_in, NaiveDate::from_ymd_opt(2021, 11, 18));
        assert_eq!(filters.check_out, NaiveDate::from_ymd_opt(2021, 11, 19));
        assert_eq!(filters.guests, Some(2));
        assert_eq!(filters.filters.len(), 2);
        assert_eq!(filters.filters[0].title, "Under $150");
        assert_eq!(filters.filters[0].explanation, "Price filter");
        assert_eq!(filters.filters[0].is_active, Some(true));
        assert_eq!(filters.filters[1].is_active, None);
    }

    #[test]
    fn test_offer_cards() {
        let hotels = detect(PANEL).hotels.unwrap().hotels;
        assert_eq!(hotels.len(), 2);

        let avenida = &hotels[0];
        assert_eq!(avenida.name, "Hotel Avenida");
        assert_eq!(avenida.currency.as_deref(), Some("$"));
        assert_eq!(avenida.price, Some(1120));
        assert_eq!(avenida.rating, Some(4.5));
        assert_eq!(avenida.votes, Some(Votes::Count(1234)));
        assert_eq!(avenida.amenities.as_deref(), Some("Free Wi-Fi"));

        let deal = avenida.deal.as_ref().unwrap();
        assert_eq!(deal.deal_type, "GREAT DEAL");
        assert_eq!(deal.deal_details.as_deref(), Some("22% less than usual"));
        assert_eq!(deal.original_price, Some(1440));

        let rio = &hotels[1];
        assert_eq!(rio.price, None);
        assert_eq!(rio.rating, None);
        assert_eq!(rio.currency, None);
        assert_eq!(rio.votes, Some(Votes::Compact("5k+".to_string())));
        assert_eq!(rio.deal, None);
        assert_eq!(rio.amenities, None);
    }

    #[test]
    fn test_absent_panel() {
        assert!(detect(r#"<div class="ntKMYc"></div>"#).hotels.is_none());
    }

    #[test]
    fn test_parse_votes() {
        assert_eq!(parse_votes(""), None);
        assert_eq!(parse_votes("(12)"), Some(Votes::Count(12)));
    }
}
