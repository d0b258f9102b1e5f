//! Video carousel cards

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::config::VideoSelectors;
use super::context::ParseContext;
use super::dom;
use super::normalize;
use super::{compile_selector, FeatureDetector, ParsingResult};
use crate::domain::serp::{Serp, VideoCard};
use crate::infrastructure::config::Feature;

/// Separator rendered between the source and the channel name
const CHANNEL_SEPARATOR: char = '·';

pub struct VideosDetector {
    cards: Selector,
    title: Selector,
    sitelink: Selector,
    date: Selector,
    source: Selector,
    channel: Selector,
    duration: Selector,
}

impl VideosDetector {
    pub fn with_config(selectors: &VideoSelectors) -> ParsingResult<Self> {
        Ok(Self {
            cards: compile_selector("videos.cards", &selectors.cards)?,
            title: compile_selector("videos.title", &selectors.title)?,
            sitelink: compile_selector("videos.sitelink", &selectors.sitelink)?,
            date: compile_selector("videos.date", &selectors.date)?,
            source: compile_selector("videos.source", &selectors.source)?,
            channel: compile_selector("videos.channel", &selectors.channel)?,
            duration: compile_selector("videos.duration", &selectors.duration)?,
        })
    }

    fn card(&self, card: ElementRef<'_>) -> VideoCard {
        let channel = dom::select_text(card, &self.channel);
        VideoCard {
            title: dom::select_text(card, &self.title),
            sitelink: dom::select_attr(card, &self.sitelink, "href").unwrap_or_default(),
            date: normalize::parse_display_date(&dom::select_text(card, &self.date)),
            source: dom::select_text(card, &self.source),
            channel: channel
                .trim_start_matches(CHANNEL_SEPARATOR)
                .trim_start()
                .to_string(),
            video_duration: dom::select_text(card, &self.duration),
        }
    }
}

impl FeatureDetector for VideosDetector {
    fn feature(&self) -> Feature {
        Feature::Videos
    }

    fn detect(&self, html: &Html, _context: &ParseContext, serp: &mut Serp) {
        let videos: Vec<VideoCard> = html.select(&self.cards).map(|card| self.card(card)).collect();
        if videos.is_empty() {
            return;
        }

        debug!("Found {} video cards", videos.len());
        serp.videos = Some(videos);
    }
}
