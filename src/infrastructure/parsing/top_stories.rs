//! "Top stories" news carousel

use scraper::{Html, Selector};
use tracing::debug;

use super::config::TopStorySelectors;
use super::context::ParseContext;
use super::dom;
use super::{compile_selector, FeatureDetector, ParsingResult};
use crate::domain::serp::{Serp, TopStory};
use crate::infrastructure::config::Feature;

pub struct TopStoriesDetector {
    feature: Selector,
    stories: Selector,
    title: Selector,
    publisher: Selector,
    published: Selector,
}

impl TopStoriesDetector {
    pub fn with_config(selectors: &TopStorySelectors) -> ParsingResult<Self> {
        Ok(Self {
            feature: compile_selector("top_stories.feature", &selectors.feature)?,
            stories: compile_selector("top_stories.stories", &selectors.stories)?,
            title: compile_selector("top_stories.title", &selectors.title)?,
            publisher: compile_selector("top_stories.publisher", &selectors.publisher)?,
            published: compile_selector("top_stories.published", &selectors.published)?,
        })
    }
}

impl FeatureDetector for TopStoriesDetector {
    fn feature(&self) -> Feature {
        Feature::Stories
    }

    fn detect(&self, html: &Html, _context: &ParseContext, serp: &mut Serp) {
        let Some(feature) = html.select(&self.feature).next() else {
            return;
        };

        let stories: Vec<TopStory> = feature
            .select(&self.stories)
            .map(|story| TopStory {
                url: dom::attr(story, "href").unwrap_or_default(),
                title: dom::select_text(story, &self.title),
                publisher: dom::select_text(story, &self.publisher),
                published: dom::select_text(story, &self.published),
            })
            .collect();

        debug!("Found {} top stories", stories.len());
        serp.top_stories = Some(stories);
    }
}
