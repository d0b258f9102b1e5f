//! Text and attribute accessors over `scraper` element handles
//!
//! Missing elements produce an empty string or `None`, never an error.

use scraper::{ElementRef, Selector};

use super::normalize::collapse_whitespace;

/// Whitespace-collapsed text content of an element
pub fn text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

/// Concatenated text of every descendant matching `selector`, collapsed
pub fn select_text(scope: ElementRef<'_>, selector: &Selector) -> String {
    let raw: String = scope
        .select(selector)
        .flat_map(|element| element.text())
        .collect();
    collapse_whitespace(&raw)
}

/// Text of the first descendant matching `selector`
pub fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope.select(selector).next().map(text)
}

pub fn attr(element: ElementRef<'_>, name: &str) -> Option<String> {
    element.value().attr(name).map(str::to_string)
}

/// Attribute of the first descendant matching `selector`
pub fn select_attr(scope: ElementRef<'_>, selector: &Selector, name: &str) -> Option<String> {
    scope
        .select(selector)
        .next()
        .and_then(|element| attr(element, name))
}

pub fn exists(scope: ElementRef<'_>, selector: &Selector) -> bool {
    scope.select(selector).next().is_some()
}

/// The element itself or its nearest ancestor matching `selector`
pub fn closest<'a>(element: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    if selector.matches(&element) {
        return Some(element);
    }
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| selector.matches(ancestor))
}

pub fn parent_element(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.parent().and_then(ElementRef::wrap)
}

/// Next sibling that is an element, skipping text and comment nodes
pub fn next_element_sibling(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

pub fn prev_element_sibling(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.prev_siblings().find_map(ElementRef::wrap)
}

pub fn child_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.children().filter_map(ElementRef::wrap)
}

/// `None` for empty strings
pub fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
