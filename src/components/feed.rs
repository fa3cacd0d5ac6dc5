use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, ScrollBehavior,
    ScrollIntoViewOptions,
};
use yew::prelude::*;

use crate::error::{FeedError, Result};
use crate::model::FeedItem;
use crate::state::VisibilityReport;

const ITEM_SELECTOR: &str = ".feed-item";

#[derive(Properties, PartialEq, Clone)]
pub struct FeedProps {
    pub items: Rc<Vec<FeedItem>>,
    pub container_ref: NodeRef,
    pub threshold: f64,
    pub on_open: Callback<AttrValue>,
    pub on_visibility: Callback<Vec<VisibilityReport>>,
}

#[function_component(Feed)]
pub fn feed(props: &FeedProps) -> Html {
    // Observer over every rendered item, rooted at the scroll container.
    {
        let container_ref = props.container_ref.clone();
        let on_visibility = props.on_visibility.clone();
        let deps = (props.items.len(), props.threshold);
        use_effect_with(deps, move |&(_, threshold)| {
            let installed = container_ref
                .cast::<Element>()
                .ok_or_else(|| FeedError::Host("feed container is not mounted".to_string()))
                .and_then(|root| observe_items(&root, threshold, on_visibility));
            let installed = match installed {
                Ok(pair) => Some(pair),
                Err(err) => {
                    log::warn!("feed visibility observer not installed: {err}");
                    None
                }
            };
            move || {
                if let Some((observer, _callback)) = installed {
                    observer.disconnect();
                }
            }
        });
    }

    let items = props.items.iter().map(|item| {
        let onclick = {
            let on_open = props.on_open.clone();
            let image = item.image.clone();
            Callback::from(move |_: MouseEvent| on_open.emit(image.clone()))
        };
        html! {
            <div class="feed-item" key={item.index} data-index={item.index.to_string()}
                style="height:100%; scroll-snap-align:start; display:flex; align-items:center; justify-content:center;">
                <div class="image-container" style="width:100%; height:100%; display:flex; align-items:center; justify-content:center;">
                    <img src={item.image.clone()} alt="Feed Content" loading="lazy" {onclick}
                        style="max-width:100%; max-height:100%; object-fit:contain; cursor:zoom-in;" />
                </div>
            </div>
        }
    });

    html! {
        <div class="feed-container" ref={props.container_ref.clone()}
            style="height:100vh; overflow-y:scroll; scroll-snap-type:y mandatory;">
            { for items }
        </div>
    }
}

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

fn observe_items(
    root: &Element,
    threshold: f64,
    on_visibility: Callback<Vec<VisibilityReport>>,
) -> Result<(IntersectionObserver, ObserverCallback)> {
    let callback: ObserverCallback = Closure::wrap(Box::new(move |entries: js_sys::Array, _obs: IntersectionObserver| {
        let reports: Vec<VisibilityReport> = entries
            .iter()
            .filter_map(|v| v.dyn_into::<IntersectionObserverEntry>().ok())
            .filter_map(|entry| visibility_report(&entry))
            .collect();
        if !reports.is_empty() {
            on_visibility.emit(reports);
        }
    }) as Box<dyn FnMut(_, _)>);

    let init = IntersectionObserverInit::new();
    init.set_root(Some(root));
    init.set_threshold(&threshold.into());
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

    let nodes = root.query_selector_all(ITEM_SELECTOR)?;
    for i in 0..nodes.length() {
        if let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            observer.observe(&el);
        }
    }
    log::debug!("observing {} feed items at threshold {threshold}", nodes.length());
    Ok((observer, callback))
}

fn visibility_report(entry: &IntersectionObserverEntry) -> Option<VisibilityReport> {
    let raw = entry.target().get_attribute("data-index");
    match raw.as_deref().and_then(|s| s.parse::<usize>().ok()) {
        Some(index) => Some(VisibilityReport {
            index,
            ratio: entry.intersection_ratio(),
            intersecting: entry.is_intersecting(),
        }),
        None => {
            log::debug!("skipping observer entry with data-index {raw:?}");
            None
        }
    }
}

/// Smooth-scrolls the feed item at `index` into view.
pub fn scroll_to_item(container: &NodeRef, index: usize) {
    let Some(root) = container.cast::<Element>() else {
        return;
    };
    match root.query_selector(&item_selector(index)) {
        Ok(Some(item)) => {
            let opts = ScrollIntoViewOptions::new();
            opts.set_behavior(ScrollBehavior::Smooth);
            item.scroll_into_view_with_scroll_into_view_options(&opts);
        }
        Ok(None) => log::debug!("no feed item with index {index}"),
        Err(err) => log::warn!("feed item lookup failed: {}", FeedError::from(err)),
    }
}

fn item_selector(index: usize) -> String {
    format!("{ITEM_SELECTOR}[data-index=\"{index}\"]")
}
