use std::rc::Rc;
use yew::prelude::*;

use super::feed::{scroll_to_item, Feed};
use super::indicators::Indicators;
use super::viewer::Viewer;
use crate::model::FeedConfig;
use crate::state::{IndicatorAction, IndicatorState, ViewerAction, ViewerState, VisibilityReport};

#[derive(Properties, PartialEq, Clone)]
pub struct AppProps {
    pub config: FeedConfig,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let items = use_memo(props.config.clone(), |config| config.feed_items());
    let viewer = use_reducer_eq({
        let limits = props.config.zoom_limits();
        move || ViewerState::new(limits)
    });
    let indicators = use_reducer_eq({
        let len = items.len();
        let threshold = props.config.focus_threshold;
        move || IndicatorState::new(len, threshold)
    });
    let feed_ref = use_node_ref();

    let on_open = {
        let viewer = viewer.clone();
        Callback::from(move |image: AttrValue| {
            log::debug!("opening viewer on {image}");
            viewer.dispatch(ViewerAction::Open(image));
        })
    };
    let on_visibility = {
        let indicators = indicators.clone();
        Callback::from(move |reports: Vec<VisibilityReport>| {
            indicators.dispatch(IndicatorAction::Observed(reports));
        })
    };
    let on_select = {
        let feed_ref = feed_ref.clone();
        Callback::from(move |index: usize| {
            log::debug!("scrolling to feed item {index}");
            scroll_to_item(&feed_ref, index);
        })
    };

    html! {
        <div style="position:relative; width:100vw; height:100vh; background:#000; overflow:hidden;">
            <Feed
                items={Rc::clone(&items)}
                container_ref={feed_ref.clone()}
                threshold={props.config.focus_threshold}
                {on_open}
                {on_visibility}
            />
            <Indicators state={indicators.clone()} {on_select} />
            <Viewer state={viewer.clone()} dismiss_delay_ms={props.config.dismiss_delay_ms} />
        </div>
    }
}
