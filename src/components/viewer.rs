use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, TouchEvent};
use yew::prelude::*;

use crate::error::{FeedError, Result};
use crate::state::{touch_points, ViewerAction, ViewerState};

/// Clicks landing on these classes count as a background tap.
const BACKDROP_CLASS: &str = "fs-viewer";
const FRAME_CLASS: &str = "fs-image-wrapper";

#[derive(Properties, PartialEq, Clone)]
pub struct ViewerProps {
    pub state: UseReducerHandle<ViewerState>,
    pub dismiss_delay_ms: u32,
}

/// The close whose release timer is currently scheduled.
#[derive(Debug, Default)]
pub struct PendingRelease {
    ticket: u32,
    timeout_id: Option<i32>,
}

#[function_component(Viewer)]
pub fn viewer(props: &ViewerProps) -> Html {
    let img_ref = use_node_ref();
    let pending = use_mut_ref(PendingRelease::default);

    // Touch listeners go on manually so touchmove stays non-passive and
    // preventDefault keeps the page from zooming or scrolling underneath.
    {
        let img_ref = img_ref.clone();
        let state = props.state.clone();
        use_effect_with((), move |_| {
            let img = img_ref.cast::<HtmlElement>();
            let touch_start_cb = touch_listener(&state, false, |e| ViewerAction::TouchStart(touch_points(&e.touches())));
            let touch_move_cb = touch_listener(&state, true, |e| ViewerAction::TouchMove(touch_points(&e.touches())));
            let touch_end_cb = touch_listener(&state, false, |_| ViewerAction::TouchEnd);

            if let Some(img) = &img {
                let listeners = [
                    ("touchstart", &touch_start_cb),
                    ("touchmove", &touch_move_cb),
                    ("touchend", &touch_end_cb),
                    ("touchcancel", &touch_end_cb),
                ];
                for (event, cb) in listeners {
                    if let Err(err) = img.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref()) {
                        log::warn!("{event} listener not attached: {}", FeedError::from(err));
                    }
                }
            } else {
                log::warn!("viewer image not mounted; touch gestures disabled");
            }

            move || {
                if let Some(img) = img {
                    let _ = img.remove_event_listener_with_callback("touchstart", touch_start_cb.as_ref().unchecked_ref());
                    let _ = img.remove_event_listener_with_callback("touchmove", touch_move_cb.as_ref().unchecked_ref());
                    let _ = img.remove_event_listener_with_callback("touchend", touch_end_cb.as_ref().unchecked_ref());
                    let _ = img.remove_event_listener_with_callback("touchcancel", touch_end_cb.as_ref().unchecked_ref());
                }
                let _keep_alive = (&touch_start_cb, &touch_move_cb, &touch_end_cb);
            }
        });
    }

    let close = {
        let state = props.state.clone();
        let pending = pending.clone();
        let delay = props.dismiss_delay_ms;
        Callback::from(move |_: ()| close_viewer(&state, &pending, delay))
    };
    let close_btn = {
        let close = close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            close.emit(());
        })
    };
    let backdrop_click = Callback::from(move |e: MouseEvent| {
        let class_name = e.target_dyn_into::<Element>().map(|el| el.class_name()).unwrap_or_default();
        if is_backdrop(&class_name) {
            close.emit(());
        }
    });

    let open = props.state.is_open();
    let overlay_style = overlay_style(open, props.dismiss_delay_ms);
    let img_style = format!(
        "max-width:100%; max-height:100%; object-fit:contain; touch-action:none; transform:{};",
        props.state.transform.to_css()
    );

    html! {
        <div class={classes!(BACKDROP_CLASS, open.then_some("active"))} style={overlay_style} onclick={backdrop_click}>
            <div class="fs-close" onclick={close_btn}
                style="position:absolute; top:16px; right:20px; font-size:36px; color:#fff; cursor:pointer; z-index:101; line-height:1;">
                {"\u{00d7}"}
            </div>
            <div class={FRAME_CLASS} style="width:100%; height:100%; display:flex; align-items:center; justify-content:center; overflow:hidden;">
                <img ref={img_ref} class="fs-img" alt="Full Screen" src={props.state.current_image.clone()} style={img_style} />
            </div>
        </div>
    }
}

fn touch_listener(
    state: &UseReducerHandle<ViewerState>,
    prevent_default: bool,
    action: fn(TouchEvent) -> ViewerAction,
) -> Closure<dyn FnMut(TouchEvent)> {
    let state = state.clone();
    Closure::wrap(Box::new(move |e: TouchEvent| {
        if prevent_default {
            e.prevent_default();
        }
        state.dispatch(action(e));
    }) as Box<dyn FnMut(_)>)
}

/// The fade runs exactly as long as the release delay.
fn overlay_style(open: bool, fade_ms: u32) -> String {
    format!(
        "position:fixed; inset:0; z-index:100; background:rgba(0,0,0,0.95); display:flex; align-items:center; justify-content:center; transition:opacity {}ms ease; opacity:{}; pointer-events:{};",
        fade_ms,
        if open { 1 } else { 0 },
        if open { "auto" } else { "none" },
    )
}

fn is_backdrop(class_name: &str) -> bool {
    class_name
        .split_whitespace()
        .any(|c| c == BACKDROP_CLASS || c == FRAME_CLASS)
}

/// Hides the overlay now and releases the image once the fade-out is over.
/// A timer left over from an earlier close is cancelled first.
pub fn close_viewer(state: &UseReducerHandle<ViewerState>, pending: &Rc<RefCell<PendingRelease>>, delay_ms: u32) {
    let mut p = pending.borrow_mut();
    if let (Some(id), Some(window)) = (p.timeout_id.take(), web_sys::window()) {
        window.clear_timeout_with_handle(id);
    }
    p.ticket = p.ticket.wrapping_add(1);
    let ticket = p.ticket;
    log::debug!("closing viewer (release ticket {ticket})");
    state.dispatch(ViewerAction::Close { ticket });
    match schedule_release(state.clone(), ticket, delay_ms) {
        Ok(id) => p.timeout_id = Some(id),
        Err(err) => {
            log::warn!("release timer not scheduled, releasing now: {err}");
            state.dispatch(ViewerAction::ReleaseImage { ticket });
        }
    }
}

fn schedule_release(state: UseReducerHandle<ViewerState>, ticket: u32, delay_ms: u32) -> Result<i32> {
    let window = web_sys::window().ok_or(FeedError::NoWindow)?;
    let release = Closure::once_into_js(move || state.dispatch(ViewerAction::ReleaseImage { ticket }));
    let timeout = i32::try_from(delay_ms).unwrap_or(i32::MAX);
    Ok(window.set_timeout_with_callback_and_timeout_and_arguments_0(release.unchecked_ref(), timeout)?)
}
