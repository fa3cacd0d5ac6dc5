use yew::prelude::*;

use crate::state::IndicatorState;

#[derive(Properties, PartialEq, Clone)]
pub struct IndicatorsProps {
    pub state: UseReducerHandle<IndicatorState>,
    pub on_select: Callback<usize>,
}

#[function_component(Indicators)]
pub fn indicators(props: &IndicatorsProps) -> Html {
    let dots = props.state.dots().into_iter().enumerate().map(|(i, active)| {
        let onclick = {
            let cb = props.on_select.clone();
            Callback::from(move |_: MouseEvent| cb.emit(i))
        };
        let style = if active {
            "width:8px; height:18px; border-radius:4px; background:#fff; cursor:pointer; transition:all 0.2s;"
        } else {
            "width:8px; height:8px; border-radius:4px; background:rgba(255,255,255,0.45); cursor:pointer; transition:all 0.2s;"
        };
        html! { <div key={i} class={classes!("dot", active.then_some("active"))} {style} {onclick}></div> }
    });
    html! {
        <div class="indicators" style="position:fixed; right:12px; top:50%; transform:translateY(-50%); display:flex; flex-direction:column; gap:8px; z-index:10;">
            { for dots }
        </div>
    }
}
