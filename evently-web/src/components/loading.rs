use yew::{AttrValue, Html, Properties, function_component, html};

#[derive(Properties, PartialEq)]
pub struct LoadingProps {
    #[prop_or(AttrValue::Static("Loading"))]
    pub label: AttrValue,
}

/// Inline spinner with a label, used while a request is outstanding.
#[function_component(Loading)]
pub fn loading(props: &LoadingProps) -> Html {
    html! {
        <span class="flex items-center gap-2" role="status" aria-live="polite">
            <span class="loading loading-spinner loading-sm"></span>
            <span>{props.label.clone()}</span>
        </span>
    }
}
