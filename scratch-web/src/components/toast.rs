use crate::app::toasts::{TOAST_TTL_MS, Toast};
use crate::i18n::t;
use gloo::timers::callback::Timeout;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ItemProps {
    pub toast: Toast,
    pub on_dismiss: Callback<u32>,
}

#[function_component(ToastItem)]
fn toast_item(props: &ItemProps) -> Html {
    {
        let id = props.toast.id;
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with(id, move |id| {
            let id = *id;
            let timer = Timeout::new(TOAST_TTL_MS, move || on_dismiss.emit(id));
            move || drop(timer)
        });
    }
    let dismiss = {
        let id = props.toast.id;
        let cb = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| cb.emit(id))
    };
    let role = if props.toast.kind.is_urgent() { "alert" } else { "status" };
    html! {
        <div class={classes!("toast", props.toast.kind.class())} role={role}>
            <span class="toast__message">{ props.toast.message.clone() }</span>
            <button type="button" class="toast__close" aria-label={t("ui.dismiss")} onclick={dismiss}>
                {"×"}
            </button>
        </div>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub toasts: Vec<Toast>,
    pub on_dismiss: Callback<u32>,
}

#[function_component(Toasts)]
pub fn toasts(props: &Props) -> Html {
    html! {
        <div class="toast-stack" aria-live="polite">
            { for props.toasts.iter().map(|toast| html! {
                <ToastItem key={toast.id} toast={toast.clone()} on_dismiss={props.on_dismiss.clone()} />
            }) }
        </div>
    }
}
