use crate::a11y::{restore_focus, trap_focus_in};
use crate::i18n::t;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub id: AttrValue,
    pub open: bool,
    pub title: AttrValue,
    pub on_close: Callback<()>,
    /// Element focused again once the dialog closes.
    #[prop_or_default]
    pub return_focus_id: Option<AttrValue>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Modal)]
pub fn modal(props: &Props) -> Html {
    let was_open = use_mut_ref(|| false);
    {
        let dialog_id = props.id.clone();
        use_effect_with(
            (props.open, props.return_focus_id.clone()),
            move |(open, return_focus)| {
                let previously = std::mem::replace(&mut *was_open.borrow_mut(), *open);
                if *open {
                    trap_focus_in(&dialog_id);
                } else if previously && let Some(id) = return_focus.as_ref() {
                    restore_focus(id);
                }
                || {}
            },
        );
    }

    if !props.open {
        return Html::default();
    }

    let title_id = format!("{}-title", props.id);
    let close = {
        let cb = props.on_close.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let on_keydown = {
        let cb = props.on_close.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                e.prevent_default();
                cb.emit(());
            }
        })
    };
    let keep_open = Callback::from(|e: MouseEvent| e.stop_propagation());

    html! {
        <div class="modal-backdrop" role="presentation" onclick={close.clone()}>
            <div
                id={props.id.clone()}
                class="modal"
                role="dialog"
                aria-modal="true"
                aria-labelledby={title_id.clone()}
                tabindex="-1"
                onkeydown={on_keydown}
                onclick={keep_open}
            >
                <div class="modal__header">
                    <h2 id={title_id}>{ props.title.clone() }</h2>
                    <button type="button" class="modal__close" aria-label={t("ui.close")} onclick={close}>
                        {"×"}
                    </button>
                </div>
                <div class="modal__body">
                    { for props.children.iter() }
                </div>
            </div>
        </div>
    }
}
