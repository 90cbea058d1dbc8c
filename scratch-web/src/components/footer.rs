use crate::i18n::t;
use yew::prelude::*;

#[function_component(Footer)]
pub fn footer() -> Html {
    html! {
        <footer class="site-footer" role="contentinfo">
            <p>{ t("footer.copyright") }</p>
        </footer>
    }
}
