use crate::config::icon_src;
use crate::i18n::{fmt_money, t, tr};
use crate::scratch::{Category, PlaySession, PlayState};
use std::collections::BTreeMap;
use yew::prelude::*;

/// What one grid cell shows right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub index: usize,
    pub revealed: bool,
    pub category: Category,
    pub icon: String,
    pub value_cents: i64,
    /// Part of the triple highlighted once every cell is uncovered.
    pub highlighted: bool,
}

/// Project the session's board into cell views.
#[must_use]
pub fn cell_views(session: &PlaySession) -> Vec<CellView> {
    let highlight = if session.state() == PlayState::Completed {
        session.celebration().and_then(|report| report.category)
    } else {
        None
    };
    session
        .board()
        .items()
        .iter()
        .enumerate()
        .map(|(index, item)| CellView {
            index,
            revealed: session.is_revealed(index),
            category: item.category,
            icon: item.icon.clone(),
            value_cents: item.value_cents,
            highlighted: highlight == Some(item.category),
        })
        .collect()
}

fn cell_label(cell: &CellView) -> String {
    let index = (cell.index + 1).to_string();
    let category = t(&format!("categories.{}", cell.category.key()));
    let mut args = BTreeMap::new();
    args.insert("index", index.as_str());
    if cell.revealed {
        args.insert("category", category.as_str());
        tr("play.cell_shown", Some(&args))
    } else {
        tr("play.cell_hidden", Some(&args))
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub cells: Vec<CellView>,
    pub on_reveal: Callback<usize>,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(ScratchGrid)]
pub fn scratch_grid(props: &Props) -> Html {
    html! {
        <div class="scratch-grid" role="grid" aria-label={t("play.grid_label")}>
            { for props.cells.iter().map(|cell| {
                let index = cell.index;
                let on_reveal = props.on_reveal.clone();
                let onclick = Callback::from(move |_: MouseEvent| on_reveal.emit(index));
                let class = classes!(
                    "cell",
                    cell.revealed.then_some("cell--revealed"),
                    cell.highlighted.then_some("cell--winning"),
                );
                html! {
                    <button
                        key={index}
                        id={format!("cell-{index}")}
                        type="button"
                        role="gridcell"
                        class={class}
                        aria-label={cell_label(cell)}
                        disabled={props.disabled || cell.revealed}
                        onclick={onclick}
                    >
                        if cell.revealed {
                            <img class="cell__icon" src={icon_src(&cell.icon)} alt="" />
                            if cell.value_cents > 0 {
                                <span class="cell__value">{ fmt_money(cell.value_cents) }</span>
                            }
                        } else {
                            <span class="cell__cover" aria-hidden="true">{"?"}</span>
                        }
                    </button>
                }
            }) }
        </div>
    }
}
