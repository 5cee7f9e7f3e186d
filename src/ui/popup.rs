/// Popup UI for Tab Keeper extension

use std::collections::BTreeSet;

use chrono::Utc;
use patternfly_yew::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::chrome::ChromeTabs;
use crate::error::TabError;
use crate::operations::{
    SortMode, TabListing, arrange_tabs, count_summary, filter_by_title, render_tab_report,
    tab_list_filename, toggle_group,
};
use crate::platform::TabHost;
use crate::tab_data::TabInfo;
use crate::ui::components::{GroupHeader, TabCard};
use crate::ui::settings::SettingsPanel;
use crate::ui::stats::StatsPanel;

// Import JS bridge functions
#[wasm_bindgen(module = "/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    fn exportToFile(data: &str, filename: &str, mime_type: &str) -> Result<(), JsValue>;
}

/// Hand `data` to the browser as a file download
pub(crate) fn download(data: &str, filename: &str, mime_type: &str) -> Result<(), String> {
    exportToFile(data, filename, mime_type).map_err(|e| format!("Download failed: {:?}", e))
}

#[derive(Clone, PartialEq)]
enum AppState {
    Idle,
    Loading(String),
    Error(String),
}

#[derive(Clone, Copy, PartialEq)]
enum ActiveTab {
    Tabs,
    Statistics,
    Settings,
}

impl ActiveTab {
    fn label(&self) -> &'static str {
        match self {
            ActiveTab::Tabs => "Tabs",
            ActiveTab::Statistics => "Statistics",
            ActiveTab::Settings => "Settings",
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| AppState::Loading("Loading tabs...".to_string()));
    let tabs = use_state(Vec::<TabInfo>::new);
    let keyword = use_state(String::new);
    let sort_mode = use_state(SortMode::default);
    let active_tab = use_state(|| ActiveTab::Tabs);
    let collapsed_groups = use_state(BTreeSet::<String>::new);

    // Load tabs on mount
    {
        let state = state.clone();
        let tabs = tabs.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match ChromeTabs.query_tabs().await {
                    Ok(all) => {
                        tabs.set(all);
                        state.set(AppState::Idle);
                    }
                    Err(e) => state.set(AppState::Error(format!("Failed to get tabs: {}", e))),
                }
            });
            || ()
        });
    }

    let on_search = {
        let keyword = keyword.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            keyword.set(input.value());
        })
    };

    let on_sort = {
        let sort_mode = sort_mode.clone();
        move |mode: SortMode| {
            let sort_mode = sort_mode.clone();
            Callback::from(move |_| sort_mode.set(mode))
        }
    };

    let on_open_tab = {
        let state = state.clone();
        Callback::from(move |tab: TabInfo| {
            let state = state.clone();
            spawn_local(async move {
                if let Err(e) = focus_tab(&tab).await {
                    state.set(AppState::Error(format!("Failed to switch tab: {}", e)));
                }
            });
        })
    };

    let matching = filter_by_title(&tabs, &keyword);
    let listing = arrange_tabs(&matching, *sort_mode);
    let summary = count_summary(tabs.len(), matching.len(), &keyword);

    let on_export_list = {
        let state = state.clone();
        let listing = listing.clone();
        let total = tabs.len();
        let matching_count = matching.len();
        let keyword = (*keyword).clone();
        Callback::from(move |_| {
            let now = Utc::now();
            let report = render_tab_report(&listing, total, matching_count, &keyword, now);
            if let Err(e) = download(&report, &tab_list_filename(now), "text/plain") {
                state.set(AppState::Error(e));
            }
        })
    };

    let is_busy = !matches!(*state, AppState::Idle);

    // Tab click handlers
    let on_tab_click = {
        let active_tab = active_tab.clone();
        move |tab: ActiveTab| {
            let active_tab = active_tab.clone();
            Callback::from(move |_| {
                active_tab.set(tab);
            })
        }
    };

    let on_toggle_group = {
        let collapsed_groups = collapsed_groups.clone();
        move |domain: String| {
            let collapsed_groups = collapsed_groups.clone();
            Callback::from(move |_: ()| collapsed_groups.set(toggle_group(&collapsed_groups, &domain)))
        }
    };

    let render_card = |(index, tab): (usize, &TabInfo)| {
        html! {
            <TabCard key={tab.id} tab={tab.clone()} number={index + 1} onclick={on_open_tab.clone()} />
        }
    };

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Tab Keeper"}</h1>

            // Tab navigation
            <div class="pf-v5-c-tabs tabs-nav">
                <ul class="pf-v5-c-tabs__list">
                    {for [ActiveTab::Tabs, ActiveTab::Statistics, ActiveTab::Settings].into_iter().map(|tab| html! {
                        <li class={if *active_tab == tab { "pf-v5-c-tabs__item pf-m-current" } else { "pf-v5-c-tabs__item" }}>
                            <button
                                class="pf-v5-c-tabs__link"
                                onclick={on_tab_click(tab)}
                            >
                                <span class="pf-v5-c-tabs__item-text">{tab.label()}</span>
                            </button>
                        </li>
                    })}
                </ul>
            </div>

            // Status display
            {match &*state {
                AppState::Loading(msg) => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{msg}</p>
                    </div>
                },
                AppState::Error(err) => html! {
                    <div class="message-top-margin">
                        <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                            {err.clone()}
                        </Alert>
                    </div>
                },
                AppState::Idle => html! {}
            }}

            // Tab content
            <div class="tab-pane-content">
                {match *active_tab {
                    ActiveTab::Tabs => html! {
                        <div class="flex-column-gap">
                            <input
                                class="pf-v5-c-form-control"
                                type="search"
                                placeholder="Search by title"
                                value={(*keyword).clone()}
                                oninput={on_search}
                            />
                            <div class="sort-buttons">
                                {for SortMode::ALL.iter().map(|mode| {
                                    let variant = if *sort_mode == *mode { ButtonVariant::Primary } else { ButtonVariant::Secondary };
                                    html! {
                                        <Button onclick={on_sort(*mode)} {variant}>{mode.label()}</Button>
                                    }
                                })}
                            </div>
                            <div class="tab-count">{summary}</div>

                            if listing.is_empty() && !is_busy {
                                <p class="message-text">{"No matching tabs"}</p>
                            }
                            {match &listing {
                                TabListing::Flat(list) => html! {
                                    <div class="tab-list">
                                        {for list.iter().enumerate().map(render_card)}
                                    </div>
                                },
                                TabListing::Grouped(groups) => html! {
                                    <div class="tab-list">
                                        {for groups.iter().map(|group| {
                                            let collapsed = collapsed_groups.contains(&group.domain);
                                            html! {
                                                <div class={classes!("tab-group", collapsed.then_some("group-collapsed"))} key={group.domain.clone()}>
                                                    <GroupHeader
                                                        domain={group.domain.clone()}
                                                        count={group.tabs.len()}
                                                        fav_icon_url={group.fav_icon_url().map(|url| AttrValue::from(url.to_string()))}
                                                        {collapsed}
                                                        ontoggle={on_toggle_group(group.domain.clone())}
                                                    />
                                                    if !collapsed {
                                                        {for group.tabs.iter().enumerate().map(render_card)}
                                                    }
                                                </div>
                                            }
                                        })}
                                    </div>
                                },
                            }}

                            <Button onclick={on_export_list} disabled={is_busy || listing.is_empty()} variant={ButtonVariant::Secondary} block={true}>
                                {"📄 Export tab list"}
                            </Button>
                        </div>
                    },
                    ActiveTab::Statistics => html! { <StatsPanel /> },
                    ActiveTab::Settings => html! { <SettingsPanel /> },
                }}
            </div>

            <p class="footer-popup">
                {"Tab Keeper v0.1.0"}
            </p>
        </div>
    }
}

// Helper functions

async fn focus_tab(tab: &TabInfo) -> Result<(), TabError> {
    ChromeTabs.activate_tab(tab.id).await?;
    ChromeTabs.focus_window(tab.window_id).await
}
