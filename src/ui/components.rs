/// Reusable UI components

use yew::prelude::*;

use crate::operations::numbered_title;
use crate::statistics::{DailyEntry, PeriodSummary};
use crate::tab_data::TabInfo;

#[derive(Properties, PartialEq)]
pub struct TabCardProps {
    pub tab: TabInfo,
    /// Position in the list, from 1
    pub number: usize,
    pub onclick: Callback<TabInfo>,
}

#[function_component(TabCard)]
pub fn tab_card(props: &TabCardProps) -> Html {
    let tab = &props.tab;
    let onclick = {
        let tab = tab.clone();
        let onclick = props.onclick.clone();
        Callback::from(move |_: MouseEvent| onclick.emit(tab.clone()))
    };

    let title = numbered_title(props.number, tab);

    html! {
        <div class={classes!("tab-card", tab.active.then_some("tab-card-active"))} {onclick} title={tab.url.clone()}>
            <div class="tab-card-header">
                if let Some(icon) = &tab.fav_icon_url {
                    <img class="tab-favicon" src={icon.clone()} alt="" />
                }
                <span class="tab-title">{title}</span>
            </div>
            <div class="tab-url">{&tab.url}</div>
            <div class="tab-badges">
                if tab.active {
                    <span class="badge badge-active">{"Active"}</span>
                }
                if tab.pinned {
                    <span class="badge badge-pinned">{"📌 Pinned"}</span>
                }
                if tab.audible {
                    <span class="badge badge-audible">{"🔊 Playing"}</span>
                }
                if tab.discarded {
                    <span class="badge badge-discarded">{"💤 Sleeping"}</span>
                }
                <span class="badge">{format!("Window {}", tab.window_id)}</span>
                <span class="badge">{format!("ID {}", tab.id)}</span>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct GroupHeaderProps {
    pub domain: AttrValue,
    pub count: usize,
    #[prop_or_default]
    pub fav_icon_url: Option<AttrValue>,
    pub collapsed: bool,
    pub ontoggle: Callback<()>,
}

#[function_component(GroupHeader)]
pub fn group_header(props: &GroupHeaderProps) -> Html {
    let onclick = {
        let ontoggle = props.ontoggle.clone();
        Callback::from(move |_: MouseEvent| ontoggle.emit(()))
    };

    html! {
        <div class="group-header" {onclick}>
            <span class="group-toggle">{if props.collapsed { "▶" } else { "▼" }}</span>
            if let Some(icon) = &props.fav_icon_url {
                <img class="tab-favicon" src={icon.clone()} alt="" />
            }
            <span class="group-domain">{props.domain.to_string()}</span>
            <span class="group-count">{format!("{} tabs", props.count)}</span>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SummaryProps {
    pub summary: PeriodSummary,
}

#[function_component(SummaryFigures)]
pub fn summary_figures(props: &SummaryProps) -> Html {
    let summary = &props.summary;
    let figures = [
        ("Opened", summary.total_opened.to_string()),
        ("Closed", summary.total_closed.to_string()),
        ("Avg. opened / day", summary.average_opened.to_string()),
        ("Open now", summary.current_tabs.to_string()),
    ];

    html! {
        <div class="stats-box">
            {for figures.iter().map(|(label, value)| html! {
                <div class="stat-item">
                    <span class="stat-domain">{*label}</span>
                    <span class="stat-count">{value.clone()}</span>
                </div>
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct DailyChartProps {
    pub entries: Vec<DailyEntry>,
}

/// Paired opened/closed bars per day
#[function_component(DailyChart)]
pub fn daily_chart(props: &DailyChartProps) -> Html {
    let peak = props
        .entries
        .iter()
        .map(|e| e.stat.opened.max(e.stat.closed))
        .max()
        .unwrap_or(0)
        .max(1);
    // Roughly seven labels whatever the period
    let label_step = (props.entries.len() / 7).max(1);

    let bar_height = |value: u32| format!("height: {}%;", u64::from(value) * 100 / u64::from(peak));

    html! {
        <div class="chart">
            <div class="chart-legend">
                <span class="legend-opened">{"Opened"}</span>
                <span class="legend-closed">{"Closed"}</span>
            </div>
            <div class="chart-bars">
                {for props.entries.iter().enumerate().map(|(index, entry)| html! {
                    <div class="chart-day" title={format!(
                        "{}: {} opened, {} closed, peak {} tabs",
                        entry.label(), entry.stat.opened, entry.stat.closed, entry.stat.max_tabs
                    )}>
                        <div class="chart-pair">
                            <div class="bar bar-opened" style={bar_height(entry.stat.opened)}></div>
                            <div class="bar bar-closed" style={bar_height(entry.stat.closed)}></div>
                        </div>
                        <span class="chart-label">
                            {if index % label_step == 0 { entry.label() } else { String::new() }}
                        </span>
                    </div>
                })}
            </div>
        </div>
    }
}
