/// Statistics pane: period picker, summary figures and the daily chart

use chrono::Utc;
use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::chrome::{ChromeStorage, ChromeTabs};
use crate::platform::TabHost;
use crate::statistics::{DailyEntry, PERIODS, PeriodSummary, summarize};
use crate::storage::Repository;
use crate::ui::components::{DailyChart, SummaryFigures};

#[derive(Clone, PartialEq)]
enum StatsState {
    Loading,
    Ready(Vec<DailyEntry>, PeriodSummary),
    Error(String),
}

#[function_component(StatsPanel)]
pub fn stats_panel() -> Html {
    let period = use_state(|| PERIODS[0]);
    let state = use_state(|| StatsState::Loading);

    // Reload whenever the period changes
    {
        let state = state.clone();
        use_effect_with(*period, move |period| {
            let period = *period;
            state.set(StatsState::Loading);
            spawn_local(async move {
                match load_period(period).await {
                    Ok((entries, summary)) => state.set(StatsState::Ready(entries, summary)),
                    Err(e) => state.set(StatsState::Error(e)),
                }
            });
            || ()
        });
    }

    let on_period = {
        let period = period.clone();
        move |days: u32| {
            let period = period.clone();
            Callback::from(move |_| period.set(days))
        }
    };

    html! {
        <div class="flex-column-gap">
            <div class="period-buttons">
                {for PERIODS.iter().map(|days| {
                    let variant = if *period == *days { ButtonVariant::Primary } else { ButtonVariant::Secondary };
                    html! {
                        <Button onclick={on_period(*days)} {variant}>
                            {format!("{} days", days)}
                        </Button>
                    }
                })}
            </div>

            {match &*state {
                StatsState::Loading => html! {
                    <div class="loading-text-center">
                        <Spinner />
                    </div>
                },
                StatsState::Ready(entries, summary) => html! {
                    <>
                        <SummaryFigures summary={summary.clone()} />
                        <DailyChart entries={entries.clone()} />
                    </>
                },
                StatsState::Error(err) => html! {
                    <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                        {err.clone()}
                    </Alert>
                },
            }}
        </div>
    }
}

async fn load_period(period: u32) -> Result<(Vec<DailyEntry>, PeriodSummary), String> {
    let book = Repository::new(ChromeStorage)
        .load_statistics()
        .await
        .map_err(|e| format!("Failed to load statistics: {}", e))?;
    let current_tabs = ChromeTabs
        .query_tabs()
        .await
        .map_err(|e| format!("Failed to count tabs: {}", e))?
        .len();

    let entries = book.query_period(Utc::now().date_naive(), period);
    let summary = summarize(&entries, current_tabs);
    Ok((entries, summary))
}
