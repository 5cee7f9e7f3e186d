/// Settings pane: whitelist editing plus data export and import

use chrono::Utc;
use log::{error, info};
use patternfly_yew::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::chrome::ChromeStorage;
use crate::storage::Repository;
use crate::transfer::{ExportBundle, export_filename, parse_import};
use crate::ui::popup::download;
use crate::whitelist::{add_domain, remove_domain};

const IMPORT_WARNING: &str =
    "Importing replaces all current statistics and the whitelist. Continue?";

fn show_message(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

fn ask_confirmation(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[function_component(SettingsPanel)]
pub fn settings_panel() -> Html {
    let whitelist = use_state(Vec::<String>::new);
    let domain_input = use_state(String::new);
    let busy = use_state(|| false);

    // Load whitelist on mount
    {
        let whitelist = whitelist.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match Repository::new(ChromeStorage).load_whitelist().await {
                    Ok(list) => whitelist.set(list),
                    Err(e) => error!("Failed to load whitelist: {}", e),
                }
            });
            || ()
        });
    }

    let on_input = {
        let domain_input = domain_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            domain_input.set(input.value());
        })
    };

    let add = {
        let whitelist = whitelist.clone();
        let domain_input = domain_input.clone();
        Callback::from(move |_: ()| {
            let mut updated = (*whitelist).clone();
            match add_domain(&mut updated, &domain_input) {
                Ok(Some(domain)) => {
                    let whitelist = whitelist.clone();
                    let domain_input = domain_input.clone();
                    spawn_local(async move {
                        match Repository::new(ChromeStorage).save_whitelist(&updated).await {
                            Ok(()) => {
                                info!("Whitelisted {}", domain);
                                whitelist.set(updated);
                                domain_input.set(String::new());
                            }
                            Err(e) => show_message(&format!("Failed to save whitelist: {}", e)),
                        }
                    });
                }
                // Blank input is ignored
                Ok(None) => {}
                Err(e) => show_message(&e.to_string()),
            }
        })
    };

    let on_add_click = {
        let add = add.clone();
        Callback::from(move |_: MouseEvent| add.emit(()))
    };

    let on_add_key = {
        let add = add.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                add.emit(());
            }
        })
    };

    let on_remove = {
        let whitelist = whitelist.clone();
        move |domain: String| {
            let whitelist = whitelist.clone();
            Callback::from(move |_: MouseEvent| {
                let mut updated = (*whitelist).clone();
                if !remove_domain(&mut updated, &domain) {
                    return;
                }
                let whitelist = whitelist.clone();
                spawn_local(async move {
                    match Repository::new(ChromeStorage).save_whitelist(&updated).await {
                        Ok(()) => whitelist.set(updated),
                        Err(e) => show_message(&format!("Failed to save whitelist: {}", e)),
                    }
                });
            })
        }
    };

    let on_export = {
        let busy = busy.clone();
        Callback::from(move |_: MouseEvent| {
            let busy = busy.clone();
            busy.set(true);
            spawn_local(async move {
                match export_data().await {
                    Ok(()) => show_message("Data exported"),
                    Err(e) => show_message(&e),
                }
                busy.set(false);
            });
        })
    };

    let on_import = {
        let busy = busy.clone();
        let whitelist = whitelist.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            // Let the same file be picked again
            input.set_value("");

            let busy = busy.clone();
            let whitelist = whitelist.clone();
            busy.set(true);
            spawn_local(async move {
                match import_file(file).await {
                    Ok(Some(list)) => {
                        whitelist.set(list);
                        show_message("Data imported");
                    }
                    Ok(None) => {}
                    Err(e) => show_message(&e),
                }
                busy.set(false);
            });
        })
    };

    html! {
        <div class="flex-column-gap">
            <h2 class="stats-title">{"Whitelist"}</h2>
            <p class="message-text">{"No duplicate alerts are shown for these domains."}</p>
            <div class="whitelist-add">
                <input
                    class="pf-v5-c-form-control"
                    type="text"
                    placeholder="example.com"
                    value={(*domain_input).clone()}
                    oninput={on_input}
                    onkeydown={on_add_key}
                />
                <Button onclick={on_add_click} variant={ButtonVariant::Primary}>{"Add"}</Button>
            </div>

            if whitelist.is_empty() {
                <p class="message-text">{"No whitelisted domains"}</p>
            } else {
                <div class="stats-box">
                    {for whitelist.iter().map(|domain| html! {
                        <div class="stat-item">
                            <span class="stat-domain">{domain}</span>
                            <Button onclick={on_remove(domain.clone())} variant={ButtonVariant::Plain}>{"✕"}</Button>
                        </div>
                    })}
                </div>
            }

            <h2 class="stats-title">{"Data"}</h2>
            <Button onclick={on_export} disabled={*busy} variant={ButtonVariant::Secondary} block={true}>
                {"💾 Export statistics and whitelist"}
            </Button>
            <label class="import-label">
                {"📂 Import from file"}
                <input type="file" accept=".json,application/json" disabled={*busy} onchange={on_import} />
            </label>
        </div>
    }
}

async fn export_data() -> Result<(), String> {
    let data = Repository::new(ChromeStorage)
        .load_data()
        .await
        .map_err(|e| format!("Failed to read data: {}", e))?;

    let now = Utc::now();
    let json = ExportBundle::from_data(&data, now)
        .to_json()
        .map_err(|e| format!("Failed to serialize: {}", e))?;

    download(&json, &export_filename(now), "application/json")
}

/// Returns the imported whitelist, or `None` when the user backed out
async fn import_file(file: web_sys::File) -> Result<Option<Vec<String>>, String> {
    let text = JsFuture::from(file.text())
        .await
        .map_err(|e| format!("Failed to read file: {:?}", e))?
        .as_string()
        .ok_or_else(|| "File is not text".to_string())?;

    let bundle = parse_import(&text).map_err(|e| format!("Import failed: {}", e))?;
    if !ask_confirmation(IMPORT_WARNING) {
        return Ok(None);
    }

    let data = bundle.into_data();
    Repository::new(ChromeStorage)
        .replace_data(&data)
        .await
        .map_err(|e| format!("Failed to save imported data: {}", e))?;

    info!("Imported {} day(s) of statistics", data.statistics.days.len());
    Ok(Some(data.whitelist))
}
