use dioxus::prelude::*;

use crate::core::history::{format_delta, HistoryResponse, HistorySample};
use crate::core::motion::MotionPolicy;
use crate::core::settings::Settings;
use crate::studio::{ScoreDial, TrendChart};

#[derive(Clone, Debug, PartialEq)]
enum TrendState {
    Idle,
    Loading,
    Loaded(Vec<HistorySample>),
    Failed,
}

async fn load_history(url: String) -> Result<Vec<HistorySample>, reqwest::Error> {
    let response = reqwest::get(&url).await?;
    let payload: HistoryResponse = response.json().await?;
    Ok(payload.history)
}

#[component]
pub fn Trends() -> Element {
    let settings = use_signal(Settings::load);
    let mut owner = use_signal(String::new);
    let mut repo = use_signal(String::new);
    let mut state = use_signal(|| TrendState::Idle);
    let motion = use_signal(MotionPolicy::detect);

    let on_load = move |_| {
        let owner_value = owner().trim().to_string();
        let repo_value = repo().trim().to_string();
        if owner_value.is_empty() || repo_value.is_empty() {
            return;
        }
        state.set(TrendState::Loading);
        let url = settings().history_url(&owner_value, &repo_value);
        spawn(async move {
            match load_history(url).await {
                Ok(samples) => state.set(TrendState::Loaded(samples)),
                Err(err) => {
                    #[cfg(debug_assertions)]
                    eprintln!("[trends] history request failed: {err}");
                    #[cfg(not(debug_assertions))]
                    let _ = err;
                    state.set(TrendState::Failed);
                }
            }
        });
    };

    rsx! {
        section { class: "page page-trends",
            h1 { "Score trends" }
            p { "Load the quality-scan history of a repository to see how its score moved." }

            form {
                class: "trends__form",
                onsubmit: move |evt: FormEvent| evt.prevent_default(),
                label { r#for: "trends-owner", "Owner" }
                input {
                    id: "trends-owner",
                    r#type: "text",
                    value: "{owner()}",
                    placeholder: "octocat",
                    oninput: move |evt: FormEvent| owner.set(evt.value()),
                }
                label { r#for: "trends-repo", "Repository" }
                input {
                    id: "trends-repo",
                    r#type: "text",
                    value: "{repo()}",
                    placeholder: "hello-world",
                    oninput: move |evt: FormEvent| repo.set(evt.value()),
                }
                button {
                    r#type: "button",
                    class: "button button--primary",
                    onclick: on_load,
                    "Load history"
                }
            }

            match state() {
                TrendState::Idle => rsx! {
                    p { class: "trends__hint", "Enter a repository to get started." }
                },
                TrendState::Loading => rsx! {
                    p { class: "trends__hint", "Loading history…" }
                },
                TrendState::Failed => rsx! {
                    p { class: "trends__error",
                        "History unavailable. Check the repository name and try again."
                    }
                },
                TrendState::Loaded(samples) => rsx! {
                    if let Some(latest) = samples.last() {
                        div { class: "trends__summary",
                            ScoreDial { score: latest.score_total, motion: motion() }
                            div { class: "trends__latest",
                                p { class: "trends__latest-score",
                                    strong { "{latest.score_total}" }
                                    " / 100"
                                }
                                p { class: "trends__latest-delta",
                                    "{format_delta(latest.delta)} since the previous scan"
                                }
                                if let Some(commit) = &latest.commit_short {
                                    p { class: "trends__latest-commit", "at {commit}" }
                                }
                            }
                        }
                    }
                    TrendChart { samples: samples.clone(), motion: motion() }
                    if samples.is_empty() {
                        p { class: "trends__hint", "No scans recorded for this repository yet." }
                    }
                },
            }
        }
    }
}
