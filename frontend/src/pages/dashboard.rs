use chrono::NaiveDate;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::statistics::{summary_table, summary_total};
use super::today;
use crate::api::models::CategorySummary;
use crate::api::SummaryApi;
use crate::components::{error_alert, page_shell, use_api_client, use_session};
use crate::format::{format_date, format_money};

const DAILY_FAILED: &str = "Could not load today's summary.";

pub fn greeting(username: Option<&str>) -> String {
    match username {
        Some(name) if !name.is_empty() => format!("Welcome back, {name}!"),
        _ => "Welcome back!".to_string(),
    }
}

pub async fn load_daily<A: SummaryApi>(api: &A, date: NaiveDate) -> Result<Vec<CategorySummary>, String> {
    api.daily_summary(date).await.map_err(|err| {
        log::error!("failed to load daily summary for {date}: {err}");
        err.user_message(DAILY_FAILED)
    })
}

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let api = use_api_client();
    let session = use_session();
    let date = use_memo(|_| today(), ());
    let rows = use_state(Vec::<CategorySummary>::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| true);

    {
        let rows = rows.clone();
        let error = error.clone();
        let loading = loading.clone();
        let date = *date;
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match load_daily(&api, date).await {
                        Ok(loaded) => rows.set(loaded),
                        Err(message) => error.set(Some(message)),
                    }
                    loading.set(false);
                });
                || ()
            },
            (),
        );
    }

    let username = session
        .as_ref()
        .and_then(|handle| handle.session().username().map(str::to_string));

    page_shell(
        "Dashboard",
        html! {},
        html! {
            <>
                <div class="bg-[#173E63] text-white rounded-2xl p-6 shadow-md">
                    <h2 class="text-xl font-bold">{ greeting(username.as_deref()) }</h2>
                    <p class="text-[13px] text-slate-300 mt-1">{ format!("Here is your spending for {}.", format_date(*date)) }</p>
                    <p class="text-3xl font-black mt-4">{ format_money(summary_total(&rows)) }</p>
                </div>
                { error_alert(error.as_deref()) }
                <div class="bg-card rounded-2xl shadow-md border border-border p-6">
                    <h3 class="font-bold text-lg text-foreground mb-4">{"Today by category"}</h3>
                    if *loading {
                        <p class="text-muted-foreground">{"Loading summary..."}</p>
                    } else {
                        { summary_table(&rows, "Nothing recorded today.") }
                    }
                </div>
            </>
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{category, FakeApi};
    use crate::error::ApiError;
    use futures::executor::block_on;

    #[test]
    fn greets_by_name() {
        assert_eq!(greeting(Some("alice")), "Welcome back, alice!");
        assert_eq!(greeting(Some("")), "Welcome back!");
        assert_eq!(greeting(None), "Welcome back!");
    }

    #[test]
    fn requests_the_given_day() {
        let api = FakeApi::new();
        *api.summary.borrow_mut() = vec![CategorySummary {
            category: category(1, "Food"),
            total_amount: 8.25,
        }];
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();

        let rows = block_on(load_daily(&api, date)).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(api.calls(), vec!["GET /summary/daily 2024-03-05".to_string()]);
    }

    #[test]
    fn transport_failure_is_wrapped() {
        let api = FakeApi::new();
        api.fail_next(ApiError::Transport("offline".into()));
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(block_on(load_daily(&api, date)), Err("Request failed: offline".to_string()));
    }
}
