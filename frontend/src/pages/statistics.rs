use chrono::{Datelike, NaiveDate};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::today;
use crate::api::models::CategorySummary;
use crate::api::SummaryApi;
use crate::components::{error_alert, input_value, page_shell, use_api_client};
use crate::format::{format_date, format_money, input_date, parse_input_date};

const PERIOD_FAILED: &str = "Could not load statistics for this period.";

/// First day of `today`'s month through `today`.
pub fn current_month(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today.with_day(1).unwrap_or(today), today)
}

pub fn parse_period(begin: &str, end: &str) -> Result<(NaiveDate, NaiveDate), String> {
    let (Some(begin), Some(end)) = (parse_input_date(begin), parse_input_date(end)) else {
        return Err("Choose both a start and an end date.".into());
    };
    if begin > end {
        return Err("Start date must not be after end date.".into());
    }
    Ok((begin, end))
}

pub async fn load_period<A: SummaryApi>(
    api: &A,
    begin: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<CategorySummary>, String> {
    api.period_summary(begin, end)
        .await
        .map(|rows| {
            log::info!("loaded {} summary rows for {begin}..{end}", rows.len());
            rows
        })
        .map_err(|err| {
            log::error!("failed to load period summary: {err}");
            err.user_message(PERIOD_FAILED)
        })
}

pub fn summary_total(rows: &[CategorySummary]) -> f64 {
    rows.iter().map(|row| row.total_amount).sum()
}

pub fn summary_table(rows: &[CategorySummary], empty: &'static str) -> Html {
    if rows.is_empty() {
        return html! { <p class="text-muted-foreground text-[13px]">{ empty }</p> };
    }
    html! {
        <table class="w-full text-[13px]">
            <thead class="text-[#173E63]">
                <tr>
                    <th class="text-left p-2">{"Category"}</th>
                    <th class="text-right p-2">{"Total"}</th>
                </tr>
            </thead>
            <tbody>
                { for rows.iter().map(|row| html! {
                    <tr key={row.category.id} class="border-t border-border">
                        <td class="p-2">{ row.category.name.clone() }</td>
                        <td class="p-2 text-right font-semibold">{ format_money(row.total_amount) }</td>
                    </tr>
                }) }
            </tbody>
            <tfoot>
                <tr class="border-t-2 border-[#173E63] font-bold text-[#173E63]">
                    <td class="p-2">{"Total"}</td>
                    <td class="p-2 text-right">{ format_money(summary_total(rows)) }</td>
                </tr>
            </tfoot>
        </table>
    }
}

#[function_component(StatisticsPage)]
pub fn statistics_page() -> Html {
    let api = use_api_client();
    let (month_start, month_end) = current_month(today());
    let begin = use_state(|| input_date(month_start));
    let end = use_state(|| input_date(month_end));
    let shown = use_state(|| (month_start, month_end));
    let rows = use_state(Vec::<CategorySummary>::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| true);

    let fetch = {
        let api = api.clone();
        let rows = rows.clone();
        let error = error.clone();
        let loading = loading.clone();
        let shown = shown.clone();
        Callback::from(move |(from, to): (NaiveDate, NaiveDate)| {
            let api = api.clone();
            let rows = rows.clone();
            let error = error.clone();
            let loading = loading.clone();
            let shown = shown.clone();
            loading.set(true);
            spawn_local(async move {
                match load_period(&api, from, to).await {
                    Ok(loaded) => {
                        rows.set(loaded);
                        shown.set((from, to));
                        error.set(None);
                    }
                    Err(message) => error.set(Some(message)),
                }
                loading.set(false);
            });
        })
    };

    {
        let fetch = fetch.clone();
        use_effect_with_deps(
            move |_| {
                fetch.emit((month_start, month_end));
                || ()
            },
            (),
        );
    }

    let on_submit = {
        let begin = begin.clone();
        let end = end.clone();
        let error = error.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match parse_period(&begin, &end) {
                Ok(period) => fetch.emit(period),
                Err(message) => error.set(Some(message)),
            }
        })
    };

    let date_input = |value: &UseStateHandle<String>| {
        let handle = value.clone();
        html! {
            <input
                type="date"
                class="bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[13px]"
                value={(**value).clone()}
                oninput={Callback::from(move |e: InputEvent| handle.set(input_value(&e)))}
            />
        }
    };

    let (from, to) = *shown;
    page_shell(
        "Statistics",
        html! {},
        html! {
            <>
                <form class="bg-white p-4 rounded-[10px] shadow-sm flex flex-wrap items-end gap-3" onsubmit={on_submit}>
                    <label class="flex flex-col text-[11px] font-bold text-[#173E63]">{"From"}{ date_input(&begin) }</label>
                    <label class="flex flex-col text-[11px] font-bold text-[#173E63]">{"To"}{ date_input(&end) }</label>
                    <button type="submit" class="bg-[#173E63] text-white px-4 py-2 rounded-[10px] text-[12px] font-bold">{"Show"}</button>
                </form>
                { error_alert(error.as_deref()) }
                <div class="bg-card rounded-2xl shadow-md border border-border p-6">
                    <h3 class="font-bold text-lg text-foreground mb-4">
                        { format!("Totals by category, {} to {}", format_date(from), format_date(to)) }
                    </h3>
                    if *loading {
                        <p class="text-muted-foreground">{"Loading statistics..."}</p>
                    } else {
                        { summary_table(&rows, "No transactions in this period.") }
                    }
                </div>
            </>
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{category, server_error, FakeApi};
    use futures::executor::block_on;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn period_defaults_to_month_so_far() {
        assert_eq!(current_month(day(2024, 2, 17)), (day(2024, 2, 1), day(2024, 2, 17)));
        assert_eq!(current_month(day(2024, 3, 1)), (day(2024, 3, 1), day(2024, 3, 1)));
    }

    #[test]
    fn period_validation() {
        assert_eq!(
            parse_period("2024-01-01", "2024-01-31"),
            Ok((day(2024, 1, 1), day(2024, 1, 31)))
        );
        assert!(parse_period("2024-01-01", "2024-01-01").is_ok());
        assert!(parse_period("2024-02-01", "2024-01-31").is_err());
        assert!(parse_period("", "2024-01-31").is_err());
    }

    #[test]
    fn loads_period_and_totals_rows() {
        let api = FakeApi::new();
        *api.summary.borrow_mut() = vec![
            CategorySummary { category: category(1, "Food"), total_amount: 120.5 },
            CategorySummary { category: category(2, "Rent"), total_amount: 900.0 },
        ];

        let rows = block_on(load_period(&api, day(2024, 1, 1), day(2024, 1, 31))).unwrap();

        assert_eq!(api.calls(), vec!["GET /summary/period 2024-01-01 2024-01-31".to_string()]);
        assert_eq!(summary_total(&rows), 1020.5);
    }

    #[test]
    fn load_failure_is_classified() {
        let api = FakeApi::new();
        api.fail_next(server_error(400, "bad range"));
        assert_eq!(
            block_on(load_period(&api, day(2024, 1, 1), day(2024, 1, 2))),
            Err("bad range".to_string())
        );
    }
}
