//! Paginated transaction list with a create/edit modal and a filter bar.
//!
//! Every page change, save and filter change issues one fresh list request;
//! nothing is cached between pages.

use std::rc::Rc;

use chrono::NaiveDate;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{list_display, today, ListDisplay};
use crate::api::models::{
    Category, Transaction, TransactionFilter, TransactionInput, TransactionKind, TransactionPage,
    TransactionQuery,
};
use crate::api::{CategoryApi, TransactionApi};
use crate::components::icons::{icon_edit, icon_plus, icon_trash};
use crate::components::{confirm, error_alert, input_value, page_shell, select_value, use_api_client};
use crate::config::PAGE_SIZE;
use crate::format::{format_date, input_date, parse_input_date, signed_money};

const LOAD_FAILED: &str = "Could not load transactions.";
const CATEGORIES_FAILED: &str = "Could not load categories.";
const CREATE_FAILED: &str = "Could not create the transaction.";
const UPDATE_FAILED: &str = "Could not update the transaction.";
const DELETE_FAILED: &str = "Could not delete the transaction.";
const DELETE_PROMPT: &str = "Delete this transaction?";

/// Raw modal inputs, validated only on submit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionForm {
    pub amount: String,
    pub description: String,
    pub date: String,
    pub category_id: Option<u64>,
    pub kind: TransactionKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormField {
    Amount(String),
    Description(String),
    Date(String),
    Category(String),
    Kind(String),
}

impl TransactionForm {
    pub fn blank(today: NaiveDate, categories: &[Category]) -> Self {
        Self {
            date: input_date(today),
            category_id: categories.first().map(|c| c.id),
            ..Self::default()
        }
    }

    pub fn from_transaction(transaction: &Transaction) -> Self {
        Self {
            amount: transaction.amount.to_string(),
            description: transaction.description.clone().unwrap_or_default(),
            date: input_date(transaction.calendar_date()),
            category_id: Some(transaction.category.id),
            kind: transaction.kind,
        }
    }

    fn set(&mut self, field: FormField) {
        match field {
            FormField::Amount(value) => self.amount = value,
            FormField::Description(value) => self.description = value,
            FormField::Date(value) => self.date = value,
            FormField::Category(value) => self.category_id = value.parse().ok(),
            FormField::Kind(value) => self.kind = TransactionKind::from_value(&value),
        }
    }

    pub fn validate(&self) -> Result<TransactionInput, String> {
        let amount = self.amount.trim();
        if amount.is_empty() {
            return Err("Amount is required.".into());
        }
        if self.date.trim().is_empty() {
            return Err("Date is required.".into());
        }
        let Some(category_id) = self.category_id else {
            return Err("Choose a category.".into());
        };
        let amount = match amount.parse::<f64>() {
            Ok(amount) if amount.is_finite() && amount > 0.0 => amount,
            _ => return Err("Amount must be a number greater than zero.".into()),
        };
        let date = parse_input_date(&self.date).ok_or("Date must be in YYYY-MM-DD format.")?;

        Ok(TransactionInput {
            amount,
            description: self.description.trim().to_string(),
            date: input_date(date),
            category_id,
            kind: self.kind,
        })
    }
}

/// Raw filter bar inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterForm {
    pub category: String,
    pub begin: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterField {
    Category(String),
    Begin(String),
    End(String),
}

impl FilterForm {
    fn set(&mut self, field: FilterField) {
        match field {
            FilterField::Category(value) => self.category = value,
            FilterField::Begin(value) => self.begin = value,
            FilterField::End(value) => self.end = value,
        }
    }

    pub fn parse(&self) -> Result<TransactionFilter, String> {
        parse_filter(&self.category, &self.begin, &self.end)
    }
}

/// Empty inputs mean "no constraint".
pub fn parse_filter(category: &str, begin: &str, end: &str) -> Result<TransactionFilter, String> {
    let category_id = match category.trim() {
        "" => None,
        value => Some(value.parse::<u64>().map_err(|_| "Unknown category.".to_string())?),
    };
    let date = |value: &str, label: &str| match value.trim() {
        "" => Ok(None),
        value => parse_input_date(value)
            .map(Some)
            .ok_or_else(|| format!("{label} date must be in YYYY-MM-DD format.")),
    };
    let begin_date = date(begin, "Start")?;
    let end_date = date(end, "End")?;

    if let (Some(begin), Some(end)) = (begin_date, end_date) {
        if begin > end {
            return Err("Start date must not be after end date.".into());
        }
    }
    Ok(TransactionFilter {
        category_id,
        begin_date,
        end_date,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionsState {
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
    pub current_page: u32,
    pub total_pages: u32,
    pub loading: bool,
    pub error: Option<String>,
    /// Kept apart from `error` so a later page load does not hide it.
    pub categories_error: Option<String>,
    pub form: TransactionForm,
    pub form_error: Option<String>,
    pub editing: Option<u64>,
    pub modal_open: bool,
    pub filter: TransactionFilter,
    pub filter_form: FilterForm,
    pub filter_error: Option<String>,
}

impl Default for TransactionsState {
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            categories: Vec::new(),
            current_page: 1,
            total_pages: 1,
            loading: true,
            error: None,
            categories_error: None,
            form: TransactionForm::default(),
            form_error: None,
            editing: None,
            modal_open: false,
            filter: TransactionFilter::default(),
            filter_form: FilterForm::default(),
            filter_error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransactionsAction {
    PageRequested,
    PageLoaded(TransactionPage),
    LoadFailed(String),
    CategoriesLoaded(Vec<Category>),
    CategoriesFailed(String),
    OpenCreate(NaiveDate),
    OpenEdit(Transaction),
    CloseForm,
    EditForm(FormField),
    Saved,
    FormFailed(String),
    Deleted(u64),
    DeleteFailed(String),
    EditFilter(FilterField),
    FilterApplied(TransactionFilter),
    FilterRejected(String),
    FilterCleared,
}

impl TransactionsState {
    pub fn apply(&mut self, action: TransactionsAction) {
        match action {
            TransactionsAction::PageRequested => self.loading = true,
            TransactionsAction::PageLoaded(page) => {
                self.transactions = page.transactions;
                self.current_page = page.current_page;
                self.total_pages = page.total_pages;
                self.loading = false;
                self.error = None;
            }
            TransactionsAction::LoadFailed(message) => {
                self.loading = false;
                self.error = Some(message);
            }
            TransactionsAction::CategoriesLoaded(categories) => {
                if self.form.category_id.is_none() {
                    self.form.category_id = categories.first().map(|c| c.id);
                }
                self.categories = categories;
                self.categories_error = None;
            }
            TransactionsAction::CategoriesFailed(message) => self.categories_error = Some(message),
            TransactionsAction::OpenCreate(today) => {
                self.form = TransactionForm::blank(today, &self.categories);
                self.editing = None;
                self.form_error = None;
                self.modal_open = true;
            }
            TransactionsAction::OpenEdit(transaction) => {
                self.form = TransactionForm::from_transaction(&transaction);
                self.editing = Some(transaction.id);
                self.form_error = None;
                self.modal_open = true;
            }
            TransactionsAction::CloseForm | TransactionsAction::Saved => {
                self.modal_open = false;
                self.editing = None;
                self.form_error = None;
            }
            TransactionsAction::EditForm(field) => self.form.set(field),
            TransactionsAction::FormFailed(message) => self.form_error = Some(message),
            TransactionsAction::Deleted(id) => {
                self.transactions.retain(|t| t.id != id);
                self.error = None;
            }
            TransactionsAction::DeleteFailed(message) => self.error = Some(message),
            TransactionsAction::EditFilter(field) => self.filter_form.set(field),
            TransactionsAction::FilterApplied(filter) => {
                self.filter = filter;
                self.filter_error = None;
                self.current_page = 1;
                self.loading = true;
            }
            TransactionsAction::FilterRejected(message) => self.filter_error = Some(message),
            TransactionsAction::FilterCleared => {
                self.filter = TransactionFilter::default();
                self.filter_form = FilterForm::default();
                self.filter_error = None;
                self.current_page = 1;
                self.loading = true;
            }
        }
    }

    pub fn query(&self, page: u32) -> TransactionQuery {
        TransactionQuery {
            page,
            limit: PAGE_SIZE,
            filter: self.filter.clone(),
        }
    }

    /// The list request for `page`, or `None` when it is outside `1..=total_pages`.
    pub fn request_page(&self, page: u32) -> Option<TransactionQuery> {
        (1..=self.total_pages).contains(&page).then(|| self.query(page))
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn page_indicator(&self) -> String {
        format!("Page {} of {}", self.current_page, self.total_pages)
    }

    pub fn display(&self) -> ListDisplay {
        list_display(self.loading, self.transactions.is_empty(), self.error.as_deref())
    }
}

impl Reducible for TransactionsState {
    type Action = TransactionsAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}

pub async fn load_page<A: TransactionApi>(api: &A, query: &TransactionQuery) -> TransactionsAction {
    match api.list_transactions(query).await {
        Ok(page) => {
            log::info!(
                "loaded {} transactions (page {} of {})",
                page.transactions.len(),
                page.current_page,
                page.total_pages
            );
            TransactionsAction::PageLoaded(page)
        }
        Err(err) => {
            log::error!("failed to load transactions: {err}");
            TransactionsAction::LoadFailed(err.user_message(LOAD_FAILED))
        }
    }
}

pub async fn load_categories<A: CategoryApi>(api: &A) -> TransactionsAction {
    match api.list_categories().await {
        Ok(categories) => TransactionsAction::CategoriesLoaded(categories),
        Err(err) => {
            log::error!("failed to load categories for transactions: {err}");
            TransactionsAction::CategoriesFailed(err.user_message(CATEGORIES_FAILED))
        }
    }
}

/// Moves to `page` when it is in range: marks the list loading, then issues a
/// single list call. Returns whether a request was made.
pub async fn change_page<A: TransactionApi>(
    api: &A,
    state: &TransactionsState,
    page: u32,
    dispatch: impl Fn(TransactionsAction),
) -> bool {
    let Some(query) = state.request_page(page) else {
        log::debug!("page {page} out of range, ignoring");
        return false;
    };
    dispatch(TransactionsAction::PageRequested);
    dispatch(load_page(api, &query).await);
    true
}

/// Validates the form, creates or updates, then re-lists the current page.
pub async fn save<A: TransactionApi>(api: &A, state: &TransactionsState) -> Vec<TransactionsAction> {
    let input = match state.form.validate() {
        Ok(input) => input,
        Err(message) => return vec![TransactionsAction::FormFailed(message)],
    };

    let result = match state.editing {
        Some(id) => api
            .update_transaction(id, &input)
            .await
            .map_err(|err| (err, UPDATE_FAILED)),
        None => api
            .create_transaction(&input)
            .await
            .map_err(|err| (err, CREATE_FAILED)),
    };
    if let Err((err, fallback)) = result {
        log::error!("failed to save transaction: {err}");
        return vec![TransactionsAction::FormFailed(err.user_message(fallback))];
    }

    vec![
        TransactionsAction::Saved,
        load_page(api, &state.query(state.current_page)).await,
    ]
}

/// `None` when the user declines the confirmation.
pub async fn delete<A: TransactionApi>(
    api: &A,
    id: u64,
    confirmed: impl FnOnce(&str) -> bool,
) -> Option<TransactionsAction> {
    if !confirmed(DELETE_PROMPT) {
        return None;
    }
    Some(match api.delete_transaction(id).await {
        Ok(()) => TransactionsAction::Deleted(id),
        Err(err) => {
            log::error!("failed to delete transaction {id}: {err}");
            TransactionsAction::DeleteFailed(err.user_message(DELETE_FAILED))
        }
    })
}

#[function_component(TransactionsPage)]
pub fn transactions_page() -> Html {
    let api = use_api_client();
    let state = use_reducer(TransactionsState::default);

    {
        let api = api.clone();
        let state = state.clone();
        use_effect_with_deps(
            move |_| {
                let query = state.query(1);
                spawn_local(async move {
                    state.dispatch(load_categories(&api).await);
                    state.dispatch(load_page(&api, &query).await);
                });
                || ()
            },
            (),
        );
    }

    let go_to = {
        let api = api.clone();
        let state = state.clone();
        Callback::from(move |page: u32| {
            let snapshot = (*state).clone();
            let api = api.clone();
            let state = state.clone();
            spawn_local(async move {
                change_page(&api, &snapshot, page, |action| state.dispatch(action)).await;
            });
        })
    };

    let on_save = {
        let api = api.clone();
        let state = state.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let api = api.clone();
            let state = state.clone();
            let snapshot = (*state).clone();
            spawn_local(async move {
                for action in save(&api, &snapshot).await {
                    state.dispatch(action);
                }
            });
        })
    };

    let on_delete = {
        let api = api.clone();
        let state = state.clone();
        Callback::from(move |id: u64| {
            let api = api.clone();
            let state = state.clone();
            spawn_local(async move {
                if let Some(action) = delete(&api, id, confirm).await {
                    state.dispatch(action);
                }
            });
        })
    };

    let on_filter = {
        let api = api.clone();
        let state = state.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let filter = match state.filter_form.parse() {
                Ok(filter) => filter,
                Err(message) => {
                    state.dispatch(TransactionsAction::FilterRejected(message));
                    return;
                }
            };
            let query = TransactionQuery {
                page: 1,
                limit: PAGE_SIZE,
                filter: filter.clone(),
            };
            state.dispatch(TransactionsAction::FilterApplied(filter));
            let api = api.clone();
            let state = state.clone();
            spawn_local(async move {
                state.dispatch(load_page(&api, &query).await);
            });
        })
    };

    let on_clear_filter = {
        let api = api.clone();
        let state = state.clone();
        Callback::from(move |_| {
            let query = TransactionQuery {
                page: 1,
                limit: PAGE_SIZE,
                filter: TransactionFilter::default(),
            };
            state.dispatch(TransactionsAction::FilterCleared);
            let api = api.clone();
            let state = state.clone();
            spawn_local(async move {
                state.dispatch(load_page(&api, &query).await);
            });
        })
    };

    let open_create = {
        let state = state.clone();
        Callback::from(move |_| state.dispatch(TransactionsAction::OpenCreate(today())))
    };

    let edit = |make: fn(String) -> FormField| {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            state.dispatch(TransactionsAction::EditForm(make(input_value(&e))))
        })
    };
    let choose = |make: fn(String) -> FormField| {
        let state = state.clone();
        Callback::from(move |e: Event| {
            state.dispatch(TransactionsAction::EditForm(make(select_value(&e))))
        })
    };
    let edit_filter = |make: fn(String) -> FilterField| {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            state.dispatch(TransactionsAction::EditFilter(make(input_value(&e))))
        })
    };
    let choose_filter = {
        let state = state.clone();
        Callback::from(move |e: Event| {
            state.dispatch(TransactionsAction::EditFilter(FilterField::Category(select_value(&e))))
        })
    };

    let filter_bar = html! {
        <form class="bg-white p-4 rounded-[10px] shadow-sm flex flex-wrap items-end gap-3" onsubmit={on_filter}>
            <label class="flex flex-col text-[11px] font-bold text-[#173E63]">
                {"Category"}
                <select class="bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[13px]" onchange={choose_filter}>
                    <option value="" selected={state.filter_form.category.is_empty()}>{"All"}</option>
                    { for state.categories.iter().map(|c| html! {
                        <option value={c.id.to_string()} selected={state.filter_form.category == c.id.to_string()}>{ c.name.clone() }</option>
                    }) }
                </select>
            </label>
            <label class="flex flex-col text-[11px] font-bold text-[#173E63]">
                {"From"}
                <input type="date" class="bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[13px]" value={state.filter_form.begin.clone()} oninput={edit_filter(FilterField::Begin)} />
            </label>
            <label class="flex flex-col text-[11px] font-bold text-[#173E63]">
                {"To"}
                <input type="date" class="bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[13px]" value={state.filter_form.end.clone()} oninput={edit_filter(FilterField::End)} />
            </label>
            <button type="submit" class="bg-[#173E63] text-white px-4 py-2 rounded-[10px] text-[12px] font-bold">{"Apply"}</button>
            <button type="button" class="text-[#173E63] px-4 py-2 text-[12px] font-bold" onclick={on_clear_filter}>{"Clear"}</button>
            if !state.filter.is_empty() {
                <span class="text-[11px] font-bold text-[#1D617A] py-2">{"Filter active"}</span>
            }
        </form>
    };

    let list = match state.display() {
        ListDisplay::Loading => html! { <div class="p-6 text-center text-muted-foreground">{"Loading transactions..."}</div> },
        ListDisplay::ErrorOnly(message) => html! { <div class="p-6 text-center text-red-500 font-bold">{ message }</div> },
        ListDisplay::List { error } => {
            let prev = {
                let go_to = go_to.clone();
                let page = state.current_page.saturating_sub(1);
                Callback::from(move |_| go_to.emit(page))
            };
            let next = {
                let go_to = go_to.clone();
                let page = state.current_page + 1;
                Callback::from(move |_| go_to.emit(page))
            };
            html! {
                <>
                    { error_alert(error.as_deref()) }
                    <div class="bg-card rounded-2xl shadow-md border border-border overflow-hidden">
                        if state.transactions.is_empty() {
                            <p class="p-6 text-muted-foreground">{"No transactions found."}</p>
                        } else {
                            <table class="w-full text-[13px]">
                                <thead class="bg-[#f1f4f9] text-[#173E63]">
                                    <tr>
                                        <th class="text-left p-3">{"Date"}</th>
                                        <th class="text-left p-3">{"Description"}</th>
                                        <th class="text-left p-3">{"Category"}</th>
                                        <th class="text-left p-3">{"Type"}</th>
                                        <th class="text-right p-3">{"Amount"}</th>
                                        <th class="p-3"></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    { for state.transactions.iter().map(|tx| {
                                        let id = tx.id;
                                        let amount_class = match tx.kind {
                                            TransactionKind::Income => "text-right p-3 font-bold text-green-600",
                                            TransactionKind::Expense => "text-right p-3 font-bold text-red-500",
                                        };
                                        let open_edit = {
                                            let state = state.clone();
                                            let tx = tx.clone();
                                            Callback::from(move |_| state.dispatch(TransactionsAction::OpenEdit(tx.clone())))
                                        };
                                        let on_delete = on_delete.clone();
                                        html! {
                                            <tr key={id} class="border-t border-border">
                                                <td class="p-3">{ format_date(tx.calendar_date()) }</td>
                                                <td class="p-3">{ tx.description_text().unwrap_or("-").to_string() }</td>
                                                <td class="p-3">{ tx.category.name.clone() }</td>
                                                <td class="p-3">{ tx.kind.label() }</td>
                                                <td class={amount_class}>{ signed_money(tx) }</td>
                                                <td class="p-3 flex gap-2 justify-end">
                                                    <button title="Edit" class="text-blue-500" onclick={open_edit}>{ icon_edit() }</button>
                                                    <button title="Delete" class="text-red-500" onclick={Callback::from(move |_| on_delete.emit(id))}>{ icon_trash() }</button>
                                                </td>
                                            </tr>
                                        }
                                    }) }
                                </tbody>
                            </table>
                        }
                    </div>
                    <div class="flex items-center justify-center gap-4 text-[13px] text-[#173E63]">
                        <button class="px-3 py-1 rounded-lg border disabled:opacity-40" disabled={!state.has_prev()} onclick={prev}>{"Previous"}</button>
                        <span class="font-bold">{ state.page_indicator() }</span>
                        <button class="px-3 py-1 rounded-lg border disabled:opacity-40" disabled={!state.has_next()} onclick={next}>{"Next"}</button>
                    </div>
                </>
            }
        }
    };

    let modal = if state.modal_open {
        let close = {
            let state = state.clone();
            Callback::from(move |_| state.dispatch(TransactionsAction::CloseForm))
        };
        let title = if state.editing.is_some() { "Edit Transaction" } else { "New Transaction" };
        let form = &state.form;
        html! {
            <div class="fixed inset-0 bg-black/40 flex items-center justify-center z-50">
                <form class="bg-white rounded-[16px] p-6 w-[420px] space-y-3" onsubmit={on_save}>
                    <h3 class="text-[#173E63] font-bold text-lg">{ title }</h3>
                    { error_alert(state.form_error.as_deref()) }
                    <select class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[13px]" onchange={choose(FormField::Kind)}>
                        { for [TransactionKind::Expense, TransactionKind::Income].into_iter().map(|kind| html! {
                            <option value={kind.as_str()} selected={form.kind == kind}>{ kind.label() }</option>
                        }) }
                    </select>
                    <input type="number" step="0.01" min="0" placeholder="Amount" class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[13px]" value={form.amount.clone()} oninput={edit(FormField::Amount)} />
                    <input type="date" class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[13px]" value={form.date.clone()} oninput={edit(FormField::Date)} />
                    <select class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[13px]" onchange={choose(FormField::Category)}>
                        if state.categories.is_empty() {
                            <option value="">{"Create a category first"}</option>
                        }
                        { for state.categories.iter().map(|c| html! {
                            <option value={c.id.to_string()} selected={form.category_id == Some(c.id)}>{ c.name.clone() }</option>
                        }) }
                    </select>
                    <input type="text" placeholder="Description (optional)" class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[13px]" value={form.description.clone()} oninput={edit(FormField::Description)} />
                    <div class="flex justify-end gap-3 pt-2">
                        <button type="button" class="text-[#173E63] px-4 py-2 text-[12px] font-bold" onclick={close}>{"Cancel"}</button>
                        <button type="submit" class="bg-[#173E63] text-white px-4 py-2 rounded-[10px] text-[12px] font-bold">{"Save"}</button>
                    </div>
                </form>
            </div>
        }
    } else {
        html! {}
    };

    page_shell(
        "Transactions",
        html! {
            <button class="bg-[#173E63] text-white px-4 py-2 rounded-[10px] text-[12px] font-bold flex items-center gap-2" onclick={open_create}>
                { icon_plus() }{"Add Transaction"}
            </button>
        },
        html! {
            <>
                { error_alert(state.categories_error.as_deref()) }
                { filter_bar }
                { error_alert(state.filter_error.as_deref()) }
                { list }
                { modal }
            </>
        },
    )
}
