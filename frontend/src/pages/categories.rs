use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{list_display, ListDisplay};
use crate::api::models::Category;
use crate::api::CategoryApi;
use crate::components::icons::{icon_edit, icon_plus, icon_trash};
use crate::components::{confirm, error_alert, input_value, page_shell, use_api_client};

const LOAD_FAILED: &str = "Could not load categories. Try logging in again.";
const CREATE_FAILED: &str = "Could not create the category.";
const UPDATE_FAILED: &str = "Could not update the category.";
const DELETE_FAILED: &str = "Could not delete the category.";
const EMPTY_NAME: &str = "Category name cannot be empty.";
const DELETE_PROMPT: &str =
    "Delete this category? Deletion is blocked while transactions still use it.";

#[derive(Debug, Clone, PartialEq)]
pub struct CategoriesState {
    pub categories: Vec<Category>,
    pub loading: bool,
    /// List-scoped: load and delete failures.
    pub error: Option<String>,
    /// Form-scoped: validation, create and update failures.
    pub form_error: Option<String>,
    pub new_name: String,
    pub editing: Option<u64>,
    pub edit_name: String,
}

impl Default for CategoriesState {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            loading: true,
            error: None,
            form_error: None,
            new_name: String::new(),
            editing: None,
            edit_name: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CategoriesAction {
    Loaded(Vec<Category>),
    LoadFailed(String),
    Created(Category),
    Updated(Category),
    Deleted(u64),
    FormFailed(String),
    DeleteFailed(String),
    NewNameChanged(String),
    StartEdit(Category),
    EditNameChanged(String),
    CancelEdit,
}

impl CategoriesState {
    pub fn apply(&mut self, action: CategoriesAction) {
        match action {
            CategoriesAction::Loaded(categories) => {
                self.categories = categories;
                self.loading = false;
                self.error = None;
            }
            CategoriesAction::LoadFailed(message) => {
                self.loading = false;
                self.error = Some(message);
            }
            CategoriesAction::Created(category) => {
                self.categories.push(category);
                self.new_name.clear();
                self.form_error = None;
                self.error = None;
            }
            CategoriesAction::Updated(category) => {
                if let Some(existing) = self.categories.iter_mut().find(|c| c.id == category.id) {
                    *existing = category;
                }
                self.editing = None;
                self.edit_name.clear();
                self.form_error = None;
                self.error = None;
            }
            CategoriesAction::Deleted(id) => {
                self.categories.retain(|c| c.id != id);
                if self.editing == Some(id) {
                    self.editing = None;
                }
                self.error = None;
            }
            CategoriesAction::FormFailed(message) => self.form_error = Some(message),
            CategoriesAction::DeleteFailed(message) => self.error = Some(message),
            CategoriesAction::NewNameChanged(name) => self.new_name = name,
            CategoriesAction::StartEdit(category) => {
                self.editing = Some(category.id);
                self.edit_name = category.name;
                self.form_error = None;
            }
            CategoriesAction::EditNameChanged(name) => self.edit_name = name,
            CategoriesAction::CancelEdit => {
                self.editing = None;
                self.edit_name.clear();
            }
        }
    }

    pub fn display(&self) -> ListDisplay {
        list_display(self.loading, self.categories.is_empty(), self.error.as_deref())
    }
}

impl Reducible for CategoriesState {
    type Action = CategoriesAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}

pub fn validate_name(name: &str) -> Result<String, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(EMPTY_NAME.to_string());
    }
    Ok(name.to_string())
}

pub async fn load<A: CategoryApi>(api: &A) -> CategoriesAction {
    match api.list_categories().await {
        Ok(categories) => {
            log::info!("loaded {} categories", categories.len());
            CategoriesAction::Loaded(categories)
        }
        Err(err) => {
            log::error!("failed to load categories: {err}");
            CategoriesAction::LoadFailed(err.user_message(LOAD_FAILED))
        }
    }
}

pub async fn create<A: CategoryApi>(api: &A, name: &str) -> CategoriesAction {
    let name = match validate_name(name) {
        Ok(name) => name,
        Err(message) => return CategoriesAction::FormFailed(message),
    };
    match api.create_category(&name).await {
        Ok(category) => CategoriesAction::Created(category),
        Err(err) => {
            log::error!("failed to create category {name:?}: {err}");
            CategoriesAction::FormFailed(err.user_message(CREATE_FAILED))
        }
    }
}

pub async fn update<A: CategoryApi>(api: &A, id: u64, name: &str) -> CategoriesAction {
    let name = match validate_name(name) {
        Ok(name) => name,
        Err(message) => return CategoriesAction::FormFailed(message),
    };
    match api.update_category(id, &name).await {
        Ok(category) => CategoriesAction::Updated(category),
        Err(err) => {
            log::error!("failed to update category {id}: {err}");
            CategoriesAction::FormFailed(err.user_message(UPDATE_FAILED))
        }
    }
}

/// `None` when the user declines the confirmation; nothing is sent then.
pub async fn delete<A: CategoryApi>(
    api: &A,
    id: u64,
    confirmed: impl FnOnce(&str) -> bool,
) -> Option<CategoriesAction> {
    if !confirmed(DELETE_PROMPT) {
        log::debug!("deletion of category {id} cancelled");
        return None;
    }
    Some(match api.delete_category(id).await {
        Ok(()) => CategoriesAction::Deleted(id),
        Err(err) => {
            log::error!("failed to delete category {id}: {err}");
            CategoriesAction::DeleteFailed(err.user_message(DELETE_FAILED))
        }
    })
}

#[function_component(CategoriesPage)]
pub fn categories_page() -> Html {
    let api = use_api_client();
    let state = use_reducer(CategoriesState::default);

    {
        let api = api.clone();
        let state = state.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    state.dispatch(load(&api).await);
                });
                || ()
            },
            (),
        );
    }

    let on_create = {
        let api = api.clone();
        let state = state.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let api = api.clone();
            let state = state.clone();
            let name = state.new_name.clone();
            spawn_local(async move {
                state.dispatch(create(&api, &name).await);
            });
        })
    };

    let on_update = {
        let api = api.clone();
        let state = state.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(id) = state.editing else { return };
            let api = api.clone();
            let state = state.clone();
            let name = state.edit_name.clone();
            spawn_local(async move {
                state.dispatch(update(&api, id, &name).await);
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

    let list = match state.display() {
        ListDisplay::Loading => html! { <div class="p-6 text-center text-muted-foreground">{"Loading categories..."}</div> },
        ListDisplay::ErrorOnly(message) => html! { <div class="p-6 text-center text-red-500 font-bold">{ message }</div> },
        ListDisplay::List { error } => html! {
            <>
                { error_alert(error.as_deref()) }
                <div class="bg-card rounded-2xl shadow-md border border-border p-6">
                    <h3 class="font-bold text-lg text-foreground mb-4">{ format!("Existing categories ({})", state.categories.len()) }</h3>
                    if state.categories.is_empty() {
                        <p class="text-muted-foreground">{"You have no categories yet."}</p>
                    } else {
                        <ul class="space-y-3">
                            { for state.categories.iter().map(|category| {
                                let id = category.id;
                                if state.editing == Some(id) {
                                    html! {
                                        <li key={id} class="flex items-center p-3 border rounded-lg">
                                            <form class="flex-grow flex gap-3" onsubmit={on_update.clone()}>
                                                <input
                                                    type="text"
                                                    class="flex-grow p-1 border border-blue-400 rounded-lg"
                                                    value={state.edit_name.clone()}
                                                    oninput={{
                                                        let state = state.clone();
                                                        Callback::from(move |e: InputEvent| state.dispatch(CategoriesAction::EditNameChanged(input_value(&e))))
                                                    }}
                                                />
                                                <button type="submit" class="text-green-600 font-semibold">{"Save"}</button>
                                                <button
                                                    type="button"
                                                    class="text-red-500 font-semibold"
                                                    onclick={{
                                                        let state = state.clone();
                                                        Callback::from(move |_| state.dispatch(CategoriesAction::CancelEdit))
                                                    }}
                                                >
                                                    {"Cancel"}
                                                </button>
                                            </form>
                                        </li>
                                    }
                                } else {
                                    let start_edit = {
                                        let state = state.clone();
                                        let category = category.clone();
                                        Callback::from(move |_| state.dispatch(CategoriesAction::StartEdit(category.clone())))
                                    };
                                    let on_delete = on_delete.clone();
                                    html! {
                                        <li key={id} class="flex justify-between items-center p-3 border rounded-lg bg-muted/40">
                                            <span class="font-medium text-foreground">{ category.name.clone() }</span>
                                            <div class="flex gap-2">
                                                <button title="Edit" class="text-blue-500" onclick={start_edit}>{ icon_edit() }</button>
                                                <button title="Delete" class="text-red-500" onclick={Callback::from(move |_| on_delete.emit(id))}>{ icon_trash() }</button>
                                            </div>
                                        </li>
                                    }
                                }
                            }) }
                        </ul>
                    }
                </div>
            </>
        },
    };

    page_shell(
        "Categories",
        html! {},
        html! {
            <>
                { error_alert(state.form_error.as_deref()) }
                <div class="bg-white p-5 rounded-[10px] shadow-sm border border-white/50">
                    <h4 class="text-[#1D617A] font-bold text-[15px] mb-3 flex items-center gap-2">{ icon_plus() }{"Add New Category"}</h4>
                    <form class="flex gap-3" onsubmit={on_create}>
                        <input
                            type="text"
                            placeholder="Category name, e.g. Food"
                            class="flex-grow bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[13px] text-[#173E63] border-none"
                            value={state.new_name.clone()}
                            oninput={{
                                let state = state.clone();
                                Callback::from(move |e: InputEvent| state.dispatch(CategoriesAction::NewNameChanged(input_value(&e))))
                            }}
                        />
                        <button type="submit" class="bg-[#173E63] text-white px-4 py-2 rounded-[10px] text-[12px] font-bold">{"Create"}</button>
                    </form>
                </div>
                { list }
            </>
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{category, server_error, FakeApi};
    use crate::error::ApiError;
    use futures::executor::block_on;

    fn loaded(api: &FakeApi) -> CategoriesState {
        let mut state = CategoriesState::default();
        state.apply(block_on(load(api)));
        state
    }

    #[test]
    fn load_replaces_list() {
        let api = FakeApi::with_categories(&["Food", "Rent"]);
        let state = loaded(&api);

        assert!(!state.loading);
        assert_eq!(state.categories, vec![category(1, "Food"), category(2, "Rent")]);
        assert_eq!(state.display(), ListDisplay::List { error: None });
    }

    #[test]
    fn load_failure_on_empty_list_shows_error_alone() {
        let api = FakeApi::new();
        api.fail_next(ApiError::Transport("connection refused".into()));
        let state = loaded(&api);

        assert_eq!(
            state.display(),
            ListDisplay::ErrorOnly("Request failed: connection refused".into())
        );
    }

    #[test]
    fn blank_names_never_reach_the_server() {
        let api = FakeApi::with_categories(&["Food"]);
        let mut state = loaded(&api);
        api.clear_calls();

        for name in ["", "   ", "\t\n"] {
            state.apply(block_on(create(&api, name)));
            state.apply(block_on(update(&api, 1, name)));
        }

        assert!(api.calls().is_empty());
        assert_eq!(state.categories, vec![category(1, "Food")]);
        assert_eq!(state.form_error.as_deref(), Some(EMPTY_NAME));
    }

    #[test]
    fn create_appends_server_copy_with_trimmed_name() {
        let api = FakeApi::with_categories(&["Food"]);
        let mut state = loaded(&api);
        state.apply(CategoriesAction::NewNameChanged("  Travel ".into()));

        state.apply(block_on(create(&api, &state.new_name.clone())));

        assert_eq!(state.categories.last(), Some(&category(100, "Travel")));
        assert!(state.new_name.is_empty());
        assert_eq!(state.form_error, None);
    }

    #[test]
    fn create_failure_uses_form_error_not_list_error() {
        let api = FakeApi::with_categories(&["Food"]);
        let mut state = loaded(&api);
        api.fail_next(server_error(400, "name too long"));

        state.apply(block_on(create(&api, "x")));

        assert_eq!(state.form_error.as_deref(), Some("name too long"));
        assert_eq!(state.error, None);
        assert_eq!(state.categories.len(), 1);
    }

    #[test]
    fn update_replaces_by_id() {
        let api = FakeApi::with_categories(&["Food", "Rent"]);
        let mut state = loaded(&api);
        state.apply(CategoriesAction::StartEdit(category(2, "Rent")));

        state.apply(block_on(update(&api, 2, "Housing")));

        assert_eq!(state.categories, vec![category(1, "Food"), category(2, "Housing")]);
        assert_eq!(state.editing, None);
    }

    #[test]
    fn declined_delete_sends_nothing() {
        let api = FakeApi::with_categories(&["Food"]);
        let state = loaded(&api);
        api.clear_calls();

        let action = block_on(delete(&api, 1, |_| false));

        assert_eq!(action, None);
        assert!(api.calls().is_empty());
        assert_eq!(state.categories.len(), 1);
    }

    #[test]
    fn delete_removes_by_id() {
        let api = FakeApi::with_categories(&["Food", "Rent"]);
        let mut state = loaded(&api);

        let action = block_on(delete(&api, 1, |prompt| prompt == DELETE_PROMPT)).unwrap();
        state.apply(action);

        assert_eq!(state.categories, vec![category(2, "Rent")]);
        assert_eq!(api.calls().last().map(String::as_str), Some("DELETE /categories/1"));
    }

    #[test]
    fn referenced_category_survives_rejected_delete() {
        let api = FakeApi::with_categories(&["Food", "Rent"]);
        api.referenced_categories.borrow_mut().insert(1);
        let mut state = loaded(&api);

        state.apply(block_on(delete(&api, 1, |_| true)).unwrap());

        assert!(state.categories.contains(&category(1, "Food")));
        assert_eq!(
            state.display(),
            ListDisplay::List {
                error: Some("Category is used by existing transactions".into())
            }
        );
    }

    #[test]
    fn later_successful_change_clears_rejected_delete() {
        let api = FakeApi::with_categories(&["Food", "Rent", "Travel"]);
        api.referenced_categories.borrow_mut().insert(1);
        let mut state = loaded(&api);

        state.apply(block_on(delete(&api, 1, |_| true)).unwrap());
        assert!(state.error.is_some());
        state.apply(block_on(delete(&api, 2, |_| true)).unwrap());
        assert_eq!(state.display(), ListDisplay::List { error: None });

        state.apply(block_on(delete(&api, 1, |_| true)).unwrap());
        assert!(state.error.is_some());
        state.apply(block_on(create(&api, "Gifts")));
        assert_eq!(state.error, None);

        state.apply(block_on(delete(&api, 1, |_| true)).unwrap());
        state.apply(block_on(update(&api, 3, "Trips")));
        assert_eq!(state.error, None);
        assert!(state.categories.contains(&category(3, "Trips")));
    }
}
