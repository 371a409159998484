mod api;
mod components;
mod config;
mod error;
mod format;
mod identity;
mod pages;
mod route;
mod session;
mod storage;

use std::rc::Rc;

use yew::prelude::*;

use api::ApiClient;
use components::{Layout, RouteGuard, SessionProvider};
use config::AppConfig;
use pages::{CategoriesPage, DashboardPage, LoginPage, RegisterPage, StatisticsPage, TransactionsPage};
use route::{Navigator, Route};
use session::SessionStore;
use storage::{KeyValueStore, LocalStore};

fn protected_page(route: Route) -> Html {
    match route {
        Route::Dashboard => html! { <DashboardPage /> },
        Route::Categories => html! { <CategoriesPage /> },
        Route::Transactions => html! { <TransactionsPage /> },
        Route::Statistics => html! { <StatisticsPage /> },
        Route::Login | Route::Register => html! {},
    }
}

#[function_component(App)]
fn app() -> Html {
    let services = use_memo(
        |_| {
            let storage: Rc<dyn KeyValueStore> = Rc::new(LocalStore);
            let config = AppConfig::from_build_env();
            log::info!("using API at {}", config.api_base_url);
            (SessionStore::new(storage.clone()), ApiClient::new(&config, storage))
        },
        (),
    );
    let (sessions, api) = (*services).clone();

    let route = use_state(|| Route::PROTECTED_ROOT);
    let navigator = {
        let route = route.clone();
        use_memo(
            move |_| Navigator::new(Callback::from(move |next: Route| route.set(next))),
            (),
        )
    };

    use_effect_with_deps(
        |route| {
            if let Some(document) = web_sys::window().and_then(|window| window.document()) {
                document.set_title(&format!("{} | Expense Tracker", route.title()));
            }
            || ()
        },
        *route,
    );

    let content = match *route {
        protected if protected.is_protected() => html! {
            <RouteGuard>
                <Layout active={protected}>
                    { protected_page(protected) }
                </Layout>
            </RouteGuard>
        },
        Route::Register => html! { <RegisterPage /> },
        _ => html! { <LoginPage /> },
    };

    html! {
        <SessionProvider store={sessions}>
            <ContextProvider<ApiClient> context={api}>
                <ContextProvider<Navigator> context={(*navigator).clone()}>
                    { content }
                </ContextProvider<Navigator>>
            </ContextProvider<ApiClient>>
        </SessionProvider>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));
    log::info!("starting expense tracker");
    yew::Renderer::<App>::new().render();
}
