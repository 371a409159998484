use yew::prelude::*;

use super::icons::{icon_bar_chart, icon_credit_card, icon_layout_grid, icon_log_out, icon_wallet};
use super::session_provider::use_session;
use crate::route::{use_navigator, Route};

struct NavItem {
    label: &'static str,
    route: Route,
    icon: fn() -> Html,
}

const NAV_ITEMS: [NavItem; 4] = [
    NavItem {
        label: "Dashboard",
        route: Route::Dashboard,
        icon: icon_layout_grid,
    },
    NavItem {
        label: "Categories",
        route: Route::Categories,
        icon: icon_wallet,
    },
    NavItem {
        label: "Transactions",
        route: Route::Transactions,
        icon: icon_credit_card,
    },
    NavItem {
        label: "Statistics",
        route: Route::Statistics,
        icon: icon_bar_chart,
    },
];

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub active: Route,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    html! {
        <div class="flex h-screen bg-background">
            <Sidebar active={props.active} />
            <div class="flex-1 flex flex-col overflow-hidden">
                <Header />
                <main class="flex-1 overflow-y-auto">
                    { for props.children.iter() }
                </main>
            </div>
        </div>
    }
}

#[function_component(Header)]
fn header() -> Html {
    let username = use_session()
        .and_then(|handle| handle.session().username().map(str::to_string))
        .unwrap_or_default();

    html! {
        <header class="bg-[#D8E1E8] border-b border-border h-16 flex items-center justify-end px-6">
            <span class="text-sm font-bold text-[#173E63]">{ username }</span>
        </header>
    }
}

#[derive(Properties, PartialEq)]
struct SidebarProps {
    active: Route,
}

#[function_component(Sidebar)]
fn sidebar(props: &SidebarProps) -> Html {
    let navigator = use_navigator();
    let session = use_session();

    let on_logout = {
        let navigator = navigator.clone();
        Callback::from(move |_| {
            if let Some(session) = &session {
                session.logout();
            }
            navigator.push(Route::Login);
        })
    };

    html! {
        <div class="w-[220px] h-screen bg-[#D8E1E8] p-4 flex flex-col">
            <div class="px-2 mb-8">
                <span class="text-[#173E63] text-2xl font-black tracking-tight">{"Expense Tracker"}</span>
            </div>

            <div class="flex-1 bg-[#173E63] rounded-[24px] flex flex-col py-6 px-3 shadow-lg">
                <nav class="flex-1 space-y-2">
                    { for NAV_ITEMS.iter().map(|item| {
                        let class_name = if item.route == props.active {
                            "flex items-center gap-3 px-4 py-3 rounded-xl text-[13px] font-medium bg-[#B2CBDE] text-[#173E63] w-full"
                        } else {
                            "flex items-center gap-3 px-4 py-3 rounded-xl text-[13px] font-medium text-slate-300 hover:bg-white/5 hover:text-white w-full"
                        };
                        let navigator = navigator.clone();
                        let route = item.route;

                        html! {
                            <button type="button" class={class_name} onclick={Callback::from(move |_| navigator.push(route))}>
                                <span class="shrink-0">{ (item.icon)() }</span>
                                <span class="truncate whitespace-nowrap text-left">{ item.label }</span>
                            </button>
                        }
                    }) }
                </nav>

                <div class="mt-auto pt-4">
                    <button onclick={on_logout} class="flex items-center gap-3 w-full px-4 py-3 rounded-xl hover:bg-white/10 text-[13px] font-medium text-slate-300">
                        { icon_log_out() }
                        <span>{"Log Out"}</span>
                    </button>
                </div>
            </div>
        </div>
    }
}

pub fn page_shell(title: &'static str, actions: Html, children: Html) -> Html {
    html! {
        <div class="p-6 max-w-7xl mx-auto">
            <div class="flex items-center justify-between pb-4 border-b border-border">
                <h1 class="text-2xl font-bold text-foreground">{ title }</h1>
                { actions }
            </div>
            <div class="pt-5 space-y-6">
                { children }
            </div>
        </div>
    }
}

pub fn error_alert(message: Option<&str>) -> Html {
    match message {
        Some(message) => html! {
            <div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded" role="alert">
                { message.to_string() }
            </div>
        },
        None => html! {},
    }
}

pub fn success_alert(message: Option<&str>) -> Html {
    match message {
        Some(message) => html! {
            <div class="bg-green-100 border border-green-400 text-green-700 px-4 py-3 rounded" role="status">
                { message.to_string() }
            </div>
        },
        None => html! {},
    }
}
