use yew::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Categories,
    Transactions,
    Statistics,
}

impl Route {
    /// Where a successful login lands.
    pub const PROTECTED_ROOT: Route = Route::Dashboard;

    pub fn is_protected(self) -> bool {
        !matches!(self, Route::Login | Route::Register)
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Register => "Register",
            Route::Dashboard => "Dashboard",
            Route::Categories => "Categories",
            Route::Transactions => "Transactions",
            Route::Statistics => "Statistics",
        }
    }
}

/// Switches the active view. Provided by the app root.
#[derive(Clone, PartialEq)]
pub struct Navigator(Callback<Route>);

impl Navigator {
    pub fn new(on_navigate: Callback<Route>) -> Self {
        Self(on_navigate)
    }

    pub fn push(&self, route: Route) {
        log::debug!("navigating to {route:?}");
        self.0.emit(route);
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self(Callback::from(|route: Route| {
            log::warn!("no navigator in context, dropping navigation to {route:?}")
        }))
    }
}

#[hook]
pub fn use_navigator() -> Navigator {
    use_context::<Navigator>().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_auth_screens_are_public() {
        assert!(!Route::Login.is_protected());
        assert!(!Route::Register.is_protected());
        for route in [Route::Dashboard, Route::Categories, Route::Transactions, Route::Statistics] {
            assert!(route.is_protected(), "{route:?}");
        }
        assert!(Route::PROTECTED_ROOT.is_protected());
    }
}
