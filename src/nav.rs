//! Client-side routes and navigation history

use crate::constants::{MAX_HISTORY, SITE_TITLE};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub enum Route {
    #[default]
    Home,
    About,
    Projects,
    Contact,
}

impl Route {
    pub const ALL: [Route; 4] = [Route::Home, Route::About, Route::Projects, Route::Contact];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::About => "/about",
            Route::Projects => "/projects",
            Route::Contact => "/contact",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::About => "About",
            Route::Projects => "Projects",
            Route::Contact => "Contact",
        }
    }

    /// Window title, e.g. `About | Developer Portfolio`
    pub fn title(&self) -> String {
        format!("{} | {}", self.label(), SITE_TITLE)
    }

    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        Route::ALL
            .into_iter()
            .find(|r| r.path().eq_ignore_ascii_case(normalized))
    }

    pub fn index(&self) -> usize {
        Route::ALL.iter().position(|r| r == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Route> {
        Route::ALL.get(index).copied()
    }
}

/// Current route plus a bounded back stack
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Route,
    history: Vec<Route>,
}

impl Navigator {
    pub fn new(start: Route) -> Self {
        Navigator {
            current: start,
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    /// Go to `route`. Returns false when already there.
    pub fn navigate(&mut self, route: Route) -> bool {
        if route == self.current {
            return false;
        }
        if self.history.len() >= MAX_HISTORY {
            self.history.remove(0);
        }
        self.history.push(self.current);
        self.current = route;
        true
    }

    pub fn back(&mut self) -> Option<Route> {
        let previous = self.history.pop()?;
        self.current = previous;
        Some(previous)
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }
}
