#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use skuwatch_core::StoreProfile;
use skuwatch_scraper::dom::count_matches;
use skuwatch_scraper::{Page, PageError, WaitPolicy};

pub const QUERY: &str = "RTX 5090";

/// What the fake browser shows for one URL.
#[derive(Debug, Clone, Default)]
pub struct Route {
    /// Successive DOM snapshots; the last one stays once reached.
    pub snapshots: Vec<String>,
    /// Documents revealed by successive clicks.
    pub after_clicks: Vec<String>,
}

impl Route {
    pub fn showing(html: impl Into<String>) -> Self {
        Self {
            snapshots: vec![html.into()],
            after_clicks: Vec::new(),
        }
    }

    pub fn then_clicks(mut self, html: impl Into<String>) -> Self {
        self.after_clicks.push(html.into());
        self
    }
}

#[derive(Debug, Default)]
struct State {
    snapshots: VecDeque<String>,
    after_clicks: VecDeque<String>,
    navigations: Vec<(String, WaitPolicy)>,
    clicks: Vec<(String, usize)>,
    screenshots: Vec<PathBuf>,
}

/// In-memory [`Page`] whose documents are scripted per URL.
#[derive(Debug, Default)]
pub struct ScriptedPage {
    routes: HashMap<String, Route>,
    screenshots_fail: bool,
    state: Mutex<State>,
}

impl ScriptedPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, url: impl Into<String>, route: Route) -> Self {
        self.routes.insert(url.into(), route);
        self
    }

    pub fn without_screenshots(mut self) -> Self {
        self.screenshots_fail = true;
        self
    }

    pub fn navigations(&self) -> Vec<(String, WaitPolicy)> {
        self.state.lock().unwrap().navigations.clone()
    }

    pub fn clicks(&self) -> Vec<(String, usize)> {
        self.state.lock().unwrap().clicks.clone()
    }

    pub fn screenshots(&self) -> Vec<PathBuf> {
        self.state.lock().unwrap().screenshots.clone()
    }

    fn current(&self) -> Result<String, PageError> {
        let mut state = self.state.lock().unwrap();
        let html = match state.snapshots.len() {
            0 => return Err(PageError::NoDocument),
            1 => state.snapshots[0].clone(),
            _ => state.snapshots.pop_front().unwrap_or_default(),
        };
        Ok(html)
    }
}

#[async_trait]
impl Page for ScriptedPage {
    async fn navigate(&mut self, url: &str, wait: WaitPolicy) -> Result<(), PageError> {
        let mut state = self.state.lock().unwrap();
        state.navigations.push((url.to_owned(), wait));
        let Some(route) = self.routes.get(url) else {
            state.snapshots.clear();
            return Err(PageError::Navigation {
                url: url.to_owned(),
                reason: "net::ERR_NAME_NOT_RESOLVED".to_owned(),
            });
        };
        state.snapshots = route.snapshots.iter().cloned().collect();
        state.after_clicks = route.after_clicks.iter().cloned().collect();
        Ok(())
    }

    async fn content(&self) -> Result<String, PageError> {
        self.current()
    }

    async fn click(&mut self, selector: &str, index: usize) -> Result<(), PageError> {
        let html = self.current()?;
        if count_matches(&html, selector)? <= index {
            return Err(PageError::ElementNotFound {
                selector: selector.to_owned(),
                index,
            });
        }
        let mut state = self.state.lock().unwrap();
        state.clicks.push((selector.to_owned(), index));
        if let Some(next) = state.after_clicks.pop_front() {
            state.snapshots = VecDeque::from([next]);
        }
        Ok(())
    }

    async fn screenshot(&self, path: &Path) -> Result<(), PageError> {
        if self.screenshots_fail {
            return Err(PageError::Unsupported {
                operation: "screenshot",
            });
        }
        std::fs::write(path, b"\x89PNG")?;
        self.state.lock().unwrap().screenshots.push(path.to_owned());
        Ok(())
    }
}

pub fn profile(id: &str, region: Option<&str>) -> StoreProfile {
    StoreProfile {
        id: id.to_owned(),
        name: id.to_owned(),
        search_url: format!("https://{id}.test/search?q={{query}}"),
        region: region.map(str::to_owned),
        currency: None,
    }
}

pub fn url_for(profile: &StoreProfile) -> String {
    profile.search_url_for(QUERY)
}
