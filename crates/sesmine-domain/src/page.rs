//! Site pages and the page-access rules evaluated on every page load.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::plan::Plan;
use crate::session::Session;

/// A page of the site, identified on the wire by its file name (`"login.html"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Page {
    #[serde(rename = "index.html")]
    Index,
    #[serde(rename = "about.html")]
    About,
    #[serde(rename = "features.html")]
    Features,
    #[serde(rename = "contact.html")]
    Contact,
    #[serde(rename = "login.html")]
    Login,
    #[serde(rename = "signup.html")]
    Signup,
    /// User dashboard.
    #[serde(rename = "home.html")]
    Home,
    /// Admin dashboard.
    #[serde(rename = "admin-panel.html")]
    AdminPanel,
    #[serde(rename = "setting.html")]
    Settings,
    #[serde(rename = "engineering-hub.html")]
    EngineeringHub,
    #[serde(rename = "economics-hub.html")]
    EconomicsHub,
    #[serde(rename = "training-education-hub.html")]
    TrainingHub,
    #[serde(rename = "analytics-platform.html")]
    AnalyticsPlatform,
    #[serde(rename = "consulting-hub.html")]
    ConsultingHub,
    #[serde(rename = "innovation-technology-hub.html")]
    InnovationHub,
    #[serde(rename = "procurement-hub.html")]
    ProcurementHub,
}

impl Page {
    pub const ALL: [Page; 16] = [
        Page::Index,
        Page::About,
        Page::Features,
        Page::Contact,
        Page::Login,
        Page::Signup,
        Page::Home,
        Page::AdminPanel,
        Page::Settings,
        Page::EngineeringHub,
        Page::EconomicsHub,
        Page::TrainingHub,
        Page::AnalyticsPlatform,
        Page::ConsultingHub,
        Page::InnovationHub,
        Page::ProcurementHub,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Index => "index.html",
            Self::About => "about.html",
            Self::Features => "features.html",
            Self::Contact => "contact.html",
            Self::Login => "login.html",
            Self::Signup => "signup.html",
            Self::Home => "home.html",
            Self::AdminPanel => "admin-panel.html",
            Self::Settings => "setting.html",
            Self::EngineeringHub => "engineering-hub.html",
            Self::EconomicsHub => "economics-hub.html",
            Self::TrainingHub => "training-education-hub.html",
            Self::AnalyticsPlatform => "analytics-platform.html",
            Self::ConsultingHub => "consulting-hub.html",
            Self::InnovationHub => "innovation-technology-hub.html",
            Self::ProcurementHub => "procurement-hub.html",
        }
    }

    /// Login and signup.
    pub fn is_auth_page(self) -> bool {
        matches!(self, Self::Login | Self::Signup)
    }

    pub fn is_hub(self) -> bool {
        matches!(
            self,
            Self::EngineeringHub
                | Self::EconomicsHub
                | Self::TrainingHub
                | Self::AnalyticsPlatform
                | Self::ConsultingHub
                | Self::InnovationHub
                | Self::ProcurementHub
        )
    }

    /// Pages that require a session. Hubs are included because plan gating needs one.
    pub fn is_protected(self) -> bool {
        matches!(self, Self::Home | Self::AdminPanel | Self::Settings) || self.is_hub()
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown page: {0}")]
pub struct UnknownPage(pub String);

impl FromStr for Page {
    type Err = UnknownPage;

    /// Accepts the file name with or without the `.html` suffix. Empty means the index page.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('/');
        if trimmed.is_empty() {
            return Ok(Self::Index);
        }
        let stem = trimmed.strip_suffix(".html").unwrap_or(trimmed);
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().strip_suffix(".html") == Some(stem))
            .ok_or_else(|| UnknownPage(s.to_owned()))
    }
}

/// Outcome of evaluating page access for one page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    Allow,
    RedirectTo(Page),
}

/// Session/role redirect rules, evaluated once per page load before page initialization.
///
/// - no session on a protected page → login
/// - admin on login or signup → admin dashboard
/// - non-admin on login → user dashboard
/// - anything else → allow
pub fn enforce_page_access(session: Option<&Session>, page: Page) -> PageAction {
    match session {
        None if page.is_protected() => PageAction::RedirectTo(Page::Login),
        None => PageAction::Allow,
        Some(s) if s.is_admin() && page.is_auth_page() => PageAction::RedirectTo(Page::AdminPanel),
        Some(s) if !s.is_admin() && page == Page::Login => PageAction::RedirectTo(Page::Home),
        Some(_) => PageAction::Allow,
    }
}

/// Plans permitted to view `page`. Pages that are not hubs are open to every plan.
pub fn allowed(plan: Plan, page: Page) -> bool {
    match page {
        Page::EngineeringHub | Page::EconomicsHub | Page::TrainingHub | Page::ConsultingHub => {
            true
        }
        Page::AnalyticsPlatform | Page::ProcurementHub => {
            matches!(plan, Plan::Professional | Plan::Enterprise)
        }
        Page::InnovationHub => plan == Plan::Enterprise,
        _ => true,
    }
}
