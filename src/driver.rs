//! Driver capability trait
//!
//! Everything that actually touches a browser lives behind [`Driver`]. This
//! crate only schedules and interprets the calls; DOM querying, event
//! dispatch, and navigation are the implementor's problem.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Opaque reference to an element, interpreted by the driver.
///
/// For selector-based drivers this is a CSS selector; handle-based drivers
/// can store whatever identifier they resolve internally.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementHandle(pub String);

impl ElementHandle {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementHandle {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

/// Opaque reference to a page/tab-like target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetHandle(pub String);

impl TargetHandle {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TargetHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// On-screen position of an element (top-left corner of its bounding box).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Element states the driver can be queried about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementState {
    /// Present in the DOM.
    Attached,
    /// Present and rendered.
    Visible,
    /// Not rendered, or not present at all.
    Hidden,
    /// Not present in the DOM.
    Detached,
    /// Checkbox/radio checked state.
    Checked,
}

impl std::fmt::Display for ElementState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ElementState::Attached => "attached",
            ElementState::Visible => "visible",
            ElementState::Hidden => "hidden",
            ElementState::Detached => "detached",
            ElementState::Checked => "checked",
        };
        f.write_str(s)
    }
}

/// Load milestones a target can be awaited on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    /// The `load` event fired.
    Load,
    /// DOM parsed; subresources may still be loading.
    #[default]
    DomContentLoaded,
    /// No network activity for a quiet period.
    NetworkIdle,
}

/// The external automation capability this crate polls against.
///
/// Implementations wrap a real engine (CDP session, WebDriver, Playwright
/// bridge). All methods are probes or commands; none of them should loop or
/// retry internally - the polling layers in this crate own that.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Read the element's current on-screen position, or `None` when it has
    /// no bounding box (detached, `display:none`, animated out of view).
    async fn measure_position(&self, element: &ElementHandle) -> Result<Option<Position>>;

    /// Single-sample query of an element state. `Ok(false)` means "not in
    /// that state right now", not an error.
    async fn query_state(&self, element: &ElementHandle, state: ElementState) -> Result<bool>;

    /// All currently open targets, in opening order.
    async fn list_targets(&self) -> Result<Vec<TargetHandle>>;

    /// Bring a target to the foreground.
    async fn bring_to_front(&self, target: &TargetHandle) -> Result<()>;

    /// Suspend until the target reaches the given load state.
    async fn await_load_state(&self, target: &TargetHandle, state: LoadState) -> Result<()>;

    /// Close a target.
    async fn close_target(&self, target: &TargetHandle) -> Result<()>;
}
