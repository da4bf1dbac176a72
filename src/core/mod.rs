//! # Core Application Logic
//!
//! The Prompt Submission View's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (App)          │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Presentation         │
//!                    └───────────┬─────────────┘
//!                                │
//!                   ┌────────────┴────────────┐
//!                   ▼                         ▼
//!            ┌────────────┐            ┌────────────┐
//!            │    TUI     │            │ generation │
//!            │  Adapter   │            │ (reqwest)  │
//!            │ (ratatui)  │            │            │
//!            └────────────┘            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `App` and `RequestLifecycle`
//! - [`action`]: `Action`, `Effect` and the `update()` reducer
//! - [`present`]: `Presentation`, the pure state → view projection
//! - [`config`]: layered settings

pub mod action;
pub mod config;
pub mod present;
pub mod state;
