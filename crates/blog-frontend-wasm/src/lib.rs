//! Browser bindings for the blog frontend.
//!
//! This crate wires the behaviors from `blog-frontend-core` to the DOM:
//! password toggles, the post form guard, the search gate, the recipient
//! autocomplete, the rich-text editor bootstrap, and the notification
//! actions called from template `onclick` handlers.
//!
//! # Architecture
//!
//! ```text
//! Page (server-rendered)              blog-frontend-wasm
//!   ├─ DOM events  ─────────────→      BlogFrontend::install
//!   ├─ onclick="app.deleteNotification(id)"
//!   └─ fetch  ←──────────────────      BrowserHost (Transport, Dialogs, ...)
//! ```
//!
//! # Building
//!
//! ```bash
//! wasm-pack build crates/blog-frontend-wasm --target web
//! ```
//!
//! # Usage
//!
//! ```javascript
//! import init, { BlogFrontend } from './blog_frontend_wasm.js';
//!
//! await init();
//! window.app = new BlogFrontend();
//! window.app.install();
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod console_log;
pub mod install;
pub mod page_config;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;

