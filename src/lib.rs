//! Virtual Vogue: AI-powered virtual photoshoots.
//!
//! Three flows wrap single calls into a hosted generative model:
//! garment analysis, AI model generation, and clothing compositing.
//! [`session::TryOnSession`] chains them the way a user does.

pub mod backend;
pub mod config;
pub mod error;
pub mod flows;
pub mod gemini;
pub mod logger;
pub mod models;
#[cfg(feature = "server")]
pub mod server;
pub mod session;

pub use backend::GenerativeBackend;
pub use config::{Config, GeminiConfig};
pub use error::{Result, VogueError};
pub use flows::Flows;
pub use gemini::GeminiClient;
pub use models::*;
pub use session::{ModelForm, Notification, Stage, TryOnSession};
