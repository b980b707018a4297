//! # Taskboard Client
//!
//! This crate connects the invite dialogs of `taskboard-invite` to the
//! Taskboard backend.
//!
//! ## Overview
//!
//! The taskboard-client crate handles:
//! - **Config**: Backend URL, session credentials, timeouts, route templates
//! - **Context**: Explicit request context (CSRF token, session cookie)
//! - **Client**: HTTP calls for search, invitations and invitation lifecycle
//! - **Search**: Debounced member search that only shows the latest query
//! - **Gateway**: One-request submission of a composer's draft
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskboard_client::{submit_bulk, ClientConfig, TaskboardClient};
//! use taskboard_invite::{BulkInviteComposer, InvitationDraft, ProjectCandidate};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TaskboardClient::from_config(&ClientConfig::from_env())?;
//!
//!     let mut composer = BulkInviteComposer::new(InvitationDraft::new(vec![
//!         ProjectCandidate::new(1, "Website"),
//!     ]));
//!     composer.draft_mut().recipients.add_single("ada@example.com")?;
//!     composer.draft_mut().targets.toggle(1);
//!
//!     let outcome = submit_bulk(&client, &mut composer).await?;
//!     println!("sent: {}", outcome.is_sent());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod gateway;
pub mod search;

// Re-export main types for convenience
pub use client::{InviteReceipt, TaskboardClient};
pub use config::{ClientConfig, ConfigError, Routes};
pub use context::{RequestContext, CSRF_HEADER};
pub use error::{ClientError, ClientResult};
pub use gateway::{submit_bulk, submit_member, InvitationGateway, SubmitOutcome};
pub use search::{SearchSettings, SearchSnapshot, UserDirectory, UserSearch};
