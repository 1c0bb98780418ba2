//! Directory listing state: per-path cache, generation-guarded fetches, and change-feed
//! invalidation.
//!
//! [`ListingSync`] is a plain state machine. The UI layer asks it for a [`FetchTicket`], runs
//! the request, and hands the ticket back with the result. Only the response for the most
//! recent ticket changes what is visible. Older responses may fill their own cache slot but
//! never overwrite a slot already filled by a newer generation.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::events::{parse_server_message, ServerMessage, ServerMessageError};
use super::path::is_root_path;
use super::service::FileApiError;
use super::types::{listing_cache_key, DirectoryListing, FileSystemItem};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Handle for one in-flight listing request.
pub struct FetchTicket {
    /// Monotonic request generation.
    pub generation: u64,
    /// Requested directory path.
    pub path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// What [`ListingSync::apply`] did with a response.
pub enum ApplyOutcome {
    /// The response belongs to the latest request and is now visible.
    Applied,
    /// A newer request superseded this one; only the cache slot was touched.
    Stale,
}

#[derive(Debug, Clone, Default)]
/// Listing cache and request bookkeeping for one browser view.
pub struct ListingSync {
    current_path: String,
    generation: u64,
    pending: Option<u64>,
    cache: HashMap<String, (u64, DirectoryListing)>,
    error: Option<(String, FileApiError)>,
}

impl ListingSync {
    /// Creates state positioned at `initial_path` with nothing fetched yet.
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self {
            current_path: initial_path.into(),
            ..Self::default()
        }
    }

    /// Requested path of the visible view.
    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    /// Path reported by the backend for the visible listing, falling back to the request.
    pub fn display_path(&self) -> String {
        self.listing()
            .map(|listing| listing.current_path.clone())
            .filter(|path| !path.is_empty())
            .unwrap_or_else(|| self.current_path.clone())
    }

    /// Switches the visible view to `path` and issues a fetch ticket for it.
    pub fn navigate(&mut self, path: impl Into<String>) -> FetchTicket {
        self.current_path = path.into();
        self.issue()
    }

    /// Issues a fresh fetch ticket for the visible path.
    pub fn revalidate(&mut self) -> FetchTicket {
        self.issue()
    }

    fn issue(&mut self) -> FetchTicket {
        self.generation += 1;
        self.pending = Some(self.generation);
        FetchTicket {
            generation: self.generation,
            path: self.current_path.clone(),
        }
    }

    /// Records the result of a fetch.
    pub fn apply(
        &mut self,
        ticket: &FetchTicket,
        result: Result<DirectoryListing, FileApiError>,
    ) -> ApplyOutcome {
        let latest = self.pending == Some(ticket.generation);
        match result {
            Ok(listing) => {
                self.store(ticket, listing);
                if latest {
                    self.error = None;
                }
            }
            Err(err) => {
                if latest {
                    self.error = Some((ticket.path.clone(), err));
                }
            }
        }
        if latest {
            self.pending = None;
            ApplyOutcome::Applied
        } else {
            ApplyOutcome::Stale
        }
    }

    fn store(&mut self, ticket: &FetchTicket, listing: DirectoryListing) {
        let slot = self.cache.entry(listing_cache_key(&ticket.path));
        match slot {
            Entry::Occupied(mut entry) => {
                if entry.get().0 < ticket.generation {
                    entry.insert((ticket.generation, listing));
                }
            }
            Entry::Vacant(entry) => {
                entry.insert((ticket.generation, listing));
            }
        }
    }

    /// Decodes a change-feed frame and issues a revalidation ticket when it reports a change.
    ///
    /// # Errors
    ///
    /// Returns the decode error for malformed or unknown frames; no ticket is issued.
    pub fn on_server_frame(&mut self, frame: &str) -> Result<Option<FetchTicket>, ServerMessageError> {
        let message = parse_server_message(frame)?;
        Ok(match message {
            ServerMessage::Pong => None,
            ServerMessage::Change(_) => Some(self.revalidate()),
        })
    }

    /// Cached listing for the visible path.
    pub fn listing(&self) -> Option<&DirectoryListing> {
        self.cache
            .get(&listing_cache_key(&self.current_path))
            .map(|(_, listing)| listing)
    }

    /// Items of the visible listing (empty when nothing is cached).
    pub fn items(&self) -> &[FileSystemItem] {
        self.listing()
            .map(|listing| listing.items.as_slice())
            .unwrap_or(&[])
    }

    /// `true` while the first fetch for the visible path is outstanding.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some() && self.listing().is_none()
    }

    /// `true` while any fetch for the visible path is outstanding.
    pub fn is_validating(&self) -> bool {
        self.pending.is_some()
    }

    /// Error from the latest fetch of the visible path.
    pub fn error(&self) -> Option<&FileApiError> {
        self.error
            .as_ref()
            .filter(|(path, _)| path == &self.current_path)
            .map(|(_, err)| err)
    }

    /// `true` when the visible path is the workspace root.
    pub fn at_root(&self) -> bool {
        is_root_path(&self.display_path())
    }
}
