//! Process-wide store handle with an explicit degraded state.
//!
//! The handle is built once at startup and shared through an `Arc`. When no
//! connection string is configured, or connecting fails, the handle is
//! *unavailable*: every data access through it fails with
//! [`CrmError::Unavailable`] instead of the process refusing to start.

use crm_automations_domain::error::CrmError;

const NOT_CONFIGURED: &str = "connection string not configured";

enum Connection<S> {
    Connected(S),
    Unavailable { reason: String },
}

/// Shared access to the document store, or the reason it is missing.
pub struct StoreHandle<S> {
    connection: Connection<S>,
    url_configured: bool,
}

impl<S> StoreHandle<S> {
    /// A handle over a live store.
    pub fn connected(store: S) -> Self {
        Self {
            connection: Connection::Connected(store),
            url_configured: true,
        }
    }

    /// No connection string was provided.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self {
            connection: Connection::Unavailable {
                reason: NOT_CONFIGURED.to_string(),
            },
            url_configured: false,
        }
    }

    /// A connection string was provided but connecting failed.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            connection: Connection::Unavailable {
                reason: reason.into(),
            },
            url_configured: true,
        }
    }

    /// Borrow the store.
    ///
    /// # Errors
    ///
    /// Returns [`CrmError::Unavailable`] when the handle is degraded.
    pub fn get(&self) -> Result<&S, CrmError> {
        match &self.connection {
            Connection::Connected(store) => Ok(store),
            Connection::Unavailable { reason } => Err(CrmError::Unavailable(reason.clone())),
        }
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        matches!(self.connection, Connection::Connected(_))
    }

    /// Whether a connection string was configured at all.
    #[must_use]
    pub fn is_url_configured(&self) -> bool {
        self.url_configured
    }

    #[must_use]
    pub fn unavailable_reason(&self) -> Option<&str> {
        match &self.connection {
            Connection::Connected(_) => None,
            Connection::Unavailable { reason } => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_expose_store_when_connected() {
        let handle = StoreHandle::connected(42_u8);
        assert!(handle.is_connected());
        assert!(handle.is_url_configured());
        assert_eq!(*handle.get().unwrap(), 42);
        assert!(handle.unavailable_reason().is_none());
    }

    #[test]
    fn should_fail_with_unavailable_when_unconfigured() {
        let handle = StoreHandle::<u8>::unconfigured();
        assert!(!handle.is_connected());
        assert!(!handle.is_url_configured());
        assert!(matches!(handle.get(), Err(CrmError::Unavailable(_))));
    }

    #[test]
    fn should_keep_reason_when_connection_failed() {
        let handle = StoreHandle::<u8>::failed("connection refused");
        assert!(handle.is_url_configured());
        assert_eq!(handle.unavailable_reason(), Some("connection refused"));
        assert!(matches!(
            handle.get(),
            Err(CrmError::Unavailable(reason)) if reason == "connection refused"
        ));
    }
}
