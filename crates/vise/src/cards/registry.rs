use std::sync::Mutex;

use super::domain::{Client, ClientId, NewClient};

/// Storage abstraction so the service can be exercised against failing backends.
pub trait ClientRegistry: Send + Sync {
    /// Assign the next identifier and append the client as one atomic step.
    fn register(&self, client: NewClient) -> Result<Client, RegistryError>;
    fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, RegistryError>;
    /// All clients in identifier order.
    fn list(&self) -> Result<Vec<Client>, RegistryError>;
}

/// Error enumeration for registry failures.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("registry unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug)]
struct RegistryState {
    clients: Vec<Client>,
    next_id: u64,
}

/// Process-lifetime registry. Ids start at 1 and match insertion order.
#[derive(Debug)]
pub struct InMemoryClientRegistry {
    state: Mutex<RegistryState>,
}

impl Default for InMemoryClientRegistry {
    fn default() -> Self {
        Self {
            state: Mutex::new(RegistryState {
                clients: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl InMemoryClientRegistry {
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, RegistryState>, RegistryError> {
        self.state
            .lock()
            .map_err(|_| RegistryError::Unavailable("registry mutex poisoned".to_string()))
    }
}

impl ClientRegistry for InMemoryClientRegistry {
    fn register(&self, client: NewClient) -> Result<Client, RegistryError> {
        let mut guard = self.lock()?;
        let id = ClientId(guard.next_id);
        let client = client.into_client(id);
        guard.clients.push(client.clone());
        guard.next_id += 1;
        Ok(client)
    }

    fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, RegistryError> {
        let guard = self.lock()?;
        let index = match id.0.checked_sub(1).and_then(|i| usize::try_from(i).ok()) {
            Some(index) => index,
            None => return Ok(None),
        };
        Ok(guard.clients.get(index).cloned())
    }

    fn list(&self) -> Result<Vec<Client>, RegistryError> {
        let guard = self.lock()?;
        Ok(guard.clients.clone())
    }
}
