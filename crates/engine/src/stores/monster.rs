//! Monster storage for submitted stat blocks.

use bestiary_domain::Monster;
use tokio::sync::Mutex;

/// Ordered, append-only collection of monsters shared across requests.
///
/// Every access goes through one mutex. The guard is scoped to each call, so
/// the lock is released on every exit path, including unwinding. Appends are
/// ordered by lock acquisition, which is not FIFO-fair.
pub struct MonsterStore {
    monsters: Mutex<Vec<Monster>>,
}

impl MonsterStore {
    pub fn new() -> Self {
        Self {
            monsters: Mutex::new(Vec::new()),
        }
    }

    /// Append a monster and return the new number of stored monsters.
    pub async fn append(&self, monster: Monster) -> usize {
        let mut guard = self.monsters.lock().await;
        guard.push(monster);
        guard.len()
    }

    /// Clone the current contents in submission order.
    pub async fn snapshot(&self) -> Vec<Monster> {
        self.monsters.lock().await.clone()
    }
}

impl Default for MonsterStore {
    fn default() -> Self {
        Self::new()
    }
}
