//! Flow-scoped storage for the latest [`ResultSet`]
//!
//! The slot lives in a tokio task-local, so it is only visible to code awaited
//! inside [`Session::scope`]. Two flows running side by side each get their
//! own slot and never observe each other's value.
//!
//! Task-locals are not inherited by `tokio::spawn`; wrap the spawned future in
//! [`Session::propagate`] to carry the current value into it.

use celestia_common::ResultSet;
use std::cell::RefCell;
use std::future::Future;
use std::sync::Arc;

use super::error::SessionError;

tokio::task_local! {
    static SESSION: RefCell<Option<Arc<ResultSet>>>;
}

pub struct Session;

impl Session {
    /// Run `fut` with a fresh, empty session slot.
    pub async fn scope<F: Future>(fut: F) -> F::Output {
        SESSION.scope(RefCell::new(None), fut).await
    }

    /// Run `fut` with a slot seeded from the current flow's value, if any.
    pub fn propagate<F: Future>(fut: F) -> impl Future<Output = F::Output> {
        SESSION.scope(RefCell::new(Self::get()), fut)
    }

    /// Replace the value stored for the current flow.
    pub fn set(value: impl Into<Arc<ResultSet>>) -> Result<Arc<ResultSet>, SessionError> {
        let value = value.into();
        SESSION
            .try_with(|slot| *slot.borrow_mut() = Some(Arc::clone(&value)))
            .map_err(|_| SessionError::NoScope)?;
        Ok(value)
    }

    /// Value stored for the current flow; `None` when unset or outside a scope.
    pub fn get() -> Option<Arc<ResultSet>> {
        SESSION.try_with(|slot| slot.borrow().clone()).ok().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use celestia_common::{CatalogEntry, EnrichedBody};
    use std::time::Duration;

    fn result_set(ids: &[&str]) -> ResultSet {
        ResultSet::new(
            ids.iter()
                .map(|id| {
                    EnrichedBody::unenriched(CatalogEntry {
                        id: id.to_string(),
                        name: id.to_string(),
                        semi_major_axis: None,
                        satellites: Vec::new(),
                    })
                })
                .collect(),
        )
    }

    fn current_ids() -> Option<Vec<String>> {
        Session::get().map(|set| set.iter().map(|b| b.id.clone()).collect())
    }

    #[test]
    fn test_outside_scope() {
        assert!(Session::get().is_none());
        assert_eq!(Session::set(result_set(&["mars"])).unwrap_err(), SessionError::NoScope);
    }

    #[tokio::test]
    async fn test_value_visible_to_nested_awaits() {
        Session::scope(async {
            assert!(Session::get().is_none());
            Session::set(result_set(&["mars"])).unwrap();

            async fn nested() -> Option<Vec<String>> {
                tokio::task::yield_now().await;
                current_ids()
            }
            assert_eq!(nested().await, Some(vec!["mars".to_string()]));

            Session::set(result_set(&["venus", "terre"])).unwrap();
            assert_eq!(current_ids().unwrap().len(), 2);
        })
        .await;

        assert!(Session::get().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_flows_are_isolated() {
        let flow = |id: &'static str, delay: u64| async move {
            Session::scope(async move {
                Session::set(result_set(&[id])).unwrap();
                tokio::time::sleep(Duration::from_millis(delay)).await;
                current_ids()
            })
            .await
        };

        let a = tokio::spawn(flow("jupiter", 30));
        let b = tokio::spawn(flow("saturne", 10));
        let c = tokio::spawn(Session::scope(async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            current_ids()
        }));

        assert_eq!(a.await.unwrap(), Some(vec!["jupiter".to_string()]));
        assert_eq!(b.await.unwrap(), Some(vec!["saturne".to_string()]));
        assert_eq!(c.await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_propagate_into_spawned_task() {
        Session::scope(async {
            Session::set(result_set(&["uranus"])).unwrap();

            let inherited = tokio::spawn(Session::propagate(async { current_ids() }));
            let plain = tokio::spawn(async { current_ids() });

            assert_eq!(inherited.await.unwrap(), Some(vec!["uranus".to_string()]));
            assert_eq!(plain.await.unwrap(), None);
        })
        .await;
    }
}
