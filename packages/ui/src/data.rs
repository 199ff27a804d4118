//! # Data hooks
//!
//! [`DataProvider`] puts three things in context:
//!
//! - a [`Releases`] repository over [`ApiTables`], shared by every page so the
//!   query cache is shared too;
//! - a [`Revision`] counter, bumped after each successful mutation. List
//!   resources read it, so they re-run and pick up the invalidated tables;
//! - the [`DashboardConfig`] served by the backend, plus the notification list
//!   configured from it.
//!
//! Pages use [`use_entity_list`] / [`use_entity_query`] to read and
//! [`use_entity_mutations`] to write. Mutation results that arrive after the
//! calling component unmounted are discarded.

use std::marker::PhantomData;

use dioxus::prelude::*;
use releases::{
    BackendError, DashboardConfig, Entity, Filter, Liveness, Releases, Table, TableClient,
};
use serde_json::Value;

use crate::notifications::{notify, NoticeLevel, Notifications};

/// [`TableClient`] backed by the `api` row server functions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ApiTables;

fn network(err: ServerFnError) -> BackendError {
    BackendError::Network(err.to_string())
}

impl TableClient for ApiTables {
    async fn select(&self, table: Table, filter: Option<&Filter>) -> Result<Vec<Value>, BackendError> {
        api::select_rows(table, filter.cloned()).await.map_err(network)
    }

    async fn insert(&self, table: Table, row: Value) -> Result<Value, BackendError> {
        api::insert_row(table, row).await.map_err(network)
    }

    async fn update(&self, table: Table, id: &str, row: Value) -> Result<Value, BackendError> {
        api::update_row(table, id.to_string(), row).await.map_err(network)
    }

    async fn delete(&self, table: Table, ids: &[String]) -> Result<u64, BackendError> {
        api::delete_rows(table, ids.to_vec()).await.map_err(network)
    }
}

pub type Repository = Releases<ApiTables>;

#[derive(Clone, Copy, PartialEq)]
pub struct Revision(Signal<u64>);

impl Revision {
    /// Subscribe the current reactive scope and return the counter.
    pub fn track(&self) -> u64 {
        (self.0)()
    }

    pub fn bump(&self) {
        let mut counter = self.0;
        *counter.write() += 1;
    }
}

pub fn use_repository() -> Repository {
    use_context::<Repository>()
}

pub fn use_revision() -> Revision {
    use_context::<Revision>()
}

pub fn use_dashboard_config() -> Signal<DashboardConfig> {
    use_context::<Signal<DashboardConfig>>()
}

#[component]
pub fn DataProvider(children: Element) -> Element {
    use_context_provider(|| Releases::new(ApiTables));
    use_context_provider(|| Revision(Signal::new(0)));
    let mut config = use_context_provider(|| Signal::new(DashboardConfig::default()));
    let mut notifications = use_context_provider(|| Signal::new(Notifications::default()));

    let _ = use_resource(move || async move {
        match api::get_dashboard_config().await {
            Ok(loaded) => {
                notifications
                    .write()
                    .set_timeout_secs(loaded.notifications.timeout_secs);
                config.set(loaded);
            }
            Err(e) => tracing::warn!("using default dashboard config: {e}"),
        }
    });

    rsx! {
        {children}
    }
}

/// Records of `E`, optionally filtered. Re-runs when `filter` changes or after
/// any mutation. A failed load is also reported as a notification.
pub fn use_entity_query<E: Entity>(filter: Signal<Option<Filter>>) -> Resource<Result<Vec<E>, BackendError>> {
    let repository = use_repository();
    let revision = use_revision();
    let mut notifications = use_context::<Signal<Notifications>>();

    let rows = use_resource(move || {
        let repository = repository.clone();
        let filter = filter();
        revision.track();
        async move {
            match filter {
                Some(filter) => repository.list_where::<E>(filter).await,
                None => repository.list::<E>().await,
            }
        }
    });

    use_effect(move || {
        if let Some(Err(e)) = &*rows.read() {
            notify(
                &mut notifications,
                NoticeLevel::Error,
                &format!("Could not load {}: {e}", E::TABLE),
            );
        }
    });

    rows
}

/// All records of `E`.
pub fn use_entity_list<E: Entity>() -> Resource<Result<Vec<E>, BackendError>> {
    let filter = use_signal(|| None);
    use_entity_query::<E>(filter)
}

/// Create, update and delete for `E`, reporting outcomes as notifications.
pub fn use_entity_mutations<E: Entity>() -> EntityMutations<E> {
    let repository = use_repository();
    let revision = use_revision();
    let notifications = use_context::<Signal<Notifications>>();
    let pending = use_signal(|| false);
    let liveness = use_hook(Liveness::new);

    {
        let liveness = liveness.clone();
        use_drop(move || liveness.kill());
    }

    EntityMutations {
        repository,
        revision,
        notifications,
        pending,
        liveness,
        _entity: PhantomData,
    }
}

#[derive(Clone)]
pub struct EntityMutations<E: Entity> {
    repository: Repository,
    revision: Revision,
    notifications: Signal<Notifications>,
    pending: Signal<bool>,
    liveness: Liveness,
    _entity: PhantomData<E>,
}

impl<E: Entity> EntityMutations<E> {
    /// Whether a mutation is in flight.
    pub fn is_pending(&self) -> bool {
        (self.pending)()
    }

    pub async fn create(&self, draft: E::Draft) -> Option<E> {
        self.begin();
        let result = self.repository.create::<E>(&draft).await;
        self.finish(result, |created: &E| format!("Created {}", created.label()))
    }

    pub async fn update(&self, id: String, draft: E::Draft) -> Option<E> {
        self.begin();
        let result = self.repository.update::<E>(&id, &draft).await;
        self.finish(result, |updated: &E| format!("Saved {}", updated.label()))
    }

    /// Delete the given rows. An empty list does nothing.
    pub async fn delete_many(&self, ids: Vec<String>) -> Option<u64> {
        if ids.is_empty() {
            return Some(0);
        }
        self.begin();
        let result = self.repository.delete_many::<E>(&ids).await;
        self.finish(result, |removed: &u64| format!("Deleted {removed} from {}", E::TABLE))
    }

    fn begin(&self) {
        let mut pending = self.pending;
        pending.set(true);
    }

    fn finish<T>(&self, result: Result<T, BackendError>, describe: impl FnOnce(&T) -> String) -> Option<T> {
        let mut notifications = self.notifications;
        let mut pending = self.pending;
        self.liveness
            .guard(|| {
                pending.set(false);
                match result {
                    Ok(value) => {
                        self.revision.bump();
                        notify(&mut notifications, NoticeLevel::Success, &describe(&value));
                        Some(value)
                    }
                    Err(e) => {
                        notify(&mut notifications, NoticeLevel::Error, &e.to_string());
                        None
                    }
                }
            })
            .flatten()
    }
}
