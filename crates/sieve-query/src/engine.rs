//! Query evaluation.
//!
//! [`QueryEngine`] runs a [`QueryDescriptor`] over a collection of entity
//! records. Every call follows the same pipeline:
//!
//! 1. Ask the [`AccessPolicy`] for permission.
//! 2. Validate the descriptor against the entity's registry. Nothing is read
//!    if validation fails.
//! 3. Scan the records, keeping those matching the search term AND the filter.
//! 4. Record the match count as `total`.
//! 5. Stable-sort the matches by the requested keys, then by primary key.
//! 6. Cut the `[skip, skip + take)` window.
//!
//! The engine holds no per-query state, so one engine can serve concurrent
//! queries.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::access::{AccessPolicy, AllowAll, Operation};
use crate::cancel::CancelToken;
use crate::config::QueryConfig;
use crate::descriptor::{CollectionRequest, Paging, QueryDescriptor};
use crate::error::{QueryError, Result};
use crate::filter::Filter;
use crate::ordering::SortPlan;
use crate::page::Page;
use crate::predicate::Predicate;
use crate::registry::FieldRegistry;
use crate::source::{MutableSource, RecordSource};
use crate::traits::Entity;

/// A descriptor validated against one entity, ready to run.
#[derive(Debug, Clone)]
pub struct PreparedQuery {
    pub predicate: Predicate,
    pub plan: SortPlan<'static>,
    pub paging: Paging,
}

/// Evaluates queries over entity collections.
#[derive(Clone)]
pub struct QueryEngine {
    config: QueryConfig,
    access: Arc<dyn AccessPolicy>,
}

impl fmt::Debug for QueryEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for QueryEngine {
    fn default() -> Self {
        QueryEngine::new(QueryConfig::default())
    }
}

impl QueryEngine {
    /// Creates an engine permitting every operation.
    pub fn new(config: QueryConfig) -> Self {
        QueryEngine {
            config,
            access: Arc::new(AllowAll),
        }
    }

    /// Replaces the access policy.
    pub fn with_access_policy(mut self, policy: impl AccessPolicy + 'static) -> Self {
        self.access = Arc::new(policy);
        self
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validates `descriptor` against `E` and compiles it.
    pub fn prepare<E: Entity>(&self, descriptor: &QueryDescriptor) -> Result<PreparedQuery> {
        let registry = E::registry();
        let predicate = self.compile_predicate(registry, descriptor)?;
        let plan = SortPlan::compile(&descriptor.sorts, registry)?;
        let paging = self
            .config
            .resolve_paging(descriptor.skip, descriptor.take)?;

        trace!(
            entity = registry.entity(),
            sorts = descriptor.sorts.len(),
            skip = paging.skip,
            take = paging.take,
            "query prepared"
        );

        Ok(PreparedQuery {
            predicate,
            plan,
            paging,
        })
    }

    fn compile_predicate(
        &self,
        registry: &'static FieldRegistry,
        descriptor: &QueryDescriptor,
    ) -> Result<Predicate> {
        let filter = descriptor
            .filters
            .as_ref()
            .map(|filter| Predicate::compile(filter, registry))
            .transpose()?;

        let search = descriptor
            .search_term()
            .map(|term| Predicate::search(term, registry, self.config.case_insensitive_search));

        Ok(match (search, filter) {
            (None, None) => Predicate::always(),
            (Some(p), None) | (None, Some(p)) => p,
            (Some(search), Some(filter)) => Predicate::And(vec![search, filter]),
        })
    }

    fn authorize<E: Entity>(&self, operation: Operation) -> Result<()> {
        self.access.check(E::registry().entity(), operation)
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Runs a query over an in-memory slice of records.
    pub fn execute<E>(&self, descriptor: &QueryDescriptor, records: &[E]) -> Result<Page<E>>
    where
        E: Entity + Clone,
    {
        self.authorize::<E>(Operation::Read)?;
        let prepared = self.prepare::<E>(descriptor)?;
        self.run(&prepared, records, None)
    }

    /// Like [`execute`](Self::execute), but stops with
    /// [`QueryError::Cancelled`] once `cancel` is triggered.
    pub fn execute_cancellable<E>(
        &self,
        descriptor: &QueryDescriptor,
        records: &[E],
        cancel: &CancelToken,
    ) -> Result<Page<E>>
    where
        E: Entity + Clone,
    {
        self.authorize::<E>(Operation::Read)?;
        let prepared = self.prepare::<E>(descriptor)?;
        self.run(&prepared, records, Some(cancel))
    }

    /// Runs a query over a record source.
    ///
    /// The descriptor is validated before the source is read.
    pub fn search<E, S>(&self, source: &S, descriptor: &QueryDescriptor) -> Result<Page<E>>
    where
        E: Entity + Clone,
        S: RecordSource<E> + ?Sized,
    {
        self.search_with(source, descriptor, None)
    }

    /// Like [`search`](Self::search), but stops with
    /// [`QueryError::Cancelled`] once `cancel` is triggered.
    pub fn search_cancellable<E, S>(
        &self,
        source: &S,
        descriptor: &QueryDescriptor,
        cancel: &CancelToken,
    ) -> Result<Page<E>>
    where
        E: Entity + Clone,
        S: RecordSource<E> + ?Sized,
    {
        self.search_with(source, descriptor, Some(cancel))
    }

    /// Runs a flat collection request over a record source.
    pub fn get_collection<E, S>(&self, source: &S, request: CollectionRequest) -> Result<Page<E>>
    where
        E: Entity + Clone,
        S: RecordSource<E> + ?Sized,
    {
        let descriptor = request.into_descriptor(E::registry())?;
        self.search_with(source, &descriptor, None)
    }

    /// Like [`get_collection`](Self::get_collection), but stops with
    /// [`QueryError::Cancelled`] once `cancel` is triggered.
    pub fn get_collection_cancellable<E, S>(
        &self,
        source: &S,
        request: CollectionRequest,
        cancel: &CancelToken,
    ) -> Result<Page<E>>
    where
        E: Entity + Clone,
        S: RecordSource<E> + ?Sized,
    {
        let descriptor = request.into_descriptor(E::registry())?;
        self.search_with(source, &descriptor, Some(cancel))
    }

    fn search_with<E, S>(
        &self,
        source: &S,
        descriptor: &QueryDescriptor,
        cancel: Option<&CancelToken>,
    ) -> Result<Page<E>>
    where
        E: Entity + Clone,
        S: RecordSource<E> + ?Sized,
    {
        self.authorize::<E>(Operation::Read)?;
        let prepared = self.prepare::<E>(descriptor)?;
        let records = source.snapshot().map_err(QueryError::storage)?;
        self.run(&prepared, &records, cancel)
    }

    /// Counts the records matching the descriptor's search and filter.
    /// Sorts and paging are ignored.
    pub fn count<E, S>(&self, source: &S, descriptor: &QueryDescriptor) -> Result<usize>
    where
        E: Entity,
        S: RecordSource<E> + ?Sized,
    {
        self.authorize::<E>(Operation::Read)?;
        let registry = E::registry();
        let predicate = self.compile_predicate(registry, descriptor)?;
        let records = source.snapshot().map_err(QueryError::storage)?;
        let total = records.iter().filter(|r| predicate.matches(*r)).count();

        debug!(entity = registry.entity(), total, "records counted");
        Ok(total)
    }

    fn run<E>(
        &self,
        prepared: &PreparedQuery,
        records: &[E],
        cancel: Option<&CancelToken>,
    ) -> Result<Page<E>>
    where
        E: Entity + Clone,
    {
        let check = || cancel.map_or(Ok(()), CancelToken::check);
        let interval = self.config.cancel_check_interval.max(1);

        let mut matched: Vec<&E> = Vec::new();
        for (i, record) in records.iter().enumerate() {
            if i % interval == 0 {
                check()?;
            }
            if prepared.predicate.matches(record) {
                matched.push(record);
            }
        }
        let total = matched.len();

        check()?;
        matched.sort_by(|a, b| prepared.plan.compare(*a, *b));
        check()?;

        let window = prepared.paging.window(total);
        let collection: Vec<E> = matched[window].iter().map(|r| (*r).clone()).collect();

        debug!(
            entity = E::registry().entity(),
            scanned = records.len(),
            total,
            returned = collection.len(),
            skip = prepared.paging.skip,
            take = prepared.paging.take,
            "query evaluated"
        );

        Ok(Page::new(total, collection))
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Deletes the records matching `filter` and returns how many were
    /// removed. `None` deletes every record.
    pub fn delete_matching<E, S>(&self, source: &S, filter: Option<&Filter>) -> Result<usize>
    where
        E: Entity,
        S: MutableSource<E> + ?Sized,
    {
        self.authorize::<E>(Operation::Delete)?;
        let predicate = self.mutation_predicate::<E>(filter)?;
        let affected = source
            .remove_where(&mut |record| predicate.matches(record))
            .map_err(QueryError::storage)?;

        debug!(entity = E::registry().entity(), affected, "records deleted");
        Ok(affected)
    }

    /// Applies `update` to the records matching `filter` and returns how
    /// many were updated. `None` updates every record.
    pub fn update_matching<E, S, F>(
        &self,
        source: &S,
        filter: Option<&Filter>,
        mut update: F,
    ) -> Result<usize>
    where
        E: Entity,
        S: MutableSource<E> + ?Sized,
        F: FnMut(&mut E),
    {
        self.authorize::<E>(Operation::Update)?;
        let predicate = self.mutation_predicate::<E>(filter)?;
        let affected = source
            .modify_where(&mut |record| predicate.matches(record), &mut update)
            .map_err(QueryError::storage)?;

        debug!(entity = E::registry().entity(), affected, "records updated");
        Ok(affected)
    }

    fn mutation_predicate<E: Entity>(&self, filter: Option<&Filter>) -> Result<Predicate> {
        match filter {
            Some(filter) => Predicate::compile(filter, E::registry()),
            None => Ok(Predicate::always()),
        }
    }
}
