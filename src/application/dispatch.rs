// Dispatch layer
// A `Session` owns everything one model-building run needs: the entity
// registry, one adapter per available backend, which backend holds the live
// model, and the dump sequence counter. Every fatal error leaving the session
// is logged here and nowhere else.

use crate::domain::{
    select_solver, EntityRegistry, Equation, LicenseProbe, ProblemClass, Result, Solution,
    SolverAdapter, SolverBackend, SolverError, Variable,
};
use crate::infrastructure::SolverSettings;
use crate::solver::SolverFactory;
use std::collections::HashMap;
use tracing::{debug, error, info, warn};

type AdapterTable = HashMap<SolverBackend, Box<dyn SolverAdapter>>;

pub struct Session {
    settings: SolverSettings,
    registry: EntityRegistry,
    adapters: AdapterTable,
    /// Backend holding the live model, if any
    active: Option<SolverBackend>,
    dump_sequence: u32,
}

impl Session {
    /// Session with an adapter for every backend built into this binary
    pub fn new(settings: SolverSettings) -> Self {
        let mut adapters: AdapterTable = HashMap::new();
        for backend in SolverFactory::available_backends() {
            match SolverFactory::create_from_backend(backend, &settings) {
                Ok(adapter) => {
                    adapters.insert(backend, adapter);
                }
                Err(e) => warn!(component = "dispatch", backend = %backend, error = %e, "Adapter unavailable"),
            }
        }
        debug!(
            component = "dispatch",
            adapters = adapters.len(),
            "Session created"
        );

        Self {
            settings,
            registry: EntityRegistry::new(),
            adapters,
            active: None,
            dump_sequence: 0,
        }
    }

    /// Install `adapter` for the backend it reports, replacing any existing one.
    ///
    /// This is how the commercial backends, which have no bundled binding, are
    /// plugged in.
    pub fn register_adapter(
        &mut self,
        adapter: Box<dyn SolverAdapter>,
    ) -> Option<Box<dyn SolverAdapter>> {
        let backend = adapter.backend();
        if self.active == Some(backend) {
            self.active = None;
        }
        self.adapters.insert(backend, adapter)
    }

    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn active_backend(&self) -> Option<SolverBackend> {
        self.active
    }

    pub fn has_adapter(&self, backend: SolverBackend) -> bool {
        self.adapters.contains_key(&backend)
    }

    /// Parse a backend identifier, reporting unknown ones
    pub fn parse_backend(&self, id: &str) -> Result<SolverBackend> {
        let parsed = id.parse::<SolverBackend>();
        report("parse_backend", None, parsed)
    }

    /// Start a new model on `backend`.
    ///
    /// Empties the registry and tears down the model of whichever backend held
    /// one, so at most one model is live afterwards.
    pub fn initialize(&mut self, backend: SolverBackend) -> Result<()> {
        let result = self.initialize_inner(backend);
        report("initialize", Some(backend), result)
    }

    fn initialize_inner(&mut self, backend: SolverBackend) -> Result<()> {
        self.registry.clear();
        adapter_mut(&mut self.adapters, backend)?;

        if let Some(previous) = self.active.take() {
            if previous != backend {
                if let Some(old) = self.adapters.get_mut(&previous) {
                    old.clear()?;
                }
            }
        }
        adapter_mut(&mut self.adapters, backend)?.initialize()?;
        self.active = Some(backend);
        info!(component = "dispatch", operation = "initialize", backend = %backend, "Model started");
        Ok(())
    }

    /// Empty the registry and drop the model held by `backend`
    pub fn reset(&mut self, backend: SolverBackend) -> Result<()> {
        self.registry.clear();
        let result = adapter_mut(&mut self.adapters, backend).and_then(|adapter| adapter.clear());
        if result.is_ok() && self.active == Some(backend) {
            self.active = None;
        }
        report("reset", Some(backend), result)
    }

    /// Register `variable`, then load it into `backend`.
    ///
    /// Registration is kept even when the adapter rejects the variable, so the
    /// registry can run ahead of the native model after a failed load.
    pub fn load_variable(
        &mut self,
        backend: SolverBackend,
        variable: &Variable,
        relax_integer: bool,
        use_tight_bounds: bool,
    ) -> Result<()> {
        let result = self.registry.register(variable.clone()).and_then(|()| {
            adapter_mut(&mut self.adapters, backend)?.load_variable(
                variable,
                relax_integer,
                use_tight_bounds,
            )
        });
        report("load_variable", Some(backend), result)
    }

    pub fn load_objective(
        &mut self,
        backend: SolverBackend,
        objective: &Equation,
        maximize: bool,
    ) -> Result<()> {
        let result = adapter_mut(&mut self.adapters, backend)
            .and_then(|adapter| adapter.load_objective(objective, maximize));
        report("load_objective", Some(backend), result)
    }

    pub fn add_constraint(&mut self, backend: SolverBackend, constraint: &Equation) -> Result<()> {
        let result = adapter_mut(&mut self.adapters, backend)
            .and_then(|adapter| adapter.add_constraint(constraint));
        report("add_constraint", Some(backend), result)
    }

    pub fn remove_constraint(
        &mut self,
        backend: SolverBackend,
        constraint: &Equation,
    ) -> Result<()> {
        let result = adapter_mut(&mut self.adapters, backend)
            .and_then(|adapter| adapter.remove_constraint(constraint));
        report("remove_constraint", Some(backend), result)
    }

    /// Solve the model held by `backend` as a `class` problem
    pub fn run_solver(&mut self, backend: SolverBackend, class: ProblemClass) -> Result<Solution> {
        let result = adapter_mut(&mut self.adapters, backend)
            .and_then(|adapter| adapter.run_solver(class, &self.registry));
        report("run_solver", Some(backend), result)
    }

    /// Backend configured as `default_backend`
    pub fn default_backend(&self) -> SolverBackend {
        self.settings.default_backend
    }

    /// Start a new model on the configured default backend
    pub fn initialize_default(&mut self) -> Result<SolverBackend> {
        let backend = self.default_backend();
        self.initialize(backend).map(|()| backend)
    }

    /// Solve a `class` problem, starting from the active backend or, with no
    /// live model, the configured default
    pub fn solve_default(&mut self, class: ProblemClass) -> Result<Solution> {
        let requested = self.active.unwrap_or(self.settings.default_backend);
        self.solve(requested, class)
    }

    /// Backend that should handle `class` when the caller asked for `requested`
    pub fn select_backend(&self, class: ProblemClass, requested: SolverBackend) -> SolverBackend {
        let license = LicenseProbe::from_env(&self.settings.license_env_var);
        let selected = select_solver(class, requested, license, self.settings.flagship_policy);
        debug!(
            component = "dispatch",
            operation = "select_backend",
            class = %class,
            requested = %requested,
            selected = %selected,
            license_found = license.found,
            "Backend selected"
        );
        selected
    }

    /// Select a backend for `class` and solve on it
    pub fn solve(&mut self, requested: SolverBackend, class: ProblemClass) -> Result<Solution> {
        let selected = self.select_backend(class, requested);
        if selected != requested {
            warn!(
                component = "dispatch",
                requested = %requested,
                selected = %selected,
                class = %class,
                "Routing solve to a different backend"
            );
        }
        self.run_solver(selected, class)
    }

    /// Dump the model held by `backend`, numbering the snapshot with the
    /// session's sequence counter
    pub fn write_lp_file(&mut self, backend: SolverBackend) -> Result<u32> {
        let sequence = self.dump_sequence;
        let result = adapter_mut(&mut self.adapters, backend)
            .and_then(|adapter| adapter.print_model(sequence));
        if result.is_ok() {
            self.dump_sequence += 1;
        }
        report("write_lp_file", Some(backend), result.map(|()| sequence))
    }

    /// (columns, rows) of the model held by `backend`
    pub fn model_dimensions(&self, backend: SolverBackend) -> Option<(usize, usize)> {
        self.adapters
            .get(&backend)
            .and_then(|adapter| adapter.model_dimensions())
    }
}

fn adapter_mut(
    adapters: &mut AdapterTable,
    backend: SolverBackend,
) -> Result<&mut Box<dyn SolverAdapter>> {
    adapters.get_mut(&backend).ok_or_else(|| {
        SolverError::SolverNotAvailable(format!("no adapter registered for {backend}"))
    })
}

/// Log a fatal error once, on its way out of the session
fn report<T>(operation: &'static str, backend: Option<SolverBackend>, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        match backend {
            Some(backend) => error!(component = "dispatch", operation, backend = %backend, error = %e, "Operation failed"),
            None => error!(component = "dispatch", operation, error = %e, "Operation failed"),
        }
    }
    result
}
