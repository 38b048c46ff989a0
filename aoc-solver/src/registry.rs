//! Solver lookup by (year, day) and link-time plugin discovery

use crate::error::{ParseError, RegistrationError, SolverError};
use crate::instance::{DynSolver, SolverInstance};
use crate::options::SolverOptions;
use crate::solver::Solver;

/// First Advent of Code year
pub const BASE_YEAR: u16 = 2015;
/// Years covered by the registry (2015-2034)
pub const MAX_YEARS: usize = 20;
pub const DAYS_PER_YEAR: usize = 25;
/// Number of (year, day) slots
pub const CAPACITY: usize = MAX_YEARS * DAYS_PER_YEAR;

/// Position of a (year, day) pair in the flat slot table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Slot(usize);

impl Slot {
    fn new(year: u16, day: u8) -> Option<Slot> {
        let year_offset = usize::from(year.checked_sub(BASE_YEAR)?);
        let day_offset = usize::from(day.checked_sub(1)?);
        (year_offset < MAX_YEARS && day_offset < DAYS_PER_YEAR)
            .then_some(Slot(year_offset * DAYS_PER_YEAR + day_offset))
    }

    fn year_day(self) -> (u16, u8) {
        (
            BASE_YEAR + (self.0 / DAYS_PER_YEAR) as u16,
            (self.0 % DAYS_PER_YEAR) as u8 + 1,
        )
    }
}

/// Parses input into a type-erased solver; must be shareable across threads
pub type SolverFactory = Box<
    dyn for<'a> Fn(&'a str, &SolverOptions) -> Result<Box<dyn DynSolver + 'a>, ParseError>
        + Send
        + Sync,
>;

/// What the registry knows about one registered solver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactoryInfo {
    pub year: u16,
    pub day: u8,
    pub parts: u8,
    /// Plugin tags, empty for solvers registered by type
    pub tags: &'static [&'static str],
}

struct Entry {
    factory: SolverFactory,
    parts: u8,
    tags: &'static [&'static str],
}

impl Entry {
    fn info(&self, slot: Slot) -> FactoryInfo {
        let (year, day) = slot.year_day();
        FactoryInfo {
            year,
            day,
            parts: self.parts,
            tags: self.tags,
        }
    }
}

/// Read-only view of the registered factories
pub struct SolverFactoryStorage {
    slots: Vec<Option<Entry>>,
}

impl SolverFactoryStorage {
    fn entry(&self, slot: Slot) -> Option<&Entry> {
        self.slots.get(slot.0)?.as_ref()
    }

    /// Registered solvers in (year, day) order
    pub fn iter_info(&self) -> impl Iterator<Item = FactoryInfo> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, entry)| Some(entry.as_ref()?.info(Slot(i))))
    }

    pub fn get_info(&self, year: u16, day: u8) -> Option<FactoryInfo> {
        let slot = Slot::new(year, day)?;
        Some(self.entry(slot)?.info(slot))
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.get_info(year, day).is_some()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Collects solvers, then freezes them into a [`SolverRegistry`]
///
/// Registering the same (year, day) twice, or a pair outside
/// 2015-2034 / 1-25, is an error.
///
/// ```
/// use aoc_solver::{AocParser, ParseError, SolveError, Solver, SolverRegistryBuilder};
///
/// struct LineCount;
///
/// impl AocParser for LineCount {
///     type SharedData<'a> = usize;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         Ok(input.lines().count())
///     }
/// }
///
/// impl Solver for LineCount {
///     const PARTS: u8 = 1;
///
///     fn solve_part(shared: &mut usize, _part: u8) -> Result<String, SolveError> {
///         Ok(shared.to_string())
///     }
/// }
///
/// let registry = SolverRegistryBuilder::new()
///     .register_solver::<LineCount>(2023, 1)
///     .unwrap()
///     .build();
///
/// let mut solver = registry.create_solver(2023, 1, "a\nb\nc").unwrap();
/// assert_eq!(solver.solve(1).unwrap().answer, "3");
/// ```
pub struct SolverRegistryBuilder {
    slots: Vec<Option<Entry>>,
}

impl SolverRegistryBuilder {
    pub fn new() -> Self {
        Self {
            slots: std::iter::repeat_with(|| None).take(CAPACITY).collect(),
        }
    }

    fn insert<F>(
        mut self,
        year: u16,
        day: u8,
        parts: u8,
        tags: &'static [&'static str],
        factory: F,
    ) -> Result<Self, RegistrationError>
    where
        F: for<'a> Fn(&'a str, &SolverOptions) -> Result<Box<dyn DynSolver + 'a>, ParseError>
            + Send
            + Sync
            + 'static,
    {
        let slot = Slot::new(year, day).ok_or(RegistrationError::InvalidYearDay(year, day))?;
        let cell = &mut self.slots[slot.0];
        if cell.is_some() {
            return Err(RegistrationError::DuplicateSolver(year, day));
        }
        *cell = Some(Entry {
            factory: Box::new(factory),
            parts,
            tags,
        });
        Ok(self)
    }

    /// Register a hand-written factory for a solver with `parts` parts
    pub fn register<F>(
        self,
        year: u16,
        day: u8,
        parts: u8,
        factory: F,
    ) -> Result<Self, RegistrationError>
    where
        F: for<'a> Fn(&'a str, &SolverOptions) -> Result<Box<dyn DynSolver + 'a>, ParseError>
            + Send
            + Sync
            + 'static,
    {
        self.insert(year, day, parts, &[], factory)
    }

    /// Register a [`Solver`] type directly
    pub fn register_solver<S>(self, year: u16, day: u8) -> Result<Self, RegistrationError>
    where
        S: Solver + 'static,
    {
        self.register_tagged::<S>(year, day, &[])
    }

    fn register_tagged<S>(
        self,
        year: u16,
        day: u8,
        tags: &'static [&'static str],
    ) -> Result<Self, RegistrationError>
    where
        S: Solver + 'static,
    {
        self.insert(year, day, S::PARTS, tags, move |input: &str, options: &SolverOptions| {
            Ok(Box::new(SolverInstance::<S>::with_options(
                year, day, input, options,
            )?))
        })
    }

    /// Register every plugin linked into the binary
    ///
    /// ```no_run
    /// # use aoc_solver::SolverRegistryBuilder;
    /// let registry = SolverRegistryBuilder::new()
    ///     .register_all_plugins()
    ///     .unwrap()
    ///     .build();
    /// ```
    pub fn register_all_plugins(self) -> Result<Self, RegistrationError> {
        self.register_solver_plugins(|_| true)
    }

    /// Register the plugins accepted by `filter`
    ///
    /// ```no_run
    /// # use aoc_solver::SolverRegistryBuilder;
    /// // 2023 grid puzzles only
    /// let registry = SolverRegistryBuilder::new()
    ///     .register_solver_plugins(|plugin| plugin.year == 2023 && plugin.tags.contains(&"grid"))
    ///     .unwrap()
    ///     .build();
    /// ```
    pub fn register_solver_plugins<F>(self, filter: F) -> Result<Self, RegistrationError>
    where
        F: Fn(&SolverPlugin) -> bool,
    {
        plugins()
            .filter(|plugin| filter(plugin))
            .try_fold(self, |builder, plugin| {
                plugin
                    .solver
                    .register_with(builder, plugin.year, plugin.day, plugin.tags)
            })
    }

    pub fn build(self) -> SolverRegistry {
        SolverRegistry {
            storage: SolverFactoryStorage { slots: self.slots },
        }
    }
}

impl Default for SolverRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Frozen set of solver factories
pub struct SolverRegistry {
    storage: SolverFactoryStorage,
}

impl SolverRegistry {
    pub fn storage(&self) -> &SolverFactoryStorage {
        &self.storage
    }

    /// Parse `input` for `year`/`day` with default options
    pub fn create_solver<'a>(
        &self,
        year: u16,
        day: u8,
        input: &'a str,
    ) -> Result<Box<dyn DynSolver + 'a>, SolverError> {
        self.create_solver_with_options(year, day, input, &SolverOptions::default())
    }

    /// Parse `input` for `year`/`day`, handing `options` to the solver.
    ///
    /// Fails with `InvalidYearDay`, `NotFound` or the solver's `ParseError`.
    pub fn create_solver_with_options<'a>(
        &self,
        year: u16,
        day: u8,
        input: &'a str,
        options: &SolverOptions,
    ) -> Result<Box<dyn DynSolver + 'a>, SolverError> {
        let slot = Slot::new(year, day).ok_or(SolverError::InvalidYearDay(year, day))?;
        let entry = self
            .storage
            .entry(slot)
            .ok_or(SolverError::NotFound(year, day))?;
        Ok((entry.factory)(input, options)?)
    }
}

/// Object-safe registration hook used by [`SolverPlugin`]
///
/// Blanket-implemented for every `Solver + Sync + 'static`, so unrelated
/// solver types can share one `inventory` collection.
pub trait RegisterableSolver: Sync {
    fn register_with(
        &self,
        builder: SolverRegistryBuilder,
        year: u16,
        day: u8,
        tags: &'static [&'static str],
    ) -> Result<SolverRegistryBuilder, RegistrationError>;

    fn parts(&self) -> u8;
}

impl<S> RegisterableSolver for S
where
    S: Solver + Sync + 'static,
{
    fn register_with(
        &self,
        builder: SolverRegistryBuilder,
        year: u16,
        day: u8,
        tags: &'static [&'static str],
    ) -> Result<SolverRegistryBuilder, RegistrationError> {
        builder.register_tagged::<S>(year, day, tags)
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}

/// Plugin record collected with `inventory`
///
/// `#[derive(AutoRegisterSolver)]` emits these; submitting one by hand
/// looks like:
///
/// ```no_run
/// use aoc_solver::{AocParser, ParseError, SolveError, Solver, SolverPlugin};
///
/// struct Noop;
///
/// impl AocParser for Noop {
///     type SharedData<'a> = ();
///
///     fn parse(_: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         Ok(())
///     }
/// }
///
/// impl Solver for Noop {
///     const PARTS: u8 = 1;
///
///     fn solve_part(_: &mut (), part: u8) -> Result<String, SolveError> {
///         Err(SolveError::PartNotImplemented(part))
///     }
/// }
///
/// aoc_solver::inventory::submit! {
///     SolverPlugin {
///         year: 2023,
///         day: 25,
///         solver: &Noop,
///         tags: &["2023", "noop"],
///     }
/// }
/// ```
pub struct SolverPlugin {
    pub year: u16,
    pub day: u8,
    pub solver: &'static dyn RegisterableSolver,
    /// Free-form labels used for filtering, e.g. "2023", "grid"
    pub tags: &'static [&'static str],
}

inventory::collect!(SolverPlugin);

/// Every plugin linked into the binary
pub fn plugins() -> impl Iterator<Item = &'static SolverPlugin> {
    inventory::iter::<SolverPlugin>.into_iter()
}

/// Register `$solver` on a builder held in a mutable binding
///
/// Panics on a registration error.
///
/// ```
/// use aoc_solver::{AocParser, register_solver, ParseError, SolverRegistryBuilder, SolveError, Solver};
///
/// struct Echo;
///
/// impl AocParser for Echo {
///     type SharedData<'a> = &'a str;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         Ok(input.trim())
///     }
/// }
///
/// impl Solver for Echo {
///     const PARTS: u8 = 1;
///
///     fn solve_part(shared: &mut &str, _: u8) -> Result<String, SolveError> {
///         Ok(shared.to_string())
///     }
/// }
///
/// let mut builder = SolverRegistryBuilder::new();
/// register_solver!(builder, Echo, 2023, 1);
/// let registry = builder.build();
/// let mut solver = registry.create_solver(2023, 1, " hi ").unwrap();
/// assert_eq!(solver.solve(1).unwrap().answer, "hi");
/// ```
#[macro_export]
macro_rules! register_solver {
    ($builder:expr, $solver:ty, $year:expr, $day:expr) => {
        $builder = $builder
            .register_solver::<$solver>($year, $day)
            .expect("Failed to register solver");
    };
}
