pub mod query;
pub mod seed;
pub mod table;

pub use table::{StoreError, Table};

use obra_types::{
    Budget, Decomposition, Element, Measurement, Price, Project, Role, Unit, User, Version,
};

/// Every resource table behind one shared handle. Cheap to construct empty;
/// call [`seed::populate`] for a usable first run.
#[derive(Default)]
pub struct Store {
    pub projects: Table<Project>,
    pub budgets: Table<Budget>,
    pub users: Table<User>,
    pub roles: Table<Role>,
    pub units: Table<Unit>,
    pub versions: Table<Version>,
    pub prices: Table<Price>,
    pub elements: Table<Element>,
    pub measurements: Table<Measurement>,
    pub decompositions: Table<Decomposition>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }
}
