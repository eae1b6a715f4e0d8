use serde_json::json;
use tracing::info;

use obra_types::{
    Budget, BudgetStatus, CalculationMode, Decomposition, Element, ElementType, Measurement,
    Price, PriceType, Project, Role, Unit, User, Version,
};

use crate::Store;

/// Fills an empty store with the two fixed roles, the configured admin
/// account, and a small set of demo rows so every screen has content on
/// first run.
pub fn populate(store: &Store, admin_email: &str, admin_password: &str) -> Result<(), bcrypt::BcryptError> {
    let admin_role = store.roles.create(Role {
        name: "admin".into(),
        ..Role::default()
    });
    store.roles.create(Role {
        name: "user".into(),
        ..Role::default()
    });

    let hashed = bcrypt::hash(admin_password, bcrypt::DEFAULT_COST)?;
    store.users.create(User {
        username: "admin".into(),
        email: admin_email.into(),
        hashed_password: hashed,
        role_id: admin_role.id.unwrap_or(1),
        is_active: true,
        ..User::default()
    });

    let housing = store.projects.create(Project {
        code: "PRJ-001".into(),
        title: "Riverside housing block".into(),
        ..Project::default()
    });
    let ring_road = store.projects.create(Project {
        code: "PRJ-002".into(),
        title: "North ring road, section 2".into(),
        ..Project::default()
    });
    store.projects.create(Project {
        code: "PRJ-003".into(),
        title: "Municipal library retrofit".into(),
        ..Project::default()
    });

    let base_budget = store.budgets.create(Budget {
        project_id: housing.id.unwrap_or(1),
        code: "PRJ-001.B1".into(),
        version_number: 1,
        name: "Base estimate".into(),
        status: BudgetStatus::Draft,
        ..Budget::default()
    });
    store.budgets.create(Budget {
        project_id: housing.id.unwrap_or(1),
        code: "PRJ-001.B2".into(),
        version_number: 2,
        name: "Revised estimate".into(),
        status: BudgetStatus::Submitted,
        ..Budget::default()
    });
    store.budgets.create(Budget {
        project_id: ring_road.id.unwrap_or(2),
        code: "PRJ-002.B1".into(),
        version_number: 1,
        name: "Tender budget".into(),
        status: BudgetStatus::Approved,
        ..Budget::default()
    });

    for (name, symbol, description) in [
        ("meter", "m", "length"),
        ("square meter", "m2", "area"),
        ("cubic meter", "m3", "volume"),
        ("kilogram", "kg", "mass"),
        ("hour", "h", "labour time"),
    ] {
        store.units.create(Unit {
            name: name.into(),
            symbol: symbol.into(),
            description: Some(description.into()),
            formula: String::new(),
            ..Unit::default()
        });
    }

    let bank = store.versions.create(Version {
        name: "2025.Q1".into(),
        ..Version::default()
    });
    store.versions.create(Version {
        name: "2025.Q2".into(),
        ..Version::default()
    });

    let version_id = bank.id.unwrap_or(1);
    let concrete = store.prices.create(Price {
        version_id,
        code: "MT.01".into(),
        description: "Structural concrete C25/30".into(),
        base_price: 96.50,
        unit_id: 3,
        price_type: PriceType::Base,
        ..Price::default()
    });
    store.prices.create(Price {
        version_id,
        code: "MT.02".into(),
        description: "Corrugated steel bar B500S".into(),
        base_price: 1.12,
        unit_id: 4,
        price_type: PriceType::Base,
        ..Price::default()
    });
    let labourer = store.prices.create(Price {
        version_id,
        code: "MO.01".into(),
        description: "Site labourer".into(),
        base_price: 18.40,
        unit_id: 5,
        price_type: PriceType::Base,
        ..Price::default()
    });
    let slab = store.prices.create(Price {
        version_id,
        code: "PA.01".into(),
        description: "Reinforced foundation slab".into(),
        base_price: 0.0,
        unit_id: 2,
        price_type: PriceType::Decomposed,
        ..Price::default()
    });

    let budget_id = base_budget.id.unwrap_or(1);
    let foundations = store.elements.create(Element {
        budget_id,
        parent_id: None,
        version_id,
        element_type: ElementType::Chapter,
        code: "01".into(),
        budget_code: "01".into(),
        description: Some("Foundations".into()),
        ..Element::default()
    });
    let slab_line = store.elements.create(Element {
        budget_id,
        parent_id: foundations.id,
        version_id,
        element_type: ElementType::Line,
        code: slab.code.clone(),
        budget_code: "01.01".into(),
        description: Some("Foundation slab under cores".into()),
        ..Element::default()
    });
    store.elements.create(Element {
        budget_id,
        parent_id: foundations.id,
        version_id,
        element_type: ElementType::Line,
        code: concrete.code.clone(),
        budget_code: "01.02".into(),
        description: Some("Blinding layer".into()),
        ..Element::default()
    });

    store.measurements.create(Measurement {
        element_id: slab_line.id.unwrap_or(2),
        price_id: slab.id.unwrap_or(4),
        params_json: json!({ "length": 12.0, "width": 8.5 }),
        measurement_text: Some("Core A footprint".into()),
        measured_quantity: 102.0,
        ..Measurement::default()
    });
    store.measurements.create(Measurement {
        element_id: slab_line.id.unwrap_or(2),
        price_id: slab.id.unwrap_or(4),
        params_json: json!({ "length": 9.0, "width": 8.5 }),
        measurement_text: Some("Core B footprint".into()),
        measured_quantity: 76.5,
        ..Measurement::default()
    });

    store.decompositions.create(Decomposition {
        parent_price_id: slab.id.unwrap_or(4),
        component_price_id: concrete.id.unwrap_or(1),
        calculation_mode: CalculationMode::Fixed,
        fixed_quantity: Some(0.35),
        params_json: None,
        ..Decomposition::default()
    });
    store.decompositions.create(Decomposition {
        parent_price_id: slab.id.unwrap_or(4),
        component_price_id: labourer.id.unwrap_or(3),
        calculation_mode: CalculationMode::Formula,
        fixed_quantity: None,
        params_json: Some(json!({ "expr": "thickness * crew_factor" })),
        ..Decomposition::default()
    });

    info!(
        roles = store.roles.count(),
        users = store.users.count(),
        projects = store.projects.count(),
        prices = store.prices.count(),
        "store seeded"
    );
    Ok(())
}
