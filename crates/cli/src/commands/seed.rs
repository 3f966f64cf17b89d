//! Seed the database with starter classifications and vehicles.
//!
//! Safe to run more than once: classifications that already exist are
//! skipped, and vehicles are only inserted when the inventory is empty.

use rust_decimal::Decimal;
use tracing::info;

use cedar_motors_site::db::RepositoryError;
use cedar_motors_site::db::inventory::InventoryRepository;
use cedar_motors_site::models::vehicle::NewVehicle;

const CLASSIFICATIONS: &[&str] = &["Custom", "Sedan", "Sport", "SUV", "Truck"];

struct SeedVehicle {
    classification: &'static str,
    make: &'static str,
    model: &'static str,
    year: i32,
    description: &'static str,
    price: i64,
    miles: i32,
    color: &'static str,
}

const VEHICLES: &[SeedVehicle] = &[
    SeedVehicle {
        classification: "Sport",
        make: "Chevy",
        model: "Camaro",
        year: 2018,
        description: "If you want to look cool this is the car you need! This car has great \
                      performance at an affordable price.",
        price: 25_000,
        miles: 101_222,
        color: "Silver",
    },
    SeedVehicle {
        classification: "Sedan",
        make: "Ford",
        model: "Model T",
        year: 1921,
        description: "The Ford Model T can be a bit tricky to drive. It was the first car to \
                      be put into production, and it set the standard for all that followed.",
        price: 30_000,
        miles: 26_357,
        color: "Black",
    },
    SeedVehicle {
        classification: "SUV",
        make: "Jeep",
        model: "Wrangler",
        year: 2019,
        description: "The Jeep Wrangler is small and compact with enough power to get you \
                      where you want to go. Its great for everyday driving as well as offroading.",
        price: 28_045,
        miles: 41_205,
        color: "Yellow",
    },
    SeedVehicle {
        classification: "Truck",
        make: "GMC",
        model: "Denali",
        year: 2022,
        description: "This is a true luxury truck. Tow whatever you want in comfort.",
        price: 77_195,
        miles: 21_222,
        color: "Blue",
    },
    SeedVehicle {
        classification: "Custom",
        make: "Batmobile",
        model: "Custom",
        year: 2007,
        description: "Ever want to be a superhero? Now you can! Armor plated, bullet proof \
                      glass, and a bat-tastic look.",
        price: 65_000,
        miles: 29_887,
        color: "Black",
    },
];

/// Seed classifications and sample vehicles.
///
/// # Errors
///
/// Returns an error if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    let repo = InventoryRepository::new(&pool);

    for name in CLASSIFICATIONS {
        match repo.create_classification(name).await {
            Ok(created) => info!(classification = %created.name, "Classification created"),
            Err(RepositoryError::Conflict(_)) => {
                info!(classification = %name, "Classification already exists, skipping");
            }
            Err(e) => return Err(e.into()),
        }
    }

    let classifications = repo.list_classifications().await?;

    for seed in VEHICLES {
        let Some(classification) = classifications.iter().find(|c| c.name == seed.classification)
        else {
            continue;
        };

        let existing = repo.list_by_classification(classification.id).await?;
        if existing
            .iter()
            .any(|v| v.make == seed.make && v.model == seed.model && v.year == seed.year)
        {
            info!(make = seed.make, model = seed.model, "Vehicle already exists, skipping");
            continue;
        }

        let slug = format!(
            "{}-{}",
            seed.make.to_lowercase().replace(' ', "-"),
            seed.model.to_lowercase().replace(' ', "-")
        );
        let vehicle = repo
            .create_vehicle(&NewVehicle {
                classification_id: classification.id,
                make: seed.make.to_string(),
                model: seed.model.to_string(),
                year: seed.year,
                description: seed.description.to_string(),
                image: format!("/static/images/vehicles/{slug}.jpg"),
                thumbnail: format!("/static/images/vehicles/{slug}-tn.jpg"),
                price: Decimal::from(seed.price),
                miles: seed.miles,
                color: seed.color.to_string(),
            })
            .await?;
        info!(vehicle_id = %vehicle.id, make = seed.make, model = seed.model, "Vehicle created");
    }

    info!("Seeding complete");
    Ok(())
}
