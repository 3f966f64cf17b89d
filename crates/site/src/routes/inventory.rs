//! Inventory route handlers.
//!
//! Public catalog pages plus the staff-only management surface. Management
//! routes gate on `RequireStaff`; the JSON endpoint feeds the management
//! page's classification picker.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use cedar_motors_core::{ClassificationId, VehicleId};

use crate::db::RepositoryError;
use crate::db::inventory::InventoryRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{FlashLevel, OptionalAuth, RequireStaff, flash};
use crate::models::session::CurrentAccount;
use crate::models::vehicle::{Classification, NewVehicle, Vehicle, VehicleUpdate};
use crate::routes::Shell;
use crate::state::AppState;
use crate::validation::{self, VehicleFormInput};

// =============================================================================
// Form Types
// =============================================================================

/// New classification form data.
#[derive(Debug, Deserialize)]
pub struct ClassificationForm {
    pub classification_name: String,
}

/// Vehicle add/edit form data.
///
/// Everything arrives as strings; validation converts and reports all
/// problems at once.
#[derive(Debug, Deserialize)]
pub struct VehicleForm {
    #[serde(default)]
    pub inv_id: Option<i32>,
    pub classification_id: String,
    pub make: String,
    pub model: String,
    pub description: String,
    pub image: String,
    pub thumbnail: String,
    pub price: String,
    pub year: String,
    pub miles: String,
    pub color: String,
}

impl VehicleForm {
    fn into_input(self) -> (Option<i32>, VehicleFormInput) {
        let input = VehicleFormInput {
            classification_id: self.classification_id,
            make: self.make,
            model: self.model,
            description: self.description,
            image: self.image,
            thumbnail: self.thumbnail,
            price: self.price,
            year: self.year,
            miles: self.miles,
            color: self.color,
        };
        (self.inv_id, input)
    }
}

/// Delete confirmation form data.
#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    pub inv_id: i32,
}

// =============================================================================
// Templates
// =============================================================================

/// Classification listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "inventory/classification.html")]
pub struct ClassificationTemplate {
    pub shell: Shell,
    pub classification: Classification,
    pub vehicles: Vec<Vehicle>,
}

/// Vehicle detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "inventory/detail.html")]
pub struct DetailTemplate {
    pub shell: Shell,
    pub vehicle: Vehicle,
}

/// Management dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "inventory/management.html")]
pub struct ManagementTemplate {
    pub shell: Shell,
    pub classifications: Vec<Classification>,
}

/// New classification form template.
#[derive(Template, WebTemplate)]
#[template(path = "inventory/add_classification.html")]
pub struct AddClassificationTemplate {
    pub shell: Shell,
    pub errors: Vec<String>,
    pub classification_name: String,
}

/// Vehicle add/edit form template.
///
/// Shared between the add and edit flows; `editing` picks the heading and
/// the form action.
#[derive(Template, WebTemplate)]
#[template(path = "inventory/vehicle_form.html")]
pub struct VehicleFormTemplate {
    pub shell: Shell,
    pub errors: Vec<String>,
    pub classifications: Vec<Classification>,
    pub editing: Option<i32>,
    pub input: VehicleFormInput,
}

/// Delete confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "inventory/delete_confirm.html")]
pub struct DeleteConfirmTemplate {
    pub shell: Shell,
    pub vehicle: Vehicle,
}

// =============================================================================
// Public Catalog
// =============================================================================

/// Display all vehicles in a classification.
pub async fn classification(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(account): OptionalAuth,
    Path(classification_id): Path<i32>,
) -> Result<Response> {
    let repo = InventoryRepository::new(state.pool());
    let id = ClassificationId::new(classification_id);

    let classification = repo
        .get_classification(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("classification {classification_id}")))?;
    let vehicles = repo.list_by_classification(id).await?;

    let shell = Shell::load(&state, &session, account).await?;
    Ok(ClassificationTemplate {
        shell,
        classification,
        vehicles,
    }
    .into_response())
}

/// Display a single vehicle's detail page.
pub async fn detail(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(account): OptionalAuth,
    Path(inv_id): Path<i32>,
) -> Result<Response> {
    let vehicle = InventoryRepository::new(state.pool())
        .get_vehicle(VehicleId::new(inv_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("vehicle {inv_id}")))?;

    let shell = Shell::load(&state, &session, account).await?;
    Ok(DetailTemplate { shell, vehicle }.into_response())
}

// =============================================================================
// Management
// =============================================================================

/// Display the inventory management dashboard.
pub async fn management(
    State(state): State<AppState>,
    session: Session,
    RequireStaff(staff): RequireStaff,
) -> Result<Response> {
    let classifications = InventoryRepository::new(state.pool())
        .list_classifications()
        .await?;
    let shell = Shell::load(&state, &session, Some(staff)).await?;
    Ok(ManagementTemplate {
        shell,
        classifications,
    }
    .into_response())
}

/// Display the new classification form.
pub async fn add_classification_page(
    State(state): State<AppState>,
    session: Session,
    RequireStaff(staff): RequireStaff,
) -> Result<Response> {
    let shell = Shell::load(&state, &session, Some(staff)).await?;
    Ok(AddClassificationTemplate {
        shell,
        errors: Vec::new(),
        classification_name: String::new(),
    }
    .into_response())
}

/// Handle the new classification form.
pub async fn add_classification(
    State(state): State<AppState>,
    session: Session,
    RequireStaff(staff): RequireStaff,
    Form(form): Form<ClassificationForm>,
) -> Result<Response> {
    let name = form.classification_name.trim().to_string();

    let mut errors = validation::FormErrors::new();
    validation::check_classification_name(&mut errors, &name);

    if let Err(errors) = errors.finish() {
        let shell = Shell::load(&state, &session, Some(staff)).await?;
        return Ok(AddClassificationTemplate {
            shell,
            errors,
            classification_name: name,
        }
        .into_response());
    }

    match InventoryRepository::new(state.pool())
        .create_classification(&name)
        .await
    {
        Ok(created) => {
            tracing::info!(classification = %created.name, "Classification created");
            flash(
                &session,
                FlashLevel::Success,
                format!("The {} classification was successfully added.", created.name),
            )
            .await;
            Ok(Redirect::to("/inv/").into_response())
        }
        Err(RepositoryError::Conflict(_)) => {
            let shell = Shell::load(&state, &session, Some(staff)).await?;
            Ok(AddClassificationTemplate {
                shell,
                errors: vec![format!("The {name} classification already exists.")],
                classification_name: name,
            }
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Display the new vehicle form.
pub async fn add_vehicle_page(
    State(state): State<AppState>,
    session: Session,
    RequireStaff(staff): RequireStaff,
) -> Result<Response> {
    render_vehicle_form(
        &state,
        &session,
        staff,
        Vec::new(),
        None,
        VehicleFormInput::default(),
    )
    .await
}

/// Handle the new vehicle form.
pub async fn add_vehicle(
    State(state): State<AppState>,
    session: Session,
    RequireStaff(staff): RequireStaff,
    Form(form): Form<VehicleForm>,
) -> Result<Response> {
    let (_, input) = form.into_input();

    match validation::check_vehicle(&input) {
        Ok(valid) => {
            let vehicle = InventoryRepository::new(state.pool())
                .create_vehicle(&new_vehicle(&valid))
                .await?;

            tracing::info!(vehicle_id = %vehicle.id, "Vehicle created");
            flash(
                &session,
                FlashLevel::Success,
                format!(
                    "The {} {} {} was successfully added.",
                    vehicle.year, vehicle.make, vehicle.model
                ),
            )
            .await;
            Ok(Redirect::to("/inv/").into_response())
        }
        Err(errors) => render_vehicle_form(&state, &session, staff, errors, None, input).await,
    }
}

/// Display the edit form for an existing vehicle.
pub async fn edit_page(
    State(state): State<AppState>,
    session: Session,
    RequireStaff(staff): RequireStaff,
    Path(inv_id): Path<i32>,
) -> Result<Response> {
    let vehicle = InventoryRepository::new(state.pool())
        .get_vehicle(VehicleId::new(inv_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("vehicle {inv_id}")))?;

    let input = VehicleFormInput {
        classification_id: vehicle.classification_id.as_i32().to_string(),
        make: vehicle.make,
        model: vehicle.model,
        description: vehicle.description,
        image: vehicle.image,
        thumbnail: vehicle.thumbnail,
        price: vehicle.price.to_string(),
        year: vehicle.year.to_string(),
        miles: vehicle.miles.to_string(),
        color: vehicle.color,
    };

    render_vehicle_form(&state, &session, staff, Vec::new(), Some(inv_id), input).await
}

/// Handle the vehicle update form.
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    RequireStaff(staff): RequireStaff,
    Form(form): Form<VehicleForm>,
) -> Result<Response> {
    let (inv_id, input) = form.into_input();
    let inv_id =
        inv_id.ok_or_else(|| AppError::BadRequest("missing vehicle id".to_string()))?;

    match validation::check_vehicle(&input) {
        Ok(valid) => {
            let updated = InventoryRepository::new(state.pool())
                .update_vehicle(&VehicleUpdate {
                    id: VehicleId::new(inv_id),
                    fields: new_vehicle(&valid),
                })
                .await?;

            tracing::info!(vehicle_id = %updated.id, "Vehicle updated");
            flash(
                &session,
                FlashLevel::Success,
                format!(
                    "The {} {} {} was successfully updated.",
                    updated.year, updated.make, updated.model
                ),
            )
            .await;
            Ok(Redirect::to("/inv/").into_response())
        }
        Err(errors) => {
            render_vehicle_form(&state, &session, staff, errors, Some(inv_id), input).await
        }
    }
}

/// Display the delete confirmation page.
pub async fn delete_page(
    State(state): State<AppState>,
    session: Session,
    RequireStaff(staff): RequireStaff,
    Path(inv_id): Path<i32>,
) -> Result<Response> {
    let vehicle = InventoryRepository::new(state.pool())
        .get_vehicle(VehicleId::new(inv_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("vehicle {inv_id}")))?;

    let shell = Shell::load(&state, &session, Some(staff)).await?;
    Ok(DeleteConfirmTemplate { shell, vehicle }.into_response())
}

/// Handle the delete confirmation form.
pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    RequireStaff(_staff): RequireStaff,
    Form(form): Form<DeleteForm>,
) -> Result<Response> {
    let deleted = InventoryRepository::new(state.pool())
        .delete_vehicle(VehicleId::new(form.inv_id))
        .await?;

    if deleted {
        tracing::info!(vehicle_id = form.inv_id, "Vehicle deleted");
        flash(
            &session,
            FlashLevel::Success,
            "The vehicle was successfully deleted.",
        )
        .await;
    } else {
        flash(
            &session,
            FlashLevel::Error,
            "Sorry, the delete failed. The vehicle may have already been removed.",
        )
        .await;
    }

    Ok(Redirect::to("/inv/").into_response())
}

/// Return a classification's vehicles as JSON for the management UI.
pub async fn classification_json(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(classification_id): Path<i32>,
) -> Result<Json<Vec<Vehicle>>> {
    let vehicles = InventoryRepository::new(state.pool())
        .list_by_classification(ClassificationId::new(classification_id))
        .await?;
    Ok(Json(vehicles))
}

// =============================================================================
// Helpers
// =============================================================================

fn new_vehicle(valid: &validation::ValidVehicle) -> NewVehicle {
    NewVehicle {
        classification_id: ClassificationId::new(valid.classification_id),
        make: valid.make.clone(),
        model: valid.model.clone(),
        year: valid.year,
        description: valid.description.clone(),
        image: valid.image.clone(),
        thumbnail: valid.thumbnail.clone(),
        price: valid.price,
        miles: valid.miles,
        color: valid.color.clone(),
    }
}

async fn render_vehicle_form(
    state: &AppState,
    session: &Session,
    staff: CurrentAccount,
    errors: Vec<String>,
    editing: Option<i32>,
    input: VehicleFormInput,
) -> Result<Response> {
    let classifications = InventoryRepository::new(state.pool())
        .list_classifications()
        .await?;
    let shell = Shell::load(state, session, Some(staff)).await?;
    Ok(VehicleFormTemplate {
        shell,
        errors,
        classifications,
        editing,
        input,
    }
    .into_response())
}
