// verdant/app/src/web/handlers/plant_handlers.rs

use actix_web::{web, HttpResponse};
use tracing::{info, instrument};
use verdant::{NewPlant, PlantId, PlantQuery};

use crate::errors::AppError;
use crate::state::AppState;

#[instrument(name = "handler::list_plants", skip(app_state, query_params), fields(name = ?query_params.name, category = ?query_params.category))]
pub async fn list_plants_handler(
  app_state: web::Data<AppState>,
  query_params: web::Query<PlantQuery>,
) -> Result<HttpResponse, AppError> {
  let query = query_params.into_inner();
  let plants = app_state.catalog.list(&query).await?;
  info!("Successfully fetched {} plants.", plants.len());
  Ok(HttpResponse::Ok().json(plants))
}

#[instrument(name = "handler::get_plant", skip(app_state, path), fields(plant_id = %path.as_str()))]
pub async fn get_plant_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let plant_id = PlantId::new(path.into_inner());
  let plant = app_state.catalog.get(&plant_id).await?;
  info!("Plant {} fetched successfully.", plant_id);
  Ok(HttpResponse::Ok().json(plant))
}

#[instrument(name = "handler::create_plant", skip(app_state, req_payload))]
pub async fn create_plant_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<NewPlant>,
) -> Result<HttpResponse, AppError> {
  let plant = app_state.catalog.create(req_payload.into_inner()).await?;
  info!(plant_id = %plant.id, "Plant '{}' created.", plant.name);
  Ok(HttpResponse::Created().json(plant))
}
