use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::{GridShape, GroupName, ModelTier, PipelineContext, SourceGroup, SourcePage};
use crate::infrastructure::imaging::load_page;
use crate::presentation::state::AppState;

use super::error_response::error_response;

/// Maximum accepted multipart body for one extraction run.
pub const MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

#[derive(Default)]
struct Upload {
    groups: Vec<SourceGroup>,
    columns: Option<String>,
    rows: Option<String>,
    primary: Option<String>,
}

impl Upload {
    fn group_mut(&mut self, name: &str) -> &mut SourceGroup {
        let position = match self.groups.iter().position(|g| g.name.as_str() == name) {
            Some(position) => position,
            None => {
                self.groups.push(SourceGroup::new(name, ModelTier::Secondary));
                self.groups.len() - 1
            }
        };
        &mut self.groups[position]
    }

    fn page_count(&self) -> usize {
        self.groups.iter().map(|g| g.pages().len()).sum()
    }
}

/// Multipart form: every file field is a page of the group named by the field; text
/// fields `columns`, `rows` override the grid, `primary` names the main group and
/// `group` declares a group that may have no pages.
#[tracing::instrument(skip(state, multipart))]
pub async fn extract_handler(State(state): State<AppState>, multipart: Multipart) -> Response {
    let upload = match read_upload(multipart).await {
        Ok(upload) => upload,
        Err(response) => return response,
    };

    if upload.groups.is_empty() {
        tracing::warn!("Extraction request with no groups");
        return error_response(StatusCode::BAD_REQUEST, "No pages uploaded");
    }

    let grid = match resolve_grid(&upload, state.aggregator.grid()) {
        Ok(grid) => grid,
        Err(message) => return error_response(StatusCode::BAD_REQUEST, message),
    };

    let page_count = upload.page_count();
    let groups = assign_tiers(upload.groups, upload.primary.as_deref());

    tracing::info!(
        groups = groups.len(),
        pages = page_count,
        grid = %grid,
        "Extraction run accepted"
    );

    let results = state.aggregator.run_on_grid(groups, grid).await;
    let context = PipelineContext::default().with_extractions(results);

    (StatusCode::OK, Json(context)).into_response()
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, Response> {
    let mut upload = Upload::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return Err(error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read multipart: {}", e),
                ));
            }
        };

        let name = field.name().unwrap_or_default().trim().to_string();
        let file_name = field.file_name().map(str::to_string);

        let Some(file_name) = file_name else {
            let value = field.text().await.map_err(|e| {
                error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read field '{}': {}", name, e),
                )
            })?;
            let value = value.trim().to_string();
            match name.as_str() {
                "columns" => upload.columns = Some(value),
                "rows" => upload.rows = Some(value),
                "primary" => upload.primary = Some(value),
                "group" if !value.is_empty() => {
                    upload.group_mut(&value);
                }
                other => tracing::debug!(field = other, "Ignoring unknown form field"),
            }
            continue;
        };

        if name.is_empty() {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "File fields must be named after their group",
            ));
        }

        let data = field.bytes().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to read file bytes");
            error_response(
                StatusCode::BAD_REQUEST,
                format!("Failed to read file: {}", e),
            )
        })?;

        let file_id = unique_file_id(upload.group_mut(&name), &file_name);
        let page = decode_page(file_id, data.to_vec()).await?;
        upload.group_mut(&name).push_page(page);
    }

    Ok(upload)
}

async fn decode_page(file_id: String, data: Vec<u8>) -> Result<SourcePage, Response> {
    let outcome = tokio::task::spawn_blocking(move || load_page(&file_id, &data)).await;

    match outcome {
        Ok(Ok(page)) => Ok(page),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Rejected uploaded page");
            Err(error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))
        }
        Err(e) => {
            tracing::error!(error = %e, "Page decoder task failed");
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to decode page",
            ))
        }
    }
}

/// Position tags carry the file id, so two uploads with the same name need distinct ids.
fn unique_file_id(group: &SourceGroup, file_name: &str) -> String {
    let taken = |candidate: &str| group.pages().iter().any(|p| p.file_id() == candidate);
    if !taken(file_name) {
        return file_name.to_string();
    }
    (2..)
        .map(|n| format!("{file_name}#{n}"))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| file_name.to_string())
}

fn resolve_grid(upload: &Upload, default: GridShape) -> Result<GridShape, String> {
    let parse = |value: Option<&String>, key: &str, fallback: u32| match value {
        None => Ok(fallback),
        Some(v) if v.is_empty() => Ok(fallback),
        Some(v) => v
            .parse::<u32>()
            .map_err(|_| format!("'{}' must be a positive integer, got '{}'", key, v)),
    };

    let columns = parse(upload.columns.as_ref(), "columns", default.columns())?;
    let rows = parse(upload.rows.as_ref(), "rows", default.rows())?;
    GridShape::new(columns, rows).map_err(|e| e.to_string())
}

/// The named group (or the first uploaded one) is read by the primary model.
fn assign_tiers(groups: Vec<SourceGroup>, primary: Option<&str>) -> Vec<SourceGroup> {
    let primary: Option<GroupName> = primary
        .filter(|name| !name.is_empty())
        .map(GroupName::from)
        .or_else(|| groups.first().map(|g| g.name.clone()));

    groups
        .into_iter()
        .map(|mut group| {
            if Some(&group.name) == primary.as_ref() {
                group.tier = ModelTier::Primary;
            }
            group
        })
        .collect()
}
