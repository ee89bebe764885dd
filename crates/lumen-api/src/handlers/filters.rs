use axum::Json;
use lumen_processing::filters::registry;
use serde_json::{json, Map, Value};

/// List available filters with their parameter specs and example usage.
#[utoipa::path(
    get,
    path = "/filters",
    tag = "filters",
    responses(
        (status = 200, description = "Available filters keyed by name")
    )
)]
pub async fn list_filters() -> Json<Value> {
    let specs = registry();

    let mut filters = Map::new();
    let mut categories: Map<String, Value> = Map::new();

    for spec in specs {
        let mut entry = Map::new();
        entry.insert("description".to_string(), json!(spec.description));
        entry.insert("category".to_string(), json!(spec.category));
        entry.insert("example_usage".to_string(), json!(spec.example_usage));
        if let Some(param) = &spec.parameter {
            entry.insert(
                "parameter".to_string(),
                serde_json::to_value(param).unwrap_or(Value::Null),
            );
        }
        filters.insert(spec.name.to_string(), Value::Object(entry));

        let names = categories
            .entry(spec.category.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(names) = names {
            names.push(json!(spec.name));
        }
    }

    Json(json!({
        "filters": filters,
        "count": specs.len(),
        "categories": categories,
    }))
}
