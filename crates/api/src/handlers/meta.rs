//! Service index and endpoint documentation.

use axum::Json;
use catalog_core::pagination::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use serde_json::{json, Value};

const SERVICE_NAME: &str = "Product Catalog API";

/// GET /
pub async fn index() -> Json<Value> {
    Json(json!({
        "name": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "documentation": "/api",
        "endpoints": {
            "health": "/api/health",
            "attributes": "/api/attributes",
            "categories": "/api/categories/tree",
            "products": "/api/products",
        },
    }))
}

/// GET /api
pub async fn docs() -> Json<Value> {
    let limit_help = format!("Items per page (default: {DEFAULT_PAGE_LIMIT}, max: {MAX_PAGE_LIMIT})");

    Json(json!({
        "name": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "description": "API for browsing product categories, their attributes and products",
        "endpoints": {
            "health": {
                "method": "GET",
                "path": "/api/health",
                "description": "Service and database health",
            },
            "attributes": {
                "method": "GET",
                "path": "/api/attributes",
                "description": "Attributes resolved against selected category nodes",
                "queryParams": {
                    "categoryNodes": "Category IDs; repeat the parameter or use a comma-separated list",
                    "linkType": "Restrict to direct, inherited and/or global links",
                    "notApplicable": "Return the attributes that do not apply (true/false)",
                    "keyword": "Case-insensitive match on name or description",
                    "page": "Page number (default: 1)",
                    "limit": limit_help,
                    "sortBy": "name, type, created_at or product_count",
                    "sortOrder": "asc or desc",
                },
            },
            "categories": {
                "method": "GET",
                "path": "/api/categories/tree",
                "description": "Category tree structure",
                "queryParams": {
                    "includeAttributeCount": "Include direct attribute counts (true/false)",
                    "includeProductCount": "Include product counts (true/false)",
                },
            },
            "products": {
                "method": "GET",
                "path": "/api/products",
                "description": "Products in the given categories and their descendants",
                "queryParams": {
                    "categoryId": "Category IDs; repeat the parameter or use a comma-separated list",
                    "keyword": "Case-insensitive match on product name",
                    "page": "Page number (default: 1)",
                    "limit": limit_help,
                    "sortBy": "name, category or created_at",
                    "sortOrder": "asc or desc",
                },
            },
        },
    }))
}
