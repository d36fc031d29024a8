use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::product_service::ProductService;
use crate::domain::ports::ProductStore;
use crate::domain::product::{Product, ProductCandidate};
use crate::errors::AppError;

// ── Request / response DTOs ──────────────────────────────────────────────────

/// Product payload for create and update.
///
/// `id` and `creationDate` are accepted for symmetry with responses but are
/// always ignored.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    #[serde(default)]
    pub id: Option<i32>,
    /// Mandatory, must contain a non-whitespace character.
    #[serde(default)]
    pub name: Option<String>,
    /// Mandatory, must be greater than zero.
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub creation_date: Option<NaiveDate>,
}

impl From<ProductRequest> for ProductCandidate {
    fn from(req: ProductRequest) -> Self {
        ProductCandidate {
            id: req.id,
            name: req.name.unwrap_or_default(),
            price: req.price.unwrap_or_default(),
            creation_date: req.creation_date,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub creation_date: NaiveDate,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        ProductResponse {
            id: p.id,
            name: p.name,
            price: p.price,
            creation_date: p.creation_date,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListProductsParams {
    /// `true` lists only deleted products, otherwise only active ones.
    #[serde(default)]
    pub deleted: bool,
}

fn to_responses(products: Vec<Product>) -> Vec<ProductResponse> {
    products.into_iter().map(ProductResponse::from).collect()
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /products/
#[utoipa::path(
    get,
    path = "/products/",
    params(ListProductsParams),
    responses(
        (status = 200, description = "Active or deleted products", body = [ProductResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn list_products<S: ProductStore>(
    service: web::Data<ProductService<S>>,
    query: web::Query<ListProductsParams>,
) -> Result<HttpResponse, AppError> {
    let deleted = query.into_inner().deleted;

    let products = web::block(move || {
        if deleted {
            service.list_deleted_products()
        } else {
            service.list_products()
        }
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(to_responses(products)))
}

/// GET /products/{id}
#[utoipa::path(
    get,
    path = "/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "No active product with this id"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn get_product<S: ProductStore>(
    service: web::Data<ProductService<S>>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let product = web::block(move || service.get_product(id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

/// POST /products/
///
/// Values for `id` and `creationDate` are generated; any provided in the
/// body are ignored.
#[utoipa::path(
    post,
    path = "/products/",
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product created", body = ProductResponse),
        (status = 400, description = "Validation failed"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn create_product<S: ProductStore>(
    service: web::Data<ProductService<S>>,
    body: web::Json<ProductRequest>,
) -> Result<HttpResponse, AppError> {
    let candidate = ProductCandidate::from(body.into_inner());

    let product = web::block(move || service.create_product(candidate))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

/// PUT /products/{id}
///
/// Only `name` and `price` can be changed.
#[utoipa::path(
    put,
    path = "/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "No active product with this id"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn update_product<S: ProductStore>(
    service: web::Data<ProductService<S>>,
    path: web::Path<i32>,
    body: web::Json<ProductRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let candidate = ProductCandidate::from(body.into_inner());

    let product = web::block(move || service.update_product(id, candidate))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

/// DELETE /products/{id}
///
/// Soft delete: the product moves to the `deleted=true` listing.
#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 404, description = "No active product with this id"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn delete_product<S: ProductStore>(
    service: web::Data<ProductService<S>>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    web::block(move || service.delete_product(id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use serde_json::{json, Value};

    use super::ProductResponse;
    use crate::application::product_service::ProductService;
    use crate::configure;
    use crate::infrastructure::InMemoryProductStore;

    macro_rules! test_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(ProductService::new(
                        InMemoryProductStore::new(),
                    )))
                    .configure(configure::<InMemoryProductStore>),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn create_returns_generated_fields() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/products/")
            .set_json(json!({
                "id": 77,
                "name": "Widget",
                "price": 10.50,
                "creationDate": "2001-01-01"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: ProductResponse = test::read_body_json(resp).await;
        assert_eq!(body.id, 1);
        assert_eq!(body.name, "Widget");
        assert_eq!(body.price, 10.50);
        assert_eq!(body.creation_date, chrono::Local::now().date_naive());
    }

    #[actix_web::test]
    async fn response_uses_camel_case_and_hides_deleted_flag() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/products/")
            .set_json(json!({ "name": "Widget", "price": 2.5 }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let obj = body.as_object().expect("object");
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["creationDate", "id", "name", "price"]);
        let date = body["creationDate"].as_str().expect("date string");
        assert!(chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok());
    }

    #[actix_web::test]
    async fn create_invalid_product_returns_400_with_messages() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/products/")
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        let msg = body["error"].as_str().expect("error message");
        assert!(msg.contains("name of the product"));
        assert!(msg.contains("price of the product"));
    }

    #[actix_web::test]
    async fn malformed_json_returns_400() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/products/")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn get_unknown_product_returns_404() {
        let app = test_app!();

        let req = test::TestRequest::get().uri("/products/2").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn update_unknown_product_with_invalid_body_returns_404() {
        let app = test_app!();

        let req = test::TestRequest::put()
            .uri("/products/9")
            .set_json(json!({ "name": "", "price": -1 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn lifecycle_through_http() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/products/")
            .set_json(json!({ "name": "A", "price": 5 }))
            .to_request();
        let created: ProductResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(created.id, 1);

        let req = test::TestRequest::put()
            .uri("/products/1")
            .set_json(json!({ "id": 5, "name": "B", "price": 6, "creationDate": "1990-05-05" }))
            .to_request();
        let updated: ProductResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            updated,
            ProductResponse {
                id: 1,
                name: "B".to_string(),
                price: 6.0,
                creation_date: created.creation_date,
            }
        );

        let req = test::TestRequest::delete().uri("/products/1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert!(body.is_empty());

        let req = test::TestRequest::get().uri("/products/1").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::delete().uri("/products/1").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get().uri("/products/").to_request();
        let active: Vec<ProductResponse> = test::call_and_read_body_json(&app, req).await;
        assert!(active.is_empty());

        let req = test::TestRequest::get()
            .uri("/products/?deleted=true")
            .to_request();
        let deleted: Vec<ProductResponse> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(deleted, vec![updated]);
    }

    #[actix_web::test]
    async fn collection_is_reachable_without_trailing_slash() {
        let app = test_app!();

        let req = test::TestRequest::get()
            .uri("/products?deleted=false")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn openapi_document_lists_product_paths() {
        let app = test_app!();

        let req = test::TestRequest::get()
            .uri("/api-docs/openapi.json")
            .to_request();
        let doc: Value = test::call_and_read_body_json(&app, req).await;
        assert!(doc["paths"]["/products/"].is_object());
        assert!(doc["paths"]["/products/{id}"]["delete"].is_object());
    }
}
